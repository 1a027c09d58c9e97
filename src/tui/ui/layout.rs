//! Layout builder that skips hidden sections
//!
//! Sections are declared in order with a visibility flag; only the visible
//! ones take space, and lookups for hidden ones return `None`.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use std::collections::HashMap;

/// Section identifiers for layout areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Title,
    /// Search or go-to-path input line
    Prompt,
    Body,
    Status,
    Navigation,
    Preview,
}

/// A dynamic layout that maps section IDs to their rendered areas
pub struct DynamicLayout {
    area: Rect,
    areas: HashMap<Section, Rect>,
}

impl DynamicLayout {
    pub fn vertical(area: Rect) -> DynamicLayoutBuilder {
        DynamicLayoutBuilder::new(area, Direction::Vertical)
    }

    pub fn horizontal(area: Rect) -> DynamicLayoutBuilder {
        DynamicLayoutBuilder::new(area, Direction::Horizontal)
    }

    pub fn get(&self, id: Section) -> Option<Rect> {
        self.areas.get(&id).copied()
    }

    /// Area of an always-visible section. Falls back to an empty rect at the
    /// layout origin if the section was never declared.
    pub fn area(&self, id: Section) -> Rect {
        self.get(id)
            .unwrap_or(Rect::new(self.area.x, self.area.y, 0, 0))
    }
}

pub struct DynamicLayoutBuilder {
    area: Rect,
    direction: Direction,
    sections: Vec<(Section, Constraint, bool)>,
}

impl DynamicLayoutBuilder {
    fn new(area: Rect, direction: Direction) -> Self {
        Self {
            area,
            direction,
            sections: Vec::new(),
        }
    }

    pub fn section(self, id: Section, constraint: Constraint) -> Self {
        self.section_if(true, id, constraint)
    }

    pub fn section_if(mut self, visible: bool, id: Section, constraint: Constraint) -> Self {
        self.sections.push((id, constraint, visible));
        self
    }

    pub fn build(self) -> DynamicLayout {
        let visible: Vec<(Section, Constraint)> = self
            .sections
            .into_iter()
            .filter(|(_, _, visible)| *visible)
            .map(|(id, constraint, _)| (id, constraint))
            .collect();

        let chunks = Layout::default()
            .direction(self.direction)
            .constraints(visible.iter().map(|(_, c)| *c))
            .split(self.area);

        let areas = visible
            .iter()
            .zip(chunks.iter())
            .map(|((id, _), rect)| (*id, *rect))
            .collect();

        DynamicLayout {
            area: self.area,
            areas,
        }
    }
}
