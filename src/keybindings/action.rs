//! Action definitions for keybindings
//!
//! This module defines all bindable actions in treenav.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// All bindable actions in treenav
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "PascalCase")]
#[strum(serialize_all = "PascalCase")]
pub enum Action {
    // === Navigation ===
    MoveUp,
    MoveDown,
    /// Collapse, or go to parent
    MoveLeft,
    /// Expand, or drill into first child
    MoveRight,
    First,
    Last,
    PageDown,
    PageUp,

    // === Tree ===
    ToggleExpand,
    ExpandAll,
    CollapseAll,

    // === History ===
    GoBack,
    GoForward,

    // === View ===
    ShowTree,
    ShowColumns,
    ShowRaw,
    CycleView,
    TogglePreview,
    PaneWidthIncrease,
    PaneWidthDecrease,
    ToggleHelp,

    // === Mode Transitions ===
    EnterSearchMode,
    EnterGotoPath,
    /// Exit current mode (generic escape)
    ExitMode,
    /// Accept the input of the current mode
    ConfirmAction,
    InputBackspace,
    NextResult,
    PrevResult,

    // === Clipboard ===
    CopyPath,
    CopyValue,
    SaveValue,

    // === External ===
    /// Open a URL in the browser or a file path in the OS shell
    OpenExternal,
    ToggleAudio,

    // === Help Navigation ===
    HelpScrollDown,
    HelpScrollUp,

    // === Application ===
    /// Quit and print the selected value
    SelectAndQuit,
    Quit,
}

impl Action {
    /// Get a human-readable description of the action
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move up",
            Action::MoveDown => "Move down",
            Action::MoveLeft => "Collapse / go to parent",
            Action::MoveRight => "Expand / enter container",
            Action::First => "Jump to first",
            Action::Last => "Jump to last",
            Action::PageDown => "Page down",
            Action::PageUp => "Page up",

            Action::ToggleExpand => "Toggle expand/collapse",
            Action::ExpandAll => "Expand all",
            Action::CollapseAll => "Collapse all",

            Action::GoBack => "Go back",
            Action::GoForward => "Go forward",

            Action::ShowTree => "Tree view",
            Action::ShowColumns => "Column view",
            Action::ShowRaw => "Raw view",
            Action::CycleView => "Cycle views",
            Action::TogglePreview => "Toggle preview pane",
            Action::PaneWidthIncrease => "Widen navigation pane",
            Action::PaneWidthDecrease => "Narrow navigation pane",
            Action::ToggleHelp => "Toggle help",

            Action::EnterSearchMode => "Search nodes",
            Action::EnterGotoPath => "Go to path",
            Action::ExitMode => "Exit current mode",
            Action::ConfirmAction => "Confirm",
            Action::InputBackspace => "Delete character",
            Action::NextResult => "Next result",
            Action::PrevResult => "Previous result",

            Action::CopyPath => "Copy path",
            Action::CopyValue => "Copy value",
            Action::SaveValue => "Save value to file",

            Action::OpenExternal => "Open URL / file",
            Action::ToggleAudio => "Start/stop audio position timer",

            Action::HelpScrollDown => "Scroll help down",
            Action::HelpScrollUp => "Scroll help up",

            Action::SelectAndQuit => "Select value and quit",
            Action::Quit => "Quit",
        }
    }

    /// Get the category for grouping in help display
    pub fn category(&self) -> &'static str {
        match self {
            Action::MoveUp
            | Action::MoveDown
            | Action::MoveLeft
            | Action::MoveRight
            | Action::First
            | Action::Last
            | Action::PageDown
            | Action::PageUp => "Navigation",

            Action::ToggleExpand | Action::ExpandAll | Action::CollapseAll => "Tree",

            Action::GoBack | Action::GoForward => "History",

            Action::ShowTree
            | Action::ShowColumns
            | Action::ShowRaw
            | Action::CycleView
            | Action::TogglePreview
            | Action::PaneWidthIncrease
            | Action::PaneWidthDecrease
            | Action::ToggleHelp => "View",

            Action::EnterSearchMode
            | Action::EnterGotoPath
            | Action::ExitMode
            | Action::ConfirmAction
            | Action::InputBackspace
            | Action::NextResult
            | Action::PrevResult => "Modes",

            Action::CopyPath | Action::CopyValue | Action::SaveValue => "Clipboard",

            Action::OpenExternal | Action::ToggleAudio => "External",

            Action::HelpScrollDown | Action::HelpScrollUp => "Help",

            Action::SelectAndQuit | Action::Quit => "Application",
        }
    }
}
