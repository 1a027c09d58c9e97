//! Fuzzy multi-word search over the flat index.
//!
//! Each node is scored against four candidate strings (key, display value,
//! path, and all three joined by spaces). A candidate matches when every
//! query word occurs in it (pass A), or failing that, when the concatenated
//! query words occur as a subsequence (pass B). The node keeps its best
//! candidate score.
//!
//! All positions are char indices into the candidate, not byte offsets.

pub mod debounce;

pub use debounce::Debouncer;

use crate::document::FlatIndex;
use std::ops::Range;

/// Upper bound on returned results.
pub const MAX_RESULTS: usize = 50;

/// Characters after which a word match earns the boundary bonus.
const BOUNDARY: &[char] = &[' ', '_', '.', '-', '/', '\\', '[', ']', ':', '@'];

const BOUNDARY_BONUS: usize = 50;

/// A parsed, lowercased query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    raw: String,
    words: Vec<Vec<char>>,
    pattern: Vec<char>,
}

impl Query {
    pub fn parse(text: &str) -> Self {
        let words: Vec<Vec<char>> = text.split_whitespace().map(lowercase_chars).collect();
        let pattern = words.iter().flatten().copied().collect();
        Self {
            raw: text.to_string(),
            words,
            pattern,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// One ranked hit. `position` is the node's pre-order index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub position: usize,
    pub path: String,
    pub score: usize,
}

/// Lowercase char by char so indices line up with the original text.
fn lowercase_chars(text: &str) -> Vec<char> {
    text.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

fn find(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn at_boundary(haystack: &[char], index: usize) -> bool {
    index == 0 || BOUNDARY.contains(&haystack[index - 1])
}

/// Pass A: every word must occur; each scores by position, boundary and length.
fn multi_word_score(words: &[Vec<char>], haystack: &[char]) -> Option<usize> {
    words.iter().try_fold(0, |total, word| {
        let index = find(haystack, word)?;
        let bonus = if at_boundary(haystack, index) {
            BOUNDARY_BONUS
        } else {
            0
        };
        Some(total + (100 - index.min(50)) + bonus + word.len() * 2)
    })
}

/// Pass B: positions of the pattern as an in-order subsequence, if complete.
fn subsequence_positions(pattern: &[char], haystack: &[char]) -> Option<Vec<usize>> {
    if pattern.is_empty() {
        return None;
    }
    let mut positions = Vec::with_capacity(pattern.len());
    let mut wanted = pattern.iter().peekable();
    for (i, c) in haystack.iter().enumerate() {
        match wanted.peek() {
            Some(&&p) if p == *c => {
                positions.push(i);
                wanted.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    (wanted.peek().is_none()).then_some(positions)
}

/// Score one candidate string, or `None` if it does not match.
pub fn score_candidate(query: &Query, candidate: &str) -> Option<usize> {
    if query.is_empty() {
        return None;
    }
    let haystack = lowercase_chars(candidate);
    multi_word_score(&query.words, &haystack)
        .or_else(|| subsequence_positions(&query.pattern, &haystack).map(|p| p.len()))
}

/// Rank the index against `text`. Ties keep pre-order; at most `limit` results.
pub fn search(index: &FlatIndex<'_>, text: &str, limit: usize) -> Vec<SearchResult> {
    let query = Query::parse(text);
    if query.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<SearchResult> = index
        .iter()
        .enumerate()
        .filter_map(|(position, node)| {
            let joined = format!("{} {} {}", node.key, node.display_value, node.path);
            let score = [
                node.key.as_str(),
                node.display_value.as_str(),
                node.path.as_str(),
                joined.as_str(),
            ]
            .into_iter()
            .filter_map(|candidate| score_candidate(&query, candidate))
            .max()?;
            Some(SearchResult {
                position,
                path: node.path.clone(),
                score,
            })
        })
        .collect();

    let matched = results.len();
    // sort_by is stable
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(limit);
    tracing::debug!(query = %text, matched, shown = results.len(), "search executed");
    results
}

/// Highlight ranges for one displayed field.
///
/// The union of every word occurrence from pass A and the subsequence
/// characters from pass B. Overlapping and adjacent ranges are merged.
pub fn highlight(text: &str, query: &Query) -> Vec<Range<usize>> {
    if query.is_empty() {
        return Vec::new();
    }
    let haystack = lowercase_chars(text);

    let mut ranges: Vec<Range<usize>> = query
        .words
        .iter()
        .filter_map(|word| find(&haystack, word).map(|start| start..start + word.len()))
        .collect();
    if let Some(positions) = subsequence_positions(&query.pattern, &haystack) {
        ranges.extend(positions.into_iter().map(|i| i..i + 1));
    }
    merge_ranges(ranges)
}

/// Sort and coalesce ranges that overlap or touch.
pub fn merge_ranges(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.sort_by_key(|r| (r.start, r.end));
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

/// Split `text` into `(segment, highlighted)` runs following char ranges.
pub fn segments(text: &str, ranges: &[Range<usize>]) -> Vec<(String, bool)> {
    let mut out: Vec<(String, bool)> = Vec::new();
    for (i, c) in text.chars().enumerate() {
        let marked = ranges.iter().any(|r| r.contains(&i));
        match out.last_mut() {
            Some((run, flag)) if *flag == marked => run.push(c),
            _ => out.push((c.to_string(), marked)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use serde_json::json;

    fn paths(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.path.as_str()).collect()
    }

    mod scoring {
        use super::*;

        #[test]
        fn test_multi_word_scores() {
            let query = Query::parse("web site");
            // web@0: 100+50+6, site@8 after '.': 92+50+8
            assert_eq!(score_candidate(&query, "webhook.site"), Some(306));
            // web@0: 156, site@3 no boundary: 97+8
            assert_eq!(score_candidate(&query, "website visit logs"), Some(261));
        }

        #[test]
        fn test_subsequence_fallback() {
            let query = Query::parse("wbst");
            assert_eq!(score_candidate(&query, "website"), Some(4));
            assert_eq!(score_candidate(&query, "web"), None);
        }

        #[test]
        fn test_partial_word_match_needs_full_subsequence() {
            let query = Query::parse("web site");
            assert_eq!(score_candidate(&query, "web"), None);
            assert_eq!(score_candidate(&query, "web only here"), None);
        }

        #[test]
        fn test_case_insensitive() {
            let query = Query::parse("HELLO");
            assert_eq!(score_candidate(&query, "say hello"), Some(96 + 50 + 10));
        }

        #[test]
        fn test_position_penalty_caps_at_fifty() {
            let query = Query::parse("z");
            let far = format!("{}z", "x".repeat(80));
            assert_eq!(score_candidate(&query, &far), Some(50 + 2));
        }

        #[test]
        fn test_empty_query() {
            let query = Query::parse("   ");
            assert!(query.is_empty());
            assert_eq!(score_candidate(&query, "anything"), None);
        }
    }

    mod ranking {
        use super::*;

        #[test]
        fn test_web_site_excludes_partial() {
            let doc = Document::new(
                json!({"webhook.site": 1, "website visit logs": 2, "web": 3}),
                "t",
            );
            let index = FlatIndex::build(&doc);
            let results = search(&index, "web site", MAX_RESULTS);
            assert_eq!(paths(&results), vec!["webhook.site", "website visit logs"]);
        }

        #[test]
        fn test_boundary_bonus_ranks_first() {
            let doc = Document::new(json!({"a": 1, "bb": 2, "abc": 3}), "t");
            let index = FlatIndex::build(&doc);
            let results = search(&index, "b", MAX_RESULTS);
            assert_eq!(paths(&results), vec!["bb", "abc"]);
            assert!(results[0].score > results[1].score);
        }

        #[test]
        fn test_ties_keep_index_order() {
            let doc = Document::new(json!({"x1": "q", "x2": "q", "x3": "q"}), "t");
            let index = FlatIndex::build(&doc);
            let results = search(&index, "q", MAX_RESULTS);
            assert_eq!(paths(&results), vec!["x1", "x2", "x3"]);
            assert_eq!(results[0].position, 1);
        }

        #[test]
        fn test_truncated_to_limit() {
            let items: Vec<_> = (0..80).map(|i| format!("item {}", i)).collect();
            let doc = Document::new(json!(items), "t");
            let index = FlatIndex::build(&doc);
            assert_eq!(search(&index, "item", MAX_RESULTS).len(), 50);
            assert_eq!(search(&index, "item", 5).len(), 5);
        }

        #[test]
        fn test_empty_query_yields_nothing() {
            let doc = Document::new(json!({"a": 1}), "t");
            let index = FlatIndex::build(&doc);
            assert!(search(&index, "", MAX_RESULTS).is_empty());
        }
    }

    mod highlighting {
        use super::*;

        #[test]
        fn test_word_ranges() {
            let query = Query::parse("web site");
            assert_eq!(highlight("webhook.site", &query), vec![0..3, 8..12]);
        }

        #[test]
        fn test_adjacent_ranges_merge() {
            let query = Query::parse("web site");
            assert_eq!(highlight("website", &query), vec![0..7]);
        }

        #[test]
        fn test_subsequence_positions_when_words_missing() {
            let query = Query::parse("wbs");
            assert_eq!(highlight("web site", &query), vec![0..1, 2..3, 4..5]);
        }

        #[test]
        fn test_word_and_subsequence_ranges_are_unioned() {
            // words hit b@0 and o@1, the pattern "ob" runs o@1 then b@2
            let query = Query::parse("o b");
            assert_eq!(highlight("bob", &query), vec![0..3]);
        }

        #[test]
        fn test_no_match_leaves_text_unmarked() {
            let query = Query::parse("zzz");
            assert!(highlight("hello", &query).is_empty());
        }

        #[test]
        fn test_merge_ranges() {
            assert_eq!(merge_ranges(vec![4..6, 0..2, 1..3, 6..7]), vec![0..3, 4..7]);
            assert!(merge_ranges(Vec::new()).is_empty());
        }

        #[test]
        fn test_segments() {
            assert_eq!(
                segments("héllo", &[1..3]),
                vec![
                    ("h".to_string(), false),
                    ("él".to_string(), true),
                    ("lo".to_string(), false)
                ]
            );
        }
    }
}
