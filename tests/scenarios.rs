use serde_json::json;
use treenav::document::{FlatIndex, MediaCategory, Subtype, classify, path};
use treenav::render::{column, tree};
use treenav::search::{self, MAX_RESULTS};
use treenav::{Document, Navigator, ViewMode};

fn nested() -> Document {
    Document::new(json!({"a": {"b": 1, "c": [true, null]}}), "nested.json")
}

#[test]
fn flat_index_is_preorder() {
    let doc = nested();
    let index = FlatIndex::build(&doc);
    let paths: Vec<&str> = index.iter().map(|node| node.path.as_str()).collect();
    assert_eq!(paths, vec!["", "a", "a.b", "a.c", "a.c[0]", "a.c[1]"]);
    assert_eq!(doc.resolve("a.c[0]"), Some(&json!(true)));
    assert_eq!(doc.resolve("a.c[1]"), Some(&json!(null)));
    assert_eq!(doc.resolve("a.c[2]"), None);
}

#[test]
fn column_view_follows_selection() {
    let doc = nested();
    let mut nav = Navigator::new(&doc, ViewMode::Tree);
    assert!(nav.navigate("a.c[0]", true));
    nav.switch_view(ViewMode::Column);

    let columns = column::render(&doc, nav.state());
    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0].parent, "");
    assert_eq!(columns[1].parent, "a");
    assert_eq!(columns[2].parent, "a.c");

    let last = &columns[2];
    let selected = &last.entries[last.selected.unwrap()];
    assert_eq!(selected.label, "[0]");
}

#[test]
fn tree_view_marks_selection_after_navigate() {
    let doc = nested();
    let mut nav = Navigator::new(&doc, ViewMode::Tree);
    nav.navigate("a.c[1]", true);

    let rows = tree::render(&doc, nav.state());
    let selected: Vec<&str> = rows
        .iter()
        .filter(|row| row.selected)
        .map(|row| row.path.as_str())
        .collect();
    assert_eq!(selected, vec!["a.c[1]"]);
}

#[test]
fn history_discards_forward_branch() {
    let doc = Document::new(json!({"x": 1, "y": 2, "z": 3}), "h.json");
    let mut nav = Navigator::new(&doc, ViewMode::Tree);

    nav.navigate("x", true);
    nav.navigate("y", true);
    assert!(nav.back());
    assert_eq!(nav.selection(), "x");

    nav.navigate("z", true);
    assert!(!nav.forward());
    assert_eq!(nav.selection(), "z");
    assert!(!nav.state().history.entries().contains(&"y".to_string()));
}

#[test]
fn toggle_expand_twice_is_identity() {
    let doc = nested();
    let mut nav = Navigator::new(&doc, ViewMode::Tree);
    let before = nav.state().expanded.clone();

    nav.toggle_expand("a.c");
    assert_ne!(nav.state().expanded, before);
    nav.toggle_expand("a.c");
    // IndexSet equality ignores order
    assert_eq!(nav.state().expanded, before);
}

#[test]
fn classifier_priority() {
    let url = classify(&json!("https://x.com/a.png"));
    assert!(matches!(
        url.subtype,
        Subtype::Url(Some(ref media)) if media.category == MediaCategory::Image
    ));

    let file = classify(&json!(r"C:\a\b.json"));
    assert!(matches!(
        file.subtype,
        Subtype::FilePath(Some(ref media)) if media.extension == "json"
    ));

    assert_eq!(classify(&json!("#fff")).subtype, Subtype::Color);

    let mut lines = vec![
        "# Overview",
        "text",
        "## Table",
        "| k | v |",
        "| --- | --- |",
        "| a | 1 |",
    ];
    lines.resize(25, "more prose here");
    assert_eq!(classify(&json!(lines.join("\n"))).subtype, Subtype::Markdown);
}

#[test]
fn multi_word_search_excludes_partial_matches() {
    let doc = Document::new(
        json!({"one": "webhook.site", "two": "website visit logs", "three": "web"}),
        "s.json",
    );
    let index = FlatIndex::build(&doc);
    let mut paths: Vec<String> = search::search(&index, "web site", MAX_RESULTS)
        .into_iter()
        .map(|result| result.path)
        .collect();
    paths.sort();
    assert_eq!(paths, vec!["one", "two"]);
}

#[test]
fn boundary_bonus_orders_results() {
    let doc = Document::new(json!({"a": 1, "bb": 2, "abc": 3}), "b.json");
    let index = FlatIndex::build(&doc);
    let results = search::search(&index, "b", MAX_RESULTS);
    assert_eq!(results[0].path, "bb");
    assert_eq!(results[1].path, "abc");
    assert!(results[0].score > results[1].score);
}

#[test]
fn toml_documents_share_the_model() {
    let doc = Document::parse_any(
        "title = \"demo\"\n\n[[servers]]\nhost = \"alpha\"\n",
        "c.toml",
    )
    .unwrap();
    assert_eq!(doc.resolve("servers[0].host"), Some(&json!("alpha")));
    assert_eq!(doc.resolve(path::from_input("$")), Some(doc.root()));
}
