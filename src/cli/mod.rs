//! Non-interactive modes: print paths, values, types, search results or counts.

mod commands;

pub use commands::{Cli, OutputFormat};

use serde::Serialize;
use std::io::{self, Write};
use treenav::document::{Document, FlatIndex, classify, path};
use treenav::search;

/// Run the first non-interactive mode `args` asks for. Returns `false` when
/// the requested path does not exist.
pub fn run(args: &Cli, doc: &Document, out: &mut impl Write) -> io::Result<bool> {
    let index = FlatIndex::build(doc);

    if let Some(target) = &args.get {
        return print_value(doc, target, out);
    }
    if let Some(target) = &args.type_of {
        return print_type(doc, target, out);
    }
    if let Some(text) = &args.search {
        print_search(&index, text, args.output, out)?;
    } else if args.paths {
        print_paths(&index, args.output, out)?;
    } else if args.count {
        print_counts(&index, out)?;
    }
    Ok(true)
}

fn print_paths(index: &FlatIndex, format: OutputFormat, out: &mut impl Write) -> io::Result<()> {
    match format {
        OutputFormat::Plain => {
            for node in index.iter() {
                writeln!(out, "{}", path::display(&node.path))?;
            }
        }
        OutputFormat::Json => {
            let paths: Vec<&str> = index.iter().map(|node| path::display(&node.path)).collect();
            write_json(&paths, out)?;
        }
    }
    Ok(())
}

fn print_value(doc: &Document, target: &str, out: &mut impl Write) -> io::Result<bool> {
    let Some(value) = doc.resolve(path::from_input(target)) else {
        eprintln!("Path '{}' not found", target);
        return Ok(false);
    };
    write_json(value, out)?;
    Ok(true)
}

fn print_type(doc: &Document, target: &str, out: &mut impl Write) -> io::Result<bool> {
    let Some(value) = doc.resolve(path::from_input(target)) else {
        eprintln!("Path '{}' not found", target);
        return Ok(false);
    };
    writeln!(out, "{}", classify(value).label())?;
    Ok(true)
}

#[derive(Serialize)]
struct SearchRow<'a> {
    score: usize,
    path: &'a str,
    display: &'a str,
}

fn print_search(
    index: &FlatIndex,
    text: &str,
    format: OutputFormat,
    out: &mut impl Write,
) -> io::Result<()> {
    let rows: Vec<SearchRow> = search::search(index, text, search::MAX_RESULTS)
        .iter()
        .filter_map(|result| {
            let node = index.get(result.position)?;
            Some(SearchRow {
                score: result.score,
                path: path::display(&node.path),
                display: &node.display_value,
            })
        })
        .collect();

    match format {
        OutputFormat::Plain => {
            for row in &rows {
                writeln!(out, "{:>4}  {}  {}", row.score, row.path, row.display)?;
            }
        }
        OutputFormat::Json => write_json(&rows, out)?,
    }
    Ok(())
}

fn print_counts(index: &FlatIndex, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Node counts:")?;
    for (kind, count) in index.counts_by_kind() {
        writeln!(out, "  {}: {}", kind, count)?;
    }
    writeln!(out, "\nTotal: {}", index.len())
}

fn write_json<T: Serialize + ?Sized>(value: &T, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
