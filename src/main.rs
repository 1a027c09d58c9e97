//! # treenav
//!
//! A navigator for JSON and TOML documents with tree, column and raw views.
//!
//! ## Usage
//!
//! Launch the interactive TUI:
//! ```sh
//! treenav config.json
//! ```
//!
//! Print a value by path:
//! ```sh
//! treenav --get 'servers[0].host' config.json
//! ```
//!
//! Pipe a document in:
//! ```sh
//! curl -s https://api.example.com/items | treenav
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::Cli;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use std::fs::{self, File};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;
use treenav::host::{SystemHost, SystemProbe};
use treenav::{App, Config, Document};

fn main() -> Result<()> {
    color_eyre::install()?;

    // Handle dynamic shell completions
    #[cfg(feature = "unstable-dynamic")]
    clap_complete::CompleteEnv::with_factory(|| {
        use clap::CommandFactory;
        Cli::command()
    })
    .complete();

    let args = Cli::parse();
    let tui_mode = !args.is_cli_mode();
    init_tracing(args.verbose, tui_mode);

    let doc = match load_document(&args) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!("\nUsage: treenav [OPTIONS] <FILE>");
            eprintln!("       treenav [OPTIONS] -");
            eprintln!("       cat doc.json | treenav [OPTIONS]");
            process::exit(1);
        }
    };

    if !tui_mode {
        let found = cli::run(&args, &doc, &mut io::stdout().lock())?;
        if !found {
            process::exit(1);
        }
        return Ok(());
    }

    let mut config = Config::load();
    if let Some(ref theme_name) = args.theme {
        config.ui.theme = theme_name.clone();
    }
    if let Some(view) = args.view {
        config.ui.default_view = view.into();
    }
    if args.no_preview {
        config.ui.show_preview = false;
    }

    let save_dir = std::env::current_dir().unwrap_or_else(|_| std::env::temp_dir());
    let mut app = App::new(
        &doc,
        config,
        Box::new(SystemHost::new(save_dir)),
        Arc::new(SystemProbe),
    );

    // Piped stdin is already consumed; crossterm reads keys from /dev/tty
    let mut terminal = ratatui::try_init().inspect_err(|e| {
        eprintln!("Failed to initialize terminal: {}", e);
        eprintln!("Note: When piping input, ensure you have a controlling terminal.");
    })?;
    let result = treenav::tui::run(&mut terminal, &mut app);
    ratatui::restore();
    result?;

    if let Some(selected) = &app.outcome.selected {
        println!("{}", serde_json::to_string_pretty(selected)?);
    }
    Ok(())
}

/// Read the document from the file argument, `-`, or piped stdin.
fn load_document(args: &Cli) -> Result<Document> {
    match args.file.as_deref() {
        Some(path) if path.as_os_str() != "-" => Document::load(path)
            .wrap_err_with(|| format!("could not open {}", path.display())),
        Some(_) => read_stdin(),
        None if !io::stdin().is_terminal() => read_stdin(),
        None => Err(eyre!("a document argument is required")),
    }
}

fn read_stdin() -> Result<Document> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .wrap_err("could not read stdin")?;
    Ok(Document::parse_any(&content, "stdin")?)
}

/// Logs go to stderr for CLI runs. While the TUI owns the terminal they go to
/// a file in the cache dir, or nowhere if it cannot be opened.
fn init_tracing(verbose: u8, tui_mode: bool) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("TREENAV_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(format!("treenav={}", default_level)));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if !tui_mode {
        builder.with_writer(io::stderr).init();
        return;
    }
    if let Some(file) = log_file() {
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
}

fn log_file() -> Option<File> {
    let dir: PathBuf = dirs::cache_dir()?.join("treenav");
    fs::create_dir_all(&dir).ok()?;
    File::options()
        .create(true)
        .append(true)
        .open(dir.join("treenav.log"))
        .ok()
}
