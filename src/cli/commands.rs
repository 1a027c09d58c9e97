use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use treenav::nav::ViewMode;

#[cfg(feature = "unstable-dynamic")]
use clap_complete::engine::{ArgValueCompleter, CompletionCandidate, ValueCompleter};

#[derive(Parser, Debug)]
#[command(name = "treenav")]
#[command(version)]
#[command(about = "Browse JSON and TOML documents as a tree, in columns, or raw")]
#[command(
    long_about = "treenav - a navigator for hierarchical documents.\n\n\
    Launch without flags for the interactive TUI with tree, column and raw views,\n\
    typed path jumps, fuzzy search and type-aware previews. Use flags to query the\n\
    document from scripts.\n\n\
    Examples:\n  \
    treenav config.json               # Interactive TUI mode\n  \
    treenav --paths data.toml         # List every path\n  \
    treenav --get 'servers[0].host' c.json\n  \
    treenav --search 'web logs' c.json\n  \
    curl -s api/items | treenav       # Read from stdin"
)]
pub struct Cli {
    /// Document to open (.json or .toml), or '-' for stdin
    ///
    /// If no file is given and stdin is piped, the document is read from stdin.
    /// Piped input is parsed as JSON first, then as TOML.
    #[arg(add = document_file_completer())]
    pub file: Option<PathBuf>,

    /// Print every path in the document, one per line (non-interactive)
    ///
    /// Paths are listed in pre-order, parents before their children.
    #[arg(long = "paths")]
    pub paths: bool,

    /// Print the value at PATH as JSON (non-interactive)
    ///
    /// Exits with status 1 if the path does not exist.
    ///
    /// Example: --get 'servers[0].host'
    #[arg(long = "get", value_name = "PATH")]
    pub get: Option<String>,

    /// Print the detected type of the value at PATH (non-interactive)
    ///
    /// Example: --type website prints "string/url"
    #[arg(long = "type", value_name = "PATH")]
    pub type_of: Option<String>,

    /// Fuzzy-search keys, values and paths (non-interactive)
    ///
    /// Words are matched case-insensitively in any order; the best results
    /// are printed first.
    #[arg(short = 's', long = "search", value_name = "QUERY")]
    pub search: Option<String>,

    /// Count nodes by kind (shows statistics)
    #[arg(long = "count")]
    pub count: bool,

    /// Output format for --paths and --search
    ///
    ///   plain - Human-readable text (default)
    ///   json  - JSON array for scripting
    #[arg(short = 'o', long = "output", default_value = "plain")]
    pub output: OutputFormat,

    /// Initial view for TUI mode (overrides the config file)
    #[arg(long = "view", value_name = "VIEW")]
    pub view: Option<ViewArg>,

    /// Start the TUI with the preview pane hidden
    #[arg(long = "no-preview")]
    pub no_preview: bool,

    /// Set theme for TUI mode
    ///
    /// Override the saved theme preference. Available themes:
    /// OceanDark, Nord, Gruvbox
    #[arg(long = "theme", value_name = "THEME")]
    pub theme: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// Logs go to stderr in CLI mode and to treenav.log in the cache
    /// directory while the TUI is running.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Whether any non-interactive flag was given.
    pub fn is_cli_mode(&self) -> bool {
        self.paths
            || self.count
            || self.get.is_some()
            || self.type_of.is_some()
            || self.search.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// JSON output
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Tree,
    Column,
    Raw,
}

impl From<ViewArg> for ViewMode {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Tree => ViewMode::Tree,
            ViewArg::Column => ViewMode::Column,
            ViewArg::Raw => ViewMode::Raw,
        }
    }
}

#[cfg(feature = "unstable-dynamic")]
fn document_file_completer() -> ArgValueCompleter {
    use std::ffi::OsStr;
    use std::path::Path;

    struct DocumentCompleter;

    impl ValueCompleter for DocumentCompleter {
        fn complete(&self, current: &OsStr) -> Vec<CompletionCandidate> {
            // "../conf/app" completes names starting with "app" inside "../conf"
            let input_str = current.to_string_lossy();
            let input_path = Path::new(input_str.as_ref());

            let (search_dir, prefix) = if input_str.is_empty() {
                (Path::new("."), String::new())
            } else if input_str.ends_with('/') || input_str.ends_with('\\') {
                (input_path, String::new())
            } else {
                // parent() of a bare file name is Some("")
                let parent = input_path.parent().unwrap_or(Path::new("."));
                let dir = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
                let prefix = input_path
                    .file_name()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default();
                (dir, prefix)
            };

            let Ok(entries) = std::fs::read_dir(search_dir) else {
                return vec![];
            };

            entries
                .filter_map(Result::ok)
                .filter_map(|entry| {
                    let path = entry.path();
                    let file_name = path.file_name()?.to_string_lossy().to_string();
                    if !prefix.is_empty()
                        && !file_name.to_lowercase().starts_with(&prefix.to_lowercase())
                    {
                        return None;
                    }

                    let value = if search_dir == Path::new(".") {
                        file_name
                    } else {
                        search_dir.join(&file_name).to_string_lossy().to_string()
                    };

                    if path.is_dir() {
                        let value = if value.ends_with('/') {
                            value
                        } else {
                            format!("{}/", value)
                        };
                        return Some(CompletionCandidate::new(value).help(Some("directory".into())));
                    }
                    let ext = path.extension()?.to_string_lossy().to_lowercase();
                    matches!(ext.as_str(), "json" | "toml").then(|| CompletionCandidate::new(value))
                })
                .collect()
        }
    }

    ArgValueCompleter::new(DocumentCompleter)
}

#[cfg(not(feature = "unstable-dynamic"))]
fn document_file_completer() -> clap::builder::ValueHint {
    clap::ValueHint::FilePath
}
