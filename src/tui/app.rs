use crate::config::Config;
use crate::document::{Document, FlatIndex, Subtype, classify, path};
use crate::host::{Delivery, FilePreview, FileProbe, Host, Outcome, deliver_text};
use crate::keybindings::{Action, KeybindingMode, Keybindings};
use crate::nav::{Direction, Navigator, ViewMode};
use crate::preview::{self, AudioSlot, Preview, PreviewOptions, QueryResult, QueryWorker};
use crate::render::RawView;
use crate::search::{self, Debouncer, SearchResult};
use crate::tui::help_text;
use crate::tui::syntax::SyntaxHighlighter;
use crate::tui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long a status message stays up
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Event loop wake-up interval when nothing is scheduled
pub const IDLE_POLL: Duration = Duration::from_millis(100);

const MIN_TREE_WIDTH: u16 = 20;
const MAX_TREE_WIDTH: u16 = 80;
const TREE_WIDTH_STEP: u16 = 5;

/// Maximum search query length
const MAX_INPUT_LEN: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Search,
    GotoPath,
}

/// Search bar state: the typed query, the ranked results and the debounce timer.
#[derive(Debug)]
pub struct SearchState {
    pub input: String,
    pub results: Vec<SearchResult>,
    pub selected: usize,
    /// Query that produced `results`
    pub applied: String,
    debouncer: Debouncer<String>,
    max_results: usize,
}

impl SearchState {
    fn new(delay: Duration, max_results: usize) -> Self {
        Self {
            input: String::new(),
            results: Vec::new(),
            selected: 0,
            applied: String::new(),
            debouncer: Debouncer::new(delay),
            max_results,
        }
    }

    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.results.get(self.selected)
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

pub struct App<'doc> {
    pub nav: Navigator<'doc>,
    pub index: FlatIndex<'doc>,
    pub raw: RawView,
    pub raw_scroll: usize,
    pub tree_state: ListState,
    /// Rows visible in the navigation pane, updated on every draw
    pub page_size: usize,

    pub mode: AppMode,
    pub show_help: bool,
    pub help_scroll: u16,
    pub show_preview: bool,
    pub tree_width: u16,

    pub search: SearchState,
    pub goto_input: String,

    pub status_message: Option<String>,
    status_message_time: Option<Instant>,

    pub theme: Theme,
    pub highlighter: SyntaxHighlighter,
    pub keybindings: Keybindings,
    pub audio: AudioSlot,
    preview_options: PreviewOptions,

    host: Box<dyn Host>,
    worker: QueryWorker,
    config: Config,

    pub should_quit: bool,
    pub outcome: Outcome,
}

impl<'doc> App<'doc> {
    pub fn new(
        doc: &'doc Document,
        config: Config,
        host: Box<dyn Host>,
        probe: Arc<dyn FileProbe>,
    ) -> Self {
        let theme = Theme::from_name(config.theme_name()).with_custom_colors(&config.theme);
        let mut nav = Navigator::new(doc, ViewMode::Tree);
        nav.switch_view(config.ui.default_view);

        Self {
            nav,
            index: FlatIndex::build(doc),
            raw: RawView::new(),
            raw_scroll: 0,
            tree_state: ListState::default(),
            page_size: 10,

            mode: AppMode::Normal,
            show_help: false,
            help_scroll: 0,
            show_preview: config.ui.show_preview,
            tree_width: config
                .ui
                .tree_width
                .clamp(MIN_TREE_WIDTH, MAX_TREE_WIDTH),

            search: SearchState::new(config.debounce(), config.search.max_results),
            goto_input: String::new(),

            status_message: None,
            status_message_time: None,

            theme,
            highlighter: SyntaxHighlighter::new(),
            keybindings: config.keybindings(),
            audio: AudioSlot::new(),
            preview_options: config.preview_options(),

            host,
            worker: QueryWorker::spawn(probe, config.read_limits()),
            config,

            should_quit: false,
            outcome: Outcome::default(),
        }
    }

    pub fn document(&self) -> &'doc Document {
        self.nav.document()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.nav.view_mode()
    }

    pub fn keybinding_mode(&self) -> KeybindingMode {
        if self.show_help {
            return KeybindingMode::Help;
        }
        match self.mode {
            AppMode::Normal => KeybindingMode::Normal,
            AppMode::Search => KeybindingMode::Search,
            AppMode::GotoPath => KeybindingMode::GotoPath,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    pub fn clear_expired_status_message(&mut self, now: Instant) {
        if let Some(set_at) = self.status_message_time
            && now.saturating_duration_since(set_at) >= STATUS_MESSAGE_TTL
        {
            self.status_message = None;
            self.status_message_time = None;
        }
    }

    /// Preview of the current selection, read from the query cache.
    pub fn preview(&self) -> Preview {
        let state = self.nav.state();
        preview::compose(
            &state.selection,
            self.nav.selected_value(),
            &state.queries,
            &self.preview_options,
        )
    }

    /// Cache key of the selected value's file query, if it has one.
    pub fn selected_query_key(&self) -> Option<String> {
        self.nav.selected_value().and_then(preview::query_key)
    }

    /// Periodic work: fire a due search, collect query results, start the
    /// query the current selection needs, and expire the status message.
    pub fn tick(&mut self, now: Instant) {
        if let Some(text) = self.search.debouncer.poll(now) {
            self.run_search(&text);
        }
        self.worker.drain_into(&mut self.nav.state_mut().queries);
        self.request_selected_query();
        self.clear_expired_status_message(now);
    }

    /// How long the event loop may block before [`App::tick`] has work.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.search
            .debouncer
            .time_until_due(now)
            .map_or(IDLE_POLL, |due| due.min(IDLE_POLL))
    }

    fn request_selected_query(&mut self) {
        let Some(key) = self.selected_query_key() else {
            return;
        };
        if self.nav.state_mut().queries.begin(&key) && !self.worker.request(&key) {
            tracing::warn!(path = %key, "query worker is gone");
            self.nav
                .state_mut()
                .queries
                .complete(key, QueryResult::Missing);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let mode = self.keybinding_mode();
        if let Some(action) = self.keybindings.dispatch(mode, key) {
            self.handle_action(action);
            return;
        }
        if mode.takes_text()
            && let KeyCode::Char(c) = key.code
            && !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            self.input_char(c);
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        use Action::*;
        match action {
            MoveUp => self.move_or_scroll(Direction::Up),
            MoveDown => self.move_or_scroll(Direction::Down),
            MoveLeft => {
                self.nav.move_selection(Direction::Left);
            }
            MoveRight => {
                self.nav.move_selection(Direction::Right);
            }
            First => self.jump_to_edge(false),
            Last => self.jump_to_edge(true),
            PageDown => self.page(Direction::Down),
            PageUp => self.page(Direction::Up),

            ToggleExpand => self.toggle_expand(),
            ExpandAll => {
                if self.view_mode() == ViewMode::Tree {
                    self.nav.expand_all();
                }
            }
            CollapseAll => self.nav.collapse_all(),

            GoBack => {
                if !self.nav.back() {
                    self.set_status("✗ No earlier location");
                }
            }
            GoForward => {
                if !self.nav.forward() {
                    self.set_status("✗ No later location");
                }
            }

            ShowTree => self.nav.switch_view(ViewMode::Tree),
            ShowColumns => self.nav.switch_view(ViewMode::Column),
            ShowRaw => self.nav.switch_view(ViewMode::Raw),
            CycleView => {
                let next = self.view_mode().cycle();
                self.nav.switch_view(next);
            }
            TogglePreview => self.show_preview = !self.show_preview,
            PaneWidthIncrease => self.resize_tree(true),
            PaneWidthDecrease => self.resize_tree(false),
            ToggleHelp => self.toggle_help(),

            EnterSearchMode => self.enter_search(),
            EnterGotoPath => self.enter_goto_path(),
            ExitMode => self.exit_mode(),
            ConfirmAction => self.confirm(),
            InputBackspace => self.input_backspace(),
            NextResult => self.step_result(true),
            PrevResult => self.step_result(false),

            CopyPath => self.copy_path(),
            CopyValue => self.copy_value(),
            SaveValue => self.save_value(),

            OpenExternal => self.open_external(),
            ToggleAudio => self.toggle_audio(Instant::now()),

            HelpScrollDown => self.scroll_help_down(),
            HelpScrollUp => self.scroll_help_up(),

            SelectAndQuit => self.select_and_quit(),
            Quit => self.should_quit = true,
        }
    }

    fn move_or_scroll(&mut self, direction: Direction) {
        if self.view_mode() == ViewMode::Raw {
            let max = self.raw.line_count(self.document()).saturating_sub(1);
            self.raw_scroll = match direction {
                Direction::Up => self.raw_scroll.saturating_sub(1),
                _ => (self.raw_scroll + 1).min(max),
            };
            return;
        }
        self.nav.move_selection(direction);
    }

    fn jump_to_edge(&mut self, last: bool) {
        if self.view_mode() == ViewMode::Raw {
            self.raw_scroll = if last {
                self.raw.line_count(self.document()).saturating_sub(1)
            } else {
                0
            };
            return;
        }
        self.nav.move_to_edge(last);
    }

    fn page(&mut self, direction: Direction) {
        for _ in 0..self.page_size.max(1) {
            if self.view_mode() == ViewMode::Raw {
                self.move_or_scroll(direction);
            } else if !self.nav.move_selection(direction) {
                break;
            }
        }
    }

    fn toggle_expand(&mut self) {
        match self.view_mode() {
            ViewMode::Tree => {
                let selection = self.nav.selection().to_string();
                self.nav.toggle_expand(&selection);
            }
            ViewMode::Column => {
                self.nav.move_selection(Direction::Right);
            }
            ViewMode::Raw => {}
        }
    }

    fn resize_tree(&mut self, increase: bool) {
        self.tree_width = if increase {
            (self.tree_width + TREE_WIDTH_STEP).min(MAX_TREE_WIDTH)
        } else {
            self.tree_width
                .saturating_sub(TREE_WIDTH_STEP)
                .max(MIN_TREE_WIDTH)
        };
        // Persisted silently
        if let Err(e) = self.config.set_tree_width(self.tree_width) {
            tracing::debug!(error = %e, "could not persist pane width");
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0;
        }
        self.keybindings.reset_sequences();
    }

    pub fn scroll_help_down(&mut self) {
        let max_scroll = help_text::help_lines(&self.keybindings).len() as u16;
        let new_scroll = self.help_scroll.saturating_add(1);
        if new_scroll < max_scroll {
            self.help_scroll = new_scroll;
        }
    }

    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    // === Search ===

    pub fn enter_search(&mut self) {
        self.mode = AppMode::Search;
        self.keybindings.reset_sequences();
    }

    pub fn enter_goto_path(&mut self) {
        self.mode = AppMode::GotoPath;
        self.goto_input = match self.nav.selection() {
            // `$` alone would read as the root
            "$" => "$.$".to_string(),
            selection => selection.to_string(),
        };
        self.keybindings.reset_sequences();
    }

    fn exit_mode(&mut self) {
        if self.mode == AppMode::Search {
            self.search.debouncer.cancel();
            self.search.input.clear();
            self.search.results.clear();
            self.search.applied.clear();
            self.search.selected = 0;
        }
        self.mode = AppMode::Normal;
        self.keybindings.reset_sequences();
    }

    fn confirm(&mut self) {
        match self.mode {
            AppMode::Search => {
                // Enter before the debounce fires still searches what was typed
                if self.search.debouncer.cancel().is_some() {
                    let text = self.search.input.clone();
                    self.run_search(&text);
                }
                self.mode = AppMode::Normal;
                self.open_selected_result();
            }
            AppMode::GotoPath => {
                let target = self.goto_input.trim().to_string();
                self.mode = AppMode::Normal;
                self.goto_path(&target);
            }
            AppMode::Normal => {}
        }
        self.keybindings.reset_sequences();
    }

    pub fn goto_path(&mut self, target: &str) {
        if self.nav.navigate(path::from_input(target), true) {
            self.set_status(format!("✓ {}", path::display(self.nav.selection())));
        } else {
            self.set_status(format!("✗ Path not found: {}", target));
        }
    }

    fn input_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        match self.mode {
            AppMode::Search => {
                if self.search.input.len() >= MAX_INPUT_LEN {
                    return;
                }
                self.search.input.push(c);
                self.schedule_search(Instant::now());
            }
            AppMode::GotoPath => {
                if self.goto_input.len() < MAX_INPUT_LEN {
                    self.goto_input.push(c);
                }
            }
            AppMode::Normal => {}
        }
    }

    fn input_backspace(&mut self) {
        match self.mode {
            AppMode::Search => {
                self.search.input.pop();
                self.schedule_search(Instant::now());
            }
            AppMode::GotoPath => {
                self.goto_input.pop();
            }
            AppMode::Normal => {}
        }
    }

    /// Restart the debounce timer for the current input.
    pub fn schedule_search(&mut self, now: Instant) {
        let text = self.search.input.clone();
        self.search.debouncer.schedule(text, now);
    }

    pub fn run_search(&mut self, text: &str) {
        self.search.results = search::search(&self.index, text, self.search.max_results);
        self.search.applied = text.to_string();
        self.search.selected = 0;
    }

    fn step_result(&mut self, forward: bool) {
        let count = self.search.results.len();
        if count == 0 {
            return;
        }
        self.search.selected = if forward {
            (self.search.selected + 1) % count
        } else {
            (self.search.selected + count - 1) % count
        };
        if self.mode == AppMode::Normal {
            self.open_selected_result();
        }
    }

    fn open_selected_result(&mut self) {
        let Some(target) = self.search.selected_result().map(|r| r.path.clone()) else {
            return;
        };
        if self.view_mode() == ViewMode::Raw {
            self.nav.switch_view(ViewMode::Tree);
        }
        self.nav.navigate(&target, true);
    }

    // === Clipboard, save, open ===

    /// File name offered when saving the selected value.
    pub fn suggested_file_name(&self) -> String {
        match path::last_segment(self.nav.selection()) {
            Some(segment) => format!("{}.json", segment),
            None => "document.json".to_string(),
        }
    }

    fn report_delivery(&mut self, what: &str, delivery: Delivery) {
        match delivery {
            Delivery::Copied => self.set_status(format!("✓ {} copied to clipboard", what)),
            Delivery::Saved(saved) => self.set_status(format!(
                "✓ Clipboard unavailable, {} saved to {}",
                what.to_lowercase(),
                saved.display()
            )),
            Delivery::Failed(e) => self.set_status(format!("✗ Could not copy: {}", e)),
        }
    }

    pub fn copy_path(&mut self) {
        let text = path::display(self.nav.selection()).to_string();
        let delivery = deliver_text(self.host.as_mut(), &text, "path.txt");
        self.report_delivery("Path", delivery);
    }

    pub fn copy_value(&mut self) {
        let Some(value) = self.nav.selected_value() else {
            self.set_status("✗ Nothing selected");
            return;
        };
        let text = match value {
            Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        };
        let name = self.suggested_file_name();
        let delivery = deliver_text(self.host.as_mut(), &text, &name);
        self.report_delivery("Value", delivery);
    }

    pub fn save_value(&mut self) {
        let Some(value) = self.nav.selected_value() else {
            self.set_status("✗ Nothing selected");
            return;
        };
        let content = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        let name = self.suggested_file_name();
        match self.host.save_file(&content, &name) {
            Ok(saved) => self.set_status(format!("✓ Saved to {}", saved.display())),
            Err(e) => self.set_status(format!("✗ {}", e)),
        }
    }

    pub fn open_external(&mut self) {
        let Some(value) = self.nav.selected_value() else {
            self.set_status("✗ Nothing selected");
            return;
        };
        let target = value.as_str().unwrap_or_default().trim();
        let result = match classify(value).subtype {
            Subtype::Url(_) => self.host.open_external_url(target),
            Subtype::FilePath(_) => self.host.open_path_in_shell(target),
            _ => {
                self.set_status("✗ Not a URL or file path");
                return;
            }
        };
        match result {
            Ok(()) => self.set_status(format!("✓ Opened {}", target)),
            Err(e) => self.set_status(format!("✗ {}", e)),
        }
    }

    /// Play or pause the selected audio file preview.
    pub fn toggle_audio(&mut self, now: Instant) {
        let Some(key) = self.selected_query_key() else {
            self.set_status("✗ Not an audio file");
            return;
        };
        let is_audio = matches!(
            self.nav.state().queries.get(&key),
            Some(QueryResult::File {
                content: FilePreview::Audio { .. },
                ..
            })
        );
        if !is_audio {
            self.set_status("✗ Not an audio file");
            return;
        }
        // Only the position is tracked; nothing is decoded or sent to a device
        let playing = self.audio.toggle(&key, now);
        let position = preview::media::format_position(self.audio.position(&key, now));
        if playing {
            self.set_status(format!("▶ Timer running at {} (no sound output)", position));
        } else {
            self.set_status(format!("⏸ Timer paused at {}", position));
        }
    }

    pub fn select_and_quit(&mut self) {
        self.outcome = Outcome {
            selected: self.nav.selected_value().cloned(),
        };
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostError, PathStatus, ReadLimits};
    use crossterm::event::{KeyEventKind, KeyEventState};
    use serde_json::json;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorded {
        copied: Vec<String>,
        saved: Vec<(String, String)>,
        opened: Vec<String>,
    }

    struct FakeHost {
        log: Arc<Mutex<Recorded>>,
        clipboard_works: bool,
    }

    impl Host for FakeHost {
        fn copy_to_clipboard(&mut self, text: &str) -> Result<(), HostError> {
            if !self.clipboard_works {
                return Err(HostError::NoClipboard);
            }
            self.log.lock().unwrap().copied.push(text.to_string());
            Ok(())
        }

        fn open_external_url(&mut self, url: &str) -> Result<(), HostError> {
            self.log.lock().unwrap().opened.push(url.to_string());
            Ok(())
        }

        fn open_path_in_shell(&mut self, path: &str) -> Result<(), HostError> {
            self.log.lock().unwrap().opened.push(path.to_string());
            Ok(())
        }

        fn save_file(&mut self, content: &str, name: &str) -> Result<PathBuf, HostError> {
            self.log
                .lock()
                .unwrap()
                .saved
                .push((name.to_string(), content.to_string()));
            Ok(PathBuf::from("/tmp").join(name))
        }
    }

    struct AudioProbe;

    impl FileProbe for AudioProbe {
        fn check_path(&self, _path: &Path) -> Result<Option<PathStatus>, HostError> {
            Ok(Some(PathStatus {
                is_dir: false,
                size: 10,
                modified: None,
            }))
        }

        fn read_file_for_preview(&self, _path: &Path, _limits: ReadLimits) -> FilePreview {
            FilePreview::Audio {
                format: "mp3".to_string(),
                bytes: 10,
            }
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app(doc: &Document, clipboard_works: bool) -> (App<'_>, Arc<Mutex<Recorded>>) {
        let log = Arc::new(Mutex::new(Recorded::default()));
        let host = FakeHost {
            log: Arc::clone(&log),
            clipboard_works,
        };
        let app = App::new(doc, Config::default(), Box::new(host), Arc::new(AudioProbe));
        (app, log)
    }

    fn doc() -> Document {
        Document::new(
            json!({
                "name": "demo",
                "site": "https://example.com/logo.png",
                "tracks": ["./song.mp3"],
                "nested": {"deep": {"leaf": 1}}
            }),
            "test.json",
        )
    }

    fn wait_for_query(app: &mut App<'_>, key: &str) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.nav.state().queries.get(key).is_none() && Instant::now() < deadline {
            app.tick(Instant::now());
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_starts_on_first_child() {
        let doc = doc();
        let (app, _) = app(&doc, true);
        assert_eq!(app.nav.selection(), "name");
        assert_eq!(app.keybinding_mode(), KeybindingMode::Normal);
    }

    #[test]
    fn test_keys_move_and_expand() {
        let doc = doc();
        let (mut app, _) = app(&doc, true);
        app.handle_action(Action::Last);
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.nav.selection(), "nested");
        app.handle_key(key(KeyCode::Char('l')));
        assert!(app.nav.state().is_expanded("nested"));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.nav.selection(), "nested.deep");
    }

    #[test]
    fn test_goto_path_records_history() {
        let doc = doc();
        let (mut app, _) = app(&doc, true);
        app.handle_key(key(KeyCode::Char(':')));
        assert_eq!(app.mode, AppMode::GotoPath);
        app.goto_input.clear();
        for c in "nested.deep.leaf".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.nav.selection(), "nested.deep.leaf");
        assert!(app.nav.state().is_expanded("nested.deep"));

        app.goto_path("nope.nothing");
        assert_eq!(
            app.status_message.as_deref(),
            Some("✗ Path not found: nope.nothing")
        );
        assert_eq!(app.nav.selection(), "nested.deep.leaf");

        app.handle_action(Action::GoBack);
        assert_eq!(app.nav.selection(), "");
    }

    #[test]
    fn test_goto_reads_dollar_as_root_only_at_the_start() {
        let doc = Document::new(json!({"$": {"x": 1}, "x": 2}), "dollar.json");
        let (mut app, _) = app(&doc, true);

        app.goto_path("$.$.x");
        assert_eq!(app.nav.selection(), "$.x");
        assert_eq!(app.nav.selected_value(), Some(&json!(1)));

        app.handle_key(key(KeyCode::Char(':')));
        app.goto_input = "$.x".to_string();
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.nav.selection(), "x");
        assert_eq!(app.nav.selected_value(), Some(&json!(2)));

        app.nav.navigate("$", true);
        app.enter_goto_path();
        assert_eq!(app.goto_input, "$.$");
    }

    #[test]
    fn test_search_is_debounced_and_enter_navigates() {
        let doc = doc();
        let (mut app, _) = app(&doc, true);
        app.handle_key(key(KeyCode::Char('/')));
        for c in "leaf".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert!(app.search.is_pending());
        assert!(app.search.results.is_empty());

        app.tick(Instant::now() + Duration::from_secs(1));
        assert!(!app.search.is_pending());
        assert_eq!(
            app.search.selected_result().map(|r| r.path.as_str()),
            Some("nested.deep.leaf")
        );

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.nav.selection(), "nested.deep.leaf");
    }

    #[test]
    fn test_enter_runs_pending_search() {
        let doc = doc();
        let (mut app, _) = app(&doc, true);
        app.handle_action(Action::EnterSearchMode);
        for c in "site".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_action(Action::ConfirmAction);
        assert_eq!(app.nav.selection(), "site");
    }

    #[test]
    fn test_escape_clears_search() {
        let doc = doc();
        let (mut app, _) = app(&doc, true);
        app.handle_action(Action::EnterSearchMode);
        app.handle_key(key(KeyCode::Char('n')));
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.search.input.is_empty());
        assert!(!app.search.is_pending());
    }

    #[test]
    fn test_copy_falls_back_to_save() {
        let doc = doc();
        let (mut app, log) = app(&doc, false);
        app.copy_value();
        assert_eq!(
            log.lock().unwrap().saved,
            vec![("name.json".to_string(), "demo".to_string())]
        );
        assert!(
            app.status_message
                .as_deref()
                .is_some_and(|m| m.starts_with("✓ Clipboard unavailable"))
        );
    }

    #[test]
    fn test_copy_path_and_save_value() {
        let doc = doc();
        let (mut app, log) = app(&doc, true);
        app.nav.navigate("nested.deep", true);
        app.copy_path();
        app.save_value();
        let log = log.lock().unwrap();
        assert_eq!(log.copied, vec!["nested.deep".to_string()]);
        assert_eq!(log.saved[0].0, "deep.json");
        assert!(log.saved[0].1.contains("\"leaf\": 1"));
    }

    #[test]
    fn test_open_url() {
        let doc = doc();
        let (mut app, log) = app(&doc, true);
        app.nav.navigate("site", true);
        app.open_external();
        assert_eq!(
            log.lock().unwrap().opened,
            vec!["https://example.com/logo.png".to_string()]
        );

        app.nav.navigate("name", true);
        app.open_external();
        assert_eq!(
            app.status_message.as_deref(),
            Some("✗ Not a URL or file path")
        );
    }

    #[test]
    fn test_audio_toggle_after_query() {
        let doc = doc();
        let (mut app, _) = app(&doc, true);
        app.nav.navigate("tracks[0]", true);
        app.toggle_audio(Instant::now());
        assert_eq!(app.status_message.as_deref(), Some("✗ Not an audio file"));

        wait_for_query(&mut app, "./song.mp3");
        app.toggle_audio(Instant::now());
        assert!(app.audio.is_playing("./song.mp3"));
        assert_eq!(
            app.status_message.as_deref(),
            Some("▶ Timer running at 0:00 (no sound output)")
        );
        app.toggle_audio(Instant::now());
        assert!(!app.audio.is_playing("./song.mp3"));
        assert!(
            app.status_message
                .as_deref()
                .is_some_and(|msg| msg.starts_with("⏸ Timer paused at "))
        );
    }

    #[test]
    fn test_select_and_quit_returns_value() {
        let doc = doc();
        let (mut app, _) = app(&doc, true);
        app.nav.navigate("nested.deep", true);
        app.handle_action(Action::SelectAndQuit);
        assert!(app.should_quit);
        assert_eq!(app.outcome.selected, Some(json!({"leaf": 1})));
    }

    #[test]
    fn test_quit_has_empty_outcome() {
        let doc = doc();
        let (mut app, _) = app(&doc, true);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
        assert_eq!(app.outcome.selected, None);
    }

    #[test]
    fn test_help_mode_swallows_navigation() {
        let doc = doc();
        let (mut app, _) = app(&doc, true);
        app.handle_key(key(KeyCode::Char('?')));
        assert_eq!(app.keybinding_mode(), KeybindingMode::Help);
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.nav.selection(), "name");
        assert_eq!(app.help_scroll, 1);
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn test_raw_view_scrolls_instead_of_moving() {
        let doc = doc();
        let (mut app, _) = app(&doc, true);
        app.handle_action(Action::ShowRaw);
        app.handle_action(Action::MoveDown);
        assert_eq!(app.raw_scroll, 1);
        assert_eq!(app.nav.selection(), "name");
    }
}
