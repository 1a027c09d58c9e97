//! Default keybindings for treenav, in keybinds-rs key string syntax.

use super::{Action, KeybindingMode, Keybindings};

pub fn default_keybindings() -> Keybindings {
    let mut kb = Keybindings::new();
    add_normal_mode(&mut kb);
    add_search_mode(&mut kb);
    add_goto_path_mode(&mut kb);
    add_help_mode(&mut kb);
    kb
}

/// Bind a key, panicking on invalid key syntax (only used for built-in defaults)
fn bind(kb: &mut Keybindings, mode: KeybindingMode, key: &str, action: Action) {
    kb.bind(mode, key, action)
        .unwrap_or_else(|e| panic!("Invalid default keybinding '{}': {}", key, e));
}

fn add_normal_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::Normal;

    // Navigation
    bind(kb, Normal, "j", MoveDown);
    bind(kb, Normal, "Down", MoveDown);
    bind(kb, Normal, "k", MoveUp);
    bind(kb, Normal, "Up", MoveUp);
    bind(kb, Normal, "h", MoveLeft);
    bind(kb, Normal, "Left", MoveLeft);
    bind(kb, Normal, "l", MoveRight);
    bind(kb, Normal, "Right", MoveRight);
    bind(kb, Normal, "g", First);
    bind(kb, Normal, "Home", First);
    bind(kb, Normal, "G", Last);
    bind(kb, Normal, "End", Last);
    bind(kb, Normal, "PageDown", PageDown);
    bind(kb, Normal, "Ctrl+d", PageDown);
    bind(kb, Normal, "PageUp", PageUp);
    bind(kb, Normal, "Ctrl+u", PageUp);

    // Tree
    bind(kb, Normal, "Space", ToggleExpand);
    bind(kb, Normal, "Enter", ToggleExpand);
    bind(kb, Normal, "E", ExpandAll);
    bind(kb, Normal, "C", CollapseAll);

    // History
    bind(kb, Normal, "b", GoBack);
    bind(kb, Normal, "Backspace", GoBack);
    bind(kb, Normal, "Alt+Left", GoBack);
    bind(kb, Normal, "F", GoForward);
    bind(kb, Normal, "Alt+Right", GoForward);

    // View
    bind(kb, Normal, "1", ShowTree);
    bind(kb, Normal, "2", ShowColumns);
    bind(kb, Normal, "3", ShowRaw);
    bind(kb, Normal, "Tab", CycleView);
    bind(kb, Normal, "w", TogglePreview);
    bind(kb, Normal, "[", PaneWidthDecrease);
    bind(kb, Normal, "]", PaneWidthIncrease);
    bind(kb, Normal, "?", ToggleHelp);

    // Mode transitions
    bind(kb, Normal, "/", EnterSearchMode);
    bind(kb, Normal, "s", EnterSearchMode);
    bind(kb, Normal, ":", EnterGotoPath);
    bind(kb, Normal, "n", NextResult);
    bind(kb, Normal, "N", PrevResult);

    // Clipboard
    bind(kb, Normal, "y", CopyValue);
    bind(kb, Normal, "Y", CopyPath);
    bind(kb, Normal, "S", SaveValue);

    // External
    bind(kb, Normal, "o", OpenExternal);
    bind(kb, Normal, "p", ToggleAudio);

    // Application
    bind(kb, Normal, "Ctrl+s", SelectAndQuit);
    bind(kb, Normal, "q", Quit);
    bind(kb, Normal, "Escape", Quit);
}

fn add_search_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::Search;

    bind(kb, Search, "Escape", ExitMode);
    bind(kb, Search, "Enter", ConfirmAction);
    bind(kb, Search, "Backspace", InputBackspace);
    bind(kb, Search, "Down", NextResult);
    bind(kb, Search, "Ctrl+n", NextResult);
    bind(kb, Search, "Up", PrevResult);
    bind(kb, Search, "Ctrl+p", PrevResult);
}

fn add_goto_path_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::GotoPath;

    bind(kb, GotoPath, "Escape", ExitMode);
    bind(kb, GotoPath, "Enter", ConfirmAction);
    bind(kb, GotoPath, "Backspace", InputBackspace);
}

fn add_help_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::Help;

    bind(kb, Help, "j", HelpScrollDown);
    bind(kb, Help, "Down", HelpScrollDown);
    bind(kb, Help, "k", HelpScrollUp);
    bind(kb, Help, "Up", HelpScrollUp);
    bind(kb, Help, "?", ToggleHelp);
    bind(kb, Help, "Escape", ToggleHelp);
    bind(kb, Help, "q", Quit);
}
