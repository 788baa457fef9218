use std::collections::HashMap;
use std::hash::Hash;
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

// ─── Key binding infrastructure ────────────────────────────────────────

/// A key combination (key code + modifiers).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Reverse-lookup map: KeyBind → Action, one per event source.
pub struct ActionMap<A> {
    map: HashMap<KeyBind, A>,
    display: HashMap<A, Vec<String>>,
}

impl<A: Copy + Eq + Hash> ActionMap<A> {
    /// Merge user overrides on top of defaults.
    ///
    /// An action present in `overrides` loses all of its default keys;
    /// actions absent from `overrides` keep theirs.
    pub fn build(
        defaults: &HashMap<A, Vec<String>>,
        overrides: &HashMap<A, Vec<String>>,
    ) -> Self {
        let mut merged = defaults.clone();
        for (action, keys) in overrides {
            merged.insert(*action, keys.clone());
        }

        let mut map = HashMap::new();
        let mut display: HashMap<A, Vec<String>> = HashMap::new();
        for (action, key_strings) in &merged {
            for key_str in key_strings {
                for bind in parse_key(key_str) {
                    map.insert(bind, *action);
                }
            }
            let keys: Vec<String> = key_strings.iter()
                .filter(|s| !s.trim().starts_with("//"))
                .map(|s| format_key_display(s))
                .collect();
            display.insert(*action, keys);
        }

        Self { map, display }
    }

    /// Formatted display strings for an action (e.g. `["Ctrl+O"]`).
    pub fn keys(&self, action: A) -> &[String] {
        self.display.get(&action).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn first_key(&self, action: A) -> &str {
        self.keys(action).first().map(|s| s.as_str()).unwrap_or("")
    }

    pub fn keys_joined(&self, action: A, sep: &str) -> String {
        self.keys(action).join(sep)
    }

    pub fn lookup(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<A> {
        let bind = KeyBind { code, modifiers };
        if let Some(action) = self.map.get(&bind) {
            return Some(*action);
        }
        // crossterm reports SHIFT for uppercase letters, shifted symbols and
        // BackTab. Retry without it.
        if matches!(code, KeyCode::Char(_) | KeyCode::BackTab) && modifiers.contains(KeyModifiers::SHIFT) {
            let stripped = modifiers & !KeyModifiers::SHIFT;
            return self.map.get(&KeyBind { code, modifiers: stripped }).copied();
        }
        None
    }
}

// ─── Key string parsing ───────────────────────────────────────────────

/// Parse a key string like `"ctrl+o"`, `"shift+tab"`, `"left"` into one or
/// more `KeyBind` values. Letters always produce both cases.
pub fn parse_key(s: &str) -> Vec<KeyBind> {
    let trimmed = s.trim();
    if trimmed.starts_with("//") {
        return Vec::new();
    }
    let s = trimmed.to_lowercase();
    let parts: Vec<&str> = s.split('+').collect();
    let (key_part, modifier_parts) = match parts.split_last() {
        Some((last, rest)) => (*last, rest),
        None => return Vec::new(),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in modifier_parts {
        match *part {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => {}
        }
    }

    let code = match key_part {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" if modifiers.contains(KeyModifiers::SHIFT) => {
            modifiers &= !KeyModifiers::SHIFT;
            KeyCode::BackTab
        }
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        f if f.len() > 1 && f.starts_with('f') => match f[1..].parse::<u8>() {
            Ok(n) if (1..=12).contains(&n) => KeyCode::F(n),
            _ => return Vec::new(),
        },
        k => {
            let mut chars = k.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return Vec::new(),
            }
        }
    };

    if let KeyCode::Char(ch) = code {
        if ch.is_ascii_alphabetic() {
            return vec![
                KeyBind { code: KeyCode::Char(ch.to_ascii_lowercase()), modifiers },
                KeyBind { code: KeyCode::Char(ch.to_ascii_uppercase()), modifiers },
            ];
        }
    }

    vec![KeyBind { code, modifiers }]
}

/// `"ctrl+o"` → `"Ctrl+O"`, `"backspace"` → `"BkSp"`, `"shift+tab"` → `"Shift+Tab"`.
pub fn format_key_display(s: &str) -> String {
    let s = s.trim().to_lowercase();
    let parts: Vec<&str> = s.split('+').collect();
    let last = parts.len().saturating_sub(1);

    parts.iter().enumerate().map(|(i, part)| {
        if i < last {
            match *part {
                "ctrl" | "control" => "Ctrl".to_string(),
                "shift" => "Shift".to_string(),
                "alt" => "Alt".to_string(),
                other => other.to_string(),
            }
        } else {
            match *part {
                "up" => "Up".into(),
                "down" => "Down".into(),
                "left" => "←".into(),
                "right" => "→".into(),
                "enter" | "return" => "Enter".into(),
                "esc" | "escape" => "Esc".into(),
                "tab" => "Tab".into(),
                "backtab" => "Shift+Tab".into(),
                "space" => "Space".into(),
                "backspace" => "BkSp".into(),
                "delete" | "del" => "Del".into(),
                "home" => "Home".into(),
                "end" => "End".into(),
                "pageup" => "PgUp".into(),
                "pagedown" => "PgDn".into(),
                other => other.to_uppercase(),
            }
        }
    }).collect::<Vec<_>>().join("+")
}

// ─── Event sources ────────────────────────────────────────────────────

/// Where a key event was delivered. Each source has its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySource {
    /// The hex input field has focus.
    Input,
    /// A swatch has focus.
    Swatch,
    /// Window-level handler; sees keys no focused element consumed.
    Window,
    /// A modal prompt or alert is open.
    Dialog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwatchAction {
    MoveLeft,
    MoveRight,
    Edit,
    Delete,
}

pub fn default_swatch_keybindings() -> HashMap<SwatchAction, Vec<String>> {
    let mut m = HashMap::new();
    m.insert(SwatchAction::MoveLeft, vec!["//Move color one slot left".into(), "left".into()]);
    m.insert(SwatchAction::MoveRight, vec!["//Move color one slot right".into(), "right".into()]);
    m.insert(SwatchAction::Edit, vec!["//Edit color and copy it to the clipboard".into(), "enter".into()]);
    m.insert(SwatchAction::Delete, vec!["//Delete color".into(), "backspace".into(), "delete".into()]);
    m
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputAction {
    Submit,
}

pub fn default_input_keybindings() -> HashMap<InputAction, Vec<String>> {
    let mut m = HashMap::new();
    m.insert(InputAction::Submit, vec!["//Add the typed color".into(), "enter".into()]);
    m
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalAction {
    ToggleFocus,
    FocusNext,
    FocusPrev,
    OpenLink,
    Quit,
}

pub fn default_global_keybindings() -> HashMap<GlobalAction, Vec<String>> {
    let mut m = HashMap::new();
    m.insert(GlobalAction::ToggleFocus, vec!["//Toggle focus between input and swatches".into(), "esc".into()]);
    m.insert(GlobalAction::FocusNext, vec!["//Focus next element".into(), "tab".into()]);
    m.insert(GlobalAction::FocusPrev, vec!["//Focus previous element".into(), "backtab".into()]);
    m.insert(GlobalAction::OpenLink, vec!["//Open a shared link".into(), "ctrl+o".into()]);
    m.insert(GlobalAction::Quit, vec!["//Quit and print the link".into(), "ctrl+q".into(), "ctrl+c".into()]);
    m
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogAction {
    Confirm,
    Cancel,
}

pub fn default_dialog_keybindings() -> HashMap<DialogAction, Vec<String>> {
    let mut m = HashMap::new();
    m.insert(DialogAction::Confirm, vec!["//Confirm".into(), "enter".into()]);
    m.insert(DialogAction::Cancel, vec!["//Cancel".into(), "esc".into()]);
    m
}

/// A resolved entry of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Swatch(SwatchAction),
    Input(InputAction),
    Global(GlobalAction),
    Dialog(DialogAction),
}

// ─── JSON config & runtime container ───────────────────────────────────

/// JSON-serializable keybindings, one table per source. Missing tables fall
/// back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_swatch_keybindings")]
    pub swatch: HashMap<SwatchAction, Vec<String>>,
    #[serde(default = "default_input_keybindings")]
    pub input: HashMap<InputAction, Vec<String>>,
    #[serde(default = "default_global_keybindings")]
    pub global: HashMap<GlobalAction, Vec<String>>,
    #[serde(default = "default_dialog_keybindings")]
    pub dialog: HashMap<DialogAction, Vec<String>>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            swatch: default_swatch_keybindings(),
            input: default_input_keybindings(),
            global: default_global_keybindings(),
            dialog: default_dialog_keybindings(),
        }
    }
}

/// The dispatch table: (source, key) → command.
pub struct Keybindings {
    swatch: ActionMap<SwatchAction>,
    input: ActionMap<InputAction>,
    global: ActionMap<GlobalAction>,
    dialog: ActionMap<DialogAction>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::from_config(&KeybindingsConfig::default())
    }
}

impl Keybindings {
    pub fn from_config(config: &KeybindingsConfig) -> Self {
        Self {
            swatch: ActionMap::build(&default_swatch_keybindings(), &config.swatch),
            input: ActionMap::build(&default_input_keybindings(), &config.input),
            global: ActionMap::build(&default_global_keybindings(), &config.global),
            dialog: ActionMap::build(&default_dialog_keybindings(), &config.dialog),
        }
    }

    pub fn dispatch(&self, source: KeySource, code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
        match source {
            KeySource::Swatch => self.swatch.lookup(code, modifiers).map(Command::Swatch),
            KeySource::Input => self.input.lookup(code, modifiers).map(Command::Input),
            KeySource::Window => self.global.lookup(code, modifiers).map(Command::Global),
            KeySource::Dialog => self.dialog.lookup(code, modifiers).map(Command::Dialog),
        }
    }

    pub fn swatch_keys_joined(&self, action: SwatchAction, sep: &str) -> String { self.swatch.keys_joined(action, sep) }
    pub fn input_first_key(&self, action: InputAction) -> &str { self.input.first_key(action) }
    pub fn global_first_key(&self, action: GlobalAction) -> &str { self.global.first_key(action) }
    pub fn global_keys_joined(&self, action: GlobalAction, sep: &str) -> String { self.global.keys_joined(action, sep) }
    pub fn dialog_first_key(&self, action: DialogAction) -> &str { self.dialog.first_key(action) }
}

// ─── Tests ─────────────────────────────────────────────────────────────
