use std::collections::VecDeque;

use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::layout::{Position, Rect};
use tracing::{debug, error, info};

use crate::config::Settings;
use crate::keybindings::{Command, GlobalAction, InputAction, KeySource, Keybindings, SwatchAction};
use crate::location::Location;
use crate::palette::{fragment, hex, reduce, Direction, PaletteAction, PaletteError, PaletteState};

use super::dialogs;
use super::input::InputField;
use super::theme::Theme;

pub const TITLE_PREFIX: &str = "Color Manager";

/// Which element holds keyboard focus. Swatch focus is remembered by colour
/// so it survives the swatch list being rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    Input,
    Swatch(String),
    None,
}

/// Discrete inputs to the widget. Each is handled to completion before the
/// next is taken off the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Load,
    HashChange,
    Key(KeyEvent),
    Click { column: u16, row: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogType {
    EditColor,
    OpenLink,
    Alert,
}

#[derive(Debug, Clone)]
pub struct Dialog {
    pub dialog_type: DialogType,
    pub message: String,
    pub input: InputField,
    /// Colour being edited (EditColor only).
    pub target: Option<String>,
}

pub struct App {
    pub location: Location,
    /// The list the swatches were last rendered from.
    pub palette: PaletteState,
    pub focus: Focus,
    /// Last swatch focus moved away from, for Esc to return to.
    pub previous_focus: Option<String>,
    pub input: InputField,
    pub dialog: Option<Dialog>,
    pub keybindings: Keybindings,
    pub theme: Theme,
    pub title: String,
    pub clipboard_enabled: bool,
    /// Last value handed to the clipboard.
    pub clipboard: Option<String>,
    pending_clipboard: Option<String>,
    events: VecDeque<AppEvent>,
    /// Screen areas from the last draw, for mouse hit-testing.
    pub swatch_areas: Vec<Rect>,
    pub input_area: Rect,
    pub should_quit: bool,
}

impl App {
    pub fn new(location: Location, settings: &Settings, theme: Theme) -> Self {
        let mut app = Self {
            location,
            palette: PaletteState::default(),
            focus: Focus::None,
            previous_focus: None,
            input: InputField::new(Some(settings.input_max_len)),
            dialog: None,
            keybindings: Keybindings::from_config(&settings.keybindings),
            theme,
            title: String::new(),
            clipboard_enabled: settings.clipboard,
            clipboard: None,
            pending_clipboard: None,
            events: VecDeque::new(),
            swatch_areas: Vec::new(),
            input_area: Rect::default(),
            should_quit: false,
        };
        app.input.placeholder = "#".to_string();
        let initial = app.colors_from_url();
        app.render_colors(initial);
        app.events.push_back(AppEvent::Load);
        app
    }

    // ── Event queue ──

    pub fn push_event(&mut self, event: AppEvent) {
        self.events.push_back(event);
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Handle queued events in order, including the ones handlers queue
    /// themselves, until the queue is empty.
    pub fn process_pending(&mut self) {
        while let Some(event) = self.events.pop_front() {
            self.handle_event(event);
            if self.should_quit {
                self.events.clear();
            }
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Load => self.focus = Focus::Input,
            AppEvent::HashChange => {
                let colors = self.colors_from_url();
                self.render_colors(colors);
            }
            AppEvent::Key(key) => self.on_key(key),
            AppEvent::Click { column, row } => self.on_click(column, row),
        }
    }

    /// Clipboard text waiting to be written by the terminal loop.
    pub fn take_clipboard_request(&mut self) -> Option<String> {
        self.pending_clipboard.take()
    }

    // ── Model ──

    /// The list stored in the fragment, passed through the reducer so a
    /// link carrying repeated colours still yields one swatch per colour.
    pub fn colors_from_url(&self) -> PaletteState {
        let loaded = fragment::decode(self.location.hash());
        reduce(&self.palette, PaletteAction::Load(loaded)).unwrap_or_default()
    }

    /// Write `state` to the fragment. A real change queues a hash-change
    /// notification behind whatever is already pending.
    pub fn persist(&mut self, state: &PaletteState) {
        let fragment = state.to_fragment();
        if self.location.set_hash(&fragment) {
            info!(fragment = %fragment, count = state.len(), "palette saved");
            self.events.push_back(AppEvent::HashChange);
        }
    }

    /// Rebuild the swatch view from `state`, keep focus on the swatch showing
    /// the previously focused colour and refresh the title.
    pub fn render_colors(&mut self, state: PaletteState) {
        let restored = match &self.focus {
            Focus::Swatch(focused) => Some(
                state
                    .position(focused)
                    .and_then(|i| state.get(i))
                    .map(|color| color.to_string()),
            ),
            _ => None,
        };
        if let Some(restored) = restored {
            self.focus = restored.map(Focus::Swatch).unwrap_or(Focus::None);
        }
        self.palette = state;
        self.update_title();
    }

    fn update_title(&mut self) {
        let count = self.colors_from_url().len();
        self.title = format!("{} ({} colors)", TITLE_PREFIX, count);
    }

    /// Index of the focused swatch in the rendered list.
    pub fn focused_index(&self) -> Option<usize> {
        match &self.focus {
            Focus::Swatch(color) => self.palette.position(color),
            _ => None,
        }
    }

    fn focus_swatch_at(&mut self, index: usize) {
        if let Some(color) = self.palette.get(index) {
            let color = color.to_string();
            self.set_focus(Focus::Swatch(color));
        }
    }

    // ── Operations ──

    pub fn add_color(&mut self, text: &str) -> bool {
        let current = self.colors_from_url();
        match reduce(&current, PaletteAction::Add(text.to_string())) {
            Ok(next) => {
                self.persist(&next);
                true
            }
            Err(err) => {
                self.show_user_error(&err);
                false
            }
        }
    }

    pub fn remove_focused(&mut self) {
        let Some(index) = self.focused_index() else { return };
        let current = self.palette.clone();
        let Ok(next) = reduce(&current, PaletteAction::Remove(index)) else { return };
        self.focus = match index.checked_sub(1).and_then(|i| current.get(i)) {
            Some(prev) => Focus::Swatch(prev.to_string()),
            None => Focus::Input,
        };
        self.palette = next.clone();
        self.persist(&next);
    }

    pub fn move_focused(&mut self, direction: Direction) {
        let Focus::Swatch(color) = self.focus.clone() else { return };
        let current = self.colors_from_url();
        let Some(index) = current.position(&color) else { return };
        let at_edge = match direction {
            Direction::Left => index == 0,
            Direction::Right => index + 1 >= current.len(),
        };
        if at_edge {
            return;
        }
        if let Ok(next) = reduce(&current, PaletteAction::Move { index, direction }) {
            self.persist(&next);
            self.render_colors(next);
        }
    }

    /// Open the edit prompt for the focused swatch.
    pub fn select_focused(&mut self) {
        let Focus::Swatch(color) = self.focus.clone() else { return };
        self.dialog = Some(Dialog {
            dialog_type: DialogType::EditColor,
            message: "Copy to clipboard, or type a new color".to_string(),
            input: InputField::with_text(&hex::display_form(&color)),
            target: Some(color),
        });
    }

    /// Prompt answered for `target`. An empty answer behaves like a cancel.
    pub fn finish_edit(&mut self, target: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        self.copy_to_clipboard(value);

        let Some(index) = self.palette.position(target) else { return };
        let current = self.palette.clone();
        match reduce(&current, PaletteAction::Replace { index, value: value.to_string() }) {
            Ok(next) if next != current => {
                if let Some(updated) = next.get(index) {
                    self.focus = Focus::Swatch(updated.to_string());
                }
                self.palette = next.clone();
                self.persist(&next);
            }
            Ok(_) => {}
            Err(err) => self.show_user_error(&err),
        }
    }

    pub fn show_open_link_dialog(&mut self) {
        self.dialog = Some(Dialog {
            dialog_type: DialogType::OpenLink,
            message: "Open a palette link or fragment".to_string(),
            input: InputField::with_text(&self.location.href()),
            target: None,
        });
    }

    pub fn open_link(&mut self, link: &str) {
        if link.trim().is_empty() {
            return;
        }
        if self.location.navigate(link) {
            info!(href = %self.location.href(), "navigated");
            self.events.push_back(AppEvent::HashChange);
        }
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        if !self.clipboard_enabled {
            return;
        }
        self.clipboard = Some(text.to_string());
        self.pending_clipboard = Some(text.to_string());
    }

    pub fn show_user_error(&mut self, err: &PaletteError) {
        error!(input = %err.input(), "{}", err);
        self.dialog = Some(Dialog {
            dialog_type: DialogType::Alert,
            message: err.to_string(),
            input: InputField::default(),
            target: None,
        });
    }

    // ── Focus ──

    /// Move focus, remembering the swatch being left.
    fn set_focus(&mut self, focus: Focus) {
        if let Focus::Swatch(color) = &self.focus {
            if self.focus != focus {
                self.previous_focus = Some(color.clone());
            }
        }
        self.focus = focus;
    }

    /// Esc: input ↔ the swatch focused before.
    pub fn toggle_input_focus(&mut self) {
        if self.focus == Focus::Input {
            self.focus = match self.previous_focus.take().and_then(|c| self.palette.position(&c)) {
                Some(index) => Focus::Swatch(self.palette.colors()[index].clone()),
                None => Focus::None,
            };
        } else {
            self.set_focus(Focus::Input);
        }
    }

    /// Tab order: input, then swatches left to right. Wraps around.
    pub fn cycle_focus(&mut self, forward: bool) {
        // 0 is the input, 1..=n the swatches
        let stops = self.palette.len() + 1;
        let current = match &self.focus {
            Focus::Input => Some(0),
            Focus::Swatch(_) => self.focused_index().map(|i| i + 1),
            Focus::None => None,
        };
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => stops - 1,
            (Some(c), true) => (c + 1) % stops,
            (Some(c), false) => (c + stops - 1) % stops,
        };
        if next == 0 {
            self.set_focus(Focus::Input);
        } else {
            self.focus_swatch_at(next - 1);
        }
    }

    // ── Input dispatch ──

    fn on_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if self.dialog.is_some() {
            dialogs::handle_dialog_input(self, key.code, key.modifiers);
            return;
        }

        let source = match self.focus {
            Focus::Input => Some(KeySource::Input),
            Focus::Swatch(_) => Some(KeySource::Swatch),
            Focus::None => None,
        };
        if let Some(source) = source {
            if let Some(command) = self.keybindings.dispatch(source, key.code, key.modifiers) {
                self.run_command(command);
                return;
            }
            if source == KeySource::Input && self.input.handle_edit_key(key.code, key.modifiers) {
                return;
            }
        }
        if let Some(command) = self.keybindings.dispatch(KeySource::Window, key.code, key.modifiers) {
            self.run_command(command);
        }
    }

    pub fn run_command(&mut self, command: Command) {
        debug!(?command, focus = ?self.focus, "command");
        match command {
            Command::Input(InputAction::Submit) => self.submit_input(),
            Command::Swatch(SwatchAction::MoveLeft) => self.move_focused(Direction::Left),
            Command::Swatch(SwatchAction::MoveRight) => self.move_focused(Direction::Right),
            Command::Swatch(SwatchAction::Edit) => self.select_focused(),
            Command::Swatch(SwatchAction::Delete) => self.remove_focused(),
            Command::Global(GlobalAction::ToggleFocus) => self.toggle_input_focus(),
            Command::Global(GlobalAction::FocusNext) => self.cycle_focus(true),
            Command::Global(GlobalAction::FocusPrev) => self.cycle_focus(false),
            Command::Global(GlobalAction::OpenLink) => self.show_open_link_dialog(),
            Command::Global(GlobalAction::Quit) => self.should_quit = true,
            Command::Dialog(_) => {}
        }
    }

    fn submit_input(&mut self) {
        let text = self.input.text.clone();
        if self.add_color(&text) {
            self.input.placeholder = text;
            self.input.clear();
        }
    }

    fn on_click(&mut self, column: u16, row: u16) {
        if self.dialog.is_some() {
            return;
        }
        let pos = Position { x: column, y: row };
        if let Some(index) = self.swatch_areas.iter().position(|r| r.contains(pos)) {
            self.focus_swatch_at(index);
            self.select_focused();
        } else if self.input_area.contains(pos) {
            self.set_focus(Focus::Input);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app_with(fragment: &str) -> App {
        let location = Location::parse(&format!("#{}", fragment), "test://palette");
        let mut app = App::new(location, &Settings::default(), Theme::dark(true));
        app.process_pending();
        app
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.push_event(AppEvent::Key(KeyEvent::new(code, modifiers)));
        app.process_pending();
    }

    fn key(app: &mut App, code: KeyCode) {
        press(app, code, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            key(app, KeyCode::Char(ch));
        }
    }

    fn colors(app: &App) -> Vec<String> {
        app.palette.colors().to_vec()
    }

    #[test]
    fn test_load_focuses_input_and_sets_title() {
        let app = app_with("AABBCC-DDEEFF");
        assert_eq!(app.focus, Focus::Input);
        assert_eq!(app.title, "Color Manager (2 colors)");
        assert_eq!(colors(&app), vec!["#AABBCC", "DDEEFF"]);
    }

    #[test]
    fn test_add_through_input() {
        let mut app = app_with("");
        type_text(&mut app, "F00");
        key(&mut app, KeyCode::Enter);

        assert_eq!(app.location.hash(), "FF0000");
        assert_eq!(colors(&app), vec!["#FF0000"]);
        assert_eq!(app.title, "Color Manager (1 colors)");
        assert!(app.input.text.is_empty());
        assert_eq!(app.input.placeholder, "F00");
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_add_prepends() {
        let mut app = app_with("AABBCC");
        type_text(&mut app, "#123456");
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.location.hash(), "123456-AABBCC");
        assert_eq!(colors(&app), vec!["#123456", "AABBCC"]);
    }

    #[test]
    fn test_add_duplicate_shows_alert_and_keeps_list() {
        let mut app = app_with("AABBCC-DDEEFF");
        type_text(&mut app, "ddeeff");
        key(&mut app, KeyCode::Enter);

        let dialog = app.dialog.as_ref().unwrap();
        assert_eq!(dialog.dialog_type, DialogType::Alert);
        assert_eq!(dialog.message, "Color already exists.");
        assert_eq!(app.location.hash(), "AABBCC-DDEEFF");
        assert_eq!(app.input.text, "ddeeff");

        key(&mut app, KeyCode::Enter);
        assert!(app.dialog.is_none());
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn test_add_invalid_shows_alert() {
        let mut app = app_with("");
        type_text(&mut app, "zzzzzz");
        key(&mut app, KeyCode::Enter);
        let dialog = app.dialog.as_ref().unwrap();
        assert_eq!(dialog.message, "Received invalid hex code.");
        assert_eq!(app.location.hash(), "");
    }

    #[test]
    fn test_tab_walks_swatches() {
        let mut app = app_with("111111-222222");
        key(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Swatch("#111111".into()));
        key(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Swatch("222222".into()));
        key(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Input);
        press(&mut app, KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(app.focus, Focus::Swatch("222222".into()));
    }

    #[test]
    fn test_move_keeps_focus_on_moved_swatch() {
        let mut app = app_with("111111-222222-333333");
        app.focus = Focus::Swatch("222222".into());
        key(&mut app, KeyCode::Left);

        assert_eq!(app.location.hash(), "222222-111111-333333");
        assert_eq!(colors(&app), vec!["#222222", "111111", "333333"]);
        assert_eq!(app.focus, Focus::Swatch("#222222".into()));
        assert_eq!(app.focused_index(), Some(0));
    }

    #[test]
    fn test_move_at_edges_is_noop() {
        let mut app = app_with("111111-222222");
        app.focus = Focus::Swatch("#111111".into());
        key(&mut app, KeyCode::Left);
        assert_eq!(app.location.hash(), "111111-222222");
        assert!(!app.has_pending_events());

        app.focus = Focus::Swatch("222222".into());
        key(&mut app, KeyCode::Right);
        assert_eq!(app.location.hash(), "111111-222222");
        assert_eq!(app.focus, Focus::Swatch("222222".into()));
    }

    #[test]
    fn test_delete_moves_focus_to_previous() {
        let mut app = app_with("111111-222222-333333");
        app.focus = Focus::Swatch("333333".into());
        key(&mut app, KeyCode::Backspace);
        assert_eq!(app.location.hash(), "111111-222222");
        assert_eq!(app.focus, Focus::Swatch("222222".into()));
    }

    #[test]
    fn test_delete_only_swatch_focuses_input() {
        let mut app = app_with("111111");
        app.focus = Focus::Swatch("#111111".into());
        key(&mut app, KeyCode::Backspace);
        assert_eq!(app.location.hash(), "");
        assert!(app.palette.is_empty());
        assert_eq!(app.focus, Focus::Input);
        assert_eq!(app.title, "Color Manager (0 colors)");
    }

    #[test]
    fn test_delete_first_of_many_focuses_input() {
        let mut app = app_with("111111-222222");
        app.focus = Focus::Swatch("#111111".into());
        key(&mut app, KeyCode::Backspace);
        assert_eq!(app.focus, Focus::Input);
        assert_eq!(colors(&app), vec!["#222222"]);
    }

    #[test]
    fn test_edit_replaces_and_copies() {
        let mut app = app_with("111111-222222");
        app.focus = Focus::Swatch("222222".into());
        key(&mut app, KeyCode::Enter);
        {
            let dialog = app.dialog.as_ref().unwrap();
            assert_eq!(dialog.dialog_type, DialogType::EditColor);
            assert_eq!(dialog.input.text, "#222222");
        }
        for _ in 0..7 {
            key(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "abc");
        key(&mut app, KeyCode::Enter);

        assert!(app.dialog.is_none());
        assert_eq!(app.clipboard.as_deref(), Some("abc"));
        assert_eq!(app.take_clipboard_request().as_deref(), Some("abc"));
        assert_eq!(app.location.hash(), "111111-aabbcc");
        assert_eq!(app.focus, Focus::Swatch("aabbcc".into()));
    }

    #[test]
    fn test_edit_unchanged_only_copies() {
        let mut app = app_with("111111-222222");
        app.focus = Focus::Swatch("#111111".into());
        key(&mut app, KeyCode::Enter);
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.clipboard.as_deref(), Some("#111111"));
        assert_eq!(app.location.hash(), "111111-222222");
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_edit_cancel_changes_nothing() {
        let mut app = app_with("111111");
        app.focus = Focus::Swatch("#111111".into());
        key(&mut app, KeyCode::Enter);
        key(&mut app, KeyCode::Esc);
        assert!(app.dialog.is_none());
        assert!(app.clipboard.is_none());
        assert_eq!(app.focus, Focus::Swatch("#111111".into()));
    }

    #[test]
    fn test_edit_to_existing_color_is_rejected() {
        let mut app = app_with("111111-222222");
        app.focus = Focus::Swatch("222222".into());
        app.finish_edit("222222", "#111111");
        assert_eq!(app.dialog.as_ref().unwrap().message, "Color already exists.");
        assert_eq!(app.location.hash(), "111111-222222");
    }

    #[test]
    fn test_escape_toggles_between_input_and_swatch() {
        let mut app = app_with("111111-222222");
        app.focus = Focus::Swatch("222222".into());
        key(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::Input);
        key(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::Swatch("222222".into()));
    }

    #[test]
    fn test_escape_from_input_without_history_blurs() {
        let mut app = app_with("111111");
        key(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::None);
        key(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn test_escape_returns_to_swatch_left_by_tab() {
        let mut app = app_with("111111-222222");
        app.focus = Focus::Swatch("222222".into());
        key(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Input);
        key(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::Swatch("222222".into()));
    }

    #[test]
    fn test_escape_returns_to_latest_swatch() {
        let mut app = app_with("111111-222222-333333");
        app.focus = Focus::Swatch("#111111".into());
        key(&mut app, KeyCode::Esc);
        for _ in 0..4 {
            key(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.focus, Focus::Input);
        key(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::Swatch("333333".into()));
    }

    #[test]
    fn test_escape_returns_to_swatch_left_by_click() {
        let mut app = app_with("111111-222222");
        app.focus = Focus::Swatch("#111111".into());
        app.input_area = Rect::new(0, 3, 40, 2);
        app.push_event(AppEvent::Click { column: 5, row: 3 });
        app.process_pending();
        assert_eq!(app.focus, Focus::Input);
        key(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::Swatch("#111111".into()));
    }

    #[test]
    fn test_link_with_repeated_colors_loads_each_once() {
        let mut app = app_with("AABBCC-aabbcc-DDEEFF-AABBCC");
        assert_eq!(colors(&app), vec!["#AABBCC", "DDEEFF"]);
        assert_eq!(app.title, "Color Manager (2 colors)");

        let mut seen = Vec::new();
        for _ in 0..3 {
            key(&mut app, KeyCode::Tab);
            seen.push((app.focus.clone(), app.focused_index()));
        }
        assert_eq!(
            seen,
            vec![
                (Focus::Swatch("#AABBCC".into()), Some(0)),
                (Focus::Swatch("DDEEFF".into()), Some(1)),
                (Focus::Input, None),
            ]
        );
    }

    #[test]
    fn test_opened_link_with_repeated_colors_loads_each_once() {
        let mut app = app_with("111111");
        app.open_link("#222222-222222");
        app.process_pending();
        assert_eq!(colors(&app), vec!["#222222"]);
    }

    #[test]
    fn test_typing_does_not_trigger_window_keys() {
        let mut app = app_with("");
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        assert_eq!(app.input.text, "q");
        press(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_persist_unchanged_queues_nothing() {
        let mut app = app_with("111111");
        let same = app.colors_from_url();
        app.persist(&same);
        assert!(!app.has_pending_events());
    }

    #[test]
    fn test_hash_change_is_ordered_after_mutation() {
        let mut app = app_with("");
        app.input.text = "abc".into();
        app.push_event(AppEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
        let next = app.events.pop_front().unwrap();
        app.handle_event(next);
        // The fragment is written but the view waits for the notification
        assert_eq!(app.location.hash(), "aabbcc");
        assert!(app.palette.is_empty());
        assert_eq!(app.events.front(), Some(&AppEvent::HashChange));
        app.process_pending();
        assert_eq!(colors(&app), vec!["#aabbcc"]);
    }

    #[test]
    fn test_external_hash_change_rerenders() {
        let mut app = app_with("111111-222222");
        app.focus = Focus::Swatch("222222".into());
        app.open_link("#222222-333333");
        app.process_pending();
        assert_eq!(colors(&app), vec!["#222222", "333333"]);
        assert_eq!(app.focus, Focus::Swatch("#222222".into()));
    }

    #[test]
    fn test_open_link_dialog() {
        let mut app = app_with("111111");
        press(&mut app, KeyCode::Char('o'), KeyModifiers::CONTROL);
        assert_eq!(app.dialog.as_ref().unwrap().dialog_type, DialogType::OpenLink);
        assert_eq!(app.dialog.as_ref().unwrap().input.text, "test://palette#111111");
        key(&mut app, KeyCode::End);
        type_text(&mut app, "-222222");
        key(&mut app, KeyCode::Enter);
        assert_eq!(colors(&app), vec!["#111111", "222222"]);
    }

    #[test]
    fn test_click_on_swatch_opens_editor() {
        let mut app = app_with("111111-222222");
        app.swatch_areas = vec![Rect::new(0, 5, 10, 4), Rect::new(10, 5, 10, 4)];
        app.push_event(AppEvent::Click { column: 12, row: 6 });
        app.process_pending();
        assert_eq!(app.focus, Focus::Swatch("222222".into()));
        assert_eq!(app.dialog.as_ref().unwrap().dialog_type, DialogType::EditColor);
    }

    #[test]
    fn test_clipboard_disabled() {
        let mut settings = Settings::default();
        settings.clipboard = false;
        let mut app = App::new(Location::parse("#111111", "test://"), &settings, Theme::dark(true));
        app.process_pending();
        app.focus = Focus::Swatch("#111111".into());
        app.finish_edit("#111111", "#111111");
        assert!(app.take_clipboard_request().is_none());
    }
}
