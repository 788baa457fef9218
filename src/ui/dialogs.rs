use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::keybindings::{Command, DialogAction, KeySource, Keybindings};

use super::{
    app::{App, Dialog, DialogType},
    input::InputField,
    theme::Theme,
};

/// Centered dialog rectangle, clamped to the screen.
pub fn dialog_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn draw_dialog(frame: &mut Frame, dialog: &Dialog, area: Rect, theme: &Theme, keybindings: &Keybindings) {
    let rect = match dialog.dialog_type {
        DialogType::Alert => dialog_area(area, 44, 7),
        DialogType::EditColor => dialog_area(area, 44, 8),
        DialogType::OpenLink => dialog_area(area, area.width.saturating_sub(8).max(44), 8),
    };
    frame.render_widget(Clear, rect);

    match dialog.dialog_type {
        DialogType::Alert => draw_alert_dialog(frame, dialog, rect, theme),
        DialogType::EditColor => draw_prompt_dialog(frame, dialog, rect, theme, keybindings, " Edit Color "),
        DialogType::OpenLink => draw_prompt_dialog(frame, dialog, rect, theme, keybindings, " Open Link "),
    }
}

/// Input line with a block cursor, scrolled so the cursor stays visible.
pub fn input_line<'a>(field: &InputField, max_width: usize, theme: &Theme, prompt: Style) -> Line<'a> {
    let chars: Vec<char> = field.text.chars().collect();
    let cursor = field.cursor.min(chars.len());

    // Drop characters from the left until the cursor fits
    let mut start = 0;
    let width_to_cursor = |from: usize| -> usize {
        chars[from..cursor].iter().map(|c| c.width().unwrap_or(1)).sum()
    };
    while start < cursor && width_to_cursor(start) + 1 > max_width {
        start += 1;
    }

    let before: String = chars[start..cursor].iter().collect();
    let at: String = chars.get(cursor).map(|c| c.to_string()).unwrap_or_else(|| " ".to_string());
    let after: String = chars.get(cursor + 1..).map(|s| s.iter().collect()).unwrap_or_default();

    let cursor_style = Style::default()
        .fg(theme.dialog.input_cursor_fg)
        .bg(theme.dialog.input_cursor_bg);
    let text_style = Style::default().fg(theme.dialog.input_text);

    Line::from(vec![
        Span::styled("> ", prompt),
        Span::styled(before, text_style),
        Span::styled(at, cursor_style),
        Span::styled(after, text_style),
    ])
}

fn draw_prompt_dialog(
    frame: &mut Frame,
    dialog: &Dialog,
    area: Rect,
    theme: &Theme,
    keybindings: &Keybindings,
    title: &str,
) {
    let block = Block::default()
        .title(title.to_string())
        .title_style(Style::default().fg(theme.dialog.title).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dialog.border))
        .style(Style::default().bg(theme.dialog.bg));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 4 || inner.width < 6 {
        return;
    }

    let message_area = Rect::new(inner.x + 1, inner.y, inner.width - 2, 1);
    frame.render_widget(
        Paragraph::new(dialog.message.clone()).style(Style::default().fg(theme.dialog.text)),
        message_area,
    );

    let max_width = (inner.width as usize).saturating_sub(4);
    let line = input_line(&dialog.input, max_width, theme, Style::default().fg(theme.dialog.input_prompt));
    let input_area = Rect::new(inner.x + 1, inner.y + 2, inner.width - 2, 1);
    frame.render_widget(Paragraph::new(line), input_area);

    let help = format!(
        "[{}] Confirm  [{}] Cancel",
        keybindings.dialog_first_key(DialogAction::Confirm),
        keybindings.dialog_first_key(DialogAction::Cancel),
    );
    let help_area = Rect::new(inner.x + 1, inner.y + inner.height - 1, inner.width - 2, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(help, Style::default().fg(theme.dialog.help_text))),
        help_area,
    );
}

/// Error dialog with OK button only
fn draw_alert_dialog(frame: &mut Frame, dialog: &Dialog, area: Rect, theme: &Theme) {
    let block = Block::default()
        .title(" Error ")
        .title_style(Style::default().fg(theme.dialog.alert_title).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dialog.alert_title))
        .style(Style::default().bg(theme.dialog.bg));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 3 || inner.width < 4 {
        return;
    }

    let message_area = Rect::new(inner.x + 1, inner.y + 1, inner.width - 2, inner.height - 3);
    frame.render_widget(
        Paragraph::new(dialog.message.clone())
            .style(Style::default().fg(theme.dialog.text))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        message_area,
    );

    let selected_style = Style::default()
        .fg(theme.dialog.button_selected_text)
        .bg(theme.dialog.button_selected_bg);
    let button_area = Rect::new(inner.x + 1, inner.y + inner.height - 1, inner.width - 2, 1);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(" OK ", selected_style))).alignment(Alignment::Center),
        button_area,
    );
}

/// Keys while a dialog is open. Dialogs are modal: nothing reaches the
/// swatches, the input or the window handlers.
pub fn handle_dialog_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let command = app.keybindings.dispatch(KeySource::Dialog, code, modifiers);
    match command {
        Some(Command::Dialog(DialogAction::Confirm)) => {
            let Some(dialog) = app.dialog.take() else { return };
            let value = dialog.input.text.trim().to_string();
            match dialog.dialog_type {
                DialogType::EditColor => {
                    if let Some(target) = dialog.target {
                        app.finish_edit(&target, &value);
                    }
                }
                DialogType::OpenLink => app.open_link(&value),
                DialogType::Alert => {}
            }
        }
        Some(Command::Dialog(DialogAction::Cancel)) => {
            app.dialog = None;
        }
        _ => {
            if let Some(dialog) = app.dialog.as_mut() {
                if dialog.dialog_type != DialogType::Alert {
                    dialog.input.handle_edit_key(code, modifiers);
                }
            }
        }
    }
}
