use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::keybindings::{GlobalAction, InputAction, SwatchAction};
use crate::palette::hex;
use super::{
    app::{App, Focus},
    dialogs,
    theme::Theme,
};

/// Cell footprint of one swatch: colour block plus one label row.
pub const SWATCH_WIDTH: u16 = 10;
pub const SWATCH_HEIGHT: u16 = 5;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let theme = app.theme.clone();
    let area = frame.area();

    if area.width < SWATCH_WIDTH + 2 || area.height < 8 {
        let msg = Paragraph::new("Terminal too small")
            .style(Style::default().fg(theme.palette.highlight).add_modifier(Modifier::BOLD));
        frame.render_widget(msg, area);
        app.swatch_areas.clear();
        return;
    }

    frame.render_widget(Block::default().style(theme.normal_style()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(1), // link
            Constraint::Length(1),
            Constraint::Length(2), // input + underline
            Constraint::Length(1),
            Constraint::Min(SWATCH_HEIGHT), // swatches
            Constraint::Length(1), // function bar
        ])
        .split(area);

    draw_header(frame, app, chunks[0], chunks[1], &theme);
    draw_input(frame, app, chunks[3], &theme);
    draw_swatches(frame, app, chunks[5], &theme);
    draw_function_bar(frame, app, chunks[6], &theme);

    if let Some(ref dialog) = app.dialog {
        dialogs::draw_dialog(frame, dialog, area, &theme, &app.keybindings);
    }
}

fn draw_header(frame: &mut Frame, app: &App, title_area: Rect, link_area: Rect, theme: &Theme) {
    let title = Paragraph::new(Line::from(Span::styled(format!(" {}", app.title), theme.title_style())))
        .style(Style::default().bg(theme.palette.bg_alt));
    frame.render_widget(title, title_area);

    if let Some(ref copied) = app.clipboard {
        let copied = Paragraph::new(Line::from(vec![
            Span::styled("copied ", theme.dim_style()),
            Span::styled(format!("{} ", copied), Style::default().fg(theme.palette.accent)),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(copied, title_area);
    }

    let href = app.location.href();
    let max = link_area.width.saturating_sub(2) as usize;
    let shown = if href.width() > max {
        let tail: String = href.chars().rev().take(max.saturating_sub(3)).collect::<Vec<_>>().into_iter().rev().collect();
        format!("...{}", tail)
    } else {
        href
    };
    frame.render_widget(Paragraph::new(format!(" {}", shown)).style(theme.dim_style()), link_area);
}

fn draw_input(frame: &mut Frame, app: &mut App, area: Rect, theme: &Theme) {
    let focused = app.focus == Focus::Input;
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.input_area = area;

    let prompt = Span::styled("> ", Style::default().fg(theme.input.prompt));
    let field = &app.input;
    let line = if field.text.is_empty() && !focused {
        Line::from(vec![
            prompt,
            Span::styled(field.placeholder.clone(), Style::default().fg(theme.input.placeholder)),
        ])
    } else if focused {
        let chars: Vec<char> = field.text.chars().collect();
        let cursor = field.cursor.min(chars.len());
        let before: String = chars[..cursor].iter().collect();
        let at = chars.get(cursor).map(|c| c.to_string()).unwrap_or_else(|| " ".to_string());
        let after: String = chars.get(cursor + 1..).map(|s| s.iter().collect()).unwrap_or_default();
        let text_style = Style::default().fg(theme.input.text).add_modifier(Modifier::BOLD);
        let mut spans = vec![
            prompt,
            Span::styled(before, text_style),
            Span::styled(at, Style::default().fg(theme.input.cursor_fg).bg(theme.input.cursor_bg)),
            Span::styled(after, text_style),
        ];
        if field.text.is_empty() {
            spans.push(Span::styled(format!(" {}", field.placeholder), Style::default().fg(theme.input.placeholder)));
        }
        Line::from(spans)
    } else {
        Line::from(vec![
            prompt,
            Span::styled(field.text.clone(), Style::default().fg(theme.input.text)),
        ])
    };
    frame.render_widget(Paragraph::new(line), inner);
}

/// Lay out `count` swatches row by row inside `area`, scrolled so that row
/// `keep_visible` is on screen. Hidden swatches get an empty rect.
pub fn swatch_layout(area: Rect, count: usize, keep_visible: Option<usize>) -> Vec<Rect> {
    let cols = (area.width / SWATCH_WIDTH).max(1) as usize;
    let visible_rows = (area.height / SWATCH_HEIGHT).max(1) as usize;
    let first_row = match keep_visible {
        Some(i) if i / cols >= visible_rows => i / cols + 1 - visible_rows,
        _ => 0,
    };

    (0..count)
        .map(|i| {
            let row = i / cols;
            if row < first_row || row >= first_row + visible_rows {
                return Rect::default();
            }
            let x = area.x + (i % cols) as u16 * SWATCH_WIDTH;
            let y = area.y + (row - first_row) as u16 * SWATCH_HEIGHT;
            Rect::new(x, y, SWATCH_WIDTH.min(area.right() - x), SWATCH_HEIGHT.min(area.bottom() - y))
        })
        .collect()
}

fn draw_swatches(frame: &mut Frame, app: &mut App, area: Rect, theme: &Theme) {
    let inner = Rect::new(area.x + 1, area.y, area.width.saturating_sub(2), area.height);
    if app.palette.is_empty() {
        let hint = Paragraph::new("No colors yet. Type a hex code and press Enter.").style(theme.dim_style());
        frame.render_widget(hint, Rect::new(inner.x, inner.y, inner.width, 1));
        app.swatch_areas.clear();
        return;
    }

    let focused = app.focused_index();
    let rects = swatch_layout(inner, app.palette.len(), focused);

    for (i, (color, rect)) in app.palette.colors().iter().zip(rects.iter()).enumerate() {
        if rect.width < 2 || rect.height < 2 {
            continue;
        }
        let is_focused = focused == Some(i);
        let block_area = Rect::new(rect.x, rect.y, rect.width - 1, rect.height - 1);
        let label_area = Rect::new(rect.x, rect.y + rect.height - 1, rect.width - 1, 1);

        match theme.swatch_color(color) {
            Some(bg) => {
                let mut block = Block::default().style(Style::default().bg(bg));
                if is_focused {
                    block = block
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme.swatch.focus_border).add_modifier(Modifier::BOLD));
                }
                frame.render_widget(block, block_area);
            }
            None => {
                let mut block = Block::default().style(Style::default().bg(theme.swatch.invalid_bg));
                if is_focused {
                    block = block.borders(Borders::ALL).border_style(Style::default().fg(theme.swatch.focus_border));
                }
                let inner = block.inner(block_area);
                frame.render_widget(block, block_area);
                frame.render_widget(
                    Paragraph::new("?").style(Style::default().fg(theme.swatch.invalid_text)),
                    inner,
                );
            }
        }

        let label_style = if is_focused {
            Style::default().fg(theme.swatch.label_focused).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.swatch.label)
        };
        let label: String = hex::display_form(color).chars().take(label_area.width as usize).collect();
        frame.render_widget(Paragraph::new(label).style(label_style), label_area);
    }

    app.swatch_areas = rects;
}

fn draw_function_bar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let kb = &app.keybindings;
    let mut items: Vec<(String, &str)> = Vec::new();
    match app.focus {
        Focus::Swatch(_) => {
            items.push((
                format!(
                    "{}/{}",
                    kb.swatch_keys_joined(SwatchAction::MoveLeft, "/"),
                    kb.swatch_keys_joined(SwatchAction::MoveRight, "/")
                ),
                "Move",
            ));
            items.push((kb.swatch_keys_joined(SwatchAction::Edit, "/"), "Edit"));
            items.push((kb.swatch_keys_joined(SwatchAction::Delete, "/"), "Delete"));
        }
        Focus::Input => {
            items.push((kb.input_first_key(InputAction::Submit).to_string(), "Add"));
        }
        Focus::None => {}
    }
    items.push((kb.global_first_key(GlobalAction::ToggleFocus).to_string(), "Focus"));
    items.push((kb.global_first_key(GlobalAction::FocusNext).to_string(), "Next"));
    items.push((kb.global_first_key(GlobalAction::OpenLink).to_string(), "Open link"));
    items.push((kb.global_keys_joined(GlobalAction::Quit, "/"), "Quit"));

    let mut spans = Vec::new();
    for (key, label) in items {
        if key.is_empty() {
            continue;
        }
        spans.push(Span::styled(format!(" {}", key), Style::default().fg(theme.function_bar.key).add_modifier(Modifier::BOLD)));
        spans.push(Span::styled(format!(" {} ", label), Style::default().fg(theme.function_bar.label)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.function_bar.bg)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::location::Location;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &mut App, width: u16, height: u16) -> Vec<String> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    fn app_with(fragment: &str) -> App {
        let mut app = App::new(Location::parse(fragment, "test://p"), &Settings::default(), Theme::dark(true));
        app.process_pending();
        app
    }

    #[test]
    fn test_layout_wraps_rows() {
        let area = Rect::new(0, 0, 30, 10);
        let rects = swatch_layout(area, 4, None);
        assert_eq!(rects[0], Rect::new(0, 0, 10, 5));
        assert_eq!(rects[2], Rect::new(20, 0, 10, 5));
        assert_eq!(rects[3], Rect::new(0, 5, 10, 5));
    }

    #[test]
    fn test_layout_scrolls_to_focused() {
        let area = Rect::new(0, 0, 20, 5);
        let rects = swatch_layout(area, 6, Some(5));
        assert_eq!(rects[0], Rect::default());
        assert_eq!(rects[4], Rect::new(0, 0, 10, 5));
        assert_eq!(rects[5], Rect::new(10, 0, 10, 5));
    }

    #[test]
    fn test_render_shows_title_placeholder_and_labels() {
        let mut app = app_with("#AABBCC-DDEEFF");
        let lines = render(&mut app, 60, 20);
        assert!(lines[0].contains("Color Manager (2 colors)"));
        assert!(lines[1].contains("test://p#AABBCC-DDEEFF"));
        assert!(lines.iter().any(|l| l.contains("#AABBCC") && l.contains("#DDEEFF")));
        assert_eq!(app.swatch_areas.len(), 2);
        assert!(app.swatch_areas[0].width > 0);
    }

    #[test]
    fn test_render_empty_palette_hint() {
        let mut app = app_with("");
        let lines = render(&mut app, 60, 20);
        assert!(lines.iter().any(|l| l.contains("No colors yet")));
        assert!(app.swatch_areas.is_empty());
    }

    #[test]
    fn test_swatch_cells_use_the_color() {
        let mut app = app_with("#FF0000");
        let backend = TestBackend::new(40, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let rect = app.swatch_areas[0];
        let cell = &terminal.backend().buffer()[(rect.x, rect.y)];
        assert_eq!(cell.bg, ratatui::style::Color::Rgb(255, 0, 0));
    }

    #[test]
    fn test_alert_is_drawn_over_everything() {
        let mut app = app_with("");
        app.add_color("nope");
        let lines = render(&mut app, 60, 20);
        assert!(lines.iter().any(|l| l.contains("Received invalid hex code.")));
        assert!(lines.iter().any(|l| l.contains("OK")));
    }
}
