use ratatui::style::{Color, Modifier, Style};
use supports_color::Stream;

use crate::palette::hex;

// ═══════════════════════════════════════════════════════════════════════════════
// Base palette
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub bg_alt: Color,
    pub fg: Color,
    pub fg_dim: Color,
    pub fg_strong: Color,
    pub accent: Color,
    pub shortcut: Color,
    pub highlight: Color,
}

#[derive(Clone, Copy)]
pub struct InputColors {
    pub text: Color,
    pub placeholder: Color,
    pub prompt: Color,
    pub border: Color,
    pub border_focused: Color,
    pub cursor_fg: Color,
    pub cursor_bg: Color,
}

#[derive(Clone, Copy)]
pub struct SwatchColors {
    pub label: Color,
    pub label_focused: Color,
    pub focus_border: Color,
    pub invalid_bg: Color,
    pub invalid_text: Color,
}

#[derive(Clone, Copy)]
pub struct DialogColors {
    pub bg: Color,
    pub border: Color,
    pub title: Color,
    pub alert_title: Color,
    pub text: Color,
    pub input_prompt: Color,
    pub input_text: Color,
    pub input_cursor_fg: Color,
    pub input_cursor_bg: Color,
    pub help_text: Color,
    pub button_selected_bg: Color,
    pub button_selected_text: Color,
}

#[derive(Clone, Copy)]
pub struct FunctionBarColors {
    pub bg: Color,
    pub key: Color,
    pub label: Color,
}

#[derive(Clone)]
pub struct Theme {
    pub palette: Palette,
    pub input: InputColors,
    pub swatch: SwatchColors,
    pub dialog: DialogColors,
    pub function_bar: FunctionBarColors,
    /// Swatches are drawn in 24-bit colour when the terminal supports it,
    /// otherwise mapped onto the 256-colour table.
    pub true_color: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark(Self::supports_true_color())
    }
}

impl Theme {
    /// Check if terminal supports true color (24-bit RGB)
    fn supports_true_color() -> bool {
        supports_color::on(Stream::Stdout)
            .map(|support| support.has_16m)
            .unwrap_or(false)
    }

    /// Dark chrome around the swatches, close to a #333 page.
    pub fn dark(true_color: bool) -> Self {
        let palette = Palette {
            bg: Color::Indexed(236),
            bg_alt: Color::Indexed(235),
            fg: Color::Indexed(252),
            fg_dim: Color::Indexed(244),
            fg_strong: Color::Indexed(231),
            accent: Color::Indexed(110),
            shortcut: Color::Indexed(146),
            highlight: Color::Indexed(203),
        };

        let input = InputColors {
            text: palette.fg_strong,
            placeholder: palette.fg_dim,
            prompt: palette.accent,
            border: Color::Indexed(238),
            border_focused: palette.accent,
            cursor_fg: palette.bg,
            cursor_bg: palette.fg_strong,
        };

        let swatch = SwatchColors {
            label: palette.fg_dim,
            label_focused: palette.fg_strong,
            focus_border: palette.fg_strong,
            invalid_bg: palette.bg_alt,
            invalid_text: palette.highlight,
        };

        let dialog = DialogColors {
            bg: palette.bg_alt,
            border: palette.accent,
            title: palette.fg_strong,
            alert_title: palette.highlight,
            text: palette.fg,
            input_prompt: palette.accent,
            input_text: palette.fg_strong,
            input_cursor_fg: palette.bg,
            input_cursor_bg: palette.fg_strong,
            help_text: palette.fg_dim,
            button_selected_bg: palette.accent,
            button_selected_text: palette.bg,
        };

        let function_bar = FunctionBarColors {
            bg: palette.bg_alt,
            key: palette.shortcut,
            label: palette.fg_dim,
        };

        Self {
            palette,
            input,
            swatch,
            dialog,
            function_bar,
            true_color,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Style helpers
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.palette.fg).bg(self.palette.bg)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.palette.fg_dim)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.palette.fg_strong)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.input.border_focused)
        } else {
            Style::default().fg(self.input.border)
        }
    }

    /// Terminal colour for a stored palette entry, `None` if the entry is not
    /// a six-digit hex colour.
    pub fn swatch_color(&self, color: &str) -> Option<Color> {
        let (r, g, b) = hex::to_rgb(color)?;
        if self.true_color {
            Some(Color::Rgb(r, g, b))
        } else {
            Some(Color::Indexed(rgb_to_ansi256(r, g, b)))
        }
    }
}

/// Nearest entry of the xterm 256-colour table (6x6x6 cube or grey ramp).
pub fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    fn cube_index(v: u8) -> usize {
        match v {
            0..=47 => 0,
            48..=114 => 1,
            _ => ((v as usize - 35) / 40).min(5),
        }
    }

    fn dist(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
        let d = |x: u8, y: u8| (x as i32 - y as i32).unsigned_abs();
        d(a.0, b.0).pow(2) + d(a.1, b.1).pow(2) + d(a.2, b.2).pow(2)
    }

    let (ri, gi, bi) = (cube_index(r), cube_index(g), cube_index(b));
    let cube = (LEVELS[ri], LEVELS[gi], LEVELS[bi]);
    let cube_code = 16 + 36 * ri + 6 * gi + bi;

    let avg = (r as u32 + g as u32 + b as u32) / 3;
    let grey_idx = if avg > 238 { 23 } else { avg.saturating_sub(3) / 10 };
    let grey_level = (8 + 10 * grey_idx) as u8;
    let grey = (grey_level, grey_level, grey_level);
    let grey_code = 232 + grey_idx as usize;

    if dist((r, g, b), grey) < dist((r, g, b), cube) {
        grey_code as u8
    } else {
        cube_code as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_corners() {
        assert_eq!(rgb_to_ansi256(0, 0, 0), 16);
        assert_eq!(rgb_to_ansi256(255, 0, 0), 196);
        assert_eq!(rgb_to_ansi256(0, 255, 0), 46);
        assert_eq!(rgb_to_ansi256(0, 0, 255), 21);
        assert_eq!(rgb_to_ansi256(255, 255, 255), 231);
    }

    #[test]
    fn test_greys_use_ramp() {
        assert_eq!(rgb_to_ansi256(0x80, 0x80, 0x80), 244);
        assert_eq!(rgb_to_ansi256(0x30, 0x30, 0x30), 236);
    }

    #[test]
    fn test_swatch_color_modes() {
        let tc = Theme::dark(true);
        assert_eq!(tc.swatch_color("#FF8000"), Some(Color::Rgb(255, 128, 0)));
        let c256 = Theme::dark(false);
        assert_eq!(c256.swatch_color("FF0000"), Some(Color::Indexed(196)));
        assert_eq!(tc.swatch_color("nothex"), None);
    }
}
