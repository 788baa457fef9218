use tracing::{debug, warn};

use super::error::PaletteError;
use super::{fragment, hex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Every mutation the palette accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteAction {
    /// Raw input text; validated and normalised by the reducer.
    Add(String),
    Remove(usize),
    Move { index: usize, direction: Direction },
    /// Raw prompt text for the entry at `index`.
    Replace { index: usize, value: String },
    /// Replace the whole list, e.g. after the fragment changed. Repeated
    /// colours are dropped, keeping the first occurrence.
    Load(Vec<String>),
}

/// The ordered colour list. Entries are kept exactly as they came from the
/// fragment or the input, so the first entry usually carries a `#` and the
/// rest usually do not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteState {
    colors: Vec<String>,
}

impl PaletteState {
    pub fn new(colors: Vec<String>) -> Self {
        Self { colors }
    }

    /// Decode a fragment, dropping repeated colours.
    pub fn from_fragment(fragment: &str) -> Self {
        Self::new(unique(fragment::decode(fragment)))
    }

    pub fn to_fragment(&self) -> String {
        fragment::encode(&self.colors)
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.colors.get(index).map(|s| s.as_str())
    }

    /// Case- and `#`-insensitive membership test.
    pub fn contains(&self, color: &str) -> bool {
        self.colors.iter().any(|c| hex::same_color(c, color))
    }

    /// Index of the swatch showing `color`, tolerating a leading `#` mismatch.
    pub fn position(&self, color: &str) -> Option<usize> {
        self.colors.iter().position(|c| hex::same_swatch(c, color))
    }
}

/// Apply `action` to `state` without touching it. Errors leave the caller's
/// state as it was; out-of-range indices and boundary moves are no-ops.
pub fn reduce(state: &PaletteState, action: PaletteAction) -> Result<PaletteState, PaletteError> {
    debug!(?action, len = state.len(), "reduce");
    let mut colors = state.colors.clone();
    match action {
        PaletteAction::Add(text) => {
            let color = hex::normalize(&text)?;
            if state.contains(&color) {
                return Err(PaletteError::DuplicateColor(text));
            }
            colors.insert(0, color);
        }
        PaletteAction::Remove(index) => {
            if index < colors.len() {
                colors.remove(index);
            }
        }
        PaletteAction::Move { index, direction } => {
            let target = match direction {
                Direction::Left => index.checked_sub(1),
                Direction::Right => Some(index + 1),
            };
            if let Some(target) = target {
                if index < colors.len() && target < colors.len() {
                    colors.swap(index, target);
                }
            }
        }
        PaletteAction::Replace { index, value } => {
            let Some(current) = state.get(index) else {
                return Ok(state.clone());
            };
            if value.replace('#', "") == current.replace('#', "") {
                return Ok(state.clone());
            }
            let color = hex::normalize(&value)?;
            let taken = state
                .colors
                .iter()
                .enumerate()
                .any(|(i, c)| i != index && hex::same_color(c, &color));
            if taken {
                return Err(PaletteError::DuplicateColor(value));
            }
            colors[index] = color;
        }
        PaletteAction::Load(loaded) => colors = unique(loaded),
    }
    Ok(PaletteState::new(colors))
}

fn unique(colors: Vec<String>) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(colors.len());
    for color in colors {
        if kept.iter().any(|c| hex::same_color(c, &color)) {
            warn!(color = %color, "dropping repeated color");
            continue;
        }
        kept.push(color);
    }
    kept
}
