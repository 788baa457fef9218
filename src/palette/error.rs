use thiserror::Error;

/// User-facing failures of a palette mutation. Both leave the palette untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("Received invalid hex code.")]
    InvalidHexCode(String),

    #[error("Color already exists.")]
    DuplicateColor(String),
}

impl PaletteError {
    /// The rejected input, kept for the log line.
    pub fn input(&self) -> &str {
        match self {
            PaletteError::InvalidHexCode(s) | PaletteError::DuplicateColor(s) => s,
        }
    }
}
