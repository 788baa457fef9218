//! Palette model: hex validation, the fragment codec and the reducer that
//! drives every mutation.

pub mod error;
pub mod fragment;
pub mod hex;
pub mod state;

pub use error::PaletteError;
pub use state::{reduce, Direction, PaletteAction, PaletteState};
