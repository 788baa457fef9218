pub mod app;
pub mod dialogs;
pub mod draw;
pub mod input;
pub mod theme;
