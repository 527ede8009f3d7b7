//! UI layer: app shell, grid view state, cell presentation, and palette.

pub mod app;
pub mod cell;
pub mod theme;
pub mod view;

pub use app::ProductGridApp;
