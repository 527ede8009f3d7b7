//! Client-side core of the product grid: catalog access, load lifecycle, and
//! the grid interaction controller.

pub mod catalog;
pub mod grid;
pub mod loader;
pub mod reorder;

pub use catalog::{CatalogSource, HttpCatalog, DEFAULT_CATALOG_URL, DEFAULT_REQUEST_TIMEOUT};
pub use grid::{CellPhase, CellView, GridState, Slot};
pub use loader::{CatalogLoader, LoadOutcome, LoadTicket, MountState};
pub use reorder::{DragPayload, ReorderRequest};

#[cfg(test)]
#[path = "tests/grid_tests.rs"]
mod grid_tests;

#[cfg(test)]
#[path = "tests/loader_tests.rs"]
mod loader_tests;

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod catalog_tests;
