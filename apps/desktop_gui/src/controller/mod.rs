//! Controller layer: UI events, input port, and command orchestration.

pub mod events;
pub mod input;
pub mod orchestration;
