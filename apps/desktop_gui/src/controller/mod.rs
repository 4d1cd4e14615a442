//! Controller layer: backend events, view-state folding, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod view;
