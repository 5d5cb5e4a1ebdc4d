//! Adapters between the engine and the outside world: CSV in, CSV out, and
//! synthetic networks for demos and tests. The engine itself never touches
//! files.

pub mod generator;
pub mod loader;
pub mod reporting;
