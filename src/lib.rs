//! Shortage resolution for a network of hospitals and suppliers.
//!
//! Given every entity's stock and required minimum (floor) per product, the
//! engine finds the deficits, lists which other entities have surplus to
//! spare, decides who ships how much (greedy by km per unit, or an exhaustive
//! search for small donor sets), and moves the stock.
//!
//! ```no_run
//! use supply_relief::model::{Coordinates, Entity, NetworkModel};
//! use supply_relief::resolution::{ResolutionEngine, ResolverConfig};
//!
//! # fn main() -> Result<(), supply_relief::ResolveError> {
//! let mut network = NetworkModel::new(vec![
//!     Entity::hospital("H", Coordinates::new(52.37, 4.90)?).with_stock_and_floor("A", 50, 100),
//!     Entity::supplier("S", Coordinates::new(52.39, 4.92)?).with_stock("A", 200),
//! ])?;
//! let report = ResolutionEngine::new(&ResolverConfig::default()).run(&mut network)?;
//! assert!(report.is_fully_resolved());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod io;
pub mod model;
pub mod resolution;
pub mod strategy;

pub use error::{ResolveError, Result};
