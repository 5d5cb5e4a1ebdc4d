pub mod entity;
pub mod geo;
pub mod network;

pub use entity::{Entity, EntityKind, ProductId};
pub use geo::{distance_km, Coordinates, EARTH_RADIUS_KM};
pub use network::NetworkModel;
