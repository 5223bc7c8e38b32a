pub mod artifact;
pub mod features;
pub mod registry;
pub mod shipment;

pub use features::FeatureVector;
pub use shipment::{ShipmentRequest, ValidatedShipment};
