pub mod de;
pub mod enums;
pub mod error;
pub mod land;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{OutlierSelection, PropertyType};
pub use error::CoreError;
pub use land::LandSize;
pub use structs::{parse_payload, Attributes, Coordinates, PropertyRecord, UpstreamPayload};
