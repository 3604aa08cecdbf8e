//! Connection entity: mutual-consent relationship between two users.

pub mod model;
pub mod status;

pub use model::{Connection, CreateConnection, RelationshipView, RelationshipStatus};
pub use status::ConnectionStatus;
