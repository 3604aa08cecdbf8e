//! User entity: account, profile kind, role, and status.

pub mod model;
pub mod role;
pub mod status;

pub use model::{CreateUser, ProfileType, UpdateProfile, User, UserFilter, UserSummary};
pub use role::UserRole;
pub use status::UserStatus;
