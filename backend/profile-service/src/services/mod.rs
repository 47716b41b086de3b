pub mod auth;
pub mod feed;
pub mod profile;
pub mod relationships;

pub use auth::AuthService;
pub use feed::{FeedQuery, FeedService};
pub use profile::ProfileService;
pub use relationships::RelationshipService;
