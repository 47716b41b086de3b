//! Client side of the discovery feed.
//!
//! [`FeedLoader`] is a pure state machine that decides which page to
//! request and how to fold responses into the accumulated list.
//! [`FeedSession`] drives it against a [`FeedApi`], enriching each page
//! with follow status before it is applied.

pub mod api;
pub mod enrich;
pub mod error;
pub mod loader;
pub mod models;
pub mod session;

pub use api::{FeedApi, HttpFeedApi, LoaderConfig};
pub use error::{LoaderError, Result};
pub use loader::{FeedLoader, LoaderState, PageRequest};
pub use models::{FeedProfile, FeedResponse, OwnProfile, Pagination};
pub use session::FeedSession;
