//! Remote configuration fetch abstraction.
//!
//! The backend never talks to the configuration service directly. It hands
//! a [`FetchRequest`] to a [`ConfigFetcher`] and caches what comes back.

mod request;
mod response;
mod traits;

pub use request::FetchRequest;
pub use response::FetchedConfig;
pub use traits::{ConfigFetcher, FetchFailure};
