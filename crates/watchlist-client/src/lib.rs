pub mod api;
pub mod client;
pub mod error;
pub mod store;

pub use client::HttpWatchlistClient;
pub use error::StoreError;
pub use store::{EntryUpdate, WatchlistStore};
