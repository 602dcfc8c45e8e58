pub mod cache;
pub mod client;

pub use cache::TagCache;
pub use client::ProfileApiClient;
