pub mod client;

pub use client::{CatalogConfig, OmdbClient, DEFAULT_API_KEY};
