// dexly-api: Async Rust client for the PokeAPI catalog endpoints

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::CatalogClient;
pub use error::Error;
pub use transport::TransportConfig;
