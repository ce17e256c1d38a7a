// Adapters layer: concrete implementations for external systems.

pub mod feed;

pub use feed::HttpFeed;
