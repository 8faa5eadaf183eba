#[cfg(feature = "tokio-runtime")]
pub mod loader;
pub mod source;

// Re-exports for convenience
#[cfg(feature = "tokio-runtime")]
pub use loader::{TileLoader, TileLoaderConfig};
pub use source::{TemplateTileSource, TileSource};
