//! blurmill core - bounded-buffer blur pipeline library.
//!
//! One producer enumerates a directory of images and hands paths to a fixed
//! pool of workers through a capacity-limited circular queue. Each worker
//! decodes its item, box-blurs every color channel, and writes the result to
//! the mirrored output location.
//!
//! # Architecture
//!
//! ```text
//! Discover → BoundedQueue (blocking put/get) → decode → blur ×3 → encode
//! ```
//!
//! The queue is the only synchronized resource; its small fixed capacity
//! gives the producer real backpressure when workers fall behind.
//!
//! # Usage
//!
//! ```rust,ignore
//! use blurmill_core::{Config, Pipeline};
//!
//! fn main() -> blurmill_core::Result<()> {
//!     let config = Config::default();
//!     let stats = Pipeline::new(config).run("./input".as_ref(), "./output".as_ref())?;
//!     println!("processed {} images", stats.processed);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod codec;
pub mod config;
pub mod error;
pub mod filter;
pub mod image;
pub mod pipeline;
pub mod queue;

// Re-exports for convenient access
pub use codec::{FileCodec, ImageCodec};
pub use config::Config;
pub use error::{BlurmillError, ConfigError, PipelineError, PipelineResult, Result};
pub use filter::{blur_image, box_blur};
pub use image::{Channel, Image, NUM_CHANNELS};
pub use pipeline::{DiscoveredFile, FileDiscovery, Pipeline, PipelineStats};
pub use queue::{BoundedQueue, QueueClosed};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
