//! Producer/consumer pipeline: discovery, work distribution, and the
//! per-item decode → blur → encode loop.

pub mod discovery;
pub mod orchestrator;
pub mod paths;
pub mod producer;
pub mod worker;

pub use discovery::{DiscoveredFile, FileDiscovery};
pub use orchestrator::{Pipeline, PipelineStats};
pub use paths::PathMapper;
pub use producer::Producer;
pub use worker::{Worker, WorkerStats};
