// Execution service module.
// Builds run requests, talks to the remote service, and classifies replies.

pub mod client;
pub mod types;

pub use client::ExecutionClient;
pub use types::{ExecutionRequest, ExecutionResult};
