//! Text generation seam and shared provider plumbing.

pub mod generator;
pub mod retry;

pub use generator::MessageGenerator;
pub use retry::{RetryPolicy, retry_with_backoff};

#[cfg(test)]
pub use generator::MockMessageGenerator;
