//! Edvancea - course progress and practice scoring
//!
//! Tracks which lessons a learner has completed and how they are doing in
//! quiz practice, and serves the course catalog those numbers are measured
//! against.

pub mod catalog;
pub mod config;
pub mod identity;
pub mod learner;
pub mod practice;
pub mod progress;
pub mod server;
pub mod storage;

pub use catalog::Catalog;
pub use config::Config;
pub use identity::Identity;
pub use learner::Learner;
