//! Course catalog
//!
//! Provides the course/module/lesson model, the built-in seed catalog and a
//! client for the catalog HTTP API.

pub mod client;
pub mod error;
pub mod model;

pub use client::{CatalogClient, fetch_or_builtin};
pub use error::CatalogError;
pub use model::{Catalog, Course, Lesson, Module};
