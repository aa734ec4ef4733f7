//! # hookline-std
//!
//! Standard implementation of the hookline hook registry.
//!
//! This crate provides:
//! - **Callbacks**: [`Callback`], one resolved script function plus its arity
//! - **Handlers**: [`Handler`], the ordered callbacks of one subscription key
//! - **Registry**: [`Registry`], the `(tag, name)` and `(tag, index)` tables and
//!   the wildcard-fallback dispatch rules
//! - **Entity façade**: suffix-scoped hooks for [`Entity`](hookline_core::Entity) types
//! - **Bounded arguments**: [`ArgumentList`] for fixed-arity host calls
//! - **Testing**: an in-memory script runtime in [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use hookline_core;

// Modules
pub mod args;
pub mod callback;
#[cfg(feature = "inventory")]
pub mod collected;
mod entity;
pub mod handler;
pub mod registry;
pub mod testing;

pub use args::{ArgumentList, MAX_HOST_ARGUMENTS};
pub use callback::{CallOutcome, Callback};
pub use handler::Handler;
pub use registry::{Registry, RegistryBuilder, RegistryConfig, ShutdownReport};

#[cfg(feature = "inventory")]
pub use inventory;
