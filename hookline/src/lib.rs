//! # hookline - Script Hooks for Engine Events
//!
//! `hookline` lets engine code raise named events that any number of script
//! callbacks have subscribed to. Subscriptions are keyed by an event tag plus
//! either a string name or a numeric index, and index 0 is a wildcard that
//! fires alongside every more specific subscription of the same tag.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hookline::prelude::*;
//!
//! let mut registry = Registry::new(runtime);
//! registry.subscribe_by_index("damage", 5, "combat", "on_hit")?;
//! registry.subscribe_wildcard("damage", "combat", "on_any_hit")?;
//!
//! // Runs on_hit, then on_any_hit.
//! let amount = 12_i32;
//! registry.dispatch_by_index("damage", 5, hookline::args![&amount]);
//! ```
//!
//! ## Entities
//!
//! Types implementing [`Entity`] get their own tag namespace, with the
//! entity's identifier as the index:
//!
//! ```rust,ignore
//! #[derive(Entity)]
//! #[entity(suffix = "@Item")]
//! struct Item {
//!     id: u32,
//! }
//!
//! registry.entity_hook(&sword, "use", "items", "on_sword_used")?;
//! registry.entity_dispatch(&sword, "use", &[]);
//! ```
//!
//! ## Script runtimes
//!
//! The registry reaches scripts only through [`FunctionResolver`],
//! [`ScriptFunction`] and [`CallFrame`]. Runtime bindings implement those
//! traits and depend on `hookline-core` alone.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use hookline_core::{
    // Arguments
    ArgRef,
    ArgumentsError,
    // Errors
    BindError,
    BoxError,
    // Call protocol
    CallFrame,
    // Entities
    Entity,
    ExecuteError,
    FunctionResolver,
    HooklineError,
    HostTypeId,
    IntWidth,
    ObjectRef,
    ParamFlags,
    ResolveError,
    ReturnValue,
    ScriptFunction,
    Slot,
    TypeClass,
    WILDCARD_INDEX,
};

pub use hookline_std::{
    ArgumentList, CallOutcome, Callback, Handler, MAX_HOST_ARGUMENTS, Registry, RegistryBuilder,
    RegistryConfig, ShutdownReport,
};

/// Link-time collected subscriptions.
#[cfg(feature = "inventory")]
pub mod collected {
    pub use hookline_std::collected::{StaticKey, StaticSubscription};
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use hookline_std::testing::*;
}

/// Build an argument slice from references.
///
/// ```rust
/// let (hp, alive) = (40_i32, true);
/// let args = hookline::args![&hp, &alive];
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        &[$($crate::ArgRef::from($arg)),*]
    };
}

/// Prelude module - common imports for hookline.
///
/// # Usage
///
/// ```rust,ignore
/// use hookline::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ArgRef, ArgumentList, Entity, FunctionResolver, HooklineError, ParamFlags, Registry,
        RegistryBuilder, RegistryConfig, ScriptFunction, WILDCARD_INDEX,
    };
}

#[cfg(feature = "macros")]
pub use hookline_macros::Entity;

#[cfg(feature = "inventory")]
pub use inventory;
