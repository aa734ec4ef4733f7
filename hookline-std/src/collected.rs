//! Link-time collected subscriptions.
//!
//! Host code can declare subscriptions as statics anywhere in the binary with
//! `inventory::submit!` and apply them all at once with
//! [`Registry::subscribe_collected`].
//!
//! # Example
//!
//! ```rust,ignore
//! inventory::submit! {
//!     StaticSubscription::by_index("damage", 5, "combat", "on_hit")
//! }
//!
//! let applied = registry.subscribe_collected()?;
//! ```
//!
//! The order in which submitted items are collected is unspecified, so
//! several collected callbacks on one key may run in any order relative to
//! each other.

use crate::registry::Registry;
use hookline_core::{HooklineError, WILDCARD_INDEX};

/// Which table a [`StaticSubscription`] lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticKey {
    /// The wildcard index of the tag.
    Wildcard,
    /// A specific index.
    Index(u32),
    /// A subscription name.
    Name(&'static str),
}

/// A subscription declared in a static.
///
/// This struct is submitted to `inventory` for automatic collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticSubscription {
    /// Event tag.
    pub tag: &'static str,
    /// Subscription key.
    pub key: StaticKey,
    /// Module declaring the callback. Empty means the active module.
    pub module: &'static str,
    /// Callback function name.
    pub function: &'static str,
}

inventory::collect!(StaticSubscription);

impl StaticSubscription {
    /// Subscribe to the wildcard index of `tag`.
    pub const fn wildcard(tag: &'static str, module: &'static str, function: &'static str) -> Self {
        Self {
            tag,
            key: StaticKey::Wildcard,
            module,
            function,
        }
    }

    /// Subscribe to `(tag, index)`.
    pub const fn by_index(
        tag: &'static str,
        index: u32,
        module: &'static str,
        function: &'static str,
    ) -> Self {
        Self {
            tag,
            key: StaticKey::Index(index),
            module,
            function,
        }
    }

    /// Subscribe to `(tag, name)`.
    pub const fn by_name(
        tag: &'static str,
        name: &'static str,
        module: &'static str,
        function: &'static str,
    ) -> Self {
        Self {
            tag,
            key: StaticKey::Name(name),
            module,
            function,
        }
    }

    /// Apply this subscription to `registry`.
    pub fn apply(&self, registry: &mut Registry) -> Result<(), HooklineError> {
        match self.key {
            StaticKey::Wildcard => {
                registry.subscribe_by_index(self.tag, WILDCARD_INDEX, self.module, self.function)
            }
            StaticKey::Index(index) => {
                registry.subscribe_by_index(self.tag, index, self.module, self.function)
            }
            StaticKey::Name(name) => {
                registry.subscribe_by_name(self.tag, name, self.module, self.function)
            }
        }
    }
}

impl Registry {
    /// Apply every [`StaticSubscription`] submitted in the binary.
    ///
    /// Stops at the first subscription that fails to resolve; the ones
    /// already applied stay registered. Returns how many were applied.
    pub fn subscribe_collected(&mut self) -> Result<usize, HooklineError> {
        let mut applied = 0;
        for subscription in inventory::iter::<StaticSubscription>() {
            subscription.apply(self)?;
            applied += 1;
        }
        Ok(applied)
    }
}
