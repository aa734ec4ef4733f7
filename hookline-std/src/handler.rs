//! Ordered callback collections.

use crate::callback::Callback;
use hookline_core::ArgRef;

/// The callbacks registered under one subscription key.
///
/// A handler always holds at least one callback: it can only be created
/// around its first one, and callbacks are never removed. Registration order
/// is dispatch order.
#[derive(Debug)]
pub struct Handler {
    callbacks: Vec<Callback>,
}

impl Handler {
    /// Create a handler around its first callback.
    pub fn new(first: Callback) -> Self {
        Self {
            callbacks: vec![first],
        }
    }

    /// Add a callback after the existing ones.
    pub fn append(&mut self, callback: Callback) {
        self.callbacks.push(callback);
    }

    /// Invoke every callback in registration order.
    ///
    /// A callback that is skipped or fails does not stop the ones after it.
    pub fn invoke_all(&self, args: &[ArgRef<'_>]) {
        for callback in &self.callbacks {
            callback.invoke(args);
        }
    }

    /// Iterate over the callbacks in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &Callback> {
        self.callbacks.iter()
    }

    /// Number of callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Always `false`; see the type-level docs.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
