//! Entity-scoped subscription and dispatch.

use crate::registry::Registry;
use hookline_core::{ArgRef, Entity, HooklineError};

impl Registry {
    /// Subscribe to `tag` for one entity.
    ///
    /// The tag is suffixed with [`Entity::SUFFIX`] and the entity's
    /// identifier becomes the index.
    pub fn entity_hook<E: Entity>(
        &mut self,
        entity: &E,
        tag: &str,
        module: &str,
        function: &str,
    ) -> Result<(), HooklineError> {
        self.subscribe_by_index(&E::scoped_tag(tag), entity.hook_index(), module, function)
    }

    /// Subscribe to `tag` for every entity of kind `E`.
    pub fn entity_hook_all<E: Entity>(
        &mut self,
        tag: &str,
        module: &str,
        function: &str,
    ) -> Result<(), HooklineError> {
        self.subscribe_wildcard(&E::scoped_tag(tag), module, function)
    }

    /// Raise `tag` for one entity.
    ///
    /// Runs the entity's own handler, then the handler shared by every
    /// entity of the same kind.
    pub fn entity_dispatch<E: Entity>(&self, entity: &E, tag: &str, args: &[ArgRef<'_>]) {
        self.dispatch_by_index(&E::scoped_tag(tag), entity.hook_index(), args);
    }
}
