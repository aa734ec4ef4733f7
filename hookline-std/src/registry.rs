//! Registry module for hook subscriptions and dispatch.
//!
//! The registry owns two independent subscription tables:
//!
//! - **by name**: `(tag, name) -> Handler`
//! - **by index**: `(tag, index) -> Handler`
//!
//! Index [`WILDCARD_INDEX`] is reserved. Its handler fires on every indexed
//! dispatch of the tag, after the handler at the exact index, and also gates
//! named dispatch (see [`Registry::dispatch_by_name`]).
//!
//! Subscribing takes `&mut self` and dispatching takes `&self`, so the borrow
//! checker keeps the two phases apart. The registry does no locking of its
//! own; wrap it yourself if several threads need it.

use crate::{callback::Callback, handler::Handler};
use hookline_core::{ArgRef, FunctionResolver, HooklineError, ResolveError, WILDCARD_INDEX};
use std::collections::{BTreeSet, HashMap, hash_map::Entry};
use tracing::{debug, error, info, warn};

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Log one line per successful subscription. Default is `true`.
    pub log_subscriptions: bool,
    /// Largest argument count a dispatch accepts. Default is no limit.
    ///
    /// Dispatches over the limit are logged and ignored.
    pub argument_limit: Option<usize>,
    /// Subscriber name logged when the resolver reports no active module.
    ///
    /// Only a label; it is never resolved as a module.
    pub default_owner: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self {
            log_subscriptions: true,
            argument_limit: None,
            default_owner: "host".to_string(),
        }
    }

    /// Set whether subscriptions are logged.
    pub fn with_log_subscriptions(mut self, enabled: bool) -> Self {
        self.log_subscriptions = enabled;
        self
    }

    /// Set the argument ceiling.
    pub fn with_argument_limit(mut self, limit: Option<usize>) -> Self {
        self.argument_limit = limit;
        self
    }

    /// Set the fallback subscriber name.
    pub fn with_default_owner(mut self, owner: impl Into<String>) -> Self {
        self.default_owner = owner.into();
        self
    }
}

// ============================================================================
// RegistryBuilder - for constructing registries
// ============================================================================

/// Builder for constructing a [`Registry`].
///
/// # Example
/// ```ignore
/// let registry = RegistryBuilder::new(runtime)
///     .log_subscriptions(false)
///     .argument_limit(Some(MAX_HOST_ARGUMENTS))
///     .build();
/// ```
pub struct RegistryBuilder {
    resolver: Box<dyn FunctionResolver>,
    config: RegistryConfig,
}

impl RegistryBuilder {
    /// Create a builder resolving callbacks through `resolver`.
    pub fn new<R: FunctionResolver + 'static>(resolver: R) -> Self {
        Self {
            resolver: Box::new(resolver),
            config: RegistryConfig::new(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Set whether subscriptions are logged.
    pub fn log_subscriptions(mut self, enabled: bool) -> Self {
        self.config.log_subscriptions = enabled;
        self
    }

    /// Set the argument ceiling.
    pub fn argument_limit(mut self, limit: Option<usize>) -> Self {
        self.config.argument_limit = limit;
        self
    }

    /// Set the fallback subscriber name.
    pub fn default_owner(mut self, owner: impl Into<String>) -> Self {
        self.config.default_owner = owner.into();
        self
    }

    /// Build an empty registry.
    pub fn build(self) -> Registry {
        Registry {
            resolver: self.resolver,
            config: self.config,
            by_name: HashMap::new(),
            by_index: HashMap::new(),
        }
    }
}

/// What a registry held when it was shut down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShutdownReport {
    /// Handlers released.
    pub handlers: usize,
    /// Callbacks released.
    pub callbacks: usize,
}

// ============================================================================
// Registry - subscription tables and dispatch
// ============================================================================

/// The hook registry.
///
/// Created once, populated by `subscribe_*` calls and then dispatched into
/// for the rest of its life. Handlers are never removed; call
/// [`Registry::shutdown`] to release everything at once.
///
/// # Example
/// ```ignore
/// let mut registry = Registry::new(runtime);
/// registry.subscribe_by_index("damage", 5, "combat", "on_hit")?;
///
/// let amount = 12_i32;
/// registry.dispatch_by_index("damage", 5, &[ArgRef::from(&amount)]);
/// ```
pub struct Registry {
    resolver: Box<dyn FunctionResolver>,
    config: RegistryConfig,
    by_name: HashMap<String, HashMap<String, Handler>>,
    by_index: HashMap<String, HashMap<u32, Handler>>,
}

impl Registry {
    /// Create an empty registry with the default configuration.
    pub fn new<R: FunctionResolver + 'static>(resolver: R) -> Self {
        RegistryBuilder::new(resolver).build()
    }

    /// Create a builder.
    pub fn builder<R: FunctionResolver + 'static>(resolver: R) -> RegistryBuilder {
        RegistryBuilder::new(resolver)
    }

    /// The active configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Subscription
    // ------------------------------------------------------------------------

    /// Subscribe `module::function` to `(tag, name)`.
    ///
    /// An empty `module` resolves against the resolver's active module and
    /// fails with [`ResolveError::NoActiveModule`] when no script is running.
    pub fn subscribe_by_name(
        &mut self,
        tag: &str,
        name: &str,
        module: &str,
        function: &str,
    ) -> Result<(), HooklineError> {
        let callback = self.make_callback(tag, module, function)?;
        let table = self.by_name.entry(tag.to_owned()).or_default();
        push(table.entry(name.to_owned()), callback);
        Ok(())
    }

    /// Subscribe `module::function` to `(tag, index)`.
    ///
    /// An empty `module` resolves against the resolver's active module and
    /// fails with [`ResolveError::NoActiveModule`] when no script is running.
    pub fn subscribe_by_index(
        &mut self,
        tag: &str,
        index: u32,
        module: &str,
        function: &str,
    ) -> Result<(), HooklineError> {
        let callback = self.make_callback(tag, module, function)?;
        let table = self.by_index.entry(tag.to_owned()).or_default();
        push(table.entry(index), callback);
        Ok(())
    }

    /// Subscribe `module::function` to the wildcard index of `tag`.
    pub fn subscribe_wildcard(
        &mut self,
        tag: &str,
        module: &str,
        function: &str,
    ) -> Result<(), HooklineError> {
        self.subscribe_by_index(tag, WILDCARD_INDEX, module, function)
    }

    fn make_callback(
        &self,
        tag: &str,
        module: &str,
        function: &str,
    ) -> Result<Callback, HooklineError> {
        let active = self.resolver.active_module();
        let owner = active
            .clone()
            .unwrap_or_else(|| self.config.default_owner.clone());
        let resolved = match (module.is_empty(), active.as_deref()) {
            (false, _) => Ok(module),
            (true, Some(active)) => Ok(active),
            (true, None) => Err(ResolveError::NoActiveModule),
        };

        match resolved.and_then(|module| Callback::resolve(&self.resolver, module, function)) {
            Ok(callback) => {
                if self.config.log_subscriptions {
                    let module = callback.module();
                    info!(tag, "subscribed <{function}@{module}> at <{owner}>");
                }
                Ok(callback)
            }
            Err(err) => {
                error!(
                    tag,
                    module,
                    function,
                    owner = %owner,
                    error = %err,
                    "failed to subscribe hook callback"
                );
                Err(err.into())
            }
        }
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    /// Dispatch to `(tag, index)` and to the wildcard handler of `tag`.
    ///
    /// Both handlers receive the same arguments, exact index first. With
    /// `index == 0` the wildcard handler runs once.
    pub fn dispatch_by_index(&self, tag: &str, index: u32, args: &[ArgRef<'_>]) {
        if !self.within_limit(tag, args) {
            return;
        }
        if let Some(handler) = self.index_handler(tag, index) {
            handler.invoke_all(args);
        }
        if index != WILDCARD_INDEX {
            if let Some(wildcard) = self.index_handler(tag, WILDCARD_INDEX) {
                wildcard.invoke_all(args);
            }
        }
    }

    /// Dispatch to `(tag, name)` and to the wildcard handler of `tag`.
    ///
    /// Nothing runs unless `tag` has a wildcard handler, even when a handler
    /// for `(tag, name)` exists. Named handlers run before the wildcard.
    pub fn dispatch_by_name(&self, tag: &str, name: &str, args: &[ArgRef<'_>]) {
        if !self.within_limit(tag, args) {
            return;
        }
        // TODO: drop this gate once no script relies on named hooks staying
        // silent until a wildcard subscriber exists.
        let Some(wildcard) = self.index_handler(tag, WILDCARD_INDEX) else {
            debug!(tag, name, "named dispatch skipped, tag has no wildcard handler");
            return;
        };
        if let Some(handler) = self.name_handler(tag, name) {
            handler.invoke_all(args);
        }
        wildcard.invoke_all(args);
    }

    /// Dispatch to the wildcard handler of `tag` only.
    pub fn dispatch_wildcard_only(&self, tag: &str, args: &[ArgRef<'_>]) {
        self.dispatch_by_index(tag, WILDCARD_INDEX, args);
    }

    fn within_limit(&self, tag: &str, args: &[ArgRef<'_>]) -> bool {
        match self.config.argument_limit {
            Some(limit) if args.len() > limit => {
                warn!(
                    tag,
                    limit,
                    given = args.len(),
                    "hook dispatch ignored, too many arguments"
                );
                false
            }
            _ => true,
        }
    }

    // ------------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------------

    /// The handler at `(tag, index)`, if any.
    pub fn index_handler(&self, tag: &str, index: u32) -> Option<&Handler> {
        self.by_index.get(tag).and_then(|table| table.get(&index))
    }

    /// The handler at `(tag, name)`, if any.
    pub fn name_handler(&self, tag: &str, name: &str) -> Option<&Handler> {
        self.by_name.get(tag).and_then(|table| table.get(name))
    }

    /// Every tag with at least one handler, sorted.
    pub fn tags(&self) -> BTreeSet<&str> {
        self.by_name
            .keys()
            .chain(self.by_index.keys())
            .map(String::as_str)
            .collect()
    }

    /// Number of handlers across both tables.
    pub fn handler_count(&self) -> usize {
        self.by_name.values().map(HashMap::len).sum::<usize>()
            + self.by_index.values().map(HashMap::len).sum::<usize>()
    }

    /// Number of callbacks across both tables.
    pub fn callback_count(&self) -> usize {
        self.handlers().map(Handler::len).sum()
    }

    /// Returns `true` if nothing has been subscribed.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty() && self.by_index.is_empty()
    }

    fn handlers(&self) -> impl Iterator<Item = &Handler> {
        self.by_name
            .values()
            .flat_map(HashMap::values)
            .chain(self.by_index.values().flat_map(HashMap::values))
    }

    /// Release every handler and callback.
    pub fn shutdown(self) -> ShutdownReport {
        let report = ShutdownReport {
            handlers: self.handler_count(),
            callbacks: self.callback_count(),
        };
        info!(
            handlers = report.handlers,
            callbacks = report.callbacks,
            "hook registry shut down"
        );
        report
    }
}

fn push<K>(entry: Entry<'_, K, Handler>, callback: Callback) {
    match entry {
        Entry::Occupied(mut occupied) => occupied.get_mut().append(callback),
        Entry::Vacant(vacant) => {
            vacant.insert(Handler::new(callback));
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("by_name", &self.by_name)
            .field("by_index", &self.by_index)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{Registry, RegistryConfig, ShutdownReport};
    use crate::testing::{MockFunction, MockRuntime};
    use hookline_core::{ArgRef, HooklineError, ResolveError};

    fn runtime_with(functions: &[(&str, usize)]) -> MockRuntime {
        let runtime = MockRuntime::new();
        for (name, params) in functions {
            runtime.define(MockFunction::new("events", *name).params(*params));
        }
        runtime
    }

    #[test]
    fn test_resubscribing_appends() {
        let runtime = runtime_with(&[("a", 0), ("b", 0)]);
        let mut registry = Registry::new(runtime.clone());

        registry.subscribe_by_index("tick", 3, "events", "a").unwrap();
        registry.subscribe_by_index("tick", 3, "events", "b").unwrap();
        registry.subscribe_by_index("tick", 3, "events", "a").unwrap();

        assert_eq!(registry.handler_count(), 1);
        assert_eq!(registry.callback_count(), 3);
        assert_eq!(registry.index_handler("tick", 3).unwrap().len(), 3);
    }

    #[test]
    fn test_name_and_index_tables_are_independent() {
        let runtime = runtime_with(&[("a", 0)]);
        let mut registry = Registry::new(runtime.clone());

        registry.subscribe_by_name("tick", "0", "events", "a").unwrap();

        assert!(registry.name_handler("tick", "0").is_some());
        assert!(registry.index_handler("tick", 0).is_none());

        registry.dispatch_wildcard_only("tick", &[]);
        assert!(runtime.journal().is_empty());
    }

    #[test]
    fn test_failed_resolution_registers_nothing() {
        let runtime = runtime_with(&[("a", 0)]);
        let mut registry = Registry::new(runtime);

        let err = registry
            .subscribe_wildcard("tick", "events", "missing")
            .unwrap_err();
        assert!(matches!(
            err,
            HooklineError::Resolve(ResolveError::FunctionNotFound { .. })
        ));
        assert!(registry.is_empty());
        assert!(registry.index_handler("tick", 0).is_none());
    }

    #[test]
    fn test_empty_module_uses_active_module() {
        let runtime = MockRuntime::new();
        runtime.define(MockFunction::new("quests", "on_login").params(0));
        runtime.set_active_module(Some("quests"));
        let mut registry = Registry::new(runtime.clone());

        registry.subscribe_wildcard("login", "", "on_login").unwrap();
        registry.dispatch_wildcard_only("login", &[]);

        assert_eq!(runtime.journal(), vec!["on_login@quests"]);
    }

    #[test]
    fn test_empty_module_without_active_module_fails() {
        let runtime = MockRuntime::new();
        runtime.define(MockFunction::new("host", "on_tick").params(0));
        let mut registry = Registry::new(runtime.clone());

        let err = registry.subscribe_wildcard("tick", "", "on_tick").unwrap_err();
        assert!(matches!(
            err,
            HooklineError::Resolve(ResolveError::NoActiveModule)
        ));
        assert!(registry.is_empty());

        registry.dispatch_wildcard_only("tick", &[]);
        assert!(runtime.journal().is_empty());
    }

    #[test]
    fn test_argument_limit_ignores_oversized_dispatch() {
        let runtime = runtime_with(&[("two", 2)]);
        let mut registry = Registry::builder(runtime.clone())
            .argument_limit(Some(1))
            .build();
        registry.subscribe_wildcard("tick", "events", "two").unwrap();

        let (a, b) = (1_i32, 2_i32);
        registry.dispatch_wildcard_only("tick", &[ArgRef::from(&a), ArgRef::from(&b)]);

        assert!(runtime.journal().is_empty());
    }

    #[test]
    fn test_tags_and_shutdown_report() {
        let runtime = runtime_with(&[("a", 0)]);
        let mut registry = Registry::builder(runtime)
            .config(RegistryConfig::new().with_log_subscriptions(false))
            .build();
        registry.subscribe_by_name("chat", "vip", "events", "a").unwrap();
        registry.subscribe_wildcard("chat", "events", "a").unwrap();
        registry.subscribe_by_index("damage", 7, "events", "a").unwrap();

        assert_eq!(
            registry.tags().into_iter().collect::<Vec<_>>(),
            vec!["chat", "damage"]
        );
        assert_eq!(
            registry.shutdown(),
            ShutdownReport {
                handlers: 3,
                callbacks: 3
            }
        );
    }
}
