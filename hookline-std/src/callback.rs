//! Resolved hook callbacks.
//!
//! A [`Callback`] is created once per subscription. Its target function and
//! per-parameter flags are resolved at that point; every later dispatch only
//! checks arity, binds and executes.

use hookline_core::{
    ArgRef, CallFrame, FunctionResolver, ParamFlags, ResolveError, ScriptFunction, Slot,
};
use tracing::{debug, trace, warn};

/// What happened to one callback during a dispatch.
///
/// Purely informational: a dispatch never turns any of these into an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// The callback ran to completion.
    Completed,
    /// The number of arguments did not match; the callback was skipped.
    ArityMismatch {
        /// Declared parameter count.
        expected: usize,
        /// Number of arguments supplied.
        given: usize,
    },
    /// An argument could not be bound; the callback was not executed.
    BindAborted {
        /// Zero-based position of the offending argument.
        slot: usize,
    },
    /// The runtime could not start the call, or the script failed while running.
    Failed,
}

/// One registered script function.
pub struct Callback {
    module: String,
    function: String,
    flags: Vec<ParamFlags>,
    target: Box<dyn ScriptFunction>,
}

impl Callback {
    /// Resolve `function` in `module` through `resolver`.
    pub fn resolve<R>(resolver: &R, module: &str, function: &str) -> Result<Self, ResolveError>
    where
        R: FunctionResolver + ?Sized,
    {
        if function.is_empty() {
            return Err(ResolveError::EmptyFunctionName);
        }
        let target = resolver.resolve(module, function)?;
        Ok(Self::from_function(target))
    }

    /// Wrap an already resolved function.
    pub fn from_function(target: Box<dyn ScriptFunction>) -> Self {
        Self {
            module: target.module().to_owned(),
            function: target.name().to_owned(),
            flags: target.param_flags().to_vec(),
            target,
        }
    }

    /// Module declaring the function.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Function name.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Number of declared parameters.
    pub fn parameter_count(&self) -> usize {
        self.flags.len()
    }

    /// Calling-convention flags, one per parameter.
    pub fn parameter_flags(&self) -> &[ParamFlags] {
        &self.flags
    }

    /// Call the function with `args`.
    ///
    /// Every failure is logged and reported in the returned outcome; nothing
    /// is propagated. If any argument fails to bind, the call is abandoned
    /// before the function runs.
    pub fn invoke(&self, args: &[ArgRef<'_>]) -> CallOutcome {
        let expected = self.parameter_count();
        if args.len() != expected {
            warn!(
                module = %self.module,
                function = %self.function,
                "hook callback {}@{} requires {} arguments, but {} given",
                self.function,
                self.module,
                expected,
                args.len()
            );
            return CallOutcome::ArityMismatch {
                expected,
                given: args.len(),
            };
        }

        let mut frame = match self.target.prepare() {
            Ok(frame) => frame,
            Err(err) => {
                warn!(
                    module = %self.module,
                    function = %self.function,
                    error = %err,
                    "could not prepare hook callback"
                );
                return CallOutcome::Failed;
            }
        };

        for (index, (arg, flags)) in args.iter().zip(&self.flags).enumerate() {
            if let Err(err) = bind(frame.as_mut(), *arg, *flags, index) {
                debug!(
                    module = %self.module,
                    function = %self.function,
                    class = ?arg.type_class(),
                    error = %err,
                    "hook callback abandoned while binding arguments"
                );
                return CallOutcome::BindAborted { slot: index };
            }
        }

        match frame.execute() {
            Ok(value) => {
                // Hooks are notifications; the return value is not consumed.
                trace!(
                    module = %self.module,
                    function = %self.function,
                    returned = ?value,
                    "hook callback finished"
                );
                CallOutcome::Completed
            }
            Err(err) => {
                warn!(
                    module = %self.module,
                    function = %self.function,
                    error = %err,
                    "hook callback {}@{} failed",
                    self.function,
                    self.module
                );
                CallOutcome::Failed
            }
        }
    }
}

fn bind<'a>(
    frame: &mut (dyn CallFrame<'a> + 'a),
    arg: ArgRef<'a>,
    flags: ParamFlags,
    index: usize,
) -> Result<(), hookline_core::BindError> {
    let slot = Slot::forward(arg, flags, index)?;
    frame.bind(index, slot)
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callback")
            .field("module", &self.module)
            .field("function", &self.function)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
