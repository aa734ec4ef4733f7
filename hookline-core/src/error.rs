//! Error types for hookline.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`HooklineError`] - Top-level error type for all hookline operations
//! - [`ResolveError`] - Errors looking up a callback's target function
//! - [`BindError`] - Errors forwarding one argument into a parameter slot
//! - [`ExecuteError`] - Errors raised while a script function runs
//! - [`ArgumentsError`] - Errors building a bounded argument list
//!
//! Only subscription surfaces these to the engine. Dispatch consumes every
//! error it meets and reports it through the log stream instead.

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all hookline operations.
#[derive(Error, Debug)]
pub enum HooklineError {
    /// A callback's target function could not be resolved.
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// An argument could not be bound to a parameter slot.
    #[error("bind error: {0}")]
    Bind(#[from] BindError),

    /// A script function failed while executing.
    #[error("execute error: {0}")]
    Execute(#[from] ExecuteError),

    /// An argument list could not be built.
    #[error("arguments error: {0}")]
    Arguments(#[from] ArgumentsError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that can occur while resolving a `(module, function)` pair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No loaded module carries the requested name.
    #[error("module `{0}` is not loaded")]
    ModuleNotFound(String),

    /// The module is loaded but declares no such function.
    #[error("function `{function}` not found in module `{module}`")]
    FunctionNotFound {
        /// Module that was searched.
        module: String,
        /// Function that was requested.
        function: String,
    },

    /// The subscription named no function at all.
    #[error("callback function name is empty")]
    EmptyFunctionName,

    /// The subscription named no module and no script is running to supply one.
    #[error("no module given and no script module is active")]
    NoActiveModule,
}

/// Errors that can occur while binding one argument.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// A void value was supplied; it has nothing to forward.
    #[error("argument {slot} is void and cannot be forwarded")]
    VoidArgument {
        /// Zero-based parameter position.
        slot: usize,
    },

    /// The callee refused the value for this slot.
    #[error("argument {slot} was rejected: {reason}")]
    Rejected {
        /// Zero-based parameter position.
        slot: usize,
        /// Callee-supplied reason.
        reason: String,
    },

    /// The slot position is past the callee's parameter list.
    #[error("argument {slot} is out of range for a function taking {count} parameters")]
    OutOfRange {
        /// Zero-based parameter position.
        slot: usize,
        /// Declared parameter count.
        count: usize,
    },
}

/// Errors that can occur while a script function executes.
#[derive(Error, Debug)]
pub enum ExecuteError {
    /// The script raised an exception.
    #[error("script exception: {0}")]
    Exception(String),

    /// The script suspended instead of running to completion.
    #[error("script execution was suspended")]
    Suspended,

    /// The script was aborted by its runtime.
    #[error("script execution was aborted")]
    Aborted,

    /// A custom execution error.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that can occur while building a bounded argument list.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentsError {
    /// More arguments were supplied than the host calling convention allows.
    #[error("at most {limit} arguments can be passed to a hook")]
    TooMany {
        /// The argument ceiling.
        limit: usize,
    },
}

// Convenience conversions
impl From<BoxError> for HooklineError {
    fn from(err: BoxError) -> Self {
        HooklineError::Custom(err)
    }
}

impl From<BoxError> for ExecuteError {
    fn from(err: BoxError) -> Self {
        ExecuteError::Custom(err)
    }
}
