//! # Call Layer
//!
//! The capability boundary between the registry and a script runtime.
//!
//! The registry never knows how a callback is implemented. It asks a
//! [`FunctionResolver`] for a [`ScriptFunction`] once, at subscription time,
//! and from then on drives every call through the same three steps:
//!
//! 1. [`ScriptFunction::prepare`] opens a fresh [`CallFrame`].
//! 2. [`CallFrame::bind`] fills one parameter at a time.
//! 3. [`CallFrame::execute`] runs the function and yields its return value.
//!
//! Dropping a frame without executing it abandons the call; runtimes should
//! release any per-call state in `Drop`.

use crate::{
    error::{BindError, ExecuteError, ResolveError},
    flags::ParamFlags,
    slot::Slot,
};

/// Scalar value returned by a finished script call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ReturnValue {
    /// The function returns nothing.
    #[default]
    Void,
    /// An 8-bit value.
    Byte(u8),
    /// A 32-bit value.
    DWord(u32),
    /// A 64-bit value.
    QWord(u64),
    /// A 32-bit float.
    Float(f32),
    /// A 64-bit float.
    Double(f64),
}

/// One in-flight invocation of a [`ScriptFunction`].
pub trait CallFrame<'a> {
    /// Bind `slot` to the parameter at `index`.
    fn bind(&mut self, index: usize, slot: Slot<'a>) -> Result<(), BindError>;

    /// Run the function with the bound parameters.
    fn execute(self: Box<Self>) -> Result<ReturnValue, ExecuteError>;
}

/// A resolved, callable script function.
///
/// # For Runtime Bindings
///
/// Implement this for whatever handle your runtime uses for a compiled
/// function. `param_flags` must have one entry per declared parameter; its
/// length is the arity checked before every call.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a callable script function",
    label = "missing `ScriptFunction` implementation",
    note = "Script functions must report their parameters and open call frames."
)]
pub trait ScriptFunction {
    /// Name of the module that declares the function.
    fn module(&self) -> &str;

    /// Name of the function.
    fn name(&self) -> &str;

    /// Calling-convention flags, one per declared parameter.
    fn param_flags(&self) -> &[ParamFlags];

    /// Open a fresh call frame.
    fn prepare<'a>(&'a self) -> Result<Box<dyn CallFrame<'a> + 'a>, ExecuteError>;

    /// Number of declared parameters.
    fn param_count(&self) -> usize {
        self.param_flags().len()
    }
}

/// Looks up script functions by module and name.
pub trait FunctionResolver {
    /// Resolve `function` inside `module`.
    fn resolve(
        &self,
        module: &str,
        function: &str,
    ) -> Result<Box<dyn ScriptFunction>, ResolveError>;

    /// Module of the script currently executing, if any.
    ///
    /// Subscriptions that leave their module empty resolve against this
    /// module, and it is reported as the subscriber in logs.
    fn active_module(&self) -> Option<String> {
        None
    }
}

impl<R: FunctionResolver + ?Sized> FunctionResolver for Box<R> {
    fn resolve(
        &self,
        module: &str,
        function: &str,
    ) -> Result<Box<dyn ScriptFunction>, ResolveError> {
        (**self).resolve(module, function)
    }

    fn active_module(&self) -> Option<String> {
        (**self).active_module()
    }
}
