//! Testing utilities for hookline.
//!
//! This module provides an in-memory script runtime so registries can be
//! exercised without embedding a real scripting engine.
//!
//! # Features
//!
//! - [`MockRuntime`]: A [`FunctionResolver`] over functions defined in memory
//! - [`MockFunction`]: A configurable [`ScriptFunction`] that records its calls
//! - [`RecordedCall`] / [`RecordedValue`]: Owned snapshots of what a call received

use hookline_core::{
    BindError, CallFrame, ExecuteError, FunctionResolver, HostTypeId, ParamFlags, ResolveError,
    ReturnValue, ScriptFunction, Slot, TypeClass,
};
use std::{
    collections::{BTreeSet, HashMap},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Address of `value`, for identity checks against [`RecordedValue`]s.
pub fn addr_of<T: ?Sized>(value: &T) -> usize {
    std::ptr::from_ref(value).cast::<()>().addr()
}

// ============================================================================
// Recorded values
// ============================================================================

/// An owned snapshot of one bound [`Slot`].
///
/// Objects and addresses are recorded by address only, which is enough to
/// check that nothing was copied on the way in.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedValue {
    /// A byte (booleans).
    Byte(u8),
    /// A signed 32-bit value.
    Int(i32),
    /// An unsigned 32-bit value.
    UInt(u32),
    /// A 32-bit float.
    Float(f32),
    /// A 64-bit float.
    Double(f64),
    /// An object reference.
    Object {
        /// Address of the object.
        addr: usize,
    },
    /// A raw address.
    Address {
        /// Classification of the value behind the address.
        class: TypeClass,
        /// The address.
        addr: usize,
    },
    /// A generic value.
    Var {
        /// Address of the value.
        addr: usize,
        /// Host type id passed alongside it.
        type_id: HostTypeId,
    },
}

impl RecordedValue {
    /// Snapshot a slot.
    pub fn from_slot(slot: &Slot<'_>) -> Self {
        match *slot {
            Slot::Byte(v) => RecordedValue::Byte(v),
            Slot::Int(v) => RecordedValue::Int(v),
            Slot::UInt(v) => RecordedValue::UInt(v),
            Slot::Float(v) => RecordedValue::Float(v),
            Slot::Double(v) => RecordedValue::Double(v),
            Slot::Object(obj) => RecordedValue::Object { addr: addr_of(obj) },
            Slot::Address(arg) => RecordedValue::Address {
                class: arg.type_class(),
                addr: arg.as_ptr().addr(),
            },
            Slot::Var(value, type_id) => RecordedValue::Var {
                addr: addr_of(value),
                type_id,
            },
        }
    }
}

/// One completed call of a [`MockFunction`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Module of the called function.
    pub module: String,
    /// Name of the called function.
    pub function: String,
    /// The bound arguments, in parameter order.
    pub args: Vec<RecordedValue>,
}

// ============================================================================
// Mock Function
// ============================================================================

type Inspector = dyn Fn(&[Slot<'_>]) + Send + Sync;
type Journal = Arc<Mutex<Vec<String>>>;

#[derive(Default)]
struct CallState {
    calls: Mutex<Vec<RecordedCall>>,
    prepared: AtomicUsize,
    bound: AtomicUsize,
}

/// A scripted function that records every call it receives.
///
/// Clones share their recorded state, so a test can keep one clone while the
/// registry owns another.
///
/// # Example
///
/// ```rust,ignore
/// let runtime = MockRuntime::new();
/// let on_hit = runtime.define(MockFunction::new("combat", "on_hit").params(1));
///
/// // ... subscribe and dispatch ...
///
/// assert_eq!(on_hit.call_count(), 1);
/// ```
#[derive(Clone)]
pub struct MockFunction {
    module: String,
    name: String,
    flags: Vec<ParamFlags>,
    rejected: Option<(usize, String)>,
    failure: Option<String>,
    returns: ReturnValue,
    inspector: Option<Arc<Inspector>>,
    journal: Option<Journal>,
    state: Arc<CallState>,
}

impl MockFunction {
    /// Create a function with no parameters.
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            flags: Vec::new(),
            rejected: None,
            failure: None,
            returns: ReturnValue::Void,
            inspector: None,
            journal: None,
            state: Arc::new(CallState::default()),
        }
    }

    /// Declare `count` by-value parameters.
    pub fn params(mut self, count: usize) -> Self {
        self.flags = vec![ParamFlags::empty(); count];
        self
    }

    /// Declare one more parameter with `flags`.
    pub fn param(mut self, flags: ParamFlags) -> Self {
        self.flags.push(flags);
        self
    }

    /// Refuse any value bound to parameter `slot`.
    pub fn reject_slot(mut self, slot: usize, reason: impl Into<String>) -> Self {
        self.rejected = Some((slot, reason.into()));
        self
    }

    /// Raise a script exception on every call.
    pub fn fail_with(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Return `value` from every call.
    pub fn returns(mut self, value: ReturnValue) -> Self {
        self.returns = value;
        self
    }

    /// Run `inspector` on the bound slots of every call.
    ///
    /// Lets a test look inside objects passed by reference.
    pub fn inspect<F>(mut self, inspector: F) -> Self
    where
        F: Fn(&[Slot<'_>]) + Send + Sync + 'static,
    {
        self.inspector = Some(Arc::new(inspector));
        self
    }

    /// All calls that ran, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }

    /// The most recent call.
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.state.calls.lock().unwrap().last().cloned()
    }

    /// Number of calls that ran.
    pub fn call_count(&self) -> usize {
        self.state.calls.lock().unwrap().len()
    }

    /// Number of call frames opened, including abandoned ones.
    pub fn prepared_count(&self) -> usize {
        self.state.prepared.load(Ordering::SeqCst)
    }

    /// Number of successful binds across all frames.
    pub fn bound_count(&self) -> usize {
        self.state.bound.load(Ordering::SeqCst)
    }

    /// Forget all recorded calls and counters.
    pub fn reset(&self) {
        self.state.calls.lock().unwrap().clear();
        self.state.prepared.store(0, Ordering::SeqCst);
        self.state.bound.store(0, Ordering::SeqCst);
    }

    fn qualified_name(&self) -> String {
        format!("{}@{}", self.name, self.module)
    }
}

impl ScriptFunction for MockFunction {
    fn module(&self) -> &str {
        &self.module
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn param_flags(&self) -> &[ParamFlags] {
        &self.flags
    }

    fn prepare<'a>(&'a self) -> Result<Box<dyn CallFrame<'a> + 'a>, ExecuteError> {
        self.state.prepared.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockFrame {
            function: self,
            slots: vec![None; self.flags.len()],
        }))
    }
}

struct MockFrame<'a> {
    function: &'a MockFunction,
    slots: Vec<Option<Slot<'a>>>,
}

impl<'a> CallFrame<'a> for MockFrame<'a> {
    fn bind(&mut self, index: usize, slot: Slot<'a>) -> Result<(), BindError> {
        let count = self.slots.len();
        let target = self
            .slots
            .get_mut(index)
            .ok_or(BindError::OutOfRange { slot: index, count })?;
        if let Some((rejected, reason)) = &self.function.rejected {
            if *rejected == index {
                return Err(BindError::Rejected {
                    slot: index,
                    reason: reason.clone(),
                });
            }
        }
        *target = Some(slot);
        self.function.state.bound.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn execute(self: Box<Self>) -> Result<ReturnValue, ExecuteError> {
        let MockFrame { function, slots } = *self;
        let slots = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| ExecuteError::Exception(format!("parameter {index} not bound")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        function.state.calls.lock().unwrap().push(RecordedCall {
            module: function.module.clone(),
            function: function.name.clone(),
            args: slots.iter().map(RecordedValue::from_slot).collect(),
        });
        if let Some(journal) = &function.journal {
            journal.lock().unwrap().push(function.qualified_name());
        }
        if let Some(inspector) = &function.inspector {
            inspector(&slots);
        }

        match &function.failure {
            Some(message) => Err(ExecuteError::Exception(message.clone())),
            None => Ok(function.returns),
        }
    }
}

// ============================================================================
// Mock Runtime
// ============================================================================

#[derive(Default)]
struct RuntimeState {
    modules: BTreeSet<String>,
    functions: HashMap<(String, String), MockFunction>,
    active_module: Option<String>,
}

/// An in-memory script runtime.
///
/// Clones share the same function table and call journal.
#[derive(Clone, Default)]
pub struct MockRuntime {
    state: Arc<Mutex<RuntimeState>>,
    journal: Journal,
}

impl MockRuntime {
    /// Create an empty runtime.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an empty module.
    pub fn load_module(&self, module: impl Into<String>) {
        self.state.lock().unwrap().modules.insert(module.into());
    }

    /// Define `function`, loading its module if needed.
    ///
    /// Returns a clone sharing the function's recorded calls.
    pub fn define(&self, mut function: MockFunction) -> MockFunction {
        function.journal = Some(self.journal.clone());
        let mut state = self.state.lock().unwrap();
        state.modules.insert(function.module.clone());
        state.functions.insert(
            (function.module.clone(), function.name.clone()),
            function.clone(),
        );
        function
    }

    /// Set the module reported as currently executing.
    pub fn set_active_module(&self, module: Option<&str>) {
        self.state.lock().unwrap().active_module = module.map(str::to_owned);
    }

    /// Every call made to any function of this runtime, as `function@module`.
    pub fn journal(&self) -> Vec<String> {
        self.journal.lock().unwrap().clone()
    }

    /// Forget the journal.
    pub fn clear_journal(&self) {
        self.journal.lock().unwrap().clear();
    }
}

impl FunctionResolver for MockRuntime {
    fn resolve(
        &self,
        module: &str,
        function: &str,
    ) -> Result<Box<dyn ScriptFunction>, ResolveError> {
        let state = self.state.lock().unwrap();
        if !state.modules.contains(module) {
            return Err(ResolveError::ModuleNotFound(module.to_owned()));
        }
        state
            .functions
            .get(&(module.to_owned(), function.to_owned()))
            .map(|found| Box::new(found.clone()) as Box<dyn ScriptFunction>)
            .ok_or_else(|| ResolveError::FunctionNotFound {
                module: module.to_owned(),
                function: function.to_owned(),
            })
    }

    fn active_module(&self) -> Option<String> {
        self.state.lock().unwrap().active_module.clone()
    }
}
