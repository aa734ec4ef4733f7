//! # hookline-core
//!
//! Core types and traits for the hookline hook registry.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! script runtime bindings that only need to implement the callee side of
//! the calling protocol, without pulling in the registry itself.
//!
//! # Layers
//!
//! hookline moves a value from engine code into a script function in three
//! steps, each owned by a distinct type:
//!
//! ## Layer 1: Argument ([`ArgRef`])
//!
//! A borrowed, type-erased view of one caller-supplied value. The variant is
//! the value's runtime classification ([`TypeClass`]); the payload is a plain
//! reference into the caller's memory, valid for one dispatch only.
//!
//! ## Layer 2: Slot ([`Slot`])
//!
//! The form in which a value is handed to a callee parameter: a widened scalar,
//! an opaque object reference, a raw address, or a generic typed value.
//! [`Slot::forward`] is the single classification table translating an
//! [`ArgRef`] plus the parameter's declared [`ParamFlags`] into a slot.
//!
//! ## Layer 3: Call ([`ScriptFunction`], [`CallFrame`])
//!
//! The external function capability. A [`FunctionResolver`] turns a
//! `(module, function)` pair into a [`ScriptFunction`]; each invocation
//! prepares a fresh [`CallFrame`], binds every slot, then executes.
//!
//! # Error Types
//!
//! - [`HooklineError`] - Top-level error type
//! - [`ResolveError`] - Function lookup errors
//! - [`BindError`] - Argument binding errors
//! - [`ExecuteError`] - Script execution errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod argument;
mod entity;
mod error;
mod flags;
mod function;
mod slot;

// Re-exports
pub use argument::{ArgRef, HostTypeId, IntWidth, ObjectRef, TypeClass};
pub use entity::Entity;
pub use error::{
    ArgumentsError, BindError, BoxError, ExecuteError, HooklineError, ResolveError,
};
pub use flags::ParamFlags;
pub use function::{CallFrame, FunctionResolver, ReturnValue, ScriptFunction};
pub use slot::Slot;

/// The reserved index whose handler fires on every indexed dispatch of a tag.
pub const WILDCARD_INDEX: u32 = 0;
