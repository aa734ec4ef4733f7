//! # Slot Layer
//!
//! The form in which an argument reaches a callee parameter.
//!
//! [`Slot::forward`] is the only place that decides how a classified value
//! crosses into a script function. It prefers the narrowest typed scalar when
//! one exists and falls back to generic forwarding otherwise.

use crate::{
    argument::{ArgRef, HostTypeId, ObjectRef},
    error::BindError,
    flags::ParamFlags,
};

/// A value prepared for one callee parameter.
#[derive(Debug, Clone, Copy)]
pub enum Slot<'a> {
    /// A boolean, as a single byte.
    Byte(u8),
    /// Any signed integer, widened (or truncated) to 32 bits.
    Int(i32),
    /// Any unsigned integer, widened (or truncated) to 32 bits.
    UInt(u32),
    /// A 32-bit float.
    Float(f32),
    /// A 64-bit float.
    Double(f64),
    /// An opaque script object, passed without copying.
    Object(ObjectRef<'a>),
    /// The caller's value itself, for reference parameters and read-only handles.
    Address(ArgRef<'a>),
    /// A value of unknown type together with its host type id.
    Var(ObjectRef<'a>, HostTypeId),
}

impl<'a> Slot<'a> {
    /// Classify `arg` and convert it for a parameter declared with `flags`.
    ///
    /// `slot` is the zero-based parameter position, used only for errors.
    ///
    /// The order of the checks matters:
    ///
    /// 1. Void is rejected.
    /// 2. Handles and by-value objects are passed as objects, whatever the flags.
    /// 3. Reference parameters and read-only handles are passed by address.
    /// 4. Primitives are unpacked into their widened scalar form.
    /// 5. Everything else is forwarded generically.
    pub fn forward(arg: ArgRef<'a>, flags: ParamFlags, slot: usize) -> Result<Self, BindError> {
        match arg {
            ArgRef::Void => Err(BindError::VoidArgument { slot }),
            ArgRef::Handle(obj) | ArgRef::Object(obj) => Ok(Slot::Object(obj)),
            ArgRef::ConstHandle(_) => Ok(Slot::Address(arg)),
            _ if flags.passes_by_address() => Ok(Slot::Address(arg)),
            ArgRef::Bool(v) => Ok(Slot::Byte(u8::from(*v))),
            ArgRef::I8(v) => Ok(Slot::Int(i32::from(*v))),
            ArgRef::I16(v) => Ok(Slot::Int(i32::from(*v))),
            ArgRef::I32(v) => Ok(Slot::Int(*v)),
            ArgRef::I64(v) => Ok(Slot::Int(*v as i32)),
            ArgRef::U8(v) => Ok(Slot::UInt(u32::from(*v))),
            ArgRef::U16(v) => Ok(Slot::UInt(u32::from(*v))),
            ArgRef::U32(v) => Ok(Slot::UInt(*v)),
            ArgRef::U64(v) => Ok(Slot::UInt(*v as u32)),
            ArgRef::F32(v) => Ok(Slot::Float(*v)),
            ArgRef::F64(v) => Ok(Slot::Double(*v)),
            ArgRef::Generic(value, type_id) => Ok(Slot::Var(value, type_id)),
        }
    }

    /// Short name of the slot form, for logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Slot::Byte(_) => "byte",
            Slot::Int(_) => "int",
            Slot::UInt(_) => "uint",
            Slot::Float(_) => "float",
            Slot::Double(_) => "double",
            Slot::Object(_) => "object",
            Slot::Address(_) => "address",
            Slot::Var(..) => "var",
        }
    }
}
