//! # Argument Layer (ArgRef)
//!
//! A borrowed, classified view of one value the engine passes to a hook.
//!
//! The engine side of a hook call only knows the runtime type of each value,
//! not a static Rust signature shared with the callee. [`ArgRef`] carries that
//! knowledge as its variant, so every later decision about how to forward the
//! value is an exhaustive `match` rather than a numeric type-id switch.
//!
//! Arguments never own anything. They borrow the caller's memory for exactly
//! one dispatch and are never stored past it.

use std::any::Any;

/// An opaque, borrowed script object.
///
/// The registry never looks inside it; only the callee may downcast.
pub type ObjectRef<'a> = &'a (dyn Any + 'static);

/// A type identifier assigned by the host runtime.
///
/// Only used on the generic forwarding path, where the callee's runtime is
/// responsible for interpreting the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostTypeId(pub u32);

/// Width of an integer argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    /// 8 bits.
    W8,
    /// 16 bits.
    W16,
    /// 32 bits.
    W32,
    /// 64 bits.
    W64,
}

impl IntWidth {
    /// Width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
        }
    }
}

/// Runtime classification of an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeClass {
    /// No value.
    Void,
    /// A boolean.
    Bool,
    /// A signed integer of the given width.
    SignedInteger(IntWidth),
    /// An unsigned integer of the given width.
    UnsignedInteger(IntWidth),
    /// A 32-bit float.
    Float32,
    /// A 64-bit float.
    Float64,
    /// A handle to a script object.
    ObjectHandle,
    /// A script object passed by value.
    ObjectValue,
    /// A handle to a read-only script object.
    HandleToConst,
    /// Anything else; forwarded untyped with its host type id.
    Generic,
}

impl TypeClass {
    /// Returns `true` for the boolean, integer and float classes.
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            TypeClass::Bool
                | TypeClass::SignedInteger(_)
                | TypeClass::UnsignedInteger(_)
                | TypeClass::Float32
                | TypeClass::Float64
        )
    }
}

/// A borrowed argument tagged with its runtime classification.
///
/// # Example
///
/// ```rust
/// use hookline_core::{ArgRef, TypeClass};
///
/// let damage = 12_i32;
/// let arg = ArgRef::from(&damage);
/// assert_eq!(arg.type_class(), TypeClass::SignedInteger(hookline_core::IntWidth::W32));
/// ```
#[derive(Debug, Clone, Copy)]
pub enum ArgRef<'a> {
    /// No value. Always rejected when bound.
    Void,
    /// A boolean.
    Bool(&'a bool),
    /// An 8-bit signed integer.
    I8(&'a i8),
    /// A 16-bit signed integer.
    I16(&'a i16),
    /// A 32-bit signed integer.
    I32(&'a i32),
    /// A 64-bit signed integer.
    I64(&'a i64),
    /// An 8-bit unsigned integer.
    U8(&'a u8),
    /// A 16-bit unsigned integer.
    U16(&'a u16),
    /// A 32-bit unsigned integer.
    U32(&'a u32),
    /// A 64-bit unsigned integer.
    U64(&'a u64),
    /// A 32-bit float.
    F32(&'a f32),
    /// A 64-bit float.
    F64(&'a f64),
    /// A handle to a script object.
    Handle(ObjectRef<'a>),
    /// A script object passed by value.
    Object(ObjectRef<'a>),
    /// A handle to a read-only script object.
    ConstHandle(ObjectRef<'a>),
    /// A value of a type the registry does not know.
    Generic(ObjectRef<'a>, HostTypeId),
}

impl<'a> ArgRef<'a> {
    /// Wrap a script object passed by value.
    pub fn object<T: Any>(value: &'a T) -> Self {
        ArgRef::Object(value)
    }

    /// Wrap a handle to a script object.
    pub fn handle<T: Any>(value: &'a T) -> Self {
        ArgRef::Handle(value)
    }

    /// Wrap a handle to a read-only script object.
    pub fn const_handle<T: Any>(value: &'a T) -> Self {
        ArgRef::ConstHandle(value)
    }

    /// Wrap a value the callee's runtime must interpret itself.
    pub fn generic<T: Any>(value: &'a T, type_id: HostTypeId) -> Self {
        ArgRef::Generic(value, type_id)
    }

    /// Classify the argument.
    pub const fn type_class(&self) -> TypeClass {
        match self {
            ArgRef::Void => TypeClass::Void,
            ArgRef::Bool(_) => TypeClass::Bool,
            ArgRef::I8(_) => TypeClass::SignedInteger(IntWidth::W8),
            ArgRef::I16(_) => TypeClass::SignedInteger(IntWidth::W16),
            ArgRef::I32(_) => TypeClass::SignedInteger(IntWidth::W32),
            ArgRef::I64(_) => TypeClass::SignedInteger(IntWidth::W64),
            ArgRef::U8(_) => TypeClass::UnsignedInteger(IntWidth::W8),
            ArgRef::U16(_) => TypeClass::UnsignedInteger(IntWidth::W16),
            ArgRef::U32(_) => TypeClass::UnsignedInteger(IntWidth::W32),
            ArgRef::U64(_) => TypeClass::UnsignedInteger(IntWidth::W64),
            ArgRef::F32(_) => TypeClass::Float32,
            ArgRef::F64(_) => TypeClass::Float64,
            ArgRef::Handle(_) => TypeClass::ObjectHandle,
            ArgRef::Object(_) => TypeClass::ObjectValue,
            ArgRef::ConstHandle(_) => TypeClass::HandleToConst,
            ArgRef::Generic(..) => TypeClass::Generic,
        }
    }

    /// Address of the borrowed value, or null for [`ArgRef::Void`].
    ///
    /// Used to check identity, never dereferenced.
    pub fn as_ptr(&self) -> *const () {
        match *self {
            ArgRef::Void => std::ptr::null(),
            ArgRef::Bool(v) => std::ptr::from_ref(v).cast(),
            ArgRef::I8(v) => std::ptr::from_ref(v).cast(),
            ArgRef::I16(v) => std::ptr::from_ref(v).cast(),
            ArgRef::I32(v) => std::ptr::from_ref(v).cast(),
            ArgRef::I64(v) => std::ptr::from_ref(v).cast(),
            ArgRef::U8(v) => std::ptr::from_ref(v).cast(),
            ArgRef::U16(v) => std::ptr::from_ref(v).cast(),
            ArgRef::U32(v) => std::ptr::from_ref(v).cast(),
            ArgRef::U64(v) => std::ptr::from_ref(v).cast(),
            ArgRef::F32(v) => std::ptr::from_ref(v).cast(),
            ArgRef::F64(v) => std::ptr::from_ref(v).cast(),
            ArgRef::Handle(v)
            | ArgRef::Object(v)
            | ArgRef::ConstHandle(v)
            | ArgRef::Generic(v, _) => std::ptr::from_ref(v).cast(),
        }
    }

    /// The borrowed value as [`Any`], if it has one.
    pub fn as_any(&self) -> Option<&'a dyn Any> {
        match *self {
            ArgRef::Void => None,
            ArgRef::Bool(v) => Some(v),
            ArgRef::I8(v) => Some(v),
            ArgRef::I16(v) => Some(v),
            ArgRef::I32(v) => Some(v),
            ArgRef::I64(v) => Some(v),
            ArgRef::U8(v) => Some(v),
            ArgRef::U16(v) => Some(v),
            ArgRef::U32(v) => Some(v),
            ArgRef::U64(v) => Some(v),
            ArgRef::F32(v) => Some(v),
            ArgRef::F64(v) => Some(v),
            ArgRef::Handle(v)
            | ArgRef::Object(v)
            | ArgRef::ConstHandle(v)
            | ArgRef::Generic(v, _) => Some(v),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for ArgRef<'a> {
                fn from(value: &'a $ty) -> Self {
                    ArgRef::$variant(value)
                }
            }
        )*
    };
}

impl_from_primitive! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

impl From<()> for ArgRef<'_> {
    fn from(_: ()) -> Self {
        ArgRef::Void
    }
}

#[cfg(test)]
mod tests {
    use super::{ArgRef, HostTypeId, IntWidth, TypeClass};

    struct Critter {
        hp: u32,
    }

    #[test]
    fn test_primitives_classify_by_width() {
        let a = 1_i8;
        let b = 2_u16;
        let c = 3_i64;
        let d = 4_u64;
        assert_eq!(
            ArgRef::from(&a).type_class(),
            TypeClass::SignedInteger(IntWidth::W8)
        );
        assert_eq!(
            ArgRef::from(&b).type_class(),
            TypeClass::UnsignedInteger(IntWidth::W16)
        );
        assert_eq!(
            ArgRef::from(&c).type_class(),
            TypeClass::SignedInteger(IntWidth::W64)
        );
        assert_eq!(
            ArgRef::from(&d).type_class(),
            TypeClass::UnsignedInteger(IntWidth::W64)
        );
        assert_eq!(ArgRef::from(&1.5_f32).type_class(), TypeClass::Float32);
        assert_eq!(ArgRef::from(&true).type_class(), TypeClass::Bool);
        assert_eq!(ArgRef::from(()).type_class(), TypeClass::Void);
    }

    #[test]
    fn test_objects_keep_caller_address() {
        let critter = Critter { hp: 7 };
        let arg = ArgRef::handle(&critter);

        assert_eq!(arg.type_class(), TypeClass::ObjectHandle);
        assert_eq!(arg.as_ptr(), std::ptr::from_ref(&critter).cast::<()>());

        let back = arg
            .as_any()
            .and_then(|any| any.downcast_ref::<Critter>())
            .unwrap();
        assert_eq!(back.hp, 7);
    }

    #[test]
    fn test_generic_carries_host_type_id() {
        let raw = [1_u8, 2, 3];
        let arg = ArgRef::generic(&raw, HostTypeId(0x4000));
        assert!(matches!(arg, ArgRef::Generic(_, HostTypeId(0x4000))));
        assert_eq!(arg.type_class(), TypeClass::Generic);
        assert!(!arg.type_class().is_primitive());
    }

    #[test]
    fn test_void_has_no_address() {
        assert!(ArgRef::Void.as_ptr().is_null());
        assert!(ArgRef::Void.as_any().is_none());
    }
}
