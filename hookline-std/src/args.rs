//! Bounded argument lists for fixed-arity host calls.
//!
//! Dispatch itself takes any number of arguments. Hosts that expose hooks
//! through a calling convention with a fixed number of optional argument
//! pairs collect them into an [`ArgumentList`] first, which refuses to grow
//! past [`MAX_HOST_ARGUMENTS`].

use hookline_core::{ArgRef, ArgumentsError};
use std::ops::Deref;

/// Most arguments a host-facing dispatch entry point accepts.
pub const MAX_HOST_ARGUMENTS: usize = 10;

/// Up to [`MAX_HOST_ARGUMENTS`] arguments, stored inline.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentList<'a> {
    args: [ArgRef<'a>; MAX_HOST_ARGUMENTS],
    len: usize,
}

impl<'a> ArgumentList<'a> {
    /// Create an empty list.
    pub const fn new() -> Self {
        Self {
            args: [ArgRef::Void; MAX_HOST_ARGUMENTS],
            len: 0,
        }
    }

    /// Append an argument.
    pub fn push(&mut self, arg: impl Into<ArgRef<'a>>) -> Result<(), ArgumentsError> {
        let slot = self.args.get_mut(self.len).ok_or(ArgumentsError::TooMany {
            limit: MAX_HOST_ARGUMENTS,
        })?;
        *slot = arg.into();
        self.len += 1;
        Ok(())
    }

    /// Append an argument, builder style.
    pub fn with(mut self, arg: impl Into<ArgRef<'a>>) -> Result<Self, ArgumentsError> {
        self.push(arg)?;
        Ok(self)
    }

    /// Copy `args` into a new list.
    pub fn try_from_slice(args: &[ArgRef<'a>]) -> Result<Self, ArgumentsError> {
        let mut list = Self::new();
        for arg in args {
            list.push(*arg)?;
        }
        Ok(list)
    }

    /// The arguments pushed so far.
    pub fn as_slice(&self) -> &[ArgRef<'a>] {
        &self.args[..self.len]
    }
}

impl Default for ArgumentList<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Deref for ArgumentList<'a> {
    type Target = [ArgRef<'a>];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<'a> TryFrom<&[ArgRef<'a>]> for ArgumentList<'a> {
    type Error = ArgumentsError;

    fn try_from(args: &[ArgRef<'a>]) -> Result<Self, Self::Error> {
        Self::try_from_slice(args)
    }
}
