//! Per-parameter calling-convention flags.

use bitflags::bitflags;

bitflags! {
    /// How a callee declares one of its parameters.
    ///
    /// Resolved once when a callback is subscribed. Any flag set other than
    /// exactly [`ParamFlags::CONST`] makes the parameter a reference, and the
    /// argument is then forwarded by address instead of by value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ParamFlags: u32 {
        /// Input reference (`&in`).
        const IN_REF = 1;
        /// Output reference (`&out`).
        const OUT_REF = 1 << 1;
        /// Input/output reference (`&inout`).
        const INOUT_REF = Self::IN_REF.bits() | Self::OUT_REF.bits();
        /// Read-only parameter.
        const CONST = 1 << 2;
    }
}

impl ParamFlags {
    /// Returns `true` if an argument for this parameter must be passed by address.
    pub fn passes_by_address(self) -> bool {
        !self.is_empty() && self != ParamFlags::CONST
    }
}
