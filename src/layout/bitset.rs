// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Compact representation of the capabilities of a dense operand.

use core::fmt;

/// Capability bitset of a dense operand.
///
/// Layouts produce the `ROW_MAJOR`, `LINEAR_ACCESS` and `PACKET_ACCESS`
/// bits; views add `DIRECT_ACCESS`, and `LVALUE` when they are writable.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Flags(u32);

impl Flags
{
    /// No capability: strided, column-major, coefficient access only.
    pub const NONE: Flags = Flags(0);
    /// Storage order is row-major (inner axis runs along a row).
    pub const ROW_MAJOR: Flags = Flags(0b00001);
    /// Coefficients can be addressed by one linear index.
    pub const LINEAR_ACCESS: Flags = Flags(0b00010);
    /// Consecutive coefficients along the inner axis are packed, so block
    /// (packet) loads and stores are legal.
    pub const PACKET_ACCESS: Flags = Flags(0b00100);
    /// Coefficients live in memory reachable through a pointer and strides.
    pub const DIRECT_ACCESS: Flags = Flags(0b01000);
    /// Coefficients can be written.
    pub const LVALUE: Flags = Flags(0b10000);

    /// Raw bits.
    #[inline(always)]
    pub const fn bits(self) -> u32
    {
        self.0
    }

    /// Return true if every bit of `flag` is set.
    #[inline(always)]
    pub const fn is(self, flag: Flags) -> bool
    {
        self.0 & flag.0 == flag.0
    }

    /// Return flags common to both inputs
    #[inline(always)]
    pub const fn intersect(self, other: Flags) -> Flags
    {
        Flags(self.0 & other.0)
    }

    /// Return flags that simultaneously "are" what both of the inputs are
    #[inline(always)]
    pub const fn also(self, other: Flags) -> Flags
    {
        Flags(self.0 | other.0)
    }

    #[inline(always)]
    pub const fn without(self, other: Flags) -> Flags
    {
        Flags(self.0 & !other.0)
    }

    /// Flags of the transposed operand: the storage order flips.
    #[inline(always)]
    pub const fn transposed(self) -> Flags
    {
        Flags(self.0 ^ Flags::ROW_MAJOR.0)
    }
}

const FLAG_NAMES: &[&str] = &["R", "L", "P", "D", "W"];

impl fmt::Debug for Flags
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        if self.0 == 0 {
            write!(f, "Strided")?
        } else {
            (0..32).filter(|&i| self.0 & (1 << i) != 0).try_fold((), |_, i| {
                if let Some(name) = FLAG_NAMES.get(i) {
                    write!(f, "{}", name)
                } else {
                    write!(f, "{:#x}", i)
                }
            })?;
        };
        write!(f, " ({:#x})", self.0)
    }
}
