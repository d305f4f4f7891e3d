// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use core::any::{type_name, TypeId};
use core::ops::{Add, Div, Mul, Sub};

use num_complex::{Complex32 as c32, Complex64 as c64};
use num_traits::{One, Zero};

/// Elements that support linear algebra operations.
///
/// `'static` for type-based dispatch to a kernel, `Copy` so that
/// coefficients can be read by value through aliasing views, and the rest
/// are numerical traits.
pub trait LinalgScalar:
    'static + Copy + Zero + One + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Div<Output = Self>
{
}

impl<T> LinalgScalar for T where T: 'static
        + Copy
        + Zero
        + One
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
{
}

/// The matrix multiplication kernel used for an element type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GemmKernel
{
    /// `matrixmultiply::sgemm`
    F32,
    /// `matrixmultiply::dgemm`
    F64,
    /// `matrixmultiply::cgemm`
    C32,
    /// `matrixmultiply::zgemm`
    C64,
    /// A coefficient loop over `LinalgScalar` operations.
    Generic,
}

impl GemmKernel
{
    /// Pick the kernel for element type `A`.
    pub fn of<A: 'static>() -> Self
    {
        if same_type::<A, f32>() {
            GemmKernel::F32
        } else if same_type::<A, f64>() {
            GemmKernel::F64
        } else if same_type::<A, c32>() {
            GemmKernel::C32
        } else if same_type::<A, c64>() {
            GemmKernel::C64
        } else {
            GemmKernel::Generic
        }
    }
}

#[inline(always)]
/// Return `true` if `A` and `B` are the same type
pub(crate) fn same_type<A: 'static, B: 'static>() -> bool
{
    TypeId::of::<A>() == TypeId::of::<B>()
}

// Read a value of type `A` as type `B`.
//
// **Panics** if `A` and `B` are not the same type
pub(crate) fn cast_as<A: 'static + Copy, B: 'static + Copy>(a: &A) -> B
{
    assert!(same_type::<A, B>(), "expect type {} and {} to match", type_name::<A>(), type_name::<B>());
    unsafe { core::ptr::read(a as *const _ as *const B) }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn kernel_dispatch()
    {
        assert_eq!(GemmKernel::of::<f32>(), GemmKernel::F32);
        assert_eq!(GemmKernel::of::<f64>(), GemmKernel::F64);
        assert_eq!(GemmKernel::of::<c32>(), GemmKernel::C32);
        assert_eq!(GemmKernel::of::<c64>(), GemmKernel::C64);
        assert_eq!(GemmKernel::of::<i64>(), GemmKernel::Generic);
    }

    #[test]
    fn cast_same_type()
    {
        let x: f64 = cast_as(&2.5f64);
        assert_eq!(x, 2.5);
    }

    #[test]
    #[should_panic]
    fn cast_other_type()
    {
        let _: f32 = cast_as(&2.5f64);
    }
}
