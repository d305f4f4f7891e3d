// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The dense-expression vocabulary shared by views, `ndarray` matrices and
//! lazy expressions.
//!
//! A consumer (an evaluator or a kernel) sees an operand only through these
//! traits: its shape, its compile-time size and capabilities, and
//! coefficient reads and writes.

use core::mem::size_of;

use crate::layout::{Flags, DYNAMIC};

mod lazy;
mod ndarray_impl;

pub use self::lazy::{Product, Scaled, Transpose};

/// Storage kind tag of operands backed by a dense buffer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Dense;

/// Width in bytes of the packets that `PACKET_LANES` is computed for.
pub const PACKET_BYTES: usize = 16;

/// Number of elements of type `A` that fit one packet (at least one).
pub const fn packet_lanes<A>() -> usize
{
    let size = size_of::<A>();
    if size == 0 || size >= PACKET_BYTES {
        1
    } else {
        PACKET_BYTES / size
    }
}

/// A read-only dense linear-algebra operand.
pub trait DenseExpr
{
    type Elem: Copy;
    /// Storage kind tag; [`Dense`] for every operand in this crate.
    type StorageKind;

    /// Rows at compile time, or [`DYNAMIC`].
    const ROWS_AT_COMPILE_TIME: usize;
    /// Columns at compile time, or [`DYNAMIC`].
    const COLS_AT_COMPILE_TIME: usize;
    const FLAGS: Flags;
    /// Number of coefficients per vectorized load; `1` when packet access is
    /// not possible.
    const PACKET_LANES: usize = if Self::FLAGS.is(Flags::PACKET_ACCESS) {
        packet_lanes::<Self::Elem>()
    } else {
        1
    };

    fn rows(&self) -> usize;
    fn cols(&self) -> usize;

    /// Read the coefficient at `(row, col)`.
    ///
    /// # Safety
    ///
    /// `row < self.rows()` and `col < self.cols()`.
    unsafe fn coeff_unchecked(&self, row: usize, col: usize) -> Self::Elem;

    /// Read the coefficient at `(row, col)`, or `None` if it is out of bounds.
    fn coeff(&self, row: usize, col: usize) -> Option<Self::Elem>
    {
        if row < self.rows() && col < self.cols() {
            unsafe { Some(self.coeff_unchecked(row, col)) }
        } else {
            None
        }
    }

    /// Number of coefficients.
    fn size(&self) -> usize
    {
        self.rows() * self.cols()
    }

    /// Lazy transpose.
    fn transposed(self) -> Transpose<Self>
    where Self: Sized
    {
        Transpose::new(self)
    }

    /// Lazy multiplication of every coefficient by `alpha`.
    fn scaled(self, alpha: Self::Elem) -> Scaled<Self>
    where Self: Sized
    {
        Scaled::new(alpha, self)
    }

    /// Lazy matrix product `self × rhs`.
    ///
    /// **Panics** if `self.cols() != rhs.rows()`.
    fn times<R>(self, rhs: R) -> Product<Self, R>
    where
        Self: Sized,
        R: DenseExpr<Elem = Self::Elem>,
    {
        Product::new(self, rhs)
    }
}

/// A writable dense operand.
pub trait DenseExprMut: DenseExpr
{
    /// Write the coefficient at `(row, col)`.
    ///
    /// # Safety
    ///
    /// `row < self.rows()` and `col < self.cols()`.
    unsafe fn set_coeff_unchecked(&mut self, row: usize, col: usize, value: Self::Elem);

    /// Evaluate `expr` coefficient by coefficient into `self`.
    ///
    /// The loop follows the storage order of `self`. Coefficients are read
    /// by value, so `expr` may read the buffer `self` writes; the result is
    /// then defined by that order.
    ///
    /// **Panics** if the shapes differ.
    fn assign_expr<E>(&mut self, expr: &E)
    where E: DenseExpr<Elem = Self::Elem>
    {
        let (rows, cols) = (self.rows(), self.cols());
        ndassert!(
            rows == expr.rows() && cols == expr.cols(),
            "assign_expr: shape mismatch, destination is {}×{} but expression is {}×{}",
            rows,
            cols,
            expr.rows(),
            expr.cols()
        );
        unsafe {
            if Self::FLAGS.is(Flags::ROW_MAJOR) {
                for r in 0..rows {
                    for c in 0..cols {
                        self.set_coeff_unchecked(r, c, expr.coeff_unchecked(r, c));
                    }
                }
            } else {
                for c in 0..cols {
                    for r in 0..rows {
                        self.set_coeff_unchecked(r, c, expr.coeff_unchecked(r, c));
                    }
                }
            }
        }
    }
}

/// An operand whose coefficients live in memory at
/// `ptr + row * row_stride + col * col_stride`.
pub trait DirectAccess: DenseExpr
{
    fn data_ptr(&self) -> *const Self::Elem;
    /// Distance between rows, in elements.
    fn row_stride(&self) -> isize;
    /// Distance between columns, in elements.
    fn col_stride(&self) -> isize;
}

/// A writable [`DirectAccess`] operand.
pub trait DirectAccessMut: DirectAccess + DenseExprMut
{
    fn data_mut_ptr(&mut self) -> *mut Self::Elem;
}

/// Return true if a compile-time size is compatible with a runtime one.
#[inline]
pub(crate) fn size_matches(fixed: usize, actual: usize) -> bool
{
    fixed == DYNAMIC || fixed == actual
}

macro_rules! forward_expr {
    ($($ref_:tt)*) => {
        impl<'a, E> DenseExpr for $($ref_)* E
        where E: DenseExpr + ?Sized
        {
            type Elem = E::Elem;
            type StorageKind = E::StorageKind;
            const ROWS_AT_COMPILE_TIME: usize = E::ROWS_AT_COMPILE_TIME;
            const COLS_AT_COMPILE_TIME: usize = E::COLS_AT_COMPILE_TIME;
            const FLAGS: Flags = E::FLAGS;
            const PACKET_LANES: usize = E::PACKET_LANES;

            #[inline]
            fn rows(&self) -> usize
            {
                (**self).rows()
            }

            #[inline]
            fn cols(&self) -> usize
            {
                (**self).cols()
            }

            #[inline]
            unsafe fn coeff_unchecked(&self, row: usize, col: usize) -> E::Elem
            {
                (**self).coeff_unchecked(row, col)
            }
        }

        impl<'a, E> DirectAccess for $($ref_)* E
        where E: DirectAccess + ?Sized
        {
            #[inline]
            fn data_ptr(&self) -> *const E::Elem
            {
                (**self).data_ptr()
            }

            #[inline]
            fn row_stride(&self) -> isize
            {
                (**self).row_stride()
            }

            #[inline]
            fn col_stride(&self) -> isize
            {
                (**self).col_stride()
            }
        }
    };
}

forward_expr!(&'a);
forward_expr!(&'a mut);

impl<'a, E> DenseExprMut for &'a mut E
where E: DenseExprMut + ?Sized
{
    #[inline]
    unsafe fn set_coeff_unchecked(&mut self, row: usize, col: usize, value: E::Elem)
    {
        (**self).set_coeff_unchecked(row, col, value)
    }
}

impl<'a, E> DirectAccessMut for &'a mut E
where E: DirectAccessMut + ?Sized
{
    #[inline]
    fn data_mut_ptr(&mut self) -> *mut E::Elem
    {
        (**self).data_mut_ptr()
    }
}
