// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `ndarray` matrices as dense operands.

use ndarray::{ArrayBase, Data, DataMut, Ix2};

use crate::expr::{Dense, DenseExpr, DenseExprMut, DirectAccess, DirectAccessMut};
use crate::layout::{Flags, DYNAMIC};

/// `ndarray` arrays are row-major by default, so they are tagged as such.
/// Their real strides may be anything, including negative.
impl<A, S> DenseExpr for ArrayBase<S, Ix2>
where
    S: Data<Elem = A>,
    A: Copy,
{
    type Elem = A;
    type StorageKind = Dense;
    const ROWS_AT_COMPILE_TIME: usize = DYNAMIC;
    const COLS_AT_COMPILE_TIME: usize = DYNAMIC;
    const FLAGS: Flags = Flags::ROW_MAJOR.also(Flags::DIRECT_ACCESS);

    #[inline]
    fn rows(&self) -> usize
    {
        self.nrows()
    }

    #[inline]
    fn cols(&self) -> usize
    {
        self.ncols()
    }

    #[inline]
    unsafe fn coeff_unchecked(&self, row: usize, col: usize) -> A
    {
        *self.uget((row, col))
    }
}

impl<A, S> DenseExprMut for ArrayBase<S, Ix2>
where
    S: DataMut<Elem = A>,
    A: Copy,
{
    #[inline]
    unsafe fn set_coeff_unchecked(&mut self, row: usize, col: usize, value: A)
    {
        *self.uget_mut((row, col)) = value;
    }
}

impl<A, S> DirectAccess for ArrayBase<S, Ix2>
where
    S: Data<Elem = A>,
    A: Copy,
{
    #[inline]
    fn data_ptr(&self) -> *const A
    {
        self.as_ptr()
    }

    #[inline]
    fn row_stride(&self) -> isize
    {
        self.strides()[0]
    }

    #[inline]
    fn col_stride(&self) -> isize
    {
        self.strides()[1]
    }
}

impl<A, S> DirectAccessMut for ArrayBase<S, Ix2>
where
    S: DataMut<Elem = A>,
    A: Copy,
{
    #[inline]
    fn data_mut_ptr(&mut self) -> *mut A
    {
        self.as_mut_ptr()
    }
}
