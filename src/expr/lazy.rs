// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use num_traits::Zero;

use crate::error::{from_kind, ErrorKind, ShapeError};
use crate::expr::{DenseExpr, DenseExprMut, DirectAccess, DirectAccessMut};
use crate::layout::Flags;
use crate::linalg_traits::LinalgScalar;

/// Lazy transpose of an expression.
///
/// Coefficient `(r, c)` is coefficient `(c, r)` of the wrapped expression.
/// Direct access stays direct: the strides swap and the storage order flips.
#[derive(Clone, Debug)]
pub struct Transpose<E>
{
    expr: E,
}

impl<E> Transpose<E>
{
    pub fn new(expr: E) -> Self
    {
        Transpose { expr }
    }

    /// The expression that is transposed.
    pub fn inner(&self) -> &E
    {
        &self.expr
    }

    pub fn into_inner(self) -> E
    {
        self.expr
    }
}

impl<E> DenseExpr for Transpose<E>
where E: DenseExpr
{
    type Elem = E::Elem;
    type StorageKind = E::StorageKind;
    const ROWS_AT_COMPILE_TIME: usize = E::COLS_AT_COMPILE_TIME;
    const COLS_AT_COMPILE_TIME: usize = E::ROWS_AT_COMPILE_TIME;
    const FLAGS: Flags = E::FLAGS.transposed();

    #[inline]
    fn rows(&self) -> usize
    {
        self.expr.cols()
    }

    #[inline]
    fn cols(&self) -> usize
    {
        self.expr.rows()
    }

    #[inline]
    unsafe fn coeff_unchecked(&self, row: usize, col: usize) -> E::Elem
    {
        self.expr.coeff_unchecked(col, row)
    }
}

impl<E> DenseExprMut for Transpose<E>
where E: DenseExprMut
{
    #[inline]
    unsafe fn set_coeff_unchecked(&mut self, row: usize, col: usize, value: E::Elem)
    {
        self.expr.set_coeff_unchecked(col, row, value)
    }
}

impl<E> DirectAccess for Transpose<E>
where E: DirectAccess
{
    #[inline]
    fn data_ptr(&self) -> *const E::Elem
    {
        self.expr.data_ptr()
    }

    #[inline]
    fn row_stride(&self) -> isize
    {
        self.expr.col_stride()
    }

    #[inline]
    fn col_stride(&self) -> isize
    {
        self.expr.row_stride()
    }
}

impl<E> DirectAccessMut for Transpose<E>
where E: DirectAccessMut
{
    #[inline]
    fn data_mut_ptr(&mut self) -> *mut E::Elem
    {
        self.expr.data_mut_ptr()
    }
}

/// Lazy product of a scalar and an expression.
#[derive(Clone, Debug)]
pub struct Scaled<E>
where E: DenseExpr
{
    alpha: E::Elem,
    expr: E,
}

impl<E> Scaled<E>
where E: DenseExpr
{
    pub fn new(alpha: E::Elem, expr: E) -> Self
    {
        Scaled { alpha, expr }
    }

    pub fn alpha(&self) -> E::Elem
    {
        self.alpha
    }

    pub fn inner(&self) -> &E
    {
        &self.expr
    }
}

impl<E> DenseExpr for Scaled<E>
where
    E: DenseExpr,
    E::Elem: LinalgScalar,
{
    type Elem = E::Elem;
    type StorageKind = E::StorageKind;
    const ROWS_AT_COMPILE_TIME: usize = E::ROWS_AT_COMPILE_TIME;
    const COLS_AT_COMPILE_TIME: usize = E::COLS_AT_COMPILE_TIME;
    // values are computed, not stored
    const FLAGS: Flags = E::FLAGS.without(Flags::DIRECT_ACCESS.also(Flags::LVALUE));
    const PACKET_LANES: usize = E::PACKET_LANES;

    #[inline]
    fn rows(&self) -> usize
    {
        self.expr.rows()
    }

    #[inline]
    fn cols(&self) -> usize
    {
        self.expr.cols()
    }

    #[inline]
    unsafe fn coeff_unchecked(&self, row: usize, col: usize) -> E::Elem
    {
        self.alpha * self.expr.coeff_unchecked(row, col)
    }
}

/// Lazy matrix product `lhs × rhs`.
///
/// Each coefficient is an inner product computed on read. Evaluate the
/// product once with [`copy`](crate::copy), or use
/// [`general_mat_mul`](crate::linalg::general_mat_mul) when both operands
/// have direct access.
#[derive(Clone, Debug)]
pub struct Product<L, R>
{
    lhs: L,
    rhs: R,
}

impl<L, R> Product<L, R>
where
    L: DenseExpr,
    R: DenseExpr<Elem = L::Elem>,
{
    /// **Panics** if `lhs.cols() != rhs.rows()`.
    pub fn new(lhs: L, rhs: R) -> Self
    {
        match Self::try_new(lhs, rhs) {
            Ok(p) => p,
            Err(e) => panic!("Product::new: {}", e),
        }
    }

    /// **Errors** with `IncompatibleShape` if `lhs.cols() != rhs.rows()`.
    pub fn try_new(lhs: L, rhs: R) -> Result<Self, ShapeError>
    {
        if lhs.cols() != rhs.rows() {
            return Err(from_kind(ErrorKind::IncompatibleShape));
        }
        Ok(Product { lhs, rhs })
    }

    pub fn lhs(&self) -> &L
    {
        &self.lhs
    }

    pub fn rhs(&self) -> &R
    {
        &self.rhs
    }
}

impl<L, R> DenseExpr for Product<L, R>
where
    L: DenseExpr,
    R: DenseExpr<Elem = L::Elem, StorageKind = L::StorageKind>,
    L::Elem: LinalgScalar,
{
    type Elem = L::Elem;
    type StorageKind = L::StorageKind;
    const ROWS_AT_COMPILE_TIME: usize = L::ROWS_AT_COMPILE_TIME;
    const COLS_AT_COMPILE_TIME: usize = R::COLS_AT_COMPILE_TIME;
    const FLAGS: Flags = Flags::NONE;

    #[inline]
    fn rows(&self) -> usize
    {
        self.lhs.rows()
    }

    #[inline]
    fn cols(&self) -> usize
    {
        self.rhs.cols()
    }

    unsafe fn coeff_unchecked(&self, row: usize, col: usize) -> L::Elem
    {
        (0..self.lhs.cols()).fold(L::Elem::zero(), |acc, k| {
            acc + self.lhs.coeff_unchecked(row, k) * self.rhs.coeff_unchecked(k, col)
        })
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::{MatrixView, SharedArray};
    use alloc::vec;
    use ndarray::Order;

    fn matrix(rows: usize, cols: usize, order: Order) -> MatrixView<i32, 0>
    {
        MatrixView::new(SharedArray::from_shape_fn([rows, cols], order, |[r, c]| (10 * r + c) as i32))
    }

    #[test]
    fn transpose_swaps_everything()
    {
        let a = matrix(2, 3, Order::RowMajor);
        let t = Transpose::new(&a);
        assert_eq!((t.rows(), t.cols()), (3, 2));
        assert_eq!(t.coeff(2, 1), Some(12));
        assert_eq!(t.coeff(1, 2), None);
        assert_eq!((t.row_stride(), t.col_stride()), (1, 3));
        assert_eq!(<Transpose<&MatrixView<i32, 0>>>::FLAGS, MatrixView::<i32, 0>::FLAGS.transposed());
    }

    #[test]
    fn scaled_is_not_direct()
    {
        let a = matrix(2, 2, Order::ColumnMajor);
        let s = (&a).scaled(3);
        assert_eq!(s.coeff(1, 1), Some(33));
        assert!(!<Scaled<&MatrixView<i32, 0>>>::FLAGS.is(Flags::DIRECT_ACCESS));
    }

    #[test]
    fn product_coefficients()
    {
        let a = MatrixView::<i32, 2>::new(SharedArray::from_shape_vec([2, 3], Order::RowMajor, vec![1, 2, 3, 4, 5, 6]).unwrap());
        let b = MatrixView::<i32, 2>::new(SharedArray::from_shape_vec([3, 1], Order::RowMajor, vec![1, 0, -1]).unwrap());
        let p = Product::new(&a, &b);
        assert_eq!((p.rows(), p.cols()), (2, 1));
        assert_eq!(p.coeff(0, 0), Some(-2));
        assert_eq!(p.coeff(1, 0), Some(-2));
        assert!(Product::try_new(&b, &b).is_err());
    }
}
