// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Evaluating an expression into a freshly allocated view.
//!
//! [`SelectView`] maps an expression type to the view type that best holds
//! its result: always a matrix view over a new two-dimensional array, packed
//! in the expression's storage order, with the compile-time shape carried
//! over where the expression type knows it. [`copy`] allocates that view and
//! evaluates the expression into it.
//!
//! A vector view becomes a one-column or one-row matrix, in row-major order
//! exactly when its layout has the row-major flag. The role must be readable
//! from the type, so vectors with a fixed column count other than one (a
//! fixed-length row vector) have no selected view.

use ndarray::{ArrayBase, Data as NdData, Ix2, Order};
use num_traits::Zero;

use crate::data_traits::Data;
use crate::expr::{DenseExpr, DenseExprMut, Product, Scaled, Transpose};
use crate::layout::{Layout, LayoutTraits, DYNAMIC};
use crate::linalg_traits::LinalgScalar;
use crate::shared_array::SharedArray;
use crate::view::{DenseView, DenseViewBase};

/// A view type that can allocate its own, zero-filled array.
pub trait AllocView: DenseExprMut + Sized
{
    /// Allocate a `rows × cols` view over a new array.
    ///
    /// **Panics** if the shape conflicts with a fixed compile-time size.
    fn allocate(rows: usize, cols: usize) -> Self;
}

impl<A, const C: i8, const ROWS: usize, const COLS: usize> AllocView for DenseView<A, 2, C, ROWS, COLS>
where
    A: Copy + Zero,
    Layout<2, C, ROWS, COLS>: LayoutTraits<2>,
{
    fn allocate(rows: usize, cols: usize) -> Self
    {
        let order = if C < 0 { Order::ColumnMajor } else { Order::RowMajor };
        DenseView::new(SharedArray::zeros([rows, cols], order))
    }
}

/// The view type that holds the evaluated result of an expression.
pub trait SelectView: DenseExpr
{
    type View: AllocView<Elem = Self::Elem>;
}

/// Transposition at the type level: the view that holds the transpose of
/// `Self`.
pub trait TransposeView: DenseExpr
{
    type Transposed: AllocView<Elem = Self::Elem>;
}

impl<A, const ROWS: usize, const COLS: usize> TransposeView for DenseView<A, 2, 2, ROWS, COLS>
where A: Copy + Zero
{
    type Transposed = DenseView<A, 2, -2, COLS, ROWS>;
}

impl<A, const ROWS: usize, const COLS: usize> TransposeView for DenseView<A, 2, -2, ROWS, COLS>
where A: Copy + Zero
{
    type Transposed = DenseView<A, 2, 2, COLS, ROWS>;
}

macro_rules! select_view {
    ($n:literal => $target:literal for $($c:literal),+) => {$(
        impl<A, S, const ROWS: usize, const COLS: usize> SelectView for DenseViewBase<S, { $n }, { $c }, ROWS, COLS>
        where
            A: Copy + Zero,
            S: Data<Elem = A>,
            Layout<{ $n }, { $c }, ROWS, COLS>: LayoutTraits<{ $n }>,
        {
            type View = DenseView<A, 2, { $target }, ROWS, COLS>;
        }
    )+};
}

select_view!(2 => 2 for 1, 2);
select_view!(2 => -2 for 0, -1, -2);

// Vectors are selected by their resolved role. A fixed single column makes a
// column vector, a single row of dynamic length a row vector; with both
// sizes dynamic a negative classification makes a row vector.
impl<A, S, const C: i8, const ROWS: usize> SelectView for DenseViewBase<S, 1, C, ROWS, 1>
where
    A: Copy + Zero,
    S: Data<Elem = A>,
    Layout<1, C, ROWS, 1>: LayoutTraits<1>,
{
    type View = DenseView<A, 2, -2, ROWS, 1>;
}

impl<A, S, const C: i8> SelectView for DenseViewBase<S, 1, C, 1, DYNAMIC>
where
    A: Copy + Zero,
    S: Data<Elem = A>,
    Layout<1, C, 1, DYNAMIC>: LayoutTraits<1>,
{
    type View = DenseView<A, 2, 2, 1, DYNAMIC>;
}

impl<A, S> SelectView for DenseViewBase<S, 1, -1, DYNAMIC, DYNAMIC>
where
    A: Copy + Zero,
    S: Data<Elem = A>,
{
    type View = DenseView<A, 2, 2, 1, DYNAMIC>;
}

macro_rules! select_column_vector {
    ($($c:literal),+) => {$(
        impl<A, S> SelectView for DenseViewBase<S, 1, { $c }, DYNAMIC, DYNAMIC>
        where
            A: Copy + Zero,
            S: Data<Elem = A>,
        {
            type View = DenseView<A, 2, -2, DYNAMIC, 1>;
        }
    )+};
}

select_column_vector!(0, 1);

impl<A, S> SelectView for ArrayBase<S, Ix2>
where
    A: Copy + Zero,
    S: NdData<Elem = A>,
{
    type View = DenseView<A, 2, 2, DYNAMIC, DYNAMIC>;
}

impl<'a, E> SelectView for &'a E
where E: SelectView
{
    type View = E::View;
}

impl<E> SelectView for Scaled<E>
where
    E: SelectView,
    E::Elem: LinalgScalar,
{
    type View = E::View;
}

impl<E> SelectView for Transpose<E>
where
    E: SelectView,
    E::View: TransposeView,
{
    type View = <E::View as TransposeView>::Transposed;
}

impl<L, R> SelectView for Product<L, R>
where
    L: DenseExpr,
    R: DenseExpr<Elem = L::Elem, StorageKind = L::StorageKind>,
    L::Elem: LinalgScalar,
{
    type View = DenseView<L::Elem, 2, -2, DYNAMIC, DYNAMIC>;
}

/// Evaluate `expr` into a new array and return the view over it.
///
/// The result never shares memory with the operands of `expr`.
///
/// ```
/// use ndarray::Order;
/// use ndarray_dense::{copy, DenseExpr, MatrixView, SharedArray};
///
/// let a = MatrixView::<i32, 2>::new(SharedArray::from_shape_vec([2, 3], Order::RowMajor, vec![1, 2, 3, 4, 5, 6]).unwrap());
/// let t = copy((&a).transposed());
/// assert_eq!((t.rows(), t.cols()), (3, 2));
/// assert_eq!(t.col_stride(), 3);
/// assert_eq!(t.to_vec(), [1, 4, 2, 5, 3, 6]);
/// ```
pub fn copy<E>(expr: E) -> E::View
where E: SelectView
{
    let mut view = E::View::allocate(expr.rows(), expr.cols());
    view.assign_expr(&expr);
    view
}
