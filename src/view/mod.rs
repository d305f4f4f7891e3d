// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Dense vector and matrix views over shared array handles.

use core::fmt;

use ndarray::Order;
use rawpointer::PointerExt;

use crate::array_core::Core;
use crate::data_traits::{ConstRepr, Data, DataMut, SharedRepr};
use crate::error::{from_kind, ErrorKind, ShapeError};
use crate::expr::{size_matches, Dense, DenseExpr, DenseExprMut, DirectAccess, DirectAccessMut};
use crate::layout::{Flags, Layout, LayoutTraits, DYNAMIC};
use crate::shared_array::{SharedArray, SharedArrayBase};

mod foreign;
mod packet;

pub use self::packet::{Aligned, PacketMode, Unaligned};

/// Whether a view has been bound to an array yet.
///
/// See [`DenseViewBase::assign`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Binding
{
    /// Default-constructed; the next assignment shares the source's buffer.
    Unbound,
    /// Bound to an array; assignment copies elements.
    Bound,
}

/// A dense vector or matrix view of an `N`-dimensional array handle.
///
/// The const parameters select the layout (see [`LayoutTraits`]):
///
/// - `N`: dimensionality of the array (1 or 2).
/// - `C`: contiguity classification the array is required to have; `0` for
///   arbitrary strides, positive for row-major, negative for column-major
///   contiguity of the `|C|` innermost axes.
/// - `ROWS`, `COLS`: compile-time shape, or [`DYNAMIC`].
///
/// The view holds one share of the array's buffer and never copies it.
/// Writes through the view are seen by every other handle or view of the
/// same buffer.
///
/// ```
/// use ndarray::Order;
/// use ndarray_dense::{MatrixView, SharedArray};
///
/// let a = SharedArray::from_shape_vec([2, 3], Order::RowMajor, vec![1, 2, 3, 4, 5, 6]).unwrap();
/// let mut v = MatrixView::<i32, 2>::new(a.clone());
/// assert_eq!((v.rows(), v.cols()), (2, 3));
/// assert_eq!((v.row_stride(), v.col_stride()), (3, 1));
///
/// v.replace(1, 2, 60);
/// assert_eq!(a.get([1, 2]), Some(60));
/// ```
pub struct DenseViewBase<S, const N: usize, const C: i8, const ROWS: usize, const COLS: usize>
where S: Data
{
    array: SharedArrayBase<S, N>,
    binding: Binding,
}

/// Writable dense view.
pub type DenseView<A, const N: usize, const C: i8, const ROWS: usize, const COLS: usize> =
    DenseViewBase<SharedRepr<A>, N, C, ROWS, COLS>;

/// Read-only dense view.
pub type ConstDenseView<A, const N: usize, const C: i8, const ROWS: usize, const COLS: usize> =
    DenseViewBase<ConstRepr<A>, N, C, ROWS, COLS>;

/// Writable view of a two-dimensional array as a matrix of any size.
pub type MatrixView<A, const C: i8> = DenseView<A, 2, C, DYNAMIC, DYNAMIC>;

/// Writable view of a one-dimensional array as a column vector.
pub type ColVectorView<A, const C: i8> = DenseView<A, 1, C, DYNAMIC, 1>;

/// Writable view of a one-dimensional array as a row vector.
pub type RowVectorView<A, const C: i8> = DenseView<A, 1, C, 1, DYNAMIC>;

impl<S, const N: usize, const C: i8, const ROWS: usize, const COLS: usize> Clone
    for DenseViewBase<S, N, C, ROWS, COLS>
where S: Data
{
    /// Share the buffer; O(1).
    fn clone(&self) -> Self
    {
        DenseViewBase {
            array: self.array.clone(),
            binding: self.binding,
        }
    }
}

impl<S, const N: usize, const C: i8, const ROWS: usize, const COLS: usize> Default
    for DenseViewBase<S, N, C, ROWS, COLS>
where S: Data
{
    /// An unbound view with no elements.
    fn default() -> Self
    {
        DenseViewBase {
            array: SharedArrayBase::empty(),
            binding: Binding::Unbound,
        }
    }
}

impl<A, S, const N: usize, const C: i8, const ROWS: usize, const COLS: usize> DenseViewBase<S, N, C, ROWS, COLS>
where
    S: Data<Elem = A>,
    Layout<N, C, ROWS, COLS>: LayoutTraits<N>,
{
    /// Bind a view to `array`.
    ///
    /// **Panics** if the array's shape conflicts with a fixed `ROWS` or
    /// `COLS`, or if the array does not have contiguity `C`.
    ///
    /// A vector type whose fixed shape contradicts its role is rejected at
    /// compile time; this row vector (negative `C`) may not have three rows:
    ///
    /// ```compile_fail
    /// use ndarray::Order;
    /// use ndarray_dense::{DenseView, SharedArray, DYNAMIC};
    ///
    /// let v = DenseView::<f64, 1, -1, 3, DYNAMIC>::new(SharedArray::zeros([3], Order::RowMajor));
    /// ```
    pub fn new(array: SharedArrayBase<S, N>) -> Self
    {
        match Self::try_new(array) {
            Ok(view) => view,
            Err(e) => panic!("DenseView::new: {}", e),
        }
    }

    /// Bind a view to `array`.
    ///
    /// **Errors** with `RowMismatch` or `ColumnMismatch` if the array's
    /// shape conflicts with a fixed `ROWS` or `COLS`, and with
    /// `IncompatibleLayout` if the array does not have contiguity `C`.
    pub fn try_new(array: SharedArrayBase<S, N>) -> Result<Self, ShapeError>
    {
        Self::validate(array.core())?;
        Ok(DenseViewBase {
            array,
            binding: Binding::Bound,
        })
    }

    fn validate(core: &Core<N>) -> Result<(), ShapeError>
    {
        let () = <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::SHAPE_CHECK;
        if !size_matches(ROWS, <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::rows(core)) {
            return Err(from_kind(ErrorKind::RowMismatch));
        }
        if !size_matches(COLS, <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::cols(core)) {
            return Err(from_kind(ErrorKind::ColumnMismatch));
        }
        // magnitude 2 asks for the whole matrix packed, which `satisfies`
        // checks directly
        if !core.satisfies(C) {
            return Err(from_kind(ErrorKind::IncompatibleLayout));
        }
        Ok(())
    }

    /// Rebind the view to `array`, validating it like [`new`](Self::new).
    ///
    /// **Panics** on the same conditions as `new`.
    pub fn reset(&mut self, array: SharedArrayBase<S, N>)
    {
        if let Err(e) = self.try_reset(array) {
            panic!("DenseView::reset: {}", e);
        }
    }

    /// Rebind the view to `array`; on error the view is left unchanged.
    pub fn try_reset(&mut self, array: SharedArrayBase<S, N>) -> Result<(), ShapeError>
    {
        Self::validate(array.core())?;
        self.array = array;
        self.binding = Binding::Bound;
        Ok(())
    }

    #[inline]
    pub fn binding(&self) -> Binding
    {
        self.binding
    }

    #[inline]
    pub fn is_bound(&self) -> bool
    {
        self.binding == Binding::Bound
    }

    /// The shape and strides of the underlying array.
    #[inline]
    pub fn core(&self) -> &Core<N>
    {
        self.array.core()
    }

    #[inline]
    pub fn rows(&self) -> usize
    {
        <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::rows(self.core())
    }

    #[inline]
    pub fn cols(&self) -> usize
    {
        <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::cols(self.core())
    }

    /// Number of coefficients.
    #[inline]
    pub fn len(&self) -> usize
    {
        self.array.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool
    {
        self.array.is_empty()
    }

    /// Distance between rows, in elements.
    #[inline]
    pub fn row_stride(&self) -> isize
    {
        <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::row_stride(self.core())
    }

    /// Distance between columns, in elements.
    #[inline]
    pub fn col_stride(&self) -> isize
    {
        <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::col_stride(self.core())
    }

    /// Distance between consecutive coefficients of the storage order.
    #[inline]
    pub fn inner_stride(&self) -> isize
    {
        <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::inner_stride(self.core())
    }

    /// Distance between consecutive inner runs.
    #[inline]
    pub fn outer_stride(&self) -> isize
    {
        <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::outer_stride(self.core())
    }

    #[inline]
    fn ptr_at(&self, row: usize, col: usize) -> *mut A
    {
        unsafe {
            self.array
                .raw_ptr()
                .stride_offset(self.row_stride(), row)
                .stride_offset(self.col_stride(), col)
        }
    }

    #[inline]
    fn ptr_at_linear(&self, index: usize) -> *mut A
    {
        let () = <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::VECTOR_CHECK;
        unsafe { self.array.raw_ptr().stride_offset(self.inner_stride(), index) }
    }

    /// Read the coefficient at `(row, col)`.
    ///
    /// # Safety
    ///
    /// `row < self.rows()` and `col < self.cols()`.
    #[inline]
    pub unsafe fn uget(&self, row: usize, col: usize) -> A
    where A: Copy
    {
        *self.ptr_at(row, col)
    }

    /// Read coefficient `index` of a vector.
    ///
    /// Linear access is for vector layouts only:
    ///
    /// ```compile_fail
    /// use ndarray::Order;
    /// use ndarray_dense::{MatrixView, SharedArray};
    ///
    /// let m = MatrixView::<f64, 2>::new(SharedArray::zeros([2, 2], Order::RowMajor));
    /// let _ = unsafe { m.uget_linear(1) };
    /// ```
    ///
    /// # Safety
    ///
    /// `index < self.len()`.
    #[inline]
    pub unsafe fn uget_linear(&self, index: usize) -> A
    where A: Copy
    {
        *self.ptr_at_linear(index)
    }

    /// Read the coefficient at `(row, col)`, or `None` if it is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<A>
    where A: Copy
    {
        if row < self.rows() && col < self.cols() {
            unsafe { Some(self.uget(row, col)) }
        } else {
            None
        }
    }

    /// Read coefficient `index` of a vector, or `None` if it is out of bounds.
    pub fn get_linear(&self, index: usize) -> Option<A>
    where A: Copy
    {
        if index < self.len() {
            unsafe { Some(self.uget_linear(index)) }
        } else {
            None
        }
    }

    /// Return a handle sharing the view's array; O(1).
    pub fn shallow(&self) -> SharedArrayBase<S, N>
    {
        self.array.clone()
    }

    /// Unwrap the view into its array handle.
    pub fn into_shallow(self) -> SharedArrayBase<S, N>
    {
        self.array
    }

    /// Return an independent copy of the elements, laid out in the view's
    /// storage order.
    pub fn deep(&self) -> SharedArray<A, N>
    where A: Copy
    {
        let order = if C < 0 { Order::ColumnMajor } else { Order::RowMajor };
        self.array.deep_with_order(order)
    }

    /// The coefficients in row-major order.
    pub fn to_vec(&self) -> alloc::vec::Vec<A>
    where A: Copy
    {
        let (rows, cols) = (self.rows(), self.cols());
        let mut v = alloc::vec::Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                v.push(unsafe { self.uget(r, c) });
            }
        }
        v
    }
}

impl<A, S, const N: usize, const C: i8, const ROWS: usize, const COLS: usize> DenseViewBase<S, N, C, ROWS, COLS>
where
    S: DataMut<Elem = A>,
    Layout<N, C, ROWS, COLS>: LayoutTraits<N>,
{
    /// Write the coefficient at `(row, col)`.
    ///
    /// Read-only views have no write access:
    ///
    /// ```compile_fail
    /// use ndarray::Order;
    /// use ndarray_dense::{ConstDenseView, SharedArray, DYNAMIC};
    ///
    /// let a = SharedArray::<f64, 2>::zeros([2, 2], Order::RowMajor).into_const();
    /// let mut v = ConstDenseView::<f64, 2, 2, DYNAMIC, DYNAMIC>::new(a);
    /// unsafe { v.uset(0, 0, 1.) };
    /// ```
    ///
    /// # Safety
    ///
    /// `row < self.rows()` and `col < self.cols()`.
    #[inline]
    pub unsafe fn uset(&mut self, row: usize, col: usize, value: A)
    {
        *self.ptr_at(row, col) = value;
    }

    /// Return a mutable reference to the coefficient at `(row, col)`.
    ///
    /// # Safety
    ///
    /// `row < self.rows()` and `col < self.cols()`, and no other handle or
    /// view may access the element while the reference lives.
    #[inline]
    pub unsafe fn uget_mut(&mut self, row: usize, col: usize) -> &mut A
    {
        &mut *self.ptr_at(row, col)
    }

    /// Write coefficient `index` of a vector.
    ///
    /// # Safety
    ///
    /// `index < self.len()`.
    #[inline]
    pub unsafe fn uset_linear(&mut self, index: usize, value: A)
    {
        *self.ptr_at_linear(index) = value;
    }

    /// Write `value` at `(row, col)` and return the previous coefficient, or
    /// `None` (writing nothing) if it is out of bounds.
    pub fn replace(&mut self, row: usize, col: usize, value: A) -> Option<A>
    where A: Copy
    {
        if row < self.rows() && col < self.cols() {
            unsafe { Some(core::ptr::replace(self.ptr_at(row, col), value)) }
        } else {
            None
        }
    }

    /// Set every coefficient to `value`.
    pub fn fill(&mut self, value: A)
    where A: Copy
    {
        let (rows, cols) = (self.rows(), self.cols());
        for r in 0..rows {
            for c in 0..cols {
                unsafe { self.uset(r, c, value) }
            }
        }
    }

    /// Assign `other` to `self`.
    ///
    /// The first assignment into an unbound (default-constructed) view
    /// shares `other`'s buffer and binds the view; assigning another unbound
    /// view leaves it unbound. Every assignment into a
    /// bound view copies the coefficients of `other`, keeping the current
    /// buffer.
    ///
    /// **Panics** if `self` is bound and the shapes differ.
    ///
    /// ```
    /// use ndarray::Order;
    /// use ndarray_dense::{MatrixView, SharedArray};
    ///
    /// let a = MatrixView::<f64, 0>::new(SharedArray::zeros([2, 2], Order::RowMajor));
    /// let mut v = MatrixView::<f64, 0>::default();
    /// v.assign(&a);
    /// assert!(v.is_bound());
    /// assert!(v.shallow().shares_buffer(&a.shallow()));
    ///
    /// let mut w = MatrixView::<f64, 0>::new(SharedArray::zeros([2, 2], Order::RowMajor));
    /// w.assign(&a);
    /// assert!(!w.shallow().shares_buffer(&a.shallow()));
    /// ```
    pub fn assign(&mut self, other: &Self)
    where A: Copy
    {
        match self.binding {
            Binding::Unbound => {
                // sharing an unbound view's empty array binds nothing
                self.array = other.array.clone();
                self.binding = other.binding;
            }
            Binding::Bound => self.assign_expr(other),
        }
    }
}

impl<A, S, const N: usize, const C: i8, const ROWS: usize, const COLS: usize> DenseExpr
    for DenseViewBase<S, N, C, ROWS, COLS>
where
    A: Copy,
    S: Data<Elem = A>,
    Layout<N, C, ROWS, COLS>: LayoutTraits<N>,
{
    type Elem = A;
    type StorageKind = Dense;
    const ROWS_AT_COMPILE_TIME: usize = <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::ROWS_AT_COMPILE_TIME;
    const COLS_AT_COMPILE_TIME: usize = <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::COLS_AT_COMPILE_TIME;
    const FLAGS: Flags = {
        let f = <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::FLAGS.also(Flags::DIRECT_ACCESS);
        if S::WRITABLE {
            f.also(Flags::LVALUE)
        } else {
            f
        }
    };

    #[inline]
    fn rows(&self) -> usize
    {
        DenseViewBase::rows(self)
    }

    #[inline]
    fn cols(&self) -> usize
    {
        DenseViewBase::cols(self)
    }

    #[inline]
    unsafe fn coeff_unchecked(&self, row: usize, col: usize) -> A
    {
        self.uget(row, col)
    }
}

impl<A, S, const N: usize, const C: i8, const ROWS: usize, const COLS: usize> DenseExprMut
    for DenseViewBase<S, N, C, ROWS, COLS>
where
    A: Copy,
    S: DataMut<Elem = A>,
    Layout<N, C, ROWS, COLS>: LayoutTraits<N>,
{
    #[inline]
    unsafe fn set_coeff_unchecked(&mut self, row: usize, col: usize, value: A)
    {
        self.uset(row, col, value)
    }
}

impl<A, S, const N: usize, const C: i8, const ROWS: usize, const COLS: usize> DirectAccess
    for DenseViewBase<S, N, C, ROWS, COLS>
where
    A: Copy,
    S: Data<Elem = A>,
    Layout<N, C, ROWS, COLS>: LayoutTraits<N>,
{
    #[inline]
    fn data_ptr(&self) -> *const A
    {
        self.array.as_ptr()
    }

    #[inline]
    fn row_stride(&self) -> isize
    {
        DenseViewBase::row_stride(self)
    }

    #[inline]
    fn col_stride(&self) -> isize
    {
        DenseViewBase::col_stride(self)
    }
}

impl<A, S, const N: usize, const C: i8, const ROWS: usize, const COLS: usize> DirectAccessMut
    for DenseViewBase<S, N, C, ROWS, COLS>
where
    A: Copy,
    S: DataMut<Elem = A>,
    Layout<N, C, ROWS, COLS>: LayoutTraits<N>,
{
    #[inline]
    fn data_mut_ptr(&mut self) -> *mut A
    {
        self.array.as_mut_ptr()
    }
}

impl<A, S, S2, const N: usize, const C: i8, const ROWS: usize, const COLS: usize, const N2: usize, const C2: i8, const ROWS2: usize, const COLS2: usize>
    PartialEq<DenseViewBase<S2, N2, C2, ROWS2, COLS2>> for DenseViewBase<S, N, C, ROWS, COLS>
where
    A: Copy + PartialEq,
    S: Data<Elem = A>,
    S2: Data<Elem = A>,
    Layout<N, C, ROWS, COLS>: LayoutTraits<N>,
    Layout<N2, C2, ROWS2, COLS2>: LayoutTraits<N2>,
{
    /// Coefficient-wise comparison; layouts may differ.
    fn eq(&self, rhs: &DenseViewBase<S2, N2, C2, ROWS2, COLS2>) -> bool
    {
        self.rows() == rhs.rows() && self.cols() == rhs.cols() && self.to_vec() == rhs.to_vec()
    }
}

impl<A, S, const N: usize, const C: i8, const ROWS: usize, const COLS: usize> fmt::Debug
    for DenseViewBase<S, N, C, ROWS, COLS>
where
    A: Copy + fmt::Debug,
    S: Data<Elem = A>,
    Layout<N, C, ROWS, COLS>: LayoutTraits<N>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("DenseView")
            .field("rows", &self.rows())
            .field("cols", &self.cols())
            .field("row_stride", &self.row_stride())
            .field("col_stride", &self.col_stride())
            .field("flags", &<Self as DenseExpr>::FLAGS)
            .field("binding", &self.binding)
            .field("data", &self.to_vec())
            .finish()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use alloc::vec;

    fn iota(shape: [usize; 2], order: Order) -> SharedArray<i32, 2>
    {
        SharedArray::from_shape_fn(shape, order, |[r, c]| (10 * r + c) as i32)
    }

    #[test]
    fn fixed_shape_mismatch()
    {
        let a = iota([2, 3], Order::RowMajor);
        let e = DenseView::<i32, 2, 0, 3, DYNAMIC>::try_new(a.clone()).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::RowMismatch);
        let e = DenseView::<i32, 2, 0, 2, 4>::try_new(a.clone()).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::ColumnMismatch);
        assert!(DenseView::<i32, 2, 0, 2, 3>::try_new(a).is_ok());
    }

    #[test]
    #[should_panic]
    fn new_panics_on_mismatch()
    {
        DenseView::<i32, 2, 0, 3, DYNAMIC>::new(iota([2, 3], Order::RowMajor));
    }

    #[test]
    fn contiguity_is_checked()
    {
        let f = iota([2, 3], Order::ColumnMajor);
        let e = MatrixView::<i32, 1>::try_new(f.clone()).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::IncompatibleLayout);
        assert!(MatrixView::<i32, -2>::try_new(f.clone()).is_ok());

        // every other row: rows are packed, the matrix is not
        let s = iota([4, 3], Order::RowMajor).step_axis(0, 2);
        assert!(MatrixView::<i32, 1>::try_new(s.clone()).is_ok());
        assert_eq!(
            MatrixView::<i32, 2>::try_new(s).unwrap_err().kind(),
            ErrorKind::IncompatibleLayout
        );
    }

    #[test]
    fn reset_failure_keeps_binding()
    {
        let mut v = DenseView::<i32, 2, 0, 2, DYNAMIC>::new(iota([2, 3], Order::RowMajor));
        assert!(v.try_reset(iota([3, 3], Order::RowMajor)).is_err());
        assert_eq!((v.rows(), v.cols()), (2, 3));
        v.reset(iota([2, 5], Order::RowMajor));
        assert_eq!(v.cols(), 5);
    }

    #[test]
    fn unbound_into_unbound_stays_unbound()
    {
        let src = MatrixView::<i32, 0>::new(iota([2, 2], Order::RowMajor));
        let mut v = MatrixView::<i32, 0>::default();
        v.assign(&MatrixView::default());
        assert_eq!(v.binding(), Binding::Unbound);
        v.assign(&src);
        assert!(v.is_bound());
        assert!(v.shallow().shares_buffer(&src.shallow()));

        let mut fixed = DenseView::<i32, 2, 0, 2, 2>::default();
        fixed.assign(&DenseView::default());
        fixed.assign(&DenseView::new(iota([2, 2], Order::ColumnMajor)));
        assert_eq!(fixed.get(1, 0), Some(10));
    }

    #[test]
    fn transposed_handle()
    {
        let a = iota([3, 4], Order::RowMajor).reversed_axes();
        let t = MatrixView::<i32, 0>::new(a);
        assert_eq!((t.rows(), t.cols()), (4, 3));
        assert_eq!(t.get(1, 2), Some(21));
        assert_eq!((t.row_stride(), t.col_stride()), (1, 4));
    }

    #[test]
    fn default_is_unbound()
    {
        let v = ColVectorView::<i32, 0>::default();
        assert!(!v.is_bound());
        assert_eq!(v.binding(), Binding::Unbound);
        assert_eq!(v.len(), 0);
        assert_eq!(v.get(0, 0), None);
    }

    #[test]
    fn linear_access()
    {
        let a = SharedArray::from_shape_vec([6], Order::RowMajor, vec![0, 1, 2, 3, 4, 5]).unwrap();
        let v = ColVectorView::<i32, 0>::new(a.clone().step_axis(0, 2));
        assert_eq!((v.rows(), v.cols()), (3, 1));
        assert_eq!(v.inner_stride(), 2);
        assert_eq!(v.get_linear(2), Some(4));
        assert_eq!(v.get_linear(3), None);

        let mut r = RowVectorView::<i32, 1>::new(a.clone());
        assert_eq!((r.rows(), r.cols()), (1, 6));
        unsafe { r.uset_linear(5, 50) };
        assert_eq!(a.get([5]), Some(50));
        assert_eq!(r.get(0, 5), Some(50));
        assert_eq!(r.get(1, 0), None);
    }

    #[test]
    fn flags_of_views()
    {
        assert!(<MatrixView<f32, 2> as DenseExpr>::FLAGS.is(Flags::LVALUE.also(Flags::DIRECT_ACCESS)));
        assert!(!<ConstDenseView<f32, 2, 2, DYNAMIC, DYNAMIC> as DenseExpr>::FLAGS.is(Flags::LVALUE));
        assert_eq!(<MatrixView<f32, -1> as DenseExpr>::PACKET_LANES, 4);
        assert_eq!(<MatrixView<f32, 0> as DenseExpr>::PACKET_LANES, 1);
    }

    #[test]
    fn debug_output()
    {
        let v = MatrixView::<i32, 0>::new(iota([1, 2], Order::RowMajor));
        let s = alloc::format!("{:?}", v);
        assert!(s.starts_with("DenseView { rows: 1, cols: 2"), "{}", s);
        assert!(s.contains("data: [0, 1]"), "{}", s);
    }
}
