// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The reference-counted array handle that views bind to.

use alloc::vec::Vec;
use core::convert::TryFrom;
use core::fmt;
use core::ptr::NonNull;

use ndarray::{ArrayViewD, Dimension, IxDyn, Order, ShapeBuilder};
use num_traits::Zero;

use crate::array_core::Core;
use crate::data_traits::{ConstRepr, Data, DataMut, SharedRepr};
use crate::error::{from_kind, ErrorKind, ShapeError};
use crate::layout::{Layout, LayoutTraits};
use crate::view::DenseViewBase;

/// A reference-counted, strided `N`-dimensional array handle.
///
/// Cloning a handle is shallow: both handles share one buffer, and a write
/// through either one is visible through the other (there is no
/// copy-on-write). Use [`.deep()`](Self::deep) for an independent copy.
///
/// Handles are `!Send` and `!Sync`; the buffer is shared within one thread.
/// Elements are read and written by value through the safe API, so two
/// handles over the same elements never hold overlapping references.
///
/// The handle has two representations:
///
/// - [`SharedArray`]: writable.
/// - [`ConstArray`]: read-only; obtained with [`.into_const()`](Self::into_const).
pub struct SharedArrayBase<S, const N: usize>
where S: Data
{
    data: S,
    ptr: NonNull<S::Elem>,
    core: Core<N>,
}

/// Writable shared array handle.
pub type SharedArray<A, const N: usize> = SharedArrayBase<SharedRepr<A>, N>;

/// Read-only shared array handle.
pub type ConstArray<A, const N: usize> = SharedArrayBase<ConstRepr<A>, N>;

impl<S, const N: usize> Clone for SharedArrayBase<S, N>
where S: Data
{
    /// Share the buffer; O(1).
    fn clone(&self) -> Self
    {
        SharedArrayBase {
            data: S::_from_buffer(self.data._buffer().clone()),
            ptr: self.ptr,
            core: self.core,
        }
    }
}

fn size_of_shape_checked<const N: usize>(shape: &[usize; N]) -> Result<usize, ShapeError>
{
    let len = shape
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| from_kind(ErrorKind::Overflow))?;
    if len > isize::MAX as usize {
        return Err(from_kind(ErrorKind::Overflow));
    }
    Ok(len)
}

impl<A, S, const N: usize> SharedArrayBase<S, N>
where S: Data<Elem = A>
{
    fn from_vec_core(v: Vec<A>, offset: usize, core: Core<N>) -> Self
    {
        let data = S::_from_vec(v);
        let base = data._buffer().as_nonnull();
        debug_assert!(offset == 0 || offset < data._buffer().len());
        // an offset inside the buffer of a non-null pointer is non-null
        let ptr = unsafe { NonNull::new_unchecked(base.as_ptr().add(offset)) };
        SharedArrayBase { data, ptr, core }
    }

    /// Create a handle over `v`, laid out in memory in `order`.
    ///
    /// **Errors** if `v.len()` is not the number of elements of `shape`.
    ///
    /// ```
    /// use ndarray::Order;
    /// use ndarray_dense::SharedArray;
    ///
    /// let a = SharedArray::from_shape_vec([2, 3], Order::ColumnMajor, vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(a.strides(), [1, 2]);
    /// assert_eq!(a.get([0, 1]), Some(3));
    /// ```
    pub fn from_shape_vec(shape: [usize; N], order: Order, v: Vec<A>) -> Result<Self, ShapeError>
    {
        if size_of_shape_checked(&shape)? != v.len() {
            return Err(from_kind(ErrorKind::IncompatibleShape));
        }
        Ok(Self::from_vec_core(v, 0, Core::contiguous(shape, order)))
    }

    /// Create a handle by calling `f` with the index of every element.
    ///
    /// **Panics** if the number of elements overflows `isize`.
    pub fn from_shape_fn<F>(shape: [usize; N], order: Order, mut f: F) -> Self
    where F: FnMut([usize; N]) -> A
    {
        let len = match size_of_shape_checked(&shape) {
            Ok(len) => len,
            Err(_) => panic!("SharedArray::from_shape_fn: shape {:?} overflows isize", shape),
        };
        let mut v = Vec::with_capacity(len);
        if order.is_row_major() {
            Core::contiguous(shape, Order::RowMajor).for_each_index(|ix| v.push(f(ix)));
        } else {
            // row-major walk over the reversed shape is column-major over `shape`
            let mut reversed = shape;
            reversed.reverse();
            Core::contiguous(reversed, Order::RowMajor).for_each_index(|mut ix| {
                ix.reverse();
                v.push(f(ix))
            });
        }
        Self::from_vec_core(v, 0, Core::contiguous(shape, order))
    }

    /// Create a handle filled with clones of `elem`.
    ///
    /// **Panics** if the number of elements overflows `isize`.
    pub fn from_elem(shape: [usize; N], order: Order, elem: A) -> Self
    where A: Clone
    {
        let len = match size_of_shape_checked(&shape) {
            Ok(len) => len,
            Err(_) => panic!("SharedArray::from_elem: shape {:?} overflows isize", shape),
        };
        Self::from_vec_core(alloc::vec![elem; len], 0, Core::contiguous(shape, order))
    }

    /// Allocate a new zero-filled handle.
    ///
    /// **Panics** if the number of elements overflows `isize`.
    pub fn zeros(shape: [usize; N], order: Order) -> Self
    where A: Clone + Zero
    {
        Self::from_elem(shape, order, A::zero())
    }

    /// A handle with no elements, used by unbound views.
    pub(crate) fn empty() -> Self
    {
        Self::from_vec_core(Vec::new(), 0, Core::new([0; N], [0; N]))
    }

    /// Adopt the buffer of an owned `ndarray` array without copying it.
    ///
    /// **Errors** with `IncompatibleShape` if the array does not have `N`
    /// axes, and with `Unsupported` if it has negative strides.
    pub fn from_ndarray<D>(array: ndarray::Array<A, D>) -> Result<Self, ShapeError>
    where D: Dimension
    {
        if array.ndim() != N {
            return Err(from_kind(ErrorKind::IncompatibleShape));
        }
        let mut dim = [0; N];
        dim.copy_from_slice(array.shape());
        let mut strides = [0; N];
        strides.copy_from_slice(array.strides());
        if strides.iter().any(|&s| s < 0) {
            return Err(from_kind(ErrorKind::Unsupported));
        }
        let (v, offset) = array.into_raw_vec_and_offset();
        Ok(Self::from_vec_core(v, offset.unwrap_or(0), Core::new(dim, strides)))
    }

    /// The shape and strides of the handle.
    #[inline]
    pub fn core(&self) -> &Core<N>
    {
        &self.core
    }

    #[inline]
    pub fn shape(&self) -> [usize; N]
    {
        self.core.shape()
    }

    #[inline]
    pub fn strides(&self) -> [isize; N]
    {
        self.core.strides()
    }

    #[inline]
    pub fn len(&self) -> usize
    {
        self.core.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool
    {
        self.core.is_empty()
    }

    /// Pointer to the first element.
    #[inline]
    pub fn as_ptr(&self) -> *const A
    {
        self.ptr.as_ptr()
    }

    /// Pointer to the first element, for writing.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut A
    where S: DataMut
    {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn raw_ptr(&self) -> *mut A
    {
        self.ptr.as_ptr()
    }

    /// Number of handles (and views) sharing the buffer.
    pub fn ref_count(&self) -> usize
    {
        alloc::rc::Rc::strong_count(self.data._buffer())
    }

    /// Return true if `self` and `other` share one buffer.
    pub fn shares_buffer<S2, const M: usize>(&self, other: &SharedArrayBase<S2, M>) -> bool
    where S2: Data<Elem = A>
    {
        alloc::rc::Rc::ptr_eq(self.data._buffer(), other.data._buffer())
    }

    /// Return the element at `index`, or `None` if it is out of bounds.
    pub fn get(&self, index: [usize; N]) -> Option<A>
    where A: Copy
    {
        if !self.core.in_bounds(&index) {
            return None;
        }
        unsafe { Some(*self.raw_ptr().offset(self.core.offset(&index))) }
    }

    /// Write `value` at `index` and return the previous element, or `None`
    /// (writing nothing) if `index` is out of bounds.
    pub fn replace(&mut self, index: [usize; N], value: A) -> Option<A>
    where
        A: Copy,
        S: DataMut,
    {
        if !self.core.in_bounds(&index) {
            return None;
        }
        unsafe {
            let p = self.raw_ptr().offset(self.core.offset(&index));
            Some(core::ptr::replace(p, value))
        }
    }

    /// The elements in logical row-major order.
    pub fn to_vec(&self) -> Vec<A>
    where A: Copy
    {
        let mut v = Vec::with_capacity(self.len());
        let base = self.raw_ptr();
        self.core
            .for_each_index(|ix| v.push(unsafe { *base.offset(self.core.offset(&ix)) }));
        v
    }

    /// Return an independent, row-major copy of the elements.
    pub fn deep(&self) -> SharedArray<A, N>
    where A: Copy
    {
        self.deep_with_order(Order::RowMajor)
    }

    /// Return an independent copy of the elements, laid out in `order`.
    pub fn deep_with_order(&self, order: Order) -> SharedArray<A, N>
    where A: Copy
    {
        let base = self.raw_ptr();
        SharedArray::from_shape_fn(self.shape(), order, |ix| unsafe { *base.offset(self.core.offset(&ix)) })
    }

    /// Reverse the order of the axes (transpose); O(1), no copy.
    pub fn reversed_axes(mut self) -> Self
    {
        self.core = self.core.reversed();
        self
    }

    /// Keep every `step`-th element along `axis`; O(1), no copy.
    ///
    /// **Panics** if `axis` is out of bounds or `step` is zero.
    pub fn step_axis(mut self, axis: usize, step: usize) -> Self
    {
        ndassert!(axis < N, "step_axis: axis {} out of bounds for {} axes", axis, N);
        ndassert!(step > 0, "step_axis: step must be nonzero");
        self.core = self.core.stepped(axis, step);
        self
    }

    /// Bind a dense view to a shallow copy of this handle.
    ///
    /// **Panics** on the same conditions as [`DenseViewBase::new`]; see
    /// [`try_as_dense`](Self::try_as_dense) for the fallible version.
    ///
    /// ```
    /// use ndarray::Order;
    /// use ndarray_dense::{SharedArray, DYNAMIC};
    ///
    /// let a = SharedArray::from_shape_vec([2, 2], Order::ColumnMajor, vec![1, 3, 2, 4]).unwrap();
    /// let mut m = a.as_dense::<-2, DYNAMIC, DYNAMIC>();
    /// assert_eq!(m.col_stride(), 2);
    /// m.replace(1, 0, 30);
    /// assert_eq!(a.get([1, 0]), Some(30));
    /// ```
    pub fn as_dense<const C: i8, const ROWS: usize, const COLS: usize>(&self) -> DenseViewBase<S, N, C, ROWS, COLS>
    where Layout<N, C, ROWS, COLS>: LayoutTraits<N>
    {
        DenseViewBase::new(self.clone())
    }

    /// Bind a dense view to a shallow copy of this handle.
    ///
    /// **Errors** on the same conditions as [`DenseViewBase::try_new`].
    pub fn try_as_dense<const C: i8, const ROWS: usize, const COLS: usize>(
        &self,
    ) -> Result<DenseViewBase<S, N, C, ROWS, COLS>, ShapeError>
    where Layout<N, C, ROWS, COLS>: LayoutTraits<N>
    {
        DenseViewBase::try_new(self.clone())
    }

    /// Drop write access; the buffer stays shared.
    pub fn into_const(self) -> ConstArray<A, N>
    {
        SharedArrayBase {
            data: ConstRepr::_from_buffer(self.data._buffer().clone()),
            ptr: self.ptr,
            core: self.core,
        }
    }

    /// Return an `ndarray` view of the same elements; no copy.
    ///
    /// # Safety
    ///
    /// The view hands out references to the shared buffer. While it lives,
    /// no other handle or view over the same buffer may write to it.
    pub unsafe fn as_ndarray_view(&self) -> ArrayViewD<'_, A>
    {
        let mut strides = [0usize; N];
        for (s, &t) in strides.iter_mut().zip(&self.strides()) {
            // negative strides never enter a handle
            *s = t as usize;
        }
        ArrayViewD::from_shape_ptr(IxDyn(&self.shape()).strides(IxDyn(&strides)), self.as_ptr())
    }
}

impl<A, S, D, const N: usize> TryFrom<ndarray::Array<A, D>> for SharedArrayBase<S, N>
where
    S: Data<Elem = A>,
    D: Dimension,
{
    type Error = ShapeError;

    fn try_from(array: ndarray::Array<A, D>) -> Result<Self, ShapeError>
    {
        Self::from_ndarray(array)
    }
}

impl<A, S, S2, const N: usize> PartialEq<SharedArrayBase<S2, N>> for SharedArrayBase<S, N>
where
    A: Copy + PartialEq,
    S: Data<Elem = A>,
    S2: Data<Elem = A>,
{
    /// Element-wise comparison; the memory layout does not matter.
    fn eq(&self, rhs: &SharedArrayBase<S2, N>) -> bool
    {
        self.shape() == rhs.shape() && self.to_vec() == rhs.to_vec()
    }
}

impl<A, S, const N: usize> fmt::Debug for SharedArrayBase<S, N>
where
    A: Copy + fmt::Debug,
    S: Data<Elem = A>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(
            f,
            "{:?}, shape={:?}, strides={:?}, writable={}, refs={}",
            self.to_vec(),
            self.shape(),
            self.strides(),
            S::WRITABLE,
            self.ref_count()
        )
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::layout::DYNAMIC;
    use alloc::vec;

    #[test]
    fn shallow_clone_shares_writes()
    {
        let mut a = SharedArray::from_shape_vec([2, 2], Order::RowMajor, vec![1, 2, 3, 4]).unwrap();
        let b = a.clone();
        assert_eq!(a.ref_count(), 2);
        assert!(a.shares_buffer(&b));
        assert_eq!(a.replace([1, 0], 30), Some(3));
        assert_eq!(b.get([1, 0]), Some(30));
        drop(b);
        assert_eq!(a.ref_count(), 1);
    }

    #[test]
    fn deep_copy_is_independent()
    {
        let mut a = SharedArray::from_shape_fn([2, 3], Order::ColumnMajor, |[i, j]| 10 * i + j);
        let d = a.deep();
        assert!(!a.shares_buffer(&d));
        assert_eq!(d.strides(), [3, 1]);
        a.replace([0, 0], 99);
        assert_eq!(d.get([0, 0]), Some(0));
        assert_eq!(d.to_vec(), vec![0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn shape_mismatch_is_an_error()
    {
        let e = SharedArray::<i32, 2>::from_shape_vec([2, 2], Order::RowMajor, vec![1, 2, 3]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::IncompatibleShape);
    }

    #[test]
    fn zero_copy_restructuring()
    {
        let a = SharedArray::from_shape_fn([3, 4], Order::RowMajor, |[i, j]| (i, j));
        let t = a.clone().reversed_axes();
        assert_eq!(t.shape(), [4, 3]);
        assert_eq!(t.get([3, 1]), Some((1, 3)));
        let s = a.clone().step_axis(1, 2);
        assert_eq!(s.shape(), [3, 2]);
        assert_eq!(s.get([2, 1]), Some((2, 2)));
        assert_eq!(a.ref_count(), 3);
    }

    #[test]
    fn adopt_ndarray_buffer()
    {
        let arr = ndarray::Array::from_shape_vec((2, 3), vec![1., 2., 3., 4., 5., 6.]).unwrap();
        let ptr = arr.as_ptr();
        let a = SharedArray::<f64, 2>::from_ndarray(arr).unwrap();
        assert_eq!(a.as_ptr(), ptr);
        assert_eq!(a.get([1, 2]), Some(6.));

        let arr = ndarray::Array::from_shape_vec((2, 3), vec![0; 6]).unwrap();
        let e = SharedArray::<i32, 1>::from_ndarray(arr).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::IncompatibleShape);
    }

    #[test]
    fn dense_views_of_a_handle()
    {
        let a = SharedArray::from_shape_fn([3, 2], Order::RowMajor, |[i, j]| (10 * i + j) as i32);
        let m = a.as_dense::<2, 3, DYNAMIC>();
        assert_eq!((m.rows(), m.cols(), m.row_stride()), (3, 2, 2));
        assert_eq!(m.get(2, 1), Some(21));
        assert_eq!(a.ref_count(), 2);

        let e = a.try_as_dense::<-2, DYNAMIC, DYNAMIC>().unwrap_err();
        assert_eq!(e.kind(), ErrorKind::IncompatibleLayout);
        let e = a.try_as_dense::<0, 2, DYNAMIC>().unwrap_err();
        assert_eq!(e.kind(), ErrorKind::RowMismatch);

        let v = SharedArray::from_shape_vec([3], Order::RowMajor, vec![1, 2, 3]).unwrap();
        let col = v.as_dense::<1, DYNAMIC, 1>();
        assert_eq!((col.rows(), col.cols()), (3, 1));
    }

    #[test]
    fn ndarray_view_sees_same_elements()
    {
        let a = SharedArray::from_shape_fn([2, 3], Order::ColumnMajor, |[i, j]| i * 3 + j);
        let v = unsafe { a.as_ndarray_view() };
        assert_eq!(v.shape(), &[2, 3]);
        assert_eq!(v[[1, 2]], 5);
    }
}
