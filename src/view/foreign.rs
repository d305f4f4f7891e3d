// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Conversion between views and `ndarray` arrays of any dimensionality.
//!
//! An incoming array is adapted to the view type in three steps. First,
//! axes of length one are removed or inserted until it has the view's
//! dimensionality. Next, its sizes are checked against the fixed
//! compile-time shape. Last, its buffer is adopted without copying, or
//! copied into a packed array when its strides do not have the required
//! contiguity. Nothing is bound if any step fails.

use ndarray::{Array, ArrayBase, ArrayD, ArrayViewD, Axis, Dimension, IxDyn, Order};

use crate::array_core::Core;
use crate::data_traits::Data;
use crate::error::ConversionError;
use crate::layout::{Layout, LayoutTraits, DYNAMIC};
use crate::shared_array::SharedArrayBase;
use crate::view::{Binding, DenseViewBase};

/// Remove every axis of length one.
fn squeeze<S>(mut array: ArrayBase<S, IxDyn>) -> ArrayBase<S, IxDyn>
where S: ndarray::Data
{
    for ax in (0..array.ndim()).rev() {
        if array.len_of(Axis(ax)) == 1 {
            array = array.remove_axis(Axis(ax));
        }
    }
    array
}

/// Give `array` exactly `n` axes by removing or inserting axes of length
/// one.
///
/// A matrix with a fixed single row (or column) gets its unit axis back in
/// that position; a vector is squeezed; anything else must already have `n`
/// axes.
fn conform_axes<A>(array: ArrayD<A>, n: usize, rows: usize, cols: usize) -> Result<ArrayD<A>, ConversionError>
{
    let array = if n == 2 && (rows == 1 || cols == 1) {
        let squeezed = squeeze(array);
        match squeezed.ndim() {
            0 => squeezed.insert_axis(Axis(0)).insert_axis(Axis(0)),
            1 if rows == 1 => squeezed.insert_axis(Axis(0)),
            1 => squeezed.insert_axis(Axis(1)),
            _ => squeezed,
        }
    } else if n == 1 {
        let squeezed = squeeze(array);
        if squeezed.ndim() == 0 {
            squeezed.insert_axis(Axis(0))
        } else {
            squeezed
        }
    } else {
        array
    };
    if array.ndim() != n {
        return Err(ConversionError::Dimensionality {
            expected: n,
            found: array.ndim(),
        });
    }
    Ok(array)
}

impl<A, S, const N: usize, const C: i8, const ROWS: usize, const COLS: usize> DenseViewBase<S, N, C, ROWS, COLS>
where
    A: Copy,
    S: Data<Elem = A>,
    Layout<N, C, ROWS, COLS>: LayoutTraits<N>,
{
    /// Adapt an `ndarray` array of any dimensionality into a view.
    ///
    /// The array's buffer is adopted without copying whenever its strides
    /// have the view's contiguity; otherwise the elements are copied into a
    /// packed array in the view's storage order.
    ///
    /// **Errors** if the array cannot be given the view's dimensionality by
    /// removing or inserting axes of length one, or if its sizes conflict
    /// with the fixed compile-time shape.
    ///
    /// ```
    /// use ndarray::array;
    /// use ndarray_dense::{DenseView, DYNAMIC};
    ///
    /// // a 1 × 3 × 1 array is a three-element column vector
    /// let a = array![[[1.], [2.], [3.]]];
    /// let v = DenseView::<f64, 1, 1, DYNAMIC, 1>::from_foreign(a).unwrap();
    /// assert_eq!((v.rows(), v.cols()), (3, 1));
    ///
    /// let e = DenseView::<f64, 1, 1, 4, 1>::from_foreign(array![1., 2., 3.]).unwrap_err();
    /// assert_eq!(e.to_string(), "incorrect number of elements for vector");
    /// ```
    pub fn from_foreign<D>(array: Array<A, D>) -> Result<Self, ConversionError>
    where D: Dimension
    {
        let () = <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::SHAPE_CHECK;
        let array = conform_axes(array.into_dyn(), N, ROWS, COLS)?;

        if N == 2 {
            let (rows, cols) = (array.len_of(Axis(0)), array.len_of(Axis(1)));
            if ROWS != DYNAMIC && rows != ROWS {
                return Err(ConversionError::IncorrectRows {
                    expected: ROWS,
                    found: rows,
                });
            }
            if COLS != DYNAMIC && cols != COLS {
                return Err(ConversionError::IncorrectColumns {
                    expected: COLS,
                    found: cols,
                });
            }
        } else {
            let rows = <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::ROWS_AT_COMPILE_TIME;
            let cols = <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::COLS_AT_COMPILE_TIME;
            if rows != DYNAMIC && cols != DYNAMIC && array.len() != rows * cols {
                return Err(ConversionError::IncorrectElements {
                    expected: rows * cols,
                    found: array.len(),
                });
            }
        }

        let mut dim = [0; N];
        dim.copy_from_slice(array.shape());
        let mut strides = [0; N];
        strides.copy_from_slice(array.strides());
        let packed = strides.iter().all(|&s| s >= 0) && Core::new(dim, strides).satisfies(C);
        let handle = if packed {
            let ndim = array.ndim();
            SharedArrayBase::from_ndarray(array)
                .map_err(|_| ConversionError::Dimensionality { expected: N, found: ndim })?
        } else {
            let order = if C < 0 { Order::ColumnMajor } else { Order::RowMajor };
            SharedArrayBase::from_shape_fn(dim, order, |ix| array[&ix[..]])
        };
        debug_assert!(Self::validate(handle.core()).is_ok());
        Ok(DenseViewBase {
            array: handle,
            binding: Binding::Bound,
        })
    }

    /// Copy the view's array into an owned `ndarray` array, with every axis
    /// of length one removed.
    pub fn to_foreign(&self) -> ArrayD<A>
    {
        // the copy is finished before anything else can write the buffer
        squeeze(unsafe { self.array.as_ndarray_view() }.to_owned())
    }

    /// Return an `ndarray` view of the view's array, with every axis of
    /// length one removed; no copy.
    ///
    /// # Safety
    ///
    /// While the returned view lives, no other handle or view over the same
    /// buffer may write to it.
    pub unsafe fn as_foreign_view(&self) -> ArrayViewD<'_, A>
    {
        squeeze(self.array.as_ndarray_view())
    }
}
