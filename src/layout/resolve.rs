// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Compile-time layout resolution.
//!
//! The marker type [`Layout<N, C, ROWS, COLS>`](Layout) names an array of
//! dimensionality `N` with contiguity classification `C`, viewed with the
//! compile-time shape `ROWS × COLS`. Its [`LayoutTraits`] implementation
//! says how a dense consumer walks that memory: which strides are known at
//! compile time, whether the operand is a vector, and which capability
//! flags it carries.
//!
//! Only the supported combinations have an implementation:
//!
//! - `N = 1` with `C` in `{0, 1, -1}`
//! - `N = 2` with `C` in `{0, 1, 2, -1, -2}`
//!
//! Anything else fails to compile:
//!
//! ```compile_fail
//! use ndarray_dense::{Layout, LayoutTraits, DYNAMIC};
//!
//! let _ = <Layout<2, 3, DYNAMIC, DYNAMIC> as LayoutTraits<2>>::FLAGS;
//! ```
//!
//! A one-dimensional layout is a row vector if `ROWS == 1`, else a column
//! vector if `COLS == 1`, else a row vector for negative `C` and a column
//! vector otherwise. A fixed shape that contradicts the role (a row vector
//! with more than one row) is rejected when a view of it is used.

use crate::array_core::Core;
use crate::layout::Flags;

/// Rows or columns not known until run time.
pub const DYNAMIC: usize = usize::MAX;

/// Marker type naming an array layout; see [`LayoutTraits`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Layout<const N: usize, const C: i8, const ROWS: usize, const COLS: usize>;

/// Layout descriptor of a dense operand backed by an `N`-dimensional array.
///
/// The associated constants are the compile-time half of the descriptor;
/// the functions compute the runtime half from the array's [`Core`].
pub trait LayoutTraits<const N: usize>
{
    /// Distance between consecutive coefficients along the inner axis, if
    /// known at compile time.
    const INNER_STRIDE: Option<isize>;
    /// Distance between consecutive inner runs, if known at compile time.
    const OUTER_STRIDE: Option<isize>;
    const IS_VECTOR: bool;
    /// Row count at compile time, or [`DYNAMIC`].
    const ROWS_AT_COMPILE_TIME: usize;
    /// Column count at compile time, or [`DYNAMIC`].
    const COLS_AT_COMPILE_TIME: usize;
    const FLAGS: Flags;

    #[doc(hidden)]
    const SHAPE_CHECK: () = ();
    #[doc(hidden)]
    const VECTOR_CHECK: () = assert!(Self::IS_VECTOR, "linear access needs a one-dimensional layout");
    #[doc(hidden)]
    const PACKET_CHECK: () = assert!(
        Self::FLAGS.is(Flags::PACKET_ACCESS),
        "packet access needs a layout with a packed inner axis"
    );

    fn rows(core: &Core<N>) -> usize;
    fn cols(core: &Core<N>) -> usize;
    fn row_stride(core: &Core<N>) -> isize;
    fn col_stride(core: &Core<N>) -> isize;
    fn inner_stride(core: &Core<N>) -> isize;
    fn outer_stride(core: &Core<N>) -> isize;
}

/// Vector role of a one-dimensional layout.
const fn is_row_vector(c: i8, rows: usize, cols: usize) -> bool
{
    if rows == 1 {
        true
    } else if cols == 1 {
        false
    } else {
        c < 0
    }
}

const fn vector_shape_is_consistent(row: bool, rows: usize, cols: usize) -> bool
{
    if row {
        rows == 1 || rows == DYNAMIC
    } else {
        cols == 1 || cols == DYNAMIC
    }
}

macro_rules! impl_vector_layout {
    ($packed:literal => $($c:literal),+) => {$(
        impl<const ROWS: usize, const COLS: usize> LayoutTraits<1> for Layout<1, { $c }, ROWS, COLS>
        {
            const INNER_STRIDE: Option<isize> = if $packed { Some(1) } else { None };
            const OUTER_STRIDE: Option<isize> = None;
            const IS_VECTOR: bool = true;
            const ROWS_AT_COMPILE_TIME: usize = if is_row_vector($c, ROWS, COLS) { 1 } else { ROWS };
            const COLS_AT_COMPILE_TIME: usize = if is_row_vector($c, ROWS, COLS) { COLS } else { 1 };
            const FLAGS: Flags = {
                let f = if $packed {
                    Flags::LINEAR_ACCESS.also(Flags::PACKET_ACCESS)
                } else {
                    Flags::LINEAR_ACCESS
                };
                if is_row_vector($c, ROWS, COLS) {
                    f.also(Flags::ROW_MAJOR)
                } else {
                    f
                }
            };
            const SHAPE_CHECK: () = assert!(
                vector_shape_is_consistent(is_row_vector($c, ROWS, COLS), ROWS, COLS),
                "a vector layout needs ROWS == 1 (row vector) or COLS == 1 (column vector)"
            );

            #[inline(always)]
            fn rows(core: &Core<1>) -> usize
            {
                if is_row_vector($c, ROWS, COLS) { 1 } else { core.size(0) }
            }

            #[inline(always)]
            fn cols(core: &Core<1>) -> usize
            {
                if is_row_vector($c, ROWS, COLS) { core.size(0) } else { 1 }
            }

            #[inline(always)]
            fn row_stride(core: &Core<1>) -> isize
            {
                if is_row_vector($c, ROWS, COLS) {
                    Self::outer_stride(core)
                } else {
                    Self::inner_stride(core)
                }
            }

            #[inline(always)]
            fn col_stride(core: &Core<1>) -> isize
            {
                if is_row_vector($c, ROWS, COLS) {
                    Self::inner_stride(core)
                } else {
                    Self::outer_stride(core)
                }
            }

            #[inline(always)]
            fn inner_stride(core: &Core<1>) -> isize
            {
                if $packed { 1 } else { core.stride(0) }
            }

            #[inline(always)]
            fn outer_stride(core: &Core<1>) -> isize
            {
                core.size(0) as isize * Self::inner_stride(core)
            }
        }
    )+};
}

impl_vector_layout!(false => 0);
impl_vector_layout!(true => 1, -1);

macro_rules! impl_matrix_layout {
    (@inner strided, $core:ident) => { $core.stride(0) };
    (@inner $order:ident, $core:ident) => { 1 };
    (@outer strided, $core:ident) => { $core.stride(1) };
    (@outer row, $core:ident) => { $core.stride(0) };
    (@outer col, $core:ident) => { $core.stride(1) };
    (@row_stride col, $core:ident) => { 1 };
    (@row_stride $order:ident, $core:ident) => { $core.stride(0) };
    (@col_stride row, $core:ident) => { 1 };
    (@col_stride $order:ident, $core:ident) => { $core.stride(1) };
    ($order:ident, $inner:expr, $flags:expr => $($c:literal),+) => {$(
        #[allow(unused_variables)]
        impl<const ROWS: usize, const COLS: usize> LayoutTraits<2> for Layout<2, { $c }, ROWS, COLS>
        {
            const INNER_STRIDE: Option<isize> = $inner;
            const OUTER_STRIDE: Option<isize> = None;
            const IS_VECTOR: bool = false;
            const ROWS_AT_COMPILE_TIME: usize = ROWS;
            const COLS_AT_COMPILE_TIME: usize = COLS;
            const FLAGS: Flags = $flags;

            #[inline(always)]
            fn rows(core: &Core<2>) -> usize
            {
                core.size(0)
            }

            #[inline(always)]
            fn cols(core: &Core<2>) -> usize
            {
                core.size(1)
            }

            #[inline(always)]
            fn row_stride(core: &Core<2>) -> isize
            {
                impl_matrix_layout!(@row_stride $order, core)
            }

            #[inline(always)]
            fn col_stride(core: &Core<2>) -> isize
            {
                impl_matrix_layout!(@col_stride $order, core)
            }

            #[inline(always)]
            fn inner_stride(core: &Core<2>) -> isize
            {
                impl_matrix_layout!(@inner $order, core)
            }

            #[inline(always)]
            fn outer_stride(core: &Core<2>) -> isize
            {
                impl_matrix_layout!(@outer $order, core)
            }
        }
    )+};
}

impl_matrix_layout!(strided, None, Flags::NONE => 0);
impl_matrix_layout!(row, Some(1), Flags::ROW_MAJOR.also(Flags::PACKET_ACCESS) => 1, 2);
impl_matrix_layout!(col, Some(1), Flags::PACKET_ACCESS => -1, -2);

#[cfg(test)]
mod tests
{
    use super::*;

    macro_rules! assert_layout {
        ($n:literal, $c:literal, $r:expr, $k:expr; inner: $inner:expr, vector: $vec:expr, flags: $flags:expr) => {{
            type L = Layout<{ $n }, { $c }, { $r }, { $k }>;
            assert_eq!(<L as LayoutTraits<{ $n }>>::INNER_STRIDE, $inner, "inner stride of {:?}", L::default());
            assert_eq!(<L as LayoutTraits<{ $n }>>::OUTER_STRIDE, None);
            assert_eq!(<L as LayoutTraits<{ $n }>>::IS_VECTOR, $vec);
            assert_eq!(<L as LayoutTraits<{ $n }>>::FLAGS, $flags, "flags of {:?}", L::default());
        }};
    }

    #[test]
    fn vector_table()
    {
        let lin = Flags::LINEAR_ACCESS;
        let packed = lin.also(Flags::PACKET_ACCESS);
        assert_layout!(1, 0, DYNAMIC, 1; inner: None, vector: true, flags: lin);
        assert_layout!(1, 0, 1, DYNAMIC; inner: None, vector: true, flags: lin.also(Flags::ROW_MAJOR));
        assert_layout!(1, 1, DYNAMIC, 1; inner: Some(1), vector: true, flags: packed);
        assert_layout!(1, -1, DYNAMIC, 1; inner: Some(1), vector: true, flags: packed);
        assert_layout!(1, 1, 1, DYNAMIC; inner: Some(1), vector: true, flags: packed.also(Flags::ROW_MAJOR));
        assert_layout!(1, -1, 1, 4; inner: Some(1), vector: true, flags: packed.also(Flags::ROW_MAJOR));
    }

    #[test]
    fn matrix_table()
    {
        let row = Flags::ROW_MAJOR.also(Flags::PACKET_ACCESS);
        assert_layout!(2, 0, DYNAMIC, DYNAMIC; inner: None, vector: false, flags: Flags::NONE);
        assert_layout!(2, 1, DYNAMIC, DYNAMIC; inner: Some(1), vector: false, flags: row);
        assert_layout!(2, 2, 3, 4; inner: Some(1), vector: false, flags: row);
        assert_layout!(2, -1, DYNAMIC, 4; inner: Some(1), vector: false, flags: Flags::PACKET_ACCESS);
        assert_layout!(2, -2, 3, DYNAMIC; inner: Some(1), vector: false, flags: Flags::PACKET_ACCESS);
    }

    #[test]
    fn vector_role()
    {
        assert!(is_row_vector(0, 1, DYNAMIC));
        assert!(is_row_vector(1, 1, 1));
        assert!(!is_row_vector(-1, DYNAMIC, 1));
        assert!(is_row_vector(-1, DYNAMIC, DYNAMIC));
        assert!(!is_row_vector(0, DYNAMIC, DYNAMIC));
        assert!(!is_row_vector(1, DYNAMIC, DYNAMIC));

        assert!(vector_shape_is_consistent(true, DYNAMIC, 7));
        assert!(!vector_shape_is_consistent(true, 3, DYNAMIC));
        assert!(!vector_shape_is_consistent(false, 3, 3));
    }

    #[test]
    fn compile_time_shape()
    {
        assert_eq!(<Layout<1, 0, DYNAMIC, DYNAMIC> as LayoutTraits<1>>::ROWS_AT_COMPILE_TIME, DYNAMIC);
        assert_eq!(<Layout<1, 0, DYNAMIC, DYNAMIC> as LayoutTraits<1>>::COLS_AT_COMPILE_TIME, 1);
        assert_eq!(<Layout<1, -1, DYNAMIC, DYNAMIC> as LayoutTraits<1>>::ROWS_AT_COMPILE_TIME, 1);
        assert_eq!(<Layout<1, -1, DYNAMIC, DYNAMIC> as LayoutTraits<1>>::COLS_AT_COMPILE_TIME, DYNAMIC);
        assert_eq!(<Layout<2, 2, 3, 5> as LayoutTraits<2>>::COLS_AT_COMPILE_TIME, 5);
    }

    #[test]
    fn strided_column_vector()
    {
        type L = Layout<1, 0, DYNAMIC, 1>;
        let core = Core::new([5], [3]);
        assert_eq!(L::rows(&core), 5);
        assert_eq!(L::cols(&core), 1);
        assert_eq!(L::inner_stride(&core), 3);
        assert_eq!(L::outer_stride(&core), 15);
        assert_eq!(L::row_stride(&core), 3);
        assert_eq!(L::col_stride(&core), 15);
    }

    #[test]
    fn packed_row_vector()
    {
        type L = Layout<1, -1, DYNAMIC, DYNAMIC>;
        let core = Core::new([4], [1]);
        assert_eq!(L::rows(&core), 1);
        assert_eq!(L::cols(&core), 4);
        assert_eq!(L::inner_stride(&core), 1);
        assert_eq!(L::outer_stride(&core), 4);
        assert_eq!(L::col_stride(&core), 1);
        assert_eq!(L::row_stride(&core), 4);
    }

    #[test]
    fn matrix_strides()
    {
        // a 3 × 4 row-major matrix with every other row dropped: rows 8 apart
        let core = Core::new([2, 4], [8, 1]);
        type R = Layout<2, 1, DYNAMIC, DYNAMIC>;
        assert_eq!((R::rows(&core), R::cols(&core)), (2, 4));
        assert_eq!((R::row_stride(&core), R::col_stride(&core)), (8, 1));
        assert_eq!((R::inner_stride(&core), R::outer_stride(&core)), (1, 8));

        let core = Core::new([3, 4], [1, 3]);
        type F = Layout<2, -2, 3, 4>;
        assert_eq!((F::row_stride(&core), F::col_stride(&core)), (1, 3));
        assert_eq!((F::inner_stride(&core), F::outer_stride(&core)), (1, 3));

        let core = Core::new([3, 4], [2, 9]);
        type S = Layout<2, 0, DYNAMIC, DYNAMIC>;
        assert_eq!((S::row_stride(&core), S::col_stride(&core)), (2, 9));
        assert_eq!((S::inner_stride(&core), S::outer_stride(&core)), (2, 9));
    }
}
