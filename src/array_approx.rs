// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::data_traits::Data;
use crate::layout::{Layout, LayoutTraits};
use crate::view::DenseViewBase;

// Every comparison is coefficient-wise over the logical shape, so views of
// different layouts (or memory orders) compare equal when their coefficients
// do.
macro_rules! zip_all {
    ($lhs:expr, $rhs:expr, |$a:ident, $b:ident| $body:expr) => {{
        let (lhs, rhs) = ($lhs, $rhs);
        lhs.rows() == rhs.rows()
            && lhs.cols() == rhs.cols()
            && (0..lhs.rows()).all(|r| {
                (0..lhs.cols()).all(|c| {
                    let ($a, $b) = unsafe { (lhs.uget(r, c), rhs.uget(r, c)) };
                    $body
                })
            })
    }};
}

/// **Requires crate feature `"approx"`**
impl<A, S, S2, const N: usize, const C: i8, const ROWS: usize, const COLS: usize, const N2: usize, const C2: i8, const ROWS2: usize, const COLS2: usize>
    AbsDiffEq<DenseViewBase<S2, N2, C2, ROWS2, COLS2>> for DenseViewBase<S, N, C, ROWS, COLS>
where
    A: Copy + AbsDiffEq,
    A::Epsilon: Clone,
    S: Data<Elem = A>,
    S2: Data<Elem = A>,
    Layout<N, C, ROWS, COLS>: LayoutTraits<N>,
    Layout<N2, C2, ROWS2, COLS2>: LayoutTraits<N2>,
{
    type Epsilon = A::Epsilon;

    fn default_epsilon() -> A::Epsilon
    {
        A::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &DenseViewBase<S2, N2, C2, ROWS2, COLS2>, epsilon: A::Epsilon) -> bool
    {
        zip_all!(self, other, |a, b| A::abs_diff_eq(&a, &b, epsilon.clone()))
    }
}

/// **Requires crate feature `"approx"`**
impl<A, S, S2, const N: usize, const C: i8, const ROWS: usize, const COLS: usize, const N2: usize, const C2: i8, const ROWS2: usize, const COLS2: usize>
    RelativeEq<DenseViewBase<S2, N2, C2, ROWS2, COLS2>> for DenseViewBase<S, N, C, ROWS, COLS>
where
    A: Copy + RelativeEq,
    A::Epsilon: Clone,
    S: Data<Elem = A>,
    S2: Data<Elem = A>,
    Layout<N, C, ROWS, COLS>: LayoutTraits<N>,
    Layout<N2, C2, ROWS2, COLS2>: LayoutTraits<N2>,
{
    fn default_max_relative() -> A::Epsilon
    {
        A::default_max_relative()
    }

    fn relative_eq(
        &self, other: &DenseViewBase<S2, N2, C2, ROWS2, COLS2>, epsilon: A::Epsilon, max_relative: A::Epsilon,
    ) -> bool
    {
        zip_all!(self, other, |a, b| A::relative_eq(&a, &b, epsilon.clone(), max_relative.clone()))
    }
}

/// **Requires crate feature `"approx"`**
impl<A, S, S2, const N: usize, const C: i8, const ROWS: usize, const COLS: usize, const N2: usize, const C2: i8, const ROWS2: usize, const COLS2: usize>
    UlpsEq<DenseViewBase<S2, N2, C2, ROWS2, COLS2>> for DenseViewBase<S, N, C, ROWS, COLS>
where
    A: Copy + UlpsEq,
    A::Epsilon: Clone,
    S: Data<Elem = A>,
    S2: Data<Elem = A>,
    Layout<N, C, ROWS, COLS>: LayoutTraits<N>,
    Layout<N2, C2, ROWS2, COLS2>: LayoutTraits<N2>,
{
    fn default_max_ulps() -> u32
    {
        A::default_max_ulps()
    }

    fn ulps_eq(&self, other: &DenseViewBase<S2, N2, C2, ROWS2, COLS2>, epsilon: A::Epsilon, max_ulps: u32) -> bool
    {
        zip_all!(self, other, |a, b| A::ulps_eq(&a, &b, epsilon.clone(), max_ulps))
    }
}

#[cfg(test)]
mod tests
{
    use crate::{MatrixView, SharedArray};
    use alloc::vec;
    use approx::{
        assert_abs_diff_eq, assert_abs_diff_ne, assert_relative_eq, assert_relative_ne, assert_ulps_eq, assert_ulps_ne,
    };
    use ndarray::Order;

    #[test]
    fn abs_diff_eq()
    {
        let a = MatrixView::<f32, 0>::new(SharedArray::from_shape_vec([2, 2], Order::RowMajor, vec![0., 2., 1., -1.]).unwrap());
        let mut b = MatrixView::<f32, -2>::new(SharedArray::from_shape_vec([2, 2], Order::ColumnMajor, vec![0., 1., 2., -1.]).unwrap());
        assert_abs_diff_eq!(a, b);
        b.replace(0, 1, 2.1);
        assert_abs_diff_ne!(a, b);
        assert_abs_diff_eq!(a, b, epsilon = 0.2);
        b.replace(0, 1, 2.0);

        let c = MatrixView::<f32, 0>::new(SharedArray::zeros([2, 1], Order::RowMajor));
        assert_abs_diff_ne!(a, c, epsilon = 1e9);
    }

    #[test]
    fn relative_and_ulps()
    {
        let a = MatrixView::<f64, 0>::new(SharedArray::from_shape_vec([1, 3], Order::RowMajor, vec![1., 1e6, -3.]).unwrap());
        let mut b = MatrixView::<f64, 0>::new(a.deep());
        assert_relative_eq!(a, b);
        assert_ulps_eq!(a, b);
        b.replace(0, 1, 1e6 + 0.5);
        assert_relative_eq!(a, b, max_relative = 1e-6);
        assert_relative_ne!(a, b, max_relative = 1e-9);
        assert_ulps_ne!(a, b);
    }
}
