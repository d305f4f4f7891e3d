// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use ndarray::Order;
use num_complex::Complex;

use crate::expr::{DirectAccess, DirectAccessMut};
use crate::linalg_traits::{cast_as, GemmKernel, LinalgScalar};
use crate::shared_array::SharedArray;
use crate::view::MatrixView;

/// General matrix-matrix multiplication.
///
/// Compute C ← α A B + β C
///
/// The operands are read through their pointers and strides, so any view,
/// transposed view or `ndarray` matrix works without copying. The shapes
/// must agree in the way that if `a` is *M* × *K*, then `b` is *K* × *N*
/// and `c` is *M* × *N*.
///
/// If `c` shares memory with `a` or `b` the result is unspecified.
///
/// ***Panics*** if the shapes are not compatible<br>
/// *Note:* `f32`, `f64`, `Complex32` and `Complex64` use the
/// `matrixmultiply` kernels for every memory layout; other element types use
/// a coefficient loop.
///
/// ```
/// use ndarray::Order;
/// use ndarray_dense::{linalg::general_mat_mul, MatrixView, SharedArray};
///
/// let a = MatrixView::<f64, 2>::new(SharedArray::from_shape_vec([2, 2], Order::RowMajor, vec![1., 2., 3., 4.]).unwrap());
/// let mut c = MatrixView::<f64, -2>::new(SharedArray::zeros([2, 2], Order::ColumnMajor));
/// general_mat_mul(1., &a, &a, 0., &mut c);
/// assert_eq!(c.to_vec(), [7., 10., 15., 22.]);
/// ```
pub fn general_mat_mul<A, L, R, O>(alpha: A, a: &L, b: &R, beta: A, c: &mut O)
where
    A: LinalgScalar,
    L: DirectAccess<Elem = A>,
    R: DirectAccess<Elem = A>,
    O: DirectAccessMut<Elem = A>,
{
    let ((m, k), (k2, n)) = ((a.rows(), a.cols()), (b.rows(), b.cols()));
    let (m2, n2) = (c.rows(), c.cols());
    if k != k2 || m != m2 || n != n2 {
        general_dot_shape_error(m, k, k2, n, m2, n2);
    }
    mat_mul_general(alpha, a, b, beta, c)
}

/// Matrix product of `a` and `b` in a newly allocated column-major matrix.
///
/// ***Panics*** if `a.cols() != b.rows()`.
pub fn dot<A, L, R>(a: &L, b: &R) -> MatrixView<A, -2>
where
    A: LinalgScalar,
    L: DirectAccess<Elem = A>,
    R: DirectAccess<Elem = A>,
{
    let mut c = MatrixView::new(SharedArray::zeros([a.rows(), b.cols()], Order::ColumnMajor));
    general_mat_mul(A::one(), a, b, A::zero(), &mut c);
    c
}

#[cold]
#[inline(never)]
fn general_dot_shape_error(m: usize, k: usize, k2: usize, n: usize, c1: usize, c2: usize) -> !
{
    panic!(
        "ndarray-dense: inputs {} × {}, {} × {}, and output {} × {} are not compatible for matrix multiplication",
        m, k, k2, n, c1, c2
    );
}

/// C ← α A B + β C
fn mat_mul_general<A, L, R, O>(alpha: A, lhs: &L, rhs: &R, beta: A, c: &mut O)
where
    A: LinalgScalar,
    L: DirectAccess<Elem = A>,
    R: DirectAccess<Elem = A>,
    O: DirectAccessMut<Elem = A>,
{
    let ((m, k), n) = ((lhs.rows(), lhs.cols()), rhs.cols());
    // It's a no-op if `c` has zero length.
    if m == 0 || n == 0 {
        return;
    }

    // common parameters for gemm
    let ap = lhs.data_ptr();
    let bp = rhs.data_ptr();
    let (rsa, csa) = (lhs.row_stride(), lhs.col_stride());
    let (rsb, csb) = (rhs.row_stride(), rhs.col_stride());
    let (rsc, csc) = (c.row_stride(), c.col_stride());
    let cp = c.data_mut_ptr();
    match GemmKernel::of::<A>() {
        GemmKernel::F32 => unsafe {
            matrixmultiply::sgemm(
                m,
                k,
                n,
                cast_as(&alpha),
                ap as *const _,
                rsa,
                csa,
                bp as *const _,
                rsb,
                csb,
                cast_as(&beta),
                cp as *mut _,
                rsc,
                csc,
            );
        },
        GemmKernel::F64 => unsafe {
            matrixmultiply::dgemm(
                m,
                k,
                n,
                cast_as(&alpha),
                ap as *const _,
                rsa,
                csa,
                bp as *const _,
                rsb,
                csb,
                cast_as(&beta),
                cp as *mut _,
                rsc,
                csc,
            );
        },
        GemmKernel::C32 => unsafe {
            matrixmultiply::cgemm(
                matrixmultiply::CGemmOption::Standard,
                matrixmultiply::CGemmOption::Standard,
                m,
                k,
                n,
                complex_array::<f32>(cast_as(&alpha)),
                ap as *const _,
                rsa,
                csa,
                bp as *const _,
                rsb,
                csb,
                complex_array::<f32>(cast_as(&beta)),
                cp as *mut _,
                rsc,
                csc,
            );
        },
        GemmKernel::C64 => unsafe {
            matrixmultiply::zgemm(
                matrixmultiply::CGemmOption::Standard,
                matrixmultiply::CGemmOption::Standard,
                m,
                k,
                n,
                complex_array::<f64>(cast_as(&alpha)),
                ap as *const _,
                rsa,
                csa,
                bp as *const _,
                rsb,
                csb,
                complex_array::<f64>(cast_as(&beta)),
                cp as *mut _,
                rsc,
                csc,
            );
        },
        GemmKernel::Generic => {
            // beta == 0 must not read `c`, which may hold NaN
            let mut i = 0;
            let mut j = 0;
            loop {
                unsafe {
                    let sum = (0..k).fold(A::zero(), move |s, x| {
                        s + lhs.coeff_unchecked(i, x) * rhs.coeff_unchecked(x, j)
                    });
                    let elt = if beta.is_zero() {
                        alpha * sum
                    } else {
                        c.coeff_unchecked(i, j) * beta + alpha * sum
                    };
                    c.set_coeff_unchecked(i, j, elt);
                }
                j += 1;
                if j == n {
                    j = 0;
                    i += 1;
                    if i == m {
                        break;
                    }
                }
            }
        }
    }
}

/// Return the complex in the form of an array [re, im]
#[inline]
fn complex_array<A: 'static + Copy>(z: Complex<A>) -> [A; 2]
{
    [z.re, z.im]
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::expr::Transpose;
    use alloc::vec;
    use alloc::vec::Vec;

    fn naive(a: &MatrixView<i64, 0>, b: &MatrixView<i64, 0>) -> Vec<i64>
    {
        let mut v = Vec::new();
        for i in 0..a.rows() {
            for j in 0..b.cols() {
                v.push((0..a.cols()).map(|x| a.get(i, x).unwrap() * b.get(x, j).unwrap()).sum());
            }
        }
        v
    }

    #[test]
    fn generic_kernel_matches_naive()
    {
        let a = MatrixView::<i64, 0>::new(SharedArray::from_shape_fn([3, 4], Order::RowMajor, |[i, j]| (i * 4 + j) as i64));
        let b = MatrixView::<i64, 0>::new(SharedArray::from_shape_fn([4, 2], Order::ColumnMajor, |[i, j]| i as i64 - j as i64));
        let c = dot(&a, &b);
        assert_eq!((c.rows(), c.cols()), (3, 2));
        assert_eq!(c.to_vec(), naive(&a, &b));
    }

    #[test]
    fn alpha_beta()
    {
        let a = MatrixView::<i64, 0>::new(SharedArray::from_shape_vec([1, 2], Order::RowMajor, vec![1, 2]).unwrap());
        let b = Transpose::new(&a);
        let mut c = MatrixView::<i64, 0>::new(SharedArray::from_elem([1, 1], Order::RowMajor, 10));
        general_mat_mul(2, &a, &b, 3, &mut c);
        assert_eq!(c.get(0, 0), Some(2 * 5 + 3 * 10));
    }

    #[test]
    fn float_kernel_through_strides()
    {
        // every other column of a 2 × 6 matrix times its transpose
        let base = SharedArray::from_shape_fn([2, 6], Order::RowMajor, |[i, j]| (i + j) as f64);
        let a = MatrixView::<f64, 0>::new(base.step_axis(1, 2));
        let c = dot(&a, &Transpose::new(&a));
        // rows are [0, 2, 4] and [1, 3, 5]
        assert_eq!(c.to_vec(), [20., 26., 26., 35.]);
    }

    #[test]
    #[should_panic(expected = "not compatible for matrix multiplication")]
    fn shape_mismatch_panics()
    {
        let a = MatrixView::<f32, 0>::new(SharedArray::zeros([2, 3], Order::RowMajor));
        let _ = dot(&a, &a);
    }

    #[test]
    fn empty_product()
    {
        let a = MatrixView::<f32, 0>::new(SharedArray::zeros([0, 3], Order::RowMajor));
        let b = MatrixView::<f32, 0>::new(SharedArray::zeros([3, 2], Order::RowMajor));
        let c = dot(&a, &b);
        assert_eq!((c.rows(), c.cols()), (0, 2));
    }
}
