#![cfg(feature = "approx")]

use approx::{assert_abs_diff_eq, assert_relative_eq};
use dense_gen::ArrayBuilder;
use ndarray_dense::linalg::dot;
use ndarray_dense::prelude::*;

#[test]
fn float_product_is_close_to_lazy_product()
{
    let a = MatrixView::<f32, 0>::new(ArrayBuilder::new([4, 3]).step(0, 2).build());
    let b = MatrixView::<f32, -2>::new(ArrayBuilder::new([3, 5]).memory_order(Order::ColumnMajor).build());
    let fast = dot(&a, &b);
    let lazy = copy(a.clone().times(b.clone()));
    assert_relative_eq!(fast, lazy, max_relative = 1e-6);
    assert_abs_diff_eq!(copy((&fast).scaled(0.)), MatrixView::<f32, 0>::new(SharedArray::zeros([4, 5], Order::RowMajor)));
}
