use ndarray::{arr1, array, Array, Array2, Array4, Axis, ShapeBuilder};
use ndarray_dense::prelude::*;
use ndarray_dense::ConversionError;

#[test]
fn seven_elements_into_a_three_element_vector()
{
    let v = DenseView::<f64, 1, 0, 3, 1>::from_foreign(Array::linspace(0., 6., 7));
    let e = v.unwrap_err();
    assert_eq!(e.to_string(), "incorrect number of elements for vector");
    assert_eq!((e.expected(), e.found()), (3, 7));

    let v = DenseView::<f64, 1, 0, 1, 3>::from_foreign(Array::linspace(0., 6., 7));
    assert_eq!(v.unwrap_err().expected(), 3);

    let ok = DenseView::<f64, 1, 0, 3, 1>::from_foreign(arr1(&[1., 2., 3.])).unwrap();
    assert_eq!(ok.to_vec(), [1., 2., 3.]);
}

#[test]
fn matrix_size_messages()
{
    let a = Array2::<f32>::zeros((2, 3));
    let e = DenseView::<f32, 2, 0, 4, DYNAMIC>::from_foreign(a.clone()).unwrap_err();
    assert_eq!(e.to_string(), "incorrect number of rows for matrix");
    let e = DenseView::<f32, 2, 0, DYNAMIC, 4>::from_foreign(a.clone()).unwrap_err();
    assert_eq!(e.to_string(), "incorrect number of columns for matrix");
    assert!(DenseView::<f32, 2, 0, 2, 3>::from_foreign(a).is_ok());
}

#[test]
fn unit_axes_are_removed_and_inserted()
{
    // a column in a four-dimensional array
    let a = Array4::<i32>::from_shape_fn((1, 4, 1, 1), |(_, i, _, _)| i as i32);
    let v = ColVectorView::<i32, 1>::from_foreign(a.clone()).unwrap();
    assert_eq!(v.to_vec(), [0, 1, 2, 3]);

    let m = DenseView::<i32, 2, 0, 1, DYNAMIC>::from_foreign(a.clone()).unwrap();
    assert_eq!((m.rows(), m.cols()), (1, 4));
    let m = DenseView::<i32, 2, 0, DYNAMIC, 1>::from_foreign(a.clone()).unwrap();
    assert_eq!((m.rows(), m.cols()), (4, 1));

    // a general matrix type does not reshape
    let e = MatrixView::<i32, 0>::from_foreign(a).unwrap_err();
    assert_eq!(e, ConversionError::Dimensionality { expected: 2, found: 4 });
}

#[test]
fn buffers_are_adopted_when_contiguous()
{
    let a = array![[1, 2, 3], [4, 5, 6]];
    let ptr = a.as_ptr();
    let v = MatrixView::<i32, 2>::from_foreign(a).unwrap();
    assert_eq!(v.shallow().as_ptr(), ptr);

    let f = Array2::from_shape_vec((2, 3).f(), vec![1, 4, 2, 5, 3, 6]).unwrap();
    let ptr = f.as_ptr();
    let v = MatrixView::<i32, -2>::from_foreign(f.clone()).unwrap();
    assert_eq!(v.shallow().as_ptr(), ptr);

    // row-major view of column-major data needs a copy
    let v = MatrixView::<i32, 1>::from_foreign(f).unwrap();
    assert_ne!(v.shallow().as_ptr(), ptr);
    assert_eq!(v.to_vec(), [1, 2, 3, 4, 5, 6]);
    assert_eq!(v.row_stride(), 3);
}

#[test]
fn sliced_arrays()
{
    let mut a = Array2::from_shape_fn((4, 6), |(i, j)| (10 * i + j) as i64);
    a.slice_collapse(ndarray::s![1.., ..;2]);
    assert_eq!(a.shape(), &[3, 3]);
    let v = MatrixView::<i64, 0>::from_foreign(a.clone()).unwrap();
    assert_eq!((v.row_stride(), v.col_stride()), (6, 2));
    assert_eq!(v.get(0, 1), Some(12));

    let mut b = a.clone();
    b.invert_axis(Axis(1));
    let v = MatrixView::<i64, 0>::from_foreign(b).unwrap();
    assert_eq!(v.get(0, 0), Some(14));
}

#[test]
fn round_trip_squeezes()
{
    let v = DenseView::<f64, 2, 0, 1, DYNAMIC>::from_foreign(array![[[1., 2.]]]).unwrap();
    let a = v.to_foreign();
    assert_eq!(a.shape(), &[2]);
    assert_eq!(a, array![1., 2.].into_dyn());

    let one = DenseView::<f64, 2, 0, 1, 1>::from_foreign(array![3.]).unwrap();
    assert_eq!(one.to_foreign().ndim(), 0);

    let m = MatrixView::<f64, 0>::from_foreign(array![[1., 2.], [3., 4.]]).unwrap();
    let copy = m.to_foreign();
    let mut writer = m.clone();
    writer.replace(0, 0, 9.);
    assert_eq!(copy[[0, 0]], 1.);
    let view = unsafe { m.as_foreign_view() };
    assert_eq!(view[[0, 0]], 9.);
}
