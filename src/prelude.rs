// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! ndarray-dense prelude.
//!
//! This module contains the most used types, type aliases, traits and
//! functions, which you can import easily as a group.
//!
//! ```
//! use ndarray_dense::prelude::*;
//!
//! let v = ColVectorView::<f64, 1>::new(SharedArray::zeros([3], Order::RowMajor));
//! assert_eq!(v.rows(), 3);
//! ```

#[doc(no_inline)]
pub use crate::{ConstArray, SharedArray, SharedArrayBase};

#[doc(no_inline)]
pub use crate::{ColVectorView, ConstDenseView, DenseView, DenseViewBase, MatrixView, RowVectorView};

#[doc(no_inline)]
pub use crate::{DenseExpr, DenseExprMut, DirectAccess, DirectAccessMut};

#[doc(no_inline)]
pub use crate::{copy, LayoutTraits, Order, DYNAMIC};

#[doc(no_inline)]
pub use crate::linalg::general_mat_mul;
