// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#![crate_name = "ndarray_dense"]
#![doc(html_root_url = "https://docs.rs/ndarray-dense/0.1/")]
#![allow(
    clippy::many_single_char_names,
    clippy::deref_addrof,
    clippy::unreadable_literal,
    clippy::manual_map, // is not an error
    clippy::while_let_on_iterator, // is not an error
    clippy::from_iter_instead_of_collect, // is not an error
    clippy::redundant_closure, // false positives clippy #7812
)]
#![doc(test(attr(allow(unused_variables))))]
#![doc(test(attr(allow(deprecated))))]
#![cfg_attr(not(feature = "std"), no_std)]

//! The `ndarray-dense` crate views `ndarray`-style arrays as dense
//! linear-algebra vectors and matrices, without copying their buffers.
//!
//! - [`SharedArray`]: a reference-counted, strided array handle whose
//!   buffer is shared (not copied-on-write) between clones.
//! - [`DenseViewBase`]: a view of a one- or two-dimensional handle as a
//!   vector or matrix. Its layout is resolved at compile time from the
//!   array's dimensionality, its contiguity classification and the requested
//!   shape; see [`LayoutTraits`].
//! - [`DenseExpr`]: the operand vocabulary a dense evaluator or kernel
//!   reads views through; also implemented for `ndarray` matrices and for
//!   lazy transposes, scalings and products.
//! - [`copy`]: evaluate an expression into a freshly allocated view whose
//!   type [`SelectView`] picks.
//! - [`linalg::general_mat_mul`]: matrix multiplication over views through
//!   their strides, using `matrixmultiply`.
//! - `from_foreign` / `to_foreign` on views: conversion from and to
//!   `ndarray` arrays of any dimensionality.
//!
//! ```
//! use ndarray::Order;
//! use ndarray_dense::{copy, DenseExpr, MatrixView, SharedArray};
//!
//! let a = SharedArray::from_shape_vec([2, 2], Order::RowMajor, vec![1., 2., 3., 4.]).unwrap();
//! let m = MatrixView::<f64, 2>::new(a.clone());
//! let t = copy((&m).transposed());
//! assert_eq!(t.to_vec(), [1., 3., 2., 4.]);
//!
//! // the view writes through to the shared array
//! let mut m = m;
//! m.replace(0, 0, 10.);
//! assert_eq!(a.get([0, 0]), Some(10.));
//! ```
//!
//! ## Crate Feature Flags
//!
//! - `std`
//!   - Rust standard library (enabled by default); without it the crate is
//!     `no_std` and uses `alloc`.
//! - `approx`
//!   - Implementations of traits from the [`approx`] crate for views.
//! - `matrixmultiply-threading`
//!   - Enable the `threading` feature in the matrixmultiply package.
//!
//! [`approx`]: https://docs.rs/approx

extern crate alloc;

#[cfg(not(feature = "std"))]
extern crate core as std;

#[macro_use]
mod macro_utils;
mod private;

mod array_core;
mod data_repr;
mod data_traits;
mod error;
mod expr;
pub mod layout;
pub mod linalg;
mod linalg_traits;
pub mod prelude;
mod select;
mod shared_array;
mod view;

#[cfg(feature = "approx")]
mod array_approx;

pub use ndarray::Order;

pub use crate::array_core::Core;
pub use crate::data_repr::OwnedBuffer;
pub use crate::data_traits::{ConstRepr, Data, DataMut, SharedRepr};
pub use crate::error::{ConversionError, ErrorKind, ShapeError};
pub use crate::expr::{
    packet_lanes, Dense, DenseExpr, DenseExprMut, DirectAccess, DirectAccessMut, Product, Scaled, Transpose, PACKET_BYTES,
};
pub use crate::layout::{Flags, Layout, LayoutTraits, DYNAMIC};
pub use crate::linalg_traits::{GemmKernel, LinalgScalar};
pub use crate::select::{copy, AllocView, SelectView, TransposeView};
pub use crate::shared_array::{ConstArray, SharedArray, SharedArrayBase};
pub use crate::view::{
    Aligned, Binding, ColVectorView, ConstDenseView, DenseView, DenseViewBase, MatrixView, PacketMode, RowVectorView,
    Unaligned,
};
