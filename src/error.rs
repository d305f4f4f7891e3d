// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use core::fmt;

#[cfg(feature = "std")]
use std::error::Error;

/// An error related to array shape or layout, returned when a handle or a
/// view cannot be built over the given data.
#[derive(Clone)]
pub struct ShapeError
{
    // we want to be able to change this representation later
    repr: ErrorKind,
}

impl ShapeError
{
    /// Return the `ErrorKind` of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind
    {
        self.repr
    }

    /// Create a new `ShapeError`
    pub fn from_kind(error: ErrorKind) -> Self
    {
        from_kind(error)
    }
}

/// Error code for an error related to array shape or layout.
///
/// This enumeration is not exhaustive. The representation of the enum
/// is not guaranteed.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind
{
    /// incompatible shape: element count or dimensionality does not match
    IncompatibleShape,
    /// incompatible layout: the array does not have the contiguity the view requires
    IncompatibleLayout,
    /// the number of rows differs from the fixed row count of the view
    RowMismatch,
    /// the number of columns differs from the fixed column count of the view
    ColumnMismatch,
    /// unsupported array layout (e.g. negative strides)
    Unsupported,
    /// overflow when computing offset, length, etc.
    Overflow,
}

#[inline(always)]
pub fn from_kind(k: ErrorKind) -> ShapeError
{
    ShapeError { repr: k }
}

impl PartialEq for ShapeError
{
    #[inline(always)]
    fn eq(&self, rhs: &Self) -> bool
    {
        self.repr == rhs.repr
    }
}

#[cfg(feature = "std")]
impl Error for ShapeError {}

impl fmt::Display for ShapeError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let description = match self.kind() {
            ErrorKind::IncompatibleShape => "incompatible shapes",
            ErrorKind::IncompatibleLayout => "incompatible layout (array does not have the required contiguity)",
            ErrorKind::RowMismatch => "number of rows does not match the fixed row count",
            ErrorKind::ColumnMismatch => "number of columns does not match the fixed column count",
            ErrorKind::Unsupported => "unsupported array layout",
            ErrorKind::Overflow => "arithmetic overflow",
        };
        write!(f, "ShapeError/{:?}: {}", self.kind(), description)
    }
}

impl fmt::Debug for ShapeError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}", self)
    }
}

/// An error returned at the foreign-array boundary, when an incoming array
/// cannot be adapted to the requested view type.
///
/// The `Display` output is one fixed message per variant; the sizes involved
/// are available through [`expected`](ConversionError::expected) and
/// [`found`](ConversionError::found).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConversionError
{
    /// The array does not have the required number of axes, even after
    /// removing or inserting axes of length one.
    Dimensionality
    {
        /// required number of axes
        expected: usize,
        /// number of axes left after reshaping
        found: usize,
    },
    /// The row count differs from the fixed row count of a matrix view.
    IncorrectRows
    {
        /// fixed row count
        expected: usize,
        /// row count of the array
        found: usize,
    },
    /// The column count differs from the fixed column count of a matrix view.
    IncorrectColumns
    {
        /// fixed column count
        expected: usize,
        /// column count of the array
        found: usize,
    },
    /// The element count differs from the fixed size of a vector view.
    IncorrectElements
    {
        /// fixed element count
        expected: usize,
        /// element count of the array
        found: usize,
    },
}

impl ConversionError
{
    /// The size (or number of axes) the view requires.
    pub fn expected(&self) -> usize
    {
        match *self {
            ConversionError::Dimensionality { expected, .. }
            | ConversionError::IncorrectRows { expected, .. }
            | ConversionError::IncorrectColumns { expected, .. }
            | ConversionError::IncorrectElements { expected, .. } => expected,
        }
    }

    /// The size (or number of axes) the array had.
    pub fn found(&self) -> usize
    {
        match *self {
            ConversionError::Dimensionality { found, .. }
            | ConversionError::IncorrectRows { found, .. }
            | ConversionError::IncorrectColumns { found, .. }
            | ConversionError::IncorrectElements { found, .. } => found,
        }
    }
}

impl fmt::Display for ConversionError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(match *self {
            ConversionError::Dimensionality { .. } => "incorrect number of dimensions for array",
            ConversionError::IncorrectRows { .. } => "incorrect number of rows for matrix",
            ConversionError::IncorrectColumns { .. } => "incorrect number of columns for matrix",
            ConversionError::IncorrectElements { .. } => "incorrect number of elements for vector",
        })
    }
}

#[cfg(feature = "std")]
impl Error for ConversionError {}

#[cfg(test)]
mod tests
{
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn boundary_messages()
    {
        let e = ConversionError::IncorrectElements { expected: 3, found: 7 };
        assert_eq!(e.to_string(), "incorrect number of elements for vector");
        assert_eq!((e.expected(), e.found()), (3, 7));
        let e = ConversionError::IncorrectRows { expected: 2, found: 4 };
        assert_eq!(e.to_string(), "incorrect number of rows for matrix");
        let e = ConversionError::IncorrectColumns { expected: 5, found: 1 };
        assert_eq!(e.to_string(), "incorrect number of columns for matrix");
    }

    #[test]
    fn shape_error_kind()
    {
        let e = from_kind(ErrorKind::RowMismatch);
        assert_eq!(e.kind(), ErrorKind::RowMismatch);
        assert_eq!(e, ShapeError::from_kind(ErrorKind::RowMismatch));
        assert!(e.to_string().starts_with("ShapeError/RowMismatch"));
    }
}
