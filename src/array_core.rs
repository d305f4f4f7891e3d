// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The per-axis size and stride record of an array handle.

use ndarray::Order;

/// Shape and strides of an `N`-dimensional array handle.
///
/// Sizes count elements; strides are distances between consecutive
/// elements along an axis, in elements (not bytes). This is the only part of
/// an array the layout resolver looks at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Core<const N: usize>
{
    dim: [usize; N],
    strides: [isize; N],
}

impl<const N: usize> Core<N>
{
    pub(crate) fn new(dim: [usize; N], strides: [isize; N]) -> Self
    {
        Core { dim, strides }
    }

    /// Core of a freshly allocated array with the given memory order.
    pub(crate) fn contiguous(dim: [usize; N], order: Order) -> Self
    {
        let mut strides = [0; N];
        let mut step = 1isize;
        if order.is_row_major() {
            for ax in (0..N).rev() {
                strides[ax] = step;
                step *= dim[ax].max(1) as isize;
            }
        } else {
            for ax in 0..N {
                strides[ax] = step;
                step *= dim[ax].max(1) as isize;
            }
        }
        Core { dim, strides }
    }

    /// Number of elements along `axis`.
    ///
    /// **Panics** if `axis` is out of bounds.
    #[inline]
    pub fn size(&self, axis: usize) -> usize
    {
        self.dim[axis]
    }

    /// Stride of `axis`, in elements.
    ///
    /// **Panics** if `axis` is out of bounds.
    #[inline]
    pub fn stride(&self, axis: usize) -> isize
    {
        self.strides[axis]
    }

    #[inline]
    pub fn shape(&self) -> [usize; N]
    {
        self.dim
    }

    #[inline]
    pub fn strides(&self) -> [isize; N]
    {
        self.strides
    }

    /// Total number of elements.
    pub fn len(&self) -> usize
    {
        self.dim.iter().product()
    }

    pub fn is_empty(&self) -> bool
    {
        self.len() == 0
    }

    /// Return true if the array really has contiguity classification `c`.
    ///
    /// - `0`: no requirement.
    /// - `c > 0`: the innermost `c` axes are contiguous in row-major order.
    /// - `c < 0`: the first `|c|` axes are contiguous in column-major order.
    ///
    /// Axes of length one never break contiguity; empty arrays satisfy every
    /// classification up to `N`.
    pub fn satisfies(&self, c: i8) -> bool
    {
        let depth = c.unsigned_abs() as usize;
        if depth > N {
            return false;
        }
        if c == 0 || self.is_empty() {
            return true;
        }
        if c > 0 {
            self.contiguous_run((N - depth..N).rev())
        } else {
            self.contiguous_run(0..depth)
        }
    }

    /// The strongest contiguity classification this core satisfies.
    ///
    /// Row-major wins over column-major at equal depth, so a contiguous
    /// 1-D core classifies as `1`.
    pub fn row_major_contiguity(&self) -> i8
    {
        for depth in (1..=N as i8).rev() {
            if self.satisfies(depth) {
                return depth;
            }
            if self.satisfies(-depth) {
                return -depth;
            }
        }
        0
    }

    fn contiguous_run(&self, axes: impl Iterator<Item = usize>) -> bool
    {
        let mut expected = 1isize;
        for ax in axes {
            if self.dim[ax] > 1 && self.strides[ax] != expected {
                return false;
            }
            expected *= self.dim[ax] as isize;
        }
        true
    }

    #[inline]
    pub(crate) fn in_bounds(&self, index: &[usize; N]) -> bool
    {
        index.iter().zip(&self.dim).all(|(&i, &d)| i < d)
    }

    /// Element offset of `index`; does not check bounds.
    #[inline]
    pub(crate) fn offset(&self, index: &[usize; N]) -> isize
    {
        index
            .iter()
            .zip(&self.strides)
            .fold(0, |acc, (&i, &s)| acc + i as isize * s)
    }

    /// Core with the axes in reverse order.
    pub(crate) fn reversed(mut self) -> Self
    {
        self.dim.reverse();
        self.strides.reverse();
        self
    }

    /// Core keeping every `step`-th element of `axis`.
    pub(crate) fn stepped(mut self, axis: usize, step: usize) -> Self
    {
        let len = self.dim[axis];
        self.dim[axis] = if len == 0 { 0 } else { (len - 1) / step + 1 };
        self.strides[axis] *= step as isize;
        self
    }

    /// Call `f` with every index in logical row-major order.
    pub(crate) fn for_each_index(&self, mut f: impl FnMut([usize; N]))
    {
        if self.is_empty() {
            return;
        }
        let mut index = [0; N];
        loop {
            f(index);
            let mut ax = N;
            loop {
                if ax == 0 {
                    return;
                }
                ax -= 1;
                index[ax] += 1;
                if index[ax] < self.dim[ax] {
                    break;
                }
                index[ax] = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn contiguous_strides()
    {
        let c = Core::contiguous([3, 4], Order::RowMajor);
        assert_eq!(c.strides(), [4, 1]);
        let f = Core::contiguous([3, 4], Order::ColumnMajor);
        assert_eq!(f.strides(), [1, 3]);
        assert_eq!(c.len(), 12);
    }

    #[test]
    fn classification()
    {
        let c = Core::contiguous([3, 4], Order::RowMajor);
        assert!(c.satisfies(0) && c.satisfies(1) && c.satisfies(2));
        assert!(!c.satisfies(-1) && !c.satisfies(3));
        assert_eq!(c.row_major_contiguity(), 2);

        let f = Core::contiguous([3, 4], Order::ColumnMajor);
        assert!(f.satisfies(-1) && f.satisfies(-2));
        assert!(!f.satisfies(1));
        assert_eq!(f.row_major_contiguity(), -2);

        // every other row: inner axis still packed, outer is not
        let s = c.stepped(0, 2);
        assert_eq!(s.shape(), [2, 4]);
        assert!(s.satisfies(1));
        assert!(!s.satisfies(2));
        assert_eq!(s.row_major_contiguity(), 1);

        // every other column: nothing contiguous
        let s = c.stepped(1, 2);
        assert_eq!(s.row_major_contiguity(), 0);
    }

    #[test]
    fn unit_axes_never_break_contiguity()
    {
        let c = Core::new([1, 5], [100, 1]);
        assert!(c.satisfies(2));
        let c = Core::new([5, 1], [1, 7]);
        assert!(c.satisfies(-2));
        assert!(c.satisfies(1));
        let v = Core::new([1], [9]);
        assert_eq!(v.row_major_contiguity(), 1);
    }

    #[test]
    fn index_order()
    {
        let c = Core::contiguous([2, 3], Order::ColumnMajor);
        let mut seen = Vec::new();
        c.for_each_index(|ix| seen.push(c.offset(&ix)));
        assert_eq!(seen, [0, 2, 4, 1, 3, 5]);
        assert!(c.in_bounds(&[1, 2]));
        assert!(!c.in_bounds(&[2, 0]));
    }
}
