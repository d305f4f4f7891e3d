// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Build shared arrays with a chosen memory order and stride pattern, for
//! tests and benchmarks.

use ndarray_dense::{Order, SharedArray};

use num_traits::Num;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ArrayBuilder<const N: usize>
{
    dim: [usize; N],
    memory_order: Order,
    generator: ElementGenerator,
    step: Option<(usize, usize)>,
}

/// How to generate elements
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementGenerator
{
    /// 0, 1, 2, … in memory order of the full (unstepped) buffer
    Sequential,
    Zero,
}

impl<const N: usize> Default for ArrayBuilder<N>
{
    fn default() -> Self
    {
        Self::new([0; N])
    }
}

impl<const N: usize> ArrayBuilder<N>
{
    pub fn new(dim: [usize; N]) -> Self
    {
        ArrayBuilder {
            dim,
            memory_order: Order::RowMajor,
            generator: ElementGenerator::Sequential,
            step: None,
        }
    }

    pub fn memory_order(mut self, order: Order) -> Self
    {
        self.memory_order = order;
        self
    }

    pub fn generator(mut self, generator: ElementGenerator) -> Self
    {
        self.generator = generator;
        self
    }

    /// Keep every `step`-th element along `axis` of a buffer that is `step`
    /// times longer along that axis, so the result is not contiguous there.
    pub fn step(mut self, axis: usize, step: usize) -> Self
    {
        assert!(axis < N && step > 0, "ArrayBuilder::step: axis {} or step {} out of range", axis, step);
        self.step = Some((axis, step));
        self
    }

    pub fn build<T>(self) -> SharedArray<T, N>
    where T: Num + Copy
    {
        let mut full = self.dim;
        if let Some((axis, step)) = self.step {
            full[axis] = (self.dim[axis] * step).saturating_sub(step - 1);
        }
        let mut current = T::zero();
        let use_zeros = self.generator == ElementGenerator::Zero;
        let size = full.iter().product();
        let elements = (0..size)
            .map(|_| {
                let ret = current;
                if !use_zeros {
                    current = ret + T::one();
                }
                ret
            })
            .collect();
        let array = SharedArray::from_shape_vec(full, self.memory_order, elements).unwrap();
        match self.step {
            Some((axis, step)) => array.step_axis(axis, step),
            None => array,
        }
    }
}

#[test]
fn test_order()
{
    let (m, n) = (12, 13);
    let c = ArrayBuilder::new([m, n])
        .memory_order(Order::RowMajor)
        .build::<i32>();
    let f = ArrayBuilder::new([m, n])
        .memory_order(Order::ColumnMajor)
        .build::<i32>();

    assert_eq!(c.shape(), [m, n]);
    assert_eq!(f.shape(), [m, n]);
    assert_eq!(c.strides(), [n as isize, 1]);
    assert_eq!(f.strides(), [1, m as isize]);
}

#[test]
fn test_step()
{
    let s = ArrayBuilder::new([3, 4]).step(1, 2).build::<i32>();
    assert_eq!(s.shape(), [3, 4]);
    assert_eq!(s.strides(), [7, 2]);
    assert_eq!(s.core().row_major_contiguity(), 0);
    assert_eq!(s.get([1, 1]), Some(9));
}
