// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Packet (block) access along the packed inner axis of a view.

use core::mem::size_of;
use core::ptr;

use crate::data_traits::{Data, DataMut};
use crate::expr::PACKET_BYTES;
use crate::layout::{Layout, LayoutTraits};
use crate::view::DenseViewBase;

/// How a packet load or store treats the address alignment.
pub trait PacketMode
{
    /// True if the address is promised to be aligned to the packet width.
    const ALIGNED: bool;

    private_decl! {}
}

/// The address of every packet is aligned to the packet width (capped at
/// 16 bytes). Checked in debug builds.
#[derive(Copy, Clone, Debug)]
pub struct Aligned;

/// No alignment beyond that of the element type.
#[derive(Copy, Clone, Debug)]
pub struct Unaligned;

impl PacketMode for Aligned
{
    const ALIGNED: bool = true;

    private_impl! {}
}

impl PacketMode for Unaligned
{
    const ALIGNED: bool = false;

    private_impl! {}
}

/// Alignment in bytes that an `Aligned` packet of `L` elements needs.
const fn packet_alignment<A, const L: usize>() -> usize
{
    let width = L * size_of::<A>();
    let width = if width < PACKET_BYTES { width } else { PACKET_BYTES };
    if width == 0 {
        1
    } else {
        width.next_power_of_two()
    }
}

#[inline(always)]
fn debug_check_alignment<A, M: PacketMode, const L: usize>(p: *const A)
{
    if M::ALIGNED {
        debug_assert!(
            p as usize % packet_alignment::<A, L>() == 0,
            "aligned packet at {:p} is not aligned to {} bytes",
            p,
            packet_alignment::<A, L>()
        );
    }
}

impl<A, S, const N: usize, const C: i8, const ROWS: usize, const COLS: usize> DenseViewBase<S, N, C, ROWS, COLS>
where
    A: Copy,
    S: Data<Elem = A>,
    Layout<N, C, ROWS, COLS>: LayoutTraits<N>,
{
    /// Load the `L` consecutive coefficients that start at `(row, col)` and
    /// run along the inner axis (along the row for a row-major view, down the
    /// column otherwise).
    ///
    /// Only views whose layout has packet access support this:
    ///
    /// ```compile_fail
    /// use ndarray::Order;
    /// use ndarray_dense::{MatrixView, SharedArray, Unaligned};
    ///
    /// let v = MatrixView::<f32, 0>::new(SharedArray::zeros([4, 4], Order::RowMajor));
    /// let _ = unsafe { v.packet::<Unaligned, 4>(0, 0) };
    /// ```
    ///
    /// # Safety
    ///
    /// All `L` coefficients must be in bounds, and an `Aligned` load must
    /// start at an address aligned to the packet width.
    #[inline]
    pub unsafe fn packet<M: PacketMode, const L: usize>(&self, row: usize, col: usize) -> [A; L]
    {
        let () = <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::PACKET_CHECK;
        let p = self.ptr_at(row, col);
        debug_check_alignment::<A, M, L>(p);
        ptr::read(p as *const [A; L])
    }

    /// Load the `L` consecutive coefficients of a vector that start at `index`.
    ///
    /// ```compile_fail
    /// use ndarray::Order;
    /// use ndarray_dense::{MatrixView, SharedArray, Unaligned};
    ///
    /// // a matrix has no linear packets, even when packed
    /// let m = MatrixView::<f32, 2>::new(SharedArray::zeros([4, 4], Order::RowMajor));
    /// let _ = unsafe { m.packet_linear::<Unaligned, 4>(0) };
    /// ```
    ///
    /// # Safety
    ///
    /// See [`packet`](Self::packet).
    #[inline]
    pub unsafe fn packet_linear<M: PacketMode, const L: usize>(&self, index: usize) -> [A; L]
    {
        let () = <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::PACKET_CHECK;
        let p = self.ptr_at_linear(index);
        debug_check_alignment::<A, M, L>(p);
        ptr::read(p as *const [A; L])
    }
}

impl<A, S, const N: usize, const C: i8, const ROWS: usize, const COLS: usize> DenseViewBase<S, N, C, ROWS, COLS>
where
    A: Copy,
    S: DataMut<Elem = A>,
    Layout<N, C, ROWS, COLS>: LayoutTraits<N>,
{
    /// Store `packet` into the `L` consecutive coefficients that start at
    /// `(row, col)` along the inner axis.
    ///
    /// Only writable views take packet stores:
    ///
    /// ```compile_fail
    /// use ndarray::Order;
    /// use ndarray_dense::{ConstDenseView, SharedArray, Unaligned, DYNAMIC};
    ///
    /// let a = SharedArray::<f32, 2>::zeros([4, 4], Order::RowMajor).into_const();
    /// let mut v = ConstDenseView::<f32, 2, 2, DYNAMIC, DYNAMIC>::new(a);
    /// unsafe { v.write_packet::<Unaligned, 4>(0, 0, [1.; 4]) };
    /// ```
    ///
    /// # Safety
    ///
    /// See [`packet`](Self::packet).
    #[inline]
    pub unsafe fn write_packet<M: PacketMode, const L: usize>(&mut self, row: usize, col: usize, packet: [A; L])
    {
        let () = <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::PACKET_CHECK;
        let p = self.ptr_at(row, col);
        debug_check_alignment::<A, M, L>(p);
        ptr::write(p as *mut [A; L], packet)
    }

    /// Store `packet` into the `L` consecutive coefficients of a vector that
    /// start at `index`.
    ///
    /// # Safety
    ///
    /// See [`packet`](Self::packet).
    #[inline]
    pub unsafe fn write_packet_linear<M: PacketMode, const L: usize>(&mut self, index: usize, packet: [A; L])
    {
        let () = <Layout<N, C, ROWS, COLS> as LayoutTraits<N>>::PACKET_CHECK;
        let p = self.ptr_at_linear(index);
        debug_check_alignment::<A, M, L>(p);
        ptr::write(p as *mut [A; L], packet)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::{ColVectorView, MatrixView, SharedArray};
    use ndarray::Order;

    #[test]
    fn alignment_widths()
    {
        assert_eq!(packet_alignment::<f32, 4>(), 16);
        assert_eq!(packet_alignment::<f32, 3>(), 16);
        assert_eq!(packet_alignment::<f64, 8>(), 16);
        assert_eq!(packet_alignment::<u8, 2>(), 2);
        assert_eq!(packet_alignment::<(), 4>(), 1);
    }

    #[test]
    fn row_and_column_packets()
    {
        let a = SharedArray::from_shape_fn([3, 4], Order::RowMajor, |[r, c]| (10 * r + c) as f32);
        let mut v = MatrixView::<f32, 2>::new(a.clone());
        unsafe {
            assert_eq!(v.packet::<Unaligned, 4>(1, 0), [10., 11., 12., 13.]);
            assert_eq!(v.packet::<Unaligned, 2>(2, 2), [22., 23.]);
            v.write_packet::<Unaligned, 3>(0, 1, [-1., -2., -3.]);
        }
        assert_eq!(a.get([0, 3]), Some(-3.));

        let f = MatrixView::<f32, -1>::new(a.deep_with_order(Order::ColumnMajor));
        unsafe {
            assert_eq!(f.packet::<Unaligned, 3>(0, 2), [-2., 12., 22.]);
        }
    }

    #[test]
    fn aligned_linear_packets()
    {
        let a = SharedArray::from_shape_fn([16], Order::RowMajor, |[i]| i as f32);
        let mut v = ColVectorView::<f32, 1>::new(a);
        let start = v.shallow().as_ptr().align_offset(16);
        assert!(start < 4);
        unsafe {
            let p = v.packet_linear::<Aligned, 4>(start);
            assert_eq!(p[0], start as f32);
            v.write_packet_linear::<Aligned, 4>(start + 4, [0.; 4]);
        }
        assert_eq!(v.get_linear(start + 7), Some(0.));
        assert_eq!(v.get_linear(start + 8), Some((start + 8) as f32));
    }
}
