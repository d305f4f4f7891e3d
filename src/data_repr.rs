// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use alloc::vec::Vec;
use core::mem::ManuallyDrop;
use core::ptr::NonNull;

/// The allocation behind every array handle.
///
/// Like a `Vec`, but it is only ever reached through an `Rc` and elements are
/// read and written through raw pointers, so that several handles can share
/// (and write) one buffer without creating overlapping references.
#[derive(Debug)]
pub struct OwnedBuffer<A>
{
    ptr: NonNull<A>,
    len: usize,
    capacity: usize,
}

impl<A> OwnedBuffer<A>
{
    pub(crate) fn from(v: Vec<A>) -> Self
    {
        let mut v = ManuallyDrop::new(v);
        let len = v.len();
        let capacity = v.capacity();
        // the vector's data pointer is never null, even when unallocated
        let ptr = unsafe { NonNull::new_unchecked(v.as_mut_ptr()) };
        Self { ptr, len, capacity }
    }

    pub(crate) fn len(&self) -> usize
    {
        self.len
    }

    /// Pointer to the first element of the allocation.
    pub(crate) fn as_nonnull(&self) -> NonNull<A>
    {
        self.ptr
    }

    /// Return true if `ptr` points into (or one past the end of) this buffer.
    pub(crate) fn contains_ptr(&self, ptr: *const A) -> bool
    {
        let start = self.ptr.as_ptr() as usize;
        let end = start + self.len * core::mem::size_of::<A>();
        (start..=end).contains(&(ptr as usize))
    }

    fn take_as_vec(&mut self) -> Vec<A>
    {
        let capacity = self.capacity;
        let len = self.len;
        self.len = 0;
        self.capacity = 0;
        unsafe { Vec::from_raw_parts(self.ptr.as_ptr(), len, capacity) }
    }
}

impl<A> Drop for OwnedBuffer<A>
{
    fn drop(&mut self)
    {
        if self.capacity > 0 {
            // drop as a Vec.
            self.take_as_vec();
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;

    #[test]
    fn buffer_drops_elements_once()
    {
        let marker = Rc::new(());
        let buf = OwnedBuffer::from(vec![marker.clone(), marker.clone()]);
        assert_eq!(Rc::strong_count(&marker), 3);
        assert_eq!(buf.len(), 2);
        drop(buf);
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn contains_ptr()
    {
        let buf = OwnedBuffer::from(vec![1, 2, 3]);
        let p = buf.as_nonnull().as_ptr();
        assert!(buf.contains_ptr(p));
        assert!(buf.contains_ptr(p.wrapping_add(3)));
        assert!(!buf.contains_ptr(p.wrapping_add(4)));
    }
}
