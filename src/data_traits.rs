// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The data (inner representation) traits for shared array handles

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::data_repr::OwnedBuffer;

/// Array representation trait.
///
/// Every representation keeps the buffer alive through a reference count, so
/// cloning a handle shares the elements instead of copying them.
///
/// ***Note:*** `Data` is not an extension interface at this point.
/// Traits in Rust can serve many different roles. This trait is public because
/// it is used as a bound on public methods.
#[allow(clippy::missing_safety_doc)] // not implementable downstream
pub unsafe trait Data: Sized
{
    /// The array element type.
    type Elem;

    /// True if handles with this representation may write their elements.
    const WRITABLE: bool;

    #[doc(hidden)]
    fn _buffer(&self) -> &Rc<OwnedBuffer<Self::Elem>>;

    #[doc(hidden)]
    fn _from_buffer(buffer: Rc<OwnedBuffer<Self::Elem>>) -> Self;

    #[doc(hidden)]
    fn _from_vec(v: Vec<Self::Elem>) -> Self
    {
        Self::_from_buffer(Rc::new(OwnedBuffer::from(v)))
    }

    private_decl! {}
}

/// Array representation trait.
///
/// For an array with writable elements. Writing never unshares the buffer:
/// every handle over the same buffer observes the write.
///
/// ***Internal trait, see `Data`.***
#[allow(clippy::missing_safety_doc)] // not implementable downstream
pub unsafe trait DataMut: Data {}

/// Writable shared representation.
///
/// *Don't use this type directly; use the type alias
/// [`SharedArray`](crate::SharedArray) for the handle type!*
#[derive(Debug)]
pub struct SharedRepr<A>(Rc<OwnedBuffer<A>>);

/// Read-only shared representation.
///
/// *Don't use this type directly; use the type alias
/// [`ConstArray`](crate::ConstArray) for the handle type!*
#[derive(Debug)]
pub struct ConstRepr<A>(Rc<OwnedBuffer<A>>);

impl<A> Clone for SharedRepr<A>
{
    fn clone(&self) -> Self
    {
        SharedRepr(self.0.clone())
    }
}

impl<A> Clone for ConstRepr<A>
{
    fn clone(&self) -> Self
    {
        ConstRepr(self.0.clone())
    }
}

unsafe impl<A> Data for SharedRepr<A>
{
    type Elem = A;

    const WRITABLE: bool = true;

    fn _buffer(&self) -> &Rc<OwnedBuffer<A>>
    {
        &self.0
    }

    fn _from_buffer(buffer: Rc<OwnedBuffer<A>>) -> Self
    {
        SharedRepr(buffer)
    }

    private_impl! {}
}

unsafe impl<A> DataMut for SharedRepr<A> {}

unsafe impl<A> Data for ConstRepr<A>
{
    type Elem = A;

    const WRITABLE: bool = false;

    fn _buffer(&self) -> &Rc<OwnedBuffer<A>>
    {
        &self.0
    }

    fn _from_buffer(buffer: Rc<OwnedBuffer<A>>) -> Self
    {
        ConstRepr(buffer)
    }

    private_impl! {}
}
