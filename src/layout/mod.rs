// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Layout resolution: from array dimensionality and contiguity to the
//! stride kinds and capabilities of a dense operand.

mod bitset;
mod resolve;

pub use self::bitset::Flags;
pub use self::resolve::{Layout, LayoutTraits, DYNAMIC};
