//! Sealing for the storage traits.
//!
//! `Data` and `DataMut` promise that the element pointer of a handle stays
//! valid as long as the handle lives. Only the reprs in this crate keep that
//! promise, so third parties must not implement them.

/// Public so that it can appear in trait signatures, but not reachable from
/// outside the crate.
pub struct PrivateMarker;
