//! Fixed-size arrays and a singly-linked list.
//!
//! The arrays offer two kinds of access. `get` is strict and returns `None`
//! for an out-of-range position. `index_of` (and the `Index` operator)
//! clamps: an out-of-range position logs a warning and resolves to the last
//! valid element along that axis. Only an empty array has nothing to clamp
//! to; `index_of` then logs an error and returns `None`, and `Index` panics.

mod array;
mod array2d;
mod array3d;
mod list;

pub use array::Array;
pub use array2d::Array2D;
pub use array3d::Array3D;
pub use list::{Iter, List};

/// Clamp `value` to `len - 1` along one axis. `len` must be non-zero.
pub(crate) fn clamp_axis(container: &str, axis: &str, value: usize, len: usize) -> usize {
    if value < len {
        value
    } else {
        tracing::warn!(
            "{}: {} {} exceeds maximum of {}, using {}",
            container,
            axis,
            value,
            len,
            len - 1
        );
        len - 1
    }
}
