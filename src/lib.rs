#![no_std]

//! A `&mut T` that is visible at the call site.
//!
//! `update(&mut x)` and `update(x)` look alike once `x` is itself a reference, and a `*mut T`
//! parameter may be null. A parameter of type [`InOut<'_, T>`] says that the callee reads and
//! writes the caller's value, and that the value exists.
//!
//! # Example
//! ```
//! use inout_ref::{inout, InOut};
//!
//! fn clamp(mut value: InOut<'_, i32>, low: i32, high: i32) {
//!     *value = (*value).max(low).min(high);
//! }
//!
//! let mut x = 5;
//!
//! let mut w = inout(&mut x);
//! *w = 10;
//! clamp(w, 0, 8);
//!
//! assert_eq!(x, 8);
//! ```
//!
//! With the `critical-section` feature, `with_locked` hands out handles to values kept in a
//! `critical_section::Mutex`.
//!
//! See more in the `demos` directory.

mod forward;
mod inout;
#[cfg(feature = "critical-section")]
mod locked;
mod upcast;

pub use inout::{inout, InOut};
#[cfg(feature = "critical-section")]
pub use locked::{try_with_locked, with_locked};
pub use upcast::Upcast;
