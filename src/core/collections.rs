//! Collection aliases and helpers used across the crate.
//!
//! Hash-based collections use `rustc_hash` (fast, non-cryptographic); short
//! per-face vertex lists use `smallvec`; vertex and face storage uses
//! `slotmap`.

mod aliases;
mod helpers;

pub use aliases::*;
pub use helpers::*;
