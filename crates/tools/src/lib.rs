//! Offline helpers behind the `shipview` CLI.

pub mod trace;

pub use trace::*;
