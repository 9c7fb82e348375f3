pub mod numeric;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use numeric::*;
pub use time::*;
