pub mod layout;
pub mod params;
pub mod stats;
pub mod view;

pub use layout::*;
pub use params::*;
pub use stats::*;
pub use view::*;
