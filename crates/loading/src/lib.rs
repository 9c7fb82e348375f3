//! Loading overlay logic: the progress estimator and its session plumbing.
//!
//! The page's asset loader reports a raw percentage that stalls while large
//! files parse. [`EstimatorState::tick`] turns that into a smoothed,
//! monotonic percentage; [`LoadingSession`] polls it on a fixed interval
//! and hands the display surface a [`LoadingFrame`] every animation frame.

pub mod config;
pub mod estimator;
pub mod messages;
pub mod metrics;
pub mod readout;
pub mod session;
pub mod source;

pub use config::*;
pub use estimator::*;
pub use messages::*;
pub use metrics::*;
pub use readout::*;
pub use session::*;
pub use source::*;
