//! Transition scheduling, easing and per-frame interpolation.

pub mod ease;
pub mod interp;
pub mod scheduler;
