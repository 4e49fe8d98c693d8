//! Shape generation: the eight parametric target shapes plus the initial seed cloud.

pub mod catalog;
pub mod generators;
pub mod seed;
