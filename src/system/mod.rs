pub mod collector;
pub mod delta;
pub mod platform;
pub mod procfs;
pub mod rank;
pub mod sample;
pub mod snapshot;
pub mod source;
