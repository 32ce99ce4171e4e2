pub mod collector;
pub mod history;
pub mod monitor;
pub mod platform;
pub mod rate;
pub mod sampler;
pub mod snapshot;
pub mod source;
