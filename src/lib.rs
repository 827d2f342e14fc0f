#[macro_use]
extern crate tracing;

pub mod animation;
pub mod column;
pub mod replay;
pub mod swipe_tracker;
pub mod utils;
