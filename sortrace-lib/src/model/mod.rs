//! Data model for recorded races: lane states, frames, and timelines.

mod frame;
mod lane;
mod timeline;

pub use frame::Frame;
pub use lane::{Lane, LaneState, Phase};
pub use timeline::Timeline;
