//! UI components and the frame-driven plumbing they share.

pub mod frame_loop;
pub mod greeting;
pub mod night_sky;
pub mod timers;
