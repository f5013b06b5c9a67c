//! Greeting page: staged intro, password gate and the unlocked letter.
//!
//! [`GreetingState`] holds every piece of page state explicitly and advances
//! from animation frames; [`GreetingPage`] renders it.

mod component;
mod state;
mod typewriter;

pub use component::GreetingPage;
pub use state::{Answer, GateOutcome, GreetingState, Proposal, Stage};
pub use typewriter::Typewriter;
