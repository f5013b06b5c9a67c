//! Page state machine: intro, password gate, unlocked content.
//!
//! All delayed behavior (staged intro lines, loader steps, gate reveal, typing
//! cadence) runs off named deadlines checked in [`GreetingState::tick`], so the
//! whole page advances from the same animation frame as the sky.

use fastrand::Rng;
use log::{debug, info};

use super::typewriter::Typewriter;
use crate::components::night_sky::sample;
use crate::components::timers::Timers;
use crate::config::GreetingConfig;

/// Top-level page stage. Only ever moves forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
	Intro,
	Gate,
	Unlocked,
}

/// Result of submitting a passphrase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateOutcome {
	/// Empty input, or the gate is not showing.
	Ignored,
	Rejected { hint_visible: bool },
	Unlocked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Answer {
	Yes,
	Always,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Proposal {
	Hidden,
	Revealed,
	Answered(Answer),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GreetingTimer {
	IntroLine,
	LoaderStep,
	OpenGate,
	TypeNext,
	ReliveNext,
}

/// Explicit application state for the greeting page.
#[derive(Clone, Debug)]
pub struct GreetingState {
	stage: Stage,
	started: bool,
	intro_lines_shown: usize,
	loader_visible: bool,
	loader_progress: f64,
	wrong_attempts: u32,
	hint_visible: bool,
	typewriter: Option<Typewriter>,
	proposal: Proposal,
	/// Index of the narration on screen while relive mode runs.
	relive: Option<usize>,
	timers: Timers<GreetingTimer>,
	rng: Rng,
}

/// Next deadline after `due`. Never zero-length so catch-up loops terminate.
fn after(due: f64, interval_ms: f64) -> f64 {
	due + interval_ms.max(1.0)
}

impl GreetingState {
	pub fn new(rng: Rng) -> Self {
		Self {
			stage: Stage::Intro,
			started: false,
			intro_lines_shown: 0,
			loader_visible: false,
			loader_progress: 0.0,
			wrong_attempts: 0,
			hint_visible: false,
			typewriter: None,
			proposal: Proposal::Hidden,
			relive: None,
			timers: Timers::new(),
			rng,
		}
	}

	pub fn with_seed(seed: u64) -> Self {
		Self::new(Rng::with_seed(seed))
	}

	pub fn stage(&self) -> Stage {
		self.stage
	}

	pub fn intro_lines_shown(&self) -> usize {
		self.intro_lines_shown
	}

	pub fn loader_visible(&self) -> bool {
		self.loader_visible
	}

	/// Loader fill, percent.
	pub fn loader_progress(&self) -> f64 {
		self.loader_progress
	}

	pub fn wrong_attempts(&self) -> u32 {
		self.wrong_attempts
	}

	pub fn hint_visible(&self) -> bool {
		self.hint_visible
	}

	pub fn typed_text(&self) -> &str {
		self.typewriter.as_ref().map(Typewriter::revealed).unwrap_or("")
	}

	/// Revealed letter text, one item per line.
	pub fn typed_lines(&self) -> impl Iterator<Item = &str> {
		self.typewriter.iter().flat_map(|tw| tw.lines())
	}

	pub fn typing_done(&self) -> bool {
		self.typewriter.as_ref().is_some_and(Typewriter::is_done)
	}

	pub fn proposal(&self) -> Proposal {
		self.proposal
	}

	/// Advances every pending deadline up to `now_ms`. Returns whether anything
	/// visible changed.
	pub fn tick(&mut self, now_ms: f64, config: &GreetingConfig) -> bool {
		if !self.started {
			self.started = true;
			if self.stage == Stage::Intro {
				self.timers
					.arm(GreetingTimer::IntroLine, now_ms + config.intro_first_line_ms);
			}
		}

		let mut changed = false;
		loop {
			let fired = self.timers.poll(now_ms);
			if fired.is_empty() {
				break;
			}
			for (timer, due) in fired {
				changed |= self.fire(timer, due, config);
			}
		}
		changed
	}

	fn fire(&mut self, timer: GreetingTimer, due: f64, config: &GreetingConfig) -> bool {
		match timer {
			GreetingTimer::IntroLine => {
				if self.intro_lines_shown < config.intro_lines.len() {
					self.intro_lines_shown += 1;
					self.timers
						.arm(GreetingTimer::IntroLine, after(due, config.intro_line_gap_ms));
				} else {
					self.loader_visible = true;
					self.timers
						.arm(GreetingTimer::LoaderStep, after(due, config.loader_step_ms));
				}
				true
			}
			GreetingTimer::LoaderStep => {
				self.loader_progress += sample(&mut self.rng, config.loader_increment);
				if self.loader_progress >= 100.0 {
					self.loader_progress = 100.0;
					self.timers
						.arm(GreetingTimer::OpenGate, after(due, config.gate_delay_ms));
				} else {
					self.timers
						.arm(GreetingTimer::LoaderStep, after(due, config.loader_step_ms));
				}
				true
			}
			GreetingTimer::OpenGate => {
				if self.stage == Stage::Intro {
					self.stage = Stage::Gate;
					info!("night-sky: intro finished, gate open");
				}
				true
			}
			GreetingTimer::ReliveNext => {
				let Some(shown) = self.relive else {
					return false;
				};
				let next = shown + 1;
				if next < config.relive_narrations.len() {
					self.relive = Some(next);
					self.timers
						.arm(GreetingTimer::ReliveNext, after(due, config.relive_step_ms));
				} else {
					self.relive = None;
					debug!("night-sky: relive finished");
				}
				true
			}
			GreetingTimer::TypeNext => {
				let Some(tw) = self.typewriter.as_mut() else {
					return false;
				};
				if tw.step() && !tw.is_done() {
					self.timers
						.arm(GreetingTimer::TypeNext, after(due, config.typing_speed_ms));
				}
				true
			}
		}
	}

	/// Checks a passphrase entry with `verify`. Whitespace around the entry is ignored.
	pub fn submit(
		&mut self,
		entry: &str,
		now_ms: f64,
		config: &GreetingConfig,
		verify: impl FnOnce(&str) -> bool,
	) -> GateOutcome {
		if self.stage != Stage::Gate {
			return GateOutcome::Ignored;
		}
		let entry = entry.trim();
		if entry.is_empty() {
			return GateOutcome::Ignored;
		}

		if verify(entry) {
			self.unlock(now_ms, config);
			return GateOutcome::Unlocked;
		}

		self.wrong_attempts += 1;
		if self.wrong_attempts >= config.max_attempts {
			self.hint_visible = true;
		}
		debug!("night-sky: wrong passphrase ({} attempts)", self.wrong_attempts);
		GateOutcome::Rejected {
			hint_visible: self.hint_visible,
		}
	}

	/// Content unlock. Starts everything that depends on it directly.
	fn unlock(&mut self, now_ms: f64, config: &GreetingConfig) {
		self.stage = Stage::Unlocked;
		self.typewriter = Some(Typewriter::new(config.typing_message.as_str()));
		self.timers
			.arm(GreetingTimer::TypeNext, now_ms + config.typing_delay_ms);
		info!(
			"night-sky: unlocked after {} wrong attempts",
			self.wrong_attempts
		);
	}

	/// Reveals the rest of the letter at once.
	pub fn skip_typing(&mut self) -> bool {
		let Some(tw) = self.typewriter.as_mut() else {
			return false;
		};
		if tw.is_done() {
			return false;
		}
		tw.skip();
		self.timers.cancel(GreetingTimer::TypeNext);
		true
	}

	/// Starts stepping through the memory narrations, one per `relive_step_ms`.
	/// Refused before unlocking, while a run is in progress, or with nothing to show.
	pub fn start_relive(&mut self, now_ms: f64, config: &GreetingConfig) -> bool {
		if self.stage != Stage::Unlocked
			|| self.relive.is_some()
			|| config.relive_narrations.is_empty()
		{
			return false;
		}
		self.relive = Some(0);
		self.timers
			.arm(GreetingTimer::ReliveNext, after(now_ms, config.relive_step_ms));
		true
	}

	/// While relive mode runs, its button stays disabled.
	pub fn relive_running(&self) -> bool {
		self.relive.is_some()
	}

	pub fn relive_narration<'c>(&self, config: &'c GreetingConfig) -> Option<&'c str> {
		self.relive
			.and_then(|i| config.relive_narrations.get(i))
			.map(String::as_str)
	}

	/// Shows the proposal buttons. Only once, and only after unlocking.
	pub fn reveal_proposal(&mut self) -> bool {
		if self.stage == Stage::Unlocked && self.proposal == Proposal::Hidden {
			self.proposal = Proposal::Revealed;
			true
		} else {
			false
		}
	}

	/// Records the first answer and returns its response. Later answers are ignored.
	pub fn answer<'c>(&mut self, answer: Answer, config: &'c GreetingConfig) -> Option<&'c str> {
		if self.proposal != Proposal::Revealed {
			return None;
		}
		self.proposal = Proposal::Answered(answer);
		info!("night-sky: proposal answered {:?}", answer);
		self.response(config)
	}

	pub fn response<'c>(&self, config: &'c GreetingConfig) -> Option<&'c str> {
		match self.proposal {
			Proposal::Answered(Answer::Yes) => Some(&config.proposal_yes),
			Proposal::Answered(Answer::Always) => Some(&config.proposal_always),
			_ => None,
		}
	}
}
