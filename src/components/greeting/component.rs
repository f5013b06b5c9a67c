//! Leptos views for the greeting page.
//!
//! The page state lives in one signal and is advanced from its own animation
//! frame loop. Each stage renders its own view; the stage switch is memoized so
//! typing and loader updates do not rebuild the gate form.

use leptos::prelude::*;
use log::warn;
use web_sys::KeyboardEvent;

use super::state::{Answer, GateOutcome, GreetingState, Proposal, Stage};
use crate::components::frame_loop::{self, LoopHandle};
use crate::components::night_sky::browser_seed;
use crate::config::GreetingConfig;

fn performance_now() -> f64 {
	web_sys::window()
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or(0.0)
}

/// Intro, password gate and unlocked content, in that order.
#[component]
pub fn GreetingPage(config: StoredValue<GreetingConfig>) -> impl IntoView {
	let state = RwSignal::new(GreetingState::with_seed(browser_seed()));
	let handle = LoopHandle::new();

	let started = frame_loop::start(
		&handle,
		move |now| {
			config.with_value(|c| state.maybe_update(|s| s.tick(now, c)));
		},
		|| {},
	);
	if !started {
		warn!("night-sky: greeting page is static, no animation frames");
	}
	on_cleanup(move || handle.stop());

	let stage = Memo::new(move |_| state.with(|s| s.stage()));

	view! {
		<main class="greeting">
			{move || match stage.get() {
				Stage::Intro => view! { <IntroScreen state=state config=config /> }.into_any(),
				Stage::Gate => view! { <GateScreen state=state config=config /> }.into_any(),
				Stage::Unlocked => view! { <UnlockedContent state=state config=config /> }.into_any(),
			}}
		</main>
	}
}

#[component]
fn IntroScreen(state: RwSignal<GreetingState>, config: StoredValue<GreetingConfig>) -> impl IntoView {
	let lines = config.with_value(|c| c.intro_lines.clone());

	view! {
		<section class="cinematic-intro">
			{lines
				.into_iter()
				.enumerate()
				.map(move |(i, line)| {
					view! {
						<p class="intro-line" class:show=move || state.with(|s| s.intro_lines_shown() > i)>
							{line}
						</p>
					}
				})
				.collect_view()}
			<div class="intro-loader" class:show=move || state.with(|s| s.loader_visible())>
				<div
					class="loader-fill"
					style:width=move || format!("{}%", state.with(|s| s.loader_progress()))
				></div>
			</div>
		</section>
	}
}

#[component]
fn GateScreen(state: RwSignal<GreetingState>, config: StoredValue<GreetingConfig>) -> impl IntoView {
	let entry = RwSignal::new(String::new());
	let shake = RwSignal::new(false);

	let submit = move || {
		let value = entry.get_untracked();
		let now = performance_now();
		let outcome = config.with_value(|c| {
			state
				.try_update(|s| s.submit(&value, now, c, |e| e == c.passphrase))
				.unwrap_or(GateOutcome::Ignored)
		});
		match outcome {
			GateOutcome::Rejected { .. } => {
				entry.set(String::new());
				shake.set(true);
			}
			GateOutcome::Unlocked | GateOutcome::Ignored => shake.set(false),
		}
	};

	view! {
		<section class="password-screen show">
			<input
				type="password"
				class="password-input"
				class:shake=move || shake.get()
				placeholder="Enter the secret word"
				autofocus
				prop:value=move || entry.get()
				on:input=move |ev| {
					shake.set(false);
					entry.set(event_target_value(&ev));
				}
				on:keydown=move |ev: KeyboardEvent| {
					if ev.key() == "Enter" {
						submit();
					}
				}
			/>
			<button class="enter-btn" on:click=move |_| submit()>
				"Enter"
			</button>
			<p class="hint-msg" class:visible=move || state.with(|s| s.hint_visible())>
				{config.with_value(|c| c.hint_message.clone())}
			</p>
		</section>
	}
}

#[component]
fn UnlockedContent(state: RwSignal<GreetingState>, config: StoredValue<GreetingConfig>) -> impl IntoView {
	let answered = move || matches!(state.with(|s| s.proposal()), Proposal::Answered(_));
	let relive_running = move || state.with(|s| s.relive_running());
	let answer = move |a: Answer| {
		config.with_value(|c| {
			state.update(|s| {
				s.answer(a, c);
			})
		});
	};

	view! {
		<section id="valentine" class="fade-in-section visible">
			<p
				class="typing-text"
				on:click=move |_| {
					state.maybe_update(|s| s.skip_typing());
				}
			>
				{move || {
					state.with(|s| {
						s.typed_lines()
							.map(|line| view! { <span>{line.to_string()}</span><br /> })
							.collect_view()
					})
				}}
				<span class="typing-cursor" class:done=move || state.with(|s| s.typing_done())>
					"|"
				</span>
			</p>
		</section>

		<section id="memories" class="fade-in-section visible">
			<button
				id="relive-btn"
				class="relive-btn"
				disabled=relive_running
				on:click=move |_| {
					let now = performance_now();
					config.with_value(|c| state.maybe_update(|s| s.start_relive(now, c)));
				}
			>
				"Relive our memories 📸"
			</button>
			<div class="relive-narration" class:show=relive_running>
				<p>
					{move || {
						config.with_value(|c| {
							state.with(|s| s.relive_narration(c).unwrap_or_default().to_string())
						})
					}}
				</p>
			</div>
		</section>

		<section id="proposal" class="fade-in-section visible">
			<button
				class="proposal-trigger"
				class:hidden=move || state.with(|s| s.proposal() != Proposal::Hidden)
				on:click=move |_| {
					state.update(|s| {
						s.reveal_proposal();
					})
				}
			>
				{config.with_value(|c| c.proposal_question.clone())}
			</button>
			<div
				class="proposal-reveal"
				class:show=move || state.with(|s| s.proposal() != Proposal::Hidden)
			>
				<button class="btn-yes" disabled=answered on:click=move |_| answer(Answer::Yes)>
					"Yes 💖"
				</button>
				<button class="btn-always" disabled=answered on:click=move |_| answer(Answer::Always)>
					"Always 💞"
				</button>
				<p class="proposal-response" class:show=answered>
					{move || {
						config.with_value(|c| state.with(|s| s.response(c).unwrap_or_default().to_string()))
					}}
				</p>
			</div>
		</section>
	}
}
