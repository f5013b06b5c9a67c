// Integration tests for the particle field.
// These run on the host: the field is pure state plus a recording surface, no
// browser APIs are touched.

#![allow(unused_crate_dependencies)]

use night_sky::components::night_sky::theme::AccentStyle;
use night_sky::{
	AccentParticle, AccentPhase, DisplayList, DrawCommand, FieldStyle, GreetingConfig,
	ParticleField,
};

fn style_with_spawn_interval(min_ms: f64, max_ms: f64) -> FieldStyle {
	FieldStyle {
		accents: Some(AccentStyle {
			spawn_interval_ms: (min_ms, max_ms),
			..AccentStyle::default()
		}),
		..FieldStyle::starry()
	}
}

#[test]
fn ambient_opacity_stays_in_band() {
	let style = FieldStyle::starry();
	let (min, max) = (style.twinkle.opacity_min, style.twinkle.opacity_max);
	let mut field = ParticleField::with_seed(1024.0, 768.0, false, style, 17);

	let mut now = 0.0;
	for i in 0..1000 {
		now += 7.0 + (i % 13) as f64;
		field.tick(now);
		for p in field.ambient() {
			assert!(
				(min..=max).contains(&p.current_opacity),
				"opacity {} outside [{}, {}] at tick {}",
				p.current_opacity,
				min,
				max,
				i
			);
		}
	}
}

#[test]
fn ambient_count_follows_viewport_class() {
	let normal = ParticleField::with_seed(1280.0, 800.0, false, FieldStyle::starry(), 1);
	assert_eq!(normal.ambient().len(), 180);

	let narrow = ParticleField::with_seed(375.0, 667.0, true, FieldStyle::starry(), 1);
	assert_eq!(narrow.ambient().len(), 80);

	let sparkle = ParticleField::with_seed(375.0, 667.0, true, FieldStyle::sparkle(), 1);
	assert_eq!(sparkle.ambient().len(), FieldStyle::sparkle().density.narrow);

	assert!(night_sky::components::night_sky::is_narrow_viewport(767.0));
	assert!(!night_sky::components::night_sky::is_narrow_viewport(768.0));
}

#[test]
fn generated_accents_only_move_forward_through_phases() {
	let style = AccentStyle::default();
	let mut rng = fastrand::Rng::with_seed(99);

	for _ in 0..500 {
		let mut accent = AccentParticle::random(&mut rng, &style, 800.0, 600.0);
		let mut phases = vec![accent.phase];
		let mut frames = 0;
		while accent.active {
			accent.update(&style);
			assert!((0.0..=1.0).contains(&accent.opacity));
			assert!(accent.phase >= *phases.last().unwrap(), "phase regressed");
			phases.push(accent.phase);
			frames += 1;
			assert!(frames < 10_000, "accent never expired");
		}
		assert_eq!(phases.first(), Some(&AccentPhase::FadeIn));
		assert_eq!(phases.last(), Some(&AccentPhase::FadeOut));
	}
}

#[test]
fn pooled_accent_lifecycle_is_monotonic() {
	for seed in 0..40 {
		let mut field =
			ParticleField::with_seed(800.0, 600.0, false, style_with_spawn_interval(1e9, 2e9), seed);
		assert!(field.spawn_accent());

		let mut last = AccentPhase::FadeIn;
		let mut now = 0.0;
		while let Some(accent) = field.accents().first() {
			assert!(accent.phase >= last);
			last = accent.phase;
			now += 16.0;
			field.tick(now);
		}
		assert_eq!(last, AccentPhase::FadeOut);
		assert_eq!(field.active_accents(), 0);
	}
}

#[test]
fn accent_cap_holds_under_fast_spawning() {
	let style = style_with_spawn_interval(1.0, 2.0);
	let cap = style.accents.unwrap().cap;
	let mut field = ParticleField::with_seed(800.0, 600.0, false, style, 4);

	let mut now = 0.0;
	let mut saw_full = false;
	for _ in 0..3000 {
		now += 16.0;
		field.tick(now);
		field.spawn_accent();
		assert!(field.active_accents() <= cap);
		assert!(field.accents().len() <= cap);
		saw_full |= field.active_accents() == cap;
	}
	assert!(saw_full, "spawner never reached the cap");
}

#[test]
fn seeded_runs_draw_identical_frames() {
	let run = || {
		let mut field =
			ParticleField::with_seed(640.0, 480.0, false, style_with_spawn_interval(50.0, 400.0), 2024);
		let mut frames = Vec::new();
		for i in 0..240 {
			if i % 30 == 0 {
				field.set_pointer((i as f64 / 240.0) * 2.0 - 1.0, 0.25);
			}
			field.tick(i as f64 * 16.0);
			let mut list = DisplayList::new();
			field.draw(&mut list);
			frames.push(list);
		}
		frames
	};

	let (a, b) = (run(), run());
	assert_eq!(a.len(), b.len());
	for (fa, fb) in a.iter().zip(&b) {
		assert_eq!(fa, fb);
	}
	assert!(
		a.iter()
			.any(|f| f.commands().iter().any(|c| matches!(c, DrawCommand::FadingLine { .. }))),
		"no shooting star was ever drawn"
	);
}

#[test]
fn resize_only_changes_dimensions() {
	let mut field = ParticleField::with_seed(800.0, 600.0, false, FieldStyle::starry(), 8);
	field.tick(16.0);
	let before = field.ambient().to_vec();

	field.resize(0.0, 0.0);
	assert_eq!((field.width(), field.height()), (1.0, 1.0));
	assert_eq!(field.ambient(), &before[..]);

	field.resize(1920.0, 1080.0);
	assert_eq!((field.width(), field.height()), (1920.0, 1080.0));
	assert_eq!(field.ambient().len(), 180);

	let tiny = ParticleField::with_seed(0.0, 0.0, false, FieldStyle::starry(), 8);
	let mut list = DisplayList::new();
	tiny.draw(&mut list);
	assert!(matches!(
		list.commands()[0],
		DrawCommand::VerticalGradient { width, height, .. } if width == 1.0 && height == 1.0
	));
}

#[test]
fn quiet_run_keeps_values_finite() {
	let mut field =
		ParticleField::with_seed(800.0, 600.0, false, style_with_spawn_interval(10_000.0, 20_000.0), 77);
	let style = field.style().clone();
	let parallax_reach = style.ambient.parallax.1 * style.parallax_scale;

	for i in 0..300 {
		field.set_pointer(((i % 7) as f64 - 3.0) / 3.0, -0.5);
		field.tick(i as f64 * 16.0);
	}

	assert!(field.accents().is_empty());
	for p in field.ambient() {
		assert!(p.x.is_finite() && p.y.is_finite());
		assert!(p.current_opacity.is_finite());
		assert!((style.twinkle.opacity_min..=style.twinkle.opacity_max).contains(&p.current_opacity));
		assert!(p.x >= -parallax_reach && p.x <= 800.0 + parallax_reach);
		assert!(p.y >= -parallax_reach && p.y <= 600.0 + parallax_reach);
	}
}

#[test]
fn inverted_opacity_band_from_page_config_still_ticks() {
	let config =
		GreetingConfig::from_json(r#"{"sky":{"twinkle":{"opacity_min":0.9,"opacity_max":0.1}}}"#)
			.unwrap();
	let mut field = ParticleField::with_seed(800.0, 600.0, false, config.sky, 6);
	let twinkle = field.style().twinkle;
	assert_eq!((twinkle.opacity_min, twinkle.opacity_max), (0.1, 0.9));

	for i in 0..120 {
		field.tick(i as f64 * 16.0);
	}
	for p in field.ambient() {
		assert!((0.1..=0.9).contains(&p.current_opacity));
	}
}
