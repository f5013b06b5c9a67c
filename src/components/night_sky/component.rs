//! Leptos component wrapping the night sky canvas.
//!
//! The component creates a fixed, full-viewport canvas behind the page, keeps it
//! sized to the window and feeds pointer position into the field for parallax.
//! Resize and pointer listeners only record state; the field is ticked and
//! drawn from the animation frame.

use std::cell::RefCell;
use std::rc::Rc;

use fastrand::Rng;
use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::field::{ParticleField, is_narrow_viewport};
use super::theme::FieldStyle;
use crate::components::frame_loop::{self, LoopHandle};

/// Seed for the browser random source.
pub fn browser_seed() -> u64 {
	(js_sys::Math::random() * u64::MAX as f64) as u64
}

fn viewport_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Full-viewport animated sky drawn behind the page content.
#[component]
pub fn NightSkyCanvas(#[prop(default = FieldStyle::default())] field_style: FieldStyle) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let handle = LoopHandle::new();
	let handle_init = handle.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = viewport_size(&window);
		canvas.set_width(w.max(1.0) as u32);
		canvas.set_height(h.max(1.0) as u32);

		let Some(mut ctx) = context_2d(&canvas) else {
			warn!("night-sky: canvas has no 2d context");
			return;
		};

		let field = Rc::new(RefCell::new(ParticleField::new(
			w,
			h,
			is_narrow_viewport(w),
			field_style.clone(),
			Rng::with_seed(browser_seed()),
		)));
		info!(
			"night-sky: {} ambient particles on {}x{}",
			field.borrow().ambient().len(),
			w,
			h
		);

		let (field_resize, canvas_resize) = (field.clone(), canvas.clone());
		let resize_cb: Closure<dyn FnMut()> = Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = viewport_size(&win);
			field_resize.borrow_mut().resize(nw, nh);
			let f = field_resize.borrow();
			canvas_resize.set_width(f.width() as u32);
			canvas_resize.set_height(f.height() as u32);
		});
		let _ = window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());

		let field_pointer = field.clone();
		let pointer_cb: Closure<dyn FnMut(MouseEvent)> = Closure::new(move |ev: MouseEvent| {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (vw, vh) = viewport_size(&win);
			field_pointer.borrow_mut().set_pointer(
				(ev.client_x() as f64 / vw.max(1.0) - 0.5) * 2.0,
				(ev.client_y() as f64 / vh.max(1.0) - 0.5) * 2.0,
			);
		});
		let _ =
			window.add_event_listener_with_callback("mousemove", pointer_cb.as_ref().unchecked_ref());

		let field_anim = field.clone();
		frame_loop::start(
			&handle_init,
			move |now| {
				let mut f = field_anim.borrow_mut();
				f.tick(now);
				f.draw(&mut ctx);
			},
			move || {
				let _ = window
					.remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
				let _ = window.remove_event_listener_with_callback(
					"mousemove",
					pointer_cb.as_ref().unchecked_ref(),
				);
			},
		);
	});

	on_cleanup(move || handle.stop());

	view! {
		<canvas
			node_ref=canvas_ref
			class="night-sky-canvas"
			style="position: fixed; inset: 0; display: block; z-index: 0; pointer-events: none;"
		/>
	}
}
