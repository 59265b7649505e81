//! Browser wiring for the particle field.
//!
//! [`ParticleField`] owns both canvases, the simulation state, and every
//! callback it registers with the browser: a debounced `resize` listener, a
//! `scroll` listener for visibility coupling, a document `mousemove` listener
//! for the pointer, and the `requestAnimationFrame` loop. Dropping or
//! disposing the field unregisters all of them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::sizing::{HeroRect, ResizeDebounce, Settle, Viewport};
use super::state::FieldState;
use super::theme::FieldTheme;

type Callback = Closure<dyn FnMut()>;

fn viewport(window: &Window) -> Option<Viewport> {
	Some(Viewport {
		width: window.inner_width().ok()?.as_f64()?,
		height: window.inner_height().ok()?.as_f64()?,
	})
}

fn hero_rect(document: &Document, selector: &str) -> Option<HeroRect> {
	let element = document.query_selector(selector).ok()??;
	let rect = element.get_bounding_client_rect();
	Some(HeroRect {
		top: rect.top(),
		bottom: rect.bottom(),
		height: rect.height(),
	})
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Clock for the resize debounce. Without one every settle check reseeds.
fn now(window: &Window) -> f64 {
	window.performance().map_or(f64::NAN, |p| p.now())
}

fn schedule(window: &Window, callback: &Callback, delay_ms: f64) -> Option<i32> {
	window
		.set_timeout_with_callback_and_timeout_and_arguments_0(
			callback.as_ref().unchecked_ref(),
			delay_ms.ceil().max(0.0) as i32,
		)
		.ok()
}

/// Everything the browser callbacks share: simulation state, randomness,
/// the resize debounce, and the canvases the state draws to.
struct FieldRuntime {
	state: FieldState,
	rng: StdRng,
	debounce: ResizeDebounce,
	hero_canvas: HtmlCanvasElement,
	content_canvas: HtmlCanvasElement,
	hero_ctx: CanvasRenderingContext2d,
	content_ctx: CanvasRenderingContext2d,
}

impl FieldRuntime {
	/// Copy surface sizes from the state onto the canvas elements. The hero
	/// canvas is absolutely positioned at the hero region's document offset.
	fn apply_sizes(&self, hero: Option<HeroRect>, scroll_y: f64) {
		let hero_surface = self.state.hero_surface;
		self.hero_canvas.set_width(hero_surface.width as u32);
		self.hero_canvas.set_height(hero_surface.height as u32);
		if let Some(rect) = hero {
			let style = self.hero_canvas.style();
			let _ = style.set_property("top", &format!("{}px", rect.top + scroll_y));
			let _ = style.set_property("height", &format!("{}px", rect.height));
		}

		let content_surface = self.state.content_surface;
		self.content_canvas.set_width(content_surface.width as u32);
		self.content_canvas.set_height(content_surface.height as u32);
	}

	fn apply_visibility(&self, hero: Option<HeroRect>) {
		let visibility = self.state.visibility(hero);
		if let Some(opacity) = visibility.hero {
			let _ = self
				.hero_canvas
				.style()
				.set_property("opacity", &opacity.to_string());
		}
		if let Some(opacity) = visibility.content {
			let _ = self
				.content_canvas
				.style()
				.set_property("opacity", &opacity.to_string());
		}
	}

	/// Re-measure the viewport and hero region, then reseed both populations.
	fn resize(&mut self, window: &Window, document: &Document) {
		let Some(viewport) = viewport(window) else {
			return;
		};
		let hero = hero_rect(document, &self.state.theme.hero_selector);
		self.state.resize(viewport, hero, &mut self.rng);
		self.apply_sizes(hero, window.scroll_y().unwrap_or(0.0));
		self.apply_visibility(hero);
	}

	fn render(&self) {
		render::render_hero(&self.state, &self.hero_ctx);
		render::render_content(&self.state, &self.content_ctx);
	}
}

/// A running dual-canvas particle field.
///
/// Construct with [`ParticleField::attach`]; stop with
/// [`ParticleField::dispose`] (also run on drop).
pub struct ParticleField {
	runtime: Rc<RefCell<FieldRuntime>>,
	window: Window,
	document: Document,
	animate: Rc<RefCell<Option<Callback>>>,
	frame_handle: Rc<Cell<Option<i32>>>,
	settle: Rc<RefCell<Option<Callback>>>,
	resize_timer: Rc<Cell<Option<i32>>>,
	on_resize: Callback,
	on_scroll: Callback,
	on_mousemove: Closure<dyn FnMut(MouseEvent)>,
}

impl ParticleField {
	/// Start a particle field drawing to the two given canvases.
	///
	/// Sizes both canvases, seeds both populations, registers input listeners
	/// and schedules the first frame. Returns `None` if the browser window or a
	/// 2D context is unavailable.
	pub fn attach(
		hero_canvas: HtmlCanvasElement,
		content_canvas: HtmlCanvasElement,
		theme: FieldTheme,
	) -> Option<Self> {
		let window = web_sys::window()?;
		let document = window.document()?;
		let (Some(hero_ctx), Some(content_ctx)) =
			(context_2d(&hero_canvas), context_2d(&content_canvas))
		else {
			warn!("particle-field: 2d canvas context unavailable");
			return None;
		};
		let viewport = viewport(&window)?;

		let hero = hero_rect(&document, &theme.hero_selector);
		if hero.is_none() {
			warn!(
				"particle-field: no element matches {:?}, hero surface left unsized",
				theme.hero_selector
			);
		}

		let mut rng = StdRng::from_entropy();
		let debounce = ResizeDebounce::new(f64::from(theme.sizing.resize_debounce_ms));
		let state = FieldState::new(theme, viewport, hero, &mut rng);
		info!(
			"particle-field: {} hero, {} content particles ({}x{})",
			state.hero.len(),
			state.content.len(),
			viewport.width,
			viewport.height
		);

		let runtime = FieldRuntime {
			state,
			rng,
			debounce,
			hero_canvas,
			content_canvas,
			hero_ctx,
			content_ctx,
		};
		runtime.apply_sizes(hero, window.scroll_y().unwrap_or(0.0));
		runtime.apply_visibility(hero);
		let runtime = Rc::new(RefCell::new(runtime));

		let settle: Rc<RefCell<Option<Callback>>> = Rc::new(RefCell::new(None));
		let resize_timer: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
		Self::install_settle(&runtime, &document, &settle, &resize_timer);
		let on_resize = Self::resize_listener(&runtime, &settle, &resize_timer);
		let on_scroll = Self::scroll_listener(runtime.clone(), document.clone());

		let runtime_mm = runtime.clone();
		let on_mousemove = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
			runtime_mm
				.borrow_mut()
				.state
				.set_pointer(ev.client_x() as f64, ev.client_y() as f64);
		});

		let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
		let _ = window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
		let _ = document
			.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());

		let field = Self {
			runtime,
			window,
			document,
			animate: Rc::new(RefCell::new(None)),
			frame_handle: Rc::new(Cell::new(None)),
			settle,
			resize_timer,
			on_resize,
			on_scroll,
			on_mousemove,
		};
		field.start_loop();
		Some(field)
	}

	/// Settle check run when the debounce timer fires: reseed once the burst
	/// is over, otherwise wait out the rest of the window.
	fn install_settle(
		runtime: &Rc<RefCell<FieldRuntime>>,
		document: &Document,
		settle: &Rc<RefCell<Option<Callback>>>,
		timer: &Rc<Cell<Option<i32>>>,
	) {
		let (runtime, document, settle_inner, timer) = (
			runtime.clone(),
			document.clone(),
			settle.clone(),
			timer.clone(),
		);
		*settle.borrow_mut() = Some(Closure::new(move || {
			timer.set(None);
			let Some(window) = web_sys::window() else {
				return;
			};
			let mut rt = runtime.borrow_mut();
			match rt.debounce.poll(now(&window)) {
				Settle::Reseed => rt.resize(&window, &document),
				Settle::Wait(ms) => {
					if let Some(ref cb) = *settle_inner.borrow() {
						timer.set(schedule(&window, cb, ms));
					}
				}
				Settle::Idle => {}
			}
		}));
	}

	/// Record each resize event; the first of a burst schedules a settle check.
	fn resize_listener(
		runtime: &Rc<RefCell<FieldRuntime>>,
		settle: &Rc<RefCell<Option<Callback>>>,
		timer: &Rc<Cell<Option<i32>>>,
	) -> Callback {
		let (runtime, settle, timer) = (runtime.clone(), settle.clone(), timer.clone());
		Closure::new(move || {
			let Some(window) = web_sys::window() else {
				return;
			};
			let delay = {
				let mut rt = runtime.borrow_mut();
				if !rt.debounce.event(now(&window)) {
					return;
				}
				rt.debounce.delay_ms()
			};
			if let Some(ref cb) = *settle.borrow() {
				timer.set(schedule(&window, cb, delay));
			}
		})
	}

	fn scroll_listener(runtime: Rc<RefCell<FieldRuntime>>, document: Document) -> Callback {
		Closure::new(move || {
			let mut rt = runtime.borrow_mut();
			let hero = hero_rect(&document, &rt.state.theme.hero_selector);
			rt.state.set_hero_top(hero.map(|rect| rect.top));
			rt.apply_visibility(hero);
		})
	}

	fn start_loop(&self) {
		let (runtime, animate_inner, handle_inner) = (
			self.runtime.clone(),
			self.animate.clone(),
			self.frame_handle.clone(),
		);
		*self.animate.borrow_mut() = Some(Closure::new(move || {
			{
				let mut guard = runtime.borrow_mut();
				let rt = &mut *guard;
				if rt.state.tick(&mut rt.rng) {
					rt.render();
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let handle = web_sys::window()
					.and_then(|w| w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
				handle_inner.set(handle);
			}
		}));
		if let Some(ref cb) = *self.animate.borrow() {
			let handle = self
				.window
				.request_animation_frame(cb.as_ref().unchecked_ref())
				.ok();
			self.frame_handle.set(handle);
		}
	}

	/// Stop the loop, unregister listeners, detach both canvases and clear
	/// both populations. Safe to call more than once.
	pub fn dispose(&mut self) {
		if self.runtime.borrow().state.is_disposed() {
			return;
		}

		if let Some(handle) = self.frame_handle.take() {
			let _ = self.window.cancel_animation_frame(handle);
		}
		// Dropping the self-scheduling closures breaks their Rc cycles.
		self.animate.borrow_mut().take();
		if let Some(handle) = self.resize_timer.take() {
			self.window.clear_timeout_with_handle(handle);
		}
		self.settle.borrow_mut().take();

		let _ = self
			.window
			.remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
		let _ = self
			.window
			.remove_event_listener_with_callback("scroll", self.on_scroll.as_ref().unchecked_ref());
		let _ = self.document.remove_event_listener_with_callback(
			"mousemove",
			self.on_mousemove.as_ref().unchecked_ref(),
		);

		let mut rt = self.runtime.borrow_mut();
		rt.debounce.cancel();
		rt.state.dispose();
		rt.hero_canvas.remove();
		rt.content_canvas.remove();
		info!("particle-field: disposed");
	}
}

impl Drop for ParticleField {
	fn drop(&mut self) {
		self.dispose();
	}
}
