//! Leptos component hosting the particle field canvases.
//!
//! The component renders two decorative canvases and, once they are mounted,
//! hands them to a [`ParticleField`] that runs the animation loop. The field is
//! disposed when the component's owner is cleaned up.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;

use super::field::ParticleField;
use super::theme::FieldTheme;

const HERO_CANVAS_STYLE: &str = "position: absolute; left: 0; width: 100%; pointer-events: none; \
	z-index: 1; opacity: 0.9; transition: opacity 0.5s ease-in-out;";
const CONTENT_CANVAS_STYLE: &str = "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
	pointer-events: none; z-index: 2; opacity: 0;";

/// Renders the hero and content particle canvases.
///
/// The hero canvas is positioned over the element matching
/// `theme.hero_selector`; the content canvas is fixed over the viewport. Both
/// ignore pointer events so the page underneath stays interactive.
#[component]
pub fn ParticleBackdrop(#[prop(optional)] theme: Option<FieldTheme>) -> impl IntoView {
	let hero_ref = NodeRef::<leptos::html::Canvas>::new();
	let content_ref = NodeRef::<leptos::html::Canvas>::new();
	let field: Rc<RefCell<Option<ParticleField>>> = Rc::new(RefCell::new(None));
	let field_init = field.clone();
	let theme = theme.unwrap_or_default();

	Effect::new(move |_| {
		let (Some(hero), Some(content)) = (hero_ref.get(), content_ref.get()) else {
			return;
		};
		if field_init.borrow().is_some() {
			return;
		}
		*field_init.borrow_mut() = ParticleField::attach(hero.into(), content.into(), theme.clone());
	});

	let field_cleanup = SendWrapper::new(field);
	on_cleanup(move || {
		let field = field_cleanup.borrow_mut().take();
		if let Some(mut field) = field {
			field.dispose();
		}
	});

	view! {
		<canvas
			node_ref=hero_ref
			id="hero-particle-canvas"
			class="particle-canvas"
			style=HERO_CANVAS_STYLE
		/>
		<canvas
			node_ref=content_ref
			id="content-particle-canvas"
			class="particle-canvas"
			style=CONTENT_CANVAS_STYLE
		/>
	}
}
