//! Particle field state: both populations, their surfaces, and pointer input.
//!
//! Holds no browser handles, so it runs and is tested natively. The browser
//! glue feeds it viewport, scroll and pointer updates and
//! calls [`FieldState::tick`] once per animation frame.

use log::debug;
use rand::Rng;

use super::particles::{DriftParticle, GlowParticle, Pointer};
use super::sizing::{HeroRect, PopulationSizes, Surface, Viewport};
use super::theme::{ConnectionStyle, FieldTheme, VisibilityConfig};

/// The two particle populations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopulationKind {
	/// Glow particles over the hero region.
	Hero,
	/// Drift particles over the whole viewport.
	Content,
}

/// A line segment between two nearby particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
	pub opacity: f64,
}

/// Canvas opacities derived from the hero region's position.
/// `None` leaves that canvas untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Visibility {
	pub hero: Option<f64>,
	pub content: Option<f64>,
}

/// Decide canvas opacities from the hero region's viewport-relative bounds.
///
/// The hero canvas shows while any of the hero region is at or below the top
/// of the viewport. The content canvas shows once the hero bottom edge rises
/// to `content_threshold` of the viewport height. Without a hero region both
/// canvases keep their current opacity.
pub fn visibility(
	config: &VisibilityConfig,
	hero: Option<HeroRect>,
	viewport_height: f64,
) -> Visibility {
	let Some(rect) = hero else {
		return Visibility::default();
	};
	let hero_opacity = if rect.bottom < 0.0 {
		0.0
	} else {
		config.hero_opacity
	};
	let content_opacity = if rect.bottom > viewport_height * config.content_threshold {
		0.0
	} else {
		config.content_opacity
	};
	Visibility {
		hero: Some(hero_opacity),
		content: Some(content_opacity),
	}
}

/// All pairwise connections among `points` (`(x, y, pulse)` triples).
///
/// Line opacity is scaled by the pulse of the first particle of each pair.
/// Quadratic in the number of points; populations are capped well below the
/// size where that matters.
pub fn connections(points: &[(f64, f64, f64)], style: &ConnectionStyle) -> Vec<Connection> {
	let mut lines = Vec::new();
	if !style.enabled {
		return lines;
	}
	for (i, &(x1, y1, pulse)) in points.iter().enumerate() {
		for &(x2, y2, _) in &points[i + 1..] {
			let (dx, dy) = (x1 - x2, y1 - y2);
			let distance = (dx * dx + dy * dy).sqrt();
			if let Some(opacity) = style.line_opacity(distance, pulse) {
				lines.push(Connection {
					x1,
					y1,
					x2,
					y2,
					opacity,
				});
			}
		}
	}
	lines
}

/// Simulation state for both populations.
///
/// Created once when the field mounts, reseeded wholesale on resize, and
/// stepped once per animation frame. Population sizes only change on reseed.
pub struct FieldState {
	pub theme: FieldTheme,
	pub hero: Vec<GlowParticle>,
	pub content: Vec<DriftParticle>,
	pub hero_surface: Surface,
	pub content_surface: Surface,
	pub viewport: Viewport,
	/// Viewport-relative top of the hero region, if present.
	pub hero_top: Option<f64>,
	/// Last pointer position in viewport coordinates.
	pointer: Option<Pointer>,
	/// Animation frames seen, including throttled ones.
	pub frame: u64,
	disposed: bool,
}

impl FieldState {
	pub fn new<R: Rng>(
		theme: FieldTheme,
		viewport: Viewport,
		hero: Option<HeroRect>,
		rng: &mut R,
	) -> Self {
		let mut state = Self {
			theme,
			hero: Vec::new(),
			content: Vec::new(),
			hero_surface: Surface::default(),
			content_surface: Surface::default(),
			viewport,
			hero_top: None,
			pointer: None,
			frame: 0,
			disposed: false,
		};
		state.resize(viewport, hero, rng);
		state
	}

	/// Resize both surfaces for a new viewport and reseed both populations.
	///
	/// Without a hero region the hero surface keeps its previous size.
	pub fn resize<R: Rng>(&mut self, viewport: Viewport, hero: Option<HeroRect>, rng: &mut R) {
		self.viewport = viewport;
		self.content_surface = Surface::new(viewport.width, viewport.height);
		if let Some(rect) = hero {
			self.hero_surface = Surface::new(viewport.width, rect.height);
		}
		self.set_hero_top(hero.map(|rect| rect.top));
		self.reseed(PopulationKind::Hero, rng);
		self.reseed(PopulationKind::Content, rng);
	}

	pub fn population_sizes(&self) -> PopulationSizes {
		self.theme.sizing.population_sizes(self.viewport.width)
	}

	/// Replace a population with freshly randomized particles.
	pub fn reseed<R: Rng>(&mut self, kind: PopulationKind, rng: &mut R) {
		if self.disposed {
			return;
		}
		let sizes = self.population_sizes();
		match kind {
			PopulationKind::Hero => {
				let (style, surface) = (&self.theme.glow, self.hero_surface);
				self.hero = (0..sizes.hero)
					.map(|_| GlowParticle::random(style, surface, rng))
					.collect();
			}
			PopulationKind::Content => {
				let (style, surface) = (&self.theme.drift, self.content_surface);
				self.content = (0..sizes.content)
					.map(|_| DriftParticle::random(style, surface, rng))
					.collect();
			}
		}
		debug!(
			"particle-field: reseeded {:?} ({} hero, {} content)",
			kind,
			self.hero.len(),
			self.content.len()
		);
	}

	/// Record a pointer move in viewport coordinates.
	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer = Some(Pointer { x, y });
	}

	pub fn pointer(&self) -> Option<Pointer> {
		self.pointer
	}

	/// Track the hero region's viewport-relative top (changes on scroll).
	pub fn set_hero_top(&mut self, top: Option<f64>) {
		if top.is_some() {
			self.hero_top = top;
		}
	}

	/// Pointer translated into hero-surface coordinates.
	pub fn hero_pointer(&self) -> Option<Pointer> {
		let pointer = self.pointer?;
		let top = self.hero_top.unwrap_or(0.0);
		Some(Pointer {
			x: pointer.x,
			y: pointer.y - top,
		})
	}

	/// Count an animation frame and step the simulation unless the frame is
	/// throttled. Returns whether the frame ran.
	pub fn tick<R: Rng>(&mut self, rng: &mut R) -> bool {
		if self.disposed {
			return false;
		}
		let runs = self.theme.sizing.runs_frame(self.viewport.width, self.frame);
		self.frame = self.frame.wrapping_add(1);
		if runs {
			self.step(rng);
		}
		runs
	}

	/// Advance every particle of both populations by one frame.
	pub fn step<R: Rng>(&mut self, rng: &mut R) {
		let hero_pointer = self.hero_pointer();
		for p in &mut self.hero {
			p.step(&self.theme.glow, self.hero_surface, hero_pointer);
		}
		for p in &mut self.content {
			p.step(&self.theme.drift, self.content_surface, self.pointer, rng);
		}
	}

	pub fn hero_connections(&self) -> Vec<Connection> {
		let points: Vec<_> = self
			.hero
			.iter()
			.map(|p| (p.x, p.y, p.pulse_intensity))
			.collect();
		connections(&points, &self.theme.glow.connections)
	}

	pub fn content_connections(&self) -> Vec<Connection> {
		let points: Vec<_> = self.content.iter().map(|p| (p.x, p.y, 1.0)).collect();
		connections(&points, &self.theme.drift.connections)
	}

	pub fn visibility(&self, hero: Option<HeroRect>) -> Visibility {
		visibility(&self.theme.visibility, hero, self.viewport.height)
	}

	/// Drop both populations and stop accepting ticks or reseeds.
	pub fn dispose(&mut self) {
		self.hero.clear();
		self.content.clear();
		self.pointer = None;
		self.disposed = true;
	}

	pub fn is_disposed(&self) -> bool {
		self.disposed
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn hero_rect() -> HeroRect {
		HeroRect {
			top: 0.0,
			bottom: 700.0,
			height: 700.0,
		}
	}

	fn desktop() -> Viewport {
		Viewport {
			width: 1200.0,
			height: 800.0,
		}
	}

	#[test]
	fn new_sizes_surfaces_and_populations() {
		let mut rng = StdRng::seed_from_u64(1);
		let state = FieldState::new(FieldTheme::default(), desktop(), Some(hero_rect()), &mut rng);
		assert_eq!(state.hero_surface, Surface::new(1200.0, 700.0));
		assert_eq!(state.content_surface, Surface::new(1200.0, 800.0));
		assert_eq!(state.hero.len(), 40);
		assert_eq!(state.content.len(), 24);
	}

	#[test]
	fn missing_hero_region_keeps_previous_surface() {
		let mut rng = StdRng::seed_from_u64(2);
		let mut state =
			FieldState::new(FieldTheme::default(), desktop(), Some(hero_rect()), &mut rng);
		let wider = Viewport {
			width: 1400.0,
			height: 900.0,
		};
		state.resize(wider, None, &mut rng);
		assert_eq!(state.hero_surface, Surface::new(1200.0, 700.0));
		assert_eq!(state.content_surface, Surface::new(1400.0, 900.0));
		assert_eq!(state.hero_top, Some(0.0));
	}

	#[test]
	fn hero_pointer_follows_scroll_offset() {
		let mut rng = StdRng::seed_from_u64(3);
		let mut state =
			FieldState::new(FieldTheme::default(), desktop(), Some(hero_rect()), &mut rng);
		assert_eq!(state.hero_pointer(), None);
		state.set_pointer(300.0, 250.0);
		state.set_hero_top(Some(-100.0));
		assert_eq!(state.hero_pointer(), Some(Pointer { x: 300.0, y: 350.0 }));
		assert_eq!(state.pointer(), Some(Pointer { x: 300.0, y: 250.0 }));
	}

	#[test]
	fn connections_skip_far_pairs() {
		let style = ConnectionStyle::default();
		let points = [(0.0, 0.0, 1.0), (30.0, 0.0, 1.0), (500.0, 0.0, 1.0)];
		let lines = connections(&points, &style);
		assert_eq!(lines.len(), 1);
		assert!((lines[0].opacity - 0.04 * 0.7).abs() < 1e-12);
	}

	#[test]
	fn connections_scale_with_first_pulse() {
		let style = ConnectionStyle::default();
		let dim = connections(&[(0.0, 0.0, 0.5), (10.0, 0.0, 1.0)], &style);
		let bright = connections(&[(0.0, 0.0, 1.0), (10.0, 0.0, 0.5)], &style);
		assert!(dim[0].opacity < bright[0].opacity);
	}

	#[test]
	fn visibility_thresholds() {
		let config = VisibilityConfig::default();
		let rect = |bottom| {
			Some(HeroRect {
				top: bottom - 700.0,
				bottom,
				height: 700.0,
			})
		};
		let on_screen = visibility(&config, rect(600.0), 800.0);
		assert_eq!(on_screen.hero, Some(0.9));
		assert_eq!(on_screen.content, Some(0.0));

		let nearly_gone = visibility(&config, rect(50.0), 800.0);
		assert_eq!(nearly_gone.hero, Some(0.9));
		assert_eq!(nearly_gone.content, Some(0.6));

		let gone = visibility(&config, rect(-1.0), 800.0);
		assert_eq!(gone.hero, Some(0.0));
		assert_eq!(gone.content, Some(0.6));

		assert_eq!(visibility(&config, None, 800.0), Visibility::default());
	}

	#[test]
	fn narrow_viewport_throttles_ticks() {
		let mut rng = StdRng::seed_from_u64(4);
		let phone = Viewport {
			width: 400.0,
			height: 800.0,
		};
		let mut state = FieldState::new(FieldTheme::default(), phone, Some(hero_rect()), &mut rng);
		let ran: Vec<bool> = (0..4).map(|_| state.tick(&mut rng)).collect();
		assert_eq!(ran, vec![true, false, true, false]);
		assert_eq!(state.frame, 4);
	}

	#[test]
	fn dispose_clears_and_stops() {
		let mut rng = StdRng::seed_from_u64(5);
		let mut state =
			FieldState::new(FieldTheme::default(), desktop(), Some(hero_rect()), &mut rng);
		state.dispose();
		assert!(state.is_disposed());
		assert!(state.hero.is_empty() && state.content.is_empty());
		assert!(!state.tick(&mut rng));
		state.reseed(PopulationKind::Hero, &mut rng);
		assert!(state.hero.is_empty());
	}
}
