//! Visual and kinematic configuration for the particle field.
//!
//! Both populations are described by plain style structs so the same update
//! and render code drives every preset. All structs deserialize with
//! `#[serde(default)]`, which lets a page override single fields from JSON.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	#[serde(default = "opaque")]
	pub a: f64,
}

fn opaque() -> f64 {
	1.0
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// HSLA color. Hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Hsla {
	pub h: f64,
	pub s: f64,
	pub l: f64,
	#[serde(default = "opaque")]
	pub a: f64,
}

impl Hsla {
	pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
		Self { h, s, l, a }
	}

	pub fn to_css(self) -> String {
		format!("hsla({}, {}%, {}%, {})", self.h, self.s, self.l, self.a)
	}
}

/// Which color a halo layer is painted with.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerTint {
	/// The particle's own color.
	Base,
	/// Near-white highlight. For hue-tinted particles this is the particle hue
	/// at `highlight_lightness`.
	Highlight,
}

/// One concentric circle of a particle's halo.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct HaloLayer {
	/// Radius multiplier relative to the displayed radius.
	pub radius: f64,
	/// Alpha multiplier relative to the displayed opacity.
	pub alpha: f64,
	pub tint: LayerTint,
}

impl HaloLayer {
	pub const fn new(radius: f64, alpha: f64, tint: LayerTint) -> Self {
		Self {
			radius,
			alpha,
			tint,
		}
	}
}

/// Sinusoidal brightness pulse: `intensity = sin(phase) * amplitude + offset`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PulseStyle {
	pub amplitude: f64,
	pub offset: f64,
	/// Displayed radius is `size * (size_base + intensity * size_gain)`.
	pub size_base: f64,
	pub size_gain: f64,
	pub speed_min: f64,
	pub speed_max: f64,
}

impl Default for PulseStyle {
	fn default() -> Self {
		Self {
			amplitude: 0.4,
			offset: 0.6,
			size_base: 0.7,
			size_gain: 0.5,
			speed_min: 0.02,
			speed_max: 0.06,
		}
	}
}

impl PulseStyle {
	pub fn intensity(&self, phase: f64) -> f64 {
		phase.sin() * self.amplitude + self.offset
	}

	pub fn radius(&self, size: f64, intensity: f64) -> f64 {
		size * (self.size_base + intensity * self.size_gain)
	}
}

/// Proximity connection lines drawn between particles of one population.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ConnectionStyle {
	pub enabled: bool,
	/// Pairs at or beyond this distance are never connected.
	pub max_distance: f64,
	pub base_opacity: f64,
	/// Lines at or below this opacity are skipped.
	pub visibility_floor: f64,
	pub line_width: f64,
}

impl Default for ConnectionStyle {
	fn default() -> Self {
		Self {
			enabled: true,
			max_distance: 100.0,
			base_opacity: 0.04,
			visibility_floor: 0.01,
			line_width: 0.4,
		}
	}
}

impl ConnectionStyle {
	/// Line opacity for a pair at distance `distance`, or `None` if the line
	/// should not be drawn. `pulse` scales the result (pass 1.0 for none).
	pub fn line_opacity(&self, distance: f64, pulse: f64) -> Option<f64> {
		if !self.enabled || distance >= self.max_distance {
			return None;
		}
		let opacity = self.base_opacity * (1.0 - distance / self.max_distance) * pulse;
		(opacity > self.visibility_floor).then_some(opacity)
	}
}

/// Hero population: glowing particles that wrap at the surface edges.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GlowStyle {
	pub color: Color,
	/// Maximum velocity component at seed time (uniform in `±speed`).
	pub speed: f64,
	pub size_min: f64,
	pub size_max: f64,
	pub opacity_min: f64,
	pub opacity_max: f64,
	pub glow_min: f64,
	pub glow_max: f64,
	pub wander_speed_min: f64,
	pub wander_speed_max: f64,
	pub wander_radius_min: f64,
	pub wander_radius_max: f64,
	/// Scale applied to the wander vector before it is added to velocity.
	pub wander_gain: f64,
	pub interaction_radius: f64,
	pub interaction_strength: f64,
	pub opacity_boost: f64,
	pub glow_boost: f64,
	/// Velocity multiplier applied each frame outside the pointer radius.
	pub damping: f64,
	pub max_velocity: f64,
	pub pulse: PulseStyle,
	pub halo: Vec<HaloLayer>,
	pub connections: ConnectionStyle,
}

impl Default for GlowStyle {
	fn default() -> Self {
		Self {
			color: Color::rgb(244, 221, 23),
			speed: 0.3,
			size_min: 1.5,
			size_max: 4.5,
			opacity_min: 0.2,
			opacity_max: 0.8,
			glow_min: 0.2,
			glow_max: 1.0,
			wander_speed_min: 0.015,
			wander_speed_max: 0.045,
			wander_radius_min: 30.0,
			wander_radius_max: 90.0,
			wander_gain: 0.0001,
			interaction_radius: 120.0,
			interaction_strength: 0.008,
			opacity_boost: 0.4,
			glow_boost: 0.2,
			damping: 0.999,
			max_velocity: 1.5,
			pulse: PulseStyle::default(),
			halo: vec![
				HaloLayer::new(1.8, 0.04, LayerTint::Base),
				HaloLayer::new(1.3, 0.08, LayerTint::Base),
				HaloLayer::new(1.0, 0.9, LayerTint::Base),
				HaloLayer::new(0.4, 0.95, LayerTint::Highlight),
			],
			connections: ConnectionStyle::default(),
		}
	}
}

/// Content population: hue-tinted particles that bounce off the edges.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DriftStyle {
	pub speed: f64,
	pub size_min: f64,
	pub size_max: f64,
	pub opacity_min: f64,
	pub opacity_max: f64,
	pub hue_min: f64,
	pub hue_max: f64,
	pub saturation_min: f64,
	pub saturation_max: f64,
	pub lightness: f64,
	pub highlight_lightness: f64,
	pub bounce_min: f64,
	pub bounce_max: f64,
	pub bounce_decay_min: f64,
	pub bounce_decay_max: f64,
	/// Bounce coefficients never decay below this.
	pub bounce_floor: f64,
	/// Opacity multiplier applied on a wall hit.
	pub bounce_dim: f64,
	/// Chance of a vertical kick on a horizontal wall hit.
	pub bounce_kick_chance: f64,
	pub bounce_kick: f64,
	pub interaction_radius_min: f64,
	pub interaction_radius_max: f64,
	pub interaction_strength: f64,
	/// Random extra strength added per frame, uniform in `0..jitter`.
	pub interaction_jitter: f64,
	pub scatter_chance: f64,
	pub scatter: f64,
	pub opacity_boost: f64,
	/// Per-frame opacity step back toward the base value.
	pub opacity_restore: f64,
	pub damping: f64,
	pub max_velocity: f64,
	pub pulse: PulseStyle,
	pub halo: Vec<HaloLayer>,
	pub connections: ConnectionStyle,
	pub connection_color: Hsla,
}

impl Default for DriftStyle {
	fn default() -> Self {
		Self {
			speed: 0.6,
			size_min: 1.5,
			size_max: 4.3,
			opacity_min: 0.3,
			opacity_max: 0.8,
			hue_min: 200.0,
			hue_max: 240.0,
			saturation_min: 20.0,
			saturation_max: 50.0,
			lightness: 70.0,
			highlight_lightness: 85.0,
			bounce_min: 0.4,
			bounce_max: 1.1,
			bounce_decay_min: 0.01,
			bounce_decay_max: 0.99,
			bounce_floor: 0.25,
			bounce_dim: 0.7,
			bounce_kick_chance: 0.3,
			bounce_kick: 0.8,
			interaction_radius_min: 60.0,
			interaction_radius_max: 140.0,
			interaction_strength: 0.015,
			interaction_jitter: 0.01,
			scatter_chance: 0.1,
			scatter: 0.5,
			opacity_boost: 0.4,
			opacity_restore: 0.008,
			damping: 0.995,
			max_velocity: 2.5,
			pulse: PulseStyle {
				amplitude: 0.3,
				offset: 0.7,
				size_base: 0.8,
				size_gain: 0.4,
				speed_min: 0.02,
				speed_max: 0.05,
			},
			halo: vec![
				HaloLayer::new(2.5, 0.3, LayerTint::Base),
				HaloLayer::new(1.0, 1.0, LayerTint::Base),
				HaloLayer::new(0.4, 0.7, LayerTint::Highlight),
			],
			connections: ConnectionStyle {
				enabled: true,
				max_distance: 120.0,
				base_opacity: 0.03,
				visibility_floor: 0.005,
				line_width: 0.5,
			},
			connection_color: Hsla::new(200.0, 30.0, 70.0, 1.0),
		}
	}
}

/// Population counts as a function of viewport width.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
	pub hero_min: usize,
	pub hero_max: usize,
	/// Viewport pixels per hero particle.
	pub hero_divisor: f64,
	pub content_min: usize,
	pub content_max: usize,
	pub content_divisor: f64,
	/// Viewports narrower than this count as mobile.
	pub narrow_width: f64,
	pub narrow_multiplier: f64,
	/// On narrow viewports only every n-th animation frame updates and draws.
	pub narrow_frame_interval: u32,
	/// Resize events are coalesced over this window before reseeding.
	pub resize_debounce_ms: i32,
}

impl Default for SizingConfig {
	fn default() -> Self {
		Self {
			hero_min: 15,
			hero_max: 60,
			hero_divisor: 30.0,
			content_min: 8,
			content_max: 40,
			content_divisor: 50.0,
			narrow_width: 768.0,
			narrow_multiplier: 0.4,
			narrow_frame_interval: 2,
			resize_debounce_ms: 150,
		}
	}
}

/// Scroll-driven surface opacity switch.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
	/// Hero canvas opacity while the hero region is on screen.
	pub hero_opacity: f64,
	/// Content canvas opacity once the hero region has scrolled away.
	pub content_opacity: f64,
	/// Content particles appear once the hero bottom edge is at or above this
	/// fraction of the viewport height.
	pub content_threshold: f64,
}

impl Default for VisibilityConfig {
	fn default() -> Self {
		Self {
			hero_opacity: 0.9,
			content_opacity: 0.6,
			content_threshold: 0.1,
		}
	}
}

/// Complete configuration for a particle field.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FieldTheme {
	pub name: String,
	/// CSS selector of the hero region the glow population covers.
	pub hero_selector: String,
	pub glow: GlowStyle,
	pub drift: DriftStyle,
	pub sizing: SizingConfig,
	pub visibility: VisibilityConfig,
}

impl FieldTheme {
	/// Gold hero sparks over blue-gray drifting dust (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default".into(),
			hero_selector: ".hero".into(),
			glow: GlowStyle::default(),
			drift: DriftStyle::default(),
			sizing: SizingConfig::default(),
			visibility: VisibilityConfig::default(),
		}
	}

	/// Sparser, slower field with gentle pointer response
	pub fn calm() -> Self {
		let base = Self::default_theme();
		Self {
			name: "calm".into(),
			glow: GlowStyle {
				speed: 0.2,
				interaction_strength: 0.004,
				max_velocity: 1.0,
				..base.glow
			},
			drift: DriftStyle {
				speed: 0.4,
				interaction_strength: 0.008,
				interaction_jitter: 0.004,
				scatter_chance: 0.0,
				max_velocity: 1.5,
				..base.drift
			},
			sizing: SizingConfig {
				hero_max: 40,
				hero_divisor: 40.0,
				content_max: 25,
				content_divisor: 70.0,
				..base.sizing
			},
			..base
		}
	}
}

impl Default for FieldTheme {
	fn default() -> Self {
		Self::default_theme()
	}
}
