//! Particle kinematics for the two populations.
//!
//! Glow particles steer with a slow wander force and wrap at the surface
//! edges. Drift particles reflect off the edges, losing restitution with each
//! bounce. Both respond to the pointer and pulse in brightness.

use std::f64::consts::TAU;

use rand::Rng;

use super::sizing::Surface;
use super::theme::{DriftStyle, GlowStyle};

/// Pointer distances below this have no usable direction.
const MIN_POINTER_DISTANCE: f64 = 1e-3;

/// Pointer position in the coordinate space of one surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
	pub x: f64,
	pub y: f64,
}

/// Result of a particle sitting inside the pointer's interaction radius.
#[derive(Clone, Copy, Debug)]
struct PointerHit {
	/// `(R - d) / R`, in `(0, 1]`.
	force: f64,
	/// Unit vector from the particle toward the pointer, if defined.
	toward: Option<(f64, f64)>,
}

fn pointer_hit(x: f64, y: f64, pointer: Option<Pointer>, radius: f64) -> Option<PointerHit> {
	let pointer = pointer?;
	let (dx, dy) = (pointer.x - x, pointer.y - y);
	let distance = (dx * dx + dy * dy).sqrt();
	if !(distance < radius) {
		return None;
	}
	let toward = (distance >= MIN_POINTER_DISTANCE).then(|| (dx / distance, dy / distance));
	Some(PointerHit {
		force: (radius - distance) / radius,
		toward,
	})
}

/// Uniform sample in `[min, max)`, or `min` for an empty range.
fn uniform<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
	if max > min {
		rng.gen_range(min..max)
	} else {
		min
	}
}

/// Uniform sample in `[-half, half)`.
fn symmetric<R: Rng>(rng: &mut R, half: f64) -> f64 {
	uniform(rng, -half, half)
}

fn chance<R: Rng>(rng: &mut R, probability: f64) -> bool {
	probability > 0.0 && rng.gen_range(0.0..1.0) < probability
}

/// Rescale `(vx, vy)` so its magnitude does not exceed `max`.
pub fn clamp_speed(vx: f64, vy: f64, max: f64) -> (f64, f64) {
	let speed = (vx * vx + vy * vy).sqrt();
	if speed > max {
		(vx / speed * max, vy / speed * max)
	} else {
		(vx, vy)
	}
}

fn wrap(value: f64, max: f64) -> f64 {
	if value < 0.0 {
		max
	} else if value > max {
		0.0
	} else {
		value
	}
}

/// A hero-region particle.
#[derive(Clone, Debug)]
pub struct GlowParticle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub opacity: f64,
	pub base_opacity: f64,
	pub glow: f64,
	pub base_glow: f64,
	pub phase: f64,
	pub phase_speed: f64,
	pub wander_angle: f64,
	pub wander_speed: f64,
	pub wander_radius: f64,
	/// Pulse intensity computed by the most recent step.
	pub pulse_intensity: f64,
}

impl GlowParticle {
	pub fn random<R: Rng>(style: &GlowStyle, surface: Surface, rng: &mut R) -> Self {
		let base_opacity = uniform(rng, style.opacity_min, style.opacity_max);
		let base_glow = uniform(rng, style.glow_min, style.glow_max);
		let phase = uniform(rng, 0.0, TAU);
		Self {
			x: uniform(rng, 0.0, surface.width),
			y: uniform(rng, 0.0, surface.height),
			vx: symmetric(rng, style.speed),
			vy: symmetric(rng, style.speed),
			size: uniform(rng, style.size_min, style.size_max),
			opacity: base_opacity,
			base_opacity,
			glow: base_glow,
			base_glow,
			phase,
			phase_speed: uniform(rng, style.pulse.speed_min, style.pulse.speed_max),
			wander_angle: uniform(rng, 0.0, TAU),
			wander_speed: uniform(rng, style.wander_speed_min, style.wander_speed_max),
			wander_radius: uniform(rng, style.wander_radius_min, style.wander_radius_max),
			pulse_intensity: style.pulse.intensity(phase),
		}
	}

	/// Advance one frame: wander, pointer force, integrate, wrap, cap speed,
	/// pulse.
	pub fn step(&mut self, style: &GlowStyle, surface: Surface, pointer: Option<Pointer>) {
		self.wander_angle += self.wander_speed;
		self.vx += self.wander_angle.cos() * self.wander_radius * style.wander_gain;
		self.vy += self.wander_angle.sin() * self.wander_radius * style.wander_gain;

		match pointer_hit(self.x, self.y, pointer, style.interaction_radius) {
			Some(hit) => {
				if let Some((ux, uy)) = hit.toward {
					self.vx -= ux * hit.force * style.interaction_strength;
					self.vy -= uy * hit.force * style.interaction_strength;
				}
				self.opacity = (self.base_opacity + hit.force * style.opacity_boost).min(1.0);
				self.glow = (self.glow + hit.force * style.glow_boost).min(1.0);
			}
			None => {
				self.opacity = self.base_opacity;
				self.glow = self.base_glow;
				self.vx *= style.damping;
				self.vy *= style.damping;
			}
		}

		self.x += self.vx;
		self.y += self.vy;
		self.x = wrap(self.x, surface.width);
		self.y = wrap(self.y, surface.height);

		(self.vx, self.vy) = clamp_speed(self.vx, self.vy, style.max_velocity);

		self.pulse_intensity = style.pulse.intensity(self.phase);
		self.phase += self.phase_speed;
	}

	pub fn display_opacity(&self) -> f64 {
		self.opacity * self.pulse_intensity
	}

	pub fn display_radius(&self, style: &GlowStyle) -> f64 {
		style.pulse.radius(self.size, self.pulse_intensity)
	}
}

/// A full-viewport content particle.
#[derive(Clone, Debug)]
pub struct DriftParticle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub opacity: f64,
	pub base_opacity: f64,
	pub phase: f64,
	pub phase_speed: f64,
	/// Restitution applied to the reflected velocity component.
	pub bounce: f64,
	/// Geometric decay applied to `bounce` on each wall hit.
	pub bounce_decay: f64,
	pub hue: f64,
	pub saturation: f64,
	pub interaction_radius: f64,
	/// Pulse intensity computed by the most recent step.
	pub pulse_intensity: f64,
}

impl DriftParticle {
	pub fn random<R: Rng>(style: &DriftStyle, surface: Surface, rng: &mut R) -> Self {
		let base_opacity = uniform(rng, style.opacity_min, style.opacity_max);
		let phase = uniform(rng, 0.0, TAU);
		Self {
			x: uniform(rng, 0.0, surface.width),
			y: uniform(rng, 0.0, surface.height),
			vx: symmetric(rng, style.speed),
			vy: symmetric(rng, style.speed),
			size: uniform(rng, style.size_min, style.size_max),
			opacity: base_opacity,
			base_opacity,
			phase,
			phase_speed: uniform(rng, style.pulse.speed_min, style.pulse.speed_max),
			bounce: uniform(rng, style.bounce_min, style.bounce_max),
			bounce_decay: uniform(rng, style.bounce_decay_min, style.bounce_decay_max),
			hue: uniform(rng, style.hue_min, style.hue_max),
			saturation: uniform(rng, style.saturation_min, style.saturation_max),
			interaction_radius: uniform(
				rng,
				style.interaction_radius_min,
				style.interaction_radius_max,
			),
			pulse_intensity: style.pulse.intensity(phase),
		}
	}

	/// Advance one frame: pointer force, integrate, bounce, cap speed, pulse.
	///
	/// Returns `true` if the particle hit a wall this frame.
	pub fn step<R: Rng>(
		&mut self,
		style: &DriftStyle,
		surface: Surface,
		pointer: Option<Pointer>,
		rng: &mut R,
	) -> bool {
		match pointer_hit(self.x, self.y, pointer, self.interaction_radius) {
			Some(hit) => {
				let strength = style.interaction_strength + uniform(rng, 0.0, style.interaction_jitter);
				if let Some((ux, uy)) = hit.toward {
					self.vx -= ux * hit.force * strength;
					self.vy -= uy * hit.force * strength;
				}
				self.opacity = (self.base_opacity + hit.force * style.opacity_boost).min(1.0);
				if chance(rng, style.scatter_chance) {
					self.vx += symmetric(rng, style.scatter / 2.0);
					self.vy += symmetric(rng, style.scatter / 2.0);
				}
			}
			None => {
				self.vx *= style.damping;
				self.vy *= style.damping;
				self.opacity = if self.opacity < self.base_opacity {
					(self.opacity + style.opacity_restore).min(self.base_opacity)
				} else {
					(self.opacity - style.opacity_restore).max(self.base_opacity)
				};
			}
		}

		self.x += self.vx;
		self.y += self.vy;

		let mut hit_wall = false;
		if self.x < 0.0 || self.x > surface.width {
			self.vx = -self.vx * self.bounce;
			self.x = self.x.clamp(0.0, surface.width);
			if chance(rng, style.bounce_kick_chance) {
				self.vy += symmetric(rng, style.bounce_kick / 2.0);
			}
			hit_wall = true;
		}
		if self.y < 0.0 || self.y > surface.height {
			self.vy = -self.vy * self.bounce;
			self.y = self.y.clamp(0.0, surface.height);
			hit_wall = true;
		}
		if hit_wall {
			self.opacity = self.base_opacity * style.bounce_dim;
			self.bounce = (self.bounce * self.bounce_decay).max(style.bounce_floor);
		}

		(self.vx, self.vy) = clamp_speed(self.vx, self.vy, style.max_velocity);

		self.pulse_intensity = style.pulse.intensity(self.phase);
		self.phase += self.phase_speed;

		hit_wall
	}

	pub fn display_opacity(&self) -> f64 {
		self.opacity * self.pulse_intensity
	}

	pub fn display_radius(&self, style: &DriftStyle) -> f64 {
		style.pulse.radius(self.size, self.pulse_intensity)
	}
}
