//! Canvas rendering for both particle populations.
//!
//! Each surface is cleared, then every particle is drawn as a stack of
//! concentric halo circles (outermost first), then connection lines are drawn
//! over the population.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::{DriftParticle, GlowParticle};
use super::sizing::Surface;
use super::state::{Connection, FieldState};
use super::theme::{Color, DriftStyle, GlowStyle, HaloLayer, Hsla, LayerTint};

/// Near-white used for the innermost glow highlight.
const HIGHLIGHT: Color = Color::rgb(255, 255, 255);

/// Halo alpha multiplier for a given glow intensity. A fully glowing particle
/// draws its halo at 1.5x, an idle one at 0.5x.
fn glow_gain(glow: f64) -> f64 {
	0.5 + glow
}

/// One filled circle to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
	pub radius: f64,
	pub fill: String,
}

/// Halo circles for a glow particle, outermost first.
pub fn glow_circles(p: &GlowParticle, style: &GlowStyle) -> Vec<Circle> {
	let opacity = p.display_opacity();
	let radius = p.display_radius(style);
	let gain = glow_gain(p.glow);
	style
		.halo
		.iter()
		.map(|layer| {
			let (color, alpha) = match layer.tint {
				LayerTint::Base => (style.color, opacity * layer.alpha * halo_gain(layer, gain)),
				LayerTint::Highlight => (HIGHLIGHT, opacity * layer.alpha),
			};
			Circle {
				radius: radius * layer.radius,
				fill: color.with_alpha(alpha).to_css(),
			}
		})
		.collect()
}

/// Only the outer layers (drawn larger than the core) respond to glow.
fn halo_gain(layer: &HaloLayer, gain: f64) -> f64 {
	if layer.radius > 1.0 { gain } else { 1.0 }
}

/// Halo circles for a drift particle, outermost first.
pub fn drift_circles(p: &DriftParticle, style: &DriftStyle) -> Vec<Circle> {
	let opacity = p.display_opacity();
	let radius = p.display_radius(style);
	style
		.halo
		.iter()
		.map(|layer| {
			let lightness = match layer.tint {
				LayerTint::Base => style.lightness,
				LayerTint::Highlight => style.highlight_lightness,
			};
			Circle {
				radius: radius * layer.radius,
				fill: Hsla::new(p.hue, p.saturation, lightness, opacity * layer.alpha).to_css(),
			}
		})
		.collect()
}

/// Draws the hero population onto its canvas.
pub fn render_hero(state: &FieldState, ctx: &CanvasRenderingContext2d) {
	clear(ctx, state.hero_surface);
	let style = &state.theme.glow;
	for p in &state.hero {
		draw_circles(ctx, p.x, p.y, &glow_circles(p, style));
	}
	let color = style.color;
	draw_connections(ctx, &state.hero_connections(), style.connections.line_width, |a| {
		color.with_alpha(a).to_css()
	});
}

/// Draws the content population onto its canvas.
pub fn render_content(state: &FieldState, ctx: &CanvasRenderingContext2d) {
	clear(ctx, state.content_surface);
	let style = &state.theme.drift;
	for p in &state.content {
		draw_circles(ctx, p.x, p.y, &drift_circles(p, style));
	}
	let color = style.connection_color;
	draw_connections(
		ctx,
		&state.content_connections(),
		style.connections.line_width,
		|a| Hsla { a, ..color }.to_css(),
	);
}

fn clear(ctx: &CanvasRenderingContext2d, surface: Surface) {
	ctx.clear_rect(0.0, 0.0, surface.width, surface.height);
}

fn draw_circles(ctx: &CanvasRenderingContext2d, x: f64, y: f64, circles: &[Circle]) {
	for circle in circles {
		ctx.begin_path();
		let _ = ctx.arc(x, y, circle.radius, 0.0, PI * 2.0);
		ctx.set_fill_style_str(&circle.fill);
		ctx.fill();
	}
}

fn draw_connections(
	ctx: &CanvasRenderingContext2d,
	lines: &[Connection],
	width: f64,
	stroke: impl Fn(f64) -> String,
) {
	ctx.set_line_width(width);
	for line in lines {
		ctx.begin_path();
		ctx.move_to(line.x1, line.y1);
		ctx.line_to(line.x2, line.y2);
		ctx.set_stroke_style_str(&stroke(line.opacity));
		ctx.stroke();
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	#[test]
	fn glow_halo_shrinks_inward_and_ends_white() {
		let style = GlowStyle::default();
		let mut rng = StdRng::seed_from_u64(9);
		let p = GlowParticle::random(&style, Surface::new(100.0, 100.0), &mut rng);
		let circles = glow_circles(&p, &style);
		assert_eq!(circles.len(), 4);
		assert!(circles.windows(2).all(|w| w[0].radius > w[1].radius));
		assert!(circles[3].fill.starts_with("rgba(255, 255, 255,"));
		assert!(circles[0].fill.starts_with("rgba(244, 221, 23,"));
	}

	#[test]
	fn drift_halo_uses_particle_hue() {
		let style = DriftStyle::default();
		let mut rng = StdRng::seed_from_u64(10);
		let p = DriftParticle::random(&style, Surface::new(100.0, 100.0), &mut rng);
		let circles = drift_circles(&p, &style);
		assert_eq!(circles.len(), 3);
		let prefix = format!("hsla({}, {}%, 70%", p.hue, p.saturation);
		assert!(circles[0].fill.starts_with(&prefix));
		assert!(circles[2].fill.contains("85%"));
	}

	#[test]
	fn glow_gain_brightens_outer_layers_only() {
		let outer = HaloLayer::new(1.8, 0.04, LayerTint::Base);
		let core = HaloLayer::new(1.0, 0.9, LayerTint::Base);
		assert_eq!(halo_gain(&outer, glow_gain(1.0)), 1.5);
		assert_eq!(halo_gain(&core, glow_gain(1.0)), 1.0);
	}
}
