use particle_field::components::particle_field::sizing::{HeroRect, Viewport};
use particle_field::{FieldState, FieldTheme, PopulationKind};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn viewport(width: f64, height: f64) -> Viewport {
	Viewport { width, height }
}

fn hero(height: f64) -> Option<HeroRect> {
	Some(HeroRect {
		top: 0.0,
		bottom: height,
		height,
	})
}

fn assert_invariants(state: &FieldState) {
	let glow = &state.theme.glow;
	for p in &state.hero {
		let speed = (p.vx * p.vx + p.vy * p.vy).sqrt();
		assert!(speed <= glow.max_velocity + 1e-9, "hero speed {speed}");
		assert!(state.hero_surface.contains(p.x, p.y), "hero at ({}, {})", p.x, p.y);
		assert!(p.opacity.is_finite() && p.opacity >= 0.0 && p.opacity <= 1.0);
	}
	let drift = &state.theme.drift;
	for p in &state.content {
		let speed = (p.vx * p.vx + p.vy * p.vy).sqrt();
		assert!(speed <= drift.max_velocity + 1e-9, "content speed {speed}");
		assert!(
			state.content_surface.contains(p.x, p.y),
			"content at ({}, {})",
			p.x,
			p.y
		);
		assert!(p.bounce >= drift.bounce_floor);
		assert!(p.opacity.is_finite() && p.opacity >= 0.0 && p.opacity <= 1.0);
	}
}

#[test]
fn invariants_hold_over_many_frames() {
	let mut rng = StdRng::seed_from_u64(42);
	let mut state = FieldState::new(
		FieldTheme::default(),
		viewport(1200.0, 800.0),
		hero(700.0),
		&mut rng,
	);
	for frame in 0..2000 {
		// Sweep the pointer across both surfaces.
		let t = frame as f64 * 0.01;
		state.set_pointer(600.0 + 500.0 * t.cos(), 400.0 + 350.0 * (t * 1.3).sin());
		state.tick(&mut rng);
		assert_invariants(&state);
	}
}

#[test]
fn invariants_hold_for_calm_theme_on_narrow_viewport() {
	let mut rng = StdRng::seed_from_u64(7);
	let mut state = FieldState::new(
		FieldTheme::calm(),
		viewport(420.0, 900.0),
		hero(600.0),
		&mut rng,
	);
	for _ in 0..1000 {
		state.set_pointer(200.0, 300.0);
		state.tick(&mut rng);
		assert_invariants(&state);
	}
}

#[test]
fn pointer_parked_on_particles_never_produces_nan() {
	let mut rng = StdRng::seed_from_u64(3);
	let mut state = FieldState::new(
		FieldTheme::default(),
		viewport(1000.0, 800.0),
		hero(800.0),
		&mut rng,
	);
	for _ in 0..200 {
		let (x, y) = (state.content[0].x, state.content[0].y);
		state.set_pointer(x, y);
		state.step(&mut rng);
		assert!(state.content.iter().all(|p| p.vx.is_finite() && p.vy.is_finite()));
		assert!(state.hero.iter().all(|p| p.vx.is_finite() && p.vy.is_finite()));
	}
}

#[test]
fn resize_with_same_dimensions_is_idempotent_in_size() {
	let mut rng = StdRng::seed_from_u64(5);
	let mut state = FieldState::new(
		FieldTheme::default(),
		viewport(1200.0, 800.0),
		hero(700.0),
		&mut rng,
	);
	state.resize(viewport(900.0, 700.0), hero(650.0), &mut rng);
	let first = (state.hero.len(), state.content.len());
	state.resize(viewport(900.0, 700.0), hero(650.0), &mut rng);
	assert_eq!((state.hero.len(), state.content.len()), first);
	assert_eq!(first, (30, 18));
}

#[test]
fn reseed_replaces_one_population_only() {
	let mut rng = StdRng::seed_from_u64(8);
	let mut state = FieldState::new(
		FieldTheme::default(),
		viewport(1200.0, 800.0),
		hero(700.0),
		&mut rng,
	);
	let content_before: Vec<(f64, f64)> = state.content.iter().map(|p| (p.x, p.y)).collect();
	let hero_before: Vec<(f64, f64)> = state.hero.iter().map(|p| (p.x, p.y)).collect();
	state.reseed(PopulationKind::Hero, &mut rng);
	let content_after: Vec<(f64, f64)> = state.content.iter().map(|p| (p.x, p.y)).collect();
	let hero_after: Vec<(f64, f64)> = state.hero.iter().map(|p| (p.x, p.y)).collect();
	assert_eq!(content_before, content_after);
	assert_ne!(hero_before, hero_after);
	assert_eq!(hero_before.len(), hero_after.len());
}

#[test]
fn connection_lines_fade_to_nothing_at_max_distance() {
	let mut rng = StdRng::seed_from_u64(13);
	let mut state = FieldState::new(
		FieldTheme::default(),
		viewport(1200.0, 800.0),
		hero(700.0),
		&mut rng,
	);
	for _ in 0..30 {
		state.step(&mut rng);
	}
	let max = state.theme.drift.connections.max_distance;
	for line in state.content_connections() {
		let (dx, dy) = (line.x1 - line.x2, line.y1 - line.y2);
		assert!((dx * dx + dy * dy).sqrt() < max);
		assert!(line.opacity > state.theme.drift.connections.visibility_floor);
	}
	let max = state.theme.glow.connections.max_distance;
	for line in state.hero_connections() {
		let (dx, dy) = (line.x1 - line.x2, line.y1 - line.y2);
		assert!((dx * dx + dy * dy).sqrt() < max);
	}
}
