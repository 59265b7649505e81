//! Surface dimensions and viewport-dependent population sizing.

use super::theme::SizingConfig;

/// Width and height of one drawing surface in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Surface {
	pub width: f64,
	pub height: f64,
}

impl Surface {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Whether `(x, y)` lies inside the surface, edges included.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		(0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
	}
}

/// Browser viewport size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

/// Hero region bounding box, viewport-relative, as reported by
/// `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroRect {
	pub top: f64,
	pub bottom: f64,
	pub height: f64,
}

/// Number of particles in each population.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopulationSizes {
	pub hero: usize,
	pub content: usize,
}

impl SizingConfig {
	pub fn is_narrow(&self, viewport_width: f64) -> bool {
		viewport_width < self.narrow_width
	}

	/// Population sizes for a viewport `viewport_width` pixels wide.
	///
	/// Each count is `clamp(floor(width / divisor), min, max)`, scaled by the
	/// narrow multiplier on mobile widths and rounded up. Degenerate widths
	/// (negative, NaN) fall back to the minimum. The multiplier only ever
	/// shrinks a population, so counts never exceed `max`.
	pub fn population_sizes(&self, viewport_width: f64) -> PopulationSizes {
		let multiplier = if self.is_narrow(viewport_width) {
			self.narrow_multiplier.clamp(0.0, 1.0)
		} else {
			1.0
		};
		PopulationSizes {
			hero: scaled_count(
				viewport_width,
				self.hero_divisor,
				self.hero_min,
				self.hero_max,
				multiplier,
			),
			content: scaled_count(
				viewport_width,
				self.content_divisor,
				self.content_min,
				self.content_max,
				multiplier,
			),
		}
	}

	/// Whether animation frame `frame` should update and draw.
	pub fn runs_frame(&self, viewport_width: f64, frame: u64) -> bool {
		if !self.is_narrow(viewport_width) {
			return true;
		}
		let interval = u64::from(self.narrow_frame_interval.max(1));
		frame % interval == 0
	}
}

/// What a pending settle check should do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Settle {
	/// The window closed with no further events: reseed now.
	Reseed,
	/// More events arrived; check again after this many milliseconds.
	Wait(f64),
	/// Nothing pending.
	Idle,
}

/// Trailing-edge debounce over resize event timestamps (milliseconds).
///
/// A burst of events closer together than `delay_ms` collapses into a single
/// [`Settle::Reseed`], reported `delay_ms` after the last event of the burst.
#[derive(Clone, Copy, Debug)]
pub struct ResizeDebounce {
	delay_ms: f64,
	last_event: Option<f64>,
}

impl ResizeDebounce {
	pub fn new(delay_ms: f64) -> Self {
		Self {
			delay_ms: delay_ms.max(0.0),
			last_event: None,
		}
	}

	pub fn delay_ms(&self) -> f64 {
		self.delay_ms
	}

	/// Record a resize event at `now`. Returns `true` when no settle check is
	/// pending yet and the caller has to schedule one.
	pub fn event(&mut self, now: f64) -> bool {
		let idle = self.last_event.is_none();
		self.last_event = Some(now);
		idle
	}

	/// Run a settle check at `now`.
	pub fn poll(&mut self, now: f64) -> Settle {
		let Some(last) = self.last_event else {
			return Settle::Idle;
		};
		let elapsed = now - last;
		if elapsed >= self.delay_ms || !elapsed.is_finite() {
			self.last_event = None;
			Settle::Reseed
		} else {
			Settle::Wait(self.delay_ms - elapsed)
		}
	}

	/// Forget any pending burst.
	pub fn cancel(&mut self) {
		self.last_event = None;
	}
}

fn scaled_count(width: f64, divisor: f64, min: usize, max: usize, multiplier: f64) -> usize {
	let raw = if width.is_finite() && width > 0.0 && divisor > 0.0 {
		(width / divisor).floor() as usize
	} else {
		0
	};
	let base = raw.max(min).min(max);
	// Tolerance keeps 40 * 0.4 at 16 rather than 17.
	let scaled = (base as f64 * multiplier - 1e-9).ceil();
	if scaled.is_finite() {
		(scaled.max(0.0) as usize).min(max)
	} else {
		min.min(max)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn desktop_width_uses_plain_formula() {
		let sizes = SizingConfig::default().population_sizes(1200.0);
		assert_eq!(sizes.hero, 40);
		assert_eq!(sizes.content, 24);
	}

	#[test]
	fn counts_clamp_to_band() {
		let config = SizingConfig::default();
		let wide = config.population_sizes(4000.0);
		assert_eq!(wide, PopulationSizes { hero: 60, content: 40 });
		// 800 / 30 = 26, 800 / 50 = 16
		let small = config.population_sizes(800.0);
		assert_eq!(small, PopulationSizes { hero: 26, content: 16 });
	}

	#[test]
	fn narrow_width_applies_multiplier() {
		let sizes = SizingConfig::default().population_sizes(500.0);
		// hero: max(15, 16) * 0.4 = 6.4 -> 7, content: max(8, 10) * 0.4 = 4
		assert_eq!(sizes, PopulationSizes { hero: 7, content: 4 });
	}

	#[test]
	fn same_width_same_sizes() {
		let config = SizingConfig::default();
		assert_eq!(config.population_sizes(1024.0), config.population_sizes(1024.0));
	}

	#[test]
	fn degenerate_width_falls_back_to_minimum() {
		let config = SizingConfig::default();
		assert_eq!(
			config.population_sizes(f64::NAN),
			PopulationSizes { hero: 15, content: 8 }
		);
		// Negative widths count as narrow.
		assert_eq!(
			config.population_sizes(-10.0),
			PopulationSizes { hero: 6, content: 4 }
		);
	}

	#[test]
	fn narrow_viewports_skip_alternate_frames() {
		let config = SizingConfig::default();
		assert!(config.runs_frame(1200.0, 1));
		assert!(config.runs_frame(500.0, 0));
		assert!(!config.runs_frame(500.0, 1));
		assert!(config.runs_frame(500.0, 2));
	}

	#[test]
	fn oversized_multiplier_stays_within_band() {
		let config = SizingConfig {
			narrow_multiplier: 1e30,
			..SizingConfig::default()
		};
		let sizes = config.population_sizes(500.0);
		assert_eq!(sizes, PopulationSizes { hero: 16, content: 10 });

		let config = SizingConfig {
			narrow_multiplier: f64::NAN,
			..SizingConfig::default()
		};
		assert_eq!(
			config.population_sizes(500.0),
			PopulationSizes { hero: 15, content: 8 }
		);
	}

	/// Feed `events` through a debounce whose settle checks run on a 1 ms
	/// clock, returning the times at which a reseed fired.
	fn reseed_times(delay: f64, events: &[f64], until: f64) -> Vec<f64> {
		let mut debounce = ResizeDebounce::new(delay);
		let mut next_check: Option<f64> = None;
		let mut fired = Vec::new();
		let mut now = 0.0;
		while now <= until {
			if events.contains(&now) && debounce.event(now) {
				next_check = Some(now + debounce.delay_ms());
			}
			if next_check == Some(now) {
				next_check = match debounce.poll(now) {
					Settle::Reseed => {
						fired.push(now);
						None
					}
					Settle::Wait(ms) => Some(now + ms),
					Settle::Idle => None,
				};
			}
			now += 1.0;
		}
		fired
	}

	#[test]
	fn rapid_resizes_collapse_into_one_reseed() {
		let fired = reseed_times(150.0, &[0.0, 40.0, 90.0, 140.0, 149.0], 1000.0);
		assert_eq!(fired, vec![299.0]);
	}

	#[test]
	fn separated_resizes_reseed_each_time() {
		let fired = reseed_times(150.0, &[0.0, 400.0], 1000.0);
		assert_eq!(fired, vec![150.0, 550.0]);
	}

	#[test]
	fn settle_check_waits_out_the_remaining_window() {
		let mut debounce = ResizeDebounce::new(150.0);
		assert!(debounce.event(0.0));
		assert!(!debounce.event(100.0));
		assert_eq!(debounce.poll(150.0), Settle::Wait(100.0));
		assert_eq!(debounce.poll(250.0), Settle::Reseed);
		assert_eq!(debounce.poll(400.0), Settle::Idle);

		assert!(debounce.event(500.0));
		debounce.cancel();
		assert_eq!(debounce.poll(700.0), Settle::Idle);
	}
}
