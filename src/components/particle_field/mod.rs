//! Dual-canvas ambient particle field.
//!
//! Draws two decorative particle populations behind page content:
//! - Hero particles: gold, glowing, pulsing, wrapping at the edges of the
//!   hero region, steered by a slow wander force
//! - Content particles: hue-tinted, bouncing off the viewport edges with
//!   decaying restitution
//!
//! Both populations react to the pointer and draw faint connection lines
//! between close neighbours. Each canvas fades in or out as the hero region
//! scrolls away.
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{FieldTheme, ParticleBackdrop};
//!
//! view! { <ParticleBackdrop theme=FieldTheme::calm() /> }
//! ```

mod component;
mod field;
pub mod particles;
mod render;
pub mod sizing;
pub mod state;
pub mod theme;

pub use component::ParticleBackdrop;
pub use field::ParticleField;
pub use state::{FieldState, PopulationKind};
pub use theme::FieldTheme;
