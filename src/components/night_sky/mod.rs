//! Animated night sky background.
//!
//! A canvas-sized field of twinkling ambient particles (stars or sparkles) and
//! a small pool of shooting stars:
//! - Fixed ambient population, re-randomized in place, never removed
//! - Shooting stars fade in, travel, fade out, then leave the pool
//! - Pointer parallax on the starry variant
//! - Rendering through [`Surface`] so frames can be recorded and compared
//!
//! # Example
//!
//! ```
//! use night_sky::{DisplayList, FieldStyle, ParticleField};
//!
//! let mut field = ParticleField::with_seed(800.0, 600.0, false, FieldStyle::starry(), 42);
//! field.tick(16.0);
//!
//! let mut frame = DisplayList::new();
//! field.draw(&mut frame);
//! assert_eq!(frame.len(), 1 + 2 * field.ambient().len());
//! ```

mod component;
mod field;
mod particles;
mod render;
mod surface;
pub mod theme;

pub use component::{NightSkyCanvas, browser_seed};
pub use field::{FRAME_MS, NARROW_VIEWPORT_PX, ParticleField, is_narrow_viewport};
pub use particles::{AccentParticle, AccentPhase, AmbientParticle};
pub(crate) use particles::sample;
pub use surface::{DisplayList, DrawCommand, Surface};
pub use theme::{FieldStyle, FieldVariant};
