//! Cursor and ambient visual effects.
//!
//! Three independent overlays, each on its own fixed, input-transparent layer:
//! - [`CursorSpotlight`]: a radial glow under the pointer plus a fading comet
//!   trail, brighter over clickable elements
//! - [`SparkleParticles`]: drifting, pulsing particles that move away from the pointer
//! - [`ScrollProgress`]: a thin bar tracking page scroll
//!
//! The simulation types ([`PointerTracker`], [`TrailAccumulator`], [`Spotlight`],
//! [`ParticleField`]) are plain Rust and can be driven without a browser.
//!
//! # Example
//!
//! ```ignore
//! use portfolio_fx::{CursorSpotlight, EffectsConfig, SparkleParticles};
//!
//! let config = EffectsConfig::default();
//! view! {
//!     <SparkleParticles config=config.clone() />
//!     <CursorSpotlight config=config />
//! }
//! ```

mod capability;
mod component;
pub mod config;
mod error;
mod frame_loop;
mod listener;
pub mod particles;
pub mod pointer;
mod render;
pub mod scroll;
pub mod spotlight;
pub mod theme;
pub mod trail;

pub use capability::Capabilities;
pub use component::{CursorSpotlight, ScrollProgress, SparkleParticles};
pub use config::EffectsConfig;
pub use error::{EffectsError, Result};
pub use frame_loop::FrameLoop;
pub use listener::Listener;
pub use particles::ParticleField;
pub use pointer::PointerTracker;
pub use spotlight::Spotlight;
pub use theme::Theme;
pub use trail::TrailAccumulator;
