//! # lorenz-wave - Lorenz Attractor Wave
//!
//! Animated 3D view of the Lorenz strange attractor.
//!
//! The attractor is integrated once at startup into a fixed trajectory. One
//! small sphere sits on every point, and each frame every sphere slides a
//! little further toward the next point along the trajectory. After `steps`
//! frames they all snap back onto their own point and start over, so the
//! shape of the attractor stays put while a wave runs through it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use lorenz_wave::prelude::*;
//!
//! fn main() -> Result<(), ViewerError> {
//!     Viewer::new()
//!         .with_samples(100_000)
//!         .with_threads(4)
//!         .with_steps(100)
//!         .run()
//! }
//! ```
//!
//! ## Using the animation core on its own
//!
//! The generator and animator do not depend on the renderer. Anything that
//! implements [`Positionable`] can be driven:
//!
//! ```
//! use lorenz_wave::{generate, Animator, Vec3};
//!
//! let mut animator = Animator::new(generate(1_000), 4, 100);
//! let mut points = vec![Vec3::ZERO; 1_000];
//! animator.place_all(&mut points);
//!
//! let report = animator.advance(&mut points);
//! assert_eq!(report.step, 1);
//! ```
//!
//! ## Frame Capture
//!
//! With a capture directory set, every rendered frame is read back from the
//! GPU and written as `frame_<N>.png`, ready to be assembled into a video.
//! Failed writes are logged and skipped; the animation keeps going.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`attractor`] | [`LorenzParams`], [`Trajectory`], [`generate`] |
//! | [`chunk`] | [`ChunkPlan`], [`plan`] and the scoped parallel-for |
//! | [`animator`] | [`Animator`], [`AnimationPhase`], [`Positionable`] |
//! | [`capture`] | [`PngSequence`] |

pub mod animator;
pub mod attractor;
pub mod capture;
pub mod chunk;
pub mod config;
mod error;
pub mod gpu;
pub mod time;
mod viewer;

pub use animator::{AnimationPhase, Animator, FramePhase, FrameReport, Positionable};
pub use attractor::{generate, generate_with, LorenzParams, Trajectory};
pub use capture::{CapturedFrame, PngSequence, RowOrder};
pub use chunk::{plan, ChunkPlan};
pub use config::ViewerConfig;
pub use error::{CaptureError, ConfigError, GpuError, ViewerError};
pub use glam::Vec3;
pub use viewer::Viewer;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use lorenz_wave::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animator::{Animator, Positionable};
    pub use crate::attractor::{generate, generate_with, LorenzParams, Trajectory};
    pub use crate::capture::{PngSequence, RowOrder};
    pub use crate::config::ViewerConfig;
    pub use crate::error::ViewerError;
    pub use crate::viewer::Viewer;
    pub use crate::Vec3;
}
