//! Viewer settings.

use std::path::PathBuf;

use crate::attractor::LorenzParams;
use crate::error::ConfigError;

/// Everything the viewer needs to know at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Trajectory length, and number of spheres.
    pub samples: usize,
    /// Workers per animation pass.
    pub threads: usize,
    /// Interpolated frames between two consecutive trajectory points.
    pub steps: u32,
    /// Integration step and Lorenz constants.
    pub lorenz: LorenzParams,
    /// Sphere radius in attractor units.
    pub sphere_radius: f32,
    pub width: u32,
    pub height: u32,
    /// Write `frame_<N>.png` here after each render.
    pub capture_dir: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            samples: 100_000,
            threads: 4,
            steps: 100,
            lorenz: LorenzParams::CLASSIC,
            sphere_radius: 0.1,
            width: 1280,
            height: 720,
            capture_dir: None,
        }
    }
}

impl ViewerConfig {
    /// Reject settings the animator or renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        if self.steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        if !(self.sphere_radius.is_finite() && self.sphere_radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.sphere_radius));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidWindowSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
