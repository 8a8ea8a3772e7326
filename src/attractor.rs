//! Lorenz attractor trajectory generation.
//!
//! The attractor is defined by three coupled differential equations:
//!
//! ```text
//! dx/dt = σ(y - x)
//! dy/dt = x(ρ - z) - y
//! dz/dt = xy - βz
//! ```
//!
//! Points are produced by explicit Euler integration with a fixed step, in
//! single precision. There is no divergence guard: the system is chaotic and
//! long runs are expected to wander.
//!
//! # Example
//!
//! ```
//! use lorenz_wave::attractor::generate;
//!
//! let trajectory = generate(3);
//! assert_eq!(trajectory.len(), 3);
//! ```

use std::ops::Index;

use glam::Vec3;

/// Integration step and Lorenz constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LorenzParams {
    /// Euler step size (`h`).
    pub dt: f32,
    /// σ, the Prandtl number (`a`).
    pub sigma: f32,
    /// ρ, the Rayleigh number (`b`).
    pub rho: f32,
    /// β, the geometric factor (`c`).
    pub beta: f32,
    /// State the integration starts from. It is not part of the output.
    pub initial: Vec3,
}

impl LorenzParams {
    /// Classic chaotic parameters: σ=10, ρ=28, β=8/3, h=0.01, starting at (0.1, 0, 0).
    pub const CLASSIC: Self = Self {
        dt: 0.01,
        sigma: 10.0,
        rho: 28.0,
        beta: 8.0 / 3.0,
        initial: Vec3::new(0.1, 0.0, 0.0),
    };

    /// Advance `state` by one Euler step.
    #[inline]
    pub fn step(&self, state: Vec3) -> Vec3 {
        let Vec3 { x, y, z } = state;
        let h = self.dt;
        Vec3::new(
            x + h * self.sigma * (y - x),
            y + h * (x * (self.rho - z) - y),
            z + h * (x * y - self.beta * z),
        )
    }

    /// Stream of integrated points, starting with the first step after `initial`.
    pub fn iter(&self) -> LorenzIter {
        LorenzIter {
            params: *self,
            state: self.initial,
        }
    }
}

impl Default for LorenzParams {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Endless iterator over Euler steps of the Lorenz system.
#[derive(Debug, Clone)]
pub struct LorenzIter {
    params: LorenzParams,
    state: Vec3,
}

impl Iterator for LorenzIter {
    type Item = Vec3;

    fn next(&mut self) -> Option<Vec3> {
        self.state = self.params.step(self.state);
        Some(self.state)
    }
}

/// Ordered, immutable sequence of attractor points.
///
/// Index `i`'s successor is `i + 1`; the last point has none.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    points: Vec<Vec3>,
}

impl Trajectory {
    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points as a slice.
    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Point at `index`, or `None` when out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty trajectory.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
        )
    }

    /// Midpoint of [`bounds`](Self::bounds); the origin for an empty trajectory.
    pub fn center(&self) -> Vec3 {
        self.bounds()
            .map(|(lo, hi)| (lo + hi) * 0.5)
            .unwrap_or(Vec3::ZERO)
    }

    /// Iterate over the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Vec3> {
        self.points.iter()
    }
}

impl From<Vec<Vec3>> for Trajectory {
    fn from(points: Vec<Vec3>) -> Self {
        Self { points }
    }
}

impl Index<usize> for Trajectory {
    type Output = Vec3;

    fn index(&self, index: usize) -> &Vec3 {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Vec3;
    type IntoIter = std::slice::Iter<'a, Vec3>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Integrate `n` points with the classic parameters.
pub fn generate(n: usize) -> Trajectory {
    generate_with(&LorenzParams::CLASSIC, n)
}

/// Integrate `n` points with custom parameters.
pub fn generate_with(params: &LorenzParams, n: usize) -> Trajectory {
    let mut points = Vec::with_capacity(n);
    points.extend(params.iter().take(n));
    Trajectory { points }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_empty() {
        let t = generate(0);
        assert!(t.is_empty());
        assert_eq!(t.bounds(), None);
        assert_eq!(t.center(), Vec3::ZERO);
    }

    #[test]
    fn test_first_step_from_initial_state() {
        let t = generate(1);
        assert_eq!(t.len(), 1);

        let h = 0.01_f32;
        let (a, b, c) = (10.0_f32, 28.0_f32, 8.0_f32 / 3.0);
        let (x0, y0, z0) = (0.1_f32, 0.0_f32, 0.0_f32);
        let expected = Vec3::new(
            x0 + h * a * (y0 - x0),
            y0 + h * (x0 * (b - z0) - y0),
            z0 + h * (x0 * y0 - c * z0),
        );
        assert_eq!(t[0], expected);
        assert!((t[0].x - 0.09).abs() < 1e-6);
        assert!((t[0].y - 0.028).abs() < 1e-6);
        assert_eq!(t[0].z, 0.0);
    }

    #[test]
    fn test_points_feed_back_into_next_step() {
        let params = LorenzParams::default();
        let t = generate(50);
        for i in 1..t.len() {
            assert_eq!(t[i], params.step(t[i - 1]));
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate(2_000);
        let b = generate(2_000);
        assert_eq!(a, b);
        for (p, q) in a.iter().zip(b.iter()) {
            assert_eq!(p.to_array().map(f32::to_bits), q.to_array().map(f32::to_bits));
        }
    }

    #[test]
    fn test_prefix_stability() {
        // A shorter run is a prefix of a longer one.
        let short = generate(100);
        let long = generate(1_000);
        assert_eq!(short.points(), &long.points()[..100]);
    }

    #[test]
    fn test_custom_params_change_output() {
        let params = LorenzParams {
            rho: 14.0,
            ..LorenzParams::default()
        };
        let custom = generate_with(&params, 10);
        let classic = generate(10);
        // rho only enters through dy/dt
        assert_eq!(custom[0].x, classic[0].x);
        assert_ne!(custom[0].y, classic[0].y);
        assert_ne!(custom.points(), classic.points());
    }

    #[test]
    fn test_bounds_contain_all_points() {
        let t = generate(5_000);
        let (lo, hi) = t.bounds().unwrap();
        for p in &t {
            assert!(p.cmpge(lo).all() && p.cmple(hi).all());
        }
        let c = t.center();
        assert!(c.cmpge(lo).all() && c.cmple(hi).all());
    }
}
