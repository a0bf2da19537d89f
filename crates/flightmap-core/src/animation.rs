use std::time::Duration;

use geo_types::Coord;

use crate::viewpoint::Camera;

/// Smooth interpolation between two cameras over a fixed duration.
///
/// The centre moves linearly in projected space; resolution changes
/// geometrically so zooming feels uniform across scales.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransition {
    pub from: Camera,
    pub to: Camera,
    pub duration: Duration,
}

impl ViewTransition {
    pub fn new(from: Camera, to: Camera, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    /// Fraction of the transition completed after `elapsed`, in [0, 1].
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    pub fn camera_at(&self, elapsed: Duration) -> Camera {
        let t = self.progress(elapsed);
        if t >= 1.0 {
            return self.to;
        }
        if t <= 0.0 {
            return self.from;
        }
        let s = smoothstep(t);
        let center = Coord {
            x: lerp(self.from.center.x, self.to.center.x, s),
            y: lerp(self.from.center.y, self.to.center.y, s),
        };
        let resolution = lerp(self.from.resolution.ln(), self.to.resolution.ln(), s).exp();
        Camera { center, resolution }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}
