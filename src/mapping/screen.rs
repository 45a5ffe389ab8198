//! Screen placement of an indicator
//!
//! Screen coordinates are in pixels with the origin at the bottom-left
//! corner of the viewport.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Projects world-space points to screen space
pub trait Projector {
    fn world_to_screen(&self, point: Vec3) -> Vec2;
}

impl<F> Projector for F
where
    F: Fn(Vec3) -> Vec2,
{
    fn world_to_screen(&self, point: Vec3) -> Vec2 {
        self(point)
    }
}

/// Viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Camera position and facing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub forward: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }

    /// Whether `point` lies behind the camera plane
    pub fn is_behind(&self, point: Vec3) -> bool {
        (point - self.position).dot(self.forward) < 0.0
    }
}

/// Compute where an indicator sits on screen
///
/// The offset only shifts the projected point; the behind-camera test
/// uses the bare emitter position. Sources behind the viewer are pushed
/// to the edge on the side the viewer would have to turn toward.
pub fn compute_screen_position<P: Projector + ?Sized>(
    emitter: Vec3,
    offset: Vec3,
    camera: &CameraPose,
    projector: &P,
    viewport: Viewport,
    half_extent: Vec2,
) -> Vec2 {
    let mut screen = projector.world_to_screen(emitter + offset);

    if camera.is_behind(emitter) {
        screen.x = if screen.x < viewport.width / 2.0 {
            viewport.width - half_extent.x
        } else {
            half_extent.x
        };
    }

    Vec2::new(
        clamp_axis(screen.x, half_extent.x, viewport.width),
        clamp_axis(screen.y, half_extent.y, viewport.height),
    )
}

/// Keep `value` within `[half, extent - half]`
///
/// An indicator wider than the viewport is centred. NaN falls to the
/// lower bound.
fn clamp_axis(value: f32, half: f32, extent: f32) -> f32 {
    let lo = half;
    let hi = extent - half;
    if lo > hi {
        return extent / 2.0;
    }
    if value.is_nan() {
        return lo;
    }
    value.clamp(lo, hi)
}
