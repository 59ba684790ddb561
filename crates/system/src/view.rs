//! Read-only hooks for renderers.
//!
//! The simulation never draws anything. A renderer supplies a [`WorldToScreen`]
//! projector and pulls world-space state through the helpers below.

use std::cmp::Ordering;

use orbyte_core::Vector3;

use crate::body::BodyId;
use crate::simulation::Simulation;

/// Maps a world-space point to screen space.
///
/// The returned `z` is the depth in front of the camera; `z <= 0` means the point is
/// behind the clipping plane and must not be drawn.
pub trait WorldToScreen {
    fn world_to_screen(&self, world: Vector3, width: f64, height: f64) -> Vector3;
}

impl<F> WorldToScreen for F
where
    F: Fn(Vector3, f64, f64) -> Vector3,
{
    fn world_to_screen(&self, world: Vector3, width: f64, height: f64) -> Vector3 {
        self(world, width, height)
    }
}

/// Screen-space trail of one body, oldest first, with culled points dropped.
pub fn project_trail<P: WorldToScreen + ?Sized>(
    sim: &Simulation,
    id: BodyId,
    projector: &P,
    width: f64,
    height: f64,
) -> Vec<Vector3> {
    let Some(body) = sim.body(id) else {
        return Vec::new();
    };
    body.trail()
        .points()
        .map(|&p| projector.world_to_screen(p, width, height))
        .filter(|p| p.z > 0.0)
        .collect()
}

/// Drawable bodies with their screen positions, farthest first.
pub fn depth_sorted<P: WorldToScreen + ?Sized>(
    sim: &Simulation,
    projector: &P,
    width: f64,
    height: f64,
) -> Vec<(BodyId, Vector3)> {
    let mut projected: Vec<(BodyId, Vector3)> = sim
        .visible_bodies()
        .filter_map(|body| {
            let world = sim.absolute_position(body.id())?;
            let screen = projector.world_to_screen(world, width, height);
            (screen.z > 0.0).then_some((body.id(), screen))
        })
        .collect();
    projected.sort_by(|a, b| b.1.z.partial_cmp(&a.1.z).unwrap_or(Ordering::Equal));
    projected
}
