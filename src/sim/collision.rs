//! Collision surfaces and the nearest-collision query
//!
//! The environment is a registry of rectangular surfaces. Given a ball's
//! trajectory for one tick it finds the single surface the ball would touch
//! first.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::block::Block;
use super::listener::HitListener;
use super::paddle::Paddle;
use crate::geom::{Line, Point, Rectangle, Velocity, approx_eq};

/// Something a ball can bounce off
pub trait Collidable {
    /// Bounding rectangle used for intersection tests
    fn collision_rectangle(&self) -> Rectangle;

    /// Velocity after a ball moving at `current_velocity` strikes `collision_point`
    fn hit(&self, collision_point: Point, current_velocity: Velocity) -> Velocity;
}

/// Stable handle for a registered surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceId(pub u32);

/// The closed set of collision surfaces
#[derive(Debug, Clone)]
pub enum Surface {
    Block(Block),
    Paddle(Paddle),
}

impl Surface {
    /// Copy of the listener list, safe to iterate while listeners mutate the game
    pub fn hit_listeners(&self) -> Vec<Rc<dyn HitListener>> {
        match self {
            Surface::Block(block) => block.hit_listeners().to_vec(),
            Surface::Paddle(_) => Vec::new(),
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Surface::Block(block) => Some(block),
            Surface::Paddle(_) => None,
        }
    }

    pub fn as_block_mut(&mut self) -> Option<&mut Block> {
        match self {
            Surface::Block(block) => Some(block),
            Surface::Paddle(_) => None,
        }
    }

    pub fn as_paddle(&self) -> Option<&Paddle> {
        match self {
            Surface::Paddle(paddle) => Some(paddle),
            Surface::Block(_) => None,
        }
    }

    pub fn as_paddle_mut(&mut self) -> Option<&mut Paddle> {
        match self {
            Surface::Paddle(paddle) => Some(paddle),
            Surface::Block(_) => None,
        }
    }
}

impl Collidable for Surface {
    fn collision_rectangle(&self) -> Rectangle {
        match self {
            Surface::Block(block) => block.collision_rectangle(),
            Surface::Paddle(paddle) => paddle.collision_rectangle(),
        }
    }

    fn hit(&self, collision_point: Point, current_velocity: Velocity) -> Velocity {
        match self {
            Surface::Block(block) => block.hit(collision_point, current_velocity),
            Surface::Paddle(paddle) => paddle.hit(collision_point, current_velocity),
        }
    }
}

impl From<Block> for Surface {
    fn from(block: Block) -> Self {
        Surface::Block(block)
    }
}

impl From<Paddle> for Surface {
    fn from(paddle: Paddle) -> Self {
        Surface::Paddle(paddle)
    }
}

/// Where a trajectory first touches a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    pub point: Point,
    pub surface: SurfaceId,
}

/// Registry of collision surfaces, kept in registration order
#[derive(Debug, Clone, Default)]
pub struct Environment {
    surfaces: Vec<(SurfaceId, Surface)>,
    next_id: u32,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface; later registrations lose distance ties
    pub fn add(&mut self, surface: impl Into<Surface>) -> SurfaceId {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        self.surfaces.push((id, surface.into()));
        id
    }

    /// Unregister a surface, returning it if it was present
    pub fn remove(&mut self, id: SurfaceId) -> Option<Surface> {
        let index = self.surfaces.iter().position(|(sid, _)| *sid == id)?;
        Some(self.surfaces.remove(index).1)
    }

    pub fn get(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces
            .iter()
            .find(|(sid, _)| *sid == id)
            .map(|(_, surface)| surface)
    }

    pub fn get_mut(&mut self, id: SurfaceId) -> Option<&mut Surface> {
        self.surfaces
            .iter_mut()
            .find(|(sid, _)| *sid == id)
            .map(|(_, surface)| surface)
    }

    pub fn contains(&self, id: SurfaceId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Surfaces in registration order
    pub fn iter(&self) -> impl Iterator<Item = (SurfaceId, &Surface)> {
        self.surfaces.iter().map(|(id, surface)| (*id, surface))
    }

    /// The collision closest to the start of `trajectory`
    ///
    /// Each surface contributes its entry point (its intersection closest to
    /// the trajectory start). Entry points at the same distance within
    /// tolerance resolve to the earliest-registered surface.
    pub fn closest_collision(&self, trajectory: &Line) -> Option<CollisionInfo> {
        let mut closest: Option<(CollisionInfo, f64)> = None;

        for (id, surface) in self.iter() {
            let rect = surface.collision_rectangle();
            let Some(point) = trajectory.closest_intersection_to_start(&rect) else {
                continue;
            };
            let distance = trajectory.start.distance(&point);
            let closer = match closest {
                None => true,
                Some((_, best)) => distance < best && !approx_eq(distance, best),
            };
            if closer {
                closest = Some((CollisionInfo { point, surface: id }, distance));
            }
        }

        if let Some((info, distance)) = &closest {
            log::trace!(
                "Trajectory {:?} -> {:?} hits {:?} at ({:.3}, {:.3}), distance {:.3}",
                trajectory.start,
                trajectory.end,
                info.surface,
                info.point.x,
                info.point.y,
                distance
            );
        }
        closest.map(|(info, _)| info)
    }
}
