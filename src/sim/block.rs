//! Plain rectangular blocks
//!
//! A block reflects the component of the velocity that points into the face
//! it was struck on. A corner strike can reflect both components.

use std::fmt;
use std::rc::Rc;

use super::collision::Collidable;
use super::listener::HitListener;
use crate::geom::{Point, Rectangle, Velocity, approx_eq, within};
use crate::render::Color;

/// A rectangular obstacle carrying an ordered list of hit listeners
#[derive(Clone)]
pub struct Block {
    pub rect: Rectangle,
    pub color: Color,
    listeners: Vec<Rc<dyn HitListener>>,
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("rect", &self.rect)
            .field("color", &self.color)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Block {
    pub fn new(rect: Rectangle, color: Color) -> Self {
        Self {
            rect,
            color,
            listeners: Vec::new(),
        }
    }

    /// Listeners are notified in the order they were added
    pub fn add_hit_listener(&mut self, listener: Rc<dyn HitListener>) {
        self.listeners.push(listener);
    }

    /// Detach a listener by identity; returns whether it was attached
    pub fn remove_hit_listener(&mut self, listener: &Rc<dyn HitListener>) -> bool {
        match self.listeners.iter().position(|l| Rc::ptr_eq(l, listener)) {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn hit_listeners(&self) -> &[Rc<dyn HitListener>] {
        &self.listeners
    }
}

impl Collidable for Block {
    fn collision_rectangle(&self) -> Rectangle {
        self.rect
    }

    fn hit(&self, collision_point: Point, current_velocity: Velocity) -> Velocity {
        let rect = &self.rect;
        let Point { x, y } = collision_point;
        let Velocity { mut dx, mut dy } = current_velocity;

        // Top face only reflects a descending ball, bottom face an ascending one
        let on_top = approx_eq(y, rect.min_y()) && dy > 0.0;
        let on_bottom = approx_eq(y, rect.max_y()) && dy < 0.0;
        if (on_top || on_bottom) && within(x, rect.min_x(), rect.max_x()) {
            dy = -dy;
        }

        let on_left = approx_eq(x, rect.min_x()) && dx > 0.0;
        let on_right = approx_eq(x, rect.max_x()) && dx < 0.0;
        if (on_left || on_right) && within(y, rect.min_y(), rect.max_y()) {
            dx = -dx;
        }

        Velocity::new(dx, dy)
    }
}
