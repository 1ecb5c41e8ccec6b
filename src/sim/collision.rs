//! Collision detection between the avatar circle and obstacle rectangles

use glam::Vec2;

use super::state::{Avatar, ObstaclePair};

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    /// Point lies inside, not on an edge
    pub fn contains_strict(&self, p: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        p.x > min.x && p.x < max.x && p.y > min.y && p.y < max.y
    }
}

/// Circle vs axis-aligned rectangle
///
/// Clamps the center into the rectangle to find the nearest point, then
/// compares squared distances. Touching counts as a hit. A zero-radius
/// circle is a point and only hits when strictly inside.
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Rect) -> bool {
    if radius <= 0.0 {
        return rect.contains_strict(center);
    }
    // min/max instead of clamp: never panics on a degenerate rect
    let nearest = center.max(rect.min()).min(rect.max());
    center.distance_squared(nearest) <= radius * radius
}

/// Does the avatar touch either segment of the pair
pub fn avatar_hits_obstacle(avatar: &Avatar, pair: &ObstaclePair) -> bool {
    let center = avatar.center();
    circle_rect_collision(center, avatar.radius, &pair.top_rect())
        || circle_rect_collision(center, avatar.radius, &pair.bottom_rect())
}
