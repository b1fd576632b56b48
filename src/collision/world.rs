//! Collision domain: a pure-geometry level made of boxes and edges.
//!
//! Used wherever the movement core runs without a physics engine: unit tests,
//! headless simulation, and tools. Queries follow the same contract as the
//! Avian-backed service.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;

use crate::collision::{CastRay, GameLayer, RayHit, Surface, SurfaceId, mask_contains};

const PARALLEL_EPSILON: f32 = 1.0e-6;

/// Axis-aligned box given by its corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Interior test; points on the boundary are outside.
    pub fn contains_strict(&self, point: Vec2) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Slab test. Returns the entry distance and the face normal.
    pub fn cast_ray(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<(f32, Vec2)> {
        if self.contains_strict(origin) {
            return Some((0.0, -direction));
        }

        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut normal = Vec2::ZERO;

        for axis in 0..2 {
            let o = origin[axis];
            let d = direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < PARALLEL_EPSILON {
                if o <= lo || o >= hi {
                    return None;
                }
                continue;
            }

            let t1 = (lo - o) / d;
            let t2 = (hi - o) / d;
            let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };

            if near > t_enter {
                t_enter = near;
                let mut face = Vec2::ZERO;
                face[axis] = if d > 0.0 { -1.0 } else { 1.0 };
                normal = face;
            }
            t_exit = t_exit.min(far);
        }

        if t_exit < t_enter || t_exit < 0.0 {
            return None;
        }
        if t_enter < 0.0 {
            // Origin on the boundary, ray pointing inward.
            return (t_exit > 0.0).then_some((0.0, -direction));
        }
        (t_enter <= max_distance).then_some((t_enter, normal))
    }
}

/// A one-sided-looking but two-sided edge, e.g. a slope or an edge platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn cast_ray(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<(f32, Vec2)> {
        let edge = self.b - self.a;
        let denom = direction.perp_dot(edge);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let w = self.a - origin;
        let t = w.perp_dot(edge) / denom;
        let s = w.perp_dot(direction) / denom;
        if !(0.0..=max_distance).contains(&t) || !(0.0..=1.0).contains(&s) {
            return None;
        }

        let mut normal = edge.perp().normalize_or_zero();
        if normal.dot(direction) > 0.0 {
            normal = -normal;
        }
        Some((t, normal))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Box(Aabb),
    Edge(Segment),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticBody {
    pub shape: Shape,
    pub layer: GameLayer,
    pub velocity: Vec2,
}

/// A collection of static colliders answering ray queries.
#[derive(Debug, Clone, Default)]
pub struct StaticWorld {
    bodies: Vec<StaticBody>,
}

impl StaticWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_box(mut self, center: Vec2, size: Vec2, layer: GameLayer) -> Self {
        self.add_box(center, size, layer);
        self
    }

    pub fn with_edge(mut self, a: Vec2, b: Vec2, layer: GameLayer) -> Self {
        self.add_edge(a, b, layer);
        self
    }

    pub fn add_box(&mut self, center: Vec2, size: Vec2, layer: GameLayer) -> usize {
        self.push(Shape::Box(Aabb::from_center_size(center, size)), layer)
    }

    pub fn add_edge(&mut self, a: Vec2, b: Vec2, layer: GameLayer) -> usize {
        self.push(Shape::Edge(Segment::new(a, b)), layer)
    }

    fn push(&mut self, shape: Shape, layer: GameLayer) -> usize {
        self.bodies.push(StaticBody {
            shape,
            layer,
            velocity: Vec2::ZERO,
        });
        self.bodies.len() - 1
    }

    /// Sets the surface velocity reported for a body. Does not move it.
    pub fn set_velocity(&mut self, id: usize, velocity: Vec2) {
        if let Some(body) = self.bodies.get_mut(id) {
            body.velocity = velocity;
        }
    }

    pub fn bodies(&self) -> &[StaticBody] {
        &self.bodies
    }
}

impl CastRay for StaticWorld {
    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let dir = direction.as_vec2();

        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, body)| mask_contains(mask, body.layer))
            .filter_map(|(id, body)| {
                let (distance, normal) = match body.shape {
                    Shape::Box(aabb) => aabb.cast_ray(origin, dir, max_distance)?,
                    Shape::Edge(segment) => segment.cast_ray(origin, dir, max_distance)?,
                };
                Some(RayHit {
                    distance,
                    point: origin + dir * distance,
                    normal,
                    surface: Surface {
                        id: SurfaceId::Static(id),
                        layer: body.layer,
                        velocity: body.velocity,
                    },
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
