// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Collision shapes
//!
//! A [`Shape`] is a closed set of variants: circles, convex polygons and
//! boxes (a polygon built from a width and a height). Polygons keep their
//! vertices twice, once in the body's local frame and once in world space.
//! The world-space cache is refreshed by [`Shape::update_vertices`] whenever
//! the owning body moves, and the narrow phase reads only the cache.
//!
//! Local vertices are expected relative to the body's center of mass and in
//! counter-clockwise order (positive signed area). Clockwise input is
//! reversed on construction so that [`Vec2::perpendicular`] of every edge is
//! its outward normal.

use crate::error::PhysicsError;
use crate::math::{Vec2, EPSILON};

/// Discriminant of a [`Shape`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    /// A circle
    Circle,
    /// A general convex polygon
    Polygon,
    /// An axis-aligned box in local space
    Box,
}

/// Circle given by its radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
    /// Radius in pixels
    pub radius: f64,
}

impl CircleShape {
    /// Create a circle
    ///
    /// # Panics
    ///
    /// Panics if `radius` is not positive and finite.
    pub fn new(radius: f64) -> Self {
        match Self::try_new(radius) {
            Ok(circle) => circle,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create a circle, rejecting a non-positive or non-finite radius
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidRadius`].
    pub fn try_new(radius: f64) -> Result<Self, PhysicsError> {
        if radius > 0.0 && radius.is_finite() {
            Ok(CircleShape { radius })
        } else {
            Err(PhysicsError::InvalidRadius(radius))
        }
    }

    /// Unit-mass moment of inertia
    pub fn moment_of_inertia(&self) -> f64 {
        0.5 * self.radius * self.radius
    }
}

/// Convex polygon with a world-space vertex cache
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    local_vertices: Vec<Vec2>,
    world_vertices: Vec<Vec2>,
}

impl PolygonShape {
    /// Create a polygon, rejecting degenerate input
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::DegeneratePolygon`] for fewer than 3 vertices,
    /// zero signed area, non-finite coordinates or a non-convex outline.
    pub fn try_new(vertices: Vec<Vec2>) -> Result<Self, PhysicsError> {
        let count = vertices.len();
        if count < 3 || vertices.iter().any(|v| !v.is_valid()) {
            return Err(PhysicsError::DegeneratePolygon { vertices: count });
        }

        let area = signed_area(&vertices);
        if area.abs() < EPSILON {
            return Err(PhysicsError::DegeneratePolygon { vertices: count });
        }

        let mut local_vertices = vertices;
        if area < 0.0 {
            local_vertices.reverse();
        }

        if !is_convex(&local_vertices) {
            return Err(PhysicsError::DegeneratePolygon { vertices: count });
        }

        Ok(PolygonShape {
            world_vertices: local_vertices.clone(),
            local_vertices,
        })
    }

    /// Vertices in the owning body's frame
    pub fn local_vertices(&self) -> &[Vec2] {
        &self.local_vertices
    }

    /// Vertices in world space as of the last [`update_vertices`](Self::update_vertices)
    pub fn world_vertices(&self) -> &[Vec2] {
        &self.world_vertices
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.local_vertices.len()
    }

    /// Rotate then translate every local vertex into the world cache
    pub fn update_vertices(&mut self, position: Vec2, angle: f64) {
        for (world, local) in self.world_vertices.iter_mut().zip(&self.local_vertices) {
            *world = local.rotate(angle) + position;
        }
    }

    /// Unit-mass moment of inertia about the local origin
    pub fn moment_of_inertia(&self) -> f64 {
        let mut numerator = 0.0;
        let mut denominator = 0.0;

        let n = self.local_vertices.len();
        for i in 0..n {
            let a = self.local_vertices[i];
            let b = self.local_vertices[(i + 1) % n];
            let cross = a.cross(b);
            numerator += cross * (a.dot(a) + b.dot(b) + a.dot(b));
            denominator += cross.abs();
        }

        if denominator < EPSILON {
            return 0.0;
        }
        numerator / 6.0 / denominator
    }

    /// World-space edge from vertex `index` to its successor
    pub fn edge_at(&self, index: usize) -> Vec2 {
        let n = self.world_vertices.len();
        self.world_vertices[(index + 1) % n] - self.world_vertices[index % n]
    }

    /// Outward unit normal of the edge starting at vertex `index`
    pub fn edge_normal(&self, index: usize) -> Vec2 {
        self.edge_at(index).perpendicular()
    }

    /// Best separating axis of `self` against `other`
    ///
    /// For every edge of `self`, projects all of `other`'s vertices onto the
    /// edge normal and keeps the deepest one. Returns the largest of those
    /// minima together with the edge index and the vertex of `other` that
    /// produced it. A non-negative separation means the edge is a separating
    /// axis.
    pub fn find_min_separation(&self, other: &PolygonShape) -> (f64, usize, Vec2) {
        let mut separation = f64::MIN;
        let mut reference_edge = 0;
        let mut support_point = Vec2::ZERO;

        for (i, &va) in self.world_vertices.iter().enumerate() {
            let normal = self.edge_normal(i);

            let mut min_sep = f64::MAX;
            let mut min_vertex = Vec2::ZERO;
            for &vb in &other.world_vertices {
                let projection = (vb - va).dot(normal);
                if projection < min_sep {
                    min_sep = projection;
                    min_vertex = vb;
                }
            }

            if min_sep > separation {
                separation = min_sep;
                reference_edge = i;
                support_point = min_vertex;
            }
        }

        (separation, reference_edge, support_point)
    }

    /// Index of the edge whose normal is most anti-parallel to `normal`
    pub fn find_incident_edge(&self, normal: Vec2) -> usize {
        let mut incident_edge = 0;
        let mut min_projection = f64::MAX;

        for i in 0..self.world_vertices.len() {
            let projection = self.edge_normal(i).dot(normal);
            if projection < min_projection {
                min_projection = projection;
                incident_edge = i;
            }
        }

        incident_edge
    }
}

/// Clip a segment against the half-plane `(p - origin)·normal <= 0`
///
/// Endpoints inside the half-plane are kept. When the endpoints lie on
/// opposite sides the crossing point is added, so the result holds 0, 1 or
/// 2 points.
pub fn clip_segment_to_line(segment: [Vec2; 2], origin: Vec2, normal: Vec2) -> Vec<Vec2> {
    let mut clipped = Vec::with_capacity(2);

    let dist0 = (segment[0] - origin).dot(normal);
    let dist1 = (segment[1] - origin).dot(normal);

    if dist0 <= 0.0 {
        clipped.push(segment[0]);
    }
    if dist1 <= 0.0 {
        clipped.push(segment[1]);
    }

    if dist0 * dist1 < 0.0 {
        let t = dist0 / (dist0 - dist1);
        clipped.push(segment[0] + (segment[1] - segment[0]) * t);
    }

    clipped
}

/// Box given by width and height, stored as a four-vertex polygon
#[derive(Debug, Clone, PartialEq)]
pub struct BoxShape {
    width: f64,
    height: f64,
    polygon: PolygonShape,
}

impl BoxShape {
    /// Create a box centered on the local origin
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is not positive and finite.
    pub fn new(width: f64, height: f64) -> Self {
        assert!(
            width > 0.0 && width.is_finite() && height > 0.0 && height.is_finite(),
            "box dimensions must be positive and finite, got {width}x{height}"
        );

        let hw = width / 2.0;
        let hh = height / 2.0;
        let vertices = vec![
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ];

        BoxShape {
            width,
            height,
            polygon: PolygonShape {
                world_vertices: vertices.clone(),
                local_vertices: vertices,
            },
        }
    }

    /// Width in pixels
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The underlying polygon
    pub fn polygon(&self) -> &PolygonShape {
        &self.polygon
    }

    /// Unit-mass moment of inertia
    pub fn moment_of_inertia(&self) -> f64 {
        (self.width * self.width + self.height * self.height) / 12.0
    }
}

/// Geometry owned by a rigid body
///
/// # Examples
///
/// ```
/// use physics2d::shape::{Shape, ShapeType};
/// use physics2d::math::Vec2;
///
/// let mut shape = Shape::boxed(20.0, 10.0);
/// assert_eq!(shape.shape_type(), ShapeType::Box);
///
/// shape.update_vertices(Vec2::new(100.0, 50.0), 0.0);
/// assert_eq!(shape.world_vertices()[0], Vec2::new(90.0, 45.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Circle
    Circle(CircleShape),
    /// Convex polygon
    Polygon(PolygonShape),
    /// Box
    Box(BoxShape),
}

impl Shape {
    /// Circle of the given radius
    ///
    /// # Panics
    ///
    /// Panics if `radius` is not positive and finite; see [`Shape::try_circle`].
    pub fn circle(radius: f64) -> Self {
        Shape::Circle(CircleShape::new(radius))
    }

    /// Circle of the given radius
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidRadius`] if `radius` is not positive
    /// and finite.
    pub fn try_circle(radius: f64) -> Result<Self, PhysicsError> {
        CircleShape::try_new(radius).map(Shape::Circle)
    }

    /// Convex polygon from local vertices
    ///
    /// # Panics
    ///
    /// Panics on degenerate input; see [`Shape::try_polygon`].
    pub fn polygon(vertices: Vec<Vec2>) -> Self {
        match Self::try_polygon(vertices) {
            Ok(shape) => shape,
            Err(err) => panic!("{err}"),
        }
    }

    /// Convex polygon from local vertices
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::DegeneratePolygon`] for fewer than 3 vertices,
    /// zero area or a non-convex outline.
    pub fn try_polygon(vertices: Vec<Vec2>) -> Result<Self, PhysicsError> {
        PolygonShape::try_new(vertices).map(Shape::Polygon)
    }

    /// Box of the given width and height
    pub fn boxed(width: f64, height: f64) -> Self {
        Shape::Box(BoxShape::new(width, height))
    }

    /// Variant discriminant
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Circle(_) => ShapeType::Circle,
            Shape::Polygon(_) => ShapeType::Polygon,
            Shape::Box(_) => ShapeType::Box,
        }
    }

    /// Refresh the world-space vertex cache; no-op for circles
    pub fn update_vertices(&mut self, position: Vec2, angle: f64) {
        match self {
            Shape::Circle(_) => {}
            Shape::Polygon(polygon) => polygon.update_vertices(position, angle),
            Shape::Box(b) => b.polygon.update_vertices(position, angle),
        }
    }

    /// Moment of inertia for a unit mass
    pub fn moment_of_inertia(&self) -> f64 {
        match self {
            Shape::Circle(circle) => circle.moment_of_inertia(),
            Shape::Polygon(polygon) => polygon.moment_of_inertia(),
            Shape::Box(b) => b.moment_of_inertia(),
        }
    }

    /// Polygon view of polygons and boxes
    pub fn as_polygon(&self) -> Option<&PolygonShape> {
        match self {
            Shape::Circle(_) => None,
            Shape::Polygon(polygon) => Some(polygon),
            Shape::Box(b) => Some(&b.polygon),
        }
    }

    /// Circle view
    pub fn as_circle(&self) -> Option<&CircleShape> {
        match self {
            Shape::Circle(circle) => Some(circle),
            _ => None,
        }
    }

    /// Cached world-space vertices (empty for circles)
    pub fn world_vertices(&self) -> &[Vec2] {
        match self.as_polygon() {
            Some(polygon) => polygon.world_vertices(),
            None => &[],
        }
    }

    /// Radius of the smallest origin-centered circle enclosing the shape
    pub fn bounding_radius(&self) -> f64 {
        match self {
            Shape::Circle(circle) => circle.radius,
            Shape::Polygon(polygon) => max_vertex_distance(polygon.local_vertices()),
            Shape::Box(b) => max_vertex_distance(b.polygon.local_vertices()),
        }
    }
}

fn signed_area(vertices: &[Vec2]) -> f64 {
    let n = vertices.len();
    (0..n)
        .map(|i| vertices[i].cross(vertices[(i + 1) % n]))
        .sum::<f64>()
        / 2.0
}

/// Every turn of a counter-clockwise outline is a left turn and the turns
/// add up to one full revolution
fn is_convex(vertices: &[Vec2]) -> bool {
    let n = vertices.len();
    let mut turning = 0.0;

    for i in 0..n {
        let e1 = vertices[(i + 1) % n] - vertices[i];
        let e2 = vertices[(i + 2) % n] - vertices[(i + 1) % n];
        let cross = e1.cross(e2);
        if cross < -EPSILON * e1.magnitude() * e2.magnitude() {
            return false;
        }
        turning += cross.atan2(e1.dot(e2));
    }

    (turning - std::f64::consts::TAU).abs() < 1e-6
}

fn max_vertex_distance(vertices: &[Vec2]) -> f64 {
    vertices.iter().map(|v| v.magnitude()).fold(0.0, f64::max)
}
