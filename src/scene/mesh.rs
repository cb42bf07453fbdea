//! Tessellating drawing surface with a push/pop transform stack.
//!
//! Every primitive is flattened into a triangle list of pixel-space vertices
//! with per-vertex RGBA colour, ready to upload to the GPU as is.

use bytemuck::{Pod, Zeroable};
use glam::{Affine2, Vec2};

/// Vertex data for the 2D mesh (pixel position + straight-alpha colour)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Triangle-list builder with push/pop/translate/rotate
pub struct MeshBuilder {
    vertices: Vec<Vertex>,
    transform: Affine2,
    stack: Vec<Affine2>,
    circle_segments: usize,
}

impl MeshBuilder {
    pub fn new(circle_segments: usize) -> Self {
        Self {
            vertices: Vec::new(),
            transform: Affine2::IDENTITY,
            stack: Vec::new(),
            circle_segments: circle_segments.max(3),
        }
    }

    /// Drop all geometry and reset the transform stack
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.transform = Affine2::IDENTITY;
        self.stack.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn push(&mut self) {
        self.stack.push(self.transform);
    }

    /// Restore the transform saved by the matching `push`
    pub fn pop(&mut self) {
        self.transform = self.stack.pop().unwrap_or(Affine2::IDENTITY);
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    pub fn rotate_degrees(&mut self, degrees: f32) {
        self.rotate_radians(degrees.to_radians());
    }

    pub fn rotate_radians(&mut self, radians: f32) {
        self.transform = self.transform * Affine2::from_angle(radians);
    }

    /// Map a local point through the current transform
    pub fn to_screen(&self, point: Vec2) -> Vec2 {
        self.transform.transform_point2(point)
    }

    fn emit(&mut self, point: Vec2, color: [f32; 4]) {
        let p = self.to_screen(point);
        self.vertices.push(Vertex {
            position: [p.x, p.y],
            color,
        });
    }

    pub fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
        self.emit(a, color);
        self.emit(b, color);
        self.emit(c, color);
    }

    /// Quad with a colour per corner, corners in drawing order
    pub fn fill_quad(&mut self, corners: [Vec2; 4], colors: [[f32; 4]; 4]) {
        let [a, b, c, d] = corners;
        let [ca, cb, cc, cd] = colors;
        self.emit(a, ca);
        self.emit(b, cb);
        self.emit(c, cc);
        self.emit(a, ca);
        self.emit(c, cc);
        self.emit(d, cd);
    }

    /// Axis-aligned rectangle from its top-left corner
    pub fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: [f32; 4]) {
        let corners = [
            origin,
            origin + Vec2::new(size.x, 0.0),
            origin + size,
            origin + Vec2::new(0.0, size.y),
        ];
        self.fill_quad(corners, [color; 4]);
    }

    /// Convex polygon, fanned from its first point
    pub fn fill_polygon(&mut self, points: &[Vec2], color: [f32; 4]) {
        if points.len() < 3 {
            return;
        }
        for i in 1..points.len() - 1 {
            self.fill_triangle(points[0], points[i], points[i + 1], color);
        }
    }

    /// Closed outline of width `width` centred on the polygon edges
    pub fn stroke_polygon(&mut self, points: &[Vec2], width: f32, color: [f32; 4]) {
        if points.len() < 2 || width <= 0.0 {
            return;
        }
        let half = width / 2.0;
        for (i, &a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            let normal = (b - a).perp().normalize_or_zero() * half;
            self.fill_quad([a + normal, b + normal, b - normal, a - normal], [color; 4]);
        }
    }

    /// Filled circle of the given diameter
    pub fn fill_circle(&mut self, center: Vec2, diameter: f32, color: [f32; 4]) {
        let points = regular_polygon(center, diameter / 2.0, self.circle_segments, 0.0);
        self.fill_polygon(&points, color);
    }

    /// Circle outline of the given diameter
    pub fn stroke_circle(&mut self, center: Vec2, diameter: f32, width: f32, color: [f32; 4]) {
        let points = regular_polygon(center, diameter / 2.0, self.circle_segments, 0.0);
        self.stroke_polygon(&points, width, color);
    }
}

/// Corners of a regular polygon, starting at `phase` radians
pub fn regular_polygon(center: Vec2, radius: f32, sides: usize, phase: f32) -> Vec<Vec2> {
    (0..sides)
        .map(|i| {
            let angle = phase + std::f32::consts::TAU * i as f32 / sides as f32;
            center + Vec2::from_angle(angle) * radius
        })
        .collect()
}
