//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list so one pipeline draws all
//! shapes.

use std::f32::consts::PI;

use super::vertex::{Color, Position};

/// Generate positions for a filled circle as `segments` triangles
///
/// Triangle `i` is (center, rim at angle i, rim at angle i + 1).
pub fn circle(segments: u32, radius: f32, x: f32, y: f32) -> Vec<Position> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 * 2.0 * PI) / segments as f32;
        let theta2 = ((i + 1) as f32 * 2.0 * PI) / segments as f32;

        vertices.push(Position::new(x, y));
        vertices.push(Position::new(
            x + radius * theta1.cos(),
            y + radius * theta1.sin(),
        ));
        vertices.push(Position::new(
            x + radius * theta2.cos(),
            y + radius * theta2.sin(),
        ));
    }

    vertices
}

/// Generate positions for a `width` x `height` rectangle centered on the origin
pub fn rectangle(width: f32, height: f32) -> Vec<Position> {
    let x1 = -width / 2.0;
    let x2 = width / 2.0;
    let y1 = -height / 2.0;
    let y2 = height / 2.0;

    vec![
        Position::new(x1, y1),
        Position::new(x2, y1),
        Position::new(x1, y2),
        Position::new(x1, y2),
        Position::new(x2, y1),
        Position::new(x2, y2),
    ]
}

/// One color repeated for every vertex
pub fn solid_color(vertex_count: usize, color: Color) -> Vec<Color> {
    vec![color; vertex_count]
}

/// Positions plus matching per-vertex colors
#[derive(Debug, Clone)]
pub struct Mesh {
    pub positions: Vec<Position>,
    pub colors: Vec<Color>,
}

impl Mesh {
    pub fn circle(segments: u32, radius: f32, color: Color) -> Self {
        let positions = circle(segments, radius, 0.0, 0.0);
        let colors = solid_color(positions.len(), color);
        Self { positions, colors }
    }

    pub fn rectangle(width: f32, height: f32, color: Color) -> Self {
        let positions = rectangle(width, height);
        let colors = solid_color(positions.len(), color);
        Self { positions, colors }
    }

    pub fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }
}
