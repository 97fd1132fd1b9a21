//! Scene description: which meshes to draw, and where
//!
//! Meshes are built once and packed into shared vertex buffers; each frame
//! only produces a short list of (mesh, transform) pairs.

use glam::Mat4;

use super::shapes::Mesh;
use super::vertex::{Color, Position, colors};
use crate::consts::{BALL_RADIUS, PADDLE_HEIGHT, PADDLE_WIDTH};
use crate::sim::{GameState, Side};

/// Meshes known to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshId {
    Ball,
    Paddle,
}

/// Span of a mesh inside the packed vertex buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshRange {
    pub first_vertex: u32,
    pub vertex_count: u32,
}

impl MeshRange {
    pub fn vertices(&self) -> std::ops::Range<u32> {
        self.first_vertex..self.first_vertex + self.vertex_count
    }
}

/// One draw: a mesh under a transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub mesh: MeshId,
    pub transform: Mat4,
}

/// All meshes concatenated for upload
#[derive(Debug, Clone)]
pub struct PackedMeshes {
    pub positions: Vec<Position>,
    pub colors: Vec<Color>,
    ball: MeshRange,
    paddle: MeshRange,
}

impl PackedMeshes {
    pub fn range(&self, mesh: MeshId) -> MeshRange {
        match mesh {
            MeshId::Ball => self.ball,
            MeshId::Paddle => self.paddle,
        }
    }
}

/// The ball and paddle meshes
#[derive(Debug, Clone)]
pub struct Scene {
    ball: Mesh,
    paddle: Mesh,
}

impl Scene {
    pub fn new(circle_segments: u32) -> Self {
        Self {
            ball: Mesh::circle(circle_segments, BALL_RADIUS, colors::BALL),
            paddle: Mesh::rectangle(PADDLE_WIDTH, PADDLE_HEIGHT, colors::PADDLE),
        }
    }

    pub fn mesh(&self, id: MeshId) -> &Mesh {
        match id {
            MeshId::Ball => &self.ball,
            MeshId::Paddle => &self.paddle,
        }
    }

    /// Concatenate every mesh into one position and one color buffer
    pub fn pack(&self) -> PackedMeshes {
        let mut positions = Vec::new();
        let mut colors = Vec::new();
        let mut push = |mesh: &Mesh| {
            let range = MeshRange {
                first_vertex: positions.len() as u32,
                vertex_count: mesh.vertex_count(),
            };
            positions.extend_from_slice(&mesh.positions);
            colors.extend_from_slice(&mesh.colors);
            range
        };

        let ball = push(self.mesh(MeshId::Ball));
        let paddle = push(self.mesh(MeshId::Paddle));

        PackedMeshes {
            positions,
            colors,
            ball,
            paddle,
        }
    }

    /// Draw calls for the current frame, in paint order
    pub fn draw_list(&self, state: &GameState) -> Vec<DrawCall> {
        vec![
            DrawCall {
                mesh: MeshId::Ball,
                transform: state.ball_transform(),
            },
            DrawCall {
                mesh: MeshId::Paddle,
                transform: state.paddle_transform(Side::Left),
            },
            DrawCall {
                mesh: MeshId::Paddle,
                transform: state.paddle_transform(Side::Right),
            },
        ]
    }
}
