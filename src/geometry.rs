use std::f32::consts::{PI, TAU};

use glam::{vec3, Vec3};

/// Line-list wireframe of a UV sphere: `segments` meridians and
/// `segments - 1` parallels, poles shared.
#[derive(Debug, Clone, PartialEq)]
pub struct Wireframe {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u16>,
}

impl Wireframe {
    /// Largest segment count whose `(segments + 1)^2` vertices still fit `u16`
    /// indices.
    pub const MAX_SEGMENTS: u16 = 254;

    /// `segments` is clamped to `3..=MAX_SEGMENTS`.
    pub fn sphere(radius: f32, segments: u16) -> Self {
        let segments = segments.clamp(3, Self::MAX_SEGMENTS);
        let rings = segments;

        // (rings + 1) rows of (segments + 1) columns; the seam column
        // duplicates the first so every row is a closed loop of lines.
        let columns = segments + 1;
        let mut vertices = Vec::with_capacity(((rings + 1) * columns) as usize);
        for ring in 0..=rings {
            let theta = ring as f32 / rings as f32 * PI;
            for segment in 0..=segments {
                let phi = segment as f32 / segments as f32 * TAU;
                vertices.push(
                    vec3(
                        -phi.cos() * theta.sin(),
                        theta.cos(),
                        phi.sin() * theta.sin(),
                    ) * radius,
                );
            }
        }

        let index = |ring: u16, segment: u16| ring * columns + segment;
        let mut indices = Vec::new();

        // Parallels, skipping the degenerate pole rows.
        for ring in 1..rings {
            for segment in 0..segments {
                indices.push(index(ring, segment));
                indices.push(index(ring, segment + 1));
            }
        }

        // Meridians.
        for segment in 0..segments {
            for ring in 0..rings {
                indices.push(index(ring, segment));
                indices.push(index(ring + 1, segment));
            }
        }

        Self { vertices, indices }
    }

    pub fn line_count(&self) -> usize {
        self.indices.len() / 2
    }
}
