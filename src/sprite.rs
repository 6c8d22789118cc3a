use anyhow::{ensure, Result};
use rand::Rng;

use crate::random::SpanExt;

/// Shared, read-only reference to a texture owned by the renderer.
///
/// Handles are only issued once the texture is resident on the GPU, so
/// holding one is proof that the sprite is usable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureHandle(u32);

impl TextureHandle {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// A soft, slightly mottled puff in RGBA8, used for every smoke particle.
#[derive(Debug, Clone)]
pub struct SmokeSprite {
    size: u32,
    pixels: Vec<u8>,
}

impl SmokeSprite {
    pub const DEFAULT_SIZE: u32 = 128;
    const LATTICE_CELLS: usize = 6;
    const GRAY: u8 = 200;

    pub fn generate<R: Rng + ?Sized>(size: u32, rng: &mut R) -> Result<Self> {
        ensure!(size >= 2, "Smoke sprite needs at least 2x2 pixels, got {}", size);

        let lattice = Lattice::random(Self::LATTICE_CELLS, rng);
        let extent = (size - 1) as f32;

        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for py in 0..size {
            for px in 0..size {
                let u = px as f32 / extent;
                let v = py as f32 / extent;

                let r = ((u - 0.5).powi(2) + (v - 0.5).powi(2)).sqrt() * 2.;
                let falloff = smoothstep(1. - r.min(1.));
                let alpha = falloff * lattice.sample(u, v);

                pixels.extend_from_slice(&[
                    Self::GRAY,
                    Self::GRAY,
                    Self::GRAY,
                    (alpha * 255.).round() as u8,
                ]);
            }
        }

        Ok(Self { size, pixels })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Alpha of pixel `(x, y)`, or `None` outside the sprite.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.pixels.get(((y * self.size + x) * 4 + 3) as usize).copied()
    }
}

fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0., 1.);
    t * t * (3. - 2. * t)
}

/// Bilinear value noise over a square lattice covering the unit square.
struct Lattice {
    cells: usize,
    values: Vec<f32>,
}

impl Lattice {
    fn random<R: Rng + ?Sized>(cells: usize, rng: &mut R) -> Self {
        let values = (0..(cells + 1) * (cells + 1))
            .map(|_| rng.sample_span((0.6, 1.)))
            .collect();
        Self { cells, values }
    }

    fn at(&self, x: usize, y: usize) -> f32 {
        self.values[y * (self.cells + 1) + x]
    }

    fn sample(&self, u: f32, v: f32) -> f32 {
        let fx = u * self.cells as f32;
        let fy = v * self.cells as f32;
        let x = (fx.floor() as usize).min(self.cells - 1);
        let y = (fy.floor() as usize).min(self.cells - 1);
        let tx = smoothstep(fx - x as f32);
        let ty = smoothstep(fy - y as f32);

        let top = self.at(x, y) + (self.at(x + 1, y) - self.at(x, y)) * tx;
        let bottom = self.at(x, y + 1) + (self.at(x + 1, y + 1) - self.at(x, y + 1)) * tx;
        top + (bottom - top) * ty
    }
}
