use crate::window::Size;

/// Half of the visible scene height, in world units, at the depth the smoke
/// drifts through. Horizontal bounds follow from the aspect ratio.
pub const SCENE_HALF_HEIGHT: f32 = 11.25;

/// Horizontal extent a particle may occupy before it is recycled.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
}

impl Bounds {
    pub fn symmetric(half_width: f32) -> Self {
        let half_width = half_width.abs();
        Self {
            left: -half_width,
            right: half_width,
        }
    }

    pub fn from_aspect_ratio(aspect_ratio: f32) -> Self {
        Self::symmetric(aspect_ratio * SCENE_HALF_HEIGHT)
    }

    /// Returns `None` for a zero-sized viewport, whose bounds would be
    /// meaningless.
    pub fn from_viewport(size: Size) -> Option<Self> {
        size.aspect_ratio().map(Self::from_aspect_ratio)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn contains(&self, x: f32) -> bool {
        self.left <= x && x <= self.right
    }
}
