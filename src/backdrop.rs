//! The animated backdrop as the host sees it: one smoke field and one
//! tracked orb, driven by the same frame callback.

use glam::vec2;
use log::{debug, info};
use rand::Rng;

use crate::{
    bounds::Bounds,
    component::{OrbSettings, SmokeSettings},
    entity::Orb,
    orientation::OrientationTracker,
    smoke::ParticleField,
    sprite::TextureHandle,
    window::Size,
};

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct BackdropSettings {
    pub smoke: SmokeSettings,
    pub orb: OrbSettings,
}

pub struct Backdrop<R> {
    field: ParticleField<R>,
    tracker: OrientationTracker,
    orb: Orb,
    viewport: Size,
}

impl<R: Rng> Backdrop<R> {
    /// Populates the smoke field for `viewport`. The texture handle must come
    /// from an uploaded sprite, so nothing ticks before the sprite exists.
    pub fn new(settings: BackdropSettings, viewport: Size, texture: TextureHandle, rng: R) -> Self {
        let bounds =
            Bounds::from_viewport(viewport).unwrap_or_else(|| Bounds::from_aspect_ratio(1.));
        let field = ParticleField::initialize(settings.smoke, bounds, texture, rng);
        let tracker = OrientationTracker::new(settings.orb);
        let orb = Orb::tilted(settings.orb.baseline_tilt);
        info!("Backdrop ready for viewport {:?}", viewport);

        Self {
            field,
            tracker,
            orb,
            viewport,
        }
    }

    pub fn tick(&mut self) {
        self.tick_scaled(1.);
    }

    pub fn tick_scaled(&mut self, step: f32) {
        self.field.tick_scaled(step);
        self.tracker.tick_scaled(&mut self.orb, step);
    }

    /// Empty viewports (a minimized window) keep the previous bounds.
    pub fn on_resize(&mut self, size: Size) {
        let bounds = match Bounds::from_viewport(size) {
            Some(bounds) => bounds,
            None => {
                debug!("Ignoring resize to empty viewport {:?}", size);
                return;
            }
        };
        self.viewport = size;
        self.field.on_bounds_changed(bounds);
        debug!("Viewport resized to {:?}, bounds now {:?}", size, bounds);
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.tracker.set_target(vec2(x, y), self.viewport);
    }

    pub fn dispose(&mut self) {
        self.field.dispose();
        self.tracker.dispose();
    }
}

impl<R> Backdrop<R> {
    pub fn field(&self) -> &ParticleField<R> {
        &self.field
    }

    pub fn tracker(&self) -> &OrientationTracker {
        &self.tracker
    }

    pub fn orb(&self) -> &Orb {
        &self.orb
    }

    pub fn bounds(&self) -> Bounds {
        self.field.bounds()
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn is_disposed(&self) -> bool {
        self.field.is_disposed() && self.tracker.is_disposed()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn backdrop(viewport: Size) -> Backdrop<Pcg64Mcg> {
        Backdrop::new(
            BackdropSettings::default(),
            viewport,
            TextureHandle::new(7),
            Pcg64Mcg::seed_from_u64(9),
        )
    }

    #[test]
    fn bounds_follow_the_viewport() {
        let mut backdrop = backdrop(Size::new(1600, 900));
        assert!((backdrop.bounds().right - 20.).abs() < 1e-4);

        backdrop.on_resize(Size::new(900, 900));
        assert_eq!(backdrop.viewport(), Size::new(900, 900));
        assert!((backdrop.bounds().right - 11.25).abs() < 1e-4);
    }

    #[test]
    fn empty_resize_keeps_previous_bounds() {
        let mut backdrop = backdrop(Size::new(1600, 900));
        let before = backdrop.bounds();

        backdrop.on_resize(Size::new(0, 0));

        assert_eq!(backdrop.bounds(), before);
        assert_eq!(backdrop.viewport(), Size::new(1600, 900));
    }

    #[test]
    fn pointer_uses_current_viewport() {
        let mut backdrop = backdrop(Size::new(1600, 900));
        backdrop.on_resize(Size::new(400, 400));

        backdrop.on_pointer_move(400., 200.);

        assert_eq!(backdrop.tracker().target().y, 0.2);
        assert_eq!(backdrop.tracker().target().x, 0.);
    }

    #[test]
    fn tick_moves_the_orb_towards_the_pointer() {
        let mut backdrop = backdrop(Size::new(1600, 900));
        let rest = backdrop.orb().group.rotation;

        backdrop.on_pointer_move(1600., 450.);
        backdrop.tick();

        assert!(!backdrop.orb().group.rotation.abs_diff_eq(rest, 1e-6));
    }

    #[test]
    fn dispose_tears_down_both_components() {
        let mut backdrop = backdrop(Size::new(1600, 900));
        backdrop.dispose();
        let orb = *backdrop.orb();

        backdrop.on_pointer_move(0., 0.);
        backdrop.tick();

        assert!(backdrop.is_disposed());
        assert!(backdrop.field().is_empty());
        assert_eq!(*backdrop.orb(), orb);
    }
}
