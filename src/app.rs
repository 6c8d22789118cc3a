use anyhow::Result;
use glam::vec3;
use log::{debug, info};
use rand_pcg::Pcg64Mcg;
use smoke_orb::{
    clock::FrameClock,
    component::{Camera, Timestep, Transform},
    entity::{CameraEntity, Scene},
    random,
    window::{HasSize, Size},
    Backdrop, BackdropSettings,
};
use winit::{dpi::PhysicalPosition, window::Window};

use crate::renderer::Renderer;

pub struct App {
    window: Window,
    scene: Scene,
    renderer: Renderer,
    backdrop: Backdrop<Pcg64Mcg>,
    clock: FrameClock,
}

impl App {
    pub async fn new(window: Window) -> Result<Self> {
        let size = window.size();
        let settings = BackdropSettings::default();

        let scene = Scene {
            camera: CameraEntity {
                transform: Transform {
                    position: vec3(0., 0., 5.),
                    ..Default::default()
                },
                camera: Camera {
                    aspect_ratio: size.aspect_ratio().unwrap_or(1.),
                    ..Default::default()
                },
            },
            ..Default::default()
        };
        info!("{:#?}", &scene);
        info!("{:#?}", &settings);

        let renderer = Renderer::new(&window, &settings).await?;

        // The sprite handle only exists once the renderer has uploaded it.
        let backdrop = Backdrop::new(
            settings,
            size,
            renderer.smoke_texture(),
            random::seeded_from_clock(),
        );

        Ok(Self {
            window,
            scene,
            renderer,
            backdrop,
            clock: FrameClock::new(Timestep::PerFrame),
        })
    }

    pub fn on_resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        let size = Size::from(size);
        let aspect_ratio = match size.aspect_ratio() {
            Some(aspect_ratio) => aspect_ratio,
            None => {
                debug!("Skipping resize to {:?}", size);
                return;
            }
        };

        self.scene.camera.camera.aspect_ratio = aspect_ratio;
        self.renderer.resize(size);
        self.backdrop.on_resize(size);
    }

    pub fn on_pointer_move(&mut self, position: PhysicalPosition<f64>) {
        if self.backdrop.is_disposed() {
            return;
        }
        self.backdrop
            .on_pointer_move(position.x as f32, position.y as f32);
    }

    pub fn render(&mut self) -> Result<()> {
        // Minimized: nothing to draw into, and the animation may as well wait.
        if self.backdrop.is_disposed() || self.window.size().is_empty() {
            return Ok(());
        }

        let step = self.clock.step();
        self.backdrop.tick_scaled(step);

        self.renderer.render(&self.scene, &self.backdrop)
    }

    pub fn dispose(&mut self) {
        if self.backdrop.is_disposed() {
            return;
        }
        self.backdrop.dispose();
        info!("App disposed");
    }
}
