pub mod backdrop;
pub mod bounds;
pub mod clock;
pub mod component;
pub mod entity;
pub mod geometry;
pub mod orientation;
pub mod random;
pub mod smoke;
pub mod sprite;
pub mod window;

pub use backdrop::{Backdrop, BackdropSettings};
