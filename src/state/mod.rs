pub mod camera;
pub mod client;
pub mod hue;
pub mod resize;

pub use camera::{Camera, CameraTarget, ViewTransform};
pub use client::{ClientState, PointerTarget, Renderer};
pub use hue::HueShift;
pub use resize::{OverlayLayout, ResizeMonitor};
