pub mod adapter;
pub mod camera;
pub mod cli;
pub mod clock;
pub mod controller;
pub mod input;
pub mod keyboard;
pub mod math;
pub mod matrix;
pub mod surface;

pub use adapter::WinitInputBridge;
pub use camera::{
    az_el, calculate_eye_position_from_lookat, CameraControl, PositionCamera, PositionCamerad,
    PositionCameraf,
};
pub use clock::Clock;
pub use controller::{Controller3D, Controller3Dd, Controller3Df};
pub use input::{Key, Modifiers, MouseButtons, MouseEvent, WheelEvent};
pub use keyboard::KeyboardMonitor;
pub use matrix::{MatrixCalc, ViewPort};
pub use surface::RenderSurface;
