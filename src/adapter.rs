use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::camera::CameraControl;
use crate::controller::Controller3D;
use crate::input::{Key, Modifiers, MouseButtons, MouseEvent, WheelEvent};
use crate::math::scalar::Scalar;

/// Bridges winit window events onto a [`Controller3D`].
///
/// Keeps the small amount of state winit delivers separately from each
/// event: the live modifier set, cursor position and button mask.
#[derive(Debug, Clone, Default)]
pub struct WinitInputBridge {
    modifiers: Modifiers,
    cursor: Vec2,
    buttons: MouseButtons,
}

impl WinitInputBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Feed one window event through to the controller. Returns true when
    /// the event was translated into a controller call.
    pub fn process_event<S: Scalar, C: CameraControl<S>>(
        &mut self,
        event: &WindowEvent,
        controller: &mut Controller3D<S, C>,
    ) -> bool {
        match event {
            WindowEvent::ModifiersChanged(m) => {
                let state = m.state();
                self.modifiers = Modifiers {
                    ctrl: state.control_key(),
                    alt: state.alt_key(),
                    shift: state.shift_key(),
                };
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                controller.mouse_move(MouseEvent {
                    buttons: self.buttons,
                    pos: self.cursor,
                    modifiers: self.modifiers,
                });
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = *state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.buttons.left = pressed,
                    MouseButton::Right => self.buttons.right = pressed,
                    MouseButton::Middle => self.buttons.middle = pressed,
                    _ => return false,
                }
                let ev = MouseEvent {
                    buttons: self.buttons,
                    pos: self.cursor,
                    modifiers: self.modifiers,
                };
                if pressed {
                    controller.mouse_down(ev);
                } else {
                    controller.mouse_up(ev);
                }
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let d = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 20.0,
                };
                controller.mouse_wheel(WheelEvent {
                    delta: d,
                    modifiers: self.modifiers,
                });
                true
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return false;
                };
                let Some(key) = keycode_to_key(code) else {
                    return false;
                };
                match event.state {
                    ElementState::Pressed => controller.key_down(key, self.modifiers),
                    ElementState::Released => controller.key_up(key),
                }
                true
            }
            WindowEvent::Focused(false) => {
                // key-up events are lost while unfocused
                controller.keyboard.reset();
                false
            }
            WindowEvent::Resized(size) => {
                controller.resize(size.width, size.height);
                false
            }
            _ => false,
        }
    }
}

fn keycode_to_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyZ => Key::Z,
        KeyCode::KeyX => Key::X,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Digit8 => Key::Digit8,
        KeyCode::Digit9 => Key::Digit9,
        _ => return None,
    })
}
