use glam::Vec2;
use log::trace;

use crate::camera::{CameraControl, PositionCamera};
use crate::input::{Key, Modifiers, MouseEvent, WheelEvent};
use crate::keyboard::KeyboardMonitor;
use crate::math::scalar::{vec2, vec3, Scalar, Vector2, Vector3};
use crate::matrix::MatrixCalc;
use crate::surface::RenderSurface;

/// Squared pixel movement before a button press becomes a drag.
const DRAG_DEADZONE_SQ: f32 = 4.0;

/// Held zoom keys multiply the factor by this per second.
const KEY_ZOOM_RATE: f32 = 2.0;

/// Units to travel for a keyboard move: (elapsed seconds, eye distance).
pub type TravelSpeedFn = Box<dyn Fn(f32, f32) -> f32>;
/// Degrees to rotate for a keyboard rotation: elapsed seconds.
pub type RotateSpeedFn = Box<dyn Fn(f32) -> f32>;

/// Binds mouse and keyboard input to camera and matrix operations.
///
/// Mouse drags are a small state machine: press, then a dead zone, then one
/// of three drag modes keyed by the button combination (left = rotate,
/// right = vertical translate, both = planar translate). The wheel zooms,
/// or adjusts the field of view while Ctrl is held. Keyboard navigation is
/// polled per tick rather than event driven, so held keys produce motion
/// scaled by elapsed time.
pub struct Controller3D<S: Scalar, C: CameraControl<S> = PositionCamera<S>> {
    pub camera: C,
    pub matrix: MatrixCalc,
    pub keyboard: KeyboardMonitor,

    // drag state machine
    down_pos: Option<Vec2>,
    last_pos: Vec2,
    dragging: bool,

    // tuning
    pub mouse_rotate_per_pixel: f32,    // degrees
    pub mouse_updown_per_pixel: f32,    // world units at zoom 1
    pub mouse_translate_per_pixel: f32, // world units at zoom 1
    min_movement: S,
    min_rotation: S,
    travel_speed: TravelSpeedFn,
    rotate_speed: RotateSpeedFn,
}

pub type Controller3Df = Controller3D<f32>;
pub type Controller3Dd = Controller3D<f64>;

impl<S: Scalar, C: CameraControl<S>> Controller3D<S, C> {
    pub fn new(camera: C, matrix: MatrixCalc) -> Self {
        let mut ctrl = Self {
            camera,
            matrix,
            keyboard: KeyboardMonitor::new(),
            down_pos: None,
            last_pos: Vec2::ZERO,
            dragging: false,
            mouse_rotate_per_pixel: 0.25,
            mouse_updown_per_pixel: 0.5,
            mouse_translate_per_pixel: 0.5,
            min_movement: S::from_f32(0.001),
            min_rotation: S::from_f32(0.001),
            travel_speed: Box::new(|elapsed, eye_distance| elapsed * (eye_distance * 0.5).max(1.0)),
            rotate_speed: Box::new(|elapsed| elapsed * 90.0),
        };
        ctrl.matrix.calculate_projection_matrix();
        ctrl.recalc_matrices();
        ctrl
    }

    /// Replace the keyboard travel speed function (elapsed s, eye distance).
    pub fn set_travel_speed(&mut self, f: impl Fn(f32, f32) -> f32 + 'static) {
        self.travel_speed = Box::new(f);
    }

    /// Replace the keyboard rotate speed function (elapsed s -> degrees).
    pub fn set_rotate_speed(&mut self, f: impl Fn(f32) -> f32 + 'static) {
        self.rotate_speed = Box::new(f);
    }

    /// Pull the current size out of the render surface.
    pub fn sync_surface(&mut self, surface: &dyn RenderSurface) {
        let (w, h) = surface.size();
        self.resize(w, h);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.matrix.resize_viewport(width, height);
    }

    pub fn mouse_down(&mut self, ev: MouseEvent) {
        self.down_pos = Some(ev.pos);
        self.last_pos = ev.pos;
        self.dragging = false;
        // user took over: any animation completes now
        self.camera.kill_slew();
    }

    pub fn mouse_up(&mut self, ev: MouseEvent) {
        if !ev.buttons.any() {
            self.down_pos = None;
            self.dragging = false;
        }
        self.last_pos = ev.pos;
    }

    pub fn mouse_move(&mut self, ev: MouseEvent) {
        let Some(down) = self.down_pos else {
            self.last_pos = ev.pos;
            return;
        };
        if !self.dragging {
            if (ev.pos - down).length_squared() < DRAG_DEADZONE_SQ {
                return;
            }
            self.dragging = true;
            trace!("drag start at {:?}", down);
        }

        let delta = ev.pos - self.last_pos;
        self.last_pos = ev.pos;

        if ev.buttons.left && ev.buttons.right {
            self.drag_translate_planar(delta);
        } else if ev.buttons.left {
            self.drag_rotate(delta);
        } else if ev.buttons.right {
            self.drag_translate_vertical(delta);
        }
    }

    pub fn mouse_wheel(&mut self, ev: WheelEvent) {
        if ev.delta == 0.0 {
            return;
        }
        if ev.modifiers.ctrl {
            self.matrix.fov_scale(ev.delta > 0.0);
        } else {
            self.camera.zoom_scale(ev.delta > 0.0);
        }
    }

    pub fn key_down(&mut self, key: Key, modifiers: Modifiers) {
        self.keyboard.key_down(key, modifiers);
    }

    pub fn key_up(&mut self, key: Key) {
        self.keyboard.key_up(key);
    }

    /// Per-frame advance. Pending keyboard motion is applied first, then
    /// slews, then the matrices, so a frame never renders one tick behind
    /// its input.
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        self.handle_keyboard_slews(elapsed_ms);
        self.camera.do_slew(elapsed_ms);
        let changed = self.camera.is_moved(self.min_movement, self.min_rotation);
        if changed {
            self.recalc_matrices();
        }
        changed
    }

    /// Poll held navigation keys (continuous motion, time scaled) and drain
    /// freshly pressed ones (discrete actions such as zoom presets).
    pub fn handle_keyboard_slews(&mut self, elapsed_ms: u64) {
        let elapsed = elapsed_ms as f32 / 1000.0;

        if elapsed > 0.0 && self.keyboard.is_any_pressed() {
            self.keyboard_travel(elapsed);
            self.keyboard_rotate(elapsed);
            self.keyboard_zoom(elapsed);
        }

        // Ctrl+1..9: jump to a preset zoom level, auto-timed
        for (i, key) in Key::DIGITS.iter().enumerate() {
            if self.keyboard.has_been_pressed_with(*key, Modifiers::CTRL) {
                let preset = S::from_f32(2f32.powi(i as i32));
                self.camera.go_to_zoom(preset, S::from_f32(-1.0));
            }
        }
        self.keyboard.clear_has_been_pressed();
    }

    pub fn recalc_matrices(&mut self) {
        self.matrix.calculate_model_matrix(
            self.camera.lookat().as_vec3(),
            self.camera.eye_position().as_vec3(),
            self.camera.camera_direction().as_vec2(),
            self.camera.camera_rotation().as_f32(),
        );
    }

    fn keyboard_travel(&mut self, elapsed: f32) {
        let kb = &self.keyboard;
        let mut fwd = 0.0f32;
        let mut strafe = 0.0f32;
        let mut up = 0.0f32;
        if kb.is_pressed(Key::W) || kb.is_pressed(Key::Up) {
            fwd += 1.0;
        }
        if kb.is_pressed(Key::S) || kb.is_pressed(Key::Down) {
            fwd -= 1.0;
        }
        if kb.is_pressed(Key::D) || kb.is_pressed(Key::Right) {
            strafe += 1.0;
        }
        if kb.is_pressed(Key::A) || kb.is_pressed(Key::Left) {
            strafe -= 1.0;
        }
        if kb.is_pressed(Key::R) || kb.is_pressed(Key::PageUp) {
            up += 1.0;
        }
        if kb.is_pressed(Key::F) || kb.is_pressed(Key::PageDown) {
            up -= 1.0;
        }
        if fwd == 0.0 && strafe == 0.0 && up == 0.0 {
            return;
        }

        // movement feels constant regardless of zoom: scale by eye distance
        let units = (self.travel_speed)(elapsed, self.camera.eye_distance().as_f32());
        let az = self
            .camera
            .camera_direction()
            .y()
            .as_f32()
            .to_radians();
        // heading-relative planar basis in the world XZ plane
        let (fx, fz) = (-az.sin(), -az.cos());
        let (rx, rz) = (fz, -fx);
        let mut x = (fx * fwd + rx * strafe) * units;
        let z = (fz * fwd + rz * strafe) * units;
        if self.matrix.model_axis_positive_z_away() {
            x = -x;
        }
        self.camera.translate(
            vec3::<S>(S::from_f32(x), S::from_f32(up * units), S::from_f32(z)),
            true,
        );
    }

    fn keyboard_rotate(&mut self, elapsed: f32) {
        let kb = &self.keyboard;
        let mut d_az = 0.0f32;
        let mut d_el = 0.0f32;
        if kb.is_pressed(Key::E) {
            d_az += 1.0;
        }
        if kb.is_pressed(Key::Q) {
            d_az -= 1.0;
        }
        if kb.is_pressed(Key::T) {
            d_el -= 1.0;
        }
        if kb.is_pressed(Key::G) {
            d_el += 1.0;
        }
        if d_az == 0.0 && d_el == 0.0 {
            return;
        }
        let step = (self.rotate_speed)(elapsed);
        let ysign = if self.matrix.model_axis_positive_z_away() {
            -1.0
        } else {
            1.0
        };
        self.camera.rotate_camera(
            vec2::<S>(
                S::from_f32(d_el * step * ysign),
                S::from_f32(d_az * step),
            ),
            S::ZERO,
            false,
        );
    }

    fn keyboard_zoom(&mut self, elapsed: f32) {
        let kb = &self.keyboard;
        let zoom_in = kb.is_pressed(Key::Z);
        let zoom_out = kb.is_pressed(Key::X);
        if zoom_in == zoom_out {
            return;
        }
        let rate = S::from_f32(KEY_ZOOM_RATE.powf(elapsed));
        let factor = if zoom_in {
            self.camera.zoom_factor() * rate
        } else {
            self.camera.zoom_factor() / rate
        };
        self.camera.zoom(factor);
    }

    fn drag_rotate(&mut self, delta: Vec2) {
        let ysign = if self.matrix.model_axis_positive_z_away() {
            -1.0
        } else {
            1.0
        };
        self.camera.rotate_camera(
            vec2::<S>(
                S::from_f32(delta.y * self.mouse_rotate_per_pixel * ysign),
                S::from_f32(delta.x * self.mouse_rotate_per_pixel),
            ),
            S::ZERO,
            false,
        );
    }

    fn drag_translate_vertical(&mut self, delta: Vec2) {
        let zf = self.camera.zoom_factor().as_f32().max(1e-6);
        // mouse up raises the camera
        let units = -delta.y * self.mouse_updown_per_pixel / zf;
        self.camera
            .translate(vec3::<S>(S::ZERO, S::from_f32(units), S::ZERO), true);
    }

    fn drag_translate_planar(&mut self, delta: Vec2) {
        let zf = self.camera.zoom_factor().as_f32().max(1e-6);
        let mut dx = delta.x * self.mouse_translate_per_pixel / zf;
        let mut dz = delta.y * self.mouse_translate_per_pixel / zf;
        if self.matrix.model_axis_positive_z_away() {
            dx = -dx;
        }
        if self.matrix.in_perspective_mode() {
            // correct for the camera's heading so the drag tracks the view
            let az = self
                .camera
                .camera_direction()
                .y()
                .as_f32()
                .to_radians();
            let (c, s) = (az.cos(), az.sin());
            let (wx, wz) = (dx * c + dz * s, -dx * s + dz * c);
            dx = wx;
            dz = wz;
        }
        self.camera
            .translate(vec3::<S>(S::from_f32(dx), S::ZERO, S::from_f32(dz)), true);
    }
}
