use log::debug;

use crate::math::angles::{bounded_angle, bounded_angle_delta};
use crate::math::scalar::{vec2, vec3, Scalar, Vector2, Vector3};

/// Camera operations the controller drives. Implemented by
/// [`PositionCamera`]; a generic controller bound on this trait gets static
/// dispatch for both precisions and lets tests substitute a recording mock.
pub trait CameraControl<S: Scalar> {
    fn lookat(&self) -> S::V3;
    fn eye_position(&self) -> S::V3;
    fn camera_direction(&self) -> S::V2;
    fn camera_rotation(&self) -> S;
    fn eye_distance(&self) -> S;
    fn zoom_factor(&self) -> S;

    fn translate(&mut self, delta: S::V3, kill_slew: bool);
    fn rotate_camera(&mut self, delta_dir: S::V2, delta_roll: S, change_lookat: bool) -> bool;
    fn zoom(&mut self, factor: S);
    fn zoom_scale(&mut self, zoom_in: bool);
    fn go_to(&mut self, target: S::V3, time_slew_sec: S, units_per_second: S);
    fn go_to_zoom(&mut self, target: S, time_to_zoom_sec: S);
    fn pan(&mut self, new_direction: S::V2, time_slew_sec: S);
    fn kill_slew(&mut self);
    fn do_slew(&mut self, elapsed_ms: u64);
    fn is_moved(&mut self, min_movement: S, min_rotation: S) -> bool;
}

/// Unit vector from the look-at point toward the eye, for a camera
/// direction given as (elevation, azimuth) degrees. Elevation 0 puts the
/// eye directly overhead, 90 level with the look-at, 180 directly below.
pub fn eye_offset_unit<S: Scalar>(direction_deg: S::V2) -> S::V3 {
    let el = direction_deg.x().to_radians();
    let az = direction_deg.y().to_radians();
    vec3::<S>(el.sin() * az.sin(), el.cos(), el.sin() * az.cos())
}

/// Eye position at `distance` from `lookat` along the given direction.
pub fn calculate_eye_position_from_lookat<S: Scalar>(
    lookat: S::V3,
    direction_deg: S::V2,
    distance: S,
) -> S::V3 {
    lookat + eye_offset_unit::<S>(direction_deg) * distance
}

/// (elevation, azimuth) degrees of the eye relative to the look-at point.
/// A zero-length separation is degenerate and reports level (90, 0).
pub fn az_el<S: Scalar>(eye: S::V3, lookat: S::V3) -> S::V2 {
    let v = eye - lookat;
    let r = v.length();
    if r == S::ZERO {
        return vec2::<S>(S::from_f32(90.0), S::ZERO);
    }
    let el = (v.y() / r).clamp(-S::ONE, S::ONE).acos().to_degrees();
    let az = bounded_angle(v.x().atan2(v.z()).to_degrees());
    vec2::<S>(el, az)
}

#[derive(Debug, Clone, Copy)]
struct PositionSlew<S: Scalar> {
    target: S::V3,
    time_sec: S,
    progress: S,
}

#[derive(Debug, Clone, Copy)]
struct ZoomSlew<S: Scalar> {
    start: S,
    target: S,
    time_sec: S,
    progress: S,
}

#[derive(Debug, Clone, Copy)]
struct DirectionSlew<S: Scalar> {
    start: S::V2,
    // (elevation delta, shortest-path azimuth delta) in degrees
    delta: S::V2,
    time_sec: S,
    progress: S,
}

/// Look-at/eye camera with animated transitions.
///
/// Owns the look-at point, eye position, camera direction
/// (elevation/azimuth degrees), roll, and the zoom model. Eye distance is
/// always derived from the two positions, never stored. Three independent
/// slews (position, zoom, direction) are advanced by [`do_slew`](Self::do_slew).
#[derive(Debug, Clone)]
pub struct PositionCamera<S: Scalar> {
    lookat: S::V3,
    eye: S::V3,
    camera_dir: S::V2, // x = elevation [0,180], y = azimuth [-180,180)
    camera_rot: S,     // roll about the view axis, degrees

    zoom1_distance: S, // eye distance at which the zoom factor reads 1.0
    zoom_min: S,
    zoom_max: S,
    zoom_scaling: S,

    pos_slew: Option<PositionSlew<S>>,
    zoom_slew: Option<ZoomSlew<S>>,
    dir_slew: Option<DirectionSlew<S>>,

    // last state sampled by is_moved; only updated when a change latches
    last_lookat: S::V3,
    last_eye: S::V3,
    last_rot: S,
}

pub type PositionCameraf = PositionCamera<f32>;
pub type PositionCamerad = PositionCamera<f64>;

impl<S: Scalar> PositionCamera<S> {
    pub fn new(lookat: S::V3, eye: S::V3) -> Self {
        let zoom1 = lookat.distance(eye).max(S::ONE);
        Self {
            lookat,
            eye,
            camera_dir: az_el::<S>(eye, lookat),
            camera_rot: S::ZERO,
            zoom1_distance: zoom1,
            zoom_min: S::from_f32(0.01),
            zoom_max: S::from_f32(300.0),
            zoom_scaling: S::from_f32(1.258925),
            pos_slew: None,
            zoom_slew: None,
            dir_slew: None,
            last_lookat: lookat,
            last_eye: eye,
            last_rot: S::ZERO,
        }
    }

    pub fn lookat(&self) -> S::V3 {
        self.lookat
    }

    pub fn eye_position(&self) -> S::V3 {
        self.eye
    }

    pub fn camera_direction(&self) -> S::V2 {
        self.camera_dir
    }

    pub fn camera_rotation(&self) -> S {
        self.camera_rot
    }

    pub fn set_camera_rotation(&mut self, roll_deg: S) {
        self.camera_rot = bounded_angle(roll_deg);
    }

    /// Always derived from the current positions.
    pub fn eye_distance(&self) -> S {
        self.lookat.distance(self.eye)
    }

    pub fn zoom1_distance(&self) -> S {
        self.zoom1_distance
    }

    pub fn set_zoom1_distance(&mut self, distance: S) {
        self.zoom1_distance = distance.max(S::from_f32(1e-6));
    }

    pub fn zoom_scaling(&self) -> S {
        self.zoom_scaling
    }

    pub fn set_zoom_bounds(&mut self, min: S, max: S, scaling: S) {
        self.zoom_min = min.max(S::from_f32(1e-6));
        self.zoom_max = max.max(self.zoom_min);
        self.zoom_scaling = scaling.max(S::ONE);
    }

    pub fn zoom_factor(&self) -> S {
        let dist = self.eye_distance().max(S::from_f32(1e-9));
        (self.zoom1_distance / dist).clamp(self.zoom_min, self.zoom_max)
    }

    pub fn in_slew(&self) -> bool {
        self.pos_slew.is_some() || self.zoom_slew.is_some() || self.dir_slew.is_some()
    }

    /// Move both the look-at point and the eye by `delta`.
    pub fn translate(&mut self, delta: S::V3, kill_slew: bool) {
        if kill_slew {
            self.kill_slew();
        }
        self.lookat += delta;
        self.eye += delta;
    }

    /// Re-centre on `new_lookat`, preserving the eye-to-lookat offset.
    pub fn move_lookat(&mut self, new_lookat: S::V3, kill_slew: bool) {
        if kill_slew {
            self.kill_slew();
        }
        let offset = self.eye - self.lookat;
        self.lookat = new_lookat;
        self.eye = new_lookat + offset;
    }

    /// Travel to `target`. A NaN target means "no move requested" and moves
    /// below one unit are ignored. Zero time moves instantly; negative time
    /// auto-estimates the duration from `units_per_second`.
    pub fn go_to(&mut self, target: S::V3, time_slew_sec: S, units_per_second: S) {
        if target.is_nan() {
            return;
        }
        let dist = target.distance(self.lookat);
        if dist < S::ONE {
            return;
        }
        if time_slew_sec == S::ZERO {
            self.move_lookat(target, true);
        } else {
            let time = if time_slew_sec < S::ZERO {
                S::ONE.max(dist / units_per_second)
            } else {
                time_slew_sec
            };
            debug!("camera slew to {:?} over {}s", target, time);
            self.pos_slew = Some(PositionSlew {
                target,
                time_sec: time,
                progress: S::ZERO,
            });
        }
    }

    /// Apply bounded-angle deltas to the camera direction and roll.
    ///
    /// Elevation is clamped into [0,180]: values pushed into (-90,0) snap to
    /// 0, values beyond 180 or at/below -90 snap to 180. A result landing
    /// exactly on either pole is refused (returns false, state untouched)
    /// because the azimuth is degenerate there.
    pub fn rotate_camera(&mut self, delta_dir: S::V2, delta_roll: S, change_lookat: bool) -> bool {
        let half = S::from_f32(180.0);
        let mut el = self.camera_dir.x() + delta_dir.x();
        if el > half || el <= S::from_f32(-90.0) {
            el = half;
        } else if el < S::ZERO {
            el = S::ZERO;
        }
        if el == S::ZERO || el == half {
            return false;
        }

        let az = bounded_angle(self.camera_dir.y() + delta_dir.y());
        self.camera_dir = vec2::<S>(el, az);
        self.camera_rot = bounded_angle(self.camera_rot + delta_roll);

        let dist = self.eye_distance();
        if change_lookat {
            self.lookat = self.eye - eye_offset_unit::<S>(self.camera_dir) * dist;
        } else {
            self.eye = calculate_eye_position_from_lookat::<S>(self.lookat, self.camera_dir, dist);
        }
        true
    }

    /// Swing the camera direction to `new_direction`. Zero time is
    /// instantaneous; negative time estimates the duration from the angular
    /// distance at 60 degrees per second.
    pub fn pan(&mut self, new_direction: S::V2, time_slew_sec: S) {
        if time_slew_sec == S::ZERO {
            self.set_camera_direction(new_direction);
            return;
        }
        let d_el = new_direction.x() - self.camera_dir.x();
        let d_az = bounded_angle_delta(self.camera_dir.y(), new_direction.y());
        let angular = (d_el * d_el + d_az * d_az).sqrt();
        if angular == S::ZERO {
            return;
        }
        let time = if time_slew_sec < S::ZERO {
            angular / S::from_f32(60.0)
        } else {
            time_slew_sec
        };
        self.dir_slew = Some(DirectionSlew {
            start: self.camera_dir,
            delta: vec2::<S>(d_el, d_az),
            time_sec: time,
            progress: S::ZERO,
        });
    }

    /// Point the camera in `direction` immediately, keeping the look-at
    /// point and eye distance. Cancels any direction slew.
    pub fn set_camera_direction(&mut self, direction: S::V2) {
        self.dir_slew = None;
        self.apply_camera_direction(direction);
    }

    /// Set the zoom factor immediately, clamped to the bounds. Cancels any
    /// zoom slew.
    pub fn zoom(&mut self, factor: S) {
        self.zoom_slew = None;
        self.apply_zoom(factor);
    }

    /// One multiplicative zoom step in or out.
    pub fn zoom_scale(&mut self, zoom_in: bool) {
        let current = self.zoom_factor();
        let factor = if zoom_in {
            current * self.zoom_scaling
        } else {
            current / self.zoom_scaling
        };
        self.zoom(factor);
    }

    /// Animate the zoom factor to `target`. Zero time is instantaneous;
    /// negative time estimates the duration from the zoom ratio.
    pub fn go_to_zoom(&mut self, target: S, time_to_zoom_sec: S) {
        let target = target.clamp(self.zoom_min, self.zoom_max);
        if time_to_zoom_sec == S::ZERO {
            self.zoom(target);
            return;
        }
        let current = self.zoom_factor();
        let time = if time_to_zoom_sec < S::ZERO {
            (target / current).log10().abs() * S::GOTO_ZOOM_TIME_FACTOR
        } else {
            time_to_zoom_sec
        };
        if time == S::ZERO {
            self.zoom(target);
            return;
        }
        self.zoom_slew = Some(ZoomSlew {
            start: current,
            target,
            time_sec: time,
            progress: S::ZERO,
        });
    }

    /// Complete every in-flight slew immediately: final state is applied
    /// now, so the very next query sees the target values.
    pub fn kill_slew(&mut self) {
        if let Some(s) = self.pos_slew.take() {
            let delta = s.target - self.lookat;
            self.lookat = s.target;
            self.eye += delta;
        }
        if let Some(s) = self.zoom_slew.take() {
            self.apply_zoom(s.target);
        }
        if let Some(s) = self.dir_slew.take() {
            self.apply_camera_direction(s.start + s.delta);
        }
    }

    /// Advance all slews by `elapsed_ms`. Position uses an S-curve over the
    /// remaining distance so it stays resumable mid-flight; zoom and
    /// direction interpolate linearly.
    pub fn do_slew(&mut self, elapsed_ms: u64) {
        if elapsed_ms == 0 {
            return;
        }
        let elapsed = S::from_f64(elapsed_ms as f64 / 1000.0);

        if let Some(mut s) = self.pos_slew.take() {
            let p0 = s.progress;
            let p1 = (p0 + elapsed / s.time_sec).min(S::ONE);
            if p1 >= S::ONE {
                let delta = s.target - self.lookat;
                self.lookat = s.target;
                self.eye += delta;
            } else {
                let half = S::from_f32(0.5);
                let curve0 = ((p0 - half) * S::PI).sin();
                let curve1 = ((p1 - half) * S::PI).sin();
                let fraction = (curve1 - curve0) / (S::ONE - curve0);
                let delta = (s.target - self.lookat) * fraction;
                self.lookat += delta;
                self.eye += delta;
                s.progress = p1;
                self.pos_slew = Some(s);
            }
        }

        if let Some(mut s) = self.zoom_slew.take() {
            let p1 = (s.progress + elapsed / s.time_sec).min(S::ONE);
            if p1 >= S::ONE {
                self.apply_zoom(s.target);
            } else {
                self.apply_zoom(s.start + (s.target - s.start) * p1);
                s.progress = p1;
                self.zoom_slew = Some(s);
            }
        }

        if let Some(mut s) = self.dir_slew.take() {
            let p1 = (s.progress + elapsed / s.time_sec).min(S::ONE);
            self.apply_camera_direction(s.start + s.delta * p1);
            if p1 < S::ONE {
                s.progress = p1;
                self.dir_slew = Some(s);
            }
        }
    }

    /// Edge detector with hysteresis: reports true when the look-at, eye or
    /// roll drifted past the thresholds since the last latched sample, and
    /// only then updates the sample. Sub-threshold jitter never latches.
    pub fn is_moved(&mut self, min_movement: S, min_rotation: S) -> bool {
        let moved = self.lookat.distance(self.last_lookat) >= min_movement
            || self.eye.distance(self.last_eye) >= min_movement;
        let rotated = bounded_angle(self.camera_rot - self.last_rot).abs() >= min_rotation;
        if moved || rotated {
            self.last_lookat = self.lookat;
            self.last_eye = self.eye;
            self.last_rot = self.camera_rot;
            true
        } else {
            false
        }
    }

    /// Serialize the pose as 7 comma-separated fields:
    /// `lookat.x,y,z,eye.x,y,z,roll`.
    pub fn string_position_camera(&self) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            self.lookat.x(),
            self.lookat.y(),
            self.lookat.z(),
            self.eye.x(),
            self.eye.y(),
            self.eye.z(),
            self.camera_rot
        )
    }

    /// Parse a pose produced by [`string_position_camera`](Self::string_position_camera).
    /// Returns false (state untouched) unless exactly 7 finite fields parse.
    pub fn set_position_camera(&mut self, s: &str) -> bool {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 7 {
            return false;
        }
        let mut values = [S::ZERO; 7];
        for (slot, part) in values.iter_mut().zip(parts.iter()) {
            match part.parse::<S>() {
                Ok(v) if !v.is_nan() => *slot = v,
                _ => return false,
            }
        }
        self.kill_slew();
        self.lookat = vec3::<S>(values[0], values[1], values[2]);
        self.eye = vec3::<S>(values[3], values[4], values[5]);
        self.camera_rot = bounded_angle(values[6]);
        self.camera_dir = az_el::<S>(self.eye, self.lookat);
        true
    }

    // Set the direction without touching slew state, snapping the elevation
    // into [0,180] and recomputing the eye from the look-at point.
    fn apply_camera_direction(&mut self, direction: S::V2) {
        let half = S::from_f32(180.0);
        let mut el = direction.x();
        if el > half || el <= S::from_f32(-90.0) {
            el = half;
        } else if el < S::ZERO {
            el = S::ZERO;
        }
        let az = bounded_angle(direction.y());
        self.camera_dir = vec2::<S>(el, az);
        let dist = self.eye_distance();
        self.eye = calculate_eye_position_from_lookat::<S>(self.lookat, self.camera_dir, dist);
    }

    // Clamp and apply a zoom factor without touching slew state.
    fn apply_zoom(&mut self, factor: S) {
        let f = factor.clamp(self.zoom_min, self.zoom_max);
        let dist = self.zoom1_distance / f;
        self.eye = calculate_eye_position_from_lookat::<S>(self.lookat, self.camera_dir, dist);
    }
}

impl<S: Scalar> CameraControl<S> for PositionCamera<S> {
    fn lookat(&self) -> S::V3 {
        PositionCamera::lookat(self)
    }
    fn eye_position(&self) -> S::V3 {
        PositionCamera::eye_position(self)
    }
    fn camera_direction(&self) -> S::V2 {
        PositionCamera::camera_direction(self)
    }
    fn camera_rotation(&self) -> S {
        PositionCamera::camera_rotation(self)
    }
    fn eye_distance(&self) -> S {
        PositionCamera::eye_distance(self)
    }
    fn zoom_factor(&self) -> S {
        PositionCamera::zoom_factor(self)
    }
    fn translate(&mut self, delta: S::V3, kill_slew: bool) {
        PositionCamera::translate(self, delta, kill_slew)
    }
    fn rotate_camera(&mut self, delta_dir: S::V2, delta_roll: S, change_lookat: bool) -> bool {
        PositionCamera::rotate_camera(self, delta_dir, delta_roll, change_lookat)
    }
    fn zoom(&mut self, factor: S) {
        PositionCamera::zoom(self, factor)
    }
    fn zoom_scale(&mut self, zoom_in: bool) {
        PositionCamera::zoom_scale(self, zoom_in)
    }
    fn go_to(&mut self, target: S::V3, time_slew_sec: S, units_per_second: S) {
        PositionCamera::go_to(self, target, time_slew_sec, units_per_second)
    }
    fn go_to_zoom(&mut self, target: S, time_to_zoom_sec: S) {
        PositionCamera::go_to_zoom(self, target, time_to_zoom_sec)
    }
    fn pan(&mut self, new_direction: S::V2, time_slew_sec: S) {
        PositionCamera::pan(self, new_direction, time_slew_sec)
    }
    fn kill_slew(&mut self) {
        PositionCamera::kill_slew(self)
    }
    fn do_slew(&mut self, elapsed_ms: u64) {
        PositionCamera::do_slew(self, elapsed_ms)
    }
    fn is_moved(&mut self, min_movement: S, min_rotation: S) -> bool {
        PositionCamera::is_moved(self, min_movement, min_rotation)
    }
}
