use glam::{Mat3, Mat4, Vec2, Vec3};

const MAX_FOV: f32 = 0.8 * std::f32::consts::PI;

/// Viewport rectangle in window pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPort {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewPort {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x + self.width && p.y < self.y + self.height
    }
}

/// Owns the projection configuration and viewport, and turns camera state
/// into the model, projection and projection*model matrices.
///
/// Every mutator recomputes the derived matrices in place; there is no
/// dirty-flag path, so the product can never go stale against its factors.
#[derive(Debug, Clone)]
pub struct MatrixCalc {
    in_perspective_mode: bool,
    // flips look-at handedness; controllers mirror their axis signs off this
    model_axis_positive_z_away: bool,
    model_axis_flip_y: bool,

    perspective_near_z: f32,
    perspective_far_z: f32,
    orthographic_distance: f32,
    fov: f32, // radians
    fov_factor: f32,

    screen_size: Vec2,
    viewport: ViewPort,
    screen_coord_max: Vec2, // extent of the 2D overlay coordinate space

    // camera state as of the last model calculation
    lookat: Vec3,
    eye: Vec3,
    camera_dir: Vec2, // (elevation, azimuth) degrees
    camera_roll: f32,
    eye_distance: f32,

    model: Mat4,
    projection: Mat4,
    projection_model: Mat4,
}

impl Default for MatrixCalc {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixCalc {
    pub fn new() -> Self {
        let mut mc = Self {
            in_perspective_mode: true,
            model_axis_positive_z_away: false,
            model_axis_flip_y: false,
            perspective_near_z: 1.0,
            perspective_far_z: 100_000.0,
            orthographic_distance: 500.0,
            fov: std::f32::consts::FRAC_PI_4,
            fov_factor: 1.258925,
            screen_size: Vec2::new(800.0, 600.0),
            viewport: ViewPort::new(0.0, 0.0, 800.0, 600.0),
            screen_coord_max: Vec2::new(800.0, 600.0),
            lookat: Vec3::ZERO,
            eye: Vec3::new(0.0, 0.0, 1.0),
            camera_dir: Vec2::new(90.0, 0.0),
            camera_roll: 0.0,
            eye_distance: 1.0,
            model: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            projection_model: Mat4::IDENTITY,
        };
        mc.calculate_projection_matrix();
        mc.recalculate_model();
        mc
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.model
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn projection_model_matrix(&self) -> Mat4 {
        self.projection_model
    }

    pub fn in_perspective_mode(&self) -> bool {
        self.in_perspective_mode
    }

    pub fn set_perspective_mode(&mut self, perspective: bool) {
        self.in_perspective_mode = perspective;
        self.calculate_projection_matrix();
        self.recalculate_model();
    }

    pub fn model_axis_positive_z_away(&self) -> bool {
        self.model_axis_positive_z_away
    }

    pub fn set_model_axis_positive_z_away(&mut self, away: bool) {
        self.model_axis_positive_z_away = away;
        self.recalculate_model();
    }

    pub fn model_axis_flip_y(&self) -> bool {
        self.model_axis_flip_y
    }

    pub fn set_model_axis_flip_y(&mut self, flip: bool) {
        self.model_axis_flip_y = flip;
        self.calculate_projection_matrix();
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_fov(&mut self, fov_rad: f32) {
        self.fov = fov_rad.clamp(0.01, MAX_FOV - f32::EPSILON);
        self.calculate_projection_matrix();
    }

    /// One multiplicative field-of-view step. Returns whether the value
    /// actually changed (a step that would leave the allowed range is
    /// refused), so callers know whether anything downstream moved.
    pub fn fov_scale(&mut self, narrow: bool) -> bool {
        let new_fov = if narrow {
            self.fov / self.fov_factor
        } else {
            self.fov * self.fov_factor
        };
        if new_fov >= MAX_FOV || new_fov <= 0.0 || new_fov == self.fov {
            return false;
        }
        self.fov = new_fov;
        self.calculate_projection_matrix();
        true
    }

    pub fn eye_distance(&self) -> f32 {
        self.eye_distance
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    pub fn viewport(&self) -> ViewPort {
        self.viewport
    }

    pub fn screen_coord_max(&self) -> Vec2 {
        self.screen_coord_max
    }

    pub fn set_screen_coord_max(&mut self, max: Vec2) {
        self.screen_coord_max = max.max(Vec2::ONE);
    }

    pub fn orthographic_distance(&self) -> f32 {
        self.orthographic_distance
    }

    pub fn set_orthographic_distance(&mut self, distance: f32) {
        self.orthographic_distance = distance.max(1.0);
        self.calculate_projection_matrix();
        self.recalculate_model();
    }

    pub fn set_z_range(&mut self, near: f32, far: f32) {
        self.perspective_near_z = near.max(1e-3);
        self.perspective_far_z = far.max(self.perspective_near_z + 1.0);
        self.calculate_projection_matrix();
    }

    /// Window resize: viewport follows the full window.
    pub fn resize_viewport(&mut self, width: u32, height: u32) {
        self.screen_size = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        self.viewport = ViewPort::new(0.0, 0.0, self.screen_size.x, self.screen_size.y);
        self.calculate_projection_matrix();
    }

    /// Explicit sub-window viewport, clamped into the screen.
    pub fn set_viewport(&mut self, vp: ViewPort) {
        let x = vp.x.clamp(0.0, self.screen_size.x - 1.0);
        let y = vp.y.clamp(0.0, self.screen_size.y - 1.0);
        let w = vp.width.min(self.screen_size.x - x);
        let h = vp.height.min(self.screen_size.y - y);
        self.viewport = ViewPort::new(x, y, w, h);
        self.calculate_projection_matrix();
    }

    /// Rebuild the model matrix from camera state.
    ///
    /// Perspective mode: a look-at matrix whose up vector is (0,0,-1)
    /// carried through the camera's elevation/azimuth/roll. Orthographic
    /// mode is top-down by convention: translation of the look-at point,
    /// distance-compensated scale and a fixed 90 degree tilt.
    pub fn calculate_model_matrix(
        &mut self,
        lookat: Vec3,
        eye: Vec3,
        camera_dir_deg: Vec2,
        camera_roll_deg: f32,
    ) {
        self.lookat = lookat;
        self.eye = eye;
        self.camera_dir = camera_dir_deg;
        self.camera_roll = camera_roll_deg;
        self.eye_distance = eye.distance(lookat).max(1e-6);

        self.model = if self.in_perspective_mode {
            let up = Mat3::from_rotation_y(camera_dir_deg.y.to_radians())
                * Mat3::from_rotation_x(camera_dir_deg.x.to_radians())
                * Mat3::from_rotation_z(camera_roll_deg.to_radians())
                * Vec3::new(0.0, 0.0, -1.0);
            if self.model_axis_positive_z_away {
                Mat4::look_at_lh(eye, lookat, up)
            } else {
                Mat4::look_at_rh(eye, lookat, up)
            }
        } else {
            let scale = self.orthographic_distance / self.eye_distance;
            Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2)
                * Mat4::from_scale(Vec3::splat(scale))
                * Mat4::from_translation(Vec3::new(-lookat.x, 0.0, -lookat.z))
        };
        self.projection_model = self.projection * self.model;
    }

    /// Rebuild the projection matrix from the current configuration.
    pub fn calculate_projection_matrix(&mut self) {
        let aspect = self.viewport.width / self.viewport.height;
        let mut projection = if self.in_perspective_mode {
            Mat4::perspective_rh(
                self.fov,
                aspect,
                self.perspective_near_z,
                self.perspective_far_z,
            )
        } else {
            // height compensated so a resize does not change horizontal extent,
            // with the content pushed to a fixed depth
            let w = self.orthographic_distance;
            let h = w / aspect;
            Mat4::orthographic_rh(-w, w, -h, h, -self.perspective_far_z, self.perspective_far_z)
                * Mat4::from_translation(Vec3::new(0.0, 0.0, -self.orthographic_distance))
        };
        if self.model_axis_flip_y {
            projection = Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0)) * projection;
        }
        self.projection = projection;
        self.projection_model = self.projection * self.model;
    }

    /// Window pixel position relative to the viewport origin.
    pub fn window_to_viewport(&self, window: Vec2) -> Vec2 {
        window - Vec2::new(self.viewport.x, self.viewport.y)
    }

    /// Window pixel position to clip space [-1,1]x[-1,1] (y up).
    pub fn window_to_clip(&self, window: Vec2) -> Vec2 {
        let v = self.window_to_viewport(window);
        Vec2::new(
            v.x / self.viewport.width * 2.0 - 1.0,
            1.0 - v.y / self.viewport.height * 2.0,
        )
    }

    /// Inverse of [`window_to_clip`](Self::window_to_clip).
    pub fn clip_to_window(&self, clip: Vec2) -> Vec2 {
        Vec2::new(
            (clip.x + 1.0) * 0.5 * self.viewport.width + self.viewport.x,
            (1.0 - clip.y) * 0.5 * self.viewport.height + self.viewport.y,
        )
    }

    /// Clip space to the user-defined 2D overlay space
    /// [0,screen_coord_max] with y down.
    pub fn clip_to_screen_coord(&self, clip: Vec2) -> Vec2 {
        Vec2::new(
            (clip.x + 1.0) * 0.5 * self.screen_coord_max.x,
            (1.0 - clip.y) * 0.5 * self.screen_coord_max.y,
        )
    }

    /// Inverse of [`clip_to_screen_coord`](Self::clip_to_screen_coord).
    pub fn screen_coord_to_clip(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x / self.screen_coord_max.x * 2.0 - 1.0,
            1.0 - screen.y / self.screen_coord_max.y * 2.0,
        )
    }

    /// Window pixel position straight to overlay coordinates.
    pub fn window_to_screen_coord(&self, window: Vec2) -> Vec2 {
        self.clip_to_screen_coord(self.window_to_clip(window))
    }

    fn recalculate_model(&mut self) {
        self.calculate_model_matrix(self.lookat, self.eye, self.camera_dir, self.camera_roll);
    }
}
