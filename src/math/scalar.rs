use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Floating-point scalar the camera stack is generic over.
///
/// Implemented for `f32` and `f64`; the associated vector types bind to the
/// matching glam types so a single camera/controller implementation serves
/// both precisions.
pub trait Scalar:
    Copy
    + PartialOrd
    + Debug
    + Display
    + Default
    + FromStr
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + 'static
{
    type V2: Vector2<Self>;
    type V3: Vector3<Self>;

    const ZERO: Self;
    const ONE: Self;
    const PI: Self;

    /// Tuning factor for the auto-estimated `go_to_zoom` duration.
    /// Deliberately differs between the f32 and f64 variants; see DESIGN.md.
    const GOTO_ZOOM_TIME_FACTOR: Self;

    fn from_f32(v: f32) -> Self;
    fn from_f64(v: f64) -> Self;
    fn as_f32(self) -> f32;
    fn as_f64(self) -> f64;

    fn abs(self) -> Self;
    fn sqrt(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn acos(self) -> Self;
    fn atan2(self, other: Self) -> Self;
    fn log10(self) -> Self;
    fn powf(self, e: Self) -> Self;
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
    fn clamp(self, lo: Self, hi: Self) -> Self;
    fn is_nan(self) -> bool;
    fn to_radians(self) -> Self;
    fn to_degrees(self) -> Self;
}

/// 2D vector operations needed by the camera (elevation/azimuth pairs).
pub trait Vector2<S: Scalar>:
    Copy + Debug + Default + PartialEq + Add<Output = Self> + Sub<Output = Self> + Mul<S, Output = Self>
{
    fn new(x: S, y: S) -> Self;
    fn x(self) -> S;
    fn y(self) -> S;
    fn as_vec2(self) -> glam::Vec2;
}

/// 3D vector operations needed by the camera (world positions).
pub trait Vector3<S: Scalar>:
    Copy
    + Debug
    + Default
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<S, Output = Self>
    + AddAssign
{
    fn new(x: S, y: S, z: S) -> Self;
    fn x(self) -> S;
    fn y(self) -> S;
    fn z(self) -> S;
    fn length(self) -> S;
    fn distance(self, other: Self) -> S;
    fn is_nan(self) -> bool;
    fn as_vec3(self) -> glam::Vec3;
}

/// Construct an `S::V2` without the fully-qualified associated-type syntax.
pub fn vec2<S: Scalar>(x: S, y: S) -> S::V2 {
    <S::V2 as Vector2<S>>::new(x, y)
}

/// Construct an `S::V3` without the fully-qualified associated-type syntax.
pub fn vec3<S: Scalar>(x: S, y: S, z: S) -> S::V3 {
    <S::V3 as Vector3<S>>::new(x, y, z)
}

impl Scalar for f32 {
    type V2 = glam::Vec2;
    type V3 = glam::Vec3;

    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const PI: Self = std::f32::consts::PI;
    const GOTO_ZOOM_TIME_FACTOR: Self = 0.75;

    fn from_f32(v: f32) -> Self {
        v
    }
    fn from_f64(v: f64) -> Self {
        v as f32
    }
    fn as_f32(self) -> f32 {
        self
    }
    fn as_f64(self) -> f64 {
        self as f64
    }

    fn abs(self) -> Self {
        f32::abs(self)
    }
    fn sqrt(self) -> Self {
        f32::sqrt(self)
    }
    fn sin(self) -> Self {
        f32::sin(self)
    }
    fn cos(self) -> Self {
        f32::cos(self)
    }
    fn acos(self) -> Self {
        f32::acos(self)
    }
    fn atan2(self, other: Self) -> Self {
        f32::atan2(self, other)
    }
    fn log10(self) -> Self {
        f32::log10(self)
    }
    fn powf(self, e: Self) -> Self {
        f32::powf(self, e)
    }
    fn min(self, other: Self) -> Self {
        f32::min(self, other)
    }
    fn max(self, other: Self) -> Self {
        f32::max(self, other)
    }
    fn clamp(self, lo: Self, hi: Self) -> Self {
        f32::clamp(self, lo, hi)
    }
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }
    fn to_radians(self) -> Self {
        f32::to_radians(self)
    }
    fn to_degrees(self) -> Self {
        f32::to_degrees(self)
    }
}

impl Scalar for f64 {
    type V2 = glam::DVec2;
    type V3 = glam::DVec3;

    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const PI: Self = std::f64::consts::PI;
    const GOTO_ZOOM_TIME_FACTOR: Self = 1.5;

    fn from_f32(v: f32) -> Self {
        v as f64
    }
    fn from_f64(v: f64) -> Self {
        v
    }
    fn as_f32(self) -> f32 {
        self as f32
    }
    fn as_f64(self) -> f64 {
        self
    }

    fn abs(self) -> Self {
        f64::abs(self)
    }
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }
    fn sin(self) -> Self {
        f64::sin(self)
    }
    fn cos(self) -> Self {
        f64::cos(self)
    }
    fn acos(self) -> Self {
        f64::acos(self)
    }
    fn atan2(self, other: Self) -> Self {
        f64::atan2(self, other)
    }
    fn log10(self) -> Self {
        f64::log10(self)
    }
    fn powf(self, e: Self) -> Self {
        f64::powf(self, e)
    }
    fn min(self, other: Self) -> Self {
        f64::min(self, other)
    }
    fn max(self, other: Self) -> Self {
        f64::max(self, other)
    }
    fn clamp(self, lo: Self, hi: Self) -> Self {
        f64::clamp(self, lo, hi)
    }
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }
    fn to_radians(self) -> Self {
        f64::to_radians(self)
    }
    fn to_degrees(self) -> Self {
        f64::to_degrees(self)
    }
}

impl Vector2<f32> for glam::Vec2 {
    fn new(x: f32, y: f32) -> Self {
        glam::Vec2::new(x, y)
    }
    fn x(self) -> f32 {
        self.x
    }
    fn y(self) -> f32 {
        self.y
    }
    fn as_vec2(self) -> glam::Vec2 {
        self
    }
}

impl Vector2<f64> for glam::DVec2 {
    fn new(x: f64, y: f64) -> Self {
        glam::DVec2::new(x, y)
    }
    fn x(self) -> f64 {
        self.x
    }
    fn y(self) -> f64 {
        self.y
    }
    fn as_vec2(self) -> glam::Vec2 {
        glam::DVec2::as_vec2(&self)
    }
}

impl Vector3<f32> for glam::Vec3 {
    fn new(x: f32, y: f32, z: f32) -> Self {
        glam::Vec3::new(x, y, z)
    }
    fn x(self) -> f32 {
        self.x
    }
    fn y(self) -> f32 {
        self.y
    }
    fn z(self) -> f32 {
        self.z
    }
    fn length(self) -> f32 {
        glam::Vec3::length(self)
    }
    fn distance(self, other: Self) -> f32 {
        glam::Vec3::distance(self, other)
    }
    fn is_nan(self) -> bool {
        glam::Vec3::is_nan(self)
    }
    fn as_vec3(self) -> glam::Vec3 {
        self
    }
}

impl Vector3<f64> for glam::DVec3 {
    fn new(x: f64, y: f64, z: f64) -> Self {
        glam::DVec3::new(x, y, z)
    }
    fn x(self) -> f64 {
        self.x
    }
    fn y(self) -> f64 {
        self.y
    }
    fn z(self) -> f64 {
        self.z
    }
    fn length(self) -> f64 {
        glam::DVec3::length(self)
    }
    fn distance(self, other: Self) -> f64 {
        glam::DVec3::distance(self, other)
    }
    fn is_nan(self) -> bool {
        glam::DVec3::is_nan(self)
    }
    fn as_vec3(self) -> glam::Vec3 {
        glam::DVec3::as_vec3(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_constructors_match_glam() {
        let v = vec3::<f32>(1.0, 2.0, 3.0);
        assert_eq!(v, glam::Vec3::new(1.0, 2.0, 3.0));

        let d = vec2::<f64>(4.0, 5.0);
        assert_eq!(d, glam::DVec2::new(4.0, 5.0));
    }

    #[test]
    fn f64_vectors_downcast_to_f32() {
        let d = vec3::<f64>(1.5, -2.5, 3.5);
        let f = d.as_vec3();
        assert_eq!(f, glam::Vec3::new(1.5, -2.5, 3.5));
    }

    #[test]
    fn zoom_time_factors_diverge_by_precision() {
        assert!((f32::GOTO_ZOOM_TIME_FACTOR - 0.75).abs() < 1e-6);
        assert!((f64::GOTO_ZOOM_TIME_FACTOR - 1.5).abs() < 1e-12);
    }
}
