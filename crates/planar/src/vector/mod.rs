//! 2D vector value type.
//!
//! - `Vector2D`: point, displacement, or direction in the plane (`f64` components).
//! - Arithmetic via `std::ops` (component-wise `*`/`/` between vectors implement
//!   non-uniform scaling); compound assignment mutates in place.
//! - Equality is exact component comparison. Use `approx_eq` for tolerances.
//!
//! Conventions
//! - Angles are radians, counterclockwise positive.
//! - `angle_to(v)` is the counterclockwise sweep from `self` to `v` in `[0, 2π)`.
//!
//! Code cross-refs: `Frame2D::{to_parent,from_parent}`, `GeomCfg`

use std::f64::consts::TAU;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use nalgebra::{Rotation2, Vector2};

use crate::{GeomCfg, GeomError, Result};

/// A 2D vector with `x` and `y` components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0);
    pub const UP: Self = Self::new(0.0, 1.0);
    pub const DOWN: Self = Self::new(0.0, -1.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0);

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::ZERO
    }
    #[inline]
    pub const fn one() -> Self {
        Self::ONE
    }
    #[inline]
    pub const fn up() -> Self {
        Self::UP
    }
    #[inline]
    pub const fn down() -> Self {
        Self::DOWN
    }
    #[inline]
    pub const fn left() -> Self {
        Self::LEFT
    }
    #[inline]
    pub const fn right() -> Self {
        Self::RIGHT
    }

    /// Euclidean length `sqrt(x² + y²)`.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.sqr_magnitude().sqrt()
    }

    /// Squared length. Prefer this when only comparing lengths.
    #[inline]
    pub fn sqr_magnitude(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Same direction, unit length.
    ///
    /// The zero vector divides by zero and yields NaN components; see
    /// `try_normalized` for the checked form.
    #[inline]
    pub fn normalized(&self) -> Self {
        let m = self.magnitude();
        Self::new(self.x / m, self.y / m)
    }

    /// Unit vector, or `GeomError::ZeroLength` if `magnitude() <= cfg.eps_len`.
    pub fn try_normalized(&self, cfg: GeomCfg) -> Result<Self> {
        let m = self.magnitude();
        if m.is_nan() || m <= cfg.eps_len {
            return Err(GeomError::ZeroLength);
        }
        Ok(Self::new(self.x / m, self.y / m))
    }

    /// Quarter turn counterclockwise: `(-y, x)`.
    #[inline]
    pub fn perpendicular(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    #[inline]
    pub fn dot(&self, v: Self) -> f64 {
        self.x * v.x + self.y * v.y
    }

    /// Scalar 2D cross product `x·v.y − y·v.x` (signed parallelogram area).
    #[inline]
    pub fn cross(&self, v: Self) -> f64 {
        self.x * v.y - self.y * v.x
    }

    /// Angle of `self` measured against `right()`, see `angle_to`.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle_to(Self::RIGHT)
    }

    /// Counterclockwise angle swept from `self` to `v`, normalized to `[0, 2π)`.
    ///
    /// Computed as `atan2(cross, dot)`, so neither vector needs unit length.
    /// Either operand being zero gives `0`.
    pub fn angle_to(&self, v: Self) -> f64 {
        let a = self.cross(v).atan2(self.dot(v));
        if a < 0.0 {
            // Tiny negative angles round up to exactly TAU.
            let wrapped = a + TAU;
            if wrapped >= TAU {
                0.0
            } else {
                wrapped
            }
        } else {
            a
        }
    }

    /// Rotate counterclockwise by `angle` radians.
    #[inline]
    pub fn rotate(&self, angle: f64) -> Self {
        (Rotation2::new(angle) * Vector2::<f64>::from(*self)).into()
    }

    /// Shorten to length `max` if longer, otherwise return `self` unchanged.
    ///
    /// The zero vector never enters the shortening branch (`0 > max²` is false).
    pub fn clamp_magnitude(&self, max: f64) -> Self {
        if self.sqr_magnitude() > max * max {
            return self.normalized() * max;
        }
        *self
    }

    /// Linear interpolation `v1 + (v2 − v1)·t`; `t` outside `[0, 1]` extrapolates.
    #[inline]
    pub fn lerp(v1: Self, v2: Self, t: f64) -> Self {
        v1 + (v2 - v1) * t
    }

    /// Spherical interpolation along the counterclockwise arc from `v1` to `v2`.
    ///
    /// With `Ω = v1.angle_to(v2)`:
    /// `(v1·sin(Ω(1−t)) + v2·sin(Ωt)) / sin Ω`.
    /// Parallel or anti-parallel inputs have `sin Ω = 0` and yield NaN/∞.
    pub fn slerp(v1: Self, v2: Self, t: f64) -> Self {
        let omega = v1.angle_to(v2);
        (v1 * (omega * (1.0 - t)).sin() + v2 * (omega * t).sin()) / omega.sin()
    }

    /// Checked `slerp`: `GeomError::ParallelVectors` if `|sin Ω| <= cfg.eps_parallel`.
    pub fn try_slerp(v1: Self, v2: Self, t: f64, cfg: GeomCfg) -> Result<Self> {
        let omega = v1.angle_to(v2);
        let s = omega.sin();
        if s.is_nan() || s.abs() <= cfg.eps_parallel {
            return Err(GeomError::ParallelVectors);
        }
        Ok((v1 * (omega * (1.0 - t)).sin() + v2 * (omega * t).sin()) / s)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Max-abs comparison: `|Δx| <= eps && |Δy| <= eps`.
    #[inline]
    pub fn approx_eq(&self, other: Self, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<Vector2<f64>> for Vector2D {
    #[inline]
    fn from(v: Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2D> for Vector2<f64> {
    #[inline]
    fn from(v: Vector2D) -> Self {
        Vector2::new(v.x, v.y)
    }
}

impl From<(f64, f64)> for Vector2D {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector2D {
    type Output = Vector2D;
    #[inline]
    fn add(self, rhs: Vector2D) -> Self::Output {
        Vector2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}
impl Sub for Vector2D {
    type Output = Vector2D;
    #[inline]
    fn sub(self, rhs: Vector2D) -> Self::Output {
        Vector2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}
impl Neg for Vector2D {
    type Output = Vector2D;
    #[inline]
    fn neg(self) -> Self::Output {
        Vector2D::new(-self.x, -self.y)
    }
}
impl Mul<f64> for Vector2D {
    type Output = Vector2D;
    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Vector2D::new(self.x * rhs, self.y * rhs)
    }
}
impl Mul<Vector2D> for f64 {
    type Output = Vector2D;
    #[inline]
    fn mul(self, rhs: Vector2D) -> Self::Output {
        rhs * self
    }
}
/// Component-wise product (non-uniform scale).
impl Mul for Vector2D {
    type Output = Vector2D;
    #[inline]
    fn mul(self, rhs: Vector2D) -> Self::Output {
        Vector2D::new(self.x * rhs.x, self.y * rhs.y)
    }
}
impl Div<f64> for Vector2D {
    type Output = Vector2D;
    #[inline]
    fn div(self, rhs: f64) -> Self::Output {
        Vector2D::new(self.x / rhs, self.y / rhs)
    }
}
/// Component-wise quotient (inverse non-uniform scale).
impl Div for Vector2D {
    type Output = Vector2D;
    #[inline]
    fn div(self, rhs: Vector2D) -> Self::Output {
        Vector2D::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl AddAssign for Vector2D {
    #[inline]
    fn add_assign(&mut self, rhs: Vector2D) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}
impl SubAssign for Vector2D {
    #[inline]
    fn sub_assign(&mut self, rhs: Vector2D) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}
impl MulAssign<f64> for Vector2D {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}
impl DivAssign<f64> for Vector2D {
    #[inline]
    fn div_assign(&mut self, rhs: f64) {
        self.x /= rhs;
        self.y /= rhs;
    }
}
