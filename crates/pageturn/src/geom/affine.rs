//! 2D affine map `x ↦ M x + t` for placing page content on screen.

use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};

use super::types::{Point, Vector};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }
    #[inline]
    pub fn translation(t: Vector) -> Self {
        Self {
            m: Matrix2::identity(),
            t,
        }
    }
    /// Map sending the local origin to `origin` and the unit axes to `i_hat`, `j_hat`.
    #[inline]
    pub fn from_basis(origin: Point, i_hat: Vector, j_hat: Vector) -> Self {
        Self {
            m: Matrix2::from_columns(&[i_hat, j_hat]),
            t: origin.coords,
        }
    }
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::from(self.m * p.coords + self.t)
    }
    #[inline]
    pub fn apply_vector(&self, v: Vector) -> Vector {
        self.m * v
    }
    /// `self ∘ inner`: apply `inner` first, then `self`.
    #[inline]
    pub fn compose(&self, inner: &Affine2) -> Affine2 {
        Affine2 {
            m: self.m * inner.m,
            t: self.m * inner.t + self.t,
        }
    }
    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -minv * self.t,
        })
    }
    #[inline]
    pub fn is_orientation_preserving(&self) -> bool {
        self.m.determinant() > 0.0
    }
}
