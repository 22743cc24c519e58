//! Fixed-size 2/3/4-component vectors over `i32` or `f64`.
//!
//! The two element types share one interface but have separate bodies: the
//! `f64` paths are straight-line component arithmetic the optimizer can pack
//! into SIMD registers, while the `i32` paths compute the same formulas in
//! scalar arithmetic and widen to `f64` for magnitude-like results. Integer
//! vectors have no meaningful in-place normalization; `normalize_self` yields
//! the zero vector and logs a diagnostic.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use crate::math::matrix::Matrix4x4;
use crate::math::scalar;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2<T> {
    pub x: T,
    pub y: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector4<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

pub type Vector2d = Vector2<f64>;
pub type Vector2i = Vector2<i32>;
pub type Vector3d = Vector3<f64>;
pub type Vector3i = Vector3<i32>;
pub type Vector4d = Vector4<f64>;
pub type Vector4i = Vector4<i32>;

impl<T> Vector2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> Vector3<T> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T> Vector4<T> {
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }
}

macro_rules! impl_componentwise_ops {
    ($V:ident { $($f:ident),+ }) => {
        impl<T: Copy + Add<Output = T>> Add for $V<T> {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self { $($f: self.$f + rhs.$f),+ }
            }
        }

        impl<T: Copy + Add<Output = T>> AddAssign for $V<T> {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl<T: Copy + Sub<Output = T>> Sub for $V<T> {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self { $($f: self.$f - rhs.$f),+ }
            }
        }

        impl<T: Copy + Sub<Output = T>> SubAssign for $V<T> {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl<T: Copy + Neg<Output = T>> Neg for $V<T> {
            type Output = Self;
            fn neg(self) -> Self {
                Self { $($f: -self.$f),+ }
            }
        }

        impl<T: Copy + Mul<Output = T>> Mul<T> for $V<T> {
            type Output = Self;
            fn mul(self, scale: T) -> Self {
                Self { $($f: self.$f * scale),+ }
            }
        }

        impl<T: Copy + Mul<Output = T>> MulAssign<T> for $V<T> {
            fn mul_assign(&mut self, scale: T) {
                *self = *self * scale;
            }
        }

        impl<T: Copy + Div<Output = T>> Div<T> for $V<T> {
            type Output = Self;
            fn div(self, scale: T) -> Self {
                Self { $($f: self.$f / scale),+ }
            }
        }

        impl<T: Copy + Div<Output = T>> DivAssign<T> for $V<T> {
            fn div_assign(&mut self, scale: T) {
                *self = *self / scale;
            }
        }
    };
}

impl_componentwise_ops!(Vector2 { x, y });
impl_componentwise_ops!(Vector3 { x, y, z });
impl_componentwise_ops!(Vector4 { x, y, z, w });

macro_rules! impl_indexing {
    ($V:ident, $count:literal, $($i:literal => $f:ident),+) => {
        impl<T> Index<usize> for $V<T> {
            type Output = T;
            fn index(&self, idx: usize) -> &T {
                match idx {
                    $($i => &self.$f,)+
                    _ => panic!(
                        "vector component index out of range: {} (component count {})",
                        idx, $count
                    ),
                }
            }
        }

        impl<T> IndexMut<usize> for $V<T> {
            fn index_mut(&mut self, idx: usize) -> &mut T {
                match idx {
                    $($i => &mut self.$f,)+
                    _ => panic!(
                        "vector component index out of range: {} (component count {})",
                        idx, $count
                    ),
                }
            }
        }
    };
}

impl_indexing!(Vector2, 2, 0 => x, 1 => y);
impl_indexing!(Vector3, 3, 0 => x, 1 => y, 2 => z);
impl_indexing!(Vector4, 4, 0 => x, 1 => y, 2 => z, 3 => w);

// Conversions between the three sizes drop or zero-fill extra components.

impl<T> From<Vector3<T>> for Vector2<T> {
    fn from(v: Vector3<T>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl<T> From<Vector4<T>> for Vector2<T> {
    fn from(v: Vector4<T>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl<T: Default> From<Vector2<T>> for Vector3<T> {
    fn from(v: Vector2<T>) -> Self {
        Self::new(v.x, v.y, T::default())
    }
}

impl<T> From<Vector4<T>> for Vector3<T> {
    fn from(v: Vector4<T>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl<T: Default> From<Vector2<T>> for Vector4<T> {
    fn from(v: Vector2<T>) -> Self {
        Self::new(v.x, v.y, T::default(), T::default())
    }
}

impl<T: Default> From<Vector3<T>> for Vector4<T> {
    fn from(v: Vector3<T>) -> Self {
        Self::new(v.x, v.y, v.z, T::default())
    }
}

impl Vector2<f64> {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0);

    pub fn dot_product(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The scalar z-component of the 3D cross product of the two vectors
    /// embedded in the xy-plane.
    pub fn cross_product(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn sqr_magnitude(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn magnitude(self) -> f64 {
        self.sqr_magnitude().sqrt()
    }

    /// The zero vector maps to the zero vector, not NaN.
    pub fn normalize(self) -> Self {
        let mut norm = self;
        norm.normalize_self();
        norm
    }

    pub fn normalize_self(&mut self) {
        let length = self.magnitude();
        if length == 0.0 {
            *self = Self::ZERO;
        } else {
            self.x /= length;
            self.y /= length;
        }
    }

    /// Component-wise (Hadamard) product.
    pub fn vector_scale(self, scalar: Self) -> Self {
        Self::new(self.x * scalar.x, self.y * scalar.y)
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        let mut v = self;
        v.lerp_self(other, t);
        v
    }

    pub fn lerp_self(&mut self, other: Self, t: f64) {
        let it = 1.0 - t;
        self.x = it * self.x + t * other.x;
        self.y = it * self.y + t * other.y;
    }

    pub fn similar(self, other: Self, epsilon: f64) -> bool {
        scalar::similar(self.x, other.x, epsilon) && scalar::similar(self.y, other.y, epsilon)
    }

    pub fn to_int(self) -> Vector2<i32> {
        Vector2::new(self.x as i32, self.y as i32)
    }
}

impl Vector2<i32> {
    pub const ZERO: Self = Self::new(0, 0);
    pub const ONE: Self = Self::new(1, 1);

    pub fn dot_product(self, other: Self) -> f64 {
        (self.x * other.x + self.y * other.y) as f64
    }

    pub fn cross_product(self, other: Self) -> f64 {
        (self.x * other.y - self.y * other.x) as f64
    }

    pub fn sqr_magnitude(self) -> f64 {
        (self.x * self.x + self.y * self.y) as f64
    }

    pub fn magnitude(self) -> f64 {
        self.sqr_magnitude().sqrt()
    }

    /// Widens to `f64` and normalizes there.
    pub fn normalize(self) -> Vector2<f64> {
        self.to_double().normalize()
    }

    /// An integer vector cannot hold a unit direction; the result is defined
    /// as the zero vector.
    pub fn normalize_self(&mut self) {
        log::warn!("normalizing an integer vector in place yields the zero vector");
        *self = Self::ZERO;
    }

    pub fn vector_scale(self, scalar: Self) -> Self {
        Self::new(self.x * scalar.x, self.y * scalar.y)
    }

    pub fn lerp(self, other: Self, t: f64) -> Vector2<f64> {
        self.to_double().lerp(other.to_double(), t)
    }

    pub fn lerp_self(&mut self, other: Self, t: f64) {
        *self = self.lerp(other, t).to_int();
    }

    pub fn similar(self, other: Self, epsilon: f64) -> bool {
        self.to_double().similar(other.to_double(), epsilon)
    }

    pub fn to_double(self) -> Vector2<f64> {
        Vector2::new(self.x as f64, self.y as f64)
    }
}

impl Vector3<f64> {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);
    pub const BACKWARD: Self = Self::new(0.0, 0.0, -1.0);

    pub fn dot_product(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross_product(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn sqr_magnitude(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn magnitude(self) -> f64 {
        self.sqr_magnitude().sqrt()
    }

    /// The zero vector maps to the zero vector, not NaN.
    pub fn normalize(self) -> Self {
        let mut norm = self;
        norm.normalize_self();
        norm
    }

    pub fn normalize_self(&mut self) {
        let length = self.magnitude();
        if length == 0.0 {
            *self = Self::ZERO;
        } else {
            self.x /= length;
            self.y /= length;
            self.z /= length;
        }
    }

    /// Component-wise (Hadamard) product.
    pub fn vector_scale(self, scalar: Self) -> Self {
        Self::new(self.x * scalar.x, self.y * scalar.y, self.z * scalar.z)
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        let mut v = self;
        v.lerp_self(other, t);
        v
    }

    pub fn lerp_self(&mut self, other: Self, t: f64) {
        let it = 1.0 - t;
        self.x = it * self.x + t * other.x;
        self.y = it * self.y + t * other.y;
        self.z = it * self.z + t * other.z;
    }

    pub fn similar(self, other: Self, epsilon: f64) -> bool {
        scalar::similar(self.x, other.x, epsilon)
            && scalar::similar(self.y, other.y, epsilon)
            && scalar::similar(self.z, other.z, epsilon)
    }

    pub fn to_int(self) -> Vector3<i32> {
        Vector3::new(self.x as i32, self.y as i32, self.z as i32)
    }
}

impl Vector3<i32> {
    pub const ZERO: Self = Self::new(0, 0, 0);
    pub const ONE: Self = Self::new(1, 1, 1);

    pub fn dot_product(self, other: Self) -> f64 {
        (self.x * other.x + self.y * other.y + self.z * other.z) as f64
    }

    pub fn cross_product(self, other: Self) -> Vector3<f64> {
        self.to_double().cross_product(other.to_double())
    }

    pub fn sqr_magnitude(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z) as f64
    }

    pub fn magnitude(self) -> f64 {
        self.sqr_magnitude().sqrt()
    }

    /// Widens to `f64` and normalizes there.
    pub fn normalize(self) -> Vector3<f64> {
        self.to_double().normalize()
    }

    /// An integer vector cannot hold a unit direction; the result is defined
    /// as the zero vector.
    pub fn normalize_self(&mut self) {
        log::warn!("normalizing an integer vector in place yields the zero vector");
        *self = Self::ZERO;
    }

    pub fn vector_scale(self, scalar: Self) -> Self {
        Self::new(self.x * scalar.x, self.y * scalar.y, self.z * scalar.z)
    }

    pub fn lerp(self, other: Self, t: f64) -> Vector3<f64> {
        self.to_double().lerp(other.to_double(), t)
    }

    pub fn lerp_self(&mut self, other: Self, t: f64) {
        *self = self.lerp(other, t).to_int();
    }

    pub fn similar(self, other: Self, epsilon: f64) -> bool {
        self.to_double().similar(other.to_double(), epsilon)
    }

    pub fn to_double(self) -> Vector3<f64> {
        Vector3::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

impl Vector4<f64> {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub fn dot_product(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn sqr_magnitude(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    pub fn magnitude(self) -> f64 {
        self.sqr_magnitude().sqrt()
    }

    /// The zero vector maps to the zero vector, not NaN.
    pub fn normalize(self) -> Self {
        let length = self.magnitude();
        if length == 0.0 {
            Self::ZERO
        } else {
            self / length
        }
    }

    /// Component-wise (Hadamard) product.
    pub fn vector_scale(self, scalar: Self) -> Self {
        Self::new(
            self.x * scalar.x,
            self.y * scalar.y,
            self.z * scalar.z,
            self.w * scalar.w,
        )
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        let it = 1.0 - t;
        Self::new(
            it * self.x + t * other.x,
            it * self.y + t * other.y,
            it * self.z + t * other.z,
            it * self.w + t * other.w,
        )
    }

    pub fn similar(self, other: Self, epsilon: f64) -> bool {
        scalar::similar(self.x, other.x, epsilon)
            && scalar::similar(self.y, other.y, epsilon)
            && scalar::similar(self.z, other.z, epsilon)
            && scalar::similar(self.w, other.w, epsilon)
    }

    pub fn to_int(self) -> Vector4<i32> {
        Vector4::new(self.x as i32, self.y as i32, self.z as i32, self.w as i32)
    }
}

impl Vector4<i32> {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);
    pub const ONE: Self = Self::new(1, 1, 1, 1);

    pub fn dot_product(self, other: Self) -> f64 {
        (self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w) as f64
    }

    pub fn sqr_magnitude(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w) as f64
    }

    pub fn magnitude(self) -> f64 {
        self.sqr_magnitude().sqrt()
    }

    /// Widens to `f64` and normalizes there.
    pub fn normalize(self) -> Vector4<f64> {
        self.to_double().normalize()
    }

    pub fn vector_scale(self, scalar: Self) -> Self {
        Self::new(
            self.x * scalar.x,
            self.y * scalar.y,
            self.z * scalar.z,
            self.w * scalar.w,
        )
    }

    pub fn lerp(self, other: Self, t: f64) -> Vector4<f64> {
        self.to_double().lerp(other.to_double(), t)
    }

    pub fn similar(self, other: Self, epsilon: f64) -> bool {
        self.to_double().similar(other.to_double(), epsilon)
    }

    pub fn to_double(self) -> Vector4<f64> {
        Vector4::new(self.x as f64, self.y as f64, self.z as f64, self.w as f64)
    }
}

/// Applies the 3x3 rotation/scale block, then adds the translation column.
impl Mul<Matrix4x4> for Vector3<f64> {
    type Output = Self;
    fn mul(self, mat: Matrix4x4) -> Self {
        Self::new(
            mat[0][0] * self.x + mat[0][1] * self.y + mat[0][2] * self.z + mat[0][3],
            mat[1][0] * self.x + mat[1][1] * self.y + mat[1][2] * self.z + mat[1][3],
            mat[2][0] * self.x + mat[2][1] * self.y + mat[2][2] * self.z + mat[2][3],
        )
    }
}

impl MulAssign<Matrix4x4> for Vector3<f64> {
    fn mul_assign(&mut self, mat: Matrix4x4) {
        *self = *self * mat;
    }
}

impl Mul<Matrix4x4> for Vector3<i32> {
    type Output = Self;
    fn mul(self, mat: Matrix4x4) -> Self {
        (self.to_double() * mat).to_int()
    }
}

impl MulAssign<Matrix4x4> for Vector3<i32> {
    fn mul_assign(&mut self, mat: Matrix4x4) {
        *self = *self * mat;
    }
}

/// True 4x4 matrix application.
impl Mul<Matrix4x4> for Vector4<f64> {
    type Output = Self;
    fn mul(self, mat: Matrix4x4) -> Self {
        Self::new(
            mat[0][0] * self.x + mat[0][1] * self.y + mat[0][2] * self.z + mat[0][3] * self.w,
            mat[1][0] * self.x + mat[1][1] * self.y + mat[1][2] * self.z + mat[1][3] * self.w,
            mat[2][0] * self.x + mat[2][1] * self.y + mat[2][2] * self.z + mat[2][3] * self.w,
            mat[3][0] * self.x + mat[3][1] * self.y + mat[3][2] * self.z + mat[3][3] * self.w,
        )
    }
}

impl MulAssign<Matrix4x4> for Vector4<f64> {
    fn mul_assign(&mut self, mat: Matrix4x4) {
        *self = *self * mat;
    }
}
