//! Unit-quaternion rotation representation.
//!
//! Three derived forms (inverse, Euler angles, rotation matrix) are computed
//! lazily and cached, each behind its own mutex so concurrent readers of
//! different forms never contend. Any mutation invalidates all three caches;
//! a read under a stale cache recomputes and stores while holding that
//! cache's lock (check-compute-store, not double-checked locking).

use std::ops::{Div, DivAssign, Mul, MulAssign};
use std::sync::Mutex;

use crate::math::matrix::Matrix4x4;
use crate::math::scalar::DEFAULT_EPSILON;
use crate::math::vector::{Vector3d, Vector4d};

const DEG2RAD: f64 = std::f64::consts::PI / 180.0;
const RAD2DEG: f64 = 180.0 / std::f64::consts::PI;

#[derive(Debug)]
pub struct Quaternion {
    v: Vector4d,
    cache_inverse: Mutex<Option<Vector4d>>,
    cache_euler: Mutex<Option<Vector3d>>,
    cache_matrix: Mutex<Option<Matrix4x4>>,
}

impl Quaternion {
    /// Identity rotation (0, 0, 0, 1).
    pub fn identity() -> Self {
        Self::from_raw(Vector4d::new(0.0, 0.0, 0.0, 1.0))
    }

    /// Constructs from raw x, y, z, w values.
    pub fn from_raw(values: Vector4d) -> Self {
        Self {
            v: values,
            cache_inverse: Mutex::new(None),
            cache_euler: Mutex::new(None),
            cache_matrix: Mutex::new(None),
        }
    }

    /// Constructs from Euler angles in degrees (ZYX half-angle combination).
    pub fn from_euler_angles(euler_angles: Vector3d) -> Self {
        let euler_rad = euler_angles * DEG2RAD;

        let cy = (euler_rad.z * 0.5).cos();
        let sy = (euler_rad.z * 0.5).sin();
        let cp = (euler_rad.y * 0.5).cos();
        let sp = (euler_rad.y * 0.5).sin();
        let cr = (euler_rad.x * 0.5).cos();
        let sr = (euler_rad.x * 0.5).sin();

        Self::from_raw(Vector4d::new(
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
            cr * cp * cy + sr * sp * sy,
        ))
    }

    pub fn get_raw_values(&self) -> Vector4d {
        self.v
    }

    pub fn set_raw_values(&mut self, values: Vector4d) {
        self.invalidate_caches();
        self.v = values;
    }

    /// `conjugate * (1 / sqr_magnitude)`, cached.
    pub fn inverse(&self) -> Quaternion {
        let mut cache = self.cache_inverse.lock().unwrap();
        let raw = match *cache {
            Some(raw) => raw,
            None => {
                let raw = self.conjugate().v * (1.0 / self.v.sqr_magnitude());
                *cache = Some(raw);
                raw
            }
        };
        Quaternion::from_raw(raw)
    }

    /// Negates x, y, z, keeps w.
    pub fn conjugate(&self) -> Quaternion {
        Quaternion::from_raw(Vector4d::new(-self.v.x, -self.v.y, -self.v.z, self.v.w))
    }

    /// Scaled to unit length.
    pub fn unit_quaternion(&self) -> Quaternion {
        Quaternion::from_raw(self.v * (1.0 / self.v.magnitude()))
    }

    /// Rotates a point around the origin.
    ///
    /// The sandwich is `inverse() * pure(v) * self`. The engine's rotation
    /// direction everywhere is calibrated against this exact form; do not
    /// swap it for the conjugate-on-the-right convention.
    pub fn rotate_vector(&self, vec: Vector3d) -> Vector3d {
        let pure = Quaternion::from_raw(Vector4d::new(vec.x, vec.y, vec.z, 0.0));
        let f = self.inverse() * pure * self.clone();
        Vector3d::new(f.v.x, f.v.y, f.v.z)
    }

    /// Euler angles in degrees, cached. Pitch is clamped to +-90 degrees at
    /// the gimbal singularity.
    pub fn to_euler_angles(&self) -> Vector3d {
        let mut cache = self.cache_euler.lock().unwrap();
        match *cache {
            Some(euler) => euler,
            None => {
                let v = self.v;

                // roll (x-axis rotation)
                let sinr_cosp = 2.0 * (v.w * v.x + v.y * v.z);
                let cosr_cosp = 1.0 - 2.0 * (v.x * v.x + v.y * v.y);
                let x = sinr_cosp.atan2(cosr_cosp);

                // pitch (y-axis rotation)
                let sinp = 2.0 * (v.w * v.y - v.z * v.x);
                let y = if sinp.abs() >= 1.0 {
                    (std::f64::consts::PI / 2.0).copysign(sinp)
                } else {
                    sinp.asin()
                };

                // yaw (z-axis rotation)
                let siny_cosp = 2.0 * (v.w * v.z + v.x * v.y);
                let cosy_cosp = 1.0 - 2.0 * (v.y * v.y + v.z * v.z);
                let z = siny_cosp.atan2(cosy_cosp);

                let euler = Vector3d::new(x, y, z) * RAD2DEG;
                *cache = Some(euler);
                euler
            }
        }
    }

    /// Rotation matrix form, cached. Writes the standard quaternion formula
    /// into the 3x3 block and sets cell p to 1.
    pub fn to_rotation_matrix(&self) -> Matrix4x4 {
        let mut cache = self.cache_matrix.lock().unwrap();
        match *cache {
            Some(m) => m,
            None => {
                let v = self.v;
                let (x, y, z, w) = (v.x, v.y, v.z, v.w);
                let (sqx, sqy, sqz, sqw) = (x * x, y * y, z * z, w * w);

                // Inverse square length; normalizes a non-unit quaternion.
                let invs = 1.0 / (sqx + sqy + sqz + sqw);

                let mut m = Matrix4x4::new();

                *m.a_mut() = (1.0 - 2.0 * sqy - 2.0 * sqz) * invs;
                *m.b_mut() = (2.0 * x * y + 2.0 * w * z) * invs;
                *m.c_mut() = (2.0 * x * z - 2.0 * w * y) * invs;

                *m.e_mut() = (2.0 * x * y - 2.0 * w * z) * invs;
                *m.f_mut() = (1.0 - 2.0 * sqx - 2.0 * sqz) * invs;
                *m.g_mut() = (2.0 * y * z + 2.0 * w * x) * invs;

                *m.i_mut() = (2.0 * x * z + 2.0 * w * y) * invs;
                *m.j_mut() = (2.0 * y * z - 2.0 * w * x) * invs;
                *m.k_mut() = (1.0 - 2.0 * sqx - 2.0 * sqy) * invs;

                *m.p_mut() = 1.0;

                *cache = Some(m);
                m
            }
        }
    }

    /// NLERP: raw 4-vector lerp followed by renormalization.
    pub fn lerp(&self, other: &Quaternion, t: f64) -> Quaternion {
        Quaternion::from_raw(self.v.lerp(other.v, t)).unit_quaternion()
    }

    /// The rotation between two quaternions: `other * self.conjugate()`.
    pub fn angle_between(&self, other: &Quaternion) -> Quaternion {
        other.clone() * self.conjugate()
    }

    /// Component-wise tolerance comparison of the raw values only (no
    /// double-cover handling; use `==` for that).
    pub fn similar(&self, other: &Quaternion, epsilon: f64) -> bool {
        self.v.similar(other.v, epsilon)
    }

    fn invalidate_caches(&mut self) {
        *self.cache_inverse.lock().unwrap() = None;
        *self.cache_euler.lock().unwrap() = None;
        *self.cache_matrix.lock().unwrap() = None;
    }

    fn hamilton(a: Vector4d, b: Vector4d) -> Vector4d {
        Vector4d::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y + a.y * b.w + a.z * b.x - a.x * b.z,
            a.w * b.z + a.z * b.w + a.x * b.y - a.y * b.x,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

/// A clone carries the raw values with cold caches.
impl Clone for Quaternion {
    fn clone(&self) -> Self {
        Self::from_raw(self.v)
    }
}

/// Double-cover tolerant equality: q and -q represent the same rotation.
impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        self.v.similar(other.v, DEFAULT_EPSILON) || self.v.similar(other.v * -1.0, DEFAULT_EPSILON)
    }
}

/// Hamilton product. Under `rotate_vector`, `a * b` applies a first, then b.
impl Mul for Quaternion {
    type Output = Quaternion;
    fn mul(self, q: Quaternion) -> Quaternion {
        Quaternion::from_raw(Quaternion::hamilton(self.v, q.v))
    }
}

impl MulAssign for Quaternion {
    fn mul_assign(&mut self, q: Quaternion) {
        self.invalidate_caches();
        self.v = Quaternion::hamilton(self.v, q.v);
    }
}

impl Div for Quaternion {
    type Output = Quaternion;
    fn div(self, q: Quaternion) -> Quaternion {
        let inv = q.inverse();
        self * inv
    }
}

impl DivAssign for Quaternion {
    fn div_assign(&mut self, q: Quaternion) {
        self.invalidate_caches();
        self.v = Quaternion::hamilton(self.v, q.inverse().v);
    }
}
