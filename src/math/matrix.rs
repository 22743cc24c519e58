//! A 4x4 matrix representing a 3D transformation.
//!
//! The grid is row-major and logically split into a 3x3 block carrying
//! rotation and scale, and a translation column stored in the cells `d`, `h`,
//! `l`:
//!
//! ```text
//!  | a b c d |
//!  | e f g h |
//!  | i j k l |
//!  | m n o p |
//! ```
//!
//! The `*` operator is the engine's affine fast path: it multiplies the 3x3
//! blocks and ADDS the translation columns. It is not a true matrix product;
//! use [`Matrix4x4::multiply4x4`] for that.

use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

use crate::error::MathError;
use crate::math::scalar;
use crate::math::vector::Vector3d;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4x4 {
    pub v: [[f64; 4]; 4],
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! cell_accessors {
    ($($name:ident, $name_mut:ident => [$row:literal][$col:literal]);+ $(;)?) => {
        $(
            #[inline]
            pub fn $name(&self) -> f64 {
                self.v[$row][$col]
            }

            #[inline]
            pub fn $name_mut(&mut self) -> &mut f64 {
                &mut self.v[$row][$col]
            }
        )+
    };
}

impl Matrix4x4 {
    pub const IDENTITY: Self = Self {
        v: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// A fresh matrix is the identity.
    pub const fn new() -> Self {
        Self::IDENTITY
    }

    /// Scale matrix (diagonal a, f, k).
    pub fn from_scale(scale: Vector3d) -> Self {
        let mut m = Self::new();
        m.v[0][0] = scale.x;
        m.v[1][1] = scale.y;
        m.v[2][2] = scale.z;
        m
    }

    /// Translation matrix (column d, h, l).
    pub fn from_translation(translation: Vector3d) -> Self {
        let mut m = Self::new();
        m.set_translation_component(translation);
        m
    }

    // Row-major single-letter shorthands into the grid.
    cell_accessors! {
        a, a_mut => [0][0]; b, b_mut => [0][1]; c, c_mut => [0][2]; d, d_mut => [0][3];
        e, e_mut => [1][0]; f, f_mut => [1][1]; g, g_mut => [1][2]; h, h_mut => [1][3];
        i, i_mut => [2][0]; j, j_mut => [2][1]; k, k_mut => [2][2]; l, l_mut => [2][3];
        m, m_mut => [3][0]; n, n_mut => [3][1]; o, o_mut => [3][2]; p, p_mut => [3][3];
    }

    /// Returns d, h, l as a vector.
    pub fn get_translation_component(&self) -> Vector3d {
        Vector3d::new(self.d(), self.h(), self.l())
    }

    /// Sets d, h, l from a vector.
    pub fn set_translation_component(&mut self, trans: Vector3d) {
        self.v[0][3] = trans.x;
        self.v[1][3] = trans.y;
        self.v[2][3] = trans.z;
    }

    /// A copy with d, h, l zeroed.
    pub fn drop_translation_components(&self) -> Self {
        let mut m = *self;
        m.set_translation_component(Vector3d::ZERO);
        m
    }

    /// Transposes only the 3x3 block; translation and row/column 3 stay put.
    pub fn transpose3x3(&self) -> Self {
        let mut trans = *self;
        for i in 0..3 {
            for j in 0..3 {
                trans.v[j][i] = self.v[i][j];
            }
        }
        trans
    }

    pub fn transpose4x4(&self) -> Self {
        let mut trans = Self::new();
        for i in 0..4 {
            for j in 0..4 {
                trans.v[j][i] = self.v[i][j];
            }
        }
        trans
    }

    /// The mathematically correct full 4x4 product. The `*` operator only
    /// does the affine 3x3 composition.
    pub fn multiply4x4(&self, o: &Matrix4x4) -> Self {
        let mut m = Self::new();
        for row in 0..4 {
            for col in 0..4 {
                m.v[row][col] = self.v[row][0] * o.v[0][col]
                    + self.v[row][1] * o.v[1][col]
                    + self.v[row][2] * o.v[2][col]
                    + self.v[row][3] * o.v[3][col];
            }
        }
        m
    }

    /// The cofactor matrix obtained by deleting row `p` and column `q`,
    /// considering only the top-left `n` x `n` cells.
    pub fn get_cofactors(&self, p: usize, q: usize, n: usize) -> Result<Matrix4x4, MathError> {
        if n > 4 {
            return Err(MathError::DimensionOutOfRange(n));
        }

        let mut cofs = Self::new();
        let mut i = 0;
        let mut j = 0;

        for y in 0..n {
            for x in 0..n {
                if y != p && x != q {
                    cofs.v[i][j] = self.v[y][x];
                    j += 1;
                }
                if j + 1 == n {
                    j = 0;
                    i += 1;
                }
            }
        }

        Ok(cofs)
    }

    /// Determinant of the top-left `n` x `n` block via recursive cofactor
    /// expansion across the first row.
    pub fn determinant(&self, n: usize) -> Result<f64, MathError> {
        if n > 4 {
            return Err(MathError::DimensionOutOfRange(n));
        }

        if n == 1 {
            return Ok(self.v[0][0]);
        }

        let mut det = 0.0;
        let mut sign = 1.0;

        for x in 0..n {
            let cofs = self.get_cofactors(0, x, n)?;
            det += sign * self.v[0][x] * cofs.determinant(n - 1)?;
            sign = -sign;
        }

        Ok(det)
    }

    /// Transpose-of-cofactors matrix for the top-left `n` x `n` block, with
    /// alternating sign `(i + j) even -> +1`.
    pub fn adjoint(&self, n: usize) -> Result<Matrix4x4, MathError> {
        if n > 4 {
            return Err(MathError::DimensionOutOfRange(n));
        }

        let mut adj = Self::new();

        for i in 0..n {
            for j in 0..n {
                let cofs = self.get_cofactors(i, j, n)?;
                let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
                adj.v[j][i] = sign * cofs.determinant(n - 1)?;
            }
        }

        Ok(adj)
    }

    /// Inverts the 3x3 block via adjoint/determinant and NEGATES the
    /// translation component. Negation (rather than inverse-transforming)
    /// matches the convention that the translation is applied before the
    /// linear part when undoing a transform.
    pub fn inverse3x3(&self) -> Result<Matrix4x4, MathError> {
        let det = self.determinant(3)?;
        if det == 0.0 {
            return Err(MathError::NotInvertible);
        }

        let adj = self.adjoint(3)?;
        let mut inv = Self::new();
        for i in 0..3 {
            for j in 0..3 {
                inv.v[i][j] = adj.v[i][j] / det;
            }
        }

        inv.set_translation_component(-self.get_translation_component());
        Ok(inv)
    }

    /// True 4x4 inverse via the same cofactor machinery at n = 4.
    pub fn inverse4x4(&self) -> Result<Matrix4x4, MathError> {
        let det = self.determinant(4)?;
        if det == 0.0 {
            return Err(MathError::NotInvertible);
        }

        let adj = self.adjoint(4)?;
        let mut inv = Self::new();
        for i in 0..4 {
            for j in 0..4 {
                inv.v[i][j] = adj.v[i][j] / det;
            }
        }

        Ok(inv)
    }

    pub fn is_inversible_3x3(&self) -> bool {
        matches!(self.determinant(3), Ok(det) if det != 0.0)
    }

    pub fn is_inversible_4x4(&self) -> bool {
        matches!(self.determinant(4), Ok(det) if det != 0.0)
    }

    /// Affine division: `self * other.inverse3x3()`.
    pub fn divide(&self, other: &Matrix4x4) -> Result<Matrix4x4, MathError> {
        Ok(*self * other.inverse3x3()?)
    }

    /// Epsilon-wise comparison of all 16 cells.
    pub fn similar(&self, other: &Matrix4x4, epsilon: f64) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if !scalar::similar(self.v[i][j], other.v[i][j], epsilon) {
                    return false;
                }
            }
        }
        true
    }
}

impl Index<usize> for Matrix4x4 {
    type Output = [f64; 4];
    fn index(&self, y: usize) -> &[f64; 4] {
        &self.v[y]
    }
}

impl IndexMut<usize> for Matrix4x4 {
    fn index_mut(&mut self, y: usize) -> &mut [f64; 4] {
        &mut self.v[y]
    }
}

/// Affine composition: true 3x3 block product, translations ADDED. This is
/// the fast path used for chaining rigid-ish transforms everywhere in the
/// engine; it is deliberately not a real matrix multiplication.
impl Mul for Matrix4x4 {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        let mut new = Self::new();

        // Rotation, scaling
        for row in 0..3 {
            for col in 0..3 {
                new.v[row][col] = self.v[row][0] * other.v[0][col]
                    + self.v[row][1] * other.v[1][col]
                    + self.v[row][2] * other.v[2][col];
            }
        }

        // Translation
        new.v[0][3] = self.v[0][3] + other.v[0][3];
        new.v[1][3] = self.v[1][3] + other.v[1][3];
        new.v[2][3] = self.v[2][3] + other.v[2][3];

        new
    }
}

impl MulAssign for Matrix4x4 {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl Mul<f64> for Matrix4x4 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        let mut m = self;
        for row in &mut m.v {
            for cell in row {
                *cell *= scalar;
            }
        }
        m
    }
}

impl MulAssign<f64> for Matrix4x4 {
    fn mul_assign(&mut self, scalar: f64) {
        *self = *self * scalar;
    }
}

impl Div<f64> for Matrix4x4 {
    type Output = Self;
    fn div(self, denominator: f64) -> Self {
        self * (1.0 / denominator)
    }
}

impl DivAssign<f64> for Matrix4x4 {
    fn div_assign(&mut self, denominator: f64) {
        *self = *self / denominator;
    }
}

impl Add for Matrix4x4 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        let mut m = self;
        for y in 0..4 {
            for x in 0..4 {
                m.v[y][x] += other.v[y][x];
            }
        }
        m
    }
}

impl AddAssign for Matrix4x4 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Matrix4x4 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        let mut m = self;
        for y in 0..4 {
            for x in 0..4 {
                m.v[y][x] -= other.v[y][x];
            }
        }
        m
    }
}

impl SubAssign for Matrix4x4 {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::scalar::DEFAULT_EPSILON;

    fn rotation_z_90() -> Matrix4x4 {
        let mut m = Matrix4x4::new();
        m.v[0][0] = 0.0;
        m.v[0][1] = -1.0;
        m.v[1][0] = 1.0;
        m.v[1][1] = 0.0;
        m
    }

    #[test]
    fn fresh_matrix_is_identity() {
        let m = Matrix4x4::new();
        assert_eq!(m, Matrix4x4::IDENTITY);
        assert_eq!(m.a(), 1.0);
        assert_eq!(m.p(), 1.0);
        assert_eq!(m.b(), 0.0);
    }

    #[test]
    fn affine_mul_adds_translations() {
        let mut a = rotation_z_90();
        a.set_translation_component(Vector3d::new(1.0, 2.0, 3.0));
        let mut b = Matrix4x4::new();
        b.set_translation_component(Vector3d::new(10.0, 20.0, 30.0));

        let c = a * b;
        assert!(c
            .get_translation_component()
            .similar(Vector3d::new(11.0, 22.0, 33.0), DEFAULT_EPSILON));
    }

    #[test]
    fn multiply4x4_transforms_translation() {
        // With a rotated lhs, the true product runs rhs's translation through
        // the rotation; the affine fast path must not.
        let mut a = rotation_z_90();
        a.set_translation_component(Vector3d::new(1.0, 2.0, 3.0));
        let mut b = Matrix4x4::new();
        b.set_translation_component(Vector3d::new(10.0, 20.0, 30.0));

        let full = a.multiply4x4(&b);
        // a rotates (10,20,30) to (-20,10,30), then adds its own translation
        assert!(full
            .get_translation_component()
            .similar(Vector3d::new(-19.0, 12.0, 33.0), DEFAULT_EPSILON));
        assert!(!full.similar(&(a * b), DEFAULT_EPSILON));
    }

    #[test]
    fn determinant_small_dims() {
        let mut m = Matrix4x4::new();
        m.v[0][0] = 7.0;
        assert_eq!(m.determinant(1).unwrap(), 7.0);

        m.v[0][1] = 2.0;
        m.v[1][0] = 3.0;
        m.v[1][1] = 4.0;
        // | 7 2 ; 3 4 | = 22
        assert_eq!(m.determinant(2).unwrap(), 22.0);
    }

    #[test]
    fn determinant_dimension_out_of_range() {
        let m = Matrix4x4::new();
        assert_eq!(m.determinant(5), Err(MathError::DimensionOutOfRange(5)));
        assert_eq!(
            m.get_cofactors(0, 0, 5),
            Err(MathError::DimensionOutOfRange(5))
        );
        assert_eq!(m.adjoint(5), Err(MathError::DimensionOutOfRange(5)));
    }

    #[test]
    fn inverse3x3_roundtrip() {
        let mut m = Matrix4x4::new();
        m.v[0] = [2.0, 1.0, 0.0, 0.0];
        m.v[1] = [0.0, 3.0, 1.0, 0.0];
        m.v[2] = [1.0, 0.0, 4.0, 0.0];

        let inv = m.inverse3x3().unwrap();
        let product = m * inv;
        assert!(product.similar(&Matrix4x4::IDENTITY, DEFAULT_EPSILON));
    }

    #[test]
    fn inverse3x3_negates_translation() {
        let mut m = Matrix4x4::new();
        m.set_translation_component(Vector3d::new(1.0, -2.0, 3.0));
        let inv = m.inverse3x3().unwrap();
        assert!(inv
            .get_translation_component()
            .similar(Vector3d::new(-1.0, 2.0, -3.0), DEFAULT_EPSILON));
    }

    #[test]
    fn singular_matrix_is_not_invertible() {
        let mut m = Matrix4x4::new();
        m.v[0] = [1.0, 2.0, 3.0, 0.0];
        m.v[1] = [2.0, 4.0, 6.0, 0.0];
        m.v[2] = [0.0, 0.0, 1.0, 0.0];

        assert_eq!(m.determinant(3).unwrap(), 0.0);
        assert!(!m.is_inversible_3x3());
        assert_eq!(m.inverse3x3(), Err(MathError::NotInvertible));
    }

    #[test]
    fn inverse4x4_roundtrip() {
        let mut m = rotation_z_90();
        m.set_translation_component(Vector3d::new(4.0, 5.0, 6.0));

        let inv = m.inverse4x4().unwrap();
        assert!(m.multiply4x4(&inv).similar(&Matrix4x4::IDENTITY, DEFAULT_EPSILON));
        assert!(m.is_inversible_4x4());
    }

    #[test]
    fn transpose3x3_keeps_translation() {
        let mut m = rotation_z_90();
        m.set_translation_component(Vector3d::new(1.0, 2.0, 3.0));
        let t = m.transpose3x3();
        assert_eq!(t.b(), 1.0);
        assert_eq!(t.e(), -1.0);
        assert!(t
            .get_translation_component()
            .similar(Vector3d::new(1.0, 2.0, 3.0), DEFAULT_EPSILON));
    }

    #[test]
    fn transpose4x4_moves_translation() {
        let mut m = Matrix4x4::new();
        m.set_translation_component(Vector3d::new(1.0, 2.0, 3.0));
        let t = m.transpose4x4();
        assert_eq!(t.v[3][0], 1.0);
        assert_eq!(t.v[3][2], 3.0);
        assert_eq!(t.d(), 0.0);
    }

    #[test]
    fn cellwise_arithmetic() {
        let id = Matrix4x4::new();
        let double = id * 2.0;
        assert_eq!(double.a(), 2.0);
        assert_eq!((double / 2.0).a(), 1.0);
        assert_eq!((id + id).f(), 2.0);
        assert_eq!((id - id).f(), 0.0);
    }

    #[test]
    fn drop_translation() {
        let mut m = Matrix4x4::new();
        m.set_translation_component(Vector3d::new(1.0, 2.0, 3.0));
        let dropped = m.drop_translation_components();
        assert_eq!(dropped.get_translation_component(), Vector3d::ZERO);
        // original untouched
        assert_eq!(m.d(), 1.0);
    }

    #[test]
    fn divide_by_matrix() {
        let m = Matrix4x4::from_scale(Vector3d::new(2.0, 2.0, 2.0));
        let q = m.divide(&m).unwrap();
        assert!(q.similar(&Matrix4x4::IDENTITY, DEFAULT_EPSILON));
    }
}
