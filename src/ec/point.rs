//! P-256 elliptic curve point operations

use crate::ec::constants::{FIELD_ELEMENT_SIZE, POINT_UNCOMPRESSED_SIZE};
use crate::ec::field::FieldElement;
use crate::ec::scalar::Scalar;
use crate::error::{validate, Error, Result};
use subtle::{Choice, ConditionallySelectable};

/// A point on the P-256 curve in affine coordinates
#[derive(Clone, Debug)]
pub struct Point {
    pub(crate) is_identity: Choice,
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

/// Jacobian projective representation used internally for group operations
///
/// (X : Y : Z) with x = X/Z² and y = Y/Z³. The identity carries an explicit
/// flag; its coordinate words are never interpreted.
#[derive(Clone, Debug)]
pub(crate) struct ProjectivePoint {
    is_identity: Choice,
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        let self_is_identity: bool = self.is_identity.into();
        let other_is_identity: bool = other.is_identity.into();
        if self_is_identity || other_is_identity {
            return self_is_identity == other_is_identity;
        }
        self.x == other.x && self.y == other.y
    }
}

impl Point {
    /// Create a new point from uncompressed coordinates.
    ///
    /// Returns an error unless both coordinates are canonical field elements
    /// and satisfy the curve equation. This check runs before any arithmetic
    /// ever uses an externally supplied point.
    pub fn new_uncompressed(
        x: &[u8; FIELD_ELEMENT_SIZE],
        y: &[u8; FIELD_ELEMENT_SIZE],
    ) -> Result<Self> {
        let x_fe = FieldElement::from_bytes(x).map_err(|_| Error::InvalidPoint {
            context: "P-256 point",
            reason: "x-coordinate is not a canonical field element",
        })?;
        let y_fe = FieldElement::from_bytes(y).map_err(|_| Error::InvalidPoint {
            context: "P-256 point",
            reason: "y-coordinate is not a canonical field element",
        })?;
        if !Self::is_on_curve(&x_fe, &y_fe) {
            return Err(Error::InvalidPoint {
                context: "P-256 point",
                reason: "coordinates do not satisfy the curve equation",
            });
        }
        Ok(Point {
            is_identity: Choice::from(0),
            x: x_fe,
            y: y_fe,
        })
    }

    /// Create the identity point (point at infinity).
    pub fn identity() -> Self {
        Point {
            is_identity: Choice::from(1),
            x: FieldElement::zero(),
            y: FieldElement::zero(),
        }
    }

    /// Check if this point is the identity element.
    pub fn is_identity(&self) -> bool {
        self.is_identity.into()
    }

    /// Get the x-coordinate of this point as big-endian bytes.
    pub fn x_coordinate_bytes(&self) -> [u8; FIELD_ELEMENT_SIZE] {
        self.x.to_bytes()
    }

    /// Get the y-coordinate of this point as big-endian bytes.
    pub fn y_coordinate_bytes(&self) -> [u8; FIELD_ELEMENT_SIZE] {
        self.y.to_bytes()
    }

    /// Serialize this point in uncompressed format: 0x04 || x || y.
    ///
    /// The identity serializes as all zeros.
    pub fn serialize_uncompressed(&self) -> [u8; POINT_UNCOMPRESSED_SIZE] {
        let mut out = [0u8; POINT_UNCOMPRESSED_SIZE];
        if self.is_identity() {
            return out;
        }
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.x.to_bytes());
        out[33..].copy_from_slice(&self.y.to_bytes());
        out
    }

    /// Deserialize a point from uncompressed format.
    ///
    /// Returns an error if the bytes don't represent a valid point.
    pub fn deserialize_uncompressed(bytes: &[u8]) -> Result<Self> {
        validate::length(
            "P-256 uncompressed point",
            bytes.len(),
            POINT_UNCOMPRESSED_SIZE,
        )?;

        // All zeros encodes the identity
        if bytes.iter().all(|&b| b == 0) {
            return Ok(Self::identity());
        }

        if bytes[0] != 0x04 {
            return Err(Error::InvalidPoint {
                context: "P-256 point",
                reason: "invalid uncompressed point prefix (expected 0x04)",
            });
        }

        let mut x_bytes = [0u8; FIELD_ELEMENT_SIZE];
        let mut y_bytes = [0u8; FIELD_ELEMENT_SIZE];
        x_bytes.copy_from_slice(&bytes[1..33]);
        y_bytes.copy_from_slice(&bytes[33..65]);

        Self::new_uncompressed(&x_bytes, &y_bytes)
    }

    /// Add two points using the group law.
    pub fn add(&self, other: &Self) -> Self {
        self.to_projective().add(&other.to_projective()).to_affine()
    }

    /// Double a point (add it to itself).
    pub fn double(&self) -> Self {
        self.to_projective().double().to_affine()
    }

    /// Scalar multiplication: compute scalar * self.
    ///
    /// Fixed-pattern double-and-add: every one of the 256 scalar bits costs
    /// one doubling, one addition, and one constant-time selection, so the
    /// schedule is independent of the scalar's value and bit length.
    pub fn mul(&self, scalar: &Scalar) -> Result<Self> {
        if scalar.is_zero() {
            return Ok(Self::identity());
        }
        let base = self.to_projective();
        let mut acc = ProjectivePoint::identity();
        for byte in scalar.as_secret_buffer().as_ref().iter() {
            for bit_pos in (0..8).rev() {
                acc = acc.double();
                let sum = acc.add(&base);
                let bit = Choice::from((byte >> bit_pos) & 1);
                acc = ProjectivePoint::conditional_select(&acc, &sum, bit);
            }
        }
        Ok(acc.to_affine())
    }

    fn is_on_curve(x: &FieldElement, y: &FieldElement) -> bool {
        let y_squared = y.square();
        let a = FieldElement(FieldElement::A_M3);
        let b = FieldElement(FieldElement::B);
        let rhs = x.square().mul(x).add(&a.mul(x)).add(&b);
        y_squared == rhs
    }

    fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            is_identity: self.is_identity,
            x: self.x.clone(),
            y: self.y.clone(),
            z: FieldElement::conditional_select(
                &FieldElement::one(),
                &FieldElement::zero(),
                self.is_identity,
            ),
        }
    }
}

impl ProjectivePoint {
    pub fn identity() -> Self {
        ProjectivePoint {
            is_identity: Choice::from(1),
            x: FieldElement::zero(),
            y: FieldElement::one(),
            z: FieldElement::zero(),
        }
    }

    /// Constant-time selection: returns `a` if flag is 0, `b` if flag is 1
    pub fn conditional_select(a: &Self, b: &Self, flag: Choice) -> Self {
        ProjectivePoint {
            is_identity: Choice::conditional_select(&a.is_identity, &b.is_identity, flag),
            x: FieldElement::conditional_select(&a.x, &b.x, flag),
            y: FieldElement::conditional_select(&a.y, &b.y, flag),
            z: FieldElement::conditional_select(&a.z, &b.z, flag),
        }
    }

    /// Point addition with a fixed operation schedule.
    ///
    /// The general sum, the doubling, and the identity are all computed or
    /// encoded unconditionally; the exceptional cases (either operand is the
    /// identity, P = Q, P = -Q) are resolved by constant-time selection
    /// instead of data-dependent branches.
    pub fn add(&self, other: &Self) -> Self {
        let z1_sq = self.z.square();
        let z2_sq = other.z.square();
        let u1 = self.x.mul(&z2_sq);
        let u2 = other.x.mul(&z1_sq);
        let s1 = self.y.mul(&z2_sq).mul(&other.z);
        let s2 = other.y.mul(&z1_sq).mul(&self.z);

        let h = u2.sub(&u1);
        let r = s2.sub(&s1);

        // General case: meaningless words when h = 0, discarded below
        let h_sq = h.square();
        let h_cu = h_sq.mul(&h);
        let v = u1.mul(&h_sq);

        let r_sq = r.square();
        let two_v = v.add(&v);
        let x3 = r_sq.sub(&h_cu).sub(&two_v);

        let v_minus_x3 = v.sub(&x3);
        let y3 = r.mul(&v_minus_x3).sub(&s1.mul(&h_cu));

        let z3 = self.z.mul(&other.z).mul(&h);

        let general = ProjectivePoint {
            is_identity: Choice::from(0),
            x: x3,
            y: y3,
            z: z3,
        };

        let h_zero = h.is_zero();
        let r_zero = r.is_zero();

        // h = 0, r = 0: the operands are equal, take the doubling
        let mut result = Self::conditional_select(&general, &self.double(), h_zero & r_zero);
        // h = 0, r != 0: the operands are inverses, take the identity
        result = Self::conditional_select(&result, &Self::identity(), h_zero & !r_zero);
        // Either operand is the identity: take the other one
        result = Self::conditional_select(&result, self, other.is_identity);
        result = Self::conditional_select(&result, other, self.is_identity);
        result
    }

    /// Point doubling with the a = -3 short-Weierstrass formulas.
    ///
    /// Computed unconditionally; the identity flag rides along, and no
    /// curve point has y = 0 (the order is odd), so the formulas are total.
    pub fn double(&self) -> Self {
        let z_sq = self.z.square();

        // m = 3(x - z²)(x + z²), the a = -3 form of 3x² + az⁴
        let m = {
            let t = self.x.sub(&z_sq).mul(&self.x.add(&z_sq));
            t.add(&t).add(&t)
        };

        let y_sq = self.y.square();

        // s = 4xy²
        let s = {
            let xy_sq = self.x.mul(&y_sq);
            let two = xy_sq.add(&xy_sq);
            two.add(&two)
        };

        // x₃ = m² - 2s
        let x3 = m.square().sub(&s.add(&s));

        // y₃ = m(s - x₃) - 8y⁴
        let y_quartic = y_sq.square();
        let eight_y_quartic = {
            let two = y_quartic.add(&y_quartic);
            let four = two.add(&two);
            four.add(&four)
        };
        let y3 = m.mul(&s.sub(&x3)).sub(&eight_y_quartic);

        // z₃ = 2yz
        let z3 = {
            let yz = self.y.mul(&self.z);
            yz.add(&yz)
        };

        ProjectivePoint {
            is_identity: self.is_identity,
            x: x3,
            y: y3,
            z: z3,
        }
    }

    pub fn to_affine(&self) -> Point {
        if self.is_identity.into() {
            return Point::identity();
        }
        let z_inv = self
            .z
            .invert()
            .expect("nonzero Z is invertible for non-identity points");
        let z_inv_sq = z_inv.square();
        let z_inv_cu = z_inv_sq.mul(&z_inv);
        let x_aff = self.x.mul(&z_inv_sq);
        let y_aff = self.y.mul(&z_inv_cu);
        Point {
            is_identity: Choice::from(0),
            x: x_aff,
            y: y_aff,
        }
    }
}
