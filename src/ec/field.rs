//! P-256 field arithmetic implementation

use crate::ec::constants::FIELD_ELEMENT_SIZE;
use crate::error::{Error, Result};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// P-256 field element representing values in F_p
///
/// Internally stored as 8 little-endian 32-bit limbs for efficient
/// arithmetic. All operations maintain the invariant that values are
/// reduced modulo p.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldElement(pub(crate) [u32; 8]);

impl FieldElement {
    /// The NIST P-256 prime modulus: p = 2^256 - 2^224 + 2^192 + 2^96 - 1
    /// Stored as 8 little-endian 32-bit limbs where limbs[0] is least significant
    pub(crate) const MOD_LIMBS: [u32; 8] = [
        0xFFFF_FFFF, // 2⁰ … 2³¹
        0xFFFF_FFFF, // 2³² … 2⁶³
        0xFFFF_FFFF, // 2⁶⁴ … 2⁹⁵
        0x0000_0000, // 2⁹⁶ … 2¹²⁷
        0x0000_0000, // 2¹²⁸ … 2¹⁵⁹
        0x0000_0000, // 2¹⁶⁰ … 2¹⁹¹
        0x0000_0001, // 2¹⁹² … 2²²³
        0xFFFF_FFFF, // 2²²⁴ … 2²⁵⁵
    ];

    /// The curve parameter a = -3 mod p, used in the curve equation y² = x³ + ax + b
    pub(crate) const A_M3: [u32; 8] = [
        0xFFFF_FFFC,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0x0000_0000,
        0x0000_0000,
        0x0000_0000,
        0x0000_0001,
        0xFFFF_FFFF,
    ];

    /// The curve parameter b
    pub(crate) const B: [u32; 8] = [
        0x27D2_604B,
        0x3BCE_3C3E,
        0xCC53_B0F6,
        0x651D_06B0,
        0x7698_86BC,
        0xB3EB_BD55,
        0xAA3A_93E7,
        0x5AC6_35D8,
    ];

    /// The additive identity element: 0
    pub fn zero() -> Self {
        FieldElement([0, 0, 0, 0, 0, 0, 0, 0])
    }

    /// The multiplicative identity element: 1
    pub fn one() -> Self {
        FieldElement([1, 0, 0, 0, 0, 0, 0, 0])
    }

    /// Create a field element from big-endian byte representation
    ///
    /// Validates that the input represents a value less than the field
    /// modulus p. Returns an error if the value is >= p.
    pub fn from_bytes(bytes: &[u8; FIELD_ELEMENT_SIZE]) -> Result<Self> {
        let mut limbs = [0u32; 8];

        // limbs[0] = least-significant 4 bytes (bytes[28..32])
        // limbs[7] = most-significant 4 bytes (bytes[0..4])
        for (i, limb) in limbs.iter_mut().enumerate() {
            let offset = (7 - i) * 4;
            *limb = u32::from_be_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ]);
        }

        let fe = FieldElement(limbs);
        if !fe.is_valid() {
            return Err(Error::param(
                "FieldElement",
                "Value must be less than the field modulus",
            ));
        }

        Ok(fe)
    }

    /// Convert field element to big-endian byte representation
    pub fn to_bytes(&self) -> [u8; FIELD_ELEMENT_SIZE] {
        let mut bytes = [0u8; FIELD_ELEMENT_SIZE];

        for i in 0..8 {
            let limb_bytes = self.0[i].to_be_bytes();
            let offset = (7 - i) * 4;
            bytes[offset..offset + 4].copy_from_slice(&limb_bytes);
        }
        bytes
    }

    /// Constant-time validation that the field element is in canonical form (< p)
    #[inline(always)]
    pub fn is_valid(&self) -> bool {
        // If subtracting p requires a borrow, then self < p
        let (_, borrow) = Self::sbb8(self.0, Self::MOD_LIMBS);
        borrow == 1
    }

    /// Constant-time field addition: (self + other) mod p
    #[inline(always)]
    pub fn add(&self, other: &Self) -> Self {
        // Full 256-bit addition
        let (sum, carry) = Self::adc8(self.0, other.0);

        // Attempt conditional reduction by subtracting p
        let (sum_minus_p, borrow) = Self::sbb8(sum, Self::MOD_LIMBS);

        // Reduce if the addition overflowed or the sum is >= p
        let need_reduce = (carry | (borrow ^ 1)) & 1;
        let reduced = Self::select(&sum, &sum_minus_p, Choice::from(need_reduce as u8));

        reduced.conditional_sub_p()
    }

    /// Constant-time field subtraction: (self - other) mod p
    pub fn sub(&self, other: &Self) -> Self {
        let (diff, borrow) = Self::sbb8(self.0, other.0);

        // If we borrowed, add p back to get the correct positive result
        let (candidate, _) = Self::adc8(diff, Self::MOD_LIMBS);

        Self::select(&diff, &candidate, Choice::from(borrow as u8))
    }

    /// Field multiplication: (self * other) mod p
    ///
    /// Schoolbook multiplication into a 512-bit product followed by the
    /// NIST P-256 fast reduction.
    pub fn mul(&self, other: &Self) -> Self {
        // Accumulate partial products in 128-bit temporaries
        let mut t = [0u128; 16];
        for i in 0..8 {
            for j in 0..8 {
                t[i + j] += (self.0[i] as u128) * (other.0[j] as u128);
            }
        }

        // Carry propagation to 32-bit limb representation
        let mut prod = [0u32; 16];
        let mut carry: u128 = 0;
        for i in 0..16 {
            let v = t[i] + carry;
            prod[i] = (v & 0xffff_ffff) as u32;
            carry = v >> 32;
        }

        Self::reduce_wide(prod)
    }

    /// Field squaring: self² mod p
    #[inline(always)]
    pub fn square(&self) -> Self {
        self.mul(self)
    }

    /// Compute the modular multiplicative inverse using Fermat's little theorem
    ///
    /// For prime fields a^(p-2) ≡ a^(-1) (mod p). The exponent is a fixed
    /// public constant, so the square-and-multiply schedule leaks nothing
    /// about the operand.
    pub fn invert(&self) -> Result<Self> {
        if bool::from(self.is_zero()) {
            return Err(Error::DivisionByZero {
                context: "field inversion",
            });
        }

        // p - 2 in big-endian byte format
        const P_MINUS_2: [u8; 32] = [
            0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFF, 0xFF, 0xFD,
        ];

        let mut result = FieldElement::one();
        let mut base = self.clone();

        // Process each exponent bit from least to most significant
        for &byte in P_MINUS_2.iter().rev() {
            for bit in 0..8 {
                if (byte >> bit) & 1 == 1 {
                    result = result.mul(&base);
                }
                base = base.square();
            }
        }

        Ok(result)
    }

    /// Constant-time check for the additive identity
    pub fn is_zero(&self) -> Choice {
        let mut acc = 0u32;
        for limb in self.0.iter() {
            acc |= *limb;
        }
        acc.ct_eq(&0)
    }

    /// Constant-time selection: returns `a` if flag is 0, `b` if flag is 1
    pub(crate) fn conditional_select(a: &Self, b: &Self, flag: Choice) -> Self {
        Self::select(&a.0, &b.0, flag)
    }

    // Private helper methods

    fn select(a: &[u32; 8], b: &[u32; 8], flag: Choice) -> Self {
        let mut out = [0u32; 8];
        for (i, out_elem) in out.iter_mut().enumerate() {
            *out_elem = u32::conditional_select(&a[i], &b[i], flag);
        }
        FieldElement(out)
    }

    /// 8-limb addition with carry propagation
    #[inline(always)]
    fn adc8(a: [u32; 8], b: [u32; 8]) -> ([u32; 8], u32) {
        let mut r = [0u32; 8];
        let mut carry = 0;

        for (i, r_elem) in r.iter_mut().enumerate() {
            let (sum1, carry1) = a[i].overflowing_add(b[i]);
            let (sum2, carry2) = sum1.overflowing_add(carry);

            *r_elem = sum2;
            carry = (carry1 as u32) | (carry2 as u32);
        }

        (r, carry)
    }

    /// 8-limb subtraction with borrow propagation
    #[inline(always)]
    fn sbb8(a: [u32; 8], b: [u32; 8]) -> ([u32; 8], u32) {
        let mut r = [0u32; 8];
        let mut borrow = 0;

        for (i, r_elem) in r.iter_mut().enumerate() {
            let (diff1, borrow1) = a[i].overflowing_sub(b[i]);
            let (diff2, borrow2) = diff1.overflowing_sub(borrow);

            *r_elem = diff2;
            borrow = (borrow1 as u32) | (borrow2 as u32);
        }
        (r, borrow)
    }

    /// Conditionally subtract p if the current value is >= p
    fn conditional_sub_p(&self) -> Self {
        let needs_sub = Choice::from((!self.is_valid() as u8) & 1);
        let (diff, _) = Self::sbb8(self.0, Self::MOD_LIMBS);
        Self::select(&self.0, &diff, needs_sub)
    }

    /// Reduce a 512-bit value (16 little-endian `u32` limbs) modulo
    /// p = 2²⁵⁶ − 2²²⁴ + 2¹⁹² + 2⁹⁶ − 1 (NIST P-256).
    ///
    /// Constant-time Solinas reduction: the classic nine-term folding
    /// (r = s1 + 2s2 + 2s3 + s4 + s5 − s6 − s7 − s8 − s9) is accumulated
    /// in signed 128-bit limbs, offset by 8p so the running value stays
    /// non-negative, then normalized with a fixed schedule of carry
    /// sweeps and 2²⁵⁶ ≡ 2²²⁴ − 2¹⁹² − 2⁹⁶ + 1 folds.
    #[inline(always)]
    pub(crate) fn reduce_wide(t: [u32; 16]) -> FieldElement {
        let c = |i: usize| t[i] as i128;

        /* ── 1. nine-term accumulation, plus 8p to keep the value positive ── */
        let mut s = [0i128; 8];
        for (i, s_elem) in s.iter_mut().enumerate() {
            *s_elem = c(i) + 8 * (Self::MOD_LIMBS[i] as i128);
        }

        // 2(s2 + s3)
        s[3] += 2 * (c(11) + c(12));
        s[4] += 2 * (c(12) + c(13));
        s[5] += 2 * (c(13) + c(14));
        s[6] += 2 * (c(14) + c(15));
        s[7] += 2 * c(15);

        // s4 + s5
        s[0] += c(8) + c(9);
        s[1] += c(9) + c(10);
        s[2] += c(10) + c(11);
        s[3] += c(13);
        s[4] += c(14);
        s[5] += c(15);
        s[6] += c(14) + c(13);
        s[7] += c(15) + c(8);

        // -(s6 + s7 + s8 + s9)
        s[0] -= c(11) + c(12) + c(13) + c(14);
        s[1] -= c(12) + c(13) + c(14) + c(15);
        s[2] -= c(13) + c(14) + c(15);
        s[3] -= c(15) + c(8) + c(9);
        s[4] -= c(9) + c(10);
        s[5] -= c(10) + c(11);
        s[6] -= c(8) + c(9);
        s[7] -= c(10) + c(11) + c(12) + c(13);

        /* ── 2. first signed carry sweep ───────────────────────────────── */
        let mut carry: i128 = 0;
        for elem in s.iter_mut() {
            let tmp = *elem + carry;
            *elem = tmp & 0xffff_ffff;
            carry = tmp >> 32; // arithmetic shift
        }

        /* ── 3. fold carry·2²⁵⁶ back in (carry is in [0, 15]) ─────────── */
        s[0] += carry;
        s[3] -= carry;
        s[6] -= carry;
        s[7] += carry;

        /* ── 4. second signed carry sweep ──────────────────────────────── */
        carry = 0;
        for elem in s.iter_mut() {
            let tmp = *elem + carry;
            *elem = tmp & 0xffff_ffff;
            carry = tmp >> 32;
        }

        /* ── 5. second fold; the carry here is 0 or 1 ──────────────────── */
        s[0] += carry;
        s[3] -= carry;
        s[6] -= carry;
        s[7] += carry;

        /* ── 6. final carry sweep into ordinary u32 limbs ──────────────── */
        let mut out = [0u32; 8];
        carry = 0;
        for (i, out_elem) in out.iter_mut().enumerate() {
            let tmp = s[i] + carry;
            *out_elem = (tmp & 0xffff_ffff) as u32;
            carry = tmp >> 32;
        }
        debug_assert!(carry == 0); // everything folded

        /* ── 7. last conditional subtract if ≥ p ───────────────────────── */
        let (sub, borrow) = Self::sbb8(out, Self::MOD_LIMBS);
        let need_sub = Choice::from((borrow ^ 1) as u8); // borrow==0 ⇒ out≥p
        Self::select(&out, &sub, need_sub)
    }
}
