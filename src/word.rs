//! 256-bit word arithmetic.
//!
//! `Word` is a plain alias for `ethereum_types::U256`: a fixed 4x64-bit
//! limb array with native wraparound. Everything signed is layered on top
//! through explicit `as_int256`/`as_uint256`-style conversions rather than
//! by reinterpreting bits through a cast.

use ethereum_types::U256;

pub type Word = U256;

/// The sign bit of a 256-bit word is bit 255.
const SIGN_BIT: u32 = 255;

/// Reinterpret `w` as a two's-complement signed 256-bit integer and report
/// whether it is negative (sign bit set).
pub fn is_negative(w: Word) -> bool {
    w.bit(SIGN_BIT as usize)
}

/// Two's-complement negation: `(!w) + 1`, wrapping modulo 2^256.
pub fn negate(w: Word) -> Word {
    (!w).overflowing_add(Word::one()).0
}

/// Signed division. Division by zero yields zero; `MIN / -1` yields `MIN`
/// (mirrors the EVM's overflow behavior, avoiding a panic).
pub fn sdiv(a: Word, b: Word) -> Word {
    if b.is_zero() {
        return Word::zero();
    }
    let neg_a = is_negative(a);
    let neg_b = is_negative(b);
    let abs_a = if neg_a { negate(a) } else { a };
    let abs_b = if neg_b { negate(b) } else { b };
    let quotient = abs_a / abs_b;
    if neg_a != neg_b {
        negate(quotient)
    } else {
        quotient
    }
}

/// Signed modulo. Sign of the result follows the dividend, as in the EVM.
pub fn smod(a: Word, b: Word) -> Word {
    if b.is_zero() {
        return Word::zero();
    }
    let neg_a = is_negative(a);
    let neg_b = is_negative(b);
    let abs_a = if neg_a { negate(a) } else { a };
    let abs_b = if neg_b { negate(b) } else { b };
    let remainder = abs_a % abs_b;
    if neg_a {
        negate(remainder)
    } else {
        remainder
    }
}

/// Signed less-than.
pub fn slt(a: Word, b: Word) -> bool {
    match (is_negative(a), is_negative(b)) {
        (true, false) => true,
        (false, true) => false,
        _ => a < b,
    }
}

/// Signed greater-than.
pub fn sgt(a: Word, b: Word) -> bool {
    slt(b, a)
}

/// `ADDMOD(a, b, n)`: `(a + b) mod n` computed without intermediate
/// overflow, `n == 0` yields zero.
pub fn addmod(a: Word, b: Word, n: Word) -> Word {
    if n.is_zero() {
        return Word::zero();
    }
    mod_512(add_512(a, b), n)
}

/// `MULMOD(a, b, n)`: `(a * b) mod n` computed without intermediate
/// overflow, `n == 0` yields zero.
pub fn mulmod(a: Word, b: Word, n: Word) -> Word {
    if n.is_zero() {
        return Word::zero();
    }
    mod_512(mul_512(a, b), n)
}

/// `EXP(base, exponent)` by repeated squaring, wrapping modulo 2^256.
pub fn exp(base: Word, exponent: Word) -> Word {
    let mut result = Word::one();
    let mut base = base;
    let mut exponent = exponent;
    while !exponent.is_zero() {
        if exponent.bit(0) {
            result = result.overflowing_mul(base).0;
        }
        base = base.overflowing_mul(base).0;
        exponent >>= 1;
    }
    result
}

/// Number of bytes needed to hold `w` with no leading zero byte, `0` for
/// `w == 0`. Used for EXP's dynamic gas (50 gas per exponent byte).
pub fn byte_len(w: Word) -> usize {
    32 - (w.leading_zeros() as usize) / 8
}

/// `BYTE(index, w)`: the `index`-th byte of `w`, big-endian, 0 if
/// `index >= 32`.
pub fn byte(index: Word, w: Word) -> Word {
    if index >= Word::from(32) {
        return Word::zero();
    }
    let i = index.as_u32() as usize;
    Word::from(w.byte(31 - i))
}

/// `SIGNEXTEND(b, w)`: treat `w` as a `(b+1)`-byte two's-complement value
/// and sign-extend it to 256 bits. `b >= 31` is a no-op (already full width).
pub fn signextend(b: Word, w: Word) -> Word {
    if b >= Word::from(31) {
        return w;
    }
    let b = b.as_u32();
    let bit_index = b * 8 + 7;
    let sign_set = w.bit(bit_index as usize);
    let mask = (Word::one() << (bit_index + 1)) - Word::one();
    if sign_set {
        w | !mask
    } else {
        w & mask
    }
}

/// `SHL(shift, w)`: shift ≥ 256 yields zero.
pub fn shl(shift: Word, w: Word) -> Word {
    if shift >= Word::from(256) {
        Word::zero()
    } else {
        w << shift.as_u32()
    }
}

/// `SHR(shift, w)`: shift ≥ 256 yields zero.
pub fn shr(shift: Word, w: Word) -> Word {
    if shift >= Word::from(256) {
        Word::zero()
    } else {
        w >> shift.as_u32()
    }
}

/// `SAR(shift, w)`: arithmetic (sign-preserving) right shift. shift ≥ 256
/// yields zero if `w` is non-negative, all-ones otherwise.
pub fn sar(shift: Word, w: Word) -> Word {
    let negative = is_negative(w);
    if shift >= Word::from(256) {
        return if negative { Word::max_value() } else { Word::zero() };
    }
    let shift = shift.as_u32();
    if shift == 0 {
        return w;
    }
    let shifted = w >> shift;
    if !negative {
        return shifted;
    }
    let mask = Word::max_value() << (256 - shift);
    shifted | mask
}

/// 512-bit intermediate value used by `addmod`/`mulmod`, stored as
/// (high, low) 256-bit halves.
#[derive(Clone, Copy)]
struct Wide {
    high: Word,
    low: Word,
}

fn add_512(a: Word, b: Word) -> Wide {
    let (low, carry) = a.overflowing_add(b);
    let high = if carry { Word::one() } else { Word::zero() };
    Wide { high, low }
}

fn mul_512(a: Word, b: Word) -> Wide {
    // Schoolbook multiplication split into 128-bit halves so every partial
    // product fits in 256 bits without overflowing: a = a_hi*2^128 + a_lo,
    // b = b_hi*2^128 + b_lo, a*b = hi_hi*2^256 + cross*2^128 + lo_lo.
    let mask = (Word::one() << 128) - Word::one();
    let a_lo = a & mask;
    let a_hi = a >> 128;
    let b_lo = b & mask;
    let b_hi = b >> 128;

    let lo_lo = a_lo * b_lo;
    let hi_hi = a_hi * b_hi;
    let (cross, cross_carry) = (a_hi * b_lo).overflowing_add(a_lo * b_hi);

    let cross_low = cross << 128;
    let cross_high = cross >> 128;

    let (low, carry1) = lo_lo.overflowing_add(cross_low);
    let carry1 = if carry1 { Word::one() } else { Word::zero() };
    let cross_carry = if cross_carry { Word::one() } else { Word::zero() };
    // Safe: the true 512-bit product's high half is < 2^256 by
    // construction, so this sum never truly overflows a 256-bit word.
    let high = hi_hi
        .overflowing_add(cross_high)
        .0
        .overflowing_add(carry1)
        .0
        .overflowing_add(cross_carry << 128)
        .0;

    Wide { high, low }
}

/// Reduce a 512-bit value modulo a 256-bit modulus via repeated
/// double-and-subtract (schoolbook long division), bit by bit.
fn mod_512(value: Wide, modulus: Word) -> Word {
    let mut remainder = Word::zero();
    for i in (0..256).rev() {
        // remainder = remainder * 2 + next bit of `value.high`
        let carry = remainder.bit(255);
        remainder <<= 1;
        if value.high.bit(i) {
            remainder |= Word::one();
        }
        if carry || remainder >= modulus {
            remainder = remainder.overflowing_sub(modulus).0;
        }
    }
    for i in (0..256).rev() {
        let carry = remainder.bit(255);
        remainder <<= 1;
        if value.low.bit(i) {
            remainder |= Word::one();
        }
        if carry || remainder >= modulus {
            remainder = remainder.overflowing_sub(modulus).0;
        }
    }
    remainder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdiv_by_zero_is_zero() {
        assert_eq!(sdiv(Word::from(10), Word::zero()), Word::zero());
    }

    #[test]
    fn smod_by_zero_is_zero() {
        assert_eq!(smod(Word::from(10), Word::zero()), Word::zero());
    }

    #[test]
    fn addmod_no_intermediate_overflow() {
        let a = Word::max_value();
        let b = Word::max_value();
        let n = Word::from(7);
        // (a + b) mod n computed over the unbounded integers.
        let expected = Word::from(4);
        assert_eq!(addmod(a, b, n), expected);
    }

    #[test]
    fn mulmod_no_intermediate_overflow() {
        let a = Word::max_value();
        let b = Word::max_value();
        let n = Word::from(1000);
        // max_value() == 2^256 - 1, so a*b mod n = ((2^256-1)^2) mod 1000.
        // (2^256 - 1) mod 1000 = 935, 935^2 mod 1000 = 225.
        assert_eq!(mulmod(a, b, n), Word::from(225));
    }

    #[test]
    fn addmod_zero_modulus_is_zero() {
        assert_eq!(addmod(Word::from(3), Word::from(4), Word::zero()), Word::zero());
    }

    #[test]
    fn byte_extraction() {
        let w = Word::from(0x1122u64);
        assert_eq!(byte(Word::from(31), w), Word::from(0x22));
        assert_eq!(byte(Word::from(30), w), Word::from(0x11));
        assert_eq!(byte(Word::from(32), w), Word::zero());
    }

    #[test]
    fn signextend_negative_byte() {
        // 0xff as a single byte sign-extends to all-ones.
        let w = Word::from(0xffu64);
        assert_eq!(signextend(Word::zero(), w), Word::max_value());
    }

    #[test]
    fn signextend_positive_byte() {
        let w = Word::from(0x7fu64);
        assert_eq!(signextend(Word::zero(), w), Word::from(0x7f));
    }

    #[test]
    fn shl_shr_large_shift_is_zero() {
        assert_eq!(shl(Word::from(256), Word::from(1)), Word::zero());
        assert_eq!(shr(Word::from(500), Word::max_value()), Word::zero());
    }

    #[test]
    fn sar_negative_large_shift_is_all_ones() {
        let negative_one = Word::max_value();
        assert_eq!(sar(Word::from(256), negative_one), Word::max_value());
        assert_eq!(sar(Word::from(256), Word::from(1)), Word::zero());
    }

    #[test]
    fn sar_preserves_sign() {
        // -8 >> 1 == -4 (arithmetic shift)
        let neg_eight = negate(Word::from(8));
        let neg_four = negate(Word::from(4));
        assert_eq!(sar(Word::one(), neg_eight), neg_four);
    }

    #[test]
    fn exp_repeated_squaring() {
        assert_eq!(exp(Word::from(2), Word::from(10)), Word::from(1024));
        assert_eq!(exp(Word::from(2), Word::zero()), Word::one());
    }

    #[test]
    fn byte_len_matches_spec() {
        assert_eq!(byte_len(Word::zero()), 0);
        assert_eq!(byte_len(Word::from(0xff)), 1);
        assert_eq!(byte_len(Word::from(0x100)), 2);
    }
}
