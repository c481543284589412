//! 128-bit unsigned integer
//!
//! All arithmetic wraps. Division and remainder by zero never fault: `x / 0 == 0` and `x % 0 == x`.

use core::{cmp, fmt, ops, str};

use crate::fixed::FixedVec;

#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
///Unsigned 128-bit integer stored as two 64-bit halves
pub struct Uint128 {
    upper: u64,
    lower: u64,
}

impl Uint128 {
    ///Zero value
    pub const ZERO: Self = Self::new(0, 0);
    ///One
    pub const ONE: Self = Self::new(0, 1);
    ///Largest representable value
    pub const MAX: Self = Self::new(u64::MAX, u64::MAX);
    ///Number of bits
    pub const BITS: u32 = 128;

    #[inline(always)]
    ///Creates value from its halves
    pub const fn new(upper: u64, lower: u64) -> Self {
        Self {
            upper,
            lower,
        }
    }

    #[inline]
    ///Creates value from eight big-endian 16-bit groups
    pub const fn from_segments(segments: [u16; 8]) -> Self {
        let mut upper = 0u64;
        let mut lower = 0u64;
        let mut idx = 0;
        while idx < 4 {
            upper = (upper << 16) | segments[idx] as u64;
            lower = (lower << 16) | segments[idx + 4] as u64;
            idx += 1;
        }
        Self::new(upper, lower)
    }

    #[inline(always)]
    ///Upper 64 bits
    pub const fn upper(self) -> u64 {
        self.upper
    }

    #[inline(always)]
    ///Lower 64 bits
    pub const fn lower(self) -> u64 {
        self.lower
    }

    #[inline(always)]
    ///Returns whether value is zero
    pub const fn is_zero(self) -> bool {
        self.upper == 0 && self.lower == 0
    }

    #[inline]
    ///Number of leading zero bits
    pub const fn leading_zeros(self) -> u32 {
        match self.upper {
            0 => 64 + self.lower.leading_zeros(),
            upper => upper.leading_zeros(),
        }
    }

    #[inline]
    ///Number of trailing zero bits
    pub const fn trailing_zeros(self) -> u32 {
        match self.lower {
            0 => 64 + self.upper.trailing_zeros(),
            lower => lower.trailing_zeros(),
        }
    }

    #[inline]
    ///Wrapping addition
    pub const fn wrapping_add(self, other: Self) -> Self {
        let (lower, carry) = self.lower.overflowing_add(other.lower);
        let upper = self.upper.wrapping_add(other.upper).wrapping_add(carry as u64);
        Self::new(upper, lower)
    }

    #[inline]
    ///Wrapping subtraction
    pub const fn wrapping_sub(self, other: Self) -> Self {
        let (lower, borrow) = self.lower.overflowing_sub(other.lower);
        let upper = self.upper.wrapping_sub(other.upper).wrapping_sub(borrow as u64);
        Self::new(upper, lower)
    }

    ///Wrapping multiplication
    pub const fn wrapping_mul(self, other: Self) -> Self {
        let (upper, lower) = big_mul(self.lower, other.lower);
        let upper = upper
            .wrapping_add(self.upper.wrapping_mul(other.lower))
            .wrapping_add(self.lower.wrapping_mul(other.upper));
        Self::new(upper, lower)
    }

    ///Left shift, yielding zero when `shift` is 128 or more
    pub const fn shl(self, shift: u32) -> Self {
        match shift {
            0 => self,
            1..=63 => Self::new((self.upper << shift) | (self.lower >> (64 - shift)), self.lower << shift),
            64..=127 => Self::new(self.lower << (shift - 64), 0),
            _ => Self::ZERO,
        }
    }

    ///Logical right shift, yielding zero when `shift` is 128 or more
    pub const fn shr(self, shift: u32) -> Self {
        match shift {
            0 => self,
            1..=63 => Self::new(self.upper >> shift, (self.lower >> shift) | (self.upper << (64 - shift))),
            64..=127 => Self::new(0, self.upper >> (shift - 64)),
            _ => Self::ZERO,
        }
    }

    ///Returns quotient and remainder of division by `other`
    pub fn div_rem(self, other: Self) -> (Self, Self) {
        let quotient = divide(self, other);
        let remainder = self.wrapping_sub(quotient.wrapping_mul(other));
        (quotient, remainder)
    }

    ///Converts floating point number, rounding toward zero
    ///
    ///Negative numbers and NaN become zero, values of `2^128` and above saturate to `MAX`.
    pub fn from_f64(value: f64) -> Self {
        const TWO_POW_128: f64 = 340282366920938463463374607431768211456.0;

        if value.is_nan() || value < 0.0 {
            Self::ZERO
        } else if value >= TWO_POW_128 {
            Self::MAX
        } else if value >= 1.0 {
            let bits = value.to_bits();
            //Normalized mantissa with the implicit bit placed at bit 127
            let mantissa = Self::new((bits << 12) >> 1 | (1 << 63), 0);
            let exponent = (bits >> 52) as u32;
            mantissa.shr(1023 + 128 - 1 - exponent)
        } else {
            Self::ZERO
        }
    }

    ///Converts to nearest floating point number
    pub fn to_f64(self) -> f64 {
        //2^52, 2^76, 2^104 and 2^128 as exponent bit patterns
        const TWO_POW_52_BITS: u64 = 0x4330000000000000;
        const TWO_POW_76_BITS: u64 = 0x44B0000000000000;
        const TWO_POW_104_BITS: u64 = 0x4670000000000000;
        const TWO_POW_128_BITS: u64 = 0x47F0000000000000;

        if self.upper == 0 {
            return self.lower as f64;
        }

        if self.upper >> 40 == 0 {
            let lower = f64::from_bits(TWO_POW_52_BITS | ((self.lower << 12) >> 12)) - f64::from_bits(TWO_POW_52_BITS);
            let upper = f64::from_bits(TWO_POW_104_BITS | self.shr(52).lower) - f64::from_bits(TWO_POW_104_BITS);
            return lower + upper;
        }

        let lower = f64::from_bits(TWO_POW_76_BITS | (self.shr(12).lower >> 12) | (self.lower & 0xFFFFFF)) - f64::from_bits(TWO_POW_76_BITS);
        let upper = f64::from_bits(TWO_POW_128_BITS | self.shr(76).lower) - f64::from_bits(TWO_POW_128_BITS);
        lower + upper
    }

    ///Parses digits in the given `radix`, which must be 8, 10 or 16
    ///
    ///Returns `None` on empty input, invalid digit, unsupported radix or overflow.
    pub fn from_str_radix(text: &str, radix: u32) -> Option<Self> {
        if !matches!(radix, 8 | 10 | 16) || text.is_empty() {
            return None;
        }

        let base = Self::from(radix);
        let mut result = Self::ZERO;
        for ch in text.chars() {
            let digit = Self::from(ch.to_digit(radix)?);
            let next = result.wrapping_mul(base);
            if next.div_rem(base).0 != result {
                return None;
            }
            let next = next.wrapping_add(digit);
            if next < digit {
                return None;
            }
            result = next;
        }

        Some(result)
    }

    fn write_radix(self, fmt: &mut fmt::Formatter<'_>, radix: u32, upper_case: bool, prefix: &str) -> fmt::Result {
        let mut digits = FixedVec::<u8, 128>::new();
        let base = Self::from(radix);
        let mut value = self;
        loop {
            let (quotient, remainder) = value.div_rem(base);
            let digit = remainder.lower as u32;
            let ch = match char::from_digit(digit, radix) {
                Some(ch) if upper_case => ch.to_ascii_uppercase(),
                Some(ch) => ch,
                None => return Err(fmt::Error),
            };
            if !digits.push(ch as u8) {
                return Err(fmt::Error);
            }
            value = quotient;
            if value.is_zero() {
                break;
            }
        }

        let mut buffer = FixedVec::<u8, 128>::new();
        for digit in digits.iter().rev() {
            buffer.push(*digit);
        }
        let text = str::from_utf8(buffer.as_slice()).map_err(|_| fmt::Error)?;
        fmt.pad_integral(true, prefix, text)
    }
}

impl From<u8> for Uint128 {
    #[inline(always)]
    fn from(value: u8) -> Self {
        Self::new(0, value as u64)
    }
}

impl From<u16> for Uint128 {
    #[inline(always)]
    fn from(value: u16) -> Self {
        Self::new(0, value as u64)
    }
}

impl From<u32> for Uint128 {
    #[inline(always)]
    fn from(value: u32) -> Self {
        Self::new(0, value as u64)
    }
}

impl From<u64> for Uint128 {
    #[inline(always)]
    fn from(value: u64) -> Self {
        Self::new(0, value)
    }
}

impl From<u128> for Uint128 {
    #[inline(always)]
    fn from(value: u128) -> Self {
        Self::new((value >> 64) as u64, value as u64)
    }
}

impl From<Uint128> for u128 {
    #[inline(always)]
    fn from(value: Uint128) -> Self {
        ((value.upper as u128) << 64) | value.lower as u128
    }
}

impl PartialOrd for Uint128 {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uint128 {
    #[inline]
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.upper.cmp(&other.upper).then(self.lower.cmp(&other.lower))
    }
}

macro_rules! impl_binary_op {
    ($($trait:ident::$method:ident => |$lhs:ident, $rhs:ident| $body:expr;)+) => {
        $(
            impl ops::$trait for Uint128 {
                type Output = Self;

                #[inline(always)]
                fn $method(self, other: Self) -> Self {
                    let ($lhs, $rhs) = (self, other);
                    $body
                }
            }
        )+
    };
}

impl_binary_op! {
    Add::add => |lhs, rhs| lhs.wrapping_add(rhs);
    Sub::sub => |lhs, rhs| lhs.wrapping_sub(rhs);
    Mul::mul => |lhs, rhs| lhs.wrapping_mul(rhs);
    Div::div => |lhs, rhs| divide(lhs, rhs);
    Rem::rem => |lhs, rhs| lhs.div_rem(rhs).1;
    BitAnd::bitand => |lhs, rhs| Uint128::new(lhs.upper & rhs.upper, lhs.lower & rhs.lower);
    BitOr::bitor => |lhs, rhs| Uint128::new(lhs.upper | rhs.upper, lhs.lower | rhs.lower);
    BitXor::bitxor => |lhs, rhs| Uint128::new(lhs.upper ^ rhs.upper, lhs.lower ^ rhs.lower);
}

impl ops::AddAssign for Uint128 {
    #[inline(always)]
    fn add_assign(&mut self, other: Self) {
        *self = self.wrapping_add(other);
    }
}

impl ops::SubAssign for Uint128 {
    #[inline(always)]
    fn sub_assign(&mut self, other: Self) {
        *self = self.wrapping_sub(other);
    }
}

impl ops::MulAssign for Uint128 {
    #[inline(always)]
    fn mul_assign(&mut self, other: Self) {
        *self = self.wrapping_mul(other);
    }
}

impl ops::DivAssign for Uint128 {
    #[inline(always)]
    fn div_assign(&mut self, other: Self) {
        *self = divide(*self, other);
    }
}

impl ops::RemAssign for Uint128 {
    #[inline(always)]
    fn rem_assign(&mut self, other: Self) {
        *self = self.div_rem(other).1;
    }
}

impl ops::BitAndAssign for Uint128 {
    #[inline(always)]
    fn bitand_assign(&mut self, other: Self) {
        *self = *self & other;
    }
}

impl ops::BitOrAssign for Uint128 {
    #[inline(always)]
    fn bitor_assign(&mut self, other: Self) {
        *self = *self | other;
    }
}

impl ops::BitXorAssign for Uint128 {
    #[inline(always)]
    fn bitxor_assign(&mut self, other: Self) {
        *self = *self ^ other;
    }
}

impl ops::Not for Uint128 {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        Self::new(!self.upper, !self.lower)
    }
}

impl ops::Neg for Uint128 {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Self::ZERO.wrapping_sub(self)
    }
}

impl ops::Shl<u32> for Uint128 {
    type Output = Self;

    #[inline(always)]
    fn shl(self, shift: u32) -> Self {
        Uint128::shl(self, shift)
    }
}

impl ops::Shr<u32> for Uint128 {
    type Output = Self;

    #[inline(always)]
    fn shr(self, shift: u32) -> Self {
        Uint128::shr(self, shift)
    }
}

impl ops::ShlAssign<u32> for Uint128 {
    #[inline(always)]
    fn shl_assign(&mut self, shift: u32) {
        *self = Uint128::shl(*self, shift);
    }
}

impl ops::ShrAssign<u32> for Uint128 {
    #[inline(always)]
    fn shr_assign(&mut self, shift: u32) {
        *self = Uint128::shr(*self, shift);
    }
}

impl fmt::Debug for Uint128 {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, fmt)
    }
}

impl fmt::Display for Uint128 {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_radix(fmt, 10, false, "")
    }
}

impl fmt::Octal for Uint128 {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_radix(fmt, 8, false, "0o")
    }
}

impl fmt::LowerHex for Uint128 {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_radix(fmt, 16, false, "0x")
    }
}

impl fmt::UpperHex for Uint128 {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_radix(fmt, 16, true, "0x")
    }
}

impl str::FromStr for Uint128 {
    type Err = ();

    #[inline(always)]
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_str_radix(text, 10).ok_or(())
    }
}

#[inline]
const fn big_mul(left: u64, right: u64) -> (u64, u64) {
    let al = left as u32 as u64;
    let ah = left >> 32;
    let bl = right as u32 as u64;
    let bh = right >> 32;

    let mull = al * bl;
    let t = ah * bl + (mull >> 32);
    let tl = al * bh + (t as u32 as u64);

    let lower = (tl << 32) | (mull as u32 as u64);
    let upper = ah * bh + (t >> 32) + (tl >> 32);
    (upper, lower)
}

fn divide(lhs: Uint128, rhs: Uint128) -> Uint128 {
    if rhs.upper == 0 {
        if rhs.lower == 0 {
            return Uint128::ZERO;
        }

        if lhs.upper == 0 {
            return Uint128::new(0, lhs.lower / rhs.lower);
        }
    }

    if rhs >= lhs {
        return match rhs == lhs {
            true => Uint128::ONE,
            false => Uint128::ZERO,
        };
    }

    divide_slow(lhs, rhs)
}

#[inline(always)]
const fn to_digits(value: Uint128) -> [u32; 4] {
    [value.lower as u32, (value.lower >> 32) as u32, value.upper as u32, (value.upper >> 32) as u32]
}

//Long division over base 2^32 digits, `divisor` must be non-zero and less than `dividend`
fn divide_slow(dividend: Uint128, divisor: Uint128) -> Uint128 {
    let mut left = to_digits(dividend);
    let left_size = 4 - (dividend.leading_zeros() / 32) as usize;

    let right = to_digits(divisor);
    let right_size = 4 - (divisor.leading_zeros() / 32) as usize;

    let mut bits = [0u32; 4];
    let bits_size = left_size - right_size + 1;

    //Normalize the two leading divisor digits so the highest bit is set
    let mut div_hi = right[right_size - 1];
    let mut div_lo = if right_size > 1 { right[right_size - 2] } else { 0 };

    let shift = div_hi.leading_zeros();
    let back_shift = 32 - shift;

    if shift > 0 {
        let div_nx = if right_size > 2 { right[right_size - 3] } else { 0 };
        div_hi = (div_hi << shift) | (div_lo >> back_shift);
        div_lo = (div_lo << shift) | (div_nx >> back_shift);
    }

    for i in (right_size..=left_size).rev() {
        let n = i - right_size;
        let t = if i < left_size { left[i] } else { 0 };

        let mut val_hi = ((t as u64) << 32) | left[i - 1] as u64;
        let mut val_lo = if i > 1 { left[i - 2] } else { 0 };

        if shift > 0 {
            let val_nx = if i > 2 { left[i - 3] } else { 0 };
            val_hi = (val_hi << shift) | (val_lo >> back_shift) as u64;
            val_lo = (val_lo << shift) | (val_nx >> back_shift);
        }

        let mut digit = cmp::min(val_hi / div_hi as u64, u32::MAX as u64);

        while divide_guess_too_big(digit, val_hi, val_lo, div_hi, div_lo) {
            digit -= 1;
        }

        if digit > 0 {
            let carry = subtract_divisor(&mut left[n..left_size], &right[..right_size], digit);
            if carry != t {
                add_divisor(&mut left[n..left_size], &right[..right_size]);
                digit -= 1;
            }
        }

        if n < bits_size {
            bits[n] = digit as u32;
        }

        if i < left_size {
            left[i] = 0;
        }
    }

    Uint128::new(
        ((bits[3] as u64) << 32) | bits[2] as u64,
        ((bits[1] as u64) << 32) | bits[0] as u64,
    )
}

#[inline]
fn add_divisor(left: &mut [u32], right: &[u32]) -> u32 {
    let mut carry = 0u64;

    for (left, right) in left.iter_mut().zip(right) {
        let digit = *left as u64 + carry + *right as u64;
        *left = digit as u32;
        carry = digit >> 32;
    }

    carry as u32
}

#[inline]
fn subtract_divisor(left: &mut [u32], right: &[u32], quotient: u64) -> u32 {
    let mut carry = 0u64;

    for (left, right) in left.iter_mut().zip(right) {
        carry += *right as u64 * quotient;
        let digit = carry as u32;
        carry >>= 32;
        if *left < digit {
            carry += 1;
        }
        *left = left.wrapping_sub(digit);
    }

    carry as u32
}

#[inline]
fn divide_guess_too_big(quotient: u64, val_hi: u64, val_lo: u32, div_hi: u32, div_lo: u32) -> bool {
    let mut chk_hi = div_hi as u64 * quotient;
    let mut chk_lo = div_lo as u64 * quotient;

    chk_hi += chk_lo >> 32;
    chk_lo &= u32::MAX as u64;

    chk_hi > val_hi || (chk_hi == val_hi && chk_lo > val_lo as u64)
}
