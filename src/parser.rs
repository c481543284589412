use crate::error::{ErrorCode, Failure};
use crate::fixed::{FixedString, FixedVec};
use crate::v6::{ScopeId, SCOPE_ID_MAX_LEN};

const IPV4_OCTETS: usize = 4;
const IPV6_PARTS: usize = 8;
//Longest part that still can be embedded IPv4 address
const IPV6_LAST_PART_MAX: usize = 15;

type Part = FixedString<4>;
type Parts = FixedVec<Part, IPV6_PARTS>;

struct Ipv4Parser {
    octets: [u8; IPV4_OCTETS],
    index: usize,
    digits: usize,
    value: u32,
    first_digit: char,
}

impl Ipv4Parser {
    #[inline(always)]
    const fn new() -> Self {
        Self {
            octets: [0; IPV4_OCTETS],
            index: 0,
            digits: 0,
            value: 0,
            first_digit: '\0',
        }
    }

    #[inline]
    fn on_digit(&mut self, ch: char, digit: u32) -> Result<(), Failure> {
        if self.digits > 0 && self.first_digit == '0' {
            return Err((ErrorCode::LeadingZerosAreNotPermitted, self.index));
        }

        if self.digits == 0 {
            self.first_digit = ch;
        }

        self.value = self.value * 10 + digit;
        self.digits += 1;

        if self.digits > 3 {
            return Err((ErrorCode::OctetMore3Characters, self.index));
        }

        Ok(())
    }

    #[inline]
    fn on_octet_end(&mut self) -> Result<(), Failure> {
        if self.digits == 0 {
            return Err((ErrorCode::EmptyOctet, self.index));
        }

        if self.value > u8::MAX as u32 {
            return Err((ErrorCode::OctetExceeded255, self.index));
        }

        self.octets[self.index] = self.value as u8;
        self.index += 1;
        self.digits = 0;
        self.value = 0;
        Ok(())
    }

    fn parse(mut self, text: &str) -> Result<[u8; IPV4_OCTETS], Failure> {
        if text.is_empty() {
            return Err((ErrorCode::EmptyAddress, 0));
        }

        for ch in text.chars() {
            if self.index >= IPV4_OCTETS {
                return Err((ErrorCode::Expected4Octets, self.index));
            }

            match ch {
                '0'..='9' => self.on_digit(ch, ch as u32 - '0' as u32)?,
                '.' => self.on_octet_end()?,
                _ => return Err((ErrorCode::OctetHasInvalidSymbol, self.index)),
            }
        }

        if self.index != IPV4_OCTETS - 1 {
            return Err((ErrorCode::Expected4Octets, self.index));
        }

        self.on_octet_end()?;
        Ok(self.octets)
    }
}

///Parses dotted quad
pub fn parse_ipv4(text: &str) -> Result<[u8; IPV4_OCTETS], Failure> {
    Ipv4Parser::new().parse(text)
}

#[inline]
fn is_decimal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit())
}

#[inline]
fn parse_prefixlen(text: &str, max: u8) -> Result<u8, Failure> {
    let mut prefixlen = 0u32;
    for byte in text.bytes() {
        prefixlen = prefixlen * 10 + (byte - b'0') as u32;
        if prefixlen > max as u32 {
            return Err((ErrorCode::InvalidNetmask, 0));
        }
    }
    Ok(prefixlen as u8)
}

///Computes prefix length of contiguous netmask `value`
#[inline]
pub fn ipv4_prefix_from_mask(value: u32) -> Option<u8> {
    let trailing = value.trailing_zeros();
    let prefixlen = 32 - trailing;
    let leading_ones = value.checked_shr(trailing).unwrap_or(0);
    let expected = match prefixlen {
        0 => 0,
        prefixlen => u32::MAX >> (32 - prefixlen),
    };

    match leading_ones == expected {
        true => Some(prefixlen as u8),
        false => None,
    }
}

///Parses IPv4 netmask as either prefix length, netmask or hostmask
pub fn parse_ipv4_netmask(text: &str) -> Result<u8, Failure> {
    if is_decimal(text) {
        return parse_prefixlen(text, 32);
    }

    let mask = match parse_ipv4(text) {
        Ok(octets) => u32::from_be_bytes(octets),
        Err(_) => return Err((ErrorCode::InvalidNetmask, 0)),
    };

    if let Some(prefixlen) = ipv4_prefix_from_mask(mask) {
        return Ok(prefixlen);
    }

    match ipv4_prefix_from_mask(!mask) {
        Some(prefixlen) => {
            log::trace!("netmask '{text}' accepted as hostmask of /{prefixlen}");
            Ok(prefixlen)
        },
        None => Err((ErrorCode::NetmaskPatternMixesZeroesAndOnes, 0)),
    }
}

///Parses IPv6 netmask, which can be only prefix length
pub fn parse_ipv6_netmask(text: &str) -> Result<u8, Failure> {
    match is_decimal(text) {
        true => parse_prefixlen(text, 128),
        false => Err((ErrorCode::InvalidNetmask, 0)),
    }
}

///Splits network text into address and optional netmask
pub fn split_network(text: &str) -> Result<(&str, Option<&str>), Failure> {
    let mut split = text.splitn(2, '/');
    let address = split.next().unwrap_or_default();
    match split.next() {
        None => Ok((address, None)),
        Some(netmask) if netmask.contains('/') => Err((ErrorCode::OnlyOneSlashPermitted, 0)),
        Some("") => Err((ErrorCode::EmptyNetmask, 0)),
        Some(netmask) => Ok((address, Some(netmask))),
    }
}

///Splits `%scope` suffix
fn split_scope_id(text: &str) -> Result<(&str, ScopeId), Failure> {
    let (address, scope) = match text.split_once('%') {
        Some(parts) => parts,
        None => return Ok((text, ScopeId::new())),
    };

    if scope.is_empty() {
        return Err((ErrorCode::InvalidScopeId, 0));
    }

    parse_scope_id(scope).map(|scope_id| (address, scope_id))
}

///Validates scope id text, which must be printable ASCII without `%` and `/`
pub fn parse_scope_id(scope: &str) -> Result<ScopeId, Failure> {
    let mut scope_id = FixedString::<SCOPE_ID_MAX_LEN>::new();
    for (idx, ch) in scope.chars().enumerate() {
        if idx >= SCOPE_ID_MAX_LEN {
            return Err((ErrorCode::ScopeIdIsTooLong, idx));
        }

        if ch == '%' || ch == '/' || !ch.is_ascii_graphic() || !scope_id.push(ch as u8) {
            return Err((ErrorCode::InvalidScopeId, idx));
        }
    }

    Ok(ScopeId::from_fixed(scope_id))
}

#[derive(Default)]
struct Ipv6Parser {
    parts: Parts,
    has_double_colon: bool,
}

impl Ipv6Parser {
    #[inline]
    fn push_part(&mut self, part: Part) {
        //Capacity is verified before each push
        self.parts.push(part);
    }

    fn split_parts(&mut self, text: &str) -> Result<(), Failure> {
        let mut last_part = FixedString::<IPV6_LAST_PART_MAX>::new();
        let mut prev = '\0';

        for ch in text.chars() {
            if !self.has_double_colon && ch == ':' && prev == ':' {
                self.has_double_colon = true;
            }

            let index = self.parts.len();
            if index >= IPV6_PARTS {
                return match self.has_double_colon {
                    true => Err((ErrorCode::ExpectedAtMost7OtherPartsWithDoubleColon, index)),
                    false => Err((ErrorCode::Most8ColonsPermitted, index)),
                };
            }

            if ch != ':' {
                if !ch.is_ascii() {
                    return Err((ErrorCode::PartHasInvalidSymbol, index));
                }
                if !last_part.push(ch as u8) {
                    return Err((ErrorCode::PartIsMore4Chars, index));
                }
            } else {
                match Part::from_ascii(&last_part) {
                    Some(part) => self.push_part(part),
                    None => return Err((ErrorCode::PartIsMore4Chars, index)),
                }
                last_part.clear();
            }

            prev = ch;
        }

        let index = self.parts.len();
        if index >= IPV6_PARTS {
            let first_empty = self.parts[0].is_empty();
            let second_empty = self.parts[1].is_empty();
            return if first_empty && !second_empty {
                Err((ErrorCode::LeadingColonOnlyPermittedAsPartOfDoubleColon, 0))
            } else if last_part.is_empty() {
                Err((ErrorCode::TrailingColonOnlyPermittedAsPartOfDoubleColon, index))
            } else {
                Err((ErrorCode::Most8ColonsPermitted, index))
            };
        }

        if last_part.contains('.') {
            if index + 1 >= IPV6_PARTS {
                return Err((ErrorCode::Most8ColonsPermitted, index));
            }

            let [a, b, c, d] = parse_ipv4(&last_part)?;
            self.push_part(hextet_text(a, b));
            self.push_part(hextet_text(c, d));
        } else {
            match Part::from_ascii(&last_part) {
                Some(part) => self.push_part(part),
                None => return Err((ErrorCode::PartIsMore4Chars, index)),
            }
        }

        if self.parts.len() < 3 {
            return Err((ErrorCode::Least3Parts, self.parts.len()));
        }

        Ok(())
    }

    //Returns number of parts before and after `::`
    fn parts_bound(&self) -> Result<(usize, usize), Failure> {
        let count = self.parts.len();
        let last = count - 1;

        let mut skip = None;
        for idx in 1..last {
            if self.parts[idx].is_empty() {
                if skip.is_some() {
                    return Err((ErrorCode::MostOneDoubleColonPermitted, idx));
                }
                skip = Some(idx);
            }
        }

        match skip {
            Some(skip) => {
                let mut hi = skip;
                let mut lo = count - skip - 1;

                if self.parts[0].is_empty() {
                    hi -= 1;
                    if hi != 0 {
                        return Err((ErrorCode::LeadingColonOnlyPermittedAsPartOfDoubleColon, 0));
                    }
                }

                if self.parts[last].is_empty() {
                    lo -= 1;
                    if lo != 0 {
                        return Err((ErrorCode::TrailingColonOnlyPermittedAsPartOfDoubleColon, last));
                    }
                }

                Ok((hi, lo))
            },
            None => {
                if count != IPV6_PARTS {
                    return Err((ErrorCode::Exactly8PartsExpectedWithoutDoubleColon, count));
                }

                if self.parts[0].is_empty() {
                    return Err((ErrorCode::LeadingColonOnlyPermittedAsPartOfDoubleColon, 0));
                }

                if self.parts[last].is_empty() {
                    return Err((ErrorCode::TrailingColonOnlyPermittedAsPartOfDoubleColon, last));
                }

                Ok((IPV6_PARTS, 0))
            },
        }
    }

    fn parse_parts(&self, hi: usize, lo: usize) -> Result<[u8; 16], Failure> {
        let mut bytes = [0u8; 16];
        let count = self.parts.len();

        for idx in 0..hi {
            let [upper, lower] = parse_hextet(&self.parts[idx], idx)?.to_be_bytes();
            bytes[idx * 2] = upper;
            bytes[idx * 2 + 1] = lower;
        }

        //Gap in between is zero-filled
        for offset in 0..lo {
            let idx = count - lo + offset;
            let position = IPV6_PARTS - lo + offset;
            let [upper, lower] = parse_hextet(&self.parts[idx], idx)?.to_be_bytes();
            bytes[position * 2] = upper;
            bytes[position * 2 + 1] = lower;
        }

        Ok(bytes)
    }
}

#[inline]
fn hextet_text(upper: u8, lower: u8) -> Part {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut part = Part::new();
    for byte in [upper, lower] {
        part.push(HEX[(byte >> 4) as usize]);
        part.push(HEX[(byte & 0xf) as usize]);
    }
    part
}

#[inline]
fn parse_hextet(part: &Part, index: usize) -> Result<u16, Failure> {
    let mut value = 0u16;
    for byte in part.bytes() {
        let digit = match (byte as char).to_digit(16) {
            Some(digit) => digit as u16,
            None => return Err((ErrorCode::PartHasInvalidSymbol, index)),
        };
        value = (value << 4) | digit;
    }
    Ok(value)
}

///Parses colon-hex IPv6 address with optional scope id
pub fn parse_ipv6(text: &str) -> Result<([u8; 16], ScopeId), Failure> {
    if text.is_empty() {
        return Err((ErrorCode::EmptyAddress, 0));
    }

    let (address, scope_id) = split_scope_id(text)?;

    let mut parser = Ipv6Parser::default();
    parser.split_parts(address)?;
    let (hi, lo) = parser.parts_bound()?;
    let bytes = parser.parse_parts(hi, lo)?;
    Ok((bytes, scope_id))
}
