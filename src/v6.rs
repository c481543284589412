//! IPv6 module

use core::{fmt, net, str};

use crate::base::{self, IpVersion, NetworkAddress};
use crate::error::{self, Error, ErrorCode, Failure};
use crate::fixed::FixedString;
use crate::parser;
use crate::tables::{self, Class};
use crate::uint128::Uint128;
use crate::v4::Ipv4Address;

pub(crate) const BITS_LEN: u8 = 128;
///Maximum number of characters in scope id
pub const SCOPE_ID_MAX_LEN: usize = 16;

///IPv6 network
pub type Ipv6Network = base::Network<Ipv6Address>;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
///Zone index of IPv6 address, written after `%`
pub struct ScopeId(FixedString<SCOPE_ID_MAX_LEN>);

impl ScopeId {
    #[inline(always)]
    ///Creates empty scope id
    pub const fn new() -> Self {
        Self(FixedString::new())
    }

    #[inline(always)]
    pub(crate) const fn from_fixed(text: FixedString<SCOPE_ID_MAX_LEN>) -> Self {
        Self(text)
    }

    #[inline]
    ///Parses scope id, returning error if text is too long or has forbidden characters
    pub fn parse(text: &str) -> error::Result<Self> {
        parser::parse_scope_id(text).map_err(|failure| Error::parse(failure, text))
    }

    #[inline(always)]
    ///Access scope id text
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[inline(always)]
    ///Returns whether scope id is absent
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    ///Returns numeric value of scope id, if it is entirely decimal
    pub fn as_u32(&self) -> Option<u32> {
        self.as_str().parse().ok()
    }
}

impl fmt::Display for ScopeId {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
///Text representation of IPv6 address
pub enum Format {
    ///All 8 groups with leading zeros, e.g. `2001:0db8:0000:0000:0000:0000:0000:0001`
    Full,
    ///All 8 groups without leading zeros, e.g. `2001:db8:0:0:0:0:0:1`
    Compact,
    #[default]
    ///Longest run of zero groups replaced with `::`, e.g. `2001:db8::1`
    Compressed,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
///IPv6 address with optional scope id
///
///Scope id takes part in comparison, but not in numeric value of the address.
pub struct Ipv6Address {
    octets: [u8; 16],
    scope_id: ScopeId,
}

impl Ipv6Address {
    ///Number of octets
    pub const SIZE: usize = 16;
    ///Longest possible text representation, including scope id
    pub const MAX_STRING_LEN: usize = 39 + 1 + SCOPE_ID_MAX_LEN;
    ///Address `::`
    pub const UNSPECIFIED: Self = Self::from_bytes([0; 16]);
    ///Address `::1`
    pub const LOOPBACK: Self = Self::new([0, 0, 0, 0, 0, 0, 0, 1]);

    #[inline]
    ///Creates address from its 16-bit groups
    pub const fn new(segments: [u16; 8]) -> Self {
        let mut octets = [0u8; 16];
        let mut idx = 0;
        while idx < segments.len() {
            let [upper, lower] = segments[idx].to_be_bytes();
            octets[idx * 2] = upper;
            octets[idx * 2 + 1] = lower;
            idx += 1;
        }
        Self::from_bytes(octets)
    }

    #[inline(always)]
    ///Creates address from bytes in network order
    pub const fn from_bytes(octets: [u8; 16]) -> Self {
        Self {
            octets,
            scope_id: ScopeId::new(),
        }
    }

    #[inline]
    ///Creates address from its integer value
    pub const fn from_uint(value: Uint128) -> Self {
        let upper = value.upper().to_be_bytes();
        let lower = value.lower().to_be_bytes();
        let mut octets = [0u8; 16];
        let mut idx = 0;
        while idx < 8 {
            octets[idx] = upper[idx];
            octets[idx + 8] = lower[idx];
            idx += 1;
        }
        Self::from_bytes(octets)
    }

    #[inline(always)]
    ///Returns bytes in network order
    pub const fn octets(&self) -> [u8; 16] {
        self.octets
    }

    #[inline]
    ///Returns 16-bit groups of the address
    pub const fn segments(&self) -> [u16; 8] {
        let mut segments = [0u16; 8];
        let mut idx = 0;
        while idx < segments.len() {
            segments[idx] = u16::from_be_bytes([self.octets[idx * 2], self.octets[idx * 2 + 1]]);
            idx += 1;
        }
        segments
    }

    #[inline]
    ///Returns integer value of the address, ignoring scope id
    pub const fn to_uint(&self) -> Uint128 {
        let mut upper = [0u8; 8];
        let mut lower = [0u8; 8];
        let mut idx = 0;
        while idx < 8 {
            upper[idx] = self.octets[idx];
            lower[idx] = self.octets[idx + 8];
            idx += 1;
        }
        Uint128::new(u64::from_be_bytes(upper), u64::from_be_bytes(lower))
    }

    #[inline]
    ///Parses colon-hex text with optional `%scope` suffix
    pub fn parse(text: &str) -> error::Result<Self> {
        Self::parse_text(text).map_err(|failure| Error::parse(failure, text))
    }

    #[inline]
    ///Parses colon-hex text, returning unspecified address together with error code on failure
    pub fn parse_with_code(text: &str) -> (Self, ErrorCode) {
        match Self::parse_text(text) {
            Ok(address) => (address, ErrorCode::NoError),
            Err((code, _)) => (Self::default(), code),
        }
    }

    #[inline(always)]
    fn parse_text(text: &str) -> Result<Self, Failure> {
        parser::parse_ipv6(text).map(|(octets, scope_id)| Self {
            octets,
            scope_id,
        })
    }

    #[inline]
    ///Returns scope id if it is set
    pub fn scope_id(&self) -> Option<ScopeId> {
        match self.scope_id.is_empty() {
            true => None,
            false => Some(self.scope_id),
        }
    }

    ///Replaces scope id, empty `scope` removes it
    ///
    ///On error scope id is left unchanged.
    pub fn set_scope_id(&mut self, scope: &str) -> error::Result<()> {
        self.scope_id = ScopeId::parse(scope)?;
        Ok(())
    }

    #[inline]
    ///Returns copy of the address with scope id replaced
    pub fn with_scope_id(&self, scope: &str) -> error::Result<Self> {
        let mut address = *self;
        address.set_scope_id(scope)?;
        Ok(address)
    }

    #[inline]
    ///Returns text representation in requested `format`
    pub fn format(&self, format: Format) -> String {
        Formatted {
            address: self,
            format,
        }.to_string()
    }

    ///Returns name for reverse DNS lookup, which never includes scope id
    pub fn reverse_pointer(&self) -> String {
        const HEX: &[u8; 16] = b"0123456789abcdef";

        let mut result = String::with_capacity(72);
        for byte in self.octets.iter().rev() {
            result.push(HEX[(byte & 0xf) as usize] as char);
            result.push('.');
            result.push(HEX[(byte >> 4) as usize] as char);
            result.push('.');
        }
        result.push_str("ip6.arpa");
        result
    }

    #[inline]
    ///Returns embedded IPv4 address if it is IPv4-mapped address `::ffff:0:0/96`
    pub fn ipv4_mapped(&self) -> Option<Ipv4Address> {
        match self.octets {
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, a, b, c, d] => Some(Ipv4Address::new(a, b, c, d)),
            _ => None,
        }
    }

    #[inline]
    ///Returns embedded IPv4 address if it is 6to4 address `2002::/16`
    pub fn sixtofour(&self) -> Option<Ipv4Address> {
        match self.octets {
            [0x20, 0x02, a, b, c, d, ..] => Some(Ipv4Address::new(a, b, c, d)),
            _ => None,
        }
    }

    #[inline]
    ///Returns `(server, client)` pair if it is Teredo address `2001::/32`
    pub fn teredo(&self) -> Option<(Ipv4Address, Ipv4Address)> {
        match self.octets {
            [0x20, 0x01, 0, 0, a, b, c, d, _, _, _, _, e, f, g, h] => {
                Some((Ipv4Address::new(a, b, c, d), Ipv4Address::new(!e, !f, !g, !h)))
            },
            _ => None,
        }
    }

    #[inline(always)]
    fn is(&self, class: Class) -> bool {
        let value = self.to_uint();
        tables::ipv6(class, value, value)
    }

    #[inline]
    ///Checks whether address is reserved for multicast
    pub fn is_multicast(&self) -> bool {
        self.is(Class::Multicast)
    }

    #[inline]
    ///Checks whether address is within private ranges
    ///
    ///IPv4-mapped addresses are checked by their IPv4 counterpart.
    pub fn is_private(&self) -> bool {
        match self.ipv4_mapped() {
            Some(address) => address.is_private(),
            None => self.is(Class::Private),
        }
    }

    #[inline]
    ///Checks whether address is globally reachable
    ///
    ///IPv4-mapped addresses are checked by their IPv4 counterpart.
    pub fn is_global(&self) -> bool {
        match self.ipv4_mapped() {
            Some(address) => address.is_global(),
            None => self.is(Class::Global),
        }
    }

    #[inline]
    ///Checks whether address is reserved by IETF
    pub fn is_reserved(&self) -> bool {
        self.is(Class::Reserved)
    }

    #[inline]
    ///Checks whether address is loopback `::1`
    pub fn is_loopback(&self) -> bool {
        self.is(Class::Loopback)
    }

    #[inline]
    ///Checks whether address is link-local
    pub fn is_link_local(&self) -> bool {
        self.is(Class::LinkLocal)
    }

    #[inline]
    ///Checks whether address is within deprecated site-local range
    pub fn is_site_local(&self) -> bool {
        self.is(Class::SiteLocal)
    }

    #[inline]
    ///Checks whether address is `::`
    pub fn is_unspecified(&self) -> bool {
        self.is(Class::Unspecified)
    }
}

//Finds longest run of zero groups, first one wins on tie
fn longest_zero_run(segments: &[u16; 8]) -> Option<(usize, usize)> {
    let mut best = None;
    let mut best_len = 1;
    let mut start = 0;
    let mut len = 0;

    for (idx, segment) in segments.iter().enumerate() {
        if *segment == 0 {
            if len == 0 {
                start = idx;
            }
            len += 1;
            if len > best_len {
                best_len = len;
                best = Some((start, len));
            }
        } else {
            len = 0;
        }
    }

    best
}

struct Formatted<'a> {
    address: &'a Ipv6Address,
    format: Format,
}

impl Formatted<'_> {
    fn write_groups(&self, fmt: &mut fmt::Formatter<'_>, segments: &[u16]) -> fmt::Result {
        for (idx, segment) in segments.iter().enumerate() {
            if idx > 0 {
                fmt.write_str(":")?;
            }
            match self.format {
                Format::Full => fmt.write_fmt(format_args!("{segment:04x}"))?,
                Format::Compact | Format::Compressed => fmt.write_fmt(format_args!("{segment:x}"))?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments = self.address.segments();

        match (self.format, longest_zero_run(&segments)) {
            (Format::Compressed, Some((start, len))) => {
                self.write_groups(fmt, &segments[..start])?;
                fmt.write_str("::")?;
                self.write_groups(fmt, &segments[start + len..])?;
            },
            _ => self.write_groups(fmt, &segments)?,
        }

        match self.address.scope_id.is_empty() {
            true => Ok(()),
            false => fmt.write_fmt(format_args!("%{}", self.address.scope_id)),
        }
    }
}

impl base::sealed::Family for Ipv6Address {
    #[inline(always)]
    fn parse_address(text: &str) -> Result<Self, Failure> {
        Self::parse_text(text)
    }

    #[inline(always)]
    fn parse_prefixlen(text: &str) -> Result<u8, Failure> {
        parser::parse_ipv6_netmask(text)
    }

    #[inline(always)]
    fn classify(class: Class, first: &Self, last: &Self) -> bool {
        match (class, first.ipv4_mapped(), last.ipv4_mapped()) {
            (Class::Private | Class::Global, Some(first), Some(last)) => tables::ipv4(class, first.to_uint(), last.to_uint()),
            _ => tables::ipv6(class, first.to_uint(), last.to_uint()),
        }
    }
}

impl NetworkAddress for Ipv6Address {
    const BITS_LEN: u8 = BITS_LEN;
    const VERSION: IpVersion = IpVersion::V6;
    const HOSTS_EXCLUDE_BROADCAST: bool = false;
    type Repr = Uint128;

    #[inline(always)]
    fn to_repr(&self) -> Uint128 {
        self.to_uint()
    }

    #[inline(always)]
    fn from_repr(value: Uint128) -> Self {
        Self::from_uint(value)
    }

    fn netmask(prefixlen: u8) -> Self {
        let prefixlen = core::cmp::min(prefixlen, BITS_LEN) as usize;
        let mut octets = [0u8; 16];
        let full = prefixlen / 8;
        for octet in octets.iter_mut().take(full) {
            *octet = 0xff;
        }
        if let Some(octet) = octets.get_mut(full) {
            *octet = !(0xffu8.checked_shr((prefixlen % 8) as u32).unwrap_or(0));
        }
        Self::from_bytes(octets)
    }

    #[inline(always)]
    fn with_repr(&self, value: Uint128) -> Self {
        Self {
            octets: Self::from_uint(value).octets,
            scope_id: self.scope_id,
        }
    }
}

impl Ipv6Network {
    #[inline]
    ///Checks whether network is within deprecated site-local range
    pub fn is_site_local(&self) -> bool {
        tables::ipv6(Class::SiteLocal, self.network_address().to_uint(), self.broadcast_address().to_uint())
    }
}

impl fmt::Display for Ipv6Address {
    #[inline]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Formatted { address: self, format: Format::Compressed }, fmt)
    }
}

impl str::FromStr for Ipv6Address {
    type Err = Error;

    #[inline(always)]
    fn from_str(text: &str) -> error::Result<Self> {
        Self::parse(text)
    }
}

impl From<net::Ipv6Addr> for Ipv6Address {
    #[inline(always)]
    fn from(address: net::Ipv6Addr) -> Self {
        Self::from_bytes(address.octets())
    }
}

impl From<Ipv6Address> for net::Ipv6Addr {
    #[inline(always)]
    fn from(address: Ipv6Address) -> Self {
        net::Ipv6Addr::from(address.octets)
    }
}

impl AsRef<[u8]> for Ipv6Address {
    #[inline(always)]
    fn as_ref(&self) -> &[u8] {
        &self.octets
    }
}

impl From<[u8; 16]> for Ipv6Address {
    #[inline(always)]
    fn from(octets: [u8; 16]) -> Self {
        Self::from_bytes(octets)
    }
}

impl From<[u16; 8]> for Ipv6Address {
    #[inline(always)]
    fn from(segments: [u16; 8]) -> Self {
        Self::new(segments)
    }
}

impl From<Uint128> for Ipv6Address {
    #[inline(always)]
    fn from(value: Uint128) -> Self {
        Self::from_uint(value)
    }
}
