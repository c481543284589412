//! IPv4 module

use core::{fmt, net, str};

use crate::base::{self, IpVersion, NetworkAddress};
use crate::error::{self, Error, ErrorCode, Failure};
use crate::parser;
use crate::tables::{self, Class};

pub(crate) const BITS_LEN: u8 = 32;

///IPv4 network
pub type Ipv4Network = base::Network<Ipv4Address>;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
///IPv4 address
pub struct Ipv4Address {
    octets: [u8; 4],
}

impl Ipv4Address {
    ///Number of octets
    pub const SIZE: usize = 4;
    ///Longest possible text representation
    pub const MAX_STRING_LEN: usize = 15;
    ///Address `0.0.0.0`
    pub const UNSPECIFIED: Self = Self::new(0, 0, 0, 0);
    ///Address `255.255.255.255`
    pub const BROADCAST: Self = Self::new(255, 255, 255, 255);

    #[inline(always)]
    ///Creates address from its octets
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self::from_bytes([a, b, c, d])
    }

    #[inline(always)]
    ///Creates address from bytes in network order
    pub const fn from_bytes(octets: [u8; 4]) -> Self {
        Self {
            octets,
        }
    }

    #[inline(always)]
    ///Creates address from its integer value
    pub const fn from_uint(value: u32) -> Self {
        Self::from_bytes(value.to_be_bytes())
    }

    #[inline(always)]
    ///Returns bytes in network order
    pub const fn octets(&self) -> [u8; 4] {
        self.octets
    }

    #[inline(always)]
    ///Returns integer value of the address
    pub const fn to_uint(&self) -> u32 {
        u32::from_be_bytes(self.octets)
    }

    #[inline]
    ///Parses dotted quad text
    pub fn parse(text: &str) -> error::Result<Self> {
        parser::parse_ipv4(text).map(Self::from_bytes).map_err(|failure| Error::parse(failure, text))
    }

    #[inline]
    ///Parses dotted quad text, returning unspecified address together with error code on failure
    pub fn parse_with_code(text: &str) -> (Self, ErrorCode) {
        match parser::parse_ipv4(text) {
            Ok(octets) => (Self::from_bytes(octets), ErrorCode::NoError),
            Err((code, _)) => (Self::default(), code),
        }
    }

    ///Returns name for reverse DNS lookup
    pub fn reverse_pointer(&self) -> String {
        let [a, b, c, d] = self.octets;
        format!("{d}.{c}.{b}.{a}.in-addr.arpa")
    }

    #[inline(always)]
    fn is(&self, class: Class) -> bool {
        let value = self.to_uint();
        tables::ipv4(class, value, value)
    }

    #[inline]
    ///Checks whether address is reserved for multicast
    pub fn is_multicast(&self) -> bool {
        self.is(Class::Multicast)
    }

    #[inline]
    ///Checks whether address is within private ranges
    pub fn is_private(&self) -> bool {
        self.is(Class::Private)
    }

    #[inline]
    ///Checks whether address is globally reachable
    pub fn is_global(&self) -> bool {
        self.is(Class::Global)
    }

    #[inline]
    ///Checks whether address is reserved by IETF
    pub fn is_reserved(&self) -> bool {
        self.is(Class::Reserved)
    }

    #[inline]
    ///Checks whether address is loopback
    pub fn is_loopback(&self) -> bool {
        self.is(Class::Loopback)
    }

    #[inline]
    ///Checks whether address is link-local
    pub fn is_link_local(&self) -> bool {
        self.is(Class::LinkLocal)
    }

    #[inline]
    ///Checks whether address is `0.0.0.0`
    pub fn is_unspecified(&self) -> bool {
        self.is(Class::Unspecified)
    }
}

impl base::sealed::Family for Ipv4Address {
    #[inline(always)]
    fn parse_address(text: &str) -> Result<Self, Failure> {
        parser::parse_ipv4(text).map(Self::from_bytes)
    }

    #[inline(always)]
    fn parse_prefixlen(text: &str) -> Result<u8, Failure> {
        parser::parse_ipv4_netmask(text)
    }

    #[inline(always)]
    fn classify(class: Class, first: &Self, last: &Self) -> bool {
        tables::ipv4(class, first.to_uint(), last.to_uint())
    }
}

impl NetworkAddress for Ipv4Address {
    const BITS_LEN: u8 = BITS_LEN;
    const VERSION: IpVersion = IpVersion::V4;
    const HOSTS_EXCLUDE_BROADCAST: bool = true;
    type Repr = u32;

    #[inline(always)]
    fn to_repr(&self) -> u32 {
        self.to_uint()
    }

    #[inline(always)]
    fn from_repr(value: u32) -> Self {
        Self::from_uint(value)
    }

    #[inline]
    fn netmask(prefixlen: u8) -> Self {
        Self::from_uint(<u32 as base::Repr>::prefix_mask(prefixlen))
    }
}

impl fmt::Display for Ipv4Address {
    #[inline]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets;
        fmt.write_fmt(format_args!("{a}.{b}.{c}.{d}"))
    }
}

impl str::FromStr for Ipv4Address {
    type Err = Error;

    #[inline(always)]
    fn from_str(text: &str) -> error::Result<Self> {
        Self::parse(text)
    }
}

impl From<net::Ipv4Addr> for Ipv4Address {
    #[inline(always)]
    fn from(address: net::Ipv4Addr) -> Self {
        Self::from_bytes(address.octets())
    }
}

impl From<Ipv4Address> for net::Ipv4Addr {
    #[inline(always)]
    fn from(address: Ipv4Address) -> Self {
        net::Ipv4Addr::from(address.octets)
    }
}

impl AsRef<[u8]> for Ipv4Address {
    #[inline(always)]
    fn as_ref(&self) -> &[u8] {
        &self.octets
    }
}

impl From<[u8; 4]> for Ipv4Address {
    #[inline(always)]
    fn from(octets: [u8; 4]) -> Self {
        Self::from_bytes(octets)
    }
}

impl From<u32> for Ipv4Address {
    #[inline(always)]
    fn from(value: u32) -> Self {
        Self::from_uint(value)
    }
}
