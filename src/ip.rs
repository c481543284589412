//! Version-agnostic IP address

use core::{fmt, net, str};

use crate::base::IpVersion;
use crate::error::{self, ErrorCode};
use crate::uint128::Uint128;
use crate::v4::Ipv4Address;
use crate::v6::{Format, Ipv6Address, ScopeId};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
///Either IPv4 or IPv6 address
///
///IPv4 addresses order before IPv6 ones.
pub enum IpAddress {
    ///IPv4 address
    V4(Ipv4Address),
    ///IPv6 address
    V6(Ipv6Address),
}

impl IpAddress {
    ///Parses address text, trying IPv4 first
    ///
    ///When text is neither, returns error of IPv6 parser, even for IPv4-shaped text.
    ///E.g. `1.2.3.256` reports `OctetExceeded255` from embedded IPv4 part, while `127` reports `Least3Parts`.
    pub fn parse(text: &str) -> error::Result<Self> {
        match Ipv4Address::parse_with_code(text) {
            (address, ErrorCode::NoError) => Ok(Self::V4(address)),
            _ => Ipv6Address::parse(text).map(Self::V6),
        }
    }

    #[inline]
    ///Parses address text, returning unspecified IPv4 address together with error code on failure
    pub fn parse_with_code(text: &str) -> (Self, ErrorCode) {
        error::with_code(Self::parse(text))
    }

    #[inline(always)]
    ///Returns IP version
    pub const fn version(&self) -> IpVersion {
        match self {
            Self::V4(_) => IpVersion::V4,
            Self::V6(_) => IpVersion::V6,
        }
    }

    #[inline(always)]
    ///Returns whether it is IPv4 address
    pub const fn is_v4(&self) -> bool {
        matches!(self, Self::V4(_))
    }

    #[inline(always)]
    ///Returns whether it is IPv6 address
    pub const fn is_v6(&self) -> bool {
        matches!(self, Self::V6(_))
    }

    #[inline]
    ///Returns IPv4 address, if it is one
    pub const fn v4(&self) -> Option<&Ipv4Address> {
        match self {
            Self::V4(address) => Some(address),
            Self::V6(_) => None,
        }
    }

    #[inline]
    ///Returns IPv6 address, if it is one
    pub const fn v6(&self) -> Option<&Ipv6Address> {
        match self {
            Self::V4(_) => None,
            Self::V6(address) => Some(address),
        }
    }

    #[inline]
    ///Returns bytes in network order, 4 or 16 of them depending on version
    pub fn octets(&self) -> &[u8] {
        match self {
            Self::V4(address) => address.as_ref(),
            Self::V6(address) => address.as_ref(),
        }
    }

    #[inline]
    ///Returns integer value of the address, widened to 128 bits for IPv4
    pub const fn to_uint(&self) -> Uint128 {
        match self {
            Self::V4(address) => Uint128::new(0, address.to_uint() as u64),
            Self::V6(address) => address.to_uint(),
        }
    }

    #[inline]
    ///Returns text representation, `format` applies only to IPv6
    pub fn format(&self, format: Format) -> String {
        match self {
            Self::V4(address) => address.to_string(),
            Self::V6(address) => address.format(format),
        }
    }

    #[inline]
    ///Returns name for reverse DNS lookup
    pub fn reverse_pointer(&self) -> String {
        match self {
            Self::V4(address) => address.reverse_pointer(),
            Self::V6(address) => address.reverse_pointer(),
        }
    }

    #[inline]
    ///Returns scope id of IPv6 address if it is set
    pub fn scope_id(&self) -> Option<ScopeId> {
        match self {
            Self::V4(_) => None,
            Self::V6(address) => address.scope_id(),
        }
    }

    #[inline]
    ///Returns embedded IPv4 address of IPv4-mapped IPv6 address
    pub fn ipv4_mapped(&self) -> Option<Ipv4Address> {
        match self {
            Self::V4(_) => None,
            Self::V6(address) => address.ipv4_mapped(),
        }
    }

    #[inline]
    ///Returns embedded IPv4 address of 6to4 IPv6 address
    pub fn sixtofour(&self) -> Option<Ipv4Address> {
        match self {
            Self::V4(_) => None,
            Self::V6(address) => address.sixtofour(),
        }
    }

    #[inline]
    ///Returns `(server, client)` pair of Teredo IPv6 address
    pub fn teredo(&self) -> Option<(Ipv4Address, Ipv4Address)> {
        match self {
            Self::V4(_) => None,
            Self::V6(address) => address.teredo(),
        }
    }

    #[inline]
    ///Checks whether address is reserved for multicast
    pub fn is_multicast(&self) -> bool {
        match self {
            Self::V4(address) => address.is_multicast(),
            Self::V6(address) => address.is_multicast(),
        }
    }

    #[inline]
    ///Checks whether address is within private ranges
    pub fn is_private(&self) -> bool {
        match self {
            Self::V4(address) => address.is_private(),
            Self::V6(address) => address.is_private(),
        }
    }

    #[inline]
    ///Checks whether address is globally reachable
    pub fn is_global(&self) -> bool {
        match self {
            Self::V4(address) => address.is_global(),
            Self::V6(address) => address.is_global(),
        }
    }

    #[inline]
    ///Checks whether address is reserved by IETF
    pub fn is_reserved(&self) -> bool {
        match self {
            Self::V4(address) => address.is_reserved(),
            Self::V6(address) => address.is_reserved(),
        }
    }

    #[inline]
    ///Checks whether address is loopback
    pub fn is_loopback(&self) -> bool {
        match self {
            Self::V4(address) => address.is_loopback(),
            Self::V6(address) => address.is_loopback(),
        }
    }

    #[inline]
    ///Checks whether address is link-local
    pub fn is_link_local(&self) -> bool {
        match self {
            Self::V4(address) => address.is_link_local(),
            Self::V6(address) => address.is_link_local(),
        }
    }

    #[inline]
    ///Checks whether address is IPv6 site-local, always `false` for IPv4
    pub fn is_site_local(&self) -> bool {
        match self {
            Self::V4(_) => false,
            Self::V6(address) => address.is_site_local(),
        }
    }

    #[inline]
    ///Checks whether address is unspecified
    pub fn is_unspecified(&self) -> bool {
        match self {
            Self::V4(address) => address.is_unspecified(),
            Self::V6(address) => address.is_unspecified(),
        }
    }
}

impl Default for IpAddress {
    #[inline(always)]
    fn default() -> Self {
        Self::V4(Ipv4Address::default())
    }
}

impl fmt::Display for IpAddress {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4(address) => fmt::Display::fmt(address, fmt),
            Self::V6(address) => fmt::Display::fmt(address, fmt),
        }
    }
}

impl str::FromStr for IpAddress {
    type Err = error::Error;

    #[inline(always)]
    fn from_str(text: &str) -> error::Result<Self> {
        Self::parse(text)
    }
}

impl From<Ipv4Address> for IpAddress {
    #[inline(always)]
    fn from(address: Ipv4Address) -> Self {
        Self::V4(address)
    }
}

impl From<Ipv6Address> for IpAddress {
    #[inline(always)]
    fn from(address: Ipv6Address) -> Self {
        Self::V6(address)
    }
}

impl From<net::IpAddr> for IpAddress {
    #[inline(always)]
    fn from(address: net::IpAddr) -> Self {
        match address {
            net::IpAddr::V4(address) => Self::V4(address.into()),
            net::IpAddr::V6(address) => Self::V6(address.into()),
        }
    }
}

impl From<IpAddress> for net::IpAddr {
    #[inline(always)]
    fn from(address: IpAddress) -> Self {
        match address {
            IpAddress::V4(address) => net::IpAddr::V4(address.into()),
            IpAddress::V6(address) => net::IpAddr::V6(address.into()),
        }
    }
}
