//! IPv4 and IPv6 addresses and networks
//!
//! Strict text parsing with stable error codes, network algebra and lazy iteration over
//! address ranges of any size, including whole IPv6 space.
//!
//! ## Usage
//!
//! ```
//! use ip_address::{IpAddress, IpNetwork, Ipv4Network};
//!
//! let network = Ipv4Network::parse("192.168.1.0/24").unwrap();
//! assert_eq!(network.supernet(2, None).unwrap().to_string(), "192.168.0.0/22");
//! assert_eq!(network.hosts().count(), 254);
//!
//! let network = IpNetwork::parse("1.2.3.0/24").unwrap();
//! assert!(network.overlaps(&IpNetwork::parse("1.2.3.0/30").unwrap()));
//!
//! let address = IpAddress::parse("127.0.0.1").unwrap();
//! assert_eq!(address.reverse_pointer(), "1.0.0.127.in-addr.arpa");
//! ```

#![warn(missing_docs)]
#![allow(clippy::style)]

mod parser;
mod tables;
pub mod base;
pub mod error;
pub mod fixed;
pub mod ip;
pub mod iter;
pub mod uint128;
pub mod v4;
pub mod v6;

pub use base::{IpVersion, Network, NetworkAddress};
pub use error::{Error, ErrorCode};
pub use ip::IpAddress;
pub use iter::{IpAddressRange, IpExclude, IpSubnets, IpSummarize};
pub use uint128::Uint128;
pub use v4::{Ipv4Address, Ipv4Network};
pub use v6::{Format, Ipv6Address, Ipv6Network, ScopeId};

use core::{fmt, str};

use iter::{AnyIter, Exclude, Summarize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
///Either IPv4 or IPv6 network
///
///Predicates over operands of different versions return `false`.
pub enum IpNetwork {
    ///IPv4 block
    V4(Ipv4Network),
    ///IPv6 block
    V6(Ipv6Network),
}

impl IpNetwork {
    ///Number of bits within ipv4 address
    pub const IPV4_BITS: u8 = v4::BITS_LEN;
    ///Number of bits within ipv6 address
    pub const IPV6_BITS: u8 = v6::BITS_LEN;

    fn parse_impl(text: &str, strict: bool) -> error::Result<Self> {
        let (network, code) = Ipv4Network::parse_with_code(text, strict);
        if code.is_ok() {
            return Ok(Self::V4(network));
        }

        match strict {
            true => Ipv6Network::parse(text).map(Self::V6),
            false => Ipv6Network::parse_non_strict(text).map(Self::V6),
        }
    }

    #[inline]
    ///Parses network from `address/prefix` text, trying IPv4 first and rejecting host bits set
    ///
    ///When text is neither, returns error of IPv6 parser, even for IPv4-shaped text.
    ///E.g. `1.2.3.0/33` reports `Least3Parts` rather than IPv4 `InvalidNetmask`.
    pub fn parse(text: &str) -> error::Result<Self> {
        Self::parse_impl(text, true)
    }

    #[inline]
    ///Parses network from `address/prefix` text, masking off host bits if set
    pub fn parse_non_strict(text: &str) -> error::Result<Self> {
        Self::parse_impl(text, false)
    }

    #[inline]
    ///Parses network, returning default IPv4 network together with error code on failure
    pub fn parse_with_code(text: &str, strict: bool) -> (Self, ErrorCode) {
        error::with_code(Self::parse_impl(text, strict))
    }

    #[inline]
    ///Creates network from `address` and `prefixlen`
    pub fn from_address(address: IpAddress, prefixlen: u8, strict: bool) -> error::Result<Self> {
        match address {
            IpAddress::V4(address) => Ipv4Network::from_address(address, prefixlen, strict).map(Self::V4),
            IpAddress::V6(address) => Ipv6Network::from_address(address, prefixlen, strict).map(Self::V6),
        }
    }

    #[inline]
    ///Creates network, returning default IPv4 network together with error code on failure
    pub fn from_address_with_code(address: IpAddress, prefixlen: u8, strict: bool) -> (Self, ErrorCode) {
        error::with_code(Self::from_address(address, prefixlen, strict))
    }

    #[inline(always)]
    ///Returns IP version
    pub const fn version(&self) -> IpVersion {
        match self {
            Self::V4(_) => IpVersion::V4,
            Self::V6(_) => IpVersion::V6,
        }
    }

    #[inline]
    ///Returns IPv4 network, if it is one
    pub const fn v4(&self) -> Option<&Ipv4Network> {
        match self {
            Self::V4(network) => Some(network),
            Self::V6(_) => None,
        }
    }

    #[inline]
    ///Returns IPv6 network, if it is one
    pub const fn v6(&self) -> Option<&Ipv6Network> {
        match self {
            Self::V4(_) => None,
            Self::V6(network) => Some(network),
        }
    }

    #[inline]
    ///Returns lowest address of the network
    pub fn network_address(&self) -> IpAddress {
        match self {
            Self::V4(network) => IpAddress::V4(network.network_address()),
            Self::V6(network) => IpAddress::V6(network.network_address()),
        }
    }

    #[inline]
    ///Returns highest address of the network
    pub fn broadcast_address(&self) -> IpAddress {
        match self {
            Self::V4(network) => IpAddress::V4(network.broadcast_address()),
            Self::V6(network) => IpAddress::V6(network.broadcast_address()),
        }
    }

    #[inline]
    ///Returns netmask
    pub fn netmask(&self) -> IpAddress {
        match self {
            Self::V4(network) => IpAddress::V4(network.netmask()),
            Self::V6(network) => IpAddress::V6(network.netmask()),
        }
    }

    #[inline]
    ///Returns hostmask
    pub fn hostmask(&self) -> IpAddress {
        match self {
            Self::V4(network) => IpAddress::V4(network.hostmask()),
            Self::V6(network) => IpAddress::V6(network.hostmask()),
        }
    }

    #[inline]
    ///Returns prefix length
    pub fn prefixlen(&self) -> u8 {
        match self {
            Self::V4(network) => network.prefixlen(),
            Self::V6(network) => network.prefixlen(),
        }
    }

    #[inline]
    ///Returns number of addresses within the network, which wraps to zero for whole IPv6 space
    pub fn addresses_count(&self) -> Uint128 {
        match self {
            Self::V4(network) => network.addresses_count(),
            Self::V6(network) => network.addresses_count(),
        }
    }

    #[inline]
    ///Returns network with scope removed from its address
    pub fn without_scope(&self) -> Self {
        match self {
            Self::V4(network) => Self::V4(*network),
            Self::V6(network) => Self::V6(network.without_scope()),
        }
    }

    #[inline]
    ///Checks if a given `address` is contained within `self`, always `false` on version mismatch
    pub fn contains(&self, address: &IpAddress) -> bool {
        match (self, address) {
            (Self::V4(network), IpAddress::V4(address)) => network.contains(address),
            (Self::V6(network), IpAddress::V6(address)) => network.contains(address),
            _ => false,
        }
    }

    #[inline]
    ///Checks whether `self` and `other` have at least one common address
    pub fn overlaps(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::V4(network), Self::V4(other)) => network.overlaps(other),
            (Self::V6(network), Self::V6(other)) => network.overlaps(other),
            _ => false,
        }
    }

    #[inline]
    ///Checks whether `self` lies entirely within `other`
    pub fn subnet_of(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::V4(network), Self::V4(other)) => network.subnet_of(other),
            (Self::V6(network), Self::V6(other)) => network.subnet_of(other),
            _ => false,
        }
    }

    #[inline]
    ///Checks whether `other` lies entirely within `self`
    pub fn supernet_of(&self, other: &Self) -> bool {
        other.subnet_of(self)
    }

    #[inline]
    ///Returns network containing `self` with prefix shorter by `prefixlen_diff`, or with `new_prefixlen`
    pub fn supernet(&self, prefixlen_diff: u8, new_prefixlen: Option<u8>) -> error::Result<Self> {
        match self {
            Self::V4(network) => network.supernet(prefixlen_diff, new_prefixlen).map(Self::V4),
            Self::V6(network) => network.supernet(prefixlen_diff, new_prefixlen).map(Self::V6),
        }
    }

    #[inline]
    ///Computes supernet, returning default IPv4 network together with error code on failure
    pub fn supernet_with_code(&self, prefixlen_diff: u8, new_prefixlen: Option<u8>) -> (Self, ErrorCode) {
        error::with_code(self.supernet(prefixlen_diff, new_prefixlen))
    }

    #[inline]
    ///Returns lazy sequence of subnets with prefix longer by `prefixlen_diff`, or with `new_prefixlen`
    pub fn subnets(&self, prefixlen_diff: u8, new_prefixlen: Option<u8>) -> error::Result<IpSubnets> {
        match self {
            Self::V4(network) => network.subnets(prefixlen_diff, new_prefixlen).map(AnyIter::V4),
            Self::V6(network) => network.subnets(prefixlen_diff, new_prefixlen).map(AnyIter::V6),
        }
    }

    #[inline]
    ///Computes subnets, returning empty sequence together with error code on failure
    pub fn subnets_with_code(&self, prefixlen_diff: u8, new_prefixlen: Option<u8>) -> (IpSubnets, ErrorCode) {
        match self {
            Self::V4(network) => {
                let (subnets, code) = network.subnets_with_code(prefixlen_diff, new_prefixlen);
                (AnyIter::V4(subnets), code)
            },
            Self::V6(network) => {
                let (subnets, code) = network.subnets_with_code(prefixlen_diff, new_prefixlen);
                (AnyIter::V6(subnets), code)
            },
        }
    }

    ///Returns lazy sequence of largest networks covering `self` except `other`
    ///
    ///Fails when versions differ or `other` is not a subnet of `self`.
    pub fn address_exclude(&self, other: &Self) -> error::Result<IpExclude> {
        match (self, other) {
            (Self::V4(network), Self::V4(other)) => network.address_exclude(other).map(AnyIter::V4),
            (Self::V6(network), Self::V6(other)) => network.address_exclude(other).map(AnyIter::V6),
            _ => {
                log::debug!("cannot exclude {other} from {self}: versions differ");
                Err(Error::logic(ErrorCode::InvalidVersion))
            },
        }
    }

    #[inline]
    ///Computes address exclusion, returning empty sequence together with error code on failure
    pub fn address_exclude_with_code(&self, other: &Self) -> (IpExclude, ErrorCode) {
        match self.address_exclude(other) {
            Ok(exclude) => (exclude, ErrorCode::NoError),
            Err(error) => (AnyIter::V4(Exclude::empty()), error.code()),
        }
    }

    #[inline]
    ///Returns lazy sequence of usable hosts
    pub fn hosts(&self) -> IpAddressRange {
        match self {
            Self::V4(network) => AnyIter::V4(network.hosts()),
            Self::V6(network) => AnyIter::V6(network.hosts()),
        }
    }

    #[inline]
    ///Returns lazy sequence of all addresses within the network
    pub fn addresses(&self) -> IpAddressRange {
        match self {
            Self::V4(network) => AnyIter::V4(network.addresses()),
            Self::V6(network) => AnyIter::V6(network.addresses()),
        }
    }

    #[inline]
    ///Checks whether network is reserved for multicast
    pub fn is_multicast(&self) -> bool {
        match self {
            Self::V4(network) => network.is_multicast(),
            Self::V6(network) => network.is_multicast(),
        }
    }

    #[inline]
    ///Checks whether network is within private ranges
    pub fn is_private(&self) -> bool {
        match self {
            Self::V4(network) => network.is_private(),
            Self::V6(network) => network.is_private(),
        }
    }

    #[inline]
    ///Checks whether network is globally reachable
    pub fn is_global(&self) -> bool {
        match self {
            Self::V4(network) => network.is_global(),
            Self::V6(network) => network.is_global(),
        }
    }

    #[inline]
    ///Checks whether network is reserved by IETF
    pub fn is_reserved(&self) -> bool {
        match self {
            Self::V4(network) => network.is_reserved(),
            Self::V6(network) => network.is_reserved(),
        }
    }

    #[inline]
    ///Checks whether network is loopback
    pub fn is_loopback(&self) -> bool {
        match self {
            Self::V4(network) => network.is_loopback(),
            Self::V6(network) => network.is_loopback(),
        }
    }

    #[inline]
    ///Checks whether network is link-local
    pub fn is_link_local(&self) -> bool {
        match self {
            Self::V4(network) => network.is_link_local(),
            Self::V6(network) => network.is_link_local(),
        }
    }

    #[inline]
    ///Checks whether network is IPv6 site-local, always `false` for IPv4
    pub fn is_site_local(&self) -> bool {
        match self {
            Self::V4(_) => false,
            Self::V6(network) => network.is_site_local(),
        }
    }

    #[inline]
    ///Checks whether network consists only of unspecified address
    pub fn is_unspecified(&self) -> bool {
        match self {
            Self::V4(network) => network.is_unspecified(),
            Self::V6(network) => network.is_unspecified(),
        }
    }
}

impl Default for IpNetwork {
    #[inline(always)]
    fn default() -> Self {
        Self::V4(Ipv4Network::default())
    }
}

impl fmt::Display for IpNetwork {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4(network) => fmt::Display::fmt(network, fmt),
            Self::V6(network) => fmt::Display::fmt(network, fmt),
        }
    }
}

impl str::FromStr for IpNetwork {
    type Err = Error;

    #[inline(always)]
    fn from_str(text: &str) -> error::Result<Self> {
        Self::parse(text)
    }
}

impl From<Ipv4Network> for IpNetwork {
    #[inline(always)]
    fn from(network: Ipv4Network) -> Self {
        Self::V4(network)
    }
}

impl From<Ipv6Network> for IpNetwork {
    #[inline(always)]
    fn from(network: Ipv6Network) -> Self {
        Self::V6(network)
    }
}

///Returns lazy sequence of the fewest networks covering addresses from `first` to `last` inclusive
///
///Fails when versions differ or `first` is greater than `last`.
pub fn summarize_address_range(first: &IpAddress, last: &IpAddress) -> error::Result<IpSummarize> {
    match (first, last) {
        (IpAddress::V4(first), IpAddress::V4(last)) => Summarize::new(first, last).map(AnyIter::V4),
        (IpAddress::V6(first), IpAddress::V6(last)) => Summarize::new(first, last).map(AnyIter::V6),
        _ => {
            log::debug!("cannot summarize range from {first} to {last}: versions differ");
            Err(Error::logic(ErrorCode::InvalidVersion))
        },
    }
}
