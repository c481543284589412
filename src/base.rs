//! Base module
//!
//! Shared address interface and network algebra generic over address family.

use core::{cmp, fmt, hash, ops, str};

use crate::error::{self, Error, ErrorCode, Failure};
use crate::iter::{AddressRange, Exclude, Subnets};
use crate::parser;
use crate::tables::Class;
use crate::uint128::Uint128;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
///IP protocol version
pub enum IpVersion {
    ///IPv4
    V4 = 4,
    ///IPv6
    V6 = 6,
}

impl fmt::Display for IpVersion {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => fmt.write_str("IPv4"),
            Self::V6 => fmt.write_str("IPv6"),
        }
    }
}

///Integer representation of address
pub trait Repr: Copy + Eq + Ord + hash::Hash + fmt::Debug
    + ops::BitAnd<Output = Self> + ops::BitOr<Output = Self> + ops::BitXor<Output = Self> + ops::Not<Output = Self>
{
    ///Number of bits
    const BITS: u8;
    ///Zero
    const ZERO: Self;
    ///One
    const ONE: Self;
    ///All bits set
    const MAX: Self;

    ///Wrapping addition
    fn wrapping_add(self, other: Self) -> Self;
    ///Wrapping subtraction
    fn wrapping_sub(self, other: Self) -> Self;
    ///Left shift, zero if `shift` is not less than number of bits
    fn shl_bits(self, shift: u32) -> Self;
    ///Right shift, zero if `shift` is not less than number of bits
    fn shr_bits(self, shift: u32) -> Self;
    ///Number of trailing zero bits
    fn trailing_zeros(self) -> u32;
    ///Number of leading zero bits
    fn leading_zeros(self) -> u32;
    ///Widens to 128 bits
    fn widen(self) -> Uint128;
    ///Takes lowest bits of `value`
    fn truncate(value: Uint128) -> Self;

    #[inline]
    ///Computes network mask for provided `prefixlen`, assuming it is valid prefix
    fn prefix_mask(prefixlen: u8) -> Self {
        match prefixlen {
            0 => Self::ZERO,
            prefixlen => Self::MAX.shl_bits(Self::BITS.saturating_sub(prefixlen) as u32),
        }
    }

    #[inline(always)]
    ///Computes `2^power`, which is zero when `power` equals number of bits
    fn pow2(power: u8) -> Self {
        Self::ONE.shl_bits(power as u32)
    }
}

impl Repr for u32 {
    const BITS: u8 = 32;
    const ZERO: Self = 0;
    const ONE: Self = 1;
    const MAX: Self = u32::MAX;

    #[inline(always)]
    fn wrapping_add(self, other: Self) -> Self {
        u32::wrapping_add(self, other)
    }

    #[inline(always)]
    fn wrapping_sub(self, other: Self) -> Self {
        u32::wrapping_sub(self, other)
    }

    #[inline(always)]
    fn shl_bits(self, shift: u32) -> Self {
        self.checked_shl(shift).unwrap_or(0)
    }

    #[inline(always)]
    fn shr_bits(self, shift: u32) -> Self {
        self.checked_shr(shift).unwrap_or(0)
    }

    #[inline(always)]
    fn trailing_zeros(self) -> u32 {
        u32::trailing_zeros(self)
    }

    #[inline(always)]
    fn leading_zeros(self) -> u32 {
        u32::leading_zeros(self)
    }

    #[inline(always)]
    fn widen(self) -> Uint128 {
        Uint128::from(self)
    }

    #[inline(always)]
    fn truncate(value: Uint128) -> Self {
        value.lower() as u32
    }
}

impl Repr for Uint128 {
    const BITS: u8 = 128;
    const ZERO: Self = Uint128::ZERO;
    const ONE: Self = Uint128::ONE;
    const MAX: Self = Uint128::MAX;

    #[inline(always)]
    fn wrapping_add(self, other: Self) -> Self {
        Uint128::wrapping_add(self, other)
    }

    #[inline(always)]
    fn wrapping_sub(self, other: Self) -> Self {
        Uint128::wrapping_sub(self, other)
    }

    #[inline(always)]
    fn shl_bits(self, shift: u32) -> Self {
        Uint128::shl(self, shift)
    }

    #[inline(always)]
    fn shr_bits(self, shift: u32) -> Self {
        Uint128::shr(self, shift)
    }

    #[inline(always)]
    fn trailing_zeros(self) -> u32 {
        Uint128::trailing_zeros(self)
    }

    #[inline(always)]
    fn leading_zeros(self) -> u32 {
        Uint128::leading_zeros(self)
    }

    #[inline(always)]
    fn widen(self) -> Uint128 {
        self
    }

    #[inline(always)]
    fn truncate(value: Uint128) -> Self {
        value
    }
}

pub(crate) mod sealed {
    use crate::error::Failure;
    use crate::tables::Class;

    pub trait Family: Sized {
        fn parse_address(text: &str) -> Result<Self, Failure>;
        fn parse_prefixlen(text: &str) -> Result<u8, Failure>;
        fn classify(class: Class, first: &Self, last: &Self) -> bool;
    }
}

///Network address trait
pub trait NetworkAddress: sealed::Family + Copy + Default + fmt::Debug + fmt::Display + Eq + Ord + hash::Hash {
    ///Max possible length of the address in bits
    const BITS_LEN: u8;
    ///Protocol version
    const VERSION: IpVersion;
    ///Whether hosts enumeration excludes highest address of the network
    const HOSTS_EXCLUDE_BROADCAST: bool;
    ///Integer representation
    type Repr: Repr;

    ///Returns address as integer, ignoring scope
    fn to_repr(&self) -> Self::Repr;
    ///Creates address from integer
    fn from_repr(value: Self::Repr) -> Self;
    ///Netmask corresponding to `prefixlen`
    fn netmask(prefixlen: u8) -> Self;

    #[inline(always)]
    ///Returns address with the same scope, but with numeric value replaced by `value`
    fn with_repr(&self, value: Self::Repr) -> Self {
        Self::from_repr(value)
    }

    #[inline(always)]
    ///Returns address without scope
    fn without_scope(&self) -> Self {
        Self::from_repr(self.to_repr())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
///IP network, which is address block described by its lowest address and prefix length
pub struct Network<A> {
    address: A,
    netmask: A,
    prefixlen: u8,
}

impl<A: NetworkAddress> Network<A> {
    #[inline]
    pub(crate) fn new_unchecked(address: A, prefixlen: u8) -> Self {
        Self {
            address,
            netmask: A::netmask(prefixlen),
            prefixlen,
        }
    }

    fn from_parts(address: A, prefixlen: u8, strict: bool) -> core::result::Result<Self, Failure> {
        if prefixlen > A::BITS_LEN {
            return Err((ErrorCode::InvalidNetmask, 0));
        }

        let mask = <A::Repr as Repr>::prefix_mask(prefixlen);
        let value = address.to_repr();
        let network = value & mask;
        if network != value {
            if strict {
                return Err((ErrorCode::HasHostBitsSet, 0));
            }
            log::debug!("{address}/{prefixlen} has host bits set, masking them off");
        }

        Ok(Self::new_unchecked(address.with_repr(network), prefixlen))
    }

    fn parse_text(text: &str, strict: bool) -> core::result::Result<Self, Failure> {
        let (address, netmask) = parser::split_network(text)?;
        let prefixlen = match netmask {
            Some(netmask) => A::parse_prefixlen(netmask)?,
            None => A::BITS_LEN,
        };
        let address = A::parse_address(address)?;
        Self::from_parts(address, prefixlen, strict)
    }

    #[inline]
    ///Parses network from `address/prefix` text, rejecting host bits set
    ///
    ///Prefix part is optional and can be written as prefix length or, for IPv4, netmask or hostmask.
    pub fn parse(text: &str) -> error::Result<Self> {
        Self::parse_text(text, true).map_err(|failure| Error::parse(failure, text))
    }

    #[inline]
    ///Parses network from `address/prefix` text, masking off host bits if set
    pub fn parse_non_strict(text: &str) -> error::Result<Self> {
        Self::parse_text(text, false).map_err(|failure| Error::parse(failure, text))
    }

    #[inline]
    ///Parses network, returning default value together with error code on failure
    pub fn parse_with_code(text: &str, strict: bool) -> (Self, ErrorCode) {
        match Self::parse_text(text, strict) {
            Ok(network) => (network, ErrorCode::NoError),
            Err((code, _)) => (Self::default(), code),
        }
    }

    ///Creates network from `address` and `prefixlen`
    ///
    ///With `strict` set host bits of `address` are rejected, otherwise they are masked off.
    pub fn from_address(address: A, prefixlen: u8, strict: bool) -> error::Result<Self> {
        Self::from_parts(address, prefixlen, strict).map_err(|failure| {
            let text = format!("{address}/{prefixlen}");
            Error::parse(failure, &text)
        })
    }

    #[inline]
    ///Creates network, returning default value together with error code on failure
    pub fn from_address_with_code(address: A, prefixlen: u8, strict: bool) -> (Self, ErrorCode) {
        match Self::from_parts(address, prefixlen, strict) {
            Ok(network) => (network, ErrorCode::NoError),
            Err((code, _)) => (Self::default(), code),
        }
    }

    #[inline(always)]
    ///Returns lowest address of the network
    pub fn network_address(&self) -> A {
        self.address
    }

    #[inline(always)]
    ///Returns highest address of the network
    pub fn broadcast_address(&self) -> A {
        A::from_repr(self.broadcast_repr())
    }

    #[inline(always)]
    ///Returns netmask
    pub fn netmask(&self) -> A {
        self.netmask
    }

    #[inline(always)]
    ///Returns hostmask, which is inverted netmask
    pub fn hostmask(&self) -> A {
        A::from_repr(!self.netmask.to_repr())
    }

    #[inline(always)]
    ///Returns prefix length
    pub fn prefixlen(&self) -> u8 {
        self.prefixlen
    }

    #[inline(always)]
    ///Returns IP version of the network
    pub fn version(&self) -> IpVersion {
        A::VERSION
    }

    #[inline]
    ///Returns number of addresses within the network
    ///
    ///Computed as hostmask + 1 in 128 bits, so whole IPv6 space wraps to zero.
    pub fn addresses_count(&self) -> Uint128 {
        self.hostmask().to_repr().widen().wrapping_add(Uint128::ONE)
    }

    #[inline(always)]
    pub(crate) fn network_repr(&self) -> A::Repr {
        self.address.to_repr()
    }

    #[inline(always)]
    pub(crate) fn broadcast_repr(&self) -> A::Repr {
        self.address.to_repr() | !self.netmask.to_repr()
    }

    #[inline]
    ///Returns network with scope removed from its address
    pub fn without_scope(&self) -> Self {
        Self {
            address: self.address.without_scope(),
            netmask: self.netmask,
            prefixlen: self.prefixlen,
        }
    }

    #[inline]
    ///Checks if a given `address` is contained within `self`
    pub fn contains(&self, address: &A) -> bool {
        (address.to_repr() & self.netmask.to_repr()) == self.network_repr()
    }

    ///Checks whether `self` and `other` have at least one common address
    pub fn overlaps(&self, other: &Self) -> bool {
        other.contains(&self.address)
            || other.contains(&self.broadcast_address())
            || self.contains(&other.address)
            || self.contains(&other.broadcast_address())
    }

    #[inline]
    ///Checks whether `self` lies entirely within `other`
    pub fn subnet_of(&self, other: &Self) -> bool {
        other.network_repr() <= self.network_repr() && other.broadcast_repr() >= self.broadcast_repr()
    }

    #[inline]
    ///Checks whether `other` lies entirely within `self`
    pub fn supernet_of(&self, other: &Self) -> bool {
        other.subnet_of(self)
    }

    fn supernet_impl(&self, prefixlen_diff: u8, new_prefixlen: Option<u8>) -> core::result::Result<Self, ErrorCode> {
        if self.prefixlen == 0 {
            return Ok(*self);
        }

        let mut prefixlen_diff = prefixlen_diff;
        if let Some(new_prefixlen) = new_prefixlen {
            if new_prefixlen > self.prefixlen {
                return Err(ErrorCode::NewPrefixMustBeShorter);
            }
            if prefixlen_diff != 1 {
                return Err(ErrorCode::CannotSetPrefixlenDiffAndNewPrefix);
            }
            prefixlen_diff = self.prefixlen - new_prefixlen;
        }

        let new_prefixlen = match self.prefixlen.checked_sub(prefixlen_diff) {
            Some(new_prefixlen) => new_prefixlen,
            None => return Err(ErrorCode::InvalidPrefixlenDiff),
        };

        let network = self.network_repr() & <A::Repr as Repr>::prefix_mask(new_prefixlen);
        Ok(Self::new_unchecked(self.address.with_repr(network), new_prefixlen))
    }

    #[inline]
    ///Returns network containing `self` with prefix shorter by `prefixlen_diff`, or with `new_prefixlen`
    ///
    ///When `new_prefixlen` is specified, `prefixlen_diff` must be 1.
    pub fn supernet(&self, prefixlen_diff: u8, new_prefixlen: Option<u8>) -> error::Result<Self> {
        self.supernet_impl(prefixlen_diff, new_prefixlen).map_err(Error::logic)
    }

    #[inline]
    ///Computes supernet, returning default value together with error code on failure
    pub fn supernet_with_code(&self, prefixlen_diff: u8, new_prefixlen: Option<u8>) -> (Self, ErrorCode) {
        error::with_code(self.supernet(prefixlen_diff, new_prefixlen))
    }

    fn subnets_impl(&self, prefixlen_diff: u8, new_prefixlen: Option<u8>) -> core::result::Result<Subnets<A>, ErrorCode> {
        if self.prefixlen == A::BITS_LEN {
            return Ok(Subnets::new(self, self.prefixlen));
        }

        let mut prefixlen_diff = prefixlen_diff;
        if let Some(new_prefixlen) = new_prefixlen {
            if new_prefixlen < self.prefixlen {
                return Err(ErrorCode::NewPrefixMustBeLonger);
            }
            if prefixlen_diff != 1 {
                return Err(ErrorCode::CannotSetPrefixlenDiffAndNewPrefix);
            }
            prefixlen_diff = new_prefixlen - self.prefixlen;
        }

        match self.prefixlen.checked_add(prefixlen_diff) {
            Some(new_prefixlen) if new_prefixlen <= A::BITS_LEN => Ok(Subnets::new(self, new_prefixlen)),
            _ => Err(ErrorCode::InvalidPrefixlenDiff),
        }
    }

    #[inline]
    ///Returns lazy sequence of subnets with prefix longer by `prefixlen_diff`, or with `new_prefixlen`
    ///
    ///When `new_prefixlen` is specified, `prefixlen_diff` must be 1.
    pub fn subnets(&self, prefixlen_diff: u8, new_prefixlen: Option<u8>) -> error::Result<Subnets<A>> {
        self.subnets_impl(prefixlen_diff, new_prefixlen).map_err(Error::logic)
    }

    #[inline]
    ///Computes subnets, returning empty sequence together with error code on failure
    pub fn subnets_with_code(&self, prefixlen_diff: u8, new_prefixlen: Option<u8>) -> (Subnets<A>, ErrorCode) {
        match self.subnets_impl(prefixlen_diff, new_prefixlen) {
            Ok(subnets) => (subnets, ErrorCode::NoError),
            Err(code) => (Subnets::empty(), code),
        }
    }

    ///Returns lazy sequence of largest networks covering `self` except `other`
    ///
    ///`other` must be a subnet of `self`.
    pub fn address_exclude(&self, other: &Self) -> error::Result<Exclude<A>> {
        let network = self.without_scope();
        let other = other.without_scope();

        if !other.subnet_of(&network) {
            log::debug!("cannot exclude {other} from {network}: not a subnet");
            return Err(Error::logic(ErrorCode::NotContainedNetwork));
        }

        Ok(Exclude::new(network, other))
    }

    #[inline]
    ///Computes address exclusion, returning empty sequence together with error code on failure
    pub fn address_exclude_with_code(&self, other: &Self) -> (Exclude<A>, ErrorCode) {
        match self.address_exclude(other) {
            Ok(exclude) => (exclude, ErrorCode::NoError),
            Err(error) => (Exclude::empty(), error.code()),
        }
    }

    ///Returns lazy sequence of usable hosts
    ///
    ///Point-to-point networks (prefix one shorter than address length) include both addresses
    ///and single address networks yield the address itself.
    ///Otherwise IPv4 excludes network and broadcast addresses while IPv6 excludes only network address.
    pub fn hosts(&self) -> AddressRange<A> {
        let first = self.network_repr();
        let last = self.broadcast_repr();

        if self.prefixlen >= A::BITS_LEN.saturating_sub(1) {
            return AddressRange::new(first, last);
        }

        let last = match A::HOSTS_EXCLUDE_BROADCAST {
            true => last.wrapping_sub(<A::Repr as Repr>::ONE),
            false => last,
        };
        AddressRange::new(first.wrapping_add(<A::Repr as Repr>::ONE), last)
    }

    #[inline]
    ///Returns lazy sequence of all addresses within the network
    pub fn addresses(&self) -> AddressRange<A> {
        AddressRange::new(self.network_repr(), self.broadcast_repr())
    }

    #[inline]
    fn classify(&self, class: Class) -> bool {
        A::classify(class, &self.network_address(), &self.broadcast_address())
    }

    #[inline]
    ///Checks whether network is reserved for multicast
    pub fn is_multicast(&self) -> bool {
        self.classify(Class::Multicast)
    }

    #[inline]
    ///Checks whether network is within private ranges
    pub fn is_private(&self) -> bool {
        self.classify(Class::Private)
    }

    #[inline]
    ///Checks whether network is globally reachable
    pub fn is_global(&self) -> bool {
        self.classify(Class::Global)
    }

    #[inline]
    ///Checks whether network is reserved by IETF
    pub fn is_reserved(&self) -> bool {
        self.classify(Class::Reserved)
    }

    #[inline]
    ///Checks whether network is loopback
    pub fn is_loopback(&self) -> bool {
        self.classify(Class::Loopback)
    }

    #[inline]
    ///Checks whether network is link-local
    pub fn is_link_local(&self) -> bool {
        self.classify(Class::LinkLocal)
    }

    #[inline]
    ///Checks whether network consists only of unspecified address
    pub fn is_unspecified(&self) -> bool {
        self.classify(Class::Unspecified)
    }
}

impl<A: NetworkAddress> Default for Network<A> {
    #[inline]
    fn default() -> Self {
        Self::new_unchecked(A::default(), A::BITS_LEN)
    }
}

impl<A: NetworkAddress> PartialOrd for Network<A> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<A: NetworkAddress> Ord for Network<A> {
    #[inline]
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.address.cmp(&other.address).then_with(|| self.netmask.cmp(&other.netmask))
    }
}

impl<A: NetworkAddress> fmt::Display for Network<A> {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { address, prefixlen, .. } = self;
        fmt.write_fmt(format_args!("{address}/{prefixlen}"))
    }
}

impl<A: NetworkAddress> str::FromStr for Network<A> {
    type Err = Error;

    #[inline(always)]
    fn from_str(text: &str) -> error::Result<Self> {
        Self::parse(text)
    }
}
