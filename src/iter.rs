//! Lazy sequences over addresses and networks
//!
//! Sequences keep integer cursors only, so construction is constant time regardless of range size.

use core::{cmp, fmt, iter, marker};

use crate::base::{Network, NetworkAddress, Repr};
use crate::error::{self, Error, ErrorCode};
use crate::ip::IpAddress;
use crate::uint128::Uint128;
use crate::v4::Ipv4Address;
use crate::v6::Ipv6Address;
use crate::IpNetwork;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
//Integer offset with carry bit, which flips whenever offset wraps around.
//This allows to represent one past the highest address as (ZERO, carry=true)
struct Cursor<R> {
    offset: R,
    carry: bool,
}

impl<R: Repr> Cursor<R> {
    #[inline(always)]
    const fn new(offset: R) -> Self {
        Self {
            offset,
            carry: false,
        }
    }

    #[inline]
    fn advance(&mut self, step: R) {
        let offset = self.offset.wrapping_add(step);
        if offset < self.offset {
            self.carry = !self.carry;
        }
        self.offset = offset;
    }

    #[inline]
    fn retreat(&mut self, step: R) {
        let offset = self.offset.wrapping_sub(step);
        if offset > self.offset {
            self.carry = !self.carry;
        }
        self.offset = offset;
    }

    #[inline]
    fn advance_pow2(&mut self, power: u8) {
        match power >= R::BITS {
            true => self.carry = !self.carry,
            false => self.advance(R::pow2(power)),
        }
    }

    #[inline]
    fn retreat_pow2(&mut self, power: u8) {
        match power >= R::BITS {
            true => self.carry = !self.carry,
            false => self.retreat(R::pow2(power)),
        }
    }

    #[inline]
    //Number of steps between `self` and `end`, which wraps to zero when it is 2^128
    fn distance(&self, end: &Self) -> Uint128 {
        let distance = end.offset.wrapping_sub(self.offset).widen();
        match end.carry != self.carry && end.offset == self.offset {
            true => distance.wrapping_add(Uint128::ONE.shl(R::BITS as u32)),
            false => distance,
        }
    }
}

impl<R: Repr> PartialOrd for Cursor<R> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<R: Repr> Ord for Cursor<R> {
    #[inline]
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.carry.cmp(&other.carry).then_with(|| self.offset.cmp(&other.offset))
    }
}

#[inline]
fn narrow<R: Repr>(value: Uint128) -> R {
    R::truncate(value)
}

#[inline]
fn to_usize_saturating(value: Uint128) -> usize {
    match value.upper() {
        0 => usize::try_from(value.lower()).unwrap_or(usize::MAX),
        _ => usize::MAX,
    }
}

///Sequence of consecutive addresses
pub struct AddressRange<A: NetworkAddress> {
    front: Cursor<A::Repr>,
    back: Cursor<A::Repr>,
    _family: marker::PhantomData<A>,
}

impl<A: NetworkAddress> AddressRange<A> {
    #[inline]
    ///Creates range of addresses from `first` to `last` inclusive
    pub(crate) fn new(first: A::Repr, last: A::Repr) -> Self {
        let mut back = Cursor::new(last);
        back.advance(<A::Repr as Repr>::ONE);
        Self {
            front: Cursor::new(first),
            back,
            _family: marker::PhantomData,
        }
    }

    #[inline]
    ///Returns whether there are no more addresses
    pub fn is_empty(&self) -> bool {
        self.front >= self.back
    }

    ///Returns number of remaining addresses
    ///
    ///Range over whole IPv6 space reports zero as its size is not representable.
    pub fn size(&self) -> Uint128 {
        match self.is_empty() {
            true => Uint128::ZERO,
            false => self.front.distance(&self.back),
        }
    }

    ///Returns address at `index` from the front
    pub fn get(&self, index: Uint128) -> Option<A> {
        if self.is_empty() {
            return None;
        }

        let size = self.size();
        if !size.is_zero() && index >= size {
            return None;
        }

        let offset = self.front.offset.wrapping_add(narrow(index));
        Some(A::from_repr(offset))
    }

    #[inline]
    ///Returns first remaining address
    pub fn front(&self) -> Option<A> {
        match self.is_empty() {
            true => None,
            false => Some(A::from_repr(self.front.offset)),
        }
    }

    #[inline]
    ///Returns last remaining address
    pub fn back(&self) -> Option<A> {
        match self.is_empty() {
            true => None,
            false => Some(A::from_repr(self.back.offset.wrapping_sub(<A::Repr as Repr>::ONE))),
        }
    }
}

impl<A: NetworkAddress> Clone for AddressRange<A> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: NetworkAddress> Copy for AddressRange<A> {}

impl<A: NetworkAddress> fmt::Debug for AddressRange<A> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("AddressRange").field("front", &self.front()).field("back", &self.back()).finish()
    }
}

impl<A: NetworkAddress> Iterator for AddressRange<A> {
    type Item = A;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.is_empty() {
            return None;
        }

        let address = A::from_repr(self.front.offset);
        self.front.advance(<A::Repr as Repr>::ONE);
        Some(address)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.size() {
            size if size.is_zero() && !self.is_empty() => (usize::MAX, None),
            size => {
                let size = to_usize_saturating(size);
                (size, Some(size))
            },
        }
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let index = Uint128::from(n as u64);
        match self.get(index) {
            Some(_) => {
                self.front.advance(narrow(index));
                self.next()
            },
            None => {
                self.front = self.back;
                None
            },
        }
    }
}

impl<A: NetworkAddress> DoubleEndedIterator for AddressRange<A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.is_empty() {
            return None;
        }

        self.back.retreat(<A::Repr as Repr>::ONE);
        Some(A::from_repr(self.back.offset))
    }
}

impl<A: NetworkAddress> iter::FusedIterator for AddressRange<A> {}

///Sequence of subnets with the same prefix length
pub struct Subnets<A: NetworkAddress> {
    front: Cursor<A::Repr>,
    back: Cursor<A::Repr>,
    //Each subnet has 2^step_power addresses
    step_power: u8,
    prefixlen: u8,
    _family: marker::PhantomData<A>,
}

impl<A: NetworkAddress> Subnets<A> {
    #[inline]
    pub(crate) fn new(network: &Network<A>, prefixlen: u8) -> Self {
        let mut back = Cursor::new(network.broadcast_repr());
        back.advance(<A::Repr as Repr>::ONE);
        Self {
            front: Cursor::new(network.network_repr()),
            back,
            step_power: A::BITS_LEN - prefixlen,
            prefixlen,
            _family: marker::PhantomData,
        }
    }

    #[inline]
    pub(crate) fn empty() -> Self {
        let cursor = Cursor::new(<A::Repr as Repr>::ZERO);
        Self {
            front: cursor,
            back: cursor,
            step_power: A::BITS_LEN,
            prefixlen: 0,
            _family: marker::PhantomData,
        }
    }

    #[inline(always)]
    ///Prefix length of produced subnets
    pub fn prefixlen(&self) -> u8 {
        self.prefixlen
    }

    #[inline]
    ///Returns whether there are no more subnets
    pub fn is_empty(&self) -> bool {
        self.front >= self.back
    }

    ///Returns number of remaining subnets
    ///
    ///Splitting whole IPv6 space into single addresses reports zero as its size is not representable.
    pub fn size(&self) -> Uint128 {
        if self.is_empty() {
            return Uint128::ZERO;
        }

        match self.front.distance(&self.back) {
            distance if distance.is_zero() => Uint128::ONE.shl(A::BITS_LEN.saturating_sub(self.step_power) as u32),
            distance => distance.shr(self.step_power as u32),
        }
    }

    #[inline(always)]
    fn network_at(&self, offset: A::Repr) -> Network<A> {
        Network::new_unchecked(A::from_repr(offset), self.prefixlen)
    }

    ///Returns subnet at `index` from the front
    pub fn get(&self, index: Uint128) -> Option<Network<A>> {
        if self.is_empty() {
            return None;
        }

        let size = self.size();
        if !size.is_zero() && index >= size {
            return None;
        }

        let step = narrow::<A::Repr>(index).shl_bits(self.step_power as u32);
        Some(self.network_at(self.front.offset.wrapping_add(step)))
    }

    #[inline]
    ///Returns first remaining subnet
    pub fn front(&self) -> Option<Network<A>> {
        match self.is_empty() {
            true => None,
            false => Some(self.network_at(self.front.offset)),
        }
    }

    #[inline]
    ///Returns last remaining subnet
    pub fn back(&self) -> Option<Network<A>> {
        if self.is_empty() {
            return None;
        }

        let mut back = self.back;
        back.retreat_pow2(self.step_power);
        Some(self.network_at(back.offset))
    }
}

impl<A: NetworkAddress> Clone for Subnets<A> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: NetworkAddress> Copy for Subnets<A> {}

impl<A: NetworkAddress> fmt::Debug for Subnets<A> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Subnets").field("front", &self.front()).field("back", &self.back()).finish()
    }
}

impl<A: NetworkAddress> Iterator for Subnets<A> {
    type Item = Network<A>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.is_empty() {
            return None;
        }

        let network = self.network_at(self.front.offset);
        self.front.advance_pow2(self.step_power);
        Some(network)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.size() {
            size if size.is_zero() && !self.is_empty() => (usize::MAX, None),
            size => {
                let size = to_usize_saturating(size);
                (size, Some(size))
            },
        }
    }
}

impl<A: NetworkAddress> DoubleEndedIterator for Subnets<A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.is_empty() {
            return None;
        }

        self.back.retreat_pow2(self.step_power);
        Some(self.network_at(self.back.offset))
    }
}

impl<A: NetworkAddress> iter::FusedIterator for Subnets<A> {}

#[inline]
fn bisect<A: NetworkAddress>(network: &Network<A>) -> (Network<A>, Network<A>) {
    let prefixlen = network.prefixlen() + 1;
    let high = network.network_repr() | <A::Repr as Repr>::pow2(A::BITS_LEN - prefixlen);
    (
        Network::new_unchecked(network.network_address(), prefixlen),
        Network::new_unchecked(A::from_repr(high), prefixlen),
    )
}

#[derive(Copy, Clone, Debug)]
///Sequence of networks covering a network except one of its subnets
///
///Each step bisects current network and yields the half that does not contain excluded subnet.
pub struct Exclude<A: NetworkAddress> {
    other: Network<A>,
    halves: Option<(Network<A>, Network<A>)>,
}

impl<A: NetworkAddress> Exclude<A> {
    #[inline]
    pub(crate) fn new(network: Network<A>, other: Network<A>) -> Self {
        Self {
            other,
            halves: match network == other {
                true => None,
                false => Some(bisect(&network)),
            },
        }
    }

    #[inline]
    pub(crate) fn empty() -> Self {
        Self {
            other: Network::default(),
            halves: None,
        }
    }
}

impl<A: NetworkAddress> Iterator for Exclude<A> {
    type Item = Network<A>;

    fn next(&mut self) -> Option<Self::Item> {
        let (low, high) = self.halves?;
        log::trace!("exclude {} from halves {low} and {high}", self.other);

        if low == self.other {
            self.halves = None;
            Some(high)
        } else if high == self.other {
            self.halves = None;
            Some(low)
        } else if self.other.subnet_of(&low) {
            self.halves = Some(bisect(&low));
            Some(high)
        } else {
            self.halves = Some(bisect(&high));
            Some(low)
        }
    }
}

impl<A: NetworkAddress> iter::FusedIterator for Exclude<A> {}

#[derive(Copy, Clone, Debug)]
///Sequence of the fewest networks exactly covering range of addresses
pub struct Summarize<A: NetworkAddress> {
    first: A::Repr,
    last: A::Repr,
    done: bool,
}

impl<A: NetworkAddress> Summarize<A> {
    ///Creates summary of addresses from `first` to `last` inclusive
    pub fn new(first: &A, last: &A) -> error::Result<Self> {
        let first = first.to_repr();
        let last = last.to_repr();

        if first > last {
            log::debug!("cannot summarize range: {first:?} > {last:?}");
            return Err(Error::logic(ErrorCode::LastAddressMustBeGreaterThanFirst));
        }

        Ok(Self {
            first,
            last,
            done: false,
        })
    }
}

impl<A: NetworkAddress> Iterator for Summarize<A> {
    type Item = Network<A>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let bits = A::BITS_LEN as u32;
        let count = self.last.wrapping_sub(self.first).wrapping_add(<A::Repr as Repr>::ONE);
        let count_bits = match count == <A::Repr as Repr>::ZERO {
            true => bits,
            false => bits - count.leading_zeros() - 1,
        };
        let power = cmp::min(self.first.trailing_zeros(), count_bits) as u8;

        let network = Network::new_unchecked(A::from_repr(self.first), A::BITS_LEN - power);
        if network.broadcast_repr() == self.last {
            self.done = true;
        } else {
            self.first = self.first.wrapping_add(<A::Repr as Repr>::pow2(power));
        }

        Some(network)
    }
}

impl<A: NetworkAddress> iter::FusedIterator for Summarize<A> {}

///Family specific value that has version-agnostic counterpart
pub trait Unify: Sized {
    ///Version-agnostic type
    type Any: From<Self>;
}

impl Unify for Ipv4Address {
    type Any = IpAddress;
}

impl Unify for Ipv6Address {
    type Any = IpAddress;
}

impl Unify for Network<Ipv4Address> {
    type Any = IpNetwork;
}

impl Unify for Network<Ipv6Address> {
    type Any = IpNetwork;
}

#[derive(Copy, Clone, Debug)]
///Iterator over either IPv4 or IPv6 sequence, producing version-agnostic values
pub enum AnyIter<I4, I6> {
    ///IPv4 sequence
    V4(I4),
    ///IPv6 sequence
    V6(I6),
}

impl<I4, I6> Iterator for AnyIter<I4, I6>
where
    I4: Iterator,
    I6: Iterator,
    I4::Item: Unify,
    I6::Item: Unify<Any = <I4::Item as Unify>::Any> + Into<<I4::Item as Unify>::Any>,
{
    type Item = <I4::Item as Unify>::Any;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::V4(iter) => iter.next().map(Into::into),
            Self::V6(iter) => iter.next().map(Into::into),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::V4(iter) => iter.size_hint(),
            Self::V6(iter) => iter.size_hint(),
        }
    }
}

impl<I4, I6> DoubleEndedIterator for AnyIter<I4, I6>
where
    I4: DoubleEndedIterator,
    I6: DoubleEndedIterator,
    I4::Item: Unify,
    I6::Item: Unify<Any = <I4::Item as Unify>::Any> + Into<<I4::Item as Unify>::Any>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        match self {
            Self::V4(iter) => iter.next_back().map(Into::into),
            Self::V6(iter) => iter.next_back().map(Into::into),
        }
    }
}

///Addresses of either IPv4 or IPv6 network
pub type IpAddressRange = AnyIter<AddressRange<Ipv4Address>, AddressRange<Ipv6Address>>;
///Subnets of either IPv4 or IPv6 network
pub type IpSubnets = AnyIter<Subnets<Ipv4Address>, Subnets<Ipv6Address>>;
///Address exclusion over either IPv4 or IPv6 network
pub type IpExclude = AnyIter<Exclude<Ipv4Address>, Exclude<Ipv6Address>>;
///Summary of either IPv4 or IPv6 address range
pub type IpSummarize = AnyIter<Summarize<Ipv4Address>, Summarize<Ipv6Address>>;

impl IpAddressRange {
    #[inline]
    ///Returns number of remaining addresses
    pub fn size(&self) -> Uint128 {
        match self {
            Self::V4(range) => range.size(),
            Self::V6(range) => range.size(),
        }
    }

    #[inline]
    ///Returns address at `index` from the front
    pub fn get(&self, index: Uint128) -> Option<IpAddress> {
        match self {
            Self::V4(range) => range.get(index).map(IpAddress::V4),
            Self::V6(range) => range.get(index).map(IpAddress::V6),
        }
    }
}

impl IpSubnets {
    #[inline]
    ///Returns number of remaining subnets
    pub fn size(&self) -> Uint128 {
        match self {
            Self::V4(subnets) => subnets.size(),
            Self::V6(subnets) => subnets.size(),
        }
    }

    #[inline]
    ///Returns subnet at `index` from the front
    pub fn get(&self, index: Uint128) -> Option<IpNetwork> {
        match self {
            Self::V4(subnets) => subnets.get(index).map(IpNetwork::V4),
            Self::V6(subnets) => subnets.get(index).map(IpNetwork::V6),
        }
    }
}
