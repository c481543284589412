//! Well-known address blocks used for classification

use crate::base::Repr;
use crate::uint128::Uint128;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
///Address block category
pub enum Class {
    ///Not globally reachable
    Private,
    ///Globally reachable
    Global,
    ///Multicast
    Multicast,
    ///Reserved by IETF
    Reserved,
    ///Loopback
    Loopback,
    ///Link-local
    LinkLocal,
    ///Deprecated IPv6 site-local
    SiteLocal,
    ///Unspecified address
    Unspecified,
}

struct Block<R> {
    network: R,
    prefixlen: u8,
}

impl<R: Repr> Block<R> {
    #[inline]
    //Range [first, last] is inside the block
    fn contains(&self, first: R, last: R) -> bool {
        let mask = R::prefix_mask(self.prefixlen);
        (first & mask) == self.network && (last & mask) == self.network
    }
}

//Range matches only when single block covers it whole, so adjacent exceptions are never merged
#[inline]
fn any_contains<R: Repr>(blocks: &[Block<R>], first: R, last: R) -> bool {
    blocks.iter().any(|block| block.contains(first, last))
}

const fn v4(a: u8, b: u8, c: u8, d: u8, prefixlen: u8) -> Block<u32> {
    Block {
        network: u32::from_be_bytes([a, b, c, d]),
        prefixlen,
    }
}

const fn v6(segments: [u16; 8], prefixlen: u8) -> Block<Uint128> {
    Block {
        network: Uint128::from_segments(segments),
        prefixlen,
    }
}

const IPV4_PRIVATE: [Block<u32>; 14] = [
    v4(0, 0, 0, 0, 8),
    v4(10, 0, 0, 0, 8),
    v4(127, 0, 0, 0, 8),
    v4(169, 254, 0, 0, 16),
    v4(172, 16, 0, 0, 12),
    v4(192, 0, 0, 0, 24),
    v4(192, 0, 0, 170, 31),
    v4(192, 0, 2, 0, 24),
    v4(192, 168, 0, 0, 16),
    v4(198, 18, 0, 0, 15),
    v4(198, 51, 100, 0, 24),
    v4(203, 0, 113, 0, 24),
    v4(240, 0, 0, 0, 4),
    v4(255, 255, 255, 255, 32),
];

const IPV4_PRIVATE_EXCEPTIONS: [Block<u32>; 2] = [
    v4(192, 0, 0, 9, 32),
    v4(192, 0, 0, 10, 32),
];

const IPV4_PUBLIC: [Block<u32>; 1] = [v4(100, 64, 0, 0, 10)];
const IPV4_MULTICAST: [Block<u32>; 1] = [v4(224, 0, 0, 0, 4)];
const IPV4_RESERVED: [Block<u32>; 1] = [v4(240, 0, 0, 0, 4)];
const IPV4_LOOPBACK: [Block<u32>; 1] = [v4(127, 0, 0, 0, 8)];
const IPV4_LINK_LOCAL: [Block<u32>; 1] = [v4(169, 254, 0, 0, 16)];

const IPV6_PRIVATE: [Block<Uint128>; 10] = [
    v6([0, 0, 0, 0, 0, 0, 0, 1], 128),
    v6([0, 0, 0, 0, 0, 0, 0, 0], 128),
    v6([0, 0, 0, 0, 0, 0xffff, 0, 0], 96),
    v6([0x64, 0xff9b, 1, 0, 0, 0, 0, 0], 48),
    v6([0x100, 0, 0, 0, 0, 0, 0, 0], 64),
    v6([0x2001, 0, 0, 0, 0, 0, 0, 0], 23),
    v6([0x2001, 0xdb8, 0, 0, 0, 0, 0, 0], 32),
    v6([0x2002, 0, 0, 0, 0, 0, 0, 0], 16),
    v6([0xfc00, 0, 0, 0, 0, 0, 0, 0], 7),
    v6([0xfe80, 0, 0, 0, 0, 0, 0, 0], 10),
];

const IPV6_PRIVATE_EXCEPTIONS: [Block<Uint128>; 6] = [
    v6([0x2001, 1, 0, 0, 0, 0, 0, 1], 128),
    v6([0x2001, 1, 0, 0, 0, 0, 0, 2], 128),
    v6([0x2001, 3, 0, 0, 0, 0, 0, 0], 32),
    v6([0x2001, 4, 0x112, 0, 0, 0, 0, 0], 48),
    v6([0x2001, 0x20, 0, 0, 0, 0, 0, 0], 28),
    v6([0x2001, 0x30, 0, 0, 0, 0, 0, 0], 28),
];

const IPV6_RESERVED: [Block<Uint128>; 15] = [
    v6([0x0000, 0, 0, 0, 0, 0, 0, 0], 8),
    v6([0x0100, 0, 0, 0, 0, 0, 0, 0], 8),
    v6([0x0200, 0, 0, 0, 0, 0, 0, 0], 7),
    v6([0x0400, 0, 0, 0, 0, 0, 0, 0], 6),
    v6([0x0800, 0, 0, 0, 0, 0, 0, 0], 5),
    v6([0x1000, 0, 0, 0, 0, 0, 0, 0], 4),
    v6([0x4000, 0, 0, 0, 0, 0, 0, 0], 3),
    v6([0x6000, 0, 0, 0, 0, 0, 0, 0], 3),
    v6([0x8000, 0, 0, 0, 0, 0, 0, 0], 3),
    v6([0xa000, 0, 0, 0, 0, 0, 0, 0], 3),
    v6([0xc000, 0, 0, 0, 0, 0, 0, 0], 3),
    v6([0xe000, 0, 0, 0, 0, 0, 0, 0], 4),
    v6([0xf000, 0, 0, 0, 0, 0, 0, 0], 5),
    v6([0xf800, 0, 0, 0, 0, 0, 0, 0], 6),
    v6([0xfe00, 0, 0, 0, 0, 0, 0, 0], 9),
];

const IPV6_MULTICAST: [Block<Uint128>; 1] = [v6([0xff00, 0, 0, 0, 0, 0, 0, 0], 8)];
const IPV6_LINK_LOCAL: [Block<Uint128>; 1] = [v6([0xfe80, 0, 0, 0, 0, 0, 0, 0], 10)];
const IPV6_SITE_LOCAL: [Block<Uint128>; 1] = [v6([0xfec0, 0, 0, 0, 0, 0, 0, 0], 10)];
const IPV6_LOOPBACK: [Block<Uint128>; 1] = [v6([0, 0, 0, 0, 0, 0, 0, 1], 128)];

///Checks whether IPv4 range `[first, last]` belongs to `class`
pub fn ipv4(class: Class, first: u32, last: u32) -> bool {
    match class {
        Class::Private => any_contains(&IPV4_PRIVATE, first, last) && !any_contains(&IPV4_PRIVATE_EXCEPTIONS, first, last),
        Class::Global => !any_contains(&IPV4_PUBLIC, first, last) && !ipv4(Class::Private, first, last),
        Class::Multicast => any_contains(&IPV4_MULTICAST, first, last),
        Class::Reserved => any_contains(&IPV4_RESERVED, first, last),
        Class::Loopback => any_contains(&IPV4_LOOPBACK, first, last),
        Class::LinkLocal => any_contains(&IPV4_LINK_LOCAL, first, last),
        Class::SiteLocal => false,
        Class::Unspecified => first == 0 && last == 0,
    }
}

///Checks whether IPv6 range `[first, last]` belongs to `class`
pub fn ipv6(class: Class, first: Uint128, last: Uint128) -> bool {
    match class {
        Class::Private => any_contains(&IPV6_PRIVATE, first, last) && !any_contains(&IPV6_PRIVATE_EXCEPTIONS, first, last),
        Class::Global => !ipv6(Class::Private, first, last),
        Class::Multicast => any_contains(&IPV6_MULTICAST, first, last),
        Class::Reserved => any_contains(&IPV6_RESERVED, first, last),
        Class::Loopback => any_contains(&IPV6_LOOPBACK, first, last),
        Class::LinkLocal => any_contains(&IPV6_LINK_LOCAL, first, last),
        Class::SiteLocal => any_contains(&IPV6_SITE_LOCAL, first, last),
        Class::Unspecified => first.is_zero() && last.is_zero(),
    }
}
