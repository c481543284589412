use core::net;

use ip_address::{ErrorCode, Error, Ipv4Address, Ipv4Network, Uint128};
use test_case::test_case;

#[test]
fn should_parse_ipv4() {
    let inputs = [
        ("127.0.0.1", Ipv4Address::new(127, 0, 0, 1)),
        ("0.0.0.0", Ipv4Address::new(0, 0, 0, 0)),
        ("255.255.255.255", Ipv4Address::new(255, 255, 255, 255)),
        ("192.0.2.10", Ipv4Address::new(192, 0, 2, 10)),
    ];

    for (text, expected) in inputs {
        println!("Parse '{text}'");
        let address = match Ipv4Address::parse(text) {
            Ok(address) => address,
            Err(error) => panic!("Should parse '{text}' but got error={error}"),
        };
        assert_eq!(address, expected);
        assert_eq!(address.to_string(), text);
        assert_eq!(text.parse::<Ipv4Address>(), Ok(expected));
        assert_eq!(Ipv4Address::parse_with_code(text), (expected, ErrorCode::NoError));
    }
}

#[test_case("" => (ErrorCode::EmptyAddress, 0); "empty")]
#[test_case("1.2.3" => (ErrorCode::Expected4Octets, 2); "three octets")]
#[test_case("1.2.3.4.5" => (ErrorCode::Expected4Octets, 4); "five octets")]
#[test_case("1.2.3.4." => (ErrorCode::Expected4Octets, 4); "trailing dot")]
#[test_case("1..3.4" => (ErrorCode::EmptyOctet, 1); "empty octet")]
#[test_case(".1.2.3" => (ErrorCode::EmptyOctet, 0); "leading dot")]
#[test_case("192.168.01.1" => (ErrorCode::LeadingZerosAreNotPermitted, 2); "leading zero")]
#[test_case("1.2.3.010" => (ErrorCode::LeadingZerosAreNotPermitted, 3); "leading zero before range check")]
#[test_case("1.2.3.1000" => (ErrorCode::OctetMore3Characters, 3); "long octet")]
#[test_case("1.2.3.a" => (ErrorCode::OctetHasInvalidSymbol, 3); "invalid symbol")]
#[test_case("1.2.3.4/24" => (ErrorCode::OctetHasInvalidSymbol, 3); "slash")]
#[test_case("1.2.3.256" => (ErrorCode::OctetExceeded255, 3); "octet overflow")]
#[test_case("300.2.3.4" => (ErrorCode::OctetExceeded255, 0); "first octet overflow")]
fn should_fail_parse_ipv4(text: &str) -> (ErrorCode, usize) {
    let (address, code) = Ipv4Address::parse_with_code(text);
    assert_eq!(address, Ipv4Address::UNSPECIFIED);

    match Ipv4Address::parse(text) {
        Ok(address) => panic!("Should fail '{text}' but got {address}"),
        Err(Error::Parse { code: error_code, index, address }) => {
            assert_eq!(error_code, code);
            assert_eq!(address, text);
            (error_code, index)
        },
        Err(error) => panic!("Unexpected error={error}"),
    }
}

#[test]
fn should_describe_ipv4_error() {
    let error = Ipv4Address::parse("1.2.3.256").unwrap_err();
    assert_eq!(error.to_string(), "octet 3 of address 1.2.3.256 exceeded 255");
    assert_eq!(error.code(), ErrorCode::OctetExceeded255);

    let error = Ipv4Address::parse("").unwrap_err();
    assert_eq!(error.to_string(), "address cannot be empty");
}

#[test]
fn should_convert_ipv4() {
    let address = Ipv4Address::new(192, 0, 2, 1);
    assert_eq!(address.to_uint(), 0xc0000201);
    assert_eq!(Ipv4Address::from_uint(0xc0000201), address);
    assert_eq!(address.octets(), [192, 0, 2, 1]);
    assert_eq!(Ipv4Address::from_bytes([192, 0, 2, 1]), address);
    let bytes: &[u8] = address.as_ref();
    assert_eq!(bytes, [192, 0, 2, 1]);

    assert_eq!(Ipv4Address::from_uint(0), Ipv4Address::UNSPECIFIED);
    assert_eq!(Ipv4Address::from_uint(u32::MAX), Ipv4Address::BROADCAST);
    assert_eq!(Ipv4Address::BROADCAST.to_uint(), u32::MAX);

    let std_address: net::Ipv4Addr = address.into();
    assert_eq!(std_address, net::Ipv4Addr::new(192, 0, 2, 1));
    assert_eq!(Ipv4Address::from(std_address), address);

    assert!(Ipv4Address::new(10, 0, 0, 1) < Ipv4Address::new(10, 0, 0, 2));
    assert!(Ipv4Address::new(9, 255, 255, 255) < Ipv4Address::new(10, 0, 0, 0));
}

#[test]
fn should_build_ipv4_reverse_pointer() {
    assert_eq!(Ipv4Address::new(127, 0, 0, 1).reverse_pointer(), "1.0.0.127.in-addr.arpa");
    assert_eq!(Ipv4Address::new(192, 0, 2, 10).reverse_pointer(), "10.2.0.192.in-addr.arpa");
}

#[test]
fn should_classify_ipv4() {
    let address = |text: &str| Ipv4Address::parse(text).expect("to parse");

    assert!(address("10.0.0.1").is_private());
    assert!(!address("10.0.0.1").is_global());
    assert!(address("192.168.1.1").is_private());
    assert!(address("172.16.0.1").is_private());
    assert!(!address("172.32.0.1").is_private());
    assert!(address("8.8.8.8").is_global());
    assert!(!address("8.8.8.8").is_private());

    //Shared address space is neither
    assert!(!address("100.64.0.1").is_private());
    assert!(!address("100.64.0.1").is_global());

    //Carve-outs of 192.0.0.0/24
    assert!(address("192.0.0.8").is_private());
    assert!(!address("192.0.0.9").is_private());
    assert!(!address("192.0.0.10").is_private());
    assert!(address("192.0.0.9").is_global());

    assert!(address("224.0.0.1").is_multicast());
    assert!(address("239.255.255.255").is_multicast());
    assert!(!address("240.0.0.1").is_multicast());
    assert!(address("240.0.0.1").is_reserved());
    assert!(!address("239.0.0.1").is_reserved());
    assert!(address("127.0.0.1").is_loopback());
    assert!(address("127.255.255.254").is_loopback());
    assert!(!address("128.0.0.1").is_loopback());
    assert!(address("169.254.1.1").is_link_local());
    assert!(!address("169.255.1.1").is_link_local());
    assert!(address("0.0.0.0").is_unspecified());
    assert!(!address("0.0.0.1").is_unspecified());
}

#[test]
fn should_parse_ipv4_network() {
    let inputs = [
        ("192.0.2.0/24", "192.0.2.0/24", 24),
        ("192.0.2.0/255.255.255.0", "192.0.2.0/24", 24),
        ("192.0.2.0/0.0.0.255", "192.0.2.0/24", 24),
        ("10.0.0.0/8", "10.0.0.0/8", 8),
        ("0.0.0.0/0", "0.0.0.0/0", 0),
        ("0.0.0.0/0.0.0.0", "0.0.0.0/0", 0),
        ("192.0.2.1", "192.0.2.1/32", 32),
        ("192.0.2.1/255.255.255.255", "192.0.2.1/32", 32),
    ];

    for (text, expected, prefixlen) in inputs {
        println!("Parse '{text}'");
        let network = match Ipv4Network::parse(text) {
            Ok(network) => network,
            Err(error) => panic!("Should parse '{text}' but got error={error}"),
        };
        assert_eq!(network.to_string(), expected);
        assert_eq!(network.prefixlen(), prefixlen);
        assert_eq!(text.parse::<Ipv4Network>(), Ok(network));
    }
}

#[test_case("192.0.2.1/24" => ErrorCode::HasHostBitsSet; "host bits")]
#[test_case("192.0.2.0/33" => ErrorCode::InvalidNetmask; "prefix too long")]
#[test_case("192.0.2.0/abc" => ErrorCode::InvalidNetmask; "not a number")]
#[test_case("192.0.2.0/" => ErrorCode::EmptyNetmask; "empty netmask")]
#[test_case("192.0.2.0/24/1" => ErrorCode::OnlyOneSlashPermitted; "two slashes")]
#[test_case("192.0.2.0/255.0.255.0" => ErrorCode::NetmaskPatternMixesZeroesAndOnes; "mixed netmask")]
#[test_case("/24" => ErrorCode::EmptyAddress; "empty address")]
#[test_case("192.0.2/24" => ErrorCode::Expected4Octets; "short address")]
fn should_fail_parse_ipv4_network(text: &str) -> ErrorCode {
    let (network, code) = Ipv4Network::parse_with_code(text, true);
    assert_eq!(network, Ipv4Network::default());
    assert_eq!(network.to_string(), "0.0.0.0/32");

    match Ipv4Network::parse(text) {
        Ok(network) => panic!("Should fail '{text}' but got {network}"),
        Err(error) => {
            assert_eq!(error.code(), code);
            code
        },
    }
}

#[test]
fn should_mask_host_bits_when_not_strict() {
    let network = Ipv4Network::parse_non_strict("192.0.2.1/24").expect("to parse");
    assert_eq!(network.to_string(), "192.0.2.0/24");

    let (network, code) = Ipv4Network::parse_with_code("192.0.2.130/25", false);
    assert_eq!(code, ErrorCode::NoError);
    assert_eq!(network.to_string(), "192.0.2.128/25");

    let address = Ipv4Address::new(192, 0, 2, 1);
    let error = Ipv4Network::from_address(address, 24, true).unwrap_err();
    assert_eq!(error.code(), ErrorCode::HasHostBitsSet);
    assert_eq!(error.to_string(), "has host bits set in address 192.0.2.1/24");

    let network = Ipv4Network::from_address(address, 24, false).expect("to create");
    assert_eq!(network.to_string(), "192.0.2.0/24");

    let (network, code) = Ipv4Network::from_address_with_code(address, 33, false);
    assert_eq!(code, ErrorCode::InvalidNetmask);
    assert_eq!(network, Ipv4Network::default());
}

#[test]
fn should_derive_ipv4_network_addresses() {
    let network = Ipv4Network::parse("192.0.2.0/24").expect("to parse");
    assert_eq!(network.network_address(), Ipv4Address::new(192, 0, 2, 0));
    assert_eq!(network.broadcast_address(), Ipv4Address::new(192, 0, 2, 255));
    assert_eq!(network.netmask(), Ipv4Address::new(255, 255, 255, 0));
    assert_eq!(network.hostmask(), Ipv4Address::new(0, 0, 0, 255));
    assert_eq!(network.addresses_count(), Uint128::from(256u32));
    assert_eq!(network.version(), ip_address::IpVersion::V4);

    let network = Ipv4Network::parse("0.0.0.0/0").expect("to parse");
    assert_eq!(network.broadcast_address(), Ipv4Address::BROADCAST);
    assert_eq!(network.addresses_count(), Uint128::from(1u64 << 32));
}

#[cfg_attr(miri, ignore)]
#[test]
fn should_verify_ipv4_prefix_size() {
    let address = Ipv4Address::UNSPECIFIED;

    for prefixlen in 0..=32 {
        let network = Ipv4Network::from_address(address, prefixlen, true).expect("to create");
        let expected_size = Uint128::from(1u64 << (32 - prefixlen));
        assert_eq!(network.addresses_count(), expected_size, "/{} has invalid size", prefixlen);
        assert_eq!(network.addresses().size(), expected_size, "/{} has invalid range size", prefixlen);
        assert_eq!(network.netmask().to_uint() & network.broadcast_address().to_uint(), 0);
    }

    let network = Ipv4Network::parse("0.0.0.0/0").expect("to parse");
    let addresses = network.addresses();
    assert_eq!(addresses.get(Uint128::from(u32::MAX)), Some(Ipv4Address::BROADCAST));
    assert_eq!(addresses.get(Uint128::from(1u64 << 32)), None);
    assert_eq!(addresses.back(), Some(Ipv4Address::BROADCAST));

    let hosts = network.hosts();
    assert_eq!(hosts.size(), Uint128::from(u32::MAX - 1));
    assert_eq!(hosts.front(), Some(Ipv4Address::new(0, 0, 0, 1)));
    assert_eq!(hosts.back(), Some(Ipv4Address::new(255, 255, 255, 254)));
}

#[test]
fn should_check_ipv4_network_relations() {
    let network = |text: &str| Ipv4Network::parse(text).expect("to parse");

    let block = network("192.0.2.0/24");
    assert!(block.contains(&Ipv4Address::new(192, 0, 2, 0)));
    assert!(block.contains(&Ipv4Address::new(192, 0, 2, 255)));
    assert!(!block.contains(&Ipv4Address::new(192, 0, 3, 0)));
    assert!(!block.contains(&Ipv4Address::new(192, 0, 1, 255)));

    assert!(network("1.2.3.0/24").overlaps(&network("1.2.3.0/30")));
    assert!(network("1.2.3.0/30").overlaps(&network("1.2.3.0/24")));
    assert!(!network("1.2.3.0/24").overlaps(&network("1.2.4.0/24")));

    assert!(network("10.1.0.0/16").subnet_of(&network("10.0.0.0/8")));
    assert!(!network("10.0.0.0/8").subnet_of(&network("10.1.0.0/16")));
    assert!(network("10.0.0.0/8").supernet_of(&network("10.1.0.0/16")));
    assert!(network("10.0.0.0/8").subnet_of(&network("10.0.0.0/8")));
    assert!(!network("11.0.0.0/8").subnet_of(&network("10.0.0.0/8")));

    assert!(network("10.0.0.0/8") < network("10.0.0.0/16"));
    assert!(network("10.0.0.0/16") < network("10.1.0.0/16"));
}

#[test]
fn should_enumerate_ipv4_hosts() {
    let network = Ipv4Network::parse("192.0.2.0/24").expect("to parse");
    let hosts = network.hosts().collect::<Vec<_>>();
    assert_eq!(hosts.len(), 254);
    assert_eq!(hosts[0], Ipv4Address::new(192, 0, 2, 1));
    assert_eq!(hosts[253], Ipv4Address::new(192, 0, 2, 254));
    assert_eq!(network.hosts().size(), Uint128::from(254u32));
    assert_eq!(network.hosts().size_hint(), (254, Some(254)));

    let network = Ipv4Network::parse("192.0.2.0/30").expect("to parse");
    let hosts = network.hosts().collect::<Vec<_>>();
    assert_eq!(hosts, [Ipv4Address::new(192, 0, 2, 1), Ipv4Address::new(192, 0, 2, 2)]);
    let hosts = network.hosts().rev().collect::<Vec<_>>();
    assert_eq!(hosts, [Ipv4Address::new(192, 0, 2, 2), Ipv4Address::new(192, 0, 2, 1)]);

    let network = Ipv4Network::parse("192.0.2.0/31").expect("to parse");
    let hosts = network.hosts().collect::<Vec<_>>();
    assert_eq!(hosts, [Ipv4Address::new(192, 0, 2, 0), Ipv4Address::new(192, 0, 2, 1)]);

    let network = Ipv4Network::parse("192.0.2.7/32").expect("to parse");
    let hosts = network.hosts().collect::<Vec<_>>();
    assert_eq!(hosts, [Ipv4Address::new(192, 0, 2, 7)]);

    let network = Ipv4Network::parse("255.255.255.252/30").expect("to parse");
    let hosts = network.hosts().collect::<Vec<_>>();
    assert_eq!(hosts, [Ipv4Address::new(255, 255, 255, 253), Ipv4Address::new(255, 255, 255, 254)]);

    let network = Ipv4Network::parse("255.255.255.0/24").expect("to parse");
    let mut addresses = network.addresses();
    assert_eq!(addresses.nth(255), Some(Ipv4Address::BROADCAST));
    assert_eq!(addresses.next(), None);
    assert_eq!(addresses.next_back(), None);

    let mut addresses = network.addresses();
    assert_eq!(addresses.nth(256), None);
    assert!(addresses.is_empty());
}

#[test]
fn should_compute_ipv4_supernet() {
    let network = Ipv4Network::parse("192.168.1.0/24").expect("to parse");
    assert_eq!(network.supernet(1, None).expect("supernet").to_string(), "192.168.0.0/23");
    assert_eq!(network.supernet(2, None).expect("supernet").to_string(), "192.168.0.0/22");
    assert_eq!(network.supernet(1, Some(20)).expect("supernet").to_string(), "192.168.0.0/20");
    assert_eq!(network.supernet(24, None).expect("supernet").to_string(), "0.0.0.0/0");

    assert_eq!(network.supernet(1, Some(25)).unwrap_err().code(), ErrorCode::NewPrefixMustBeShorter);
    assert_eq!(network.supernet(2, Some(20)).unwrap_err().code(), ErrorCode::CannotSetPrefixlenDiffAndNewPrefix);
    assert_eq!(network.supernet(25, None).unwrap_err().code(), ErrorCode::InvalidPrefixlenDiff);
    assert_eq!(network.supernet(25, None).unwrap_err().to_string(), "invalid prefixlen_diff");

    let (supernet, code) = network.supernet_with_code(25, None);
    assert_eq!(code, ErrorCode::InvalidPrefixlenDiff);
    assert_eq!(supernet, Ipv4Network::default());

    let network = Ipv4Network::parse("0.0.0.0/0").expect("to parse");
    assert_eq!(network.supernet(1, None), Ok(network));
}

#[test]
fn should_compute_ipv4_subnets() {
    let network = Ipv4Network::parse("192.0.2.0/24").expect("to parse");

    let subnets = network.subnets(1, None).expect("subnets");
    assert_eq!(subnets.size(), Uint128::from(2u32));
    assert_eq!(subnets.prefixlen(), 25);
    let subnets = subnets.map(|subnet| subnet.to_string()).collect::<Vec<_>>();
    assert_eq!(subnets, ["192.0.2.0/25", "192.0.2.128/25"]);

    let subnets = network.subnets(1, Some(26)).expect("subnets");
    assert_eq!(subnets.size(), Uint128::from(4u32));
    assert_eq!(subnets.get(Uint128::from(3u32)).map(|subnet| subnet.to_string()).as_deref(), Some("192.0.2.192/26"));
    assert_eq!(subnets.get(Uint128::from(4u32)), None);
    assert_eq!(subnets.back().map(|subnet| subnet.to_string()).as_deref(), Some("192.0.2.192/26"));
    let subnets = subnets.rev().map(|subnet| subnet.to_string()).collect::<Vec<_>>();
    assert_eq!(subnets, ["192.0.2.192/26", "192.0.2.128/26", "192.0.2.64/26", "192.0.2.0/26"]);

    let subnets = network.subnets(8, None).expect("subnets");
    assert_eq!(subnets.count(), 256);

    assert_eq!(network.subnets(1, Some(23)).unwrap_err().code(), ErrorCode::NewPrefixMustBeLonger);
    assert_eq!(network.subnets(2, Some(26)).unwrap_err().code(), ErrorCode::CannotSetPrefixlenDiffAndNewPrefix);
    assert_eq!(network.subnets(9, None).unwrap_err().code(), ErrorCode::InvalidPrefixlenDiff);

    let (mut subnets, code) = network.subnets_with_code(9, None);
    assert_eq!(code, ErrorCode::InvalidPrefixlenDiff);
    assert_eq!(subnets.next(), None);

    let network = Ipv4Network::parse("192.0.2.1/32").expect("to parse");
    let subnets = network.subnets(1, None).expect("subnets").collect::<Vec<_>>();
    assert_eq!(subnets, [network]);
}

#[cfg_attr(miri, ignore)]
#[test]
fn should_split_whole_ipv4_space() {
    let network = Ipv4Network::parse("0.0.0.0/0").expect("to parse");

    let subnets = network.subnets(1, None).expect("subnets").map(|subnet| subnet.to_string()).collect::<Vec<_>>();
    assert_eq!(subnets, ["0.0.0.0/1", "128.0.0.0/1"]);

    let subnets = network.subnets(32, None).expect("subnets");
    assert_eq!(subnets.size(), Uint128::from(1u64 << 32));
    assert_eq!(subnets.back().map(|subnet| subnet.to_string()).as_deref(), Some("255.255.255.255/32"));
    assert_eq!(subnets.get(Uint128::from(u32::MAX)).map(|subnet| subnet.to_string()).as_deref(), Some("255.255.255.255/32"));
}

#[test]
fn should_exclude_ipv4_network() {
    let network = Ipv4Network::parse("192.0.2.0/28").expect("to parse");
    let other = Ipv4Network::parse("192.0.2.1/32").expect("to parse");

    let excluded = network.address_exclude(&other).expect("exclude").collect::<Vec<_>>();
    let texts = excluded.iter().map(|network| network.to_string()).collect::<Vec<_>>();
    assert_eq!(texts, ["192.0.2.8/29", "192.0.2.4/30", "192.0.2.2/31", "192.0.2.0/32"]);

    let total = excluded.iter().fold(Uint128::ZERO, |total, network| total + network.addresses_count());
    assert_eq!(total, network.addresses_count() - other.addresses_count());
    assert!(excluded.iter().all(|network| !network.overlaps(&other)));

    let other = Ipv4Network::parse("192.0.2.8/29").expect("to parse");
    let texts = network.address_exclude(&other).expect("exclude").map(|network| network.to_string()).collect::<Vec<_>>();
    assert_eq!(texts, ["192.0.2.0/29"]);

    assert_eq!(network.address_exclude(&network).expect("exclude").count(), 0);

    let other = Ipv4Network::parse("192.0.3.0/32").expect("to parse");
    let error = network.address_exclude(&other).unwrap_err();
    assert_eq!(error.code(), ErrorCode::NotContainedNetwork);
    assert_eq!(error.to_string(), "network is not a subnet of other");

    let (mut exclude, code) = network.address_exclude_with_code(&other);
    assert_eq!(code, ErrorCode::NotContainedNetwork);
    assert_eq!(exclude.next(), None);
}

#[test]
fn should_classify_ipv4_network() {
    let network = |text: &str| Ipv4Network::parse(text).expect("to parse");

    assert!(network("192.168.0.0/16").is_private());
    assert!(!network("192.168.0.0/15").is_private());
    assert!(network("10.1.0.0/16").is_private());
    assert!(!network("10.1.0.0/16").is_global());
    assert!(network("8.8.0.0/16").is_global());
    assert!(network("224.0.0.0/4").is_multicast());
    assert!(!network("224.0.0.0/3").is_multicast());
    assert!(network("127.0.0.0/8").is_loopback());
    assert!(network("169.254.0.0/24").is_link_local());
    assert!(network("240.0.0.0/8").is_reserved());
    assert!(network("0.0.0.0/32").is_unspecified());
    assert!(!network("0.0.0.0/31").is_unspecified());
}
