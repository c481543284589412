use core::net;

use ip_address::{summarize_address_range, ErrorCode, Format, IpAddress, IpNetwork, IpVersion, Ipv4Address, Ipv4Network, Ipv6Address, Uint128};

#[test]
fn should_parse_ip_address() {
    let inputs = [
        ("127.0.0.1", IpVersion::V4, "127.0.0.1"),
        ("0.0.0.0", IpVersion::V4, "0.0.0.0"),
        ("::1", IpVersion::V6, "::1"),
        ("2001:0db8::0001", IpVersion::V6, "2001:db8::1"),
        ("::ffff:192.0.2.1", IpVersion::V6, "::ffff:c000:201"),
        ("fe80::1%eth0", IpVersion::V6, "fe80::1%eth0"),
    ];

    for (text, version, expected) in inputs {
        println!("Parse '{text}'");
        let address = match IpAddress::parse(text) {
            Ok(address) => address,
            Err(error) => panic!("Should parse '{text}' but got error={error}"),
        };
        assert_eq!(address.version(), version);
        assert_eq!(address.to_string(), expected);
        assert_eq!(text.parse::<IpAddress>(), Ok(address));
    }
}

#[test]
fn should_report_ipv6_error_for_ip_address() {
    //Neither IPv4 nor IPv6, error comes from IPv6 parser
    let error = IpAddress::parse("127").unwrap_err();
    assert_eq!(error.code(), ErrorCode::Least3Parts);
    assert_eq!(error.to_string(), "least 3 parts in address 127");

    let error = IpAddress::parse("1.2.3.4%scope").unwrap_err();
    assert_eq!(error.code(), ErrorCode::Least3Parts);

    let error = IpAddress::parse("1.2.3.256").unwrap_err();
    assert_eq!(error.code(), ErrorCode::OctetExceeded255);

    let error = IpAddress::parse("").unwrap_err();
    assert_eq!(error.code(), ErrorCode::EmptyAddress);

    let (address, code) = IpAddress::parse_with_code("1::2::3");
    assert_eq!(code, ErrorCode::MostOneDoubleColonPermitted);
    assert_eq!(address, IpAddress::default());
    assert_eq!(address.to_string(), "0.0.0.0");
}

#[test]
fn should_dispatch_ip_address() {
    let v4 = IpAddress::parse("127.0.0.1").expect("to parse");
    let v6 = IpAddress::parse("2001:db8::1%1").expect("to parse");

    assert!(v4.is_v4());
    assert!(v6.is_v6());
    assert_eq!(v4.v4(), Some(&Ipv4Address::new(127, 0, 0, 1)));
    assert_eq!(v4.v6(), None);
    assert_eq!(v4.reverse_pointer(), "1.0.0.127.in-addr.arpa");
    assert_eq!(v4.to_uint(), Uint128::from(0x7f000001u32));
    assert_eq!(v4.octets(), [127, 0, 0, 1]);
    assert_eq!(v4.format(Format::Full), "127.0.0.1");
    assert_eq!(v4.scope_id(), None);
    assert!(v4.is_loopback());
    assert!(v4.is_private());
    assert!(!v4.is_site_local());

    assert_eq!(v6.format(Format::Full), "2001:0db8:0000:0000:0000:0000:0000:0001%1");
    assert_eq!(v6.scope_id().and_then(|scope_id| scope_id.as_u32()), Some(1));
    assert_eq!(v6.octets().len(), 16);
    assert_eq!(v6.to_uint(), Uint128::new(0x20010db800000000, 1));
    assert!(v6.is_private());
    assert!(!v6.is_global());

    let mapped = IpAddress::parse("::ffff:192.0.2.1").expect("to parse");
    assert_eq!(mapped.ipv4_mapped(), Some(Ipv4Address::new(192, 0, 2, 1)));
    assert_eq!(v4.ipv4_mapped(), None);
    assert_eq!(IpAddress::parse("2002:c000:201::").expect("to parse").sixtofour(), Some(Ipv4Address::new(192, 0, 2, 1)));
    assert_eq!(v4.teredo(), None);

    //Versions never compare equal and IPv4 goes first
    let zero_v4 = IpAddress::parse("0.0.0.0").expect("to parse");
    let zero_v6 = IpAddress::parse("::").expect("to parse");
    assert_ne!(zero_v4, zero_v6);
    assert!(zero_v4 < zero_v6);
    assert!(IpAddress::parse("255.255.255.255").expect("to parse") < zero_v6);
}

#[test]
fn should_convert_ip_address() {
    let address: IpAddress = net::IpAddr::V4(net::Ipv4Addr::new(10, 0, 0, 1)).into();
    assert_eq!(address, IpAddress::V4(Ipv4Address::new(10, 0, 0, 1)));
    assert_eq!(net::IpAddr::from(address), net::IpAddr::V4(net::Ipv4Addr::new(10, 0, 0, 1)));

    let address: IpAddress = net::IpAddr::V6(net::Ipv6Addr::LOCALHOST).into();
    assert_eq!(address, IpAddress::V6(Ipv6Address::LOOPBACK));
    assert_eq!(net::IpAddr::from(address), net::IpAddr::V6(net::Ipv6Addr::LOCALHOST));

    assert_eq!(IpAddress::from(Ipv4Address::BROADCAST).to_string(), "255.255.255.255");
}

#[test]
fn should_parse_ip_network() {
    let inputs = [
        ("192.0.2.0/24", IpVersion::V4, "192.0.2.0/24"),
        ("192.0.2.0/255.255.255.0", IpVersion::V4, "192.0.2.0/24"),
        ("10.0.0.1", IpVersion::V4, "10.0.0.1/32"),
        ("2001:db8::/32", IpVersion::V6, "2001:db8::/32"),
        ("::1", IpVersion::V6, "::1/128"),
    ];

    for (text, version, expected) in inputs {
        println!("Parse '{text}'");
        let network = match IpNetwork::parse(text) {
            Ok(network) => network,
            Err(error) => panic!("Should parse '{text}' but got error={error}"),
        };
        assert_eq!(network.version(), version);
        assert_eq!(network.to_string(), expected);
        assert_eq!(text.parse::<IpNetwork>(), Ok(network));
    }

    let error = IpNetwork::parse("192.0.2.1/24").unwrap_err();
    assert_eq!(error.code(), ErrorCode::Least3Parts);
    let network = IpNetwork::parse_non_strict("192.0.2.1/24").expect("to parse");
    assert_eq!(network.to_string(), "192.0.2.0/24");

    //IPv4-shaped text that is not valid IPv4 reports error of IPv6 parser
    assert_eq!(Ipv4Network::parse("1.2.3.0/33").unwrap_err().code(), ErrorCode::InvalidNetmask);
    let error = IpNetwork::parse("1.2.3.0/33").unwrap_err();
    assert_eq!(error.code(), ErrorCode::Least3Parts);
    assert_eq!(error.to_string(), "least 3 parts in address 1.2.3.0/33");

    let (network, code) = IpNetwork::parse_with_code("2001:db8::1/32", true);
    assert_eq!(code, ErrorCode::HasHostBitsSet);
    assert_eq!(network, IpNetwork::default());
    assert_eq!(network.to_string(), "0.0.0.0/32");

    let (network, code) = IpNetwork::parse_with_code("2001:db8::1/32", false);
    assert_eq!(code, ErrorCode::NoError);
    assert_eq!(network.to_string(), "2001:db8::/32");
}

#[test]
fn should_create_ip_network_from_address() {
    let address = IpAddress::parse("2001:db8::1").expect("to parse");
    let network = IpNetwork::from_address(address, 64, false).expect("to create");
    assert_eq!(network.to_string(), "2001:db8::/64");

    let error = IpNetwork::from_address(address, 64, true).unwrap_err();
    assert_eq!(error.code(), ErrorCode::HasHostBitsSet);

    let (network, code) = IpNetwork::from_address_with_code(IpAddress::parse("10.0.0.0").expect("to parse"), 33, true);
    assert_eq!(code, ErrorCode::InvalidNetmask);
    assert_eq!(network, IpNetwork::default());
}

#[test]
fn should_dispatch_ip_network() {
    let v4 = IpNetwork::parse("192.0.2.0/24").expect("to parse");
    let v6 = IpNetwork::parse("2001:db8::/32").expect("to parse");

    assert_eq!(v4.network_address().to_string(), "192.0.2.0");
    assert_eq!(v4.broadcast_address().to_string(), "192.0.2.255");
    assert_eq!(v4.netmask().to_string(), "255.255.255.0");
    assert_eq!(v4.hostmask().to_string(), "0.0.0.255");
    assert_eq!(v4.prefixlen(), 24);
    assert_eq!(v4.addresses_count(), Uint128::from(256u32));
    assert!(v4.v4().is_some());
    assert!(v4.v6().is_none());

    assert_eq!(v6.broadcast_address().to_string(), "2001:db8:ffff:ffff:ffff:ffff:ffff:ffff");
    assert_eq!(v6.netmask().to_string(), "ffff:ffff::");
    assert_eq!(v6.addresses_count(), Uint128::ONE.shl(96));
    assert!(v6.is_private());
    assert!(!v6.is_site_local());

    assert!(v4.contains(&IpAddress::parse("192.0.2.200").expect("to parse")));
    assert!(!v4.contains(&IpAddress::parse("::ffff:192.0.2.200").expect("to parse")));
    assert!(v6.contains(&IpAddress::parse("2001:db8::1").expect("to parse")));
    assert!(!v6.contains(&IpAddress::parse("192.0.2.200").expect("to parse")));

    let small = IpNetwork::parse("1.2.3.0/30").expect("to parse");
    assert!(IpNetwork::parse("1.2.3.0/24").expect("to parse").overlaps(&small));
    assert!(small.subnet_of(&IpNetwork::parse("1.2.0.0/16").expect("to parse")));
    assert!(IpNetwork::parse("1.2.0.0/16").expect("to parse").supernet_of(&small));
    assert!(!v4.overlaps(&v6));
    assert!(!v4.subnet_of(&v6));
    assert!(!v6.supernet_of(&v4));

    assert!(v4 < v6);

    let scoped = IpNetwork::parse("fe80::%eth0/64").expect("to parse");
    assert_eq!(scoped.without_scope().to_string(), "fe80::/64");
    assert!(scoped.is_link_local());
}

#[test]
fn should_compute_ip_network_algebra() {
    let network = IpNetwork::parse("192.168.1.0/24").expect("to parse");
    assert_eq!(network.supernet(2, None).expect("supernet").to_string(), "192.168.0.0/22");

    let (supernet, code) = network.supernet_with_code(1, Some(25));
    assert_eq!(code, ErrorCode::NewPrefixMustBeShorter);
    assert_eq!(supernet, IpNetwork::default());

    let subnets = network.subnets(2, None).expect("subnets");
    assert_eq!(subnets.size(), Uint128::from(4u32));
    assert_eq!(subnets.get(Uint128::ONE).map(|subnet| subnet.to_string()).as_deref(), Some("192.168.1.64/26"));
    let subnets = subnets.map(|subnet| subnet.to_string()).collect::<Vec<_>>();
    assert_eq!(subnets, ["192.168.1.0/26", "192.168.1.64/26", "192.168.1.128/26", "192.168.1.192/26"]);

    let (mut subnets, code) = network.subnets_with_code(1, Some(23));
    assert_eq!(code, ErrorCode::NewPrefixMustBeLonger);
    assert_eq!(subnets.next(), None);

    let network = IpNetwork::parse("2001:db8::/126").expect("to parse");
    let hosts = network.hosts().map(|host| host.to_string()).collect::<Vec<_>>();
    assert_eq!(hosts, ["2001:db8::1", "2001:db8::2", "2001:db8::3"]);
    let addresses = network.addresses();
    assert_eq!(addresses.size(), Uint128::from(4u32));
    assert_eq!(addresses.get(Uint128::from(3u32)).map(|address| address.to_string()).as_deref(), Some("2001:db8::3"));
    assert_eq!(network.addresses().next_back().map(|address| address.to_string()).as_deref(), Some("2001:db8::3"));

    let network = IpNetwork::parse("192.0.2.0/24").expect("to parse");
    assert_eq!(network.hosts().count(), 254);
    assert_eq!(network.hosts().next().map(|host| host.to_string()).as_deref(), Some("192.0.2.1"));
    assert_eq!(network.hosts().next_back().map(|host| host.to_string()).as_deref(), Some("192.0.2.254"));
}

#[test]
fn should_iterate_ipv6_network_as_ip_network() {
    let network = IpNetwork::parse("2001:db8::/32").expect("to parse");

    let mut subnets = network.subnets(2, None).expect("subnets");
    let last: Option<IpNetwork> = subnets.next_back();
    assert_eq!(last.map(|subnet| subnet.to_string()).as_deref(), Some("2001:db8:c000::/34"));
    let subnets: Vec<IpNetwork> = subnets.collect();
    assert!(subnets.iter().all(IpNetwork::is_v6));
    let subnets = subnets.iter().map(IpNetwork::to_string).collect::<Vec<_>>();
    assert_eq!(subnets, ["2001:db8::/34", "2001:db8:4000::/34", "2001:db8:8000::/34"]);

    let mut hosts = IpNetwork::parse("2001:db8::/126").expect("to parse").hosts();
    let first: Option<IpAddress> = hosts.next();
    assert_eq!(first, Some(IpAddress::V6(Ipv6Address::parse("2001:db8::1").expect("to parse"))));
    assert_eq!(hosts.next_back().map(|host| host.to_string()).as_deref(), Some("2001:db8::3"));
    assert_eq!(hosts.size_hint(), (1, Some(1)));

    let whole = IpNetwork::parse("::/0").expect("to parse");
    assert_eq!(whole.hosts().size(), Uint128::MAX);

    let other = IpNetwork::parse("2001:db8::1/128").expect("to parse");
    let excluded: Vec<IpNetwork> = IpNetwork::parse("2001:db8::/126").expect("to parse").address_exclude(&other).expect("exclude").collect();
    let excluded = excluded.iter().map(IpNetwork::to_string).collect::<Vec<_>>();
    assert_eq!(excluded, ["2001:db8::2/127", "2001:db8::/128"]);
}

#[test]
fn should_exclude_ip_network() {
    let network = IpNetwork::parse("192.0.2.0/28").expect("to parse");
    let other = IpNetwork::parse("192.0.2.1/32").expect("to parse");

    let excluded = network.address_exclude(&other).expect("exclude").map(|network| network.to_string()).collect::<Vec<_>>();
    assert_eq!(excluded, ["192.0.2.8/29", "192.0.2.4/30", "192.0.2.2/31", "192.0.2.0/32"]);

    let v6 = IpNetwork::parse("2001:db8::/32").expect("to parse");
    let error = network.address_exclude(&v6).unwrap_err();
    assert_eq!(error.code(), ErrorCode::InvalidVersion);
    assert_eq!(error.to_string(), "versions don't match");
    assert!(error.code().is_logic());
    assert!(!ErrorCode::HasHostBitsSet.is_logic());
    assert!(!ErrorCode::NoError.is_logic());

    let (mut excluded, code) = network.address_exclude_with_code(&v6);
    assert_eq!(code, ErrorCode::InvalidVersion);
    assert_eq!(excluded.next(), None);

    let (_, code) = other.address_exclude_with_code(&network);
    assert_eq!(code, ErrorCode::NotContainedNetwork);
}

#[test]
fn should_summarize_address_range() {
    let address = |text: &str| IpAddress::parse(text).expect("to parse");

    let summary = summarize_address_range(&address("192.0.2.0"), &address("192.0.2.130")).expect("summarize");
    let summary = summary.map(|network| network.to_string()).collect::<Vec<_>>();
    assert_eq!(summary, ["192.0.2.0/25", "192.0.2.128/31", "192.0.2.130/32"]);

    let summary = summarize_address_range(&address("192.0.2.1"), &address("192.0.2.6")).expect("summarize");
    let summary = summary.map(|network| network.to_string()).collect::<Vec<_>>();
    assert_eq!(summary, ["192.0.2.1/32", "192.0.2.2/31", "192.0.2.4/31", "192.0.2.6/32"]);

    let summary = summarize_address_range(&address("0.0.0.0"), &address("255.255.255.255")).expect("summarize");
    let summary = summary.map(|network| network.to_string()).collect::<Vec<_>>();
    assert_eq!(summary, ["0.0.0.0/0"]);

    let summary = summarize_address_range(&address("::"), &address("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff")).expect("summarize");
    let summary = summary.map(|network| network.to_string()).collect::<Vec<_>>();
    assert_eq!(summary, ["::/0"]);

    let summary = summarize_address_range(&address("2001:db8::1"), &address("2001:db8::1")).expect("summarize");
    let summary = summary.map(|network| network.to_string()).collect::<Vec<_>>();
    assert_eq!(summary, ["2001:db8::1/128"]);

    let error = summarize_address_range(&address("192.0.2.2"), &address("192.0.2.1")).unwrap_err();
    assert_eq!(error.code(), ErrorCode::LastAddressMustBeGreaterThanFirst);
    assert_eq!(error.to_string(), "last IP address must be greater than first");

    let error = summarize_address_range(&address("192.0.2.1"), &address("::1")).unwrap_err();
    assert_eq!(error.code(), ErrorCode::InvalidVersion);
}
