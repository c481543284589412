//! Error codes and error type

use core::fmt;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
///Stable error code shared by every fallible operation
pub enum ErrorCode {
    #[default]
    ///Operation succeeded
    NoError = 0,

    ///Input text is empty
    EmptyAddress = 1,
    ///`/` is present but nothing follows it
    EmptyNetmask = 2,
    ///Netmask is neither a valid prefix length nor a valid mask
    InvalidNetmask = 3,
    ///Netmask is neither a contiguous netmask nor a contiguous hostmask
    NetmaskPatternMixesZeroesAndOnes = 4,
    ///Address has bits set outside of the network mask
    HasHostBitsSet = 5,
    ///More than one `/` in network text
    OnlyOneSlashPermitted = 6,

    ///Octet contains no digits
    EmptyOctet = 10,
    ///Address does not consist of exactly 4 octets
    Expected4Octets = 11,
    ///Multi-digit octet starts with `0`
    LeadingZerosAreNotPermitted = 12,
    ///Octet has more than 3 digits
    OctetMore3Characters = 13,
    ///Octet contains a character other than a decimal digit
    OctetHasInvalidSymbol = 14,
    ///Octet value is above 255
    OctetExceeded255 = 15,

    ///Fewer than 3 parts
    Least3Parts = 20,
    ///More than 8 colons
    Most8ColonsPermitted = 21,
    ///Part has more than 4 characters
    PartIsMore4Chars = 22,
    ///Part contains a character other than a hex digit
    PartHasInvalidSymbol = 23,
    ///More than one `::`
    MostOneDoubleColonPermitted = 24,
    ///Address starts with a lone `:`
    LeadingColonOnlyPermittedAsPartOfDoubleColon = 25,
    ///Address ends with a lone `:`
    TrailingColonOnlyPermittedAsPartOfDoubleColon = 26,
    ///Too many explicit parts alongside `::`
    ExpectedAtMost7OtherPartsWithDoubleColon = 27,
    ///Number of parts is not 8 and there is no `::`
    Exactly8PartsExpectedWithoutDoubleColon = 28,
    ///Scope id is longer than allowed
    ScopeIdIsTooLong = 29,
    ///Scope id is empty or contains forbidden characters
    InvalidScopeId = 30,

    ///Operands have different IP versions
    InvalidVersion = 40,
    ///Prefix length difference is out of range
    InvalidPrefixlenDiff = 41,
    ///Requested supernet prefix is longer than current
    NewPrefixMustBeShorter = 42,
    ///Requested subnet prefix is shorter than current
    NewPrefixMustBeLonger = 43,
    ///Both prefix length difference and new prefix are specified
    CannotSetPrefixlenDiffAndNewPrefix = 44,
    ///Excluded network is not contained within the network
    NotContainedNetwork = 45,
    ///Range end precedes its start
    LastAddressMustBeGreaterThanFirst = 46,
}

impl ErrorCode {
    #[inline(always)]
    ///Returns whether code indicates success
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::NoError)
    }

    #[inline]
    ///Returns whether code belongs to network algebra rather than text parsing
    pub const fn is_logic(self) -> bool {
        (self as u8) >= (Self::InvalidVersion as u8)
    }
}

//Message of a code within the context of particular input
struct Describe<'a> {
    code: ErrorCode,
    index: usize,
    address: &'a str,
}

#[inline(always)]
fn describe<'a>(code: &ErrorCode, index: &usize, address: &'a str) -> Describe<'a> {
    Describe {
        code: *code,
        index: *index,
        address,
    }
}

impl fmt::Display for Describe<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { code, index, address } = self;
        match code {
            ErrorCode::NoError => fmt.write_str("no error"),
            ErrorCode::EmptyAddress => fmt.write_str("address cannot be empty"),
            ErrorCode::EmptyNetmask => fmt.write_fmt(format_args!("empty mask in address {address}")),
            ErrorCode::InvalidNetmask => fmt.write_fmt(format_args!("is not a valid netmask in address {address}")),
            ErrorCode::NetmaskPatternMixesZeroesAndOnes => fmt.write_fmt(format_args!("netmask pattern mixes zeroes & ones in address {address}")),
            ErrorCode::HasHostBitsSet => fmt.write_fmt(format_args!("has host bits set in address {address}")),
            ErrorCode::OnlyOneSlashPermitted => fmt.write_fmt(format_args!("only one '/' permitted in address {address}")),
            ErrorCode::EmptyOctet => fmt.write_fmt(format_args!("empty octet {index} in address {address}")),
            ErrorCode::Expected4Octets => fmt.write_fmt(format_args!("expected 4 octets in {address}")),
            ErrorCode::LeadingZerosAreNotPermitted => fmt.write_fmt(format_args!("leading zeros are not permitted in octet {index} of address {address}")),
            ErrorCode::OctetMore3Characters => fmt.write_fmt(format_args!("in octet {index} of address {address} more 3 characters")),
            ErrorCode::OctetHasInvalidSymbol => fmt.write_fmt(format_args!("in octet {index} of address {address} has invalid symbol")),
            ErrorCode::OctetExceeded255 => fmt.write_fmt(format_args!("octet {index} of address {address} exceeded 255")),
            ErrorCode::Least3Parts => fmt.write_fmt(format_args!("least 3 parts in address {address}")),
            ErrorCode::Most8ColonsPermitted => fmt.write_fmt(format_args!("most 8 colons permitted in address {address}")),
            ErrorCode::PartIsMore4Chars => fmt.write_fmt(format_args!("in part {index} of address {address} more 4 characters")),
            ErrorCode::PartHasInvalidSymbol => fmt.write_fmt(format_args!("in part {index} of address {address} has invalid symbols")),
            ErrorCode::MostOneDoubleColonPermitted => fmt.write_fmt(format_args!("at most one '::' permitted in address {address}")),
            ErrorCode::LeadingColonOnlyPermittedAsPartOfDoubleColon => fmt.write_fmt(format_args!("at leading ':' only permitted as part of '::' in address {address}")),
            ErrorCode::TrailingColonOnlyPermittedAsPartOfDoubleColon => fmt.write_fmt(format_args!("at trailing ':' only permitted as part of '::' in address {address}")),
            ErrorCode::ExpectedAtMost7OtherPartsWithDoubleColon => fmt.write_fmt(format_args!("expected at most 7 other parts with '::' in address {address}")),
            ErrorCode::Exactly8PartsExpectedWithoutDoubleColon => fmt.write_fmt(format_args!("exactly 8 parts expected without '::' in address {address}")),
            ErrorCode::ScopeIdIsTooLong => fmt.write_fmt(format_args!("scope id is too long in address {address}")),
            ErrorCode::InvalidScopeId => fmt.write_fmt(format_args!("invalid scope id in address {address}")),
            ErrorCode::InvalidVersion => fmt.write_str("versions don't match"),
            ErrorCode::InvalidPrefixlenDiff => fmt.write_str("invalid prefixlen_diff"),
            ErrorCode::NewPrefixMustBeShorter => fmt.write_str("new prefix must be shorter"),
            ErrorCode::NewPrefixMustBeLonger => fmt.write_str("new prefix must be longer"),
            ErrorCode::CannotSetPrefixlenDiffAndNewPrefix => fmt.write_str("cannot set prefixlen_diff and new_prefix"),
            ErrorCode::NotContainedNetwork => fmt.write_str("network is not a subnet of other"),
            ErrorCode::LastAddressMustBeGreaterThanFirst => fmt.write_str("last IP address must be greater than first"),
        }
    }
}

impl fmt::Display for ErrorCode {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&describe(self, &0, ""), fmt)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
///Failure of parsing or of network algebra
pub enum Error {
    ///Text could not be parsed
    #[error("{}", describe(.code, .index, .address))]
    Parse {
        ///Failure code
        code: ErrorCode,
        ///Octet or part index where failure was detected
        index: usize,
        ///Text that failed to parse
        address: String,
    },
    ///Operation on parsed values is not valid
    #[error("{}", describe(.code, &0, ""))]
    Logic {
        ///Failure code
        code: ErrorCode,
    },
}

impl Error {
    #[inline]
    pub(crate) fn parse((code, index): Failure, address: &str) -> Self {
        debug_assert!(!code.is_ok() && !code.is_logic());
        Self::Parse {
            code,
            index,
            address: address.to_owned(),
        }
    }

    #[inline(always)]
    pub(crate) const fn logic(code: ErrorCode) -> Self {
        debug_assert!(code.is_logic());
        Self::Logic {
            code,
        }
    }

    #[inline]
    ///Returns failure code
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Parse { code, .. } => *code,
            Self::Logic { code } => *code,
        }
    }
}

///Result of a fallible operation
pub type Result<T> = core::result::Result<T, Error>;

///Code and octet/part index produced by the parsing routines
pub(crate) type Failure = (ErrorCode, usize);

#[inline]
///Converts result into error code form, replacing failure with default value
pub(crate) fn with_code<T: Default>(result: Result<T>) -> (T, ErrorCode) {
    match result {
        Ok(value) => (value, ErrorCode::NoError),
        Err(error) => (T::default(), error.code()),
    }
}
