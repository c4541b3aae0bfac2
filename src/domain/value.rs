use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Cubacel account identifier sent to `GetSessionTicket`.
///
/// Invariant: non-empty after trimming.
pub struct AccountId(String);

impl AccountId {
    /// Element name used on the wire (`AccountId`).
    pub const FIELD: &'static str = "AccountId";

    /// Create a validated [`AccountId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated account id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Element name used on the wire (`Password`).
    pub const FIELD: &'static str = "Password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Opaque session ticket obtained from `GetSessionTicket` and reused for
/// every subsequent call. The provider never tells the client when a ticket
/// expires; a stale ticket surfaces as a fault on the next call.
///
/// Invariant: non-empty after trimming.
pub struct Ticket(String);

impl Ticket {
    /// Element name used on the wire (`Ticket`).
    pub const FIELD: &'static str = "Ticket";

    /// Create a validated [`Ticket`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated ticket.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Correlation token threaded through request/response pairs (`TransactionId`).
///
/// Callers may supply their own; when omitted the client generates one from
/// the current wall clock, rendered as a digit-only string. This is a
/// correlation token, not a security token.
pub struct TransactionId(String);

impl TransactionId {
    /// Element name used on the wire (`TransactionId`).
    pub const FIELD: &'static str = "TransactionId";

    /// Create a validated [`TransactionId`] from a caller-supplied value.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Generate a fresh transaction id from the current wall clock.
    pub fn generate() -> Self {
        Self::from_timestamp(SystemTime::now())
    }

    /// Render a timestamp as a digit-only transaction id (seconds followed by
    /// the six-digit microsecond remainder, no separators).
    pub fn from_timestamp(at: SystemTime) -> Self {
        let since_epoch = at.duration_since(UNIX_EPOCH).unwrap_or_default();
        Self(format!(
            "{}{:06}",
            since_epoch.as_secs(),
            since_epoch.subsec_micros()
        ))
    }

    /// Borrow the transaction id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number as sent to the provider (`PhoneNumber`).
///
/// A leading `+` is stripped; the provider expects bare digits. If you want
/// E.164 parsing, go through [`PhoneNumber`] and convert it into this type.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Element name used on the wire (`PhoneNumber`).
    pub const FIELD: &'static str = "PhoneNumber";

    /// Create a validated raw phone number. Trims whitespace, strips one
    /// leading `+`, and requires the remainder to be non-empty digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidPhoneNumber {
                input: value.clone(),
            });
        }
        Ok(Self(digits.to_owned()))
    }

    /// Digits as sent to the provider (no `+`).
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert an already-parsed phone number to the wire form (E.164 digits
    /// without the leading `+`).
    fn from(value: PhoneNumber) -> Self {
        let digits = value
            .e164
            .strip_prefix('+')
            .map(str::to_owned)
            .unwrap_or(value.e164);
        Self(digits)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit
    /// country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SIM card serial (`ICCID`).
///
/// Invariant: 18 to 22 ASCII digits after trimming.
pub struct Iccid(String);

impl Iccid {
    /// Element name used on the wire (`ICCID`).
    pub const FIELD: &'static str = "ICCID";

    /// Create a validated [`Iccid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let digits_only = trimmed.bytes().all(|b| b.is_ascii_digit());
        if !digits_only || !(18..=22).contains(&trimmed.len()) {
            return Err(ValidationError::InvalidIccid {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated ICCID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Order identifier assigned by the provider (`OrderId`).
pub struct OrderId(u64);

impl OrderId {
    /// Element name used on the wire (`OrderId`).
    pub const FIELD: &'static str = "OrderId";

    /// Wrap a provider-assigned order id.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the underlying order id.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Recharge product code (`ProductCode`).
pub struct ProductCode(u32);

impl ProductCode {
    /// Element name used on the wire (`ProductCode`).
    pub const FIELD: &'static str = "ProductCode";

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Package identifier (`PackageId`), e.g. the tourist-SIM product.
pub struct PackageId(u32);

impl PackageId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Province identifier from the provider's reference data.
pub struct ProvinceId(u32);

impl ProvinceId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Nationality identifier from the provider's reference data.
pub struct NationalityId(u32);

impl NationalityId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Commercial office identifier from the provider's reference data.
pub struct OfficeId(u32);

impl OfficeId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Identity document kind accepted by the provider.
///
/// Each kind maps to a fixed numeric identification-type code on the wire.
pub enum DocumentType {
    Passport,
    /// National identity document.
    Dni,
    /// Carné de identidad; shares the DNI code.
    Ci,
}

impl DocumentType {
    /// Numeric identification-type code sent to the provider.
    pub fn code(self) -> u8 {
        match self {
            Self::Passport => 9,
            Self::Dni | Self::Ci => 1,
        }
    }
}

impl FromStr for DocumentType {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "passport" => Ok(Self::Passport),
            "dni" => Ok(Self::Dni),
            "ci" => Ok(Self::Ci),
            _ => Err(ValidationError::UnknownDocumentType {
                input: input.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Client gender as the provider encodes it.
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Single-letter wire code (`M`/`F`).
    pub fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_uppercase().as_str() {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            _ => Err(ValidationError::UnknownGender {
                input: input.to_owned(),
            }),
        }
    }
}
