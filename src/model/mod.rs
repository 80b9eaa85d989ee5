//! Registration data model
//!
//! A registration is a flat record with a store-assigned identifier and the
//! attributes collected by the registration form. Serialized names follow the
//! field names the registration form has always written (`pangalan`,
//! `contactNumber`, ...), so JSON dumps of existing data load unchanged.
//!
//! # Representation rules
//!
//! - **Accommodation flags** (`plato`, `kutsara`, `baso`, `beddings`) are the
//!   literal strings `"true"`/`"false"` on the wire, see [`Flag`]
//! - **Payment status** is binary; an absent status reads as unpaid
//! - **Membership** (`kasapian`) is exactly one category per record
//! - **Optional text** (email, positions, contributions) reads `""` as absent

use bincode::{Decode, Encode};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub mod error;
pub mod field;

pub use error::ModelError;
pub use field::{FlagField, RegistrationField, RegistrationPatch};

/// Store-assigned record identifier
///
/// Immutable once assigned. Never part of a [`RegistrationPatch`].
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an identifier string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Payment status of a registration
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Paid,
    /// Also the reading of a missing status
    #[default]
    Unpaid,
}

impl PaymentStatus {
    /// The other status
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Paid => Self::Unpaid,
            Self::Unpaid => Self::Paid,
        }
    }

    /// Stored representation (`paid` / `unpaid`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Unpaid => "unpaid",
        }
    }

    /// Export representation (`Paid` / `Unpaid`)
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Unpaid => "Unpaid",
        }
    }

    /// Parse the stored representation strictly
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidPaymentStatus` for anything other than `paid`/`unpaid`.
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        match value {
            "paid" => Ok(Self::Paid),
            "unpaid" => Ok(Self::Unpaid),
            other => Err(ModelError::InvalidPaymentStatus(other.to_string())),
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        if value == "paid" { Self::Paid } else { Self::Unpaid }
    }
}

impl From<PaymentStatus> for String {
    fn from(value: PaymentStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean carried as the literal string `"true"` or `"false"`
///
/// Any other string deserializes as `false`.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub struct Flag(bool);

impl Flag {
    pub const YES: Self = Self(true);
    pub const NO: Self = Self(false);

    #[must_use]
    pub const fn get(self) -> bool {
        self.0
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        Self(!self.0)
    }

    /// Stored representation (`true` / `false`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        if self.0 { "true" } else { "false" }
    }

    /// Export representation (`Yes` / `No`)
    #[must_use]
    pub const fn label(self) -> &'static str {
        if self.0 { "Yes" } else { "No" }
    }

    /// Parse the stored representation strictly
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidFlag` for anything other than `true`/`false`.
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        match value {
            "true" => Ok(Self(true)),
            "false" => Ok(Self(false)),
            other => Err(ModelError::InvalidFlag(other.to_string())),
        }
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl From<String> for Flag {
    fn from(value: String) -> Self {
        Self(value == "true")
    }
}

impl From<Flag> for String {
    fn from(value: Flag) -> Self {
        value.as_str().to_string()
    }
}

/// Church membership category (`kasapian`)
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Membership {
    #[default]
    Baptized,
    Professing,
    /// Any other label, kept verbatim
    Other(String),
}

impl Membership {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Baptized => "Baptized",
            Self::Professing => "Professing",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for Membership {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Baptized" => Self::Baptized,
            "Professing" => Self::Professing,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Membership {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Membership> for String {
    fn from(value: Membership) -> Self {
        match value {
            Membership::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional text where an empty string means the value was never given
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|value| !value.is_empty()))
}

/// A single event registration
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Registration {
    #[serde(default)]
    pub id: RecordId,

    // identity
    #[serde(rename = "pangalan")]
    pub name: String,
    #[serde(rename = "palayaw", default)]
    pub nickname: String,
    #[serde(rename = "kaarawan", default)]
    pub birthday: String,
    #[serde(rename = "edad", default)]
    pub age: String,
    #[serde(rename = "kasarian", default)]
    pub gender: String,

    // contact
    #[serde(rename = "tirahan", default)]
    pub address: String,
    #[serde(rename = "contactNumber", default)]
    pub contact_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "empty_as_none")]
    pub email: Option<String>,

    #[serde(rename = "inabot", default)]
    pub education: String,

    // family
    #[serde(rename = "tatay", default)]
    pub father: String,
    #[serde(rename = "nanay", default)]
    pub mother: String,

    // church
    #[serde(rename = "localChurch", default)]
    pub local_church: String,
    #[serde(rename = "kasapian", default)]
    pub membership: Membership,
    #[serde(rename = "posisyonIglesya", default, skip_serializing_if = "Option::is_none", deserialize_with = "empty_as_none")]
    pub church_position: Option<String>,
    #[serde(rename = "posisyonOrganisasyon", default, skip_serializing_if = "Option::is_none", deserialize_with = "empty_as_none")]
    pub organization_position: Option<String>,

    // event history
    #[serde(rename = "ilangBeses", default)]
    pub times_attended: String,
    #[serde(rename = "mgaInaasahan", default)]
    pub expectations: String,

    // contribution
    #[serde(rename = "ambagCash", default, skip_serializing_if = "Option::is_none", deserialize_with = "empty_as_none")]
    pub cash: Option<String>,
    #[serde(rename = "ambagRice", default, skip_serializing_if = "Option::is_none", deserialize_with = "empty_as_none")]
    pub rice: Option<String>,
    #[serde(rename = "ambagInKinds", default, skip_serializing_if = "Option::is_none", deserialize_with = "empty_as_none")]
    pub in_kind: Option<String>,

    // accommodation
    #[serde(rename = "plato", default)]
    pub plate: Flag,
    #[serde(rename = "kutsara", default)]
    pub spoon: Flag,
    #[serde(rename = "baso", default)]
    pub glass: Flag,
    #[serde(default)]
    pub beddings: Flag,

    #[serde(rename = "paymentStatus", default)]
    pub payment_status: PaymentStatus,
}

impl Registration {
    /// Create a registration with only a name set
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns a copy carrying the given identifier
    #[must_use]
    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub const fn is_paid(&self) -> bool {
        matches!(self.payment_status, PaymentStatus::Paid)
    }
}
