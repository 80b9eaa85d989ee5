//! Field enumeration, accessors and partial updates
//!
//! Every registration attribute is addressed through [`RegistrationField`]
//! instead of looking fields up by string key. Each variant maps to exactly
//! one accessor, and the declaration order of [`RegistrationField::ALL`] is
//! the column order of CSV exports.

use super::{Flag, Membership, ModelError, PaymentStatus, Registration};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// One editable attribute of a [`Registration`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationField {
    Name,
    Email,
    Nickname,
    Birthday,
    Age,
    Gender,
    Address,
    ContactNumber,
    Education,
    Father,
    Mother,
    LocalChurch,
    Membership,
    ChurchPosition,
    OrganizationPosition,
    TimesAttended,
    Expectations,
    Cash,
    Rice,
    InKind,
    Plate,
    Spoon,
    Glass,
    Beddings,
    PaymentStatus,
}

impl RegistrationField {
    /// All fields, in export column order
    pub const ALL: [Self; 25] = [
        Self::Name,
        Self::Email,
        Self::Nickname,
        Self::Birthday,
        Self::Age,
        Self::Gender,
        Self::Address,
        Self::ContactNumber,
        Self::Education,
        Self::Father,
        Self::Mother,
        Self::LocalChurch,
        Self::Membership,
        Self::ChurchPosition,
        Self::OrganizationPosition,
        Self::TimesAttended,
        Self::Expectations,
        Self::Cash,
        Self::Rice,
        Self::InKind,
        Self::Plate,
        Self::Spoon,
        Self::Glass,
        Self::Beddings,
        Self::PaymentStatus,
    ];

    /// Serialized key of the field
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "pangalan",
            Self::Email => "email",
            Self::Nickname => "palayaw",
            Self::Birthday => "kaarawan",
            Self::Age => "edad",
            Self::Gender => "kasarian",
            Self::Address => "tirahan",
            Self::ContactNumber => "contactNumber",
            Self::Education => "inabot",
            Self::Father => "tatay",
            Self::Mother => "nanay",
            Self::LocalChurch => "localChurch",
            Self::Membership => "kasapian",
            Self::ChurchPosition => "posisyonIglesya",
            Self::OrganizationPosition => "posisyonOrganisasyon",
            Self::TimesAttended => "ilangBeses",
            Self::Expectations => "mgaInaasahan",
            Self::Cash => "ambagCash",
            Self::Rice => "ambagRice",
            Self::InKind => "ambagInKinds",
            Self::Plate => "plato",
            Self::Spoon => "kutsara",
            Self::Glass => "baso",
            Self::Beddings => "beddings",
            Self::PaymentStatus => "paymentStatus",
        }
    }

    /// Column header used in CSV exports
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Name => "Pangalan",
            Self::Email => "Email",
            Self::Nickname => "Palayaw",
            Self::Birthday => "Kaarawan",
            Self::Age => "Edad",
            Self::Gender => "Kasarian",
            Self::Address => "Tirahan",
            Self::ContactNumber => "Contact Number",
            Self::Education => "Inabot na Pag-aaral",
            Self::Father => "Tatay",
            Self::Mother => "Nanay",
            Self::LocalChurch => "Local Church",
            Self::Membership => "Kasapian",
            Self::ChurchPosition => "Posisyon (Iglesya)",
            Self::OrganizationPosition => "Posisyon (Organisasyon)",
            Self::TimesAttended => "Ilang Beses",
            Self::Expectations => "Mga Inaasahan",
            Self::Cash => "Ambag Cash",
            Self::Rice => "Ambag Rice",
            Self::InKind => "Ambag In-Kinds",
            Self::Plate => "Plato",
            Self::Spoon => "Kutsara",
            Self::Glass => "Baso",
            Self::Beddings => "Beddings",
            Self::PaymentStatus => "Payment Status",
        }
    }

    /// True for fields that may be absent
    #[must_use]
    pub const fn is_optional(self) -> bool {
        matches!(
            self,
            Self::Email
                | Self::ChurchPosition
                | Self::OrganizationPosition
                | Self::Cash
                | Self::Rice
                | Self::InKind
        )
    }

    /// The accommodation flag behind this field, if it is one
    #[must_use]
    pub const fn as_flag(self) -> Option<FlagField> {
        match self {
            Self::Plate => Some(FlagField::Plate),
            Self::Spoon => Some(FlagField::Spoon),
            Self::Glass => Some(FlagField::Glass),
            Self::Beddings => Some(FlagField::Beddings),
            _ => None,
        }
    }

    fn text(self, reg: &Registration) -> Option<&String> {
        Some(match self {
            Self::Name => &reg.name,
            Self::Nickname => &reg.nickname,
            Self::Birthday => &reg.birthday,
            Self::Age => &reg.age,
            Self::Gender => &reg.gender,
            Self::Address => &reg.address,
            Self::ContactNumber => &reg.contact_number,
            Self::Education => &reg.education,
            Self::Father => &reg.father,
            Self::Mother => &reg.mother,
            Self::LocalChurch => &reg.local_church,
            Self::TimesAttended => &reg.times_attended,
            Self::Expectations => &reg.expectations,
            _ => return None,
        })
    }

    fn text_mut(self, reg: &mut Registration) -> Option<&mut String> {
        Some(match self {
            Self::Name => &mut reg.name,
            Self::Nickname => &mut reg.nickname,
            Self::Birthday => &mut reg.birthday,
            Self::Age => &mut reg.age,
            Self::Gender => &mut reg.gender,
            Self::Address => &mut reg.address,
            Self::ContactNumber => &mut reg.contact_number,
            Self::Education => &mut reg.education,
            Self::Father => &mut reg.father,
            Self::Mother => &mut reg.mother,
            Self::LocalChurch => &mut reg.local_church,
            Self::TimesAttended => &mut reg.times_attended,
            Self::Expectations => &mut reg.expectations,
            _ => return None,
        })
    }

    fn optional(self, reg: &Registration) -> Option<&Option<String>> {
        Some(match self {
            Self::Email => &reg.email,
            Self::ChurchPosition => &reg.church_position,
            Self::OrganizationPosition => &reg.organization_position,
            Self::Cash => &reg.cash,
            Self::Rice => &reg.rice,
            Self::InKind => &reg.in_kind,
            _ => return None,
        })
    }

    fn optional_mut(self, reg: &mut Registration) -> Option<&mut Option<String>> {
        Some(match self {
            Self::Email => &mut reg.email,
            Self::ChurchPosition => &mut reg.church_position,
            Self::OrganizationPosition => &mut reg.organization_position,
            Self::Cash => &mut reg.cash,
            Self::Rice => &mut reg.rice,
            Self::InKind => &mut reg.in_kind,
            _ => return None,
        })
    }

    /// Stored value of the field, `None` when an optional field is absent
    #[must_use]
    pub fn value(self, reg: &Registration) -> Option<Cow<'_, str>> {
        if let Some(text) = self.text(reg) {
            return Some(Cow::Borrowed(text.as_str()));
        }
        if let Some(optional) = self.optional(reg) {
            return optional.as_deref().map(Cow::Borrowed);
        }
        if let Some(flag) = self.as_flag() {
            return Some(Cow::Borrowed(flag.get(reg).as_str()));
        }
        match self {
            Self::Membership => Some(Cow::Borrowed(reg.membership.as_str())),
            Self::PaymentStatus => Some(Cow::Borrowed(reg.payment_status.as_str())),
            _ => None,
        }
    }

    /// Assign the stored representation of a value
    ///
    /// `None` clears optional fields and empties required text fields.
    ///
    /// # Errors
    ///
    /// Returns `ModelError` if a flag or payment status value is malformed.
    pub fn set(self, reg: &mut Registration, value: Option<&str>) -> Result<(), ModelError> {
        if let Some(slot) = self.text_mut(reg) {
            *slot = value.unwrap_or_default().to_string();
            return Ok(());
        }
        if let Some(slot) = self.optional_mut(reg) {
            *slot = value.filter(|v| !v.is_empty()).map(str::to_string);
            return Ok(());
        }
        if let Some(flag) = self.as_flag() {
            flag.set(reg, Flag::parse(value.unwrap_or("false"))?);
            return Ok(());
        }
        match self {
            Self::Membership => reg.membership = Membership::from(value.unwrap_or_default()),
            Self::PaymentStatus => {
                reg.payment_status = PaymentStatus::parse(value.unwrap_or("unpaid"))?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Render the field as a CSV export cell
    #[must_use]
    pub fn export_cell(self, reg: &Registration) -> Cow<'_, str> {
        if let Some(flag) = self.as_flag() {
            return Cow::Borrowed(flag.get(reg).label());
        }
        if self == Self::PaymentStatus {
            return Cow::Borrowed(reg.payment_status.label());
        }
        self.value(reg).unwrap_or(Cow::Borrowed(""))
    }

    /// Inverse of [`export_cell`](Self::export_cell)
    ///
    /// # Errors
    ///
    /// Returns `ModelError` if a flag cell is not `Yes`/`No` or the payment
    /// cell is not `Paid`/`Unpaid`.
    pub fn import_cell(self, reg: &mut Registration, cell: &str) -> Result<(), ModelError> {
        if let Some(flag) = self.as_flag() {
            let value = match cell {
                "Yes" => Flag::YES,
                "No" => Flag::NO,
                other => return Err(ModelError::InvalidFlag(other.to_string())),
            };
            flag.set(reg, value);
            return Ok(());
        }
        if self == Self::PaymentStatus {
            reg.payment_status = match cell {
                "Paid" => PaymentStatus::Paid,
                "Unpaid" => PaymentStatus::Unpaid,
                other => return Err(ModelError::InvalidPaymentStatus(other.to_string())),
            };
            return Ok(());
        }
        self.set(reg, Some(cell))
    }
}

impl fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RegistrationField {
    type Err = ModelError;

    /// Accepts the serialized key (`pangalan`) or the English name (`name`, `contact-number`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(field) = Self::ALL.iter().find(|f| f.key() == s) {
            return Ok(*field);
        }
        let normalized = s.to_ascii_lowercase().replace(['-', ' '], "_");
        let field = match normalized.as_str() {
            "name" => Self::Name,
            "email" => Self::Email,
            "nickname" => Self::Nickname,
            "birthday" => Self::Birthday,
            "age" => Self::Age,
            "gender" => Self::Gender,
            "address" => Self::Address,
            "contact" | "contact_number" | "phone" => Self::ContactNumber,
            "education" => Self::Education,
            "father" => Self::Father,
            "mother" => Self::Mother,
            "church" | "local_church" => Self::LocalChurch,
            "membership" => Self::Membership,
            "church_position" => Self::ChurchPosition,
            "organization_position" => Self::OrganizationPosition,
            "times_attended" => Self::TimesAttended,
            "expectations" => Self::Expectations,
            "cash" => Self::Cash,
            "rice" => Self::Rice,
            "in_kind" => Self::InKind,
            "plate" => Self::Plate,
            "spoon" => Self::Spoon,
            "glass" => Self::Glass,
            "payment" | "payment_status" => Self::PaymentStatus,
            _ => return Err(ModelError::UnknownField(s.to_string())),
        };
        Ok(field)
    }
}

/// Accommodation item a registrant brings (boolean-as-string fields)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagField {
    Plate,
    Spoon,
    Glass,
    Beddings,
}

impl FlagField {
    pub const ALL: [Self; 4] = [Self::Plate, Self::Spoon, Self::Glass, Self::Beddings];

    #[must_use]
    pub const fn get(self, reg: &Registration) -> Flag {
        match self {
            Self::Plate => reg.plate,
            Self::Spoon => reg.spoon,
            Self::Glass => reg.glass,
            Self::Beddings => reg.beddings,
        }
    }

    pub const fn set(self, reg: &mut Registration, value: Flag) {
        match self {
            Self::Plate => reg.plate = value,
            Self::Spoon => reg.spoon = value,
            Self::Glass => reg.glass = value,
            Self::Beddings => reg.beddings = value,
        }
    }

    #[must_use]
    pub const fn field(self) -> RegistrationField {
        match self {
            Self::Plate => RegistrationField::Plate,
            Self::Spoon => RegistrationField::Spoon,
            Self::Glass => RegistrationField::Glass,
            Self::Beddings => RegistrationField::Beddings,
        }
    }
}

impl fmt::Display for FlagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field().header())
    }
}

impl FromStr for FlagField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field: RegistrationField = s.parse()?;
        field.as_flag().ok_or_else(|| ModelError::NotAFlag(s.to_string()))
    }
}

/// Ordered set of field assignments applied by an update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationPatch {
    changes: Vec<(RegistrationField, Option<String>)>,
}

impl RegistrationPatch {
    #[must_use]
    pub const fn new() -> Self {
        Self { changes: Vec::new() }
    }

    /// Add an assignment (later assignments to the same field win)
    #[must_use]
    pub fn set(mut self, field: RegistrationField, value: impl Into<String>) -> Self {
        self.changes.push((field, Some(value.into())));
        self
    }

    /// Clear an optional field
    #[must_use]
    pub fn clear(mut self, field: RegistrationField) -> Self {
        self.changes.push((field, None));
        self
    }

    /// Patch setting the payment status
    #[must_use]
    pub fn payment(status: PaymentStatus) -> Self {
        Self::new().set(RegistrationField::PaymentStatus, status.as_str())
    }

    /// Patch setting an accommodation flag
    #[must_use]
    pub fn flag(flag: FlagField, value: Flag) -> Self {
        Self::new().set(flag.field(), value.as_str())
    }

    /// Build a patch from `FIELD=VALUE` strings; an empty value clears the field
    ///
    /// # Errors
    ///
    /// Returns `ModelError` if an assignment is malformed or names an unknown field.
    pub fn from_assignments<S: AsRef<str>>(assignments: &[S]) -> Result<Self, ModelError> {
        let mut patch = Self::new();
        for assignment in assignments {
            let assignment = assignment.as_ref();
            let (key, value) = assignment
                .split_once('=')
                .ok_or_else(|| ModelError::InvalidAssignment(assignment.to_string()))?;
            let field: RegistrationField = key.trim().parse()?;
            patch = if value.is_empty() {
                patch.clear(field)
            } else {
                patch.set(field, value)
            };
        }
        Ok(patch)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// True if the patch assigns the given field
    #[must_use]
    pub fn touches(&self, field: RegistrationField) -> bool {
        self.changes.iter().any(|(f, _)| *f == field)
    }

    /// Apply every assignment in order
    ///
    /// The record is left untouched if any assignment fails.
    ///
    /// # Errors
    ///
    /// Returns `ModelError` if a value is malformed for its field.
    pub fn apply(&self, reg: &mut Registration) -> Result<(), ModelError> {
        let mut updated = reg.clone();
        for (field, value) in &self.changes {
            field.set(&mut updated, value.as_deref())?;
        }
        updated.id = reg.id.clone();
        *reg = updated;
        Ok(())
    }
}
