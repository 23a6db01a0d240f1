// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use time::Date;

use crate::fields::{
    display_assignee, display_date, display_name_list, display_text, format_date, format_money,
};
use crate::ids::RecordId;
use crate::metrics::{AsOf, license_state};
use crate::model::{
    Asset, AssignmentStatus, AssetStatus, BudgetLine, Hardware, LicenseStatus, SoftwareLicense,
    User, UserStatus, string_enum,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Asset,
    Hardware,
    Software,
    User,
    Budget,
}

impl RecordKind {
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Hardware,
        Self::Software,
        Self::User,
        Self::Budget,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "assets",
            Self::Hardware => "hardware",
            Self::Software => "software",
            Self::User => "users",
            Self::Budget => "budget",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "assets" | "asset" => Some(Self::Asset),
            "hardware" => Some(Self::Hardware),
            "software" => Some(Self::Software),
            "users" | "user" => Some(Self::User),
            "budget" => Some(Self::Budget),
            _ => None,
        }
    }

    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Asset => "AS",
            Self::Hardware => "HW",
            Self::Software => "SW",
            Self::User => "USR",
            Self::Budget => "BL",
        }
    }

    /// Hardware and software keep their rows and move to a terminal status;
    /// the rest are removed outright.
    pub const fn delete_policy(self) -> DeletePolicy {
        match self {
            Self::Hardware | Self::Software => DeletePolicy::Soft,
            Self::Asset | Self::User | Self::Budget => DeletePolicy::Hard,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    Soft,
    Hard,
}

/// One entity in a list view's collection.
pub trait Record: Clone + PartialEq + fmt::Debug {
    /// Categorical fields a selector can constrain.
    type Field: Copy + Eq + fmt::Debug + fmt::Display;
    /// Stored status enumeration; `Infallible` for kinds without one.
    type Status: Copy + Eq + fmt::Debug;

    const KIND: RecordKind;

    fn id(&self) -> &RecordId;

    fn assign_id(&mut self, id: RecordId);

    /// Free-text targets. Absent optional fields are left out, so they never match.
    fn search_fields(&self) -> Vec<&str>;

    /// Enum form of a categorical field, compared verbatim by selectors.
    /// Derived fields are evaluated at `as_of`; stored ones ignore it.
    fn field_value(&self, field: Self::Field, as_of: AsOf) -> &str;

    fn parse_field(name: &str) -> Option<Self::Field>;

    fn set_status(&mut self, status: Self::Status);

    /// Soft-delete transition. Only invoked for kinds whose policy is
    /// [`DeletePolicy::Soft`].
    fn retire(&mut self, _today: Date) {}

    fn columns() -> &'static [&'static str];

    fn row(&self) -> Vec<String>;
}

string_enum!(AssetField {
    Type => "type",
    Status => "status",
    Condition => "condition",
});

string_enum!(HardwareField {
    Type => "type",
    Status => "status",
});

string_enum!(SoftwareField {
    LicenseType => "license_type",
    /// Stored lifecycle: `active` or `cancelled`.
    Status => "status",
    /// Derived from the end date: `active`, `expiring_soon`, `expired` or `cancelled`.
    State => "state",
    Department => "department",
    RenewalTerm => "renewal_term",
});

string_enum!(UserField {
    Role => "role",
    Status => "status",
    Department => "department",
});

string_enum!(BudgetField {
    Category => "category",
    Period => "period",
});

impl Record for Asset {
    type Field = AssetField;
    type Status = AssetStatus;

    const KIND: RecordKind = RecordKind::Asset;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.serial_number.as_str()];
        fields.extend(self.assigned_to.as_deref());
        fields
    }

    fn field_value(&self, field: AssetField, _as_of: AsOf) -> &str {
        match field {
            AssetField::Type => self.asset_type.as_str(),
            AssetField::Status => self.status.as_str(),
            AssetField::Condition => self.condition.as_str(),
        }
    }

    fn parse_field(name: &str) -> Option<AssetField> {
        AssetField::parse(name)
    }

    fn set_status(&mut self, status: AssetStatus) {
        self.status = status;
    }

    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "type",
            "serial",
            "assigned to",
            "status",
            "location",
            "warranty",
            "condition",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.asset_type.as_str().to_owned(),
            self.serial_number.clone(),
            display_assignee(self.assigned_to.as_deref()).to_owned(),
            self.status.label(),
            display_text(&self.location).to_owned(),
            display_date(self.warranty_expiration),
            self.condition.label(),
        ]
    }
}

impl Record for Hardware {
    type Field = HardwareField;
    type Status = AssignmentStatus;

    const KIND: RecordKind = RecordKind::Hardware;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.device_name.as_str(),
            self.serial_number.as_str(),
            self.asset_tag.as_str(),
        ];
        fields.extend(self.assigned_user.as_deref());
        fields
    }

    fn field_value(&self, field: HardwareField, _as_of: AsOf) -> &str {
        match field {
            HardwareField::Type => self.component_type.as_str(),
            HardwareField::Status => self.status.as_str(),
        }
    }

    fn parse_field(name: &str) -> Option<HardwareField> {
        HardwareField::parse(name)
    }

    fn set_status(&mut self, status: AssignmentStatus) {
        self.status = status;
    }

    fn retire(&mut self, today: Date) {
        self.status = AssignmentStatus::Scrapped;
        self.end_date = Some(today);
    }

    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "device",
            "type",
            "serial",
            "asset tag",
            "assigned user",
            "status",
            "purchase",
            "end date",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.device_name.clone(),
            self.component_type.as_str().to_owned(),
            self.serial_number.clone(),
            self.asset_tag.clone(),
            display_assignee(self.assigned_user.as_deref()).to_owned(),
            self.status.label(),
            format_money(self.purchase),
            format_date(self.end_date),
        ]
    }
}

impl Record for SoftwareLicense {
    type Field = SoftwareField;
    type Status = LicenseStatus;

    const KIND: RecordKind = RecordKind::Software;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.vendor_name.as_str()];
        fields.extend(self.assigned_users.iter().map(String::as_str));
        fields
    }

    fn field_value(&self, field: SoftwareField, as_of: AsOf) -> &str {
        match field {
            SoftwareField::LicenseType => self.license_type.as_str(),
            SoftwareField::Status => self.status.as_str(),
            SoftwareField::State => license_state(self, as_of.today, as_of.expiry_window).as_str(),
            SoftwareField::Department => &self.department,
            SoftwareField::RenewalTerm => self.renewal_term.as_str(),
        }
    }

    fn parse_field(name: &str) -> Option<SoftwareField> {
        SoftwareField::parse(name)
    }

    fn set_status(&mut self, status: LicenseStatus) {
        self.status = status;
    }

    fn retire(&mut self, _today: Date) {
        self.status = LicenseStatus::Cancelled;
    }

    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "software",
            "license",
            "users",
            "end date",
            "renewal",
            "vendor",
            "payment",
            "status",
            "department",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.license_type.as_str().to_owned(),
            display_name_list(&self.assigned_users),
            display_date(self.end_date),
            self.renewal_term.as_str().to_owned(),
            self.vendor_name.clone(),
            format_money(self.payment),
            self.status.label(),
            display_text(&self.department).to_owned(),
        ]
    }
}

impl Record for User {
    type Field = UserField;
    type Status = UserStatus;

    const KIND: RecordKind = RecordKind::User;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.department.as_str(),
        ]
    }

    fn field_value(&self, field: UserField, _as_of: AsOf) -> &str {
        match field {
            UserField::Role => self.role.as_str(),
            UserField::Status => self.status.as_str(),
            UserField::Department => &self.department,
        }
    }

    fn parse_field(name: &str) -> Option<UserField> {
        UserField::parse(name)
    }

    fn set_status(&mut self, status: UserStatus) {
        self.status = status;
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name", "email", "role", "department", "joined", "status"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.role.label(),
            display_text(&self.department).to_owned(),
            format_date(Some(self.join_date)),
            self.status.label(),
        ]
    }
}

impl Record for BudgetLine {
    type Field = BudgetField;
    type Status = Infallible;

    const KIND: RecordKind = RecordKind::Budget;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.category.as_str(), self.period.as_str()]
    }

    fn field_value(&self, field: BudgetField, _as_of: AsOf) -> &str {
        match field {
            BudgetField::Category => &self.category,
            BudgetField::Period => &self.period,
        }
    }

    fn parse_field(name: &str) -> Option<BudgetField> {
        BudgetField::parse(name)
    }

    fn set_status(&mut self, status: Infallible) {
        match status {}
    }

    fn columns() -> &'static [&'static str] {
        &["id", "category", "period", "budget", "spent"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.category.clone(),
            self.period.clone(),
            format_money(self.budget),
            format_money(self.spent),
        ]
    }
}

/// A record of any kind, for views that span collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnyRecord {
    Asset(Asset),
    Hardware(Hardware),
    Software(SoftwareLicense),
    User(User),
    Budget(BudgetLine),
}

impl AnyRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Asset(_) => RecordKind::Asset,
            Self::Hardware(_) => RecordKind::Hardware,
            Self::Software(_) => RecordKind::Software,
            Self::User(_) => RecordKind::User,
            Self::Budget(_) => RecordKind::Budget,
        }
    }

    pub fn id(&self) -> &RecordId {
        match self {
            Self::Asset(record) => record.id(),
            Self::Hardware(record) => record.id(),
            Self::Software(record) => record.id(),
            Self::User(record) => record.id(),
            Self::Budget(record) => record.id(),
        }
    }

    /// Short human label: the record's name-like field.
    pub fn title(&self) -> &str {
        match self {
            Self::Asset(record) => &record.name,
            Self::Hardware(record) => &record.device_name,
            Self::Software(record) => &record.name,
            Self::User(record) => &record.name,
            Self::Budget(record) => &record.category,
        }
    }

    pub fn search_fields(&self) -> Vec<&str> {
        match self {
            Self::Asset(record) => record.search_fields(),
            Self::Hardware(record) => record.search_fields(),
            Self::Software(record) => record.search_fields(),
            Self::User(record) => record.search_fields(),
            Self::Budget(record) => record.search_fields(),
        }
    }
}

impl From<Asset> for AnyRecord {
    fn from(value: Asset) -> Self {
        Self::Asset(value)
    }
}

impl From<Hardware> for AnyRecord {
    fn from(value: Hardware) -> Self {
        Self::Hardware(value)
    }
}

impl From<SoftwareLicense> for AnyRecord {
    fn from(value: SoftwareLicense) -> Self {
        Self::Software(value)
    }
}

impl From<User> for AnyRecord {
    fn from(value: User) -> Self {
        Self::User(value)
    }
}

impl From<BudgetLine> for AnyRecord {
    fn from(value: BudgetLine) -> Self {
        Self::Budget(value)
    }
}
