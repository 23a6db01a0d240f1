// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::ids::RecordId;
use crate::money::Money;

macro_rules! string_enum {
    (@count) => { 0usize };
    (@count $head:ident $($tail:ident)*) => { 1usize + string_enum!(@count $($tail)*) };
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: [Self; string_enum!(@count $($variant)+)] = [$(Self::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }

            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Stored form with separators turned into spaces, for display.
            pub fn label(self) -> String {
                self.as_str().replace('_', " ")
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use string_enum;

string_enum!(AssetType {
    Laptop => "laptop",
    Phone => "phone",
    Monitor => "monitor",
    Software => "software",
    Printer => "printer",
    Tablet => "tablet",
    Other => "other",
});

string_enum!(AssetStatus {
    InUse => "in_use",
    InStorage => "in_storage",
    UnderRepair => "under_repair",
    Retired => "retired",
});

string_enum!(AssetCondition {
    Good => "good",
    NeedsService => "needs_service",
    Damaged => "damaged",
});

string_enum!(ComponentType {
    Laptop => "laptop",
    Desktop => "desktop",
    Server => "server",
    Monitor => "monitor",
    Phone => "phone",
    Tablet => "tablet",
    Router => "router",
    Switch => "switch",
    Printer => "printer",
    Scanner => "scanner",
    Other => "other",
});

string_enum!(AssignmentStatus {
    Assigned => "assigned",
    Available => "available",
    UnderRepair => "under_repair",
    Scrapped => "scrapped",
});

string_enum!(LicenseType {
    SingleUser => "single-user",
    MultiUser => "multi-user",
    Floating => "floating",
    SiteLicense => "site-license",
});

string_enum!(RenewalTerm {
    Monthly => "monthly",
    Quarterly => "quarterly",
    Annual => "annual",
    Perpetual => "perpetual",
});

string_enum!(
    /// Stored lifecycle of a license. Expiry is never stored; see [`LicenseState`].
    LicenseStatus {
        Active => "active",
        Cancelled => "cancelled",
    }
);

string_enum!(
    /// Render-time state of a license, recomputed from its end date on every read.
    LicenseState {
        Active => "active",
        ExpiringSoon => "expiring_soon",
        Expired => "expired",
        Cancelled => "cancelled",
    }
);

string_enum!(UserRole {
    Admin => "admin",
    ItManager => "it_manager",
    Employee => "employee",
});

string_enum!(UserStatus {
    Active => "active",
    Inactive => "inactive",
});

string_enum!(
    /// Derived from the numeric variance; never stored on a budget line.
    BudgetStatus {
        OnTrack => "on_track",
        OverBudget => "over_budget",
        UnderBudget => "under_budget",
    }
);

pub const SOFTWARE_DEPARTMENTS: [&str; 7] = [
    "IT",
    "Marketing",
    "Sales",
    "HR",
    "Finance",
    "Operations",
    "Company-wide",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: RecordId,
    pub name: String,
    pub asset_type: AssetType,
    pub serial_number: String,
    pub assigned_to: Option<String>,
    pub status: AssetStatus,
    pub location: String,
    pub purchase_date: Option<Date>,
    pub warranty_expiration: Option<Date>,
    pub condition: AssetCondition,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hardware {
    pub id: RecordId,
    pub device_name: String,
    pub component_type: ComponentType,
    pub serial_number: String,
    pub asset_tag: String,
    pub assigned_user: Option<String>,
    pub assigned_location: String,
    pub status: AssignmentStatus,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub vendor_name: String,
    pub invoice_number: String,
    pub purchase: Money,
    pub purchase_date: Option<Date>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareLicense {
    pub id: RecordId,
    pub name: String,
    pub license_type: LicenseType,
    pub assigned_users: Vec<String>,
    pub start_date: Date,
    /// `None` for perpetual licenses.
    pub end_date: Option<Date>,
    pub renewal_term: RenewalTerm,
    pub vendor_name: String,
    pub invoice_number: String,
    pub payment: Money,
    pub status: LicenseStatus,
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub department: String,
    pub join_date: Date,
    pub last_login: Option<OffsetDateTime>,
    pub status: UserStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub id: RecordId,
    pub category: String,
    pub period: String,
    pub budget: Money,
    pub spent: Money,
}
