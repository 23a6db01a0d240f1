// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use assetdesk_app::{
    Asset, AssetCondition, AssetStatus, AssetType, AssignmentStatus, BudgetLine, ComponentType,
    Currency, Hardware, Inventory, LicenseStatus, LicenseType, Money, RecordId, RenewalTerm,
    SOFTWARE_DEPARTMENTS, SoftwareLicense, User, UserRole, UserStatus,
};
use time::macros::{date, datetime};
use time::{Date, Duration, OffsetDateTime};

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];

const OFFICES: [&str; 5] = [
    "San Francisco Office",
    "New York Office",
    "Mumbai Office",
    "Bengaluru Office",
    "Remote",
];

const DEPARTMENTS: [&str; 6] = ["IT", "Marketing", "Sales", "HR", "Finance", "Operations"];

const DEVICE_MODELS: [(ComponentType, &str, &str); 10] = [
    (ComponentType::Laptop, "MacBook Pro 14\"", "Apple Inc."),
    (ComponentType::Laptop, "ThinkPad X1 Carbon", "Lenovo"),
    (ComponentType::Desktop, "Dell OptiPlex 7090", "Dell Technologies"),
    (ComponentType::Server, "HP ProLiant DL380", "HP Enterprise"),
    (ComponentType::Monitor, "Dell UltraSharp 27\"", "Dell Technologies"),
    (ComponentType::Phone, "iPhone 14 Pro", "Apple Inc."),
    (ComponentType::Tablet, "iPad Air", "Apple Inc."),
    (ComponentType::Router, "Cisco ISR 1100", "Cisco"),
    (ComponentType::Switch, "Catalyst 9200", "Cisco"),
    (ComponentType::Printer, "LaserJet Pro M404", "HP Inc."),
];

const ASSET_MODELS: [(AssetType, &str); 7] = [
    (AssetType::Laptop, "MacBook Air 13\""),
    (AssetType::Phone, "Pixel 8"),
    (AssetType::Monitor, "LG UltraFine 24\""),
    (AssetType::Software, "JetBrains All Products"),
    (AssetType::Printer, "Brother HL-L2350"),
    (AssetType::Tablet, "Galaxy Tab S9"),
    (AssetType::Other, "Logitech Rally Bar"),
];

const SOFTWARE_TITLES: [(&str, &str); 8] = [
    ("Adobe Creative Cloud", "Adobe Inc."),
    ("Microsoft 365 Business", "Microsoft Corporation"),
    ("Slack Pro", "Slack Technologies"),
    ("Zoom Business", "Zoom Video Communications"),
    ("Atlassian Jira", "Atlassian"),
    ("1Password Teams", "AgileBits"),
    ("Figma Organization", "Figma"),
    ("GitHub Enterprise", "GitHub"),
];

const BUDGET_CATEGORIES: [&str; 5] = ["Hardware", "Software", "Services", "Training", "Travel"];

/// Fixed clock the fixtures are written against.
pub fn fixture_now() -> OffsetDateTime {
    datetime!(2024-01-20 16:30:00 UTC)
}

pub fn fixture_today() -> Date {
    fixture_now().date()
}

pub fn sample_assets() -> Vec<Asset> {
    vec![
        Asset {
            id: RecordId::from("LP-001"),
            name: "MacBook Pro 16\"".to_owned(),
            asset_type: AssetType::Laptop,
            serial_number: "C02ZD0XXMD6T".to_owned(),
            assigned_to: Some("Sarah Johnson".to_owned()),
            status: AssetStatus::InUse,
            location: "San Francisco Office - Floor 2".to_owned(),
            purchase_date: Some(date!(2023 - 08 - 15)),
            warranty_expiration: Some(date!(2026 - 08 - 15)),
            condition: AssetCondition::Good,
            notes: "Latest model with M2 chip".to_owned(),
        },
        Asset {
            id: RecordId::from("PH-045"),
            name: "iPhone 14 Pro".to_owned(),
            asset_type: AssetType::Phone,
            serial_number: "F2G3H4J5K6L7".to_owned(),
            assigned_to: Some("Mike Chen".to_owned()),
            status: AssetStatus::InUse,
            location: "New York Office - Floor 1".to_owned(),
            purchase_date: Some(date!(2023 - 09 - 22)),
            warranty_expiration: Some(date!(2024 - 09 - 22)),
            condition: AssetCondition::Good,
            notes: "Company phone for sales team".to_owned(),
        },
        Asset {
            id: RecordId::from("MN-023"),
            name: "Dell UltraSharp 27\"".to_owned(),
            asset_type: AssetType::Monitor,
            serial_number: "CN0G7HXG".to_owned(),
            assigned_to: Some("Jessica Wong".to_owned()),
            status: AssetStatus::UnderRepair,
            location: "IT Storage Room".to_owned(),
            purchase_date: Some(date!(2022 - 03 - 10)),
            warranty_expiration: Some(date!(2024 - 02 - 10)),
            condition: AssetCondition::NeedsService,
            notes: "Flickering issue reported".to_owned(),
        },
    ]
}

pub fn sample_hardware() -> Vec<Hardware> {
    vec![
        Hardware {
            id: RecordId::from("HW-001"),
            device_name: "MacBook Pro 16\" M2".to_owned(),
            component_type: ComponentType::Laptop,
            serial_number: "C02ZD0XXMD6T".to_owned(),
            asset_tag: "OUTM-LP-001".to_owned(),
            assigned_user: Some("Sarah Johnson".to_owned()),
            assigned_location: "San Francisco Office - Floor 2, Desk 23".to_owned(),
            status: AssignmentStatus::Assigned,
            start_date: Some(date!(2023 - 08 - 15)),
            end_date: None,
            vendor_name: "Apple Inc.".to_owned(),
            invoice_number: "INV-2023-001".to_owned(),
            purchase: Money::usd(249_900),
            purchase_date: Some(date!(2023 - 08 - 10)),
            notes: String::new(),
        },
        Hardware {
            id: RecordId::from("HW-002"),
            device_name: "Dell OptiPlex 7090".to_owned(),
            component_type: ComponentType::Desktop,
            serial_number: "5CD12345ABC".to_owned(),
            asset_tag: "OUTM-DT-002".to_owned(),
            assigned_user: Some("Mike Chen".to_owned()),
            assigned_location: "Mumbai Office - Floor 1, Workstation 15".to_owned(),
            status: AssignmentStatus::Assigned,
            start_date: Some(date!(2023 - 09 - 01)),
            end_date: None,
            vendor_name: "Dell Technologies".to_owned(),
            invoice_number: "INV-2023-045".to_owned(),
            purchase: Money::inr(6_500_000),
            purchase_date: Some(date!(2023 - 08 - 25)),
            notes: String::new(),
        },
        Hardware {
            id: RecordId::from("HW-003"),
            device_name: "HP ProDesk Server".to_owned(),
            component_type: ComponentType::Server,
            serial_number: "SRV789XYZ".to_owned(),
            asset_tag: "OUTM-SRV-001".to_owned(),
            assigned_user: None,
            assigned_location: "San Francisco - Server Room Rack A3".to_owned(),
            status: AssignmentStatus::Available,
            start_date: None,
            end_date: None,
            vendor_name: "HP Enterprise".to_owned(),
            invoice_number: "INV-2023-012".to_owned(),
            purchase: Money::usd(450_000),
            purchase_date: Some(date!(2023 - 07 - 15)),
            notes: String::new(),
        },
    ]
}

/// Three licenses: one current, one already expired, one inside the
/// default 30-day window of [`fixture_today`].
pub fn sample_software() -> Vec<SoftwareLicense> {
    vec![
        SoftwareLicense {
            id: RecordId::from("SW-001"),
            name: "Adobe Creative Suite".to_owned(),
            license_type: LicenseType::SingleUser,
            assigned_users: vec!["Sarah Johnson".to_owned()],
            start_date: date!(2023 - 08 - 01),
            end_date: Some(date!(2024 - 08 - 01)),
            renewal_term: RenewalTerm::Annual,
            vendor_name: "Adobe Inc.".to_owned(),
            invoice_number: "INV-2023-050".to_owned(),
            payment: Money::usd(59_988),
            status: LicenseStatus::Active,
            department: "Marketing".to_owned(),
        },
        SoftwareLicense {
            id: RecordId::from("SW-002"),
            name: "Microsoft Office 365 Business".to_owned(),
            license_type: LicenseType::MultiUser,
            assigned_users: vec![
                "Mike Chen".to_owned(),
                "Jessica Wong".to_owned(),
                "David Kumar".to_owned(),
            ],
            start_date: date!(2023 - 01 - 01),
            end_date: Some(date!(2024 - 01 - 01)),
            renewal_term: RenewalTerm::Annual,
            vendor_name: "Microsoft Corporation".to_owned(),
            invoice_number: "INV-2023-005".to_owned(),
            payment: Money::inr(4_500_000),
            status: LicenseStatus::Active,
            department: "IT".to_owned(),
        },
        SoftwareLicense {
            id: RecordId::from("SW-003"),
            name: "Slack Pro".to_owned(),
            license_type: LicenseType::Floating,
            assigned_users: vec!["All Employees".to_owned()],
            start_date: date!(2023 - 02 - 01),
            end_date: Some(date!(2024 - 02 - 01)),
            renewal_term: RenewalTerm::Annual,
            vendor_name: "Slack Technologies".to_owned(),
            invoice_number: "INV-2023-089".to_owned(),
            payment: Money::usd(120_000),
            status: LicenseStatus::Active,
            department: "Company-wide".to_owned(),
        },
    ]
}

pub fn sample_users() -> Vec<User> {
    vec![
        User {
            id: RecordId::from("1"),
            name: "John Doe".to_owned(),
            email: "john.doe@outamation.com".to_owned(),
            role: UserRole::Admin,
            department: "IT".to_owned(),
            join_date: date!(2023 - 01 - 15),
            last_login: Some(datetime!(2024-01-20 10:30:00 UTC)),
            status: UserStatus::Active,
        },
        User {
            id: RecordId::from("2"),
            name: "Sarah Johnson".to_owned(),
            email: "sarah.johnson@outamation.com".to_owned(),
            role: UserRole::ItManager,
            department: "IT".to_owned(),
            join_date: date!(2023 - 03 - 22),
            last_login: Some(datetime!(2024-01-20 14:15:00 UTC)),
            status: UserStatus::Active,
        },
        User {
            id: RecordId::from("3"),
            name: "Mike Chen".to_owned(),
            email: "mike.chen@outamation.com".to_owned(),
            role: UserRole::Employee,
            department: "Sales".to_owned(),
            join_date: date!(2023 - 06 - 10),
            last_login: Some(datetime!(2024-01-19 16:45:00 UTC)),
            status: UserStatus::Active,
        },
        User {
            id: RecordId::from("4"),
            name: "Jessica Wong".to_owned(),
            email: "jessica.wong@outamation.com".to_owned(),
            role: UserRole::Employee,
            department: "Marketing".to_owned(),
            join_date: date!(2023 - 08 - 05),
            last_login: Some(datetime!(2024-01-18 09:20:00 UTC)),
            status: UserStatus::Inactive,
        },
    ]
}

pub fn sample_budget() -> Vec<BudgetLine> {
    let line = |id: &str, category: &str, budget: i64, spent: i64| BudgetLine {
        id: RecordId::from(id),
        category: category.to_owned(),
        period: "2024".to_owned(),
        budget: Money::usd(budget * 100),
        spent: Money::usd(spent * 100),
    };
    vec![
        line("BL-001", "Hardware", 50_000, 42_500),
        line("BL-002", "Software", 25_000, 28_500),
        line("BL-003", "Services", 15_000, 8_900),
    ]
}

pub fn sample_inventory() -> Inventory {
    Inventory::new(
        sample_assets(),
        sample_hardware(),
        sample_software(),
        sample_users(),
        sample_budget(),
    )
}

struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator of plausible office inventory. Same seed, same records.
pub struct OfficeFaker {
    rng: DeterministicRng,
    next_serial: u32,
}

impl OfficeFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            next_serial: 1,
        }
    }

    pub fn person_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    pub fn asset(&mut self) -> Asset {
        let serial = self.serial();
        let (asset_type, name) = ASSET_MODELS[self.rng.int_n(ASSET_MODELS.len())];
        let status = AssetStatus::ALL[self.rng.int_n(AssetStatus::ALL.len())];
        let purchase_date = self.date_before(fixture_today(), 60, 1_200);
        let years = self.int_range(1, 3);
        Asset {
            id: RecordId::new(format!("AS-{serial:04}")),
            name: name.to_owned(),
            asset_type,
            serial_number: format!("SN{:08}", self.int_range(0, 99_999_999)),
            assigned_to: (status == AssetStatus::InUse).then(|| self.person_name()),
            status,
            location: self.pick(&OFFICES).to_owned(),
            purchase_date: Some(purchase_date),
            warranty_expiration: Some(purchase_date + Duration::days(years * 365)),
            condition: AssetCondition::ALL[self.rng.int_n(AssetCondition::ALL.len())],
            notes: String::new(),
        }
    }

    pub fn hardware(&mut self) -> Hardware {
        let serial = self.serial();
        let (component_type, device_name, vendor) =
            DEVICE_MODELS[self.rng.int_n(DEVICE_MODELS.len())];
        let status = AssignmentStatus::ALL[self.rng.int_n(AssignmentStatus::ALL.len())];
        let purchase_date = self.date_before(fixture_today(), 30, 1_500);
        let start_date = purchase_date + Duration::days(self.int_range(1, 14));
        let currency = self.currency();
        let purchase = match currency {
            Currency::Usd => Money::usd(self.int_range(20_000, 900_000)),
            Currency::Inr => Money::inr(self.int_range(1_500_000, 75_000_000)),
        };
        Hardware {
            id: RecordId::new(format!("HW-{serial:04}")),
            device_name: device_name.to_owned(),
            component_type,
            serial_number: format!("{:X}", self.rng.next_u64() >> 24),
            asset_tag: format!("OUTM-{}-{serial:03}", tag_prefix(component_type)),
            assigned_user: (status == AssignmentStatus::Assigned).then(|| self.person_name()),
            assigned_location: self.pick(&OFFICES).to_owned(),
            status,
            start_date: (status != AssignmentStatus::Available).then_some(start_date),
            end_date: (status == AssignmentStatus::Scrapped).then_some(fixture_today()),
            vendor_name: vendor.to_owned(),
            invoice_number: format!("INV-{}-{serial:03}", purchase_date.year()),
            purchase,
            purchase_date: Some(purchase_date),
            notes: String::new(),
        }
    }

    pub fn software_license(&mut self) -> SoftwareLicense {
        let serial = self.serial();
        let (name, vendor) = SOFTWARE_TITLES[self.rng.int_n(SOFTWARE_TITLES.len())];
        let license_type = LicenseType::ALL[self.rng.int_n(LicenseType::ALL.len())];
        let renewal_term = RenewalTerm::ALL[self.rng.int_n(RenewalTerm::ALL.len())];
        let start_date = self.date_before(fixture_today(), 0, 700);
        let end_date = match renewal_term {
            RenewalTerm::Monthly => Some(start_date + Duration::days(30)),
            RenewalTerm::Quarterly => Some(start_date + Duration::days(91)),
            RenewalTerm::Annual => Some(start_date + Duration::days(365)),
            RenewalTerm::Perpetual => None,
        };
        let users = match license_type {
            LicenseType::SingleUser => vec![self.person_name()],
            LicenseType::MultiUser => (0..self.int_range(2, 5))
                .map(|_| self.person_name())
                .collect(),
            LicenseType::Floating | LicenseType::SiteLicense => vec!["All Employees".to_owned()],
        };
        let payment = match self.currency() {
            Currency::Usd => Money::usd(self.int_range(1_000, 2_500_000)),
            Currency::Inr => Money::inr(self.int_range(80_000, 200_000_000)),
        };
        let cancelled = self.int_range(1, 10) == 1;
        SoftwareLicense {
            id: RecordId::new(format!("SW-{serial:04}")),
            name: name.to_owned(),
            license_type,
            assigned_users: users,
            start_date,
            end_date,
            renewal_term,
            vendor_name: vendor.to_owned(),
            invoice_number: format!("INV-{}-{serial:03}", start_date.year()),
            payment,
            status: if cancelled {
                LicenseStatus::Cancelled
            } else {
                LicenseStatus::Active
            },
            department: self.pick(&SOFTWARE_DEPARTMENTS).to_owned(),
        }
    }

    pub fn user(&mut self) -> User {
        let serial = self.serial();
        let name = self.person_name();
        let role = match self.int_range(1, 10) {
            1 => UserRole::Admin,
            2 | 3 => UserRole::ItManager,
            _ => UserRole::Employee,
        };
        let last_login = self
            .rng
            .bool()
            .then(|| fixture_now() - Duration::minutes(self.int_range(5, 20_000)));
        User {
            id: RecordId::new(format!("USR-{serial:04}")),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            name,
            role,
            department: self.pick(&DEPARTMENTS).to_owned(),
            join_date: self.date_before(fixture_today(), 30, 1_800),
            last_login,
            status: if self.int_range(1, 5) == 1 {
                UserStatus::Inactive
            } else {
                UserStatus::Active
            },
        }
    }

    pub fn budget_line(&mut self, category: &str) -> BudgetLine {
        let serial = self.serial();
        let budget = self.int_range(5_000, 80_000) * 100;
        let spent = budget * self.int_range(40, 130) / 100;
        BudgetLine {
            id: RecordId::new(format!("BL-{serial:04}")),
            category: category.to_owned(),
            period: fixture_today().year().to_string(),
            budget: Money::usd(budget),
            spent: Money::usd(spent),
        }
    }

    /// `count` records of each kind, one budget line per category.
    pub fn inventory(&mut self, count: usize) -> Inventory {
        Inventory::new(
            (0..count).map(|_| self.asset()).collect(),
            (0..count).map(|_| self.hardware()).collect(),
            (0..count).map(|_| self.software_license()).collect(),
            (0..count).map(|_| self.user()).collect(),
            BUDGET_CATEGORIES
                .iter()
                .map(|category| self.budget_line(category))
                .collect(),
        )
    }

    fn serial(&mut self) -> u32 {
        let serial = self.next_serial;
        self.next_serial += 1;
        serial
    }

    fn currency(&mut self) -> Currency {
        if self.int_range(1, 3) == 1 {
            Currency::Inr
        } else {
            Currency::Usd
        }
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }

    fn date_before(&mut self, anchor: Date, min_days: i64, max_days: i64) -> Date {
        anchor - Duration::days(self.int_range(min_days, max_days))
    }
}

fn tag_prefix(component_type: ComponentType) -> &'static str {
    match component_type {
        ComponentType::Laptop => "LP",
        ComponentType::Desktop => "DT",
        ComponentType::Server => "SRV",
        ComponentType::Monitor => "MN",
        ComponentType::Phone => "PH",
        ComponentType::Tablet => "TB",
        ComponentType::Router => "RT",
        ComponentType::Switch => "SW",
        ComponentType::Printer => "PR",
        ComponentType::Scanner => "SC",
        ComponentType::Other => "OT",
    }
}
