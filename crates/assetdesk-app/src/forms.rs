// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use time::Date;

use crate::fields::{parse_name_list, parse_optional_money, parse_required_money};
use crate::ids::RecordId;
use crate::model::{
    Asset, AssetCondition, AssetStatus, AssetType, AssignmentStatus, BudgetLine, ComponentType,
    Hardware, LicenseStatus, LicenseType, RenewalTerm, SoftwareLicense, User, UserRole,
    UserStatus,
};
use crate::money::{Currency, Money};
use crate::record::{Record, RecordKind};

/// A create/edit dialog's submitted values for one record kind.
pub trait RecordForm {
    type Output: Record;

    fn validate(&self) -> Result<()>;

    /// Builds the record. `previous` is the stored record when editing and
    /// supplies the fields the dialog does not show.
    fn into_record(self, id: RecordId, previous: Option<&Self::Output>) -> Result<Self::Output>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFormInput {
    pub name: String,
    pub asset_type: AssetType,
    pub serial_number: String,
    pub assigned_to: String,
    pub status: AssetStatus,
    pub location: String,
    pub purchase_date: Option<Date>,
    pub warranty_expiration: Option<Date>,
    pub condition: AssetCondition,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareFormInput {
    pub device_name: String,
    pub component_type: ComponentType,
    pub serial_number: String,
    pub asset_tag: String,
    pub assigned_user: String,
    pub assigned_location: String,
    pub status: AssignmentStatus,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub vendor_name: String,
    pub invoice_number: String,
    /// Amount as typed, e.g. `2,499.00`.
    pub purchase: String,
    pub currency: Currency,
    pub purchase_date: Option<Date>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftwareFormInput {
    pub name: String,
    pub license_type: LicenseType,
    /// Comma-separated names.
    pub assigned_users: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub renewal_term: RenewalTerm,
    pub vendor_name: String,
    pub invoice_number: String,
    pub payment: String,
    pub currency: Currency,
    pub status: LicenseStatus,
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFormInput {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub department: String,
    pub join_date: Date,
    pub status: UserStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetLineFormInput {
    pub category: String,
    pub period: String,
    pub currency: Currency,
    pub budget: String,
    /// Blank for a line with nothing spent yet.
    pub spent: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPayload {
    Asset(AssetFormInput),
    Hardware(HardwareFormInput),
    Software(SoftwareFormInput),
    User(UserFormInput),
    Budget(BudgetLineFormInput),
}

impl FormPayload {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Asset(_) => RecordKind::Asset,
            Self::Hardware(_) => RecordKind::Hardware,
            Self::Software(_) => RecordKind::Software,
            Self::User(_) => RecordKind::User,
            Self::Budget(_) => RecordKind::Budget,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Asset(asset) => asset.validate(),
            Self::Hardware(hardware) => hardware.validate(),
            Self::Software(software) => software.validate(),
            Self::User(user) => user.validate(),
            Self::Budget(budget) => budget.validate(),
        }
    }
}

fn blank_to_none(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn require(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{message}");
    }
    Ok(())
}

fn amount_hint(raw: &str, currency: Currency, label: &str) -> String {
    format!(
        "{label} {:?} is not a {} amount -- enter a non-negative number like 1,299.50 and retry",
        raw.trim(),
        currency.code()
    )
}

fn amount(raw: &str, currency: Currency, label: &str) -> Result<Money> {
    parse_required_money(raw, currency).with_context(|| amount_hint(raw, currency, label))
}

/// Like [`amount`], but a blank entry means zero.
fn optional_amount(raw: &str, currency: Currency, label: &str) -> Result<Money> {
    let parsed =
        parse_optional_money(raw, currency).with_context(|| amount_hint(raw, currency, label))?;
    Ok(parsed.unwrap_or(Money::zero(currency)))
}

impl RecordForm for AssetFormInput {
    type Output = Asset;

    fn validate(&self) -> Result<()> {
        require(&self.name, "asset name is required -- enter a name and retry")?;
        if let (Some(purchase), Some(warranty)) = (self.purchase_date, self.warranty_expiration)
            && warranty < purchase
        {
            bail!("asset warranty expiration must be on/after purchase date");
        }
        Ok(())
    }

    fn into_record(self, id: RecordId, _previous: Option<&Asset>) -> Result<Asset> {
        Ok(Asset {
            id,
            name: self.name.trim().to_owned(),
            asset_type: self.asset_type,
            serial_number: self.serial_number.trim().to_owned(),
            assigned_to: blank_to_none(self.assigned_to),
            status: self.status,
            location: self.location,
            purchase_date: self.purchase_date,
            warranty_expiration: self.warranty_expiration,
            condition: self.condition,
            notes: self.notes,
        })
    }
}

impl RecordForm for HardwareFormInput {
    type Output = Hardware;

    fn validate(&self) -> Result<()> {
        require(
            &self.device_name,
            "device name is required -- enter a name and retry",
        )?;
        require(
            &self.serial_number,
            "serial number is required -- enter the serial and retry",
        )?;
        require(
            &self.asset_tag,
            "asset tag is required -- enter the device id and retry",
        )?;
        require(
            &self.assigned_location,
            "assigned location is required -- enter a location and retry",
        )?;
        require(
            &self.vendor_name,
            "vendor name is required -- enter a vendor and retry",
        )?;
        require(
            &self.invoice_number,
            "invoice number is required -- enter the invoice and retry",
        )?;
        amount(&self.purchase, self.currency, "purchase amount")?;
        if self.purchase_date.is_none() {
            bail!("purchase date is required -- enter a date and retry");
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date)
            && end < start
        {
            bail!("hardware end date must be on/after start date");
        }
        Ok(())
    }

    fn into_record(self, id: RecordId, _previous: Option<&Hardware>) -> Result<Hardware> {
        let purchase = amount(&self.purchase, self.currency, "purchase amount")?;
        Ok(Hardware {
            id,
            device_name: self.device_name.trim().to_owned(),
            component_type: self.component_type,
            serial_number: self.serial_number.trim().to_owned(),
            asset_tag: self.asset_tag.trim().to_owned(),
            assigned_user: blank_to_none(self.assigned_user),
            assigned_location: self.assigned_location,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
            vendor_name: self.vendor_name,
            invoice_number: self.invoice_number,
            purchase,
            purchase_date: self.purchase_date,
            notes: self.notes,
        })
    }
}

impl RecordForm for SoftwareFormInput {
    type Output = SoftwareLicense;

    fn validate(&self) -> Result<()> {
        require(
            &self.name,
            "software name is required -- enter a name and retry",
        )?;
        require(
            &self.vendor_name,
            "vendor name is required -- enter a vendor and retry",
        )?;
        require(
            &self.invoice_number,
            "invoice number is required -- enter the invoice and retry",
        )?;
        amount(&self.payment, self.currency, "payment amount")?;
        match self.end_date {
            None if self.renewal_term != RenewalTerm::Perpetual => {
                bail!("license end date is required unless the term is perpetual");
            }
            Some(end) if end < self.start_date => {
                bail!("license end date must be on/after start date");
            }
            _ => {}
        }
        Ok(())
    }

    fn into_record(
        self,
        id: RecordId,
        _previous: Option<&SoftwareLicense>,
    ) -> Result<SoftwareLicense> {
        let payment = amount(&self.payment, self.currency, "payment amount")?;
        Ok(SoftwareLicense {
            id,
            name: self.name.trim().to_owned(),
            license_type: self.license_type,
            assigned_users: parse_name_list(&self.assigned_users),
            start_date: self.start_date,
            end_date: self.end_date,
            renewal_term: self.renewal_term,
            vendor_name: self.vendor_name,
            invoice_number: self.invoice_number,
            payment,
            status: self.status,
            department: self.department,
        })
    }
}

impl RecordForm for UserFormInput {
    type Output = User;

    fn validate(&self) -> Result<()> {
        require(&self.name, "user name is required -- enter a name and retry")?;
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
            _ => bail!("user email {email:?} is not an address -- enter name@domain and retry"),
        }
        Ok(())
    }

    fn into_record(self, id: RecordId, previous: Option<&User>) -> Result<User> {
        Ok(User {
            id,
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            role: self.role,
            department: self.department,
            join_date: self.join_date,
            last_login: previous.and_then(|user| user.last_login),
            status: self.status,
        })
    }
}

impl RecordForm for BudgetLineFormInput {
    type Output = BudgetLine;

    fn validate(&self) -> Result<()> {
        require(
            &self.category,
            "budget category is required -- enter a category and retry",
        )?;
        amount(&self.budget, self.currency, "budget amount")?;
        optional_amount(&self.spent, self.currency, "spent amount")?;
        Ok(())
    }

    fn into_record(self, id: RecordId, _previous: Option<&BudgetLine>) -> Result<BudgetLine> {
        Ok(BudgetLine {
            id,
            category: self.category.trim().to_owned(),
            period: self.period,
            budget: amount(&self.budget, self.currency, "budget amount")?,
            spent: optional_amount(&self.spent, self.currency, "spent amount")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AssetFormInput, BudgetLineFormInput, FormPayload, RecordForm, SoftwareFormInput,
        UserFormInput,
    };
    use crate::model::{
        AssetCondition, AssetStatus, AssetType, LicenseStatus, LicenseType, RenewalTerm, User,
        UserRole, UserStatus,
    };
    use crate::record::RecordKind;
    use crate::{Currency, Money, RecordId};
    use time::macros::{date, datetime};

    fn asset_input() -> AssetFormInput {
        AssetFormInput {
            name: "Dell Monitor 27\"".to_owned(),
            asset_type: AssetType::Monitor,
            serial_number: "DM2023045".to_owned(),
            assigned_to: "  ".to_owned(),
            status: AssetStatus::InStorage,
            location: "Storage Room B".to_owned(),
            purchase_date: Some(date!(2023 - 03 - 20)),
            warranty_expiration: Some(date!(2026 - 03 - 20)),
            condition: AssetCondition::Good,
            notes: String::new(),
        }
    }

    fn license_input() -> SoftwareFormInput {
        SoftwareFormInput {
            name: "Adobe Creative Cloud".to_owned(),
            license_type: LicenseType::MultiUser,
            assigned_users: "Mike Chen, ,Jessica Wong".to_owned(),
            start_date: date!(2023 - 01 - 01),
            end_date: Some(date!(2024 - 01 - 01)),
            renewal_term: RenewalTerm::Annual,
            vendor_name: "Adobe Inc.".to_owned(),
            invoice_number: "INV-2023-001".to_owned(),
            payment: "599.88".to_owned(),
            currency: Currency::Usd,
            status: LicenseStatus::Active,
            department: "Marketing".to_owned(),
        }
    }

    #[test]
    fn asset_form_builds_record_with_blank_assignee_as_none() -> anyhow::Result<()> {
        let input = asset_input();
        input.validate()?;
        let asset = input.into_record(RecordId::from("AS-1"), None)?;
        assert_eq!(asset.assigned_to, None);
        assert_eq!(asset.id.as_str(), "AS-1");
        Ok(())
    }

    #[test]
    fn asset_form_rejects_empty_name_and_warranty_before_purchase() {
        let mut input = asset_input();
        input.name = " ".to_owned();
        assert!(input.validate().is_err());

        let mut input = asset_input();
        input.warranty_expiration = Some(date!(2022 - 01 - 01));
        assert!(input.validate().is_err());
    }

    #[test]
    fn software_form_requires_end_date_unless_perpetual() {
        let mut input = license_input();
        input.end_date = None;
        assert!(input.validate().is_err());

        input.renewal_term = RenewalTerm::Perpetual;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn software_form_rejects_end_before_start() {
        let mut input = license_input();
        input.end_date = Some(date!(2022 - 12 - 31));
        let error = input.validate().expect_err("end before start");
        assert!(error.to_string().contains("on/after start date"));
    }

    #[test]
    fn software_form_splits_assignees_and_parses_payment() -> anyhow::Result<()> {
        let license = license_input().into_record(RecordId::from("SW-1"), None)?;
        assert_eq!(
            license.assigned_users,
            vec!["Mike Chen".to_owned(), "Jessica Wong".to_owned()]
        );
        assert_eq!(license.payment, Money::usd(59_988));
        Ok(())
    }

    #[test]
    fn software_form_rejects_amount_in_other_currency() {
        let mut input = license_input();
        input.payment = "₹45,000".to_owned();
        let error = input.validate().expect_err("INR amount on a USD form");
        assert!(error.to_string().contains("payment amount"));
        assert!(error.to_string().contains("retry"));
    }

    fn user_input() -> UserFormInput {
        UserFormInput {
            name: "Jessica Wong".to_owned(),
            email: "jessica.wong".to_owned(),
            role: UserRole::Employee,
            department: "Finance".to_owned(),
            join_date: date!(2023 - 08 - 05),
            status: UserStatus::Active,
        }
    }

    #[test]
    fn user_form_checks_email_shape() {
        let mut input = user_input();
        assert!(input.validate().is_err());
        input.email = "jessica.wong@company.com".to_owned();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn user_edit_keeps_last_login() -> anyhow::Result<()> {
        let last_login = Some(datetime!(2024-01-20 11:45:00 UTC));
        let mut input = user_input();
        input.email = "jessica.wong@company.com".to_owned();
        let previous = User {
            last_login,
            ..input.clone().into_record(RecordId::from("4"), None)?
        };

        let edited = input.into_record(RecordId::from("4"), Some(&previous))?;
        assert_eq!(edited.last_login, last_login);
        Ok(())
    }

    #[test]
    fn budget_form_treats_blank_spent_as_zero() -> anyhow::Result<()> {
        let input = BudgetLineFormInput {
            category: "Services".to_owned(),
            period: "2024".to_owned(),
            currency: Currency::Inr,
            budget: "12,00,000".to_owned(),
            spent: " ".to_owned(),
        };
        input.validate()?;
        let line = input.into_record(RecordId::from("BL-9"), None)?;
        assert_eq!(line.budget, Money::inr(120_000_000));
        assert_eq!(line.spent, Money::inr(0));
        Ok(())
    }

    #[test]
    fn budget_form_rejects_negative_amounts() {
        let payload = FormPayload::Budget(BudgetLineFormInput {
            category: "Services".to_owned(),
            period: "2024".to_owned(),
            currency: Currency::Usd,
            budget: "15,000".to_owned(),
            spent: "-100".to_owned(),
        });
        assert_eq!(payload.kind(), RecordKind::Budget);
        assert!(payload.validate().is_err());
    }
}
