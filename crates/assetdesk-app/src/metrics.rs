// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::ids::RecordId;
use crate::model::{
    Asset, AssetStatus, AssetType, AssignmentStatus, BudgetLine, BudgetStatus, ComponentType,
    Hardware, LicenseState, LicenseStatus, SoftwareLicense, User, UserRole, UserStatus,
};
use crate::money::{Currency, ExchangeRates, Money};

pub const DEFAULT_EXPIRY_WINDOW_DAYS: u32 = 30;
pub const DEFAULT_OVER_TOLERANCE_PERCENT: f64 = 0.0;
pub const DEFAULT_UNDER_TOLERANCE_PERCENT: f64 = 20.0;

/// `round(subset / total * 100)`, defined as 0 for an empty total.
pub fn percentage(subset: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((subset as f64 / total as f64) * 100.0).round() as u32
}

/// `part / whole * 100` rounded to one decimal, 0.0 for a zero whole.
pub fn percent_of(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round1(part as f64 / whole as f64 * 100.0)
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Counts per key, ordered by first appearance.
pub fn tally<R, K, F>(records: &[R], key: F) -> Vec<(K, usize)>
where
    K: PartialEq,
    F: Fn(&R) -> K,
{
    let mut counts: Vec<(K, usize)> = Vec::new();
    for record in records {
        let value = key(record);
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    counts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryStatus {
    Expired,
    ExpiringSoon,
    /// Beyond the window; not yet due.
    Current,
}

/// Inclusive `[today, today + days]` window for upcoming expirations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryWindow {
    pub days: u32,
}

impl Default for ExpiryWindow {
    fn default() -> Self {
        Self {
            days: DEFAULT_EXPIRY_WINDOW_DAYS,
        }
    }
}

impl ExpiryWindow {
    pub const fn new(days: u32) -> Self {
        Self { days }
    }

    pub fn classify(&self, date: Date, today: Date) -> ExpiryStatus {
        if date < today {
            return ExpiryStatus::Expired;
        }
        let horizon = today
            .checked_add(Duration::days(i64::from(self.days)))
            .unwrap_or(Date::MAX);
        if date <= horizon {
            ExpiryStatus::ExpiringSoon
        } else {
            ExpiryStatus::Current
        }
    }

    pub fn contains(&self, date: Date, today: Date) -> bool {
        self.classify(date, today) == ExpiryStatus::ExpiringSoon
    }
}

/// The evaluation point for fields derived at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsOf {
    pub today: Date,
    pub expiry_window: ExpiryWindow,
}

impl AsOf {
    pub fn new(today: Date) -> Self {
        Self {
            today,
            expiry_window: ExpiryWindow::default(),
        }
    }
}

/// Render-time state of a license; cancelled wins over any date.
pub fn license_state(license: &SoftwareLicense, today: Date, window: ExpiryWindow) -> LicenseState {
    if license.status == LicenseStatus::Cancelled {
        return LicenseState::Cancelled;
    }
    match license.end_date.map(|end| window.classify(end, today)) {
        Some(ExpiryStatus::Expired) => LicenseState::Expired,
        Some(ExpiryStatus::ExpiringSoon) => LicenseState::ExpiringSoon,
        Some(ExpiryStatus::Current) | None => LicenseState::Active,
    }
}

pub fn warranty_status(asset: &Asset, today: Date, window: ExpiryWindow) -> Option<ExpiryStatus> {
    asset
        .warranty_expiration
        .map(|expiry| window.classify(expiry, today))
}

/// Sums `amounts` after converting each into `currency`.
pub fn sum_in<I>(amounts: I, currency: Currency, rates: &ExchangeRates) -> Money
where
    I: IntoIterator<Item = Money>,
{
    let minor = amounts
        .into_iter()
        .map(|amount| rates.convert(amount, currency).minor)
        .fold(0i64, i64::saturating_add);
    Money::new(minor, currency)
}

/// `(spent - budget) / budget * 100` to one decimal; positive means overspent.
pub fn variance_percent(budget: i64, spent: i64) -> f64 {
    percent_of(spent - budget, budget)
}

/// Bounds, in percent, that a variance may reach before leaving `on_track`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarianceTolerance {
    pub over_percent: f64,
    pub under_percent: f64,
}

impl Default for VarianceTolerance {
    fn default() -> Self {
        Self {
            over_percent: DEFAULT_OVER_TOLERANCE_PERCENT,
            under_percent: DEFAULT_UNDER_TOLERANCE_PERCENT,
        }
    }
}

impl VarianceTolerance {
    pub fn classify(&self, variance: f64) -> BudgetStatus {
        if variance > self.over_percent {
            BudgetStatus::OverBudget
        } else if variance < -self.under_percent {
            BudgetStatus::UnderBudget
        } else {
            BudgetStatus::OnTrack
        }
    }
}

/// Inputs every derived metric is computed against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsOptions {
    pub currency: Currency,
    pub rates: ExchangeRates,
    pub today: Date,
    pub expiry_window: ExpiryWindow,
    pub tolerance: VarianceTolerance,
}

impl MetricsOptions {
    pub fn new(currency: Currency, today: Date) -> Self {
        Self {
            currency,
            rates: ExchangeRates::default(),
            today,
            expiry_window: ExpiryWindow::default(),
            tolerance: VarianceTolerance::default(),
        }
    }

    pub fn as_of(&self) -> AsOf {
        AsOf {
            today: self.today,
            expiry_window: self.expiry_window,
        }
    }

    fn convert(&self, money: Money) -> Money {
        self.rates.convert(money, self.currency)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share<K> {
    pub key: K,
    pub count: usize,
    pub percent: u32,
}

fn shares<K: Copy + PartialEq>(keys: &[K], values: impl Iterator<Item = K>) -> Vec<Share<K>> {
    let values = values.collect::<Vec<_>>();
    let total = values.len();
    keys.iter()
        .map(|key| {
            let count = values.iter().filter(|value| *value == key).count();
            Share {
                key: *key,
                count,
                percent: percentage(count, total),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSummary {
    pub total: usize,
    pub in_use: usize,
    pub in_storage: usize,
    pub under_repair: usize,
    pub retired: usize,
    pub warranty_expiring: usize,
    pub warranty_expired: usize,
    pub utilization_percent: u32,
    /// Whole months since purchase, averaged over assets with a purchase date.
    pub average_age_months: u32,
    pub by_type: Vec<Share<AssetType>>,
    pub by_location: Vec<Share<String>>,
}

/// Whole calendar months from `since` to `today`, 0 when `since` is in the future.
pub fn months_between(since: Date, today: Date) -> u32 {
    let mut months = (today.year() - since.year()) * 12
        + (i32::from(u8::from(today.month())) - i32::from(u8::from(since.month())));
    if today.day() < since.day() {
        months -= 1;
    }
    u32::try_from(months).unwrap_or(0)
}

pub fn summarize_assets(assets: &[Asset], options: &MetricsOptions) -> AssetSummary {
    let count = |status: AssetStatus| assets.iter().filter(|a| a.status == status).count();
    let warranty = |wanted: ExpiryStatus| {
        assets
            .iter()
            .filter(|asset| {
                warranty_status(asset, options.today, options.expiry_window) == Some(wanted)
            })
            .count()
    };
    let in_use = count(AssetStatus::InUse);
    let ages = assets
        .iter()
        .filter_map(|asset| asset.purchase_date)
        .map(|purchased| months_between(purchased, options.today))
        .collect::<Vec<_>>();
    let average_age_months = if ages.is_empty() {
        0
    } else {
        (ages.iter().map(|age| f64::from(*age)).sum::<f64>() / ages.len() as f64).round() as u32
    };
    let by_location = tally(assets, |asset| asset.location.trim().to_owned())
        .into_iter()
        .map(|(location, count)| Share {
            key: location,
            count,
            percent: percentage(count, assets.len()),
        })
        .collect();

    AssetSummary {
        total: assets.len(),
        in_use,
        in_storage: count(AssetStatus::InStorage),
        under_repair: count(AssetStatus::UnderRepair),
        retired: count(AssetStatus::Retired),
        warranty_expiring: warranty(ExpiryStatus::ExpiringSoon),
        warranty_expired: warranty(ExpiryStatus::Expired),
        utilization_percent: percentage(in_use, assets.len()),
        average_age_months,
        by_type: shares(&AssetType::ALL, assets.iter().map(|a| a.asset_type)),
        by_location,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareSummary {
    pub total: usize,
    pub by_status: Vec<Share<AssignmentStatus>>,
    pub by_type: Vec<Share<ComponentType>>,
    /// Purchase value of hardware not yet scrapped, in the selected currency.
    pub active_value: Money,
}

pub fn summarize_hardware(hardware: &[Hardware], options: &MetricsOptions) -> HardwareSummary {
    HardwareSummary {
        total: hardware.len(),
        by_status: shares(&AssignmentStatus::ALL, hardware.iter().map(|h| h.status)),
        by_type: tally(hardware, |h| h.component_type)
            .into_iter()
            .map(|(key, count)| Share {
                key,
                count,
                percent: percentage(count, hardware.len()),
            })
            .collect(),
        active_value: sum_in(
            hardware
                .iter()
                .filter(|h| h.status != AssignmentStatus::Scrapped)
                .map(|h| h.purchase),
            options.currency,
            &options.rates,
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftwareSummary {
    pub total: usize,
    pub active: usize,
    pub expiring_soon: usize,
    pub expired: usize,
    pub cancelled: usize,
    pub total_cost: Money,
}

pub fn summarize_software(
    licenses: &[SoftwareLicense],
    options: &MetricsOptions,
) -> SoftwareSummary {
    let states = licenses
        .iter()
        .map(|license| license_state(license, options.today, options.expiry_window))
        .collect::<Vec<_>>();
    let count = |wanted: LicenseState| states.iter().filter(|state| **state == wanted).count();

    SoftwareSummary {
        total: licenses.len(),
        active: count(LicenseState::Active),
        expiring_soon: count(LicenseState::ExpiringSoon),
        expired: count(LicenseState::Expired),
        cancelled: count(LicenseState::Cancelled),
        total_cost: sum_in(
            licenses.iter().map(|license| license.payment),
            options.currency,
            &options.rates,
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub total: usize,
    pub active: usize,
    pub admins: usize,
    pub it_managers: usize,
}

pub fn summarize_users(users: &[User]) -> UserSummary {
    UserSummary {
        total: users.len(),
        active: users
            .iter()
            .filter(|u| u.status == UserStatus::Active)
            .count(),
        admins: users.iter().filter(|u| u.role == UserRole::Admin).count(),
        it_managers: users
            .iter()
            .filter(|u| u.role == UserRole::ItManager)
            .count(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRow {
    pub id: RecordId,
    pub category: String,
    pub budget: Money,
    pub spent: Money,
    pub remaining: Money,
    pub variance_percent: f64,
    pub status: BudgetStatus,
    pub share_of_spend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total_budget: Money,
    pub total_spent: Money,
    pub remaining: Money,
    pub percent_spent: f64,
    pub percent_remaining: f64,
    pub rows: Vec<BudgetRow>,
}

pub fn budget_row(line: &BudgetLine, options: &MetricsOptions, total_spent: i64) -> BudgetRow {
    let budget = options.convert(line.budget);
    let spent = options.convert(line.spent);
    let variance = variance_percent(budget.minor, spent.minor);
    BudgetRow {
        id: line.id.clone(),
        category: line.category.clone(),
        budget,
        spent,
        remaining: Money::new(budget.minor - spent.minor, options.currency),
        variance_percent: variance,
        status: options.tolerance.classify(variance),
        share_of_spend: percent_of(spent.minor, total_spent),
    }
}

pub fn summarize_budget(lines: &[BudgetLine], options: &MetricsOptions) -> BudgetSummary {
    let total_budget = sum_in(lines.iter().map(|l| l.budget), options.currency, &options.rates);
    let total_spent = sum_in(lines.iter().map(|l| l.spent), options.currency, &options.rates);
    let remaining = total_budget.minor - total_spent.minor;

    BudgetSummary {
        total_budget,
        total_spent,
        remaining: Money::new(remaining, options.currency),
        percent_spent: percent_of(total_spent.minor, total_budget.minor),
        percent_remaining: percent_of(remaining, total_budget.minor),
        rows: lines
            .iter()
            .map(|line| budget_row(line, options, total_spent.minor))
            .collect(),
    }
}
