// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::metrics::{AsOf, ExpiryWindow, MetricsOptions, VarianceTolerance};
use crate::model::UserRole;
use crate::money::{Currency, ExchangeRates};
use crate::record::RecordKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub name: String,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn new(name: impl Into<String>, role: UserRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    /// Admins and IT managers may create, edit, and delete inventory records.
    pub fn can_edit(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::ItManager)
    }

    pub fn can_manage_users(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn can_mutate(&self, kind: RecordKind) -> bool {
        match kind {
            RecordKind::User => self.can_manage_users(),
            RecordKind::Asset | RecordKind::Hardware | RecordKind::Software | RecordKind::Budget => {
                self.can_edit()
            }
        }
    }
}

/// Everything a view needs from its surroundings, passed in explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    pub current_user: CurrentUser,
    pub currency: Currency,
    pub today: Date,
    pub now: OffsetDateTime,
    pub rates: ExchangeRates,
    pub expiry_window: ExpiryWindow,
    pub tolerance: VarianceTolerance,
}

impl SessionContext {
    pub fn new(current_user: CurrentUser, now: OffsetDateTime) -> Self {
        Self {
            current_user,
            currency: Currency::Usd,
            today: now.date(),
            now,
            rates: ExchangeRates::default(),
            expiry_window: ExpiryWindow::default(),
            tolerance: VarianceTolerance::default(),
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// The session's date for derived fields such as license state.
    pub fn as_of(&self) -> AsOf {
        AsOf {
            today: self.today,
            expiry_window: self.expiry_window,
        }
    }

    pub fn metrics_options(&self) -> MetricsOptions {
        MetricsOptions {
            currency: self.currency,
            rates: self.rates,
            today: self.today,
            expiry_window: self.expiry_window,
            tolerance: self.tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CurrentUser, SessionContext};
    use crate::model::UserRole;
    use crate::money::Currency;
    use crate::record::RecordKind;
    use time::macros::{date, datetime};

    #[test]
    fn edit_rights_follow_role() {
        assert!(CurrentUser::new("John Doe", UserRole::Admin).can_edit());
        assert!(CurrentUser::new("Sarah Smith", UserRole::ItManager).can_edit());
        assert!(!CurrentUser::new("Mike Johnson", UserRole::Employee).can_edit());
    }

    #[test]
    fn only_admins_manage_users() {
        assert!(CurrentUser::new("John Doe", UserRole::Admin).can_manage_users());
        assert!(!CurrentUser::new("Sarah Smith", UserRole::ItManager).can_manage_users());
    }

    #[test]
    fn user_records_need_user_management() {
        let manager = CurrentUser::new("Sarah Smith", UserRole::ItManager);
        assert!(manager.can_mutate(RecordKind::Hardware));
        assert!(!manager.can_mutate(RecordKind::User));
    }

    #[test]
    fn metrics_options_mirror_session() {
        let ctx = SessionContext::new(
            CurrentUser::new("John Doe", UserRole::Admin),
            datetime!(2024-01-20 10:30:00 UTC),
        )
        .with_currency(Currency::Inr);
        let options = ctx.metrics_options();
        assert_eq!(options.currency, Currency::Inr);
        assert_eq!(options.today, date!(2024 - 01 - 20));
        assert_eq!(options.expiry_window.days, 30);
        assert_eq!(options.as_of(), ctx.as_of());
    }
}
