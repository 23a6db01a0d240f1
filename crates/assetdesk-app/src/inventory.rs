// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;

use crate::context::SessionContext;
use crate::filter::matches_query;
use crate::forms::FormPayload;
use crate::ids::RecordId;
use crate::model::{Asset, BudgetLine, Hardware, SoftwareLicense, User};
use crate::record::{AnyRecord, Record};
use crate::view::{ListEvent, ListView};

/// The five list views of one session. Each view owns its collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    pub assets: ListView<Asset>,
    pub hardware: ListView<Hardware>,
    pub software: ListView<SoftwareLicense>,
    pub users: ListView<User>,
    pub budget: ListView<BudgetLine>,
}

fn hits<R>(records: &[R], query: &str) -> impl Iterator<Item = AnyRecord>
where
    R: Record + Into<AnyRecord>,
{
    records
        .iter()
        .filter(move |record| matches_query(*record, query))
        .cloned()
        .map(Into::into)
}

impl Inventory {
    pub fn new(
        assets: Vec<Asset>,
        hardware: Vec<Hardware>,
        software: Vec<SoftwareLicense>,
        users: Vec<User>,
        budget: Vec<BudgetLine>,
    ) -> Self {
        Self {
            assets: ListView::new(assets),
            hardware: ListView::new(hardware),
            software: ListView::new(software),
            users: ListView::new(users),
            budget: ListView::new(budget),
        }
    }

    /// Header search across every collection, grouped by kind. User records
    /// are only searched for sessions allowed to manage users. An empty
    /// query returns nothing.
    pub fn search(&self, ctx: &SessionContext, query: &str) -> Vec<AnyRecord> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let mut found = Vec::new();
        found.extend(hits(self.assets.records(), query));
        found.extend(hits(self.hardware.records(), query));
        found.extend(hits(self.software.records(), query));
        if ctx.current_user.can_manage_users() {
            found.extend(hits(self.users.records(), query));
        }
        found.extend(hits(self.budget.records(), query));
        found
    }

    /// Routes a submitted form to the view that owns its kind.
    pub fn submit(
        &mut self,
        ctx: &SessionContext,
        payload: FormPayload,
        editing: Option<RecordId>,
    ) -> Result<Vec<ListEvent>> {
        match payload {
            FormPayload::Asset(form) => self.assets.submit(ctx, form, editing),
            FormPayload::Hardware(form) => self.hardware.submit(ctx, form, editing),
            FormPayload::Software(form) => self.software.submit(ctx, form, editing),
            FormPayload::User(form) => self.users.submit(ctx, form, editing),
            FormPayload::Budget(form) => self.budget.submit(ctx, form, editing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Inventory;
    use crate::context::{CurrentUser, SessionContext};
    use crate::forms::{BudgetLineFormInput, FormPayload};
    use crate::model::{BudgetLine, User, UserRole, UserStatus};
    use crate::record::RecordKind;
    use crate::view::ListEvent;
    use crate::{Currency, Money, RecordId};
    use time::macros::{date, datetime};

    fn ctx(role: UserRole) -> SessionContext {
        SessionContext::new(
            CurrentUser::new("John Doe", role),
            datetime!(2024-01-20 10:30:00 UTC),
        )
    }

    fn inventory() -> Inventory {
        Inventory::new(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            vec![User {
                id: RecordId::from("1"),
                name: "Mike Chen".to_owned(),
                email: "mike.chen@company.com".to_owned(),
                role: UserRole::Employee,
                department: "Engineering".to_owned(),
                join_date: date!(2023 - 02 - 01),
                last_login: None,
                status: UserStatus::Active,
            }],
            vec![BudgetLine {
                id: RecordId::from("BL-1"),
                category: "Engineering Tools".to_owned(),
                period: "2024".to_owned(),
                budget: Money::usd(100_000),
                spent: Money::usd(50_000),
            }],
        )
    }

    #[test]
    fn search_spans_kinds_and_hides_users_from_non_admins() {
        let inventory = inventory();

        let kinds = inventory
            .search(&ctx(UserRole::Admin), "engineering")
            .iter()
            .map(|hit| hit.kind())
            .collect::<Vec<_>>();
        assert_eq!(kinds, vec![RecordKind::User, RecordKind::Budget]);

        let kinds = inventory
            .search(&ctx(UserRole::ItManager), "engineering")
            .iter()
            .map(|hit| hit.kind())
            .collect::<Vec<_>>();
        assert_eq!(kinds, vec![RecordKind::Budget]);
    }

    #[test]
    fn blank_search_finds_nothing() {
        assert!(inventory().search(&ctx(UserRole::Admin), "  ").is_empty());
    }

    #[test]
    fn submit_routes_payload_to_owning_view() -> anyhow::Result<()> {
        let mut inventory = inventory();
        let events = inventory.submit(
            &ctx(UserRole::ItManager),
            FormPayload::Budget(BudgetLineFormInput {
                category: "Engineering Tools".to_owned(),
                period: "2024".to_owned(),
                currency: Currency::Usd,
                budget: "1,000".to_owned(),
                spent: "750".to_owned(),
            }),
            Some(RecordId::from("BL-1")),
        )?;
        assert_eq!(events, vec![ListEvent::Updated(RecordId::from("BL-1"))]);
        assert_eq!(inventory.budget.records()[0].spent, Money::usd(75_000));
        Ok(())
    }

    #[test]
    fn submit_for_missing_record_is_an_error() {
        let mut inventory = inventory();
        let result = inventory.submit(
            &ctx(UserRole::Admin),
            FormPayload::Budget(BudgetLineFormInput {
                category: "Travel".to_owned(),
                period: "2024".to_owned(),
                currency: Currency::Usd,
                budget: "1".to_owned(),
                spent: String::new(),
            }),
            Some(RecordId::from("BL-404")),
        );
        assert!(result.is_err());
    }
}
