// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use tracing::warn;

use crate::context::SessionContext;
use crate::filter::{Selector, filter};
use crate::forms::RecordForm;
use crate::ids::RecordId;
use crate::mutation;
use crate::record::{DeletePolicy, Record, RecordKind};

#[derive(Debug, Clone, PartialEq)]
pub enum ListCommand<R: Record> {
    SetQuery(String),
    /// Replaces the selector on the same field, or adds one.
    SetSelector(Selector<R::Field>),
    ClearFilters,
    Create(R),
    Update(R),
    SetStatus(RecordId, R::Status),
    Delete(RecordId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    QueryChanged(String),
    SelectorChanged(String),
    FiltersCleared,
    Created(RecordId),
    Updated(RecordId),
    StatusChanged(RecordId),
    Retired(RecordId),
    Removed(RecordId),
    Unchanged(RecordId),
    PermissionDenied(RecordKind),
}

/// One list screen: an owned collection plus its active filters.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<R: Record> {
    records: Vec<R>,
    query: String,
    selectors: Vec<Selector<R::Field>>,
}

impl<R: Record> Default for ListView<R> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<R: Record> ListView<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            query: String::new(),
            selectors: Vec::new(),
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selectors(&self) -> &[Selector<R::Field>] {
        &self.selectors
    }

    pub fn find(&self, id: &RecordId) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Records passing the current query and selectors, in collection order.
    /// Derived fields are evaluated at the session's date.
    pub fn visible(&self, ctx: &SessionContext) -> Vec<R> {
        filter(&self.records, &self.query, &self.selectors, ctx.as_of())
    }

    pub fn dispatch(&mut self, ctx: &SessionContext, command: ListCommand<R>) -> Vec<ListEvent> {
        match command {
            ListCommand::SetQuery(query) => {
                self.query = query;
                vec![ListEvent::QueryChanged(self.query.clone())]
            }
            ListCommand::SetSelector(selector) => {
                let label = selector.to_string();
                match self.selectors.iter_mut().find(|s| s.field == selector.field) {
                    Some(existing) => *existing = selector,
                    None => self.selectors.push(selector),
                }
                vec![ListEvent::SelectorChanged(label)]
            }
            ListCommand::ClearFilters => {
                self.query.clear();
                self.selectors.clear();
                vec![ListEvent::FiltersCleared]
            }
            command => self.mutate(ctx, command),
        }
    }

    /// Validates `form` and routes it to create, or to update when `editing`
    /// names an existing record. Updates keep the fields the form lacks.
    pub fn submit<F>(
        &mut self,
        ctx: &SessionContext,
        form: F,
        editing: Option<RecordId>,
    ) -> Result<Vec<ListEvent>>
    where
        F: RecordForm<Output = R>,
    {
        form.validate()?;
        let command = match editing {
            Some(id) => {
                let Some(previous) = self.find(&id) else {
                    bail!("{} record {id} no longer exists -- reload and retry", R::KIND);
                };
                let record = form.into_record(id, Some(previous))?;
                ListCommand::Update(record)
            }
            None => ListCommand::Create(form.into_record(RecordId::from(""), None)?),
        };
        Ok(self.dispatch(ctx, command))
    }

    fn mutate(&mut self, ctx: &SessionContext, command: ListCommand<R>) -> Vec<ListEvent> {
        if !ctx.current_user.can_mutate(R::KIND) {
            warn!(
                kind = %R::KIND,
                user = %ctx.current_user.name,
                role = %ctx.current_user.role,
                "mutation refused"
            );
            return vec![ListEvent::PermissionDenied(R::KIND)];
        }

        let (next, changed) = match command {
            ListCommand::Create(record) => {
                let next = mutation::create(&self.records, record, ctx.now);
                let id = next.last().map(|record| record.id().clone());
                (next, id.map(ListEvent::Created))
            }
            ListCommand::Update(record) => {
                let id = record.id().clone();
                (mutation::update(&self.records, record), Some(ListEvent::Updated(id)))
            }
            ListCommand::SetStatus(id, status) => (
                mutation::set_status(&self.records, &id, status),
                Some(ListEvent::StatusChanged(id)),
            ),
            ListCommand::Delete(id) => {
                let next = mutation::delete(&self.records, &id, ctx.today);
                let event = match R::KIND.delete_policy() {
                    DeletePolicy::Soft => ListEvent::Retired(id),
                    DeletePolicy::Hard => ListEvent::Removed(id),
                };
                (next, Some(event))
            }
            ListCommand::SetQuery(_) | ListCommand::SetSelector(_) | ListCommand::ClearFilters => {
                return Vec::new();
            }
        };

        if next == self.records {
            let id = match changed {
                Some(
                    ListEvent::Updated(id)
                    | ListEvent::StatusChanged(id)
                    | ListEvent::Retired(id)
                    | ListEvent::Removed(id),
                ) => id,
                _ => RecordId::from(""),
            };
            return vec![ListEvent::Unchanged(id)];
        }
        self.records = next;
        changed.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{ListCommand, ListEvent, ListView};
    use crate::context::{CurrentUser, SessionContext};
    use crate::filter::Selector;
    use crate::forms::HardwareFormInput;
    use crate::model::{
        AssignmentStatus, ComponentType, Hardware, LicenseStatus, LicenseType, RenewalTerm,
        SoftwareLicense, User, UserRole, UserStatus,
    };
    use crate::forms::UserFormInput;
    use crate::record::{HardwareField, RecordKind, SoftwareField};
    use crate::{Currency, Money, RecordId};
    use time::macros::{date, datetime};

    fn ctx(role: UserRole) -> SessionContext {
        SessionContext::new(
            CurrentUser::new("John Doe", role),
            datetime!(2024-01-20 10:30:00 UTC),
        )
    }

    fn hardware(id: &str, status: AssignmentStatus) -> Hardware {
        Hardware {
            id: RecordId::from(id),
            device_name: format!("Device {id}"),
            component_type: ComponentType::Laptop,
            serial_number: format!("SN{id}"),
            asset_tag: format!("OUTM-{id}"),
            assigned_user: None,
            assigned_location: "HQ".to_owned(),
            status,
            start_date: None,
            end_date: None,
            vendor_name: "Apple Inc.".to_owned(),
            invoice_number: format!("INV-{id}"),
            purchase: Money::usd(249_900),
            purchase_date: Some(date!(2023 - 01 - 10)),
            notes: String::new(),
        }
    }

    fn view() -> ListView<Hardware> {
        ListView::new(vec![
            hardware("1", AssignmentStatus::Assigned),
            hardware("2", AssignmentStatus::Available),
        ])
    }

    #[test]
    fn selector_replaces_same_field() {
        let mut view = view();
        let ctx = ctx(UserRole::Employee);
        view.dispatch(
            &ctx,
            ListCommand::SetSelector(Selector::is(HardwareField::Status, "assigned")),
        );
        let events = view.dispatch(
            &ctx,
            ListCommand::SetSelector(Selector::is(HardwareField::Status, "available")),
        );
        assert_eq!(
            events,
            vec![ListEvent::SelectorChanged("status=available".to_owned())]
        );
        assert_eq!(view.selectors().len(), 1);
        let visible = view.visible(&ctx);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id.as_str(), "2");
    }

    #[test]
    fn clear_filters_restores_full_collection() {
        let mut view = view();
        let ctx = ctx(UserRole::Employee);
        view.dispatch(&ctx, ListCommand::SetQuery("zzz".to_owned()));
        assert!(view.visible(&ctx).is_empty());
        view.dispatch(&ctx, ListCommand::ClearFilters);
        assert_eq!(view.visible(&ctx), view.records().to_vec());
    }

    #[test]
    fn employees_cannot_mutate() {
        let mut view = view();
        let before = view.records().to_vec();
        let events = view.dispatch(
            &ctx(UserRole::Employee),
            ListCommand::Delete(RecordId::from("1")),
        );
        assert_eq!(events, vec![ListEvent::PermissionDenied(RecordKind::Hardware)]);
        assert_eq!(view.records(), before.as_slice());
    }

    #[test]
    fn delete_hardware_retires_in_place() {
        let mut view = view();
        let events = view.dispatch(
            &ctx(UserRole::ItManager),
            ListCommand::Delete(RecordId::from("1")),
        );
        assert_eq!(events, vec![ListEvent::Retired(RecordId::from("1"))]);
        assert_eq!(view.records().len(), 2);
        assert_eq!(view.records()[0].status, AssignmentStatus::Scrapped);
        assert_eq!(view.records()[0].end_date, Some(date!(2024 - 01 - 20)));
    }

    #[test]
    fn unknown_id_reports_unchanged() {
        let mut view = view();
        let events = view.dispatch(
            &ctx(UserRole::Admin),
            ListCommand::SetStatus(RecordId::from("9"), AssignmentStatus::UnderRepair),
        );
        assert_eq!(events, vec![ListEvent::Unchanged(RecordId::from("9"))]);
    }

    #[test]
    fn submit_creates_from_valid_form() -> anyhow::Result<()> {
        let mut view = view();
        let form = HardwareFormInput {
            device_name: "Cisco Catalyst 9200".to_owned(),
            component_type: ComponentType::Switch,
            serial_number: "FCW2233L0AB".to_owned(),
            asset_tag: "OUTM-SW-001".to_owned(),
            assigned_user: String::new(),
            assigned_location: "Server Room".to_owned(),
            status: AssignmentStatus::Available,
            start_date: None,
            end_date: None,
            vendor_name: "Cisco".to_owned(),
            invoice_number: "INV-2024-003".to_owned(),
            purchase: "1,800".to_owned(),
            currency: Currency::Usd,
            purchase_date: Some(date!(2024 - 01 - 05)),
            notes: String::new(),
        };
        let events = view.submit(&ctx(UserRole::Admin), form, None)?;
        assert_eq!(
            events,
            vec![ListEvent::Created(RecordId::from("HW-1705746600000"))]
        );
        assert_eq!(view.records().len(), 3);
        assert_eq!(view.records()[2].assigned_user, None);
        assert_eq!(view.records()[2].purchase, Money::usd(180_000));
        Ok(())
    }

    #[test]
    fn submit_rejects_invalid_form_without_touching_records() {
        let mut view = view();
        let form = HardwareFormInput {
            device_name: String::new(),
            component_type: ComponentType::Other,
            serial_number: String::new(),
            asset_tag: String::new(),
            assigned_user: String::new(),
            assigned_location: String::new(),
            status: AssignmentStatus::Available,
            start_date: None,
            end_date: None,
            vendor_name: String::new(),
            invoice_number: String::new(),
            purchase: String::new(),
            currency: Currency::Usd,
            purchase_date: None,
            notes: String::new(),
        };
        assert!(view.submit(&ctx(UserRole::Admin), form, None).is_err());
        assert_eq!(view.records().len(), 2);
    }

    #[test]
    fn it_managers_cannot_touch_users() {
        let mut users = ListView::new(vec![User {
            id: RecordId::from("2"),
            name: "Sarah Smith".to_owned(),
            email: "sarah.smith@company.com".to_owned(),
            role: UserRole::ItManager,
            department: "IT".to_owned(),
            join_date: date!(2023 - 03 - 20),
            last_login: None,
            status: UserStatus::Active,
        }]);
        let events = users.dispatch(
            &ctx(UserRole::ItManager),
            ListCommand::SetStatus(RecordId::from("2"), UserStatus::Inactive),
        );
        assert_eq!(events, vec![ListEvent::PermissionDenied(RecordKind::User)]);

        let events = users.dispatch(
            &ctx(UserRole::Admin),
            ListCommand::Delete(RecordId::from("2")),
        );
        assert_eq!(events, vec![ListEvent::Removed(RecordId::from("2"))]);
        assert!(users.records().is_empty());
    }

    fn jessica() -> User {
        User {
            id: RecordId::from("4"),
            name: "Jessica Wong".to_owned(),
            email: "jessica.wong@company.com".to_owned(),
            role: UserRole::Employee,
            department: "Finance".to_owned(),
            join_date: date!(2023 - 08 - 05),
            last_login: Some(datetime!(2024-01-19 09:20:00 UTC)),
            status: UserStatus::Active,
        }
    }

    #[test]
    fn editing_a_user_keeps_last_login() -> anyhow::Result<()> {
        let mut users = ListView::new(vec![jessica()]);
        let form = UserFormInput {
            name: "Jessica Wong".to_owned(),
            email: "jessica.wong@company.com".to_owned(),
            role: UserRole::Employee,
            department: "Operations".to_owned(),
            join_date: date!(2023 - 08 - 05),
            status: UserStatus::Active,
        };
        let events = users.submit(&ctx(UserRole::Admin), form, Some(RecordId::from("4")))?;
        assert_eq!(events, vec![ListEvent::Updated(RecordId::from("4"))]);
        assert_eq!(users.records()[0].department, "Operations");
        assert_eq!(users.records()[0].last_login, jessica().last_login);
        Ok(())
    }

    #[test]
    fn state_selector_follows_session_date() {
        let license = SoftwareLicense {
            id: RecordId::from("SW-003"),
            name: "Slack Pro".to_owned(),
            license_type: LicenseType::Floating,
            assigned_users: Vec::new(),
            start_date: date!(2023 - 02 - 01),
            end_date: Some(date!(2024 - 02 - 01)),
            renewal_term: RenewalTerm::Annual,
            vendor_name: "Slack Technologies".to_owned(),
            invoice_number: "INV-2023-089".to_owned(),
            payment: Money::usd(120_000),
            status: LicenseStatus::Active,
            department: "IT".to_owned(),
        };
        let mut software = ListView::new(vec![license]);
        let mut ctx = ctx(UserRole::Employee);
        software.dispatch(
            &ctx,
            ListCommand::SetSelector(Selector::is(SoftwareField::State, "expiring_soon")),
        );
        assert_eq!(software.visible(&ctx).len(), 1);

        ctx.today = date!(2024 - 02 - 02);
        assert!(software.visible(&ctx).is_empty());
    }
}
