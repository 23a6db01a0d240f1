// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Collection transitions. Every handler takes the current collection by
//! reference and returns the replacement; the input is never touched.

use time::{Date, Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::ids::RecordId;
use crate::record::{DeletePolicy, Record};

fn position<R: Record>(records: &[R], id: &RecordId) -> Option<usize> {
    records.iter().position(|record| record.id() == id)
}

/// Generates an id from `at`, stepping forward a millisecond at a time past
/// any id already present in `records`.
pub fn fresh_id<R: Record>(records: &[R], at: OffsetDateTime) -> RecordId {
    let mut at = at;
    loop {
        let id = RecordId::generate(R::KIND.id_prefix(), at);
        if position(records, &id).is_none() {
            return id;
        }
        at += Duration::milliseconds(1);
    }
}

/// Appends `record` under a freshly generated id. Any id it carried is replaced.
pub fn create<R: Record>(records: &[R], record: R, at: OffsetDateTime) -> Vec<R> {
    let mut record = record;
    let id = fresh_id(records, at);
    record.assign_id(id.clone());

    let mut next = records.to_vec();
    next.push(record);
    info!(kind = %R::KIND, %id, "record created");
    next
}

/// Replaces the record whose id matches `updated`'s id.
pub fn update<R: Record>(records: &[R], updated: R) -> Vec<R> {
    let mut next = records.to_vec();
    match position(records, updated.id()) {
        Some(index) => {
            info!(kind = %R::KIND, id = %updated.id(), "record updated");
            next[index] = updated;
        }
        None => debug!(kind = %R::KIND, id = %updated.id(), "update skipped: unknown id"),
    }
    next
}

pub fn set_status<R: Record>(records: &[R], id: &RecordId, status: R::Status) -> Vec<R> {
    let mut next = records.to_vec();
    match position(records, id) {
        Some(index) => {
            next[index].set_status(status);
            info!(kind = %R::KIND, %id, "status changed");
        }
        None => debug!(kind = %R::KIND, %id, "status change skipped: unknown id"),
    }
    next
}

/// Soft delete: moves the record to its terminal status and keeps it.
pub fn retire<R: Record>(records: &[R], id: &RecordId, today: Date) -> Vec<R> {
    let mut next = records.to_vec();
    match position(records, id) {
        Some(index) => {
            next[index].retire(today);
            info!(kind = %R::KIND, %id, "record retired");
        }
        None => debug!(kind = %R::KIND, %id, "retire skipped: unknown id"),
    }
    next
}

/// Hard delete.
pub fn remove<R: Record>(records: &[R], id: &RecordId) -> Vec<R> {
    let next = records
        .iter()
        .filter(|record| record.id() != id)
        .cloned()
        .collect::<Vec<_>>();
    if next.len() == records.len() {
        debug!(kind = %R::KIND, %id, "remove skipped: unknown id");
    } else {
        info!(kind = %R::KIND, %id, "record removed");
    }
    next
}

/// Deletes according to the kind's policy.
pub fn delete<R: Record>(records: &[R], id: &RecordId, today: Date) -> Vec<R> {
    match R::KIND.delete_policy() {
        DeletePolicy::Soft => retire(records, id, today),
        DeletePolicy::Hard => remove(records, id),
    }
}

#[cfg(test)]
mod tests {
    use super::{create, delete, fresh_id, remove, set_status, update};
    use crate::model::{
        Asset, AssetCondition, AssetStatus, AssetType, AssignmentStatus, ComponentType, Hardware,
    };
    use crate::record::Record;
    use crate::{Money, RecordId};
    use time::macros::{date, datetime};

    fn laptop(id: &str) -> Asset {
        Asset {
            id: RecordId::from(id),
            name: "MacBook Pro 16\"".to_owned(),
            asset_type: AssetType::Laptop,
            serial_number: "MBP2023001".to_owned(),
            assigned_to: Some("John Smith".to_owned()),
            status: AssetStatus::InUse,
            location: "HQ - Floor 3".to_owned(),
            purchase_date: Some(date!(2023 - 01 - 15)),
            warranty_expiration: Some(date!(2026 - 01 - 15)),
            condition: AssetCondition::Good,
            notes: String::new(),
        }
    }

    fn desktop(id: &str) -> Hardware {
        Hardware {
            id: RecordId::from(id),
            device_name: "Dell OptiPlex 7090".to_owned(),
            component_type: ComponentType::Desktop,
            serial_number: "DL987654321".to_owned(),
            asset_tag: "OUTM-DT-001".to_owned(),
            assigned_user: Some("Mike Chen".to_owned()),
            assigned_location: "Desk 15B".to_owned(),
            status: AssignmentStatus::Assigned,
            start_date: Some(date!(2023 - 03 - 20)),
            end_date: None,
            vendor_name: "Dell Technologies".to_owned(),
            invoice_number: "INV-2023-002".to_owned(),
            purchase: Money::usd(120_000),
            purchase_date: Some(date!(2023 - 03 - 15)),
            notes: String::new(),
        }
    }

    #[test]
    fn create_appends_with_generated_id() {
        let records = vec![laptop("1")];
        let at = datetime!(2024-01-20 10:30:00 UTC);
        let next = create(&records, laptop("ignored"), at);

        assert_eq!(records.len(), 1);
        assert_eq!(next.len(), 2);
        assert_eq!(next[1].id.as_str(), "AS-1705746600000");
        assert_eq!(next[0], records[0]);
    }

    #[test]
    fn fresh_id_steps_past_collisions() {
        let at = datetime!(2024-01-20 10:30:00 UTC);
        let records = vec![laptop("AS-1705746600000")];
        assert_eq!(fresh_id(&records, at).as_str(), "AS-1705746600001");
    }

    #[test]
    fn update_replaces_matching_record_only() {
        let records = vec![laptop("1"), laptop("2")];
        let mut edited = laptop("2");
        edited.location = "Remote".to_owned();

        let next = update(&records, edited.clone());
        assert_eq!(next, vec![laptop("1"), edited]);
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let records = vec![laptop("1")];
        let missing = RecordId::from("404");
        assert_eq!(update(&records, laptop("404")), records);
        assert_eq!(remove(&records, &missing), records);
        assert_eq!(
            set_status(&records, &missing, AssetStatus::Retired),
            records
        );
        assert_eq!(delete(&records, &missing, date!(2024 - 02 - 01)), records);
    }

    #[test]
    fn set_status_touches_one_record() {
        let records = vec![laptop("1"), laptop("2")];
        let next = set_status(&records, &RecordId::from("2"), AssetStatus::UnderRepair);
        assert_eq!(next[0].status, AssetStatus::InUse);
        assert_eq!(next[1].status, AssetStatus::UnderRepair);
    }

    #[test]
    fn delete_hard_removes_assets() {
        let records = vec![laptop("1"), laptop("2")];
        let next = delete(&records, &RecordId::from("1"), date!(2024 - 02 - 01));
        let ids = next.iter().map(|a| a.id().as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn delete_soft_keeps_hardware_in_place() {
        let records = vec![desktop("1"), desktop("2")];
        let today = date!(2024 - 02 - 01);
        let next = delete(&records, &RecordId::from("1"), today);

        assert_eq!(next.len(), 2);
        assert_eq!(next[0].status, AssignmentStatus::Scrapped);
        assert_eq!(next[0].end_date, Some(today));
        assert_eq!(next[1], records[1]);
    }
}
