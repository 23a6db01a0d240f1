// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use assetdesk_app::fields::{format_last_login, format_money};
use assetdesk_app::filter::parse_selector;
use assetdesk_app::metrics::{
    BudgetRow, license_state, summarize_assets, summarize_budget, summarize_hardware,
    summarize_software, summarize_users,
};
use assetdesk_app::{
    AnyRecord, Inventory, LicenseState, ListCommand, ListView, Record, RecordKind, SessionContext,
    SoftwareLicense,
};
use serde::Serialize;
use std::io::Write;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "table" => Some(Self::Table),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// A rendered list: header, string cells, and the serializable records behind them.
struct Listing<T> {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    records: Vec<T>,
}

/// A license plus its state as of the session date.
#[derive(Debug, Serialize)]
struct LicenseRow {
    #[serde(flatten)]
    license: SoftwareLicense,
    state: LicenseState,
}

/// Applies `--search` and `--filter` values to a view through its commands.
pub fn apply_filters<R: Record>(
    view: &mut ListView<R>,
    ctx: &SessionContext,
    query: &str,
    filters: &[String],
) -> Result<()> {
    view.dispatch(ctx, ListCommand::SetQuery(query.to_owned()));
    for raw in filters {
        let selector = parse_selector::<R>(raw)?;
        debug!(kind = %R::KIND, %selector, "filter applied");
        view.dispatch(ctx, ListCommand::SetSelector(selector));
    }
    Ok(())
}

/// Writes the filtered view of `kind` in `format`.
pub fn render_view(
    out: &mut dyn Write,
    inventory: &mut Inventory,
    ctx: &SessionContext,
    kind: RecordKind,
    query: &str,
    filters: &[String],
    format: OutputFormat,
) -> Result<()> {
    if kind == RecordKind::User && !ctx.current_user.can_manage_users() {
        bail!(
            "the users view requires the admin role (current role: {}) -- set [session].role = \"admin\" and retry",
            ctx.current_user.role
        );
    }

    let options = ctx.metrics_options();
    match kind {
        RecordKind::Asset => {
            apply_filters(&mut inventory.assets, ctx, query, filters)?;
            if format == OutputFormat::Table {
                let summary = summarize_assets(inventory.assets.records(), &options);
                writeln!(
                    out,
                    "{} assets, {} in use ({}% utilization), {} under repair, {} warranties expiring, {} expired; average age {} months",
                    summary.total,
                    summary.in_use,
                    summary.utilization_percent,
                    summary.under_repair,
                    summary.warranty_expiring,
                    summary.warranty_expired,
                    summary.average_age_months,
                )?;
            }
            write_listing(out, plain_listing(&inventory.assets.visible(ctx)), format)
        }
        RecordKind::Hardware => {
            apply_filters(&mut inventory.hardware, ctx, query, filters)?;
            if format == OutputFormat::Table {
                let summary = summarize_hardware(inventory.hardware.records(), &options);
                let counts = summary
                    .by_status
                    .iter()
                    .map(|share| format!("{} {}", share.count, share.key.label()))
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(
                    out,
                    "{} devices ({counts}); active value {}",
                    summary.total,
                    format_money(summary.active_value)
                )?;
            }
            write_listing(out, plain_listing(&inventory.hardware.visible(ctx)), format)
        }
        RecordKind::Software => {
            apply_filters(&mut inventory.software, ctx, query, filters)?;
            if format == OutputFormat::Table {
                let summary = summarize_software(inventory.software.records(), &options);
                writeln!(
                    out,
                    "{} licenses: {} active, {} expiring soon, {} expired, {} cancelled; total cost {}",
                    summary.total,
                    summary.active,
                    summary.expiring_soon,
                    summary.expired,
                    summary.cancelled,
                    format_money(summary.total_cost)
                )?;
            }
            let visible = inventory.software.visible(ctx);
            let mut columns = SoftwareLicense::columns()
                .iter()
                .chain(&["state"])
                .map(|c| (*c).to_owned())
                .collect::<Vec<_>>();
            let records = visible
                .into_iter()
                .map(|license| LicenseRow {
                    state: license_state(&license, ctx.today, ctx.expiry_window),
                    license,
                })
                .collect::<Vec<_>>();
            let rows = records
                .iter()
                .map(|row| {
                    let mut cells = row.license.row();
                    cells.push(row.state.label());
                    cells
                })
                .collect();
            write_listing(
                out,
                Listing {
                    columns,
                    rows,
                    records,
                },
                format,
            )
        }
        RecordKind::User => {
            apply_filters(&mut inventory.users, ctx, query, filters)?;
            if format == OutputFormat::Table {
                let summary = summarize_users(inventory.users.records());
                writeln!(
                    out,
                    "{} users, {} active, {} admins, {} IT managers",
                    summary.total, summary.active, summary.admins, summary.it_managers
                )?;
            }
            let visible = inventory.users.visible(ctx);
            let mut listing = plain_listing(&visible);
            listing.columns.push("last login".to_owned());
            for (row, user) in listing.rows.iter_mut().zip(&visible) {
                row.push(format_last_login(user.last_login, ctx.now));
            }
            write_listing(out, listing, format)
        }
        RecordKind::Budget => {
            apply_filters(&mut inventory.budget, ctx, query, filters)?;
            let summary = summarize_budget(inventory.budget.records(), &options);
            if format == OutputFormat::Table {
                writeln!(
                    out,
                    "budget {}, spent {} ({}%), remaining {} ({}%)",
                    format_money(summary.total_budget),
                    format_money(summary.total_spent),
                    summary.percent_spent,
                    format_money(summary.remaining),
                    summary.percent_remaining,
                )?;
            }
            let visible = inventory.budget.visible(ctx);
            let rows = summary
                .rows
                .into_iter()
                .filter(|row| visible.iter().any(|line| line.id() == &row.id))
                .collect::<Vec<_>>();
            write_listing(out, budget_listing(rows), format)
        }
    }
}

/// Writes header search hits across every collection the session may see.
pub fn render_search(
    out: &mut dyn Write,
    inventory: &Inventory,
    ctx: &SessionContext,
    query: &str,
    format: OutputFormat,
) -> Result<()> {
    let hits = inventory.search(ctx, query);
    debug!(query, hits = hits.len(), "global search");
    let listing = Listing {
        columns: ["kind", "id", "title"].map(str::to_owned).to_vec(),
        rows: hits
            .iter()
            .map(|hit| {
                vec![
                    hit.kind().to_string(),
                    hit.id().to_string(),
                    hit.title().to_owned(),
                ]
            })
            .collect(),
        records: hits,
    };
    write_listing::<AnyRecord>(out, listing, format)
}

fn plain_listing<R: Record + Serialize>(records: &[R]) -> Listing<R> {
    Listing {
        columns: R::columns().iter().map(|c| (*c).to_owned()).collect(),
        rows: records.iter().map(Record::row).collect(),
        records: records.to_vec(),
    }
}

fn budget_listing(rows: Vec<BudgetRow>) -> Listing<BudgetRow> {
    Listing {
        columns: [
            "id",
            "category",
            "budget",
            "spent",
            "remaining",
            "variance",
            "status",
            "share of spend",
        ]
        .map(str::to_owned)
        .to_vec(),
        rows: rows
            .iter()
            .map(|row| {
                vec![
                    row.id.to_string(),
                    row.category.clone(),
                    format_money(row.budget),
                    format_money(row.spent),
                    format_money(row.remaining),
                    format!("{:+.1}%", row.variance_percent),
                    row.status.label(),
                    format!("{:.1}%", row.share_of_spend),
                ]
            })
            .collect(),
        records: rows,
    }
}

fn write_listing<T: Serialize>(
    out: &mut dyn Write,
    listing: Listing<T>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(out, &listing.columns, &listing.rows),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(&listing.columns).context("write CSV header")?;
            for row in &listing.rows {
                writer.write_record(row).context("write CSV row")?;
            }
            writer.flush().context("flush CSV output")?;
            Ok(())
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &listing.records)
                .context("encode JSON output")?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn write_table(out: &mut dyn Write, columns: &[String], rows: &[Vec<String>]) -> Result<()> {
    if rows.is_empty() {
        writeln!(out, "no matching records")?;
        return Ok(());
    }

    let mut widths = columns
        .iter()
        .map(|c| c.chars().count())
        .collect::<Vec<_>>();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}", width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_owned()
    };
    writeln!(out, "{}", line(columns))?;
    writeln!(
        out,
        "{}",
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  ")
    )?;
    for row in rows {
        writeln!(out, "{}", line(row))?;
    }
    Ok(())
}
