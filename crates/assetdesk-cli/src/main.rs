// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod report;

use anyhow::{Context, Result, anyhow};
use assetdesk_app::fields::parse_required_date;
use assetdesk_app::{Currency, RecordKind};
use config::Config;
use report::{OutputFormat, render_search, render_view};
use std::env;
use std::io::Write;
use std::path::PathBuf;
use time::{Date, OffsetDateTime};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SEEDED_RECORDS_PER_KIND: usize = 25;
const DEFAULT_LOG_DIRECTIVES: &str = "assetdesk=info";

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` when set and non-blank, otherwise [`DEFAULT_LOG_DIRECTIVES`].
fn log_filter(rust_log: Option<&str>) -> Result<EnvFilter> {
    let directives = match rust_log.map(str::trim) {
        Some(directives) if !directives.is_empty() => directives,
        _ => DEFAULT_LOG_DIRECTIVES,
    };
    EnvFilter::try_new(directives)
        .with_context(|| format!("parse {} directives {directives:?}", EnvFilter::DEFAULT_ENV))
}

fn init_tracing() -> Result<()> {
    let rust_log = env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(rust_log.as_deref())?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run() -> Result<()> {
    init_tracing()?;

    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `assetdesk --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    if options.check_only {
        info!(path = %options.config_path.display(), "config ok");
        return Ok(());
    }

    let mut ctx = config.session_context(OffsetDateTime::now_utc());
    if let Some(currency) = options.currency {
        ctx.currency = currency;
    }
    if let Some(today) = options.today {
        ctx.today = today;
        ctx.now = ctx.now.replace_date(today);
    }

    let mut inventory = match options.seed {
        Some(seed) => {
            assetdesk_testkit::OfficeFaker::new(seed).inventory(SEEDED_RECORDS_PER_KIND)
        }
        None => assetdesk_testkit::sample_inventory(),
    };
    info!(
        user = %ctx.current_user.name,
        role = %ctx.current_user.role,
        currency = ctx.currency.code(),
        today = %ctx.today,
        "session started"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match (options.view, options.search.as_deref()) {
        (None, Some(query)) => render_search(&mut out, &inventory, &ctx, query, options.format)?,
        (view, query) => render_view(
            &mut out,
            &mut inventory,
            &ctx,
            view.unwrap_or(RecordKind::Asset),
            query.unwrap_or_default(),
            &options.filters,
            options.format,
        )?,
    }
    out.flush().context("flush output")?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    view: Option<RecordKind>,
    search: Option<String>,
    filters: Vec<String>,
    currency: Option<Currency>,
    format: OutputFormat,
    seed: Option<u64>,
    today: Option<Date>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        view: None,
        search: None,
        filters: Vec::new(),
        currency: None,
        format: OutputFormat::Table,
        seed: None,
        today: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--view" => {
                let value = next_value(&mut iter, "--view")?;
                options.view = Some(RecordKind::parse(&value).ok_or_else(|| {
                    anyhow!(
                        "unknown view {value:?}; choose one of assets, hardware, software, users, budget"
                    )
                })?);
            }
            "--search" => {
                options.search = Some(next_value(&mut iter, "--search")?);
            }
            "--filter" => {
                options.filters.push(next_value(&mut iter, "--filter")?);
            }
            "--currency" => {
                let value = next_value(&mut iter, "--currency")?;
                options.currency = Some(
                    Currency::parse(&value)
                        .ok_or_else(|| anyhow!("unknown currency {value:?}; choose USD or INR"))?,
                );
            }
            "--format" => {
                let value = next_value(&mut iter, "--format")?;
                options.format = OutputFormat::parse(&value).ok_or_else(|| {
                    anyhow!("unknown format {value:?}; choose table, csv, or json")
                })?;
            }
            "--seed" => {
                let value = next_value(&mut iter, "--seed")?;
                options.seed = Some(
                    value
                        .parse()
                        .with_context(|| format!("--seed expects an integer, got {value:?}"))?,
                );
            }
            "--today" => {
                let value = next_value(&mut iter, "--today")?;
                options.today = Some(
                    parse_required_date(&value)
                        .with_context(|| format!("--today expects YYYY-MM-DD, got {value:?}"))?,
                );
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn next_value<I, S>(iter: &mut I, flag: &str) -> Result<String>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    iter.next()
        .map(|value| value.as_ref().to_owned())
        .ok_or_else(|| anyhow!("{flag} requires a value"))
}

fn print_help() {
    println!("assetdesk");
    println!("  --config <path>          Use a specific config path");
    println!("  --view <kind>            assets, hardware, software, users, or budget");
    println!("  --search <text>          Filter by text; without --view, search every kind");
    println!("  --filter <field=value>   Categorical filter, repeatable; value `all` disables it");
    println!("  --currency <code>        Show totals in USD or INR");
    println!("  --format <fmt>           table, csv, or json");
    println!("  --seed <n>               Use generated records instead of the samples");
    println!("  --today <YYYY-MM-DD>     Evaluate expiry against this date");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Validate config and exit");
    println!("  --help                   Show this help");
}
