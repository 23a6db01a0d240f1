// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::money::{Currency, Money};

pub const DATE_LAYOUT: &str = "YYYY-MM-DD";

pub const NOT_SET: &str = "Not set";
pub const UNASSIGNED: &str = "Unassigned";
pub const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("invalid money value")]
    InvalidMoney,
    #[error("negative money value")]
    NegativeMoney,
    #[error("invalid date value (expected {DATE_LAYOUT})")]
    InvalidDate,
    #[error("amount is in a different currency")]
    CurrencyMismatch,
}

pub type FieldResult<T> = std::result::Result<T, FieldError>;

pub fn parse_required_money(input: &str, currency: Currency) -> FieldResult<Money> {
    parse_minor(input.trim(), currency).map(|minor| Money::new(minor, currency))
}

pub fn parse_optional_money(input: &str, currency: Currency) -> FieldResult<Option<Money>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_required_money(trimmed, currency).map(Some)
}

pub fn parse_required_date(input: &str) -> FieldResult<Date> {
    parse_date(input.trim())
}

pub fn parse_optional_date(input: &str) -> FieldResult<Option<Date>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_date(trimmed).map(Some)
}

/// Splits a comma-separated name list, dropping blanks.
pub fn parse_name_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn format_money(money: Money) -> String {
    let (sign, minor) = normalize_sign(money.minor);
    let whole = minor / 100;
    let remainder = minor % 100;
    format!(
        "{sign}{}{}.{:02}",
        money.currency.symbol(),
        comma_format(whole),
        remainder
    )
}

pub fn format_date(value: Option<Date>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    value
        .format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

pub fn display_date(value: Option<Date>) -> String {
    match value {
        Some(_) => format_date(value),
        None => NOT_SET.to_owned(),
    }
}

pub fn display_assignee(value: Option<&str>) -> &str {
    match value {
        Some(name) if !name.trim().is_empty() => name,
        _ => UNASSIGNED,
    }
}

pub fn display_text(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_SPECIFIED
    } else {
        value
    }
}

/// Shows at most two names, then a `+N more` suffix.
pub fn display_name_list(names: &[String]) -> String {
    if names.is_empty() {
        return UNASSIGNED.to_owned();
    }
    if names.len() <= 2 {
        return names.join(", ");
    }
    format!("{} +{} more", names[..2].join(", "), names.len() - 2)
}

pub fn format_last_login(last_login: Option<OffsetDateTime>, now: OffsetDateTime) -> String {
    let Some(last_login) = last_login else {
        return "Never".to_owned();
    };
    let hours = (now - last_login).whole_hours().max(0);
    if hours < 24 {
        format!("{hours} hours ago")
    } else {
        format!("{} days ago", hours / 24)
    }
}

/// Parses `1,299.50`, `$1,299.50`, `₹65,000` or `65000 INR` into minor units
/// of `currency`. A symbol or code naming the other currency is rejected.
fn parse_minor(input: &str, currency: Currency) -> FieldResult<i64> {
    let (amount, named) = split_currency(input.trim());
    if named.is_some_and(|named| named != currency) {
        return Err(FieldError::CurrencyMismatch);
    }
    let amount = amount.replace(',', "");
    if amount.starts_with('-') {
        return Err(FieldError::NegativeMoney);
    }

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (amount.as_str(), None),
    };
    if whole.is_empty() && fraction.is_none_or(str::is_empty) {
        return Err(FieldError::InvalidMoney);
    }
    let whole = if whole.is_empty() { 0 } else { digits(whole)? };
    let fraction = match fraction {
        None => 0,
        Some(paise) if paise.len() == 1 => digits(paise)? * 10,
        Some(paise) if paise.len() == 2 => digits(paise)?,
        Some(_) => return Err(FieldError::InvalidMoney),
    };

    whole
        .checked_mul(100)
        .and_then(|minor| minor.checked_add(fraction))
        .ok_or(FieldError::InvalidMoney)
}

/// Strips a leading symbol, or an ISO code on either side, and reports which
/// currency it named.
fn split_currency(input: &str) -> (&str, Option<Currency>) {
    for currency in Currency::ALL {
        if let Some(rest) = input.strip_prefix(currency.symbol()) {
            return (rest.trim_start(), Some(currency));
        }
        let code = currency.code();
        if let Some(head) = input.get(..code.len())
            && head.eq_ignore_ascii_case(code)
        {
            return (input[code.len()..].trim_start(), Some(currency));
        }
        if let Some(split) = input.len().checked_sub(code.len())
            && let Some(tail) = input.get(split..)
            && tail.eq_ignore_ascii_case(code)
        {
            return (input[..split].trim_end(), Some(currency));
        }
    }
    (input, None)
}

fn digits(input: &str) -> FieldResult<i64> {
    if input.is_empty() || !input.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(FieldError::InvalidMoney);
    }
    input.parse::<i64>().map_err(|_| FieldError::InvalidMoney)
}

fn parse_date(input: &str) -> FieldResult<Date> {
    Date::parse(input, &format_description!("[year]-[month]-[day]"))
        .map_err(|_| FieldError::InvalidDate)
}

fn comma_format(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn normalize_sign(minor: i64) -> (&'static str, i64) {
    if minor >= 0 {
        return ("", minor);
    }
    if minor == i64::MIN {
        ("-", i64::MAX)
    } else {
        ("-", -minor)
    }
}
