// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use assetdesk_app::metrics::{
    DEFAULT_EXPIRY_WINDOW_DAYS, DEFAULT_OVER_TOLERANCE_PERCENT, DEFAULT_UNDER_TOLERANCE_PERCENT,
    ExpiryWindow, VarianceTolerance,
};
use assetdesk_app::{
    Currency, CurrentUser, DEFAULT_INR_PER_USD, ExchangeRates, SessionContext, UserRole,
};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tracing::debug;

const CONFIG_VERSION: i64 = 1;
const APP_NAME: &str = "assetdesk";
const DEFAULT_USER_NAME: &str = "John Doe";
const DEFAULT_ROLE: &str = "admin";
const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub session: Session,
    #[serde(default)]
    pub display: Display,
    #[serde(default)]
    pub rates: Rates,
    #[serde(default)]
    pub alerts: Alerts,
    #[serde(default)]
    pub budget: Budget,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            session: Session::default(),
            display: Display::default(),
            rates: Rates::default(),
            alerts: Alerts::default(),
            budget: Budget::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub name: Option<String>,
    pub role: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            name: Some(DEFAULT_USER_NAME.to_owned()),
            role: Some(DEFAULT_ROLE.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Display {
    pub currency: Option<String>,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            currency: Some(DEFAULT_CURRENCY.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rates {
    pub inr_per_usd: Option<f64>,
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            inr_per_usd: Some(DEFAULT_INR_PER_USD),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Alerts {
    pub expiry_window_days: Option<i64>,
}

impl Default for Alerts {
    fn default() -> Self {
        Self {
            expiry_window_days: Some(i64::from(DEFAULT_EXPIRY_WINDOW_DAYS)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Budget {
    pub over_tolerance_percent: Option<f64>,
    pub under_tolerance_percent: Option<f64>,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            over_tolerance_percent: Some(DEFAULT_OVER_TOLERANCE_PERCENT),
            under_tolerance_percent: Some(DEFAULT_UNDER_TOLERANCE_PERCENT),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("ASSETDESK_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set ASSETDESK_CONFIG_PATH to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and keep values under [session], [display], [rates], [alerts], and [budget]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.version != CONFIG_VERSION {
            bail!(
                "config {} has version {}; expected 1",
                path.display(),
                self.version
            );
        }

        if let Some(role) = &self.session.role
            && UserRole::parse(role).is_none()
        {
            bail!(
                "session.role in {} must be one of admin, it_manager, employee; got {:?}",
                path.display(),
                role
            );
        }

        if let Some(currency) = &self.display.currency
            && Currency::parse(currency).is_none()
        {
            bail!(
                "display.currency in {} must be USD or INR; got {:?}",
                path.display(),
                currency
            );
        }

        if let Some(rate) = self.rates.inr_per_usd
            && !(rate.is_finite() && rate > 0.0)
        {
            bail!(
                "rates.inr_per_usd in {} must be positive, got {}",
                path.display(),
                rate
            );
        }

        if let Some(days) = self.alerts.expiry_window_days
            && !(0..=i64::from(u32::MAX)).contains(&days)
        {
            bail!(
                "alerts.expiry_window_days in {} must be non-negative, got {}",
                path.display(),
                days
            );
        }

        for (key, value) in [
            ("over_tolerance_percent", self.budget.over_tolerance_percent),
            ("under_tolerance_percent", self.budget.under_tolerance_percent),
        ] {
            if let Some(value) = value
                && !(value.is_finite() && value >= 0.0)
            {
                bail!(
                    "budget.{} in {} must be non-negative, got {}",
                    key,
                    path.display(),
                    value
                );
            }
        }

        Ok(())
    }

    pub fn user_name(&self) -> &str {
        self.session.name.as_deref().unwrap_or(DEFAULT_USER_NAME)
    }

    pub fn role(&self) -> UserRole {
        self.session
            .role
            .as_deref()
            .and_then(UserRole::parse)
            .unwrap_or(UserRole::Admin)
    }

    pub fn currency(&self) -> Currency {
        self.display
            .currency
            .as_deref()
            .and_then(Currency::parse)
            .unwrap_or(Currency::Usd)
    }

    pub fn rates(&self) -> ExchangeRates {
        ExchangeRates::new(self.rates.inr_per_usd.unwrap_or(DEFAULT_INR_PER_USD))
    }

    pub fn expiry_window(&self) -> ExpiryWindow {
        self.alerts
            .expiry_window_days
            .and_then(|days| u32::try_from(days).ok())
            .map(ExpiryWindow::new)
            .unwrap_or_default()
    }

    pub fn tolerance(&self) -> VarianceTolerance {
        VarianceTolerance {
            over_percent: self
                .budget
                .over_tolerance_percent
                .unwrap_or(DEFAULT_OVER_TOLERANCE_PERCENT),
            under_percent: self
                .budget
                .under_tolerance_percent
                .unwrap_or(DEFAULT_UNDER_TOLERANCE_PERCENT),
        }
    }

    pub fn session_context(&self, now: OffsetDateTime) -> SessionContext {
        SessionContext {
            rates: self.rates(),
            expiry_window: self.expiry_window(),
            tolerance: self.tolerance(),
            ..SessionContext::new(CurrentUser::new(self.user_name(), self.role()), now)
                .with_currency(self.currency())
        }
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# assetdesk config\n# Place this file at: {}\n\nversion = 1\n\n[session]\nname = \"{}\"\n# admin, it_manager, or employee\nrole = \"{}\"\n\n[display]\n# USD or INR\ncurrency = \"{}\"\n\n[rates]\ninr_per_usd = {:.1}\n\n[alerts]\n# Warranties and licenses ending within this many days are flagged\nexpiry_window_days = {}\n\n[budget]\n# Variance (percent) allowed before a line leaves on_track\nover_tolerance_percent = {:.1}\nunder_tolerance_percent = {:.1}\n",
            path.display(),
            DEFAULT_USER_NAME,
            DEFAULT_ROLE,
            DEFAULT_CURRENCY,
            DEFAULT_INR_PER_USD,
            DEFAULT_EXPIRY_WINDOW_DAYS,
            DEFAULT_OVER_TOLERANCE_PERCENT,
            DEFAULT_UNDER_TOLERANCE_PERCENT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use anyhow::Result;
    use assetdesk_app::{Currency, UserRole};
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use time::macros::datetime;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.role(), UserRole::Admin);
        assert_eq!(config.currency(), Currency::Usd);
        assert_eq!(config.expiry_window().days, 30);
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[display]\ncurrency = \"INR\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[session]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[session]\nname = \"Sarah Johnson\"\nrole = \"it_manager\"\n[display]\ncurrency = \"inr\"\n[rates]\ninr_per_usd = 80.0\n[alerts]\nexpiry_window_days = 14\n[budget]\nover_tolerance_percent = 5.0\n",
        )?;
        let config = Config::load(&path)?;
        assert_eq!(config.user_name(), "Sarah Johnson");
        assert_eq!(config.role(), UserRole::ItManager);
        assert_eq!(config.currency(), Currency::Inr);
        assert_eq!(config.rates().inr_per_usd, 80.0);
        assert_eq!(config.expiry_window().days, 14);
        assert_eq!(config.tolerance().over_percent, 5.0);
        assert_eq!(config.tolerance().under_percent, 20.0);
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn unknown_role_and_currency_are_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[session]\nrole = \"owner\"\n")?;
        let error = Config::load(&path).expect_err("unknown role should fail");
        assert!(error.to_string().contains("session.role"));

        let (_temp, path) = write_config("version = 1\n[display]\ncurrency = \"EUR\"\n")?;
        let error = Config::load(&path).expect_err("unknown currency should fail");
        assert!(error.to_string().contains("USD or INR"));
        Ok(())
    }

    #[test]
    fn non_positive_rate_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[rates]\ninr_per_usd = 0.0\n")?;
        let error = Config::load(&path).expect_err("zero rate should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn negative_window_and_tolerance_are_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[alerts]\nexpiry_window_days = -1\n")?;
        assert!(Config::load(&path).is_err());

        let (_temp, path) =
            write_config("version = 1\n[budget]\nunder_tolerance_percent = -5.0\n")?;
        let error = Config::load(&path).expect_err("negative tolerance should fail");
        assert!(error.to_string().contains("budget.under_tolerance_percent"));
        Ok(())
    }

    #[test]
    fn session_context_carries_config_values() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[session]\nname = \"Mike Chen\"\nrole = \"employee\"\n[display]\ncurrency = \"INR\"\n",
        )?;
        let ctx = Config::load(&path)?.session_context(datetime!(2024-01-20 10:30:00 UTC));
        assert_eq!(ctx.current_user.name, "Mike Chen");
        assert!(!ctx.current_user.can_edit());
        assert_eq!(ctx.currency, Currency::Inr);
        assert_eq!(ctx.today.to_string(), "2024-01-20");
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("ASSETDESK_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("ASSETDESK_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("ASSETDESK_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("assetdesk/config.toml"));
        Ok(())
    }

    #[test]
    fn example_config_round_trips_through_load() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        for section in ["[session]", "[display]", "[rates]", "[alerts]", "[budget]"] {
            assert!(example.contains(section), "missing {section}");
        }
        std::fs::write(&path, &example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.rates().inr_per_usd, 83.0);
        Ok(())
    }
}
