use std::fs;

use anyhow::{bail, Result};
use serde::Deserialize;
use shared::domain::LetterRange;

pub const CONFIG_FILE: &str = "navgen.toml";

#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub realm_hostname: String,
    pub user_token: String,
    pub reports_table_id: String,
    pub programs_table_id: String,
    pub customers_table_id: String,
    pub timeout_secs: u64,
    pub ranges: Vec<LetterRange>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: quickbase::DEFAULT_BASE_URL.into(),
            realm_hostname: String::new(),
            user_token: String::new(),
            reports_table_id: String::new(),
            programs_table_id: String::new(),
            customers_table_id: String::new(),
            timeout_secs: 30,
            ranges: navmenu::default_ranges(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.realm_hostname.is_empty() {
            bail!("realm hostname is required (--realm or QB_REALM_HOSTNAME)");
        }
        if self.user_token.is_empty() {
            bail!("user token is required (--token or QB_USER_TOKEN)");
        }
        if self.reports_table_id.is_empty()
            || self.programs_table_id.is_empty()
            || self.customers_table_id.is_empty()
        {
            bail!("all three table ids are required (reports, programs, customers)");
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    base_url: Option<String>,
    realm_hostname: Option<String>,
    user_token: Option<String>,
    reports_table_id: Option<String>,
    programs_table_id: Option<String>,
    customers_table_id: Option<String>,
    timeout_secs: Option<u64>,
    ranges: Option<String>,
}

/// Defaults, then `navgen.toml` from the working directory, then
/// environment variables. CLI flags are layered on top by the caller.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(CONFIG_FILE) {
        if let Ok(file_cfg) = toml::from_str::<FileSettings>(&raw) {
            if let Some(v) = file_cfg.base_url {
                settings.base_url = v;
            }
            if let Some(v) = file_cfg.realm_hostname {
                settings.realm_hostname = v;
            }
            if let Some(v) = file_cfg.user_token {
                settings.user_token = v;
            }
            if let Some(v) = file_cfg.reports_table_id {
                settings.reports_table_id = v;
            }
            if let Some(v) = file_cfg.programs_table_id {
                settings.programs_table_id = v;
            }
            if let Some(v) = file_cfg.customers_table_id {
                settings.customers_table_id = v;
            }
            if let Some(v) = file_cfg.timeout_secs {
                settings.timeout_secs = v;
            }
            if let Some(v) = file_cfg.ranges {
                if let Ok(parsed) = parse_ranges(&v) {
                    settings.ranges = parsed;
                }
            }
        }
    }

    if let Ok(v) = std::env::var("NAVGEN_BASE_URL") {
        settings.base_url = v;
    }
    if let Ok(v) = std::env::var("QB_REALM_HOSTNAME") {
        settings.realm_hostname = v;
    }
    if let Ok(v) = std::env::var("QB_USER_TOKEN") {
        settings.user_token = v;
    }
    if let Ok(v) = std::env::var("NAVGEN_REPORTS_TABLE") {
        settings.reports_table_id = v;
    }
    if let Ok(v) = std::env::var("NAVGEN_PROGRAMS_TABLE") {
        settings.programs_table_id = v;
    }
    if let Ok(v) = std::env::var("NAVGEN_CUSTOMERS_TABLE") {
        settings.customers_table_id = v;
    }
    if let Ok(v) = std::env::var("NAVGEN_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.timeout_secs = parsed;
        }
    }
    if let Ok(v) = std::env::var("NAVGEN_RANGES") {
        if let Ok(parsed) = parse_ranges(&v) {
            settings.ranges = parsed;
        }
    }

    settings
}

/// Parses a comma-separated range table like `"0-9,A-D,E-H"`.
pub fn parse_ranges(raw: &str) -> Result<Vec<LetterRange>> {
    let mut ranges = Vec::new();
    for token in raw.split(',') {
        let token = token.trim();
        let mut chars = token.chars();
        match (chars.next(), chars.next(), chars.next(), chars.next()) {
            (Some(low), Some('-'), Some(high), None) if low <= high => {
                ranges.push(LetterRange::new(low, high));
            }
            _ => bail!("invalid letter range '{token}', expected a pair like 'A-D'"),
        }
    }
    if ranges.is_empty() {
        bail!("at least one letter range is required");
    }
    Ok(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_range_table() {
        let ranges = parse_ranges("0-9, A-D,E-H").expect("parse");
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[0], LetterRange::new('0', '9'));
        assert_eq!(ranges[1], LetterRange::new('A', 'D'));
    }

    #[test]
    fn rejects_inverted_and_malformed_ranges() {
        assert!(parse_ranges("D-A").is_err());
        assert!(parse_ranges("AD").is_err());
        assert!(parse_ranges("A-D-F").is_err());
        assert!(parse_ranges("").is_err());
    }

    #[test]
    fn file_settings_accept_partial_tables() {
        let file: FileSettings =
            toml::from_str("realm_hostname = \"realm.example.com\"\ntimeout_secs = 5\n")
                .expect("parse");
        assert_eq!(file.realm_hostname.as_deref(), Some("realm.example.com"));
        assert_eq!(file.timeout_secs, Some(5));
        assert!(file.user_token.is_none());
    }

    #[test]
    fn env_overrides_take_precedence_over_defaults() {
        std::env::set_var("QB_USER_TOKEN", "token-from-env");
        let settings = load_settings();
        assert_eq!(settings.user_token, "token-from-env");
        std::env::remove_var("QB_USER_TOKEN");
    }

    #[test]
    fn validation_requires_credentials_and_tables() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_err());

        settings.realm_hostname = "realm.example.com".into();
        settings.user_token = "token".into();
        settings.reports_table_id = "r".into();
        settings.programs_table_id = "p".into();
        settings.customers_table_id = "c".into();
        assert!(settings.validate().is_ok());
    }
}
