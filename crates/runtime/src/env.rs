//! Environment-sourced runtime configuration.

/// Environment variable toggling payload logging on metadata reads.
pub const LOG_PAYLOADS_VAR: &str = "SITEBRIDGE_LOG_PAYLOADS";

/// Environment-derived connector runtime configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectorEnvironment {
    log_payloads: bool,
}

impl ConnectorEnvironment {
    #[must_use]
    pub fn new(log_payloads: bool) -> Self {
        Self { log_payloads }
    }

    /// Read the configuration from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            log_payloads: std::env::var(LOG_PAYLOADS_VAR).is_ok_and(|v| parse_flag(&v)),
        }
    }

    /// Whether read operations should log the payloads they return.
    #[must_use]
    pub fn log_payloads(&self) -> bool {
        self.log_payloads
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_flag_values() {
        for value in ["1", "true", "TRUE", "yes", "on", " On "] {
            assert!(parse_flag(value), "expected '{value}' to parse truthy");
        }
    }

    #[test]
    fn falsy_flag_values() {
        for value in ["0", "false", "no", "off", "", "2", "enabled"] {
            assert!(!parse_flag(value), "expected '{value}' to parse falsy");
        }
    }

    #[test]
    fn default_is_disabled() {
        assert!(!ConnectorEnvironment::default().log_payloads());
    }
}
