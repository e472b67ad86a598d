//! Panel configuration.
//!
//! All construction-time inputs of the panel live in one explicit,
//! immutable [`PanelConfig`] passed in by the mounting application --
//! there are no hidden module-level defaults.

use siglab_core::ParameterSet;

/// Default base address of the Octave runner service.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5000";

/// Construction-time configuration for a [`Panel`](crate::Panel).
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Base HTTP URL of the Octave runner (default:
    /// [`DEFAULT_SERVICE_URL`]).
    pub service_url: String,
    /// Initial parameter set (ids, bounds, defaults).
    pub parameters: ParameterSet,
}

impl PanelConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                  |
    /// |----------------------|--------------------------|
    /// | `SIGLAB_SERVICE_URL` | `http://localhost:5000`  |
    pub fn from_env() -> Self {
        let service_url =
            std::env::var("SIGLAB_SERVICE_URL").unwrap_or_else(|_| DEFAULT_SERVICE_URL.into());
        Self {
            service_url,
            parameters: ParameterSet::defaults(),
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            parameters: ParameterSet::defaults(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_local_runner() {
        let config = PanelConfig::default();
        assert_eq!(config.service_url, "http://localhost:5000");
        assert_eq!(config.parameters, ParameterSet::defaults());
    }

    #[test]
    fn from_env_honours_override_and_falls_back() {
        std::env::set_var("SIGLAB_SERVICE_URL", "http://runner:9000");
        let config = PanelConfig::from_env();
        assert_eq!(config.service_url, "http://runner:9000");

        std::env::remove_var("SIGLAB_SERVICE_URL");
        let config = PanelConfig::from_env();
        assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
        assert_eq!(config.parameters, ParameterSet::defaults());
    }
}
