pub mod config;
pub mod facets;
pub mod filter;
pub mod quote;
pub mod recommend;

use std::fs;

use anyhow::Context;
use optica_core::config::{AppConfig, CatalogConfig, LoadOptions};
use optica_core::fixtures::demo_catalog;
use optica_core::{ApplicationError, CatalogStore, InterfaceError};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        Self::success_with_data(command, message, None)
    }

    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: Option<Value>,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            correlation_id: None,
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            correlation_id: None,
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Reports an application failure with its class, exit code and correlation id.
    pub fn from_application_error(command: &str, error: ApplicationError) -> Self {
        let interface = error.into_interface(Uuid::new_v4().to_string());
        warn!(
            event_name = "cli.command_failed",
            command,
            error_class = interface.class.as_str(),
            correlation_id = %interface.correlation_id,
            error = %interface.detail,
            "command failed"
        );
        Self::from_interface(command, interface)
    }

    fn from_interface(command: &str, interface: InterfaceError) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(interface.class.as_str().to_string()),
            message: format!("{} {}", interface.user_message(), interface.detail),
            correlation_id: Some(interface.correlation_id),
            data: None,
        };
        Self { exit_code: interface.class.exit_code(), output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Configuration plus the catalog every storefront command reads from.
pub(crate) struct CommandContext {
    pub config: AppConfig,
    pub catalog: CatalogStore,
}

pub(crate) fn load_context(command: &str) -> Result<CommandContext, CommandResult> {
    let config = AppConfig::load(LoadOptions::default()).map_err(|error| {
        CommandResult::from_application_error(
            command,
            ApplicationError::Configuration(error.to_string()),
        )
    })?;

    let catalog = load_catalog(&config.catalog).map_err(|error| {
        CommandResult::from_application_error(command, ApplicationError::Catalog(format!("{error:#}")))
    })?;

    info!(
        event_name = "cli.catalog_loaded",
        command,
        products = catalog.len(),
        source = if config.catalog.seed_path.is_some() { "seed_file" } else { "demo" },
        "catalog loaded"
    );

    Ok(CommandContext { config, catalog })
}

pub(crate) fn load_catalog(config: &CatalogConfig) -> anyhow::Result<CatalogStore> {
    let Some(path) = &config.seed_path else {
        return demo_catalog().context("built-in demo catalog is invalid");
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("could not read catalog seed `{}`", path.display()))?;
    let catalog = CatalogStore::from_json_str(&raw)
        .with_context(|| format!("could not load catalog seed `{}`", path.display()))?;
    Ok(catalog)
}

pub(crate) fn invalid_argument(command: &str, message: impl Into<String>) -> CommandResult {
    CommandResult::failure(command, "invalid_argument", message, 4)
}

pub(crate) fn to_data<T: Serialize>(command: &str, value: &T) -> Result<Value, CommandResult> {
    serde_json::to_value(value).map_err(|error| {
        CommandResult::failure(command, "serialization", error.to_string(), 6)
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use optica_core::config::CatalogConfig;
    use optica_core::ApplicationError;

    use super::{load_catalog, CommandResult};

    #[test]
    fn missing_seed_file_reports_the_path() {
        let config = CatalogConfig { seed_path: Some(PathBuf::from("/nonexistent/catalog.json")) };

        let error = load_catalog(&config).expect_err("file does not exist");

        assert!(format!("{error:#}").contains("/nonexistent/catalog.json"));
    }

    #[test]
    fn application_errors_carry_class_exit_code_and_correlation_id() {
        let result = CommandResult::from_application_error(
            "filter",
            ApplicationError::Catalog("seed file is not valid json".to_string()),
        );

        assert_eq!(result.exit_code, 3);
        let payload: serde_json::Value =
            serde_json::from_str(&result.output).expect("payload is json");
        assert_eq!(payload["error_class"], "catalog_load");
        assert!(payload["message"].as_str().unwrap_or_default().contains("not valid json"));
        assert!(payload["correlation_id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[test]
    fn success_payload_omits_empty_data() {
        let result = CommandResult::success("facets", "done");

        assert_eq!(result.exit_code, 0);
        assert!(!result.output.contains("\"data\""));
    }
}
