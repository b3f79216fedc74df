use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use optica_core::config::{AppConfig, LoadOptions};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_key: &str| {
        field_source(key_path, env_key, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let seed_path = config
        .catalog
        .seed_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<built-in demo catalog>".to_string());

    let lines = [
        "effective config (source precedence: env > file > default):".to_string(),
        render_line(
            "catalog.seed_path",
            &seed_path,
            source("catalog.seed_path", "OPTICA_CATALOG_SEED_PATH"),
        ),
        render_line(
            "recommendation.shortlist_limit",
            &config.recommendation.shortlist_limit.to_string(),
            source("recommendation.shortlist_limit", "OPTICA_RECOMMENDATION_SHORTLIST_LIMIT"),
        ),
        render_line(
            "logging.level",
            &config.logging.level,
            source("logging.level", "OPTICA_LOGGING_LEVEL"),
        ),
        render_line(
            "logging.format",
            &format!("{:?}", config.logging.format),
            source("logging.format", "OPTICA_LOGGING_FORMAT"),
        ),
    ];

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("optica.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/optica.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: &str,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if env::var_os(env_key).is_some() {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

#[cfg(test)]
mod tests {
    use toml::Value;

    use super::{contains_path, render_line};

    #[test]
    fn nested_key_paths_are_resolved() {
        let doc: Value = "[recommendation]\nshortlist_limit = 4\n".parse().expect("valid toml");

        assert!(contains_path(&doc, "recommendation.shortlist_limit"));
        assert!(!contains_path(&doc, "logging.level"));
    }

    #[test]
    fn lines_name_their_source() {
        assert_eq!(
            render_line("logging.level", "info", "default".to_string()),
            "- logging.level = info (source: default)"
        );
    }
}
