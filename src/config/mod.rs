use ::config::{Config, File};
use serde::{Deserialize, Serialize};

pub mod validator;

use crate::cli::Cli;
use crate::domain::FormDescriptor;

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerSettings,
    /// Form descriptors, inline in the main config file and/or loaded from
    /// per-form files under `config/forms/`.
    #[serde(default)]
    pub forms: Vec<FormDescriptor>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (config file plus CLI overrides).
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let config_path = &cli.config;
        let root = config_path
            .parent()
            .map(|p| p.to_str().unwrap_or("."))
            .unwrap_or(".");

        let s = Config::builder()
            .add_source(File::from(config_path.clone()).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.load_external_configs(root)?;

        validator::ConfigValidator::validate(&settings).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })?;

        Ok(settings)
    }

    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = std::path::Path::new(root).join("formforge");
        let s = Config::builder()
            .add_source(File::from(config_path).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        settings.load_external_configs(root)?;

        validator::ConfigValidator::validate(&settings).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })?;

        Ok(settings)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
    }

    fn load_external_configs(&mut self, root: &str) -> Result<(), anyhow::Error> {
        self.load_forms_from_dir(&format!("{}/config/forms", root))?;
        Ok(())
    }

    /// Load per-form descriptor files (JSON or YAML), merging by form name
    /// with file-based descriptors overriding inline ones.
    fn load_forms_from_dir(&mut self, path: &str) -> Result<(), anyhow::Error> {
        let pattern = format!("{}/*", path);
        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) => {
                    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                        if matches!(ext, "json" | "yaml" | "yml") {
                            let content = std::fs::read_to_string(&path)?;
                            let descriptor: FormDescriptor = if ext == "json" {
                                serde_json::from_str(&content)?
                            } else {
                                serde_yaml::from_str(&content)?
                            };
                            tracing::info!(
                                form = %descriptor.name,
                                file = %path.display(),
                                "loaded form descriptor"
                            );
                            self.merge_form(descriptor);
                        }
                    }
                }
                Err(e) => tracing::warn!("Failed to read form descriptor file: {}", e),
            }
        }
        Ok(())
    }

    fn merge_form(&mut self, descriptor: FormDescriptor) {
        if let Some(existing) = self.forms.iter_mut().find(|f| f.name == descriptor.name) {
            *existing = descriptor;
        } else {
            self.forms.push(descriptor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_when_no_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::from_root(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 3000);
        assert!(settings.forms.is_empty());
    }

    #[test]
    fn test_loads_forms_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        let forms_dir = dir.path().join("config/forms");
        fs::create_dir_all(&forms_dir).unwrap();
        fs::write(
            forms_dir.join("sample.yaml"),
            r#"
name: sample
title: Sample Form
fields:
  - name: email
    control:
      label: Email
      format: email
"#,
        )
        .unwrap();

        let settings = Settings::from_root(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(settings.forms.len(), 1);
        assert_eq!(settings.forms[0].name, "sample");
        assert_eq!(settings.forms[0].fields.len(), 1);
    }

    #[test]
    fn test_invalid_descriptor_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let forms_dir = dir.path().join("config/forms");
        fs::create_dir_all(&forms_dir).unwrap();
        // Duplicate field names within one form.
        fs::write(
            forms_dir.join("broken.json"),
            r#"{
  "name": "broken",
  "fields": [
    {"name": "a", "control": {"label": "A"}},
    {"name": "a", "control": {"label": "A again"}}
  ]
}"#,
        )
        .unwrap();

        let result = Settings::from_root(dir.path().to_str().unwrap());
        assert!(result.is_err());
    }
}
