//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigInitArgs, OutputFormat};
use crate::config::{Config, ConfigBuilder, PROJECT_CONFIG_FILE};
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use serde::Serialize;
use std::path::PathBuf;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Show => handle_config_show(config, output),
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Path => handle_config_path(output),
    }
}

/// Handle config show subcommand
fn handle_config_show(config: &Config, output: &mut OutputWriter) -> Result<()> {
    if let Err(e) = config.validate() {
        output.warning(&format!("Configuration has problems: {}", e))?;
    }
    output.section("Effective configuration")?;
    output.data(config)
}

/// Configuration written by `config init`
fn starter_config() -> Config {
    ConfigBuilder::new()
        .preset("title", ["text-only", "max-chars:60", "or:(untitled)"])
        .preset("ratio", ["percent:1:-"])
        .build()
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = match (args.path, args.user) {
        (Some(path), _) => path,
        (None, true) => Config::user_config_path()
            .ok_or_else(|| Error::config("Unable to determine user config directory"))?,
        (None, false) => PathBuf::from(PROJECT_CONFIG_FILE),
    };

    if path.exists() && !args.force {
        return Err(Error::invalid_args(format!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        )));
    }

    starter_config().save(&path)?;
    tracing::info!(path = %path.display(), "Wrote configuration");
    output.success(&format!("✓ Created config at {}", path.display()))?;

    Ok(())
}

/// One searched configuration location
#[derive(Debug, Serialize)]
struct SearchPath {
    path: PathBuf,
    exists: bool,
}

/// Handle config path subcommand
fn handle_config_path(output: &mut OutputWriter) -> Result<()> {
    let paths: Vec<SearchPath> = Config::default_config_paths()
        .into_iter()
        .map(|path| SearchPath {
            exists: path.exists(),
            path,
        })
        .collect();

    if output.format() != OutputFormat::Human {
        return output.data(&paths);
    }

    let rows = paths
        .iter()
        .map(|p| {
            let found = if p.exists { "found" } else { "-" };
            vec![p.path.display().to_string(), found.to_string()]
        })
        .collect();
    output.info("Configuration is loaded from the first file found:")?;
    output.table(&["path", "status"], rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::capture;
    use tempfile::TempDir;

    fn init_args(path: PathBuf, force: bool) -> ConfigInitArgs {
        ConfigInitArgs {
            path: Some(path),
            user: false,
            force,
        }
    }

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("safeval.yaml");
        let (mut out, buffer) = capture(OutputFormat::Human, false, 0);

        handle_config_init(init_args(path.clone(), false), &mut out).unwrap();
        assert!(buffer.contents().contains("Created config"));

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded, starter_config());
        assert!(loaded.validate().is_ok());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("safeval.json");
        std::fs::write(&path, "{}").unwrap();
        let (mut out, _) = capture(OutputFormat::Human, false, 0);

        let err = handle_config_init(init_args(path.clone(), false), &mut out).unwrap_err();
        assert!(matches!(err, Error::InvalidArgs(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");

        handle_config_init(init_args(path.clone(), true), &mut out).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), starter_config());
    }

    #[test]
    fn test_show_outputs_config() {
        let (mut out, buffer) = capture(OutputFormat::Json, false, 0);
        handle_config_show(&starter_config(), &mut out).unwrap();

        let shown: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(shown["presets"]["ratio"][0], "percent:1:-");
        assert_eq!(shown["settings"]["decimal_separator"], ".");
    }

    #[test]
    fn test_path_lists_search_order() {
        let (mut out, buffer) = capture(OutputFormat::Json, false, 0);
        handle_config_path(&mut out).unwrap();

        let listed: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(listed[0]["path"], ".safeval.yaml");
    }
}
