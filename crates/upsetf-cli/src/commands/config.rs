//! Config command implementation.
//!
//! Manages persisted CLI settings: the Alpha Vantage API key, the profile
//! cache directory, and the default output format.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::CliError;
use crate::output::{print_header, print_info, print_json, print_output, print_success, KeyValue};
use crate::settings::{mask_secret, Settings};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(KeyArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Remove a configuration value
    Unset(KeyArgs),

    /// Show configuration file location
    Path,
}

/// Arguments naming one key.
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Configuration key (api_key, data_dir, format)
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key (api_key, data_dir, format)
    pub key: String,

    /// Configuration value
    pub value: String,
}

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Alpha Vantage API key
    ApiKey,
    /// Profile cache directory
    DataDir,
    /// Default output format
    Format,
}

impl ConfigKey {
    fn parse(s: &str) -> Result<Self, CliError> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "api_key" | "apikey" => Ok(Self::ApiKey),
            "data_dir" | "datadir" => Ok(Self::DataDir),
            "format" | "default_format" => Ok(Self::Format),
            _ => Err(CliError::UnknownConfigKey(s.to_string())),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::ApiKey => "api_key",
            Self::DataDir => "data_dir",
            Self::Format => "format",
        }
    }

    fn all() -> &'static [Self] {
        &[Self::ApiKey, Self::DataDir, Self::Format]
    }

    /// Display value; the API key is masked unless `reveal` is set.
    fn display_value(&self, settings: &Settings, reveal: bool) -> Option<String> {
        match self {
            Self::ApiKey => settings
                .api_key
                .as_deref()
                .map(|k| if reveal { k.to_string() } else { mask_secret(k) }),
            Self::DataDir => settings.data_dir.as_ref().map(|p| p.display().to_string()),
            Self::Format => settings.format.map(|f| format!("{f:?}").to_lowercase()),
        }
    }

    fn apply(&self, settings: &mut Settings, value: &str) -> Result<(), CliError> {
        match self {
            Self::ApiKey => {
                let key = value.trim();
                if key.is_empty() {
                    return Err(CliError::Config("api_key cannot be empty".into()));
                }
                settings.api_key = Some(key.to_string());
            }
            Self::DataDir => settings.data_dir = Some(PathBuf::from(value)),
            Self::Format => {
                let format = OutputFormat::parse(value).ok_or_else(|| {
                    CliError::Config(format!("Invalid format: {value}. Use table, json, or csv."))
                })?;
                settings.format = Some(format);
            }
        }
        Ok(())
    }

    fn clear(&self, settings: &mut Settings) {
        match self {
            Self::ApiKey => settings.api_key = None,
            Self::DataDir => settings.data_dir = None,
            Self::Format => settings.format = None,
        }
    }
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Get(key_args) => execute_get(key_args, ctx),
        ConfigCommand::Set(set_args) => execute_set(set_args, ctx),
        ConfigCommand::Unset(key_args) => execute_unset(key_args, ctx),
        ConfigCommand::Path => execute_path(ctx),
    }
}

/// Show current configuration.
fn execute_show(ctx: &Context) -> Result<()> {
    let results: Vec<KeyValue> = ConfigKey::all()
        .iter()
        .map(|key| {
            KeyValue::new(
                key.as_str(),
                key.display_value(&ctx.settings, false)
                    .unwrap_or_else(|| "(unset)".to_string()),
            )
        })
        .collect();

    if ctx.format == OutputFormat::Table && !ctx.quiet {
        print_header("Current Configuration");
    }
    print_output(&results, ctx.format)
}

/// Get a configuration value. The API key is printed in full.
fn execute_get(args: KeyArgs, ctx: &Context) -> Result<()> {
    let key = ConfigKey::parse(&args.key)?;
    let value = key.display_value(&ctx.settings, true);

    match ctx.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "key": key.as_str(),
            "value": value,
        }))?,
        OutputFormat::Table | OutputFormat::Csv => {
            if let Some(value) = value {
                println!("{}", value);
            }
        }
    }
    Ok(())
}

/// Set a configuration value.
fn execute_set(args: SetArgs, ctx: &Context) -> Result<()> {
    let key = ConfigKey::parse(&args.key)?;

    let mut settings = ctx.settings.clone();
    key.apply(&mut settings, &args.value)?;
    settings.save(&ctx.config_path)?;

    if !ctx.quiet {
        let shown = key.display_value(&settings, false).unwrap_or_default();
        print_success(&format!("Set {} = {}", key.as_str(), shown));
    }
    Ok(())
}

/// Remove a configuration value.
fn execute_unset(args: KeyArgs, ctx: &Context) -> Result<()> {
    let key = ConfigKey::parse(&args.key)?;

    let mut settings = ctx.settings.clone();
    key.clear(&mut settings);
    settings.save(&ctx.config_path)?;

    if !ctx.quiet {
        print_success(&format!("Unset {}", key.as_str()));
    }
    Ok(())
}

/// Show configuration file path.
fn execute_path(ctx: &Context) -> Result<()> {
    if ctx.quiet {
        println!("{}", ctx.config_path.display());
        return Ok(());
    }
    print_info(&format!("Config file: {}", ctx.config_path.display()));
    if ctx.config_path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}
