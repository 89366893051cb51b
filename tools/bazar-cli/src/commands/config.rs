//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, BazarConfig, API_URL_ENV, REPORTS_URL_ENV};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force, json_file } => init_config(force, json_file, ctx),
        ConfigCommand::Path => {
            println!("{}", ctx.storage_path().display());
            Ok(())
        }
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.info("[api]");
    ctx.output.kv("base_url", &config.api.base_url);
    ctx.output.kv("timeout_secs", &config.api.timeout_secs.to_string());
    if std::env::var_os(API_URL_ENV).is_some() {
        ctx.output.kv("overridden by", API_URL_ENV);
    }

    ctx.output.info("[reports]");
    ctx.output.kv("base_url", &config.reports.base_url);
    ctx.output
        .kv("download_dir", &ctx.download_dir().display().to_string());
    if std::env::var_os(REPORTS_URL_ENV).is_some() {
        ctx.output.kv("overridden by", REPORTS_URL_ENV);
    }

    ctx.output.info("[retry]");
    ctx.output.kv("max_retries", &config.retry.max_retries.to_string());
    ctx.output
        .kv("initial_delay_ms", &config.retry.initial_delay_ms.to_string());
    ctx.output.kv("multiplier", &config.retry.multiplier.to_string());

    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.storage_path().display().to_string());

    ctx.output.info("[checkout]");
    ctx.output.kv("mode", config.checkout.mode.as_str());

    ctx.output.info("[toast]");
    ctx.output.kv("duration_ms", &config.toast.duration_ms.to_string());

    Ok(())
}

fn init_config(force: bool, json: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(if json { "bazar.json" } else { "bazar.toml" });

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if json {
        BazarConfig::default().save(&config_path)?;
    } else {
        fs::write(&config_path, generate_default_config())?;
    }
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
