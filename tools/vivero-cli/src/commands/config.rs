//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    let config = ctx.config.redacted();

    if ctx.output.is_json() {
        ctx.output.json(&config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_file {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, defaults and environment only)"),
    }

    ctx.output.info("");
    ctx.output.info("[backend]");
    ctx.output.kv("url", ctx.config.backend_url());
    ctx.output.kv(
        "publishable_key",
        config.backend.publishable_key.as_deref().unwrap_or("(unset)"),
    );
    ctx.output.kv("debug", &config.backend.debug.to_string());

    ctx.output.info("");
    ctx.output.info("[admin]");
    show_optional(ctx, "token", &config.admin.token);
    show_optional(ctx, "email", &config.admin.email);
    show_optional(ctx, "password", &config.admin.password);

    ctx.output.info("");
    ctx.output.info("[seed]");
    ctx.output.kv(
        "data_file",
        config.seed.data_file.as_deref().unwrap_or("(built-in)"),
    );
    show_optional(ctx, "key_file", &config.seed.key_file);

    ctx.output.info("");
    ctx.output.info("[storefront]");
    show_optional(ctx, "locale", &config.storefront.locale);

    Ok(())
}

fn show_optional(ctx: &Context, key: &str, value: &Option<String>) {
    ctx.output.kv(key, value.as_deref().unwrap_or("(unset)"));
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    tokio::fs::write(&config_path, generate_default_config()).await?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);
    let mut errors = errors;

    match super::seed::load_seed_data(ctx, None) {
        Ok((data, _)) => {
            if let Err(e) = data.validate() {
                errors.push(format!("seed data: {}", e));
            }
        }
        Err(e) => errors.push(format!("{:#}", e)),
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Check settings that do not need the filesystem. Returns errors and warnings.
fn check_config(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let url = config.backend_url();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        errors.push(format!("backend.url '{}' must be an http(s) URL", url));
    }

    if config.admin.token.is_none() {
        match (&config.admin.email, &config.admin.password) {
            (Some(_), None) => errors.push("admin.email is set without admin.password".into()),
            (None, Some(_)) => errors.push("admin.password is set without admin.email".into()),
            (None, None) => warnings.push("no admin credentials; only `seed --dry-run` works".into()),
            (Some(_), Some(_)) => {}
        }
    }

    if config.backend.publishable_key.is_none() {
        warnings.push("backend.publishable_key is unset; `vivero catalog` needs one".into());
    }

    if config.seed.key_file.as_deref().is_some_and(|p| p.trim().is_empty()) {
        errors.push("seed.key_file must not be empty".into());
    }

    if config
        .storefront
        .locale
        .as_deref()
        .is_some_and(|l| l.trim().is_empty())
    {
        errors.push("storefront.locale must not be empty".into());
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_only_warnings() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        let (errors, warnings) = check_config(&config);
        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_rejects_non_http_url() {
        let mut config = CliConfig::default();
        config.backend.url = Some("localhost:9000".into());
        let (errors, _) = check_config(&config);
        assert!(errors.iter().any(|e| e.contains("backend.url")));
    }

    #[test]
    fn test_rejects_half_credentials() {
        let mut config = CliConfig::default();
        config.admin.email = Some("admin@example.com".into());
        let (errors, _) = check_config(&config);
        assert_eq!(errors, vec!["admin.email is set without admin.password".to_string()]);
    }

    #[test]
    fn test_token_is_enough() {
        let mut config = CliConfig::default();
        config.admin.token = Some("sk_123".into());
        config.backend.publishable_key = Some("pk_123".into());
        let (errors, warnings) = check_config(&config);
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }
}
