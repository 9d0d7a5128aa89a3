//! Seed the store with demo data.

use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use indicatif::ProgressBar;
use tracing::debug;
use vivero_platform::{AdminPlatform, CommercePlatform, InMemoryPlatform};
use vivero_seed::{SeedData, SeedObserver, SeedReport, SeedStep, Seeder};

use super::SeedArgs;
use crate::context::Context;

/// Advances a progress bar as steps complete.
struct StepProgress {
    bar: ProgressBar,
}

impl SeedObserver for StepProgress {
    fn step_started(&self, step: SeedStep) {
        self.bar.set_message(step.label());
    }

    fn step_finished(&self, _step: SeedStep) {
        self.bar.inc(1);
    }
}

/// Load the dataset named on the command line or in config, or the built-in one.
pub(crate) fn load_seed_data(ctx: &Context, path: Option<&str>) -> Result<(SeedData, String)> {
    match path.or(ctx.config.seed.data_file.as_deref()) {
        Some(path) => {
            let resolved = ctx.resolve_path(path);
            let data = SeedData::load(&resolved)
                .with_context(|| format!("Failed to load seed data: {}", resolved.display()))?;
            Ok((data, resolved.display().to_string()))
        }
        None => Ok((
            SeedData::builtin().context("Built-in seed data is invalid")?,
            "built-in".to_string(),
        )),
    }
}

/// Run the seed command.
pub async fn run(args: SeedArgs, ctx: &Context) -> Result<()> {
    let (data, source) = load_seed_data(ctx, args.data.as_deref())?;
    data.validate().context("Seed data failed validation")?;

    // A dry run never writes the key file.
    let key_file: Option<PathBuf> = if args.dry_run {
        None
    } else {
        args.key_file
            .as_deref()
            .or(ctx.config.seed.key_file.as_deref())
            .map(|path| ctx.resolve_path(path))
    };

    ctx.output.header(if args.dry_run {
        "Seeding demo store (dry run)"
    } else {
        "Seeding demo store"
    });

    if args.dry_run {
        ctx.output.kv("Backend", "in-memory");
    } else {
        ctx.output.kv("Backend", ctx.config.backend_url());
    }
    ctx.output.kv("Dataset", &source);
    ctx.output.kv("Products", &data.products.len().to_string());
    if let Some(path) = &key_file {
        ctx.output.kv("Key file", &path.display().to_string());
    }

    if !args.yes && !args.dry_run && !ctx.output.is_json() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt("Seed this backend? Reruns duplicate regions, categories and products")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Seeding cancelled");
            return Ok(());
        }
    }

    let report = if args.dry_run {
        let platform = InMemoryPlatform::new();
        seed(&platform, data, key_file, ctx).await?
    } else {
        let Some(credentials) = ctx.config.admin_credentials() else {
            bail!(
                "No admin credentials. Set MEDUSA_ADMIN_TOKEN, or MEDUSA_ADMIN_EMAIL and MEDUSA_ADMIN_PASSWORD"
            );
        };
        debug!(?credentials, url = ctx.config.backend_url(), "connecting to admin API");
        let platform = AdminPlatform::connect(ctx.config.backend_url(), credentials)
            .await
            .with_context(|| format!("Failed to connect to {}", ctx.config.backend_url()))?;
        seed(&platform, data, key_file, ctx).await?
    };

    print_report(&report, ctx);
    Ok(())
}

async fn seed(
    platform: &dyn CommercePlatform,
    data: SeedData,
    key_file: Option<PathBuf>,
    ctx: &Context,
) -> Result<SeedReport> {
    let progress = StepProgress {
        bar: ctx.output.progress(SeedStep::ALL.len() as u64, "Starting"),
    };

    let result = Seeder::new(platform, data)
        .key_file(key_file)
        .observer(&progress)
        .run()
        .await;

    match result {
        Ok(report) => {
            progress.bar.finish_with_message("done");
            Ok(report)
        }
        Err(e) => {
            progress.bar.abandon();
            Err(e).context("Seeding failed")
        }
    }
}

fn print_report(report: &SeedReport, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(report);
        return;
    }

    ctx.output.success(&format!(
        "Seeded in {:.1}s: {}",
        report.duration().num_milliseconds() as f64 / 1000.0,
        report.summary()
    ));

    ctx.output.kv("Store", report.store_id.as_str());
    ctx.output.kv(
        "Sales channel",
        &reuse_note(report.sales_channel_id.as_str(), report.sales_channel_reused),
    );
    ctx.output.kv("Stock location", report.stock_location_id.as_str());
    ctx.output.kv(
        "Shipping profile",
        &reuse_note(
            report.shipping_profile_id.as_str(),
            report.shipping_profile_reused,
        ),
    );
    ctx.output.kv("Publishable key", &report.publishable_key_token);

    match &report.key_file {
        Some(path) => ctx
            .output
            .success(&format!("Publishable key written to {}", path.display())),
        None => ctx
            .output
            .info("Publishable key not exported (set PUBLISHABLE_KEY_FILE or --key-file)"),
    }
}

fn reuse_note(id: &str, reused: bool) -> String {
    if reused {
        format!("{} (existing)", id)
    } else {
        id.to_string()
    }
}
