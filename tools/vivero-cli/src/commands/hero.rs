//! Render the landing page hero.

use anyhow::{Context as _, Result};
use vivero_storefront::{render_hero, HeroContent};

use super::HeroArgs;
use crate::context::Context;

/// Run the hero command.
pub async fn run(args: HeroArgs, ctx: &Context) -> Result<()> {
    let defaults = HeroContent::default();
    let content = HeroContent {
        title: args.title.unwrap_or(defaults.title),
        subtitle: args.subtitle.unwrap_or(defaults.subtitle),
        text: args.text.unwrap_or(defaults.text),
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "content": content,
            "html": render_hero(&content),
        }));
        return Ok(());
    }

    let html = render_hero(&content);
    match args.output {
        Some(path) => {
            let path = ctx.resolve_path(&path);
            tokio::fs::write(&path, html)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            ctx.output.success(&format!("Created: {}", path.display()));
        }
        None => println!("{}", html),
    }

    Ok(())
}
