use anyhow::{Context, Result};

use crate::api::Api;
use crate::cli::load_context;

pub fn run(
    file: &str,
    content_type: &str,
    api_key: Option<&str>,
    client: &str,
    data_dir: Option<&str>,
) -> Result<()> {
    let ctx = load_context(data_dir)?;
    let bytes = std::fs::read(file).with_context(|| format!("reading {file}"))?;
    // Without --api-key the CLI presents the configured key.
    let key = match api_key {
        Some(key) => key.to_string(),
        None => ctx.settings.api_key.clone(),
    };

    let mut api = Api::new(ctx);
    let summary = api.upload(client, Some(&key), content_type, &bytes)?;
    println!("{} imported, {} skipped (duplicates)", summary.imported, summary.skipped);
    Ok(())
}
