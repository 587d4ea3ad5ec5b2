pub mod arguments;
pub mod calldata;
pub mod interactions;
pub mod router;

use {
    crate::{arguments::Arguments, router::CliRouter},
    anyhow::{Context, Result},
};

/// Quotes the configured swap and returns the interactions as a JSON array.
pub async fn run(args: &Arguments) -> Result<String> {
    let router = CliRouter {
        path: args.router_path.clone(),
        node_url: args.node_url.clone(),
        timeout: args.router_timeout,
    };
    let interactions = interactions::build(&router, args.router_address, &args.swap())
        .await
        .context("failed to build swap interactions")?;
    tracing::info!(count = interactions.len(), "built interactions");
    Ok(serde_json::to_string_pretty(&interactions)?)
}
