use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = swap_interactions::arguments::Arguments::parse();
    observe::tracing::initialize(&args.observe_config());
    tracing::debug!("running swap interactions with validated arguments:\n{}", args);
    let interactions = swap_interactions::run(&args).await?;
    println!("{interactions}");
    Ok(())
}
