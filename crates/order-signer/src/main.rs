use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = order_signer::arguments::Arguments::parse();
    observe::tracing::initialize(&args.observe_config());
    tracing::debug!("running order signer with validated arguments:\n{}", args);
    let payload = order_signer::run(&args)?;
    println!("{payload}");
    Ok(())
}
