use {
    crate::router::Swap,
    alloy::primitives::{Address, U256},
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
        time::Duration,
    },
    url::Url,
};

#[derive(clap::Parser)]
#[clap(about = "Converts a router quote into settlement interactions")]
pub struct Arguments {
    /// The Ethereum node URL the router quotes against.
    #[clap(long, env)]
    pub node_url: Url,

    /// Path to the router executable.
    #[clap(long, env)]
    pub router_path: PathBuf,

    /// Maximum time the router may take to produce a quote.
    #[clap(long, env, default_value = "30s", value_parser = humantime::parse_duration)]
    pub router_timeout: Duration,

    /// Address of the router contract, approved to spend the sell token and
    /// called with the quoted call data.
    #[clap(long, env, default_value = "0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9")]
    pub router_address: Address,

    #[clap(long, env, default_value = "0x5FbDB2315678afecb367f032d93F642f64180aa3")]
    pub sell_token: Address,

    #[clap(long, env, default_value = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512")]
    pub buy_token: Address,

    /// Sell amount in atoms of the sell token.
    #[clap(long, env, default_value = "1000000000000000000")]
    pub sell_amount: U256,

    /// Receiver of the bought tokens, usually the settlement contract
    /// executing the interactions.
    #[clap(long, env, default_value = "0x610178dA211FEF7D417bC0e6FeD39F05609AD788")]
    pub recipient: Address,

    #[clap(long, env, default_value = "warn,swap_interactions=info")]
    pub log_filter: String,

    /// Emit logs as JSON.
    #[clap(long, env)]
    pub use_json_logs: bool,
}

impl Arguments {
    pub fn swap(&self) -> Swap {
        Swap {
            sell_token: self.sell_token,
            buy_token: self.buy_token,
            sell_amount: self.sell_amount,
            recipient: self.recipient,
        }
    }

    pub fn observe_config(&self) -> observe::Config {
        observe::Config::new(&self.log_filter, self.use_json_logs)
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            node_url: _,
            router_path,
            router_timeout,
            router_address,
            sell_token,
            buy_token,
            sell_amount,
            recipient,
            log_filter,
            use_json_logs,
        } = self;

        // Node URLs often embed API keys.
        writeln!(f, "node_url: SECRET")?;
        writeln!(f, "router_path: {}", router_path.display())?;
        writeln!(f, "router_timeout: {router_timeout:?}")?;
        writeln!(f, "router_address: {router_address}")?;
        writeln!(f, "sell_token: {sell_token}")?;
        writeln!(f, "buy_token: {buy_token}")?;
        writeln!(f, "sell_amount: {sell_amount}")?;
        writeln!(f, "recipient: {recipient}")?;
        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}
