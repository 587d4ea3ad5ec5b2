use {
    alloy::primitives::Address,
    model::signature::SigningScheme,
    std::fmt::{self, Display, Formatter},
};

#[derive(clap::Parser)]
#[clap(about = "Signs an order and prints the payload for the order book API")]
pub struct Arguments {
    /// Hex encoded private key of the order owner.
    pub private_key: String,

    /// The order as a JSON object. Numbers may be given as JSON numbers,
    /// decimal strings or hex strings. `chainId` and `settlement` members
    /// override the arguments of the same name.
    pub order: String,

    /// Chain id of the EIP-712 signing domain.
    #[clap(long, env, default_value_t = crate::DEFAULT_CHAIN_ID)]
    pub chain_id: u64,

    /// Address of the settlement contract verifying the signature.
    #[clap(long, env, default_value_t = crate::DEFAULT_SETTLEMENT)]
    pub settlement: Address,

    /// How the order is signed, `eip712` or `ethsign`.
    #[clap(long, env, default_value = "eip712", value_parser = parse_signing_scheme)]
    pub signing_scheme: SigningScheme,

    #[clap(long, env, default_value = "warn,order_signer=info")]
    pub log_filter: String,

    /// Emit logs as JSON.
    #[clap(long, env)]
    pub use_json_logs: bool,
}

fn parse_signing_scheme(value: &str) -> Result<SigningScheme, String> {
    serde_json::from_value(serde_json::Value::String(value.to_ascii_lowercase()))
        .map_err(|_| format!("unknown signing scheme {value:?}"))
}

impl Arguments {
    pub fn observe_config(&self) -> observe::Config {
        observe::Config::new(&self.log_filter, self.use_json_logs)
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            private_key: _,
            order,
            chain_id,
            settlement,
            signing_scheme,
            log_filter,
            use_json_logs,
        } = self;

        writeln!(f, "private_key: SECRET")?;
        writeln!(f, "order: {order}")?;
        writeln!(f, "chain_id: {chain_id}")?;
        writeln!(f, "settlement: {settlement}")?;
        writeln!(f, "signing_scheme: {signing_scheme:?}")?;
        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}
