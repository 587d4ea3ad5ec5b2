use {
    alloy::primitives::{Address, U256},
    std::{
        path::PathBuf,
        process::{ExitStatus, Stdio},
        string::FromUtf8Error,
        time::Duration,
    },
    thiserror::Error,
    tokio::process::Command,
    url::Url,
};

/// The swap to get router call data for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Swap {
    pub sell_token: Address,
    pub buy_token: Address,
    pub sell_amount: U256,
    /// Receiver of the bought tokens.
    pub recipient: Address,
}

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("failed to run router {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("router did not finish within {0:?}")]
    Timeout(Duration),
    #[error("router exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("router output is not valid UTF-8")]
    Utf8(#[from] FromUtf8Error),
}

/// Produces the textual quote report for a swap.
#[mockall::automock]
#[async_trait::async_trait]
pub trait SwapRouter: Send + Sync {
    async fn quote(&self, swap: &Swap) -> Result<String, RouterError>;
}

/// Runs an external router executable and returns what it printed to stdout.
#[derive(Clone, Debug)]
pub struct CliRouter {
    pub path: PathBuf,
    pub node_url: Url,
    pub timeout: Duration,
}

impl CliRouter {
    fn command(&self, swap: &Swap) -> Command {
        let mut command = Command::new(&self.path);
        command
            .arg("--rpc-url")
            .arg(self.node_url.as_str())
            .arg("--sell-token")
            .arg(swap.sell_token.to_string())
            .arg("--buy-token")
            .arg(swap.buy_token.to_string())
            .arg("--sell-amount")
            .arg(swap.sell_amount.to_string())
            .arg("--recipient")
            .arg(swap.recipient.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the pending output future on timeout kills the router.
            .kill_on_drop(true);
        command
    }
}

#[async_trait::async_trait]
impl SwapRouter for CliRouter {
    async fn quote(&self, swap: &Swap) -> Result<String, RouterError> {
        let io_error = |source| RouterError::Io {
            path: self.path.clone(),
            source,
        };
        let child = self.command(swap).spawn().map_err(io_error)?;
        tracing::debug!(path = ?self.path, ?swap, "started router");

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| RouterError::Timeout(self.timeout))?
            .map_err(io_error)?;
        if !output.status.success() {
            return Err(RouterError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        Ok(String::from_utf8(output.stdout)?)
    }
}
