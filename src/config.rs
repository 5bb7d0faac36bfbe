use clap::Parser;
use std::net::SocketAddr;

/// Cricket win-probability prediction service
#[derive(Parser, Debug, Clone)]
#[command(name = "cricket-winprob", version, about)]
pub struct Config {
    /// HTTP listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:5000")]
    pub listen_addr: String,

    /// SQLite database path for the prediction log
    #[arg(long, env = "DATABASE_PATH", default_value = "predictions.db")]
    pub database_path: String,

    /// Team-rating model artifact (JSON). Without one every match starts 50/50.
    #[arg(long, env = "MODEL_PATH")]
    pub model_path: Option<String>,

    /// Overs per innings in the format being predicted
    #[arg(long, env = "TOTAL_OVERS", default_value = "20")]
    pub total_overs: u32,

    /// Read `current_overs` in scorecard notation (12.3 = 12 overs 3 balls)
    #[arg(long, env = "CRICKET_OVERS_NOTATION", default_value = "false")]
    pub cricket_overs_notation: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.total_overs == 0 {
            anyhow::bail!("total_overs must be positive");
        }
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!("listen_addr '{}' is not a valid socket address", self.listen_addr);
        }
        Ok(())
    }
}
