use clap::{Parser, Subcommand};
use feegate_consensus::ExecMode;
use std::path::PathBuf;

mod commands;

/// Fee policy checker for mempool admission.
#[derive(Parser)]
#[command(name = "feegate")]
#[command(about = "Resolve and check minimum transaction fees")]
#[command(version)]
struct Cli {
    /// Node fee configuration (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Governance minimum gas prices, e.g. "0.0025uatom,1stake" (overrides config).
    #[arg(long)]
    global_prices: Option<String>,

    /// This node's minimum gas prices (overrides config).
    #[arg(long)]
    min_gas_prices: Option<String>,

    /// Staking bond denomination (overrides config).
    #[arg(long)]
    bond_denom: Option<String>,

    /// Gas ceiling for bypass-only transactions (overrides config).
    #[arg(long)]
    max_bypass_gas: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug)]
enum ModeArg {
    Check,
    ReCheck,
    Simulate,
    Finalize,
}

impl std::fmt::Display for ModeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Check => write!(f, "check"),
            Self::ReCheck => write!(f, "recheck"),
            Self::Simulate => write!(f, "simulate"),
            Self::Finalize => write!(f, "finalize"),
        }
    }
}

impl std::str::FromStr for ModeArg {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "check" => Ok(Self::Check),
            "recheck" | "re-check" => Ok(Self::ReCheck),
            "simulate" | "sim" => Ok(Self::Simulate),
            "finalize" | "deliver" => Ok(Self::Finalize),
            _ => Err(format!(
                "unknown mode: {} (use check, recheck, simulate, or finalize)",
                s
            )),
        }
    }
}

impl ModeArg {
    fn to_exec_mode(self) -> ExecMode {
        match self {
            Self::Check => ExecMode::Check,
            Self::ReCheck => ExecMode::ReCheck,
            Self::Simulate => ExecMode::Simulate,
            Self::Finalize => ExecMode::Finalize,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check a transaction's fee against the node's policy.
    Check {
        /// Transaction view (JSON with fee, gas, msgs). Overrides --fee/--gas/--msg.
        #[arg(long)]
        tx: Option<PathBuf>,

        /// Attached fee, e.g. "500uatom".
        #[arg(long, default_value = "")]
        fee: String,

        /// Gas limit.
        #[arg(long, default_value = "200000")]
        gas: u64,

        /// Message type URL (repeatable).
        #[arg(long = "msg")]
        msgs: Vec<String>,

        /// Execution mode.
        #[arg(long, default_value = "check")]
        mode: ModeArg,

        /// Fee already covered by a sponsorship stage.
        #[arg(long)]
        fee_pay_tx: bool,
    },

    /// Show the global, local, and combined requirement for a gas limit.
    Requirement {
        /// Gas limit.
        #[arg(long)]
        gas: u64,
    },

    /// Scale a price vector by a gas limit.
    RequiredFees {
        /// Gas prices, e.g. "0.0025uatom,1stake".
        #[arg(long)]
        prices: String,

        /// Gas limit.
        #[arg(long)]
        gas: u64,
    },

    /// Validate a governance price vector.
    ValidateParams {
        /// Gas prices, e.g. "0.0025uatom,1stake".
        #[arg(long)]
        prices: String,
    },

    /// Print the effective configuration as JSON.
    ShowConfig,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Check {
            tx,
            fee,
            gas,
            msgs,
            mode,
            fee_pay_tx,
        } => commands::check(&cli, tx.as_deref(), fee, *gas, msgs, *mode, *fee_pay_tx),
        Commands::Requirement { gas } => commands::show_requirement(&cli, *gas),
        Commands::RequiredFees { prices, gas } => commands::required_fees(prices, *gas),
        Commands::ValidateParams { prices } => commands::validate_params(prices),
        Commands::ShowConfig => commands::show_config(&cli),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
