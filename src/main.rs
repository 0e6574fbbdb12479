use anyhow::Result;
use clap::Parser;
use heartlock::config::{Config, RewardVariant};
use heartlock::gift::delivery::GiftCourier;
use heartlock::runtime::ExperienceRuntime;
use heartlock::session::Session;
use heartlock::ui;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Passcode-gated interactive proposal experience for the terminal.
#[derive(Parser, Debug)]
#[command(name = "heartlock", version, about)]
struct Cli {
    /// Use a config file other than ~/.heartlock/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the terminal reward stage
    #[arg(long, value_enum)]
    reward: Option<RewardArg>,

    /// Log engine transitions to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum RewardArg {
    SurpriseLink,
    GiftIntake,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the prompt flow quiet unless asked; transitions go to stderr.
    let level = if cli.verbose { Level::INFO } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load_or_init()?,
    };
    config.apply_env_overrides();
    if let Some(reward) = cli.reward {
        config.reward = match reward {
            RewardArg::SurpriseLink => RewardVariant::SurpriseLink,
            RewardArg::GiftIntake => RewardVariant::GiftIntake,
        };
    }
    config.validate()?;

    let courier = GiftCourier::new(&config.gift);
    let session = Session::new(config);
    let runtime = ExperienceRuntime::new(session, courier);
    ui::run(runtime).await
}
