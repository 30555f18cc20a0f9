use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use loggate_config::{ConfigProvider, FigmentProvider};
use loggate_core::{LevelGatedLogger, LogSink, Severity, Tag};
use loggate_telemetry::{try_init_subscriber, TracingSink};

use crate::error::CliFailure;

#[derive(Parser, Debug)]
#[command(name = "loggate", version, about)]
pub struct Cli {
    /// YAML file with `max_log_level` and `telemetry` settings. Without it,
    /// `config/loggate.yaml`, `config/<LOGGATE_ENV>.yaml` and `LOGGATE_*`
    /// variables are consulted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one message through the gate
    Emit(EmitArgs),
    /// Show the configured ceiling and which tiers it lets through
    Check,
}

#[derive(Args, Debug, Clone)]
pub struct EmitArgs {
    /// Tier code: V, D, I, W or E
    #[arg(short, long, value_parser = parse_severity)]
    pub level: Severity,
    /// Tag to write under; defaults to the name of this command
    #[arg(short, long)]
    pub tag: Option<String>,
    /// Failure description to attach to the record
    #[arg(long)]
    pub failure: Option<String>,
    pub message: String,
}

fn parse_severity(code: &str) -> Result<Severity, String> {
    code.parse().map_err(|err| format!("{err}"))
}

fn provider_for(config: Option<&PathBuf>) -> anyhow::Result<FigmentProvider> {
    match config {
        Some(path) => FigmentProvider::from_path(path)
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(FigmentProvider::from_default_sources()),
    }
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let provider = provider_for(cli.config.as_ref())?;
    let telemetry = provider
        .telemetry()
        .context("reading telemetry settings")?;
    try_init_subscriber(&telemetry).context("installing log subscriber")?;

    let logger = LevelGatedLogger::new(provider, TracingSink);
    match cli.command {
        Commands::Emit(args) => {
            emit(&logger, &args);
            Ok(())
        }
        Commands::Check => check(&logger),
    }
}

pub fn emit<P: ConfigProvider, S: LogSink>(logger: &LevelGatedLogger<P, S>, args: &EmitArgs) {
    let tag = match &args.tag {
        Some(name) => Tag::new(name.clone()),
        None => Tag::of(args),
    };
    let failure = args.failure.clone().map(CliFailure);
    logger.emit(
        args.level,
        &tag,
        &args.message,
        failure.as_ref().map(|f| f as &(dyn std::error::Error + 'static)),
    );
}

pub fn check<P: ConfigProvider, S: LogSink>(logger: &LevelGatedLogger<P, S>) -> anyhow::Result<()> {
    let max = logger
        .max_level()
        .context("resolving the configured ceiling")?;
    println!("max_log_level = {max}");
    for severity in Severity::ALL {
        let verdict = if max.permits(severity) { "emitted" } else { "suppressed" };
        println!("  {:<5} ({}) {}", severity, severity.code(), verdict);
    }
    Ok(())
}
