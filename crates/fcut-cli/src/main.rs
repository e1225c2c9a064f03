use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fcut")]
#[command(about = "Facet routing-table reconciliation CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the edit plan that brings the live routing table in line with the desired modules
    Plan {
        /// Observed routing table (JSON)
        #[arg(long)]
        observed: String,

        /// Desired module set (JSON)
        #[arg(long)]
        desired: String,

        /// Layered config paths in merge order
        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Write manifest/plan/cuts under <DIR>/<plan_id>/ (overrides output.exports_root)
        #[arg(long = "export-root")]
        export_root: Option<String>,

        /// Fail on config keys this command does not read
        #[arg(long, default_value_t = false)]
        strict_config: bool,
    },

    /// Report drift between the live routing table and the desired modules
    Check {
        /// Observed routing table (JSON)
        #[arg(long)]
        observed: String,

        /// Desired module set (JSON)
        #[arg(long)]
        desired: String,

        /// Layered config paths in merge order
        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Fail on config keys this command does not read
        #[arg(long, default_value_t = false)]
        strict_config: bool,
    },

    /// Check both snapshots for selector collisions and shape problems
    Validate {
        /// Observed routing table (JSON)
        #[arg(long)]
        observed: String,

        /// Desired module set (JSON)
        #[arg(long)]
        desired: String,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> network -> overrides...)
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Silent if the file does not exist.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Plan {
            observed,
            desired,
            config_paths,
            export_root,
            strict_config,
        } => commands::plan::run(commands::plan::PlanArgs {
            observed,
            desired,
            config_paths,
            export_root,
            strict_config,
        }),

        Commands::Check {
            observed,
            desired,
            config_paths,
            strict_config,
        } => commands::check::run(commands::check::CheckArgs {
            observed,
            desired,
            config_paths,
            strict_config,
        }),

        Commands::Validate { observed, desired } => commands::validate::run(&observed, &desired),

        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = fcut_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
