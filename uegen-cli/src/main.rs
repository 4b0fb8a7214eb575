//! uegen CLI tool

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, info_span};
use uegen_common::{init_logging, LogLevel, OperatorConfig, ProtectionScheme};
use uegen_suci::{export_profiles, null_scheme_suci, Operator, SuciEncoder};

#[derive(Parser, Debug)]
#[command(name = "uegen")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        global = true
    )]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Conceal a SUPI into a SUCI
    Conceal {
        /// Path to the operator configuration file (YAML)
        #[arg(short = 'c', long = "config", value_name = "FILE")]
        config_file: PathBuf,

        /// SUPI, e.g. imsi-001010000000001
        #[arg(short = 's', long = "supi", value_name = "SUPI")]
        supi: String,

        /// Protection scheme id (0, 1 or 2); defaults to the first ECIES key configured
        #[arg(long = "scheme", value_name = "ID")]
        scheme: Option<u8>,
    },

    /// Generate UE profiles
    Generate {
        /// Path to the operator configuration file (YAML)
        #[arg(short = 'c', long = "config", value_name = "FILE")]
        config_file: PathBuf,

        /// Number of profiles to generate
        #[arg(short = 'n', long = "count", value_name = "N", default_value_t = 1)]
        count: usize,

        /// Directory for one <supi>.yaml per profile; prints YAML to stdout when absent
        #[arg(short = 'o', long = "out", value_name = "DIR")]
        out: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level);

    match args.command {
        Command::Conceal {
            config_file,
            supi,
            scheme,
        } => {
            let config = load_config(&config_file)?;
            println!("{}", conceal_supi(&config, &supi, scheme)?);
        }
        Command::Generate {
            config_file,
            count,
            out,
        } => {
            let config = load_config(&config_file)?;
            let profiles = Operator::new(config)
                .context("Invalid operator configuration")?
                .generate_ues(&mut rand::thread_rng(), count)
                .context("Failed to generate UE profiles")?;

            match out {
                Some(dir) => {
                    let paths = export_profiles(&dir, &profiles).with_context(|| {
                        format!("Failed to export profiles to {}", dir.display())
                    })?;
                    info!("Wrote {} profile(s) to {}", paths.len(), dir.display());
                    for path in paths {
                        println!("{}", path.display());
                    }
                }
                None => print!("{}", serde_yaml::to_string(&profiles)?),
            }
        }
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<OperatorConfig> {
    OperatorConfig::from_yaml_file(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

fn conceal_supi(config: &OperatorConfig, supi: &str, scheme: Option<u8>) -> Result<String> {
    let scheme = match scheme {
        Some(id) => ProtectionScheme::try_from(id)?,
        None => config
            .profiles
            .iter()
            .map(|profile| profile.scheme)
            .find(ProtectionScheme::is_ecies)
            .context("No Profile A or Profile B home network key in configuration")?,
    };

    let suci = if scheme.is_ecies() {
        SuciEncoder::from_config(config, scheme)?
            .with_span(info_span!("conceal", %scheme))
            .conceal(&mut rand::thread_rng(), supi)?
    } else {
        null_scheme_suci(supi, &config.plmn, config.routing_indicator())?
    };
    Ok(suci)
}
