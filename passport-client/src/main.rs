use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use passport_client::cli::{
    self, AttendOptions, ScanOptions, VerifyOptions, parse_box, parse_rotation,
};
use passport_config::ConfigLoader;
use passport_model::{BoundingBox, Rotation};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str =
    "passport=debug,passport_client=debug,passport_core=info,warn";

#[derive(Parser, Debug)]
#[command(name = "passport", about = "Passport check-in client tools", version)]
struct Cli {
    /// Config file (TOML or JSON). Defaults to $PASSPORT_CONFIG_PATH or
    /// passport.toml in the working directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory searched for .env and default config files
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,
    /// Ignore <base-dir>/.env
    #[arg(long, global = true)]
    no_dotenv: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded pointer trace and print navigation steps
    Replay { trace: PathBuf },
    /// Check whether a still image shows a printed code
    Verify {
        image: PathBuf,
        /// Code box in detector coordinates: left,top,right,bottom
        #[arg(long = "box", value_parser = parse_box)]
        detector_box: BoundingBox,
        /// Sensor rotation relative to the display, in degrees
        #[arg(long, value_parser = parse_rotation, default_value = "0")]
        rotation: Rotation,
    },
    /// Submit attendance for a scanned payload or event id
    Attend {
        payload: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "PASSPORT_ID_TOKEN", hide_env_values = true)]
        token: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Run a full scanner session against a still image
    Scan {
        image: PathBuf,
        #[arg(long = "box", value_parser = parse_box)]
        detector_box: BoundingBox,
        #[arg(long, value_parser = parse_rotation, default_value = "0")]
        rotation: Rotation,
        /// Payload the decoder reports for the code
        #[arg(long)]
        payload: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, env = "PASSPORT_ID_TOKEN", hide_env_values = true)]
        token: Option<String>,
        #[arg(long, value_parser = humantime::parse_duration, default_value = "15s")]
        timeout: Duration,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut loader = match &cli.base_dir {
        Some(dir) => ConfigLoader::new(dir),
        None => ConfigLoader::default(),
    };
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    if cli.no_dotenv {
        loader = loader.without_dotenv();
    }
    let loaded = loader.load()?;
    let config = loaded.config;

    let default_filter = config
        .logging
        .filter
        .clone()
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = &loaded.dotenv {
        info!(path = %path.display(), "loaded .env file");
    }
    info!(source = %loaded.source, overrides = ?loaded.overrides, "Configuration ready");

    match cli.command {
        Command::Replay { trace } => {
            for step in cli::replay_file(&trace, &config)? {
                println!("{step}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify {
            image,
            detector_box,
            rotation,
        } => {
            let verdict = cli::verify_image(
                &VerifyOptions {
                    image,
                    detector_box,
                    rotation,
                },
                &config,
            )?;
            println!(
                "white ring: {:.1}% of {} samples ({})",
                verdict.border.ratio() * 100.0,
                verdict.border.total,
                if verdict.border.passed { "pass" } else { "fail" }
            );
            println!(
                "texture: {} samples, variance {:.2}, deviation {:.2} ({})",
                verdict.texture.samples,
                verdict.texture.variance,
                verdict.texture.mean_abs_deviation,
                if verdict.texture.passed { "pass" } else { "fail" }
            );
            match verdict.rejection() {
                None => {
                    println!("authentic");
                    Ok(ExitCode::SUCCESS)
                }
                Some(rejection) => {
                    println!("rejected: {rejection}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Attend {
            payload,
            email,
            token,
            full_name,
            address,
        } => {
            let outcome = cli::attend(
                &AttendOptions {
                    payload,
                    email,
                    token,
                    full_name,
                    address,
                },
                &config,
            )
            .await?;
            println!("{}", outcome.notice());
            Ok(ExitCode::SUCCESS)
        }
        Command::Scan {
            image,
            detector_box,
            rotation,
            payload,
            email,
            token,
            timeout,
        } => {
            let report = cli::scan_image(
                &ScanOptions {
                    image,
                    detector_box,
                    rotation,
                    payload,
                    email,
                    token,
                    timeout,
                },
                &config,
            )
            .await?;

            for toast in &report.toasts {
                println!("toast: {toast}");
            }
            if let Some(title) = &report.confirmation {
                println!("checked in: {title}");
                return Ok(ExitCode::SUCCESS);
            }
            if let Some(dialog) = &report.dialog {
                println!("{}: {}", dialog.title, dialog.message);
            }
            if report.sign_in_requested {
                println!("sign-in required");
            }
            if report.timed_out {
                warn!(?timeout, "Scan session timed out");
                println!("no check-in; last hint: {}", report.hint);
            }
            let resolved = !report.timed_out
                && report.dialog.is_none()
                && !report.sign_in_requested;
            Ok(if resolved {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_covers_client_crate() {
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
        let directives: Vec<&str> = DEFAULT_LOG_FILTER.split(',').collect();
        assert!(directives.contains(&"passport_client=debug"));
        assert!(directives.contains(&"passport=debug"));
    }
}
