//! cicd-release - Entry Point
//!
//! Deploys the backend for the current branch, waits for it, then deploys the
//! frontend pointing at it. Driven by the git branch and the environment.

use std::env;
use std::process::ExitCode;

use cicd_toolkit::app::options::ReleaseOptions;
use cicd_toolkit::app::run::run;
use cicd_toolkit::logs::{init_logging, LogOptions};
use cicd_toolkit::storage::layout::ProjectLayout;
use cicd_toolkit::utils::{parse_cli_args, version_info};

use colored::Colorize;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args = parse_cli_args(env::args().skip(1));

    // Print version and exit
    if cli_args.contains_key("version") {
        match serde_json::to_string_pretty(&version_info()) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{}", e),
        }
        return ExitCode::SUCCESS;
    }

    if let Err(e) = init_logging(LogOptions::from_lookup(|key| env::var(key).ok())) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let options = match ReleaseOptions::load(ProjectLayout::default()).await {
        Ok(options) => options,
        Err(e) => {
            error!("Unable to load configuration: {}", e);
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    info!("Running release with options: {:?}", options);
    match run(options).await {
        Ok(report) => {
            if report.backend_abandoned() {
                println!(
                    "{} Backend deploy {} did not finish in time, it may still go live",
                    "[WARN]".yellow().bold(),
                    report.deploy.attempt.id()
                );
            }
            println!(
                "{} Backend ({}): {}",
                "[SUCCESS]".green().bold(),
                report.target.name,
                report.backend_url
            );
            println!(
                "{} Frontend ({}, {}): {}",
                "[SUCCESS]".green().bold(),
                report.frontend.project_name,
                report.frontend.environment,
                report.frontend.url
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Release failed: {}", e);
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
