//! WipeGuard CLI: command-line client for the WipeGuard API.
//!
//! Set WIPEGUARD_API_URL (or API_URL) and optionally WIPEGUARD_API_KEY, sent as X-API-Key.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use wipeguard_api_client::{
    new_session_id, ApiClient, CaptchaGate, ProgressUpdate, UploadFile, WipeWizard, WizardError,
};
use wipeguard_cli::{format_progress, format_report, format_review, init_tracing, is_affirmative};
use wipeguard_core::classifier::classify_with_reason;
use wipeguard_core::models::WipeType;
use wipeguard_core::{ClassifierConfig, WipeSettings};

#[derive(Parser)]
#[command(name = "wipeguard", about = "WipeGuard secure file wipe CLI")]
struct Cli {
    /// Debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a file name locally, without contacting the server
    Classify {
        /// File name to classify
        name: String,
        /// File size in bytes
        #[arg(long)]
        size: Option<u64>,
        /// Extra sensitive keyword (repeatable)
        #[arg(long = "keyword")]
        keywords: Vec<String>,
    },
    /// Upload files into a session
    Upload {
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Session ID (a new one is generated when omitted)
        #[arg(long)]
        session: Option<String>,
    },
    /// Classify every file of a session
    Scan {
        session: String,
        /// Extra sensitive keyword (repeatable)
        #[arg(long = "keyword")]
        keywords: Vec<String>,
    },
    /// Wipe every scanned file of a session
    Wipe {
        session: String,
        #[arg(long = "type", default_value = "standard")]
        wipe_type: WipeType,
    },
    /// Show every file record of a session
    Status { session: String },
    /// Remove metadata of successfully wiped files
    Purge { session: String },
    /// Upload, scan, review and wipe files in one guided session
    Run {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Wipe type (defaults to the scan's recommendation)
        #[arg(long = "type")]
        wipe_type: Option<WipeType>,
        /// Extra sensitive keyword (repeatable)
        #[arg(long = "keyword")]
        keywords: Vec<String>,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
        /// Require a captcha before file selection
        #[arg(long)]
        captcha: bool,
        /// Ask before scanning instead of scanning right after upload
        #[arg(long)]
        no_auto_scan: bool,
    },
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn prompt(question: &str) -> Result<String> {
    print!("{} ", question);
    std::io::stdout().flush().context("Flush stdout")?;
    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Read from stdin")?;
    Ok(answer)
}

fn load_files(paths: &[PathBuf]) -> Result<Vec<UploadFile>> {
    paths
        .iter()
        .map(|path| {
            UploadFile::from_path(path).with_context(|| format!("Failed to read {}", path.display()))
        })
        .collect()
}

fn client() -> Result<ApiClient> {
    ApiClient::from_env()
        .context("Failed to create API client. Set WIPEGUARD_API_URL (or API_URL)")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Classify {
            name,
            size,
            keywords,
        } => {
            let config = ClassifierConfig::with_custom_keywords(&keywords);
            let classification = classify_with_reason(&name, size, &config);
            print_json(&serde_json::json!({
                "name": name,
                "size": size,
                "riskLevel": classification.level,
                "reason": classification.reason.to_string(),
            }))?;
        }
        Commands::Upload { files, session } => {
            let session_id = session.unwrap_or_else(new_session_id);
            let files = load_files(&files)?;
            let response = client()?.upload_files(&session_id, &files).await?;
            print_json(&response)?;
        }
        Commands::Scan { session, keywords } => {
            let response = client()?.scan_session(&session, &keywords).await?;
            print_json(&response)?;
        }
        Commands::Wipe { session, wipe_type } => {
            let response = client()?.wipe_session(&session, wipe_type).await?;
            print_json(&response)?;
        }
        Commands::Status { session } => {
            let response = client()?.session_status(&session).await?;
            print_json(&response)?;
        }
        Commands::Purge { session } => {
            let response = client()?.purge_session(&session).await?;
            print_json(&response)?;
        }
        Commands::Run {
            files,
            wipe_type,
            keywords,
            yes,
            captcha,
            no_auto_scan,
        } => {
            let mut settings = WipeSettings {
                show_detailed_logs: cli.verbose,
                enable_auto_scan: !no_auto_scan,
                ..WipeSettings::default()
            };
            for keyword in &keywords {
                settings.add_keyword(keyword);
            }
            run_wizard(client()?, settings, files, wipe_type, yes, captcha).await?;
        }
    }

    Ok(())
}

async fn run_wizard(
    client: ApiClient,
    settings: WipeSettings,
    paths: Vec<PathBuf>,
    wipe_type: Option<WipeType>,
    yes: bool,
    captcha: bool,
) -> Result<()> {
    let mut wizard = WipeWizard::new(client, settings);
    if captcha {
        wizard = wizard.with_captcha(CaptchaGate::new());
        pass_captcha(&mut wizard).await?;
    }

    wizard.select_files(load_files(&paths)?)?;

    if !wizard.settings().enable_auto_scan
        && !yes
        && !is_affirmative(&prompt(&format!("Scan {} file(s) now? [y/N]", paths.len()))?)
    {
        println!("Scan cancelled");
        return Ok(());
    }

    let mut print_update = |update: ProgressUpdate| println!("{}", format_progress(&update));

    let scan = wizard.start_scan(&mut print_update).await?;
    println!("{}", format_review(scan));

    let confirmed = yes
        || !wizard.settings().confirm_before_wipe
        || is_affirmative(&prompt("Permanently wipe these files? [y/N]")?);
    if !confirmed {
        println!("Wipe cancelled");
        return Ok(());
    }

    let report = wizard
        .start_wipe(wipe_type, confirmed, &mut print_update)
        .await?;
    println!("{}", format_report(report));
    tracing::debug!(session_id = %report.session_id, "Session finished");

    Ok(())
}

async fn pass_captcha(wizard: &mut WipeWizard<ApiClient>) -> Result<()> {
    loop {
        let code = wizard.captcha_code().unwrap_or_default().to_string();
        let answer = prompt(&format!("Type the code {} to continue:", code))?;
        match wizard.verify_captcha(&answer) {
            Ok(()) => return Ok(()),
            Err(WizardError::CaptchaMismatch { remaining_attempts }) => {
                println!("Code does not match, {} attempt(s) left", remaining_attempts);
            }
            Err(WizardError::CaptchaLocked { retry_after }) => {
                println!("Too many attempts, wait {}s", retry_after.as_secs().max(1));
                tokio::time::sleep(retry_after).await;
            }
            Err(e) => return Err(e.into()),
        }
    }
}
