use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use risk_recon::chain::StepProgress;
use risk_recon::config::Settings;
use risk_recon::{logging, ResultRecord, ScanKind, Session};

/// risk-recon — run WHOIS / DNS / nmap reconnaissance through your shell and export the results.
#[derive(Debug, Parser)]
#[command(
    name = "risk-recon",
    version,
    about = "Run WHOIS / DNS / nmap reconnaissance through your shell and export the results.",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress log output.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Shell used as `<shell> -lc <command>`. Defaults to $SHELL.
    #[arg(long, env = "RISK_SHELL", global = true)]
    shell: Option<PathBuf>,

    /// Export root directory. Defaults to ~/RISK-Exports.
    #[arg(long = "export-dir", env = "RISK_EXPORT_DIR", global = true)]
    export_dir: Option<PathBuf>,

    /// Working directory for spawned commands.
    #[arg(long, env = "RISK_WORKDIR", global = true)]
    workdir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a single scan against a target.
    Scan {
        /// Domain, IP or URL.
        target: String,
        #[arg(long, value_enum, default_value_t = KindArg::Whois)]
        kind: KindArg,
        /// Write TXT/CSV/JSON exports afterwards.
        #[arg(long)]
        export: bool,
    },
    /// Run the full WHOIS -> DNS -> Nmap chain against a target.
    Chain {
        target: String,
        #[arg(long)]
        export: bool,
    },
    /// Run an arbitrary shell command and print its output.
    Exec {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Whois,
    Dns,
    FullOsint,
}

impl From<KindArg> for ScanKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Whois => ScanKind::Whois,
            KindArg::Dns => ScanKind::Dns,
            KindArg::FullOsint => ScanKind::FullOsint,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let settings = Settings::resolve(cli.shell, cli.export_dir, cli.workdir)
        .context("failed to resolve settings")?;
    let mut session = Session::from_settings(&settings);

    match cli.command {
        Command::Exec { command } => {
            let line = command.join(" ");
            return match session.run_command(&line).await {
                Ok(out) => {
                    print!("{out}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("{e}");
                    Ok(ExitCode::FAILURE)
                }
            };
        }
        Command::Scan {
            target,
            kind,
            export,
        } => {
            let target = require_target(&target)?;
            let record = session.run_scan(kind.into(), target).await;
            print_record(record);
            print_results_table(session.results());
            if export {
                export_session(&mut session).await?;
            }
        }
        Command::Chain { target, export } => {
            let target = require_target(&target)?;
            session.run_chain(target, print_step).await;
            print_results_table(session.results());
            if export {
                export_session(&mut session).await?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn require_target(raw: &str) -> Result<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("target must not be empty");
    }
    Ok(trimmed)
}

async fn export_session(session: &mut Session) -> Result<()> {
    let paths = session
        .export()
        .await
        .with_context(|| format!("export to {} failed", session.export_root().display()))?;
    println!("\nExported:");
    for p in paths {
        println!("  {}", p.display());
    }
    Ok(())
}

fn print_step(p: StepProgress<'_>) {
    println!("\n[{}/{}] {}", p.index + 1, p.total, p.record.title());
    print_record(p.record);
}

fn print_record(r: &ResultRecord) {
    println!("$ {}", r.command());
    if r.output().is_empty() {
        println!("No output.");
    } else {
        print!("{}", r.output());
        if !r.output().ends_with('\n') {
            println!();
        }
    }
}

fn print_results_table(results: &[ResultRecord]) {
    let mut title_w = "title".len();
    let mut kind_w = "scan_type".len();
    for r in results {
        title_w = title_w.max(r.title().len());
        kind_w = kind_w.max(r.scan_type().label().len());
    }
    let bytes_w = 8usize;
    let stamp_w = "yyyyMMdd_HHmmss".len();

    println!("\nResults: {}", results.len());
    println!(
        "{:<title_w$}  {:<kind_w$}  {:>bytes_w$}  {:<stamp_w$}",
        "title", "scan_type", "bytes", "timestamp",
    );
    println!(
        "{:-<title_w$}  {:-<kind_w$}  {:-<bytes_w$}  {:-<stamp_w$}",
        "", "", "", "",
    );
    for r in results {
        println!(
            "{:<title_w$}  {:<kind_w$}  {:>bytes_w$}  {:<stamp_w$}",
            r.title(),
            r.scan_type().label(),
            r.output().len(),
            risk_recon::export::file_stamp(r.timestamp()).unwrap_or_else(|_| "-".into()),
        );
    }
}
