use anyhow::Result;
use chrono::Local;
use clap::Parser;
use shared::mailer::DigestRenderer;
use shared::pipeline::{self, LiveProviders, Mode, RunOutcome};
use shared::{Config, Secrets};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "launch-digest")]
#[command(about = "Email an AI-written digest of today's top Product Hunt launches")]
struct Args {
    /// Path to the YAML config file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Number of products to include (overrides settings.product_count)
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Print the digest instead of emailing it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    print_banner();

    match run(args).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            println!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_banner() {
    let rule = "=".repeat(60);
    println!("{}", rule);
    println!("🚀 Product Hunt Daily Emailer");
    println!("   {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!("{}", rule);
    println!();
}

async fn run(args: Args) -> Result<u8> {
    let secrets = Secrets::from_env();
    let mut config = Config::load(&args.config)?;

    if let Some(count) = args.count {
        config.settings.product_count = count;
    }

    let recipients = pipeline::validated_recipients(&config, &args.config.display().to_string())?;

    println!("📧 Recipients: {}", recipients.len());
    for r in &recipients {
        println!("   • {} <{}>", r.name, r.email);
    }
    println!();

    let mode = if args.dry_run { Mode::DryRun } else { Mode::Send };
    let providers = LiveProviders::new(&config, &secrets);
    let outcome = pipeline::run(&config, &recipients, &providers, mode).await?;

    match &outcome {
        RunOutcome::NoProducts => {}
        RunOutcome::Previewed(digest) => {
            let today = Local::now().date_naive();
            println!("{}", DigestRenderer::text(digest, today));
        }
        RunOutcome::Delivered(results) => {
            let rule = "=".repeat(60);
            let failed = outcome.failed_sends();
            println!();
            println!("{}", rule);
            println!("📊 Summary: {} sent, {} failed", results.len() - failed, failed);
            println!("{}", rule);
        }
    }

    Ok(outcome.exit_code())
}
