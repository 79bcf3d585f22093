use bulk_site_verify::utils::{logger, validation::Validate};
use bulk_site_verify::{execute, CliArgs, VerifyError};
use clap::Parser;

fn exit_with(e: &VerifyError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("[!] {}", e.user_friendly_message());
    eprintln!(">>> {}", e.recovery_suggestion());
    std::process::exit(1);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose);
    tracing::info!("Starting bulk-site-verify");

    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    tracing::debug!("Run config: {:?}", config);

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let summary = match execute(&config).await {
        Ok(summary) => summary,
        Err(e) => exit_with(&e),
    };

    if !config.dry_run {
        println!(
            "\n✔ DONE: {} verified, {} not verified, {} total (no CSV report).",
            summary.verified(),
            summary.failed(),
            summary.total()
        );
    }

    Ok(())
}
