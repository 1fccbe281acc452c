use std::io::Write;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, error};

use prospect_stream::adapters::ReqwestHttpClient;
use prospect_stream::cancel::CancelToken;
use prospect_stream::cli::{parse_args, run_cli_command, CliCommand, SearchArgs, USAGE};
use prospect_stream::client::SearchClient;
use prospect_stream::config::SearchConfig;
use prospect_stream::logging;
use prospect_stream::models::SearchUpdate;
use prospect_stream::sse::DispatchMode;

/// Print status changes to stderr as they arrive.
async fn report_updates(mut rx: mpsc::UnboundedReceiver<SearchUpdate>) {
    while let Some(update) = rx.recv().await {
        match update {
            SearchUpdate::Status { message, total } => match total {
                Some(total) => eprintln!("[{} total] {}", total, message),
                None => eprintln!("{}", message),
            },
            SearchUpdate::Results { records, total } => {
                let total = total.map(|t| t.to_string()).unwrap_or_else(|| "?".to_string());
                eprintln!("Received {} records ({} total)", records.len(), total);
            }
        }
    }
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let mut config = SearchConfig::from_env().wrap_err("Invalid environment configuration")?;
    if args.blank_line {
        config = config.with_dispatch_mode(DispatchMode::BlankLine);
    }

    let client = SearchClient::new(ReqwestHttpClient::new(), config);
    let request = args.to_request();
    let token = CancelToken::new();

    // Ctrl-C cancels the in-flight stream
    let ctrl_c_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Ctrl-C received, cancelling search");
            ctrl_c_token.cancel();
        }
    });

    let (tx, rx) = mpsc::unbounded_channel();
    let reporter = tokio::spawn(report_updates(rx));

    let result = client.search(&request, &token, Some(tx)).await;
    // The sender was moved into the session; once it is dropped the reporter drains and ends
    let _ = reporter.await;

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(code = e.error_code(), "Search failed: {}", e);
            return Err(eyre!("{}\nHint: {}", e.user_message(), e.recovery_hint()));
        }
    };

    if outcome.is_cancelled() {
        eprintln!("Search cancelled");
    } else if !outcome.snapshot.completed {
        eprintln!("Stream ended without results");
    }

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &outcome.snapshot.records)?;
    writeln!(stdout)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::init();

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    if run_cli_command(&command) {
        return Ok(());
    }

    match command {
        CliCommand::Search(args) => run_search(args).await,
        CliCommand::Version | CliCommand::Help => Ok(()),
    }
}
