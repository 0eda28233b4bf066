use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _};
use clap::{Parser, Subcommand};
use doc_ingest::config::{DEFAULT_COMPONENT_NAME, DEFAULT_KEY_FIELD};
use doc_ingest::invoke::handlers::{batch_insert, health_check};
use doc_ingest::{verify, BatchRequest, CommandRequest, IngestConfig, InMemoryStore, Service};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "doc-ingest")]
#[command(about = "Load document-database exports into a keyed store", long_about = None)]
#[command(version)]
struct Cli {
    /// Document field used as the storage key.
    #[arg(long, global = true, env = "DOC_INGEST_KEY_FIELD", default_value = DEFAULT_KEY_FIELD)]
    key_field: String,

    /// Component name reported by the health check.
    #[arg(long, global = true, env = "DOC_INGEST_COMPONENT", default_value = DEFAULT_COMPONENT_NAME)]
    component: String,

    /// Log filter, e.g. `info` or `doc_ingest=debug`.
    #[arg(long, global = true, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest a batch file (or `-` for stdin) into an in-memory store and print the result.
    Ingest {
        input: PathBuf,
        /// Read every key back and compare it with the submitted document.
        #[arg(long)]
        verify: bool,
    },

    /// Print the health check structure.
    Health,

    /// Serve batchInsert and healthCheck over HTTP.
    #[cfg(feature = "http")]
    Serve {
        #[arg(long, env = "DOC_INGEST_BIND", default_value = "127.0.0.1:7050")]
        bind: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = IngestConfig::new()
        .with_key_field(cli.key_field)
        .with_component_name(cli.component);

    match cli.command {
        Command::Ingest { input, verify: check } => ingest(config, &input, check),
        Command::Health => {
            let service = Service::standard(InMemoryStore::new(), config);
            let response =
                service.dispatch_request(&CommandRequest::new(health_check::FUNCTION, vec![]));
            print_response(&response)
        }
        #[cfg(feature = "http")]
        Command::Serve { bind } => serve(config, &bind),
    }
}

fn ingest(config: IngestConfig, input: &Path, check: bool) -> anyhow::Result<()> {
    let payload = read_input(input)?;
    let key_field = config.key_field.clone();

    let store = InMemoryStore::new();
    let service = Service::standard(store.clone(), config);
    let response =
        service.dispatch_request(&CommandRequest::new(batch_insert::FUNCTION, vec![payload.clone()]));
    print_response(&response)?;

    if check {
        let request = BatchRequest::from_slice(payload.as_bytes())?;
        let report = verify(&store, &request, &key_field);
        for entry in &report.keys {
            eprintln!("{:?}: {}", entry.key, entry.check);
        }
        eprintln!(
            "verified {} of {} keys ({} documents without a key)",
            report.matched(),
            report.keys.len(),
            report.skipped
        );
        if !report.is_clean() {
            bail!("verification failed");
        }
    }
    Ok(())
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read batch from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input)
        .with_context(|| format!("failed to read batch from {}", input.display()))
}

fn print_response(response: &doc_ingest::CommandResponse) -> anyhow::Result<()> {
    if !response.is_ok() {
        bail!("{} (status {})", response.message, response.status);
    }
    let body: serde_json::Value = response.payload_json()?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

#[cfg(feature = "http")]
fn serve(config: IngestConfig, bind: &str) -> anyhow::Result<()> {
    use std::sync::Arc;

    let service = Arc::new(Service::standard(InMemoryStore::new(), config));
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(doc_ingest::invoke::serve(service, bind))?;
    Ok(())
}
