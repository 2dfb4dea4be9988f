//! CLI for the Corral folder access auditor.
//!
//! Pipeline: read records -> build forest -> propagate access -> leaf
//! audit -> output.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "corral", version, about = "Folder access auditor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report the cows lacking access to at least one leaf folder.
    Audit {
        /// Input file; reads stdin when absent.
        #[arg(short, long, env = "CORRAL_INPUT")]
        input: Option<PathBuf>,

        /// Print the uncool set as a JSON array instead of plain ids.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Render the audit report to stderr.
        #[arg(long, default_value_t = false)]
        report: bool,

        /// Sink output: "ndjson" writes NDJSON to stdout,
        /// "ndjson:/path/to/file" writes to file.
        #[arg(long)]
        sink: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr: stdout carries the audit result.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Audit {
            input,
            json,
            report,
            sink,
        } => {
            let t0 = Instant::now();

            // 1. Read token records.
            use corral_provider::RecordSource;
            let records = match input {
                Some(path) => {
                    tracing::info!(path = %path.display(), "starting audit");
                    let mut source = corral_provider::LineRecordSource::open(&path).await?;
                    source.read_records().await?
                }
                None => {
                    tracing::info!("starting audit (stdin)");
                    let mut source = corral_provider::LineRecordSource::stdin();
                    source.read_records().await?
                }
            };
            let t_read = t0.elapsed();
            tracing::info!(
                records = records.len(),
                elapsed_ms = t_read.as_millis(),
                "read input"
            );

            // 2. Build the forest.
            let forest = corral_analyzer::builder::build_forest(&records)?;
            tracing::info!(
                folders = forest.len(),
                cows = forest.total_cows(),
                "forest built"
            );

            // 3. Propagate effective access.
            let mut access = corral_analyzer::propagator::propagate_access(&forest);

            // 4. Restrict to leaves and take the complement.
            let leaves = corral_analyzer::audit::leaf_folders(&forest);
            corral_analyzer::audit::restrict_to_leaves(&mut access, &leaves);
            let uncool = corral_analyzer::audit::uncool_cows(&access, forest.total_cows());
            let t_total = t0.elapsed();
            tracing::info!(
                leaves = leaves.len(),
                uncool = uncool.len(),
                elapsed_ms = t_total.as_millis(),
                "audit complete"
            );

            // 5. Build the report.
            let audit_report = corral_analyzer::reporter::AuditReport::build(
                &forest,
                leaves.len(),
                &uncool,
                t_read,
                t_total,
            );

            // 6. Output.
            if let Some(ref sink_spec) = sink {
                let (summary, rows) = audit_report.to_rows();

                if sink_spec == "ndjson" {
                    let mut s = corral_analyzer::sink::json_stream::JsonStreamSink::stdout();
                    s.write_summary(&summary)?;
                    s.write_uncool(&rows)?;
                    let n = s.finish()?;
                    tracing::info!(rows = n, "ndjson sink: wrote to stdout");
                } else if let Some(path) = sink_spec.strip_prefix("ndjson:") {
                    let file = std::fs::File::create(path)?;
                    let mut s = corral_analyzer::sink::json_stream::JsonStreamSink::new(file);
                    s.write_summary(&summary)?;
                    s.write_uncool(&rows)?;
                    let n = s.finish()?;
                    tracing::info!(rows = n, path, "ndjson sink: wrote to file");
                } else {
                    eprintln!("Unknown sink: {}. Use 'ndjson' or 'ndjson:/path'", sink_spec);
                }
            } else if json {
                let ids: Vec<_> = uncool.iter().copied().collect();
                println!("{}", serde_json::to_string(&ids)?);
            } else {
                let mut stdout = std::io::stdout();
                corral_analyzer::sink::write_cow_ids(&mut stdout, uncool.iter().copied())?;
            }

            // Render the boxed report to stderr so it never mixes with
            // the stdout payload.
            if report || sink.is_some() {
                eprint!("{}", audit_report.render());
            }
        }
    }

    Ok(())
}
