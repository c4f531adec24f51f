//! Terminal driver for the search-select control.
//!
//! Each stdin line is either typed search text or a command:
//! `:open`, `:close`, `:pick N`, `:down`, `:up`, `:enter`, `:clear`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use tally_select::{FetchError, FnFetcher, OptionContent, Projection, SearchSelect, SelectAction, SelectConfig, SelectOptions, SelectView};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// Demo command line arguments.
#[derive(Parser, Debug)]
#[command(name = "tally-select-demo")]
#[command(about = "Drive a search-select control from stdin")]
struct Args {
	/// JSON array of `{ "id", "label", "detail"? }` records
	#[arg(short, long, value_name = "PATH")]
	items: PathBuf,

	/// TOML config file (defaults to the platform config dir)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Simulated fetch latency
	#[arg(long, default_value_t = 120)]
	latency_ms: u64,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct Record {
	id: String,
	label: String,
	#[serde(default)]
	detail: Option<String>,
}

fn load_records(path: &Path) -> anyhow::Result<Vec<Record>> {
	let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
	serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn build_select(records: Vec<Record>, config: SelectConfig, latency: Duration) -> SearchSelect<Record> {
	let records = Arc::new(records);
	let fetcher = FnFetcher::new(move |query: String| {
		let records = Arc::clone(&records);
		async move {
			tokio::time::sleep(latency).await;
			let needle = query.to_lowercase();
			let matches: Vec<Record> = records.iter().filter(|r| r.label.to_lowercase().contains(&needle)).cloned().collect();
			Ok::<_, FetchError>(matches)
		}
	});
	let projection = Projection::new(|r: &Record| r.id.clone(), |r: &Record| r.label.clone());

	SearchSelect::new(
		SelectOptions::new(fetcher, projection)
			.config(config)
			.placeholder("(nothing selected)")
			.empty_message("no matches")
			.render_option(|r: &Record| match &r.detail {
				Some(detail) => OptionContent::label(r.label.clone()).with_detail(detail.clone()),
				None => OptionContent::label(r.label.clone()),
			})
			.on_change(|id| info!(id, "value changed"))
			.on_fetch_error(|err| tracing::error!(error = %err, "lookup failed")),
	)
}

fn print_view(view: &SelectView) {
	println!("[{}] query={:?}{}", view.trigger, view.query, if view.loading { " (loading)" } else { "" });
	if !view.open {
		return;
	}
	for (index, row) in view.rows[view.visible.clone()].iter().enumerate() {
		let cursor = if row.highlighted { '>' } else { ' ' };
		let mark = if row.selected { '*' } else { ' ' };
		let index = index + view.visible.start;
		match &row.content.detail {
			Some(detail) => println!("{cursor}{mark} {index}: {} ({detail})", row.content.label),
			None => println!("{cursor}{mark} {index}: {}", row.content.label),
		}
	}
	if let Some(message) = &view.empty_message {
		println!("   {message}");
	}
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if args.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO })
		.with_writer(std::io::stderr)
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	let config = match &args.config {
		Some(path) => SelectConfig::load(path)?,
		None => SelectConfig::load_default()?,
	};
	let records = load_records(&args.items)?;
	info!(records = records.len(), debounce_ms = config.debounce_ms, "starting demo");

	let mut select = build_select(records, config, Duration::from_millis(args.latency_ms));
	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	while let Some(line) = lines.next_line().await? {
		match line.trim_end() {
			":open" => {
				select.open();
			}
			":close" => {
				select.handle(SelectAction::Dismiss);
			}
			":down" => {
				select.handle(SelectAction::MoveHighlight { delta: 1 });
			}
			":up" => {
				select.handle(SelectAction::MoveHighlight { delta: -1 });
			}
			":enter" => {
				select.handle(SelectAction::Confirm);
			}
			":clear" => {
				select.set_value(None);
			}
			cmd => match cmd.strip_prefix(":pick ") {
				Some(arg) => match arg.trim().parse::<usize>() {
					Ok(index) => {
						if !select.select(index) {
							println!("no candidate at {index}");
						}
					}
					Err(err) => println!("bad index: {err}"),
				},
				None => select.input(cmd),
			},
		}
		select.settle().await;
		print_view(&select.view());
	}
	Ok(())
}
