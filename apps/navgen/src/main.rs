use std::{fs, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use navmenu::Reconciliation;
use quickbase::{QuickbaseClient, TableIds};
use tracing::info;

mod config;
mod render;

/// Builds the customer navigation menu and the missing-report diagnostic
/// from the three Quickbase record sets.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    base_url: Option<String>,
    /// Quickbase realm hostname, e.g. myrealm.quickbase.com
    #[arg(long)]
    realm: Option<String>,
    #[arg(long)]
    token: Option<String>,
    #[arg(long)]
    reports_table: Option<String>,
    #[arg(long)]
    programs_table: Option<String>,
    #[arg(long)]
    customers_table: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Comma-separated letter ranges for the dropdowns, e.g. "0-9,A-D,E-H"
    #[arg(long)]
    ranges: Option<String>,
    /// Write the rendered markup here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(v) = args.base_url {
        settings.base_url = v;
    }
    if let Some(v) = args.realm {
        settings.realm_hostname = v;
    }
    if let Some(v) = args.token {
        settings.user_token = v;
    }
    if let Some(v) = args.reports_table {
        settings.reports_table_id = v;
    }
    if let Some(v) = args.programs_table {
        settings.programs_table_id = v;
    }
    if let Some(v) = args.customers_table {
        settings.customers_table_id = v;
    }
    if let Some(v) = args.timeout_secs {
        settings.timeout_secs = v;
    }
    if let Some(v) = args.ranges {
        settings.ranges = config::parse_ranges(&v)?;
    }
    settings.validate()?;

    let client = QuickbaseClient::with_timeout(
        &settings.base_url,
        &settings.realm_hostname,
        &settings.user_token,
        Duration::from_secs(settings.timeout_secs),
    )
    .context("failed to build quickbase client")?;

    let tables = TableIds {
        reports: settings.reports_table_id.clone(),
        programs: settings.programs_table_id.clone(),
        customers: settings.customers_table_id.clone(),
    };
    let (reports, programs, customers) = client
        .fetch_all(&tables)
        .await
        .context("record fetch failed")?;

    let Reconciliation {
        mut summaries,
        missing,
    } = navmenu::reconcile(&reports, programs, &customers);
    navmenu::sort_summaries(&mut summaries);
    let tree = navmenu::bucket(&summaries, &settings.ranges);

    info!(
        customers = summaries.len(),
        missing = missing.count,
        "reconciliation complete"
    );

    let page = render::render_page(&tree, &missing);
    match args.out {
        Some(path) => fs::write(&path, page)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{page}"),
    }

    Ok(())
}
