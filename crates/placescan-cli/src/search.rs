//! The one thing the CLI does: run the pipeline and write the workbook.

use std::time::Duration;

use placescan_core::{expand_queries, SearchCenter, SearchConfig};
use placescan_google::{PaginationOptions, PlacesClient};
use placescan_pipeline::{save_workbook, RunOptions, RunReport, SearchPipeline};

use crate::Cli;

/// Run a search from parsed arguments and save the result workbook.
///
/// # Errors
///
/// Returns an error if no API key is available, the center or keyword list
/// is invalid, the client cannot be built, or the workbook cannot be
/// written. Failed searches and detail lookups are logged and summarized,
/// not propagated.
pub(crate) async fn run_search(config: &SearchConfig, cli: &Cli) -> anyhow::Result<()> {
    let api_key = cli
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .or(config.google_api_key.as_deref())
        .ok_or_else(|| anyhow::anyhow!("no API key: pass --api_key or set GOOGLE_API_KEY"))?;

    let center = SearchCenter::new(cli.lat, cli.lng, cli.radius)?;
    let keywords = expand_queries(&cli.queries);
    if keywords.is_empty() {
        anyhow::bail!("--queries contains no search terms");
    }

    let client = PlacesClient::with_base_url(
        api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.places_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Places client: {e}"))?;

    let options = run_options(config, cli);
    let report = SearchPipeline::new(&client, options)
        .on_keyword(|keyword| println!("\u{2192} Suche nach '{keyword}' \u{2026}"))
        .run(&center, &keywords)
        .await;

    save_workbook(&cli.output, &report.records, report.include_website)?;
    tracing::info!(
        path = %cli.output.display(),
        records = report.records.len(),
        "workbook saved"
    );

    summarize_warnings(&report);
    if report.is_empty() {
        println!("Keine Ergebnisse gefunden.");
    }
    println!(
        "\u{2705} {} Einträge in '{}' gespeichert.",
        report.records.len(),
        cli.output.display()
    );
    Ok(())
}

/// Config values, with command-line overrides applied on top.
fn run_options(config: &SearchConfig, cli: &Cli) -> RunOptions {
    let page_delay_ms = cli.page_delay_ms.unwrap_or(config.page_delay_ms);
    let max_pages = cli
        .max_pages
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(config.max_pages);

    RunOptions {
        include_website: cli.website,
        pagination: PaginationOptions {
            page_delay: Duration::from_millis(page_delay_ms),
            max_pages,
        },
    }
}

fn summarize_warnings(report: &RunReport) {
    if report.warnings.is_empty() {
        return;
    }
    tracing::warn!(count = report.warnings.len(), "search finished with warnings");
    eprintln!("{} Warnung(en) während der Suche:", report.warnings.len());
    for warning in &report.warnings {
        eprintln!("  - {warning}");
    }
}
