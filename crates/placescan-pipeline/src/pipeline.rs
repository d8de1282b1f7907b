//! Search pipeline orchestration.

use placescan_core::{
    AddressParser, GermanAddressParser, Keyword, PlaceCandidate, ResultRecord, SearchCenter,
    SeenSet,
};
use placescan_google::{PaginationOptions, PlacesClient};

use crate::report::{RunReport, RunStats, RunWarning};

/// Per-run switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Request the `website` detail field and emit a website column.
    pub include_website: bool,
    pub pagination: PaginationOptions,
}

/// Called with each keyword just before its first page is requested.
pub type KeywordHook<'a> = Box<dyn Fn(&Keyword) + Send + Sync + 'a>;

/// Runs keyword searches against one [`PlacesClient`].
///
/// The client is borrowed, never global; the address parser is pluggable so
/// other locales can replace [`GermanAddressParser`].
pub struct SearchPipeline<'a, P = GermanAddressParser> {
    client: &'a PlacesClient,
    options: RunOptions,
    parser: P,
    on_keyword: Option<KeywordHook<'a>>,
}

impl<'a> SearchPipeline<'a, GermanAddressParser> {
    #[must_use]
    pub fn new(client: &'a PlacesClient, options: RunOptions) -> Self {
        Self::with_parser(client, options, GermanAddressParser)
    }
}

impl<'a, P: AddressParser> SearchPipeline<'a, P> {
    #[must_use]
    pub fn with_parser(client: &'a PlacesClient, options: RunOptions, parser: P) -> Self {
        Self {
            client,
            options,
            parser,
            on_keyword: None,
        }
    }

    /// Registers a progress callback, e.g. for a terminal status line.
    #[must_use]
    pub fn on_keyword(mut self, hook: impl Fn(&Keyword) + Send + Sync + 'a) -> Self {
        self.on_keyword = Some(Box::new(hook));
        self
    }

    /// Run the full pipeline for `keywords` around `center`.
    ///
    /// 1. Page through nearby search per keyword (pacing delay between pages).
    /// 2. Drop candidates farther than the radius.
    /// 3. Skip places already admitted by an earlier page or keyword.
    /// 4. Fetch details, split the address, assemble the record.
    ///
    /// Keywords are processed in input order and records keep discovery
    /// order. Search and detail failures become [`RunWarning`]s; the run
    /// itself never fails.
    pub async fn run(&self, center: &SearchCenter, keywords: &[Keyword]) -> RunReport {
        let mut run = RunState::new(self.options.include_website);

        for keyword in keywords {
            run.stats.keywords += 1;
            tracing::info!(keyword = %keyword, radius_m = center.radius_m(), "searching");
            if let Some(hook) = &self.on_keyword {
                hook(keyword);
            }

            let mut pager = self
                .client
                .nearby_pages(center, keyword, self.options.pagination);
            while let Some(page) = pager.next_page().await {
                match page {
                    Ok(page) => {
                        for candidate in page.candidates {
                            self.process_candidate(&mut run, center, keyword, candidate)
                                .await;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(
                            keyword = %keyword,
                            error = %e,
                            "nearby search failed; skipping rest of keyword"
                        );
                        run.warnings.push(RunWarning::SearchFailed {
                            keyword: keyword.to_string(),
                            message: e.to_string(),
                        });
                    }
                }
            }
            run.stats.pages_fetched += pager.pages_fetched();
        }

        let report = run.finish();
        tracing::info!(
            records = report.records.len(),
            warnings = report.warnings.len(),
            raw_results = report.stats.raw_results,
            outside_radius = report.stats.outside_radius,
            duplicates = report.stats.duplicates,
            "run finished"
        );
        report
    }

    async fn process_candidate(
        &self,
        run: &mut RunState,
        center: &SearchCenter,
        keyword: &Keyword,
        candidate: PlaceCandidate,
    ) {
        run.stats.raw_results += 1;

        let distance_m = center.distance_to(candidate.location);
        if !center.accepts(distance_m) {
            run.stats.outside_radius += 1;
            tracing::debug!(
                place_id = %candidate.place_id,
                place_name = candidate.name.as_deref().unwrap_or_default(),
                distance_m,
                "outside radius"
            );
            return;
        }

        if !run.seen.admit(&candidate.place_id) {
            run.stats.duplicates += 1;
            return;
        }
        run.stats.unique_candidates += 1;

        match self
            .client
            .place_details(&candidate.place_id, self.options.include_website)
            .await
        {
            Ok(detail) => {
                let address = self.parser.parse(&detail.formatted_address);
                run.records
                    .push(ResultRecord::assemble(keyword, detail, address, distance_m));
            }
            Err(e) => {
                run.stats.detail_failures += 1;
                tracing::warn!(
                    keyword = %keyword,
                    place_id = %candidate.place_id,
                    error = %e,
                    "place details failed; skipping place"
                );
                run.warnings.push(RunWarning::DetailsFailed {
                    keyword: keyword.to_string(),
                    place_id: candidate.place_id,
                    message: e.to_string(),
                });
            }
        }
    }
}

/// Single owner of everything one run accumulates.
struct RunState {
    seen: SeenSet,
    records: Vec<ResultRecord>,
    warnings: Vec<RunWarning>,
    stats: RunStats,
    include_website: bool,
}

impl RunState {
    fn new(include_website: bool) -> Self {
        Self {
            seen: SeenSet::new(),
            records: Vec::new(),
            warnings: Vec::new(),
            stats: RunStats::default(),
            include_website,
        }
    }

    fn finish(self) -> RunReport {
        RunReport {
            records: self.records,
            warnings: self.warnings,
            stats: self.stats,
            include_website: self.include_website,
        }
    }
}
