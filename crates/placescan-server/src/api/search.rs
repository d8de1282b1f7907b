//! Search form and result page.
//!
//! `GET /` renders the form; `POST /search` validates it, runs one pipeline
//! with a client built for this request, caches the workbook and renders the
//! result table with a download link.

use std::time::Duration;

use askama::Template;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Response,
    Extension, Form,
};
use placescan_core::{expand_queries, CoreError, Keyword, ResultRecord, SearchCenter};
use placescan_google::{PaginationOptions, PlacesClient};
use placescan_pipeline::{column_headers, write_workbook, RunOptions, RunReport, SearchPipeline};
use serde::Deserialize;
use uuid::Uuid;

use super::{render_html, AppState};
use crate::middleware::RequestId;

const DEFAULT_QUERIES: &str = "coach,Arzt,Trainer";
const DEFAULT_LAT: &str = "51.0341";
const DEFAULT_LNG: &str = "7.8578";
const DEFAULT_RADIUS: &str = "35000";

/// Raw form submission. Numbers stay strings so bad input re-renders the
/// form with a message instead of a bare extractor rejection.
#[derive(Debug, Deserialize)]
pub(super) struct SearchForm {
    queries: String,
    lat: String,
    lng: String,
    radius: String,
    /// Checkbox; present only when ticked.
    website: Option<String>,
    api_key: Option<String>,
}

/// Values shown in the form inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct FormValues {
    pub queries: String,
    pub lat: String,
    pub lng: String,
    pub radius: String,
    pub website: bool,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            queries: DEFAULT_QUERIES.to_owned(),
            lat: DEFAULT_LAT.to_owned(),
            lng: DEFAULT_LNG.to_owned(),
            radius: DEFAULT_RADIUS.to_owned(),
            website: false,
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    form: FormValues,
    key_configured: bool,
    error: String,
}

#[derive(Template)]
#[template(path = "results.html")]
struct ResultsTemplate {
    keywords: String,
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
    warnings: Vec<String>,
    export_id: Uuid,
}

struct SearchInput {
    center: SearchCenter,
    keywords: Vec<Keyword>,
    include_website: bool,
}

impl SearchForm {
    fn values(&self) -> FormValues {
        FormValues {
            queries: self.queries.clone(),
            lat: self.lat.clone(),
            lng: self.lng.clone(),
            radius: self.radius.clone(),
            website: self.website.is_some(),
        }
    }

    /// A blank key field counts as absent.
    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    fn validate(&self) -> Result<SearchInput, String> {
        let lat = parse_coordinate(&self.lat)
            .ok_or_else(|| "Latitude ist keine gültige Zahl.".to_owned())?;
        let lng = parse_coordinate(&self.lng)
            .ok_or_else(|| "Longitude ist keine gültige Zahl.".to_owned())?;
        let radius = self
            .radius
            .trim()
            .parse::<u32>()
            .map_err(|_| "Radius muss eine ganze Zahl in Metern sein.".to_owned())?;

        let center = SearchCenter::new(lat, lng, radius).map_err(|e| match e {
            CoreError::InvalidLatitude(_) => "Latitude muss zwischen -90 und 90 liegen.".to_owned(),
            CoreError::InvalidLongitude(_) => {
                "Longitude muss zwischen -180 und 180 liegen.".to_owned()
            }
            CoreError::ZeroRadius => "Radius muss größer als 0 sein.".to_owned(),
            CoreError::EmptyKeyword => e.to_string(),
        })?;

        let keywords = expand_queries(&self.queries);
        if keywords.is_empty() {
            return Err("Bitte mindestens einen Suchbegriff angeben.".to_owned());
        }

        Ok(SearchInput {
            center,
            keywords,
            include_website: self.website.is_some(),
        })
    }
}

/// Accepts a decimal comma as well as a decimal point.
fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn table_row(record: &ResultRecord, include_website: bool) -> Vec<String> {
    let mut row = vec![
        record.keyword.clone(),
        record.name.clone(),
        record.street.clone(),
        record.house_number.clone(),
        record.postal_code.clone(),
        record.city.clone(),
        record.phone.clone(),
    ];
    if include_website {
        row.push(record.website.clone().unwrap_or_default());
    }
    row.push(record.distance_m.to_string());
    row
}

impl ResultsTemplate {
    fn new(keywords: &[Keyword], report: &RunReport, export_id: Uuid) -> Self {
        Self {
            keywords: keywords
                .iter()
                .map(Keyword::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            headers: column_headers(report.include_website),
            rows: report
                .records
                .iter()
                .map(|r| table_row(r, report.include_website))
                .collect(),
            warnings: report.warnings.iter().map(ToString::to_string).collect(),
            export_id,
        }
    }
}

fn form_error(status: StatusCode, form: FormValues, key_configured: bool, error: &str) -> Response {
    render_html(
        status,
        &IndexTemplate {
            form,
            key_configured,
            error: error.to_owned(),
        },
    )
}

pub(super) async fn index(State(state): State<AppState>) -> Response {
    render_html(
        StatusCode::OK,
        &IndexTemplate {
            form: FormValues::default(),
            key_configured: state.config.google_api_key.is_some(),
            error: String::new(),
        },
    )
}

pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Form(form): Form<SearchForm>,
) -> Response {
    let config = &state.config;
    let key_configured = config.google_api_key.is_some();

    let input = match form.validate() {
        Ok(input) => input,
        Err(message) => {
            return form_error(StatusCode::BAD_REQUEST, form.values(), key_configured, &message)
        }
    };

    // The configured key wins; the form field only fills the gap.
    let Some(api_key) = config.google_api_key.as_deref().or(form.api_key()) else {
        return form_error(
            StatusCode::BAD_REQUEST,
            form.values(),
            key_configured,
            "Kein API-Key: bitte GOOGLE_API_KEY setzen oder im Formular eingeben.",
        );
    };

    let client = match PlacesClient::with_base_url(
        api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.places_base_url,
    ) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(request_id = %req_id.0, error = %e, "failed to build Places client");
            return form_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                form.values(),
                key_configured,
                "Der Places-Client konnte nicht erstellt werden.",
            );
        }
    };

    let options = RunOptions {
        include_website: input.include_website,
        pagination: PaginationOptions {
            page_delay: Duration::from_millis(config.page_delay_ms),
            max_pages: config.max_pages,
        },
    };

    tracing::info!(
        request_id = %req_id.0,
        keywords = input.keywords.len(),
        radius_m = input.center.radius_m(),
        include_website = input.include_website,
        "search requested"
    );
    let report = SearchPipeline::new(&client, options)
        .run(&input.center, &input.keywords)
        .await;

    let bytes = match write_workbook(&report.records, report.include_website) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(request_id = %req_id.0, error = %e, "workbook export failed");
            return form_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                form.values(),
                key_configured,
                "Die Excel-Datei konnte nicht erstellt werden.",
            );
        }
    };
    let export_id = state.exports.insert(Bytes::from(bytes)).await;

    render_html(
        StatusCode::OK,
        &ResultsTemplate::new(&input.keywords, &report, export_id),
    )
}
