//! HTTP-facing submission interface.
//!
//! Two routes: `GET /` renders the empty form, `POST /` runs the pipeline on
//! the submitted URL list and renders the grouped report. This layer parses
//! the form, picks the user-facing message for batch-level failures, and
//! hands a structured [`Report`] to the template; it never builds markup
//! itself.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::routing::get;
use axum::{Form, Router};
use log::{error, info};
use serde::Deserialize;

use crate::config::Config;
use crate::expand::cleaned_input;
use crate::initialization::{init_client, init_extractor, init_semaphore};
use crate::inspect::Inspector;
use crate::report::Report;
use crate::run::{build_report, BatchContext};

/// Message shown when the submitted form is missing the URL list field.
const CLEANUP_ERROR: &str = "There was an error cleaning the URL list, please try again.";
/// Message shown when the batch cannot be processed (classification failure).
const PROCESSING_ERROR: &str = "There was an error processing the URL list, please try again.";

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Title rendered on every page; immutable after startup.
    pub site_title: Arc<str>,
    /// Shared pipeline resources (lookup capability, extractor, semaphore).
    pub batch: Arc<BatchContext>,
}

/// Template for the home page, with or without a report.
///
/// Renders `templates/home.html`: the submission form (with the cleaned
/// input redisplayed), an optional batch-level error message, and the
/// grouped report body.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Page title from configuration.
    pub site_title: String,
    /// Cleaned input text redisplayed in the form.
    pub url_list: String,
    /// The assembled report, absent on first load or batch failure.
    pub report: Option<Report>,
    /// Batch-level error message replacing the report body.
    pub error: Option<String>,
    /// Whether results are sorted (1) or in first-occurrence order (0).
    pub sort_results: u8,
}

/// Form fields accepted by `POST /`.
///
/// Both fields are optional: a missing `url_list` is a request-scoped
/// cleanup error, and a missing or malformed `sort_results` silently means
/// unsorted.
#[derive(Debug, Deserialize)]
struct SubmitForm {
    url_list: Option<String>,
    sort_results: Option<String>,
}

/// Parses the sort toggle leniently: anything that isn't the integer 1
/// (including garbage and absence) means unsorted.
fn parse_sort_flag(raw: Option<&str>) -> bool {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .map(|value| value == 1)
        .unwrap_or(false)
}

/// Renders the empty submission form.
///
/// # Endpoint
///
/// `GET /`
async fn home(State(state): State<AppState>) -> HomeTemplate {
    HomeTemplate {
        site_title: state.site_title.to_string(),
        url_list: String::new(),
        report: None,
        error: None,
        sort_results: 0,
    }
}

/// Runs the pipeline on a submitted URL list and renders the report.
///
/// Batch-level failures replace the report body with a short apology;
/// per-URL lookup failures are inline badges within an otherwise-complete
/// report and never reach this handler as errors.
///
/// # Endpoint
///
/// `POST /`
async fn home_post(State(state): State<AppState>, Form(form): Form<SubmitForm>) -> HomeTemplate {
    let site_title = state.site_title.to_string();

    let Some(raw) = form.url_list else {
        return HomeTemplate {
            site_title,
            url_list: String::new(),
            report: None,
            error: Some(CLEANUP_ERROR.to_string()),
            sort_results: 0,
        };
    };

    let sort = parse_sort_flag(form.sort_results.as_deref());
    let url_list = cleaned_input(&raw);

    match build_report(&raw, sort, &state.batch).await {
        Ok(report) => HomeTemplate {
            site_title,
            url_list,
            report: Some(report),
            error: None,
            sort_results: sort as u8,
        },
        Err(e) => {
            error!("failed to build report: {e:#}");
            HomeTemplate {
                site_title,
                url_list,
                report: None,
                error: Some(PROCESSING_ERROR.to_string()),
                sort_results: sort as u8,
            }
        }
    }
}

/// Builds the application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home).post(home_post))
        .with_state(state)
}

/// Runs the web service with the given configuration.
///
/// Initializes the HTTP client, extractor and semaphore, binds the listener
/// and serves until the process is stopped.
///
/// # Errors
///
/// Returns an error if client initialization or the listener bind fails, or
/// if the server stops unexpectedly.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let client = init_client(&config)?;
    let inspector = Inspector::new(client, config.lookup_timeout());

    let state = AppState {
        site_title: Arc::from(config.site_title.as_str()),
        batch: Arc::new(BatchContext {
            lookup: Arc::new(inspector),
            extractor: init_extractor(),
            semaphore: init_semaphore(config.max_concurrency),
        }),
    };

    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind((config.bind.as_str(), config.port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}:{}: {}", config.bind, config.port, e))?;

    info!("Listening on http://{}:{}/", config.bind, config.port);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
