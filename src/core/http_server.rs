use crate::configuration::Context;
use crate::estimate::{build_input, compute_estimate, EstimateRequest, EstimateResult};
use crate::pdf::create_estimate_pdf;
use crate::rates::fetcher::RateFetcher;
use crate::rates::RateTable;
use axum::{
    body::Body,
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use chrono_tz::Asia::Kolkata;
use rand::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

/// Shared by all handlers. The rate table is the only mutable state; the
/// settings routes are its single writer path.
#[derive(Clone)]
pub struct AppState {
    pub rates: Arc<RwLock<RateTable>>,
    pub fetch_url: String,
}

pub struct HttpServer;

impl HttpServer {
    pub async fn start(context: Context) -> Result<(), Box<dyn std::error::Error>> {
        let state = AppState {
            rates: Arc::new(RwLock::new(RateTable::factory())),
            fetch_url: context.config.rate_fetch.url.clone(),
        };

        let app = Router::new()
            .route("/health", get(health_check))
            .route("/estimate", post(create_estimate))
            .route("/estimate/pdf", post(export_estimate_pdf))
            .route("/settings/rates", get(get_rates).put(replace_rates))
            .route("/settings/rates/reset", post(reset_rates))
            .route("/settings/rates/fetch", post(fetch_rates))
            .layer(CorsLayer::permissive())
            .with_state(state);

        let listener = TcpListener::bind(format!("0.0.0.0:{}", context.config.server.port)).await?;
        tracing::info!("HTTP server running on port {}", context.config.server.port);

        axum::serve(listener, app).await?;
        Ok(())
    }
}

async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Recomputes the full estimate from the submitted form snapshot.
async fn create_estimate(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> Json<EstimateResult> {
    let table = state.rates.read().await;
    let input = build_input(&table, &request);
    Json(compute_estimate(&input))
}

async fn export_estimate_pdf(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> Result<Response<Body>, StatusCode> {
    let estimate = {
        let table = state.rates.read().await;
        compute_estimate(&build_input(&table, &request))
    };

    let now_ist = Utc::now().with_timezone(&Kolkata);
    let timestamp = now_ist.format("%d/%m/%Y %H:%M:%S").to_string();
    let estimate_number = match request.customer.bill_number.as_deref() {
        Some(bill) if !bill.trim().is_empty() => bill.trim().to_string(),
        _ => generate_estimate_number(),
    };

    let bytes = create_estimate_pdf(&estimate_number, &timestamp, &request.customer, &estimate)
        .map_err(|e| {
            tracing::error!("Receipt render failed:{}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/pdf")
        .body(Body::from(bytes))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

fn generate_estimate_number() -> String {
    let now_ist = Utc::now().with_timezone(&Kolkata);
    let formatted_date = now_ist.format("%Y%m%d").to_string();
    let mut random_gen = rand::rng();
    let random_num = random_gen.random_range(1000..=9999);
    format!("E-{}-{}", formatted_date, random_num)
}

async fn get_rates(State(state): State<AppState>) -> Json<RateTable> {
    Json(state.rates.read().await.clone())
}

/// Replaces the whole table in one write.
async fn replace_rates(
    State(state): State<AppState>,
    Json(new_table): Json<RateTable>,
) -> Json<RateTable> {
    let mut table = state.rates.write().await;
    *table = new_table;
    Json(table.clone())
}

async fn reset_rates(State(state): State<AppState>) -> Json<RateTable> {
    let mut table = state.rates.write().await;
    table.reset();
    Json(table.clone())
}

#[derive(Debug, Serialize)]
pub struct RateFetchOutcome {
    pub updated: Vec<String>,
    pub message: String,
}

/// Best-effort scrape of current rates. Always 200; a failed fetch reports
/// zero updates and leaves the table as it was.
async fn fetch_rates(State(state): State<AppState>) -> Json<RateFetchOutcome> {
    let fetcher = match RateFetcher::new(&state.fetch_url) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            tracing::warn!("Rate fetch unavailable:{}", e);
            return Json(RateFetchOutcome {
                updated: Vec::new(),
                message: "Could not fetch rates - existing rates retained".to_string(),
            });
        }
    };

    match fetcher.fetch_rates().await {
        Some(fetched) => {
            let mut table = state.rates.write().await;
            let updated = table.apply_fetched(&fetched);
            let labels: Vec<String> = updated
                .iter()
                .map(|metal| metal.label().to_string())
                .collect();
            let message = if labels.is_empty() {
                "No usable rates found - existing rates retained".to_string()
            } else {
                format!("Updated rates for: {}", labels.join(", "))
            };
            Json(RateFetchOutcome {
                updated: labels,
                message,
            })
        }
        None => Json(RateFetchOutcome {
            updated: Vec::new(),
            message: "Could not fetch rates - existing rates retained".to_string(),
        }),
    }
}
