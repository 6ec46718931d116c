//! AWS Lambda handler for the dashboard
//!
//! Accepts a finance record as JSON and returns the computed dashboard,
//! optionally with an assistant reply to a question about those numbers.

use chrono::NaiveDate;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::info;
use serde::{Deserialize, Serialize};

use fywise::{AppConfig, Assistant, Dashboard, FinanceRecord};

/// Input for one dashboard computation
#[derive(Debug, Deserialize)]
pub struct DashboardRequest {
    /// Missing fields take the default values
    #[serde(default)]
    pub finances: FinanceRecord,

    /// Month the payoff date is counted from
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Overrides the configured preview window
    #[serde(default)]
    pub preview_months: Option<u32>,

    /// Question for the assistant
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub dashboard: Dashboard,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
}

fn process(request: DashboardRequest, base: &AppConfig) -> fywise::Result<DashboardResponse> {
    request.finances.validate()?;

    let mut config = base.clone();
    if let Some(months) = request.preview_months {
        config.projection.preview_months = months;
        config.validate()?;
    }

    let dashboard = match request.start_date {
        Some(start) => Dashboard::build_as_of(&request.finances, &config, start),
        None => Dashboard::build(&request.finances, &config),
    };

    let reply = request
        .question
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(|q| Assistant::new(config.engine()).respond(q, &request.finances));

    Ok(DashboardResponse { dashboard, reply })
}

async fn handler(event: LambdaEvent<DashboardRequest>, config: &AppConfig) -> Result<DashboardResponse, Error> {
    info!("dashboard request {}", event.context.request_id);
    Ok(process(event.payload, config)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = AppConfig::load(None)?;
    let config = &config;
    run(service_fn(move |event| handler(event, config))).await
}
