// SPDX-License-Identifier: MIT

//! HTTP surface for the outreach workflow

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::stream::Stream;
use serde::Deserialize;
use serde_json::{json, Value};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::error::Result;
use crate::outreach::graph::{OutreachGraph, WorkflowEvent};
use crate::outreach::input::LeadInput;
use crate::outreach::state::LeadState;
use crate::outreach::store::MemoryLeadStore;

pub struct AppState {
    pub graph: OutreachGraph,
    pub store: Arc<MemoryLeadStore>,
}

pub async fn serve(port: u16, graph: OutreachGraph, store: Arc<MemoryLeadStore>) -> Result<()> {
    let shared = Arc::new(AppState { graph, store });

    let app = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/leads", get(list_leads))
        .route("/api/runs", post(create_run))
        .route("/api/runs/stream", post(stream_run))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    log::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Debug, Deserialize)]
struct RunRequest {
    /// Lead identifier: email or "name - company"
    lead: String,
    /// Optional stable lead id; a fresh one is minted when absent
    #[serde(default)]
    lead_id: Option<String>,
}

fn initial_state(req: &RunRequest) -> Result<LeadState> {
    let input = LeadInput::parse(&req.lead)?;
    let lead_id = req
        .lead_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    Ok(input.into_state(lead_id))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_leads(State(app): State<Arc<AppState>>) -> Json<Value> {
    let leads: Vec<Value> = app
        .store
        .records()
        .iter()
        .map(|r| {
            json!({
                "lead_id": r.lead_id,
                "email": r.email,
                "company": r.company,
                "title": r.title,
            })
        })
        .collect();
    Json(json!(leads))
}

async fn create_run(
    State(app): State<Arc<AppState>>,
    Json(req): Json<RunRequest>,
) -> Json<Value> {
    let state = match initial_state(&req) {
        Ok(state) => state,
        Err(e) => return Json(json!({ "error": e.to_string() })),
    };

    let report = app.graph.execute(state).await;
    match serde_json::to_value(&report) {
        Ok(value) => Json(value),
        Err(e) => Json(json!({ "error": e.to_string() })),
    }
}

async fn stream_run(
    State(app): State<Arc<AppState>>,
    Json(req): Json<RunRequest>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::channel::<WorkflowEvent>(32);

    match initial_state(&req) {
        Ok(state) => {
            let app = app.clone();
            tokio::spawn(async move {
                let _ = app.graph.run_with_events(state, tx).await;
            });
        }
        Err(e) => {
            let message = e.to_string();
            tokio::spawn(async move {
                let _ = tx.send(WorkflowEvent::Error { message }).await;
            });
        }
    }

    let stream = ReceiverStream::new(rx).map(|event| {
        let data = serde_json::to_string(&event).unwrap_or_else(|_| "{}".to_string());
        Ok(Event::default().data(data))
    });

    Sse::new(stream)
}
