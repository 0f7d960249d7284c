// http server mode - the same lookups as a json api

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::core::{Answer, Dispatcher, Reply};
use crate::Error;

#[derive(Deserialize)]
struct DefineRequest {
    word: String,
}

#[derive(Deserialize)]
struct DescribeRequest {
    path: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    online: bool,
}

pub struct Server;

impl Server {
    pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/define", post(define))
            .route("/describe", post(describe))
            .layer(CorsLayer::permissive())
            .with_state(dispatcher)
    }

    pub async fn run(dispatcher: Dispatcher, host: &str, port: u16) -> Result<(), Error> {
        let app = Self::router(Arc::new(dispatcher));

        let addr = format!("{host}:{port}");
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;
        tracing::info!(addr = %addr, "server listening");
        println!("server running at http://{addr}");

        axum::serve(listener, app)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        Ok(())
    }
}

async fn health(State(dispatcher): State<Arc<Dispatcher>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        online: dispatcher.is_online(),
    })
}

async fn define(
    State(dispatcher): State<Arc<Dispatcher>>,
    Json(req): Json<DefineRequest>,
) -> (StatusCode, Json<Answer>) {
    respond(dispatcher.define(&req.word).await)
}

async fn describe(
    State(dispatcher): State<Arc<Dispatcher>>,
    Json(req): Json<DescribeRequest>,
) -> (StatusCode, Json<Answer>) {
    respond(dispatcher.describe(&req.path).await)
}

// refusals are the client's fault, everything else is a normal entry
fn respond(reply: Reply) -> (StatusCode, Json<Answer>) {
    let status = if reply.is_refusal() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };
    (status, Json(reply.answer))
}
