use crate::config::EngineConfig;
use crate::engine;
use crate::model::{InputModel, ScheduleResult};
use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use log::info;

async fn solve_handler(Json(input): Json<InputModel>) -> Result<Json<ScheduleResult>, (StatusCode, String)> {
    let config = EngineConfig::default();

    // The ILP solve can run for up to `config.ilp_time_limit_secs`; run it
    // on a blocking thread so it doesn't stall the Tokio executor (the
    // engine itself is synchronous, spec §5).
    let outcome = tokio::task::spawn_blocking(move || engine::schedule(&input, &config))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("scheduling task panicked: {e}")))?;

    match outcome {
        Ok(result) => Ok(Json(result)),
        Err(e) => Err((StatusCode::BAD_REQUEST, e.to_string())),
    }
}

pub async fn run_server() {
    let app = Router::new().route("/v1/schedule/solve", post(solve_handler));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await.unwrap();

    info!("Server running at http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
