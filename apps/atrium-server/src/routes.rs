//! HTTP routes.

use axum::extract::State;
use axum::routing::{get, post, put};
use axum::{middleware, Json, Router};
use serde_json::{json, Value};

use crate::handlers::{ai, auth, contact, groups, payments};
use crate::metrics::track_http;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/groups", get(groups::list_groups).post(groups::create_group))
        .route(
            "/groups/:title",
            put(groups::update_group).delete(groups::delete_group),
        )
        .route("/groups/:title/apply", put(groups::apply_to_group))
        .route(
            "/groups/:title/applicants/:email/decision",
            post(groups::decide_applicant),
        )
        .route("/contact", post(contact::submit_message))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/ai/summarize", post(ai::summarize))
        .route("/ai/title-generate", post(ai::title_generate))
        .route("/payments/order", post(payments::create_order))
        .route("/healthz", get(healthz))
        .route("/metrics", get(render_metrics))
        .layer(middleware::from_fn(track_http))
        .with_state(state)
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn render_metrics(State(state): State<AppState>) -> String {
    state.metrics.render()
}
