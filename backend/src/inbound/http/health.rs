//! Liveness probe.

use actix_web::{HttpResponse, get};

/// Plain-text liveness string served at the service root.
pub const LIVENESS_MESSAGE: &str = "user registry service is running";

/// Report that the service is up.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is running", body = String)),
    tags = ["health"],
    operation_id = "live"
)]
#[get("/")]
pub async fn live() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(LIVENESS_MESSAGE)
}
