//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, ServerSettings};

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{InMemoryUserRepository, UserRepository};
use crate::inbound::http::health::live;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{create_user, delete_user, list_users, update_user};
use crate::middleware::trace::Trace;
use crate::outbound::persistence::DieselUserRepository;

fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    // The registry has no browser-facing auth, so a permissive policy is
    // enough for the client running on a different origin.
    let cors = Cors::permissive();

    let app = App::new()
        .app_data(http_state)
        .wrap(cors)
        .wrap(Trace)
        .service(create_user)
        .service(list_users)
        .service(update_user)
        .service(delete_user)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

fn build_user_repository(config: &ServerConfig) -> Arc<dyn UserRepository> {
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL user store");
            Arc::new(DieselUserRepository::new(pool.clone()))
        }
        None => {
            warn!("no database configured; falling back to the in-memory user store");
            Arc::new(InMemoryUserRepository::new())
        }
    }
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// The returned [`Server`] must be awaited to drive the listener.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let users = build_user_repository(&config);
    let http_state = web::Data::new(HttpState::new(users));

    let server = HttpServer::new(move || build_app(http_state.clone()))
        .bind(config.bind_addr)?
        .run();

    info!(addr = %config.bind_addr, "user registry listening");
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! End-to-end checks of the assembled application.

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn test_state() -> web::Data<HttpState> {
        web::Data::new(HttpState::new(Arc::new(InMemoryUserRepository::new())))
    }

    #[rstest]
    #[actix_web::test]
    async fn assembled_app_serves_liveness_and_users() {
        let app = test::init_service(build_app(test_state())).await;

        let liveness = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(liveness.status(), StatusCode::OK);

        let created = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/usuarios")
                .set_json(json!({"email": "ana@example.com", "name": "Ana", "age": 30}))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);

        let listed = test::call_service(&app, test::TestRequest::get().uri("/usuarios").to_request())
            .await;
        assert_eq!(listed.status(), StatusCode::OK);
        let body: Value = test::read_body_json(listed).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }

    #[rstest]
    #[actix_web::test]
    async fn responses_carry_a_trace_id_header() {
        let app = test::init_service(build_app(test_state())).await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/usuarios").to_request()).await;
        assert!(response.headers().contains_key("trace-id"));
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_pool_selects_an_empty_in_memory_store() {
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("literal address"));
        let users = build_user_repository(&config);
        let all = users
            .find(crate::domain::UserFilter::none())
            .await
            .expect("fixture store lists");
        assert!(all.is_empty());
    }
}
