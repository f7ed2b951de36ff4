//! End-to-end behaviour of the user CRUD endpoints over the in-memory store.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};

use backend::Trace;
use backend::domain::ports::InMemoryUserRepository;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::users::{create_user, delete_user, list_users, update_user};

fn app_state() -> web::Data<HttpState> {
    web::Data::new(HttpState::new(Arc::new(InMemoryUserRepository::new())))
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state)
                .wrap(Trace)
                .service(create_user)
                .service(list_users)
                .service(update_user)
                .service(delete_user),
        )
        .await
    };
}

#[rstest]
#[actix_web::test]
async fn register_list_and_remove_a_user() {
    let app = init_app!(app_state());

    // Age arrives as a numeric string, the way HTML form values do.
    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/usuarios")
            .set_json(json!({"email": "ana@example.com", "name": "Ana", "age": "30"}))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created_body: Value = test::read_body_json(created).await;
    assert_eq!(created_body["id"], 1);
    assert_eq!(created_body["age"], 30);

    let listed =
        test::call_service(&app, test::TestRequest::get().uri("/usuarios").to_request()).await;
    assert_eq!(listed.status(), StatusCode::OK);
    let listed_body: Value = test::read_body_json(listed).await;
    assert_eq!(
        listed_body,
        json!([{"id": 1, "email": "ana@example.com", "name": "Ana", "age": 30}])
    );

    let deleted = test::call_service(
        &app,
        test::TestRequest::delete().uri("/usuarios/1").to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);
    let deleted_body: Value = test::read_body_json(deleted).await;
    assert_eq!(deleted_body["message"], "user deleted");

    let after =
        test::call_service(&app, test::TestRequest::get().uri("/usuarios").to_request()).await;
    let after_body: Value = test::read_body_json(after).await;
    assert_eq!(after_body, json!([]));
}

#[rstest]
#[actix_web::test]
async fn update_overwrites_every_field() {
    let app = init_app!(app_state());

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/usuarios")
            .set_json(json!({"email": "bea@example.com", "name": "Bea", "age": 25}))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let updated = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/usuarios/1")
            .set_json(json!({"email": "bea@work.example", "name": "Beatriz", "age": "26"}))
            .to_request(),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let body: Value = test::read_body_json(updated).await;
    assert_eq!(
        body,
        json!({"id": 1, "email": "bea@work.example", "name": "Beatriz", "age": 26})
    );
}

#[rstest]
#[actix_web::test]
async fn list_filters_combine_conjunctively() {
    let app = init_app!(app_state());

    for (email, name, age) in [
        ("ana@example.com", "Ana Jones", 30),
        ("joao@example.com", "Joao", 30),
        ("bea@example.com", "Bea", 41),
    ] {
        let created = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/usuarios")
                .set_json(json!({"email": email, "name": name, "age": age}))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
    }

    // Substring match on name is case-sensitive.
    let filtered = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/usuarios?name=Jo&age=30")
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(filtered).await;
    let names: Vec<&str> = body
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|user| user["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Ana Jones", "Joao"]);

    // Empty parameters are treated as absent rather than matching nothing.
    let unfiltered = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/usuarios?name=&email=&age=")
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(unfiltered).await;
    assert_eq!(body.as_array().map(Vec::len), Some(3));
}

#[rstest]
#[case::missing_name(json!({"email": "x@example.com", "age": 20}))]
#[case::empty_email(json!({"email": "", "name": "X", "age": 20}))]
#[case::null_age(json!({"email": "x@example.com", "name": "X", "age": null}))]
#[actix_web::test]
async fn incomplete_payloads_are_rejected_for_create_and_update(#[case] payload: Value) {
    let app = init_app!(app_state());

    let seeded = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/usuarios")
            .set_json(json!({"email": "ok@example.com", "name": "Ok", "age": 1}))
            .to_request(),
    )
    .await;
    assert_eq!(seeded.status(), StatusCode::CREATED);

    let create = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/usuarios")
            .set_json(payload.clone())
            .to_request(),
    )
    .await;
    assert_eq!(create.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(create).await;
    assert_eq!(body["code"], "invalid_request");

    let update = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/usuarios/1")
            .set_json(payload)
            .to_request(),
    )
    .await;
    assert_eq!(update.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn unknown_ids_return_not_found_payloads() {
    let app = init_app!(app_state());

    let update = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/usuarios/42")
            .set_json(json!({"email": "x@example.com", "name": "X", "age": 20}))
            .to_request(),
    )
    .await;
    assert_eq!(update.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(update).await;
    assert_eq!(body["code"], "not_found");
    assert!(body["traceId"].is_string());

    let delete = test::call_service(
        &app,
        test::TestRequest::delete().uri("/usuarios/42").to_request(),
    )
    .await;
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);
}
