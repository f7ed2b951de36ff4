//! Users API handlers.
//!
//! ```text
//! POST   /usuarios        create a user
//! GET    /usuarios        list users, optionally filtered
//! PUT    /usuarios/{id}   overwrite a user
//! DELETE /usuarios/{id}   remove a user
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::UserStoreError;
use crate::domain::{ApiResult, Error, User, UserDraft, UserFilter, UserId};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{coerce_age, coerce_age_param, missing_field_error};

/// Request body for create and update.
///
/// All three fields are required; `age` may arrive as a JSON number or as
/// numeric text. Update is a full overwrite, so it validates the same way
/// create does.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UserPayload {
    pub email: Option<String>,
    pub name: Option<String>,
    /// Integer or numeric string; coerced before storage.
    #[schema(value_type = Object)]
    pub age: Option<serde_json::Value>,
}

/// A user record as returned by every endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub age: i32,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().as_i32(),
            email: user.email().to_owned(),
            name: user.name().to_owned(),
            age: user.age(),
        }
    }
}

/// Confirmation body returned by delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

/// Optional query filters for the list endpoint.
///
/// `name` and `email` are substring matches; `age` is coerced to an integer
/// and matched exactly. Empty parameter values impose no constraint.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListUsersQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<String>,
}

fn parse_user_payload(payload: UserPayload) -> Result<UserDraft, Error> {
    let email = payload
        .email
        .filter(|value| !value.is_empty())
        .ok_or_else(|| missing_field_error("email"))?;
    let name = payload
        .name
        .filter(|value| !value.is_empty())
        .ok_or_else(|| missing_field_error("name"))?;
    let age = payload
        .age
        .filter(|value| !value.is_null())
        .ok_or_else(|| missing_field_error("age"))?;

    Ok(UserDraft {
        email,
        name,
        age: coerce_age(&age)?,
    })
}

fn parse_list_query(query: ListUsersQuery) -> Result<UserFilter, Error> {
    let age = query
        .age
        .filter(|value| !value.is_empty())
        .map(|value| coerce_age_param(&value))
        .transpose()?;

    Ok(UserFilter {
        name: query.name.filter(|value| !value.is_empty()),
        email: query.email.filter(|value| !value.is_empty()),
        age,
    })
}

fn map_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::NotFound => Error::not_found("user not found"),
        UserStoreError::Connection { message } | UserStoreError::Query { message } => {
            Error::internal(message)
        }
    }
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/usuarios",
    request_body = UserPayload,
    responses(
        (status = 201, description = "Created user", body = UserResponse),
        (status = 400, description = "Missing or invalid field", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/usuarios")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let draft = parse_user_payload(payload.into_inner())?;
    let user = state.users.create(draft).await.map_err(map_store_error)?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// List users matching the supplied filters.
#[utoipa::path(
    get,
    path = "/usuarios",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Matching users", body = [UserResponse]),
        (status = 400, description = "Invalid age filter", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/usuarios")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<ListUsersQuery>,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let filter = parse_list_query(query.into_inner())?;
    let users = state.users.find(filter).await.map_err(map_store_error)?;
    Ok(web::Json(
        users.into_iter().map(UserResponse::from).collect(),
    ))
}

/// Overwrite an existing user's email, name, and age.
#[utoipa::path(
    put,
    path = "/usuarios/{id}",
    request_body = UserPayload,
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Missing or invalid field", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/usuarios/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = UserId::new(path.into_inner());
    let draft = parse_user_payload(payload.into_inner())?;
    let user = state
        .users
        .update(id, draft)
        .await
        .map_err(map_store_error)?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/usuarios/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deletion confirmation", body = DeleteResponse),
        (status = 404, description = "No such user", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/usuarios/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<DeleteResponse>> {
    let id = UserId::new(path.into_inner());
    state.users.delete(id).await.map_err(map_store_error)?;
    Ok(web::Json(DeleteResponse {
        message: "user deleted".to_owned(),
    }))
}
