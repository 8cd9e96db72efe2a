//! User account HTTP handlers.
//!
//! ```text
//! POST   /users {"name":"Front Desk","email":"desk@clinic.test","password":"secret"}
//! GET    /users
//! GET    /users/{id}
//! PATCH  /users/{id} {"password":"new secret"}
//! DELETE /users/{id}
//! ```
//!
//! Registration is public; every other route requires a bearer token.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{RegisterUserRequest, UpdateUserRequest};
use crate::domain::{ApiResult, UserId};
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::dto::UserBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Registration payload.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct RegisterUserBody {
    #[schema(example = "Front Desk")]
    pub name: String,
    #[schema(example = "desk@clinic.test")]
    pub email: String,
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

/// Partial account update; a new password is re-hashed.
#[derive(Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Register a front-desk user. Public.
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterUserBody,
    responses(
        (status = 201, description = "User registered", body = UserBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email is already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserBody>,
) -> ApiResult<HttpResponse> {
    let RegisterUserBody {
        name,
        email,
        password,
    } = payload.into_inner();
    let user = state
        .users
        .register(RegisterUserRequest {
            name,
            email,
            password,
        })
        .await?;
    Ok(HttpResponse::Created().json(UserBody::from(user)))
}

/// List users by id.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users ordered by id", body = [UserBody]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<UserBody>>> {
    let users = state.users.list().await?;
    Ok(web::Json(users.into_iter().map(UserBody::from).collect()))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<UserBody>> {
    let user = state.users.get(UserId::new(path.into_inner())).await?;
    Ok(web::Json(user.into()))
}

/// Merge the supplied fields into a user; a new password is re-hashed.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "Updated user", body = UserBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 409, description = "Email is already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/users/{id}")]
pub async fn update_user(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateUserBody>,
) -> ApiResult<web::Json<UserBody>> {
    let UpdateUserBody {
        name,
        email,
        password,
    } = payload.into_inner();
    let user = state
        .users
        .update(
            UserId::new(path.into_inner()),
            UpdateUserRequest {
                name,
                email,
                password,
            },
        )
        .await?;
    Ok(web::Json(user.into()))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.users.remove(UserId::new(path.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;
