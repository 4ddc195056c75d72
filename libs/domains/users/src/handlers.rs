use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{Address, CartItem, LoginRequest, Order, Payment, SignupRequest, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const SIGNUP_SUCCESS: &str = "Successfully Signed In";

/// OpenAPI documentation for the account endpoints
#[derive(OpenApi)]
#[openapi(
    paths(signup, login),
    components(
        schemas(SignupRequest, LoginRequest, UserResponse, CartItem, Address, Order, Payment),
        responses(
            BadRequestResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "Account signup and login")
    )
)]
pub struct ApiDoc;

/// Routes: `POST /users/signup`, `POST /users/login`
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/users/signup", post(signup))
        .route("/users/login", post(login))
        .with_state(shared_service)
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users/signup",
    tag = "Users",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = String, example = json!("Successfully Signed In")),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn signup<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<SignupRequest>,
) -> UserResult<impl IntoResponse> {
    service.signup(input).await?;
    Ok((StatusCode::CREATED, Json(SIGNUP_SUCCESS)))
}

/// Log in with email and password, rotating the user's tokens
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; tokens rotated", body = UserResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<UserResponse>> {
    let user = service.login(input).await?;
    Ok(Json(user))
}
