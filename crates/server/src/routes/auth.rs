use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::errors::AuthError;
use service::auth::repo::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};
use service::auth::token::verify_token;

use crate::errors::ApiError;
use crate::extract::Json;
use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";

/// Id of the caller, put into request extensions by `require_bearer_token`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentUser(pub Uuid);

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOutput {
    pub user_id: Uuid,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutput {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub token: String,
}

fn auth_service(state: &ServerState) -> AuthService<SeaOrmAuthRepository> {
    let repo = Arc::new(SeaOrmAuthRepository::new(state.db.clone()));
    let cfg = AuthConfig {
        jwt_secret: state.auth.jwt_secret.clone(),
        token_ttl_hours: state.auth.token_ttl_hours,
        password_algorithm: "argon2".into(),
    };
    AuthService::new(repo, cfg)
}

#[utoipa::path(post, path = "/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 201, description = "Registered", body = RegisterOutput), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register(State(state): State<ServerState>, Json(input): Json<RegisterInput>) -> Result<(StatusCode, Json<RegisterOutput>), ApiError> {
    let user = auth_service(&state).register(input).await?;
    Ok((StatusCode::CREATED, Json(RegisterOutput { user_id: user.id })))
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In", body = LoginOutput), (status = 401, description = "Unauthorized")))]
pub async fn login(State(state): State<ServerState>, jar: CookieJar, Json(input): Json<LoginInput>) -> Result<(CookieJar, Json<LoginOutput>), ApiError> {
    let session = auth_service(&state).login(input).await?;
    let user = session.user;

    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);

    let out = LoginOutput { user_id: user.id, email: user.email, name: user.name, token: session.token };
    Ok((jar, Json(out)))
}

#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 204, description = "Logged Out")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::build(AUTH_COOKIE).path("/"));
    (jar, StatusCode::NO_CONTENT)
}

/// Bearer header first, then the `auth_token` cookie.
fn extract_token(headers: &HeaderMap) -> Result<String, AuthError> {
    if let Some(h) = headers.get(header::AUTHORIZATION) {
        let value = h.to_str().map_err(|_| AuthError::InvalidToken)?;
        return match value.strip_prefix("Bearer ") {
            Some(t) if !t.trim().is_empty() => Ok(t.trim().to_string()),
            Some(_) => Err(AuthError::MissingToken),
            None => Err(AuthError::InvalidToken),
        };
    }
    CookieJar::from_headers(headers)
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)
}

/// Missing token answers 400, invalid or expired 401.
pub async fn require_bearer_token(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();
    let token = extract_token(req.headers()).inspect_err(|e| {
        warn!(path = %path, error = %e, "request rejected before token validation");
    })?;

    let claims = verify_token(&state.auth.jwt_secret, &token).inspect_err(|_| {
        warn!(path = %path, "token validation failed");
    })?;
    let user_id = claims.user_id()?;

    req.extensions_mut().insert(CurrentUser(user_id));
    info!(path = %path, user_id = %user_id, "authenticated request");
    Ok(next.run(req).await)
}
