use actix_web::{HttpResponse, web};
use tracing::info;

use crate::auth::flow::AuthFlow;
use crate::error::ApiError;
use crate::models::GoogleLoginReq;

/// Login with a Google ID token
#[utoipa::path(
    post,
    path = "/api/auth/google",
    request_body = GoogleLoginReq,
    responses(
        (status = 200, description = "Token verified", body = crate::models::AuthResponse, example = json!({
            "user": { "id": 1, "name": "Alice Johnson", "email": "alice@example.com" },
            "token": "demo-token-1-1764000000000",
            "registered": true
        })),
        (status = 401, description = "Invalid token, unverified email or unregistered employee", body = crate::error::ErrorBody),
        (status = 422, description = "Missing idToken", body = crate::error::ErrorBody),
        (status = 500, description = "Token validation failed", body = crate::error::ErrorBody)
    ),
    tag = "Auth"
)]
pub async fn google_login(
    flow: web::Data<AuthFlow>,
    payload: web::Json<GoogleLoginReq>,
) -> Result<HttpResponse, ApiError> {
    info!("Google login request received");

    let resp = flow.login_with_google(&payload.id_token).await?;

    info!(registered = resp.registered, "Google login successful");
    Ok(HttpResponse::Ok().json(resp))
}
