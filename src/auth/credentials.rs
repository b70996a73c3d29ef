use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use validator::Validate;

use super::auth_dto::LoginRequest;
use crate::error::AppError;

/// Login credentials read from a urlencoded form, a multipart form or JSON.
///
/// Browser clients post `FormData`, scripts tend to post urlencoded bodies, so
/// the body format is chosen from the `Content-Type` header.
pub struct LoginCredentials(pub LoginRequest);

#[async_trait]
impl<S> FromRequest<S> for LoginCredentials
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let payload = if content_type.starts_with("application/json") {
            let Json(payload) = Json::<LoginRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            payload
        } else if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            read_multipart(multipart).await?
        } else {
            let Form(payload) = Form::<LoginRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            payload
        };

        payload.validate()?;
        Ok(Self(payload))
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<LoginRequest, AppError> {
    let mut username = String::new();
    let mut password = String::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("username") => username = field.text().await?,
            Some("password") => password = field.text().await?,
            _ => {}
        }
    }

    Ok(LoginRequest { username, password })
}
