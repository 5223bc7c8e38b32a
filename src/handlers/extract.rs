use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};

use super::AppError;
use crate::error::PredictError;
use crate::models::ShipmentRequest;

/// Shipment fields from either a url-encoded or a multipart form body.
///
/// Browsers posting `FormData` send multipart; plain form posts and most
/// clients send url-encoded. Extraction failures become `AppError`s instead
/// of axum's default rejections so the caller always gets the JSON error
/// body.
pub struct ShipmentForm(pub ShipmentRequest);

#[async_trait]
impl<S> FromRequest<S> for ShipmentForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if !multipart {
            let Form(raw) = Form::<ShipmentRequest>::from_request(req, state)
                .await
                .map_err(|rejection| PredictError::Unexpected(rejection.body_text()))?;
            return Ok(Self(raw));
        }

        let mut form = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| PredictError::Unexpected(rejection.body_text()))?;

        let mut raw = ShipmentRequest::default();
        while let Some(field) = form.next_field().await.map_err(malformed)? {
            let name = field.name().unwrap_or_default().to_string();
            let value = field.text().await.map_err(malformed)?;
            raw.set_field(&name, value)?;
        }
        Ok(Self(raw))
    }
}

fn malformed(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError(PredictError::Unexpected(format!("malformed multipart body: {err}")))
}
