/// Request body extraction
///
/// Account endpoints take JSON or `application/x-www-form-urlencoded`.
/// Listing create and update also take `multipart/form-data` (text fields
/// plus files under `media`).
use crate::{
    error::ServerError,
    services::UploadedFile,
    state::AppState,
};
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use sociaty_core::{parse_price, validate_price};

/// Multipart field carrying listing media
pub const MEDIA_FIELD: &str = "media";

/// Listing fields as submitted, before defaults are applied
#[derive(Debug, Default)]
pub struct ListingForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub student_id: Option<String>,
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    UrlEncoded,
    Multipart,
    Other,
}

fn body_kind(req: &Request) -> (BodyKind, Option<String>) {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let kind = match content_type.as_deref().map(str::to_ascii_lowercase) {
        Some(ct) if ct.starts_with("application/json") => BodyKind::Json,
        Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => BodyKind::UrlEncoded,
        Some(ct) if ct.starts_with("multipart/form-data") => BodyKind::Multipart,
        _ => BodyKind::Other,
    };

    (kind, content_type)
}

/// A body deserialized from JSON or from an urlencoded form
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req).0 {
            BodyKind::UrlEncoded => {
                let Form(value) = Form::<T>::from_request(req, state).await?;
                Ok(Self(value))
            }
            _ => {
                let Json(value) = Json::<T>::from_request(req, state).await?;
                Ok(Self(value))
            }
        }
    }
}

/// Text fields of an urlencoded listing form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextListing {
    title: Option<String>,
    #[serde(alias = "description")]
    desc: Option<String>,
    price: Option<String>,
    category: Option<String>,
    student_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonListing {
    title: Option<String>,
    #[serde(alias = "description")]
    desc: Option<String>,
    price: Option<Value>,
    category: Option<String>,
    student_id: Option<String>,
}

impl ListingForm {
    /// Parse a `multipart/form-data` body
    pub async fn from_multipart(
        content_type: &str,
        body: Bytes,
        max_files: usize,
    ) -> Result<Self, ServerError> {
        let boundary = multer::parse_boundary(content_type)
            .map_err(|e| ServerError::BadRequest(format!("Invalid multipart request: {}", e)))?;

        let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
        let mut multipart = multer::Multipart::new(stream, boundary);

        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Failed to parse multipart: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();

            if let Some(file_name) = field.file_name().map(str::to_string) {
                if name != MEDIA_FIELD {
                    continue;
                }

                let data = field.bytes().await.map_err(|e| {
                    ServerError::BadRequest(format!("Failed to read file: {}", e))
                })?;

                // Browsers send an empty part when no file was picked
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }

                if form.files.len() >= max_files {
                    return Err(ServerError::BadRequest("Too many files".to_string()));
                }

                form.files.push(UploadedFile {
                    file_name: Some(file_name),
                    data,
                });
                continue;
            }

            let value = field.text().await.map_err(|e| {
                ServerError::BadRequest(format!("Failed to read field {}: {}", name, e))
            })?;
            form.set_text_field(&name, value)?;
        }

        Ok(form)
    }

    /// Parse a JSON body
    pub fn from_json(body: &[u8]) -> Result<Self, ServerError> {
        let payload: JsonListing = serde_json::from_slice(body)
            .map_err(|e| ServerError::BadRequest(format!("Invalid JSON: {}", e)))?;

        let price = match payload.price {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => {
                let price = n
                    .as_f64()
                    .ok_or_else(|| ServerError::BadRequest("Invalid price".to_string()))?;
                Some(validate_price(price)?)
            }
            Some(Value::String(s)) => parse_price(&s)?,
            Some(_) => return Err(ServerError::BadRequest("Invalid price".to_string())),
        };

        Ok(Self {
            title: payload.title,
            description: payload.desc,
            price,
            category: payload.category,
            student_id: payload.student_id,
            files: Vec::new(),
        })
    }

    fn from_text(fields: TextListing) -> Result<Self, ServerError> {
        let price = match fields.price {
            Some(raw) => parse_price(&raw)?,
            None => None,
        };

        Ok(Self {
            title: fields.title,
            description: fields.desc,
            price,
            category: fields.category,
            student_id: fields.student_id,
            files: Vec::new(),
        })
    }

    fn set_text_field(&mut self, name: &str, value: String) -> Result<(), ServerError> {
        match name {
            "title" => self.title = Some(value),
            "desc" | "description" => self.description = Some(value),
            "price" => self.price = parse_price(&value)?,
            "category" => self.category = Some(value),
            "studentId" => self.student_id = Some(value),
            _ => {}
        }
        Ok(())
    }
}

#[async_trait]
impl FromRequest<AppState> for ListingForm {
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let (kind, content_type) = body_kind(&req);

        if kind == BodyKind::UrlEncoded {
            let Form(fields) = Form::<TextListing>::from_request(req, state).await?;
            return Self::from_text(fields);
        }

        let body = Bytes::from_request(req, state).await?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match (kind, content_type) {
            (BodyKind::Multipart, Some(ct)) => {
                Self::from_multipart(&ct, body, state.uploads.max_files()).await
            }
            (BodyKind::Json, _) => Self::from_json(&body),
            _ => Err(ServerError::BadRequest(
                "Expected multipart/form-data, application/x-www-form-urlencoded or application/json"
                    .to_string(),
            )),
        }
    }
}
