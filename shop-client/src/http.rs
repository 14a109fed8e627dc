//! HTTP client for the storefront API

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use product_wizard::{CategorySource, CreateRejection, FileHandle, ImageUploader, ProductGateway};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::error::{ApiResponse, AppError};
use shared::models::{CategoryRecord, ImageUploaded, ProductCreate, ProductCreated};

/// HTTP client for making network requests to the storefront
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.url(path)));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.post(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with a multipart form
    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> ClientResult<T> {
        let request = self.authorize(self.client.post(self.url(path)).multipart(form));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            // Prefer the structured error envelope
            if let Ok(envelope) = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
                && let Some(code) = envelope.code
            {
                return Err(ClientError::Api {
                    code,
                    message: envelope.message,
                    details: envelope.details,
                });
            }
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }

        response.json().await.map_err(Into::into)
    }

    /// Unwrap the `data` of a success envelope
    fn into_data<T>(envelope: ApiResponse<T>, what: &str) -> ClientResult<T> {
        if !envelope.is_success() {
            return Err(ClientError::Api {
                code: envelope.code.unwrap_or_default(),
                message: envelope.message,
                details: envelope.details,
            });
        }
        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse(format!("Missing {} data", what)))
    }

    // ========== Catalog API ==========

    /// List every category
    pub async fn list_categories(&self) -> ClientResult<Vec<CategoryRecord>> {
        let envelope = self.get::<ApiResponse<Vec<CategoryRecord>>>("api/categories").await?;
        Self::into_data(envelope, "category")
    }

    /// Create a product
    pub async fn post_product(&self, payload: &ProductCreate) -> ClientResult<ProductCreated> {
        let envelope = self
            .post::<ApiResponse<ProductCreated>, _>("api/products", payload)
            .await?;
        Self::into_data(envelope, "product")
    }

    /// Upload one product image as `multipart/form-data`
    pub async fn post_product_image(
        &self,
        product_id: i64,
        file: &FileHandle,
        is_primary: bool,
        sort_order: i32,
    ) -> ClientResult<ImageUploaded> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime_type())?;
        let form = Form::new()
            .part("file", part)
            .text("is_primary", is_primary.to_string())
            .text("sort_order", sort_order.to_string());

        let path = format!("api/products/{}/images", product_id);
        let envelope = self.post_multipart::<ApiResponse<ImageUploaded>>(&path, form).await?;
        Self::into_data(envelope, "image")
    }
}

// ========== Wizard collaborators ==========

#[async_trait]
impl CategorySource for HttpClient {
    async fn fetch_categories(&self) -> Result<Vec<CategoryRecord>, AppError> {
        self.list_categories().await.map_err(AppError::from)
    }
}

#[async_trait]
impl ProductGateway for HttpClient {
    async fn create_product(&self, payload: &ProductCreate) -> Result<i64, CreateRejection> {
        self.post_product(payload)
            .await
            .map(|created| created.id)
            .map_err(|e| CreateRejection::from(AppError::from(e)))
    }
}

#[async_trait]
impl ImageUploader for HttpClient {
    async fn upload_image(
        &self,
        product_id: i64,
        file: &FileHandle,
        is_primary: bool,
        sort_order: i32,
    ) -> Result<i64, AppError> {
        let uploaded = self
            .post_product_image(product_id, file, is_primary, sort_order)
            .await?;
        tracing::debug!(product_id, image_id = uploaded.id, sort_order, "Image stored");
        Ok(uploaded.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = HttpClient::new(&ClientConfig::new("http://shop.local/")).unwrap();
        assert_eq!(client.base_url(), "http://shop.local");
        assert_eq!(client.url("api/products"), "http://shop.local/api/products");
        assert_eq!(client.url("/api/products"), "http://shop.local/api/products");
    }

    #[test]
    fn test_success_envelope_without_data() {
        let envelope: ApiResponse<ProductCreated> = ApiResponse {
            code: Some(0),
            message: "OK".to_string(),
            data: None,
            details: None,
        };
        let err = HttpClient::into_data(envelope, "product").unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(msg) if msg == "Missing product data"));
    }

    #[test]
    fn test_failure_envelope_on_2xx() {
        let envelope: ApiResponse<ProductCreated> = ApiResponse {
            code: Some(6004),
            message: "Duplicate".to_string(),
            data: None,
            details: None,
        };
        let err = HttpClient::into_data(envelope, "product").unwrap_err();
        assert!(matches!(err, ClientError::Api { code: 6004, .. }));
    }
}
