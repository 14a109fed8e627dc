// shop-client/tests/client_integration.rs
// HttpClient against an in-process mock storefront

use axum::extract::{Multipart, Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use product_wizard::{
    CategorySource, FileHandle, ImageUploader, PreviewPool, ProductGateway, SubmitOutcome,
    WizardConfig, WizardController, WizardStep,
};
use serde_json::Value;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    CategoryRecord, ImageUploaded, ProductCreate, ProductCreated, ProductStatus, ProductType,
};
use shop_client::{ClientConfig, ClientError, HttpClient};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
struct UploadRecord {
    product_id: i64,
    file_name: Option<String>,
    content_type: Option<String>,
    size: usize,
    is_primary: bool,
    sort_order: i32,
}

#[derive(Clone, Default)]
struct MockState {
    products: Arc<Mutex<Vec<Value>>>,
    uploads: Arc<Mutex<Vec<UploadRecord>>>,
    auth: Arc<Mutex<Vec<Option<String>>>>,
}

async fn categories(State(state): State<MockState>, headers: HeaderMap) -> ApiResponse<Vec<CategoryRecord>> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.auth.lock().push(auth);
    ApiResponse::success(vec![
        CategoryRecord::root(1, "Fiction"),
        CategoryRecord::child(2, "SciFi", 1),
    ])
}

async fn create_product(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> Result<ApiResponse<ProductCreated>, AppError> {
    if body["name"] == "Taken" {
        return Err(
            AppError::with_message(ErrorCode::ProductNameExists, "Product name already exists")
                .with_detail("name", "A product with this name exists"),
        );
    }
    state.products.lock().push(body);
    Ok(ApiResponse::success(ProductCreated { id: 7 }))
}

async fn upload_image(
    State(state): State<MockState>,
    Path(product_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<ApiResponse<ImageUploaded>, AppError> {
    let mut record = UploadRecord {
        product_id,
        ..Default::default()
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::invalid_request(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                record.file_name = field.file_name().map(str::to_string);
                record.content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::invalid_request(e.to_string()))?;
                record.size = data.len();
            }
            "is_primary" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::invalid_request(e.to_string()))?;
                record.is_primary = text == "true";
            }
            "sort_order" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::invalid_request(e.to_string()))?;
                record.sort_order = text
                    .parse()
                    .map_err(|_| AppError::invalid_request("sort_order must be a number"))?;
            }
            _ => {}
        }
    }

    if record.size == 0 {
        return Err(AppError::new(ErrorCode::NoFileProvided));
    }
    if record.file_name.as_deref() == Some("broken.png") {
        return Err(AppError::new(ErrorCode::FileStorageFailed));
    }

    let uploaded = ImageUploaded {
        id: 100 + record.sort_order as i64,
        is_primary: record.is_primary,
        sort_order: record.sort_order,
    };
    state.uploads.lock().push(record);
    Ok(ApiResponse::success(uploaded))
}

async fn unauthorized() -> (axum::http::StatusCode, &'static str) {
    (axum::http::StatusCode::UNAUTHORIZED, "login first")
}

/// Start the mock server on an ephemeral port and return its base URL
async fn spawn_server(state: MockState) -> String {
    let app = Router::new()
        .route("/api/categories", get(categories))
        .route("/api/products", post(create_product))
        .route("/api/products/{id}/images", post(upload_image))
        .route("/api/private", get(unauthorized))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn client_for(state: &MockState) -> HttpClient {
    let base_url = spawn_server(state.clone()).await;
    ClientConfig::new(base_url)
        .with_token("secret")
        .with_timeout(5)
        .build_http_client()
        .unwrap()
}

fn payload(name: &str) -> ProductCreate {
    ProductCreate {
        name: name.to_string(),
        price: "12.5".parse().unwrap(),
        status: ProductStatus::Active,
        product_type: ProductType::General,
        category_ids: vec![1, 2],
        book: None,
    }
}

#[tokio::test]
async fn test_fetch_categories_sends_token() {
    let state = MockState::default();
    let client = client_for(&state).await;

    let records = client.fetch_categories().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].parent_id, Some(1));
    assert_eq!(state.auth.lock()[0].as_deref(), Some("Bearer secret"));
}

#[tokio::test]
async fn test_create_product_payload_shape() {
    let state = MockState::default();
    let client = client_for(&state).await;

    let id = client.create_product(&payload("Mug")).await.unwrap();
    assert_eq!(id, 7);

    let body = state.products.lock()[0].clone();
    assert_eq!(body["name"], "Mug");
    assert_eq!(body["price"], serde_json::json!(12.5));
    assert_eq!(body["status"], "ACTIVE");
    assert_eq!(body["product_type"], "general");
    assert_eq!(body["category_ids"], serde_json::json!([1, 2]));
    assert!(body.get("book").is_none());
}

#[tokio::test]
async fn test_error_envelope_becomes_rejection() {
    let state = MockState::default();
    let client = client_for(&state).await;

    let rejection = client.create_product(&payload("Taken")).await.unwrap_err();
    assert_eq!(rejection.message, "Product name already exists");
    assert_eq!(
        rejection.field_errors.get("name"),
        Some("A product with this name exists")
    );
    assert!(state.products.lock().is_empty());
}

#[tokio::test]
async fn test_upload_sends_multipart_fields() {
    let state = MockState::default();
    let client = client_for(&state).await;
    let file = FileHandle::new("cover.png", "image/png", vec![9u8; 2048]);

    let image_id = client.upload_image(7, &file, true, 3).await.unwrap();
    assert_eq!(image_id, 103);

    let uploads = state.uploads.lock().clone();
    assert_eq!(
        uploads,
        vec![UploadRecord {
            product_id: 7,
            file_name: Some("cover.png".to_string()),
            content_type: Some("image/png".to_string()),
            size: 2048,
            is_primary: true,
            sort_order: 3,
        }]
    );
}

#[tokio::test]
async fn test_upload_failure_maps_error_code() {
    let state = MockState::default();
    let client = client_for(&state).await;
    let file = FileHandle::new("broken.png", "image/png", vec![1u8; 8]);

    let err = client.upload_image(7, &file, false, 0).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::FileStorageFailed);
}

#[tokio::test]
async fn test_plain_status_falls_back() {
    let state = MockState::default();
    let client = client_for(&state).await;

    let err = client.get::<Value>("api/private").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));

    let err = client.get::<Value>("api/missing").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_wizard_end_to_end_over_http() {
    let state = MockState::default();
    let client = client_for(&state).await;
    let pool = PreviewPool::new(8);
    let mut wizard = WizardController::new(WizardConfig::default(), pool.clone());

    assert!(wizard.open(&client).await.is_none());
    wizard.set_name("Dune poster");
    wizard.set_price("25");
    wizard.toggle_category(2);
    wizard
        .add_image(FileHandle::new("front.png", "image/png", vec![1u8; 64]))
        .unwrap();
    wizard
        .add_image(FileHandle::new("broken.png", "image/png", vec![1u8; 64]))
        .unwrap();
    wizard
        .add_image(FileHandle::new("back.jpg", "image/jpeg", vec![1u8; 64]))
        .unwrap();
    while wizard.step() != WizardStep::Review {
        assert!(wizard.next());
    }

    let outcome = wizard.submit(&client, &client).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Created {
            product_id: 7,
            uploaded: 2,
            failed: 1
        }
    );
    assert_eq!(state.products.lock()[0]["category_ids"], serde_json::json!([1, 2]));

    let mut uploads = state.uploads.lock().clone();
    uploads.sort_by_key(|u| u.sort_order);
    assert_eq!(uploads.len(), 2);
    assert!(uploads[0].is_primary);
    assert_eq!(uploads[1].file_name.as_deref(), Some("back.jpg"));
    assert_eq!(pool.live_count(), 0);
}

#[tokio::test]
async fn test_unreachable_server_is_a_banner() {
    let client = ClientConfig::new("http://127.0.0.1:9")
        .with_timeout(2)
        .build_http_client()
        .unwrap();
    let mut wizard = WizardController::new(WizardConfig::default(), PreviewPool::new(2));

    let notice = wizard.open(&client).await.unwrap();
    assert!(notice.message.starts_with("Categories could not be loaded"));
    assert!(wizard.tree().is_empty());
}
