use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::cli::ServeArgs;
use crate::core::result::FileProcessingResult;
use crate::processing::config::ProcessingConfig;
use crate::processing::input::InputFile;
use crate::processing::processor::{FileProcessor, ProcessingError};
use crate::processing::sniff::detect;
use crate::utils::validation::{validate_upload, ValidationError};

/// Security configuration constants to prevent `DoS` attacks
pub const MAX_MULTIPART_FIELDS: usize = 10;
pub const MAX_UPLOAD_SIZE: usize = 64 * 1024 * 1024; // 64MB
/// Request body limit: largest upload plus multipart overhead
pub const MAX_BODY_SIZE: usize = MAX_UPLOAD_SIZE + 1024 * 1024;

/// Shared application state
pub struct AppState {
    pub processor: FileProcessor,
}

/// A file pulled out of a multipart form
#[derive(Debug)]
struct Upload {
    filename: String,
    mime_type: String,
    bytes: Vec<u8>,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None, // Never expose internal details to prevent information disclosure
    }
}

fn error_response(
    status: StatusCode,
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> Response {
    (
        status,
        Json(create_safe_error_response(
            error_type,
            user_message,
            internal_error,
        )),
    )
        .into_response()
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, the tokio runtime cannot
/// be created, or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let config = args.config.resolve()?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, config).await })
}

/// Routes without middleware
pub fn api_routes(config: ProcessingConfig) -> Router {
    let state = Arc::new(AppState {
        processor: FileProcessor::new(config),
    });

    Router::new()
        .route("/api/process", post(process_handler))
        .route("/api/formats", get(formats_handler))
        .with_state(state)
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(config: ProcessingConfig) -> anyhow::Result<Router> {
    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?;

    let app = api_routes(config).layer(
        ServiceBuilder::new()
            // Security headers for browser protection
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-frame-options"),
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("strict-transport-security"),
                HeaderValue::from_static("max-age=31536000; includeSubDomains"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("referrer-policy"),
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ))
            // IP-based rate limiting to prevent abuse
            .layer(GovernorLayer {
                config: Arc::new(governor_conf),
            })
            // Request timeout to prevent slow client attacks
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(60),
            ))
            // Limit concurrent requests to prevent DOS
            .layer(ConcurrencyLimitLayer::new(100))
            .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
    );

    Ok(app)
}

async fn run_server(args: ServeArgs, config: ProcessingConfig) -> anyhow::Result<()> {
    let app = create_router(config)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting lab-ingest server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}/api/formats"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Process one uploaded file
async fn process_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    let upload = match extract_upload(&mut multipart).await {
        Ok(upload) => upload,
        Err(error_response) => return error_response,
    };

    match process_upload(&state.processor, upload).await {
        Ok(result) => Json(result).into_response(),
        Err(response) => response,
    }
}

/// Hygiene checks, then hand the upload to the processor
async fn process_upload(
    processor: &FileProcessor,
    upload: Upload,
) -> Result<FileProcessingResult, Response> {
    let format = detect(&upload.filename, &upload.mime_type);
    let filename = match validate_upload(Some(&upload.filename), &upload.bytes, format) {
        Ok(name) => name.unwrap_or_default(),
        Err(e) => return Err(validation_error_response(&e)),
    };

    let file = InputFile::from_bytes(filename, upload.mime_type, upload.bytes);
    processor
        .process_file_async(&file)
        .await
        .map_err(|e| processing_error_response(&e))
}

fn validation_error_response(error: &ValidationError) -> Response {
    match error {
        ValidationError::FilenameTooLong => error_response(
            StatusCode::BAD_REQUEST,
            "filename_too_long",
            "Filename exceeds maximum length limit",
            None,
        ),
        ValidationError::InvalidFilename | ValidationError::EmptyFilename => error_response(
            StatusCode::BAD_REQUEST,
            "invalid_filename",
            "Filename contains invalid or dangerous characters",
            None,
        ),
        ValidationError::InvalidFileContent => error_response(
            StatusCode::BAD_REQUEST,
            "invalid_content",
            "File content appears malformed or empty",
            None,
        ),
        ValidationError::FormatValidationFailed(_) => error_response(
            StatusCode::BAD_REQUEST,
            "format_mismatch",
            "File content does not match the expected format based on filename",
            Some(error.to_string().as_str()),
        ),
    }
}

/// HTTP status for a processing failure
fn processing_error_status(error: &ProcessingError) -> StatusCode {
    match error {
        ProcessingError::SizeExceeded { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        ProcessingError::UnsupportedFormat { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ProcessingError::Decompression { .. } => StatusCode::BAD_REQUEST,
        ProcessingError::BatchDisabled | ProcessingError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn processing_error_response(error: &ProcessingError) -> Response {
    let status = processing_error_status(error);
    let (error_type, message) = match error {
        ProcessingError::SizeExceeded { .. } => {
            ("file_too_large", "File size exceeds the configured limit")
        }
        ProcessingError::UnsupportedFormat { .. } => {
            ("unsupported_format", "File extension is not in the supported formats list")
        }
        ProcessingError::Decompression { .. } => {
            ("decompression_failed", "Compressed content could not be read")
        }
        ProcessingError::BatchDisabled | ProcessingError::Io(_) => {
            ("internal_error", "Unable to process file")
        }
    };
    error_response(status, error_type, message, Some(error.to_string().as_str()))
}

/// Extract the `file` field from a multipart form
async fn extract_upload(multipart: &mut Multipart) -> Result<Upload, Response> {
    let mut upload = None;
    let mut fields_received = 0usize;
    let mut had_parse_error = false;

    loop {
        if fields_received >= MAX_MULTIPART_FIELDS {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "field_limit_exceeded",
                "Too many form fields",
                None,
            ));
        }

        match multipart.next_field().await {
            Ok(Some(field)) => {
                fields_received += 1;
                if field.name() != Some("file") {
                    continue; // Ignore unknown fields
                }

                let filename = field.file_name().unwrap_or_default().to_string();
                let mime_type = field.content_type().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) if bytes.len() > MAX_UPLOAD_SIZE => {
                        return Err(error_response(
                            StatusCode::PAYLOAD_TOO_LARGE,
                            "file_too_large",
                            "File size exceeds upload limit",
                            None,
                        ));
                    }
                    Ok(bytes) => {
                        upload = Some(Upload {
                            filename,
                            mime_type,
                            bytes: bytes.to_vec(),
                        });
                    }
                    Err(_) => had_parse_error = true,
                }
            }
            Ok(None) => break,
            Err(_) => {
                had_parse_error = true;
                break;
            }
        }
    }

    upload.ok_or_else(|| {
        let message = if had_parse_error {
            "Failed to parse upload. Please check the file and try again."
        } else {
            "No file received. Please upload a file in the 'file' field."
        };
        error_response(StatusCode::BAD_REQUEST, "missing_input", message, None)
    })
}

/// Return the active allow-list and size limit
async fn formats_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let config = state.processor.config();
    Json(serde_json::json!({
        "supported_formats": config.supported_formats,
        "max_file_size": config.max_file_size,
        "batch_processing": config.enable_batch_processing,
        "validation": config.enable_validation,
    }))
}
