use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_s3::Client as S3Client;

/// Shared application state, injected into all route handlers via Axum
/// state. Read-only per request.
#[derive(Clone)]
pub struct AppState {
    pub store: S3Client,
    pub bedrock: BedrockClient,
    pub bucket: String,
    pub model_id: String,
}
