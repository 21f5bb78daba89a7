//! S3-compatible backend client

use crate::{
    check_content_type, check_key, ObjectDownload, ObjectStore, PutBody, Result, StoreConfig,
    StoreError,
};
use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tokio_util::io::ReaderStream;
use tracing::{debug, instrument};

/// Object store backed by an S3-compatible service.
///
/// Configured once at startup with static credentials, a region, and a
/// custom base endpoint (plain HTTP allowed for local/dev backends, e.g.
/// MinIO or LocalStack). All objects live in a single fixed bucket.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    config: StoreConfig,
}

impl S3ObjectStore {
    /// Build a client from the given configuration.
    ///
    /// Validates the configuration but does not contact the backend.
    pub async fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;

        debug!(region = %config.region, endpoint = %config.endpoint_url, "initializing S3 client");

        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "stash-store",
        );

        let timeouts = TimeoutConfig::builder()
            .operation_timeout(config.operation_timeout)
            .build();

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(Region::new(config.region.clone()))
            .endpoint_url(&config.endpoint_url)
            .timeout_config(timeouts)
            .load()
            .await;

        // Path-style addressing: custom endpoints have no per-bucket DNS.
        let client = Client::from_conf(
            aws_sdk_s3::Config::from(&sdk_config)
                .to_builder()
                .force_path_style(true)
                .build(),
        );

        Ok(Self { client, config })
    }

    /// The bucket all operations target.
    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<ObjectDownload> {
        check_key(key)?;

        let output = self
            .client
            .get_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                if let SdkError::ServiceError(svc) = &err {
                    if svc.err().is_no_such_key() {
                        return StoreError::NotFound(key.to_string());
                    }
                }
                StoreError::Backend(DisplayErrorContext(err).to_string())
            })?;

        let content_length = output
            .content_length()
            .filter(|len| *len >= 0)
            .ok_or_else(|| {
                StoreError::Backend("backend response missing content length".to_string())
            })? as u64;

        let content_type = output
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        debug!(content_length, %content_type, "opened backend read stream");

        // The SDK body is read lazily; the object is never held in memory
        // as a whole. Dropping the stream aborts the transfer.
        let body = Box::pin(ReaderStream::new(output.body.into_async_read()));

        Ok(ObjectDownload {
            content_type,
            content_length,
            body,
        })
    }

    #[instrument(skip(self, body), fields(len = body.len()))]
    async fn put(&self, key: &str, body: PutBody, content_type: &str) -> Result<()> {
        check_key(key)?;
        check_content_type(content_type)?;

        // The temp file guard must outlive the send; the SDK streams the
        // file from disk rather than loading it.
        let (byte_stream, _spool_guard) = match body {
            PutBody::Bytes(bytes) => (ByteStream::from(bytes), None),
            PutBody::Spooled { file, .. } => {
                let stream = ByteStream::from_path(file.path())
                    .await
                    .map_err(|e| StoreError::Io(std::io::Error::other(e)))?;
                (stream, Some(file))
            }
        };

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .body(byte_stream)
            .send()
            .await
            .map_err(|err| StoreError::Backend(DisplayErrorContext(err).to_string()))?;

        debug!("object stored");
        Ok(())
    }
}
