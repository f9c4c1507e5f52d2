use aws_sdk_s3::Client;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;
use crate::objects::{self, WriteCondition};

const JSON: &str = "application/json";

/// Load a JSON record from S3. Returns the deserialized value and its ETag.
pub async fn load_json<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<(T, String), StorageError> {
    let output = objects::get_object(client, bucket, key).await?;
    let value: T = serde_json::from_slice(&output.body)?;
    Ok((value, output.etag.unwrap_or_default()))
}

/// Write a JSON record that must not exist yet, unless the stored object is
/// byte-identical to `value`. A retried write of the same record succeeds.
pub async fn create_json<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    match objects::put_object_if(client, bucket, key, body.clone(), JSON, WriteCondition::Absent)
        .await
    {
        Ok(_) => Ok(()),
        Err(StorageError::AlreadyExists { key }) => {
            let existing = objects::get_object(client, bucket, &key).await?;
            if existing.body == body {
                Ok(())
            } else {
                Err(StorageError::AlreadyExists { key })
            }
        }
        Err(e) => Err(e),
    }
}

/// Overwrite a JSON record only if it is unchanged since it was loaded.
pub async fn replace_json<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
    expected_etag: &str,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    objects::put_object_if(
        client,
        bucket,
        key,
        body,
        JSON,
        WriteCondition::Matches(expected_etag),
    )
    .await
}
