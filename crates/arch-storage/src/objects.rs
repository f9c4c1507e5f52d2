use aws_sdk_s3::Client;
use aws_smithy_types::byte_stream::ByteStream;

use crate::error::StorageError;

/// Result of a GET operation, including the body and ETag.
pub struct GetObjectOutput {
    pub body: Vec<u8>,
    pub etag: Option<String>,
}

/// Condition attached to a conditional PUT.
#[derive(Debug, Clone, Copy)]
pub enum WriteCondition<'a> {
    /// Succeeds only if nothing exists at the key (`If-None-Match: *`).
    Absent,
    /// Succeeds only if the current object has this ETag (`If-Match`).
    Matches(&'a str),
}

/// Get an object from S3.
pub async fn get_object(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<GetObjectOutput, StorageError> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_no_such_key() {
                StorageError::NotFound {
                    key: key.to_string(),
                }
            } else {
                StorageError::GetObject(err.to_string())
            }
        })?;

    let etag = resp.e_tag().map(str::to_string);
    let body = resp
        .body
        .collect()
        .await
        .map_err(|e| StorageError::GetObject(e.to_string()))?
        .into_bytes()
        .to_vec();

    Ok(GetObjectOutput { body, etag })
}

/// Conditionally put an object. Returns the new ETag.
///
/// A failed condition maps to `AlreadyExists` for [`WriteCondition::Absent`]
/// and `PreconditionFailed` for [`WriteCondition::Matches`].
pub async fn put_object_if(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    content_type: &str,
    condition: WriteCondition<'_>,
) -> Result<String, StorageError> {
    let req = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type(content_type)
        .body(ByteStream::from(body));

    let req = match condition {
        WriteCondition::Absent => req.if_none_match("*"),
        WriteCondition::Matches(etag) => req.if_match(etag),
    };

    let resp = req.send().await.map_err(|e| {
        let err = e.into_service_error().to_string();
        // 412 PreconditionFailed, or 409 ConditionalRequestConflict while a
        // competing conditional write is in flight.
        let rejected =
            err.contains("PreconditionFailed") || err.contains("ConditionalRequestConflict");
        match (rejected, condition) {
            (true, WriteCondition::Absent) => StorageError::AlreadyExists {
                key: key.to_string(),
            },
            (true, WriteCondition::Matches(_)) => StorageError::PreconditionFailed {
                key: key.to_string(),
            },
            (false, _) => StorageError::PutObject(err),
        }
    })?;

    Ok(resp.e_tag().unwrap_or_default().to_string())
}

/// Delete an object. Deleting a missing key succeeds.
pub async fn delete_object(client: &Client, bucket: &str, key: &str) -> Result<(), StorageError> {
    client
        .delete_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| StorageError::DeleteObject(e.into_service_error().to_string()))?;
    Ok(())
}

/// List every key under a prefix, following continuation tokens. Keys come
/// back in S3's ascending order.
pub async fn list_keys(
    client: &Client,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<String>, StorageError> {
    let mut keys = Vec::new();
    let mut continuation_token: Option<String> = None;

    loop {
        let resp = client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .set_continuation_token(continuation_token.take())
            .send()
            .await
            .map_err(|e| StorageError::ListObjects(e.into_service_error().to_string()))?;

        keys.extend(resp.contents().iter().filter_map(|obj| obj.key().map(str::to_string)));

        match resp.next_continuation_token() {
            Some(token) if resp.is_truncated() == Some(true) => {
                continuation_token = Some(token.to_string());
            }
            _ => break,
        }
    }

    Ok(keys)
}
