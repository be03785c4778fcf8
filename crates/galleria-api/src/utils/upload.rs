//! Multipart helpers for the upload handler

use std::io::{self, Cursor};

use axum::extract::multipart::{Field, MultipartError};
use axum::http::header::CONTENT_LENGTH;
use bytes::Bytes;
use futures::stream::{MapErr, TryStreamExt};
use galleria_core::AppError;
use galleria_processing::UploadCandidate;
use tokio::io::{AsyncReadExt, Chain};
use tokio_util::io::StreamReader;

/// Name of the only multipart field that carries the image.
pub const FILE_FIELD: &str = "file";

type FieldStream<'a> = MapErr<Field<'a>, fn(MultipartError) -> io::Error>;

/// Body of the `file` part, read straight from the request as the validator asks for it.
pub type FileBody<'a> = Chain<Cursor<Bytes>, StreamReader<FieldStream<'a>, Bytes>>;

/// Turn the `file` field into an upload candidate.
///
/// Only the first chunk is pulled here, to tell an empty file from a real one.
/// The rest stays in the request until the validator reads it.
pub async fn file_candidate(mut field: Field<'_>) -> Result<UploadCandidate<FileBody<'_>>, AppError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().unwrap_or_default().to_string();
    // Parts rarely declare a length; the validator caps the read either way.
    let declared_length = field
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(0);

    let first = match field.chunk().await.map_err(multipart_error)? {
        Some(chunk) if !chunk.is_empty() => chunk,
        _ => return Err(AppError::InvalidInput("Uploaded file is empty".to_string())),
    };

    let rest: FieldStream<'_> = field.map_err(into_io_error as fn(MultipartError) -> io::Error);
    let body = Cursor::new(first).chain(StreamReader::new(rest));

    Ok(UploadCandidate {
        file_name,
        content_type,
        declared_length,
        body,
    })
}

fn into_io_error(err: MultipartError) -> io::Error {
    io::Error::other(err)
}

pub fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge("Request body exceeds the upload limit.".to_string());
    }
    AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::{FromRequest, Request};
    use axum::http::header::CONTENT_TYPE;
    use futures::stream::{self, StreamExt};
    use axum::extract::Multipart;
    use galleria_processing::{UploadValidator, ValidatedUpload, ValidationError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const BOUNDARY: &str = "galleria-test-boundary";
    const CHUNK: usize = 64 * 1024;

    struct Form {
        chunks: Vec<Bytes>,
    }

    /// Multipart body whose `file` part is split into `chunk_count` chunks of data.
    fn form(file_name: &str, content_type: &str, chunk_count: usize) -> Form {
        let mut head = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"caption\"\r\n\r\nholiday\r\n\
             --{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        head.extend_from_slice(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);

        let mut chunks = vec![Bytes::from(head)];
        chunks.extend((0..chunk_count).map(|_| Bytes::from(vec![0u8; CHUNK])));
        chunks.push(Bytes::from(format!("\r\n--{BOUNDARY}--\r\n")));
        Form { chunks }
    }

    fn raw_form(body: String) -> Form {
        Form {
            chunks: vec![Bytes::from(body)],
        }
    }

    /// Request over `form`, counting how many body chunks have been pulled.
    async fn multipart_for(form: Form) -> (Multipart, Arc<AtomicUsize>) {
        let pulled = Arc::new(AtomicUsize::new(0));
        let counter = pulled.clone();
        let body = stream::iter(form.chunks).map(move |chunk| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, io::Error>(chunk)
        });

        let request = Request::builder()
            .method("POST")
            .uri("/api/v0/images")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from_stream(body))
            .unwrap();

        let multipart = Multipart::from_request(request, &()).await.unwrap();
        (multipart, pulled)
    }

    /// Validate the first `file` field, skipping any other field before it.
    async fn validate_file_field(
        multipart: &mut Multipart,
    ) -> Result<Result<ValidatedUpload, ValidationError>, AppError> {
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }
            let candidate = file_candidate(field).await?;
            return Ok(UploadValidator::default().validate(candidate).await);
        }
        Err(AppError::InvalidInput("No file provided".to_string()))
    }

    #[tokio::test]
    async fn test_bad_extension_rejected_before_body_is_read() {
        let chunk_count = 64;
        let (mut multipart, pulled) = multipart_for(form("notes.txt", "image/png", chunk_count)).await;

        let result = validate_file_field(&mut multipart).await.unwrap();

        assert!(matches!(
            result,
            Err(ValidationError::InvalidExtension { ref extension }) if extension == ".txt"
        ));
        let pulled = pulled.load(Ordering::SeqCst);
        assert!(pulled < 4, "read {pulled} of {} chunks", chunk_count + 2);
    }

    #[tokio::test]
    async fn test_valid_file_is_streamed_to_validator() {
        let chunk_count = 4;
        let (mut multipart, _) = multipart_for(form("photo.png", "image/png", chunk_count)).await;

        let validated = validate_file_field(&mut multipart).await.unwrap().unwrap();

        assert_eq!(validated.file_name, "photo.png");
        assert_eq!(validated.content_type, "image/png");
        assert_eq!(validated.data.len(), 8 + chunk_count * CHUNK);
    }

    #[tokio::test]
    async fn test_part_content_length_is_the_declared_length() {
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"big.png\"\r\n\
             Content-Type: image/png\r\nContent-Length: 20000000\r\n\r\nnot-checked\r\n--{BOUNDARY}--\r\n"
        );
        let (mut multipart, _) = multipart_for(raw_form(body)).await;

        let result = validate_file_field(&mut multipart).await.unwrap();

        assert!(matches!(
            result,
            Err(ValidationError::FileTooLarge { size: 20_000_000, .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_file_field() {
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"empty.png\"\r\n\
             Content-Type: image/png\r\n\r\n\r\n--{BOUNDARY}--\r\n"
        );
        let (mut multipart, _) = multipart_for(raw_form(body)).await;

        let err = validate_file_field(&mut multipart).await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid input: Uploaded file is empty");
    }
}
