use bytes::Bytes;
use galleria_core::constants::{
    ALLOWED_IMAGE_EXTENSIONS, IMAGE_CONTENT_TYPE_PREFIX, MAX_UPLOAD_BYTES,
};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::signature::{sniff, ImageFormat};

/// File name used when the client did not send a usable one.
pub const FALLBACK_FILE_NAME: &str = "upload";

/// Why an upload was refused before reaching the image store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Invalid file extension: {extension:?}")]
    InvalidExtension { extension: String },

    #[error("Invalid content type: {content_type:?}")]
    InvalidContentType { content_type: String },

    #[error("File signature does not match any supported image format")]
    InvalidSignature,
}

impl ValidationError {
    /// Short, user-facing explanation of the rejection.
    pub fn reason(&self) -> String {
        match self {
            ValidationError::FileTooLarge { max, .. } => {
                format!("File exceeds the {} MB limit.", max / (1024 * 1024))
            }
            ValidationError::InvalidExtension { .. } => "Invalid file extension.".to_string(),
            ValidationError::InvalidContentType { .. } => {
                "Invalid content type. Only image files are allowed.".to_string()
            }
            ValidationError::InvalidSignature => "Uploaded file is not a valid image.".to_string(),
        }
    }
}

/// An upload as received from the client, before any check has run.
///
/// `declared_length` is what the client claims; `body` has not been read yet.
#[derive(Debug)]
pub struct UploadCandidate<B> {
    pub file_name: String,
    pub content_type: String,
    pub declared_length: u64,
    pub body: B,
}

/// An upload that passed every check and is safe to forward.
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    /// Final path component of the client's file name.
    pub file_name: String,
    pub content_type: String,
    pub format: ImageFormat,
    pub data: Bytes,
}

/// Image upload validator
///
/// Metadata checks ([`validate_metadata`](Self::validate_metadata)) never touch
/// the body. The body is only read by [`validate`](Self::validate), and only
/// once the metadata checks have passed.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_file_size: u64,
    allowed_extensions: Vec<String>,
}

impl Default for UploadValidator {
    fn default() -> Self {
        Self::new(
            MAX_UPLOAD_BYTES,
            ALLOWED_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        )
    }
}

impl UploadValidator {
    /// `allowed_extensions` are lower-case and include the leading dot (`".png"`).
    pub fn new(max_file_size: u64, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
        }
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: u64) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate file extension (case-insensitive)
    pub fn validate_extension(&self, file_name: &str) -> Result<(), ValidationError> {
        let extension = extension_of(file_name).unwrap_or_default();

        if extension.is_empty() || !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension { extension });
        }

        Ok(())
    }

    /// Validate content type: must start with `image/`, case-insensitive
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let prefix = IMAGE_CONTENT_TYPE_PREFIX.as_bytes();
        let is_image = content_type
            .as_bytes()
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix));

        if content_type.trim().is_empty() || !is_image {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
            });
        }

        Ok(())
    }

    /// Validate magic bytes, returning the detected format
    pub fn validate_signature(&self, data: &[u8]) -> Result<ImageFormat, ValidationError> {
        sniff(data).ok_or(ValidationError::InvalidSignature)
    }

    /// Run every check that can be decided without reading the body.
    pub fn validate_metadata(
        &self,
        file_name: &str,
        content_type: &str,
        declared_length: u64,
    ) -> Result<(), ValidationError> {
        self.validate_file_size(declared_length)?;
        self.validate_extension(file_name)?;
        self.validate_content_type(content_type)?;
        Ok(())
    }

    /// Read the whole body into memory, never holding more than the size ceiling plus one byte.
    ///
    /// A body longer than the ceiling is rejected as too large whatever length
    /// was declared. A read failure is treated as an invalid image.
    pub async fn buffer_body<R>(&self, body: R, size_hint: u64) -> Result<Bytes, ValidationError>
    where
        R: AsyncRead + Unpin,
    {
        let capacity = size_hint.min(self.max_file_size) as usize;
        let mut buffer = Vec::with_capacity(capacity);

        if let Err(e) = body
            .take(self.max_file_size.saturating_add(1))
            .read_to_end(&mut buffer)
            .await
        {
            tracing::debug!(error = %e, "Failed to read upload body");
            return Err(ValidationError::InvalidSignature);
        }

        self.validate_file_size(buffer.len() as u64)?;
        Ok(Bytes::from(buffer))
    }

    /// Validate a candidate end to end: metadata, then body size, then signature.
    pub async fn validate<R>(
        &self,
        candidate: UploadCandidate<R>,
    ) -> Result<ValidatedUpload, ValidationError>
    where
        R: AsyncRead + Unpin,
    {
        let UploadCandidate {
            file_name,
            content_type,
            declared_length,
            body,
        } = candidate;

        self.validate_metadata(&file_name, &content_type, declared_length)?;

        let data = self.buffer_body(body, declared_length).await?;
        let format = self.validate_signature(&data)?;

        Ok(ValidatedUpload {
            file_name: sanitize_file_name(&file_name),
            content_type,
            format,
            data,
        })
    }
}

/// Strip any client-side directory components (`/` or `\`) from `file_name`.
///
/// Falls back to [`FALLBACK_FILE_NAME`] when nothing usable is left.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        base.to_string()
    }
}

/// Lower-cased extension of the final path component, including the dot.
fn extension_of(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(['/', '\\']).next()?;
    let dot = base.rfind('.')?;
    let extension = &base[dot..];

    // A trailing dot is not an extension.
    if extension.len() == 1 {
        return None;
    }

    Some(extension.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::task::{Context, Poll};
    use tokio::io::ReadBuf;

    const MIB: u64 = 1024 * 1024;
    const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// Async body that counts how many times it is polled for data.
    struct CountingReader {
        reads: Arc<AtomicUsize>,
        inner: io::Cursor<Vec<u8>>,
    }

    impl CountingReader {
        fn new(data: Vec<u8>) -> (Self, Arc<AtomicUsize>) {
            let reads = Arc::new(AtomicUsize::new(0));
            let reader = Self {
                reads: reads.clone(),
                inner: io::Cursor::new(data),
            };
            (reader, reads)
        }
    }

    impl AsyncRead for CountingReader {
        fn poll_read(
            mut self: Pin<&mut Self>,
            cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Pin::new(&mut self.inner).poll_read(cx, buf)
        }
    }

    struct BrokenReader;

    impl AsyncRead for BrokenReader {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            Poll::Ready(Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "client went away",
            )))
        }
    }

    fn candidate<B>(file_name: &str, content_type: &str, length: u64, body: B) -> UploadCandidate<B> {
        UploadCandidate {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            declared_length: length,
            body,
        }
    }

    fn png_bytes(len: usize) -> Vec<u8> {
        let mut data = vec![0u8; len];
        data[..PNG_HEADER.len()].copy_from_slice(PNG_HEADER);
        data
    }

    #[test]
    fn test_validate_file_size_boundary() {
        let validator = UploadValidator::default();
        assert!(validator.validate_file_size(10 * MIB).is_ok());
        assert_eq!(
            validator.validate_file_size(10 * MIB + 1),
            Err(ValidationError::FileTooLarge {
                size: 10 * MIB + 1,
                max: 10 * MIB,
            })
        );
    }

    #[test]
    fn test_validate_extension() {
        let validator = UploadValidator::default();
        for name in ["a.jpg", "a.JPEG", "photo.Png", "x.gif", "x.bmp", "x.webp", "dir/y.png"] {
            assert!(validator.validate_extension(name).is_ok(), "{name}");
        }
        for name in ["a.svg", "a.tiff", "noext", "trailing.", "archive.png.exe", ""] {
            assert!(validator.validate_extension(name).is_err(), "{name}");
        }
    }

    #[test]
    fn test_extension_comes_from_last_path_component() {
        let validator = UploadValidator::default();
        assert!(validator.validate_extension("images.png/readme").is_err());
        assert!(validator.validate_extension("C:\\pics.d\\cat.webp").is_ok());
    }

    #[test]
    fn test_validate_content_type() {
        let validator = UploadValidator::default();
        assert!(validator.validate_content_type("image/png").is_ok());
        assert!(validator.validate_content_type("IMAGE/JPEG").is_ok());
        assert!(validator.validate_content_type("image/svg+xml").is_ok());
        assert!(validator.validate_content_type("").is_err());
        assert!(validator.validate_content_type("   ").is_err());
        assert!(validator.validate_content_type("text/plain").is_err());
        assert!(validator.validate_content_type("imag").is_err());
        assert!(validator.validate_content_type("application/image").is_err());
    }

    #[test]
    fn test_reasons() {
        assert_eq!(
            ValidationError::FileTooLarge { size: 1, max: 10 * MIB }.reason(),
            "File exceeds the 10 MB limit."
        );
        assert_eq!(
            ValidationError::InvalidExtension { extension: ".svg".into() }.reason(),
            "Invalid file extension."
        );
        assert_eq!(
            ValidationError::InvalidContentType { content_type: "text/plain".into() }.reason(),
            "Invalid content type. Only image files are allowed."
        );
        assert_eq!(
            ValidationError::InvalidSignature.reason(),
            "Uploaded file is not a valid image."
        );
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("cat.png"), "cat.png");
        assert_eq!(sanitize_file_name("../../etc/cat.png"), "cat.png");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\cat.png"), "cat.png");
        assert_eq!(sanitize_file_name(""), "upload");
        assert_eq!(sanitize_file_name("dir/"), "upload");
    }

    #[tokio::test]
    async fn test_oversized_declared_length_reads_nothing() {
        let validator = UploadValidator::default();
        let (body, reads) = CountingReader::new(png_bytes(1024));

        let err = validator
            .validate(candidate("big.png", "image/png", 11 * MIB, body))
            .await
            .unwrap_err();

        assert!(matches!(err, ValidationError::FileTooLarge { .. }));
        assert_eq!(reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_metadata_rejections_read_nothing() {
        let validator = UploadValidator::default();

        let (body, reads) = CountingReader::new(png_bytes(64));
        let err = validator
            .validate(candidate("script.svg", "image/png", 64, body))
            .await
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidExtension { .. }));
        assert_eq!(reads.load(Ordering::SeqCst), 0);

        let (body, reads) = CountingReader::new(png_bytes(64));
        let err = validator
            .validate(candidate("photo.png", "text/html", 64, body))
            .await
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidContentType { .. }));
        assert_eq!(reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_bad_header_rejected_after_cheap_checks() {
        let validator = UploadValidator::default();
        let data = vec![0u8; 5 * MIB as usize];

        let err = validator
            .validate(candidate("fake.png", "image/png", 5 * MIB, &data[..]))
            .await
            .unwrap_err();

        assert_eq!(err, ValidationError::InvalidSignature);
    }

    #[tokio::test]
    async fn test_exactly_max_size_is_accepted() {
        let validator = UploadValidator::default();
        let data = png_bytes(10 * MIB as usize);

        let validated = validator
            .validate(candidate("full.png", "image/png", 10 * MIB, &data[..]))
            .await
            .unwrap();

        assert_eq!(validated.format, ImageFormat::Png);
        assert_eq!(validated.data.len() as u64, 10 * MIB);
    }

    #[tokio::test]
    async fn test_body_longer_than_ceiling_is_too_large() {
        let validator = UploadValidator::new(16, vec![".png".to_string()]);
        let data = png_bytes(17);

        let err = validator
            .validate(candidate("liar.png", "image/png", 8, &data[..]))
            .await
            .unwrap_err();

        assert_eq!(err, ValidationError::FileTooLarge { size: 17, max: 16 });
    }

    #[tokio::test]
    async fn test_one_byte_body_is_not_an_image() {
        let validator = UploadValidator::default();
        let data = [0xFFu8];

        let err = validator
            .validate(candidate("tiny.jpg", "image/jpeg", 1, &data[..]))
            .await
            .unwrap_err();

        assert_eq!(err, ValidationError::InvalidSignature);
    }

    #[tokio::test]
    async fn test_read_error_is_not_an_image() {
        let validator = UploadValidator::default();

        let err = validator
            .validate(candidate("cat.jpg", "image/jpeg", 100, BrokenReader))
            .await
            .unwrap_err();

        assert_eq!(err, ValidationError::InvalidSignature);
    }

    #[tokio::test]
    async fn test_valid_upload_keeps_metadata() {
        let validator = UploadValidator::default();
        let data = b"GIF89a\x01\x00\x01\x00".to_vec();

        let validated = validator
            .validate(candidate("/tmp/uploads/Anim.GIF", "image/gif", 10, &data[..]))
            .await
            .unwrap();

        assert_eq!(validated.file_name, "Anim.GIF");
        assert_eq!(validated.content_type, "image/gif");
        assert_eq!(validated.format, ImageFormat::Gif);
        assert_eq!(&validated.data[..], &data[..]);
    }
}
