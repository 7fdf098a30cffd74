//! File encoding: turn a picked or dropped file into an [`UploadedImage`].

use std::path::Path;

use super::state::UploadedImage;
use super::StudioError;

/// Read an image file into memory. The declared content type comes from the
/// file name; anything that is not `image/*` is rejected before any I/O.
/// All-or-nothing: there is no partial or streamed decode.
///
/// # Errors
/// `NotAnImage` when the declared type is not an image, `FileRead` when the
/// file cannot be read.
pub async fn encode_image_file(path: &Path) -> Result<UploadedImage, StudioError> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let mime_type = mime.essence_str().to_string();
    if !mime_type.starts_with("image/") {
        return Err(StudioError::NotAnImage { mime_type });
    }

    let data = tokio::fs::read(path).await?;
    Ok(UploadedImage { data, mime_type })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[tokio::test]
    async fn rejects_non_image_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"plain text")
            .unwrap();

        let err = encode_image_file(&path).await.unwrap_err();
        assert!(matches!(err, StudioError::NotAnImage { .. }));
    }

    #[tokio::test]
    async fn reads_image_bytes_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        let bytes: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0, 1, 2, 3];
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&bytes)
            .unwrap();

        let image = encode_image_file(&path).await.unwrap();
        assert_eq!(image.data, bytes);
        assert_eq!(image.mime_type, "image/png");
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let err = encode_image_file(Path::new("/nonexistent/photo.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::FileRead { .. }));
    }
}
