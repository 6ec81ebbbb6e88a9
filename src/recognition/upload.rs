//! Uploaded image handling
//!
//! The service takes plain base64 (no `data:` prefix); the history keeps a
//! data URI of the same bytes so a past session can be shown again.

use base64::Engine;
use std::path::Path;

use crate::error::ValidationError;

const BASE64: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// An image chosen by the user, validated and ready to submit
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    bytes: Vec<u8>,
    mime: &'static str,
    width: u32,
    height: u32,
}

impl UploadedImage {
    /// Validate raw file contents as a decodable image
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ValidationError> {
        if bytes.is_empty() {
            return Err(ValidationError::EmptyImage);
        }

        let format = image::guess_format(&bytes)
            .map_err(|e| ValidationError::UnsupportedImage(e.to_string()))?;
        let decoded = image::load_from_memory_with_format(&bytes, format)
            .map_err(|e| ValidationError::UnsupportedImage(e.to_string()))?;

        Ok(Self {
            mime: format.to_mime_type(),
            width: decoded.width(),
            height: decoded.height(),
            bytes,
        })
    }

    /// Read and validate an image file
    pub fn open(path: &Path) -> Result<Self, ValidationError> {
        let bytes = std::fs::read(path).map_err(|e| {
            ValidationError::UnsupportedImage(format!("{}: {}", path.display(), e))
        })?;
        Self::from_bytes(bytes)
    }

    /// Rebuild an image from a data URI previously produced by [`Self::data_uri`]
    pub fn from_data_uri(uri: &str) -> Result<Self, ValidationError> {
        Self::from_bytes(decode_data_uri(uri)?)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> &str {
        self.mime
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Plain base64 payload for the recognize request
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }

    /// `data:<mime>;base64,<payload>` for local display and history thumbnails
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.to_base64())
    }

    /// Decode to RGBA pixels for texture upload
    pub fn to_rgba(&self) -> Result<image::RgbaImage, ValidationError> {
        image::load_from_memory(&self.bytes)
            .map(|img| img.to_rgba8())
            .map_err(|e| ValidationError::UnsupportedImage(e.to_string()))
    }
}

/// Extract the payload bytes of a base64 data URI
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, ValidationError> {
    let rest = uri.strip_prefix("data:").ok_or(ValidationError::InvalidDataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(ValidationError::InvalidDataUri)?;
    if !header.ends_with(";base64") {
        return Err(ValidationError::InvalidDataUri);
    }
    BASE64
        .decode(payload.trim())
        .map_err(|_| ValidationError::InvalidDataUri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, 255]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_from_bytes_reads_dimensions() {
        let upload = UploadedImage::from_bytes(png_bytes(8, 4)).unwrap();
        assert_eq!(upload.width(), 8);
        assert_eq!(upload.height(), 4);
        assert_eq!(upload.mime(), "image/png");
    }

    #[test]
    fn test_empty_bytes_rejected() {
        assert_eq!(
            UploadedImage::from_bytes(Vec::new()).unwrap_err(),
            ValidationError::EmptyImage
        );
    }

    #[test]
    fn test_garbage_rejected() {
        let err = UploadedImage::from_bytes(b"not an image at all".to_vec()).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedImage(_)));
    }

    #[test]
    fn test_data_uri_restores_image() {
        let upload = UploadedImage::from_bytes(png_bytes(3, 5)).unwrap();
        let uri = upload.data_uri();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert!(!upload.to_base64().starts_with("data:"));

        let restored = UploadedImage::from_data_uri(&uri).unwrap();
        assert_eq!(restored, upload);
    }

    #[test]
    fn test_decode_data_uri_rejects_malformed() {
        assert_eq!(decode_data_uri(""), Err(ValidationError::InvalidDataUri));
        assert_eq!(
            decode_data_uri("data:image/png,abc"),
            Err(ValidationError::InvalidDataUri)
        );
        assert_eq!(
            decode_data_uri("data:image/png;base64,@@@"),
            Err(ValidationError::InvalidDataUri)
        );
    }

    #[test]
    fn test_to_rgba() {
        let upload = UploadedImage::from_bytes(png_bytes(2, 2)).unwrap();
        let rgba = upload.to_rgba().unwrap();
        assert_eq!(rgba.dimensions(), (2, 2));
        assert_eq!(rgba.get_pixel(0, 0).0, [200, 10, 10, 255]);
    }

    #[test]
    fn test_open_missing_file() {
        let err = UploadedImage::open(Path::new("/nonexistent/scan.png")).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedImage(_)));
    }
}
