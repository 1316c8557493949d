//! Stock photos
//!
//! Photos reach a product either as a fresh upload or through a four digit
//! code handed out by the camera capture flow.

use std::{
    fmt::{self, Display, Formatter},
    ops::RangeInclusive,
    str::FromStr,
};

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

/// Number of digits in a photo code.
pub const PHOTO_CODE_DIGITS: usize = 4;

/// Range photo codes are drawn from.
pub const PHOTO_CODE_RANGE: RangeInclusive<u16> = 1000..=9999;

/// Errors raised while parsing a photo code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhotoCodeError {
    /// The code was not exactly four ASCII digits.
    #[error("Invalid code. Please enter a valid {PHOTO_CODE_DIGITS}-digit code.")]
    Malformed(String),
}

/// Short code resolving to an uploaded photo.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhotoCode(String);

impl PhotoCode {
    /// Draw a random code from [`PHOTO_CODE_RANGE`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(PHOTO_CODE_RANGE).to_string())
    }

    /// Borrow the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PhotoCode {
    type Err = PhotoCodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.len() != PHOTO_CODE_DIGITS || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhotoCodeError::Malformed(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }
}

impl Display for PhotoCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for PhotoCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PhotoCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u16),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text,
            Raw::Number(number) => number.to_string(),
        };

        text.parse().map_err(de::Error::custom)
    }
}

/// A photo file picked for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    /// Original file name as picked by the user.
    pub file_name: String,

    /// MIME type sent along with the upload.
    pub content_type: String,

    /// File contents.
    pub bytes: Vec<u8>,
}

impl fmt::Debug for PhotoUpload {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl PhotoUpload {
    /// Build an upload, guessing the MIME type from the file extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();

        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Object name to store this upload under.
    pub fn object_name(&self, millis: i64) -> String {
        upload_object_name(millis, &self.file_name)
    }
}

/// Where a product's stock photo comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSource<'a> {
    /// No photo.
    None,

    /// Look the photo up in the code registry.
    Code(&'a PhotoCode),

    /// Upload a new file.
    Upload(&'a PhotoUpload),
}

/// `<millis>_<name>` with whitespace runs turned into `_` and anything
/// outside `[A-Za-z0-9_.-]` dropped.
pub fn upload_object_name(millis: i64, file_name: &str) -> String {
    let mut sanitized = String::with_capacity(file_name.len());
    let mut in_whitespace = false;

    for ch in file_name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                sanitized.push('_');
            }

            in_whitespace = true;

            continue;
        }

        in_whitespace = false;

        if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-') {
            sanitized.push(ch);
        }
    }

    format!("{millis}_{sanitized}")
}

/// Object name for a still captured by the camera flow.
pub fn capture_object_name(millis: i64) -> String {
    format!("{millis}.jpg")
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn upload_names_are_sanitized() {
        assert_eq!(
            upload_object_name(1_700_000_000_000, "gold  ring (front).JPG"),
            "1700000000000_gold_ring_front.JPG"
        );
    }

    #[test]
    fn upload_names_drop_non_ascii() {
        assert_eq!(upload_object_name(5, "héllo wörld.png"), "5_hllo_wrld.png");
    }

    #[test]
    fn capture_names_use_jpg() {
        assert_eq!(capture_object_name(42), "42.jpg");
    }

    #[test]
    fn photo_codes_are_four_digits() -> TestResult {
        let code: PhotoCode = "0420".parse()?;

        assert_eq!(code.as_str(), "0420");
        assert!("123".parse::<PhotoCode>().is_err());
        assert!("12a4".parse::<PhotoCode>().is_err());

        Ok(())
    }

    #[test]
    fn random_photo_codes_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..200 {
            let code = PhotoCode::random(&mut rng);

            assert_eq!(code.as_str().len(), PHOTO_CODE_DIGITS);
            assert!(!code.as_str().starts_with('0'));
        }
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(PhotoUpload::new("a.jpeg", vec![]).content_type, "image/jpeg");
        assert_eq!(PhotoUpload::new("a.PNG", vec![]).content_type, "image/png");
        assert_eq!(
            PhotoUpload::new("noext", vec![]).content_type,
            "application/octet-stream"
        );
    }
}
