//! Label errors.

use smallvec::SmallVec;
use thiserror::Error;

use crate::labels::fields::LabelField;

/// Errors raised while laying out or rendering a label.
#[derive(Debug, Error)]
pub enum LabelError {
    /// Required fields were blank; nothing was fetched or drawn.
    #[error("Please enter {}.", describe(.0))]
    MissingFields(SmallVec<[LabelField; 4]>),

    /// A weight field could not be read as a number.
    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber {
        /// Offending field.
        field: LabelField,
        /// Raw value.
        value: String,
    },

    /// The template could not be parsed or rewritten.
    #[error("label template error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// The template has no pages to draw on.
    #[error("label template has no pages")]
    EmptyTemplate,

    /// The rendered document could not be written out.
    #[error("failed to write label PDF")]
    Io(#[from] std::io::Error),

    /// The font asset is not a usable TrueType font.
    #[error("label font could not be parsed: {0}")]
    Font(#[from] ttf_parser::FaceParsingError),
}

fn describe(fields: &[LabelField]) -> String {
    let names: SmallVec<[&str; 4]> = fields.iter().map(LabelField::label).collect();

    match names.as_slice() {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    #[test]
    fn missing_fields_read_like_a_prompt() {
        let error = LabelError::MissingFields(smallvec![
            LabelField::Name,
            LabelField::Price,
            LabelField::Weight,
            LabelField::Hsn
        ]);

        assert_eq!(
            error.to_string(),
            "Please enter Name, Price, Weight, and HSN code."
        );
    }

    #[test]
    fn single_missing_field() {
        let error = LabelError::MissingFields(smallvec![LabelField::Price]);

        assert_eq!(error.to_string(), "Please enter Price.");
    }

    #[test]
    fn write_failures_keep_their_cause() {
        let error = LabelError::from(std::io::Error::new(
            std::io::ErrorKind::WriteZero,
            "disk full",
        ));

        assert!(matches!(error, LabelError::Io(_)));
        assert_eq!(error.to_string(), "failed to write label PDF");
        assert_eq!(
            std::error::Error::source(&error).map(ToString::to_string),
            Some("disk full".to_string())
        );
    }
}
