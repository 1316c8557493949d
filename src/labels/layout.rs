//! Label layout
//!
//! Positions are in template units: PDF points with the origin at the
//! bottom-left corner of an 80 by 40 label.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{
    labels::{
        errors::LabelError,
        fields::{LabelField, LabelFields},
    },
    pricing::{NET_WEIGHT_DECIMALS, fixed, net_weight},
};

/// Average glyph width as a fraction of the font size.
pub const CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Left margin for every left-aligned run.
pub const LEFT_X: f32 = 4.0;

/// Right edge that right-aligned runs end at.
pub const RIGHT_MARGIN: f32 = 70.0;

/// Baseline of the first name line.
pub const NAME_Y: f32 = 30.0;

/// Width the name may take before wrapping.
pub const NAME_MAX_WIDTH: f32 = 80.0;

/// Name size while it fits on one line.
pub const NAME_SIZE: f32 = 7.0;

/// Name size once it has wrapped.
pub const NAME_FALLBACK_SIZE: f32 = 5.0;

/// Distance between wrapped name lines.
pub const LINE_STEP: f32 = 4.0;

/// Size of the price and weight lines.
pub const DETAIL_SIZE: f32 = 5.0;

/// Size of the HSN code and ring size.
pub const CODE_SIZE: f32 = 6.0;

/// Size value that prints as a bare `U`.
pub const UNIVERSAL_SIZE: &str = "universal";

const PRICE_Y: f32 = 8.0;
const HSN_Y: f32 = 18.0;
const SIZE_Y: f32 = 24.0;
const FIRST_DETAIL_Y: f32 = 20.0;
const SECOND_DETAIL_Y: f32 = 16.0;
const THIRD_DETAIL_Y: f32 = 12.0;
const PLATINUM_PURITY: &str = "92.50";

/// A single line of text to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Text as drawn.
    pub text: String,

    /// Left edge of the run.
    pub x: f32,

    /// Baseline of the run.
    pub y: f32,

    /// Font size.
    pub size: f32,
}

impl TextRun {
    fn new(text: impl Into<String>, x: f32, y: f32, size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            size,
        }
    }

    fn right_aligned(text: impl Into<String>, y: f32, size: f32) -> Self {
        let text = text.into();
        let x = RIGHT_MARGIN - estimated_width(&text, size);

        Self { text, x, y, size }
    }
}

/// Approximate rendered width of `text` at `size`.
#[expect(
    clippy::cast_precision_loss,
    reason = "label text is a handful of characters"
)]
pub fn estimated_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * CHAR_WIDTH_FACTOR
}

/// Greedily wrap `text` on spaces so each line fits in `max_width`.
///
/// Widths are always measured at `size`. The first line that has to be
/// broken is drawn at `size`; everything after it is drawn at `fallback`.
pub fn wrap_text(
    text: &str,
    x: f32,
    y: f32,
    max_width: f32,
    size: f32,
    fallback: f32,
) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut line = String::new();
    let mut current_size = size;
    let mut cursor = y;

    for word in text.split(' ') {
        let candidate = format!("{line}{word} ");

        if estimated_width(&candidate, size) > max_width && !line.is_empty() {
            push_line(&mut runs, &line, x, cursor, current_size);

            current_size = fallback;
            cursor -= LINE_STEP;
            line = format!("{word} ");
        } else {
            line = candidate;
        }
    }

    push_line(&mut runs, &line, x, cursor, current_size);

    runs
}

fn push_line(runs: &mut Vec<TextRun>, line: &str, x: f32, y: f32, size: f32) {
    let text = line.trim_end();

    if !text.is_empty() {
        runs.push(TextRun::new(text, x, y, size));
    }
}

/// Upper-case the first character.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Every run printed on one label, in drawing order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelLayout {
    runs: Vec<TextRun>,
}

impl LabelLayout {
    /// Lay out a label for the given fields.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::MissingFields`] when a required field is blank,
    /// or [`LabelError::InvalidNumber`] when a diamond label's weights are
    /// not numbers.
    pub fn for_fields(fields: &LabelFields) -> Result<Self, LabelError> {
        fields.validate()?;

        let name = capitalize(fields.name.trim());
        let weight = fields.weight.trim();

        let mut runs = wrap_text(
            &name,
            LEFT_X,
            NAME_Y,
            NAME_MAX_WIDTH,
            NAME_SIZE,
            NAME_FALLBACK_SIZE,
        );

        runs.push(TextRun::new(
            format!("MRP:{}/-", fields.price.trim()),
            LEFT_X,
            PRICE_Y,
            DETAIL_SIZE,
        ));

        runs.push(TextRun::right_aligned(
            format!("#{}", fields.hsn.trim()),
            HSN_Y,
            CODE_SIZE,
        ));

        if fields.has_diamonds() {
            let diamond_weight = fields.diamond_weight.trim();
            let net = fixed(
                net_weight(
                    parse_weight(LabelField::Weight, weight)?,
                    parse_weight(LabelField::DiamondWeight, diamond_weight)?,
                ),
                NET_WEIGHT_DECIMALS,
            );

            runs.extend([
                TextRun::new(
                    format!("G.wt:{weight}g"),
                    LEFT_X,
                    FIRST_DETAIL_Y,
                    DETAIL_SIZE,
                ),
                TextRun::new(
                    format!("N.wt:{net}g"),
                    LEFT_X,
                    SECOND_DETAIL_Y,
                    DETAIL_SIZE,
                ),
                TextRun::new(
                    format!(
                        "Dia.wt:{diamond_weight}ct {} {}kt",
                        fields.sihi.trim().to_uppercase(),
                        fields.kt.trim()
                    ),
                    LEFT_X,
                    THIRD_DETAIL_Y,
                    DETAIL_SIZE,
                ),
            ]);
        } else {
            let collection = capitalize(fields.collection_name.trim());

            if !collection.is_empty() {
                runs.push(TextRun::new(
                    collection,
                    LEFT_X,
                    FIRST_DETAIL_Y,
                    DETAIL_SIZE,
                ));
            }

            runs.push(TextRun::new(
                format!("G.wt:{weight}g"),
                LEFT_X,
                SECOND_DETAIL_Y,
                DETAIL_SIZE,
            ));

            match fields.size.trim() {
                "" => {}
                UNIVERSAL_SIZE => runs.push(TextRun::new("U", RIGHT_MARGIN, SIZE_Y, CODE_SIZE)),
                size => runs.push(TextRun::right_aligned(size, SIZE_Y, CODE_SIZE)),
            }

            runs.push(TextRun::new(
                format!("N.wt:{weight}g Pt:{PLATINUM_PURITY}"),
                LEFT_X,
                THIRD_DETAIL_Y,
                DETAIL_SIZE,
            ));
        }

        Ok(Self { runs })
    }

    /// Runs in drawing order.
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Look a run up by its exact text.
    pub fn find(&self, text: &str) -> Option<&TextRun> {
        self.runs.iter().find(|run| run.text == text)
    }
}

fn parse_weight(field: LabelField, value: &str) -> Result<Decimal, LabelError> {
    match Decimal::from_str(value) {
        Ok(weight) => Ok(weight),
        Err(_) => Err(LabelError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}
