//! Labels
//!
//! Price labels are printed on pre-cut adhesive stock. A one page PDF
//! template carries the static artwork; this module works out where each
//! line of product text goes ([`layout`]) and stamps it onto a copy of the
//! template ([`pdf`]).
//!
//! ```rust,no_run
//! use karat::labels::{LabelFields, LabelFont, LabelRenderer};
//! # fn example(template: &[u8], font: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let fields = LabelFields {
//!     name: "gold ring".into(),
//!     price: "64500.00".into(),
//!     weight: "10".into(),
//!     hsn: "12345678".into(),
//!     ..LabelFields::default()
//! };
//!
//! let renderer = LabelRenderer::new(LabelFont::true_type(font)?);
//! let pdf = renderer.render(template, &fields)?;
//! # Ok(())
//! # }
//! ```

mod errors;
mod fields;
mod font;
pub mod layout;
pub mod pdf;

pub use errors::LabelError;
pub use fields::{LabelField, LabelFields};
pub use font::{LabelFont, TrueTypeFont};
pub use layout::{LabelLayout, TextRun};
pub use pdf::LabelRenderer;

/// Render a label in one call.
///
/// `font` is the TrueType font to embed; `None` falls back to the standard
/// Helvetica Bold face.
///
/// # Errors
///
/// See [`LabelRenderer::render`].
pub fn render_label(
    template: &[u8],
    font: Option<Vec<u8>>,
    fields: &LabelFields,
) -> Result<Vec<u8>, LabelError> {
    let font = match font {
        Some(bytes) => LabelFont::true_type(bytes)?,
        None => LabelFont::Standard,
    };

    LabelRenderer::new(font).render(template, fields)
}
