//! Label PDF rendering
//!
//! The template is loaded from bytes, the laid out text is appended to its
//! first page as a new content stream, and the document is saved to a fresh
//! buffer. The template bytes are never touched.

use lopdf::{
    Dictionary, Document, Object, ObjectId, Stream, StringFormat,
    content::{Content, Operation},
    dictionary,
};
use tracing::debug;

use crate::labels::{
    errors::LabelError,
    fields::LabelFields,
    font::{LabelFont, win_ansi},
    layout::LabelLayout,
};

/// Resource name the label font is registered under.
pub const FONT_RESOURCE: &str = "KaratLabel";

/// Width of the label stock, in points.
pub const LABEL_WIDTH: i64 = 80;

/// Height of the label stock, in points.
pub const LABEL_HEIGHT: i64 = 40;

const MAX_PAGE_TREE_DEPTH: usize = 32;

/// Stamps label text onto a template.
#[derive(Debug, Clone, Default)]
pub struct LabelRenderer {
    font: LabelFont,
}

impl LabelRenderer {
    /// Renderer drawing with `font`.
    pub fn new(font: LabelFont) -> Self {
        Self { font }
    }

    /// Lay out `fields` and draw them onto a copy of `template`.
    ///
    /// # Errors
    ///
    /// Returns a [`LabelError`] if the fields are incomplete, or the
    /// template cannot be parsed, has no pages, or cannot be saved.
    pub fn render(&self, template: &[u8], fields: &LabelFields) -> Result<Vec<u8>, LabelError> {
        let layout = LabelLayout::for_fields(fields)?;

        self.render_layout(template, &layout)
    }

    /// Draw an already computed layout onto a copy of `template`.
    ///
    /// # Errors
    ///
    /// Returns a [`LabelError`] if the template cannot be parsed, has no
    /// pages, or cannot be saved.
    pub fn render_layout(
        &self,
        template: &[u8],
        layout: &LabelLayout,
    ) -> Result<Vec<u8>, LabelError> {
        let mut doc = Document::load_mem(template)?;

        let page_id = doc
            .get_pages()
            .into_values()
            .next()
            .ok_or(LabelError::EmptyTemplate)?;

        let font_id = self.font.embed(&mut doc);

        let mut resources = inherited_dictionary(&doc, page_id, b"Resources")?;
        let mut fonts = match resources.get(b"Font") {
            Ok(Object::Dictionary(fonts)) => fonts.clone(),
            Ok(Object::Reference(id)) => doc.get_dictionary(*id)?.clone(),
            _ => Dictionary::new(),
        };

        fonts.set(FONT_RESOURCE, font_id);
        resources.set("Font", fonts);

        let existing = doc.get_page_contents(page_id);

        let save_id = add_operations(&mut doc, vec![Operation::new("q", vec![])])?;
        let restore_id = add_operations(&mut doc, vec![Operation::new("Q", vec![])])?;
        let text_id = add_operations(&mut doc, text_operations(layout))?;

        let contents: Vec<Object> = std::iter::once(save_id)
            .chain(existing)
            .chain([restore_id, text_id])
            .map(Object::Reference)
            .collect();

        let page = doc.get_object_mut(page_id)?.as_dict_mut()?;

        page.set("Resources", resources);
        page.set("Contents", contents);

        let mut output = Vec::with_capacity(template.len() + 1024);

        doc.save_to(&mut output)?;

        debug!(runs = layout.runs().len(), bytes = output.len(), "rendered label");

        Ok(output)
    }
}

/// A blank single-page template the size of the label stock.
///
/// # Errors
///
/// Returns [`LabelError::Pdf`] or [`LabelError::Io`] if the document cannot
/// be encoded.
pub fn blank_template() -> Result<Vec<u8>, LabelError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let border = Content {
        operations: vec![
            Operation::new(
                "re",
                vec![1.into(), 1.into(), (LABEL_WIDTH - 2).into(), (LABEL_HEIGHT - 2).into()],
            ),
            Operation::new("S", vec![]),
        ],
    };

    let content_id = doc.add_object(Stream::new(dictionary! {}, border.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), LABEL_WIDTH.into(), LABEL_HEIGHT.into()],
            "Resources" => dictionary! {},
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });

    doc.trailer.set("Root", catalog_id);

    let mut output = Vec::new();

    doc.save_to(&mut output)?;

    Ok(output)
}

fn text_operations(layout: &LabelLayout) -> Vec<Operation> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("rg", vec![0.into(), 0.into(), 0.into()]),
    ];

    for run in layout.runs() {
        operations.extend([
            Operation::new(
                "Tf",
                vec![Object::Name(FONT_RESOURCE.into()), Object::Real(run.size)],
            ),
            Operation::new(
                "Tm",
                vec![
                    1.into(),
                    0.into(),
                    0.into(),
                    1.into(),
                    Object::Real(run.x),
                    Object::Real(run.y),
                ],
            ),
            Operation::new(
                "Tj",
                vec![Object::String(win_ansi(&run.text), StringFormat::Literal)],
            ),
        ]);
    }

    operations.push(Operation::new("ET", vec![]));

    operations
}

fn add_operations(doc: &mut Document, operations: Vec<Operation>) -> Result<ObjectId, LabelError> {
    let content = Content { operations }.encode()?;

    Ok(doc.add_object(Stream::new(dictionary! {}, content)))
}

/// Owned copy of `key` on the page, or on the nearest ancestor that has it.
fn inherited_dictionary(
    doc: &Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Dictionary, LabelError> {
    let mut node = doc.get_dictionary(page_id)?;

    for _ in 0..MAX_PAGE_TREE_DEPTH {
        match node.get(key) {
            Ok(Object::Dictionary(found)) => return Ok(found.clone()),
            Ok(Object::Reference(id)) => return Ok(doc.get_dictionary(*id)?.clone()),
            Ok(_) => return Ok(Dictionary::new()),
            Err(_) => {}
        }

        match node.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => node = doc.get_dictionary(parent)?,
            Err(_) => break,
        }
    }

    Ok(Dictionary::new())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn fields() -> LabelFields {
        LabelFields {
            name: "gold ring".into(),
            price: "64500.00".into(),
            weight: "10".into(),
            hsn: "12345678".into(),
            collection_name: "bridal".into(),
            size: "12".into(),
            ..LabelFields::default()
        }
    }

    fn first_page(doc: &Document) -> Result<ObjectId, LabelError> {
        doc.get_pages()
            .into_values()
            .next()
            .ok_or(LabelError::EmptyTemplate)
    }

    #[test]
    fn rendering_keeps_the_template_artwork() -> TestResult {
        let template = blank_template()?;
        let output = LabelRenderer::default().render(&template, &fields())?;

        let doc = Document::load_mem(&output)?;
        let page_id = first_page(&doc)?;
        let content = Content::decode(&doc.get_page_content(page_id)?)?;

        let operators: Vec<&str> = content
            .operations
            .iter()
            .map(|op| op.operator.as_str())
            .collect();

        assert_eq!(operators.first(), Some(&"q"));
        assert!(operators.contains(&"re"));
        assert!(operators.contains(&"Tj"));

        Ok(())
    }

    #[test]
    fn font_is_registered_on_the_page() -> TestResult {
        let output = LabelRenderer::default().render(&blank_template()?, &fields())?;

        let doc = Document::load_mem(&output)?;
        let page = doc.get_dictionary(first_page(&doc)?)?;
        let fonts = page.get(b"Resources")?.as_dict()?.get(b"Font")?.as_dict()?;
        let font = doc.get_dictionary(fonts.get(FONT_RESOURCE.as_bytes())?.as_reference()?)?;

        assert_eq!(font.get(b"BaseFont")?.as_name()?, b"Helvetica-Bold");

        Ok(())
    }

    #[test]
    fn template_without_pages_is_rejected() -> TestResult {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut template = Vec::new();
        doc.save_to(&mut template)?;

        assert!(matches!(
            LabelRenderer::default().render(&template, &fields()),
            Err(LabelError::EmptyTemplate)
        ));

        Ok(())
    }

    #[test]
    fn garbage_template_is_a_pdf_error() {
        assert!(matches!(
            LabelRenderer::default().render(b"not a pdf", &fields()),
            Err(LabelError::Pdf(_))
        ));
    }

    #[test]
    fn missing_fields_are_reported_before_parsing() {
        let empty = LabelFields::default();

        assert!(matches!(
            LabelRenderer::default().render(b"not a pdf", &empty),
            Err(LabelError::MissingFields(_))
        ));
    }
}
