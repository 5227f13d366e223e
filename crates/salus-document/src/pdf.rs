//! PDF text-layer and embedded-image extraction via `lopdf`.

use std::path::{Path, PathBuf};

use lopdf::{Document, Object};
use tracing::debug;

use crate::error::DocumentError;

/// Extract the text layer of every page, in page order, each page's text
/// followed by a newline.
pub fn extract_text(pdf_path: &Path) -> Result<String, DocumentError> {
    let doc = Document::load(pdf_path).map_err(|e| DocumentError::Pdf(e.to_string()))?;

    let mut text = String::new();
    for page_number in doc.get_pages().keys() {
        let page_text = doc
            .extract_text(&[*page_number])
            .map_err(|e| DocumentError::Pdf(format!("page {}: {}", page_number, e)))?;
        text.push_str(page_text.trim_end_matches('\n'));
        text.push('\n');
    }
    Ok(text)
}

/// Write every embedded page image to `output_dir` as
/// `page_<n>_img_<m>.png`, returning the written paths in page order.
///
/// Independent of text extraction; pages without image XObjects simply
/// contribute nothing.
pub fn extract_images(pdf_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, DocumentError> {
    let doc = Document::load(pdf_path).map_err(|e| DocumentError::Pdf(e.to_string()))?;
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    for (page_number, page_id) in doc.get_pages() {
        let page_dict = match doc.get_object(page_id).and_then(|o| o.as_dict()) {
            Ok(dict) => dict,
            Err(_) => continue,
        };
        let resources = match page_dict.get(b"Resources").map(|r| resolve(&doc, r)) {
            Ok(r) => r,
            Err(_) => continue,
        };
        let Ok(resources) = resources.as_dict() else {
            continue;
        };
        let xobjects = match resources.get(b"XObject").map(|x| resolve(&doc, x)) {
            Ok(x) => x,
            Err(_) => continue,
        };
        let Ok(xobjects) = xobjects.as_dict() else {
            continue;
        };

        let mut image_index = 0usize;
        for (_name, entry) in xobjects.iter() {
            let Ok(stream) = resolve(&doc, entry).as_stream() else {
                continue;
            };
            let is_image = stream
                .dict
                .get(b"Subtype")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| n == b"Image")
                .unwrap_or(false);
            if !is_image {
                continue;
            }

            image_index += 1;
            let path = output_dir.join(format!("page_{}_img_{}.png", page_number, image_index));
            std::fs::write(&path, &stream.content)?;
            written.push(path);
        }
    }

    debug!(count = written.len(), "Extracted PDF images");
    Ok(written)
}

/// Follow one level of indirection if the object is a reference.
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};
    use std::path::Path;

    /// Build a PDF with one text page per entry of `pages`, optionally
    /// embedding a tiny grayscale image on every page.
    pub fn write_pdf(path: &Path, pages: &[&str], with_image: bool) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut resources = dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        };
        if with_image {
            let image_id = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => 1,
                    "Height" => 1,
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                },
                vec![0x7f],
            ));
            resources.set("XObject", dictionary! { "Im1" => image_id });
        }
        let resources_id = doc.add_object(resources);

        let mut kids = Vec::new();
        for page_text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*page_text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::write_pdf;
    use super::*;

    #[test]
    fn test_extract_text_concatenates_pages_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        write_pdf(&path, &["Alpha page", "Beta page"], false);

        let text = extract_text(&path).unwrap();
        let alpha = text.find("Alpha page").unwrap();
        let beta = text.find("Beta page").unwrap();
        assert!(alpha < beta);
    }

    #[test]
    fn test_extract_text_newline_after_each_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        write_pdf(&path, &["One", "Two"], false);

        let text = extract_text(&path).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.matches('\n').count(), 2);
    }

    #[test]
    fn test_extract_text_missing_file_errors() {
        let err = extract_text(Path::new("/no/such/file.pdf")).unwrap_err();
        assert!(matches!(err, DocumentError::Pdf(_)));
    }

    #[test]
    fn test_extract_images_writes_named_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.pdf");
        write_pdf(&path, &["Scanned"], true);

        let out_dir = dir.path().join("images");
        let written = extract_images(&path, &out_dir).unwrap();
        assert_eq!(written.len(), 1);
        assert!(written[0].ends_with("page_1_img_1.png"));
        assert!(written[0].exists());
    }

    #[test]
    fn test_extract_images_none_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.pdf");
        write_pdf(&path, &["Nothing embedded"], false);

        let out_dir = dir.path().join("images");
        let written = extract_images(&path, &out_dir).unwrap();
        assert!(written.is_empty());
        assert!(out_dir.exists()); // directory is still created
    }
}
