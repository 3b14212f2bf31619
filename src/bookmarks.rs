//! Section outlines injected into a rendered report with `lopdf`.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::model::Section;

/// Errors raised while adding outlines to a serialized report.
#[derive(Debug)]
pub enum BookmarkError {
    /// The PDF bytes could not be parsed or written back.
    Parse(lopdf::Error),
    /// The trailer has no `/Root` catalog reference.
    MissingCatalog,
    /// The catalog object is not a dictionary.
    InvalidCatalog,
    /// A section points at a page the document does not contain.
    MissingPage {
        /// Position of the section in the report.
        section_index: usize,
        /// One-based physical page the section claims to start on.
        page_number: usize,
    },
}

impl From<lopdf::Error> for BookmarkError {
    fn from(err: lopdf::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<std::io::Error> for BookmarkError {
    fn from(err: std::io::Error) -> Self {
        Self::Parse(err.into())
    }
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "Failed to read or write report PDF: {err}"),
            Self::MissingCatalog => write!(f, "Report PDF has no document catalog"),
            Self::InvalidCatalog => write!(f, "Report PDF catalog is not a dictionary"),
            Self::MissingPage {
                section_index,
                page_number,
            } => write!(
                f,
                "Section {} starts on page {}, which the report does not contain",
                section_index, page_number
            ),
        }
    }
}

impl std::error::Error for BookmarkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::MissingCatalog | Self::InvalidCatalog | Self::MissingPage { .. } => None,
        }
    }
}

struct OutlineEntry {
    id: ObjectId,
    page: ObjectId,
    title: String,
    identifier: Option<String>,
}

/// Adds a flat outline with one `/Dest [page /Fit]` entry per section.
///
/// `section_pages` holds the one-based physical page of each section.  A report
/// without sections is returned unchanged.
pub fn apply_section_bookmarks(
    pdf_bytes: &[u8],
    sections: &[Section],
    section_pages: &[usize],
) -> Result<Vec<u8>, BookmarkError> {
    let mut document = Document::load_mem(pdf_bytes)?;
    let pages = document.get_pages();

    let entries = outline_entries(&mut document, sections, section_pages, &pages)?;
    if entries.is_empty() {
        debug!("No sections; leaving the outline untouched");
        return Ok(pdf_bytes.to_vec());
    }

    let root_id = document.new_object_id();
    for (index, entry) in entries.iter().enumerate() {
        let previous = index.checked_sub(1).map(|prev| entries[prev].id);
        let next = entries.get(index + 1).map(|next| next.id);
        let item = outline_item(entry, root_id, previous, next);
        document.objects.insert(entry.id, Object::Dictionary(item));
    }

    let mut root = Dictionary::new();
    root.set("Type", Object::Name(b"Outlines".to_vec()));
    root.set("Count", Object::Integer(entries.len() as i64));
    if let (Some(first), Some(last)) = (entries.first(), entries.last()) {
        root.set("First", Object::Reference(first.id));
        root.set("Last", Object::Reference(last.id));
    }
    document.objects.insert(root_id, Object::Dictionary(root));

    catalog_mut(&mut document)?.set("Outlines", Object::Reference(root_id));
    debug!("Added {} section bookmarks", entries.len());

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

fn outline_entries(
    document: &mut Document,
    sections: &[Section],
    section_pages: &[usize],
    pages: &BTreeMap<u32, ObjectId>,
) -> Result<Vec<OutlineEntry>, BookmarkError> {
    let mut entries = Vec::new();
    for (section_index, (section, &page_number)) in
        sections.iter().zip(section_pages).enumerate()
    {
        let page = u32::try_from(page_number)
            .ok()
            .and_then(|key| pages.get(&key))
            .copied()
            .ok_or(BookmarkError::MissingPage {
                section_index,
                page_number,
            })?;

        entries.push(OutlineEntry {
            id: document.new_object_id(),
            page,
            title: section.title().to_owned(),
            identifier: section.identifier().map(str::to_owned),
        });
    }
    Ok(entries)
}

fn outline_item(
    entry: &OutlineEntry,
    parent: ObjectId,
    previous: Option<ObjectId>,
    next: Option<ObjectId>,
) -> Dictionary {
    let mut item = Dictionary::new();
    item.set("Title", Object::string_literal(entry.title.as_str()));
    item.set("Parent", Object::Reference(parent));
    item.set(
        "Dest",
        Object::Array(vec![
            Object::Reference(entry.page),
            Object::Name(b"Fit".to_vec()),
        ]),
    );
    if let Some(identifier) = &entry.identifier {
        item.set("NM", Object::string_literal(identifier.as_str()));
    }
    if let Some(previous) = previous {
        item.set("Prev", Object::Reference(previous));
    }
    if let Some(next) = next {
        item.set("Next", Object::Reference(next));
    }
    item
}

fn catalog_mut(document: &mut Document) -> Result<&mut Dictionary, BookmarkError> {
    let catalog_id = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| BookmarkError::MissingCatalog)?;

    document
        .objects
        .get_mut(&catalog_id)
        .ok_or(BookmarkError::MissingCatalog)?
        .as_dict_mut()
        .map_err(|_| BookmarkError::InvalidCatalog)
}

#[cfg(test)]
mod tests {
    use super::{apply_section_bookmarks, BookmarkError};
    use crate::builder::ReportBuilder;
    use crate::model::{ReportMetadata, Section};
    use chrono::NaiveDate;
    use lopdf::{Document, Object};

    fn sections() -> Vec<Section> {
        vec![
            Section::new("Overview").with_identifier(Some("overview".to_owned())),
            Section::new("Branches"),
        ]
    }

    fn rendered() -> Vec<u8> {
        let generated_at = NaiveDate::from_ymd_opt(2024, 2, 1)
            .and_then(|date| date.and_hms_opt(8, 0, 0))
            .expect("valid timestamp");
        ReportBuilder::new(ReportMetadata::new("Outline test", generated_at))
            .with_sections(sections())
            .render()
            .expect("render report")
            .bytes
    }

    #[test]
    fn adds_one_entry_per_section() {
        let bytes = apply_section_bookmarks(&rendered(), &sections(), &[2, 3])
            .expect("bookmarks");
        let document = Document::load_mem(&bytes).expect("reload");

        let outlines = document
            .catalog()
            .and_then(|catalog| catalog.get(b"Outlines"))
            .and_then(Object::as_reference)
            .and_then(|id| document.get_dictionary(id))
            .expect("outline root");
        assert_eq!(
            outlines.get(b"Count").and_then(Object::as_i64).expect("count"),
            2
        );
    }

    #[test]
    fn reports_without_sections_are_returned_unchanged() {
        let generated_at = NaiveDate::from_ymd_opt(2024, 2, 1)
            .and_then(|date| date.and_hms_opt(8, 0, 0))
            .expect("valid timestamp");
        let bytes = ReportBuilder::new(ReportMetadata::new("Cover only", generated_at))
            .render()
            .expect("render cover")
            .bytes;
        let result = apply_section_bookmarks(&bytes, &[], &[]).expect("no entries");
        assert_eq!(result, bytes);
    }

    #[test]
    fn rejects_pages_outside_the_document() {
        let err = apply_section_bookmarks(&rendered(), &sections(), &[2, 9])
            .expect_err("page 9 does not exist");
        assert!(matches!(
            err,
            BookmarkError::MissingPage {
                section_index: 1,
                page_number: 9
            }
        ));
    }
}
