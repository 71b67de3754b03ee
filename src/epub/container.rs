//! EPUB container access.
//!
//! An EPUB is a ZIP archive. `META-INF/container.xml` names the OPF package
//! document, whose `<manifest>` lists every resource of the book with its
//! media type. Content documents are the manifest items with an XHTML or
//! HTML media type; they are returned in manifest order.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::debug;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;

use crate::error::{ChapterFreqError, Result};

/// Location of the container descriptor inside every EPUB.
pub const CONTAINER_PATH: &str = "META-INF/container.xml";

/// Media types treated as content documents.
pub const DOCUMENT_MEDIA_TYPES: &[&str] = &["application/xhtml+xml", "text/html"];

/// One `<item>` of the OPF manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    /// The item's `id` attribute.
    pub id: String,
    /// The item's `href`, relative to the package document.
    pub href: String,
    /// The item's `media-type` attribute.
    pub media_type: String,
    /// Path of the item inside the ZIP archive.
    pub archive_path: String,
}

impl ManifestItem {
    /// Whether this item is a content document (as opposed to a stylesheet,
    /// image, font or navigation control file).
    pub fn is_document(&self) -> bool {
        DOCUMENT_MEDIA_TYPES
            .iter()
            .any(|m| self.media_type.eq_ignore_ascii_case(m))
    }
}

/// An opened EPUB archive with its parsed manifest.
pub struct EpubContainer<R: Read + Seek> {
    archive: ZipArchive<R>,
    manifest: Vec<ManifestItem>,
}

impl EpubContainer<BufReader<File>> {
    /// Open the EPUB at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> EpubContainer<R> {
    /// Read an EPUB from any seekable reader.
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let container_xml = read_entry_string(&mut archive, CONTAINER_PATH)?;
        let package_path = parse_rootfile_path(&container_xml)?;
        debug!("Package document at {package_path}");

        let package_xml = read_entry_string(&mut archive, &package_path)?;
        let manifest = parse_manifest(&package_xml, &package_path)?;
        debug!("Manifest lists {} items", manifest.len());

        Ok(EpubContainer { archive, manifest })
    }

    /// Content documents, in manifest order.
    pub fn documents(&self) -> impl Iterator<Item = &ManifestItem> {
        self.manifest.iter().filter(|item| item.is_document())
    }

    /// Read the raw bytes of a manifest item.
    pub fn read_part(&mut self, item: &ManifestItem) -> Result<Vec<u8>> {
        let mut entry = self.archive.by_name(&item.archive_path).map_err(|e| {
            ChapterFreqError::container(format!("cannot read '{}': {e}", item.archive_path))
        })?;
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

fn read_entry_string<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| ChapterFreqError::container(format!("cannot find {name}: {e}")))?;
    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .map_err(|e| ChapterFreqError::container(format!("cannot read {name}: {e}")))?;
    Ok(content)
}

/// Extract the `full-path` of the first `<rootfile>` in container.xml.
fn parse_rootfile_path(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"rootfile" => {
                if let Some(path) = attribute(&e, b"full-path")? {
                    return Ok(path);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ChapterFreqError::container(format!(
                    "invalid {CONTAINER_PATH} at position {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
    }

    Err(ChapterFreqError::container(format!(
        "{CONTAINER_PATH} names no rootfile"
    )))
}

/// Parse the `<manifest>` of an OPF package document.
fn parse_manifest(xml: &str, package_path: &str) -> Result<Vec<ManifestItem>> {
    let base_dir = package_path
        .rsplit_once('/')
        .map(|(dir, _)| dir)
        .unwrap_or("");

    let mut reader = Reader::from_str(xml);
    let mut items = Vec::new();
    let mut in_manifest = false;
    let mut saw_manifest = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"manifest" => {
                in_manifest = true;
                saw_manifest = true;
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"manifest" => in_manifest = false,
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if in_manifest && e.local_name().as_ref() == b"item" =>
            {
                let href = attribute(&e, b"href")?;
                let media_type = attribute(&e, b"media-type")?;
                let (Some(href), Some(media_type)) = (href, media_type) else {
                    debug!("Ignoring manifest item without href or media-type");
                    continue;
                };
                let id = attribute(&e, b"id")?.unwrap_or_default();
                let archive_path = resolve_href(base_dir, &href);
                items.push(ManifestItem {
                    id,
                    href,
                    media_type,
                    archive_path,
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ChapterFreqError::container(format!(
                    "invalid package document {package_path} at position {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
    }

    if !saw_manifest {
        return Err(ChapterFreqError::container(format!(
            "package document {package_path} has no manifest"
        )));
    }

    Ok(items)
}

/// Look up an attribute by local name and return its unescaped value.
fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| ChapterFreqError::container(format!("bad attribute: {e}")))?;
        if attr.key.local_name().as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|e| ChapterFreqError::container(format!("bad attribute value: {e}")))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Resolve a manifest `href` against the package document's directory.
///
/// Percent-encoding is decoded, fragments are dropped and `.`/`..` segments
/// are collapsed so the result matches the ZIP entry name.
pub fn resolve_href(base_dir: &str, href: &str) -> String {
    let href = href.split('#').next().unwrap_or_default();
    let decoded = urlencoding::decode(href)
        .map(|d| d.into_owned())
        .unwrap_or_else(|_| href.to_string());

    let mut segments: Vec<&str> = if decoded.starts_with('/') {
        Vec::new()
    } else {
        base_dir.split('/').filter(|s| !s.is_empty()).collect()
    };

    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    segments.join("/")
}
