use crate::error::ScorecardError;
use crate::extraction::{PageContent, PdfExtractor, PositionedFragment};
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -bbox-layout` to get word-level bounding boxes, which
/// become the positioned fragments the normalizer consumes. Word yMin grows
/// downward in the XML; fragments are flipped to document space (y up) using
/// the page height.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ScorecardError> {
        // Write PDF bytes to a temp file
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| ScorecardError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| ScorecardError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-bbox-layout")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ScorecardError::PdftotextNotFound
                } else {
                    ScorecardError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ScorecardError::PdftotextFailed { code, stderr });
        }

        let xml = String::from_utf8_lossy(&output.stdout);
        Ok(parse_bbox_xml(&xml))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Parse `pdftotext -bbox-layout` XML into pages of positioned fragments.
pub fn parse_bbox_xml(xml: &str) -> Vec<PageContent> {
    let mut pages: Vec<PageContent> = Vec::new();
    let mut page_height: f32 = 0.0;

    for raw in xml.lines() {
        let line = raw.trim();

        if line.starts_with("<page ") {
            page_height = parse_attr_f32(line, "height").unwrap_or(0.0);
            pages.push(PageContent {
                page_number: pages.len() + 1,
                fragments: Vec::new(),
            });
            continue;
        }

        if line.starts_with("<word ") {
            let Some(page) = pages.last_mut() else {
                continue;
            };
            let (Some(x), Some(y_min)) =
                (parse_attr_f32(line, "xMin"), parse_attr_f32(line, "yMin"))
            else {
                continue;
            };
            if let Some(word_text) = parse_word_text(line) {
                let text = decode_xml_entities(&word_text).trim().to_string();
                if !text.is_empty() {
                    page.fragments.push(PositionedFragment {
                        text,
                        x,
                        // flip to y-up document space
                        y: page_height - y_min,
                    });
                }
            }
        }
    }

    pages
}

fn parse_attr_f32(tag: &str, name: &str) -> Option<f32> {
    parse_attr(tag, name)?.parse().ok()
}

fn parse_attr<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{}=\"", name);
    let start = tag.find(&needle)? + needle.len();
    let rest = &tag[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

fn parse_word_text(word_tag: &str) -> Option<String> {
    let start = word_tag.find('>')? + 1;
    let end = word_tag.rfind("</word>")?;
    Some(word_tag[start..end].to_string())
}

fn decode_xml_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bbox_xml_words() {
        let xml = r#"
<doc>
  <page width="612.0" height="792.0">
    <line xMin="10.0" yMin="20.0" xMax="120.0" yMax="30.0">
      <word xMin="10.0" yMin="20.0" xMax="60.0" yMax="30.0">Wichita</word>
      <word xMin="62.0" yMin="20.0" xMax="120.0" yMax="30.0">Kenworth</word>
    </line>
  </page>
</doc>
"#;
        let pages = parse_bbox_xml(xml);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].fragments.len(), 2);
        assert_eq!(pages[0].fragments[0].text, "Wichita");
        assert_eq!(pages[0].fragments[0].x, 10.0);
        // y flipped: 792 - 20 = 772
        assert_eq!(pages[0].fragments[0].y, 772.0);
    }

    #[test]
    fn test_parse_bbox_xml_entities_decoded() {
        let xml = r#"
<page width="612.0" height="792.0">
  <word xMin="1.0" yMin="2.0" xMax="3.0" yMax="4.0">R&amp;M</word>
</page>
"#;
        let pages = parse_bbox_xml(xml);
        assert_eq!(pages[0].fragments[0].text, "R&M");
    }

    #[test]
    fn test_parse_bbox_xml_multiple_pages() {
        let xml = r#"
<page width="612.0" height="792.0">
  <word xMin="1.0" yMin="2.0" xMax="3.0" yMax="4.0">one</word>
</page>
<page width="612.0" height="792.0">
  <word xMin="1.0" yMin="2.0" xMax="3.0" yMax="4.0">two</word>
</page>
"#;
        let pages = parse_bbox_xml(xml);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].page_number, 2);
        assert_eq!(pages[1].fragments[0].text, "two");
    }

    #[test]
    fn test_parse_bbox_xml_empty_input() {
        assert!(parse_bbox_xml("").is_empty());
    }
}
