use crate::extraction::lines::TextLine;

/// A contiguous half-open slice `[start, end)` of a document's lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub start: usize,
    pub end: usize,
}

/// Find the section introduced by `anchor` (case-insensitive substring).
///
/// The section starts on the line after the anchor and ends at the first
/// later line matching any terminator phrase, or at end-of-lines. Returns
/// `None` when the anchor is absent; callers treat that as "section not in
/// this document", never as a fatal error.
pub fn locate_section(lines: &[TextLine], anchor: &str, terminators: &[String]) -> Option<Section> {
    let anchor_idx = lines.iter().position(|l| l.contains_ci(anchor))?;
    let start = anchor_idx + 1;

    let end = lines[start..]
        .iter()
        .position(|l| terminators.iter().any(|t| l.contains_ci(t)))
        .map(|offset| start + offset)
        .unwrap_or(lines.len());

    Some(Section {
        name: anchor.to_string(),
        start,
        end,
    })
}

/// The lines belonging to a section.
pub fn section_lines<'a>(lines: &'a [TextLine], section: &Section) -> &'a [TextLine] {
    &lines[section.start..section.end]
}
