use crate::extraction::PositionedFragment;
use std::cmp::Ordering;

/// Vertical tolerance (document units) for grouping fragments into one line.
pub const LINE_Y_TOLERANCE: f32 = 5.0;

/// An ordered group of fragments sharing a visual row.
#[derive(Debug, Clone)]
pub struct TextLine {
    /// Reference y of the line (the first fragment's y).
    pub y: f32,
    pub fragments: Vec<PositionedFragment>,
}

impl TextLine {
    /// Space-joined text of the line's fragments in x order.
    pub fn text(&self) -> String {
        let parts: Vec<&str> = self.fragments.iter().map(|f| f.text.as_str()).collect();
        parts.join(" ")
    }

    pub fn contains_ci(&self, needle: &str) -> bool {
        self.text().to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Group a page's fragments into reading-order lines.
///
/// Fragments are stably sorted by descending y then ascending x
/// (top-to-bottom, left-to-right), then a new line starts whenever a
/// fragment's y differs from the running line's reference y by more than
/// [`LINE_Y_TOLERANCE`]. Within each line, fragments end up in ascending x.
pub fn assemble_lines(fragments: &[PositionedFragment]) -> Vec<TextLine> {
    let mut sorted: Vec<PositionedFragment> = fragments.to_vec();
    sorted.sort_by(|a, b| {
        match b.y.partial_cmp(&a.y).unwrap_or(Ordering::Equal) {
            Ordering::Equal => a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal),
            other => other,
        }
    });

    let mut lines: Vec<TextLine> = Vec::new();
    for fragment in sorted {
        match lines.last_mut() {
            Some(line) if (line.y - fragment.y).abs() <= LINE_Y_TOLERANCE => {
                line.fragments.push(fragment);
            }
            _ => lines.push(TextLine {
                y: fragment.y,
                fragments: vec![fragment],
            }),
        }
    }

    // Fragments within the tolerance band can arrive slightly y-jittered, so
    // restore strict x order per line.
    for line in &mut lines {
        line.fragments
            .sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
    }

    lines
}
