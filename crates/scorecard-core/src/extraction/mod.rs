pub mod campaigns;
pub mod dealership;
pub mod lines;
pub mod locations;
pub mod pdftotext;
pub mod sections;

use crate::error::ScorecardError;

/// One atomic positioned text run from a document page.
///
/// Coordinates are in document space with `y` increasing upward, so reading
/// order is descending `y`, ascending `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedFragment {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

impl PositionedFragment {
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        PositionedFragment {
            text: text.into(),
            x,
            y,
        }
    }
}

/// Positioned fragments extracted from a single page.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    pub fragments: Vec<PositionedFragment>,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract positioned text from PDF bytes, one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ScorecardError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
