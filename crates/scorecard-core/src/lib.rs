pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod snapshot;
pub mod store;
pub mod trend;

use config::ExtractionConfig;
use error::ScorecardError;
use extraction::PdfExtractor;
use model::MetricsSnapshot;

/// Main API entry point: extract a metrics snapshot from a scorecard PDF.
///
/// Extraction failures surface as `Err`; a PDF that extracts but yields no
/// location records surfaces as an `Ok` snapshot carrying an error marker
/// and the raw text for diagnosis.
pub fn extract_snapshot(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    config: &ExtractionConfig,
) -> Result<MetricsSnapshot, ScorecardError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    Ok(snapshot::build_snapshot(&pages, config))
}
