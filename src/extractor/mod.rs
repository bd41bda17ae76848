pub mod file_extractor;
pub mod status;

pub use file_extractor::{ExtractorState, FileExtractor, PlannedCopy};
pub use status::{ExtractionSummary, FinalStatus};
