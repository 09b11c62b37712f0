pub mod analysis;

pub use analysis::{AnalysisResult, AnalysisStatus, ContractSubmission};
