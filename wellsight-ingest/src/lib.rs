pub mod error;
pub mod loader;
pub mod records;

pub use error::IngestError;
pub use records::{DatasetBundle, HappinessRecord, StressLevel, SurveyRecord, WorklifeRecord};
