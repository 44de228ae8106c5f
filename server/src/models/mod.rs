pub mod link_preview;
pub mod resume;

pub use link_preview::MetadataRecord;
pub use resume::{ResumeConfig, ResumeConfigError};
