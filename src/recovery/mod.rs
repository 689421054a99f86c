pub mod envelope;
pub mod fallback;
pub mod normalize;
pub mod parser;
pub mod policy;
pub mod sanitizer;

mod assemble;
mod model;

pub use assemble::{assemble, ResultAssembler};
pub use model::{CleanObjectEntry, Confidence, ParsedPayload, RecoveryPath, SanitizedResult};
pub use normalize::normalize;
pub use parser::recover;
pub use sanitizer::{sanitize, ObjectSanitizer};
