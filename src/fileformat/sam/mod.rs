pub mod constants;

mod alignment;
mod header;
mod mandatory;
mod optional;
mod options;
mod record;

pub use alignment::AlignmentLine;

pub use header::HeaderCommentLine;
pub use header::HeaderDataLine;
pub use header::HeaderField;
pub use header::HeaderRecordType;

pub use mandatory::MandatoryFields;
pub use mandatory::MANDATORY_COLUMNS;

pub use optional::OptionalField;
pub use optional::OptionalFields;
pub use optional::TypedValue;
pub use optional::ASSIGNMENT_STATUS_TAG;
pub use optional::NUMBER_OF_TARGET_FEATURES_TAG;
pub use optional::TARGET_FEATURES_TAG;

pub use options::AlignmentShape;
pub use options::SamParseOptions;

pub use record::LineClassifier;
pub use record::LineKind;
pub use record::SamRecord;
