pub mod entry;
pub mod error;
pub mod utils;

pub use entry::{CreateEntryRequest, Entry, HabitTag, NewEntry};
pub use error::{
    AnalysisError, AnalysisErrorKind, ErrorClassifier, JournalError, Result, ResultExt,
    ValidationError, ValidationErrorKind,
};
pub use utils::preview;
