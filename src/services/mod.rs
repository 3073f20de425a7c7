pub mod question_lookup;

pub use question_lookup::{HttpQuestionLookup, LookupPage, LookupQuery, QuestionLookup};
