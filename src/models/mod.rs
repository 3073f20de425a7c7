pub mod loaders;
pub mod question;
pub mod question_set;
pub mod question_type;

pub use loaders::{load_question_set, save_question_set_order};
pub use question::{
    Description, NamedRef, Question, QuestionBody, QuestionStatus, QuestionSummary, Taxonomy,
};
pub use question_set::{PersistedOrder, QuestionSet, QuestionSetPurpose};
pub use question_type::QuestionType;
