pub mod toml_loader;

pub use toml_loader::{load_question_set, save_question_set_order};
