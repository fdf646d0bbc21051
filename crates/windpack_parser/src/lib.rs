pub use error::ParseError;
pub use extract::{extract_class_tokens, strip_important};
pub use parse::parse_candidate;

pub mod candidate_value;
pub mod cursor;
pub mod decode;
pub mod matcher;
pub mod modifier;
pub mod value_ast;
pub mod variants;

mod error;
mod extract;
mod parse;
