pub use compiler::{CompileResult, Compiler};
pub use sorting::{ClassSortKey, ClassSorter, DefaultSorter};

pub mod pipeline;
pub mod serialize;
pub mod variants;

mod compiler;
mod selector;
mod sorting;
