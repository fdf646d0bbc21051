use std::sync::Arc;

use crate::types::{AstNode, Candidate};

/// A candidate paired with its compiled AST.
///
/// Pipeline stages index the batch by position and replace `nodes` by whole
/// subtree substitution; the candidate itself stays immutable.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessedClass {
  pub candidate: Candidate,
  pub nodes: Vec<Arc<AstNode>>,
}

impl ProcessedClass {
  pub fn new(candidate: Candidate, nodes: Vec<Arc<AstNode>>) -> Self {
    ProcessedClass { candidate, nodes }
  }
}
