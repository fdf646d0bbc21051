use std::sync::Arc;

use windpack_core::types::{map_ast_nodes, AstNode};

use crate::pipeline::{PipelineContext, Stage};

/// Propagates a candidate's important flag to every declaration reachable
/// under its AST. Nothing downstream may clear the flag again.
#[derive(Debug)]
pub struct ImportantStage;

impl Stage for ImportantStage {
  fn name(&self) -> &'static str {
    "important"
  }

  fn run(&self, cx: &mut PipelineContext) -> Result<(), anyhow::Error> {
    for class in cx.classes.iter_mut() {
      if !class.candidate.important {
        continue;
      }

      if let Some(nodes) = map_ast_nodes(&class.nodes, &|node| match node.as_ref() {
        AstNode::Declaration {
          property,
          value,
          important: false,
        } => Arc::new(AstNode::Declaration {
          property: property.clone(),
          value: value.clone(),
          important: true,
        }),
        _ => node.clone(),
      }) {
        class.nodes = nodes;
      }
    }

    Ok(())
  }
}
