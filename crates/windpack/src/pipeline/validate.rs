use std::sync::Arc;

use windpack_core::diagnostic::Diagnostic;
use windpack_core::types::AstNode;

use crate::pipeline::{PipelineContext, Stage};

/// Permissive value validation: anything plausible passes, the browser
/// rejects the rest. Only structurally hopeless declarations (empty names,
/// values that would break out of their block) drop the class.
#[derive(Debug)]
pub struct ValidateStage;

impl Stage for ValidateStage {
  fn name(&self) -> &'static str {
    "validate"
  }

  fn run(&self, cx: &mut PipelineContext) -> Result<(), anyhow::Error> {
    let mut dropped = Vec::new();

    cx.classes.retain(|class| {
      let valid = class.nodes.iter().all(|node| subtree_is_valid(node));
      if !valid {
        dropped.push(Diagnostic::invalid_candidate(
          class.candidate.raw.clone(),
          "produced an invalid declaration",
        ));
      }
      valid
    });

    for diagnostic in dropped {
      tracing::debug!(token = %diagnostic.token, "Dropping class with invalid declarations");
      cx.diagnostics.push(diagnostic);
    }

    Ok(())
  }
}

fn subtree_is_valid(node: &Arc<AstNode>) -> bool {
  match node.as_ref() {
    AstNode::Declaration { property, value, .. } => {
      !property.is_empty()
        && !value.is_empty()
        && !value.contains(';')
        && !value.contains('}')
        && !property.contains(|char: char| char.is_whitespace())
    }
    _ => node
      .nodes()
      .map_or(true, |nodes| nodes.iter().all(subtree_is_valid)),
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use windpack_core::diagnostic::Diagnostics;
  use windpack_core::options::CompileOptions;
  use windpack_core::property_registry::PropertyRegistry;
  use windpack_core::theme::Theme;
  use windpack_core::types::{Candidate, CandidateKind, ProcessedClass};

  use super::*;

  fn class(property: &str, value: &str) -> ProcessedClass {
    ProcessedClass::new(
      Candidate {
        raw: "x".into(),
        variants: Vec::new(),
        important: false,
        modifier: None,
        kind: CandidateKind::Static { root: "x".into() },
      },
      vec![AstNode::style_rule(".x", vec![AstNode::decl(property, value)])],
    )
  }

  #[test]
  fn drops_classes_with_block_breaking_values() {
    let theme = Theme::new();
    let options = CompileOptions::default();
    let mut cx = PipelineContext::new(
      vec![class("color", "red"), class("color", "red; } .evil {")],
      PropertyRegistry::new(),
      Diagnostics::default(),
      &theme,
      &options,
    );

    ValidateStage.run(&mut cx).unwrap();

    assert_eq!(cx.classes.len(), 1);
    assert_eq!(cx.diagnostics.as_ref().len(), 1);
  }
}
