use std::sync::Arc;

use crate::pipeline::{PipelineContext, Stage};
use crate::sorting::ClassSorter;

/// Stable-sorts the batch by the canonical class order, then assembles the
/// top-level node list the restructuring stages work on. Registered
/// `@property` definitions are appended after the utility output.
pub struct SortStage {
  sorter: Arc<dyn ClassSorter>,
}

impl SortStage {
  pub fn new(sorter: Arc<dyn ClassSorter>) -> Self {
    SortStage { sorter }
  }
}

impl std::fmt::Debug for SortStage {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SortStage").finish()
  }
}

impl Stage for SortStage {
  fn name(&self) -> &'static str {
    "sort"
  }

  fn run(&self, cx: &mut PipelineContext) -> Result<(), anyhow::Error> {
    let theme = cx.theme;
    cx.classes
      .sort_by_key(|class| self.sorter.key(class, theme));

    let mut nodes: Vec<Arc<windpack_core::types::AstNode>> = Vec::new();
    for class in &cx.classes {
      nodes.extend(class.nodes.iter().cloned());
    }

    nodes.extend(cx.property_registry.to_ast());

    cx.nodes = nodes;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use windpack_core::diagnostic::Diagnostics;
  use windpack_core::options::CompileOptions;
  use windpack_core::property_registry::PropertyRegistry;
  use windpack_core::theme::Theme;
  use windpack_core::types::{AstNode, Candidate, CandidateKind, ProcessedClass};

  use super::*;
  use crate::sorting::DefaultSorter;

  fn class(name: &str, variants: &[&str]) -> ProcessedClass {
    ProcessedClass::new(
      Candidate {
        raw: name.to_string(),
        variants: variants.iter().map(|v| v.to_string()).collect(),
        important: false,
        modifier: None,
        kind: CandidateKind::Static { root: name.to_string() },
      },
      vec![AstNode::style_rule(format!(".{name}"), vec![AstNode::decl("display", "flex")])],
    )
  }

  #[test]
  fn responsive_classes_sort_after_plain_ones() {
    let theme = {
      let mut theme = Theme::new();
      theme.insert("--breakpoint-md", "768px");
      theme
    };
    let options = CompileOptions::default();
    let mut cx = PipelineContext::new(
      vec![class("b", &["md"]), class("a", &[]), class("c", &[])],
      PropertyRegistry::new(),
      Diagnostics::default(),
      &theme,
      &options,
    );

    let stage = SortStage::new(Arc::new(DefaultSorter));
    stage.run(&mut cx).unwrap();

    let order: Vec<&str> = cx
      .classes
      .iter()
      .map(|class| class.candidate.raw.as_str())
      .collect();
    // Stable: `a` and `c` keep their relative input order
    assert_eq!(order, vec!["a", "c", "b"]);
    assert_eq!(cx.nodes.len(), 3);
  }

  #[test]
  fn is_idempotent() {
    let theme = Theme::new();
    let options = CompileOptions::default();
    let mut cx = PipelineContext::new(
      vec![class("a", &[]), class("b", &["hover"])],
      PropertyRegistry::new(),
      Diagnostics::default(),
      &theme,
      &options,
    );

    let stage = SortStage::new(Arc::new(DefaultSorter));
    stage.run(&mut cx).unwrap();
    let once = cx.nodes.clone();
    stage.run(&mut cx).unwrap();

    assert_eq!(once, cx.nodes);
  }
}
