use windpack_core::types::AstNode;

use crate::pipeline::{PipelineContext, Stage};

/// Marks every theme variable a batch references in the shared usage
/// tracker, feeding dead-code elimination of unused theme variables
/// elsewhere. Fallback expressions are scanned too, so nested references
/// are also marked.
#[derive(Debug)]
pub struct ThemeUsageStage;

impl Stage for ThemeUsageStage {
  fn name(&self) -> &'static str {
    "theme-usage"
  }

  fn run(&self, cx: &mut PipelineContext) -> Result<(), anyhow::Error> {
    let mut names = Vec::new();

    for class in &cx.classes {
      for node in &class.nodes {
        collect(node, &mut names);
      }
    }

    for name in names {
      cx.theme_usage.mark_used(name);
    }

    Ok(())
  }
}

fn collect(node: &AstNode, names: &mut Vec<String>) {
  match node {
    AstNode::Declaration { value, .. } => collect_from_text(value, names),
    AstNode::AtRule { params, nodes, .. } => {
      collect_from_text(params, names);
      for child in nodes {
        collect(child, names);
      }
    }
    _ => {
      if let Some(nodes) = node.nodes() {
        for child in nodes {
          collect(child, names);
        }
      }
    }
  }
}

/// Every `var(--name)` occurrence, including those nested inside another
/// reference's fallback; a plain left-to-right scan visits them all.
fn collect_from_text(text: &str, names: &mut Vec<String>) {
  let mut rest = text;
  while let Some(position) = rest.find("var(") {
    let tail = &rest[position + "var(".len()..];
    let end = tail.find([',', ')']).unwrap_or(tail.len());
    let name = tail[..end].trim();

    if name.starts_with("--") {
      names.push(name.to_string());
    }

    rest = &tail[end..];
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

  #[test]
  fn marks_nested_references() {
    let class = ProcessedClass::new(
      Candidate {
        raw: "x".into(),
        variants: Vec::new(),
        important: false,
        modifier: None,
        kind: CandidateKind::Static { root: "x".into() },
      },
      vec![AstNode::style_rule(
        ".x",
        vec![AstNode::decl(
          "color",
          "var(--color-red-500, var(--color-fallback))",
        )],
      )],
    );

    let theme = Theme::new();
    let options = CompileOptions::default();
    let mut cx = PipelineContext::new(
      vec![class],
      PropertyRegistry::new(),
      Diagnostics::default(),
      &theme,
      &options,
    );
    ThemeUsageStage.run(&mut cx).unwrap();

    assert!(cx.theme_usage.is_used("--color-red-500"));
    assert!(cx.theme_usage.is_used("--color-fallback"));
    assert_eq!(cx.theme_usage.len(), 2);
  }
}
