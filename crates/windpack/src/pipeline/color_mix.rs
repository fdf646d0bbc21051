use std::sync::Arc;

use windpack_core::diagnostic::Diagnostic;
use windpack_core::types::{map_ast_nodes, AstNode};

use crate::pipeline::tables::COLOR_PROPERTIES;
use crate::pipeline::{PipelineContext, Stage};

/// Applies a candidate's opacity modifier by wrapping color-property
/// values in `color-mix()`.
#[derive(Debug)]
pub struct ColorMixStage;

impl Stage for ColorMixStage {
  fn name(&self) -> &'static str {
    "color-mix"
  }

  fn run(&self, cx: &mut PipelineContext) -> Result<(), anyhow::Error> {
    let mut dropped = Vec::new();

    for class in cx.classes.iter_mut() {
      let Some(modifier) = &class.candidate.modifier else {
        continue;
      };

      let Some(opacity) = cx.theme.resolve_opacity(modifier) else {
        dropped.push(class.candidate.raw.clone());
        continue;
      };

      if let Some(nodes) = map_ast_nodes(&class.nodes, &|node| match node.as_ref() {
        AstNode::Declaration {
          property,
          value,
          important,
        } if applies_to(property, value) => Arc::new(AstNode::Declaration {
          property: property.clone(),
          value: format!("color-mix(in oklab, {value} {opacity}, transparent)"),
          important: *important,
        }),
        _ => node.clone(),
      }) {
        class.nodes = nodes;
      }
    }

    if !dropped.is_empty() {
      cx.classes.retain(|class| !dropped.contains(&class.candidate.raw));
      for token in dropped {
        tracing::debug!(%token, "Dropping class with unresolvable opacity modifier");
        cx.diagnostics.push(Diagnostic::invalid_candidate(
          token,
          "modifier does not resolve to an opacity",
        ));
      }
    }

    Ok(())
  }
}

fn applies_to(property: &str, value: &str) -> bool {
  COLOR_PROPERTIES.contains(&property)
    && !matches!(value, "inherit" | "initial" | "unset")
    && !value.starts_with("color-mix(")
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use windpack_core::diagnostic::Diagnostics;
  use windpack_core::options::CompileOptions;
  use windpack_core::property_registry::PropertyRegistry;
  use windpack_core::theme::Theme;
  use windpack_core::types::{Candidate, CandidateKind, CandidateValue, Modifier, ProcessedClass};

  use super::*;

  fn class(modifier: Option<Modifier>) -> ProcessedClass {
    ProcessedClass::new(
      Candidate {
        raw: "bg-red-500/50".into(),
        variants: Vec::new(),
        important: false,
        modifier,
        kind: CandidateKind::Functional {
          root: "bg".into(),
          value: Some(CandidateValue::Named {
            value: "red-500".into(),
            fraction: None,
          }),
        },
      },
      vec![AstNode::style_rule(
        ".bg-red-500\\/50",
        vec![AstNode::decl("background-color", "var(--color-red-500)")],
      )],
    )
  }

  fn run(class_list: Vec<ProcessedClass>) -> Vec<ProcessedClass> {
    let theme = Theme::new();
    let options = CompileOptions::default();
    let mut cx = PipelineContext::new(
      class_list,
      PropertyRegistry::new(),
      Diagnostics::default(),
      &theme,
      &options,
    );
    ColorMixStage.run(&mut cx).unwrap();
    cx.classes
  }

  #[test]
  fn wraps_color_values_in_color_mix() {
    let classes = run(vec![class(Some(Modifier::Named("50".into())))]);

    assert_eq!(
      classes[0].nodes,
      vec![AstNode::style_rule(
        ".bg-red-500\\/50",
        vec![AstNode::decl(
          "background-color",
          "color-mix(in oklab, var(--color-red-500) 50%, transparent)"
        )],
      )]
    );
  }

  #[test]
  fn is_idempotent() {
    let once = run(vec![class(Some(Modifier::Named("50".into())))]);
    let twice = run(once.clone());

    assert_eq!(once, twice);
  }

  #[test]
  fn classes_without_modifier_are_untouched() {
    let original = class(None);
    let classes = run(vec![original.clone()]);

    assert!(Arc::ptr_eq(&classes[0].nodes[0], &original.nodes[0]));
  }

  #[test]
  fn unresolvable_modifiers_drop_the_class() {
    let classes = run(vec![class(Some(Modifier::Named("banana".into())))]);

    assert!(classes.is_empty());
  }
}
