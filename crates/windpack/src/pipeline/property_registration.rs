use indexmap::IndexSet;
use windpack_core::types::AstNode;

use crate::pipeline::tables::{is_gradient_variable, GRADIENT_FAMILY, KNOWN_PROPERTIES};
use crate::pipeline::{PipelineContext, Stage};

/// Registers `@property` definitions for every `--tw-*` custom property a
/// class defines or references. Referencing any gradient-family variable
/// registers the entire family, since gradient composition always emits
/// all stops together.
#[derive(Debug)]
pub struct PropertyRegistrationStage;

impl Stage for PropertyRegistrationStage {
  fn name(&self) -> &'static str {
    "property-registration"
  }

  fn run(&self, cx: &mut PipelineContext) -> Result<(), anyhow::Error> {
    let mut referenced = IndexSet::new();

    for class in &cx.classes {
      for node in &class.nodes {
        collect_references(node, &mut referenced);
      }
    }

    for name in referenced {
      if is_gradient_variable(&name) {
        for member in GRADIENT_FAMILY {
          register(cx, member);
        }
      } else {
        register(cx, &name);
      }
    }

    Ok(())
  }
}

fn register(cx: &mut PipelineContext, name: &str) {
  let Some(definition) = KNOWN_PROPERTIES.get(name) else {
    return;
  };

  cx.property_registry.register(
    name,
    definition.syntax,
    definition.inherits,
    definition.initial_value.map(str::to_string),
  );
}

fn collect_references(node: &AstNode, referenced: &mut IndexSet<String>) {
  match node {
    AstNode::Declaration { property, value, .. } => {
      if property.starts_with("--tw-") {
        referenced.insert(property.clone());
      }
      collect_value_references(value, referenced);
    }
    _ => {
      if let Some(nodes) = node.nodes() {
        for child in nodes {
          collect_references(child, referenced);
        }
      }
    }
  }
}

fn collect_value_references(value: &str, referenced: &mut IndexSet<String>) {
  let mut rest = value;
  while let Some(position) = rest.find("var(--tw-") {
    let name_start = position + "var(".len();
    let tail = &rest[name_start..];
    let end = tail
      .find([',', ')'])
      .unwrap_or(tail.len());

    referenced.insert(tail[..end].trim().to_string());
    rest = &tail[end..];
  }
}

#[cfg(test)]
mod tests {
  use windpack_core::diagnostic::Diagnostics;
  use windpack_core::options::CompileOptions;
  use windpack_core::property_registry::PropertyRegistry;
  use windpack_core::theme::Theme;
  use windpack_core::types::{Candidate, CandidateKind, ProcessedClass};

  use super::*;

  fn class(nodes: Vec<std::sync::Arc<AstNode>>) -> ProcessedClass {
    ProcessedClass::new(
      Candidate {
        raw: "x".into(),
        variants: Vec::new(),
        important: false,
        modifier: None,
        kind: CandidateKind::Static { root: "x".into() },
      },
      nodes,
    )
  }

  fn run(classes: Vec<ProcessedClass>) -> PropertyRegistry {
    let theme = Theme::new();
    let options = CompileOptions::default();
    let mut cx = PipelineContext::new(
      classes,
      PropertyRegistry::new(),
      Diagnostics::default(),
      &theme,
      &options,
    );
    PropertyRegistrationStage.run(&mut cx).unwrap();
    cx.property_registry
  }

  #[test]
  fn registers_defined_and_referenced_properties() {
    let registry = run(vec![class(vec![AstNode::style_rule(
      ".x",
      vec![
        AstNode::decl("--tw-translate-x", "1rem"),
        AstNode::decl("translate", "var(--tw-translate-x) var(--tw-translate-y)"),
      ],
    )])]);

    assert!(registry.is_registered("--tw-translate-x"));
    assert!(registry.is_registered("--tw-translate-y"));
  }

  #[test]
  fn any_gradient_reference_registers_the_whole_family() {
    let registry = run(vec![class(vec![AstNode::style_rule(
      ".x",
      vec![AstNode::decl("--tw-gradient-from", "#fff")],
    )])]);

    for member in GRADIENT_FAMILY {
      assert!(registry.is_registered(member), "{member} not registered");
    }
  }

  #[test]
  fn unknown_tw_variables_are_ignored() {
    let registry = run(vec![class(vec![AstNode::style_rule(
      ".x",
      vec![AstNode::decl("outline", "var(--tw-mystery)")],
    )])]);

    assert!(!registry.is_registered("--tw-mystery"));
  }
}
