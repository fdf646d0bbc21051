use std::sync::Arc;

use windpack_core::plugin::{CompileContext, UtilityPlugin};
use windpack_core::registry::UtilityRegistry;
use windpack_core::types::{AstNode, Candidate};

use crate::value::{functional_value, resolve_spacing};

/// Margin, padding, inset and gap utilities share one shape: resolve the
/// value against the spacing scale and emit it under one or more
/// properties. Negative forms are compiled positive here; the pipeline's
/// negation stage rewrites the declarations.
#[derive(Debug)]
pub struct SpacingUtility {
  properties: &'static [&'static str],
  negative: bool,
}

impl UtilityPlugin for SpacingUtility {
  fn compile(
    &self,
    candidate: &Candidate,
    _ctx: &mut CompileContext,
  ) -> Result<Option<Vec<Arc<AstNode>>>, anyhow::Error> {
    if candidate.modifier.is_some() {
      return Ok(None);
    }

    let Some(value) = functional_value(candidate) else {
      return Ok(None);
    };
    let Some(resolved) = resolve_spacing(value) else {
      return Ok(None);
    };

    Ok(Some(
      self
        .properties
        .iter()
        .map(|property| AstNode::decl(*property, resolved.clone()))
        .collect(),
    ))
  }

  fn supports_negative(&self) -> bool {
    self.negative
  }
}

/// `space-x` / `space-y` target the gaps between children rather than the
/// element itself.
#[derive(Debug)]
pub struct SpaceBetweenUtility {
  property: &'static str,
}

impl UtilityPlugin for SpaceBetweenUtility {
  fn compile(
    &self,
    candidate: &Candidate,
    _ctx: &mut CompileContext,
  ) -> Result<Option<Vec<Arc<AstNode>>>, anyhow::Error> {
    if candidate.modifier.is_some() {
      return Ok(None);
    }

    let Some(value) = functional_value(candidate) else {
      return Ok(None);
    };
    let Some(resolved) = resolve_spacing(value) else {
      return Ok(None);
    };

    Ok(Some(vec![Arc::new(AstNode::NestedRule {
      selector: ":where(& > :not(:last-child))".to_string(),
      nodes: vec![AstNode::decl(self.property, resolved)],
    })]))
  }

  fn supports_negative(&self) -> bool {
    true
  }
}

#[rustfmt::skip]
const SPACING_UTILITIES: &[(&str, &[&str], bool)] = &[
  ("m", &["margin"], true),
  ("mx", &["margin-inline"], true),
  ("my", &["margin-block"], true),
  ("mt", &["margin-top"], true),
  ("mr", &["margin-right"], true),
  ("mb", &["margin-bottom"], true),
  ("ml", &["margin-left"], true),
  ("p", &["padding"], false),
  ("px", &["padding-inline"], false),
  ("py", &["padding-block"], false),
  ("pt", &["padding-top"], false),
  ("pr", &["padding-right"], false),
  ("pb", &["padding-bottom"], false),
  ("pl", &["padding-left"], false),
  ("gap", &["gap"], false),
  ("gap-x", &["column-gap"], false),
  ("gap-y", &["row-gap"], false),
  ("inset", &["inset"], true),
  ("inset-x", &["inset-inline"], true),
  ("inset-y", &["inset-block"], true),
  ("top", &["top"], true),
  ("right", &["right"], true),
  ("bottom", &["bottom"], true),
  ("left", &["left"], true),
];

pub fn register(registry: &mut UtilityRegistry) {
  for &(root, properties, negative) in SPACING_UTILITIES {
    registry.register_functional(root, Arc::new(SpacingUtility { properties, negative }));
  }

  registry.register_functional(
    "space-x",
    Arc::new(SpaceBetweenUtility {
      property: "margin-inline-start",
    }),
  );
  registry.register_functional(
    "space-y",
    Arc::new(SpaceBetweenUtility {
      property: "margin-block-start",
    }),
  );
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use windpack_core::property_registry::PropertyRegistry;
  use windpack_core::theme::Theme;
  use windpack_core::types::{CandidateKind, CandidateValue};

  use super::*;

  fn compile(plugin: &dyn UtilityPlugin, root: &str, value: &str) -> Option<Vec<Arc<AstNode>>> {
    let theme = Theme::new();
    let mut properties = PropertyRegistry::new();
    let mut ctx = CompileContext {
      theme: &theme,
      property_registry: &mut properties,
    };

    let candidate = Candidate {
      raw: format!("{root}-{value}"),
      variants: Vec::new(),
      important: false,
      modifier: None,
      kind: CandidateKind::Functional {
        root: root.to_string(),
        value: Some(CandidateValue::Named {
          value: value.to_string(),
          fraction: None,
        }),
      },
    };

    plugin.compile(&candidate, &mut ctx).unwrap()
  }

  #[test]
  fn margin_scales_the_spacing_token() {
    let plugin = SpacingUtility {
      properties: &["margin-top"],
      negative: true,
    };

    assert_eq!(
      compile(&plugin, "mt", "4"),
      Some(vec![AstNode::decl("margin-top", "calc(var(--spacing) * 4)")])
    );
  }

  #[test]
  fn unresolvable_values_decline() {
    let plugin = SpacingUtility {
      properties: &["margin"],
      negative: true,
    };

    assert_eq!(compile(&plugin, "m", "banana"), None);
  }

  #[test]
  fn space_between_targets_children() {
    let plugin = SpaceBetweenUtility {
      property: "margin-inline-start",
    };

    assert_eq!(
      compile(&plugin, "space-x", "2"),
      Some(vec![Arc::new(AstNode::NestedRule {
        selector: ":where(& > :not(:last-child))".to_string(),
        nodes: vec![AstNode::decl(
          "margin-inline-start",
          "calc(var(--spacing) * 2)"
        )],
      })])
    );
  }
}
