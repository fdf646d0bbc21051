use std::sync::Arc;

use windpack_core::types::{map_ast_nodes, AstNode};

use crate::pipeline::tables::NEGATION_CAPABLE_PROPERTIES;
use crate::pipeline::{PipelineContext, Stage};

/// Rewrites the positive declarations of a negative-rooted candidate into
/// their negative form.
///
/// Only properties in the negation-capable set are touched; values that
/// are already negative, keywords, zero, or already multiplied by a
/// negative stay as they are so the stage never double-negates.
#[derive(Debug)]
pub struct NegativeStage;

impl Stage for NegativeStage {
  fn name(&self) -> &'static str {
    "negative"
  }

  fn run(&self, cx: &mut PipelineContext) -> Result<(), anyhow::Error> {
    for class in cx.classes.iter_mut() {
      if !class.candidate.is_negative() {
        continue;
      }

      if let Some(nodes) = map_ast_nodes(&class.nodes, &|node| match node.as_ref() {
        AstNode::Declaration {
          property,
          value,
          important,
        } if NEGATION_CAPABLE_PROPERTIES.contains(&property.as_str()) => {
          match negate_value(value) {
            Some(negated) => Arc::new(AstNode::Declaration {
              property: property.clone(),
              value: negated,
              important: *important,
            }),
            None => node.clone(),
          }
        }
        _ => node.clone(),
      }) {
        class.nodes = nodes;
      }
    }

    Ok(())
  }
}

/// The negative form of a value, or `None` when it must stay untouched.
fn negate_value(value: &str) -> Option<String> {
  let value = value.trim();

  if matches!(value, "auto" | "inherit" | "initial" | "unset" | "0") {
    return None;
  }

  if value.starts_with('-') {
    return None;
  }

  // Already multiplied by a negative factor
  if value.contains("* -") || value.contains("*-") {
    return None;
  }

  if is_bare_numeric(value) {
    return Some(format!("-{value}"));
  }

  if is_single_var(value) {
    return Some(format!("calc({value} * -1)"));
  }

  if let Some(negated) = negate_calc_multiplier(value) {
    return Some(negated);
  }

  if value.bytes().any(|byte| byte.is_ascii_digit()) {
    return Some(format!("calc({value} * -1)"));
  }

  None
}

/// `10`, `4px`, `50%`, `1.5rem`
fn is_bare_numeric(value: &str) -> bool {
  value.starts_with(|char: char| char.is_ascii_digit() || char == '.')
    && value
      .chars()
      .all(|char| char.is_ascii_alphanumeric() || char == '.' || char == '%')
}

/// Exactly one `var(...)` reference and nothing else
fn is_single_var(value: &str) -> bool {
  let Some(inner) = value.strip_prefix("var(").and_then(|rest| rest.strip_suffix(')')) else {
    return false;
  };

  // No other closing paren may terminate the reference early
  !inner.contains(')')
}

/// `calc(var(...) * N)` with `N` positive: negate `N` in place.
fn negate_calc_multiplier(value: &str) -> Option<String> {
  let inner = value.strip_prefix("calc(")?.strip_suffix(')')?;
  let (reference, factor) = inner.rsplit_once(" * ")?;

  if !reference.starts_with("var(") || !reference.ends_with(')') {
    return None;
  }

  if factor.starts_with('-') || factor.parse::<f64>().is_err() {
    return None;
  }

  Some(format!("calc({reference} * -{factor})"))
}
