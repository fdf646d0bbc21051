use std::sync::Arc;

use windpack_core::plugin::{CompileContext, UtilityPlugin};
use windpack_core::registry::UtilityRegistry;
use windpack_core::types::{AstNode, Candidate, CandidateValue};

use crate::value::{functional_value, fraction_percentage, is_plain_number};

#[derive(Debug)]
pub struct SizingUtility {
  property: &'static str,
  /// The viewport unit backing the `screen` keyword for this axis
  screen: &'static str,
}

impl SizingUtility {
  fn resolve(&self, value: &CandidateValue) -> Option<String> {
    match value {
      CandidateValue::Arbitrary { value } => Some(value.clone()),
      CandidateValue::Named { value, fraction } => {
        if let Some(fraction) = fraction {
          return Some(fraction_percentage(fraction));
        }

        match value.as_str() {
          "auto" => Some("auto".to_string()),
          "full" => Some("100%".to_string()),
          "screen" => Some(format!("100{}", self.screen)),
          "min" => Some("min-content".to_string()),
          "max" => Some("max-content".to_string()),
          "fit" => Some("fit-content".to_string()),
          "px" => Some("1px".to_string()),
          _ if is_plain_number(value) => Some(format!("calc(var(--spacing) * {value})")),
          _ => None,
        }
      }
    }
  }
}

impl UtilityPlugin for SizingUtility {
  fn compile(
    &self,
    candidate: &Candidate,
    _ctx: &mut CompileContext,
  ) -> Result<Option<Vec<Arc<AstNode>>>, anyhow::Error> {
    if candidate.modifier.is_some() {
      return Ok(None);
    }

    let Some(resolved) = functional_value(candidate).and_then(|value| self.resolve(value)) else {
      return Ok(None);
    };

    Ok(Some(vec![AstNode::decl(self.property, resolved)]))
  }
}

#[rustfmt::skip]
const SIZING_UTILITIES: &[(&str, &str, &str)] = &[
  ("w", "width", "vw"),
  ("h", "height", "vh"),
  ("min-w", "min-width", "vw"),
  ("min-h", "min-height", "vh"),
  ("max-w", "max-width", "vw"),
  ("max-h", "max-height", "vh"),
];

pub fn register(registry: &mut UtilityRegistry) {
  for &(root, property, screen) in SIZING_UTILITIES {
    registry.register_functional(root, Arc::new(SizingUtility { property, screen }));
  }
}
