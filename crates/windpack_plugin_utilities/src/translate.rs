use std::sync::Arc;

use windpack_core::plugin::{CompileContext, UtilityPlugin};
use windpack_core::registry::UtilityRegistry;
use windpack_core::types::{AstNode, Candidate};

use crate::value::{functional_value, resolve_spacing};

/// Translate utilities write through `--tw-translate-*` custom properties
/// so both axes compose into one `translate` declaration. The custom
/// property definitions themselves are registered by the pipeline's
/// property-registration stage.
#[derive(Debug)]
pub struct TranslateUtility {
  axis_property: &'static str,
}

impl UtilityPlugin for TranslateUtility {
  fn compile(
    &self,
    candidate: &Candidate,
    _ctx: &mut CompileContext,
  ) -> Result<Option<Vec<Arc<AstNode>>>, anyhow::Error> {
    if candidate.modifier.is_some() {
      return Ok(None);
    }

    let Some(resolved) = functional_value(candidate).and_then(|value| resolve_spacing(value))
    else {
      return Ok(None);
    };

    Ok(Some(vec![
      AstNode::decl(self.axis_property, resolved),
      AstNode::decl(
        "translate",
        "var(--tw-translate-x) var(--tw-translate-y)",
      ),
    ]))
  }

  fn supports_negative(&self) -> bool {
    true
  }
}

pub fn register(registry: &mut UtilityRegistry) {
  registry.register_functional(
    "translate-x",
    Arc::new(TranslateUtility {
      axis_property: "--tw-translate-x",
    }),
  );
  registry.register_functional(
    "translate-y",
    Arc::new(TranslateUtility {
      axis_property: "--tw-translate-y",
    }),
  );
}
