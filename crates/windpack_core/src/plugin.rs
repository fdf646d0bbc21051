use std::fmt::Debug;
use std::sync::Arc;

use crate::property_registry::PropertyRegistry;
use crate::theme::Theme;
use crate::types::{AstNode, Candidate};

/// Call-scoped state handed to each utility plugin.
pub struct CompileContext<'a> {
  pub theme: &'a Theme,
  pub property_registry: &'a mut PropertyRegistry,
}

/// Compile one candidate into the CSS this class contributes.
///
/// A plugin must return `Ok(None)` when the candidate's shape is not one it
/// handles; `Ok(Some(nodes))` means zero or more declaration/at-rule nodes
/// with no side effects visible until the batch accepts them. Errors are
/// reserved for construction-time bugs, never for bad input.
pub trait UtilityPlugin: Debug + Send + Sync {
  fn compile(
    &self,
    candidate: &Candidate,
    ctx: &mut CompileContext,
  ) -> Result<Option<Vec<Arc<AstNode>>>, anyhow::Error>;

  /// Whether the matcher may resolve a `-root` form to this plugin
  fn supports_negative(&self) -> bool {
    false
  }
}

pub type UtilityPluginRef = Arc<dyn UtilityPlugin>;
