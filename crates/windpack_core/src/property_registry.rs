use std::sync::Arc;

use indexmap::IndexMap;

use crate::types::AstNode;

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDefinition {
  pub syntax: String,
  pub inherits: bool,
  pub initial_value: Option<String>,
}

/// Registered `@property` definitions for the custom properties a batch
/// references. Call-scoped; one per compile invocation.
#[derive(Debug, Default)]
pub struct PropertyRegistry {
  entries: IndexMap<String, PropertyDefinition>,
}

impl PropertyRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Idempotent registration: once a name is registered, later writers do
  /// not override it.
  pub fn register(
    &mut self,
    name: impl Into<String>,
    syntax: impl Into<String>,
    inherits: bool,
    initial_value: Option<String>,
  ) {
    self.entries.entry(name.into()).or_insert(PropertyDefinition {
      syntax: syntax.into(),
      inherits,
      initial_value,
    });
  }

  pub fn is_registered(&self, name: &str) -> bool {
    self.entries.contains_key(name)
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Render the registered definitions as `@property` at-rules, in
  /// registration order
  pub fn to_ast(&self) -> Vec<Arc<AstNode>> {
    self
      .entries
      .iter()
      .map(|(name, definition)| {
        let mut nodes = vec![
          AstNode::decl("syntax", format!("\"{}\"", definition.syntax)),
          AstNode::decl("inherits", if definition.inherits { "true" } else { "false" }),
        ];

        if let Some(initial_value) = &definition.initial_value {
          nodes.push(AstNode::decl("initial-value", initial_value.clone()));
        }

        AstNode::at_rule("property", name.clone(), nodes)
      })
      .collect()
  }
}
