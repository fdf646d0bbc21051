use indexmap::IndexMap;

use crate::plugin::UtilityPluginRef;

/// The compiled index of all known static-utility names and
/// functional-utility roots.
///
/// Built once at construction time through explicit registration calls and
/// treated as read-only by every compile pass afterwards.
#[derive(Debug, Default)]
pub struct UtilityRegistry {
  static_utilities: IndexMap<String, UtilityPluginRef>,
  functional_utilities: IndexMap<String, UtilityPluginRef>,
}

impl UtilityRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register_static(&mut self, name: impl Into<String>, plugin: UtilityPluginRef) {
    self.static_utilities.insert(name.into(), plugin);
  }

  pub fn register_functional(&mut self, root: impl Into<String>, plugin: UtilityPluginRef) {
    self.functional_utilities.insert(root.into(), plugin);
  }

  pub fn is_static(&self, name: &str) -> bool {
    self.static_utilities.contains_key(name)
  }

  pub fn has_functional_root(&self, root: &str) -> bool {
    self.functional_utilities.contains_key(root)
  }

  pub fn static_plugin(&self, name: &str) -> Option<&UtilityPluginRef> {
    self.static_utilities.get(name)
  }

  /// Look up the plugin for a functional root. A root with the negative
  /// prefix resolves through its positive form, and only when that plugin
  /// opts into negative values.
  pub fn functional_plugin(&self, root: &str) -> Option<&UtilityPluginRef> {
    if let Some(positive) = root.strip_prefix('-').filter(|_| !root.starts_with("--")) {
      return self
        .functional_utilities
        .get(positive)
        .filter(|plugin| plugin.supports_negative());
    }

    self.functional_utilities.get(root)
  }

  /// All functional roots, longest first. Length ties keep registration
  /// order so the scan stays deterministic.
  pub fn functional_roots_longest_first(&self) -> Vec<&str> {
    let mut roots: Vec<&str> = self.functional_utilities.keys().map(String::as_str).collect();
    roots.sort_by(|a, b| b.len().cmp(&a.len()));
    roots
  }

  /// Whether the positive form of `root` is registered and accepts
  /// negative values
  pub fn supports_negative_root(&self, positive_root: &str) -> bool {
    self
      .functional_utilities
      .get(positive_root)
      .is_some_and(|plugin| plugin.supports_negative())
  }

  pub fn len(&self) -> usize {
    self.static_utilities.len() + self.functional_utilities.len()
  }

  pub fn is_empty(&self) -> bool {
    self.static_utilities.is_empty() && self.functional_utilities.is_empty()
  }
}
