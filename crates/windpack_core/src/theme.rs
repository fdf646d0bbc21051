use indexmap::IndexMap;

use crate::types::Modifier;

/// The design-system token tables consulted during value resolution.
///
/// Keys are CSS custom property names (`--color-red-500`, `--spacing`,
/// `--breakpoint-md`). Built once per compiler and read-only afterwards, so
/// independent compile calls may share one instance.
#[derive(Clone, Debug, Default)]
pub struct Theme {
  values: IndexMap<String, String>,
}

impl Theme {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.values.insert(name.into(), value.into());
  }

  /// Merge override tokens over the current tables, replacing existing keys
  pub fn merge(&mut self, overrides: IndexMap<String, String>) {
    for (name, value) in overrides {
      self.values.insert(name, value);
    }
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self.values.get(name).map(String::as_str)
  }

  /// Resolve a candidate value against a chain of namespaces, first match
  /// wins: `resolve("red-500", &["--color"])` finds `--color-red-500`.
  pub fn resolve(&self, key: &str, namespaces: &[&str]) -> Option<&str> {
    namespaces.iter().find_map(|namespace| {
      let name = format!("{namespace}-{key}");
      self.values.get(&name).map(String::as_str)
    })
  }

  /// Like `resolve` but returning the custom property name rather than its
  /// value, for utilities that emit `var(--color-red-500)` style output
  pub fn resolve_name(&self, key: &str, namespaces: &[&str]) -> Option<String> {
    namespaces.iter().find_map(|namespace| {
      let name = format!("{namespace}-{key}");
      self.values.contains_key(&name).then_some(name)
    })
  }

  /// Turn a candidate modifier into an opacity percentage, when it is one.
  ///
  /// Named modifiers must be plain integers in `0..=100` and become
  /// percentages; arbitrary modifiers pass through verbatim. Anything else
  /// is not an opacity and resolves to `None`.
  pub fn resolve_opacity(&self, modifier: &Modifier) -> Option<String> {
    match modifier {
      Modifier::Arbitrary(value) => Some(value.clone()),
      Modifier::Named(value) => {
        let number: u32 = value.parse().ok()?;
        if number > 100 {
          return None;
        }
        Some(format!("{number}%"))
      }
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .values
      .iter()
      .map(|(name, value)| (name.as_str(), value.as_str()))
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  fn theme() -> Theme {
    let mut theme = Theme::new();
    theme.insert("--color-red-500", "#ef4444");
    theme.insert("--spacing", "0.25rem");
    theme
  }

  #[test]
  fn resolves_through_namespace_chain() {
    let theme = theme();

    assert_eq!(theme.resolve("red-500", &["--color"]), Some("#ef4444"));
    assert_eq!(theme.resolve("red-500", &["--text-color", "--color"]), Some("#ef4444"));
    assert_eq!(theme.resolve("blue-500", &["--color"]), None);
  }

  #[test]
  fn named_opacity_modifiers_become_percentages() {
    let theme = theme();

    assert_eq!(
      theme.resolve_opacity(&Modifier::Named("50".into())),
      Some("50%".into())
    );
    assert_eq!(theme.resolve_opacity(&Modifier::Named("200".into())), None);
    assert_eq!(theme.resolve_opacity(&Modifier::Named("1/2".into())), None);
    assert_eq!(
      theme.resolve_opacity(&Modifier::Arbitrary("var(--opacity)".into())),
      Some("var(--opacity)".into())
    );
  }
}
