use indexmap::IndexSet;

/// Records which theme variables a batch actually referenced.
///
/// Feeds dead-code elimination of unused theme variables elsewhere in the
/// system; the pipeline only ever marks names, it never unmarks them.
#[derive(Debug, Default)]
pub struct ThemeUsageTracker {
  used: IndexSet<String>,
}

impl ThemeUsageTracker {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn mark_used(&mut self, name: impl Into<String>) {
    self.used.insert(name.into());
  }

  pub fn is_used(&self, name: &str) -> bool {
    self.used.contains(name)
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.used.iter().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.used.len()
  }

  pub fn is_empty(&self) -> bool {
    self.used.is_empty()
  }
}
