use indexmap::IndexMap;
use serde::Deserialize;

/// Per-compiler configuration, loadable from JSON.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
  /// How duplicate properties within one selector block resolve
  pub merge_strategy: MergeStrategy,

  /// Emit `@layer theme/base/components/utilities` buckets around the
  /// output instead of a flat rule list
  pub layers: bool,

  /// Theme tokens merged over the default tables
  pub theme: IndexMap<String, String>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MergeStrategy {
  #[default]
  LastWins,
  FirstWins,
}
