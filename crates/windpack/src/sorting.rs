use std::fmt::Debug;

use windpack_core::theme::Theme;
use windpack_core::types::ProcessedClass;

/// The canonical ordering of compiled classes.
///
/// The contract is a deterministic total order, consistent across runs for
/// the same input set, so identical input always yields byte-identical
/// output. The comparator is pluggable; the default ranks by variant
/// specificity and otherwise preserves input order through a stable sort.
pub trait ClassSorter: Debug + Send + Sync {
  fn key(&self, class: &ProcessedClass, theme: &Theme) -> ClassSortKey;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClassSortKey {
  /// Coarse bucket: plain < pseudo-class < dark < responsive
  pub rank: u32,

  /// Within responsive classes, ascending breakpoint width
  pub priority: u32,
}

#[derive(Debug, Default)]
pub struct DefaultSorter;

impl ClassSorter for DefaultSorter {
  fn key(&self, class: &ProcessedClass, theme: &Theme) -> ClassSortKey {
    let mut key = ClassSortKey::default();

    for variant in &class.candidate.variants {
      let (rank, priority) = match variant.as_str() {
        "dark" => (2, 0),
        _ => match theme.get(&format!("--breakpoint-{variant}")) {
          Some(breakpoint) => (3, parse_breakpoint_width(breakpoint)),
          None => (1, 0),
        },
      };

      key.rank = key.rank.max(rank);
      key.priority += priority;
    }

    key
  }
}

/// A breakpoint width in pixels, for ordering only. `rem` values assume
/// the 16px root size; unparseable values rank last.
pub fn parse_breakpoint_width(value: &str) -> u32 {
  let digits: String = value
    .chars()
    .take_while(|char| char.is_ascii_digit() || *char == '.')
    .collect();

  let Ok(number) = digits.parse::<f64>() else {
    return u32::MAX;
  };

  if value.ends_with("rem") || value.ends_with("em") {
    (number * 16.0) as u32
  } else {
    number as u32
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use windpack_core::types::{Candidate, CandidateKind};

  use super::*;

  fn class(variants: &[&str]) -> ProcessedClass {
    ProcessedClass::new(
      Candidate {
        raw: String::new(),
        variants: variants.iter().map(|v| v.to_string()).collect(),
        important: false,
        modifier: None,
        kind: CandidateKind::Static { root: "flex".into() },
      },
      Vec::new(),
    )
  }

  fn theme() -> Theme {
    let mut theme = Theme::new();
    theme.insert("--breakpoint-md", "768px");
    theme.insert("--breakpoint-lg", "64rem");
    theme
  }

  #[test]
  fn plain_before_pseudo_before_responsive() {
    let sorter = DefaultSorter;
    let theme = theme();

    let plain = sorter.key(&class(&[]), &theme);
    let hover = sorter.key(&class(&["hover"]), &theme);
    let md = sorter.key(&class(&["md"]), &theme);
    let lg = sorter.key(&class(&["lg"]), &theme);

    assert!(plain < hover);
    assert!(hover < md);
    assert!(md < lg);
  }

  #[test]
  fn rem_breakpoints_convert_to_pixels() {
    assert_eq!(parse_breakpoint_width("64rem"), 1024);
    assert_eq!(parse_breakpoint_width("768px"), 768);
  }
}
