use windpack_core::theme::Theme;

/// What a single variant token contributes to the output context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedVariant {
  /// A selector suffix such as `:hover`
  PseudoClass(&'static str),

  /// An `@media` wrapper
  Media(String),
}

const PSEUDO_CLASS_VARIANTS: &[(&str, &str)] = &[
  ("hover", ":hover"),
  ("focus", ":focus"),
  ("focus-within", ":focus-within"),
  ("focus-visible", ":focus-visible"),
  ("active", ":active"),
  ("visited", ":visited"),
  ("disabled", ":disabled"),
  ("first", ":first-child"),
  ("last", ":last-child"),
  ("odd", ":nth-child(odd)"),
  ("even", ":nth-child(even)"),
];

/// Resolve one variant token. Unknown variants are `None`; the caller
/// invalidates the whole candidate, it never guesses.
pub fn resolve_variant(variant: &str, theme: &Theme) -> Option<ResolvedVariant> {
  if let Some(&(_, pseudo)) = PSEUDO_CLASS_VARIANTS
    .iter()
    .find(|(name, _)| *name == variant)
  {
    return Some(ResolvedVariant::PseudoClass(pseudo));
  }

  if variant == "dark" {
    return Some(ResolvedVariant::Media(
      "(prefers-color-scheme: dark)".to_string(),
    ));
  }

  let breakpoint = theme.get(&format!("--breakpoint-{variant}"))?;
  Some(ResolvedVariant::Media(format!("(min-width: {breakpoint})")))
}
