/// Split whitespace-separated class tokens out of an input string.
///
/// Only ASCII space and tab separate tokens; empty entries are discarded.
pub fn extract_class_tokens(input: &str) -> impl Iterator<Item = &str> {
  input
    .split(|char| char == ' ' || char == '\t')
    .filter(|token| !token.is_empty())
}

/// Strip a single important marker from either end of a token.
///
/// The trailing position is checked first; a token never loses the marker
/// from both ends at once.
pub fn strip_important(token: &str) -> (&str, bool) {
  if let Some(rest) = token.strip_suffix('!') {
    return (rest, true);
  }

  if let Some(rest) = token.strip_prefix('!') {
    return (rest, true);
  }

  (token, false)
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn extracts_tokens_and_discards_empties() {
    let tokens: Vec<&str> = extract_class_tokens("  flex\t m-4  hover:underline ").collect();

    assert_eq!(tokens, vec!["flex", "m-4", "hover:underline"]);
  }

  #[test]
  fn strips_trailing_marker_before_leading() {
    assert_eq!(strip_important("flex!"), ("flex", true));
    assert_eq!(strip_important("!flex"), ("flex", true));
    assert_eq!(strip_important("!flex!"), ("!flex", true));
    assert_eq!(strip_important("flex"), ("flex", false));
  }
}
