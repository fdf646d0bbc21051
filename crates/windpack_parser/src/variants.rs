use crate::cursor::segment;
use crate::error::ParseError;

/// Peel colon-separated variant prefixes off a class token.
///
/// Returns the variants outermost-first plus the base utility. Separators
/// inside brackets, parens or quotes do not split.
pub fn split_variants(token: &str) -> Result<(Vec<String>, String), ParseError> {
  if token.is_empty() {
    return Err(ParseError::EmptyToken);
  }

  if token.starts_with(':') || token.ends_with(':') {
    return Err(ParseError::InvalidVariantSeparator);
  }

  let mut segments = segment(token, ':');

  // A `:` inside an arbitrary bracket can still split when the bracket is
  // unbalanced within its segment; rejoin the two trailing pieces so the
  // value is reconstructed as `segment[-2]:segment[-1]`.
  if segments.len() >= 2 {
    let last = segments[segments.len() - 1];
    let previous = segments[segments.len() - 2];

    let open_brackets = previous.matches('[').count();
    let closed_brackets = previous.matches(']').count();

    if open_brackets > closed_brackets && last.ends_with(']') {
      let repaired = format!("{previous}:{last}");
      segments.truncate(segments.len() - 2);

      let mut variants: Vec<String> = Vec::with_capacity(segments.len());
      for variant in segments {
        if variant.is_empty() {
          return Err(ParseError::EmptyVariant);
        }
        variants.push(variant.to_string());
      }

      return Ok((variants, repaired));
    }
  }

  let base = segments.pop().unwrap_or_default().to_string();

  let mut variants = Vec::with_capacity(segments.len());
  for variant in segments {
    if variant.is_empty() {
      return Err(ParseError::EmptyVariant);
    }
    variants.push(variant.to_string());
  }

  Ok((variants, base))
}
