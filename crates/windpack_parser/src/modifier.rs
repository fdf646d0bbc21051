use windpack_core::types::Modifier;

use crate::cursor::segment;
use crate::decode::decode_arbitrary_value;
use crate::error::ParseError;

/// Extract a trailing `/suffix` modifier from a base utility string.
///
/// The slash is ambiguous: `bg-red-500/50` carries an opacity modifier
/// while `w-1/2` is a fraction value. The fraction heuristic resolves the
/// two using only local string structure.
pub fn extract_modifier(base: &str) -> Result<(String, Option<Modifier>), ParseError> {
  let segments = segment(base, '/');

  match segments.as_slice() {
    [_] => Ok((base.to_string(), None)),

    [value, candidate] => {
      if looks_like_fraction(value, candidate) {
        // Not a modifier at all; the two segments are one fraction value
        return Ok((format!("{value}/{candidate}"), None));
      }

      let modifier = parse_modifier(candidate)?;
      Ok((value.to_string(), Some(modifier)))
    }

    // Only a fraction utility may carry a modifier in third position
    [value, denominator, candidate] => {
      if !looks_like_fraction(value, denominator) {
        return Err(ParseError::InvalidModifier(base.to_string()));
      }

      let modifier = parse_modifier(candidate)?;
      Ok((format!("{value}/{denominator}"), Some(modifier)))
    }

    _ => Err(ParseError::TooManyModifierSegments),
  }
}

fn parse_modifier(candidate: &str) -> Result<Modifier, ParseError> {
  if candidate.is_empty() {
    return Err(ParseError::InvalidModifier(candidate.to_string()));
  }

  if let Some(inner) = candidate
    .strip_prefix('(')
    .and_then(|rest| rest.strip_suffix(')'))
  {
    if !inner.starts_with("--") {
      return Err(ParseError::InvalidVariableShorthand(inner.to_string()));
    }
    return Ok(Modifier::Arbitrary(decode_arbitrary_value(&format!(
      "var({inner})"
    ))));
  }

  if let Some(inner) = candidate
    .strip_prefix('[')
    .and_then(|rest| rest.strip_suffix(']'))
  {
    if inner.is_empty() {
      return Err(ParseError::InvalidModifier(candidate.to_string()));
    }
    return Ok(Modifier::Arbitrary(decode_arbitrary_value(inner)));
  }

  Ok(Modifier::Named(candidate.to_string()))
}

/// Whether `value`'s last dash segment plus `denominator` reads as a small
/// fraction: both plain integers no greater than 12, numerator strictly
/// below denominator. The bound is what keeps `-m-4/50` a margin with an
/// opacity modifier instead of a bogus fraction.
fn looks_like_fraction(value: &str, denominator: &str) -> bool {
  let numerator = value.rsplit('-').next().unwrap_or(value);

  let Some(numerator) = parse_small_integer(numerator) else {
    return false;
  };
  let Some(denominator) = parse_small_integer(denominator) else {
    return false;
  };

  numerator < denominator
}

fn parse_small_integer(input: &str) -> Option<u32> {
  if input.is_empty() || !input.bytes().all(|byte| byte.is_ascii_digit()) {
    return None;
  }

  input.parse().ok().filter(|&number| number <= 12)
}
