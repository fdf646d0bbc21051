use windpack_core::types::CandidateValue;

use crate::decode::decode_arbitrary_value;
use crate::error::ParseError;

/// Parse the matched value portion of a functional utility.
pub fn parse_candidate_value(raw: &str) -> Result<CandidateValue, ParseError> {
  if let Some(inner) = raw.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
    if inner.is_empty() || inner.bytes().all(|byte| byte == b'_') {
      return Err(ParseError::EmptyArbitraryValue);
    }

    return Ok(CandidateValue::Arbitrary {
      value: decode_arbitrary_value(inner),
    });
  }

  if let Some(inner) = raw.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
    if inner.is_empty() {
      return Err(ParseError::EmptyArbitraryValue);
    }

    // Parenthesized values are shorthand for a CSS variable reference
    if !inner.starts_with("--") {
      return Err(ParseError::InvalidVariableShorthand(inner.to_string()));
    }

    return Ok(CandidateValue::Arbitrary {
      value: decode_arbitrary_value(&format!("var({inner})")),
    });
  }

  Ok(CandidateValue::Named {
    value: raw.to_string(),
    fraction: detect_fraction(raw),
  })
}

fn detect_fraction(value: &str) -> Option<String> {
  let (numerator, denominator) = value.split_once('/')?;

  let both_integers = !numerator.is_empty()
    && !denominator.is_empty()
    && numerator.bytes().all(|byte| byte.is_ascii_digit())
    && denominator.bytes().all(|byte| byte.is_ascii_digit());

  both_integers.then(|| value.to_string())
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn named_values_detect_fractions() {
    assert_eq!(
      parse_candidate_value("1/2").unwrap(),
      CandidateValue::Named {
        value: "1/2".to_string(),
        fraction: Some("1/2".to_string()),
      }
    );
    assert_eq!(
      parse_candidate_value("red-500").unwrap(),
      CandidateValue::Named {
        value: "red-500".to_string(),
        fraction: None,
      }
    );
  }

  #[test]
  fn bracket_values_are_decoded() {
    assert_eq!(
      parse_candidate_value("[1px_solid]").unwrap(),
      CandidateValue::Arbitrary {
        value: "1px solid".to_string(),
      }
    );
    assert!(parse_candidate_value("[]").is_err());
    assert!(parse_candidate_value("[___]").is_err());
  }

  #[test]
  fn paren_values_must_reference_a_variable() {
    assert_eq!(
      parse_candidate_value("(--my-color)").unwrap(),
      CandidateValue::Arbitrary {
        value: "var(--my-color)".to_string(),
      }
    );
    assert!(parse_candidate_value("(red)").is_err());
    assert!(parse_candidate_value("()").is_err());
  }
}
