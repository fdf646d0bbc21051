use windpack_core::types::{Candidate, CandidateKind, CandidateValue};

/// The candidate's functional value, when it has one.
pub fn functional_value(candidate: &Candidate) -> Option<&CandidateValue> {
  match &candidate.kind {
    CandidateKind::Functional { value, .. } => value.as_ref(),
    _ => None,
  }
}

/// Resolve a value against the spacing scale: bare numbers multiply the
/// `--spacing` token, fractions become percentages, keywords and
/// arbitrary values pass through.
pub fn resolve_spacing(value: &CandidateValue) -> Option<String> {
  match value {
    CandidateValue::Arbitrary { value } => Some(value.clone()),
    CandidateValue::Named { value, fraction } => {
      if let Some(fraction) = fraction {
        return Some(fraction_percentage(fraction));
      }

      match value.as_str() {
        "auto" => Some("auto".to_string()),
        "px" => Some("1px".to_string()),
        "full" => Some("100%".to_string()),
        _ if is_plain_number(value) => Some(format!("calc(var(--spacing) * {value})")),
        _ => None,
      }
    }
  }
}

pub fn fraction_percentage(fraction: &str) -> String {
  format!("calc({fraction} * 100%)")
}

/// A non-negative integer or decimal like `4` or `1.5`
pub fn is_plain_number(value: &str) -> bool {
  let mut dots = 0;
  !value.is_empty()
    && value.bytes().all(|byte| {
      if byte == b'.' {
        dots += 1;
        dots == 1
      } else {
        byte.is_ascii_digit()
      }
    })
    && !value.starts_with('.')
    && !value.ends_with('.')
}
