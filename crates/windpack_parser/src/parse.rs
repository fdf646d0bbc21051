use windpack_core::registry::UtilityRegistry;
use windpack_core::types::{Candidate, CandidateKind, CandidateValue};

use crate::candidate_value::parse_candidate_value;
use crate::cursor::is_balanced;
use crate::error::ParseError;
use crate::extract::strip_important;
use crate::matcher::{match_utility, MatchedUtility};
use crate::modifier::extract_modifier;
use crate::variants::split_variants;

/// Parse one class token into an immutable candidate.
///
/// The registry only disambiguates roots here; whether the root compiles
/// to anything is the engine's concern.
pub fn parse_candidate(token: &str, registry: &UtilityRegistry) -> Result<Candidate, ParseError> {
  if token.is_empty() {
    return Err(ParseError::EmptyToken);
  }

  let (rest, important) = strip_important(token);

  if !is_balanced(rest) {
    return Err(ParseError::UnbalancedBrackets);
  }

  let (variants, base) = split_variants(rest)?;
  let (base, modifier) = extract_modifier(&base)?;

  let kind = match match_utility(&base, registry)? {
    MatchedUtility::Static { root } => CandidateKind::Static { root },
    MatchedUtility::Functional { root, value } => CandidateKind::Functional {
      root,
      value: value.as_deref().map(parse_candidate_value).transpose()?,
    },
    MatchedUtility::ArbitraryProperty { property, value } => {
      CandidateKind::ArbitraryProperty { property, value }
    }
    MatchedUtility::ParenShorthand { root, value } => CandidateKind::Functional {
      root,
      value: Some(CandidateValue::Arbitrary { value }),
    },
  };

  Ok(Candidate {
    raw: token.to_string(),
    variants,
    important,
    modifier,
    kind,
  })
}
