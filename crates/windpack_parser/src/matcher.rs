use once_cell::sync::Lazy;
use windpack_core::registry::UtilityRegistry;

use crate::cursor::segment;
use crate::decode::decode_arbitrary_value;
use crate::error::ParseError;

/// The classification of a post-modifier base string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchedUtility {
  Static {
    root: String,
  },

  /// The value is the raw text after the root, still to be parsed
  Functional {
    root: String,
    value: Option<String>,
  },

  ArbitraryProperty {
    property: String,
    value: String,
  },

  /// `bg-(--my-color)`: root plus an already-decoded `var()` expansion
  ParenShorthand {
    root: String,
    value: String,
  },
}

/// Functional roots containing a dash that must never be split at that
/// dash, tested before the general right-to-left scan.
static MULTI_DASH_ROOTS: Lazy<Vec<&'static str>> = Lazy::new(|| {
  vec![
    "space-x",
    "space-y",
    "divide-x",
    "divide-y",
    "translate-x",
    "translate-y",
    "translate-z",
    "inset-x",
    "inset-y",
    "gap-x",
    "gap-y",
    "scale-x",
    "scale-y",
    "scale-z",
    "rotate-x",
    "rotate-y",
    "rotate-z",
    "skew-x",
    "skew-y",
    "border-x",
    "border-y",
    "min-w",
    "min-h",
    "max-w",
    "max-h",
  ]
});

/// Classify a base utility string against the registry.
///
/// Never fails for an unknown name: the final fallback produces a
/// best-guess functional root so diagnostics can name what is missing.
pub fn match_utility(base: &str, registry: &UtilityRegistry) -> Result<MatchedUtility, ParseError> {
  if base.is_empty() {
    return Err(ParseError::EmptyToken);
  }

  // 1. Exact static name
  if registry.is_static(base) {
    return Ok(MatchedUtility::Static {
      root: base.to_string(),
    });
  }

  // 2. `[property:value]`
  if let Some(inner) = base.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
    return match_arbitrary_property(base, inner);
  }

  // 3. `root-(--variable)` shorthand
  if base.ends_with(')') {
    if let Some(matched) = match_paren_shorthand(base)? {
      return Ok(matched);
    }
  }

  Ok(find_root(base, registry))
}

fn match_arbitrary_property(base: &str, inner: &str) -> Result<MatchedUtility, ParseError> {
  // These bracket forms belong to other syntaxes, not to properties
  if inner.starts_with("not ") || inner.starts_with("not\t") || inner.starts_with("inline(") {
    return Err(ParseError::InvalidArbitraryProperty(base.to_string()));
  }

  let parts = segment(inner, ':');
  let [property, value] = parts.as_slice() else {
    return Err(ParseError::InvalidArbitraryProperty(base.to_string()));
  };

  if property.is_empty() || value.is_empty() {
    return Err(ParseError::InvalidArbitraryProperty(base.to_string()));
  }

  // An uppercase start is almost always an accidental match (e.g. a
  // bracketed word from prose), never a CSS property
  if property.chars().next().is_some_and(|char| char.is_ascii_uppercase()) {
    return Err(ParseError::InvalidArbitraryProperty(base.to_string()));
  }

  Ok(MatchedUtility::ArbitraryProperty {
    property: property.to_string(),
    value: decode_arbitrary_value(value),
  })
}

fn match_paren_shorthand(base: &str) -> Result<Option<MatchedUtility>, ParseError> {
  // Locate the opener matching the final `)`
  let mut depth = 0i32;
  let mut open = None;
  for (index, char) in base.char_indices().rev() {
    match char {
      ')' => depth += 1,
      '(' => {
        depth -= 1;
        if depth == 0 {
          open = Some(index);
          break;
        }
      }
      _ => {}
    }
  }

  let Some(open) = open else {
    return Ok(None);
  };

  // Only a `-(` boundary marks the shorthand; anything else falls through
  // to root finding
  if open == 0 || base.as_bytes()[open - 1] != b'-' || open == 1 {
    return Ok(None);
  }

  let root = &base[..open - 1];
  let inner = &base[open + 1..base.len() - 1];

  if inner.is_empty() {
    return Err(ParseError::EmptyArbitraryValue);
  }

  if !inner.starts_with("--") {
    return Err(ParseError::InvalidVariableShorthand(inner.to_string()));
  }

  Ok(Some(MatchedUtility::ParenShorthand {
    root: root.to_string(),
    value: decode_arbitrary_value(&format!("var({inner})")),
  }))
}

fn find_root(base: &str, registry: &UtilityRegistry) -> MatchedUtility {
  // (a) The whole string is a registered functional root
  if registry.has_functional_root(base) {
    return MatchedUtility::Functional {
      root: base.to_string(),
      value: None,
    };
  }

  // (b) Negative utilities: test the dash-stripped remainder against every
  // positive root, longest first, requiring a following dash
  if let Some(remainder) = base.strip_prefix('-') {
    for root in registry.functional_roots_longest_first() {
      let Some(value) = remainder.strip_prefix(root) else {
        continue;
      };
      let Some(value) = value.strip_prefix('-') else {
        continue;
      };
      if value.is_empty() {
        continue;
      }

      return MatchedUtility::Functional {
        root: format!("-{root}"),
        value: Some(value.to_string()),
      };
    }
  }

  // (c) Multi-dash literal roots keep their internal dash
  for root in MULTI_DASH_ROOTS.iter() {
    let Some(value) = base.strip_prefix(root).and_then(|rest| rest.strip_prefix('-')) else {
      continue;
    };
    if !value.is_empty() && registry.has_functional_root(root) {
      return MatchedUtility::Functional {
        root: root.to_string(),
        value: Some(value.to_string()),
      };
    }
  }

  // (d) Walk dash positions right to left; the first hit is the longest
  // registered root
  for (index, byte) in base.bytes().enumerate().rev() {
    if byte != b'-' || index == 0 || index + 1 == base.len() {
      continue;
    }

    let root = &base[..index];
    if registry.has_functional_root(root) {
      return MatchedUtility::Functional {
        root: root.to_string(),
        value: Some(base[index + 1..].to_string()),
      };
    }
  }

  // (e) Nothing matched; split at the first separator so diagnostics can
  // still name a specific missing utility
  match base.find(['-', '[', '(']) {
    Some(position) if position > 0 => {
      let root = &base[..position];
      let value = if base.as_bytes()[position] == b'-' {
        &base[position + 1..]
      } else {
        &base[position..]
      };

      MatchedUtility::Functional {
        root: root.to_string(),
        value: (!value.is_empty()).then(|| value.to_string()),
      }
    }
    _ => MatchedUtility::Functional {
      root: base.to_string(),
      value: None,
    },
  }
}
