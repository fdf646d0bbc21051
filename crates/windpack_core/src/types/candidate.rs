use serde::{Deserialize, Serialize};

/// The parsed, immutable representation of one utility-class token.
///
/// A `Candidate` is created once per input token per compile pass and never
/// changes afterwards. Per-utility plugins turn a candidate plus the theme
/// into raw AST declarations.
#[derive(Clone, Debug, Deserialize, Hash, PartialEq, Eq, Serialize)]
pub struct Candidate {
  /// The original token text, exactly as it appeared in the input
  pub raw: String,

  /// Variant prefixes in outermost-first order (`hover:lg:flex` yields
  /// `["hover", "lg"]`)
  pub variants: Vec<String>,

  /// Whether the token carried a leading or trailing `!` marker
  pub important: bool,

  /// The trailing `/x` suffix once disambiguated from a fraction value
  pub modifier: Option<Modifier>,

  pub kind: CandidateKind,
}

#[derive(Clone, Debug, Deserialize, Hash, PartialEq, Eq, Serialize)]
pub enum CandidateKind {
  /// A utility with no value, matched verbatim against the registry
  Static { root: String },

  /// A parametrized utility such as `translate-x-4`. A negative utility
  /// keeps its `-` prefix on the root (`-translate-x`).
  Functional {
    root: String,
    value: Option<CandidateValue>,
  },

  /// A `[property:value]` escape hatch taking the property name verbatim
  ArbitraryProperty { property: String, value: String },
}

#[derive(Clone, Debug, Deserialize, Hash, PartialEq, Eq, Serialize)]
pub enum CandidateValue {
  /// A value from the named vocabulary, e.g. `4` or `red-500`. `fraction`
  /// is set when the value reads as `n/d` with both parts plain integers.
  Named {
    value: String,
    fraction: Option<String>,
  },

  /// A bracket- or parenthesis-escaped literal CSS value, already decoded
  Arbitrary { value: String },
}

#[derive(Clone, Debug, Deserialize, Hash, PartialEq, Eq, Serialize)]
pub enum Modifier {
  Named(String),
  Arbitrary(String),
}

impl Candidate {
  /// The canonical string form used for deduplication and ordering:
  /// colon-joined variants followed by the base segment, with a `!` prefix
  /// on the base segment when the candidate is important.
  pub fn normalized(&self) -> String {
    let mut out = String::with_capacity(self.raw.len());

    for variant in &self.variants {
      out.push_str(variant);
      out.push(':');
    }

    if self.important {
      out.push('!');
    }

    out.push_str(&self.base_segment());

    out
  }

  /// The token without variants or the important marker
  fn base_segment(&self) -> String {
    let mut base = match &self.kind {
      CandidateKind::Static { root } => root.clone(),
      CandidateKind::Functional { root, value } => match value {
        None => root.clone(),
        Some(CandidateValue::Named { value, .. }) => format!("{root}-{value}"),
        Some(CandidateValue::Arbitrary { value }) => format!("{root}-[{value}]"),
      },
      CandidateKind::ArbitraryProperty { property, value } => {
        format!("[{property}:{value}]")
      }
    };

    match &self.modifier {
      None => {}
      Some(Modifier::Named(modifier)) => {
        base.push('/');
        base.push_str(modifier);
      }
      Some(Modifier::Arbitrary(modifier)) => {
        base.push_str(&format!("/[{modifier}]"));
      }
    }

    base
  }

  /// The functional root, when the candidate has one
  pub fn root(&self) -> Option<&str> {
    match &self.kind {
      CandidateKind::Static { root } => Some(root),
      CandidateKind::Functional { root, .. } => Some(root),
      CandidateKind::ArbitraryProperty { .. } => None,
    }
  }

  /// Whether the candidate's root carries the negative-value prefix. A
  /// `--` prefix is a CSS variable sigil, not a negation.
  pub fn is_negative(&self) -> bool {
    self
      .root()
      .is_some_and(|root| root.starts_with('-') && !root.starts_with("--"))
  }
}

impl Modifier {
  pub fn value(&self) -> &str {
    match self {
      Modifier::Named(value) => value,
      Modifier::Arbitrary(value) => value,
    }
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  fn functional(root: &str, value: Option<CandidateValue>) -> Candidate {
    Candidate {
      raw: String::new(),
      variants: Vec::new(),
      important: false,
      modifier: None,
      kind: CandidateKind::Functional {
        root: root.into(),
        value,
      },
    }
  }

  #[test]
  fn normalizes_variants_in_original_order() {
    let candidate = Candidate {
      raw: "hover:lg:-translate-x-1/2".into(),
      variants: vec!["hover".into(), "lg".into()],
      important: false,
      modifier: None,
      kind: CandidateKind::Functional {
        root: "-translate-x".into(),
        value: Some(CandidateValue::Named {
          value: "1/2".into(),
          fraction: Some("1/2".into()),
        }),
      },
    };

    assert_eq!(candidate.normalized(), "hover:lg:-translate-x-1/2");
  }

  #[test]
  fn normalizes_important_marker_onto_base_segment() {
    let candidate = Candidate {
      important: true,
      variants: vec!["focus".into()],
      ..functional("m", Some(CandidateValue::Named {
        value: "4".into(),
        fraction: None,
      }))
    };

    assert_eq!(candidate.normalized(), "focus:!m-4");
  }

  #[test]
  fn normalizes_arbitrary_property() {
    let candidate = Candidate {
      raw: "[mask-type:luminance]".into(),
      variants: Vec::new(),
      important: false,
      modifier: None,
      kind: CandidateKind::ArbitraryProperty {
        property: "mask-type".into(),
        value: "luminance".into(),
      },
    };

    assert_eq!(candidate.normalized(), "[mask-type:luminance]");
  }

  #[test]
  fn negative_root_is_detected() {
    assert!(functional("-translate-x", None).is_negative());
    assert!(!functional("translate-x", None).is_negative());
    assert!(!functional("--spacing", None).is_negative());
  }
}
