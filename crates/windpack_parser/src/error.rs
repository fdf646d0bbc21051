use thiserror::Error;

/// Why a token failed to parse into a candidate.
///
/// These are input problems, never engine bugs; the compiler turns them
/// into diagnostics and drops the token from the batch.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
  #[error("empty class token")]
  EmptyToken,

  #[error("a class token may not begin or end with `:`")]
  InvalidVariantSeparator,

  #[error("empty variant segment")]
  EmptyVariant,

  #[error("unbalanced brackets")]
  UnbalancedBrackets,

  #[error("invalid modifier `{0}`")]
  InvalidModifier(String),

  #[error("too many `/` segments")]
  TooManyModifierSegments,

  #[error("empty arbitrary value")]
  EmptyArbitraryValue,

  #[error("invalid arbitrary property `{0}`")]
  InvalidArbitraryProperty(String),

  #[error("a parenthesized value must reference a CSS variable, got `{0}`")]
  InvalidVariableShorthand(String),
}
