use std::fmt::Display;
use std::fmt::Formatter;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A user-facing report about one input token.
///
/// Bad input never aborts a batch; it is dropped from the output and
/// surfaced through one of these instead.
#[derive(Clone, Debug, Default, Deserialize, Error, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
  pub kind: DiagnosticKind,

  /// A summary user-facing message
  pub message: String,

  /// The raw token that produced this diagnostic
  pub token: String,

  /// Hints for the user
  pub hints: Option<Vec<String>>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
  /// The token failed a parsing step: bad separators, unbalanced brackets,
  /// an invalid modifier shape
  #[default]
  InvalidCandidate,

  /// The token parsed structurally but matched no registered static name
  /// or functional root
  UnknownUtility,
}

impl Diagnostic {
  pub fn invalid_candidate(token: impl Into<String>, message: impl Into<String>) -> Self {
    Diagnostic {
      kind: DiagnosticKind::InvalidCandidate,
      message: message.into(),
      token: token.into(),
      hints: None,
    }
  }

  pub fn unknown_utility(token: impl Into<String>, root: impl AsRef<str>) -> Self {
    Diagnostic {
      kind: DiagnosticKind::UnknownUtility,
      message: format!("Unknown utility `{}`", root.as_ref()),
      token: token.into(),
      hints: None,
    }
  }
}

impl Display for Diagnostic {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: {}", self.token, self.message)
  }
}

#[derive(Clone, Debug, Default, Deserialize, Error)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
  pub fn as_ref(&self) -> &Vec<Diagnostic> {
    &self.0
  }

  pub fn push(&mut self, diagnostic: Diagnostic) {
    self.0.push(diagnostic);
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn into_inner(self) -> Vec<Diagnostic> {
    self.0
  }
}

impl Display for Diagnostics {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    for diagnostic in &self.0 {
      writeln!(f, "{}", diagnostic)?;
    }
    Ok(())
  }
}

impl Serialize for Diagnostics {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    self.0.serialize(serializer)
  }
}

impl From<Vec<Diagnostic>> for Diagnostics {
  fn from(diagnostics: Vec<Diagnostic>) -> Self {
    Diagnostics(diagnostics)
  }
}

impl From<Diagnostic> for Diagnostics {
  fn from(diagnostic: Diagnostic) -> Self {
    Diagnostics(vec![diagnostic])
  }
}

impl IntoIterator for Diagnostics {
  type Item = Diagnostic;
  type IntoIter = std::vec::IntoIter<Diagnostic>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.into_iter()
  }
}
