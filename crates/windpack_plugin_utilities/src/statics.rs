use std::sync::Arc;

use windpack_core::plugin::{CompileContext, UtilityPlugin};
use windpack_core::registry::UtilityRegistry;
use windpack_core::types::{AstNode, Candidate, CandidateKind};

/// A utility with a fixed declaration list and no value.
#[derive(Debug)]
pub struct StaticUtility {
  declarations: &'static [(&'static str, &'static str)],
}

impl UtilityPlugin for StaticUtility {
  fn compile(
    &self,
    candidate: &Candidate,
    _ctx: &mut CompileContext,
  ) -> Result<Option<Vec<Arc<AstNode>>>, anyhow::Error> {
    if !matches!(candidate.kind, CandidateKind::Static { .. }) || candidate.modifier.is_some() {
      return Ok(None);
    }

    Ok(Some(
      self
        .declarations
        .iter()
        .map(|(property, value)| AstNode::decl(*property, *value))
        .collect(),
    ))
  }
}

#[rustfmt::skip]
const STATIC_UTILITIES: &[(&str, &[(&str, &str)])] = &[
  ("block", &[("display", "block")]),
  ("inline-block", &[("display", "inline-block")]),
  ("inline", &[("display", "inline")]),
  ("flex", &[("display", "flex")]),
  ("inline-flex", &[("display", "inline-flex")]),
  ("grid", &[("display", "grid")]),
  ("inline-grid", &[("display", "inline-grid")]),
  ("contents", &[("display", "contents")]),
  ("hidden", &[("display", "none")]),
  ("static", &[("position", "static")]),
  ("fixed", &[("position", "fixed")]),
  ("absolute", &[("position", "absolute")]),
  ("relative", &[("position", "relative")]),
  ("sticky", &[("position", "sticky")]),
  ("isolate", &[("isolation", "isolate")]),
  ("visible", &[("visibility", "visible")]),
  ("invisible", &[("visibility", "hidden")]),
  ("collapse", &[("visibility", "collapse")]),
  ("underline", &[("text-decoration-line", "underline")]),
  ("overline", &[("text-decoration-line", "overline")]),
  ("line-through", &[("text-decoration-line", "line-through")]),
  ("no-underline", &[("text-decoration-line", "none")]),
  ("uppercase", &[("text-transform", "uppercase")]),
  ("lowercase", &[("text-transform", "lowercase")]),
  ("capitalize", &[("text-transform", "capitalize")]),
  ("normal-case", &[("text-transform", "none")]),
  ("italic", &[("font-style", "italic")]),
  ("not-italic", &[("font-style", "normal")]),
  ("antialiased", &[
    ("-webkit-font-smoothing", "antialiased"),
    ("-moz-osx-font-smoothing", "grayscale"),
  ]),
  ("sr-only", &[
    ("position", "absolute"),
    ("width", "1px"),
    ("height", "1px"),
    ("padding", "0"),
    ("margin", "-1px"),
    ("overflow", "hidden"),
    ("clip-path", "inset(50%)"),
    ("white-space", "nowrap"),
    ("border-width", "0"),
  ]),
];

pub fn register(registry: &mut UtilityRegistry) {
  for &(name, declarations) in STATIC_UTILITIES {
    registry.register_static(name, Arc::new(StaticUtility { declarations }));
  }
}
