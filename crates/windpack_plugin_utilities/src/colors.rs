use std::sync::Arc;

use windpack_core::plugin::{CompileContext, UtilityPlugin};
use windpack_core::registry::UtilityRegistry;
use windpack_core::types::{AstNode, Candidate, CandidateValue};

use crate::value::functional_value;

/// Color utilities resolve named values through the theme namespaces and
/// emit a `var()` reference so the cascade stays themeable. Opacity
/// modifiers are not handled here; the color-mix stage wraps the value
/// once the whole batch is compiled.
#[derive(Debug)]
pub struct ColorUtility {
  property: &'static str,
  namespaces: &'static [&'static str],
}

impl ColorUtility {
  fn resolve(&self, value: &CandidateValue, ctx: &CompileContext) -> Option<String> {
    match value {
      CandidateValue::Arbitrary { value } => Some(value.clone()),
      CandidateValue::Named { value, .. } => match value.as_str() {
        "inherit" => Some("inherit".to_string()),
        "current" => Some("currentColor".to_string()),
        "transparent" => Some("transparent".to_string()),
        _ => ctx
          .theme
          .resolve_name(value, self.namespaces)
          .map(|name| format!("var({name})")),
      },
    }
  }
}

impl UtilityPlugin for ColorUtility {
  fn compile(
    &self,
    candidate: &Candidate,
    ctx: &mut CompileContext,
  ) -> Result<Option<Vec<Arc<AstNode>>>, anyhow::Error> {
    let Some(resolved) = functional_value(candidate).and_then(|value| self.resolve(value, ctx))
    else {
      return Ok(None);
    };

    Ok(Some(vec![AstNode::decl(self.property, resolved)]))
  }
}

#[rustfmt::skip]
const COLOR_UTILITIES: &[(&str, &str, &[&str])] = &[
  ("bg", "background-color", &["--background-color", "--color"]),
  ("text", "color", &["--text-color", "--color"]),
  ("border", "border-color", &["--border-color", "--color"]),
  ("outline", "outline-color", &["--outline-color", "--color"]),
  ("fill", "fill", &["--fill", "--color"]),
  ("stroke", "stroke", &["--stroke", "--color"]),
];

pub fn register(registry: &mut UtilityRegistry) {
  for &(root, property, namespaces) in COLOR_UTILITIES {
    registry.register_functional(root, Arc::new(ColorUtility { property, namespaces }));
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use windpack_core::property_registry::PropertyRegistry;
  use windpack_core::theme::Theme;
  use windpack_core::types::CandidateKind;

  use super::*;
  use crate::default_theme;

  fn compile(value: CandidateValue) -> Option<Vec<Arc<AstNode>>> {
    let theme = default_theme();
    let mut properties = PropertyRegistry::new();
    let mut ctx = CompileContext {
      theme: &theme,
      property_registry: &mut properties,
    };

    let plugin = ColorUtility {
      property: "background-color",
      namespaces: &["--background-color", "--color"],
    };
    let candidate = Candidate {
      raw: String::new(),
      variants: Vec::new(),
      important: false,
      modifier: None,
      kind: CandidateKind::Functional {
        root: "bg".to_string(),
        value: Some(value),
      },
    };

    plugin.compile(&candidate, &mut ctx).unwrap()
  }

  #[test]
  fn named_colors_resolve_to_theme_variables() {
    assert_eq!(
      compile(CandidateValue::Named {
        value: "red-500".to_string(),
        fraction: None,
      }),
      Some(vec![AstNode::decl(
        "background-color",
        "var(--color-red-500)"
      )])
    );
  }

  #[test]
  fn unknown_colors_decline() {
    assert_eq!(
      compile(CandidateValue::Named {
        value: "mauve-950".to_string(),
        fraction: None,
      }),
      None
    );
  }

  #[test]
  fn arbitrary_colors_pass_through() {
    assert_eq!(
      compile(CandidateValue::Arbitrary {
        value: "var(--my-color)".to_string(),
      }),
      Some(vec![AstNode::decl("background-color", "var(--my-color)")])
    );
  }

  #[test]
  fn theme_is_unused_for_keywords() {
    let theme = Theme::new();
    let mut properties = PropertyRegistry::new();
    let mut ctx = CompileContext {
      theme: &theme,
      property_registry: &mut properties,
    };

    let plugin = ColorUtility {
      property: "color",
      namespaces: &["--text-color", "--color"],
    };
    let candidate = Candidate {
      raw: String::new(),
      variants: Vec::new(),
      important: false,
      modifier: None,
      kind: CandidateKind::Functional {
        root: "text".to_string(),
        value: Some(CandidateValue::Named {
          value: "current".to_string(),
          fraction: None,
        }),
      },
    };

    assert_eq!(
      plugin.compile(&candidate, &mut ctx).unwrap(),
      Some(vec![AstNode::decl("color", "currentColor")])
    );
  }
}
