use std::sync::Arc;

use windpack_core::types::{map_ast_nodes, AstNode};

use crate::pipeline::tables::VAR_FALLBACKS;
use crate::pipeline::{PipelineContext, Stage};

/// Gives every bare `var(--tw-*)` reference its default from the fallback
/// table. References that already carry a fallback, and variables with no
/// table entry, stay as they are.
#[derive(Debug)]
pub struct VarFallbackStage;

impl Stage for VarFallbackStage {
  fn name(&self) -> &'static str {
    "var-fallback"
  }

  fn run(&self, cx: &mut PipelineContext) -> Result<(), anyhow::Error> {
    for class in cx.classes.iter_mut() {
      if let Some(nodes) = map_ast_nodes(&class.nodes, &|node| match node.as_ref() {
        AstNode::Declaration {
          property,
          value,
          important,
        } => {
          let injected = inject_fallbacks(value);
          if injected == *value {
            node.clone()
          } else {
            Arc::new(AstNode::Declaration {
              property: property.clone(),
              value: injected,
              important: *important,
            })
          }
        }
        _ => node.clone(),
      }) {
        class.nodes = nodes;
      }
    }

    Ok(())
  }
}

/// Rewrite every `var(...)` reference in `value`, recursing into nested
/// references inside fallback expressions.
fn inject_fallbacks(value: &str) -> String {
  let mut out = String::with_capacity(value.len());
  let mut rest = value;

  while let Some(position) = rest.find("var(") {
    let (before, from_var) = rest.split_at(position);
    out.push_str(before);

    let open = "var(".len();
    let Some(close) = matching_paren(&from_var[open..]) else {
      // Unbalanced; emit verbatim and stop scanning
      out.push_str(from_var);
      return out;
    };

    let inner = &from_var[open..open + close];
    out.push_str("var(");
    out.push_str(&rewrite_reference(inner));
    out.push(')');

    rest = &from_var[open + close + 1..];
  }

  out.push_str(rest);
  out
}

fn rewrite_reference(inner: &str) -> String {
  let has_fallback = top_level_comma(inner).is_some();

  if has_fallback {
    // Nested references inside the fallback may still need defaults
    return inject_fallbacks(inner);
  }

  let name = inner.trim();
  match VAR_FALLBACKS.get(name) {
    Some(fallback) => format!("{name}, {fallback}"),
    None => inner.to_string(),
  }
}

fn matching_paren(input: &str) -> Option<usize> {
  let mut depth = 0i32;
  for (index, char) in input.char_indices() {
    match char {
      '(' => depth += 1,
      ')' => {
        if depth == 0 {
          return Some(index);
        }
        depth -= 1;
      }
      _ => {}
    }
  }
  None
}

fn top_level_comma(input: &str) -> Option<usize> {
  let mut depth = 0i32;
  for (index, char) in input.char_indices() {
    match char {
      '(' => depth += 1,
      ')' => depth -= 1,
      ',' if depth == 0 => return Some(index),
      _ => {}
    }
  }
  None
}
