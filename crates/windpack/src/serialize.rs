use std::fmt::Write;
use std::sync::Arc;

use itertools::Itertools;
use windpack_core::types::AstNode;

/// Render the final node list as CSS text.
///
/// One rule block per selector, two-space indentation, declarations
/// alphabetized within each block. Nested rules emit as sibling blocks
/// with `&` replaced by the parent selector.
pub fn to_css(nodes: &[Arc<AstNode>]) -> String {
  let mut out = String::new();
  emit_siblings(nodes, None, 0, &mut out);
  out
}

fn emit_siblings(nodes: &[Arc<AstNode>], parent: Option<&str>, indent: usize, out: &mut String) {
  for node in nodes {
    emit(node, parent, indent, out);
  }
}

fn emit(node: &Arc<AstNode>, parent: Option<&str>, indent: usize, out: &mut String) {
  let pad = "  ".repeat(indent);

  match node.as_ref() {
    AstNode::Declaration {
      property,
      value,
      important,
    } => {
      let bang = if *important { " !important" } else { "" };
      let _ = writeln!(out, "{pad}{property}: {value}{bang};");
    }

    AstNode::StyleRule { selector, nodes } => {
      emit_block(selector, nodes, indent, out);
    }

    AstNode::NestedRule { selector, nodes } => {
      let resolved = match parent {
        Some(parent) => selector.replace('&', parent),
        None => selector.clone(),
      };
      emit_block(&resolved, nodes, indent, out);
    }

    AstNode::AtRule { name, params, nodes } => {
      if params.is_empty() {
        let _ = writeln!(out, "{pad}@{name} {{");
      } else {
        let _ = writeln!(out, "{pad}@{name} {params} {{");
      }
      emit_siblings(nodes, parent, indent + 1, out);
      let _ = writeln!(out, "{pad}}}");
    }

    AstNode::Context { nodes } => emit_siblings(nodes, parent, indent, out),

    AstNode::RawCss { content } => {
      out.push_str(content);
      if !content.ends_with('\n') {
        out.push('\n');
      }
    }
  }
}

fn emit_block(selector: &str, children: &[Arc<AstNode>], indent: usize, out: &mut String) {
  let pad = "  ".repeat(indent);

  let declarations: Vec<&Arc<AstNode>> = children
    .iter()
    .filter(|child| matches!(child.as_ref(), AstNode::Declaration { .. }))
    .sorted_by(|a, b| declaration_property(a).cmp(declaration_property(b)))
    .collect();

  let inner: Vec<&Arc<AstNode>> = children
    .iter()
    .filter(|child| {
      !matches!(
        child.as_ref(),
        AstNode::Declaration { .. } | AstNode::NestedRule { .. }
      )
    })
    .collect();

  if !declarations.is_empty() || !inner.is_empty() {
    let _ = writeln!(out, "{pad}{selector} {{");
    for child in declarations {
      emit(child, Some(selector), indent + 1, out);
    }
    for child in inner {
      emit(child, Some(selector), indent + 1, out);
    }
    let _ = writeln!(out, "{pad}}}");
  }

  for child in children {
    if matches!(child.as_ref(), AstNode::NestedRule { .. }) {
      emit(child, Some(selector), indent, out);
    }
  }
}

fn declaration_property(node: &Arc<AstNode>) -> &str {
  match node.as_ref() {
    AstNode::Declaration { property, .. } => property,
    _ => "",
  }
}

#[cfg(test)]
mod tests {
  use indoc::indoc;
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn alphabetizes_declarations_within_a_block() {
    let nodes = vec![AstNode::style_rule(
      ".x",
      vec![
        AstNode::decl("width", "1px"),
        AstNode::decl("display", "flex"),
        AstNode::decl("--tw-translate-x", "0"),
      ],
    )];

    assert_eq!(
      to_css(&nodes),
      indoc! {"
        .x {
          --tw-translate-x: 0;
          display: flex;
          width: 1px;
        }
      "}
    );
  }

  #[test]
  fn nested_rules_emit_as_sibling_blocks() {
    let nodes = vec![AstNode::style_rule(
      ".space-x-2",
      vec![Arc::new(AstNode::NestedRule {
        selector: ":where(& > :not(:last-child))".to_string(),
        nodes: vec![AstNode::decl("margin-inline-start", "0.5rem")],
      })],
    )];

    assert_eq!(
      to_css(&nodes),
      indoc! {"
        :where(.space-x-2 > :not(:last-child)) {
          margin-inline-start: 0.5rem;
        }
      "}
    );
  }

  #[test]
  fn media_blocks_indent_their_rules() {
    let nodes = vec![AstNode::at_rule(
      "media",
      "(min-width: 768px)",
      vec![AstNode::style_rule(
        ".md\\:flex",
        vec![AstNode::decl("display", "flex")],
      )],
    )];

    assert_eq!(
      to_css(&nodes),
      indoc! {"
        @media (min-width: 768px) {
          .md\\:flex {
            display: flex;
          }
        }
      "}
    );
  }

  #[test]
  fn important_declarations_carry_the_bang() {
    let nodes = vec![AstNode::style_rule(
      ".x",
      vec![Arc::new(AstNode::Declaration {
        property: "display".into(),
        value: "flex".into(),
        important: true,
      })],
    )];

    assert_eq!(
      to_css(&nodes),
      indoc! {"
        .x {
          display: flex !important;
        }
      "}
    );
  }
}
