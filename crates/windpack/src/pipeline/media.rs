use std::sync::Arc;

use indexmap::map::Entry;
use indexmap::IndexMap;
use windpack_core::types::AstNode;

use crate::pipeline::{PipelineContext, Stage};
use crate::sorting::parse_breakpoint_width;

/// Consolidates sibling `@media` blocks with the same normalized query
/// into one, keeping the first occurrence's position, then orders media
/// blocks by ascending summed feature priority.
#[derive(Debug)]
pub struct MediaStage;

impl Stage for MediaStage {
  fn name(&self) -> &'static str {
    "media"
  }

  fn run(&self, cx: &mut PipelineContext) -> Result<(), anyhow::Error> {
    cx.nodes = consolidate(&cx.nodes);
    Ok(())
  }
}

fn consolidate(nodes: &[Arc<AstNode>]) -> Vec<Arc<AstNode>> {
  // First occurrence index per normalized query, with accumulated children
  let mut groups: IndexMap<String, (usize, Vec<Arc<AstNode>>)> = IndexMap::new();
  let mut out: Vec<Option<Arc<AstNode>>> = Vec::with_capacity(nodes.len());

  for node in nodes {
    match node.as_ref() {
      AstNode::AtRule { name, params, nodes: children } if name == "media" => {
        let key = normalize_query(params);
        match groups.entry(key) {
          Entry::Vacant(entry) => {
            entry.insert((out.len(), children.clone()));
            out.push(Some(node.clone()));
          }
          Entry::Occupied(mut entry) => {
            entry.get_mut().1.extend(children.iter().cloned());
            out.push(None);
          }
        }
      }
      AstNode::AtRule { name, .. } if name == "layer" => {
        // Re-runs see layered output; consolidate within each layer
        let children = node.nodes().unwrap_or_default();
        let merged = consolidate(children);
        if merged == children {
          out.push(Some(node.clone()));
        } else {
          out.push(Some(node.with_nodes(merged)));
        }
      }
      _ => out.push(Some(node.clone())),
    }
  }

  // Rebuild merged blocks in their first-occurrence slots
  for (_, (index, accumulated)) in groups {
    let rebuilt = match &out[index] {
      Some(node) => match node.as_ref() {
        AstNode::AtRule { nodes: children, .. } if accumulated.len() != children.len() => {
          node.with_nodes(accumulated)
        }
        _ => continue,
      },
      None => continue,
    };

    out[index] = Some(rebuilt);
  }

  let mut result: Vec<Arc<AstNode>> = out.into_iter().flatten().collect();

  // Non-media nodes first in input order, then media ascending by priority
  result.sort_by_key(|node| match node.as_ref() {
    AstNode::AtRule { name, params, .. } if name == "media" => (1, query_priority(params)),
    _ => (0, 0u64),
  });

  result
}

/// Queries compare with whitespace differences ignored.
fn normalize_query(params: &str) -> String {
  params
    .chars()
    .filter(|char| !char.is_whitespace())
    .collect::<String>()
    .to_ascii_lowercase()
}

/// The sum of the numeric feature values in a query; features without a
/// number contribute nothing, so `(prefers-color-scheme: dark)` sorts
/// ahead of every width query.
fn query_priority(params: &str) -> u64 {
  let mut sum = 0u64;

  for part in params.split([':', ',']) {
    let value = part.trim().trim_end_matches(')');
    if value.starts_with(|char: char| char.is_ascii_digit()) {
      sum += parse_breakpoint_width(value) as u64;
    }
  }

  sum
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  fn media(params: &str, selector: &str) -> Arc<AstNode> {
    AstNode::at_rule(
      "media",
      params,
      vec![AstNode::style_rule(selector, vec![AstNode::decl("display", "flex")])],
    )
  }

  #[test]
  fn merges_same_query_siblings_in_original_relative_order() {
    let nodes = vec![
      media("(min-width: 768px)", ".a"),
      media("(min-width:768px)", ".b"),
    ];

    let merged = consolidate(&nodes);

    assert_eq!(merged.len(), 1);
    assert_eq!(
      merged[0],
      AstNode::at_rule(
        "media",
        "(min-width: 768px)",
        vec![
          AstNode::style_rule(".a", vec![AstNode::decl("display", "flex")]),
          AstNode::style_rule(".b", vec![AstNode::decl("display", "flex")]),
        ],
      )
    );
  }

  #[test]
  fn orders_media_blocks_by_ascending_priority() {
    let nodes = vec![
      media("(min-width: 1024px)", ".lg"),
      AstNode::style_rule(".plain", vec![AstNode::decl("display", "flex")]),
      media("(min-width: 768px)", ".md"),
    ];

    let merged = consolidate(&nodes);

    assert!(matches!(merged[0].as_ref(), AstNode::StyleRule { .. }));
    let params: Vec<&str> = merged[1..]
      .iter()
      .map(|node| match node.as_ref() {
        AstNode::AtRule { params, .. } => params.as_str(),
        _ => unreachable!(),
      })
      .collect();
    assert_eq!(params, vec!["(min-width: 768px)", "(min-width: 1024px)"]);
  }

  #[test]
  fn is_idempotent() {
    let nodes = vec![
      media("(min-width: 768px)", ".a"),
      media("(min-width: 768px)", ".b"),
      media("(min-width: 1024px)", ".c"),
    ];

    let once = consolidate(&nodes);
    let twice = consolidate(&once);

    assert_eq!(once, twice);
  }
}
