use std::collections::HashSet;
use std::sync::Arc;

use windpack_core::options::MergeStrategy;
use windpack_core::types::AstNode;

use crate::pipeline::{PipelineContext, Stage};

/// Resolves duplicate properties within a selector block. With the
/// default last-wins strategy the final declaration for a property
/// survives in its position; first-wins keeps the earliest.
#[derive(Debug)]
pub struct MergeStage;

impl Stage for MergeStage {
  fn name(&self) -> &'static str {
    "merge"
  }

  fn run(&self, cx: &mut PipelineContext) -> Result<(), anyhow::Error> {
    let strategy = cx.options.merge_strategy;

    for class in cx.classes.iter_mut() {
      let mut changed = false;
      let merged: Vec<Arc<AstNode>> = class
        .nodes
        .iter()
        .map(|node| {
          let next = merge_subtree(node, strategy);
          if !Arc::ptr_eq(&next, node) {
            changed = true;
          }
          next
        })
        .collect();

      if changed {
        class.nodes = merged;
      }
    }

    Ok(())
  }
}

fn merge_subtree(node: &Arc<AstNode>, strategy: MergeStrategy) -> Arc<AstNode> {
  let Some(children) = node.nodes() else {
    return node.clone();
  };

  let mut changed = false;
  let mut merged: Vec<Arc<AstNode>> = Vec::with_capacity(children.len());

  for child in children {
    let next = merge_subtree(child, strategy);
    if !Arc::ptr_eq(&next, child) {
      changed = true;
    }
    merged.push(next);
  }

  let deduped = dedupe_declarations(&merged, strategy);
  if let Some(deduped) = deduped {
    return node.with_nodes(deduped);
  }

  if changed {
    node.with_nodes(merged)
  } else {
    node.clone()
  }
}

/// `None` when the sibling list has no duplicate properties.
fn dedupe_declarations(
  children: &[Arc<AstNode>],
  strategy: MergeStrategy,
) -> Option<Vec<Arc<AstNode>>> {
  let mut drop_indices = HashSet::new();
  let mut seen: Vec<(String, usize)> = Vec::new();

  for (index, child) in children.iter().enumerate() {
    let AstNode::Declaration { property, .. } = child.as_ref() else {
      continue;
    };

    match seen.iter().position(|(name, _)| name == property) {
      None => seen.push((property.clone(), index)),
      Some(entry) => match strategy {
        MergeStrategy::LastWins => {
          drop_indices.insert(seen[entry].1);
          seen[entry].1 = index;
        }
        MergeStrategy::FirstWins => {
          drop_indices.insert(index);
        }
      },
    }
  }

  if drop_indices.is_empty() {
    return None;
  }

  Some(
    children
      .iter()
      .enumerate()
      .filter(|(index, _)| !drop_indices.contains(index))
      .map(|(_, child)| child.clone())
      .collect(),
  )
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  fn rule() -> Arc<AstNode> {
    AstNode::style_rule(
      ".x",
      vec![
        AstNode::decl("color", "red"),
        AstNode::decl("display", "flex"),
        AstNode::decl("color", "blue"),
      ],
    )
  }

  #[test]
  fn last_wins_keeps_the_final_declaration() {
    let merged = merge_subtree(&rule(), MergeStrategy::LastWins);

    assert_eq!(
      merged,
      AstNode::style_rule(
        ".x",
        vec![
          AstNode::decl("display", "flex"),
          AstNode::decl("color", "blue"),
        ],
      )
    );
  }

  #[test]
  fn first_wins_keeps_the_earliest() {
    let merged = merge_subtree(&rule(), MergeStrategy::FirstWins);

    assert_eq!(
      merged,
      AstNode::style_rule(
        ".x",
        vec![
          AstNode::decl("color", "red"),
          AstNode::decl("display", "flex"),
        ],
      )
    );
  }

  #[test]
  fn unique_blocks_keep_pointer_identity() {
    let rule = AstNode::style_rule(".x", vec![AstNode::decl("color", "red")]);
    let merged = merge_subtree(&rule, MergeStrategy::LastWins);

    assert!(Arc::ptr_eq(&rule, &merged));
  }
}
