use std::sync::Arc;

/// One node of the CSS output tree.
///
/// Declarations are leaves; every container node carries an ordered child
/// list. Nodes are shared behind `Arc` and replaced rather than mutated: a
/// pipeline stage that changes nothing must hand back the identical `Arc`,
/// which is how downstream stages cheaply detect no-ops.
#[derive(Clone, Debug, PartialEq)]
pub enum AstNode {
  Declaration {
    property: String,
    value: String,
    important: bool,
  },

  /// A selector with a list of children, e.g. `.m-4:hover { ... }`
  StyleRule {
    selector: String,
    nodes: Vec<Arc<AstNode>>,
  },

  /// A rule nested inside another rule, selector relative to `&`
  NestedRule {
    selector: String,
    nodes: Vec<Arc<AstNode>>,
  },

  AtRule {
    name: String,
    params: String,
    nodes: Vec<Arc<AstNode>>,
  },

  /// A transparent grouping node; serialization flattens it
  Context { nodes: Vec<Arc<AstNode>> },

  /// Verbatim CSS passthrough
  RawCss { content: String },
}

impl AstNode {
  pub fn decl(property: impl Into<String>, value: impl Into<String>) -> Arc<AstNode> {
    Arc::new(AstNode::Declaration {
      property: property.into(),
      value: value.into(),
      important: false,
    })
  }

  pub fn style_rule(selector: impl Into<String>, nodes: Vec<Arc<AstNode>>) -> Arc<AstNode> {
    Arc::new(AstNode::StyleRule {
      selector: selector.into(),
      nodes,
    })
  }

  pub fn at_rule(
    name: impl Into<String>,
    params: impl Into<String>,
    nodes: Vec<Arc<AstNode>>,
  ) -> Arc<AstNode> {
    Arc::new(AstNode::AtRule {
      name: name.into(),
      params: params.into(),
      nodes,
    })
  }

  /// The node's children, when it is a container
  pub fn nodes(&self) -> Option<&[Arc<AstNode>]> {
    match self {
      AstNode::StyleRule { nodes, .. }
      | AstNode::NestedRule { nodes, .. }
      | AstNode::AtRule { nodes, .. }
      | AstNode::Context { nodes } => Some(nodes),
      AstNode::Declaration { .. } | AstNode::RawCss { .. } => None,
    }
  }

  /// Rebuild this container with a new child list
  pub fn with_nodes(&self, nodes: Vec<Arc<AstNode>>) -> Arc<AstNode> {
    match self {
      AstNode::StyleRule { selector, .. } => AstNode::style_rule(selector.clone(), nodes),
      AstNode::NestedRule { selector, .. } => Arc::new(AstNode::NestedRule {
        selector: selector.clone(),
        nodes,
      }),
      AstNode::AtRule { name, params, .. } => AstNode::at_rule(name.clone(), params.clone(), nodes),
      AstNode::Context { .. } => Arc::new(AstNode::Context { nodes }),
      AstNode::Declaration { .. } | AstNode::RawCss { .. } => {
        unreachable!("with_nodes called on a leaf node")
      }
    }
  }
}

/// Map every node of a subtree bottom-up, preserving `Arc` identity for any
/// subtree the mapper leaves untouched.
pub fn map_ast<F>(node: &Arc<AstNode>, map: &F) -> Arc<AstNode>
where
  F: Fn(&Arc<AstNode>) -> Arc<AstNode>,
{
  let rebuilt = match node.nodes() {
    None => node.clone(),
    Some(children) => {
      let mut changed = false;
      let mut next = Vec::with_capacity(children.len());

      for child in children {
        let mapped = map_ast(child, map);
        if !Arc::ptr_eq(&mapped, child) {
          changed = true;
        }
        next.push(mapped);
      }

      if changed {
        node.with_nodes(next)
      } else {
        node.clone()
      }
    }
  };

  map(&rebuilt)
}

/// Map a sibling list, preserving the input `Vec` contents' identity per
/// entry. Returns `None` when nothing changed.
pub fn map_ast_nodes<F>(nodes: &[Arc<AstNode>], map: &F) -> Option<Vec<Arc<AstNode>>>
where
  F: Fn(&Arc<AstNode>) -> Arc<AstNode>,
{
  let mut changed = false;
  let mut next = Vec::with_capacity(nodes.len());

  for node in nodes {
    let mapped = map_ast(node, map);
    if !Arc::ptr_eq(&mapped, node) {
      changed = true;
    }
    next.push(mapped);
  }

  changed.then_some(next)
}
