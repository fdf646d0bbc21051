use std::sync::Arc;

use windpack_core::types::AstNode;

use crate::pipeline::{PipelineContext, Stage};

const LAYER_ORDER: &[&str] = &["theme", "base", "components", "utilities"];

/// Buckets the top-level output into `@layer` blocks, emitted in the fixed
/// theme, base, components, utilities order. Only engaged through
/// compile options; `@property` definitions stay outside the layers.
#[derive(Debug)]
pub struct LayerStage;

impl Stage for LayerStage {
  fn name(&self) -> &'static str {
    "layers"
  }

  fn run(&self, cx: &mut PipelineContext) -> Result<(), anyhow::Error> {
    if !cx.options.layers {
      return Ok(());
    }

    if already_layered(&cx.nodes) {
      return Ok(());
    }

    let mut theme = Vec::new();
    let mut base = Vec::new();
    let mut components = Vec::new();
    let mut utilities = Vec::new();
    let mut trailing = Vec::new();

    for node in &cx.nodes {
      match node.as_ref() {
        // Merge pre-existing layer blocks into their buckets
        AstNode::AtRule { name, params, nodes } if name == "layer" => {
          match LAYER_ORDER.iter().position(|layer| *layer == params.as_str()) {
            Some(0) => theme.extend(nodes.iter().cloned()),
            Some(1) => base.extend(nodes.iter().cloned()),
            Some(2) => components.extend(nodes.iter().cloned()),
            Some(3) => utilities.extend(nodes.iter().cloned()),
            _ => utilities.push(node.clone()),
          }
        }
        AstNode::AtRule { name, .. } if name == "property" => trailing.push(node.clone()),
        AstNode::StyleRule { selector, .. }
          if selector.starts_with(":root") || selector.starts_with(":host") =>
        {
          theme.push(node.clone())
        }
        AstNode::RawCss { .. } => base.push(node.clone()),
        _ => utilities.push(node.clone()),
      }
    }

    let mut out: Vec<Arc<AstNode>> = Vec::new();
    for (name, bucket) in LAYER_ORDER
      .iter()
      .zip([theme, base, components, utilities])
    {
      if !bucket.is_empty() {
        out.push(AstNode::at_rule("layer", *name, bucket));
      }
    }
    out.extend(trailing);

    cx.nodes = out;
    Ok(())
  }
}

fn already_layered(nodes: &[Arc<AstNode>]) -> bool {
  !nodes.is_empty()
    && nodes.iter().all(|node| match node.as_ref() {
      AstNode::AtRule { name, params, .. } => {
        name == "property" || (name == "layer" && LAYER_ORDER.contains(&params.as_str()))
      }
      _ => false,
    })
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use windpack_core::diagnostic::Diagnostics;
  use windpack_core::options::CompileOptions;
  use windpack_core::property_registry::PropertyRegistry;
  use windpack_core::theme::Theme;

  use super::*;

  fn run(nodes: Vec<Arc<AstNode>>) -> Vec<Arc<AstNode>> {
    let theme = Theme::new();
    let options = CompileOptions {
      layers: true,
      ..CompileOptions::default()
    };
    let mut cx = PipelineContext::new(
      Vec::new(),
      PropertyRegistry::new(),
      Diagnostics::default(),
      &theme,
      &options,
    );
    cx.nodes = nodes;
    LayerStage.run(&mut cx).unwrap();
    cx.nodes
  }

  #[test]
  fn buckets_nodes_in_fixed_order() {
    let nodes = vec![
      AstNode::style_rule(".m-4", vec![AstNode::decl("margin", "1rem")]),
      Arc::new(AstNode::RawCss {
        content: "html { line-height: 1.5; }".to_string(),
      }),
      AstNode::style_rule(":root", vec![AstNode::decl("--spacing", "0.25rem")]),
    ];

    let layered = run(nodes);

    let names: Vec<&str> = layered
      .iter()
      .map(|node| match node.as_ref() {
        AstNode::AtRule { params, .. } => params.as_str(),
        _ => unreachable!(),
      })
      .collect();
    assert_eq!(names, vec!["theme", "base", "utilities"]);
  }

  #[test]
  fn is_idempotent() {
    let nodes = vec![AstNode::style_rule(
      ".m-4",
      vec![AstNode::decl("margin", "1rem")],
    )];

    let once = run(nodes);
    let twice = run(once.clone());

    assert_eq!(once, twice);
  }
}
