use std::fmt::Debug;
use std::sync::Arc;

use windpack_core::diagnostic::Diagnostics;
use windpack_core::options::CompileOptions;
use windpack_core::property_registry::PropertyRegistry;
use windpack_core::theme::Theme;
use windpack_core::types::{AstNode, ProcessedClass};
use windpack_core::usage::ThemeUsageTracker;

use crate::sorting::ClassSorter;

pub use color_mix::ColorMixStage;
pub use important::ImportantStage;
pub use layers::LayerStage;
pub use media::MediaStage;
pub use merge::MergeStage;
pub use negative::NegativeStage;
pub use property_registration::PropertyRegistrationStage;
pub use sort::SortStage;
pub use theme_usage::ThemeUsageStage;
pub use validate::ValidateStage;
pub use var_fallback::VarFallbackStage;

mod color_mix;
mod important;
mod layers;
mod media;
mod merge;
mod negative;
mod property_registration;
mod sort;
pub mod tables;
mod theme_usage;
mod validate;
mod var_fallback;

/// Shared state for one pipeline run.
///
/// Everything a stage may touch is an explicit, typed field; stages never
/// communicate through side channels. The theme and options are read-only,
/// the rest is call-scoped and mutable.
pub struct PipelineContext<'a> {
  /// The compiled batch; per-class stages rewrite entries in place by
  /// whole-subtree substitution
  pub classes: Vec<ProcessedClass>,

  /// The top-level node list, produced by the sort stage and restructured
  /// by the media and layer stages
  pub nodes: Vec<Arc<AstNode>>,

  pub property_registry: PropertyRegistry,
  pub theme_usage: ThemeUsageTracker,
  pub diagnostics: Diagnostics,

  pub theme: &'a Theme,
  pub options: &'a CompileOptions,
}

impl<'a> PipelineContext<'a> {
  pub fn new(
    classes: Vec<ProcessedClass>,
    property_registry: PropertyRegistry,
    diagnostics: Diagnostics,
    theme: &'a Theme,
    options: &'a CompileOptions,
  ) -> Self {
    PipelineContext {
      classes,
      nodes: Vec::new(),
      property_registry,
      theme_usage: ThemeUsageTracker::new(),
      diagnostics,
      theme,
      options,
    }
  }
}

/// One pass of the AST-rewriting pipeline.
///
/// Stages must be idempotent: running one twice yields the same AST as
/// running it once. A stage that changes nothing must leave the existing
/// `Arc`s in place so later stages can cheaply detect no-ops.
pub trait Stage: Debug {
  fn name(&self) -> &'static str;

  fn run(&self, cx: &mut PipelineContext) -> Result<(), anyhow::Error>;
}

pub struct Pipeline {
  stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
  /// The declared stage order. Per-class rewrites come first, then the
  /// class sort and the top-level restructuring passes.
  pub fn standard(sorter: Arc<dyn ClassSorter>) -> Self {
    Pipeline {
      stages: vec![
        Box::new(ValidateStage),
        Box::new(ColorMixStage),
        Box::new(ImportantStage),
        Box::new(NegativeStage),
        Box::new(VarFallbackStage),
        Box::new(PropertyRegistrationStage),
        Box::new(ThemeUsageStage),
        Box::new(MergeStage),
        Box::new(SortStage::new(sorter)),
        Box::new(MediaStage),
        Box::new(LayerStage),
      ],
    }
  }

  #[tracing::instrument(level = "trace", skip_all)]
  pub fn run(&self, cx: &mut PipelineContext) -> Result<(), anyhow::Error> {
    for stage in &self.stages {
      tracing::trace!(stage = stage.name(), "Running pipeline stage");
      stage.run(cx)?;
    }

    Ok(())
  }
}
