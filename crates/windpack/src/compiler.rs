use std::sync::Arc;

use anyhow::anyhow;
use indexmap::IndexSet;
use windpack_core::diagnostic::{Diagnostic, Diagnostics};
use windpack_core::options::CompileOptions;
use windpack_core::plugin::CompileContext;
use windpack_core::property_registry::PropertyRegistry;
use windpack_core::registry::UtilityRegistry;
use windpack_core::theme::Theme;
use windpack_core::types::{AstNode, Candidate, CandidateKind, ProcessedClass};
use windpack_parser::{extract_class_tokens, parse_candidate};

use crate::pipeline::{Pipeline, PipelineContext};
use crate::selector::escape_class_name;
use crate::serialize;
use crate::sorting::{ClassSorter, DefaultSorter};
use crate::variants::{resolve_variant, ResolvedVariant};

/// The compiled CSS plus one diagnostic per dropped token. Bad input never
/// fails the batch; a token either fully succeeds or contributes nothing.
#[derive(Debug)]
pub struct CompileResult {
  pub css: String,
  pub diagnostics: Diagnostics,
}

/// A build is a pure function from (input class strings, theme, registry)
/// to CSS text. The registry and theme are built once and shared
/// read-only; every mutable piece of a compile call is call-scoped, so
/// independent calls may run concurrently.
pub struct Compiler {
  registry: Arc<UtilityRegistry>,
  theme: Arc<Theme>,
  options: CompileOptions,
  sorter: Arc<dyn ClassSorter>,
}

impl Compiler {
  pub fn new(
    registry: Arc<UtilityRegistry>,
    theme: Theme,
    options: CompileOptions,
  ) -> Result<Self, anyhow::Error> {
    if registry.is_empty() {
      return Err(anyhow!(
        "utility registry is empty; register plugins before constructing a compiler"
      ));
    }

    let mut theme = theme;
    if !options.theme.is_empty() {
      theme.merge(options.theme.clone());
    }

    Ok(Compiler {
      registry,
      theme: Arc::new(theme),
      options,
      sorter: Arc::new(DefaultSorter),
    })
  }

  /// A compiler over the built-in catalog and default theme tables.
  pub fn with_defaults(options: CompileOptions) -> Result<Self, anyhow::Error> {
    let mut registry = UtilityRegistry::new();
    windpack_plugin_utilities::register(&mut registry);

    Self::new(
      Arc::new(registry),
      windpack_plugin_utilities::default_theme(),
      options,
    )
  }

  pub fn with_sorter(mut self, sorter: Arc<dyn ClassSorter>) -> Self {
    self.sorter = sorter;
    self
  }

  /// Compile a batch of class strings into CSS.
  ///
  /// Inputs may each contain multiple space-separated tokens; duplicates
  /// across all inputs compile once, first occurrence wins.
  #[tracing::instrument(level = "trace", skip_all)]
  pub fn compile<S: AsRef<str>>(&self, inputs: &[S]) -> Result<CompileResult, anyhow::Error> {
    let mut tokens: IndexSet<&str> = IndexSet::new();
    for input in inputs {
      tokens.extend(extract_class_tokens(input.as_ref()));
    }

    let mut diagnostics = Diagnostics::default();
    let mut property_registry = PropertyRegistry::new();
    let mut classes = Vec::new();

    for token in tokens {
      if let Some(class) = self.compile_token(token, &mut property_registry, &mut diagnostics)? {
        classes.push(class);
      }
    }

    let mut cx = PipelineContext::new(
      classes,
      property_registry,
      diagnostics,
      &self.theme,
      &self.options,
    );
    Pipeline::standard(self.sorter.clone()).run(&mut cx)?;

    Ok(CompileResult {
      css: serialize::to_css(&cx.nodes),
      diagnostics: cx.diagnostics,
    })
  }

  /// One token to one processed class, or a diagnostic. Only internal
  /// invariant violations surface as errors.
  fn compile_token(
    &self,
    token: &str,
    property_registry: &mut PropertyRegistry,
    diagnostics: &mut Diagnostics,
  ) -> Result<Option<ProcessedClass>, anyhow::Error> {
    let candidate = match parse_candidate(token, &self.registry) {
      Ok(candidate) => candidate,
      Err(error) => {
        tracing::debug!(%token, %error, "Dropping unparseable token");
        diagnostics.push(Diagnostic::invalid_candidate(token, error.to_string()));
        return Ok(None);
      }
    };

    let mut resolved_variants = Vec::with_capacity(candidate.variants.len());
    for variant in &candidate.variants {
      match resolve_variant(variant, &self.theme) {
        Some(resolved) => resolved_variants.push(resolved),
        None => {
          tracing::debug!(%token, %variant, "Dropping token with unknown variant");
          diagnostics.push(Diagnostic::invalid_candidate(
            token,
            format!("unknown variant `{variant}`"),
          ));
          return Ok(None);
        }
      }
    }

    let Some(nodes) = self.compile_candidate(&candidate, property_registry, diagnostics)? else {
      return Ok(None);
    };

    Ok(Some(ProcessedClass::new(
      candidate.clone(),
      apply_variants(&candidate, resolved_variants, nodes),
    )))
  }

  fn compile_candidate(
    &self,
    candidate: &Candidate,
    property_registry: &mut PropertyRegistry,
    diagnostics: &mut Diagnostics,
  ) -> Result<Option<Vec<Arc<AstNode>>>, anyhow::Error> {
    let mut ctx = CompileContext {
      theme: &self.theme,
      property_registry,
    };

    match &candidate.kind {
      CandidateKind::ArbitraryProperty { property, value } => {
        Ok(Some(vec![AstNode::decl(property.clone(), value.clone())]))
      }

      CandidateKind::Static { root } => {
        let plugin = self
          .registry
          .static_plugin(root)
          .ok_or_else(|| anyhow!("static utility `{root}` matched but is not registered"))?;

        match plugin.compile(candidate, &mut ctx)? {
          Some(nodes) => Ok(Some(nodes)),
          None => {
            diagnostics.push(Diagnostic::invalid_candidate(
              candidate.raw.clone(),
              format!("`{root}` does not take a value or modifier"),
            ));
            Ok(None)
          }
        }
      }

      CandidateKind::Functional { root, .. } => match self.registry.functional_plugin(root) {
        None => {
          tracing::debug!(token = %candidate.raw, %root, "Unknown utility");
          diagnostics.push(Diagnostic::unknown_utility(candidate.raw.clone(), root));
          Ok(None)
        }
        Some(plugin) => match plugin.compile(candidate, &mut ctx)? {
          Some(nodes) => Ok(Some(nodes)),
          None => {
            diagnostics.push(Diagnostic::invalid_candidate(
              candidate.raw.clone(),
              format!("`{root}` does not support this value or modifier"),
            ));
            Ok(None)
          }
        },
      },
    }
  }
}

/// Wrap compiled declarations in the candidate's selector and variant
/// context: pseudo-class suffixes on the class selector, media wrappers
/// nested outermost-first.
fn apply_variants(
  candidate: &Candidate,
  resolved: Vec<ResolvedVariant>,
  nodes: Vec<Arc<AstNode>>,
) -> Vec<Arc<AstNode>> {
  let mut pseudo = String::new();
  let mut media = Vec::new();

  for variant in resolved {
    match variant {
      ResolvedVariant::PseudoClass(suffix) => pseudo.push_str(suffix),
      ResolvedVariant::Media(query) => media.push(query),
    }
  }

  let selector = format!(".{}{}", escape_class_name(&candidate.raw), pseudo);
  let mut tree = vec![AstNode::style_rule(selector, nodes)];

  for query in media.into_iter().rev() {
    tree = vec![AstNode::at_rule("media", query, tree)];
  }

  tree
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  fn compiler() -> Compiler {
    Compiler::with_defaults(CompileOptions::default()).unwrap()
  }

  #[test]
  fn construction_fails_on_an_empty_registry() {
    let result = Compiler::new(
      Arc::new(UtilityRegistry::new()),
      Theme::new(),
      CompileOptions::default(),
    );

    assert!(result.is_err());
  }

  #[test]
  fn duplicate_tokens_compile_once() {
    let result = compiler().compile(&["flex flex", "flex"]).unwrap();

    assert_eq!(result.css.matches("display: flex").count(), 1);
  }

  #[test]
  fn one_bad_token_never_affects_the_others() {
    let result = compiler().compile(&["flex bg-[red w-1/2"]).unwrap();

    assert!(result.css.contains(".flex"));
    assert!(result.css.contains(".w-1\\/2"));
    assert_eq!(result.diagnostics.as_ref().len(), 1);
    assert_eq!(result.diagnostics.as_ref()[0].token, "bg-[red");
  }

  #[test]
  fn unknown_utilities_surface_the_guessed_root() {
    let result = compiler().compile(&["foo-bar-4"]).unwrap();

    assert!(result.css.is_empty());
    assert_eq!(
      result.diagnostics.as_ref()[0].message,
      "Unknown utility `foo`"
    );
  }
}
