use std::sync::Arc;

use windpack_core::plugin::{CompileContext, UtilityPlugin};
use windpack_core::registry::UtilityRegistry;
use windpack_core::types::{AstNode, Candidate, CandidateValue};

use crate::value::{functional_value, is_plain_number};

/// `hue-rotate-15` and friends. The `filter` property is not
/// negation-capable, so `-hue-rotate-15` negates inside the function here
/// rather than in the pipeline's negation stage.
#[derive(Debug)]
pub struct HueRotateUtility;

impl UtilityPlugin for HueRotateUtility {
  fn compile(
    &self,
    candidate: &Candidate,
    _ctx: &mut CompileContext,
  ) -> Result<Option<Vec<Arc<AstNode>>>, anyhow::Error> {
    if candidate.modifier.is_some() {
      return Ok(None);
    }

    let angle = match functional_value(candidate) {
      Some(CandidateValue::Arbitrary { value }) => value.clone(),
      Some(CandidateValue::Named { value, fraction: None }) if is_plain_number(value) => {
        format!("{value}deg")
      }
      _ => return Ok(None),
    };

    let value = if candidate.is_negative() {
      format!("hue-rotate(calc({angle} * -1))")
    } else {
      format!("hue-rotate({angle})")
    };

    Ok(Some(vec![AstNode::decl("filter", value)]))
  }

  fn supports_negative(&self) -> bool {
    true
  }
}

#[derive(Debug)]
pub struct BlurUtility;

impl UtilityPlugin for BlurUtility {
  fn compile(
    &self,
    candidate: &Candidate,
    ctx: &mut CompileContext,
  ) -> Result<Option<Vec<Arc<AstNode>>>, anyhow::Error> {
    if candidate.modifier.is_some() {
      return Ok(None);
    }

    let radius = match functional_value(candidate) {
      None => ctx.theme.get("--blur").map(str::to_string),
      Some(CandidateValue::Arbitrary { value }) => Some(value.clone()),
      Some(CandidateValue::Named { value, fraction: None }) => ctx
        .theme
        .resolve(value, &["--blur"])
        .map(str::to_string),
      Some(CandidateValue::Named { .. }) => None,
    };

    let Some(radius) = radius else {
      return Ok(None);
    };

    Ok(Some(vec![AstNode::decl("filter", format!("blur({radius})"))]))
  }
}

#[derive(Debug)]
pub struct OpacityUtility;

impl UtilityPlugin for OpacityUtility {
  fn compile(
    &self,
    candidate: &Candidate,
    _ctx: &mut CompileContext,
  ) -> Result<Option<Vec<Arc<AstNode>>>, anyhow::Error> {
    if candidate.modifier.is_some() {
      return Ok(None);
    }

    let value = match functional_value(candidate) {
      Some(CandidateValue::Arbitrary { value }) => value.clone(),
      Some(CandidateValue::Named { value, fraction: None }) if is_plain_number(value) => {
        format!("{value}%")
      }
      _ => return Ok(None),
    };

    Ok(Some(vec![AstNode::decl("opacity", value)]))
  }
}

/// Bare-numeric stacking utilities; negative values come straight from
/// the negation stage since `z-index` and `order` are negation-capable.
#[derive(Debug)]
pub struct IntegerUtility {
  property: &'static str,
}

impl UtilityPlugin for IntegerUtility {
  fn compile(
    &self,
    candidate: &Candidate,
    _ctx: &mut CompileContext,
  ) -> Result<Option<Vec<Arc<AstNode>>>, anyhow::Error> {
    if candidate.modifier.is_some() {
      return Ok(None);
    }

    let value = match functional_value(candidate) {
      Some(CandidateValue::Arbitrary { value }) => value.clone(),
      Some(CandidateValue::Named { value, fraction: None })
        if value == "auto" || value.bytes().all(|byte| byte.is_ascii_digit()) =>
      {
        value.clone()
      }
      _ => return Ok(None),
    };

    Ok(Some(vec![AstNode::decl(self.property, value)]))
  }

  fn supports_negative(&self) -> bool {
    true
  }
}

pub fn register(registry: &mut UtilityRegistry) {
  registry.register_functional("hue-rotate", Arc::new(HueRotateUtility));
  registry.register_functional("blur", Arc::new(BlurUtility));
  registry.register_functional("opacity", Arc::new(OpacityUtility));
  registry.register_functional("z", Arc::new(IntegerUtility { property: "z-index" }));
  registry.register_functional("order", Arc::new(IntegerUtility { property: "order" }));
}
