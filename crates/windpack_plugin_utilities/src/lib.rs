use windpack_core::registry::UtilityRegistry;

pub use theme::default_theme;

pub mod colors;
pub mod filters;
pub mod sizing;
pub mod spacing;
pub mod statics;
pub mod translate;

mod theme;
mod value;

/// Register every built-in utility.
///
/// Registration is explicit and compile-time: the registry is a plain
/// ordered list plus lookup indexes, nothing is discovered by scanning.
pub fn register(registry: &mut UtilityRegistry) {
  statics::register(registry);
  spacing::register(registry);
  sizing::register(registry);
  colors::register(registry);
  translate::register(registry);
  filters::register(registry);
}
