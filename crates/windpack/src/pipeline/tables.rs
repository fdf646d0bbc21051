use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Properties whose positive declarations the negation stage may rewrite.
/// Function-valued properties such as `filter` are absent on purpose:
/// their plugins negate inside the function instead.
pub static NEGATION_CAPABLE_PROPERTIES: &[&str] = &[
  "margin",
  "margin-top",
  "margin-right",
  "margin-bottom",
  "margin-left",
  "margin-inline",
  "margin-block",
  "margin-inline-start",
  "margin-block-start",
  "inset",
  "inset-inline",
  "inset-block",
  "top",
  "right",
  "bottom",
  "left",
  "--tw-translate-x",
  "--tw-translate-y",
  "z-index",
  "order",
];

/// Properties the color-mix opacity stage may wrap.
pub static COLOR_PROPERTIES: &[&str] = &[
  "color",
  "background-color",
  "border-color",
  "outline-color",
  "text-decoration-color",
  "fill",
  "stroke",
  "--tw-gradient-from",
  "--tw-gradient-via",
  "--tw-gradient-to",
];

/// Defaults injected into bare `var(--tw-*)` references. Variables with no
/// entry are internal tokens that need no documented default and stay bare.
pub static VAR_FALLBACKS: Lazy<IndexMap<&'static str, &'static str>> = Lazy::new(|| {
  IndexMap::from_iter([
    ("--tw-translate-x", "0"),
    ("--tw-translate-y", "0"),
    ("--tw-ring-offset-width", "0px"),
    ("--tw-ring-offset-shadow", "0 0 #0000"),
    ("--tw-ring-shadow", "0 0 #0000"),
    ("--tw-shadow", "0 0 #0000"),
  ])
});

pub struct KnownProperty {
  pub syntax: &'static str,
  pub inherits: bool,
  pub initial_value: Option<&'static str>,
}

/// `@property` definitions for the custom properties the catalog can emit.
pub static KNOWN_PROPERTIES: Lazy<IndexMap<&'static str, KnownProperty>> = Lazy::new(|| {
  let entry = |syntax, inherits, initial_value| KnownProperty {
    syntax,
    inherits,
    initial_value,
  };

  IndexMap::from_iter([
    ("--tw-translate-x", entry("*", false, Some("0"))),
    ("--tw-translate-y", entry("*", false, Some("0"))),
    ("--tw-ring-offset-width", entry("<length>", false, Some("0px"))),
    ("--tw-shadow", entry("*", false, Some("0 0 #0000"))),
    ("--tw-gradient-position", entry("*", false, None)),
    ("--tw-gradient-from", entry("<color>", false, Some("#0000"))),
    ("--tw-gradient-via", entry("<color>", false, Some("#0000"))),
    ("--tw-gradient-to", entry("<color>", false, Some("#0000"))),
    ("--tw-gradient-stops", entry("*", false, None)),
  ])
});

/// Gradient composition always emits all stops together, so referencing
/// any member registers the entire family.
pub static GRADIENT_FAMILY: &[&str] = &[
  "--tw-gradient-position",
  "--tw-gradient-from",
  "--tw-gradient-via",
  "--tw-gradient-to",
  "--tw-gradient-stops",
];

pub fn is_gradient_variable(name: &str) -> bool {
  name.starts_with("--tw-gradient-")
}
