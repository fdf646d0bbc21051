use windpack_core::theme::Theme;

/// The default design-system tables: a spacing base, a representative
/// color palette, breakpoints and blur radii. Deliberately small; real
/// projects layer their own tokens over these through `CompileOptions`.
pub fn default_theme() -> Theme {
  let mut theme = Theme::new();

  theme.insert("--spacing", "0.25rem");

  theme.insert("--color-black", "#000");
  theme.insert("--color-white", "#fff");
  theme.insert("--color-slate-100", "#f1f5f9");
  theme.insert("--color-slate-500", "#64748b");
  theme.insert("--color-slate-900", "#0f172a");
  theme.insert("--color-red-500", "#ef4444");
  theme.insert("--color-red-600", "#dc2626");
  theme.insert("--color-green-500", "#22c55e");
  theme.insert("--color-blue-500", "#3b82f6");
  theme.insert("--color-blue-600", "#2563eb");

  theme.insert("--breakpoint-sm", "640px");
  theme.insert("--breakpoint-md", "768px");
  theme.insert("--breakpoint-lg", "1024px");
  theme.insert("--breakpoint-xl", "1280px");
  theme.insert("--breakpoint-2xl", "1536px");

  theme.insert("--blur", "8px");
  theme.insert("--blur-sm", "4px");
  theme.insert("--blur-md", "12px");
  theme.insert("--blur-lg", "16px");
  theme.insert("--blur-xl", "24px");

  theme
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn palette_resolves_through_the_color_namespace() {
    let theme = default_theme();

    assert_eq!(theme.resolve("red-500", &["--color"]), Some("#ef4444"));
    assert_eq!(theme.get("--breakpoint-md"), Some("768px"));
  }
}
