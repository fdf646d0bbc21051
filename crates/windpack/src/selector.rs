/// Escape a class token for use in a selector.
///
/// Everything outside the CSS identifier alphabet gets a backslash, which
/// is how `hover:lg:-translate-x-1/2` becomes a valid class selector.
pub fn escape_class_name(name: &str) -> String {
  let mut out = String::with_capacity(name.len());

  for char in name.chars() {
    if char.is_ascii_alphanumeric() || char == '-' || char == '_' {
      out.push(char);
    } else {
      out.push('\\');
      out.push(char);
    }
  }

  out
}
