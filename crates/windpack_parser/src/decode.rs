use once_cell::sync::Lazy;

use crate::value_ast::{self, ValueNode};

/// Decode the inside of an arbitrary value (`[...]` or `(...)` contents).
///
/// Underscores stand in for spaces so a value can live inside a class
/// attribute; the conversion is selective: variable and theme-path names
/// keep their underscores, `url()` payloads are never touched, everything
/// else converts. Escaped `\_` always yields a literal underscore.
pub fn decode_arbitrary_value(input: &str) -> String {
  if !input.contains('(') {
    return convert_underscores(input);
  }

  let nodes = value_ast::parse(input);
  let decoded = decode_nodes(&nodes, false);
  let serialized = value_ast::serialize(&decoded);

  add_math_operator_spacing(&serialized)
}

/// Unescaped `_` becomes a space; `\_` becomes a literal underscore.
pub fn convert_underscores(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  let mut chars = input.chars().peekable();

  while let Some(char) = chars.next() {
    match char {
      '\\' if chars.peek() == Some(&'_') => {
        out.push('_');
        chars.next();
      }
      '_' => out.push(' '),
      _ => out.push(char),
    }
  }

  out
}

fn is_var_like(name: &str) -> bool {
  name == "var" || name.ends_with("_var") || name == "theme" || name.ends_with("_theme")
}

fn is_url_like(name: &str) -> bool {
  name == "url" || name.ends_with("_url")
}

fn decode_nodes(nodes: &[ValueNode], exempt: bool) -> Vec<ValueNode> {
  nodes
    .iter()
    .map(|node| match node {
      ValueNode::Word(text) => {
        if exempt {
          node.clone()
        } else {
          ValueNode::Word(convert_underscores(text))
        }
      }
      ValueNode::Separator(_) => node.clone(),
      ValueNode::Function { name, nodes } => {
        if is_url_like(name) {
          // The name may carry encoded spaces, the payload never does
          return ValueNode::Function {
            name: convert_underscores(name),
            nodes: nodes.clone(),
          };
        }

        if is_var_like(name) {
          // The first argument is a variable or theme-path name, not free
          // text; fallback arguments convert as usual
          let first_comma = nodes
            .iter()
            .position(|node| matches!(node, ValueNode::Separator(text) if text.contains(',')));

          let decoded = match first_comma {
            None => decode_nodes(nodes, true),
            Some(comma) => {
              let mut decoded = decode_nodes(&nodes[..comma], true);
              decoded.extend(decode_nodes(&nodes[comma..], false));
              decoded
            }
          };

          return ValueNode::Function {
            name: name.clone(),
            nodes: decoded,
          };
        }

        ValueNode::Function {
          name: convert_underscores(name),
          nodes: decode_nodes(nodes, false),
        }
      }
    })
    .collect()
}

static MATH_FUNCTIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
  vec![
    "calc", "min", "max", "clamp", "mod", "rem", "sin", "cos", "tan", "pow", "sqrt", "hypot",
    "log", "exp", "round",
  ]
});

fn is_math_name_char(char: char) -> bool {
  char.is_ascii_lowercase() || char.is_ascii_digit()
}

/// Insert spacing around arithmetic operators inside math functions, so
/// `calc(1+2)` serializes as `calc(1 + 2)` while `1e-5`, unary signs and
/// doubled sign sequences stay untouched.
pub fn add_math_operator_spacing(input: &str) -> String {
  if !MATH_FUNCTIONS.iter().any(|name| input.contains(name)) {
    return input.to_string();
  }

  let chars: Vec<char> = input.chars().collect();
  let mut result = String::with_capacity(input.len());
  // One entry per open paren: are we formatting inside it?
  let mut formattable: Vec<bool> = Vec::new();

  for (index, &char) in chars.iter().enumerate() {
    match char {
      '(' => {
        result.push(char);

        let mut start = index;
        while start > 0 && is_math_name_char(chars[start - 1]) {
          start -= 1;
        }
        let name: String = chars[start..index].iter().collect();

        let inside_math = *formattable.last().unwrap_or(&false);
        let enter = MATH_FUNCTIONS.contains(&name.as_str()) || (name.is_empty() && inside_math);
        formattable.push(enter);
      }
      ')' => {
        result.push(char);
        formattable.pop();
      }
      ',' if *formattable.last().unwrap_or(&false) => {
        result.push_str(", ");
      }
      ' ' if *formattable.last().unwrap_or(&false) && result.ends_with(' ') => {
        // Collapse doubled whitespace introduced by the rules above
      }
      '+' | '-' | '*' | '/' if *formattable.last().unwrap_or(&false) => {
        let trimmed = result.trim_end();
        let previous = trimmed.chars().last();

        // A sign right after an opener, separator or another operator is
        // unary (or a doubled sign sequence), not an operation
        let unary = matches!(previous, None | Some('(' | ',' | '+' | '-' | '*' | '/'));

        // Scientific notation: `1e-5`
        let scientific = (char == '-' || char == '+')
          && previous == Some('e')
          && trimmed
            .chars()
            .rev()
            .nth(1)
            .is_some_and(|digit| digit.is_ascii_digit() || digit == '.');

        // A hyphen joining identifier characters is part of a keyword such
        // as `to-zero`
        let identifier = char == '-'
          && previous.is_some_and(|prev| prev.is_ascii_alphabetic())
          && chars
            .get(index + 1)
            .is_some_and(|next| next.is_ascii_alphabetic());

        if unary || scientific || identifier {
          result.push(char);
        } else {
          let trimmed_len = trimmed.len();
          result.truncate(trimmed_len);
          result.push(' ');
          result.push(char);
          result.push(' ');
        }
      }
      _ => result.push(char),
    }
  }

  result
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn converts_underscores_outside_functions() {
    assert_eq!(decode_arbitrary_value("1px_solid_black"), "1px solid black");
    assert_eq!(decode_arbitrary_value("hello\\_world"), "hello_world");
  }

  #[test]
  fn exempts_the_first_var_argument() {
    assert_eq!(
      decode_arbitrary_value("var(--my_var,1px_2px)"),
      "var(--my_var,1px 2px)"
    );
    assert_eq!(decode_arbitrary_value("var(--my_var)"), "var(--my_var)");
  }

  #[test]
  fn exempts_theme_paths() {
    assert_eq!(
      decode_arbitrary_value("theme(spacing.1_5)"),
      "theme(spacing.1_5)"
    );
  }

  #[test]
  fn leaves_url_payloads_alone() {
    assert_eq!(
      decode_arbitrary_value("url(https://a.example/b_c.png)"),
      "url(https://a.example/b_c.png)"
    );
  }

  #[test]
  fn converts_other_function_arguments() {
    assert_eq!(
      decode_arbitrary_value("drop-shadow(0_1px_2px_black)"),
      "drop-shadow(0 1px 2px black)"
    );
  }

  #[test]
  fn spaces_math_operators() {
    assert_eq!(decode_arbitrary_value("calc(1+2)"), "calc(1 + 2)");
    assert_eq!(
      decode_arbitrary_value("calc(100%-2rem)"),
      "calc(100% - 2rem)"
    );
    assert_eq!(
      decode_arbitrary_value("calc(var(--x)*-1)"),
      "calc(var(--x) * -1)"
    );
    assert_eq!(
      decode_arbitrary_value("clamp(1rem,2vw+1rem,3rem)"),
      "clamp(1rem, 2vw + 1rem, 3rem)"
    );
  }

  #[test]
  fn spaces_operators_in_nested_anonymous_parens() {
    assert_eq!(
      decode_arbitrary_value("calc((100%-2rem)/2)"),
      "calc((100% - 2rem) / 2)"
    );
  }

  #[test]
  fn keeps_scientific_notation_and_sign_sequences() {
    assert_eq!(decode_arbitrary_value("calc(1e-5*2)"), "calc(1e-5 * 2)");
    assert_eq!(decode_arbitrary_value("calc(1--2)"), "calc(1 - -2)");
    assert_eq!(decode_arbitrary_value("calc(1+-2)"), "calc(1 + -2)");
  }

  #[test]
  fn keeps_keyword_hyphens() {
    assert_eq!(
      decode_arbitrary_value("round(to-zero,1px)"),
      "round(to-zero, 1px)"
    );
  }

  #[test]
  fn leaves_non_math_functions_unspaced() {
    assert_eq!(
      decode_arbitrary_value("var(--a-b)"),
      "var(--a-b)"
    );
  }
}
