/// Depth-aware string segmentation.
///
/// Splitting a class token on `:` or `/` must not split inside brackets,
/// parens, braces or quoted strings, so `[mask-type:luminance]` and
/// `bg-[url(a/b.png)]` survive intact.

/// Split `input` at every top-level occurrence of `separator`.
///
/// Always returns at least one segment. Backslash escapes the next
/// character inside and outside quotes.
pub fn segment(input: &str, separator: char) -> Vec<&str> {
  let mut segments = Vec::new();
  let mut depth = 0i32;
  let mut quote: Option<char> = None;
  let mut escaped = false;
  let mut start = 0;

  for (index, char) in input.char_indices() {
    if escaped {
      escaped = false;
      continue;
    }

    match char {
      '\\' => escaped = true,
      '"' | '\'' => match quote {
        Some(open) if open == char => quote = None,
        Some(_) => {}
        None => quote = Some(char),
      },
      _ if quote.is_some() => {}
      '[' | '(' | '{' => depth += 1,
      ']' | ')' | '}' => depth -= 1,
      _ if char == separator && depth == 0 => {
        segments.push(&input[start..index]);
        start = index + char.len_utf8();
      }
      _ => {}
    }
  }

  segments.push(&input[start..]);
  segments
}

/// Whether every bracket, paren and brace in `input` closes in order,
/// ignoring quoted and escaped characters.
pub fn is_balanced(input: &str) -> bool {
  let mut stack = Vec::new();
  let mut quote: Option<char> = None;
  let mut escaped = false;

  for char in input.chars() {
    if escaped {
      escaped = false;
      continue;
    }

    match char {
      '\\' => escaped = true,
      '"' | '\'' => match quote {
        Some(open) if open == char => quote = None,
        Some(_) => {}
        None => quote = Some(char),
      },
      _ if quote.is_some() => {}
      '[' => stack.push(']'),
      '(' => stack.push(')'),
      '{' => stack.push('}'),
      ']' | ')' | '}' => {
        if stack.pop() != Some(char) {
          return false;
        }
      }
      _ => {}
    }
  }

  stack.is_empty() && quote.is_none()
}
