/// A minimal recursive tree mirroring CSS function nesting.
///
/// Built only while decoding an arbitrary value that contains `(`; the
/// decoder rewrites words selectively and serializes straight back to a
/// string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueNode {
  Word(String),
  Function { name: String, nodes: Vec<ValueNode> },
  /// A run of commas/whitespace between sibling values
  Separator(String),
}

impl ValueNode {
  pub fn word(text: impl Into<String>) -> ValueNode {
    ValueNode::Word(text.into())
  }

  pub fn function(name: impl Into<String>, nodes: Vec<ValueNode>) -> ValueNode {
    ValueNode::Function {
      name: name.into(),
      nodes,
    }
  }

  pub fn separator(text: impl Into<String>) -> ValueNode {
    ValueNode::Separator(text.into())
  }
}

fn is_separator_char(char: char) -> bool {
  char == ',' || char == ' ' || char == '\t'
}

/// Parse a raw value into nodes. Unbalanced parens are tolerated: a
/// missing closer simply ends every open function at the end of input.
pub fn parse(input: &str) -> Vec<ValueNode> {
  let mut root = Vec::new();
  // Function frames awaiting their closing paren
  let mut stack: Vec<(String, Vec<ValueNode>)> = Vec::new();
  let mut word = String::new();

  fn push_node(stack: &mut [(String, Vec<ValueNode>)], root: &mut Vec<ValueNode>, node: ValueNode) {
    match stack.last_mut() {
      Some((_, nodes)) => nodes.push(node),
      None => root.push(node),
    }
  }

  let mut chars = input.chars().peekable();
  while let Some(char) = chars.next() {
    match char {
      '(' => {
        // The word accumulated so far names the function; no word means an
        // anonymous grouping
        stack.push((std::mem::take(&mut word), Vec::new()));
      }
      ')' => {
        if !word.is_empty() {
          let node = ValueNode::Word(std::mem::take(&mut word));
          push_node(&mut stack, &mut root, node);
        }
        match stack.pop() {
          Some((name, nodes)) => {
            let node = ValueNode::Function { name, nodes };
            push_node(&mut stack, &mut root, node);
          }
          // Stray closer, keep it as text
          None => push_node(&mut stack, &mut root, ValueNode::word(")")),
        }
      }
      _ if is_separator_char(char) => {
        if !word.is_empty() {
          let node = ValueNode::Word(std::mem::take(&mut word));
          push_node(&mut stack, &mut root, node);
        }
        let mut separator = String::from(char);
        while let Some(&next) = chars.peek() {
          if is_separator_char(next) {
            separator.push(next);
            chars.next();
          } else {
            break;
          }
        }
        push_node(&mut stack, &mut root, ValueNode::Separator(separator));
      }
      _ => word.push(char),
    }
  }

  if !word.is_empty() {
    push_node(&mut stack, &mut root, ValueNode::Word(word));
  }

  while let Some((name, nodes)) = stack.pop() {
    let node = ValueNode::Function { name, nodes };
    push_node(&mut stack, &mut root, node);
  }

  root
}

pub fn serialize(nodes: &[ValueNode]) -> String {
  let mut out = String::new();
  serialize_into(nodes, &mut out);
  out
}

fn serialize_into(nodes: &[ValueNode], out: &mut String) {
  for node in nodes {
    match node {
      ValueNode::Word(text) | ValueNode::Separator(text) => out.push_str(text),
      ValueNode::Function { name, nodes } => {
        out.push_str(name);
        out.push('(');
        serialize_into(nodes, out);
        out.push(')');
      }
    }
  }
}
