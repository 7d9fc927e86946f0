/// Tokens emitted while walking a selection tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
  /// A field name (possibly `alias: name`), leaf or composite.
  Field(String),
  /// A rendered `(...)` group following the preceding field.
  Arguments(String),
  Open,
  Close,
}

/// Renders the selection-set body of an operation, including the outer braces.
///
/// Compact output separates sibling fields with one space and puts nothing around braces,
/// e.g. ` {results{id key custom{name value}}}`.
pub fn render_body(tokens: &[Token], pretty: bool) -> String {
  if pretty {
    format!(" {{{}\n}}", render_pretty(tokens))
  } else {
    format!(" {{{}}}", render_compact(tokens))
  }
}

fn render_compact(tokens: &[Token]) -> String {
  let mut out = String::new();
  let mut previous: Option<&Token> = None;

  for token in tokens {
    match token {
      Token::Field(name) => {
        if matches!(previous, Some(Token::Field(_) | Token::Arguments(_) | Token::Close)) {
          out.push(' ');
        }
        out.push_str(name);
      }
      Token::Arguments(group) => out.push_str(group),
      Token::Open => out.push('{'),
      Token::Close => out.push('}'),
    }
    previous = Some(token);
  }

  out
}

const INDENT: &str = "  ";

fn render_pretty(tokens: &[Token]) -> String {
  let mut out = String::new();
  let mut depth = 1;

  for token in tokens {
    match token {
      Token::Field(name) => {
        out.push('\n');
        out.push_str(&INDENT.repeat(depth));
        out.push_str(name);
      }
      Token::Arguments(group) => out.push_str(group),
      Token::Open => {
        out.push_str(" {");
        depth += 1;
      }
      Token::Close => {
        depth = depth.saturating_sub(1);
        out.push('\n');
        out.push_str(&INDENT.repeat(depth));
        out.push('}');
      }
    }
  }

  out
}
