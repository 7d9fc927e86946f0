use lazy_static::lazy_static;
use regex::{Captures, Regex};

// Interpolation syntax follows POSIX parameter expansion:
// https://pubs.opengroup.org/onlinepubs/000095399/basedefs/xbd_chap08.html

lazy_static! {
  pub static ref ENVIRONMENT_VARIABLE_INTERPOLATION_REGEX: Regex = Regex::new(
    r"(?x)
    \$\$|
    \$([[:word:].]+)|
    \$\{([[:word:].]+)(?:(:?-|:?\?)([^}]*))?\}",
  )
  // @expected: statically defined pattern
  .unwrap();
}

pub type Warnings = Vec<String>;
pub type Errors = Vec<String>;

/// Replaces `$VAR`, `${VAR}`, `${VAR-default}`, `${VAR:-default}`, `${VAR?error}` and
/// `${VAR:?error}` with values from `get_env_value`. `$$` produces a literal `$`.
pub fn interpolate(
  input: &str,
  get_env_value: impl Fn(&str) -> Option<String>,
) -> Result<(String, Warnings), Errors> {
  let mut errors = Vec::new();
  let mut warnings = Vec::new();

  let interpolated = ENVIRONMENT_VARIABLE_INTERPOLATION_REGEX
    .replace_all(input, |caps: &Captures| {
      let flags = caps.get(3).map(|m| m.as_str()).unwrap_or_default();
      let def_or_err = caps
        .get(4)
        .map(|m| m.as_str())
        .unwrap_or_default()
        .to_string();

      let Some(name) = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str()) else {
        return "$".to_string();
      };

      let val = get_env_value(name);
      match flags {
        ":-" => match val {
          Some(v) if !v.is_empty() => v,
          _ => def_or_err,
        },
        "-" => val.unwrap_or(def_or_err),
        ":?" => match val {
          Some(v) if !v.is_empty() => v,
          _ => {
            errors.push(format!(
              "Non-empty env var required. name = {:?}, error = {:?}",
              name, def_or_err
            ));
            String::new()
          }
        },
        "?" => val.unwrap_or_else(|| {
          errors.push(format!(
            "Missing env var required. name = {:?}, error = {:?}",
            name, def_or_err
          ));
          String::new()
        }),
        _ => val.unwrap_or_else(|| {
          warnings.push(format!("Unknown env var. name = {:?}", name));
          String::new()
        }),
      }
    })
    .into_owned();

  if errors.is_empty() {
    Ok((interpolated, warnings))
  } else {
    Err(errors)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn env(key: &str) -> Option<String> {
    match key {
      "STORE_KEY" => Some("DE".to_string()),
      "EMPTY" => Some(String::new()),
      _ => None,
    }
  }

  #[test]
  fn replaces_plain_and_braced_variables() {
    let (result, warnings) = interpolate("$STORE_KEY-${STORE_KEY}", env).unwrap();
    assert_eq!(result, "DE-DE");
    assert!(warnings.is_empty());
  }

  #[test]
  fn applies_defaults() {
    let (result, _) = interpolate("${MISSING-a} ${EMPTY-b} ${EMPTY:-c}", env).unwrap();
    assert_eq!(result, "a  c");
  }

  #[test]
  fn escapes_double_dollar() {
    let (result, _) = interpolate("price: $$5", env).unwrap();
    assert_eq!(result, "price: $5");
  }

  #[test]
  fn unknown_variables_warn() {
    let (result, warnings) = interpolate("key: $MISSING", env).unwrap();
    assert_eq!(result, "key: ");
    assert_eq!(warnings.len(), 1);
  }

  #[test]
  fn required_variables_fail() {
    let errors = interpolate("${MISSING?set it} ${EMPTY:?set it too}", env).unwrap_err();
    assert_eq!(errors.len(), 2);
  }
}
