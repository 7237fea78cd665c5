use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
  static ref ARGUMENT_REGEX: Regex = Regex::new(r"^([a-z][a-z ]*?)\s+(\d+(?:\.\d+)?)$").unwrap();
}

/// Split `"brighten 45"` into `("brighten", Some("45"))`. Tokens without a
/// trailing number come back whole.
pub fn split_argument(opt: &str) -> (&str, Option<&str>) {
  match ARGUMENT_REGEX.captures(opt) {
    Some(captures) => match (captures.get(1), captures.get(2)) {
      (Some(name), Some(arg)) => (name.as_str(), Some(arg.as_str())),
      _ => (opt, None),
    },
    None => (opt, None),
  }
}
