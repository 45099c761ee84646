//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Split a camelCase identifier on upper-case letters and lower-case the result.
/// Every upper-case letter starts a new word, so "ethicalAI" becomes "ethical a i".
pub fn humanize_camel(ident: &str) -> String {
  let mut out = String::with_capacity(ident.len() + 4);
  for ch in ident.chars() {
    if ch.is_uppercase() {
      out.push(' ');
      out.extend(ch.to_lowercase());
    } else {
      out.push(ch);
    }
  }
  out
}

/// Whitespace-delimited token count.
pub fn word_count(s: &str) -> usize {
  s.split_whitespace().count()
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) { cut -= 1; }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fill_template_replaces_every_occurrence() {
    assert_eq!(fill_template("{a} and {a} or {b}", &[("a", "x"), ("b", "y")]), "x and x or y");
  }

  #[test]
  fn humanize_splits_camel_case() {
    assert_eq!(humanize_camel("aiUnderstanding"), "ai understanding");
    assert_eq!(humanize_camel("practicalApplication"), "practical application");
  }

  #[test]
  fn word_count_ignores_repeated_whitespace() {
    assert_eq!(word_count("hi"), 1);
    assert_eq!(word_count("  one   two\tthree\n"), 3);
    assert_eq!(word_count(""), 0);
  }

  #[test]
  fn truncation_respects_char_boundaries() {
    assert_eq!(trunc_for_log("short", 10), "short");
    let t = trunc_for_log("héllo world", 2);
    assert!(t.starts_with('h'));
    assert!(t.ends_with("(12 bytes total)"));
  }
}
