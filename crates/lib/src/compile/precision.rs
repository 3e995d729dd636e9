//! Numeric precision for compiled CSS.
//!
//! The compiler always prints up to ten fractional digits. [`round_numbers`]
//! re-tokenizes its output with `cssparser` and rounds the numbers, percentages
//! and dimensions that carry more digits than requested. Every other token is
//! copied from the source text unchanged, and so are the values of custom
//! properties (`--name: ...`), which CSS treats as opaque.

use cssparser::{ParseError, Parser, ParserInput, Token};

/// Round every number in `css` to at most `precision` fractional digits.
///
/// Trailing zeros left by rounding are dropped, and a number keeps its original
/// leading-zero form: `.1234567` becomes `.12346`, `0.1234567` becomes `0.12346`.
pub fn round_numbers(css: &str, precision: u8) -> String {
  let mut input = ParserInput::new(css);
  let mut parser = Parser::new(&mut input);
  let mut out = String::with_capacity(css.len());

  // The walk only stops at end of input; there is no error to surface.
  let _ = copy_tokens(&mut parser, &mut out, precision, false);
  out
}

/// Copy the tokens of the current block into `out`, rounding numbers unless
/// the block sits inside a custom property value.
fn copy_tokens<'i>(
  parser: &mut Parser<'i, '_>,
  out: &mut String,
  precision: u8,
  inherited_opaque: bool,
) -> Result<(), ParseError<'i, ()>> {
  let mut opaque = inherited_opaque;
  let mut after_custom_name = false;

  loop {
    let start = parser.position();
    let token = match parser.next_including_whitespace_and_comments() {
      Ok(token) => token.clone(),
      Err(_) => break,
    };
    let text = parser.slice_from(start);

    match token {
      Token::WhiteSpace(_) | Token::Comment(_) => out.push_str(text),
      Token::Ident(ref name) if !opaque => {
        after_custom_name = name.starts_with("--");
        out.push_str(text);
      }
      Token::Colon if after_custom_name => {
        after_custom_name = false;
        opaque = true;
        out.push_str(text);
      }
      Token::Semicolon => {
        after_custom_name = false;
        opaque = inherited_opaque;
        out.push_str(text);
      }
      Token::Number { .. } if !opaque => out.push_str(&round_numeric(text, "", precision)),
      Token::Percentage { .. } if !opaque => out.push_str(&round_numeric(text, "%", precision)),
      Token::Dimension { ref unit, .. } if !opaque => out.push_str(&round_numeric(text, unit, precision)),
      Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock | Token::CurlyBracketBlock => {
        after_custom_name = false;
        out.push_str(text);
        let inner_end = parser.parse_nested_block(|nested| {
          copy_tokens(nested, out, precision, opaque)?;
          Ok(nested.position())
        })?;
        // Closing bracket, absent when the input ends inside the block.
        out.push_str(parser.slice_from(inner_end));
      }
      _ => {
        after_custom_name = false;
        out.push_str(text);
      }
    }
  }

  Ok(())
}

/// Round the numeric part of `text`, keeping `unit` as written.
fn round_numeric(text: &str, unit: &str, precision: u8) -> String {
  match text.strip_suffix(unit) {
    Some(number) => format!("{}{}", round_token(number, precision), unit),
    // Escaped unit; the source spelling differs from the unit value.
    None => text.to_string(),
  }
}

fn round_token(token: &str, precision: u8) -> String {
  if token.contains(['e', 'E']) {
    return token.to_string();
  }
  let unsigned = token.trim_start_matches(['-', '+']);
  let Some(dot) = unsigned.find('.') else {
    return token.to_string();
  };
  let precision = usize::from(precision);
  if unsigned.len() - dot - 1 <= precision {
    return token.to_string();
  }
  let Ok(value) = token.parse::<f64>() else {
    return token.to_string();
  };

  let mut rounded = format!("{:.*}", precision, value);
  if rounded.contains('.') {
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.').len();
    rounded.truncate(trimmed);
  }
  if rounded == "-0" {
    rounded = "0".to_string();
  }
  if unsigned.starts_with('.') {
    if let Some(rest) = rounded.strip_prefix("0.") {
      rounded = format!(".{}", rest);
    } else if let Some(rest) = rounded.strip_prefix("-0.") {
      rounded = format!("-.{}", rest);
    }
  }
  if token.starts_with('+') && !rounded.starts_with('-') {
    rounded.insert(0, '+');
  }
  rounded
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rounds_long_fractions() {
    assert_eq!(round_numbers("a{width:33.3333333333%}", 5), "a{width:33.33333%}");
    assert_eq!(round_numbers("a{width:66.6666666667%}", 5), "a{width:66.66667%}");
  }

  #[test]
  fn keeps_short_fractions_verbatim() {
    let css = "a{margin:.5em 1.25px 0.125rem}";
    assert_eq!(round_numbers(css, 5), css);
  }

  #[test]
  fn keeps_leading_zero_form() {
    assert_eq!(round_numbers("a{opacity:.1234567}", 5), "a{opacity:.12346}");
    assert_eq!(round_numbers("a{opacity:0.1234567}", 5), "a{opacity:0.12346}");
    assert_eq!(round_numbers("a{margin:-.1234567px}", 5), "a{margin:-.12346px}");
  }

  #[test]
  fn trims_trailing_zeros_after_rounding() {
    assert_eq!(round_numbers("a{b:1.2000001px}", 5), "a{b:1.2px}");
    assert_eq!(round_numbers("a{b:1.9999999px}", 5), "a{b:2px}");
    assert_eq!(round_numbers("a{b:-0.0000001px}", 5), "a{b:0px}");
  }

  #[test]
  fn leaves_strings_urls_and_colours_alone() {
    let css = r#"a{content:"1.123456789";background:url(img-1.1234567.png);color:#1e3456}"#;
    assert_eq!(round_numbers(css, 5), css);
  }

  #[test]
  fn leaves_escaped_identifiers_alone() {
    let css = r".w-1\.1234567{width:1.1234567px}";
    assert_eq!(round_numbers(css, 5), r".w-1\.1234567{width:1.12346px}");
  }

  #[test]
  fn handles_selectors_and_non_ascii() {
    let css = "li:nth-child(2n+1){content:\"é\";margin:0.1234567px}";
    assert_eq!(round_numbers(css, 5), "li:nth-child(2n+1){content:\"é\";margin:0.12346px}");
  }

  #[test]
  fn leaves_comments_alone() {
    let css = "/*! theme v0.1234567 */a{width:1.1234567px}";
    assert_eq!(round_numbers(css, 5), "/*! theme v0.1234567 */a{width:1.12346px}");
  }

  #[test]
  fn number_after_identifier_in_comment_is_kept() {
    let css = "/* h1.1234567 */h1{margin:.1234567em}";
    assert_eq!(round_numbers(css, 5), "/* h1.1234567 */h1{margin:.12346em}");
  }

  #[test]
  fn leaves_custom_property_values_alone() {
    let css = ":root{--ratio: 1.123456789;--gap:calc(0.1234567px * 2)}a{width:33.3333333333%}";
    assert_eq!(
      round_numbers(css, 5),
      ":root{--ratio: 1.123456789;--gap:calc(0.1234567px * 2)}a{width:33.33333%}"
    );
  }

  #[test]
  fn rounds_after_custom_property_in_same_rule() {
    let css = "a{--w:1.1234567;width:1.1234567px}";
    assert_eq!(round_numbers(css, 5), "a{--w:1.1234567;width:1.12346px}");
  }

  #[test]
  fn rounds_inside_nested_blocks_and_functions() {
    let css = "@media (min-width:100.1234567px){a{width:calc(100% - 1.1234567px)}}";
    assert_eq!(
      round_numbers(css, 5),
      "@media (min-width:100.12346px){a{width:calc(100% - 1.12346px)}}"
    );
  }

  #[test]
  fn precision_ten_is_identity_for_compiler_output() {
    let css = "a{width:33.3333333333%}";
    assert_eq!(round_numbers(css, 10), css);
  }
}
