//! Parsing of one-dimensional PostgreSQL array literals such as
//! `{a,"b c",NULL}`.
//!
//! Elements are returned as verbatim strings. An unquoted `NULL` is a null
//! element, while a quoted `"NULL"` is the string `NULL`.

use crate::Error;

/// Parse an array literal into its elements.
///
/// ```
/// # use pg_enum::array::parse_array_literal;
/// let elements = parse_array_literal(r#"{a,"b,c",NULL}"#).unwrap();
///
/// assert_eq!(
///     elements,
///     vec![Some("a".to_owned()), Some("b,c".to_owned()), None]
/// );
/// ```
pub fn parse_array_literal(literal: &str) -> crate::Result<Vec<Option<String>>> {
    let inner = literal
        .trim()
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| Error::invalid_array_literal(literal, "expected a brace-delimited list"))?;

    let mut elements = Vec::new();

    if inner.trim().is_empty() {
        return Ok(elements);
    }

    let mut chars = inner.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        match chars.peek() {
            Some('"') => {
                chars.next();
                let mut element = String::new();

                loop {
                    match chars.next() {
                        Some('\\') => match chars.next() {
                            Some(escaped) => element.push(escaped),
                            None => return Err(Error::invalid_array_literal(literal, "unterminated escape")),
                        },
                        Some('"') => break,
                        Some(c) => element.push(c),
                        None => return Err(Error::invalid_array_literal(literal, "unterminated quoted element")),
                    }
                }

                while chars.next_if(|c| c.is_whitespace()).is_some() {}
                elements.push(Some(element));
            }
            Some('{') => {
                return Err(Error::invalid_array_literal(
                    literal,
                    "multi-dimensional arrays are not supported",
                ))
            }
            _ => {
                let mut element = String::new();
                // Byte length up to the last escaped character, which trimming
                // must not remove.
                let mut escaped_len = None;

                while let Some(c) = chars.next_if(|c| *c != ',') {
                    match c {
                        '{' | '}' | '"' => {
                            return Err(Error::invalid_array_literal(literal, "unexpected character in element"))
                        }
                        '\\' => match chars.next() {
                            Some(escaped) => {
                                element.push(escaped);
                                escaped_len = Some(element.len());
                            }
                            None => return Err(Error::invalid_array_literal(literal, "unterminated escape")),
                        },
                        c => element.push(c),
                    }
                }

                let trimmed_len = element.trim_end().len().max(escaped_len.unwrap_or(0));
                let element = &element[..trimmed_len];

                if element.is_empty() {
                    return Err(Error::invalid_array_literal(literal, "empty element"));
                }

                // Only a bare NULL is null; any escape makes it a string.
                if escaped_len.is_none() && element.eq_ignore_ascii_case("NULL") {
                    elements.push(None);
                } else {
                    elements.push(Some(element.to_owned()));
                }
            }
        }

        match chars.next() {
            Some(',') => continue,
            None => break,
            Some(_) => {
                return Err(Error::invalid_array_literal(
                    literal,
                    "expected a comma between elements",
                ))
            }
        }
    }

    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    fn parse(literal: &str) -> Vec<Option<String>> {
        parse_array_literal(literal).unwrap()
    }

    fn strings(items: &[&str]) -> Vec<Option<String>> {
        items.iter().map(|s| Some(s.to_string())).collect()
    }

    #[test]
    fn plain_elements_in_order() {
        assert_eq!(parse("{a,b,c}"), strings(&["a", "b", "c"]));
        assert_eq!(parse("{happy}"), strings(&["happy"]));
    }

    #[test]
    fn empty_array() {
        assert_eq!(parse("{}"), Vec::<Option<String>>::new());
        assert_eq!(parse(" { } "), Vec::<Option<String>>::new());
    }

    #[test]
    fn quoted_elements_keep_special_characters() {
        assert_eq!(
            parse(r#"{"with space","a,b","{x}","say \"hi\"","back\\slash"}"#),
            strings(&["with space", "a,b", "{x}", r#"say "hi""#, r"back\slash"])
        );
    }

    #[test]
    fn null_handling() {
        assert_eq!(parse("{a,NULL,null}"), vec![Some("a".to_owned()), None, None]);
        assert_eq!(parse(r#"{"NULL"}"#), strings(&["NULL"]));
    }

    #[test]
    fn whitespace_around_unquoted_elements_is_trimmed() {
        assert_eq!(parse("{ a , b }"), strings(&["a", "b"]));
    }

    #[test]
    fn escaped_unquoted_elements_are_never_null() {
        assert_eq!(parse(r"{NU\LL,\NULL,NULL}"), vec![Some("NULL".to_owned()), Some("NULL".to_owned()), None]);
        assert_eq!(parse(r"{a\ , b}"), strings(&["a ", "b"]));
    }

    #[test]
    fn malformed_literals_are_rejected() {
        for literal in ["a,b", "{a,b", "{{a},{b}}", r#"{"a}"#, "{a,,b}", r#"{"a"b}"#, "{a,}"] {
            let err = parse_array_literal(literal).unwrap_err();
            assert!(
                matches!(err.kind(), ErrorKind::InvalidArrayLiteral { .. }),
                "{literal} should be rejected"
            );
        }
    }
}
