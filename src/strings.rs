/********************************************************************************
 * Copyright (c) 2023 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Small string helpers shared by the grammar engine and the validator.

/// Returns the part of `text` before the first occurrence of `token`.
pub(crate) fn before<'a>(text: &'a str, token: &str) -> Option<&'a str> {
    text.find(token).map(|idx| &text[..idx])
}

/// Returns the part of `text` after the first occurrence of `token`.
pub(crate) fn after<'a>(text: &'a str, token: &str) -> Option<&'a str> {
    text.find(token).map(|idx| &text[idx + token.len()..])
}

/// Converts a camel-cased value into its dashed form (`MyChoice` -> `my-choice`).
///
/// Values that already contain dashes are lower-cased as-is.
pub(crate) fn camel_case_to_dash(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut prev_lower = false;
    for ch in text.chars() {
        if ch == '-' || ch == '_' {
            out.push('-');
            prev_lower = false;
        } else if ch.is_uppercase() {
            if prev_lower {
                out.push('-');
            }
            out.extend(ch.to_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}

/// Converts a value into enum-constant form (`myChoice` -> `MY_CHOICE`).
pub(crate) fn as_enum_constant(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut prev_lower = false;
    for ch in text.chars() {
        if ch == '-' || ch == '_' {
            out.push('_');
            prev_lower = false;
        } else if ch.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(ch);
            prev_lower = false;
        } else {
            out.extend(ch.to_uppercase());
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}

/// Converts a dashed name into camel case (`hello-great-world` -> `helloGreatWorld`).
pub(crate) fn dash_to_camel_case(text: &str) -> String {
    if !text.contains('-') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut upper_next = false;
    for ch in text.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Checks whether a value is a boolean literal.
pub(crate) fn is_boolean(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
}

/// Checks whether a value is a `{{...}}`, `${...}` or `$simple{...}` placeholder.
pub(crate) fn is_placeholder(value: &str) -> bool {
    value.starts_with("{{") || value.starts_with("${") || value.starts_with("$simple{")
}

/// Checks whether a value is a `#`-prefixed registry reference.
pub(crate) fn is_reference(value: &str) -> bool {
    value.starts_with('#') && value.len() > 1
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_case::test_case;

    #[test_case("MyChoice", "my-choice"; "camel case")]
    #[test_case("myChoice", "my-choice"; "lower camel case")]
    #[test_case("already-dashed", "already-dashed"; "dashed unchanged")]
    #[test_case("plain", "plain"; "plain unchanged")]
    #[test_case("ISO8601", "iso8601"; "upper run")]
    fn test_camel_case_to_dash(input: &str, expected: &str) {
        assert_eq!(camel_case_to_dash(input), expected);
    }

    #[test_case("myChoice", "MY_CHOICE"; "lower camel case")]
    #[test_case("my-choice", "MY_CHOICE"; "dashed")]
    #[test_case("PLAIN", "PLAIN"; "constant unchanged")]
    fn test_as_enum_constant(input: &str, expected: &str) {
        assert_eq!(as_enum_constant(input), expected);
    }

    #[test_case("hello-great-world", "helloGreatWorld"; "dashed")]
    #[test_case("plain", "plain"; "plain unchanged")]
    fn test_dash_to_camel_case(input: &str, expected: &str) {
        assert_eq!(dash_to_camel_case(input), expected);
    }

    #[test]
    fn test_before_after() {
        assert_eq!(before("ftp:host:port", ":"), Some("ftp"));
        assert_eq!(after("ftp:host:port", ":"), Some("host:port"));
        assert_eq!(after("no-colon", ":"), None);
    }
}
