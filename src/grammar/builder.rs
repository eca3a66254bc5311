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

//! Building a concrete endpoint address from an option mapping, the inverse
//! of parsing.

use std::collections::BTreeMap;

use regex::Regex;

use crate::grammar::urisupport::{self, QueryPart};
use crate::grammar::GrammarError;
use crate::schema::{OptionIndex, PropertyMap, SchemaProvider};
use crate::strings;

// placeholder delimiters are masked while word-splitting the filled syntax
// so the braces are not treated as structural tokens
const BEGIN_PLACEHOLDER: &str = "BEGINPLACEHOLDERTOKEN";
const END_PLACEHOLDER: &str = "ENDPLACEHOLDERTOKEN";

/// Builds an endpoint address from an option mapping.
///
/// Path options are substituted into the schema's syntax pattern; every
/// option not consumed by the pattern is appended as a query parameter in
/// alphabetical key order. Secret options are wrapped as `RAW(...)`.
pub fn as_endpoint_uri(
    provider: &dyn SchemaProvider,
    scheme: &str,
    properties: &PropertyMap,
    encode: bool,
) -> Result<String, GrammarError> {
    do_as_endpoint_uri(provider, scheme, properties, "&", encode)
}

/// Same as [`as_endpoint_uri`] but with query parameters joined by `&amp;`
/// so the address can be embedded in an XML document.
pub fn as_endpoint_uri_xml(
    provider: &dyn SchemaProvider,
    scheme: &str,
    properties: &PropertyMap,
    encode: bool,
) -> Result<String, GrammarError> {
    do_as_endpoint_uri(provider, scheme, properties, "&amp;", encode)
}

fn do_as_endpoint_uri(
    provider: &dyn SchemaProvider,
    scheme: &str,
    properties: &PropertyMap,
    separator: &str,
    encode: bool,
) -> Result<String, GrammarError> {
    let model = provider
        .component_schema(scheme)
        .ok_or_else(|| GrammarError::UnknownScheme(scheme.to_string()))?;
    let original_syntax = model
        .syntax
        .as_deref()
        .ok_or_else(|| GrammarError::MissingSyntax(scheme.to_string()))?;

    let mut properties = filter_properties(scheme, properties);
    let rows = model.option_index();

    let original_syntax = strings::after(original_syntax, ":").unwrap_or(original_syntax);

    // substitute each syntax word with its bound value, or leave the literal
    // word as a placeholder; the sorted copy tracks unconsumed options
    let mut copy: BTreeMap<String, String> = properties
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let syntax_parser = Regex::new(r"([^\w-]*)([\w-]+)").unwrap();
    let mut filled = String::new();
    for caps in syntax_parser.captures_iter(original_syntax) {
        filled.push_str(&caps[1]);
        let name = &caps[2];
        match copy.remove(name) {
            Some(value) => filled.push_str(&value),
            None => filled.push_str(name),
        }
    }

    let keys = syntax_keys(original_syntax);
    let has_all_keys = keys.iter().all(|k| properties.contains_key(k));

    let mut sb = String::new();
    if has_all_keys {
        sb.push_str(&filled);
        if !copy.is_empty() {
            let has_questionmark = sb.contains('?');
            sb.push_str(if has_questionmark { separator } else { "?" });
            sb.push_str(&build_query(&copy, &rows, separator, encode));
        }
    } else {
        // sparse case: walk pattern words and their inter-word separators,
        // skipping unbound non-required words together with their separator
        let dash_pattern = Regex::new(r"[\w.-]+").unwrap();
        let word_pattern = Regex::new(r"[\w.]+").unwrap();

        let tokens: Vec<&str> = dash_pattern.split(&filled).collect();
        let option_names: Vec<String> = word_pattern
            .find_iter(original_syntax)
            .map(|m| m.as_str().to_string())
            .collect();
        let masked = filled
            .replace("{{", BEGIN_PLACEHOLDER)
            .replace("}}", END_PLACEHOLDER);
        let options2: Vec<String> = dash_pattern
            .find_iter(&masked)
            .map(|m| {
                m.as_str()
                    .replace(BEGIN_PLACEHOLDER, "{{")
                    .replace(END_PLACEHOLDER, "}}")
            })
            .collect();

        let mut range = 0;
        let mut first = true;
        let mut has_questionmark = false;
        for (i, key) in option_names.iter().enumerate() {
            let mut key2 = options2.get(i).cloned().unwrap_or_default();
            let token = tokens.get(i).copied();
            if !properties.contains_key(key) {
                // a required word without an explicit value may still be
                // filled from its declared default
                if let Some(row) = rows.get(key).filter(|r| r.required) {
                    if let Some(default) = row.default_value.as_deref().filter(|d| !d.is_empty()) {
                        properties.insert(key.clone(), default);
                        key2 = default.to_string();
                    }
                }
            }
            if properties.contains_key(key) {
                if !first {
                    if let Some(token) = token {
                        sb.push_str(token);
                    }
                }
                has_questionmark |= key.contains('?') || token.is_some_and(|t| t.contains('?'));
                sb.push_str(&key2);
                first = false;
            }
            range += 1;
        }
        // any surplus word runs of the filled syntax are appended as-is
        while range < options2.len() {
            if let Some(token) = tokens.get(range) {
                sb.push_str(token);
            }
            let key2 = &options2[range];
            has_questionmark |= key2.contains('?')
                || tokens.get(range).is_some_and(|t| t.contains('?'));
            sb.push_str(key2);
            range += 1;
        }

        if !copy.is_empty() {
            sb.push_str(if has_questionmark { separator } else { "?" });
            sb.push_str(&build_query(&copy, &rows, separator, encode));
        }
    }

    let remainder = sb;
    let answer = if remainder.starts_with('?') {
        format!("{scheme}{remainder}")
    } else if !remainder.is_empty() {
        format!("{scheme}:{remainder}")
    } else {
        scheme.to_string()
    };
    tracing::debug!(scheme, uri = %answer, "assembled endpoint uri");
    Ok(answer)
}

/// Scheme-specific option filtering applied before substitution.
///
/// When the logging scheme's `showAll` toggle is set, the sibling `show*`
/// toggles are redundant and dropped.
fn filter_properties(scheme: &str, properties: &PropertyMap) -> PropertyMap {
    if scheme == "log" && properties.get("showAll") == Some("true") {
        return properties
            .iter()
            .filter(|(k, _)| !(k.starts_with("show") && *k != "showAll"))
            .collect();
    }
    properties.iter().collect()
}

fn build_query(
    copy: &BTreeMap<String, String>,
    rows: &OptionIndex<'_>,
    separator: &str,
    encode: bool,
) -> String {
    let mut parts = Vec::new();
    for (key, value) in copy {
        let option = rows.get(key);
        let multi = option.is_some_and(|o| o.multi_value && o.prefix.is_some());
        if multi && value.contains('=') {
            // a combined multi-value already carries its concrete prefixed
            // keys, emit the pairs verbatim
            parts.push(QueryPart::Verbatim(value.clone()));
            continue;
        }
        let value = if option.is_some_and(|o| o.secret) {
            urisupport::wrap_raw(value).into_owned()
        } else {
            value.clone()
        };
        parts.push(QueryPart::Pair {
            key: key.clone(),
            value,
        });
    }
    urisupport::create_query_string(&parts, separator, encode)
}

/// The letter-or-digit runs of a syntax pattern, i.e. the words a complete
/// address must bind.
fn syntax_keys(syntax: &str) -> Vec<&str> {
    let mut keys = Vec::new();
    let mut start = None;
    for (i, ch) in syntax.char_indices() {
        if ch.is_alphanumeric() {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            keys.push(&syntax[s..i]);
        }
    }
    if let Some(s) = start {
        keys.push(&syntax[s..]);
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::schema::{InMemorySchemaProvider, OptionModel, OptionType, SchemaModel};

    fn ftp_provider() -> InMemorySchemaProvider {
        let schema = SchemaModel::new("ftp", "ftp:host:port/directoryName")
            .path_option(OptionModel::path("host").required(true))
            .path_option(
                OptionModel::path("port")
                    .of_type(OptionType::Integer)
                    .default_value("21"),
            )
            .path_option(OptionModel::path("directoryName"))
            .endpoint_option(OptionModel::parameter("password").secret(true))
            .endpoint_option(
                OptionModel::parameter("binary")
                    .of_type(OptionType::Boolean)
                    .default_value("false"),
            );
        let mut provider = InMemorySchemaProvider::new();
        provider.add_component(schema);
        provider
    }

    #[test]
    fn test_all_words_bound_builds_directly() {
        let provider = ftp_provider();
        let props: PropertyMap = [
            ("host", "localhost"),
            ("port", "21"),
            ("directoryName", "inbox"),
            ("binary", "true"),
        ]
        .into_iter()
        .collect();
        let uri = as_endpoint_uri(&provider, "ftp", &props, false).unwrap();
        assert_eq!(uri, "ftp:localhost:21/inbox?binary=true");
    }

    #[test]
    fn test_unbound_optional_words_are_skipped_with_separator() {
        let provider = ftp_provider();
        let props: PropertyMap = [("host", "localhost")].into_iter().collect();
        let uri = as_endpoint_uri(&provider, "ftp", &props, false).unwrap();
        assert_eq!(uri, "ftp:localhost");
    }

    #[test]
    fn test_required_word_falls_back_to_default() {
        let schema = SchemaModel::new("tcp", "tcp:host:port")
            .path_option(OptionModel::path("host").required(true))
            .path_option(
                OptionModel::path("port")
                    .of_type(OptionType::Integer)
                    .required(true)
                    .default_value("21"),
            );
        let mut provider = InMemorySchemaProvider::new();
        provider.add_component(schema);
        let props: PropertyMap = [("host", "localhost")].into_iter().collect();
        let uri = as_endpoint_uri(&provider, "tcp", &props, false).unwrap();
        assert_eq!(uri, "tcp:localhost:21");
    }

    #[test]
    fn test_secret_option_is_raw_wrapped() {
        let provider = ftp_provider();
        let props: PropertyMap = [("host", "localhost"), ("password", "se+cret")]
            .into_iter()
            .collect();
        let uri = as_endpoint_uri(&provider, "ftp", &props, false).unwrap();
        assert_eq!(uri, "ftp:localhost?password=RAW(se+cret)");
    }

    #[test]
    fn test_query_only_address() {
        let schema = SchemaModel::new("log", "log:loggerName")
            .path_option(OptionModel::path("loggerName"))
            .endpoint_option(OptionModel::parameter("level"));
        let mut provider = InMemorySchemaProvider::new();
        provider.add_component(schema);
        let props: PropertyMap = [("level", "INFO")].into_iter().collect();
        let uri = as_endpoint_uri(&provider, "log", &props, false).unwrap();
        assert_eq!(uri, "log?level=INFO");
    }

    #[test]
    fn test_empty_properties_yield_bare_scheme() {
        let schema =
            SchemaModel::new("log", "log:loggerName").path_option(OptionModel::path("loggerName"));
        let mut provider = InMemorySchemaProvider::new();
        provider.add_component(schema);
        let uri = as_endpoint_uri(&provider, "log", &PropertyMap::new(), false).unwrap();
        assert_eq!(uri, "log");
    }

    #[test]
    fn test_xml_separator() {
        let provider = ftp_provider();
        let props: PropertyMap = [
            ("host", "localhost"),
            ("binary", "true"),
            ("password", "x"),
        ]
        .into_iter()
        .collect();
        let uri = as_endpoint_uri_xml(&provider, "ftp", &props, false).unwrap();
        assert_eq!(uri, "ftp:localhost?binary=true&amp;password=RAW(x)");
    }

    #[test]
    fn test_show_all_drops_sibling_toggles() {
        let schema = SchemaModel::new("log", "log:loggerName")
            .path_option(OptionModel::path("loggerName").required(true))
            .endpoint_option(OptionModel::parameter("showAll").of_type(OptionType::Boolean))
            .endpoint_option(OptionModel::parameter("showBody").of_type(OptionType::Boolean));
        let mut provider = InMemorySchemaProvider::new();
        provider.add_component(schema);
        let props: PropertyMap = [
            ("loggerName", "foo"),
            ("showAll", "true"),
            ("showBody", "true"),
        ]
        .into_iter()
        .collect();
        let uri = as_endpoint_uri(&provider, "log", &props, false).unwrap();
        assert_eq!(uri, "log:foo?showAll=true");
    }

    #[test]
    fn test_multi_value_rebuilds_concrete_keys() {
        let schema = SchemaModel::new("quartz", "quartz:triggerName")
            .path_option(OptionModel::path("triggerName").required(true))
            .endpoint_option(
                OptionModel::parameter("jobParameters")
                    .prefix("job.")
                    .multi_value(true),
            );
        let mut provider = InMemorySchemaProvider::new();
        provider.add_component(schema);
        let props: PropertyMap = [
            ("triggerName", "t"),
            ("jobParameters", "job.a=1&job.b=2"),
        ]
        .into_iter()
        .collect();
        let uri = as_endpoint_uri(&provider, "quartz", &props, false).unwrap();
        assert_eq!(uri, "quartz:t?job.a=1&job.b=2");
    }

    #[test]
    fn test_placeholder_braces_survive_sparse_rebuild() {
        let provider = ftp_provider();
        let props: PropertyMap = [("host", "{{myHost}}")].into_iter().collect();
        let uri = as_endpoint_uri(&provider, "ftp", &props, false).unwrap();
        assert_eq!(uri, "ftp:{{myHost}}");
    }

    #[test]
    fn test_unknown_scheme_is_fatal() {
        let provider = ftp_provider();
        let err = as_endpoint_uri(&provider, "nope", &PropertyMap::new(), false).unwrap_err();
        assert!(matches!(err, GrammarError::UnknownScheme(s) if s == "nope"));
    }
}
