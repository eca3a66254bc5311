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

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::schema::OptionModel;
use crate::strings;

/// One sub-operation of an API-style scheme, with its own option vocabulary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMethodModel {
    pub name: String,
    pub options: Vec<OptionModel>,
}

/// A named API of an API-style scheme.
///
/// `aliases` are `pattern=alias` pairs: a case-insensitive regex over method
/// names mapped to the canonical alias callers may use instead. The regexes
/// are compiled once per schema load via [`SchemaModel::compile_aliases`],
/// not per lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiModel {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub methods: Vec<ApiMethodModel>,
    #[serde(skip)]
    compiled_aliases: Vec<(Regex, String)>,
}

impl ApiModel {
    pub fn new(name: impl Into<String>) -> Self {
        ApiModel {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn alias(mut self, pattern_and_alias: impl Into<String>) -> Self {
        self.aliases.push(pattern_and_alias.into());
        self
    }

    pub fn method(mut self, method: ApiMethodModel) -> Self {
        self.methods.push(method);
        self
    }

    /// Resolves the alias for a method name via the precompiled table.
    pub fn method_alias(&self, method_name: &str) -> Option<&str> {
        for (pattern, alias) in &self.compiled_aliases {
            if pattern.is_match(method_name) {
                return Some(alias.as_str());
            }
        }
        None
    }

    fn compile_aliases(&mut self) {
        self.compiled_aliases = self
            .aliases
            .iter()
            .filter_map(|entry| {
                let (pattern, alias) = entry.split_once('=')?;
                RegexBuilder::new(&format!("^(?:{pattern})$"))
                    .case_insensitive(true)
                    .build()
                    .ok()
                    .map(|re| (re, alias.to_string()))
            })
            .collect();
    }
}

/// The immutable option catalog of one connector scheme.
///
/// Options are partitioned into component-level, endpoint-level and
/// endpoint-path-level subsets; on a name collision the later subset wins
/// (see [`SchemaModel::option_index`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaModel {
    pub scheme: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Positional pattern describing how path segments map to option names,
    /// for example `"ftp:host:port/directoryName"`.
    pub syntax: Option<String>,
    /// Variant of the syntax embedding `username:password@` in the authority.
    pub alternative_syntax: Option<String>,
    pub consumer_only: bool,
    pub producer_only: bool,
    /// Whether unrecognized extra options pass validation without error.
    pub lenient_properties: bool,
    pub component_options: Vec<OptionModel>,
    pub endpoint_options: Vec<OptionModel>,
    pub endpoint_path_options: Vec<OptionModel>,
    /// Whether this is an API-style scheme with per-sub-operation options.
    pub api: bool,
    /// The syntax words selecting the API and method, e.g. `"apiName/methodName"`.
    pub api_syntax: Option<String>,
    pub apis: Vec<ApiModel>,
}

impl SchemaModel {
    pub fn new(scheme: impl Into<String>, syntax: impl Into<String>) -> Self {
        SchemaModel {
            scheme: scheme.into(),
            syntax: Some(syntax.into()),
            ..Default::default()
        }
    }

    pub fn alternative_syntax(mut self, syntax: impl Into<String>) -> Self {
        self.alternative_syntax = Some(syntax.into());
        self
    }

    pub fn lenient_properties(mut self, lenient: bool) -> Self {
        self.lenient_properties = lenient;
        self
    }

    pub fn component_option(mut self, option: OptionModel) -> Self {
        self.component_options.push(option);
        self
    }

    pub fn endpoint_option(mut self, option: OptionModel) -> Self {
        self.endpoint_options.push(option);
        self
    }

    pub fn path_option(mut self, option: OptionModel) -> Self {
        self.endpoint_path_options.push(option);
        self
    }

    pub fn api_model(mut self, api_syntax: impl Into<String>, api: ApiModel) -> Self {
        self.api = true;
        self.api_syntax = Some(api_syntax.into());
        self.apis.push(api);
        self
    }

    /// Compiles the method-alias regexes of all API models.
    ///
    /// Providers call this once when the schema is registered so that alias
    /// lookups never recompile patterns.
    pub fn compile_aliases(&mut self) {
        for api in &mut self.apis {
            api.compile_aliases();
        }
    }

    /// Returns the merged, name-keyed option lookup with
    /// endpoint-path > endpoint > component precedence.
    pub fn option_index(&self) -> OptionIndex<'_> {
        let mut options = HashMap::new();
        for option in &self.component_options {
            options.insert(option.name.as_str(), option);
        }
        for option in &self.endpoint_options {
            options.insert(option.name.as_str(), option);
        }
        for option in &self.endpoint_path_options {
            options.insert(option.name.as_str(), option);
        }
        OptionIndex { options }
    }

    /// Resolves the API sub-model matching `key` and returns the options of
    /// its methods, optionally narrowed to the method matching `method_key`.
    ///
    /// Matching is case-insensitive and also accepts the dash-normalized and
    /// enum-constant-normalized forms of the keys. A literal `DEFAULT` API
    /// entry matches any key. Method matching additionally consults the
    /// precompiled alias table.
    pub fn api_options(&self, key: &str, method_key: Option<&str>) -> Vec<&OptionModel> {
        let mut answer: Vec<&OptionModel> = Vec::new();
        let dash_key = strings::camel_case_to_dash(key);
        let ec_key = strings::as_enum_constant(key);
        for api in &self.apis {
            let name = api.name.as_str();
            let matched = name.eq_ignore_ascii_case("DEFAULT")
                || name.eq_ignore_ascii_case(key)
                || name.eq_ignore_ascii_case(&dash_key)
                || name.eq_ignore_ascii_case(&ec_key);
            if !matched {
                continue;
            }
            for method in &api.methods {
                if let Some(wanted) = method_key {
                    if !Self::method_matches(api, method, wanted) {
                        continue;
                    }
                }
                answer.extend(method.options.iter());
            }
        }
        answer
    }

    /// Checks whether the two leading API syntax values name a known API and,
    /// within it, a known method (by name or alias). Returns the offending
    /// side together with the legal choices on mismatch.
    pub fn check_api_keys(&self, key: &str, method_key: &str) -> Result<(), ApiKeyError> {
        let Some(api) = self
            .apis
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(key))
        else {
            return Err(ApiKeyError::UnknownApi {
                choices: self.apis.iter().map(|a| a.name.clone()).collect(),
            });
        };
        let found = api.methods.iter().any(|m| {
            m.name.eq_ignore_ascii_case(method_key)
                || api
                    .method_alias(&m.name)
                    .is_some_and(|alias| alias.eq_ignore_ascii_case(method_key))
        });
        if found {
            Ok(())
        } else {
            // favour the alias in the reported choices
            let choices = api
                .methods
                .iter()
                .map(|m| {
                    api.method_alias(&m.name)
                        .map(str::to_string)
                        .unwrap_or_else(|| m.name.clone())
                })
                .collect();
            Err(ApiKeyError::UnknownMethod { choices })
        }
    }

    fn method_matches(api: &ApiModel, method: &ApiMethodModel, wanted: &str) -> bool {
        let dash = strings::camel_case_to_dash(wanted);
        let ec = strings::as_enum_constant(wanted);
        if method.name.eq_ignore_ascii_case(wanted)
            || method.name.eq_ignore_ascii_case(&dash)
            || method.name.eq_ignore_ascii_case(&ec)
        {
            return true;
        }
        if let Some(alias) = api.method_alias(&method.name) {
            if alias.eq_ignore_ascii_case(wanted)
                || strings::as_enum_constant(alias).eq_ignore_ascii_case(&ec)
                || strings::camel_case_to_dash(alias).eq_ignore_ascii_case(&dash)
            {
                return true;
            }
        }
        false
    }
}

/// Outcome of [`SchemaModel::check_api_keys`] on mismatch.
#[derive(Debug, PartialEq)]
pub enum ApiKeyError {
    UnknownApi { choices: Vec<String> },
    UnknownMethod { choices: Vec<String> },
}

/// Name-keyed view over a schema's merged options.
///
/// Borrowed from the schema; lookups never allocate.
#[derive(Debug)]
pub struct OptionIndex<'a> {
    options: HashMap<&'a str, &'a OptionModel>,
}

impl<'a> OptionIndex<'a> {
    pub fn get(&self, name: &str) -> Option<&'a OptionModel> {
        self.options.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.options.keys().copied()
    }

    pub fn options(&self) -> impl Iterator<Item = &'a OptionModel> + '_ {
        self.options.values().copied()
    }

    /// Splices additional options (e.g. an API method's vocabulary) into the
    /// index, overriding same-named entries.
    pub fn splice(&mut self, options: impl IntoIterator<Item = &'a OptionModel>) {
        for option in options {
            self.options.insert(option.name.as_str(), option);
        }
    }

    /// Resolves the canonical option owning a prefixed key, e.g.
    /// `scheduler.poolSize` -> the multi-valued option with prefix `scheduler.`.
    pub fn resolve_prefixed(&self, name: &str) -> Option<&'a OptionModel> {
        self.options.values().copied().find(|option| {
            option
                .prefix
                .as_deref()
                .is_some_and(|prefix| !prefix.is_empty() && name.starts_with(prefix))
        })
    }

    /// Strips optional prefixes from a key until no declared prefix matches.
    pub fn strip_optional_prefix(&self, name: &str) -> String {
        let mut current = name.to_string();
        'outer: loop {
            for option in self.options.values() {
                if let Some(prefix) = option.optional_prefix.as_deref() {
                    if !prefix.is_empty() && current.starts_with(prefix) {
                        current = current[prefix.len()..].to_string();
                        continue 'outer;
                    }
                }
                if current.eq_ignore_ascii_case(&option.name) {
                    break 'outer;
                }
            }
            break;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::schema::OptionKind;

    fn api_schema() -> SchemaModel {
        let api = ApiModel::new("client")
            .alias("^get.*$=fetch")
            .method(ApiMethodModel {
                name: "getRecord".to_string(),
                options: vec![OptionModel::parameter("recordId")],
            })
            .method(ApiMethodModel {
                name: "putRecord".to_string(),
                options: vec![OptionModel::parameter("payload")],
            });
        let mut schema =
            SchemaModel::new("svc", "svc:apiName/methodName").api_model("apiName/methodName", api);
        schema.compile_aliases();
        schema
    }

    #[test]
    fn test_option_index_precedence() {
        let schema = SchemaModel::new("demo", "demo:name")
            .component_option(OptionModel::parameter("shared").label("component"))
            .endpoint_option(OptionModel::parameter("shared").label("endpoint"))
            .path_option(OptionModel::path("shared").label("path"));
        let index = schema.option_index();
        let merged = index.get("shared").unwrap();
        assert_eq!(merged.kind, OptionKind::Path);
        assert_eq!(merged.label.as_deref(), Some("path"));
    }

    #[test]
    fn test_api_options_matches_case_insensitive() {
        let schema = api_schema();
        let options = schema.api_options("CLIENT", Some("getRecord"));
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].name, "recordId");
    }

    #[test]
    fn test_api_options_matches_by_alias() {
        let schema = api_schema();
        let options = schema.api_options("client", Some("fetch"));
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].name, "recordId");
    }

    #[test]
    fn test_api_options_default_matches_any_key() {
        let api = ApiModel::new("DEFAULT").method(ApiMethodModel {
            name: "anything".to_string(),
            options: vec![OptionModel::parameter("common")],
        });
        let mut schema =
            SchemaModel::new("svc", "svc:apiName/methodName").api_model("apiName/methodName", api);
        schema.compile_aliases();
        assert_eq!(schema.api_options("whatever", None).len(), 1);
    }

    #[test]
    fn test_check_api_keys_reports_choices() {
        let schema = api_schema();
        assert!(schema.check_api_keys("client", "fetch").is_ok());
        match schema.check_api_keys("client", "bogus") {
            Err(ApiKeyError::UnknownMethod { choices }) => {
                assert!(choices.contains(&"fetch".to_string()));
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            schema.check_api_keys("nope", "fetch"),
            Err(ApiKeyError::UnknownApi { .. })
        ));
    }

    #[test]
    fn test_strip_optional_prefix_recurses() {
        let schema = SchemaModel::new("demo", "demo:name").endpoint_option(
            OptionModel::parameter("delay").optional_prefix("consumer."),
        );
        let index = schema.option_index();
        assert_eq!(index.strip_optional_prefix("consumer.consumer.delay"), "delay");
        assert_eq!(index.strip_optional_prefix("delay"), "delay");
    }

    #[test]
    fn test_resolve_prefixed() {
        let schema = SchemaModel::new("demo", "demo:name").endpoint_option(
            OptionModel::parameter("schedulerProperties")
                .prefix("scheduler.")
                .multi_value(true),
        );
        let index = schema.option_index();
        let option = index.resolve_prefixed("scheduler.poolSize").unwrap();
        assert_eq!(option.name, "schedulerProperties");
        assert!(index.resolve_prefixed("other.key").is_none());
    }
}
