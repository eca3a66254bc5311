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

use serde::Deserialize;
use serde_json::Value;

use crate::schema::{ApiMethodModel, ApiModel, OptionKind, OptionModel, SchemaModel};

/// The five sibling lookup namespaces of a schema catalog.
///
/// They share identical mapping logic; the namespace only scopes the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Component,
    DataFormat,
    Language,
    Transformer,
    Other,
}

impl SchemaKind {
    pub(crate) fn section_key(self) -> &'static str {
        match self {
            SchemaKind::Component => "component",
            SchemaKind::DataFormat => "dataformat",
            SchemaKind::Language => "language",
            SchemaKind::Transformer => "transformer",
            SchemaKind::Other => "other",
        }
    }
}

/// Supplies per-scheme option metadata to the grammar engine, the property
/// validator and the REST compiler.
///
/// Implementations are read-only after construction and safe for concurrent
/// reads; idempotent lookups return identical data.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
pub trait SchemaProvider {
    /// Looks up a schema by namespace and name.
    fn schema<'a>(&'a self, kind: SchemaKind, name: &str) -> Option<&'a SchemaModel>;

    fn component_schema<'a>(&'a self, name: &str) -> Option<&'a SchemaModel> {
        self.schema(SchemaKind::Component, name)
    }

    fn data_format_schema<'a>(&'a self, name: &str) -> Option<&'a SchemaModel> {
        self.schema(SchemaKind::DataFormat, name)
    }

    fn language_schema<'a>(&'a self, name: &str) -> Option<&'a SchemaModel> {
        self.schema(SchemaKind::Language, name)
    }

    fn transformer_schema<'a>(&'a self, name: &str) -> Option<&'a SchemaModel> {
        self.schema(SchemaKind::Transformer, name)
    }

    fn other_schema<'a>(&'a self, name: &str) -> Option<&'a SchemaModel> {
        self.schema(SchemaKind::Other, name)
    }
}

/// Schema provider backed by programmatically registered models.
#[derive(Debug, Default)]
pub struct InMemorySchemaProvider {
    schemas: HashMap<(SchemaKind, String), SchemaModel>,
}

impl InMemorySchemaProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema, compiling its API alias tables.
    pub fn add(&mut self, kind: SchemaKind, mut schema: SchemaModel) {
        schema.compile_aliases();
        self.schemas.insert((kind, schema.scheme.clone()), schema);
    }

    /// Registers a component schema.
    pub fn add_component(&mut self, schema: SchemaModel) {
        self.add(SchemaKind::Component, schema);
    }
}

impl SchemaProvider for InMemorySchemaProvider {
    fn schema<'a>(&'a self, kind: SchemaKind, name: &str) -> Option<&'a SchemaModel> {
        let found = self.schemas.get(&(kind, name.to_string()));
        tracing::trace!(namespace = kind.section_key(), name, hit = found.is_some(), "schema lookup");
        found
    }
}

/// Failure while reading a JSON schema document.
#[derive(Debug, thiserror::Error)]
pub enum SchemaJsonError {
    #[error("invalid schema document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("schema document is missing the '{0}' section")]
    MissingSection(&'static str),
}

/// Schema provider that parses JSON schema documents.
///
/// The document layout mirrors the original catalog format: a header section
/// named after the namespace, a `componentProperties` section for
/// component-level options, a `properties` section holding endpoint options
/// (entries of kind `path` form the endpoint-path subset), and for API-style
/// schemes `apis` plus `apiProperties` sections.
#[derive(Debug, Default)]
pub struct JsonSchemaProvider {
    inner: InMemorySchemaProvider,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct HeaderSection {
    scheme: Option<String>,
    name: Option<String>,
    title: Option<String>,
    description: Option<String>,
    syntax: Option<String>,
    alternative_syntax: Option<String>,
    consumer_only: bool,
    producer_only: bool,
    lenient_properties: bool,
    api: bool,
    api_syntax: Option<String>,
}

impl JsonSchemaProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and registers one schema document under the given namespace.
    pub fn add_json(&mut self, kind: SchemaKind, json: &str) -> Result<(), SchemaJsonError> {
        let schema = parse_schema_document(kind, json)?;
        tracing::debug!(scheme = %schema.scheme, namespace = kind.section_key(), "loaded schema document");
        self.inner.add(kind, schema);
        Ok(())
    }
}

impl SchemaProvider for JsonSchemaProvider {
    fn schema<'a>(&'a self, kind: SchemaKind, name: &str) -> Option<&'a SchemaModel> {
        self.inner.schema(kind, name)
    }
}

/// Parses one JSON schema document into a [`SchemaModel`].
pub fn parse_schema_document(kind: SchemaKind, json: &str) -> Result<SchemaModel, SchemaJsonError> {
    let doc: Value = serde_json::from_str(json)?;
    let header_value = doc
        .get(kind.section_key())
        .ok_or(SchemaJsonError::MissingSection(kind.section_key()))?;
    let header: HeaderSection = serde_json::from_value(header_value.clone())?;

    let mut schema = SchemaModel {
        scheme: header.scheme.or(header.name).unwrap_or_default(),
        title: header.title,
        description: header.description,
        syntax: header.syntax,
        alternative_syntax: header.alternative_syntax,
        consumer_only: header.consumer_only,
        producer_only: header.producer_only,
        lenient_properties: header.lenient_properties,
        api: header.api,
        api_syntax: header.api_syntax,
        ..Default::default()
    };

    if let Some(section) = doc.get("componentProperties") {
        schema.component_options = parse_options(section)?;
    }
    if let Some(section) = doc.get("properties") {
        for option in parse_options(section)? {
            if option.kind == OptionKind::Path {
                schema.endpoint_path_options.push(option);
            } else {
                schema.endpoint_options.push(option);
            }
        }
    }
    if schema.api {
        schema.apis = parse_apis(&doc)?;
    }
    Ok(schema)
}

fn parse_options(section: &Value) -> Result<Vec<OptionModel>, SchemaJsonError> {
    let Some(object) = section.as_object() else {
        return Ok(Vec::new());
    };
    let mut options = Vec::with_capacity(object.len());
    for (name, value) in object {
        let mut option: OptionModel = serde_json::from_value(value.clone())?;
        option.name = name.clone();
        options.push(option);
    }
    Ok(options)
}

fn parse_apis(doc: &Value) -> Result<Vec<ApiModel>, SchemaJsonError> {
    let mut apis = Vec::new();
    let Some(section) = doc.get("apis").and_then(Value::as_object) else {
        return Ok(apis);
    };
    let api_properties = doc.get("apiProperties");
    for (api_name, api_value) in section {
        let mut api = ApiModel::new(api_name.clone());
        if let Some(aliases) = api_value.get("aliases").and_then(Value::as_array) {
            for alias in aliases {
                if let Some(alias) = alias.as_str() {
                    api = api.alias(alias);
                }
            }
        }
        if let Some(methods) = api_value.get("methods").and_then(Value::as_object) {
            for method_name in methods.keys() {
                let options = api_properties
                    .and_then(|p| p.get(api_name))
                    .and_then(|p| p.get("methods"))
                    .and_then(|p| p.get(method_name))
                    .and_then(|p| p.get("properties"))
                    .map(parse_options)
                    .transpose()?
                    .unwrap_or_default();
                api = api.method(ApiMethodModel {
                    name: method_name.clone(),
                    options,
                });
            }
        }
        apis.push(api);
    }
    Ok(apis)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMER_JSON: &str = r#"{
        "component": {
            "scheme": "timer",
            "title": "Timer",
            "syntax": "timer:timerName",
            "consumerOnly": true
        },
        "componentProperties": {
            "includeMetadata": { "kind": "property", "type": "boolean", "defaultValue": "false" }
        },
        "properties": {
            "timerName": { "kind": "path", "type": "string", "required": true },
            "period": { "kind": "parameter", "type": "duration", "defaultValue": "1000" },
            "repeatCount": { "kind": "parameter", "type": "integer" }
        }
    }"#;

    #[test]
    fn test_parse_component_document() {
        let schema = parse_schema_document(SchemaKind::Component, TIMER_JSON).unwrap();
        assert_eq!(schema.scheme, "timer");
        assert_eq!(schema.syntax.as_deref(), Some("timer:timerName"));
        assert!(schema.consumer_only);
        assert_eq!(schema.component_options.len(), 1);
        assert_eq!(schema.endpoint_path_options.len(), 1);
        assert_eq!(schema.endpoint_options.len(), 2);
        let period = schema.option_index().get("period").unwrap();
        assert_eq!(period.default_value.as_deref(), Some("1000"));
    }

    #[test]
    fn test_provider_namespaces_are_distinct() {
        let mut provider = JsonSchemaProvider::new();
        provider.add_json(SchemaKind::Component, TIMER_JSON).unwrap();
        assert!(provider.component_schema("timer").is_some());
        assert!(provider.data_format_schema("timer").is_none());
        assert!(provider.language_schema("timer").is_none());
    }

    #[test]
    fn test_mocked_provider_answers_the_lookup_contract() {
        let mut mock = MockSchemaProvider::new();
        mock.expect_schema()
            .withf(|kind, name| *kind == SchemaKind::Component && name == "timer")
            .returning(|_, _| None);
        assert!(mock.schema(SchemaKind::Component, "timer").is_none());
    }

    #[test]
    fn test_missing_section_is_an_error() {
        let err = parse_schema_document(SchemaKind::DataFormat, TIMER_JSON).unwrap_err();
        assert!(matches!(err, SchemaJsonError::MissingSection("dataformat")));
    }

    #[test]
    fn test_parse_api_document() {
        let json = r#"{
            "component": {
                "scheme": "svc",
                "syntax": "svc:apiName/methodName",
                "api": true,
                "apiSyntax": "apiName/methodName"
            },
            "properties": {
                "apiName": { "kind": "path", "required": true },
                "methodName": { "kind": "path", "required": true }
            },
            "apis": {
                "client": {
                    "aliases": ["^get.*$=fetch"],
                    "methods": { "getRecord": { "description": "read one record" } }
                }
            },
            "apiProperties": {
                "client": {
                    "methods": {
                        "getRecord": { "properties": { "recordId": { "kind": "parameter" } } }
                    }
                }
            }
        }"#;
        let mut schema = parse_schema_document(SchemaKind::Component, json).unwrap();
        schema.compile_aliases();
        assert!(schema.api);
        assert_eq!(schema.apis.len(), 1);
        assert_eq!(schema.api_options("client", Some("fetch")).len(), 1);
    }
}
