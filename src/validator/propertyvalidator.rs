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

use crate::grammar::{endpoint_properties, urisupport};
use crate::schema::{OptionKind, OptionType, PropertyMap, SchemaProvider};
use crate::strings;
use crate::validator::timepattern;
use crate::validator::{Direction, SuggestionStrategy, ValidationReport};

/// Validates option mappings and endpoint addresses against their schema.
///
/// All checks are additive: the validator gathers every applicable defect per
/// option instead of stopping at the first one.
pub struct PropertyValidator<'a> {
    provider: &'a dyn SchemaProvider,
    suggestions: Option<Box<dyn SuggestionStrategy>>,
}

impl<'a> PropertyValidator<'a> {
    pub fn new(provider: &'a dyn SchemaProvider) -> Self {
        PropertyValidator {
            provider,
            suggestions: None,
        }
    }

    /// Plugs in a strategy for proposing near-miss corrections.
    pub fn with_suggestions(mut self, strategy: Box<dyn SuggestionStrategy>) -> Self {
        self.suggestions = Some(strategy);
        self
    }

    /// Parses an endpoint address and validates the resulting option mapping.
    ///
    /// Lenient acceptance of unrecognized options follows the schema, except
    /// that a scheme usable in both directions validated for consuming only
    /// is never lenient. `ignore_lenient` turns leniency off entirely.
    pub fn validate_endpoint_properties(
        &self,
        uri: &str,
        ignore_lenient: bool,
        direction: Direction,
    ) -> ValidationReport {
        if uri.starts_with("{{") {
            // placeholder address, nothing useful can be checked
            let mut report = ValidationReport::new(uri);
            report.add_incapable(uri);
            return report;
        }
        let parsed = match urisupport::parse_uri(uri) {
            Ok(parsed) => parsed,
            Err(e) => {
                let mut report = ValidationReport::new(uri);
                report.add_syntax_error(e.to_string());
                return report;
            }
        };
        let scheme = parsed.scheme.as_str();
        let Some(model) = self.provider.component_schema(scheme) else {
            let mut report = ValidationReport::new(uri);
            report.add_unknown_component(scheme);
            return report;
        };
        let properties = match endpoint_properties(self.provider, uri) {
            Ok(properties) => properties,
            Err(e) => {
                let mut report = ValidationReport::new(uri);
                report.add_syntax_error(e.to_string());
                return report;
            }
        };
        let lenient = if !model.consumer_only
            && !model.producer_only
            && direction == Direction::ConsumerOnly
        {
            false
        } else {
            !ignore_lenient && model.lenient_properties
        };
        self.validate_properties(scheme, &properties, lenient, direction)
    }

    /// Validates an option mapping against the schema of `scheme`.
    pub fn validate_properties(
        &self,
        scheme: &str,
        properties: &PropertyMap,
        lenient: bool,
        direction: Direction,
    ) -> ValidationReport {
        let mut report = ValidationReport::new(scheme);
        let Some(model) = self.provider.component_schema(scheme) else {
            report.add_unknown_component(scheme);
            return report;
        };
        let mut rows = model.option_index();

        // API-style schemes contribute the options of the addressed method
        let api_words: Vec<&str> = model
            .api_syntax
            .as_deref()
            .map(|s| s.split(['/', ':']).collect())
            .unwrap_or_default();
        if model.api {
            let key1 = api_words.first().and_then(|w| properties.get(w));
            let key2 = api_words.get(1).and_then(|w| properties.get(w));
            if let Some(key1) = key1 {
                rows.splice(model.api_options(key1, key2));
            }
        }

        // the data format pseudo-scheme refers to a named data format whose
        // own options join the validated vocabulary
        if scheme == "dataformat" {
            if let Some(df) = properties
                .get("name")
                .and_then(|name| self.provider.data_format_schema(name))
            {
                rows.splice(
                    df.component_options
                        .iter()
                        .chain(&df.endpoint_options)
                        .chain(&df.endpoint_path_options),
                );
            }
        }

        for (original_name, value) in properties.iter() {
            let mut name = rows.strip_optional_prefix(original_name);
            if let Some(owner) = rows.resolve_prefixed(&name) {
                name = owner.name.clone();
            }
            let Some(row) = rows.get(&name) else {
                let name_placeholder = name.starts_with("{{") && name.ends_with("}}");
                if !name_placeholder && scheme != "stub" {
                    if lenient {
                        report.add_lenient(&name);
                    } else {
                        report.add_unknown(&name);
                        if let Some(strategy) = &self.suggestions {
                            let names: Vec<String> =
                                rows.names().map(str::to_string).collect();
                            let proposals = strategy.suggest_endpoint_options(&names, &name);
                            if !proposals.is_empty() {
                                report.add_unknown_suggestions(&name, proposals);
                            }
                        }
                    }
                }
                continue;
            };

            if row.kind == OptionKind::Parameter {
                match direction {
                    Direction::ConsumerOnly if row.has_label("producer") => {
                        report.add_not_consumer_only(&name);
                    }
                    Direction::ProducerOnly if row.has_label("consumer") => {
                        report.add_not_producer_only(&name);
                    }
                    _ => {}
                }
            }

            let value_placeholder = strings::is_placeholder(value);
            let lookup = strings::is_reference(value);
            // multi-values carry unknown sub-keys, so strict checks are off
            let multi_value = row.multi_value
                && row
                    .prefix
                    .as_deref()
                    .is_some_and(|p| original_name.starts_with(p));

            if let Some(default) = row.default_value.as_deref() {
                report.add_default_value(&name, default);
            }
            if row.required && value.trim().is_empty() {
                report.add_required(&name);
            }
            if row.deprecated {
                report.add_deprecated(&name);
            }

            if let Some(enums) = row.enums.as_deref() {
                if !multi_value && !value_placeholder && !lookup {
                    let dashed = strings::camel_case_to_dash(value);
                    let camel = strings::dash_to_camel_case(value);
                    let constant = strings::as_enum_constant(value);
                    let found = enums.iter().any(|literal| {
                        value.eq_ignore_ascii_case(literal)
                            || dashed.eq_ignore_ascii_case(literal)
                            || camel.eq_ignore_ascii_case(literal)
                            || constant.eq_ignore_ascii_case(literal)
                    });
                    if !found {
                        report.add_invalid_enum(&name, value);
                        report.add_invalid_enum_choices(&name, enums.to_vec());
                        if let Some(strategy) = &self.suggestions {
                            let proposals = strategy.suggest_endpoint_options(enums, value);
                            if !proposals.is_empty() {
                                report.add_invalid_enum_suggestions(&name, proposals);
                            }
                        }
                    }
                }
            }

            if !multi_value
                && row.enums.is_none()
                && row.kind != OptionKind::Path
                && row.option_type == OptionType::Object
                && !strings::is_reference(value)
            {
                report.add_invalid_reference(&name, value);
            }

            if !multi_value && !value_placeholder && !lookup {
                match row.option_type {
                    OptionType::Boolean if !strings::is_boolean(value) => {
                        report.add_invalid_boolean(&name, value);
                    }
                    OptionType::Duration if !timepattern::validate_duration(value) => {
                        report.add_invalid_duration(&name, value);
                    }
                    OptionType::Integer if value.parse::<i64>().is_err() => {
                        report.add_invalid_integer(&name, value);
                    }
                    OptionType::Number
                        if value.parse::<f64>().map(f64::is_nan).unwrap_or(true) =>
                    {
                        report.add_invalid_number(&name, value);
                    }
                    _ => {}
                }
            }
        }

        // the two leading api-syntax values must name a known api and method
        if model.api {
            let key1 = api_words.first().and_then(|w| properties.get(w));
            let key2 = api_words.get(1).and_then(|w| properties.get(w));
            if let (Some(key1), Some(key2)) = (key1, key2) {
                match model.check_api_keys(key1, key2) {
                    Ok(()) => {}
                    Err(crate::schema::ApiKeyError::UnknownApi { choices }) => {
                        report.add_invalid_enum(api_words[0], key1);
                        report.add_invalid_enum_choices(api_words[0], choices);
                    }
                    Err(crate::schema::ApiKeyError::UnknownMethod { choices }) => {
                        report.add_invalid_enum(api_words[1], key2);
                        report.add_invalid_enum_choices(api_words[1], choices);
                    }
                }
            }
        }

        // second pass: required options neither supplied nor defaulted
        for row in rows.options() {
            if !row.required {
                continue;
            }
            let supplied = properties
                .get(&row.name)
                .is_some_and(|v| !v.trim().is_empty());
            let defaulted = row
                .default_value
                .as_deref()
                .is_some_and(|v| !v.trim().is_empty());
            if !supplied && !defaulted {
                report.add_required(&row.name);
            }
        }

        tracing::debug!(
            scheme,
            errors = report.number_of_errors(),
            "validated endpoint properties"
        );
        report
    }

    /// Checks whether a value is a well-formed duration/time pattern.
    pub fn validate_time_pattern(&self, value: &str) -> bool {
        timepattern::validate_duration(value)
    }
}
