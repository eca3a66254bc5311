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

use std::collections::BTreeMap;
use std::fmt::Write;

/// Accumulated outcome of validating an option mapping against a schema.
///
/// Defects never short-circuit the scan: one validation call surfaces the
/// complete defect set for a given input, which is what batch tooling needs.
/// Lenient options, deprecation notices and recorded default values are
/// informational and do not fail the report.
#[derive(Debug, Default)]
pub struct ValidationReport {
    input: String,
    syntax_error: Option<String>,
    unknown_component: Option<String>,
    incapable: Option<String>,
    unknown: Vec<String>,
    unknown_suggestions: BTreeMap<String, Vec<String>>,
    lenient: Vec<String>,
    required: Vec<String>,
    deprecated: Vec<String>,
    invalid_enum: BTreeMap<String, String>,
    invalid_enum_choices: BTreeMap<String, Vec<String>>,
    invalid_enum_suggestions: BTreeMap<String, Vec<String>>,
    invalid_reference: BTreeMap<String, String>,
    invalid_boolean: BTreeMap<String, String>,
    invalid_duration: BTreeMap<String, String>,
    invalid_integer: BTreeMap<String, String>,
    invalid_number: BTreeMap<String, String>,
    invalid_map: BTreeMap<String, String>,
    invalid_array: BTreeMap<String, String>,
    not_consumer_only: Vec<String>,
    not_producer_only: Vec<String>,
    default_values: BTreeMap<String, String>,
}

impl ValidationReport {
    pub fn new(input: impl Into<String>) -> Self {
        ValidationReport {
            input: input.into(),
            ..Default::default()
        }
    }

    /// The address or scheme this report was produced for.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn add_syntax_error(&mut self, message: impl Into<String>) {
        self.syntax_error = Some(message.into());
    }

    pub fn add_unknown_component(&mut self, name: impl Into<String>) {
        self.unknown_component = Some(name.into());
    }

    pub fn add_incapable(&mut self, uri: impl Into<String>) {
        self.incapable = Some(uri.into());
    }

    pub fn add_unknown(&mut self, name: &str) {
        if !self.unknown.iter().any(|n| n == name) {
            self.unknown.push(name.to_string());
        }
    }

    pub fn add_unknown_suggestions(&mut self, name: &str, suggestions: Vec<String>) {
        self.unknown_suggestions.insert(name.to_string(), suggestions);
    }

    pub fn add_lenient(&mut self, name: &str) {
        if !self.lenient.iter().any(|n| n == name) {
            self.lenient.push(name.to_string());
        }
    }

    pub fn add_required(&mut self, name: &str) {
        if !self.required.iter().any(|n| n == name) {
            self.required.push(name.to_string());
        }
    }

    pub fn add_deprecated(&mut self, name: &str) {
        if !self.deprecated.iter().any(|n| n == name) {
            self.deprecated.push(name.to_string());
        }
    }

    pub fn add_invalid_enum(&mut self, name: &str, value: &str) {
        self.invalid_enum.insert(name.to_string(), value.to_string());
    }

    pub fn add_invalid_enum_choices(&mut self, name: &str, choices: Vec<String>) {
        self.invalid_enum_choices.insert(name.to_string(), choices);
    }

    pub fn add_invalid_enum_suggestions(&mut self, name: &str, suggestions: Vec<String>) {
        self.invalid_enum_suggestions
            .insert(name.to_string(), suggestions);
    }

    pub fn add_invalid_reference(&mut self, name: &str, value: &str) {
        self.invalid_reference
            .insert(name.to_string(), value.to_string());
    }

    pub fn add_invalid_boolean(&mut self, name: &str, value: &str) {
        self.invalid_boolean
            .insert(name.to_string(), value.to_string());
    }

    pub fn add_invalid_duration(&mut self, name: &str, value: &str) {
        self.invalid_duration
            .insert(name.to_string(), value.to_string());
    }

    pub fn add_invalid_integer(&mut self, name: &str, value: &str) {
        self.invalid_integer
            .insert(name.to_string(), value.to_string());
    }

    pub fn add_invalid_number(&mut self, name: &str, value: &str) {
        self.invalid_number
            .insert(name.to_string(), value.to_string());
    }

    pub fn add_invalid_map(&mut self, name: &str, value: &str) {
        self.invalid_map.insert(name.to_string(), value.to_string());
    }

    pub fn add_invalid_array(&mut self, name: &str, value: &str) {
        self.invalid_array
            .insert(name.to_string(), value.to_string());
    }

    pub fn add_not_consumer_only(&mut self, name: &str) {
        if !self.not_consumer_only.iter().any(|n| n == name) {
            self.not_consumer_only.push(name.to_string());
        }
    }

    pub fn add_not_producer_only(&mut self, name: &str) {
        if !self.not_producer_only.iter().any(|n| n == name) {
            self.not_producer_only.push(name.to_string());
        }
    }

    pub fn add_default_value(&mut self, name: &str, value: &str) {
        self.default_values
            .insert(name.to_string(), value.to_string());
    }

    pub fn syntax_error(&self) -> Option<&str> {
        self.syntax_error.as_deref()
    }

    pub fn unknown_component(&self) -> Option<&str> {
        self.unknown_component.as_deref()
    }

    pub fn incapable(&self) -> Option<&str> {
        self.incapable.as_deref()
    }

    pub fn unknown(&self) -> &[String] {
        &self.unknown
    }

    pub fn unknown_suggestions(&self, name: &str) -> Option<&[String]> {
        self.unknown_suggestions.get(name).map(Vec::as_slice)
    }

    pub fn lenient(&self) -> &[String] {
        &self.lenient
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn deprecated(&self) -> &[String] {
        &self.deprecated
    }

    pub fn invalid_enum(&self) -> &BTreeMap<String, String> {
        &self.invalid_enum
    }

    pub fn invalid_enum_choices(&self, name: &str) -> Option<&[String]> {
        self.invalid_enum_choices.get(name).map(Vec::as_slice)
    }

    pub fn invalid_enum_suggestions(&self, name: &str) -> Option<&[String]> {
        self.invalid_enum_suggestions.get(name).map(Vec::as_slice)
    }

    pub fn invalid_reference(&self) -> &BTreeMap<String, String> {
        &self.invalid_reference
    }

    pub fn invalid_boolean(&self) -> &BTreeMap<String, String> {
        &self.invalid_boolean
    }

    pub fn invalid_duration(&self) -> &BTreeMap<String, String> {
        &self.invalid_duration
    }

    pub fn invalid_integer(&self) -> &BTreeMap<String, String> {
        &self.invalid_integer
    }

    pub fn invalid_number(&self) -> &BTreeMap<String, String> {
        &self.invalid_number
    }

    pub fn not_consumer_only(&self) -> &[String] {
        &self.not_consumer_only
    }

    pub fn not_producer_only(&self) -> &[String] {
        &self.not_producer_only
    }

    pub fn default_values(&self) -> &BTreeMap<String, String> {
        &self.default_values
    }

    /// Whether the report carries no defects.
    pub fn is_success(&self) -> bool {
        self.number_of_errors() == 0
    }

    /// The total number of defects (informational entries excluded).
    pub fn number_of_errors(&self) -> usize {
        usize::from(self.syntax_error.is_some())
            + usize::from(self.unknown_component.is_some())
            + usize::from(self.incapable.is_some())
            + self.unknown.len()
            + self.required.len()
            + self.invalid_enum.len()
            + self.invalid_reference.len()
            + self.invalid_boolean.len()
            + self.invalid_duration.len()
            + self.invalid_integer.len()
            + self.invalid_number.len()
            + self.invalid_map.len()
            + self.invalid_array.len()
            + self.not_consumer_only.len()
            + self.not_producer_only.len()
    }

    /// A human readable, line-per-defect summary, or `None` for a clean report.
    pub fn summary_message(&self) -> Option<String> {
        if self.is_success() {
            return None;
        }
        let mut out = format!("{} has {} error(s)\n", self.input, self.number_of_errors());
        if let Some(error) = &self.syntax_error {
            let _ = writeln!(out, "  syntax error: {error}");
        }
        if let Some(name) = &self.unknown_component {
            let _ = writeln!(out, "  unknown component: {name}");
        }
        if let Some(uri) = &self.incapable {
            let _ = writeln!(out, "  incapable of validating: {uri}");
        }
        for name in &self.unknown {
            match self.unknown_suggestions.get(name) {
                Some(suggestions) if !suggestions.is_empty() => {
                    let _ = writeln!(
                        out,
                        "  unknown option: {name} (did you mean: {})",
                        suggestions.join(", ")
                    );
                }
                _ => {
                    let _ = writeln!(out, "  unknown option: {name}");
                }
            }
        }
        for name in &self.required {
            let _ = writeln!(out, "  missing required option: {name}");
        }
        for (name, value) in &self.invalid_enum {
            match self.invalid_enum_choices.get(name) {
                Some(choices) if !choices.is_empty() => {
                    let _ = writeln!(
                        out,
                        "  invalid enum value: {name}={value} (possible values: {})",
                        choices.join(", ")
                    );
                }
                _ => {
                    let _ = writeln!(out, "  invalid enum value: {name}={value}");
                }
            }
        }
        for (name, value) in &self.invalid_reference {
            let _ = writeln!(out, "  invalid reference value: {name}={value}");
        }
        for (name, value) in &self.invalid_boolean {
            let _ = writeln!(out, "  invalid boolean value: {name}={value}");
        }
        for (name, value) in &self.invalid_duration {
            let _ = writeln!(out, "  invalid duration value: {name}={value}");
        }
        for (name, value) in &self.invalid_integer {
            let _ = writeln!(out, "  invalid integer value: {name}={value}");
        }
        for (name, value) in &self.invalid_number {
            let _ = writeln!(out, "  invalid number value: {name}={value}");
        }
        for (name, value) in &self.invalid_map {
            let _ = writeln!(out, "  invalid map value: {name}={value}");
        }
        for (name, value) in &self.invalid_array {
            let _ = writeln!(out, "  invalid array value: {name}={value}");
        }
        for name in &self.not_consumer_only {
            let _ = writeln!(out, "  option not usable when consuming: {name}");
        }
        for name in &self.not_producer_only {
            let _ = writeln!(out, "  option not usable when producing: {name}");
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_success() {
        let report = ValidationReport::new("timer");
        assert!(report.is_success());
        assert_eq!(report.number_of_errors(), 0);
        assert!(report.summary_message().is_none());
    }

    #[test]
    fn test_informational_entries_do_not_fail() {
        let mut report = ValidationReport::new("timer");
        report.add_lenient("extra");
        report.add_deprecated("old");
        report.add_default_value("period", "1000");
        assert!(report.is_success());
    }

    #[test]
    fn test_defects_accumulate() {
        let mut report = ValidationReport::new("timer");
        report.add_unknown("foo");
        report.add_unknown("foo");
        report.add_invalid_boolean("fixedRate", "maybe");
        report.add_required("timerName");
        assert_eq!(report.number_of_errors(), 3);
        assert_eq!(report.unknown(), &["foo".to_string()]);
        let summary = report.summary_message().unwrap();
        assert!(summary.contains("unknown option: foo"));
        assert!(summary.contains("invalid boolean value: fixedRate=maybe"));
        assert!(summary.contains("missing required option: timerName"));
    }

    #[test]
    fn test_enum_choices_in_summary() {
        let mut report = ValidationReport::new("jms");
        report.add_invalid_enum("destinationType", "tropic");
        report.add_invalid_enum_choices(
            "destinationType",
            vec!["queue".to_string(), "topic".to_string()],
        );
        let summary = report.summary_message().unwrap();
        assert!(summary.contains("destinationType=tropic (possible values: queue, topic)"));
    }
}
