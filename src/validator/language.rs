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

//! Expression/predicate validation for scripting languages, dispatched
//! through a static registry instead of runtime plugin discovery.

use std::collections::HashMap;

use crate::grammar::urisupport;
use crate::schema::PropertyMap;
use crate::strings;

/// Outcome of validating a single expression or predicate.
#[derive(Debug, Clone, Default)]
pub struct LanguageValidationResult {
    text: String,
    error: Option<String>,
    short_error: Option<String>,
    index: Option<usize>,
}

impl LanguageValidationResult {
    pub fn success(text: impl Into<String>) -> Self {
        LanguageValidationResult {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn failure(text: impl Into<String>, error: impl Into<String>) -> Self {
        LanguageValidationResult {
            text: text.into(),
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Attaches a condensed, single-line rendering of the error.
    pub fn with_short_error(mut self, short_error: impl Into<String>) -> Self {
        self.short_error = Some(short_error.into());
        self
    }

    /// Attaches the character index at which validation failed.
    pub fn at_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn short_error(&self) -> Option<&str> {
        self.short_error.as_deref()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Validation capability of one scripting/expression language.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
pub trait LanguageValidator: Send + Sync {
    fn validate_expression(&self, text: &str, options: &PropertyMap) -> LanguageValidationResult;
    fn validate_predicate(&self, text: &str, options: &PropertyMap) -> LanguageValidationResult;
}

/// Maps a language identifier to its validator.
///
/// The identifier may carry options in query form (`simple?trim=true`); the
/// options are parsed off and handed to the validator.
#[derive(Default)]
pub struct LanguageValidatorRegistry {
    validators: HashMap<String, Box<dyn LanguageValidator>>,
}

impl LanguageValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, language: impl Into<String>, validator: Box<dyn LanguageValidator>) {
        self.validators.insert(language.into(), validator);
    }

    pub fn validate_expression(&self, language: &str, text: &str) -> LanguageValidationResult {
        self.dispatch(language, text, false)
    }

    pub fn validate_predicate(&self, language: &str, text: &str) -> LanguageValidationResult {
        self.dispatch(language, text, true)
    }

    fn dispatch(&self, language: &str, text: &str, predicate: bool) -> LanguageValidationResult {
        let (name, options) = match strings::before(language, "?") {
            Some(name) => {
                let query = strings::after(language, "?").unwrap_or("");
                match urisupport::parse_parameters(query) {
                    Ok(options) => (name, options),
                    Err(_) => {
                        return LanguageValidationResult::failure(
                            text,
                            format!("Cannot parse language options: {query}"),
                        );
                    }
                }
            }
            None => (language, PropertyMap::new()),
        };
        let Some(validator) = self.validators.get(name) else {
            return LanguageValidationResult::failure(text, format!("Unknown language {name}"));
        };
        if predicate {
            validator.validate_predicate(text, &options)
        } else {
            validator.validate_expression(text, &options)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_language_fails() {
        let registry = LanguageValidatorRegistry::new();
        let result = registry.validate_expression("simple", "${body}");
        assert!(!result.is_success());
        assert_eq!(result.error(), Some("Unknown language simple"));
    }

    #[test]
    fn test_dispatch_to_registered_validator() {
        let mut mock = MockLanguageValidator::new();
        mock.expect_validate_expression()
            .withf(|text, _| text == "${body}")
            .return_once(|text, _| LanguageValidationResult::success(text));
        let mut registry = LanguageValidatorRegistry::new();
        registry.register("simple", Box::new(mock));
        let result = registry.validate_expression("simple", "${body}");
        assert!(result.is_success());
        assert_eq!(result.text(), "${body}");
    }

    #[test]
    fn test_options_are_parsed_off_the_identifier() {
        let mut mock = MockLanguageValidator::new();
        mock.expect_validate_predicate()
            .withf(|_, options| options.get("trim") == Some("true"))
            .return_once(|text, _| LanguageValidationResult::success(text));
        let mut registry = LanguageValidatorRegistry::new();
        registry.register("simple", Box::new(mock));
        let result = registry.validate_predicate("simple?trim=true", "${body} != null");
        assert!(result.is_success());
    }

    #[test]
    fn test_failure_carries_position() {
        let result = LanguageValidationResult::failure("${body", "unbalanced brace")
            .with_short_error("unbalanced brace")
            .at_index(5);
        assert_eq!(result.index(), Some(5));
        assert_eq!(result.short_error(), Some("unbalanced brace"));
    }
}
