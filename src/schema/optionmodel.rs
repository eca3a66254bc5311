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

use serde::{Deserialize, Serialize};

/// Where an option appears in a concrete endpoint address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// The option is bound positionally from the address path.
    Path,
    /// The option is supplied as a query parameter. Component-level documents
    /// list these under the `property` kind.
    #[default]
    #[serde(alias = "property")]
    Parameter,
    /// The option is carried in the message body.
    Body,
}

/// The declared value type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Boolean,
    Integer,
    Number,
    Duration,
    #[default]
    String,
    Array,
    Object,
    Enum,
}

/// A single documented configuration option of a connector scheme.
///
/// Options are immutable once the schema is constructed; the grammar engine
/// and the validator only ever read them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionModel {
    /// The canonical option name as listed in the schema.
    #[serde(skip)]
    pub name: String,
    pub kind: OptionKind,
    #[serde(rename = "type")]
    pub option_type: OptionType,
    pub required: bool,
    pub default_value: Option<String>,
    /// Permitted literals when the option is enum-constrained.
    #[serde(rename = "enum")]
    pub enums: Option<Vec<String>>,
    pub secret: bool,
    pub deprecated: bool,
    /// Marks a multi-valued option whose concrete query keys all share this
    /// literal prefix (for example `scheduler.`).
    pub prefix: Option<String>,
    /// A prefix that may or may not appear before the literal option name.
    pub optional_prefix: Option<String>,
    pub multi_value: bool,
    /// Free-text tags; `consumer` / `producer` drive direction filtering.
    pub label: Option<String>,
}

impl OptionModel {
    pub fn new(name: impl Into<String>) -> Self {
        OptionModel {
            name: name.into(),
            ..Default::default()
        }
    }

    /// A required positional path option.
    pub fn path(name: impl Into<String>) -> Self {
        OptionModel {
            name: name.into(),
            kind: OptionKind::Path,
            ..Default::default()
        }
    }

    /// A query-parameter option.
    pub fn parameter(name: impl Into<String>) -> Self {
        OptionModel {
            name: name.into(),
            kind: OptionKind::Parameter,
            ..Default::default()
        }
    }

    pub fn of_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn enums<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enums = Some(values.into_iter().map(Into::into).collect());
        self.option_type = OptionType::Enum;
        self
    }

    pub fn secret(mut self, secret: bool) -> Self {
        self.secret = secret;
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn optional_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.optional_prefix = Some(prefix.into());
        self
    }

    pub fn multi_value(mut self, multi_value: bool) -> Self {
        self.multi_value = multi_value;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether the option is tagged for the given direction label
    /// (`consumer` or `producer`).
    pub fn has_label(&self, label: &str) -> bool {
        self.label.as_deref().is_some_and(|l| l.contains(label))
    }
}
