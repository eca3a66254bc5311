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

use crate::rest::model::BindingMode;

/// The effective message-binding contract of one compiled route.
///
/// Produced by the compiler from the merged verb, resource and global
/// configuration; consumers use it to drive body conversion and request
/// validation at runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindingDescription {
    /// Component implementing the binding, when pinned by configuration.
    pub component: Option<String>,
    pub binding_mode: BindingMode,
    pub consumes: Option<String>,
    pub produces: Option<String>,
    /// Model type of the inbound body.
    pub in_type: Option<String>,
    /// Model type of the outbound body.
    pub out_type: Option<String>,
    pub skip_binding_on_error_code: Option<bool>,
    pub client_request_validation: bool,
    pub client_response_validation: bool,
    pub enable_cors: bool,
    pub enable_no_content_response: bool,
    /// Default values of query and header parameters, `name -> value`.
    pub default_values: Vec<(String, String)>,
    /// Allowed values of query and header parameters, `name -> joined list`.
    pub allowed_values: Vec<(String, String)>,
    pub required_query_parameters: Vec<String>,
    pub required_headers: Vec<String>,
    pub required_body: bool,
    /// Declared response codes, `code -> content type`.
    pub response_codes: Vec<(String, Option<String>)>,
    /// Names of declared response headers.
    pub response_headers: Vec<String>,
}

impl BindingDescription {
    /// Whether the binding carries any constraint worth enforcing at runtime.
    pub fn has_constraints(&self) -> bool {
        self.required_body
            || !self.required_query_parameters.is_empty()
            || !self.required_headers.is_empty()
            || !self.default_values.is_empty()
            || !self.allowed_values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_constraints() {
        assert!(!BindingDescription::default().has_constraints());
    }

    #[test]
    fn test_required_body_is_a_constraint() {
        let binding = BindingDescription {
            required_body: true,
            ..Default::default()
        };
        assert!(binding.has_constraints());
    }
}
