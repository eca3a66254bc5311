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

//! The declarative REST resource tree: resources, verbs, parameters,
//! responses and external contracts.
//!
//! Models are built once at configuration time and are immutable during
//! compilation; the compiler works on its own copies where it needs to
//! register parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP verb of a REST service operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Head => "head",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The media-type/body-conversion strategy applied to a REST verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingMode {
    #[default]
    Off,
    Auto,
    Json,
    Xml,
    JsonXml,
}

impl BindingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingMode::Off => "off",
            BindingMode::Auto => "auto",
            BindingMode::Json => "json",
            BindingMode::Xml => "xml",
            BindingMode::JsonXml => "json_xml",
        }
    }

    /// The media types implied by the mode, used to infer consumes/produces
    /// when a typed body or response is declared without an explicit type.
    pub fn media_types(&self) -> Option<&'static str> {
        match self {
            BindingMode::Json => Some("application/json"),
            BindingMode::Xml => Some("application/xml"),
            BindingMode::JsonXml => Some("application/json;application/xml"),
            BindingMode::Off | BindingMode::Auto => None,
        }
    }
}

/// Where a REST parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamKind {
    Path,
    Query,
    Header,
    Body,
    FormData,
}

/// A declared (or auto-registered) parameter of a REST verb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamModel {
    pub name: String,
    pub kind: ParamKind,
    pub required: bool,
    pub default_value: Option<String>,
    pub allowed_values: Vec<String>,
    pub data_type: Option<String>,
    pub description: Option<String>,
}

impl ParamModel {
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        ParamModel {
            name: name.into(),
            kind,
            required: true,
            default_value: None,
            allowed_values: Vec::new(),
            data_type: None,
            description: None,
        }
    }

    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Query)
    }

    pub fn header(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Header)
    }

    pub fn body() -> Self {
        Self::new("body", ParamKind::Body)
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A declared response of a REST verb.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseModel {
    /// Status code, or `default` for the fallback response.
    pub code: String,
    pub content_type: Option<String>,
    /// Names of the declared response headers.
    pub headers: Vec<String>,
    pub description: Option<String>,
}

impl ResponseModel {
    pub fn new(code: impl Into<String>) -> Self {
        ResponseModel {
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>) -> Self {
        self.headers.push(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One HTTP operation of a REST resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerbModel {
    pub method: HttpMethod,
    pub path: Option<String>,
    pub consumes: Option<String>,
    pub produces: Option<String>,
    pub binding_mode: Option<BindingMode>,
    /// Model type of the request body.
    pub in_type: Option<String>,
    /// Model type of the response body.
    pub out_type: Option<String>,
    pub params: Vec<ParamModel>,
    pub responses: Vec<ResponseModel>,
    /// The downstream endpoint this verb forwards to.
    pub target: Option<String>,
    pub route_id: Option<String>,
    pub description: Option<String>,
    pub disabled: bool,
    pub skip_binding_on_error_code: Option<bool>,
    pub client_request_validation: Option<bool>,
    pub client_response_validation: Option<bool>,
    pub enable_cors: Option<bool>,
    pub enable_no_content_response: Option<bool>,
}

impl VerbModel {
    pub fn new(method: HttpMethod) -> Self {
        VerbModel {
            method,
            path: None,
            consumes: None,
            produces: None,
            binding_mode: None,
            in_type: None,
            out_type: None,
            params: Vec::new(),
            responses: Vec::new(),
            target: None,
            route_id: None,
            description: None,
            disabled: false,
            skip_binding_on_error_code: None,
            client_request_validation: None,
            client_response_validation: None,
            enable_cors: None,
            enable_no_content_response: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get).path(path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post).path(path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put).path(path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete).path(path)
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn consumes(mut self, consumes: impl Into<String>) -> Self {
        self.consumes = Some(consumes.into());
        self
    }

    pub fn produces(mut self, produces: impl Into<String>) -> Self {
        self.produces = Some(produces.into());
        self
    }

    pub fn binding_mode(mut self, mode: BindingMode) -> Self {
        self.binding_mode = Some(mode);
        self
    }

    pub fn in_type(mut self, in_type: impl Into<String>) -> Self {
        self.in_type = Some(in_type.into());
        self
    }

    pub fn out_type(mut self, out_type: impl Into<String>) -> Self {
        self.out_type = Some(out_type.into());
        self
    }

    pub fn param(mut self, param: ParamModel) -> Self {
        self.params.push(param);
        self
    }

    pub fn response(mut self, response: ResponseModel) -> Self {
        self.responses.push(response);
        self
    }

    /// Sets the forwarding target endpoint.
    pub fn to(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn route_id(mut self, route_id: impl Into<String>) -> Self {
        self.route_id = Some(route_id.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn enable_cors(mut self, enable: bool) -> Self {
        self.enable_cors = Some(enable);
        self
    }

    /// The duplicate-detection key of this verb, `method[:path]`.
    pub(crate) fn dedup_key(&self) -> String {
        match &self.path {
            Some(path) => format!("{}:{path}", self.method),
            None => self.method.to_string(),
        }
    }
}

/// An external API contract document attached instead of explicit verbs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractModel {
    /// Location of the specification document.
    pub specification: String,
    pub api_context_path: Option<String>,
    /// What to do for operations present in the contract but without a route.
    pub missing_operation: Option<String>,
    pub route_id: Option<String>,
    pub description: Option<String>,
    pub disabled: bool,
}

impl ContractModel {
    pub fn new(specification: impl Into<String>) -> Self {
        ContractModel {
            specification: specification.into(),
            ..Default::default()
        }
    }

    pub fn missing_operation(mut self, action: impl Into<String>) -> Self {
        self.missing_operation = Some(action.into());
        self
    }

    pub fn route_id(mut self, route_id: impl Into<String>) -> Self {
        self.route_id = Some(route_id.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// A REST resource: a base path with its operations, or an attached external
/// contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestResourceModel {
    pub base_path: Option<String>,
    pub consumes: Option<String>,
    pub produces: Option<String>,
    pub binding_mode: Option<BindingMode>,
    /// `name -> scopes` pairs of the security schemes this resource requires.
    pub security_requirements: Vec<(String, String)>,
    pub disabled: bool,
    pub verbs: Vec<VerbModel>,
    pub contract: Option<ContractModel>,
    pub description: Option<String>,
    pub skip_binding_on_error_code: Option<bool>,
    pub client_request_validation: Option<bool>,
    pub client_response_validation: Option<bool>,
    pub enable_cors: Option<bool>,
    pub enable_no_content_response: Option<bool>,
}

impl RestResourceModel {
    pub fn new(base_path: impl Into<String>) -> Self {
        RestResourceModel {
            base_path: Some(base_path.into()),
            ..Default::default()
        }
    }

    pub fn consumes(mut self, consumes: impl Into<String>) -> Self {
        self.consumes = Some(consumes.into());
        self
    }

    pub fn produces(mut self, produces: impl Into<String>) -> Self {
        self.produces = Some(produces.into());
        self
    }

    pub fn binding_mode(mut self, mode: BindingMode) -> Self {
        self.binding_mode = Some(mode);
        self
    }

    pub fn security_requirement(
        mut self,
        name: impl Into<String>,
        scopes: impl Into<String>,
    ) -> Self {
        self.security_requirements.push((name.into(), scopes.into()));
        self
    }

    pub fn verb(mut self, verb: VerbModel) -> Self {
        self.verbs.push(verb);
        self
    }

    pub fn contract(mut self, contract: ContractModel) -> Self {
        self.contract = Some(contract);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}
