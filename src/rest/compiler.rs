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

//! Compiles a declarative REST resource tree into routable endpoint records.
//!
//! Each enabled verb becomes one route: a synthesized `rest:` consumer
//! address, the merged binding contract, and the forwarding target as the
//! single output. External contracts and the self-documentation endpoint
//! compile to their own pseudo-scheme addresses.

use std::collections::HashSet;

use mediatype::MediaType;
use regex::Regex;

use crate::grammar::{self, urisupport};
use crate::grammar::urisupport::QueryPart;
use crate::rest::binding::BindingDescription;
use crate::rest::model::{ContractModel, ParamKind, ParamModel, RestResourceModel, VerbModel};
use crate::rest::CompileError;
use crate::schema::{InMemorySchemaProvider, OptionModel, OptionType, PropertyMap, SchemaModel};

/// Global REST configuration, the lowest-precedence layer of the binding
/// merge (verb settings win over resource settings win over this).
#[derive(Debug, Clone, Default)]
pub struct RestConfig {
    /// Component hosting the REST consumer endpoints.
    pub component: Option<String>,
    /// Component used when producing to REST endpoints.
    pub producer_component: Option<String>,
    pub binding_mode: crate::rest::model::BindingMode,
    /// Whether forwarding targets are inlined into the consumer route, which
    /// requires every local target to be distinct.
    pub inline_routes: bool,
    /// Context path of the self-documentation endpoint.
    pub api_context_path: Option<String>,
    pub api_context_route_id: Option<String>,
    pub client_request_validation: bool,
    pub client_response_validation: bool,
}

impl RestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn binding_mode(mut self, mode: crate::rest::model::BindingMode) -> Self {
        self.binding_mode = mode;
        self
    }

    pub fn inline_routes(mut self, inline: bool) -> Self {
        self.inline_routes = inline;
        self
    }

    pub fn api_context_path(mut self, path: impl Into<String>) -> Self {
        self.api_context_path = Some(path.into());
        self
    }
}

/// One compiled route: where it consumes from, how it binds, and where it
/// forwards to.
#[derive(Debug, Clone)]
pub struct RouteDescription {
    /// The synthesized consumer endpoint address.
    pub from_address: String,
    pub binding: BindingDescription,
    /// Effective parameter list, including parameters auto-registered from
    /// the templated path.
    pub params: Vec<ParamModel>,
    pub route_id: Option<String>,
    /// Downstream endpoint addresses, in forwarding order.
    pub outputs: Vec<String>,
}

/// Compiles [`RestResourceModel`] trees against the builtin `rest`,
/// `rest-contract` and `rest-api` schemas.
pub struct RestCompiler {
    config: RestConfig,
    schemas: InMemorySchemaProvider,
}

impl RestCompiler {
    pub fn new(config: RestConfig) -> Self {
        RestCompiler {
            config,
            schemas: builtin_schemas(),
        }
    }

    /// Compiles one resource into its routes.
    ///
    /// A disabled resource yields no routes. Structural conflicts (duplicate
    /// verb paths, duplicate inlined targets, verbs mixed with a contract)
    /// fail the whole resource.
    pub fn compile(
        &self,
        resource: &RestResourceModel,
    ) -> Result<Vec<RouteDescription>, CompileError> {
        if resource.disabled {
            return Ok(Vec::new());
        }
        let verbs: Vec<&VerbModel> = resource.verbs.iter().filter(|v| !v.disabled).collect();
        let contract = resource.contract.as_ref().filter(|c| !c.disabled);
        if contract.is_some() && !verbs.is_empty() {
            return Err(CompileError::ContractConflict);
        }

        let mut seen = HashSet::new();
        for verb in &verbs {
            let key = verb.dedup_key();
            if !seen.insert(key.clone()) {
                return Err(CompileError::DuplicatePath(key));
            }
        }
        if self.config.inline_routes {
            let mut targets = HashSet::new();
            for verb in &verbs {
                if let Some(target) = verb.target.as_deref().filter(|t| t.starts_with("direct:")) {
                    if !targets.insert(target) {
                        return Err(CompileError::DuplicateTarget(target.to_string()));
                    }
                }
            }
        }

        let mut routes = Vec::new();
        if let Some(contract) = contract {
            routes.push(self.compile_contract(resource, contract)?);
        }
        for verb in verbs {
            routes.push(self.compile_verb(resource, verb)?);
        }
        tracing::debug!(
            base_path = resource.base_path.as_deref().unwrap_or(""),
            routes = routes.len(),
            "compiled rest resource"
        );
        Ok(routes)
    }

    fn compile_verb(
        &self,
        resource: &RestResourceModel,
        verb: &VerbModel,
    ) -> Result<RouteDescription, CompileError> {
        let target = verb
            .target
            .as_ref()
            .ok_or_else(|| CompileError::MissingTarget(verb.dedup_key()))?;

        let mode = verb
            .binding_mode
            .or(resource.binding_mode)
            .unwrap_or(self.config.binding_mode);
        let mut binding = BindingDescription {
            component: self.config.component.clone(),
            binding_mode: mode,
            consumes: verb.consumes.clone().or_else(|| resource.consumes.clone()),
            produces: verb.produces.clone().or_else(|| resource.produces.clone()),
            in_type: verb.in_type.clone(),
            out_type: verb.out_type.clone(),
            skip_binding_on_error_code: verb
                .skip_binding_on_error_code
                .or(resource.skip_binding_on_error_code),
            client_request_validation: verb
                .client_request_validation
                .or(resource.client_request_validation)
                .unwrap_or(self.config.client_request_validation),
            client_response_validation: verb
                .client_response_validation
                .or(resource.client_response_validation)
                .unwrap_or(self.config.client_response_validation),
            enable_cors: verb.enable_cors.or(resource.enable_cors).unwrap_or(false),
            enable_no_content_response: verb
                .enable_no_content_response
                .or(resource.enable_no_content_response)
                .unwrap_or(false),
            ..Default::default()
        };
        if let Some(consumes) = &binding.consumes {
            warn_on_malformed_media_types("consumes", consumes);
        }
        if let Some(produces) = &binding.produces {
            warn_on_malformed_media_types("produces", produces);
        }
        // a typed body implies the mode's media type unless declared explicitly
        if let Some(media) = mode.media_types() {
            if binding.consumes.is_none() && binding.in_type.is_some() {
                binding.consumes = Some(media.to_string());
            }
            if binding.produces.is_none() && binding.out_type.is_some() {
                binding.produces = Some(media.to_string());
            }
        }

        // constraints are harvested from the declared parameters only;
        // parameters auto-registered below carry no defaults of their own
        for param in &verb.params {
            if matches!(param.kind, ParamKind::Query | ParamKind::Header) {
                if let Some(default) = param.default_value.as_deref().filter(|d| !d.is_empty()) {
                    binding
                        .default_values
                        .push((param.name.clone(), default.to_string()));
                }
                if !param.allowed_values.is_empty() {
                    binding
                        .allowed_values
                        .push((param.name.clone(), param.allowed_values.join(",")));
                }
            }
            if param.required {
                match param.kind {
                    ParamKind::Query => {
                        binding.required_query_parameters.push(param.name.clone());
                    }
                    ParamKind::Header => binding.required_headers.push(param.name.clone()),
                    ParamKind::Body => binding.required_body = true,
                    _ => {}
                }
            }
        }
        for response in &verb.responses {
            binding
                .response_codes
                .push((response.code.clone(), response.content_type.clone()));
            binding.response_headers.extend(response.headers.iter().cloned());
        }

        let all_path = join_paths(resource.base_path.as_deref(), verb.path.as_deref());

        // register {name} tokens of the templated path as parameters; the
        // query-side tokens are placeholders only and are later stripped
        // from the synthesized address
        let mut params = verb.params.clone();
        let (path_part, query_part) = match all_path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (all_path.as_str(), None),
        };
        let mut to_remove = uri_templating(&mut params, path_part, false);
        if let Some(query) = query_part {
            to_remove.extend(uri_templating(&mut params, query, true));
        }
        if let Some(in_type) = &verb.in_type {
            if !params.iter().any(|p| p.kind == ParamKind::Body) {
                params.push(ParamModel::body().data_type(in_type.clone()));
            }
        }

        let mut properties = PropertyMap::new();
        properties.insert("method", verb.method.as_str());
        if !all_path.is_empty() {
            properties.insert("path", all_path.as_str());
        }
        let mut from = grammar::as_endpoint_uri(&self.schemas, "rest", &properties, false)?;
        if !to_remove.is_empty() {
            from = strip_templated_query(&from, &to_remove)?;
        }

        let mut options = PropertyMap::new();
        if let Some(consumes) = &binding.consumes {
            options.insert("consumes", consumes.as_str());
        }
        if let Some(produces) = &binding.produces {
            options.insert("produces", produces.as_str());
        }
        if let Some(in_type) = &verb.in_type {
            options.insert("inType", in_type.as_str());
        }
        if let Some(out_type) = &verb.out_type {
            options.insert("outType", out_type.as_str());
        }
        if let Some(component) = &self.config.component {
            options.insert("consumerComponentName", component.as_str());
        }
        if let Some(component) = &self.config.producer_component {
            options.insert("producerComponentName", component.as_str());
        }
        if let Some(description) = verb.description.as_ref().or(resource.description.as_ref()) {
            options.insert("description", description.as_str());
        }
        let from = urisupport::append_parameters_to_uri(&from, &options, false);

        Ok(RouteDescription {
            from_address: from,
            binding,
            params,
            route_id: verb.route_id.clone(),
            outputs: vec![target.clone()],
        })
    }

    fn compile_contract(
        &self,
        resource: &RestResourceModel,
        contract: &ContractModel,
    ) -> Result<RouteDescription, CompileError> {
        let mode = resource.binding_mode.unwrap_or(self.config.binding_mode);
        let binding = BindingDescription {
            component: self.config.component.clone(),
            binding_mode: mode,
            consumes: resource.consumes.clone(),
            produces: resource.produces.clone(),
            skip_binding_on_error_code: resource.skip_binding_on_error_code,
            client_request_validation: resource
                .client_request_validation
                .unwrap_or(self.config.client_request_validation),
            client_response_validation: resource
                .client_response_validation
                .unwrap_or(self.config.client_response_validation),
            enable_cors: resource.enable_cors.unwrap_or(false),
            enable_no_content_response: resource.enable_no_content_response.unwrap_or(false),
            ..Default::default()
        };

        let mut properties = PropertyMap::new();
        properties.insert("specification", contract.specification.as_str());
        let from = grammar::as_endpoint_uri(&self.schemas, "rest-contract", &properties, false)?;

        let mut options = PropertyMap::new();
        if let Some(consumes) = &binding.consumes {
            options.insert("consumes", consumes.as_str());
        }
        if let Some(produces) = &binding.produces {
            options.insert("produces", produces.as_str());
        }
        if binding.client_request_validation {
            options.insert("clientRequestValidation", "true");
        }
        if binding.client_response_validation {
            options.insert("clientResponseValidation", "true");
        }
        if let Some(action) = &contract.missing_operation {
            options.insert("missingOperation", action.as_str());
        }
        if let Some(path) = &contract.api_context_path {
            options.insert("apiContextPath", path.as_str());
        }
        if let Some(description) = contract.description.as_ref().or(resource.description.as_ref())
        {
            options.insert("description", description.as_str());
        }
        let from = urisupport::append_parameters_to_uri(&from, &options, false);

        Ok(RouteDescription {
            from_address: from,
            binding,
            params: Vec::new(),
            route_id: contract.route_id.clone(),
            outputs: Vec::new(),
        })
    }

    /// Compiles the self-documentation endpoint route, which serves the API
    /// catalog at the configured context path and forwards to itself.
    pub fn compile_api_route(&self) -> Result<RouteDescription, CompileError> {
        let mut properties = PropertyMap::new();
        if let Some(path) = &self.config.api_context_path {
            properties.insert("path", path.as_str());
        }
        let from = grammar::as_endpoint_uri(&self.schemas, "rest-api", &properties, false)?;
        let mut options = PropertyMap::new();
        if let Some(component) = &self.config.component {
            options.insert("consumerComponentName", component.as_str());
        }
        let from = urisupport::append_parameters_to_uri(&from, &options, false);
        Ok(RouteDescription {
            from_address: from.clone(),
            binding: BindingDescription::default(),
            params: Vec::new(),
            route_id: self.config.api_context_route_id.clone(),
            outputs: vec![from],
        })
    }
}

/// Logs declared `consumes`/`produces` entries that are not well-formed media
/// types. The compiled route is not rejected, the declared value may still be
/// meaningful to the consuming component.
fn warn_on_malformed_media_types(field: &str, value: &str) {
    for entry in value.split(',') {
        let entry = entry.trim();
        if !entry.is_empty() && MediaType::parse(entry).is_err() {
            tracing::warn!(field, entry, "declared media type is not well-formed");
        }
    }
}

/// Joins a resource base path and a verb path with exactly one separator.
fn join_paths(base: Option<&str>, tail: Option<&str>) -> String {
    match (base, tail) {
        (Some(base), Some(tail)) => {
            format!("{}/{}", base.trim_end_matches('/'), tail.trim_start_matches('/'))
        }
        (Some(base), None) => base.to_string(),
        (None, Some(tail)) => tail.to_string(),
        (None, None) => String::new(),
    }
}

/// Registers the `{name}` tokens of a templated path as parameters and
/// returns the literal tokens for later query stripping.
///
/// Already-declared parameters are left untouched; new ones default to
/// required, typed path or query depending on which side of the `?` the
/// token appeared.
fn uri_templating(params: &mut Vec<ParamModel>, path: &str, query: bool) -> HashSet<String> {
    let token = Regex::new(r"\{(.*?)\}").unwrap();
    let kind = if query { ParamKind::Query } else { ParamKind::Path };
    let mut found = HashSet::new();
    for segment in path.split('/') {
        for caps in token.captures_iter(segment) {
            let key = &caps[1];
            if !params.iter().any(|p| p.name == key) {
                params.push(ParamModel::new(key, kind));
            }
            found.insert(format!("{{{key}}}"));
        }
    }
    found
}

/// Drops the query parameters of `uri` whose value is one of the literal
/// `{name}` template tokens.
fn strip_templated_query(uri: &str, to_remove: &HashSet<String>) -> Result<String, CompileError> {
    let Some(query) = urisupport::extract_query(uri) else {
        return Ok(uri.to_string());
    };
    let pairs = urisupport::parse_parameters(query).map_err(CompileError::Uri)?;
    let kept: Vec<QueryPart> = pairs
        .iter()
        .filter(|(_, value)| !to_remove.contains(*value))
        .map(|(key, value)| QueryPart::Pair {
            key: key.to_string(),
            value: value.to_string(),
        })
        .collect();
    let base = urisupport::strip_query(uri);
    if kept.is_empty() {
        Ok(base.to_string())
    } else {
        Ok(format!(
            "{base}?{}",
            urisupport::create_query_string(&kept, "&", false)
        ))
    }
}

/// Schemas of the pseudo-components compiled routes consume from.
pub fn builtin_schemas() -> InMemorySchemaProvider {
    let rest = SchemaModel::new("rest", "rest:method:path")
        .lenient_properties(true)
        .path_option(
            OptionModel::path("method")
                .required(true)
                .enums(["get", "post", "put", "delete", "patch", "head"]),
        )
        .path_option(OptionModel::path("path"))
        .endpoint_option(OptionModel::parameter("consumes"))
        .endpoint_option(OptionModel::parameter("produces"))
        .endpoint_option(OptionModel::parameter("inType"))
        .endpoint_option(OptionModel::parameter("outType"))
        .endpoint_option(OptionModel::parameter("consumerComponentName"))
        .endpoint_option(OptionModel::parameter("producerComponentName"))
        .endpoint_option(OptionModel::parameter("description"));
    let contract = SchemaModel::new("rest-contract", "rest-contract:specification")
        .lenient_properties(true)
        .path_option(OptionModel::path("specification").required(true))
        .endpoint_option(OptionModel::parameter("consumes"))
        .endpoint_option(OptionModel::parameter("produces"))
        .endpoint_option(
            OptionModel::parameter("clientRequestValidation").of_type(OptionType::Boolean),
        )
        .endpoint_option(
            OptionModel::parameter("clientResponseValidation").of_type(OptionType::Boolean),
        )
        .endpoint_option(
            OptionModel::parameter("missingOperation")
                .of_type(OptionType::Enum)
                .enums(["fail", "ignore", "mock"]),
        )
        .endpoint_option(OptionModel::parameter("apiContextPath"))
        .endpoint_option(OptionModel::parameter("description"));
    let api = SchemaModel::new("rest-api", "rest-api:path")
        .lenient_properties(true)
        .path_option(OptionModel::path("path"))
        .endpoint_option(OptionModel::parameter("consumerComponentName"))
        .endpoint_option(OptionModel::parameter("description"));

    let mut provider = InMemorySchemaProvider::new();
    provider.add_component(rest);
    provider.add_component(contract);
    provider.add_component(api);
    provider
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::rest::model::{BindingMode, ResponseModel};

    fn compiler() -> RestCompiler {
        RestCompiler::new(RestConfig::new())
    }

    #[test]
    fn test_two_verbs_on_the_same_path_are_rejected() {
        let resource = RestResourceModel::new("/say")
            .verb(VerbModel::get("/foo").to("direct:a"))
            .verb(VerbModel::get("/foo").to("direct:b"));
        let err = compiler().compile(&resource).unwrap_err();
        assert!(matches!(err, CompileError::DuplicatePath(key) if key == "get:/foo"));
    }

    #[test]
    fn test_distinct_paths_compile_to_distinct_routes() {
        let resource = RestResourceModel::new("/say")
            .verb(VerbModel::get("/foo").to("direct:a"))
            .verb(VerbModel::get("/bar").to("direct:b"));
        let routes = compiler().compile(&resource).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].from_address, "rest:get:/say/foo");
        assert_eq!(routes[1].from_address, "rest:get:/say/bar");
        assert_eq!(routes[0].outputs, vec!["direct:a".to_string()]);
    }

    #[test]
    fn test_templated_path_registers_parameters() {
        let resource = RestResourceModel::new("/users")
            .verb(VerbModel::get("/{id}/update?auth={token}").to("direct:update"));
        let routes = compiler().compile(&resource).unwrap();
        let route = &routes[0];
        // the query template token is stripped from the synthesized address
        assert_eq!(route.from_address, "rest:get:/users/{id}/update");
        let id = route.params.iter().find(|p| p.name == "id").unwrap();
        assert_eq!(id.kind, ParamKind::Path);
        let token = route.params.iter().find(|p| p.name == "token").unwrap();
        assert_eq!(token.kind, ParamKind::Query);
    }

    #[test]
    fn test_declared_parameter_is_not_registered_twice() {
        let resource = RestResourceModel::new("/users").verb(
            VerbModel::get("/{id}")
                .param(ParamModel::new("id", ParamKind::Path).description("user id"))
                .to("direct:get"),
        );
        let routes = compiler().compile(&resource).unwrap();
        let ids: Vec<_> = routes[0].params.iter().filter(|p| p.name == "id").collect();
        assert_eq!(ids.len(), 1);
        assert_eq!(ids[0].description.as_deref(), Some("user id"));
    }

    #[test]
    fn test_binding_merge_and_media_inference() {
        let resource = RestResourceModel::new("/users")
            .binding_mode(BindingMode::Json)
            .verb(
                VerbModel::post("/new")
                    .in_type("UserDto")
                    .out_type("UserDto")
                    .to("direct:new"),
            );
        let routes = compiler().compile(&resource).unwrap();
        let route = &routes[0];
        assert_eq!(route.binding.binding_mode, BindingMode::Json);
        assert_eq!(route.binding.consumes.as_deref(), Some("application/json"));
        assert_eq!(route.binding.produces.as_deref(), Some("application/json"));
        assert_eq!(
            route.from_address,
            "rest:post:/users/new?consumes=application/json&produces=application/json&inType=UserDto&outType=UserDto"
        );
        // a typed body without a declared body parameter registers one
        let body = route.params.iter().find(|p| p.kind == ParamKind::Body).unwrap();
        assert_eq!(body.data_type.as_deref(), Some("UserDto"));
        assert!(!route.binding.required_body);
    }

    #[test]
    fn test_explicit_consumes_wins_over_inference() {
        let resource = RestResourceModel::new("/users").verb(
            VerbModel::post("/new")
                .binding_mode(BindingMode::Xml)
                .consumes("text/xml")
                .in_type("UserDto")
                .to("direct:new"),
        );
        let routes = compiler().compile(&resource).unwrap();
        assert_eq!(routes[0].binding.consumes.as_deref(), Some("text/xml"));
    }

    #[test]
    fn test_parameter_constraints_are_harvested() {
        let resource = RestResourceModel::new("/search").verb(
            VerbModel::get("/q")
                .param(ParamModel::query("page").required(false).default_value("1"))
                .param(
                    ParamModel::query("sort")
                        .required(false)
                        .allowed_values(["asc", "desc"]),
                )
                .param(ParamModel::header("token"))
                .response(
                    ResponseModel::new("200")
                        .content_type("application/json")
                        .header("ETag"),
                )
                .to("direct:search"),
        );
        let routes = compiler().compile(&resource).unwrap();
        let binding = &routes[0].binding;
        assert_eq!(
            binding.default_values,
            vec![("page".to_string(), "1".to_string())]
        );
        assert_eq!(
            binding.allowed_values,
            vec![("sort".to_string(), "asc,desc".to_string())]
        );
        assert_eq!(binding.required_headers, vec!["token".to_string()]);
        assert!(binding.required_query_parameters.is_empty());
        assert_eq!(
            binding.response_codes,
            vec![("200".to_string(), Some("application/json".to_string()))]
        );
        assert_eq!(binding.response_headers, vec!["ETag".to_string()]);
    }

    #[test]
    fn test_required_body_parameter_marks_body_required() {
        let resource = RestResourceModel::new("/users").verb(
            VerbModel::post("/new")
                .param(ParamModel::body())
                .to("direct:new"),
        );
        let routes = compiler().compile(&resource).unwrap();
        assert!(routes[0].binding.required_body);
    }

    #[test]
    fn test_verbs_and_contract_are_exclusive() {
        let resource = RestResourceModel::new("/pets")
            .verb(VerbModel::get("/all").to("direct:all"))
            .contract(ContractModel::new("petstore.json"));
        let err = compiler().compile(&resource).unwrap_err();
        assert!(matches!(err, CompileError::ContractConflict));
    }

    #[test]
    fn test_contract_compiles_to_contract_route() {
        let resource = RestResourceModel::new("/pets").contract(
            ContractModel::new("petstore.json")
                .missing_operation("mock")
                .route_id("petstore"),
        );
        let routes = compiler().compile(&resource).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(
            routes[0].from_address,
            "rest-contract:petstore.json?missingOperation=mock"
        );
        assert_eq!(routes[0].route_id.as_deref(), Some("petstore"));
        assert!(routes[0].outputs.is_empty());
    }

    #[test]
    fn test_inlined_routes_require_distinct_targets() {
        let resource = RestResourceModel::new("/say")
            .verb(VerbModel::get("/foo").to("direct:same"))
            .verb(VerbModel::post("/foo").to("direct:same"));
        let inlined = RestCompiler::new(RestConfig::new().inline_routes(true));
        let err = inlined.compile(&resource).unwrap_err();
        assert!(matches!(err, CompileError::DuplicateTarget(t) if t == "direct:same"));
        // without inlining the shared target is allowed
        assert_eq!(compiler().compile(&resource).unwrap().len(), 2);
    }

    #[test]
    fn test_verb_without_target_is_rejected() {
        let resource = RestResourceModel::new("/say").verb(VerbModel::get("/foo"));
        let err = compiler().compile(&resource).unwrap_err();
        assert!(matches!(err, CompileError::MissingTarget(key) if key == "get:/foo"));
    }

    #[test]
    fn test_disabled_resource_and_verbs_yield_nothing() {
        let resource = RestResourceModel::new("/say")
            .disabled(true)
            .verb(VerbModel::get("/foo").to("direct:a"));
        assert!(compiler().compile(&resource).unwrap().is_empty());

        let resource = RestResourceModel::new("/say")
            .verb(VerbModel::get("/foo").to("direct:a").disabled(true))
            .verb(VerbModel::get("/bar").to("direct:b"));
        let routes = compiler().compile(&resource).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].from_address, "rest:get:/say/bar");
    }

    #[test]
    fn test_api_route_serves_and_forwards_to_itself() {
        let config = RestConfig::new()
            .component("jetty")
            .api_context_path("/api-doc");
        let compiler = RestCompiler::new(config);
        let route = compiler.compile_api_route().unwrap();
        assert_eq!(
            route.from_address,
            "rest-api:/api-doc?consumerComponentName=jetty"
        );
        assert_eq!(route.outputs, vec![route.from_address.clone()]);
    }

    #[test]
    fn test_consumer_component_is_appended() {
        let compiler = RestCompiler::new(RestConfig::new().component("netty-http"));
        let resource = RestResourceModel::new("/say").verb(VerbModel::get("/foo").to("direct:a"));
        let routes = compiler.compile(&resource).unwrap();
        assert_eq!(
            routes[0].from_address,
            "rest:get:/say/foo?consumerComponentName=netty-http"
        );
    }
}
