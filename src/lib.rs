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

//! # endpoint-catalog
//!
//! A declarative endpoint-URI grammar engine and a REST-description-to-route
//! compiler for integration-routing frameworks.
//!
//! Every connector scheme (message queue, file system, network protocol, ...)
//! documents its configuration options in a [`SchemaModel`]: a typed option
//! catalog plus a positional *syntax pattern* such as `"ftp:host:port/directoryName"`.
//! This crate maps such schemas against concrete address strings in both
//! directions and compiles declarative REST resource descriptions into
//! routable endpoint records.
//!
//! ## This crate includes:
//!
//! - the [`schema`] module with the immutable option-catalog data model and the
//!   [`SchemaProvider`] lookup contract (in-memory and JSON-document backed)
//! - the [`grammar`] module which parses a concrete endpoint address into an
//!   ordered name→value mapping given a schema's syntax pattern, and builds
//!   the inverse: an address string from a mapping
//! - the [`validator`] module which checks a name→value mapping against a
//!   schema and accumulates a complete, multi-error [`ValidationReport`]
//! - the [`rest`] module which compiles a REST resource tree (paths, verbs,
//!   parameters, response codes) into concrete [`RouteDescription`] records
//!   with inferred content-type bindings
//!
//! All operations are synchronous and side-effect free; schemas are read-only
//! shared state and safe for concurrent lookups.

pub mod schema {
    mod optionmodel;
    mod propertymap;
    mod provider;
    mod schemamodel;

    pub use optionmodel::*;
    pub use propertymap::*;
    pub use provider::*;
    pub use schemamodel::*;
}

pub mod grammar {
    mod builder;
    mod parser;
    pub(crate) mod urisupport;

    pub use builder::*;
    pub use parser::*;
    pub use urisupport::{append_parameters_to_uri, is_raw, strip_raw};

    /// Hard failure raised while parsing or building an endpoint address.
    ///
    /// Unlike validation defects these are not accumulated: no partial result
    /// is meaningful when the scheme is unknown or the address is malformed.
    #[derive(Debug, thiserror::Error)]
    pub enum GrammarError {
        /// No schema is registered for the scheme of the address.
        #[error("unknown scheme: {0}")]
        UnknownScheme(String),
        /// The schema exists but carries no syntax pattern.
        #[error("scheme {0} has no syntax defined in its schema")]
        MissingSyntax(String),
        /// The address string is not a well-formed endpoint URI.
        #[error("malformed endpoint URI: {0}")]
        Malformed(String),
    }
}

pub mod validator {
    mod language;
    mod propertyvalidator;
    mod report;
    mod suggestion;
    pub(crate) mod timepattern;

    pub use language::*;
    pub use propertyvalidator::*;
    pub use report::*;
    pub use suggestion::*;

    /// Direction filter applied when validating endpoint properties.
    ///
    /// A scheme option labelled `consumer` must not be supplied when the
    /// address is used on the producer side, and vice versa.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum Direction {
        /// No direction filtering.
        #[default]
        Any,
        /// The address is consumed from (a route input).
        ConsumerOnly,
        /// The address is produced to (a route output).
        ProducerOnly,
    }
}

pub mod rest {
    mod binding;
    mod compiler;
    mod model;

    pub use binding::*;
    pub use compiler::*;
    pub use model::*;

    use crate::grammar::GrammarError;

    /// Fatal REST compilation failure.
    ///
    /// These indicate an unbuildable route graph rather than a bad runtime
    /// value, so they are raised immediately instead of being accumulated.
    #[derive(Debug, thiserror::Error)]
    pub enum CompileError {
        /// Two enabled verbs share the identical method and path.
        #[error("duplicate verb detected in rest definition: {0}")]
        DuplicatePath(String),
        /// Two verbs forward to the identical local target while route
        /// inlining is enabled.
        #[error("duplicate forwarding target in rest definition: {0}")]
        DuplicateTarget(String),
        /// A verb has no forwarding target configured.
        #[error("rest verb {0} must have a forwarding target configured")]
        MissingTarget(String),
        /// A resource mixes explicit verbs with an external contract document.
        #[error("cannot mix explicit verbs and an external contract in the same rest definition")]
        ContractConflict,
        /// Synthesizing the forwarding address failed.
        #[error(transparent)]
        Uri(#[from] GrammarError),
    }
}

pub(crate) mod strings;

pub use grammar::GrammarError;
pub use rest::{CompileError, RestCompiler, RestConfig, RouteDescription};
pub use schema::{OptionModel, PropertyMap, SchemaModel, SchemaProvider};
pub use validator::{Direction, PropertyValidator, ValidationReport};
