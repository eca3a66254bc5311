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

//! Duration literal checks.
//!
//! A duration literal is either a bare integer (milliseconds), an ISO-8601
//! style duration (`PT2H30M`, optionally negated), or a shorthand
//! time-magnitude form such as `5s` or `1h30m`.

use regex::Regex;

/// Checks whether a value is a well-formed duration literal.
pub(crate) fn validate_duration(value: &str) -> bool {
    if value.parse::<i64>().is_ok() {
        return true;
    }
    let lower = value.to_ascii_lowercase();
    if lower.starts_with('p') || lower.starts_with("-p") {
        let iso = Regex::new(
            r"(?i)^-?P(?:\d+D)?(?:T(?:\d+H)?(?:\d+M)?(?:\d+(?:\.\d+)?S)?)?$",
        )
        .unwrap();
        // a designator without any component is not a duration
        return iso.is_match(value) && value.chars().any(|c| c.is_ascii_digit());
    }
    to_millis(value).is_some()
}

/// Converts a shorthand time pattern (`5s`, `1h30m`, `500ms`) to milliseconds.
pub(crate) fn to_millis(text: &str) -> Option<u64> {
    let pattern = Regex::new(
        r"(?ix)^\s*
          (?:(\d+)\s*(?:d|days?))?\s*
          (?:(\d+)\s*(?:h|hours?))?\s*
          (?:(\d+)\s*(?:m|min|minutes?))?\s*
          (?:(\d+)\s*(?:s|sec|seconds?))?\s*
          (?:(\d+)\s*(?:ms|millis))?\s*$",
    )
    .unwrap();
    let caps = pattern.captures(text)?;
    let mut total: u64 = 0;
    let mut any = false;
    for (group, factor) in [
        (1, 86_400_000),
        (2, 3_600_000),
        (3, 60_000),
        (4, 1_000),
        (5, 1),
    ] {
        if let Some(m) = caps.get(group) {
            let amount: u64 = m.as_str().parse().ok()?;
            total = total.checked_add(amount.checked_mul(factor)?)?;
            any = true;
        }
    }
    any.then_some(total)
}
