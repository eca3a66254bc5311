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

/// Proposes near-miss corrections for an invalid name against a set of valid
/// names.
///
/// Suggestion generation is best-effort: an empty answer, or the absence of a
/// strategy altogether, never escalates to a validation failure.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
pub trait SuggestionStrategy: Send + Sync {
    /// Returns candidate corrections for `unknown`, best match first.
    fn suggest_endpoint_options(&self, names: &[String], unknown: &str) -> Vec<String>;
}

/// Suggestion strategy proposing names within a small edit distance of the
/// unknown input, or sharing its prefix.
#[derive(Debug, Default)]
pub struct EditDistanceSuggestions;

impl SuggestionStrategy for EditDistanceSuggestions {
    fn suggest_endpoint_options(&self, names: &[String], unknown: &str) -> Vec<String> {
        let mut scored: Vec<(usize, &String)> = names
            .iter()
            .filter_map(|name| {
                let distance = edit_distance(&name.to_ascii_lowercase(), &unknown.to_ascii_lowercase());
                let close = distance <= 2
                    || name.to_ascii_lowercase().starts_with(&unknown.to_ascii_lowercase());
                close.then_some((distance, name))
            })
            .collect();
        scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
        scored.into_iter().map(|(_, name)| name.clone()).collect()
    }
}

fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(prev[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut prev, &mut current);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("period", "period"), 0);
        assert_eq!(edit_distance("period", "perod"), 1);
        assert_eq!(edit_distance("", "abc"), 3);
    }

    #[test]
    fn test_suggests_close_names() {
        let names = vec![
            "period".to_string(),
            "repeatCount".to_string(),
            "fixedRate".to_string(),
        ];
        let strategy = EditDistanceSuggestions;
        let suggestions = strategy.suggest_endpoint_options(&names, "perod");
        assert_eq!(suggestions, vec!["period".to_string()]);
    }

    #[test]
    fn test_prefix_match_is_suggested() {
        let names = vec!["repeatCount".to_string(), "period".to_string()];
        let strategy = EditDistanceSuggestions;
        let suggestions = strategy.suggest_endpoint_options(&names, "repeat");
        assert_eq!(suggestions, vec!["repeatCount".to_string()]);
    }

    #[test]
    fn test_far_names_are_not_suggested() {
        let names = vec!["period".to_string()];
        let strategy = EditDistanceSuggestions;
        assert!(strategy
            .suggest_endpoint_options(&names, "completelyDifferent")
            .is_empty());
    }
}
