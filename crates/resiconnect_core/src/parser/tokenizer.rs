//! Splits an argument string into a preamble and per-prefix values.
//!
//! # Invariants
//! - A prefix is recognized only at the start of the string or after
//!   whitespace, so `a/` inside `email/x@a/b` is not a field boundary.
//! - Values keep their input order per prefix; repeated prefixes are kept,
//!   never rejected here.

use crate::parser::syntax::Prefix;
use crate::parser::ParseError;
use std::collections::HashMap;

/// Tokenized arguments: preamble plus ordered values for each prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgMultimap {
    preamble: String,
    values: HashMap<Prefix, Vec<String>>,
}

impl ArgMultimap {
    /// Text before the first recognized prefix, trimmed.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value supplied for `prefix`, if any.
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// Every value supplied for `prefix`, in input order.
    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values.get(&prefix).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, prefix: Prefix) -> bool {
        self.values.contains_key(&prefix)
    }

    /// Fails naming every prefix in `single_valued` given more than once.
    pub fn verify_no_duplicate_prefixes_for(
        &self,
        single_valued: &[Prefix],
    ) -> Result<(), ParseError> {
        let duplicates: Vec<Prefix> = single_valued
            .iter()
            .copied()
            .filter(|prefix| self.all_values(*prefix).len() > 1)
            .collect();
        if duplicates.is_empty() {
            return Ok(());
        }
        Err(ParseError::DuplicatePrefixes(duplicates))
    }

    /// Fails with the usage text unless every prefix has a non-blank value.
    pub fn require_all(&self, mandatory: &[Prefix], usage: &'static str) -> Result<(), ParseError> {
        let complete = mandatory.iter().all(|prefix| {
            self.value(*prefix)
                .is_some_and(|value| !value.trim().is_empty())
        });
        if complete {
            Ok(())
        } else {
            Err(ParseError::InvalidFormat(usage))
        }
    }

    /// Fails with the usage text when a preamble is present.
    pub fn require_empty_preamble(&self, usage: &'static str) -> Result<(), ParseError> {
        if self.preamble.is_empty() {
            Ok(())
        } else {
            Err(ParseError::InvalidFormat(usage))
        }
    }
}

/// Tokenizes `args` on the given prefixes.
pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgMultimap {
    let mut positions: Vec<(usize, Prefix)> = Vec::new();
    for prefix in prefixes {
        let marker = prefix.as_str();
        let mut from = 0;
        while let Some(found) = args[from..].find(marker) {
            let start = from + found;
            let at_boundary = args[..start]
                .chars()
                .next_back()
                .map_or(true, char::is_whitespace);
            if at_boundary {
                positions.push((start, *prefix));
            }
            from = start + marker.len();
        }
    }
    positions.sort_by_key(|(start, _)| *start);

    let preamble_end = positions.first().map_or(args.len(), |(start, _)| *start);
    let mut map = ArgMultimap {
        preamble: args[..preamble_end].trim().to_string(),
        values: HashMap::new(),
    };

    for (idx, (start, prefix)) in positions.iter().enumerate() {
        let value_start = start + prefix.as_str().len();
        let value_end = positions
            .get(idx + 1)
            .map_or(args.len(), |(next_start, _)| *next_start);
        let value = args[value_start..value_end].trim().to_string();
        map.values.entry(*prefix).or_default().push(value);
    }

    map
}
