//! Minting of fresh resource URIs within a namespace.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::graph::TripleSource;
use crate::types::Iri;

pub const MAX_ATTEMPTS: u32 = 30;
const FIRST_RANGE_EXPONENT: u32 = 13;
const LOCAL_NAME_PREFIX: &str = "n";
const MAX_IRI_LEN: usize = 2048;
const FORBIDDEN_IRI_CHARS: &[char] = &['<', '>', '"', '{', '}', '|', '^', '`', '\\'];

/// Checks that `iri` is an absolute IRI: a scheme followed by ':' and no
/// whitespace or delimiter characters.
pub fn validate_iri(iri: &str) -> std::result::Result<(), String> {
    if iri.is_empty() {
        return Err("URI cannot be empty".to_string());
    }
    if iri.len() > MAX_IRI_LEN {
        return Err(format!("URI cannot exceed {MAX_IRI_LEN} characters"));
    }

    let Some((scheme, rest)) = iri.split_once(':') else {
        return Err(format!("URI '{iri}' has no scheme"));
    };
    let valid_scheme = scheme
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme || rest.is_empty() {
        return Err(format!("URI '{iri}' is not absolute"));
    }

    if iri
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_IRI_CHARS.contains(&c))
    {
        return Err(format!("URI '{iri}' contains invalid characters"));
    }

    Ok(())
}

/// Decides whether a candidate URI may name a new resource.
pub trait UriValidator: Send + Sync {
    /// Returns `None` if the URI is usable, otherwise the reason it is not.
    fn check(&self, graph: &dyn TripleSource, uri: &str) -> Result<Option<String>>;
}

/// Accepts well-formed URIs that no statement mentions yet.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnusedUriValidator;

impl UriValidator for UnusedUriValidator {
    fn check(&self, graph: &dyn TripleSource, uri: &str) -> Result<Option<String>> {
        if let Err(reason) = validate_iri(uri) {
            return Ok(Some(reason));
        }
        if graph.mentions(&Iri::new(uri))? {
            return Ok(Some(format!("URI '{uri}' is already in use")));
        }
        Ok(None)
    }
}

/// Generates candidate URIs of the form `<namespace>n<number>`.
///
/// Attempt `k` draws the number uniformly from `[0, 2^(k+13))`, so early
/// attempts stay short and later ones spread over a space large enough to make
/// collisions unlikely in a big graph. The caller must hold the write scope
/// of the graph between allocation and use of the URI.
pub struct UriAllocator {
    rng: StdRng,
}

impl Default for UriAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl UriAllocator {
    #[must_use]
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(seed)
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn allocate<G: TripleSource>(
        &mut self,
        graph: &G,
        namespace: &str,
        validator: &dyn UriValidator,
    ) -> Result<Iri> {
        let mut last_reason = String::from("no attempts made");

        for attempt in 0..MAX_ATTEMPTS {
            let upper_bound = 1_u64 << (attempt + FIRST_RANGE_EXPONENT);
            let candidate = format!(
                "{namespace}{LOCAL_NAME_PREFIX}{}",
                self.rng.gen_range(0..upper_bound)
            );

            match validator.check(graph, &candidate)? {
                None => {
                    tracing::debug!(uri = %candidate, attempt, "allocated URI");
                    return Ok(Iri::new(candidate));
                }
                Some(reason) => {
                    tracing::debug!(uri = %candidate, attempt, %reason, "rejected candidate URI");
                    last_reason = reason;
                }
            }
        }

        Err(Error::AllocationExhausted(format!(
            "no usable URI in {namespace} after {MAX_ATTEMPTS} attempts: {last_reason}"
        )))
    }
}
