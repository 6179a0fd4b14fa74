//! Thread-local cache of compiled signature patterns.
//!
//! A batch locates each name twice (donor and target) and plans are often
//! re-run, so compiled regexes are kept per thread. The cache is capped at
//! 256 entries and cleared wholesale when full.

use crate::locate::signature;
use crate::locate::BlockError;
use regex::Regex;
use std::cell::RefCell;
use std::collections::HashMap;

const MAX_CACHE_ENTRIES: usize = 256;

thread_local! {
    // Key is the full regex source, so the same name under different keyword
    // sets never collides.
    static SIGNATURE_CACHE: RefCell<HashMap<String, Regex>> =
        RefCell::new(HashMap::new());
}

/// Get a compiled signature pattern from cache, or compile and cache it.
pub fn signature_pattern(
    keywords: &[String],
    modifiers: &[String],
    name: &str,
) -> Result<Regex, BlockError> {
    signature::validate_name(name)?;
    let cache_key = signature::signature_source(keywords, modifiers, name);

    SIGNATURE_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();

        if let Some(re) = cache.get(&cache_key) {
            return Ok(re.clone());
        }

        if cache.len() >= MAX_CACHE_ENTRIES {
            cache.clear();
        }

        let compiled = signature::compile(keywords, modifiers, name)?;
        cache.insert(cache_key, compiled.clone());
        Ok(compiled)
    })
}

/// Clear the pattern cache (mainly for testing).
pub fn clear_cache() {
    SIGNATURE_CACHE.with(|cache| {
        cache.borrow_mut().clear();
    });
}

/// Number of cached patterns on this thread.
pub fn cache_size() -> usize {
    SIGNATURE_CACHE.with(|cache| cache.borrow().len())
}
