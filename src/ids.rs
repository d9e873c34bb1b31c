/// Largest id that survives a round trip through a JSON number without losing precision.
pub const MAX_ID: u64 = 9_007_199_254_740_991;

/// Normalize a raw id (path parameter, form field) into a stored id.
///
/// Leading and trailing whitespace is ignored and decimal or exponent forms are
/// accepted (`"7"`, `"7.0"`, `"7e0"`). Anything that is not a finite positive
/// integer no larger than [`MAX_ID`] yields `None` and therefore never matches.
pub fn coerce_id(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: f64 = trimmed.parse().ok()?;
    if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > MAX_ID as f64 {
        return None;
    }
    Some(value as u64)
}

/// Gap-filling allocation: the first integer >= 1 not present in `ids`.
pub fn smallest_unused(ids: impl IntoIterator<Item = u64>) -> u64 {
    let mut sorted: Vec<u64> = ids.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut next = 1;
    for id in sorted {
        if id == next {
            next += 1;
        } else if id > next {
            break;
        }
    }
    next
}

/// Max-plus-one allocation: `1` for an empty collection, never reuses a freed id.
/// `None` once the next id would pass [`MAX_ID`].
pub fn max_plus_one(ids: impl IntoIterator<Item = u64>) -> Option<u64> {
    match ids.into_iter().max() {
        None => Some(1),
        Some(max) if max < MAX_ID => Some(max + 1),
        Some(_) => None,
    }
}
