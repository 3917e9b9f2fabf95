//! Install-count bucket parsing.

/// Parse a storefront install bucket (`"10,000+"`) into its integer lower bound.
///
/// Returns `None` for missing or empty input and for anything that is not a
/// plain count once `+` and `,` are removed. Unknown is never reported as zero.
pub fn parse_installs(installs: Option<&str>) -> Option<u64> {
    let raw = installs?;
    if raw.is_empty() {
        return None;
    }

    let cleaned: String = raw.chars().filter(|c| *c != '+' && *c != ',').collect();
    match cleaned.trim().parse::<u64>() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!("Failed to parse installs: {raw:?}");
            None
        }
    }
}
