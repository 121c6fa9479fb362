//! Host environment probes
//!
//! The only preference read from the host is "prefers reduced motion". It is
//! sampled once when a page mounts; later changes are not observed.

use tracing::debug;

/// Environment variable consulted for the reduced-motion preference
pub const REDUCED_MOTION_ENV: &str = "RUHORA_REDUCED_MOTION";

/// Detect the host's reduced-motion preference
pub fn detect_reduced_motion() -> bool {
    let value = std::env::var(REDUCED_MOTION_ENV).ok();
    let reduced = value.as_deref().is_some_and(parse_preference);
    debug!(?value, reduced, "sampled reduced-motion preference");
    reduced
}

/// Interpret a preference string (`1`, `true`, `yes`, `reduce`)
pub fn parse_preference(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "reduce"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preference() {
        assert!(parse_preference("reduce"));
        assert!(parse_preference(" TRUE "));
        assert!(parse_preference("1"));
        assert!(!parse_preference("no-preference"));
        assert!(!parse_preference(""));
    }
}
