//! Free-text classification of registry responses

use crate::types::AvailabilityOutcome;

/// Phrases registries use for unregistered names, lowercase.
///
/// Any one of them appearing anywhere in the response marks the domain as
/// available.
pub const AVAILABLE_MARKERS: &[&str] = &[
    "no match for domain",
    "not found",
    "no data found",
    "domain not found",
    "no entries found",
    "status: available",
    "the queried object does not exist",
    "object does not exist",
    "is free",
];

/// Classify a successful lookup response.
///
/// An empty body counts as available since several registries answer
/// unregistered names with nothing at all. A non-empty body without any
/// marker is treated as a registration record.
pub fn classify_response(response: &str) -> AvailabilityOutcome {
    if response.is_empty() {
        return AvailabilityOutcome::Available;
    }

    let normalized = response.to_lowercase();
    if AVAILABLE_MARKERS.iter().any(|marker| normalized.contains(marker)) {
        AvailabilityOutcome::Available
    } else {
        AvailabilityOutcome::Taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response_is_available() {
        assert_eq!(classify_response(""), AvailabilityOutcome::Available);
    }

    #[test]
    fn test_every_marker_matches_in_any_case() {
        for marker in AVAILABLE_MARKERS {
            let upper = format!(">>> {} <<<", marker.to_uppercase());
            assert_eq!(classify_response(&upper), AvailabilityOutcome::Available, "{marker}");
        }
        assert_eq!(classify_response("Status: AVAILABLE"), AvailabilityOutcome::Available);
    }

    #[test]
    fn test_registration_record_is_taken() {
        let record = "Domain Name: EXAMPLE.COM\nRegistrar: RESERVED-Internet Assigned Numbers Authority\n";
        assert_eq!(classify_response(record), AvailabilityOutcome::Taken);
    }

    #[test]
    fn test_whitespace_only_response_is_taken() {
        // only a truly empty body is an availability signal
        assert_eq!(classify_response("\r\n"), AvailabilityOutcome::Taken);
    }

    #[test]
    fn test_verisign_no_match() {
        let response = "No match for domain \"MYVERYUNIQUESTARTUPNAME123.COM\".\r\n>>> Last update of whois database <<<";
        assert_eq!(classify_response(response), AvailabilityOutcome::Available);
    }

    #[test]
    fn test_marker_list_is_complete() {
        assert_eq!(AVAILABLE_MARKERS.len(), 9);
        assert!(AVAILABLE_MARKERS.iter().all(|m| *m == m.to_lowercase()));
    }
}
