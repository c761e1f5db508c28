//! Display ordering for eagerly checked suggestions

use crate::types::CheckedSuggestion;

/// Sort suggestions so available names come first, then taken, then
/// undetermined, then unchecked. Names break ties alphabetically.
pub fn rank_by_availability(results: &mut [CheckedSuggestion]) {
    results.sort_by(|a, b| {
        let rank_a = a.outcome.map_or(u8::MAX, |o| o.sort_rank());
        let rank_b = b.outcome.map_or(u8::MAX, |o| o.sort_rank());
        rank_a.cmp(&rank_b).then_with(|| a.name().cmp(b.name()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AvailabilityOutcome, DomainSuggestion};

    fn checked(name: &str, outcome: Option<AvailabilityOutcome>) -> CheckedSuggestion {
        CheckedSuggestion {
            suggestion: DomainSuggestion::new(name, ""),
            outcome,
        }
    }

    fn names(results: &[CheckedSuggestion]) -> Vec<&str> {
        results.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_available_first_then_alphabetical() {
        use AvailabilityOutcome::*;
        let mut results = vec![
            checked("b", Some(Taken)),
            checked("a", Some(Available)),
            checked("d", Some(Undetermined)),
            checked("c", Some(Available)),
        ];
        rank_by_availability(&mut results);
        assert_eq!(names(&results), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_unchecked_sort_last() {
        let mut results = vec![
            checked("alpha.com", None),
            checked("zeta.com", Some(AvailabilityOutcome::Undetermined)),
        ];
        rank_by_availability(&mut results);
        assert_eq!(names(&results), vec!["zeta.com", "alpha.com"]);
    }

    #[test]
    fn test_equal_entries_keep_generator_order() {
        let mut results = vec![
            CheckedSuggestion::with_outcome(DomainSuggestion::new("same.com", "first"), AvailabilityOutcome::Taken),
            CheckedSuggestion::with_outcome(DomainSuggestion::new("same.com", "second"), AvailabilityOutcome::Taken),
        ];
        rank_by_availability(&mut results);
        assert_eq!(results[0].suggestion.rationale, "first");
        assert_eq!(results[1].suggestion.rationale, "second");
    }
}
