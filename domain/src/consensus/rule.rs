//! Agreement detection.

use super::round::RoundResult;

/// Whether a round reached consensus: every agent declared agreement.
///
/// An empty round is vacuously unanimous. Agent sets are validated to be
/// non-empty before a run starts, so this never fires spuriously.
pub fn has_consensus(round: &RoundResult) -> bool {
    round.iter().all(|(_, response)| response.agrees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentId, AgentResponse};

    fn round(flags: &[bool]) -> RoundResult {
        flags
            .iter()
            .enumerate()
            .map(|(i, &agrees)| {
                (
                    AgentId::new(format!("agent-{}", i)).unwrap(),
                    AgentResponse::new(agrees, "text"),
                )
            })
            .collect()
    }

    #[test]
    fn test_unanimous_agreement() {
        assert!(has_consensus(&round(&[true, true, true])));
    }

    #[test]
    fn test_single_dissent_blocks_consensus() {
        assert!(!has_consensus(&round(&[true, false, true])));
        assert!(!has_consensus(&round(&[false])));
    }

    #[test]
    fn test_empty_round_is_vacuous() {
        assert!(has_consensus(&RoundResult::new()));
    }
}
