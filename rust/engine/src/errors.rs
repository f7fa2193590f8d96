use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Roster '{team}' has no {slot}")]
    MissingRole { team: String, slot: &'static str },
    #[error("Match tied {score}-{score} but ties are disallowed and no tiebreak is configured")]
    TieNotAllowed { score: u32 },
    #[error("Invalid match configuration: {0}")]
    InvalidConfig(String),
    #[error("Match outcome has already been applied to the rosters")]
    OutcomeAlreadyApplied,
    #[error("Roster '{team}' changed since the match was simulated (expected {expected} players, found {found})")]
    RosterMismatch {
        team: String,
        expected: usize,
        found: usize,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
