use thiserror::Error;

/// Errors surfaced by the mechanics core. Infeasible pushes and blocked
/// movement are normal results, never errors; only registry misuse lands
/// here.
#[derive(Debug, Error)]
pub enum MechanicsError {
    #[error("block '{name}' is already registered")]
    DuplicateBlock { name: String },
}

pub type MechanicsResult<T> = Result<T, MechanicsError>;
