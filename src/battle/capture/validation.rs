use crate::battle::state::{BattleKind, BattleState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CaptureError {
    /// Capture balls only work in wild encounters
    InvalidBattleKind(BattleKind),
    /// No creature on the opposing side to capture
    NoTarget,
    /// The target has already fainted
    TargetFainted(String),
}

pub fn is_capture_allowed(kind: BattleKind) -> bool {
    matches!(kind, BattleKind::Wild)
}

/// Validate a capture attempt. Returns the target's species key when the
/// attempt may proceed.
pub fn can_attempt_capture(
    state: &BattleState,
    captor_index: usize,
) -> Result<String, CaptureError> {
    if !is_capture_allowed(state.kind) {
        return Err(CaptureError::InvalidBattleKind(state.kind));
    }

    let prey_index = BattleState::opponent_index(captor_index);
    match state.sides[prey_index].active() {
        Some(target) => {
            if target.is_fainted() {
                Err(CaptureError::TargetFainted(
                    target.display_name().to_string(),
                ))
            } else {
                Ok(target.species.clone())
            }
        }
        None => Err(CaptureError::NoTarget),
    }
}
