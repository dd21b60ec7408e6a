//! Validation helpers for DTOs.

use validator::ValidationError;

/// Upper bound on player name length; anything longer is a malformed
/// payload, not a player.
pub const MAX_PLAYER_NAME_CHARS: usize = 64;

/// Validates that a player name is printable and reasonably sized.
///
/// Empty and duplicate names are not rejected here: the pool treats them as
/// silent no-ops, matching how the wheel behaves when the input box is
/// empty. Only payloads that could not have come from the input box (control
/// characters, oversized strings) fail validation.
pub fn validate_player_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().count() > MAX_PLAYER_NAME_CHARS {
        let mut err = ValidationError::new("player_name_length");
        err.message = Some(
            format!("Player name must be at most {MAX_PLAYER_NAME_CHARS} characters").into(),
        );
        return Err(err);
    }

    if name.chars().any(char::is_control) {
        let mut err = ValidationError::new("player_name_format");
        err.message = Some("Player name must not contain control characters".into());
        return Err(err);
    }

    Ok(())
}
