//! Duplicate submission prevention.

use crate::RecordId;
use crate::error::RequestError;
use crate::request::types::DuplicateKey;

/// Checks a candidate request against existing records under the family's
/// uniqueness key.
///
/// The repository supplies the ids of records matching the key; the guard
/// itself is read-only and pure.
pub struct DuplicateGuard;

impl DuplicateGuard {
    /// Rejects the candidate if any matching record other than `exclude_id`
    /// exists.
    ///
    /// `exclude_id` carries the edited record's own id on the edit path so a
    /// record never collides with itself.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::DuplicateRequest`] naming the colliding key
    /// values.
    pub fn check(
        key: &DuplicateKey,
        matches: &[RecordId],
        exclude_id: Option<RecordId>,
    ) -> Result<(), RequestError> {
        if matches.iter().any(|id| Some(*id) != exclude_id) {
            return Err(RequestError::DuplicateRequest(key.to_string()));
        }
        Ok(())
    }
}
