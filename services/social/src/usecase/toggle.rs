use tracing::{debug, warn};

use crate::domain::repository::ToggleSet;
use crate::error::SocialServiceError;

/// Flip membership of `key` in `set` and return the resulting state.
///
/// Present pairs are removed (`false`), absent pairs inserted (`true`). An
/// insert that loses a uniqueness race re-reads once: if the pair is there
/// the caller got what it asked for, otherwise the conflict is surfaced.
pub async fn toggle<S: ToggleSet>(set: &S, key: S::Key) -> Result<bool, SocialServiceError> {
    if set.contains(key).await? {
        if !set.remove(key).await? {
            debug!(?key, "pair already removed by a concurrent toggle");
        }
        return Ok(false);
    }

    match set.insert(key).await {
        Ok(()) => Ok(true),
        Err(SocialServiceError::Conflict) => {
            if set.contains(key).await? {
                debug!(?key, "concurrent toggle inserted the same pair");
                Ok(true)
            } else {
                warn!(?key, "toggle lost a uniqueness race and the pair is gone again");
                Err(SocialServiceError::Conflict)
            }
        }
        Err(e) => Err(e),
    }
}
