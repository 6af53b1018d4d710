//! Errors raised by the smart order router.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RouterError {
    #[error("action {0} is outside the router's action space (0..=9)")]
    UnknownAction(u8),
}
