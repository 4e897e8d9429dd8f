//! Result alias shared by every LegalAssista crate.

use crate::error::AppError;

/// `Result` specialised to [`AppError`], used at crate boundaries where a
/// domain error has already been folded into the workspace error.
pub type AppResult<T> = Result<T, AppError>;
