// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy shared across every crate in the workspace (spec.md §7).

use thiserror::Error;

/// The control plane's unified error type.
///
/// Every Commander method returns `Result<T, Error>`. Validation errors
/// raised inside an `Atomic` closure must be [`Error::InvalidInput`] so
/// callers can tell them apart from [`Error::Internal`] store failures.
#[derive(Debug, Error)]
pub enum Error {
    /// The referenced entity does not exist (or the caller has no
    /// visibility into whether it does — see `Unauthorized` ordering rule).
    #[error("not found: {0}")]
    NotFound(String),

    /// The request is structurally or semantically invalid.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The caller lacks permission, or the caller's scope does not cover
    /// the target entity.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A dependency prevents the requested mutation (e.g. deleting an
    /// Agent that still owns Services).
    #[error("conflict: {0}")]
    Conflict(String),

    /// An unexpected internal failure (store I/O, serialization, etc.).
    #[error("internal error: {0}")]
    Internal(String),

    /// A store failure the caller may retry (e.g. serialization conflict).
    #[error("transient error: {0}")]
    Transient(String),
}

/// The kind of an [`Error`], for callers that branch without matching the
/// full enum (the boundary the RPC layer — not built here — authorizes on).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    Unauthorized,
    Conflict,
    Internal,
    Transient,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::Unauthorized(_) => ErrorKind::Unauthorized,
            Error::Conflict(_) => ErrorKind::Conflict,
            Error::Internal(_) => ErrorKind::Internal,
            Error::Transient(_) => ErrorKind::Transient,
        }
    }

    pub fn not_found(entity: impl std::fmt::Display, id: impl std::fmt::Display) -> Self {
        Error::NotFound(format!("{entity} {id} not found"))
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Error::Unauthorized(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Error::Conflict(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        // Marshal failures (e.g. building an audit diff) abort the
        // enclosing transaction per spec.md §4.5.
        Error::Internal(format!("json marshal failed: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
