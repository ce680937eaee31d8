//! Rust-side error type for result codes.
//!
//! `NError` is what Rust code propagates with `?`; `NError::code()` is what
//! crosses back over the boundary. A failure that came from a foreign layer
//! keeps its layer and an optional detail string, but only the layer's leaf
//! code is ever sent back.

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::result::{NResult, ResultCode, failed};

/// Errors raised or received at the binary interface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NError {
    /// A named failure code.
    #[error("{}: {}", .0.name(), .0.description())]
    Code(ResultCode),

    /// A failure caught in a foreign runtime or platform layer.
    #[error("{layer} failure: {}", .detail.as_deref().unwrap_or("no detail"))]
    External {
        layer: ExternalLayer,
        detail: Option<String>,
    },

    /// A negative code this build has no name for.
    #[error("unrecognized result code {0}")]
    Unrecognized(NResult),
}

/// Result alias for fallible core operations.
pub type CoreResult<T> = Result<T, NError>;

impl NError {
    /// Wrap a foreign failure, keeping `detail` as side-channel text.
    pub fn external(layer: ExternalLayer, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        debug!(layer = %layer, detail = %detail, "mapped foreign failure");
        NError::External {
            layer,
            detail: Some(detail),
        }
    }

    /// The raw code to return across the boundary.
    ///
    /// Always a failure other than the bare `EXTERNAL` facility: an error
    /// built from a success value or from `EXTERNAL` itself reports `FAILED`.
    pub fn code(&self) -> NResult {
        let raw = self.carried_code();
        if failed(raw) && raw != ResultCode::External.raw() {
            raw
        } else {
            ResultCode::Failed.raw()
        }
    }

    /// False when `code()` had to replace the carried value with `FAILED`.
    pub fn is_well_formed(&self) -> bool {
        self.code() == self.carried_code()
    }

    fn carried_code(&self) -> NResult {
        match self {
            NError::Code(code) => code.raw(),
            NError::External { layer, .. } => layer.code().raw(),
            NError::Unrecognized(raw) => *raw,
        }
    }

    /// The named code, if this build knows it.
    pub fn result_code(&self) -> Option<ResultCode> {
        ResultCode::from_raw(self.code())
    }

    /// Side-channel detail attached to an external failure.
    pub fn detail(&self) -> Option<&str> {
        match self {
            NError::External { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl From<ResultCode> for NError {
    fn from(code: ResultCode) -> Self {
        match ExternalLayer::from_code(code) {
            Some(layer) => NError::External {
                layer,
                detail: None,
            },
            None => NError::Code(code),
        }
    }
}

impl From<NError> for NResult {
    fn from(err: NError) -> Self {
        err.code()
    }
}

/// Turn a raw result into `Ok(raw)` on success or the matching error.
///
/// Informational (positive) results pass through unchanged.
pub fn check(raw: NResult) -> CoreResult<NResult> {
    if !failed(raw) {
        return Ok(raw);
    }
    Err(match ResultCode::from_raw(raw) {
        Some(code) => code.into(),
        None => NError::Unrecognized(raw),
    })
}

// --------------------------------------------------------------------------
// Foreign layers
// --------------------------------------------------------------------------

/// Foreign runtime or platform layer that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalLayer {
    Win32,
    Com,
    Clr,
    Sys,
    Mac,
    /// Native unwinding exceptions (C++ exceptions, Rust panics).
    Cpp,
    Jvm,
}

impl ExternalLayer {
    pub const ALL: [ExternalLayer; 7] = [
        ExternalLayer::Win32,
        ExternalLayer::Com,
        ExternalLayer::Clr,
        ExternalLayer::Sys,
        ExternalLayer::Mac,
        ExternalLayer::Cpp,
        ExternalLayer::Jvm,
    ];

    /// The `EXTERNAL` leaf for this layer.
    pub const fn code(self) -> ResultCode {
        match self {
            ExternalLayer::Win32 => ResultCode::Win32,
            ExternalLayer::Com => ResultCode::Com,
            ExternalLayer::Clr => ResultCode::Clr,
            ExternalLayer::Sys => ResultCode::Sys,
            ExternalLayer::Mac => ResultCode::Mac,
            ExternalLayer::Cpp => ResultCode::Cpp,
            ExternalLayer::Jvm => ResultCode::Jvm,
        }
    }

    pub const fn from_code(code: ResultCode) -> Option<Self> {
        match code {
            ResultCode::Win32 => Some(ExternalLayer::Win32),
            ResultCode::Com => Some(ExternalLayer::Com),
            ResultCode::Clr => Some(ExternalLayer::Clr),
            ResultCode::Sys => Some(ExternalLayer::Sys),
            ResultCode::Mac => Some(ExternalLayer::Mac),
            ResultCode::Cpp => Some(ExternalLayer::Cpp),
            ResultCode::Jvm => Some(ExternalLayer::Jvm),
            _ => None,
        }
    }
}

impl fmt::Display for ExternalLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code().name())
    }
}

// --------------------------------------------------------------------------
// std conversions
// --------------------------------------------------------------------------

impl From<io::Error> for NError {
    fn from(err: io::Error) -> Self {
        use io::ErrorKind;

        let code = match err.kind() {
            ErrorKind::NotFound => ResultCode::FileNotFound,
            ErrorKind::PermissionDenied => ResultCode::Security,
            ErrorKind::UnexpectedEof => ResultCode::EndOfStream,
            ErrorKind::TimedOut => ResultCode::Timeout,
            ErrorKind::WouldBlock => ResultCode::Io,
            ErrorKind::Interrupted => ResultCode::OperationCanceled,
            ErrorKind::InvalidInput => ResultCode::Argument,
            ErrorKind::InvalidData => ResultCode::Format,
            ErrorKind::Unsupported => ResultCode::NotSupported,
            ErrorKind::OutOfMemory => ResultCode::OutOfMemory,
            ErrorKind::ConnectionRefused
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::NotConnected
            | ErrorKind::AddrInUse
            | ErrorKind::AddrNotAvailable
            | ErrorKind::BrokenPipe => ResultCode::Socket,
            _ if err.raw_os_error().is_some() => {
                return NError::external(ExternalLayer::Sys, err.to_string());
            }
            _ => ResultCode::Io,
        };
        NError::Code(code)
    }
}
