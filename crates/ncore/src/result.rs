//! Result codes shared by every call across the binary interface.
//!
//! A result is a signed 32-bit integer. Zero is plain success, any positive
//! value is success carrying information, and every negative value names a
//! specific failure. Failures form a shallow tree:
//!
//! | Node | Value | Children |
//! |------|-------|----------|
//! | `FAILED` | `-1` | root of every failure |
//! | `CORE` | `-2` | argument, arithmetic, cast, I/O, memory, format, ... leaves |
//! | `EXTERNAL` | `-90` | one leaf per foreign layer (`WIN32`, `COM`, `CLR`, ...) |
//! | `NOT_ACTIVATED` | `-200` | none; outside both facilities |
//!
//! Values are append-only. A value, once assigned, is never reused or
//! renumbered, since callers persist and log raw integers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::NError;

/// Raw result type returned across the C ABI.
pub type NResult = i32;

/// Plain success.
pub const N_OK: NResult = 0;

/// True for zero and every positive (informational) result.
#[inline]
pub const fn succeeded(result: NResult) -> bool {
    result >= 0
}

/// True for every negative result.
#[inline]
pub const fn failed(result: NResult) -> bool {
    result < 0
}

macro_rules! result_codes {
    ($(
        $(#[$doc:meta])*
        $variant:ident = $value:literal, $name:literal, $description:literal;
    )*) => {
        /// Every named result code.
        #[repr(i32)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(into = "i32", try_from = "i32")]
        pub enum ResultCode {
            $( $(#[$doc])* $variant = $value, )*
        }

        impl ResultCode {
            /// All named codes, in declaration order.
            pub const ALL: &'static [ResultCode] = &[$( ResultCode::$variant, )*];

            /// Look up the named code for a raw value.
            pub const fn from_raw(raw: NResult) -> Option<Self> {
                match raw {
                    $( $value => Some(Self::$variant), )*
                    _ => None,
                }
            }

            /// Stable symbolic name, e.g. `ARGUMENT_NULL`.
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )*
                }
            }

            /// One-line human readable meaning.
            pub const fn description(self) -> &'static str {
                match self {
                    $( Self::$variant => $description, )*
                }
            }
        }
    };
}

result_codes! {
    /// Plain success.
    Ok = 0, "OK", "the operation succeeded";
    /// Unspecified failure; the root of every failure code.
    Failed = -1, "FAILED", "the operation failed";
    /// Facility code for failures raised by the core itself.
    Core = -2, "CORE", "core failure";
    NullReference = -3, "NULL_REFERENCE", "a null object was dereferenced";
    OutOfMemory = -4, "OUT_OF_MEMORY", "not enough memory to continue";
    NotImplemented = -5, "NOT_IMPLEMENTED", "the operation is not implemented";
    NotSupported = -6, "NOT_SUPPORTED", "the operation is not supported";
    InvalidOperation = -7, "INVALID_OPERATION", "the operation is not valid in the current state";
    Overflow = -8, "OVERFLOW", "an arithmetic operation overflowed";
    IndexOutOfRange = -9, "INDEX_OUT_OF_RANGE", "an index was outside the bounds of a collection";
    Argument = -10, "ARGUMENT", "an argument was invalid";
    ArgumentNull = -11, "ARGUMENT_NULL", "a required argument was null";
    ArgumentOutOfRange = -12, "ARGUMENT_OUT_OF_RANGE", "an argument was outside its allowed range";
    Format = -13, "FORMAT", "a value had an invalid format";
    Io = -14, "IO", "an I/O operation failed";
    EndOfStream = -15, "END_OF_STREAM", "read past the end of a stream";
    InvalidEnumArgument = -16, "INVALID_ENUM_ARGUMENT", "an enumeration argument had an undefined value";
    Arithmetic = -17, "ARITHMETIC", "an arithmetic operation failed";
    InvalidCast = -18, "INVALID_CAST", "a value could not be converted to the requested type";
    DirectoryNotFound = -19, "DIRECTORY_NOT_FOUND", "a directory could not be found";
    DriveNotFound = -20, "DRIVE_NOT_FOUND", "a drive could not be found";
    FileNotFound = -21, "FILE_NOT_FOUND", "a file could not be found";
    FileLoad = -22, "FILE_LOAD", "a file was found but could not be loaded";
    PathTooLong = -23, "PATH_TOO_LONG", "a path exceeded the platform maximum length";
    Security = -24, "SECURITY", "the operation was denied for security reasons";
    AbandonedMutex = -25, "ABANDONED_MUTEX", "a mutex was abandoned by its owning thread";
    BadImageFormat = -26, "BAD_IMAGE_FORMAT", "a module image had an invalid format";
    DllNotFound = -27, "DLL_NOT_FOUND", "a dynamic library could not be found";
    EntryPointNotFound = -28, "ENTRY_POINT_NOT_FOUND", "an entry point was missing from a dynamic library";
    FileFormat = -29, "FILE_FORMAT", "a file had an invalid format";
    Timeout = -30, "TIMEOUT", "the operation timed out";
    Socket = -31, "SOCKET", "a socket operation failed";
    KeyNotFound = -32, "KEY_NOT_FOUND", "a key was not present in a collection";
    Aggregate = -33, "AGGREGATE", "several failures occurred";
    OperationCanceled = -34, "OPERATION_CANCELED", "the operation was canceled";
    /// Facility code for failures raised by a foreign runtime or platform layer.
    External = -90, "EXTERNAL", "external failure";
    Win32 = -91, "WIN32", "a Win32 API call failed";
    Com = -92, "COM", "a COM call failed";
    Clr = -93, "CLR", "the managed (.NET) runtime raised an exception";
    Sys = -94, "SYS", "an operating system call failed";
    Mac = -95, "MAC", "a macOS platform call failed";
    /// Native unwinding exception, e.g. a C++ exception or a Rust panic.
    Cpp = -96, "CPP", "a native exception was raised";
    Jvm = -97, "JVM", "the Java virtual machine raised an exception";
    NotActivated = -200, "NOT_ACTIVATED", "the product or component is not activated";
}

/// Named groups of failure leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facility {
    Core,
    External,
}

impl Facility {
    pub const ALL: [Facility; 2] = [Facility::Core, Facility::External];

    /// The facility's own code.
    pub const fn code(self) -> ResultCode {
        match self {
            Facility::Core => ResultCode::Core,
            Facility::External => ResultCode::External,
        }
    }

    pub const fn name(self) -> &'static str {
        self.code().name()
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of a code in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeKind {
    Success,
    /// The generic `FAILED` code.
    Root,
    /// `CORE` or `EXTERNAL` themselves.
    Facility,
    Leaf,
}

impl ResultCode {
    /// The raw integer carried across the boundary.
    #[inline]
    pub const fn raw(self) -> NResult {
        self as NResult
    }

    #[inline]
    pub const fn succeeded(self) -> bool {
        succeeded(self.raw())
    }

    #[inline]
    pub const fn failed(self) -> bool {
        failed(self.raw())
    }

    pub const fn kind(self) -> CodeKind {
        match self {
            Self::Ok => CodeKind::Success,
            Self::Failed => CodeKind::Root,
            Self::Core | Self::External => CodeKind::Facility,
            _ => CodeKind::Leaf,
        }
    }

    /// The facility a leaf belongs to.
    ///
    /// `None` for success, the root, the facility codes themselves, and
    /// `NOT_ACTIVATED`.
    pub const fn facility(self) -> Option<Facility> {
        match self {
            Self::Ok | Self::Failed | Self::Core | Self::External | Self::NotActivated => None,

            Self::Win32
            | Self::Com
            | Self::Clr
            | Self::Sys
            | Self::Mac
            | Self::Cpp
            | Self::Jvm => Some(Facility::External),

            Self::NullReference
            | Self::OutOfMemory
            | Self::NotImplemented
            | Self::NotSupported
            | Self::InvalidOperation
            | Self::Overflow
            | Self::IndexOutOfRange
            | Self::Argument
            | Self::ArgumentNull
            | Self::ArgumentOutOfRange
            | Self::Format
            | Self::Io
            | Self::EndOfStream
            | Self::InvalidEnumArgument
            | Self::Arithmetic
            | Self::InvalidCast
            | Self::DirectoryNotFound
            | Self::DriveNotFound
            | Self::FileNotFound
            | Self::FileLoad
            | Self::PathTooLong
            | Self::Security
            | Self::AbandonedMutex
            | Self::BadImageFormat
            | Self::DllNotFound
            | Self::EntryPointNotFound
            | Self::FileFormat
            | Self::Timeout
            | Self::Socket
            | Self::KeyNotFound
            | Self::Aggregate
            | Self::OperationCanceled => Some(Facility::Core),
        }
    }

    /// The more general core leaf this one specializes, if any.
    ///
    /// Both codes remain distinct leaves of `CORE`; this only records that,
    /// say, a null argument is a particular kind of bad argument.
    pub const fn refines(self) -> Option<ResultCode> {
        match self {
            Self::ArgumentNull | Self::ArgumentOutOfRange | Self::InvalidEnumArgument => {
                Some(Self::Argument)
            }
            Self::Overflow => Some(Self::Arithmetic),
            Self::FileFormat => Some(Self::Format),
            Self::DirectoryNotFound
            | Self::DriveNotFound
            | Self::EndOfStream
            | Self::FileNotFound
            | Self::FileLoad
            | Self::PathTooLong
            | Self::Socket => Some(Self::Io),
            _ => None,
        }
    }

    /// True if `self` is `general` or refines it.
    pub fn matches(self, general: ResultCode) -> bool {
        self == general || self.refines() == Some(general)
    }

    /// Codes of kind [`CodeKind::Leaf`].
    pub fn leaves() -> impl Iterator<Item = ResultCode> {
        Self::ALL
            .iter()
            .copied()
            .filter(|code| code.kind() == CodeKind::Leaf)
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.raw())
    }
}

impl From<ResultCode> for NResult {
    fn from(code: ResultCode) -> Self {
        code.raw()
    }
}

impl TryFrom<NResult> for ResultCode {
    type Error = NError;

    fn try_from(raw: NResult) -> Result<Self, Self::Error> {
        Self::from_raw(raw).ok_or(NError::Unrecognized(raw))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn zero_is_success() {
        assert!(succeeded(0));
        assert!(!failed(0));
        assert!(succeeded(N_OK));
        assert!(ResultCode::Ok.succeeded());
    }

    #[test]
    fn positive_values_are_informational_success() {
        assert!(succeeded(1));
        assert!(succeeded(i32::MAX));
        assert!(!failed(42));
    }

    #[test]
    fn every_leaf_fails() {
        for code in ResultCode::leaves() {
            assert!(code.failed(), "{code} should fail");
            assert!(!code.succeeded(), "{code} should not succeed");
            assert!(code.raw() < 0, "{code} should be negative");
        }
    }

    #[test]
    fn values_are_unique() {
        let mut seen = HashSet::new();
        for code in ResultCode::ALL {
            assert!(seen.insert(code.raw()), "duplicate value {}", code.raw());
        }
        assert_eq!(seen.len(), ResultCode::ALL.len());
    }

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = ResultCode::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), ResultCode::ALL.len());
    }

    #[test]
    fn from_raw_inverts_raw() {
        for &code in ResultCode::ALL {
            assert_eq!(ResultCode::from_raw(code.raw()), Some(code));
        }
        assert_eq!(ResultCode::from_raw(-35), None);
        assert_eq!(ResultCode::from_raw(7), None);
    }

    #[test]
    fn kinds() {
        assert_eq!(ResultCode::Ok.kind(), CodeKind::Success);
        assert_eq!(ResultCode::Failed.kind(), CodeKind::Root);
        assert_eq!(ResultCode::Core.kind(), CodeKind::Facility);
        assert_eq!(ResultCode::External.kind(), CodeKind::Facility);
        assert_eq!(ResultCode::ArgumentNull.kind(), CodeKind::Leaf);
        assert_eq!(ResultCode::NotActivated.kind(), CodeKind::Leaf);
    }

    #[test]
    fn facility_mapping() {
        assert_eq!(ResultCode::ArgumentNull.facility(), Some(Facility::Core));
        assert_eq!(ResultCode::Timeout.facility(), Some(Facility::Core));
        assert_eq!(ResultCode::KeyNotFound.facility(), Some(Facility::Core));
        assert_eq!(ResultCode::Jvm.facility(), Some(Facility::External));
        assert_eq!(ResultCode::Win32.facility(), Some(Facility::External));
        assert_eq!(ResultCode::NotActivated.facility(), None);
        assert_eq!(ResultCode::Core.facility(), None);
        assert_eq!(ResultCode::Failed.facility(), None);
    }

    #[test]
    fn every_leaf_but_not_activated_has_a_facility() {
        for code in ResultCode::leaves() {
            if code == ResultCode::NotActivated {
                continue;
            }
            assert!(code.facility().is_some(), "{code} has no facility");
        }
    }

    #[test]
    fn facility_ranges_hold() {
        for code in ResultCode::leaves() {
            match code.facility() {
                Some(Facility::Core) => assert!((-89..=-3).contains(&code.raw()), "{code}"),
                Some(Facility::External) => assert!((-99..=-91).contains(&code.raw()), "{code}"),
                None => assert_eq!(code, ResultCode::NotActivated),
            }
        }
    }

    #[test]
    fn refinements_stay_in_core() {
        for code in ResultCode::leaves() {
            if let Some(general) = code.refines() {
                assert_eq!(code.facility(), Some(Facility::Core));
                assert_eq!(general.facility(), Some(Facility::Core));
                assert_eq!(general.refines(), None, "{general} refines further");
            }
        }
    }

    #[test]
    fn matches_general_code() {
        assert!(ResultCode::ArgumentNull.matches(ResultCode::Argument));
        assert!(ResultCode::Argument.matches(ResultCode::Argument));
        assert!(ResultCode::Socket.matches(ResultCode::Io));
        assert!(!ResultCode::Socket.matches(ResultCode::Argument));
        assert!(!ResultCode::Argument.matches(ResultCode::ArgumentNull));
    }

    #[test]
    fn serializes_as_raw_integer() {
        let json = serde_json::to_string(&ResultCode::ArgumentNull).unwrap();
        assert_eq!(json, "-11");

        let code: ResultCode = serde_json::from_str("-94").unwrap();
        assert_eq!(code, ResultCode::Sys);

        assert!(serde_json::from_str::<ResultCode>("-1234").is_err());
    }

    #[test]
    fn display_includes_name_and_value() {
        assert_eq!(ResultCode::Timeout.to_string(), "TIMEOUT (-30)");
        assert_eq!(Facility::External.to_string(), "EXTERNAL");
    }
}
