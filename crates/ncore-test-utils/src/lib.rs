//! ncore test utilities.
//!
//! Helpers for integration testing: the golden result-code table, a small
//! object hierarchy declared from outside the core crate, and assertion
//! helpers for type tokens and raw result codes.

use ncore::{
    Handle, HNType, NObject, NObjectPart, NResult, ObjectType, ResultCode, TypeOf, object_type,
};
use serde_json::Value as JsonValue;

/// Every named result code as `(name, value)`, in declaration order.
///
/// This is the binary contract; it is written out by hand so a renumbering
/// in the core crate fails the comparison instead of silently passing.
pub const GOLDEN_CODES: &[(&str, NResult)] = &[
    ("OK", 0),
    ("FAILED", -1),
    ("CORE", -2),
    ("NULL_REFERENCE", -3),
    ("OUT_OF_MEMORY", -4),
    ("NOT_IMPLEMENTED", -5),
    ("NOT_SUPPORTED", -6),
    ("INVALID_OPERATION", -7),
    ("OVERFLOW", -8),
    ("INDEX_OUT_OF_RANGE", -9),
    ("ARGUMENT", -10),
    ("ARGUMENT_NULL", -11),
    ("ARGUMENT_OUT_OF_RANGE", -12),
    ("FORMAT", -13),
    ("IO", -14),
    ("END_OF_STREAM", -15),
    ("INVALID_ENUM_ARGUMENT", -16),
    ("ARITHMETIC", -17),
    ("INVALID_CAST", -18),
    ("DIRECTORY_NOT_FOUND", -19),
    ("DRIVE_NOT_FOUND", -20),
    ("FILE_NOT_FOUND", -21),
    ("FILE_LOAD", -22),
    ("PATH_TOO_LONG", -23),
    ("SECURITY", -24),
    ("ABANDONED_MUTEX", -25),
    ("BAD_IMAGE_FORMAT", -26),
    ("DLL_NOT_FOUND", -27),
    ("ENTRY_POINT_NOT_FOUND", -28),
    ("FILE_FORMAT", -29),
    ("TIMEOUT", -30),
    ("SOCKET", -31),
    ("KEY_NOT_FOUND", -32),
    ("AGGREGATE", -33),
    ("OPERATION_CANCELED", -34),
    ("EXTERNAL", -90),
    ("WIN32", -91),
    ("COM", -92),
    ("CLR", -93),
    ("SYS", -94),
    ("MAC", -95),
    ("CPP", -96),
    ("JVM", -97),
    ("NOT_ACTIVATED", -200),
];

/// The golden table as a JSON object mapping name to value.
pub fn golden_code_table() -> JsonValue {
    GOLDEN_CODES
        .iter()
        .map(|(name, value)| ((*name).to_string(), JsonValue::from(*value)))
        .collect::<serde_json::Map<_, _>>()
        .into()
}

/// The code table as the core crate currently declares it, in the same shape
/// as [`golden_code_table`].
pub fn declared_code_table() -> JsonValue {
    ResultCode::ALL
        .iter()
        .map(|code| (code.name().to_string(), serde_json::json!(code)))
        .collect::<serde_json::Map<_, _>>()
        .into()
}

// --------------------------------------------------------------------------
// Test hierarchy
// --------------------------------------------------------------------------

/// A part type two levels below the root.
#[object_type(extends(NObjectPart, NObject))]
pub enum TestPart {}

/// A leaf type three levels below the root.
#[object_type(extends(TestPart, NObjectPart, NObject))]
pub enum TestWidget {}

/// A sibling of `TestPart` under the root.
#[object_type(extends(NObject))]
pub enum TestService {}

pub type HTestPart = Handle<TestPart>;
pub type HTestWidget = Handle<TestWidget>;
pub type HTestService = Handle<TestService>;

/// A non-null handle with an arbitrary address, for representation tests.
/// Never dereferenced.
pub fn fake_handle<T: ObjectType>(addr: usize) -> Handle<T> {
    // SAFETY: handles are never dereferenced by ncore itself; tests only
    // compare and convert them.
    unsafe { Handle::from_raw(addr as *mut std::ffi::c_void) }
}

// --------------------------------------------------------------------------
// Assertions
// --------------------------------------------------------------------------

/// Assert that `token` is `T`'s token and carries `name`.
pub fn assert_token_of<T: TypeOf>(token: HNType, name: &str) {
    assert_eq!(token, T::type_of(), "token mismatch for {name}");
    assert_eq!(token.name(), Some(name));
}

/// Assert the full ancestry of `T`, starting with `T` itself.
pub fn assert_ancestry<T: TypeOf>(expected: &[&str]) {
    let names: Vec<_> = T::type_of()
        .ancestors()
        .map(|token| token.name().unwrap_or("<null>"))
        .collect();
    assert_eq!(names, expected);
}

/// Assert that a raw result is exactly the named `code`.
pub fn assert_code(raw: NResult, code: ResultCode) {
    assert_eq!(
        ResultCode::from_raw(raw),
        Some(code),
        "expected {code}, got {raw}"
    );
}
