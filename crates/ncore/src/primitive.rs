//! Fixed-width primitive types and their type identities.
//!
//! Primitives travel by value in their native representation. Each one still
//! has a type token so that a value container can record which primitive it
//! holds. Where two primitives would share a Rust representation (e.g. a
//! boolean and a 32-bit integer) the second is a `#[repr(transparent)]`
//! newtype, since identity is attached to the Rust type.

use std::ffi::{c_char, c_void};
use std::fmt;
use std::ptr;

use crate::primitive_type;
use crate::result::{NResult, ResultCode};
use crate::types::{TypeDescriptor, TypeOf};
use crate::HNType;

/// A by-value type with a declared identity.
///
/// # Safety
///
/// The type must be valid for every bit pattern of its size; aligned
/// storage reinterprets raw bytes as `Self`. Only `primitive_type!` should
/// implement this.
pub unsafe trait Primitive: TypeOf + Copy + 'static {}

primitive_type!(NUInt8 = u8);
primitive_type!(NInt8 = i8);
primitive_type!(NUInt16 = u16);
primitive_type!(NInt16 = i16);
primitive_type!(NUInt32 = u32);
primitive_type!(NInt32 = i32);
primitive_type!(NUInt64 = u64);
primitive_type!(NInt64 = i64);
primitive_type!(NSingle = f32);
primitive_type!(NDouble = f64);
primitive_type!(
    /// Unsigned size, as wide as a pointer.
    NSizeType = usize
);
primitive_type!(
    /// Signed size, as wide as a pointer.
    NSSizeType = isize
);

pub type NByte = NUInt8;
pub type NSByte = NInt8;
pub type NUShort = NUInt16;
pub type NShort = NInt16;
pub type NUInt = NUInt32;
pub type NInt = NInt32;
pub type NULong = NUInt64;
pub type NLong = NInt64;
pub type NFloat = NSingle;
pub type NBool = NBoolean;

#[cfg(feature = "unicode")]
pub type NChar = NWChar;
#[cfg(not(feature = "unicode"))]
pub type NChar = NAChar;

/// Writes the type token of `NChar` (`NAChar`, or `NWChar` with the
/// `unicode` feature) to `ph_value`.
///
/// # Safety
///
/// `ph_value` must be null or valid for a write of one `HNType`.
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn NCharTypeOf(ph_value: *mut HNType) -> NResult {
    // SAFETY: forwarded from our caller.
    unsafe { crate::ffi::write_type_of::<NChar>(ph_value) }
}

/// Pointer width in bytes.
pub const N_PTR_SIZE: usize = size_of::<*mut c_void>();

// --------------------------------------------------------------------------
// Boolean
// --------------------------------------------------------------------------

/// Integer-backed boolean; any non-zero value is true.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NBoolean(pub NInt);

impl NBoolean {
    pub const TRUE: NBoolean = NBoolean(1);
    pub const FALSE: NBoolean = NBoolean(0);

    pub const fn get(self) -> bool {
        self.0 != 0
    }
}

impl From<bool> for NBoolean {
    fn from(value: bool) -> Self {
        if value { Self::TRUE } else { Self::FALSE }
    }
}

impl From<NBoolean> for bool {
    fn from(value: NBoolean) -> Self {
        value.get()
    }
}

primitive_type!(NBoolean);

// --------------------------------------------------------------------------
// Characters
// --------------------------------------------------------------------------

/// Narrow (platform `char`) character.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NAChar(pub c_char);

primitive_type!(NAChar);

#[cfg(windows)]
type WideRepr = u16;
#[cfg(not(windows))]
type WideRepr = u32;

/// Size in bytes of a wide character on this platform.
pub const N_WCHAR_SIZE: usize = size_of::<WideRepr>();

/// Wide character, matching the platform `wchar_t` width.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NWChar(pub WideRepr);

impl NWChar {
    /// Convert when `c` fits in one wide unit.
    pub fn from_char(c: char) -> Option<Self> {
        WideRepr::try_from(u32::from(c)).ok().map(NWChar)
    }

    pub fn to_char(self) -> Option<char> {
        char::from_u32(u32::from(self.0))
    }
}

primitive_type!(NWChar);

// --------------------------------------------------------------------------
// Pointers
// --------------------------------------------------------------------------

/// Untyped data pointer.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NPointer(pub *mut c_void);

/// Untyped platform handle, distinct from object handles.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NHandle(pub *mut c_void);

impl Default for NPointer {
    fn default() -> Self {
        NPointer(ptr::null_mut())
    }
}

impl Default for NHandle {
    fn default() -> Self {
        NHandle(ptr::null_mut())
    }
}

impl fmt::Debug for NPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NPointer({:p})", self.0)
    }
}

impl fmt::Debug for NHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NHandle({:p})", self.0)
    }
}

primitive_type!(NPointer);
primitive_type!(NHandle);

// --------------------------------------------------------------------------
// Result
// --------------------------------------------------------------------------

// `NResult` is an `i32` alias, so its identity lives on `ResultCode`. Not a
// `Primitive`: most raw values have no named code.
impl TypeOf for ResultCode {
    fn type_of() -> HNType {
        static DESCRIPTOR: TypeDescriptor = TypeDescriptor::primitive(
            "NResult",
            size_of::<NResult>(),
            align_of::<NResult>(),
        );
        HNType::from_descriptor(&DESCRIPTOR)
    }
}
