//! Pointer-aligned storage for a primitive chosen at runtime.
//!
//! `AlignedStorage<N>` is the fixed-size slot that generic boundaries (property
//! bags, callback arguments) use instead of a heap allocation or an untyped
//! pointer. `TaggedValue` pairs such a slot with the type token that says how
//! its bytes may be read.

use std::ffi::c_void;
use std::fmt;
use std::ptr;

use crate::error::{CoreResult, NError};
use crate::object::HNType;
use crate::primitive::Primitive;
use crate::result::ResultCode;

/// `N` raw bytes starting at a pointer-aligned address.
///
/// The union with a pointer member gives the alignment; the storage is
/// `max(N, pointer size)` bytes rounded up to pointer alignment. It owns
/// nothing: any pointer stored in it is just bytes.
#[repr(C)]
#[derive(Clone, Copy)]
pub union AlignedStorage<const N: usize> {
    _align: *mut c_void,
    data: [u8; N],
}

impl<const N: usize> AlignedStorage<N> {
    pub const CAPACITY: usize = N;

    /// Zero-filled storage.
    pub const fn new() -> Self {
        Self { data: [0; N] }
    }

    /// True if a `T` fits in `N` bytes.
    pub const fn fits<T>() -> bool {
        size_of::<T>() <= N
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        // SAFETY: `data` is the only field ever written.
        unsafe { &self.data }
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; N] {
        // SAFETY: as above; every byte pattern is a valid `[u8; N]`.
        unsafe { &mut self.data }
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.as_bytes().as_ptr()
    }

    /// Zero the slot, then write `value` at its start.
    ///
    /// Fails with `ARGUMENT_OUT_OF_RANGE` if `T` is larger than `N`.
    pub fn store<T: Primitive>(&mut self, value: T) -> CoreResult<()> {
        if !Self::fits::<T>() {
            return Err(NError::Code(ResultCode::ArgumentOutOfRange));
        }
        let bytes = self.as_bytes_mut();
        *bytes = [0; N];
        // SAFETY: the slot holds at least `size_of::<T>()` bytes.
        unsafe { ptr::write_unaligned(bytes.as_mut_ptr().cast::<T>(), value) };
        Ok(())
    }

    /// Read a `T` from the start of the slot.
    ///
    /// Fails with `ARGUMENT_OUT_OF_RANGE` if `T` is larger than `N`.
    pub fn load<T: Primitive>(&self) -> CoreResult<T> {
        if !Self::fits::<T>() {
            return Err(NError::Code(ResultCode::ArgumentOutOfRange));
        }
        // SAFETY: in bounds as checked above, and `Primitive` types accept
        // every bit pattern.
        Ok(unsafe { ptr::read_unaligned(self.as_ptr().cast::<T>()) })
    }
}

impl<const N: usize> Default for AlignedStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for AlignedStorage<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AlignedStorage").field(self.as_bytes()).finish()
    }
}

// --------------------------------------------------------------------------
// Tagged values
// --------------------------------------------------------------------------

/// Capacity of a `TaggedValue` slot: the largest built-in primitive.
pub const VALUE_STORAGE_SIZE: usize = 8;

/// A primitive value plus the token naming its type.
#[derive(Clone, Copy)]
pub struct TaggedValue {
    type_token: HNType,
    storage: AlignedStorage<VALUE_STORAGE_SIZE>,
}

impl TaggedValue {
    pub fn new<T: Primitive>(value: T) -> CoreResult<Self> {
        let mut storage = AlignedStorage::<VALUE_STORAGE_SIZE>::new();
        storage.store(value)?;
        Ok(Self {
            type_token: T::type_of(),
            storage,
        })
    }

    /// Rebuild a value received as token plus raw slot.
    pub fn from_parts(type_token: HNType, storage: AlignedStorage<VALUE_STORAGE_SIZE>) -> Self {
        Self {
            type_token,
            storage,
        }
    }

    pub fn type_token(&self) -> HNType {
        self.type_token
    }

    pub fn storage(&self) -> &AlignedStorage<VALUE_STORAGE_SIZE> {
        &self.storage
    }

    pub fn is<T: Primitive>(&self) -> bool {
        self.type_token == T::type_of()
    }

    /// The value as `T`; `INVALID_CAST` if it holds another type.
    pub fn get<T: Primitive>(&self) -> CoreResult<T> {
        if !self.is::<T>() {
            return Err(NError::Code(ResultCode::InvalidCast));
        }
        self.storage.load()
    }
}

impl fmt::Debug for TaggedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedValue")
            .field("type", &self.type_token.name())
            .field("bytes", self.storage.as_bytes())
            .finish()
    }
}
