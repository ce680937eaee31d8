//! Opaque object handles.
//!
//! `Handle<T>` is a pointer-sized reference to an object whose layout the
//! caller never sees. The type parameter exists only at compile time: every
//! handle has the representation of `*mut c_void`, so handles of different
//! declared types cannot be mixed by accident, while converting to an
//! ancestor type is free.

use std::ffi::c_void;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ptr;

use crate::error::{CoreResult, NError};
use crate::object::{HNObject, HNType, IsA, NObject, ObjectType};
use crate::result::ResultCode;

/// Opaque handle to an object of declared type `T`.
#[repr(transparent)]
pub struct Handle<T: ObjectType> {
    raw: *mut c_void,
    _marker: PhantomData<fn() -> T>,
}

// SAFETY: a handle is a plain value. It implies no access to the object and
// no locking; thread-safety of the object itself is the owner's concern.
unsafe impl<T: ObjectType> Send for Handle<T> {}
unsafe impl<T: ObjectType> Sync for Handle<T> {}

impl<T: ObjectType> Handle<T> {
    pub const fn null() -> Self {
        Self {
            raw: ptr::null_mut(),
            _marker: PhantomData,
        }
    }

    /// Reinterpret a raw pointer as a handle of type `T`.
    ///
    /// # Safety
    ///
    /// `raw` must be null or refer to an object whose runtime type is `T` or
    /// a descendant of `T`. For `HNType` this means the address of a
    /// `'static` type descriptor.
    pub const unsafe fn from_raw(raw: *mut c_void) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    pub const fn as_raw(self) -> *mut c_void {
        self.raw
    }

    pub fn is_null(self) -> bool {
        self.raw.is_null()
    }

    /// `Err(ARGUMENT_NULL)` for a null handle.
    pub fn non_null(self) -> CoreResult<Self> {
        if self.is_null() {
            Err(NError::Code(ResultCode::ArgumentNull))
        } else {
            Ok(self)
        }
    }

    /// View this handle as any declared ancestor type.
    pub fn upcast<A: ObjectType>(self) -> Handle<A>
    where
        T: IsA<A>,
    {
        // SAFETY: `T: IsA<A>` means every `T` is an `A`, and all handles
        // share one representation.
        unsafe { Handle::from_raw(self.raw) }
    }

    /// View this handle as its direct base type.
    pub fn to_base(self) -> Handle<T::Base> {
        // SAFETY: the declared base is an ancestor of `T`.
        unsafe { Handle::from_raw(self.raw) }
    }

    /// View this handle as the root object type.
    pub fn as_object(self) -> HNObject {
        self.upcast::<NObject>()
    }

    /// Reinterpret an ancestor handle as a descendant type without checking.
    ///
    /// # Safety
    ///
    /// The object must actually be a `D` (or a descendant of `D`).
    pub unsafe fn downcast_unchecked<D>(self) -> Handle<D>
    where
        D: ObjectType + IsA<T>,
    {
        // SAFETY: upheld by the caller.
        unsafe { Handle::from_raw(self.raw) }
    }

    /// Reinterpret as descendant type `D` after checking `actual`, the
    /// object's runtime type, against `D`'s declared ancestry.
    ///
    /// Fails with `ARGUMENT_NULL` for a null handle and `INVALID_CAST` when
    /// `actual` is not `D` or one of its descendants.
    ///
    /// # Safety
    ///
    /// `actual` must be the runtime type of the referenced object.
    pub unsafe fn downcast<D>(self, actual: HNType) -> CoreResult<Handle<D>>
    where
        D: ObjectType + IsA<T>,
    {
        let this = self.non_null()?;
        if !actual.is_subtype_of(D::type_of()) {
            return Err(NError::Code(ResultCode::InvalidCast));
        }
        // SAFETY: the object is an `actual`, which descends from `D`.
        Ok(unsafe { this.downcast_unchecked() })
    }
}

impl<T: ObjectType> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ObjectType> Copy for Handle<T> {}

impl<T: ObjectType> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.raw, other.raw)
    }
}

impl<T: ObjectType> Eq for Handle<T> {}

impl<T: ObjectType> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T: ObjectType> Default for Handle<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ObjectType> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}({:p})", T::type_of(), self.raw)
    }
}
