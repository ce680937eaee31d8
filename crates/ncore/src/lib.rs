//! ncore
//!
//! Foundation of a cross-language binary interface: opaque typed handles,
//! runtime type identity for objects and primitives, and the result codes
//! every call across the boundary returns.
//!
//! - [`result`]: the result-code taxonomy and the `succeeded`/`failed` tests
//! - [`object`] and [`handle`]: the single-rooted object hierarchy
//! - [`types`]: type tokens and ancestry queries
//! - [`primitive`]: fixed-width primitives and their identities
//! - [`storage`]: pointer-aligned slots and tagged values
//! - [`ffi`]: helpers and exports for the C ABI

// Lets macro-generated `::ncore::...` paths resolve inside this crate too.
extern crate self as ncore;

pub mod error;
pub mod ffi;
pub mod handle;
pub mod object;
pub mod primitive;
pub mod result;
pub mod storage;
pub mod types;

pub use error::{CoreResult, ExternalLayer, NError, check};
pub use handle::Handle;
pub use ncore_macros::{object_type, primitive_type};
pub use object::{
    HNCallback, HNObject, HNObjectPart, HNString, HNType, IsA, NCallback, NObject, NObjectPart,
    NString, NType, ObjectType,
};
pub use primitive::*;
pub use result::{CodeKind, Facility, N_OK, NResult, ResultCode, failed, succeeded};
pub use storage::{AlignedStorage, TaggedValue, VALUE_STORAGE_SIZE};
pub use types::{TypeDescriptor, TypeKind, TypeOf};

pub mod prelude {
    pub use crate::error::{CoreResult, NError};
    pub use crate::handle::Handle;
    pub use crate::object::{HNObject, HNType, IsA, NObject, ObjectType};
    pub use crate::result::{NResult, ResultCode, failed, succeeded};
    pub use crate::types::TypeOf;
    pub use crate::{object_type, primitive_type};
}

#[doc(hidden)]
pub mod __private {
    use crate::object::ObjectType;

    pub trait Sealed {}

    /// Implemented only by `NObject`.
    pub trait Root: ObjectType + Sealed {}

    /// Compile-time check that `T` declares `B` as its direct base.
    pub fn assert_base<T: ObjectType<Base = B>, B: ObjectType>() {}

    /// Compile-time check that an ancestor chain ends at the root.
    pub fn assert_root<T: Root>() {}
}
