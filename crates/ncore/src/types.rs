//! Runtime type identity.
//!
//! A type token (`HNType`) is a handle whose address is a `'static`
//! [`TypeDescriptor`]. Each declared type owns exactly one descriptor, so two
//! tokens are equal iff they name the same declared type, and asking for a
//! type's token twice yields the same value. Ancestry is a separate relation,
//! answered by walking descriptor base links rather than by comparing tokens.

use std::ffi::c_void;
use std::fmt;
use std::iter::FusedIterator;

use serde::Serialize;

use crate::handle::Handle;
use crate::object::{HNType, NCallback, NObject, NObjectPart, NString, NType};
use crate::primitive::{
    NAChar, NBoolean, NDouble, NHandle, NInt8, NInt16, NInt32, NInt64, NPointer, NSSizeType,
    NSingle, NSizeType, NUInt8, NUInt16, NUInt32, NUInt64, NWChar,
};
use crate::result::ResultCode;

/// Capability to report a runtime type token.
///
/// Never fails: identity is a static property of the declared type.
pub trait TypeOf {
    fn type_of() -> HNType;
}

/// What a descriptor describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Passed by opaque handle.
    Object,
    /// Passed by value in its native representation.
    Primitive,
}

/// Static description of one declared type.
///
/// Built by `#[object_type]` and `primitive_type!`; never constructed at
/// runtime.
pub struct TypeDescriptor {
    name: &'static str,
    kind: TypeKind,
    base: Option<fn() -> HNType>,
    size: usize,
    align: usize,
}

impl TypeDescriptor {
    /// The single root object type.
    pub(crate) const fn root(name: &'static str) -> Self {
        Self {
            name,
            kind: TypeKind::Object,
            base: None,
            size: 0,
            align: 0,
        }
    }

    #[doc(hidden)]
    pub const fn object(name: &'static str, base: fn() -> HNType) -> Self {
        Self {
            name,
            kind: TypeKind::Object,
            base: Some(base),
            size: 0,
            align: 0,
        }
    }

    #[doc(hidden)]
    pub const fn primitive(name: &'static str, size: usize, align: usize) -> Self {
        Self {
            name,
            kind: TypeKind::Primitive,
            base: None,
            size,
            align,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Size in bytes of a primitive's native representation; `0` for objects.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Alignment of a primitive's native representation; `0` for objects.
    pub const fn align(&self) -> usize {
        self.align
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("base", &self.base.map(|base| base()))
            .field("size", &self.size)
            .finish()
    }
}

// --------------------------------------------------------------------------
// Token queries
// --------------------------------------------------------------------------

impl Handle<NType> {
    #[doc(hidden)]
    pub const fn from_descriptor(descriptor: &'static TypeDescriptor) -> Self {
        let raw = (descriptor as *const TypeDescriptor).cast_mut().cast::<c_void>();
        // SAFETY: a type token is exactly the address of a static descriptor.
        unsafe { Self::from_raw(raw) }
    }

    /// The descriptor behind this token, or `None` for a null token.
    pub fn descriptor(self) -> Option<&'static TypeDescriptor> {
        // SAFETY: a non-null HNType is built by `from_descriptor` or by
        // `Handle::from_raw`, whose contract requires a live descriptor.
        unsafe { self.as_raw().cast::<TypeDescriptor>().cast_const().as_ref() }
    }

    pub fn name(self) -> Option<&'static str> {
        self.descriptor().map(TypeDescriptor::name)
    }

    pub fn kind(self) -> Option<TypeKind> {
        self.descriptor().map(TypeDescriptor::kind)
    }

    /// Token of the declared base type.
    ///
    /// `None` for the root, for primitives, and for a null token.
    pub fn base(self) -> Option<HNType> {
        self.descriptor().and_then(|d| d.base).map(|base| base())
    }

    /// This token followed by each base up to the root.
    pub fn ancestors(self) -> Ancestors {
        Ancestors {
            next: (!self.is_null()).then_some(self),
        }
    }

    /// True if `self` is `other` or declares it as an ancestor.
    pub fn is_subtype_of(self, other: HNType) -> bool {
        !other.is_null() && self.ancestors().any(|ancestor| ancestor == other)
    }

    /// Number of base links between this type and the root.
    pub fn depth(self) -> usize {
        self.ancestors().count().saturating_sub(1)
    }
}

impl fmt::Display for Handle<NType> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("<null type>"))
    }
}

/// Iterator over a type and its ancestors.
#[derive(Debug, Clone)]
pub struct Ancestors {
    next: Option<HNType>,
}

impl Iterator for Ancestors {
    type Item = HNType;

    fn next(&mut self) -> Option<HNType> {
        let current = self.next?;
        self.next = current.base();
        Some(current)
    }
}

impl FusedIterator for Ancestors {}

// --------------------------------------------------------------------------
// Built-in types
// --------------------------------------------------------------------------

static BUILTIN: &[fn() -> HNType] = &[
    <NObject as TypeOf>::type_of,
    <NType as TypeOf>::type_of,
    <NObjectPart as TypeOf>::type_of,
    <NString as TypeOf>::type_of,
    <NCallback as TypeOf>::type_of,
    <ResultCode as TypeOf>::type_of,
    <NUInt8 as TypeOf>::type_of,
    <NInt8 as TypeOf>::type_of,
    <NUInt16 as TypeOf>::type_of,
    <NInt16 as TypeOf>::type_of,
    <NUInt32 as TypeOf>::type_of,
    <NInt32 as TypeOf>::type_of,
    <NUInt64 as TypeOf>::type_of,
    <NInt64 as TypeOf>::type_of,
    <NSingle as TypeOf>::type_of,
    <NDouble as TypeOf>::type_of,
    <NBoolean as TypeOf>::type_of,
    <NAChar as TypeOf>::type_of,
    <NWChar as TypeOf>::type_of,
    <NSizeType as TypeOf>::type_of,
    <NSSizeType as TypeOf>::type_of,
    <NPointer as TypeOf>::type_of,
    <NHandle as TypeOf>::type_of,
];

/// Tokens of every type declared by this crate.
pub fn builtin() -> impl Iterator<Item = HNType> {
    BUILTIN.iter().map(|type_of| type_of())
}

/// Look up a built-in type by name, e.g. `"NInt32"`.
pub fn find(name: &str) -> Option<HNType> {
    builtin().find(|token| token.name() == Some(name))
}
