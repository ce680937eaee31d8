//! The object type hierarchy.
//!
//! Every object type descends from the single root [`NObject`]. New types
//! are declared with `#[object_type(extends(...))]`, which checks the listed
//! ancestor chain at compile time.

use crate::handle::Handle;
use crate::object_type;
use crate::types::{TypeDescriptor, TypeOf};

/// A declared object type.
pub trait ObjectType: TypeOf + IsA<NObject> + 'static {
    /// Direct base type. The root is its own base.
    type Base: ObjectType;
}

/// `Self` is `A` or a descendant of `A`.
///
/// # Safety
///
/// Implementations assert that a handle to `Self` may be reinterpreted as a
/// handle to `A`. Only `#[object_type]` should implement this.
pub unsafe trait IsA<A> {}

/// Root of the object hierarchy.
pub enum NObject {}

impl TypeOf for NObject {
    fn type_of() -> HNType {
        static DESCRIPTOR: TypeDescriptor = TypeDescriptor::root("NObject");
        HNType::from_descriptor(&DESCRIPTOR)
    }
}

impl ObjectType for NObject {
    type Base = NObject;
}

unsafe impl IsA<NObject> for NObject {}

impl crate::__private::Root for NObject {}
impl crate::__private::Sealed for NObject {}

/// Runtime type of objects and primitives; type tokens are handles to it.
#[object_type(extends(NObject))]
pub enum NType {}

/// A component owned by another object.
#[object_type(extends(NObject))]
pub enum NObjectPart {}

/// Immutable string object.
#[object_type(extends(NObject))]
pub enum NString {}

/// Function pointer bundled with its user data.
#[object_type(extends(NObject))]
pub enum NCallback {}

pub type HNObject = Handle<NObject>;
pub type HNType = Handle<NType>;
pub type HNObjectPart = Handle<NObjectPart>;
pub type HNString = Handle<NString>;
pub type HNCallback = Handle<NCallback>;
