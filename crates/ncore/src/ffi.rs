//! C-ABI boundary helpers and exports.
//!
//! Every exported function returns an `NResult`. Output values are written
//! through caller-provided pointers, and only after the pointer has been
//! checked. `guard` is the single place where Rust errors and panics are
//! turned into raw codes on the way out.
//!
//! Type-identity exports (`<Name>TypeOf`) for declared types are generated
//! by `#[object_type]` and `primitive_type!`; the root type and `NResult`
//! are exported here by hand.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, warn};

use crate::error::{CoreResult, ExternalLayer, NError};
use crate::object::{HNType, NObject};
use crate::primitive::{NBoolean, NSizeType};
use crate::result::{N_OK, NResult, ResultCode};
use crate::types::TypeOf;

/// Write `value` through an output pointer.
///
/// Fails with `ARGUMENT_NULL`, and writes nothing, if `ptr` is null.
///
/// # Safety
///
/// `ptr` must be null or valid for a write of one `T`.
pub unsafe fn out_param<T>(ptr: *mut T, value: T) -> CoreResult<()> {
    if ptr.is_null() {
        return Err(NError::Code(ResultCode::ArgumentNull));
    }
    // SAFETY: non-null, and valid per the caller's contract.
    unsafe { ptr.write(value) };
    Ok(())
}

/// Shared body of every `<Name>TypeOf` export.
///
/// # Safety
///
/// `ph_value` must be null or valid for a write of one `HNType`.
pub unsafe fn write_type_of<T: TypeOf>(ph_value: *mut HNType) -> NResult {
    // SAFETY: forwarded from our caller.
    match unsafe { out_param(ph_value, T::type_of()) } {
        Ok(()) => N_OK,
        Err(err) => err.code(),
    }
}

/// Run one boundary operation and reduce its outcome to a raw code.
///
/// `Ok(n)` returns `n`, an error returns its code, and a panic is caught and
/// reported as `EXTERNAL.CPP` so that it never unwinds into foreign frames.
/// An error carrying a success value or the bare `EXTERNAL` facility is
/// returned as `FAILED`.
pub fn guard<F>(operation: &'static str, f: F) -> NResult
where
    F: FnOnce() -> CoreResult<NResult>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => {
            if err.is_well_formed() {
                debug!(operation, code = err.code(), error = %err, "boundary operation failed");
            } else {
                warn!(
                    operation,
                    error = ?err,
                    "error carried a non-failure code; reporting FAILED"
                );
            }
            err.code()
        }
        Err(payload) => {
            let err = NError::external(ExternalLayer::Cpp, panic_message(&*payload));
            error!(operation, error = %err, "panic caught at boundary");
            err.code()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

// --------------------------------------------------------------------------
// Exports
// --------------------------------------------------------------------------

/// Writes the type token of the root object type to `ph_value`.
///
/// # Safety
///
/// `ph_value` must be null or valid for a write of one `HNType`.
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn NObjectTypeOf(ph_value: *mut HNType) -> NResult {
    // SAFETY: forwarded from our caller.
    unsafe { write_type_of::<NObject>(ph_value) }
}

/// Writes the type token of `NResult` to `ph_value`.
///
/// # Safety
///
/// `ph_value` must be null or valid for a write of one `HNType`.
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn NResultTypeOf(ph_value: *mut HNType) -> NResult {
    // SAFETY: forwarded from our caller.
    unsafe { write_type_of::<ResultCode>(ph_value) }
}

/// Writes the declared base of `h_type`, or a null token for the root and
/// for primitives.
///
/// # Safety
///
/// `h_type` must be null or a token obtained from a `TypeOf` export;
/// `ph_value` must be null or valid for a write of one `HNType`.
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn NTypeGetBaseType(h_type: HNType, ph_value: *mut HNType) -> NResult {
    guard("NTypeGetBaseType", || {
        let base = h_type.non_null()?.base().unwrap_or_default();
        // SAFETY: forwarded from our caller.
        unsafe { out_param(ph_value, base) }?;
        Ok(N_OK)
    })
}

/// Writes whether `h_type` is `h_other` or one of its descendants.
///
/// # Safety
///
/// Both tokens must be null or obtained from `TypeOf` exports; `p_value`
/// must be null or valid for a write of one `NBoolean`.
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn NTypeIsSubtypeOf(
    h_type: HNType,
    h_other: HNType,
    p_value: *mut NBoolean,
) -> NResult {
    guard("NTypeIsSubtypeOf", || {
        let is_subtype = h_type.non_null()?.is_subtype_of(h_other.non_null()?);
        // SAFETY: forwarded from our caller.
        unsafe { out_param(p_value, NBoolean::from(is_subtype)) }?;
        Ok(N_OK)
    })
}

/// Writes the native size of a primitive type; zero for object types.
///
/// # Safety
///
/// `h_type` must be null or a token obtained from a `TypeOf` export;
/// `p_value` must be null or valid for a write of one `NSizeType`.
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn NTypeGetSize(h_type: HNType, p_value: *mut NSizeType) -> NResult {
    guard("NTypeGetSize", || {
        let size = h_type
            .non_null()?
            .descriptor()
            .map_or(0, |descriptor| descriptor.size());
        // SAFETY: forwarded from our caller.
        unsafe { out_param(p_value, size) }?;
        Ok(N_OK)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::ptr;

    use super::*;
    use crate::object::{NObjectPart, NObjectPartTypeOf, NType};
    use crate::primitive::{NChar, NCharTypeOf, NInt32, NInt32TypeOf, NUInt32TypeOf};
    use crate::result::{Facility, failed, succeeded};

    #[test]
    fn type_of_writes_token() {
        let mut token = HNType::null();
        let result = unsafe { NInt32TypeOf(&mut token) };
        assert!(succeeded(result));
        assert_eq!(token, NInt32::type_of());
    }

    #[test]
    fn type_of_null_output_is_argument_null() {
        let result = unsafe { NUInt32TypeOf(ptr::null_mut()) };
        assert_eq!(result, ResultCode::ArgumentNull.raw());
        assert_ne!(result, ResultCode::Failed.raw());
    }

    #[test]
    fn root_and_result_exports() {
        let mut token = HNType::null();
        assert_eq!(unsafe { NObjectTypeOf(&mut token) }, N_OK);
        assert_eq!(token, NObject::type_of());

        assert_eq!(unsafe { NResultTypeOf(&mut token) }, N_OK);
        assert_eq!(token.name(), Some("NResult"));
        assert_eq!(unsafe { NResultTypeOf(ptr::null_mut()) }, -11);
    }

    #[test]
    fn object_exports() {
        let mut first = HNType::null();
        let mut second = HNType::null();
        assert_eq!(unsafe { NObjectPartTypeOf(&mut first) }, N_OK);
        assert_eq!(unsafe { NObjectPartTypeOf(&mut second) }, N_OK);
        assert_eq!(first, second);
        assert_eq!(first, NObjectPart::type_of());
    }

    #[test]
    fn out_param_leaves_nothing_behind_on_null() {
        let result = unsafe { out_param::<u32>(ptr::null_mut(), 5) };
        assert_eq!(result, Err(NError::Code(ResultCode::ArgumentNull)));
    }

    #[test]
    fn guard_passes_results_through() {
        assert_eq!(guard("ok", || Ok(N_OK)), 0);
        assert_eq!(guard("info", || Ok(3)), 3);
        assert_eq!(
            guard("fail", || Err(NError::Code(ResultCode::Timeout))),
            ResultCode::Timeout.raw()
        );
    }

    #[test]
    fn guard_never_reports_an_error_as_success() {
        let result = guard("ok_as_error", || Err(NError::from(ResultCode::Ok)));
        assert!(failed(result));
        assert_eq!(result, ResultCode::Failed.raw());

        let result = guard("positive_as_error", || Err(NError::Unrecognized(4)));
        assert_eq!(result, ResultCode::Failed.raw());
    }

    #[test]
    fn guard_never_reports_the_bare_external_facility() {
        let result = guard("bare_external", || Err(ResultCode::External.into()));
        assert_ne!(result, ResultCode::External.raw());
        assert_eq!(result, ResultCode::Failed.raw());

        let result = guard("layer", || Err(ResultCode::Clr.into()));
        assert_eq!(result, ResultCode::Clr.raw());
    }

    #[test]
    fn char_export_follows_feature() {
        let mut token = HNType::null();
        assert_eq!(unsafe { NCharTypeOf(&mut token) }, N_OK);
        assert_eq!(token, NChar::type_of());
        #[cfg(not(feature = "unicode"))]
        assert_eq!(token.name(), Some("NAChar"));
        #[cfg(feature = "unicode")]
        assert_eq!(token.name(), Some("NWChar"));
        assert_eq!(
            unsafe { NCharTypeOf(ptr::null_mut()) },
            ResultCode::ArgumentNull.raw()
        );
    }

    #[test]
    fn guard_reports_panics_as_external_leaf() {
        let result = guard("boom", || panic!("exploded"));
        assert!(failed(result));
        let code = ResultCode::from_raw(result).unwrap();
        assert_eq!(code, ExternalLayer::Cpp.code());
        assert_eq!(code.facility(), Some(Facility::External));
        assert_ne!(code, ResultCode::External);
        assert_ne!(code, ResultCode::Failed);
    }

    #[test]
    fn get_base_type() {
        let mut base = HNType::null();
        let result = unsafe { NTypeGetBaseType(NObjectPart::type_of(), &mut base) };
        assert_eq!(result, N_OK);
        assert_eq!(base, NObject::type_of());

        let result = unsafe { NTypeGetBaseType(NObject::type_of(), &mut base) };
        assert_eq!(result, N_OK);
        assert!(base.is_null());
    }

    #[test]
    fn null_handle_argument_is_argument_null() {
        let mut base = HNType::null();
        let result = unsafe { NTypeGetBaseType(HNType::null(), &mut base) };
        assert_eq!(result, ResultCode::ArgumentNull.raw());
        assert_ne!(result, ResultCode::Failed.raw());
    }

    #[test]
    fn is_subtype_of() {
        let mut value = NBoolean::FALSE;
        let result =
            unsafe { NTypeIsSubtypeOf(NType::type_of(), NObject::type_of(), &mut value) };
        assert_eq!(result, N_OK);
        assert!(value.get());

        let result =
            unsafe { NTypeIsSubtypeOf(NObject::type_of(), NType::type_of(), &mut value) };
        assert_eq!(result, N_OK);
        assert!(!value.get());

        let result =
            unsafe { NTypeIsSubtypeOf(NObject::type_of(), HNType::null(), &mut value) };
        assert_eq!(result, ResultCode::ArgumentNull.raw());
    }

    #[test]
    fn get_size() {
        let mut size: NSizeType = 0;
        assert_eq!(unsafe { NTypeGetSize(NInt32::type_of(), &mut size) }, N_OK);
        assert_eq!(size, 4);
        assert_eq!(unsafe { NTypeGetSize(NType::type_of(), &mut size) }, N_OK);
        assert_eq!(size, 0);
        assert_eq!(
            unsafe { NTypeGetSize(NInt32::type_of(), ptr::null_mut()) },
            ResultCode::ArgumentNull.raw()
        );
    }
}
