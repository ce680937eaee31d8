#![allow(clippy::unwrap_used, clippy::expect_used)]
//! C-ABI boundary tests.
//!
//! Calls the exported functions the way a foreign caller would: through
//! output pointers, checking raw result codes.

use std::ptr;
use std::sync::mpsc;
use std::thread;

use ncore::ffi::{
    NObjectTypeOf, NResultTypeOf, NTypeGetBaseType, NTypeGetSize, NTypeIsSubtypeOf, guard,
};
use ncore::object::NStringTypeOf;
use ncore::primitive::{NBooleanTypeOf, NDoubleTypeOf, NInt32TypeOf, NUInt32TypeOf};
use ncore::{
    AlignedStorage, ExternalLayer, HNType, N_OK, NBoolean, NDouble, NError, NInt32, NObject,
    NSizeType, NString, NUInt32, ResultCode, TaggedValue, TypeOf, VALUE_STORAGE_SIZE, failed,
    succeeded,
};
use ncore_test_utils::{TestPart, TestWidget, assert_code, assert_token_of};

#[test]
fn test_type_of_is_stable_across_calls() {
    let mut first = HNType::null();
    let mut second = HNType::null();
    assert_eq!(unsafe { NInt32TypeOf(&mut first) }, N_OK);
    assert_eq!(unsafe { NInt32TypeOf(&mut second) }, N_OK);
    assert_eq!(first, second);
    assert_token_of::<NInt32>(first, "NInt32");
}

#[test]
fn test_int32_and_uint32_tokens_differ() {
    let mut signed = HNType::null();
    let mut unsigned = HNType::null();
    assert!(succeeded(unsafe { NInt32TypeOf(&mut signed) }));
    assert!(succeeded(unsafe { NUInt32TypeOf(&mut unsigned) }));
    assert_ne!(signed, unsigned);
    assert_token_of::<NUInt32>(unsigned, "NUInt32");
}

#[test]
fn test_type_of_from_many_threads() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 200;

    let (tx, rx) = mpsc::channel();
    let workers: Vec<_> = (0..THREADS)
        .map(|_| {
            let tx = tx.clone();
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    let mut token = HNType::null();
                    let result = unsafe { NInt32TypeOf(&mut token) };
                    assert_eq!(result, N_OK);
                    tx.send((token, TestWidget::type_of(), failed(result)))
                        .unwrap();
                }
            })
        })
        .collect();
    drop(tx);
    for worker in workers {
        worker.join().unwrap();
    }

    let seen: Vec<_> = rx.iter().collect();
    assert_eq!(seen.len(), THREADS * ROUNDS);

    let int32 = NInt32::type_of();
    let widget = TestWidget::type_of();
    for (token, widget_token, was_failure) in seen {
        assert!(!was_failure);
        assert_eq!(token, int32);
        assert_ne!(token, NUInt32::type_of());
        assert_eq!(widget_token, widget);
    }
}

#[test]
fn test_null_output_pointer_is_argument_null() {
    let exports: [unsafe extern "C" fn(*mut HNType) -> i32; 5] = [
        NObjectTypeOf,
        NResultTypeOf,
        NStringTypeOf,
        NBooleanTypeOf,
        NDoubleTypeOf,
    ];
    for export in exports {
        let result = unsafe { export(ptr::null_mut()) };
        assert!(failed(result));
        assert_code(result, ResultCode::ArgumentNull);
        assert_ne!(result, ResultCode::Failed.raw());
    }
}

#[test]
fn test_exports_agree_with_rust_tokens() {
    let mut token = HNType::null();
    assert_eq!(unsafe { NObjectTypeOf(&mut token) }, N_OK);
    assert_eq!(token, NObject::type_of());
    assert_eq!(unsafe { NStringTypeOf(&mut token) }, N_OK);
    assert_eq!(token, NString::type_of());
    assert_eq!(unsafe { NDoubleTypeOf(&mut token) }, N_OK);
    assert_eq!(token, NDouble::type_of());
}

#[test]
fn test_type_queries_over_external_hierarchy() {
    let mut base = HNType::null();
    let result = unsafe { NTypeGetBaseType(TestWidget::type_of(), &mut base) };
    assert_eq!(result, N_OK);
    assert_eq!(base, TestPart::type_of());

    let mut is_subtype = NBoolean::FALSE;
    let result =
        unsafe { NTypeIsSubtypeOf(TestWidget::type_of(), NObject::type_of(), &mut is_subtype) };
    assert_eq!(result, N_OK);
    assert!(is_subtype.get());

    let result =
        unsafe { NTypeIsSubtypeOf(TestPart::type_of(), TestWidget::type_of(), &mut is_subtype) };
    assert_eq!(result, N_OK);
    assert!(!is_subtype.get());
}

#[test]
fn test_type_queries_reject_null_arguments() {
    let mut size: NSizeType = 0;
    assert_code(
        unsafe { NTypeGetSize(HNType::null(), &mut size) },
        ResultCode::ArgumentNull,
    );
    assert_code(
        unsafe { NTypeGetBaseType(NObject::type_of(), ptr::null_mut()) },
        ResultCode::ArgumentNull,
    );
    assert_code(
        unsafe { NTypeIsSubtypeOf(NObject::type_of(), NObject::type_of(), ptr::null_mut()) },
        ResultCode::ArgumentNull,
    );
}

#[test]
fn test_guard_maps_errors_and_panics() {
    assert_eq!(guard("ok", || Ok(N_OK)), N_OK);
    assert_eq!(guard("informational", || Ok(7)), 7);

    let result = guard("io", || Err(std::io::Error::from(std::io::ErrorKind::NotFound).into()));
    assert_code(result, ResultCode::FileNotFound);

    let result = guard("layer", || Err(NError::external(ExternalLayer::Com, "E_FAIL")));
    assert_code(result, ResultCode::Com);

    let result = guard("panic", || -> ncore::CoreResult<i32> { panic!("boom") });
    assert_code(result, ResultCode::Cpp);
}

#[test]
fn test_tagged_value_across_boundary() {
    // A value travels as token plus raw slot and is rebuilt on the far side.
    let sent = TaggedValue::new::<NInt32>(-42).unwrap();
    let (token, slot) = (sent.type_token(), *sent.storage());

    let received = TaggedValue::from_parts(token, slot);
    assert_eq!(received.get::<NInt32>().unwrap(), -42);
    assert_eq!(
        received.get::<NUInt32>(),
        Err(NError::Code(ResultCode::InvalidCast))
    );
}

#[test]
fn test_aligned_storage_fits_every_builtin_primitive() {
    let mut size: NSizeType = 0;
    for token in ncore::types::builtin() {
        assert_eq!(unsafe { NTypeGetSize(token, &mut size) }, N_OK);
        assert!(size <= VALUE_STORAGE_SIZE, "{token} is {size} bytes");
    }
    assert_eq!(AlignedStorage::<VALUE_STORAGE_SIZE>::CAPACITY, 8);
}
