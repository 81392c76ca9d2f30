//! # C API
//!
//! C-compatible FFI functions for iOS and Android hosts.
//!
//! All functions follow the naming convention: `mutuals_<action>`

use std::ffi::CString;
use std::os::raw::c_char;

use super::dispatcher::dispatch;
use super::types::{cstr_to_string, into_c_string, FfiResult};

/// Call a core method by name with JSON arguments.
///
/// # Arguments
/// * `method` - Method name, e.g. `contacts_hash`
/// * `args` - JSON arguments (null means `{}`)
///
/// # Returns
/// FfiResult with JSON data on success. Free it with `mutuals_free_result`.
///
/// # Safety
/// `method` must be a valid null-terminated string; `args` must be null or a
/// valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn mutuals_call(method: *const c_char, args: *const c_char) -> FfiResult {
    let method = match cstr_to_string(method) {
        Some(m) => m,
        None => return FfiResult::err(1, "Invalid method name".to_string()),
    };
    let args = cstr_to_string(args).unwrap_or_else(|| "{}".to_string());

    FfiResult::from_dispatch(dispatch(&method, &args))
}

/// Get Mutuals Core version
///
/// Free the returned string with `mutuals_free_string`.
#[no_mangle]
pub extern "C" fn mutuals_version() -> *mut c_char {
    into_c_string(crate::version().to_string())
}

/// Free a C string allocated by Rust
///
/// # Safety
/// The pointer must have been allocated by Rust using CString::into_raw().
#[no_mangle]
pub unsafe extern "C" fn mutuals_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Free an FfiResult
///
/// # Safety
/// The FfiResult must have been created by Rust FFI functions.
#[no_mangle]
pub unsafe extern "C" fn mutuals_free_result(result: FfiResult) {
    if !result.error_message.is_null() {
        drop(CString::from_raw(result.error_message));
    }
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_roundtrip() {
        let method = CString::new("contacts_normalize").unwrap();
        let args = CString::new(r#"{"kind":"phone","value":"(555) 123-4567"}"#).unwrap();

        let result = unsafe { mutuals_call(method.as_ptr(), args.as_ptr()) };
        assert_eq!(result.success, 1);
        let data = unsafe { cstr_to_string(result.data) }.unwrap();
        let json: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(json["normalized"], "5551234567");
        unsafe { mutuals_free_result(result) };
    }

    #[test]
    fn test_call_null_method() {
        let result = unsafe { mutuals_call(std::ptr::null(), std::ptr::null()) };
        assert_eq!(result.success, 0);
        assert_eq!(result.error_code, 1);
        unsafe { mutuals_free_result(result) };
    }

    #[test]
    fn test_version() {
        let ptr = mutuals_version();
        let version = unsafe { cstr_to_string(ptr) }.unwrap();
        assert_eq!(version, crate::version());
        unsafe { mutuals_free_string(ptr) };
    }
}
