//! # FFI Types
//!
//! C-compatible types for cross-platform FFI.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// FFI-safe result type
///
/// Used to return results across the FFI boundary.
#[repr(C)]
pub struct FfiResult {
    /// Success flag (1 = success, 0 = error)
    pub success: i32,
    /// Error code (0 if success)
    pub error_code: i32,
    /// Error message (null if success)
    pub error_message: *mut c_char,
    /// Result data (null if error)
    pub data: *mut c_char,
}

impl FfiResult {
    /// Create a successful result with data
    pub fn ok(data: String) -> Self {
        Self {
            success: 1,
            error_code: 0,
            error_message: std::ptr::null_mut(),
            data: into_c_string(data),
        }
    }

    /// Create an error result
    pub fn err(code: i32, message: String) -> Self {
        Self {
            success: 0,
            error_code: code,
            error_message: into_c_string(message),
            data: std::ptr::null_mut(),
        }
    }

    /// Create from a dispatcher result
    pub fn from_dispatch(result: super::DResult) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err((code, message)) => Self::err(code, message),
        }
    }
}

/// Hand a Rust string to C. Interior NULs are stripped.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    let bytes: Vec<u8> = s.into_bytes().into_iter().filter(|b| *b != 0).collect();
    CString::new(bytes).unwrap_or_default().into_raw()
}

/// Convert a C string to a Rust String
///
/// # Safety
/// The caller must ensure the pointer is valid and null-terminated.
pub unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffi_result_ok() {
        let result = FfiResult::ok("{\"count\":1}".to_string());
        assert_eq!(result.success, 1);
        assert!(result.error_message.is_null());
        let data = unsafe { cstr_to_string(result.data) }.unwrap();
        assert_eq!(data, "{\"count\":1}");
        unsafe { super::super::mutuals_free_result(result) };
    }

    #[test]
    fn test_ffi_result_err() {
        let result = FfiResult::err(100, "Permission denied".to_string());
        assert_eq!(result.success, 0);
        assert_eq!(result.error_code, 100);
        assert!(result.data.is_null());
        unsafe { super::super::mutuals_free_result(result) };
    }

    #[test]
    fn test_interior_nul_stripped() {
        let ptr = into_c_string("a\0b".to_string());
        let s = unsafe { cstr_to_string(ptr) }.unwrap();
        assert_eq!(s, "ab");
        unsafe { super::super::mutuals_free_string(ptr) };
    }

    #[test]
    fn test_null_cstr() {
        assert!(unsafe { cstr_to_string(std::ptr::null()) }.is_none());
    }
}
