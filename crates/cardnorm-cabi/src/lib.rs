//! C ABI bindings for the cardnorm title normalizer.
//!
//! All functions use C-compatible string types:
//! - Input: `*const c_char` (null-terminated UTF-8)
//! - Output: `*mut c_char` holding a JSON envelope (caller must free with
//!   `cardnorm_free_string`)
//!
//! Built as a cdylib for ctypes (Python), koffi/ffi-napi (Node), P/Invoke, etc.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use cardnorm_core::{
    card_key_to_json, normalize_many_to_json, normalize_to_json, normalize_with_rules_to_json,
};

/// Normalize one title with the built-in rule tables.
///
/// # Safety
/// - `title` must be null or a valid null-terminated string.
/// - The returned pointer must be freed with `cardnorm_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cardnorm_normalize(title: *const c_char) -> *mut c_char {
    let title = match unsafe { read_arg(title, "title") } {
        Ok(s) => s,
        Err(e) => return e,
    };
    to_c_string(&normalize_to_json(title))
}

/// Normalize a JSON array of titles with the built-in rule tables.
///
/// # Safety
/// - `titles_json` must be null or a valid null-terminated string.
/// - The returned pointer must be freed with `cardnorm_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cardnorm_normalize_many(titles_json: *const c_char) -> *mut c_char {
    let titles_json = match unsafe { read_arg(titles_json, "titles_json") } {
        Ok(s) => s,
        Err(e) => return e,
    };
    to_c_string(&normalize_many_to_json(titles_json))
}

/// Normalize one title with rule tables supplied as `{ "sets", "patterns" }` JSON.
///
/// # Safety
/// - `title` and `rules_json` must be null or valid null-terminated strings.
/// - The returned pointer must be freed with `cardnorm_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cardnorm_normalize_with_rules(
    title: *const c_char,
    rules_json: *const c_char,
) -> *mut c_char {
    let title = match unsafe { read_arg(title, "title") } {
        Ok(s) => s,
        Err(e) => return e,
    };
    let rules_json = match unsafe { read_arg(rules_json, "rules_json") } {
        Ok(s) => s,
        Err(e) => return e,
    };
    to_c_string(&normalize_with_rules_to_json(title, rules_json))
}

/// Compute a card key from `{ "set_code", "number", "variant"?, "grade"? }`.
///
/// # Safety
/// - `components_json` must be null or a valid null-terminated string.
/// - The returned pointer must be freed with `cardnorm_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cardnorm_card_key(components_json: *const c_char) -> *mut c_char {
    let components_json = match unsafe { read_arg(components_json, "components_json") } {
        Ok(s) => s,
        Err(e) => return e,
    };
    to_c_string(&card_key_to_json(components_json))
}

/// Free a string previously returned by one of the `cardnorm_*` functions.
///
/// # Safety
/// - `ptr` must be a pointer previously returned by this library, or null
///   (in which case this is a no-op).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cardnorm_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

/// Borrow a C string argument as UTF-8, or build the error envelope to return.
///
/// # Safety
/// `ptr` must be null or point to a valid null-terminated string that outlives
/// the returned borrow.
unsafe fn read_arg<'a>(ptr: *const c_char, name: &str) -> Result<&'a str, *mut c_char> {
    if ptr.is_null() {
        return Err(error_envelope(&format!("Null pointer for {name}")));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| error_envelope(&format!("Invalid UTF-8 in {name}")))
}

fn error_envelope(message: &str) -> *mut c_char {
    to_c_string(&serde_json::json!({ "success": false, "error": message }).to_string())
}

fn to_c_string(s: &str) -> *mut c_char {
    CString::new(s)
        .unwrap_or_else(|_| CString::default())
        .into_raw()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(f: impl FnOnce() -> *mut c_char) -> serde_json::Value {
        let ptr = f();
        let json = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
        unsafe { cardnorm_free_string(ptr) };
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn normalize_round_trip() {
        let title = CString::new("Mew Promo #8 PSA 10").unwrap();
        let v = call(|| unsafe { cardnorm_normalize(title.as_ptr()) });
        assert_eq!(v["success"], true);
        assert_eq!(v["data"]["card_key"], "basep-008-base-psa10");
    }

    #[test]
    fn null_argument_is_reported() {
        let v = call(|| unsafe { cardnorm_normalize(std::ptr::null()) });
        assert_eq!(v["success"], false);
        assert_eq!(v["error"], "Null pointer for title");
    }

    #[test]
    fn invalid_utf8_is_reported() {
        let bytes = CString::new(vec![0x66u8, 0xff, 0x6f]).unwrap();
        let v = call(|| unsafe { cardnorm_card_key(bytes.as_ptr()) });
        assert_eq!(v["error"], "Invalid UTF-8 in components_json");
    }

    #[test]
    fn free_null_is_noop() {
        unsafe { cardnorm_free_string(std::ptr::null_mut()) };
    }
}
