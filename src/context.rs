use std::{
    ffi::{CStr, CString},
    ptr::NonNull,
};

use libc::c_int;

use crate::{
    error::{Krb5Code, Krb5Error},
    ffi::{
        _krb5_context, krb5_aname_to_localname, krb5_clear_error_message, krb5_free_context,
        krb5_free_error_message, krb5_get_error_message, krb5_init_context, krb5_parse_name,
    },
    principal::Principal,
    Error,
};

/// Default capacity for the local-name output buffer, including the
/// terminating NUL the library writes.
pub const MAX_LOCALNAME: usize = 256;

/// An initialized `krb5_context`.
///
/// Owns the library's per-invocation configuration and runtime state.
/// Every principal parsed through it borrows it, so the context always
/// outlives its principals and is released last.
pub struct Context {
    raw: NonNull<_krb5_context>,
}
// Valid, because Context is the sole owner of the underlying memory.
// No Sync: libkrb5 contexts are not safe for unsynchronized shared use.
unsafe impl Send for Context {}
impl Context {
    pub fn new() -> Result<Self, Error> {
        let mut raw = std::ptr::null_mut();
        if let Some(code) = Krb5Code::new(unsafe { krb5_init_context(&mut raw) }) {
            return Err(Error::ContextInit(code));
        }
        let Some(raw) = NonNull::new(raw) else {
            return Err(Error::ContextInit(Krb5Code::NULL_HANDLE));
        };
        tracing::debug!("initialized krb5 context");
        Ok(Self { raw })
    }

    pub(crate) fn as_ptr(&self) -> *mut _krb5_context {
        self.raw.as_ptr()
    }

    /// Parse a textual `primary[/instance]@REALM` representation.
    pub fn parse_name(&self, name: &str) -> Result<Principal<'_>, Error> {
        let cname = CString::new(name)?;
        let mut raw = std::ptr::null_mut();
        if let Some(code) =
            Krb5Code::new(unsafe { krb5_parse_name(self.raw.as_ptr(), cname.as_ptr(), &mut raw) })
        {
            return Err(Error::Parse(self.library_error(code)));
        }
        let Some(raw) = NonNull::new(raw) else {
            return Err(Error::Parse(Krb5Error::new(Krb5Code::NULL_HANDLE)));
        };
        tracing::debug!(principal = name, "parsed principal");
        Ok(Principal::from_raw(raw, self))
    }

    /// Translate a parsed principal into a local username, with an explicit
    /// output capacity in bytes.
    ///
    /// The library's configured `auth_to_local` policy decides the result.
    /// A name that does not fit in `capacity` bytes is an error, never a
    /// truncated success.
    pub fn localname_of(&self, principal: &Principal<'_>, capacity: usize) -> Result<String, Error> {
        let mut lname = vec![0u8; capacity];
        let size = c_int::try_from(capacity).unwrap_or(c_int::MAX);
        if let Some(code) = Krb5Code::new(unsafe {
            krb5_aname_to_localname(self.raw.as_ptr(), principal.as_ptr(), size, lname.as_mut_ptr().cast())
        }) {
            return Err(Error::Mapping(self.library_error(code)));
        }
        // The library indicates the end of the written name with a NUL.
        let Some(len) = lname.iter().position(|&byte| byte == 0) else {
            return Err(Error::LocalnameTooLong { capacity });
        };
        lname.truncate(len);
        let lname = String::from_utf8(lname)?;
        tracing::debug!(localname = %lname, "translated principal to local name");
        Ok(lname)
    }

    /// Parse and translate in one step, with the default capacity.
    pub fn localname(&self, name: &str) -> Result<String, Error> {
        let principal = self.parse_name(name)?;
        self.localname_of(&principal, MAX_LOCALNAME)
    }

    fn error_message(&self, code: Krb5Code) -> Option<String> {
        let raw = unsafe { krb5_get_error_message(self.raw.as_ptr(), code.get()) };
        if raw.is_null() {
            return None;
        }
        let message = unsafe { CStr::from_ptr(raw) }
            .to_str()
            .ok()
            .map(str::to_owned);
        unsafe { krb5_clear_error_message(self.raw.as_ptr()) };
        unsafe { krb5_free_error_message(self.raw.as_ptr(), raw) };
        message
    }

    pub(crate) fn library_error(&self, code: Krb5Code) -> Krb5Error {
        Krb5Error::with_message(code, self.error_message(code))
    }
}
impl Drop for Context {
    fn drop(&mut self) {
        unsafe { krb5_free_context(self.raw.as_ptr()) };
    }
}
