use std::{ffi::CStr, fmt::Display, ptr::NonNull};

use crate::{
    context::Context,
    error::Krb5Code,
    ffi::{krb5_free_principal, krb5_free_unparsed_name, krb5_principal_data, krb5_unparse_name},
};

/// A parsed principal.
///
/// Borrows the [`Context`] it was parsed with, so it can never outlive it;
/// drop order inside one scope releases the principal first.
pub struct Principal<'ctx> {
    raw: NonNull<krb5_principal_data>,
    context: &'ctx Context,
}
impl<'ctx> Principal<'ctx> {
    pub(crate) fn from_raw(raw: NonNull<krb5_principal_data>, context: &'ctx Context) -> Self {
        Self { raw, context }
    }
    pub(crate) fn as_ptr(&self) -> *mut krb5_principal_data {
        self.raw.as_ptr()
    }
}
impl Drop for Principal<'_> {
    fn drop(&mut self) {
        unsafe { krb5_free_principal(self.context.as_ptr(), self.raw.as_ptr()) };
    }
}
impl Display for Principal<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut raw_name = std::ptr::null_mut();
        let code = unsafe { krb5_unparse_name(self.context.as_ptr(), self.raw.as_ptr(), &mut raw_name) };
        if Krb5Code::new(code).is_some() || raw_name.is_null() {
            return Ok(());
        }
        let result = match unsafe { CStr::from_ptr(raw_name) }.to_str() {
            Ok(name) => write!(f, "{name}"),
            Err(_) => Ok(()),
        };
        unsafe { krb5_free_unparsed_name(self.context.as_ptr(), raw_name) };
        result
    }
}
