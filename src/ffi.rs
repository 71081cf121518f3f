//! Hand-declared bindings for the slice of libkrb5 this crate uses.
//!
//! Both handle types are opaque in `krb5.h`; `krb5_principal` is a typedef
//! for `krb5_principal_data *`.
#![allow(non_camel_case_types)]

use libc::{c_char, c_int};

pub type krb5_error_code = c_int;

#[repr(C)]
pub struct _krb5_context {
    _unused: [u8; 0],
}

#[repr(C)]
pub struct krb5_principal_data {
    _unused: [u8; 0],
}

#[link(name = "krb5")]
extern "C" {
    pub fn krb5_init_context(context: *mut *mut _krb5_context) -> krb5_error_code;
    pub fn krb5_free_context(context: *mut _krb5_context);

    pub fn krb5_parse_name(
        context: *mut _krb5_context,
        name: *const c_char,
        principal_out: *mut *mut krb5_principal_data,
    ) -> krb5_error_code;
    pub fn krb5_free_principal(context: *mut _krb5_context, principal: *mut krb5_principal_data);
    pub fn krb5_unparse_name(
        context: *mut _krb5_context,
        principal: *mut krb5_principal_data,
        name_out: *mut *mut c_char,
    ) -> krb5_error_code;
    pub fn krb5_free_unparsed_name(context: *mut _krb5_context, name: *mut c_char);

    pub fn krb5_aname_to_localname(
        context: *mut _krb5_context,
        aname: *mut krb5_principal_data,
        lnsize_in: c_int,
        lname_out: *mut c_char,
    ) -> krb5_error_code;

    pub fn krb5_get_error_message(context: *mut _krb5_context, code: krb5_error_code) -> *const c_char;
    pub fn krb5_clear_error_message(context: *mut _krb5_context);
    pub fn krb5_free_error_message(context: *mut _krb5_context, message: *const c_char);
}
