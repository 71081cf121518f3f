//! Translate Kerberos principals into local usernames through libkrb5's
//! configured `auth_to_local` policy, and check the result against an
//! expected name.
//!
//! The `libkrb5` feature gates everything that links against the native
//! library; the check routine itself runs against any [`NameMapper`].

mod check;
pub use check::{check, CheckError, NameMapper, Step};
#[cfg(feature = "libkrb5")]
pub use check::Krb5Mapper;
#[cfg(feature = "libkrb5")]
mod context;
#[cfg(feature = "libkrb5")]
pub use context::{Context, MAX_LOCALNAME};
mod error;
pub use error::{Error, Krb5Code, Krb5Error};
#[cfg(feature = "libkrb5")]
pub mod ffi;
#[cfg(feature = "libkrb5")]
mod principal;
#[cfg(feature = "libkrb5")]
pub use principal::Principal;
