use std::{ffi::NulError, fmt::Display, num::NonZero, string::FromUtf8Error};

/// A raw `krb5_error_code` as returned by the library.
///
/// Zero means success in the C API and can never be stored here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Krb5Code(NonZero<i32>);
impl Krb5Code {
    pub fn new(val: i32) -> Option<Self> {
        NonZero::new(val).map(Self)
    }
    pub fn get(self) -> i32 {
        self.0.get()
    }
    // Reported when a call claims success but hands back a null handle.
    #[cfg(feature = "libkrb5")]
    pub(crate) const NULL_HANDLE: Self = Self(match NonZero::new(-1) {
        Some(code) => code,
        None => unreachable!(),
    });
}
impl Display for Krb5Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A library failure: the numeric code, plus the message text the library
/// associates with it when a context was available to ask.
#[derive(Clone, Debug)]
pub struct Krb5Error {
    code: Krb5Code,
    message: Option<String>,
}
impl Krb5Error {
    pub fn new(code: Krb5Code) -> Self {
        Self { code, message: None }
    }
    #[cfg(feature = "libkrb5")]
    pub(crate) fn with_message(code: Krb5Code, message: Option<String>) -> Self {
        Self { code, message }
    }
    pub fn code(&self) -> Krb5Code {
        self.code
    }
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
impl std::error::Error for Krb5Error {}
impl Display for Krb5Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{message} ({})", self.code),
            None => write!(f, "Kerberos error {}", self.code),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    /// `krb5_init_context` failed. There is no context to ask for message
    /// text, so only the code is known.
    ContextInit(Krb5Code),
    /// The library rejected the principal string.
    Parse(Krb5Error),
    /// The library's mapping policy rejected or could not resolve the
    /// principal.
    Mapping(Krb5Error),
    /// The mapped name did not fit the bounded output buffer.
    LocalnameTooLong { capacity: usize },
    /// The principal string contains an interior NUL and cannot cross the
    /// C boundary.
    Nul(NulError),
    /// The mapped name is not valid UTF-8.
    Utf8(FromUtf8Error),
}
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ContextInit(_) | Self::LocalnameTooLong { .. } => None,
            Self::Parse(err) | Self::Mapping(err) => Some(err),
            Self::Nul(err) => Some(err),
            Self::Utf8(err) => Some(err),
        }
    }
}
impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContextInit(code) => write!(f, "could not initialize context: {code}"),
            Self::Parse(err) => write!(f, "could not parse principal: {err}"),
            Self::Mapping(err) => write!(f, "could not map principal to a local name: {err}"),
            Self::LocalnameTooLong { capacity } => {
                write!(f, "mapped local name does not fit in {capacity} bytes")
            }
            Self::Nul(err) => err.fmt(f),
            Self::Utf8(err) => err.fmt(f),
        }
    }
}
impl Error {
    /// The library's numeric code, for the failure kinds that carry one.
    pub fn code(&self) -> Option<Krb5Code> {
        match self {
            Self::ContextInit(code) => Some(*code),
            Self::Parse(err) | Self::Mapping(err) => Some(err.code()),
            Self::LocalnameTooLong { .. } | Self::Nul(_) | Self::Utf8(_) => None,
        }
    }
}
impl From<NulError> for Error {
    fn from(value: NulError) -> Self {
        Self::Nul(value)
    }
}
impl From<FromUtf8Error> for Error {
    fn from(value: FromUtf8Error) -> Self {
        Self::Utf8(value)
    }
}
