use std::fmt::Display;

use crate::Error;

/// The black box that turns a principal string into a local username.
///
/// The real implementation delegates to libkrb5's configured
/// `auth_to_local` policy; tests substitute an in-memory table.
pub trait NameMapper {
    fn localname(&self, principal: &str) -> Result<String, Error>;
}

/// The library call a failed check got stuck in, named the way the
/// diagnostics report it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    InitContext,
    ParseName,
    AnameToLocalname,
}
impl Step {
    pub fn library_call(self) -> &'static str {
        match self {
            Self::InitContext => "krb5_init_context",
            Self::ParseName => "krb5_parse_name",
            Self::AnameToLocalname => "krb5_aname_to_localname",
        }
    }
}

#[derive(Debug)]
pub enum CheckError {
    /// Acquiring the mapper or running the mapping failed.
    Map(Error),
    /// Mapping succeeded but produced the wrong name. An assertion
    /// failure, not a library fault.
    Mismatch { got: String, expected: String },
}
impl CheckError {
    /// The step the check failed in, for everything short of the final
    /// comparison.
    pub fn step(&self) -> Option<Step> {
        match self {
            Self::Map(err) => Some(map_step(err)),
            Self::Mismatch { .. } => None,
        }
    }
}

fn map_step(err: &Error) -> Step {
    match err {
        Error::ContextInit(_) => Step::InitContext,
        Error::Parse(_) | Error::Nul(_) => Step::ParseName,
        Error::Mapping(_) | Error::LocalnameTooLong { .. } | Error::Utf8(_) => Step::AnameToLocalname,
    }
}
impl std::error::Error for CheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Map(err) => Some(err),
            Self::Mismatch { .. } => None,
        }
    }
}
impl Display for CheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Map(err) => {
                // One line: the step that failed, then the library's
                // numeric code when it has one.
                let step = map_step(err).library_call();
                match err.code() {
                    Some(code) => write!(f, "error in {step}: {code}"),
                    None => write!(f, "error in {step}: {err}"),
                }
            }
            Self::Mismatch { got, expected } => {
                write!(f, "error, got {got}, expected {expected}")
            }
        }
    }
}

/// Map `principal` through `mapper` and require the result to equal
/// `expected`, byte for byte.
///
/// All-or-nothing per invocation: no retries, and the first failing step
/// decides the outcome.
pub fn check<M: NameMapper + ?Sized>(mapper: &M, principal: &str, expected: &str) -> Result<(), CheckError> {
    tracing::debug!(principal, expected, "running local-name check");
    let got = mapper.localname(principal).map_err(CheckError::Map)?;
    if got != expected {
        return Err(CheckError::Mismatch {
            got,
            expected: expected.to_owned(),
        });
    }
    Ok(())
}

/// The real mapper: an owned [`Context`](crate::Context) whose policy is
/// whatever the environment's Kerberos configuration says.
#[cfg(feature = "libkrb5")]
pub struct Krb5Mapper {
    context: crate::Context,
}
#[cfg(feature = "libkrb5")]
impl Krb5Mapper {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            context: crate::Context::new()?,
        })
    }
}
#[cfg(feature = "libkrb5")]
impl NameMapper for Krb5Mapper {
    fn localname(&self, principal: &str) -> Result<String, Error> {
        self.context.localname(principal)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::{check, CheckError, NameMapper, Step};
    use crate::error::{Error, Krb5Code, Krb5Error};

    // Arbitrary nonzero stand-ins for the library's opaque codes.
    const PARSE_CODE: i32 = -1765328253;
    const NO_TRANSLATION_CODE: i32 = -1765328227;

    struct TableMapper {
        rules: HashMap<String, String>,
    }
    impl TableMapper {
        fn with_rule(principal: &str, localname: &str) -> Self {
            let mut rules = HashMap::new();
            rules.insert(principal.to_owned(), localname.to_owned());
            Self { rules }
        }
    }
    impl NameMapper for TableMapper {
        fn localname(&self, principal: &str) -> Result<String, Error> {
            if principal.is_empty() || !principal.contains('@') {
                return Err(Error::Parse(Krb5Error::new(
                    Krb5Code::new(PARSE_CODE).unwrap(),
                )));
            }
            self.rules.get(principal).cloned().ok_or_else(|| {
                Error::Mapping(Krb5Error::new(Krb5Code::new(NO_TRANSLATION_CODE).unwrap()))
            })
        }
    }

    struct BoundedMapper {
        capacity: usize,
    }
    impl NameMapper for BoundedMapper {
        fn localname(&self, principal: &str) -> Result<String, Error> {
            let primary = principal.split('@').next().unwrap_or_default();
            if primary.len() >= self.capacity {
                return Err(Error::LocalnameTooLong {
                    capacity: self.capacity,
                });
            }
            Ok(primary.to_owned())
        }
    }

    #[test]
    fn matching_mapping_passes() {
        let mapper = TableMapper::with_rule("user@EXAMPLE.COM", "user");
        assert!(check(&mapper, "user@EXAMPLE.COM", "user").is_ok());
    }

    #[test]
    fn same_inputs_same_outcome() {
        let mapper = TableMapper::with_rule("user@EXAMPLE.COM", "user");
        assert!(check(&mapper, "user@EXAMPLE.COM", "user").is_ok());
        assert!(check(&mapper, "user@EXAMPLE.COM", "user").is_ok());
        assert!(check(&mapper, "user@EXAMPLE.COM", "admin").is_err());
        assert!(check(&mapper, "user@EXAMPLE.COM", "admin").is_err());
    }

    #[test]
    fn empty_principal_fails_in_parse_step() {
        let mapper = TableMapper::with_rule("user@EXAMPLE.COM", "user");
        let err = check(&mapper, "", "user").unwrap_err();
        assert_eq!(err.step(), Some(Step::ParseName));
        assert_eq!(
            err.to_string(),
            format!("error in krb5_parse_name: {PARSE_CODE}")
        );
    }

    #[test]
    fn unknown_principal_fails_in_mapping_step() {
        let mapper = TableMapper::with_rule("user@EXAMPLE.COM", "user");
        let err = check(&mapper, "user@OTHER.ORG", "user").unwrap_err();
        assert_eq!(err.step(), Some(Step::AnameToLocalname));
        assert!(matches!(err, CheckError::Map(Error::Mapping(_))));
    }

    #[test]
    fn mismatch_reports_both_names() {
        let mapper = TableMapper::with_rule("user@EXAMPLE.COM", "user");
        let err = check(&mapper, "user@EXAMPLE.COM", "admin").unwrap_err();
        assert_eq!(err.step(), None);
        assert_eq!(err.to_string(), "error, got user, expected admin");
    }

    #[test]
    fn overlong_localname_is_an_error_not_a_truncation() {
        let mapper = BoundedMapper { capacity: 4 };
        let err = check(&mapper, "someone@EXAMPLE.COM", "some").unwrap_err();
        assert_eq!(err.step(), Some(Step::AnameToLocalname));
        assert!(matches!(
            err,
            CheckError::Map(Error::LocalnameTooLong { capacity: 4 })
        ));
    }

    proptest! {
        // The check passes exactly when the configured mapping equals the
        // expected name.
        #[test]
        fn passes_iff_mapping_matches(primary in "[a-z]{1,12}", expected in "[a-z]{1,12}") {
            let principal = format!("{primary}@EXAMPLE.COM");
            let mapper = TableMapper::with_rule(&principal, &primary);
            prop_assert_eq!(check(&mapper, &principal, &expected).is_ok(), primary == expected);
        }
    }
}
