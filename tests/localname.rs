#![cfg(feature = "libkrb5")]

use krb5_localname::{check, CheckError, Context, Error, Krb5Mapper, Step};

// KRB5_CONFIG is process-wide, so everything that depends on the
// checked-in realm configuration runs in this one test body.
#[test]
fn main() {
    std::env::set_var(
        "KRB5_CONFIG",
        concat!(env!("CARGO_MANIFEST_DIR"), "/demos/krb5.conf"),
    );

    let ctx = Context::new().unwrap();

    // The default-realm rule strips the realm from a single-component
    // principal.
    assert_eq!(ctx.localname("user@EXAMPLE.COM").unwrap(), "user");

    // No rule covers a foreign realm.
    match ctx.localname("user@OTHER.ORG") {
        Err(Error::Mapping(err)) => {
            eprintln!("no translation: {err}");
        }
        other => panic!("expected a mapping failure, got {other:?}"),
    }

    // A second separator is malformed and never reaches the mapping step.
    assert!(matches!(
        ctx.localname("user@EXAMPLE.COM@EXAMPLE.COM"),
        Err(Error::Parse(_))
    ));

    // A parsed principal prints back in its textual form.
    let principal = ctx.parse_name("user@EXAMPLE.COM").unwrap();
    assert_eq!(principal.to_string(), "user@EXAMPLE.COM");

    // A too-small output buffer is an error, never a truncated name.
    assert!(ctx.localname_of(&principal, 2).is_err());

    // The same scenarios through the injected-mapper surface.
    let mapper = Krb5Mapper::new().unwrap();
    assert!(check(&mapper, "user@EXAMPLE.COM", "user").is_ok());
    let mismatch = check(&mapper, "user@EXAMPLE.COM", "admin").unwrap_err();
    assert_eq!(mismatch.to_string(), "error, got user, expected admin");
    let parse = check(&mapper, "user@EXAMPLE.COM@EXAMPLE.COM", "user").unwrap_err();
    assert_eq!(parse.step(), Some(Step::ParseName));
    assert!(matches!(parse, CheckError::Map(Error::Parse(_))));
}
