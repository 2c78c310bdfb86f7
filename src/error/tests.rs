use super::*;

#[test]
fn test_display_formatting() {
    let err = Error::param("scalar", "out of range");
    assert_eq!(err.to_string(), "Invalid parameter 'scalar': out of range");

    let err = Error::Length {
        context: "public key x",
        expected: 32,
        actual: 31,
    };
    assert_eq!(
        err.to_string(),
        "Invalid length for public key x: expected 32, got 31"
    );

    let err = Error::InvalidPoint {
        context: "key agreement",
        reason: "coordinates do not satisfy the curve equation",
    };
    assert!(err.to_string().contains("curve equation"));

    let err = Error::IdentityResult {
        context: "shared secret derivation",
    };
    assert!(err.to_string().contains("point at infinity"));

    let err = Error::Exhausted { context: "drbg" };
    assert!(err.to_string().contains("reseed interval"));
}

#[test]
fn test_validate_length() {
    assert!(validate::length("buf", 32, 32).is_ok());
    let err = validate::length("buf", 16, 32).unwrap_err();
    assert_eq!(
        err,
        Error::Length {
            context: "buf",
            expected: 32,
            actual: 16
        }
    );
}

#[test]
fn test_validate_max_length() {
    assert!(validate::max_length("request", 1024, 1024).is_ok());
    assert!(validate::max_length("request", 1025, 1024).is_err());
}
