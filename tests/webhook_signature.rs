use hmac::{Hmac, Mac};
use pos_payments::webhook::signature::verify_signature;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SECRET: &str = "whsk_test_secret";
const BODY: &[u8] =
    br#"{"data":{"attributes":{"type":"payment.paid","data":{"id":"pay_1"}}}}"#;

fn sign(secret: &str, timestamp: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

fn flip_last_hex_char(sig: &str) -> String {
    let mut chars: Vec<char> = sig.chars().collect();
    let last = chars.last_mut().unwrap();
    *last = if *last == '0' { '1' } else { '0' };
    chars.into_iter().collect()
}

#[test]
fn accepts_valid_live_signature() {
    let header = format!("t=1700000000,li={}", sign(SECRET, "1700000000", BODY));
    assert!(verify_signature(BODY, &header, SECRET));
}

#[test]
fn accepts_test_signature_when_no_live_present() {
    let header = format!("t=1700000000,te={}", sign(SECRET, "1700000000", BODY));
    assert!(verify_signature(BODY, &header, SECRET));
}

#[test]
fn prefers_live_candidate_over_test() {
    let valid = sign(SECRET, "1700000000", BODY);
    let bogus = flip_last_hex_char(&valid);

    let header = format!("t=1700000000,te={},li={}", bogus, valid);
    assert!(verify_signature(BODY, &header, SECRET));

    let header = format!("t=1700000000,te={},li={}", valid, bogus);
    assert!(!verify_signature(BODY, &header, SECRET));
}

#[test]
fn rejects_tampered_body() {
    let header = format!("t=1700000000,li={}", sign(SECRET, "1700000000", BODY));
    let mut tampered = BODY.to_vec();
    tampered[0] ^= 0x01;
    assert!(!verify_signature(&tampered, &header, SECRET));
}

#[test]
fn rejects_tampered_signature() {
    let sig = flip_last_hex_char(&sign(SECRET, "1700000000", BODY));
    let header = format!("t=1700000000,li={}", sig);
    assert!(!verify_signature(BODY, &header, SECRET));
}

#[test]
fn rejects_wrong_secret() {
    let header = format!("t=1700000000,li={}", sign("other_secret", "1700000000", BODY));
    assert!(!verify_signature(BODY, &header, SECRET));
}

#[test]
fn rejects_timestamp_mismatch() {
    // signature computed for a different timestamp than the header claims
    let header = format!("t=1700000001,li={}", sign(SECRET, "1700000000", BODY));
    assert!(!verify_signature(BODY, &header, SECRET));
}

#[test]
fn rejects_missing_timestamp() {
    let header = format!("li={}", sign(SECRET, "1700000000", BODY));
    assert!(!verify_signature(BODY, &header, SECRET));
}

#[test]
fn rejects_non_numeric_timestamp() {
    let header = format!("t=yesterday,li={}", sign(SECRET, "1700000000", BODY));
    assert!(!verify_signature(BODY, &header, SECRET));
}

#[test]
fn rejects_missing_candidates() {
    assert!(!verify_signature(BODY, "t=1700000000", SECRET));
}

#[test]
fn rejects_non_hex_candidate() {
    assert!(!verify_signature(BODY, "t=1700000000,li=not-hex!", SECRET));
}

#[test]
fn rejects_empty_header() {
    assert!(!verify_signature(BODY, "", SECRET));
}
