use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Default)]
struct SignatureHeader {
    timestamp: Option<String>,
    test: Option<String>,
    live: Option<String>,
}

impl SignatureHeader {
    // Header format: t=<unix ts>,te=<test hmac>,li=<live hmac>
    fn parse(header: &str) -> Self {
        let mut parsed = Self::default();
        for part in header.split(',') {
            let mut kv = part.trim().splitn(2, '=');
            match (kv.next(), kv.next()) {
                (Some("t"), Some(v)) => parsed.timestamp = Some(v.to_string()),
                (Some("te"), Some(v)) => parsed.test = Some(v.to_string()),
                (Some("li"), Some(v)) => parsed.live = Some(v.to_string()),
                _ => {}
            }
        }
        parsed
    }

    fn preferred(&self) -> Option<&str> {
        self.live.as_deref().or(self.test.as_deref())
    }
}

/// Authenticity verdict for a webhook delivery: HMAC-SHA256 over
/// `"{timestamp}.{raw body}"` keyed with the shared secret, compared against
/// the preferred header candidate in constant time. Any missing or malformed
/// field rejects.
pub fn verify_signature(raw_body: &[u8], signature_header: &str, secret: &str) -> bool {
    let parsed = SignatureHeader::parse(signature_header);

    let Some(ref timestamp) = parsed.timestamp else {
        return false;
    };
    if timestamp.is_empty() || !timestamp.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let Some(candidate) = parsed.preferred() else {
        return false;
    };
    let Ok(candidate) = hex::decode(candidate) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(raw_body);

    // verify_slice is constant-time
    mac.verify_slice(&candidate).is_ok()
}
