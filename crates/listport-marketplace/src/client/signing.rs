//! AWS Signature Version 4 for lookup-API requests.
//!
//! Only what the lookup API needs: `POST`, empty query string, a fixed set
//! of signed headers, JSON payload.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

pub(super) const SERVICE: &str = "ProductAdvertisingAPI";
pub(super) const CONTENT_ENCODING: &str = "amz-1.0";
pub(super) const CONTENT_TYPE: &str = "application/json; charset=utf-8";
const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SIGNED_HEADERS: &str = "content-encoding;content-type;host;x-amz-date;x-amz-target";

/// Everything that goes into one signature.
pub(super) struct SigningInput<'a> {
    pub access_key: &'a str,
    pub secret_key: &'a str,
    pub region: &'a str,
    /// `Host` header value exactly as sent (`host` or `host:port`).
    pub host: &'a str,
    pub path: &'a str,
    pub target: &'a str,
    pub payload: &'a str,
}

/// Headers that carry the signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Signature {
    pub amz_date: String,
    pub authorization: String,
}

pub(super) fn sign(input: &SigningInput<'_>, now: DateTime<Utc>) -> Signature {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date_stamp = now.format("%Y%m%d").to_string();
    let scope = format!("{date_stamp}/{}/{SERVICE}/aws4_request", input.region);

    let canonical_request = format!(
        "POST\n{path}\n\ncontent-encoding:{CONTENT_ENCODING}\ncontent-type:{CONTENT_TYPE}\nhost:{host}\nx-amz-date:{amz_date}\nx-amz-target:{target}\n\n{SIGNED_HEADERS}\n{payload_hash}",
        path = input.path,
        host = input.host,
        target = input.target,
        payload_hash = sha256_hex(input.payload.as_bytes()),
    );

    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
        sha256_hex(canonical_request.as_bytes())
    );

    let k_date = hmac_sha256(
        format!("AWS4{}", input.secret_key).as_bytes(),
        date_stamp.as_bytes(),
    );
    let k_region = hmac_sha256(&k_date, input.region.as_bytes());
    let k_service = hmac_sha256(&k_region, SERVICE.as_bytes());
    let k_signing = hmac_sha256(&k_service, b"aws4_request");
    let signature = hex::encode(hmac_sha256(&k_signing, string_to_sign.as_bytes()));

    let authorization = format!(
        "{ALGORITHM} Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
        input.access_key
    );

    Signature {
        amz_date,
        authorization,
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn input(payload: &str) -> SigningInput<'_> {
        SigningInput {
            access_key: "AKIDEXAMPLE",
            secret_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            region: "us-east-1",
            host: "webservices.amazon.com",
            path: "/paapi5/getitems",
            target: "com.amazon.paapi5.v1.ProductAdvertisingAPIv1.GetItems",
            payload,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn amz_date_is_basic_iso8601() {
        let sig = sign(&input("{}"), fixed_now());
        assert_eq!(sig.amz_date, "20240102T030405Z");
    }

    #[test]
    fn authorization_header_layout() {
        let sig = sign(&input("{}"), fixed_now());
        assert!(
            sig.authorization.starts_with(
                "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20240102/us-east-1/ProductAdvertisingAPI/aws4_request, SignedHeaders=content-encoding;content-type;host;x-amz-date;x-amz-target, Signature="
            ),
            "unexpected header: {}",
            sig.authorization
        );
        let signature = sig.authorization.rsplit('=').next().unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn signature_matches_reference_value() {
        let sig = sign(&input(r#"{"ItemIds":["B09BWFX1L6"]}"#), fixed_now());
        assert_eq!(
            sig.authorization.rsplit('=').next().unwrap(),
            REFERENCE_SIGNATURE
        );
    }

    #[test]
    fn signature_depends_on_payload() {
        let a = sign(&input(r#"{"ItemIds":["B09BWFX1L6"]}"#), fixed_now());
        let b = sign(&input(r#"{"ItemIds":["B000000000"]}"#), fixed_now());
        assert_ne!(a.authorization, b.authorization);
    }

    const REFERENCE_SIGNATURE: &str = "f2286e40741b8a38993f3d46767c9404ea52adff30a5b951833e5cbdeb334d85";
}
