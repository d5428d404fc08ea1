// src/backend/asymmetric.rs
//! RSA path for `rsa*` cipher names
//!
//! Asymmetric mode is not streaming: the whole input is buffered and a
//! single public/private-key operation produces the whole output. RSA
//! operates on whole messages by construction, so this is a documented
//! limitation rather than something to engineer around.
//!
//! Key bytes are accepted as PEM (sniffed by the `-----BEGIN` armor) or
//! DER, trying PKCS#8/SPKI first and falling back to PKCS#1.

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, Pkcs1v15Encrypt, Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};

use crate::descriptor::Direction;
use crate::error::{CryptoError, Result};

/// Perform the single RSA operation selected by (direction, key kind).
///
/// | direction | key     | operation                        |
/// |-----------|---------|----------------------------------|
/// | Encrypt   | public  | PKCS#1 v1.5 encrypt              |
/// | Decrypt   | private | PKCS#1 v1.5 decrypt              |
/// | Encrypt   | private | sign (unprefixed EMSA-PKCS1-v1_5)|
/// | Decrypt   | public  | verify-recover                   |
pub(crate) fn transform(
    direction: Direction,
    public_key_supplied: bool,
    key: &[u8],
    input: &[u8],
) -> Result<Vec<u8>> {
    match (direction, public_key_supplied) {
        (Direction::Encrypt, true) => {
            let public = parse_public(key)?;
            let mut rng = rand::thread_rng();
            public
                .encrypt(&mut rng, Pkcs1v15Encrypt, input)
                .map_err(op_err)
        }
        (Direction::Decrypt, false) => {
            let private = parse_private(key)?;
            private.decrypt(Pkcs1v15Encrypt, input).map_err(op_err)
        }
        (Direction::Encrypt, false) => {
            let private = parse_private(key)?;
            private
                .sign(Pkcs1v15Sign::new_unprefixed(), input)
                .map_err(op_err)
        }
        (Direction::Decrypt, true) => {
            let public = parse_public(key)?;
            recover(&public, input)
        }
    }
}

/// Raw public-key operation on a signature, then strip the
/// EMSA-PKCS1-v1_5 block (`00 01 FF.. 00 | payload`) to recover the
/// signed bytes.
fn recover(public: &RsaPublicKey, signature: &[u8]) -> Result<Vec<u8>> {
    let m = rsa::hazmat::rsa_encrypt(public, &BigUint::from_bytes_be(signature)).map_err(op_err)?;
    let bytes = m.to_bytes_be();
    let k = public.size();
    if bytes.len() > k {
        return Err(CryptoError::Backend("signature longer than modulus".into()));
    }
    // Left-pad to the modulus width; BigUint drops leading zeros.
    let mut em = vec![0u8; k - bytes.len()];
    em.extend_from_slice(&bytes);

    if em.len() < 11 || em[0] != 0x00 || em[1] != 0x01 {
        return Err(CryptoError::Backend("invalid signature block".into()));
    }
    let mut idx = 2;
    while idx < em.len() && em[idx] == 0xff {
        idx += 1;
    }
    if idx < 10 || idx >= em.len() || em[idx] != 0x00 {
        return Err(CryptoError::Backend("invalid signature block".into()));
    }
    Ok(em[idx + 1..].to_vec())
}

fn parse_public(key: &[u8]) -> Result<RsaPublicKey> {
    if looks_like_pem(key) {
        let pem = pem_str(key)?;
        RsaPublicKey::from_public_key_pem(pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem).map_err(parse_err))
    } else {
        RsaPublicKey::from_public_key_der(key)
            .or_else(|_| RsaPublicKey::from_pkcs1_der(key).map_err(parse_err))
    }
}

fn parse_private(key: &[u8]) -> Result<RsaPrivateKey> {
    if looks_like_pem(key) {
        let pem = pem_str(key)?;
        RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem).map_err(parse_err))
    } else {
        RsaPrivateKey::from_pkcs8_der(key)
            .or_else(|_| RsaPrivateKey::from_pkcs1_der(key).map_err(parse_err))
    }
}

fn looks_like_pem(key: &[u8]) -> bool {
    key.starts_with(b"-----")
}

fn pem_str(key: &[u8]) -> Result<&str> {
    std::str::from_utf8(key).map_err(|_| parse_failure("PEM"))
}

fn parse_err(err: rsa::pkcs1::Error) -> CryptoError {
    CryptoError::InitFailed(err.to_string())
}

fn parse_failure(kind: &str) -> CryptoError {
    CryptoError::InitFailed(format!("cannot parse RSA {kind} key"))
}

fn op_err(err: rsa::Error) -> CryptoError {
    CryptoError::Backend(err.to_string())
}
