// tests/engine_tests.rs
#![cfg(feature = "rustcrypto")]

use std::io::{self, Cursor, Read, Write};

use cryptic::{
    decrypt, default_registry, encrypt, transform, ByteSink, CipherRequest, CryptoError, Direction,
};

fn init_logging() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Every built-in cipher with a matching (key, iv) pair.
fn all_ciphers() -> Vec<(&'static str, Vec<u8>, Option<Vec<u8>>)> {
    vec![
        ("aes128", vec![1u8; 16], Some(vec![2u8; 16])),
        ("aes-128-cbc", vec![1u8; 16], Some(vec![2u8; 16])),
        ("aes192", vec![1u8; 24], Some(vec![2u8; 16])),
        ("aes256", vec![1u8; 32], Some(vec![2u8; 16])),
        ("aes-128-ecb", vec![1u8; 16], None),
        ("aes-192-ecb", vec![1u8; 24], None),
        ("aes-256-ecb", vec![1u8; 32], None),
        ("aes-128-ctr", vec![1u8; 16], Some(vec![2u8; 16])),
        ("aes-192-ctr", vec![1u8; 24], Some(vec![2u8; 16])),
        ("aes-256-ctr", vec![1u8; 32], Some(vec![2u8; 16])),
        ("des-cbc", vec![1u8; 8], Some(vec![2u8; 8])),
        ("des-ede3-cbc", vec![1u8; 24], Some(vec![2u8; 8])),
        ("3des", vec![1u8; 24], Some(vec![2u8; 8])),
    ]
}

#[test]
fn test_roundtrip_all_ciphers_all_lengths() {
    init_logging();
    // Lengths straddle block boundaries and span multiple chunks.
    let lengths = [0usize, 1, 7, 8, 15, 16, 17, 64, 1023, 1024, 1025, 5000];
    for (name, key, iv) in all_ciphers() {
        for &len in &lengths {
            let message: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            let ct = encrypt(name, &key, iv.as_deref(), &message)
                .unwrap_or_else(|e| panic!("{name} encrypt len {len}: {e}"));
            let pt = decrypt(name, &key, iv.as_deref(), &ct)
                .unwrap_or_else(|e| panic!("{name} decrypt len {len}: {e}"));
            assert_eq!(pt, message, "{name} round trip at length {len}");
        }
    }
}

#[test]
fn test_hello_world_aes128_scenario() {
    let key = [0u8; 16];
    let iv = [0u8; 16];
    let ct = encrypt("AES128", &key, Some(&iv), b"hello world").unwrap();
    assert!(!ct.is_empty());
    assert_eq!(ct.len() % 16, 0);
    let pt = decrypt("AES128", &key, Some(&iv), &ct).unwrap();
    assert_eq!(pt, b"hello world");
}

#[test]
fn test_fips197_ecb_known_answer() {
    // FIPS-197 appendix C.1: the first ciphertext block is the raw AES
    // permutation; the second is the PKCS#7 padding block.
    let key = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
    let pt = hex::decode("00112233445566778899aabbccddeeff").unwrap();
    let ct = encrypt("aes-128-ecb", &key, None, &pt).unwrap();
    assert_eq!(ct.len(), 32);
    assert_eq!(
        hex::encode(&ct[..16]),
        "69c4e0d86a7b0430d8cdb78070b4c55a"
    );
}

#[test]
fn test_cipher_name_is_case_insensitive() {
    let key = [3u8; 16];
    let iv = [4u8; 16];
    let lower = encrypt("aes128", &key, Some(&iv), b"payload").unwrap();
    let upper = encrypt("AES128", &key, Some(&iv), b"payload").unwrap();
    let mixed = encrypt("Aes-128-Cbc", &key, Some(&iv), b"payload").unwrap();
    assert_eq!(lower, upper);
    assert_eq!(lower, mixed);
}

#[test]
fn test_unknown_cipher() {
    let err = encrypt("rot13", &[0u8; 16], None, b"x").unwrap_err();
    assert!(matches!(err, CryptoError::UnknownCipher(_)));
}

#[test]
fn test_key_length_bounds() {
    let iv = [0u8; 16];
    let short = encrypt("aes128", &[0u8; 15], Some(&iv), b"x").unwrap_err();
    assert!(matches!(short, CryptoError::BadKeyLength { got: 15, .. }));
    let long = encrypt("aes128", &[0u8; 17], Some(&iv), b"x").unwrap_err();
    assert!(matches!(long, CryptoError::BadKeyLength { got: 17, .. }));
}

#[test]
fn test_iv_length_mismatch() {
    let err = encrypt("aes128", &[0u8; 16], Some(&[0u8; 12]), b"x").unwrap_err();
    assert!(matches!(
        err,
        CryptoError::BadIvLength {
            got: 12,
            expected: 16,
            ..
        }
    ));
    // The IV is checked before the key.
    let err = encrypt("aes128", &[0u8; 3], Some(&[0u8; 12]), b"x").unwrap_err();
    assert!(matches!(err, CryptoError::BadIvLength { .. }));
}

#[test]
fn test_zero_iv_cipher_accepts_absent_or_any_iv() {
    let key = [5u8; 16];
    let none = encrypt("aes-128-ecb", &key, None, b"msg").unwrap();
    let empty = encrypt("aes-128-ecb", &key, Some(&[]), b"msg").unwrap();
    let ignored = encrypt("aes-128-ecb", &key, Some(&[9u8; 16]), b"msg").unwrap();
    assert_eq!(none, empty);
    assert_eq!(none, ignored);
}

#[test]
fn test_empty_input_produces_padding_block() {
    let key = [0u8; 16];
    let iv = [0u8; 16];
    let ct = encrypt("aes128", &key, Some(&iv), b"").unwrap();
    assert_eq!(ct.len(), 16);
    assert_eq!(decrypt("aes128", &key, Some(&iv), &ct).unwrap(), b"");
    // CTR has no padding, so empty stays empty.
    let ct = encrypt("aes-128-ctr", &key, Some(&iv), b"").unwrap();
    assert!(ct.is_empty());
}

#[test]
fn test_decrypt_of_empty_ciphertext_fails_for_block_ciphers() {
    let err = decrypt("aes128", &[0u8; 16], Some(&[0u8; 16]), b"").unwrap_err();
    assert!(matches!(err, CryptoError::Backend(_)));
}

#[test]
fn test_deterministic_output() {
    let key = [7u8; 32];
    let iv = [8u8; 16];
    let a = encrypt("aes256", &key, Some(&iv), b"same input").unwrap();
    let b = encrypt("aes256", &key, Some(&iv), b"same input").unwrap();
    assert_eq!(a, b);
}

/// Reader that hands out a few bytes per call, exercising partial-block
/// buffering across many update calls.
struct TrickleReader {
    data: Vec<u8>,
    pos: usize,
    step: usize,
}

impl Read for TrickleReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.step.min(self.data.len() - self.pos).min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

#[test]
fn test_trickled_input_matches_oneshot() {
    init_logging();
    let key = [1u8; 16];
    let iv = [2u8; 16];
    let message: Vec<u8> = (0..4096u32).map(|i| (i * 31 % 255) as u8).collect();
    for step in [1usize, 3, 16, 17, 100] {
        let reader = TrickleReader {
            data: message.clone(),
            pos: 0,
            step,
        };
        let mut sink = ByteSink::new();
        let request = CipherRequest::new(Direction::Encrypt, "aes128", &key, Some(&iv))
            .with_context("trickle-test");
        let written = transform(&request, reader, &mut sink).unwrap();
        assert_eq!(written as usize, sink.len());
        let oneshot = encrypt("aes128", &key, Some(&iv), &message).unwrap();
        assert_eq!(sink.as_slice(), &oneshot[..], "step {step}");
    }
}

#[test]
fn test_transform_returns_bytes_written() {
    let key = [1u8; 16];
    let iv = [2u8; 16];
    let request = CipherRequest::new(Direction::Encrypt, "aes128", &key, Some(&iv));
    let mut sink = ByteSink::new();
    let written = transform(&request, Cursor::new(vec![0u8; 100]), &mut sink).unwrap();
    // 100 bytes pad up to 112.
    assert_eq!(written, 112);
    assert_eq!(sink.len(), 112);
}

/// Writer that fails after a fixed number of accepted bytes.
struct FailingWriter {
    remaining: usize,
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink full"));
        }
        let n = buf.len().min(self.remaining);
        self.remaining -= n;
        Ok(n)
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_writer_failure_aborts_transform() {
    let key = [1u8; 16];
    let iv = [2u8; 16];
    let request = CipherRequest::new(Direction::Encrypt, "aes128", &key, Some(&iv));
    let writer = FailingWriter { remaining: 32 };
    let err = transform(&request, Cursor::new(vec![0u8; 4096]), writer).unwrap_err();
    assert!(matches!(err, CryptoError::Io(_)));
}

#[test]
fn test_wrong_key_fails_or_garbles() {
    // CBC with the wrong key almost always trips the padding check; when
    // it does decode, the plaintext must differ.
    let iv = [0u8; 16];
    let ct = encrypt("aes128", &[1u8; 16], Some(&iv), b"secret message").unwrap();
    match decrypt("aes128", &[2u8; 16], Some(&iv), &ct) {
        Err(CryptoError::Backend(_)) => {}
        Ok(pt) => assert_ne!(pt, b"secret message"),
        Err(e) => panic!("unexpected error: {e}"),
    }
}

#[test]
fn test_default_registry_contents() {
    let registry = default_registry();
    assert!(registry.find("aes128").is_some());
    assert!(registry.find("DES-CBC").is_some());
    assert!(registry.find("3DES").is_some());
    assert!(registry.len() <= 64);
    let descriptor = registry.find("aes-128-ctr").unwrap();
    assert_eq!(descriptor.block_size, 1);
    assert_eq!(descriptor.iv_len, 16);
}

#[test]
fn test_ctr_ciphertext_length_equals_plaintext_length() {
    let key = [1u8; 16];
    let iv = [2u8; 16];
    for len in [1usize, 15, 16, 1000] {
        let ct = encrypt("aes-128-ctr", &key, Some(&iv), &vec![0u8; len]).unwrap();
        assert_eq!(ct.len(), len);
    }
}
