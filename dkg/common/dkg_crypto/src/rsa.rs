use crate::CryptoError;
use base64::prelude::*;
use openssl::error::ErrorStack;
use openssl::hash::MessageDigest;
use openssl::pkey::{PKey, Private, Public};
use openssl::rsa::{Padding, Rsa};
use openssl::sign::{Signer, Verifier};

// Parse from a base64 encoded PEM RSA public key into the associated RSA representation
pub fn parse_rsa_public_key(encoded: &[u8]) -> Result<Rsa<Public>, CryptoError> {
    // First decode the base64 data
    let pem_decoded = BASE64_STANDARD
        .decode(encoded)
        .map_err(|e| CryptoError::KeyDecode(format!("Unable to decode base64 pem data: {e}")))?;

    // Convert the decoded data to a string
    let mut pem_string = String::from_utf8(pem_decoded).map_err(|e| {
        CryptoError::KeyDecode(format!(
            "Unable to convert decoded pem data into a string: {e}"
        ))
    })?;

    // Operator keys are published as PKCS8 data under a PKCS1 header
    pem_string = pem_string
        .replace(
            "-----BEGIN RSA PUBLIC KEY-----",
            "-----BEGIN PUBLIC KEY-----",
        )
        .replace("-----END RSA PUBLIC KEY-----", "-----END PUBLIC KEY-----");

    Rsa::public_key_from_pem(pem_string.as_bytes())
        .map_err(|e| CryptoError::KeyDecode(format!("Failed to parse RSA public key: {e}")))
}

/// Encodes a public key the way operator keys travel on the wire: base64 of the PEM document.
pub fn encode_rsa_public_key(key: &Rsa<Public>) -> Result<String, CryptoError> {
    let pem = key
        .public_key_to_pem()
        .map_err(|e| CryptoError::KeyDecode(format!("Failed to encode RSA public key: {e}")))?;
    Ok(BASE64_STANDARD.encode(pem))
}

/// Extracts the public half of an operator key.
pub fn public_key(key: &Rsa<Private>) -> Result<Rsa<Public>, CryptoError> {
    let extract = || -> Result<Rsa<Public>, ErrorStack> {
        Rsa::from_public_components(key.n().to_owned()?, key.e().to_owned()?)
    };
    extract().map_err(|e| CryptoError::KeyDecode(format!("Failed to extract RSA public key: {e}")))
}

/// RSA PKCS#1 v1.5 signature over the SHA-256 digest of `message`.
pub fn sign_rsa(key: &Rsa<Private>, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let pkey = PKey::from_rsa(key.clone()).map_err(|e| CryptoError::Signing(e.to_string()))?;
    let mut signer = Signer::new(MessageDigest::sha256(), &pkey)
        .map_err(|e| CryptoError::Signing(e.to_string()))?;
    signer
        .update(message)
        .map_err(|e| CryptoError::Signing(e.to_string()))?;
    signer
        .sign_to_vec()
        .map_err(|e| CryptoError::Signing(e.to_string()))
}

/// Verifies a signature produced by [`sign_rsa`].
pub fn verify_rsa(key: &Rsa<Public>, message: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
    let pkey = PKey::from_rsa(key.clone()).map_err(|e| CryptoError::KeyDecode(e.to_string()))?;
    let mut verifier = Verifier::new(MessageDigest::sha256(), &pkey)
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
    verifier
        .update(message)
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;

    // openssl reports malformed signatures as errors rather than as a negative result
    match verifier.verify(signature) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CryptoError::InvalidSignature(
            "RSA signature does not match".to_string(),
        )),
        Err(e) => Err(CryptoError::InvalidSignature(e.to_string())),
    }
}

/// RSA PKCS#1 v1.5 encryption of `plaintext` to the holder of `key`.
pub fn encrypt(key: &Rsa<Public>, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut buf = vec![0u8; key.size() as usize];
    let len = key
        .public_encrypt(plaintext, &mut buf, Padding::PKCS1)
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;
    buf.truncate(len);
    Ok(buf)
}

/// Reverses [`encrypt`].
pub fn decrypt(key: &Rsa<Private>, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut buf = vec![0u8; key.size() as usize];
    let len = key
        .private_decrypt(ciphertext, &mut buf, Padding::PKCS1)
        .map_err(|e| CryptoError::Decryption(e.to_string()))?;
    buf.truncate(len);
    Ok(buf)
}
