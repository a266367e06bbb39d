//! Simulation-only cipher substitutions.
//!
//! Real block-cipher work inside a simulation burns CPU without changing
//! any observable behavior the simulation cares about, so these stubs skip
//! it: AES block transforms do nothing, the EVP-style transform copies
//! plaintext through. The whole module sits behind the `cipher-stubs`
//! feature so an embedding that needs real cryptographic behavior can
//! compile it out and let the hosted library's own ciphers run.

/// AES block size in bytes, used only for interface fidelity checks.
pub const AES_BLOCK_LEN: usize = 16;

/// Replacement AES block encryption: leaves `output` untouched.
pub fn aes_encrypt(_input: &[u8], _output: &mut [u8], _key_material: &[u8]) {}

/// Replacement AES block decryption: leaves `output` untouched.
pub fn aes_decrypt(_input: &[u8], _output: &mut [u8], _key_material: &[u8]) {}

/// Replacement AES-CTR encryption: leaves `output` untouched.
pub fn aes_ctr128_encrypt(_input: &[u8], _output: &mut [u8], _key_material: &[u8]) {}

/// Replacement AES-CTR decryption: leaves `output` untouched.
pub fn aes_ctr128_decrypt(_input: &[u8], _output: &mut [u8], _key_material: &[u8]) {}

/// Replacement EVP cipher transform: copies `input` to `output` unchanged
/// and reports success.
///
/// # Panics
///
/// Panics if `output` is shorter than `input`; the hosted library always
/// supplies an output buffer at least as large as the input.
pub fn evp_cipher(output: &mut [u8], input: &[u8]) -> i32 {
    assert!(
        output.len() >= input.len(),
        "cipher output buffer shorter than input"
    );
    output[..input.len()].copy_from_slice(input);
    1
}
