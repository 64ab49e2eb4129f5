//! The 25-word mnemonic encoding of ed25519 seeds.
//!
//! A seed is split into 11-bit groups (least significant bits first), each
//! group selecting a word from the BIP-39 English word list. 32 bytes need 24
//! words; a 25th word carries a checksum taken from the SHA-512/256 digest of
//! the seed.

use crate::errors::ProtocolError;
use crate::types::{sha512_256, KEY_LEN};
use bip39::Language;

/// Number of words encoding the key itself.
const KEY_WORDS: usize = 24;

/// Total number of words in a mnemonic, including the checksum word.
pub const MNEMONIC_WORDS: usize = KEY_WORDS + 1;

const BITS_PER_WORD: u32 = 11;
const WORD_MASK: u32 = (1 << BITS_PER_WORD) - 1;

/// Converts a mnemonic phrase into the 32-byte ed25519 seed it encodes.
///
/// Words are matched case-insensitively and may be separated by any
/// whitespace.
pub fn to_private_key(phrase: &str) -> Result<[u8; KEY_LEN], ProtocolError> {
    let words: Vec<String> = phrase.split_whitespace().map(str::to_lowercase).collect();
    if words.len() != MNEMONIC_WORDS {
        return Err(ProtocolError::MnemonicLength {
            expected: MNEMONIC_WORDS,
            actual: words.len(),
        });
    }

    let mut indices = Vec::with_capacity(KEY_WORDS);
    for word in &words[..KEY_WORDS] {
        indices.push(word_index(word)?);
    }

    let bytes = pack_11_bits(&indices);
    // 24 words carry 264 bits; the overflow byte must be empty.
    if bytes.len() != KEY_LEN + 1 || bytes[KEY_LEN] != 0 {
        return Err(ProtocolError::MnemonicKeyLength);
    }

    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&bytes[..KEY_LEN]);

    let expected = checksum_word(&key);
    if words[KEY_WORDS] != expected {
        return Err(ProtocolError::MnemonicChecksum);
    }

    Ok(key)
}

/// Converts a 32-byte ed25519 seed into its 25-word mnemonic phrase.
pub fn from_key(key: &[u8; KEY_LEN]) -> String {
    let word_list = Language::English.word_list();

    let mut words: Vec<&str> = unpack_11_bits(key)
        .into_iter()
        .map(|index| word_list[index as usize])
        .collect();
    words.push(checksum_word(key));

    words.join(" ")
}

fn word_index(word: &str) -> Result<u32, ProtocolError> {
    Language::English
        .find_word(word)
        .map(u32::from)
        .ok_or_else(|| ProtocolError::UnknownWord(word.to_string()))
}

fn checksum_word(key: &[u8; KEY_LEN]) -> &'static str {
    let digest = sha512_256(key);
    let index = (u32::from(digest[0]) | u32::from(digest[1]) << 8) & WORD_MASK;
    Language::English.word_list()[index as usize]
}

/// Packs 11-bit values into bytes, least significant bits first.
fn pack_11_bits(values: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(values.len() * BITS_PER_WORD as usize / 8 + 1);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for value in values {
        buffer |= value << bits;
        bits += BITS_PER_WORD;
        while bits >= 8 {
            bytes.push((buffer & 0xff) as u8);
            buffer >>= 8;
            bits -= 8;
        }
    }
    if bits != 0 {
        bytes.push((buffer & 0xff) as u8);
    }

    bytes
}

/// Splits bytes into 11-bit values, least significant bits first.
fn unpack_11_bits(bytes: &[u8]) -> Vec<u32> {
    let mut values = Vec::with_capacity(bytes.len() * 8 / BITS_PER_WORD as usize + 1);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for byte in bytes {
        buffer |= u32::from(*byte) << bits;
        bits += 8;
        if bits >= BITS_PER_WORD {
            values.push(buffer & WORD_MASK);
            buffer >>= BITS_PER_WORD;
            bits -= BITS_PER_WORD;
        }
    }
    if bits != 0 {
        values.push(buffer & WORD_MASK);
    }

    values
}
