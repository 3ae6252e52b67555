//! API keys are a printable form of the principal's UUID: four groups of seven
//! Crockford base32 digits, one group per 32-bit word, most significant digit
//! first (`0000000-0000000-0000000-0000000` is the nil UUID).

use uuid::Uuid;

const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const GROUPS: usize = 4;
const GROUP_LEN: usize = 7;
const WORD_BITS: usize = 32;

pub fn key_from_uuid(uuid: Uuid) -> String {
    let value = uuid.as_u128();
    (0..GROUPS)
        .map(|i| {
            let shift = WORD_BITS * (GROUPS - 1 - i);
            encode_word((value >> shift) as u32)
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Decodes a key back to its UUID; `None` when the key is not well formed.
pub fn uuid_from_key(key: &str) -> Option<Uuid> {
    let mut groups = key.split('-');
    let mut value: u128 = 0;
    for _ in 0..GROUPS {
        let word = decode_word(groups.next()?)?;
        value = (value << WORD_BITS) | u128::from(word);
    }
    if groups.next().is_some() {
        return None;
    }
    Some(Uuid::from_u128(value))
}

fn encode_word(word: u32) -> String {
    let mut digits = [b'0'; GROUP_LEN];
    let mut rest = word;
    for slot in digits.iter_mut().rev() {
        *slot = ALPHABET[(rest % 32) as usize];
        rest /= 32;
    }
    digits.iter().map(|&b| char::from(b)).collect()
}

fn decode_word(group: &str) -> Option<u32> {
    if group.len() != GROUP_LEN {
        return None;
    }
    let value = group.bytes().try_fold(0u64, |acc, b| {
        let digit = ALPHABET.iter().position(|&c| c == b)?;
        Some(acc * 32 + digit as u64)
    })?;
    u32::try_from(value).ok()
}
