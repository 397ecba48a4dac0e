//! Database key validation.

/// Maximum UTF-8 encoded length of a database key, in bytes.
pub const MAX_KEY_BYTES: usize = 768;

const BAD_KEY_CHARS: [bool; 128] = bad_key_chars();

const fn bad_key_chars() -> [bool; 128] {
    let mut table = [false; 128];
    let mut i = 0;
    while i <= 0x1f {
        table[i] = true;
        i += 1;
    }
    table[0x7f] = true;
    table[b'.' as usize] = true;
    table[b'$' as usize] = true;
    table[b'#' as usize] = true;
    table[b'[' as usize] = true;
    table[b']' as usize] = true;
    table[b'/' as usize] = true;
    table
}

/// Reports whether `key` is a legal Realtime Database key.
///
/// Per the rules at
/// <https://firebase.google.com/docs/database/rest/structure-data>: keys must
/// be UTF-8 encoded, can be a maximum of 768 bytes, and cannot contain `.`,
/// `$`, `#`, `[`, `]`, `/`, or ASCII control characters 0-31 or 127.
pub fn is_valid_key(key: &str) -> bool {
    if key.len() > MAX_KEY_BYTES {
        return false;
    }

    // Every forbidden code point is ASCII, and bytes of a multi-byte UTF-8
    // sequence are all >= 0x80, so scanning raw bytes is enough.
    !key.bytes().any(|b| b < 0x80 && BAD_KEY_CHARS[b as usize])
}
