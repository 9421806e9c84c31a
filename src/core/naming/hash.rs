//! FNV-1a hashing and hash-to-letter mapping used for collision suffixes

const FNV_OFFSET_BASIS: u64 = 14_695_981_039_346_656_037;
const FNV_PRIME: u64 = 1_099_511_628_211;

/// 64-bit FNV-1a over the UTF-8 bytes of `s`
///
/// # Examples
///
/// ```
/// use photos_export::core::naming::hash64;
///
/// assert_eq!(hash64(""), 14695981039346656037);
/// assert_eq!(hash64("IMG_0001.JPG"), hash64("IMG_0001.JPG"));
/// ```
pub fn hash64(s: &str) -> u64 {
    s.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Lowercase ASCII letter for `hash`, shifted by `offset` positions
///
/// Negative offsets wrap into `0..26` before being combined.
pub fn letter_from_hash(hash: u64, offset: i64) -> char {
    let base = (hash % 26) as i64;
    let shift = offset.rem_euclid(26);
    let idx = (base + shift) % 26;
    char::from(b'a' + idx as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_hash64_is_deterministic() {
        assert_eq!(hash64("IMG_0001.JPG"), hash64("IMG_0001.JPG"));
        assert_ne!(hash64("IMG_0001.JPG"), hash64("IMG_0002.JPG"));
    }

    #[test]
    fn test_hash64_known_vectors() {
        // Reference FNV-1a 64 test vectors
        assert_eq!(hash64(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(hash64("a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(hash64("foobar"), 0x8594_4171_f739_67e8);
    }

    #[test]
    fn test_letter_is_lowercase() {
        for hash in [0u64, 1, 25, 26, 123_456_789, u64::MAX] {
            assert!(letter_from_hash(hash, 0).is_ascii_lowercase());
        }
    }

    #[test_case(0, 'a')]
    #[test_case(1, 'b')]
    #[test_case(25, 'z')]
    #[test_case(26, 'a')]
    #[test_case(-1, 'z')]
    #[test_case(-27, 'z')]
    #[test_case(-52, 'a')]
    fn test_letter_offset_wraps(offset: i64, expected: char) {
        assert_eq!(letter_from_hash(0, offset), expected);
    }

    #[test]
    fn test_letter_combines_hash_and_offset() {
        // 27 % 26 == 1 -> 'b', shifted by 2 -> 'd'
        assert_eq!(letter_from_hash(27, 2), 'd');
        // 25 -> 'z', shifted by 1 wraps to 'a'
        assert_eq!(letter_from_hash(25, 1), 'a');
    }
}
