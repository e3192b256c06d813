use std::fmt::{self, Write};

/// Encode `values` as a lowercase hex string.
///
/// Every value is truncated to its low 8 bits, and written as two
/// hexadecimal digits.
///
/// # Examples
///
/// ```
/// # use imt_hash::hex;
/// assert_eq!(hex::encode([0u8, 16, 255]), "0010ff");
/// assert_eq!(hex::encode([0x1234i32, -1]), "34ff");
/// ```
pub fn encode<I>(values: I) -> String
where
    I: IntoIterator,
    I::Item: Into<i64>,
{
    let values = values.into_iter();
    let mut output = String::with_capacity(values.size_hint().0 * 2);

    for value in values {
        let _ = write!(&mut output, "{:02x}", value.into() & 0xff);
    }

    output
}

/// Decode a hex string. Both lowercase and uppercase digits are accepted.
///
/// Return `None` if `input` has an odd length, or any non-hex character.
pub fn decode(input: &str) -> Option<Vec<u8>> {
    if input.len() % 2 != 0 {
        return None;
    }

    input
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let high = char::from(pair[0]).to_digit(16)?;
            let low = char::from(pair[1]).to_digit(16)?;
            Some((high << 4 | low) as u8)
        })
        .collect()
}

/// Encode a byte buffer as hex string.
pub struct HexString<T>(pub T);

impl<T: AsRef<[u8]>> fmt::Display for HexString<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0
            .as_ref()
            .iter()
            .try_for_each(|byte| write!(f, "{:02x}", byte))
    }
}

#[test]
fn encode_single_values() {
    assert_eq!(encode([0u8]), "00");
    assert_eq!(encode([255u8]), "ff");
    assert_eq!(encode([16u8]), "10");
}

#[test]
fn encode_masks_to_low_byte() {
    assert_eq!(encode([256u32, 0x1ff, 0xabcd]), "00ffcd");
    assert_eq!(encode([-1i64, -256]), "ff00");
}

#[test]
fn encode_empty() {
    assert_eq!(encode(Vec::<u8>::new()), "");
}

#[test]
fn decode_hex_strings() {
    assert_eq!(decode("0120f0"), Some(vec![0x01, 0x20, 0xf0]));
    assert_eq!(decode("0120F0"), Some(vec![0x01, 0x20, 0xf0]));
    assert_eq!(decode(""), Some(vec![]));

    assert_eq!(decode("012"), None);
    assert_eq!(decode("0g"), None);
    assert_eq!(decode("éé"), None);
}

#[test]
fn encode_hex_bytes() {
    assert_eq!(HexString(b"\x01\x20\xf0").to_string(), "0120f0");
}
