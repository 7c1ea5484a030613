//! License key framing and text encoding.
//!
//! Byte layout: `len(u32 BE) || message || tag`. The length prefix makes the
//! message/tag boundary unambiguous whatever bytes the message contains.
//!
//! Text layout: URL-safe base64 without padding, split into
//! [`GROUP_LEN`]-character groups joined by [`GROUP_SEPARATOR`]. `-` is also
//! a URL-safe base64 symbol, so separators are removed by position rather
//! than by value.

use crate::error::{LicenseError, LicenseResult};
use crate::signer::{Tag, TAG_LEN};
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};

/// Characters per readability group.
pub const GROUP_LEN: usize = 4;

/// Separator placed between readability groups.
pub const GROUP_SEPARATOR: char = '-';

const LEN_PREFIX: usize = 4;

const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Frames, encodes and groups a signed message into license key text.
///
/// # Errors
///
/// Returns [`LicenseError::InvalidInput`] if the message does not fit the
/// 32-bit length prefix.
pub fn encode_token(message: &[u8], tag: &Tag) -> LicenseResult<String> {
    let len = u32::try_from(message.len()).map_err(|_| {
        LicenseError::InvalidInput(format!("message of {} bytes is too large", message.len()))
    })?;

    let mut framed = Vec::with_capacity(LEN_PREFIX + message.len() + TAG_LEN);
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(message);
    framed.extend_from_slice(tag);

    Ok(format_groups(&ENGINE.encode(framed)))
}

/// Reverses [`encode_token`], returning the message and its tag.
///
/// Only the structure is checked here; the tag is not verified.
///
/// # Errors
///
/// Returns [`LicenseError::InvalidFormat`] if the text is empty, is not
/// valid base64, or the framing is short or overlong.
pub fn decode_token(text: &str) -> LicenseResult<(Vec<u8>, Tag)> {
    let compact = strip_groups(text);
    if compact.is_empty() {
        return Err(LicenseError::InvalidFormat("license key is empty".to_string()));
    }

    let framed = ENGINE
        .decode(compact.as_bytes())
        .map_err(|e| LicenseError::InvalidFormat(format!("invalid base64: {e}")))?;

    unframe(&framed)
}

fn unframe(framed: &[u8]) -> LicenseResult<(Vec<u8>, Tag)> {
    if framed.len() < LEN_PREFIX + TAG_LEN {
        return Err(LicenseError::InvalidFormat(format!(
            "license key is too short ({} bytes)",
            framed.len()
        )));
    }

    let (prefix, rest) = framed.split_at(LEN_PREFIX);
    let mut len_bytes = [0u8; LEN_PREFIX];
    len_bytes.copy_from_slice(prefix);
    let len = u32::from_be_bytes(len_bytes) as usize;

    let body_len = rest.len() - TAG_LEN;
    if len != body_len {
        return Err(LicenseError::InvalidFormat(format!(
            "framed length {len} does not match {body_len} message bytes"
        )));
    }

    let (message, tag_bytes) = rest.split_at(len);
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(tag_bytes);
    Ok((message.to_vec(), tag))
}

/// Splits encoded text into separator-joined groups.
#[must_use]
pub fn format_groups(encoded: &str) -> String {
    let mut out = String::with_capacity(encoded.len() + encoded.len() / GROUP_LEN);
    for (i, c) in encoded.chars().enumerate() {
        if i > 0 && i % GROUP_LEN == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }
    out
}

/// Removes readability separators from license key text.
///
/// Text in the grouped shape (a separator after every [`GROUP_LEN`]
/// characters, none trailing) loses exactly those separators. Any other text
/// is returned trimmed but otherwise unchanged, since `-` may be data.
#[must_use]
pub fn strip_groups(text: &str) -> String {
    let text = text.trim();
    let stride = GROUP_LEN + 1;
    let chars: Vec<char> = text.chars().collect();

    let is_separator_slot = |i: usize| i % stride == GROUP_LEN;
    let grouped = chars.len() % stride != 0
        && chars
            .iter()
            .enumerate()
            .all(|(i, &c)| !is_separator_slot(i) || c == GROUP_SEPARATOR);

    if !grouped {
        return text.to_string();
    }

    chars
        .into_iter()
        .enumerate()
        .filter(|&(i, _)| !is_separator_slot(i))
        .map(|(_, c)| c)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_of_four() {
        assert_eq!(format_groups("abcdefghij"), "abcd-efgh-ij");
        assert_eq!(format_groups("abcdefgh"), "abcd-efgh");
        assert_eq!(format_groups(""), "");
    }

    #[test]
    fn strip_keeps_data_hyphens() {
        // "a-cd" and "-fgh" carry hyphens as base64 symbols.
        assert_eq!(strip_groups("a-cd--fgh-ij"), "a-cd-fghij");
    }

    #[test]
    fn strip_leaves_ungrouped_text() {
        assert_eq!(strip_groups("  abcdefgh "), "abcdefgh");
        assert_eq!(strip_groups("ab-cdefgh"), "ab-cdefgh");
        assert_eq!(strip_groups("abcd-"), "abcd-");
    }

    #[test]
    fn frame_roundtrip() {
        let tag = [7u8; TAG_LEN];
        let text = encode_token(b"{\"a\":1}", &tag).unwrap();
        let (message, decoded_tag) = decode_token(&text).unwrap();
        assert_eq!(message, b"{\"a\":1}");
        assert_eq!(decoded_tag, tag);
    }

    #[test]
    fn empty_message_frames() {
        let tag = [0u8; TAG_LEN];
        let text = encode_token(b"", &tag).unwrap();
        let (message, _) = decode_token(&text).unwrap();
        assert!(message.is_empty());
    }

    #[test]
    fn overlong_frame_rejected() {
        let mut framed = 2u32.to_be_bytes().to_vec();
        framed.extend_from_slice(b"abc");
        framed.extend_from_slice(&[0u8; TAG_LEN]);
        assert!(matches!(unframe(&framed), Err(LicenseError::InvalidFormat(_))));
    }

    #[test]
    fn short_frame_rejected() {
        let mut framed = 9u32.to_be_bytes().to_vec();
        framed.extend_from_slice(b"abc");
        framed.extend_from_slice(&[0u8; TAG_LEN]);
        assert!(matches!(unframe(&framed), Err(LicenseError::InvalidFormat(_))));
        assert!(matches!(unframe(&[0u8; 10]), Err(LicenseError::InvalidFormat(_))));
    }
}
