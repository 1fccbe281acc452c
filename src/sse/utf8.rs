//! Streaming UTF-8 decoding.
//!
//! Network chunks can end in the middle of a multi-byte character. The
//! decoder keeps those trailing bytes until the next chunk completes them,
//! and substitutes U+FFFD for sequences that can never become valid.

/// Incremental UTF-8 decoder.
#[derive(Debug, Default, Clone)]
pub struct Utf8Decoder {
    /// Bytes of an incomplete character from the previous chunk (at most 3).
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `chunk`, appending the text to `out`.
    pub fn decode_into(&mut self, chunk: &[u8], out: &mut String) {
        if self.pending.is_empty() {
            self.decode_bytes(chunk, out);
            return;
        }

        let mut joined = std::mem::take(&mut self.pending);
        joined.extend_from_slice(chunk);
        self.decode_bytes(&joined, out);
    }

    /// Flush held-back bytes at end of stream. An incomplete trailing
    /// sequence becomes a single replacement character.
    pub fn finish_into(&mut self, out: &mut String) {
        if !self.pending.is_empty() {
            self.pending.clear();
            out.push(char::REPLACEMENT_CHARACTER);
        }
    }

    /// Whether bytes are being held back.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn reset(&mut self) {
        self.pending.clear();
    }

    fn decode_bytes(&mut self, mut bytes: &[u8], out: &mut String) {
        loop {
            match std::str::from_utf8(bytes) {
                Ok(text) => {
                    out.push_str(text);
                    return;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    // from_utf8 guarantees the prefix is valid
                    if let Ok(text) = std::str::from_utf8(&bytes[..valid]) {
                        out.push_str(text);
                    }
                    match err.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            bytes = &bytes[valid + len..];
                        }
                        None => {
                            // Incomplete sequence at the end of input
                            self.pending.extend_from_slice(&bytes[valid..]);
                            return;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(chunks: &[&[u8]]) -> String {
        let mut decoder = Utf8Decoder::new();
        let mut out = String::new();
        for chunk in chunks {
            decoder.decode_into(chunk, &mut out);
        }
        decoder.finish_into(&mut out);
        out
    }

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(decode_all(&[&b"hello "[..], &b"world"[..]]), "hello world");
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        let bytes = "Zürich €".as_bytes();
        // 'ü' is 2 bytes starting at index 1; '€' is 3 bytes at the end
        let (a, rest) = bytes.split_at(2);
        let (b, c) = rest.split_at(rest.len() - 2);

        let mut decoder = Utf8Decoder::new();
        let mut out = String::new();
        decoder.decode_into(a, &mut out);
        assert_eq!(out, "Z");
        assert!(decoder.has_pending());

        decoder.decode_into(b, &mut out);
        decoder.decode_into(c, &mut out);
        assert!(!decoder.has_pending());
        assert_eq!(out, "Zürich €");
    }

    #[test]
    fn test_every_split_point() {
        let text = "a€b😀c";
        let bytes = text.as_bytes();
        for i in 0..=bytes.len() {
            let (a, b) = bytes.split_at(i);
            assert_eq!(decode_all(&[a, b]), text, "split at {}", i);
        }
    }

    #[test]
    fn test_invalid_byte_is_replaced() {
        assert_eq!(decode_all(&[&b"ok\xFFok"[..]]), "ok\u{FFFD}ok");
    }

    #[test]
    fn test_truncated_sequence_at_end_of_stream() {
        let euro = "€".as_bytes();
        assert_eq!(decode_all(&[&b"x"[..], &euro[..2]]), "x\u{FFFD}");
    }

    #[test]
    fn test_reset_drops_pending_bytes() {
        let euro = "€".as_bytes();
        let mut decoder = Utf8Decoder::new();
        let mut out = String::new();
        decoder.decode_into(&euro[..1], &mut out);
        decoder.reset();
        decoder.decode_into(b"z", &mut out);
        decoder.finish_into(&mut out);
        assert_eq!(out, "z");
    }
}
