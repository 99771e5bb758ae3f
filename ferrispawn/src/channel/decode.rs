//! Incremental UTF-8 decoding of raw output.

use bytes::BytesMut;

/// Turns a sequence of raw reads into text without splitting characters.
///
/// A multi-byte sequence cut off at the end of a read is held back and
/// completed by the next read. Invalid bytes decode to U+FFFD.
#[derive(Debug, Default)]
pub(crate) struct Utf8Decoder {
    pending: BytesMut,
}

impl Utf8Decoder {
    /// Decode `data`, prefixed by any bytes held back from the last call.
    ///
    /// Invalid sequences are replaced one by one, so an incomplete character
    /// at the very end is held back even when earlier bytes were invalid.
    pub(crate) fn decode(&mut self, data: &[u8]) -> String {
        self.pending.extend_from_slice(data);
        let mut text = String::with_capacity(self.pending.len());

        loop {
            let (valid, invalid) = match std::str::from_utf8(&self.pending) {
                Ok(_) => (self.pending.len(), None),
                Err(e) => (e.valid_up_to(), e.error_len()),
            };

            let head = self.pending.split_to(valid);
            text.push_str(&String::from_utf8_lossy(&head));

            match invalid {
                Some(len) => {
                    text.push(char::REPLACEMENT_CHARACTER);
                    let _ = self.pending.split_to(len);
                }
                // Either everything was decoded or only an incomplete
                // trailing sequence is left to wait for
                None => return text,
            }
        }
    }

    /// Take the held-back bytes, leaving the decoder empty.
    pub(crate) fn take_pending(&mut self) -> Vec<u8> {
        self.pending.split().to_vec()
    }

    /// Flush held-back bytes at end of stream.
    pub(crate) fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let rest = self.pending.split();
        Some(String::from_utf8_lossy(&rest).into_owned())
    }
}
