//! Incremental UTF-8 and line decoding for SSE byte streams.

/// Per-connection decoding state.
///
/// Bytes may split a code point and chunks may split a line; both remainders
/// are carried to the next [`push`](Self::push).
#[derive(Debug, Default)]
pub struct DecoderState {
    pending_bytes: Vec<u8>,
    pending_line: String,
}

impl DecoderState {
    /// Creates empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a chunk and returns the lines it completed, without terminators.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let text = self.decode(chunk);
        self.pending_line.push_str(&text);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending_line.find('\n') {
            let line = self.pending_line[..pos].trim_end_matches('\r').to_string();
            self.pending_line.drain(..=pos);
            lines.push(line);
        }
        lines
    }

    /// Flushes state at end of stream. An incomplete trailing code point
    /// becomes U+FFFD.
    pub fn finish(&mut self) -> Option<String> {
        if !self.pending_bytes.is_empty() {
            let tail = String::from_utf8_lossy(&self.pending_bytes).into_owned();
            self.pending_bytes.clear();
            self.pending_line.push_str(&tail);
        }
        let line = std::mem::take(&mut self.pending_line);
        let line = line.trim_end_matches('\r');
        (!line.is_empty()).then(|| line.to_string())
    }

    /// Number of bytes held back waiting for the rest of a code point.
    pub fn pending_byte_count(&self) -> usize {
        self.pending_bytes.len()
    }

    fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending_bytes);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut start = 0;
        while start < bytes.len() {
            match std::str::from_utf8(&bytes[start..]) {
                Ok(s) => {
                    out.push_str(s);
                    start = bytes.len();
                }
                Err(e) => {
                    let valid_end = start + e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&bytes[start..valid_end]));
                    match e.error_len() {
                        Some(len) => {
                            out.push('\u{FFFD}');
                            start = valid_end + len;
                        }
                        None => {
                            // incomplete sequence at the end, keep for next chunk
                            self.pending_bytes = bytes[valid_end..].to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }
}
