//! Incremental server-sent events decoder.
//!
//! Network chunks can split lines (and multi-byte characters) anywhere, so
//! bytes are buffered until a full line is available.

/// A decoded event relevant to the chat completions stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseFrame {
    /// Payload of a `data:` line.
    Data(String),
    /// The `data: [DONE]` end marker.
    Done,
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    done: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the end marker has been seen. Later input is ignored.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed a chunk and return the frames completed by it.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        if self.done {
            return Vec::new();
        }
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(frame) = self.decode_line(&line[..line.len() - 1]) {
                frames.push(frame);
                if self.done {
                    self.buffer.clear();
                    break;
                }
            }
        }
        frames
    }

    /// Flush a trailing line that was not newline-terminated.
    pub fn finish(&mut self) -> Option<SseFrame> {
        if self.done || self.buffer.is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.buffer);
        self.decode_line(&line)
    }

    fn decode_line(&mut self, line: &[u8]) -> Option<SseFrame> {
        let line = String::from_utf8_lossy(line);
        let line = line.strip_suffix('\r').unwrap_or(&line);

        // blank lines separate events; ':' starts a comment
        if line.is_empty() || line.starts_with(':') {
            return None;
        }

        let data = line.strip_prefix("data:")?;
        let data = data.strip_prefix(' ').unwrap_or(data);
        if data == "[DONE]" {
            self.done = true;
            return Some(SseFrame::Done);
        }
        Some(SseFrame::Data(data.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(s: &str) -> SseFrame {
        SseFrame::Data(s.to_string())
    }

    #[test]
    fn test_whole_events() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"data: {\"a\":1}\n\ndata: {\"a\":2}\n\n");
        assert_eq!(frames, vec![data("{\"a\":1}"), data("{\"a\":2}")]);
    }

    #[test]
    fn test_event_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"da").is_empty());
        assert!(decoder.push(b"ta: {\"content\":").is_empty());
        assert_eq!(decoder.push(b"\"x\"}\r\n\r\n"), vec![data("{\"content\":\"x\"}")]);
    }

    #[test]
    fn test_multibyte_character_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        let bytes = "data: héllo\n".as_bytes();
        // split inside the two-byte 'é'
        assert!(decoder.push(&bytes[..8]).is_empty());
        assert_eq!(decoder.push(&bytes[8..]), vec![data("héllo")]);
    }

    #[test]
    fn test_comments_and_other_fields_are_ignored() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b": keep-alive\nevent: message\nid: 7\ndata: x\n\n");
        assert_eq!(frames, vec![data("x")]);
    }

    #[test]
    fn test_done_stops_decoding() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"data: a\n\ndata: [DONE]\n\ndata: late\n\n");
        assert_eq!(frames, vec![data("a"), SseFrame::Done]);
        assert!(decoder.is_done());
        assert!(decoder.push(b"data: later\n").is_empty());
    }

    #[test]
    fn test_finish_flushes_unterminated_line() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: tail").is_empty());
        assert_eq!(decoder.finish(), Some(data("tail")));
        assert_eq!(decoder.finish(), None);
    }
}
