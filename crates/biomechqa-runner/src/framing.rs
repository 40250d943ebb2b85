//! Incremental decoder for the QA script's newline-delimited JSON output.
//!
//! The script prints one JSON object per line:
//!   - `{"log": ...}`    progress message, no effect on the outcome
//!   - `{"result": ...}` candidate answer; a later result replaces an earlier one
//!   - `{"error": ...}`  terminal failure; everything after it is ignored
//!
//! Lines that are not JSON objects, or objects with none of those fields, are
//! reported and skipped. The decoder owns no I/O so it can be driven from a
//! pipe or from a test string alike.

use serde_json::Value;

/// One decoded line of script output.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Log(String),
    Result(Value),
    Error(String),
    Malformed { line: String, reason: String },
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserState {
    /// Buffering text that has no terminating newline yet.
    Accumulating,
    /// A complete line is being interpreted.
    FragmentReady,
    /// An `error` frame was seen. Input is ignored from here on.
    TerminalError(String),
}

/// What the script produced once its output is exhausted.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Result(Value),
    Error(String),
    Empty,
}

#[derive(Debug)]
pub struct FrameParser {
    buffer: String,
    state: ParserState,
    result: Option<Value>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            state: ParserState::Accumulating,
            result: None,
        }
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, ParserState::TerminalError(_))
    }

    /// Latest result captured so far.
    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Text received after the last newline.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Append a chunk of output and decode every line it completes.
    pub fn push(&mut self, chunk: &str) -> Vec<Frame> {
        let mut frames = Vec::new();
        if self.is_terminal() {
            return frames;
        }
        self.buffer.push_str(chunk);

        while let Some(newline) = self.buffer.find('\n') {
            self.state = ParserState::FragmentReady;
            let line: String = self.buffer.drain(..=newline).collect();
            let line = line.trim_end_matches('\n').trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let frame = decode_line(line);
            self.apply(&frame);
            frames.push(frame);
            if self.is_terminal() {
                self.buffer.clear();
                return frames;
            }
        }

        self.state = ParserState::Accumulating;
        frames
    }

    /// Close the stream. Text left without a trailing newline gets one last
    /// parse: an `error` there is still terminal, and a `result` there is used
    /// only when no line-terminated result was captured.
    pub fn finish(mut self) -> (Outcome, Option<Frame>) {
        if let ParserState::TerminalError(message) = self.state {
            return (Outcome::Error(message), None);
        }

        let tail = std::mem::take(&mut self.buffer);
        let tail = tail.trim();
        let tail_frame = if tail.is_empty() { None } else { Some(decode_line(tail)) };

        match &tail_frame {
            Some(Frame::Error(message)) => return (Outcome::Error(message.clone()), tail_frame),
            Some(Frame::Result(value)) if self.result.is_none() => {
                self.result = Some(value.clone());
            }
            _ => {}
        }

        let outcome = match self.result {
            Some(value) => Outcome::Result(value),
            None => Outcome::Empty,
        };
        (outcome, tail_frame)
    }

    fn apply(&mut self, frame: &Frame) {
        match frame {
            Frame::Result(value) => self.result = Some(value.clone()),
            Frame::Error(message) => self.state = ParserState::TerminalError(message.clone()),
            _ => {}
        }
    }
}

/// Decode a single line. Field precedence is `log`, then `result`, then `error`.
/// A `null` field counts as absent.
pub fn decode_line(line: &str) -> Frame {
    let value: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            return Frame::Malformed { line: line.to_string(), reason: e.to_string() };
        }
    };
    let Some(obj) = value.as_object() else {
        return Frame::Malformed {
            line: line.to_string(),
            reason: "not a JSON object".to_string(),
        };
    };

    if let Some(log) = obj.get("log").filter(|v| !v.is_null()) {
        Frame::Log(text_of(log))
    } else if let Some(result) = obj.get("result").filter(|v| !v.is_null()) {
        Frame::Result(result.clone())
    } else if let Some(error) = obj.get("error").filter(|v| !v.is_null()) {
        Frame::Error(text_of(error))
    } else {
        Frame::Unrecognized(line.to_string())
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
