use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder, LinesCodec, LinesCodecError};

use crate::{
    error::{Error, Result},
    schema::JSONRPCMessage,
};

/// Maximum accepted line length. Forecast payloads are small; this bound
/// exists to keep a misbehaving peer from growing the buffer without limit.
const MAX_LINE_LENGTH: usize = 4 * 1024 * 1024;

/// Newline-delimited JSON codec for JSON-RPC messages.
///
/// MCP stdio framing is one JSON object per line; blank lines are skipped.
pub struct JsonRpcCodec {
    lines: LinesCodec,
}

impl JsonRpcCodec {
    pub fn new() -> Self {
        Self {
            lines: LinesCodec::new_with_max_length(MAX_LINE_LENGTH),
        }
    }
}

impl Default for JsonRpcCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for JsonRpcCodec {
    type Item = JSONRPCMessage;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        loop {
            match self.lines.decode(src)? {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => return Ok(Some(serde_json::from_str(&line)?)),
                None => return Ok(None),
            }
        }
    }
}

impl Encoder<JSONRPCMessage> for JsonRpcCodec {
    type Error = Error;

    fn encode(&mut self, item: JSONRPCMessage, dst: &mut BytesMut) -> Result<()> {
        let line = serde_json::to_string(&item)?;
        self.lines.encode(line, dst).map_err(Error::from)
    }
}

impl From<LinesCodecError> for Error {
    fn from(err: LinesCodecError) -> Self {
        match err {
            LinesCodecError::MaxLineLengthExceeded => {
                Error::Transport("maximum line length exceeded".to_string())
            }
            LinesCodecError::Io(err) => err.into(),
        }
    }
}
