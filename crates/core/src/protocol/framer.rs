use std::io::Read;

/// Two-byte frame terminator, `0x07 0x08`, used in both directions.
pub const TERMINATOR: [u8; 2] = [0x07, 0x08];

/// Why a frame could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The state's byte budget filled up before the terminator arrived.
    #[error("frame exceeded {limit} bytes without terminator")]
    Oversize { limit: usize },

    /// Socket error, read timeout, or EOF mid-frame.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Pulls terminator-delimited frames off a byte stream.
///
/// Reads a single byte at a time, so a frame is never over-read and the
/// terminator is recognized even when its two bytes arrive in separate
/// socket reads. A lone `0x07` is payload, not a terminator.
pub struct Framer<R> {
    reader: R,
}

impl<R: Read> Framer<R> {
    pub fn new(reader: R) -> Self {
        Framer { reader }
    }

    /// Read one frame of at most `limit` bytes (terminator included) and
    /// return its payload with the terminator stripped.
    ///
    /// EOF before a complete frame surfaces as [`FrameError::Io`] with
    /// [`std::io::ErrorKind::UnexpectedEof`]; it is an I/O condition, not
    /// a protocol one.
    pub fn read_frame(&mut self, limit: usize) -> Result<Vec<u8>, FrameError> {
        let mut frame = Vec::with_capacity(limit);
        let mut byte = [0u8; 1];
        loop {
            self.reader.read_exact(&mut byte)?;
            frame.push(byte[0]);
            if frame.ends_with(&TERMINATOR) {
                frame.truncate(frame.len() - TERMINATOR.len());
                return Ok(frame);
            }
            if frame.len() >= limit {
                return Err(FrameError::Oversize { limit });
            }
        }
    }
}
