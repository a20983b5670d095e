//! Serial transport abstraction for the report and command channel.
//!
//! The `SerialPort` trait provides byte-level output and a non-blocking
//! single-byte read that can be implemented for any platform transport
//! (UART, USB CDC, stdio, etc.).

/// Platform-agnostic serial port trait.
///
/// Implementations must not block indefinitely:
/// - `try_read_byte()` returns immediately (zero wait)
/// - `write_bytes()` may block until the bytes are queued or transmitted
pub trait SerialPort {
    /// Platform-specific error type
    type Error;

    /// Non-blocking single byte read.
    ///
    /// Returns:
    /// - `Ok(Some(byte))` if a byte was waiting
    /// - `Ok(None)` if nothing was received
    /// - `Err(Self::Error)` on transport error
    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Write raw bytes to the transport.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Write string without line ending.
    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.write_bytes(s.as_bytes())
    }

    /// Write string followed by `\r\n`.
    fn write_line(&mut self, line: &str) -> Result<(), Self::Error> {
        self.write_str(line)?;
        self.write_bytes(b"\r\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::vec::Vec;

    struct VecPort {
        out: Vec<u8>,
    }

    impl SerialPort for VecPort {
        type Error = ();

        fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
            Ok(None)
        }

        fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
            self.out.extend_from_slice(bytes);
            Ok(())
        }
    }

    #[test]
    fn test_write_line_appends_crlf() {
        let mut port = VecPort { out: Vec::new() };
        port.write_line("paused").unwrap();
        port.write_str("x").unwrap();
        assert_eq!(port.out.as_slice(), b"paused\r\nx");
    }
}
