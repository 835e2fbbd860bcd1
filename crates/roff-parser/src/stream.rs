//! Byte-level primitives over a seekable source.
//!
//! Tokenizers peek and rewind constantly, so everything here works in
//! absolute offsets and leaves the cursor at a well-defined position.
//! Moves are issued as relative seeks so a `BufReader` keeps its buffer
//! across a rewind.

use std::io::{self, Read, Seek, SeekFrom};

use crate::error::{Result, RoffError};

/// Read one byte, `None` at end of input.
pub(crate) fn read_byte<R: Read>(stream: &mut R) -> Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match stream.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

pub(crate) fn position<R: Seek>(stream: &mut R) -> Result<u64> {
    Ok(stream.stream_position()?)
}

pub(crate) fn seek_to<R: Seek>(stream: &mut R, offset: u64) -> Result<()> {
    let delta = offset.wrapping_sub(position(stream)?) as i64;
    if delta != 0 {
        stream.seek_relative(delta)?;
    }
    Ok(())
}

/// True when no byte is left; the cursor does not move.
pub(crate) fn at_end<R: Read + Seek>(stream: &mut R) -> Result<bool> {
    let pos = position(stream)?;
    match read_byte(stream)? {
        None => Ok(true),
        Some(_) => {
            seek_to(stream, pos)?;
            Ok(false)
        }
    }
}

/// Total length of the source; the cursor does not move.
///
/// Seeking to the end drops any read buffer, so this is kept off hot paths.
pub(crate) fn stream_len<R: Seek>(stream: &mut R) -> Result<u64> {
    let pos = position(stream)?;
    let len = stream.seek(SeekFrom::End(0))?;
    stream.seek(SeekFrom::Start(pos))?;
    Ok(len)
}

/// Move the cursor `count` bytes forward, failing if that runs past the end.
///
/// Only the last byte of the range is probed; on failure the cursor is
/// left where it started.
pub(crate) fn advance<R: Read + Seek>(stream: &mut R, count: u64) -> Result<u64> {
    let start = position(stream)?;
    if count == 0 {
        return Ok(start);
    }

    let end = start.checked_add(count).filter(|end| *end <= i64::MAX as u64);
    if let Some(end) = end {
        seek_to(stream, end - 1)?;
        if read_byte(stream)?.is_some() {
            return Ok(end);
        }
    }

    seek_to(stream, start)?;
    Err(RoffError::UnexpectedEof {
        offset: stream_len(stream)?,
    })
}

/// Fill `buf` from `offset`; a short read is reported as end of input.
pub(crate) fn read_exact_at<R: Read + Seek>(
    stream: &mut R,
    offset: u64,
    buf: &mut [u8],
) -> Result<()> {
    seek_to(stream, offset)?;
    stream.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => RoffError::UnexpectedEof {
            offset: offset + buf.len() as u64,
        },
        _ => RoffError::Io(e),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn at_end_does_not_consume() {
        let mut stream = Cursor::new(b"ab".to_vec());
        assert!(!at_end(&mut stream).unwrap());
        assert_eq!(position(&mut stream).unwrap(), 0);
        stream.set_position(2);
        assert!(at_end(&mut stream).unwrap());
    }

    #[test]
    fn advance_checks_length() {
        let mut stream = Cursor::new(vec![0u8; 8]);
        assert_eq!(advance(&mut stream, 8).unwrap(), 8);
        stream.set_position(4);
        assert!(matches!(
            advance(&mut stream, 5),
            Err(RoffError::UnexpectedEof { offset: 8 })
        ));
    }

    #[test]
    fn short_read_is_eof() {
        let mut stream = Cursor::new(vec![1u8, 2, 3]);
        let mut buf = [0u8; 4];
        assert!(matches!(
            read_exact_at(&mut stream, 1, &mut buf),
            Err(RoffError::UnexpectedEof { .. })
        ));
    }
}
