use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{PhaseSError, Result};
use crate::frame::RawFrame;

/// Magic tag of binary (raw) RGB PPM files.
pub const PPM_MAGIC: &str = "P6";

/// The only supported sample range.
pub const PPM_MAXVAL: usize = 255;

/// Parsed PPM header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PpmHeader {
    pub width: usize,
    pub height: usize,
    pub maxval: usize,
    /// Byte offset of the first payload byte.
    pub data_offset: usize,
}

impl PpmHeader {
    /// Payload size implied by the header, `None` on overflow.
    pub fn payload_len(&self) -> Option<usize> {
        self.width.checked_mul(self.height)?.checked_mul(3)
    }
}

#[inline]
fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

fn skip_separators(buf: &[u8], mut pos: usize) -> usize {
    while pos < buf.len() && is_separator(buf[pos]) {
        pos += 1;
    }
    pos
}

/// Header tokenizer. `#` at a token start opens a comment up to CR or LF.
struct Tokens<'a> {
    buf: &'a [u8],
    pos: usize,
    path: &'a Path,
}

impl<'a> Tokens<'a> {
    fn next_token(&mut self) -> Result<&'a [u8]> {
        let buf = self.buf;
        let mut pos = skip_separators(buf, self.pos);
        while pos < buf.len() && buf[pos] == b'#' {
            while pos < buf.len() && !matches!(buf[pos], b'\r' | b'\n') {
                pos += 1;
            }
            pos = skip_separators(buf, pos);
        }
        if pos >= buf.len() {
            return Err(PhaseSError::format(
                self.path,
                "unexpected end of input while parsing PPM header",
            ));
        }
        let start = pos;
        while pos < buf.len() && !is_separator(buf[pos]) {
            pos += 1;
        }
        self.pos = pos;
        Ok(&buf[start..pos])
    }

    fn next_number(&mut self, field: &str) -> Result<usize> {
        let token = self.next_token()?;
        std::str::from_utf8(token)
            .ok()
            .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| {
                PhaseSError::format(
                    self.path,
                    format!("invalid {field} {:?}", String::from_utf8_lossy(token)),
                )
            })
    }
}

/// Parse and validate the header of a P6 buffer.
pub fn parse_header(path: &Path, buf: &[u8]) -> Result<PpmHeader> {
    let mut tokens = Tokens { buf, pos: 0, path };

    let magic = tokens.next_token()?;
    if magic != PPM_MAGIC.as_bytes() {
        return Err(PhaseSError::format(
            path,
            format!(
                "unsupported magic {}, expected {PPM_MAGIC}",
                String::from_utf8_lossy(magic)
            ),
        ));
    }

    let width = tokens.next_number("width")?;
    let height = tokens.next_number("height")?;
    let maxval = tokens.next_number("maxval")?;
    if maxval != PPM_MAXVAL {
        return Err(PhaseSError::format(
            path,
            format!("unsupported maxval {maxval}, expected {PPM_MAXVAL}"),
        ));
    }

    let mut header = PpmHeader {
        width,
        height,
        maxval,
        data_offset: skip_separators(buf, tokens.pos),
    };
    header.data_offset = resolve_data_offset(&header, buf, tokens.pos);
    Ok(header)
}

/// Pick the payload start after the maxval token ending at `maxval_end`.
///
/// Separators after maxval are skipped, except when that leaves the payload
/// short and exactly one separator byte yields the declared size: then the
/// skipped bytes belong to the payload (a first sample of 9, 10, 13 or 32).
fn resolve_data_offset(header: &PpmHeader, buf: &[u8], maxval_end: usize) -> usize {
    let skipped = header.data_offset;
    let Some(need) = header.payload_len() else {
        return skipped;
    };
    let single = maxval_end + 1;
    if buf.len() - skipped < need && buf.len().checked_sub(single) == Some(need) {
        single
    } else {
        skipped
    }
}

/// Decode an in-memory P6 image.
///
/// The payload must be exactly `width * height * 3` bytes; both truncated
/// and trailing data are rejected.
pub fn parse_ppm(path: &Path, buf: &[u8]) -> Result<RawFrame> {
    let header = parse_header(path, buf)?;
    let need = header.payload_len().ok_or_else(|| {
        PhaseSError::format(
            path,
            format!("image dimensions too large: {}x{}", header.width, header.height),
        )
    })?;

    let payload = &buf[header.data_offset..];
    if payload.len() != need {
        return Err(PhaseSError::format(
            path,
            format!("invalid payload length {} != {need}", payload.len()),
        ));
    }

    RawFrame::new(path, header.width, header.height, payload.to_vec()).ok_or_else(|| {
        PhaseSError::format(path, "payload does not match frame dimensions")
    })
}

fn map_file(path: &Path) -> Result<Option<Mmap>> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(None);
    }
    let mmap = unsafe { Mmap::map(&file)? };
    Ok(Some(mmap))
}

/// Read and decode a P6 file.
pub fn read_ppm(path: &Path) -> Result<RawFrame> {
    match map_file(path)? {
        Some(mmap) => parse_ppm(path, &mmap),
        None => parse_ppm(path, &[]),
    }
}

/// Read only the header of a P6 file.
pub fn read_ppm_header(path: &Path) -> Result<PpmHeader> {
    match map_file(path)? {
        Some(mmap) => parse_header(path, &mmap),
        None => parse_header(path, &[]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PpmHeader {
        parse_header(Path::new("t.ppm"), s.as_bytes()).unwrap()
    }

    #[test]
    fn header_with_mixed_separators() {
        let h = p("P6\t4\r\n3 \n255\n");
        assert_eq!((h.width, h.height, h.maxval), (4, 3, 255));
        assert_eq!(h.data_offset, 13);
    }

    #[test]
    fn header_with_comments_between_tokens() {
        let h = p("P6\n# made by bench rig\n2 # width\n# another\n2\n255\n");
        assert_eq!((h.width, h.height), (2, 2));
    }

    #[test]
    fn rejects_non_numeric_width() {
        let err = parse_header(Path::new("t.ppm"), b"P6 abc 2 255\n").unwrap_err();
        assert!(err.to_string().contains("invalid width"), "got: {err}");
    }

    #[test]
    fn payload_starting_with_separator_byte_is_kept() {
        let mut buf = b"P6\n1 1\n255\n".to_vec();
        buf.extend_from_slice(&[b'\n', 20, 30]);
        let h = parse_header(Path::new("t.ppm"), &buf).unwrap();
        assert_eq!(h.data_offset, 11);
    }

    #[test]
    fn payload_len_overflow_is_none() {
        let h = PpmHeader {
            width: usize::MAX,
            height: 2,
            maxval: 255,
            data_offset: 0,
        };
        assert!(h.payload_len().is_none());
    }
}
