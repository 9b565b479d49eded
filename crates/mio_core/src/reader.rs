use std::io::{self, Read, Seek, SeekFrom};

/// Positioned reader over a save container.
///
/// Every read is addressed absolutely. Bytes past the end of the container
/// read as zero instead of failing: a truncated save degrades into empty
/// shelves and `builtin` fields rather than aborting the run. Any other I/O
/// failure is still returned to the caller.
///
/// Text fields are decoded lossily: every byte sequence that is not valid
/// UTF-8 becomes U+FFFD. Two names that differ only in such bytes decode to
/// the same string, and so to the same output filename.
pub struct SaveReader<R> {
    inner: R,
}

impl<R: Read + Seek> SaveReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Fill `buf` from `offset`, zero-filling whatever lies beyond the end.
    /// Returns how many bytes actually came from the container.
    pub fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        buf.fill(0);
        self.inner.seek(SeekFrom::Start(offset))?;

        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    pub fn read_bytes(&mut self, offset: u64, n: usize) -> io::Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.read_at(offset, &mut buf)?;
        Ok(buf)
    }

    pub fn read_array<const N: usize>(&mut self, offset: u64) -> io::Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.read_at(offset, &mut buf)?;
        Ok(buf)
    }

    pub fn read_u8(&mut self, offset: u64) -> io::Result<u8> {
        let [b] = self.read_array::<1>(offset)?;
        Ok(b)
    }

    /// Read a null-terminated string of at most `max_len` bytes.
    ///
    /// An empty field (first byte zero) decodes to [`BUILTIN_SENTINEL`]; the
    /// game leaves the metadata of its own bundled content blank, so the
    /// sentinel marks an item as system-provided.
    pub fn read_text_field(&mut self, offset: u64, max_len: usize) -> io::Result<String> {
        let bytes = self.read_bytes(offset, max_len)?;
        Ok(decode_text_field(&bytes))
    }
}

pub const BUILTIN_SENTINEL: &str = "builtin";

pub fn decode_text_field(field: &[u8]) -> String {
    match field.first() {
        None | Some(0) => BUILTIN_SENTINEL.to_string(),
        Some(_) => {
            let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
            String::from_utf8_lossy(&field[..end]).into_owned()
        }
    }
}
