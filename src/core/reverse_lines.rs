use std::io::{self, Read, Seek, SeekFrom};

pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Yields the lines of a seekable source from last to first.
///
/// Reads fixed-size chunks backward from the end, so a consumer that stops
/// early never touches the beginning of the file. Line terminators (`\n` or
/// `\r\n`) are stripped and invalid UTF-8 is replaced.
pub struct ReverseLines<R> {
    reader: R,
    pos: u64,
    len: u64,
    chunk_size: usize,
    buf: Vec<u8>,
    started: bool,
    done: bool,
}

impl<R: Read + Seek> ReverseLines<R> {
    pub fn new(reader: R) -> io::Result<Self> {
        Self::with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(mut reader: R, chunk_size: usize) -> io::Result<Self> {
        let len = reader.seek(SeekFrom::End(0))?;
        Ok(Self {
            reader,
            pos: len,
            len,
            chunk_size: chunk_size.max(1),
            buf: Vec::new(),
            started: false,
            done: len == 0,
        })
    }

    fn read_previous_chunk(&mut self) -> io::Result<()> {
        let size = (self.chunk_size as u64).min(self.pos);
        let start = self.pos - size;

        let mut chunk = vec![0u8; size as usize];
        self.reader.seek(SeekFrom::Start(start))?;
        self.reader.read_exact(&mut chunk)?;

        if !self.started {
            self.started = true;
            // 檔尾的換行不代表多一行空白
            if chunk.last() == Some(&b'\n') {
                chunk.pop();
            }
        }

        chunk.extend_from_slice(&self.buf);
        self.buf = chunk;
        self.pos = start;
        Ok(())
    }

    fn decode(mut bytes: Vec<u8>) -> String {
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }

    /// Total size of the underlying source in bytes.
    pub fn source_len(&self) -> u64 {
        self.len
    }

    /// Offset of the earliest byte read so far.
    pub fn position(&self) -> u64 {
        self.pos
    }
}

impl<R: Read + Seek> Iterator for ReverseLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            if let Some(idx) = self.buf.iter().rposition(|b| *b == b'\n') {
                let line = self.buf.split_off(idx + 1);
                self.buf.truncate(idx);
                return Some(Ok(Self::decode(line)));
            }

            if self.pos == 0 {
                self.done = true;
                return Some(Ok(Self::decode(std::mem::take(&mut self.buf))));
            }

            if let Err(e) = self.read_previous_chunk() {
                self.done = true;
                return Some(Err(e));
            }
        }
    }
}
