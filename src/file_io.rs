use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::buffer::Buffer;
use crate::error::{EditorError, Result};

pub struct FileIO;

impl FileIO {
    pub fn open<P: AsRef<Path>>(path: P, tab_stop: usize) -> Result<Buffer> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let file = File::open(path).map_err(|e| EditorError::file_load("fopen", &path_str, e))?;
        let lines = Self::load_lines(BufReader::new(file))
            .map_err(|e| EditorError::file_load("getline", &path_str, e))?;

        tracing::info!(path = %path_str, lines = lines.len(), "file_loaded");
        Ok(Buffer::from_lines(lines, tab_stop))
    }

    /// 行単位で読み込み、末尾の \r / \n を取り除く
    pub fn load_lines<R: BufRead>(reader: R) -> io::Result<Vec<Vec<u8>>> {
        reader
            .split(b'\n')
            .map(|line| {
                let mut line = line?;
                while matches!(line.last(), Some(b'\r' | b'\n')) {
                    line.pop();
                }
                Ok(line)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_with_trailing_newline() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "line1").unwrap();
        writeln!(file, "line2").unwrap();
        file.flush().unwrap();

        let buffer = FileIO::open(file.path(), 4).unwrap();

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.row(0).unwrap().chars(), b"line1");
        assert_eq!(buffer.row(1).unwrap().chars(), b"line2");
    }

    #[test]
    fn test_file_without_trailing_newline() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "line1\nline2").unwrap();
        file.flush().unwrap();

        let buffer = FileIO::open(file.path(), 4).unwrap();

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.row(1).unwrap().chars(), b"line2");
    }

    #[test]
    fn test_crlf_is_stripped() {
        let lines = FileIO::load_lines(&b"a\r\nbb\r\n\r\nc"[..]).unwrap();
        assert_eq!(lines, vec![b"a".to_vec(), b"bb".to_vec(), b"".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn test_empty_file() {
        let file = NamedTempFile::new().unwrap();

        let buffer = FileIO::open(file.path(), 4).unwrap();

        assert!(buffer.is_empty());
    }

    #[test]
    fn test_file_with_only_newline() {
        // 改行のみのファイルは空行 1 行
        let lines = FileIO::load_lines(&b"\n"[..]).unwrap();
        assert_eq!(lines, vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_tabs_are_rendered() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "\tindented\n").unwrap();
        file.flush().unwrap();

        let buffer = FileIO::open(file.path(), 4).unwrap();

        assert_eq!(buffer.row(0).unwrap().chars(), b"\tindented");
        assert_eq!(buffer.row(0).unwrap().render(), b"    indented");
    }

    #[test]
    fn test_invalid_utf8_loads() {
        let lines = FileIO::load_lines(&[0xff, 0xfe, b'\n', b'x'][..]).unwrap();
        assert_eq!(lines, vec![vec![0xff, 0xfe], b"x".to_vec()]);
    }

    #[test]
    fn test_missing_file_is_file_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.txt");

        let err = FileIO::open(&path, 4).err().unwrap();

        assert!(matches!(err, EditorError::FileLoad { .. }));
        assert_eq!(err.op(), "fopen");
    }
}
