//! Source location tracking: file identities and byte-offset spans, plus a
//! [`SourceMap`] that turns a byte offset back into a `(line, column)` pair
//! for diagnostics.

use crate::define_idx;
use std::sync::Arc;

define_idx! {
    /// Identifies one registered source file (or the interned "no filename"
    /// sentinel used for internally-constructed cursors).
    FileId
}

/// A byte range within one source file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub file: FileId,
    pub lo: u32,
    pub hi: u32,
}

impl Span {
    pub fn new(file: FileId, lo: u32, hi: u32) -> Self {
        Self { file, lo, hi }
    }

    pub fn point(file: FileId, at: u32) -> Self {
        Self { file, lo: at, hi: at }
    }
}

/// One registered source file: its name and content, plus precomputed
/// line-start offsets so `line_col` is a binary search rather than a scan.
struct SourceFile {
    name: Arc<str>,
    content: Arc<str>,
    line_starts: Vec<u32>,
}

impl SourceFile {
    fn new(name: impl Into<Arc<str>>, content: impl Into<Arc<str>>) -> Self {
        let content = content.into();
        let mut line_starts = vec![0u32];
        for (i, b) in content.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        Self { name: name.into(), content, line_starts }
    }

    /// 1-based (line, column) for a byte offset into this file's content.
    fn line_col(&self, offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts[line_idx];
        let column = offset.saturating_sub(line_start) + 1;
        (line_idx as u32 + 1, column)
    }
}

/// Owns every source file registered with one interpreter instance.
///
/// Seeded with an empty "no filename" entry at [`FileId(0)`] so internally
/// constructed cursors (macro-expansion buffers, `#if` scratch parses) have
/// a valid file to report diagnostics against.
pub struct SourceMap {
    files: crate::IndexVec<FileId, SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        let mut files = crate::IndexVec::new();
        files.push(SourceFile::new("", ""));
        Self { files }
    }

    pub fn add_file(&mut self, name: impl Into<Arc<str>>, content: impl Into<Arc<str>>) -> FileId {
        self.files.push(SourceFile::new(name, content))
    }

    pub fn file_name(&self, file: FileId) -> &str {
        &self.files[file].name
    }

    pub fn file_content(&self, file: FileId) -> &str {
        &self.files[file].content
    }

    pub fn line_col(&self, span: Span) -> (u32, u32) {
        self.files[span.file].line_col(span.lo)
    }
}

impl Default for SourceMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_tracks_newlines() {
        let mut map = SourceMap::new();
        let file = map.add_file("t.c", "int a;\nint b;\n");
        assert_eq!(map.line_col(Span::point(file, 0)), (1, 1));
        assert_eq!(map.line_col(Span::point(file, 7)), (2, 1));
        assert_eq!(map.line_col(Span::point(file, 11)), (2, 5));
    }

    #[test]
    fn empty_filename_sentinel_exists() {
        let map = SourceMap::new();
        assert_eq!(map.file_name(FileId(0)), "");
    }
}
