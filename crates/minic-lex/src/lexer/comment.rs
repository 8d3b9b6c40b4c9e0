//! `/* block */` and `// line` comment skipping.

use super::core::LexErrorAt;
use crate::cursor::Cursor;

/// If the cursor sits at the start of a comment, consumes it and returns the
/// number of physical newlines swallowed (to be replayed as `EndOfLine`
/// sentinels by the caller). Returns `None` if there is no comment here.
pub(super) fn skip(cursor: &mut Cursor) -> Result<Option<u32>, LexErrorAt> {
    if cursor.current() != b'/' {
        return Ok(None);
    }
    match cursor.at(1) {
        b'/' => {
            cursor.advance();
            cursor.advance();
            while !cursor.is_at_end() && cursor.current() != b'\n' {
                cursor.advance();
            }
            Ok(Some(0))
        }
        b'*' => {
            cursor.advance();
            cursor.advance();
            let mut newlines = 0;
            loop {
                if cursor.is_at_end() {
                    // Unterminated block comment: picoc treats end-of-file
                    // as an implicit close rather than erroring.
                    break;
                }
                if cursor.current() == b'\n' {
                    newlines += 1;
                    cursor.advance();
                    continue;
                }
                if cursor.current() == b'*' && cursor.at(1) == b'/' {
                    cursor.advance();
                    cursor.advance();
                    break;
                }
                cursor.advance();
            }
            Ok(Some(newlines))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_line_comment_up_to_newline() {
        let mut c = Cursor::new("// hi\nx");
        let n = skip(&mut c).unwrap();
        assert_eq!(n, Some(0));
        assert_eq!(c.current(), b'\n');
    }

    #[test]
    fn skips_block_comment_counting_embedded_newlines() {
        let mut c = Cursor::new("/* a\nb\nc */x");
        let n = skip(&mut c).unwrap();
        assert_eq!(n, Some(2));
        assert_eq!(c.current(), b'x');
    }
}
