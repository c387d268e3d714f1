use crate::commands::open_source;
use anyhow::Result;
use simpl_core::{Error, Lexer};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::debug;

/// `simpl tokens <PATH>`
pub fn print_tokens(path: &Path) -> Result<()> {
    let source = open_source(path)?;
    let stdout = io::stdout();
    write_tokens(source, &mut stdout.lock())
}

/// Write one token kind name per line, stopping at the first lexical error
pub fn write_tokens<R: BufRead, W: Write>(source: R, out: &mut W) -> Result<()> {
    let mut lexer = Lexer::new(source).map_err(Error::from)?;
    let mut count = 0usize;

    while let Some(spanned) = lexer.next_token().map_err(Error::from)? {
        writeln!(out, "{}", spanned.token.kind().name())?;
        count += 1;
    }

    debug!(tokens = count, "tokenized source");
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_token_kinds() {
        let mut out = Vec::new();
        write_tokens("x := 1.5;\nprint x;".as_bytes(), &mut out).unwrap();

        let kinds = String::from_utf8(out).unwrap();
        assert_eq!(
            kinds.lines().collect::<Vec<_>>(),
            vec!["Identifier", "Assign", "Float", "Semicolon", "Print", "Identifier", "Semicolon"]
        );
    }

    #[test]
    fn test_lex_error_keeps_earlier_tokens() {
        let mut out = Vec::new();
        let err = write_tokens("a := 2; @".as_bytes(), &mut out).unwrap_err();

        assert_eq!(String::from_utf8(out).unwrap(), "Identifier\nAssign\nInteger\nSemicolon\n");
        assert!(err.to_string().starts_with("lexical error: unexpected character '@'"));
    }
}
