use std::sync::Arc;

use swc_common::{
    BytePos, FileName, FilePathMapping, Globals, SourceFile, SourceMap, Span, Spanned,
};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax, error::Error as SwcError};
use thiserror::Error;

/// A source file that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file}:{line}:{column}: {message}")]
pub struct SourceParseError {
    pub file: String,
    /// 1-based line of the error, 0 when the parser reported no position.
    pub line: usize,
    pub column: usize,
    pub message: String,
}

const BOM: char = '\u{feff}';

/// A parsed module together with the position map of the exact text that was parsed.
pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub source_file: Arc<SourceFile>,
    /// The source text the module was parsed from, without a leading BOM.
    pub code: String,
    /// Whether the file started with a UTF-8 byte order mark.
    pub bom: bool,
}

impl ParsedSource {
    /// Put back the byte order mark [`ParsedSource::code`] was stripped of.
    pub fn restore_bom(&self, code: String) -> String {
        if self.bom {
            format!("{}{}", BOM, code)
        } else {
            code
        }
    }

    /// 1-based line and 0-based character column of `pos`.
    pub fn position(&self, pos: BytePos) -> (usize, usize) {
        if !self.contains(pos) {
            return (0, 0);
        }
        let loc = self.source_map.lookup_char_pos(pos);
        (loc.line, loc.col.0)
    }

    /// Byte offset of `pos` into [`ParsedSource::code`].
    pub fn offset(&self, pos: BytePos) -> usize {
        pos.0.saturating_sub(self.source_file.start_pos.0) as usize
    }

    /// Byte range of `span` into [`ParsedSource::code`].
    pub fn range(&self, span: Span) -> std::ops::Range<usize> {
        self.offset(span.lo)..self.offset(span.hi)
    }

    /// The text of `span` as it appears in the source.
    pub fn snippet(&self, span: Span) -> &str {
        self.code.get(self.range(span)).unwrap_or_default()
    }

    /// Full text of a 1-based line, without the trailing newline.
    pub fn line_text(&self, line: usize) -> String {
        if line == 0 {
            return String::new();
        }
        self.source_file
            .get_line(line - 1)
            .map(|cow| cow.trim_end_matches(['\r', '\n']).to_string())
            .unwrap_or_default()
    }

    fn contains(&self, pos: BytePos) -> bool {
        pos >= self.source_file.start_pos && pos <= self.source_file.end_pos
    }
}

/// Create an empty source map to share between parses.
pub fn new_source_map() -> Arc<SourceMap> {
    Arc::new(SourceMap::new(FilePathMapping::empty()))
}

/// Pick the grammar for a file.
///
/// Every file is parsed as TypeScript with decorators. JSX is enabled for all
/// extensions except `.ts`, `.mts` and `.cts`, where TypeScript forbids JSX and
/// `<T>value` casts have to parse.
pub fn syntax_for_path(file_path: &str) -> Syntax {
    let no_jsx = [".ts", ".mts", ".cts"]
        .iter()
        .any(|ext| file_path.ends_with(ext));

    Syntax::Typescript(TsSyntax {
        tsx: !no_jsx,
        decorators: true,
        ..Default::default()
    })
}

/// Parse JS/TS/JSX source code into a module.
///
/// Accepts a shared SourceMap for thread-safe parallel parsing. The returned
/// [`ParsedSource`] keeps positions for exactly `code`, so line/column values
/// computed from it stay valid until the file changes on disk.
///
/// A leading BOM is stripped before parsing; offsets index the stripped text.
/// Errors the parser recovers from (legacy octals, `with` in module code,
/// duplicate constructors) fail the parse like fatal ones.
pub fn parse_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource, SourceParseError> {
    use swc_common::GLOBALS;

    let (code, bom) = match code.strip_prefix(BOM) {
        Some(rest) => (rest.to_string(), true),
        None => (code, false),
    };

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(
            FileName::Real(file_path.into()).into(),
            code.clone(),
        );

        let mut parser = Parser::new(
            syntax_for_path(file_path),
            StringInput::from(&*source_file),
            None,
        );

        let to_error = |err: SwcError| {
            let pos = err.span().lo;
            let (line, column) = if pos >= source_file.start_pos && pos <= source_file.end_pos {
                let loc = source_map.lookup_char_pos(pos);
                (loc.line, loc.col.0)
            } else {
                (0, 0)
            };
            SourceParseError {
                file: file_path.to_string(),
                line,
                column,
                message: err.kind().msg().to_string(),
            }
        };

        let module = parser.parse_module().map_err(&to_error)?;
        if let Some(err) = parser.take_errors().into_iter().next() {
            return Err(to_error(err));
        }

        Ok(ParsedSource {
            module,
            source_map: source_map.clone(),
            source_file: source_file.clone(),
            code,
            bom,
        })
    })
}
