//! A small parser for CMake command invocations.
//!
//! Only as much of the CMake language as the generated `*-data.cmake` files
//! use: command invocations with unquoted, quoted and bracket arguments,
//! line comments and nested parentheses. The parser records byte spans so
//! callers can edit arguments in place without disturbing anything else.

use std::ops::Range;

/// One argument of a command invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arg {
    /// Byte span of the argument as written, quotes included.
    pub span: (usize, usize),
    pub kind: ArgKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Unquoted,
    Quoted,
    Bracket,
}

impl Arg {
    /// Text as written.
    pub fn raw<'a>(&self, src: &'a str) -> &'a str {
        &src[self.span.0..self.span.1]
    }

    /// Text without surrounding quotes or brackets.
    pub fn value<'a>(&self, src: &'a str) -> &'a str {
        let raw = self.raw(src);
        match self.kind {
            ArgKind::Unquoted => raw,
            ArgKind::Quoted => &raw[1..raw.len() - 1],
            ArgKind::Bracket => {
                let level = raw[1..].bytes().take_while(|&b| b == b'=').count();
                &raw[level + 2..raw.len() - level - 2]
            }
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.span.0..self.span.1
    }
}

/// A parsed command invocation such as `set(NAME a b c)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Command name as written (`set`, `SET`, ...).
    pub name: (usize, usize),
    pub args: Vec<Arg>,
    /// Byte offset of the opening parenthesis.
    pub open: usize,
    /// Byte offset of the closing parenthesis.
    pub close: usize,
}

impl Command {
    pub fn name<'a>(&self, src: &'a str) -> &'a str {
        &src[self.name.0..self.name.1]
    }

    /// Whether this is a `set(...)` invocation.
    pub fn is_set(&self, src: &str) -> bool {
        self.name(src).eq_ignore_ascii_case("set")
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Parse every command invocation in `src`.
///
/// Parsing stops at the first unterminated invocation; everything before it
/// is returned.
pub fn parse_commands(src: &str) -> Vec<Command> {
    let bytes = src.as_bytes();
    let mut commands = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b == b'#' {
            i = skip_comment(bytes, i);
            continue;
        }

        if b == b'"' {
            match scan_quoted(bytes, i) {
                Some(end) => i = end,
                None => break,
            }
            continue;
        }

        if is_ident_start(b) && (i == 0 || !is_ident(bytes[i - 1])) {
            let start = i;
            while i < bytes.len() && is_ident(bytes[i]) {
                i += 1;
            }
            let name_end = i;

            let mut j = i;
            while j < bytes.len() && matches!(bytes[j], b' ' | b'\t') {
                j += 1;
            }

            if j < bytes.len() && bytes[j] == b'(' {
                let Some((args, close)) = parse_args(bytes, j) else {
                    break;
                };
                commands.push(Command {
                    name: (start, name_end),
                    args,
                    open: j,
                    close,
                });
                i = close + 1;
            }
            continue;
        }

        i += 1;
    }

    commands
}

/// Parse arguments after the `(` at `open`; returns them with the offset of
/// the matching `)`.
fn parse_args(bytes: &[u8], open: usize) -> Option<(Vec<Arg>, usize)> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut i = open + 1;

    while i < bytes.len() {
        match bytes[i] {
            b if is_space(b) => i += 1,
            b'#' => i = skip_comment(bytes, i),
            b'(' => {
                depth += 1;
                i += 1;
            }
            b')' => {
                if depth == 0 {
                    return Some((args, i));
                }
                depth -= 1;
                i += 1;
            }
            b'"' => {
                let end = scan_quoted(bytes, i)?;
                args.push(Arg {
                    span: (i, end),
                    kind: ArgKind::Quoted,
                });
                i = end;
            }
            b'[' if bracket_level(bytes, i).is_some() => {
                let level = bracket_level(bytes, i)?;
                let end = scan_bracket(bytes, i, level)?;
                args.push(Arg {
                    span: (i, end),
                    kind: ArgKind::Bracket,
                });
                i = end;
            }
            _ => {
                let start = i;
                while i < bytes.len() && !is_space(bytes[i]) && !matches!(bytes[i], b'(' | b')')
                {
                    // An escaped character never ends the argument.
                    if bytes[i] == b'\\' && i + 1 < bytes.len() {
                        i += 1;
                    }
                    i += 1;
                }
                args.push(Arg {
                    span: (start, i),
                    kind: ArgKind::Unquoted,
                });
            }
        }
    }

    None
}

/// Skip a `#` comment; returns the offset of the line end.
fn skip_comment(bytes: &[u8], start: usize) -> usize {
    if let Some(level) = bracket_level(bytes, start + 1) {
        if let Some(end) = scan_bracket(bytes, start + 1, level) {
            return end;
        }
    }

    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |n| start + n)
}

/// Scan a quoted argument starting at `start`; returns the offset past the
/// closing quote.
fn scan_quoted(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// If a bracket opener `[`, `=`*, `[` starts at `start`, its level.
fn bracket_level(bytes: &[u8], start: usize) -> Option<usize> {
    if bytes.get(start) != Some(&b'[') {
        return None;
    }
    let level = bytes[start + 1..].iter().take_while(|&&b| b == b'=').count();
    (bytes.get(start + 1 + level) == Some(&b'[')).then_some(level)
}

/// Scan a bracket argument; returns the offset past its closer.
fn scan_bracket(bytes: &[u8], start: usize, level: usize) -> Option<usize> {
    let mut closer = Vec::with_capacity(level + 2);
    closer.push(b']');
    closer.extend(std::iter::repeat(b'=').take(level));
    closer.push(b']');

    let body = start + level + 2;
    bytes
        .get(body..)?
        .windows(closer.len())
        .position(|w| w == closer.as_slice())
        .map(|n| body + n + closer.len())
}
