//! Brace-balanced argument scanning.
//!
//! ## Why not a regex?
//!
//! A LaTeX command argument may itself contain `{}` pairs
//! (`\caption{The \emph{fast} path}`), and a non-recursive regex cannot
//! match the closing brace of the *outer* group. The scanner walks forward
//! from the character after the opening `{`, keeping a depth counter, and
//! returns the span when depth reaches zero.
//!
//! Unbalanced input never raises: the scanner returns the remainder of the
//! text tagged as [`ScannedArgument::balanced`]` == false` so callers can log
//! a [`crate::error::ParseWarning`] and continue with a best-effort value.
//! Used for title/author extraction, caption extraction, and
//! leftover-command removal.

use regex::Regex;

/// The result of scanning one command argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedArgument {
    /// Text between the opening brace and its balancing `}` — or the
    /// remainder of the input when unbalanced.
    pub text: String,
    /// Byte offset just past the closing `}` (end of input when unbalanced).
    pub end: usize,
    /// False when end-of-text was reached with unclosed braces.
    pub balanced: bool,
}

/// Scan the argument of a command whose opening `{` ends at byte `start`.
///
/// `start` must lie on a char boundary (callers pass `Match::end()` of a
/// pattern ending in `{`). Braces are ASCII, so byte-wise scanning is safe
/// in UTF-8 text.
pub fn scan_argument(text: &str, start: usize) -> ScannedArgument {
    let bytes = text.as_bytes();
    let mut depth = 1usize;
    let mut i = start;
    while i < bytes.len() && depth > 0 {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            _ => {}
        }
        i += 1;
    }
    if depth == 0 {
        ScannedArgument {
            text: text[start..i - 1].to_string(),
            end: i,
            balanced: true,
        }
    } else {
        ScannedArgument {
            text: text[start..].to_string(),
            end: text.len(),
            balanced: false,
        }
    }
}

/// Remove every `\cmd{...}` instance matched by `opener` (a pattern ending in
/// the opening brace), consuming the brace-balanced argument.
///
/// Returns the stripped text and whether every removed argument was balanced;
/// an unbalanced final argument swallows the rest of the input, as the
/// scanner's best-effort contract dictates.
pub fn strip_command_arguments(text: &str, opener: &Regex) -> (String, bool) {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    let mut all_balanced = true;
    while let Some(m) = opener.find_at(text, pos) {
        out.push_str(&text[pos..m.start()]);
        let arg = scan_argument(text, m.end());
        all_balanced &= arg.balanced;
        pos = arg.end;
    }
    out.push_str(&text[pos..]);
    (out, all_balanced)
}

/// True when the char at byte `index` is escaped by an odd run of
/// backslashes.
pub fn is_escaped_at(text: &str, index: usize) -> bool {
    let mut backslashes = 0usize;
    for &b in text.as_bytes()[..index].iter().rev() {
        if b == b'\\' {
            backslashes += 1;
        } else {
            break;
        }
    }
    backslashes % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static RE_CAPTION_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\caption\{").unwrap());

    #[test]
    fn flat_argument() {
        let text = r"\caption{A simple caption} rest";
        let m = RE_CAPTION_OPEN.find(text).unwrap();
        let arg = scan_argument(text, m.end());
        assert!(arg.balanced);
        assert_eq!(arg.text, "A simple caption");
        assert_eq!(&text[arg.end..], " rest");
    }

    #[test]
    fn nested_braces() {
        let text = r"\caption{The \emph{fast} path} rest";
        let m = RE_CAPTION_OPEN.find(text).unwrap();
        let arg = scan_argument(text, m.end());
        assert!(arg.balanced);
        assert_eq!(arg.text, r"The \emph{fast} path");
    }

    #[test]
    fn unbalanced_takes_remainder() {
        let text = r"\caption{never closed";
        let m = RE_CAPTION_OPEN.find(text).unwrap();
        let arg = scan_argument(text, m.end());
        assert!(!arg.balanced);
        assert_eq!(arg.text, "never closed");
        assert_eq!(arg.end, text.len());
    }

    #[test]
    fn strip_removes_command_and_argument() {
        static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\vspace\{").unwrap());
        let (out, balanced) = strip_command_arguments(r"a \vspace{1em} b \vspace{2em} c", &RE);
        assert!(balanced);
        assert_eq!(out, "a  b  c");
    }

    #[test]
    fn strip_flags_unbalanced_tail() {
        static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\vspace\{").unwrap());
        let (out, balanced) = strip_command_arguments(r"a \vspace{1em b", &RE);
        assert!(!balanced);
        assert_eq!(out, "a ");
    }

    #[test]
    fn escape_parity() {
        assert!(is_escaped_at(r"50\% off", 3));
        assert!(!is_escaped_at("50% off", 2));
        assert!(!is_escaped_at(r"a\\% b", 3)); // double backslash: not escaped
    }
}
