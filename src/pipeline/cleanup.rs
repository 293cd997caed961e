//! Leftover-command stripping and the final whitespace pass.
//!
//! Runs last: by now every recognised construct has been converted, so any
//! remaining spacing or page-layout command is noise. Page and line breaks
//! become paragraph breaks; pure spacing commands disappear.

use crate::error::ParseWarning;
use crate::pipeline::scan::strip_command_arguments;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// Spacing/formatting commands removed outright, with or without argument.
const REMOVE_COMMANDS: &[&str] = &[
    "vspace",
    "hspace",
    "bigskip",
    "smallskip",
    "medskip",
    "ignore",
    "bibliographystyle",
];

static RE_REMOVE_OPENERS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    REMOVE_COMMANDS
        .iter()
        .map(|cmd| (*cmd, Regex::new(&format!(r"\\{cmd}\{{")).unwrap()))
        .collect()
});
static RE_REMOVE_BARE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\(?:vspace|hspace|bigskip|smallskip|medskip|ignore|bibliographystyle)\s*")
        .unwrap()
});
static RE_BREAK_BARE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\(?:newpage|pagebreak|linebreak|clearpage|cleardoublepage)\s*").unwrap()
});
static RE_FORMATTING_CMDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\\(vspace|hspace|bigskip|newpage|smallskip|medskip|pagebreak|linebreak|clearpage|cleardoublepage)(\[[^\]]*\])?(\{[^}]*\})?",
    )
    .unwrap()
});
static RE_NEWLINE_PADDING: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]*\n[ \t]*").unwrap());
static RE_MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());
static RE_EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Remove leftover spacing commands (argument and bare forms) and turn
/// page/line-break commands into paragraph breaks.
pub fn remove_leftover_commands(text: &str, warnings: &mut Vec<ParseWarning>) -> String {
    let mut text = text.to_string();
    for (cmd, opener) in RE_REMOVE_OPENERS.iter() {
        let (stripped, balanced) = strip_command_arguments(&text, opener);
        if !balanced {
            warn!(command = cmd, "unbalanced braces while removing command");
            warnings.push(ParseWarning::UnbalancedBraces {
                command: cmd.to_string(),
            });
        }
        text = stripped;
    }

    let text = RE_REMOVE_BARE.replace_all(&text, "");
    let text = RE_BREAK_BARE.replace_all(&text, "\n\n");
    RE_EXCESS_NEWLINES.replace_all(&text, "\n\n").into_owned()
}

/// Sweep up bracket/brace argument forms of the formatting commands that the
/// first pass may have left behind.
pub fn remove_formatting_cmds(text: &str) -> String {
    RE_FORMATTING_CMDS.replace_all(text, " ").into_owned()
}

/// Normalise whitespace around every line, collapse multi-spaces and excess
/// blank lines, un-escape literal `\%`/`\&`, and guarantee a single trailing
/// newline.
pub fn final_cleanup(text: &str) -> String {
    let text = RE_NEWLINE_PADDING.replace_all(text, "\n");
    let text = RE_MULTI_SPACE.replace_all(&text, " ");
    let text = RE_EXCESS_NEWLINES.replace_all(&text, "\n\n");
    let text = text.replace(r"\%", "%").replace(r"\&", "&");
    format!("{}\n", text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_commands_removed() {
        let mut w = Vec::new();
        let out = remove_leftover_commands(r"a \vspace{1em} b \bigskip c", &mut w);
        assert_eq!(out, "a  b c");
        assert!(w.is_empty());
    }

    #[test]
    fn bibliographystyle_removed_with_argument() {
        let mut w = Vec::new();
        let out = remove_leftover_commands(r"text \bibliographystyle{plain} end", &mut w);
        assert_eq!(out, "text  end");
    }

    #[test]
    fn page_breaks_become_paragraph_breaks() {
        let mut w = Vec::new();
        let out = remove_leftover_commands("a \\newpage b", &mut w);
        assert_eq!(out, "a \n\nb");
    }

    #[test]
    fn formatting_cmds_with_arguments_swept() {
        assert_eq!(remove_formatting_cmds(r"a \hspace[2pt]{1em} b"), "a   b");
        assert_eq!(remove_formatting_cmds(r"a \pagebreak b"), "a   b");
    }

    #[test]
    fn final_cleanup_normalises() {
        assert_eq!(final_cleanup("  a   b  \n\n\n\n  c  "), "a b\n\nc\n");
    }

    #[test]
    fn final_cleanup_single_trailing_newline() {
        assert_eq!(final_cleanup("x\n\n\n"), "x\n");
        assert_eq!(final_cleanup("x"), "x\n");
    }

    #[test]
    fn final_cleanup_unescapes_literals() {
        assert_eq!(final_cleanup(r"50\% discount at AT\&T"), "50% discount at AT&T\n");
    }
}
