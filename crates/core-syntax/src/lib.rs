//! Syntax descriptors and the per-line highlight rule engine.
//!
//! A `Syntax` is a static description of one language: filename matchers,
//! keyword table, comment delimiters and feature flags. The engine
//! (`highlight_line`) is stateless across calls — the only cross-line input
//! is the previous line's open-comment flag, which the buffer threads through
//! when it refreshes dirty lines. That keeps the cascade logic (a line whose
//! open-comment state flips forces the next line to re-highlight) entirely in
//! the buffer's worklist; the engine itself never looks at neighbors.

mod engine;

pub use engine::{LineHighlight, highlight_line};

/// Per-byte highlight classification over a line's render text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Normal,
    Number,
    String,
    /// Search-match override applied on top of syntax classes.
    Match,
    Comment,
    MultilineComment,
    Keyword1,
    /// Type-like keywords (marked with a trailing `|` in the keyword table).
    Keyword2,
    Function,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SyntaxFlags: u8 {
        const NUMBERS   = 0b0000_0001;
        const STRINGS   = 0b0000_0010;
        const FUNCTIONS = 0b0000_0100;
    }
}

/// Static description of one language's highlighting rules.
#[derive(Debug)]
pub struct Syntax {
    pub filetype: &'static str,
    /// Extension matchers (leading `.`) or plain substrings of the filename.
    pub filematch: &'static [&'static str],
    /// Keyword table; a trailing `|` marks the type-keyword class.
    pub keywords: &'static [&'static str],
    pub singleline_comment_start: Option<&'static str>,
    pub multiline_comment_start: Option<&'static str>,
    pub multiline_comment_end: Option<&'static str>,
    pub flags: SyntaxFlags,
}

const C_KEYWORDS: &[&str] = &[
    "switch", "if", "while", "for", "break", "continue", "return", "else",
    "struct", "union", "typedef", "static", "enum", "class", "case",
    "include", "define",
    // Type keywords.
    "int|", "long|", "double|", "float|", "char|", "unsigned|", "signed|",
    "void|",
];

/// The built-in highlight database. One entry today; matching is first-wins.
pub static HLDB: &[Syntax] = &[Syntax {
    filetype: "C",
    filematch: &[".c", ".h", ".cpp"],
    keywords: C_KEYWORDS,
    singleline_comment_start: Some("//"),
    multiline_comment_start: Some("/*"),
    multiline_comment_end: Some("*/"),
    flags: SyntaxFlags::NUMBERS
        .union(SyntaxFlags::STRINGS)
        .union(SyntaxFlags::FUNCTIONS),
}];

/// Pick a descriptor for a filename. Extension patterns compare against the
/// final `.`-suffix; other patterns match anywhere in the name. `None` means
/// no highlighting, which is a fully supported state.
pub fn select_for_filename(filename: &str) -> Option<&'static Syntax> {
    let ext = filename.rfind('.').map(|at| &filename[at..]);
    HLDB.iter().find(|syntax| {
        syntax.filematch.iter().any(|pat| {
            if pat.starts_with('.') {
                ext == Some(*pat)
            } else {
                filename.contains(pat)
            }
        })
    })
}

/// Separator test used for keyword boundaries and number starts. End-of-line
/// is treated as a separator by the callers (there is no byte to test).
pub fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b",.()+-/*=~%<>[];#".contains(&b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_c_for_extension() {
        let s = select_for_filename("main.c").expect("syntax");
        assert_eq!(s.filetype, "C");
        assert!(select_for_filename("header.h").is_some());
        assert!(select_for_filename("prog.cpp").is_some());
    }

    #[test]
    fn no_syntax_for_unknown_or_extensionless_names() {
        assert!(select_for_filename("notes.txt").is_none());
        assert!(select_for_filename("Makefile").is_none());
    }

    #[test]
    fn separator_set_matches_punctuation_table() {
        for b in b",.()+-/*=~%<>[];# \t" {
            assert!(is_separator(*b), "{} should separate", *b as char);
        }
        for b in b"abz09_:{}&!" {
            assert!(!is_separator(*b), "{} should not separate", *b as char);
        }
    }
}
