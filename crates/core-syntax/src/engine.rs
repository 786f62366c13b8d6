//! The left-to-right classification scan.
//!
//! Checks are applied per position in a fixed priority order: single-line
//! comment start, multi-line comment state, string literals, numbers,
//! keywords, then the function-call heuristic. Each rule that consumes bytes
//! continues the scan; otherwise the byte stays `Normal` and only the
//! separator state advances. The scan operates on render bytes (post tab
//! expansion) so classifications line up with what is painted.

use crate::{Highlight, Syntax, SyntaxFlags, is_separator};

/// Result of classifying one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHighlight {
    /// One class per render byte.
    pub classes: Vec<Highlight>,
    /// True when the line ends inside an unterminated block comment.
    pub open_comment: bool,
}

/// Classify every byte of `render`. `prev_open_comment` is the previous
/// line's end state (false for the first line).
pub fn highlight_line(
    render: &[u8],
    prev_open_comment: bool,
    syntax: &Syntax,
) -> LineHighlight {
    let bytes = render;
    let mut hl = vec![Highlight::Normal; bytes.len()];

    let scs = syntax.singleline_comment_start.map(str::as_bytes);
    let mcs = syntax.multiline_comment_start.map(str::as_bytes);
    let mce = syntax.multiline_comment_end.map(str::as_bytes);

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = prev_open_comment;

    let mut i = 0;
    'scan: while i < bytes.len() {
        let c = bytes[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        if let Some(scs) = scs
            && in_string.is_none()
            && !in_comment
            && bytes[i..].starts_with(scs)
        {
            hl[i..].fill(Highlight::Comment);
            break;
        }

        if let (Some(mcs), Some(mce)) = (mcs, mce)
            && in_string.is_none()
        {
            if in_comment {
                if bytes[i..].starts_with(mce) {
                    hl[i..i + mce.len()].fill(Highlight::MultilineComment);
                    i += mce.len();
                    in_comment = false;
                    prev_sep = true;
                } else {
                    hl[i] = Highlight::MultilineComment;
                    i += 1;
                }
                continue;
            } else if bytes[i..].starts_with(mcs) {
                hl[i..i + mcs.len()].fill(Highlight::MultilineComment);
                i += mcs.len();
                in_comment = true;
                continue;
            }
        }

        if syntax.flags.contains(SyntaxFlags::STRINGS) {
            if let Some(quote) = in_string {
                hl[i] = Highlight::String;
                // A backslash escapes the next byte, quote included.
                if c == b'\\' && i + 1 < bytes.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = Some(c);
                hl[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if syntax.flags.contains(SyntaxFlags::NUMBERS)
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == b'.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep {
            for keyword in syntax.keywords {
                let (word, class) = match keyword.strip_suffix('|') {
                    Some(word) => (word.as_bytes(), Highlight::Keyword2),
                    None => (keyword.as_bytes(), Highlight::Keyword1),
                };
                // End-of-line counts as a separator after the keyword.
                let boundary = bytes
                    .get(i + word.len())
                    .is_none_or(|&b| is_separator(b));
                if boundary && bytes[i..].starts_with(word) {
                    hl[i..i + word.len()].fill(class);
                    i += word.len();
                    prev_sep = false;
                    continue 'scan;
                }
            }

            if syntax.flags.contains(SyntaxFlags::FUNCTIONS) && i + 1 < bytes.len() {
                let rest = &bytes[i + 1..];
                let next_space = rest.iter().position(|&b| b == b' ');
                let next_paren = rest.iter().position(|&b| b == b'(');
                if let Some(paren) = next_paren
                    && next_space.is_none_or(|space| space > paren)
                {
                    let end = i + 1 + paren;
                    hl[i..end].fill(Highlight::Function);
                    i = end;
                    prev_sep = false;
                    continue;
                }
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    LineHighlight {
        classes: hl,
        open_comment: in_comment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HLDB;

    fn c_syntax() -> &'static Syntax {
        &HLDB[0]
    }

    fn classes(render: &str, prev_open: bool) -> Vec<Highlight> {
        highlight_line(render.as_bytes(), prev_open, c_syntax()).classes
    }

    #[test]
    fn type_keyword_classified_keyword2_rest_normal() {
        let hl = classes("  int x;", false);
        assert_eq!(&hl[0..2], &[Highlight::Normal, Highlight::Normal]);
        assert_eq!(&hl[2..5], &[Highlight::Keyword2; 3]);
        // "x;" stays unclassified.
        assert_eq!(&hl[5..], &[Highlight::Normal; 3]);
    }

    #[test]
    fn control_keyword_classified_keyword1() {
        let hl = classes("return 0;", false);
        assert_eq!(&hl[0..6], &[Highlight::Keyword1; 6]);
        assert_eq!(hl[7], Highlight::Number);
    }

    #[test]
    fn keyword_requires_following_separator() {
        // "interior" must not match "int".
        let hl = classes("interior", false);
        assert!(hl.iter().all(|&h| h == Highlight::Normal));
    }

    #[test]
    fn keyword_at_end_of_line_matches() {
        let hl = classes("int", false);
        assert_eq!(hl, vec![Highlight::Keyword2; 3]);
    }

    #[test]
    fn single_line_comment_swallows_rest() {
        let hl = classes("x = 1; // trailing", false);
        assert_eq!(hl[4], Highlight::Number);
        assert_eq!(&hl[7..], &vec![Highlight::Comment; 11][..]);
    }

    #[test]
    fn multiline_comment_opens_and_reports_open_state() {
        let out = highlight_line(b"a /* starts", false, c_syntax());
        assert!(out.open_comment);
        assert_eq!(&out.classes[2..], &[Highlight::MultilineComment; 9]);
    }

    #[test]
    fn multiline_comment_closes_and_clears_state() {
        let out = highlight_line(b"end */ int x;", true, c_syntax());
        assert!(!out.open_comment);
        assert_eq!(&out.classes[0..6], &[Highlight::MultilineComment; 6]);
        assert_eq!(&out.classes[7..10], &[Highlight::Keyword2; 3]);
    }

    #[test]
    fn string_escape_skips_escaped_quote() {
        let hl = classes(r#""a\"b" x"#, false);
        assert_eq!(&hl[0..6], &[Highlight::String; 6]);
        assert_eq!(hl[7], Highlight::Normal);
    }

    #[test]
    fn single_quote_strings_supported() {
        let hl = classes("'c' x", false);
        assert_eq!(&hl[0..3], &[Highlight::String; 3]);
    }

    #[test]
    fn comment_start_inside_string_ignored() {
        let hl = classes("\"no // comment\"", false);
        assert!(hl.iter().all(|&h| h == Highlight::String));
    }

    #[test]
    fn numbers_need_separator_before() {
        let hl = classes("x1 1.5", false);
        assert_eq!(hl[1], Highlight::Normal); // digit glued to identifier
        assert_eq!(&hl[3..6], &[Highlight::Number; 3]); // decimal point chains
    }

    #[test]
    fn function_call_heuristic_spans_to_paren() {
        let hl = classes("foo(1)", false);
        assert_eq!(&hl[0..3], &[Highlight::Function; 3]);
        assert_eq!(hl[3], Highlight::Normal);
        assert_eq!(hl[4], Highlight::Number);
    }

    #[test]
    fn function_heuristic_rejected_when_space_precedes_paren() {
        let hl = classes("foo (1)", false);
        assert_eq!(&hl[0..3], &[Highlight::Normal; 3]);
    }

    #[test]
    fn idempotent_for_unchanged_input() {
        let line = b"int main(void) { /* body */ return 1.5; } // done";
        let first = highlight_line(line, false, c_syntax());
        let second = highlight_line(line, false, c_syntax());
        assert_eq!(first, second);
    }

    #[test]
    fn inherited_open_comment_classifies_whole_line() {
        let out = highlight_line(b"int x = 1;", true, c_syntax());
        assert!(out.open_comment);
        assert!(
            out.classes
                .iter()
                .all(|&h| h == Highlight::MultilineComment)
        );
    }
}
