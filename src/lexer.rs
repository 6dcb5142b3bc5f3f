//! Whitespace tokenization for the shell's input lines.
//!
//! The shell recognizes no quoting, escaping, or operators of any kind: a
//! line is split on runs of delimiter characters and that's the whole story.
//! A delimiter inside quotes still splits.

/// Characters that separate tokens: space, tab, carriage return, newline
/// and the bell character.
const DELIMITERS: &[char] = &[' ', '\t', '\r', '\n', '\x07'];

/// Split a line into whitespace-delimited tokens, preserving order.
///
/// Runs of consecutive delimiters collapse; no empty tokens are produced, so
/// a line consisting only of delimiters yields an empty vector.
pub fn split_line(line: &str) -> Vec<String> {
    line.split(|c| DELIMITERS.contains(&c))
        .filter(|tok| !tok.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::split_line;

    #[test]
    fn test_splits_on_runs_of_whitespace() {
        assert_eq!(split_line("echo  a   b\tc"), vec!["echo", "a", "b", "c"]);
    }

    #[test]
    fn test_empty_and_delimiter_only_lines_yield_no_tokens() {
        assert!(split_line("").is_empty());
        assert!(split_line("   \t \r\n").is_empty());
    }

    #[test]
    fn test_bell_is_a_delimiter() {
        assert_eq!(split_line("ls\x07/tmp"), vec!["ls", "/tmp"]);
    }

    #[test]
    fn test_quotes_are_not_special() {
        assert_eq!(
            split_line("echo \"a b\""),
            vec!["echo", "\"a", "b\""],
        );
    }

    #[test]
    fn test_leading_and_trailing_whitespace() {
        assert_eq!(split_line("  pwd "), vec!["pwd"]);
    }
}
