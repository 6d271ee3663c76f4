use std::collections::HashMap;

use crate::z_function::z_function;

/// Occurrence count of one distinct string, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub text: String,
    pub count: usize,
}

/// Trim every line and drop blank ones.
pub fn non_blank(lines: &[String]) -> Vec<&str> {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect()
}

/// A leading count line: sign and magnitude, the magnitude saturating at `usize::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Count {
    pub negative: bool,
    pub magnitude: usize,
}

/// Parse an integer token of any width: optional sign, ASCII digits, single
/// underscores allowed between digit groups (`1_000`).
pub fn parse_count(token: &str) -> Option<Count> {
    let (negative, digits) = match token.as_bytes().first()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };
    let mut magnitude: usize = 0;
    for group in digits.split('_') {
        if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        for b in group.bytes() {
            magnitude = magnitude
                .saturating_mul(10)
                .saturating_add(usize::from(b - b'0'));
        }
    }
    Some(Count {
        negative,
        magnitude,
    })
}

/// Select the strings a counted input refers to.
///
/// If the first entry is an integer `n`, the input is `data[1..1 + n]` with
/// slice-end semantics: a short input yields fewer entries, `n = -1` yields
/// nothing and `n = -k` for `k >= 2` drops the last `k - 1` entries.
/// Otherwise every entry is input.
pub fn counted_input<'a>(data: &[&'a str]) -> Vec<&'a str> {
    let Some((first, rest)) = data.split_first() else {
        return Vec::new();
    };
    let Some(count) = parse_count(first) else {
        return data.to_vec();
    };
    let end = match count {
        Count {
            negative: false,
            magnitude,
        } => magnitude.min(rest.len()),
        Count {
            negative: true,
            magnitude: 0 | 1,
        } => 0,
        Count {
            negative: true,
            magnitude,
        } => rest.len().saturating_sub(magnitude - 1),
    };
    rest[..end].to_vec()
}

/// Count occurrences, keeping first-occurrence order.
pub fn tally<'a>(strings: impl IntoIterator<Item = &'a str>) -> Vec<Tally> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<Tally> = Vec::new();
    for s in strings {
        match index.get(s) {
            Some(&i) => tallies[i].count += 1,
            None => {
                index.insert(s, tallies.len());
                tallies.push(Tally {
                    text: s.to_owned(),
                    count: 1,
                });
            }
        }
    }
    tallies
}

pub fn is_palindrome(s: &str) -> bool {
    s.chars().eq(s.chars().rev())
}

/// Strings occurring more than once, with their counts.
pub fn group_duplicates(lines: &[String]) -> Vec<Tally> {
    let data = non_blank(lines);
    tally(counted_input(&data))
        .into_iter()
        .filter(|t| t.count > 1)
        .collect()
}

/// Distinct palindromic strings, with their counts.
pub fn palindromes(lines: &[String]) -> Vec<Tally> {
    let data = non_blank(lines);
    tally(counted_input(&data))
        .into_iter()
        .filter(|t| is_palindrome(&t.text))
        .collect()
}

/// Z-array of the first non-blank line, formatted space-separated.
pub fn z_line(lines: &[String]) -> Option<String> {
    let s = non_blank(lines).into_iter().next()?;
    let rendered: Vec<String> = z_function(s).iter().map(usize::to_string).collect();
    Some(rendered.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &str) -> Vec<String> {
        input.lines().map(str::to_owned).collect()
    }

    fn pairs(tallies: &[Tally]) -> Vec<(&str, usize)> {
        tallies.iter().map(|t| (t.text.as_str(), t.count)).collect()
    }

    #[test]
    fn test_is_palindrome() {
        assert!(is_palindrome(""));
        assert!(is_palindrome("a"));
        assert!(is_palindrome("abba"));
        assert!(is_palindrome("racecar"));
        assert!(!is_palindrome("ab"));
        assert!(!is_palindrome("Abba"));
    }

    #[test]
    fn test_counted_input_with_count() {
        let data = ["2", "x", "y", "z"];
        assert_eq!(counted_input(&data), vec!["x", "y"]);
    }

    #[test]
    fn test_counted_input_count_exceeds_lines() {
        let data = ["10", "x", "y"];
        assert_eq!(counted_input(&data), vec!["x", "y"]);
    }

    #[test]
    fn test_counted_input_negative_count() {
        let data = ["-1", "x", "y"];
        assert!(counted_input(&data).is_empty());
    }

    #[test]
    fn test_counted_input_negative_count_drops_from_the_end() {
        let data = ["-2", "a", "b", "c"];
        assert_eq!(counted_input(&data), vec!["a", "b"]);
        let data = ["-3", "a", "b", "c"];
        assert_eq!(counted_input(&data), vec!["a"]);
        let data = ["-9", "a", "b", "c"];
        assert!(counted_input(&data).is_empty());
        let data = ["-0", "a"];
        assert!(counted_input(&data).is_empty());
    }

    #[test]
    fn test_counted_input_wide_count_takes_everything() {
        let data = ["99999999999999999999", "a", "b"];
        assert_eq!(counted_input(&data), vec!["a", "b"]);
        let data = ["-99999999999999999999", "a", "b"];
        assert!(counted_input(&data).is_empty());
    }

    #[test]
    fn test_parse_count_forms() {
        let count = |negative, magnitude| Some(Count { negative, magnitude });
        assert_eq!(parse_count("12"), count(false, 12));
        assert_eq!(parse_count("+3"), count(false, 3));
        assert_eq!(parse_count("-4"), count(true, 4));
        assert_eq!(parse_count("1_000"), count(false, 1000));
        assert_eq!(parse_count("99999999999999999999"), count(false, usize::MAX));
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("-"), None);
        assert_eq!(parse_count("1__0"), None);
        assert_eq!(parse_count("_1"), None);
        assert_eq!(parse_count("3x"), None);
        assert_eq!(parse_count("2.5"), None);
    }

    #[test]
    fn test_palindromes_skip_wide_count_line() {
        let input = lines("99999999999999999999\nx\n");
        assert_eq!(pairs(&palindromes(&input)), vec![("x", 1)]);
    }

    #[test]
    fn test_counted_input_without_count() {
        let data = ["x", "y"];
        assert_eq!(counted_input(&data), vec!["x", "y"]);
        assert!(counted_input(&[]).is_empty());
    }

    #[test]
    fn test_group_duplicates_first_occurrence_order() {
        let input = lines("6\ndog\ncat\n\n  dog \ncat\ncat\nbird\n");
        assert_eq!(pairs(&group_duplicates(&input)), vec![("dog", 2), ("cat", 3)]);
    }

    #[test]
    fn test_group_duplicates_respects_count() {
        let input = lines("2\na\na\na\n");
        assert_eq!(pairs(&group_duplicates(&input)), vec![("a", 2)]);
    }

    #[test]
    fn test_group_duplicates_empty() {
        assert!(group_duplicates(&[]).is_empty());
    }

    #[test]
    fn test_palindromes_counts_distinct() {
        let input = lines("level\nabc\nnoon\nlevel\nx\n");
        assert_eq!(
            pairs(&palindromes(&input)),
            vec![("level", 2), ("noon", 1), ("x", 1)]
        );
    }

    #[test]
    fn test_z_line_uses_first_non_blank() {
        let input = lines("\n   \nabacaba\naaaa\n");
        assert_eq!(z_line(&input).as_deref(), Some("7 0 1 0 3 0 1"));
        assert_eq!(z_line(&lines("\n\n")), None);
    }
}
