//! Moment-style format patterns (`YYYY-MM-DD`, `HH:mm`, `[at] h A`).
//!
//! Patterns are compiled once into a chrono strftime string, which is then
//! used for both rendering and parsing.

use std::fmt::Write as _;

use chrono::format::ParseErrorKind;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::TimestampError;

/// Token letters that have a meaning in moment patterns but no chrono
/// rendering here.
const UNSUPPORTED_LETTERS: &[char] = &['Q', 'w', 'W', 'E', 'e', 'k', 'g', 'G', 'x', 'N'];

/// A validated format pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatPattern {
    source: String,
    strftime: String,
}

impl FormatPattern {
    /// Compiles a moment-style pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is empty or uses a token that cannot
    /// be rendered (ordinals, week numbers, quarters, eras...). The en-locale
    /// shortcuts (`L`, `LL`, `LT`, `LTS`, `l`...) expand to their full form.
    pub fn compile(pattern: &str) -> Result<Self, TimestampError> {
        if pattern.is_empty() {
            return Err(TimestampError::EmptyPattern);
        }

        let chars: Vec<char> = pattern.chars().collect();
        let mut strftime = String::with_capacity(pattern.len() * 2);
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == '[' {
                if let Some(end) = chars[i + 1..].iter().position(|&ch| ch == ']') {
                    for &ch in &chars[i + 1..i + 1 + end] {
                        push_literal(&mut strftime, ch);
                    }
                    i += end + 2;
                    continue;
                }
                push_literal(&mut strftime, c);
                i += 1;
                continue;
            }

            let run = chars[i..].iter().take_while(|&&ch| ch == c).count();
            let token: String = chars[i..i + run].iter().collect();
            let unsupported = || TimestampError::UnsupportedToken {
                token: token.clone(),
                pattern: pattern.to_string(),
            };

            if chars.get(i + run) == Some(&'o') && matches!(c, 'D' | 'd' | 'M' | 'Q' | 'w' | 'W') {
                return Err(TimestampError::UnsupportedToken {
                    token: format!("{token}o"),
                    pattern: pattern.to_string(),
                });
            }
            if UNSUPPORTED_LETTERS.contains(&c) {
                return Err(unsupported());
            }

            if c == 'L' && run == 1 && chars.get(i + 1) == Some(&'T') {
                let (len, expansion) = if chars.get(i + 2) == Some(&'S') {
                    (3, "h:mm:ss A")
                } else {
                    (2, "h:mm A")
                };
                strftime.push_str(&Self::compile(expansion)?.strftime);
                i += len;
                continue;
            }
            if matches!(c, 'L' | 'l') {
                let expansion = localized(c, run).ok_or_else(unsupported)?;
                strftime.push_str(&Self::compile(expansion)?.strftime);
                i += run;
                continue;
            }

            let spec = match (c, run) {
                ('Y', 4) => "%Y",
                ('Y', 2) => "%y",
                ('M', 4) => "%B",
                ('M', 3) => "%b",
                ('M', 2) => "%m",
                ('M', 1) => "%-m",
                ('D', 4) => "%j",
                ('D', 3) => "%-j",
                ('D', 2) => "%d",
                ('D', 1) => "%-d",
                ('d', 4) => "%A",
                ('d', 3) => "%a",
                ('d', 1) => "%w",
                ('H', 2) => "%H",
                ('H', 1) => "%-H",
                ('h', 2) => "%I",
                ('h', 1) => "%-I",
                ('m', 2) => "%M",
                ('m', 1) => "%-M",
                ('s', 2) => "%S",
                ('s', 1) => "%-S",
                ('S', 3) => "%3f",
                ('S', 6) => "%6f",
                ('S', 9) => "%9f",
                ('A', 1) => "%p",
                ('a', 1) => "%P",
                ('Z', 2) => "%z",
                ('Z', 1) => "%:z",
                ('X', 1) => "%s",
                ('Y' | 'M' | 'D' | 'd' | 'H' | 'h' | 'm' | 's' | 'S' | 'A' | 'a' | 'Z' | 'X', _) => {
                    return Err(unsupported());
                }
                _ => {
                    for &ch in &chars[i..i + run] {
                        push_literal(&mut strftime, ch);
                    }
                    i += run;
                    continue;
                }
            };
            strftime.push_str(spec);
            i += run;
        }

        Ok(Self {
            source: pattern.to_string(),
            strftime,
        })
    }

    /// Returns the pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Renders a date-time with this pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if chrono rejects the compiled specifiers.
    pub fn render(&self, datetime: &DateTime<FixedOffset>) -> Result<String, TimestampError> {
        let mut out = String::new();
        write!(out, "{}", datetime.format(&self.strftime))
            .map_err(|_| TimestampError::Format(self.source.clone()))?;
        Ok(out)
    }

    /// Parses text written with this pattern.
    ///
    /// Missing offsets default to UTC and missing times to midnight.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not match the pattern or does not
    /// contain at least a full calendar date.
    pub fn parse(&self, input: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
        let mismatch = |err: chrono::ParseError| TimestampError::Mismatch {
            input: input.to_string(),
            pattern: self.source.clone(),
            reason: err.to_string(),
        };

        match DateTime::parse_from_str(input, &self.strftime) {
            Ok(datetime) => return Ok(datetime),
            Err(err) if err.kind() != ParseErrorKind::NotEnough => return Err(mismatch(err)),
            Err(_) => {}
        }

        match NaiveDateTime::parse_from_str(input, &self.strftime) {
            Ok(naive) => return Ok(naive.and_utc().fixed_offset()),
            Err(err) if err.kind() != ParseErrorKind::NotEnough => return Err(mismatch(err)),
            Err(_) => {}
        }

        NaiveDate::parse_from_str(input, &self.strftime)
            .map(|date| date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
            .map_err(mismatch)
    }
}

/// Expansions of the en-locale `L`/`l` shortcuts.
const fn localized(letter: char, run: usize) -> Option<&'static str> {
    match (letter, run) {
        ('L', 1) => Some("MM/DD/YYYY"),
        ('L', 2) => Some("MMMM D, YYYY"),
        ('L', 3) => Some("MMMM D, YYYY h:mm A"),
        ('L', 4) => Some("dddd, MMMM D, YYYY h:mm A"),
        ('l', 1) => Some("M/D/YYYY"),
        ('l', 2) => Some("MMM D, YYYY"),
        ('l', 3) => Some("MMM D, YYYY h:mm A"),
        ('l', 4) => Some("ddd, MMM D, YYYY h:mm A"),
        _ => None,
    }
}

fn push_literal(out: &mut String, ch: char) {
    if ch == '%' {
        out.push_str("%%");
    } else {
        out.push(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn datetime(text: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(text).unwrap()
    }

    #[test]
    fn test_compile_date_pattern() {
        let pattern = FormatPattern::compile("YYYY-MM-DD").unwrap();
        assert_eq!(pattern.as_str(), "YYYY-MM-DD");
        assert_eq!(pattern.strftime, "%Y-%m-%d");
    }

    #[test]
    fn test_literal_letters_pass_through() {
        let pattern = FormatPattern::compile("YYYY-MM-DDTHH:mm:ss").unwrap();
        assert_eq!(pattern.strftime, "%Y-%m-%dT%H:%M:%S");
    }

    #[test]
    fn test_bracket_escape_and_percent() {
        let pattern = FormatPattern::compile("[Due] D MMM [100%]").unwrap();
        assert_eq!(pattern.strftime, "Due %-d %b 100%%");
    }

    #[test]
    fn test_unclosed_bracket_is_literal() {
        let pattern = FormatPattern::compile("YYYY [T").unwrap();
        assert_eq!(pattern.strftime, "%Y [T");
    }

    #[test]
    fn test_render_common_patterns() {
        let value = datetime("2020-01-02T15:04:05+00:00");
        let cases = [
            ("YYYY-MM-DD", "2020-01-02"),
            ("M/D/YY", "1/2/20"),
            ("MMMM D, YYYY", "January 2, 2020"),
            ("ddd, MMM DD", "Thu, Jan 02"),
            ("h:mm A", "3:04 PM"),
            ("HH:mm:ss", "15:04:05"),
        ];
        for (source, expected) in cases {
            let pattern = FormatPattern::compile(source).unwrap();
            assert_eq!(pattern.render(&value).unwrap(), expected, "pattern {source}");
        }
    }

    #[test]
    fn test_render_offset_tokens() {
        let value = datetime("2020-01-02T08:00:00+02:00");
        let pattern = FormatPattern::compile("HH:mm Z").unwrap();
        assert_eq!(pattern.render(&value).unwrap(), "08:00 +02:00");
        let pattern = FormatPattern::compile("HH:mm ZZ").unwrap();
        assert_eq!(pattern.render(&value).unwrap(), "08:00 +0200");
    }

    #[test]
    fn test_render_milliseconds() {
        let value = datetime("2020-01-02T08:00:00.125+00:00");
        let pattern = FormatPattern::compile("ss.SSS").unwrap();
        assert_eq!(pattern.render(&value).unwrap(), "00.125");
    }

    #[test]
    fn test_unsupported_tokens_are_rejected() {
        for source in [
            "Do MMMM", "Q YYYY", "YYYY-ww", "YYYYY", "MMMMM", "SS", "x", "LLLLL",
        ] {
            let result = FormatPattern::compile(source);
            assert!(
                matches!(result, Err(TimestampError::UnsupportedToken { .. })),
                "pattern {source} should be rejected"
            );
        }
    }

    #[test]
    fn test_localized_shortcuts() {
        let value = datetime("2020-01-02T15:04:00+00:00");
        let cases = [
            ("L", "01/02/2020"),
            ("LL", "January 2, 2020"),
            ("LLL", "January 2, 2020 3:04 PM"),
            ("LLLL", "Thursday, January 2, 2020 3:04 PM"),
            ("l", "1/2/2020"),
            ("ll", "Jan 2, 2020"),
            ("llll", "Thu, Jan 2, 2020 3:04 PM"),
            ("LT", "3:04 PM"),
            ("LTS", "3:04:00 PM"),
            ("YYYY-MM-DD LT", "2020-01-02 3:04 PM"),
        ];
        for (source, expected) in cases {
            let pattern = FormatPattern::compile(source).unwrap();
            assert_eq!(pattern.render(&value).unwrap(), expected, "pattern {source}");
        }
    }

    #[test]
    fn test_parse_localized_date() {
        let pattern = FormatPattern::compile("L").unwrap();
        let parsed = pattern.parse("01/02/2020").unwrap();
        assert_eq!(parsed, datetime("2020-01-02T00:00:00+00:00"));
    }

    #[test]
    fn test_empty_pattern_is_rejected() {
        assert_eq!(FormatPattern::compile(""), Err(TimestampError::EmptyPattern));
    }

    #[test]
    fn test_parse_date_only_defaults_to_midnight_utc() {
        let pattern = FormatPattern::compile("YYYY-MM-DD").unwrap();
        let parsed = pattern.parse("2020-01-02").unwrap();
        assert_eq!(parsed, datetime("2020-01-02T00:00:00+00:00"));
    }

    #[test]
    fn test_parse_datetime_with_offset() {
        let pattern = FormatPattern::compile("YYYY-MM-DD HH:mm Z").unwrap();
        let parsed = pattern.parse("2020-01-02 08:30 +02:00").unwrap();
        assert_eq!(parsed, datetime("2020-01-02T08:30:00+02:00"));
        assert_eq!(parsed.offset().local_minus_utc(), 7200);
    }

    #[test]
    fn test_parse_mismatch() {
        let pattern = FormatPattern::compile("YYYY-MM-DD").unwrap();
        let result = pattern.parse("02/01/2020");
        assert!(matches!(result, Err(TimestampError::Mismatch { .. })));
    }
}
