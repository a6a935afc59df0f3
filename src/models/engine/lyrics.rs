//! Timed captions shown above the highway.
//!
//! File layout, repeated:
//!
//! ```text
//! <entryTime> <lineCount 1|2> [first line text]
//! <line text>
//! [<line text>]
//! ```
//!
//! Text following the count on the header line is taken as the first caption
//! line; the remaining lines are read from the lines below.

use super::note::NEVER;
use crate::error::{EngineError, Result, read_text};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricLine {
    /// Song time in ms.
    pub entry_time: u32,
    pub first: String,
    pub second: Option<String>,
}

impl LyricLine {
    pub fn new(entry_time: u32, first: &str, second: Option<&str>) -> Self {
        Self {
            entry_time,
            first: first.to_string(),
            second: second.map(str::to_string),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.first.as_str()).chain(self.second.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lyrics {
    pub lines: Vec<LyricLine>,
}

impl Lyrics {
    pub fn load(path: &Path) -> Result<Self> {
        let text = read_text(path)?;
        let lyrics = Self::parse(&text, path)?;
        log::info!(
            "LYRICS: Loaded {} captions from {}",
            lyrics.len(),
            path.display()
        );
        Ok(lyrics)
    }

    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        let mut rows = text.lines().enumerate().map(|(i, l)| (i + 1, l));
        let mut lines = Vec::new();

        while let Some((line_no, header)) = rows.next() {
            if header.trim().is_empty() {
                continue;
            }

            let (entry_time, rest) = split_token(header.trim_start());
            let (count, inline) = split_token(rest);
            let entry_time: u32 = entry_time.parse().map_err(|_| {
                EngineError::malformed(origin, line_no, format!("invalid entry time {:?}", entry_time))
            })?;
            let count: usize = match count.parse() {
                Ok(n @ 1..=2) => n,
                _ => {
                    return Err(EngineError::malformed(
                        origin,
                        line_no,
                        format!("line count must be 1 or 2, found {:?}", count),
                    ));
                }
            };

            let mut text_lines: Vec<String> = Vec::with_capacity(count);
            if !inline.trim().is_empty() {
                text_lines.push(inline.trim_end().to_string());
            }
            while text_lines.len() < count {
                match rows.next() {
                    Some((_, raw)) => text_lines.push(raw.trim_end_matches('\r').to_string()),
                    None => {
                        return Err(EngineError::malformed(
                            origin,
                            line_no,
                            format!("expected {} caption lines", count),
                        ));
                    }
                }
            }

            let mut text_lines = text_lines.into_iter();
            let first = text_lines.next().unwrap_or_default();
            let second = text_lines.next().filter(|s| !s.trim().is_empty());
            lines.push(LyricLine {
                entry_time,
                first,
                second,
            });
        }

        if lines.windows(2).any(|w| w[0].entry_time > w[1].entry_time) {
            log::warn!("LYRICS: {} is not in time order, sorting", origin.display());
            lines.sort_by_key(|l| l.entry_time);
        }

        Ok(Self { lines })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Song time of the caption at `index`, or [`NEVER`] past the end.
    pub fn entry_time(&self, index: usize) -> u32 {
        self.lines.get(index).map_or(NEVER, |l| l.entry_time)
    }
}

fn split_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(end) => (&s[..end], &s[end + 1..]),
        None => (s, ""),
    }
}

/// Tracks which caption is on display.
#[derive(Debug, Clone, Default)]
pub struct LyricCursor {
    next: usize,
}

impl LyricCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves past every caption whose song time has been reached. Captions are
    /// song-relative, so the session clock is offset by `music_start`.
    pub fn advance(&mut self, lyrics: &Lyrics, passed_time: u32, music_start: u32) {
        while self.next < lyrics.len()
            && passed_time >= lyrics.entry_time(self.next).saturating_add(music_start)
        {
            self.next += 1;
        }
    }

    pub fn current<'a>(&self, lyrics: &'a Lyrics) -> Option<&'a LyricLine> {
        self.next.checked_sub(1).and_then(|i| lyrics.lines.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(text: &str) -> Result<Lyrics> {
        Lyrics::parse(text, Path::new("Lyrics.txt"))
    }

    #[test]
    fn parses_one_and_two_line_captions() {
        let lyrics = parse("1000 1\nHello there\n2500 2\nfirst half\nsecond half\n").unwrap();
        assert_eq!(
            lyrics.lines,
            vec![
                LyricLine::new(1000, "Hello there", None),
                LyricLine::new(2500, "first half", Some("second half")),
            ]
        );
    }

    #[test]
    fn text_after_the_count_is_the_first_line() {
        let lyrics = parse("1000 2 inline words\nnext line\n3000 1 solo\n").unwrap();
        assert_eq!(lyrics.lines[0], LyricLine::new(1000, "inline words", Some("next line")));
        assert_eq!(lyrics.lines[1], LyricLine::new(3000, "solo", None));
    }

    #[test]
    fn blank_second_line_is_dropped() {
        let lyrics = parse("1000 2\nonly this\n \n").unwrap();
        assert_eq!(lyrics.lines[0].second, None);
        assert_eq!(lyrics.lines[0].lines().count(), 1);
    }

    #[test]
    fn bad_header_is_malformed() {
        assert!(matches!(
            parse("abc 1\nx\n"),
            Err(EngineError::MalformedData { line: 1, .. })
        ));
        assert!(matches!(
            parse("1000 3\na\nb\nc\n"),
            Err(EngineError::MalformedData { .. })
        ));
        assert!(matches!(
            parse("1000 2\nonly one\n"),
            Err(EngineError::MalformedData { .. })
        ));
    }

    #[test]
    fn cursor_follows_song_time() {
        let lyrics = parse("1000 1\none\n2000 1\ntwo\n").unwrap();
        let mut cursor = LyricCursor::new();

        cursor.advance(&lyrics, 1400, 500);
        assert_eq!(cursor.current(&lyrics), None);

        cursor.advance(&lyrics, 1500, 500);
        assert_eq!(cursor.current(&lyrics).map(|l| l.first.as_str()), Some("one"));

        // Catches up over several captions in one frame.
        let mut late = LyricCursor::new();
        late.advance(&lyrics, 10_000, 500);
        assert_eq!(late.current(&lyrics).map(|l| l.first.as_str()), Some("two"));
        assert_eq!(lyrics.entry_time(2), NEVER);
    }

    #[test]
    fn missing_file_is_resource_missing() {
        let dir = tempdir().expect("failed to create temp directory");
        assert!(Lyrics::load(&dir.path().join("Lyrics.txt")).unwrap_err().is_missing());
    }
}
