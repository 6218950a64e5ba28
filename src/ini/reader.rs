use super::error::{Corruption, IniError};
use super::line::{clear_line, seek_pattern, truncate_to_capacity};
use super::value::{ArityError, read_values};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone)]
struct ScannedLine {
    number: usize,
    text: String,
}

/// Forward-only reader over an INI stream.
///
/// Every lookup starts at the line after the previous hit and reads forward
/// until its target shows up, so sections and keys must be requested in file
/// order. Lookups wrapped in [`IniReader::speculate`] only consume the line
/// they match; everything else they scanned is handed to the next lookup.
#[derive(Debug)]
pub struct IniReader<R> {
    source: R,
    lines_read: usize,
    line_number: usize,
    raw: Vec<u8>,
    line: String,
    cleaned: String,
    pattern: String,
    replay: VecDeque<ScannedLine>,
    journal: Option<Vec<ScannedLine>>,
}

impl IniReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> IniReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            lines_read: 0,
            line_number: 0,
            raw: Vec::new(),
            line: String::new(),
            cleaned: String::new(),
            pattern: String::new(),
            replay: VecDeque::new(),
            journal: None,
        }
    }

    /// 1-based number of the line most recently scanned (0 before any read).
    #[inline(always)]
    pub const fn line_number(&self) -> usize {
        self.line_number
    }

    fn next_line(&mut self) -> Result<bool, IniError> {
        if let Some(scanned) = self.replay.pop_front() {
            self.line_number = scanned.number;
            self.line.clear();
            self.line.push_str(&scanned.text);
        } else {
            self.raw.clear();
            if self.source.read_until(b'\n', &mut self.raw)? == 0 {
                return Ok(false);
            }
            self.lines_read += 1;
            self.line_number = self.lines_read;
            self.line.clear();
            self.line.push_str(&String::from_utf8_lossy(&self.raw));
            truncate_to_capacity(&mut self.line);
        }

        if let Some(journal) = self.journal.as_mut() {
            journal.push(ScannedLine {
                number: self.line_number,
                text: self.line.clone(),
            });
        }
        Ok(true)
    }

    /// Scan forward until a cleaned line contains the cleaned `name`.
    fn scan_for(&mut self, name: &str, keep_comments: bool) -> Result<bool, IniError> {
        self.pattern.clear();
        self.pattern.push_str(name);
        clear_line(&mut self.pattern, false);

        while self.next_line()? {
            self.cleaned.clear();
            self.cleaned.push_str(&self.line);
            clear_line(&mut self.cleaned, keep_comments);
            if seek_pattern(&self.cleaned, &self.pattern) != 0 {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Everything after the first `=` of the matched line.
    fn value_tail(&self) -> &str {
        &self.cleaned[seek_pattern(&self.cleaned, "=")..]
    }

    /// Skip ahead to the line holding the `[SECTION]` header `group`.
    pub fn reach_group(&mut self, group: &str) -> Result<(), IniError> {
        if self.scan_for(group, false)? {
            Ok(())
        } else {
            Err(IniError::corrupted(
                self.line_number,
                Corruption::MissingGroup(group.to_string()),
            ))
        }
    }

    /// Find `key` and return its value text.
    ///
    /// With `raw` set the value keeps any `;` or `#`, for paths and labels.
    pub fn get_string(&mut self, key: &str, raw: bool) -> Result<String, IniError> {
        if self.scan_for(key, raw)? {
            Ok(self.value_tail().to_string())
        } else {
            Err(IniError::corrupted(
                self.line_number,
                Corruption::MissingOption(key.to_string()),
            ))
        }
    }

    /// Find `key` and decode exactly `count` comma separated scalars.
    pub fn get_values(&mut self, key: &str, count: usize) -> Result<Vec<i32>, IniError> {
        if !self.scan_for(key, false)? {
            return Err(IniError::corrupted(
                self.line_number,
                Corruption::MissingOption(key.to_string()),
            ));
        }

        read_values(self.value_tail(), count).map_err(|e| {
            let key = key.to_string();
            let kind = match e {
                ArityError::Value(source) => Corruption::BadValue { key, source },
                ArityError::TooMany => Corruption::TooManyValues {
                    key,
                    expected: count,
                },
                ArityError::NotEnough { found } => Corruption::NotEnoughValues {
                    key,
                    expected: count,
                    found,
                },
            };
            IniError::corrupted(self.line_number, kind)
        })
    }

    /// Run a lookup that may miss, or whose target may sit anywhere in the
    /// unread part of the file.
    ///
    /// Only the line `read` matched is consumed. The other lines it scanned
    /// are handed back, in file order, to the lookups that follow. A miss
    /// consumes nothing.
    pub fn speculate<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T, IniError>,
    ) -> Result<T, IniError> {
        let outer = self.journal.replace(Vec::new());
        let result = read(self);
        let mut scanned = self.journal.take().unwrap_or_default();

        let matched = match &result {
            Err(e) if e.is_not_found() => None,
            Err(IniError::Io(_)) => None,
            _ => scanned.pop(),
        };
        self.give_back(scanned);
        self.journal = outer.map(|mut lines| {
            lines.extend(matched);
            lines
        });
        result
    }

    fn give_back(&mut self, lines: Vec<ScannedLine>) {
        if lines.is_empty() {
            return;
        }
        self.replay.extend(lines);
        self.replay
            .make_contiguous()
            .sort_unstable_by_key(|line| line.number);
    }
}
