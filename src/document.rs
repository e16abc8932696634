use std::collections::HashMap;
use std::fmt;

use log::{debug, warn};

use crate::errors::DocumentError;
use crate::selection::LineSequence;

// @module: Subtitle document lines and their ordering

// @struct: Stable handle of one subtitle line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(u64);

impl LineId {
    /// Raw numeric value of the handle
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: Handle assigned by the owning collection
    pub id: LineId,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text
    pub text: String,
}

impl SubtitleEntry {
    // @creates: Validated subtitle entry
    // @validates: Time range and non-empty text
    fn new_validated(id: LineId, start_time_ms: u64, end_time_ms: u64, text: &str) -> Result<Self, DocumentError> {
        if end_time_ms <= start_time_ms {
            return Err(DocumentError::InvalidTimeRange {
                start_ms: start_time_ms,
                end_ms: end_time_ms,
            });
        }

        let trimmed_text = text.trim();
        if trimmed_text.is_empty() {
            return Err(DocumentError::EmptyText);
        }

        Ok(SubtitleEntry {
            id,
            start_time_ms,
            end_time_ms,
            text: trimmed_text.to_string(),
        })
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} --> {} {}",
            self.id,
            self.format_start_time(),
            self.format_end_time(),
            self.text.replace('\n', " | ")
        )
    }
}

/// Ordered collection of subtitle lines
///
/// Handles are handed out in increasing order and never reused, so a handle
/// kept by a selection controller after its line was removed simply stops
/// resolving instead of pointing at another line.
#[derive(Debug, Default)]
pub struct SubtitleCollection {
    entries: Vec<SubtitleEntry>,
    // Position of every entry, kept in step with `entries`
    index: HashMap<LineId, usize>,
    next_id: u64,
}

impl SubtitleCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from plain texts, giving each line a two second slot
    pub fn from_texts<I, S>(texts: I) -> Result<Self, DocumentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut collection = Self::new();
        for (i, text) in texts.into_iter().enumerate() {
            let start_ms = i as u64 * 2_000;
            collection.push(start_ms, start_ms + 1_800, text.as_ref())?;
        }
        debug!("Built collection with {} lines", collection.len());
        Ok(collection)
    }

    fn allocate_id(&mut self) -> LineId {
        let id = LineId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a line at the end of the collection
    pub fn push(&mut self, start_time_ms: u64, end_time_ms: u64, text: &str) -> Result<LineId, DocumentError> {
        let entry = SubtitleEntry::new_validated(LineId(self.next_id), start_time_ms, end_time_ms, text)?;
        let id = self.allocate_id();
        self.index.insert(id, self.entries.len());
        self.entries.push(entry);
        Ok(id)
    }

    /// Insert a line directly after `after`
    pub fn insert_after(&mut self, after: LineId, start_time_ms: u64, end_time_ms: u64, text: &str) -> Result<LineId, DocumentError> {
        let position = self
            .position(after)
            .ok_or_else(|| DocumentError::NoSuchLine(after.to_string()))?;
        let entry = SubtitleEntry::new_validated(LineId(self.next_id), start_time_ms, end_time_ms, text)?;
        let id = self.allocate_id();
        self.entries.insert(position + 1, entry);
        self.reindex_from(position + 1);
        Ok(id)
    }

    fn reindex_from(&mut self, start: usize) {
        for (position, entry) in self.entries.iter().enumerate().skip(start) {
            self.index.insert(entry.id, position);
        }
    }

    /// Remove a line, returning it if it existed
    ///
    /// Callers must clear the line from any selection controller first.
    pub fn remove(&mut self, id: LineId) -> Option<SubtitleEntry> {
        match self.index.remove(&id) {
            Some(position) => {
                let entry = self.entries.remove(position);
                self.reindex_from(position);
                Some(entry)
            }
            None => {
                warn!("Attempted to remove unknown line {}", id);
                None
            }
        }
    }

    /// Look up a line by handle
    pub fn get(&self, id: LineId) -> Option<&SubtitleEntry> {
        self.position(id).map(|position| &self.entries[position])
    }

    /// Zero-based position of a line
    pub fn position(&self, id: LineId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Handle of the line at a zero-based position
    pub fn line_at(&self, position: usize) -> Option<LineId> {
        self.entries.get(position).map(|entry| entry.id)
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection holds no lines
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over lines in document order
    pub fn iter(&self) -> impl Iterator<Item = &SubtitleEntry> {
        self.entries.iter()
    }
}

impl LineSequence<LineId> for SubtitleCollection {
    fn line_after(&self, line: &LineId) -> Option<LineId> {
        self.position(*line).and_then(|position| self.line_at(position + 1))
    }

    fn line_before(&self, line: &LineId) -> Option<LineId> {
        self.position(*line)
            .and_then(|position| position.checked_sub(1))
            .and_then(|position| self.line_at(position))
    }

    fn first_line(&self) -> Option<LineId> {
        self.line_at(0)
    }

    fn contains_line(&self, line: &LineId) -> bool {
        self.index.contains_key(line)
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (position, entry) in self.entries.iter().enumerate() {
            writeln!(f, "{:>4}: {}", position + 1, entry)?;
        }
        Ok(())
    }
}
