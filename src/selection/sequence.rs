use std::cell::RefCell;
use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;

use super::controller::SubtitleSelection;

/// Ordering of the lines of a document, as seen by a selection controller
pub trait LineSequence<L> {
    /// Line following `line`, or `None` at the end or for an unknown line
    fn line_after(&self, line: &L) -> Option<L>;

    /// Line preceding `line`, or `None` at the start or for an unknown line
    fn line_before(&self, line: &L) -> Option<L>;

    /// First line of the document
    fn first_line(&self) -> Option<L>;

    /// Whether `line` belongs to the document
    fn contains_line(&self, line: &L) -> bool;

    /// Any member of `lines` that does not belong to the document
    ///
    /// The default asks [`contains_line`](Self::contains_line) once per
    /// member, so it is only linear when that lookup is constant time.
    fn first_unknown_line<'a>(&self, lines: &'a SubtitleSelection<L>) -> Option<&'a L> {
        lines.iter().find(|line| !self.contains_line(line))
    }
}

impl<L: Clone + Eq + Hash> LineSequence<L> for Vec<L> {
    fn line_after(&self, line: &L) -> Option<L> {
        let position = self.iter().position(|l| l == line)?;
        self.get(position + 1).cloned()
    }

    fn line_before(&self, line: &L) -> Option<L> {
        let position = self.iter().position(|l| l == line)?;
        position.checked_sub(1).and_then(|p| self.get(p)).cloned()
    }

    fn first_line(&self) -> Option<L> {
        self.first().cloned()
    }

    fn contains_line(&self, line: &L) -> bool {
        self.contains(line)
    }

    fn first_unknown_line<'a>(&self, lines: &'a SubtitleSelection<L>) -> Option<&'a L> {
        if lines.len() <= 1 {
            return lines.iter().find(|line| !self.contains(line));
        }
        let known: HashSet<&L> = self.iter().collect();
        lines.iter().find(|line| !known.contains(line))
    }
}

impl<L, T: LineSequence<L> + ?Sized> LineSequence<L> for Rc<T> {
    fn line_after(&self, line: &L) -> Option<L> {
        (**self).line_after(line)
    }

    fn line_before(&self, line: &L) -> Option<L> {
        (**self).line_before(line)
    }

    fn first_line(&self) -> Option<L> {
        (**self).first_line()
    }

    fn contains_line(&self, line: &L) -> bool {
        (**self).contains_line(line)
    }

    fn first_unknown_line<'a>(&self, lines: &'a SubtitleSelection<L>) -> Option<&'a L> {
        (**self).first_unknown_line(lines)
    }
}

// Lets a document stay editable while a controller looks at it. The borrow
// only lasts for the lookup, never across listener callbacks.
impl<L, T: LineSequence<L>> LineSequence<L> for RefCell<T> {
    fn line_after(&self, line: &L) -> Option<L> {
        self.borrow().line_after(line)
    }

    fn line_before(&self, line: &L) -> Option<L> {
        self.borrow().line_before(line)
    }

    fn first_line(&self) -> Option<L> {
        self.borrow().first_line()
    }

    fn contains_line(&self, line: &L) -> bool {
        self.borrow().contains_line(line)
    }

    fn first_unknown_line<'a>(&self, lines: &'a SubtitleSelection<L>) -> Option<&'a L> {
        self.borrow().first_unknown_line(lines)
    }
}
