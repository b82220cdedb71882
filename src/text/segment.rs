//! Attribute runs over char ranges.
//!
//! Runs are kept sorted, disjoint, non-empty, and never carry an empty
//! attribute set. Characters not covered by any run have default attributes.

use crate::attachment::AttachmentId;
use crate::style::Attributes;
use std::ops::Range;

/// A run of characters sharing one attribute set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeRun {
    /// Char range in the buffer.
    pub range: Range<usize>,
    pub attributes: Attributes,
}

impl AttributeRun {
    /// Create a new run.
    #[must_use]
    pub fn new(range: Range<usize>, attributes: Attributes) -> Self {
        Self { range, attributes }
    }

    /// Check if this run intersects `range` (adjacency does not count).
    #[must_use]
    pub fn intersects(&self, range: &Range<usize>) -> bool {
        self.range.start < range.end && range.start < self.range.end
    }

    /// Check if this run contains a position.
    #[must_use]
    pub fn contains(&self, pos: usize) -> bool {
        self.range.contains(&pos)
    }

    /// Get the length in chars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.range.end - self.range.start
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.start >= self.range.end
    }
}

/// Sorted, disjoint attribute runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeRuns {
    runs: Vec<AttributeRun>,
}

impl AttributeRuns {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All runs, left to right.
    #[must_use]
    pub fn as_slice(&self) -> &[AttributeRun] {
        &self.runs
    }

    /// Attributes at `pos` (default when uncovered).
    #[must_use]
    pub fn at(&self, pos: usize) -> Attributes {
        let idx = self.runs.partition_point(|run| run.range.end <= pos);
        self.runs
            .get(idx)
            .filter(|run| run.contains(pos))
            .map(|run| run.attributes.clone())
            .unwrap_or_default()
    }

    /// Runs intersecting `range`, left to right.
    #[must_use]
    pub fn in_range(&self, range: Range<usize>) -> &[AttributeRun] {
        let first = self.runs.partition_point(|run| run.range.end <= range.start);
        let last = self.runs.partition_point(|run| run.range.start < range.end);
        if first >= last {
            return &[];
        }
        &self.runs[first..last]
    }

    /// Apply `f` to the attributes of every char in `range`.
    pub fn update(&mut self, range: Range<usize>, mut f: impl FnMut(&mut Attributes)) {
        if range.start >= range.end {
            return;
        }
        self.split_at(range.start);
        self.split_at(range.end);

        let first = self.runs.partition_point(|run| run.range.end <= range.start);
        let last = self.runs.partition_point(|run| run.range.start < range.end);

        let mut updated = Vec::with_capacity(last - first + 2);
        let mut cursor = range.start;
        for mut run in self.runs.drain(first..last) {
            if cursor < run.range.start {
                push_gap(&mut updated, cursor..run.range.start, &mut f);
            }
            cursor = run.range.end;
            f(&mut run.attributes);
            if !run.attributes.is_empty() {
                updated.push(run);
            }
        }
        if cursor < range.end {
            push_gap(&mut updated, cursor..range.end, &mut f);
        }

        self.runs.splice(first..first, updated);
        self.coalesce();
    }

    /// Replace the attributes of `range`.
    pub fn set(&mut self, range: Range<usize>, attributes: &Attributes) {
        self.update(range, |attrs| *attrs = attributes.clone());
    }

    /// Merge `attributes` over the existing attributes of `range`.
    pub fn add(&mut self, range: Range<usize>, attributes: &Attributes) {
        self.update(range, |attrs| *attrs = attrs.merge(attributes));
    }

    /// Clear the attachment marker from `range`.
    pub fn remove_attachment(&mut self, range: Range<usize>) {
        self.update(range, |attrs| attrs.attachment = None);
    }

    /// Track a text replacement: `range` was replaced by `inserted` chars.
    ///
    /// Attributes of replaced chars are dropped; inserted chars start
    /// unattributed. Runs after the edit shift by the length delta.
    pub fn edit(&mut self, range: Range<usize>, inserted: usize) {
        let removed = range.end - range.start;
        let shift = |pos: usize| pos - removed + inserted;

        let mut out = Vec::with_capacity(self.runs.len() + 1);
        for run in self.runs.drain(..) {
            if run.range.end <= range.start {
                out.push(run);
            } else if run.range.start >= range.end {
                out.push(AttributeRun::new(
                    shift(run.range.start)..shift(run.range.end),
                    run.attributes,
                ));
            } else {
                if run.range.start < range.start {
                    out.push(AttributeRun::new(
                        run.range.start..range.start,
                        run.attributes.clone(),
                    ));
                }
                if run.range.end > range.end {
                    out.push(AttributeRun::new(
                        range.start + inserted..shift(run.range.end),
                        run.attributes,
                    ));
                }
            }
        }
        self.runs = out;
        self.coalesce();
    }

    /// Attachment markers intersecting `range`, left to right.
    #[must_use]
    pub fn attachment_markers(&self, range: Range<usize>) -> AttachmentMarkers<'_> {
        AttachmentMarkers {
            runs: self.in_range(range.clone()),
            range,
        }
    }

    fn split_at(&mut self, pos: usize) {
        let idx = self.runs.partition_point(|run| run.range.end <= pos);
        let Some(run) = self.runs.get_mut(idx) else {
            return;
        };
        if run.range.start < pos && pos < run.range.end {
            let tail = AttributeRun::new(pos..run.range.end, run.attributes.clone());
            run.range.end = pos;
            self.runs.insert(idx + 1, tail);
        }
    }

    fn coalesce(&mut self) {
        let mut out: Vec<AttributeRun> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.is_empty() || run.attributes.is_empty() {
                continue;
            }
            if let Some(prev) = out.last_mut() {
                if prev.range.end == run.range.start
                    && prev.attributes == run.attributes
                    && prev.attributes.attachment.is_none()
                {
                    prev.range.end = run.range.end;
                    continue;
                }
            }
            out.push(run);
        }
        self.runs = out;
    }
}

fn push_gap(
    out: &mut Vec<AttributeRun>,
    range: Range<usize>,
    f: &mut impl FnMut(&mut Attributes),
) {
    let mut attributes = Attributes::default();
    f(&mut attributes);
    if !attributes.is_empty() {
        out.push(AttributeRun::new(range, attributes));
    }
}

/// Lazy, restartable iterator over attachment markers in a range.
///
/// Clone it to enumerate the same markers again.
#[derive(Clone, Debug)]
pub struct AttachmentMarkers<'a> {
    runs: &'a [AttributeRun],
    range: Range<usize>,
}

impl Iterator for AttachmentMarkers<'_> {
    type Item = (AttachmentId, Range<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((run, rest)) = self.runs.split_first() {
            self.runs = rest;
            if let Some(id) = run.attributes.attachment {
                let start = run.range.start.max(self.range.start);
                let end = run.range.end.min(self.range.end);
                if start < end {
                    return Some((id, start..end));
                }
            }
        }
        None
    }
}
