// Copyright 2026 Hypermesh Foundation. All rights reserved.
// NFT Tokenomics Simulation Suite - Quarter Windows

use serde::{Deserialize, Serialize};

/// Days per quarter window. The last window of a horizon may be shorter.
pub const WINDOW_SIZE: usize = 91;

/// A contiguous, inclusive range of record indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterWindow {
    /// 0-based window index.
    pub index: usize,
    /// Index of the first record in the window.
    pub start: usize,
    /// Index of the last record in the window (inclusive).
    pub end: usize,
}

impl QuarterWindow {
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// 1-based quarter number as shown to users.
    pub fn quarter(&self) -> u32 {
        self.index as u32 + 1
    }

    /// Record index whose tier counts anchor this window's issuance: the day
    /// before the window starts. The first window has none.
    pub fn baseline_index(&self) -> Option<usize> {
        self.start.checked_sub(1)
    }

    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Number of windows needed to cover `len` records.
pub fn window_count(len: usize) -> usize {
    len.div_ceil(WINDOW_SIZE)
}

/// Split `len` records into consecutive windows of [`WINDOW_SIZE`].
pub fn partition(len: usize) -> Vec<QuarterWindow> {
    (0..window_count(len))
        .map(|index| {
            let start = index * WINDOW_SIZE;
            let end = (start + WINDOW_SIZE - 1).min(len - 1);
            QuarterWindow { index, start, end }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_horizon_has_no_windows() {
        assert!(partition(0).is_empty());
        assert_eq!(window_count(0), 0);
    }

    #[test]
    fn single_day() {
        let windows = partition(1);
        assert_eq!(windows, vec![QuarterWindow { index: 0, start: 0, end: 0 }]);
        assert_eq!(windows[0].baseline_index(), None);
    }

    #[test]
    fn exact_multiple() {
        let windows = partition(182);
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].len(), 91);
        assert_eq!(windows[1].len(), 91);
        assert_eq!(windows[1].start, 91);
        assert_eq!(windows[1].baseline_index(), Some(90));
        assert_eq!(windows[1].quarter(), 2);
    }

    #[test]
    fn short_tail_window() {
        let windows = partition(365);
        assert_eq!(windows.len(), 5);
        assert_eq!(windows[4].len(), 365 % 91);
        assert_eq!(windows[4].end, 364);
    }

    #[test]
    fn windows_are_contiguous() {
        for len in [1, 90, 91, 92, 500, 1000] {
            let windows = partition(len);
            assert_eq!(windows.len(), window_count(len));
            assert_eq!(windows[0].start, 0);
            for pair in windows.windows(2) {
                assert_eq!(pair[1].start, pair[0].end + 1, "gap/overlap at len {len}");
            }
            assert_eq!(windows.last().map(|w| w.end), Some(len - 1));
            let covered: usize = windows.iter().map(QuarterWindow::len).sum();
            assert_eq!(covered, len);
        }
    }
}
