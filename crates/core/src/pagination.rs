//! Windowed page-number computation for pagination controls
//!
//! Pure functions that decide which page buttons a pagination control should
//! draw: a bounded sequence of page numbers with ellipsis markers standing in
//! for the collapsed ranges.

use std::fmt;

/// One entry of a pagination window: a clickable page number or an
/// ellipsis placeholder for a collapsed run of pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    Page(usize),
    Ellipsis,
}

impl PageEntry {
    /// The page number, if this entry is one.
    pub fn page(&self) -> Option<usize> {
        match self {
            PageEntry::Page(n) => Some(*n),
            PageEntry::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageEntry::Page(n) => write!(f, "{}", n),
            PageEntry::Ellipsis => write!(f, "..."),
        }
    }
}

/// Compute the page-selector window for a pagination control.
///
/// Produces the ordered entries to render when `last_page` pages exist,
/// `current_page` is selected, and there is room for `max_buttons` entries
/// in total (numbers and ellipses combined).
///
/// When every page fits, all of them are returned. Otherwise page `1` and
/// `last_page` anchor the ends, and a contiguous window of pages around
/// `current_page` fills the remaining slots. Near either end the window
/// slides instead of shrinking, so the output length is always exactly
/// `max_buttons`. When the window has an odd number of free slots after
/// centering, the extra slot goes to the page after `current_page`.
///
/// # Arguments
/// * `current_page` - The selected page; callers must clamp it into `[1, last_page]`
/// * `last_page` - Total number of pages, at least 1
/// * `max_buttons` - Slot budget for the control; must be at least 5
///
/// # Returns
/// Entries in ascending page order with an ellipsis wherever at least two
/// consecutive pages are collapsed. Never two adjacent ellipses.
pub fn compute_window(current_page: usize, last_page: usize, max_buttons: usize) -> Vec<PageEntry> {
    if last_page <= max_buttons {
        return (1..=last_page).map(PageEntry::Page).collect();
    }

    // Slots left for the middle window once both anchors and both ellipses
    // are accounted for. With max_buttons >= 5 this is at least 1.
    let mid = max_buttons - 4;
    let below = (mid - 1) / 2;
    let above = mid - 1 - below;

    let mut entries = vec![PageEntry::Page(1)];

    if current_page.saturating_sub(below) <= 3 {
        // Near the start: no left ellipsis, its slot extends the run instead.
        for page in 2..=max_buttons - 2 {
            entries.push(PageEntry::Page(page));
        }
        entries.push(PageEntry::Ellipsis);
    } else if current_page + above >= last_page - 2 {
        // Near the end: no right ellipsis, the run reaches the last page.
        entries.push(PageEntry::Ellipsis);
        for page in last_page - (max_buttons - 3)..last_page {
            entries.push(PageEntry::Page(page));
        }
    } else {
        entries.push(PageEntry::Ellipsis);
        for page in current_page - below..=current_page + above {
            entries.push(PageEntry::Page(page));
        }
        entries.push(PageEntry::Ellipsis);
    }

    entries.push(PageEntry::Page(last_page));
    entries
}
