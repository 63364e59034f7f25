//! Windowing of the ordered index.
//!
//! Only a contiguous slice of rows around the viewport is materialized. The
//! rows before and after that slice are represented by two spacers whose
//! extents keep the total scrollable height equal to `len * row_height`.
//!
//! The window is the visible range widened by one page on each side. It is
//! recomputed only when the visible centre drifts more than one page from the
//! centre it was computed for, so scrolling inside a page never re-renders.

/// Materialized sub-range `[start, end)` of the ordered index.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Window {
    pub start: usize,
    pub end: usize,
    /// Height of the spacer standing in for rows `0..start`.
    pub leading_spacer: f32,
    /// Height of the spacer standing in for rows `end..len`.
    pub trailing_spacer: f32,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// True if every row of `[first, last)` is materialized.
    pub fn covers(&self, first: usize, last: usize) -> bool {
        self.start <= first && self.end >= last
    }
}

/// Inputs to one window computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowRequest {
    /// Length of the ordered index.
    pub len: usize,
    pub scroll_offset: f32,
    pub row_height: f32,
    pub viewport_height: f32,
    pub page_size: usize,
}

impl WindowRequest {
    /// Rows `[first, last)` intersecting the viewport, clamped to the list.
    pub fn visible_range(&self) -> (usize, usize) {
        if self.len == 0 || self.row_height <= 0.0 {
            return (0, 0);
        }
        let offset = self.scroll_offset.max(0.0);
        let first = ((offset / self.row_height).floor() as usize).min(self.len - 1);
        let last = (((offset + self.viewport_height.max(0.0)) / self.row_height).ceil() as usize)
            .clamp(first + 1, self.len);
        (first, last)
    }

    pub fn total_height(&self) -> f32 {
        self.len as f32 * self.row_height
    }
}

#[derive(Debug, Clone, Copy)]
struct Memo {
    center: usize,
    len: usize,
    row_height: f32,
    window: Window,
}

/// Computes windows and remembers the last one to suppress needless re-renders.
#[derive(Debug, Default)]
pub struct WindowManager {
    memo: Option<Memo>,
    recomputes: u64,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the memoized centre; the next computation is unconditional.
    pub fn reset(&mut self) {
        self.memo = None;
    }

    /// Number of times a new window was actually computed.
    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }

    pub fn current(&self) -> Option<Window> {
        self.memo.map(|m| m.window)
    }

    /// Returns the window for `request` and whether it differs from the
    /// memoized one (i.e. whether rows must be re-rendered).
    pub fn compute_window(&mut self, request: &WindowRequest) -> (Window, bool) {
        let (first, last) = request.visible_range();
        let center = (first + last) / 2;
        let page = request.page_size.max(1);
        let whole_list = page.saturating_mul(2) >= request.len;

        if let Some(memo) = self.memo {
            let same_shape = memo.len == request.len && memo.row_height == request.row_height;
            let close = memo.center.abs_diff(center) <= page;
            let reusable = if whole_list {
                memo.window.start == 0 && memo.window.end == request.len
            } else {
                close && memo.window.covers(first, last)
            };
            if same_shape && reusable {
                return (memo.window, false);
            }
        }

        let (start, end) = if whole_list {
            (0, request.len)
        } else {
            (first.saturating_sub(page), (last + page).min(request.len))
        };
        let window = Window {
            start,
            end,
            leading_spacer: start as f32 * request.row_height,
            trailing_spacer: (request.len - end) as f32 * request.row_height,
        };

        let changed = self.memo.map_or(true, |m| m.window != window);
        self.memo = Some(Memo {
            center,
            len: request.len,
            row_height: request.row_height,
            window,
        });
        self.recomputes += 1;
        log::debug!(
            "window recomputed: rows {}..{} of {} (visible {}..{})",
            start,
            end,
            request.len,
            first,
            last
        );
        (window, changed)
    }
}

/// Scroll offset that centres row `index` in the viewport, clamped to the
/// scrollable range.
pub fn recenter_offset(index: usize, len: usize, row_height: f32, viewport_height: f32) -> f32 {
    let target = index as f32 * row_height + row_height / 2.0 - viewport_height / 2.0;
    let max_offset = (len as f32 * row_height - viewport_height).max(0.0);
    target.clamp(0.0, max_offset)
}

/// Rows needed to fill `viewport_height`, at least one.
pub fn rows_per_viewport(viewport_height: f32, row_height: f32) -> usize {
    if row_height <= 0.0 {
        return 1;
    }
    ((viewport_height / row_height).ceil() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: f32 = 20.0;

    fn request(len: usize, scroll_offset: f32, viewport_height: f32) -> WindowRequest {
        WindowRequest {
            len,
            scroll_offset,
            row_height: ROW,
            viewport_height,
            page_size: rows_per_viewport(viewport_height, ROW),
        }
    }

    #[test]
    fn test_window_covers_viewport_at_every_offset() {
        let mut manager = WindowManager::new();
        let len = 1000;
        let viewport = 200.0;
        let max_offset = len as f32 * ROW - viewport;
        let mut offset = 0.0;
        while offset <= max_offset {
            let req = request(len, offset, viewport);
            let (window, _) = manager.compute_window(&req);
            let (first, last) = req.visible_range();
            assert!(window.covers(first, last), "offset {offset}: {window:?} vs {first}..{last}");
            offset += 7.5;
        }
        // Jump backwards too.
        for &offset in &[max_offset, 0.0, max_offset / 2.0, 13.0] {
            let req = request(len, offset, viewport);
            let (window, _) = manager.compute_window(&req);
            let (first, last) = req.visible_range();
            assert!(window.covers(first, last));
        }
    }

    #[test]
    fn test_scrolling_within_a_page_does_not_recompute() {
        let mut manager = WindowManager::new();
        let (_, changed) = manager.compute_window(&request(1000, 2000.0, 200.0));
        assert!(changed);
        let recomputes = manager.recomputes();

        // page = 10 rows = 200px; move up to one page away from the centre.
        for step in 1..=10 {
            let (_, changed) = manager.compute_window(&request(1000, 2000.0 + step as f32 * ROW, 200.0));
            assert!(!changed);
        }
        assert_eq!(manager.recomputes(), recomputes);

        let (_, changed) = manager.compute_window(&request(1000, 2000.0 + 11.0 * ROW, 200.0));
        assert!(changed);
        assert_eq!(manager.recomputes(), recomputes + 1);
    }

    #[test]
    fn test_spacers_account_for_unmaterialized_rows() {
        let mut manager = WindowManager::new();
        let req = request(500, 4000.0, 200.0);
        let (window, _) = manager.compute_window(&req);
        assert_eq!(window.leading_spacer, window.start as f32 * ROW);
        assert_eq!(window.trailing_spacer, (500 - window.end) as f32 * ROW);
        let total = window.leading_spacer + window.len() as f32 * ROW + window.trailing_spacer;
        assert_eq!(total, req.total_height());
    }

    #[test]
    fn test_small_list_is_fully_materialized() {
        let mut manager = WindowManager::new();
        let (window, _) = manager.compute_window(&request(15, 0.0, 200.0));
        assert_eq!((window.start, window.end), (0, 15));
        assert_eq!(window.leading_spacer, 0.0);
        assert_eq!(window.trailing_spacer, 0.0);
        let before = manager.recomputes();
        manager.compute_window(&request(15, 100.0, 200.0));
        assert_eq!(manager.recomputes(), before);
    }

    #[test]
    fn test_window_is_clamped() {
        let mut manager = WindowManager::new();
        let (window, _) = manager.compute_window(&request(100, 1_000_000.0, 200.0));
        assert_eq!(window.end, 100);
        assert!(window.start < 100);
        let (window, _) = manager.compute_window(&request(0, 0.0, 200.0));
        assert!(window.is_empty());
    }

    #[test]
    fn test_reset_forces_recompute() {
        let mut manager = WindowManager::new();
        manager.compute_window(&request(1000, 0.0, 200.0));
        let before = manager.recomputes();
        manager.compute_window(&request(1000, 0.0, 200.0));
        assert_eq!(manager.recomputes(), before);
        manager.reset();
        manager.compute_window(&request(1000, 0.0, 200.0));
        assert_eq!(manager.recomputes(), before + 1);
    }

    #[test]
    fn test_growing_viewport_recomputes_when_uncovered() {
        let mut manager = WindowManager::new();
        let req = WindowRequest { page_size: 2, ..request(1000, 0.0, 100.0) };
        manager.compute_window(&req);
        let tall = WindowRequest { viewport_height: 600.0, ..req };
        let (window, changed) = manager.compute_window(&tall);
        assert!(changed);
        let (first, last) = tall.visible_range();
        assert!(window.covers(first, last));
    }

    #[test]
    fn test_crossing_into_whole_list_materializes_everything() {
        let mut manager = WindowManager::new();
        // 30 rows, page 10: the window only reaches row 20.
        let (window, _) = manager.compute_window(&request(30, 0.0, 200.0));
        assert_eq!((window.start, window.end), (0, 20));

        // Page 15: two pages now cover the whole list.
        let tall = request(30, 300.0, 300.0);
        let (window, changed) = manager.compute_window(&tall);
        assert!(changed);
        assert_eq!((window.start, window.end), (0, 30));
        let (first, last) = tall.visible_range();
        assert!(window.covers(first, last));
        assert_eq!(window.trailing_spacer, 0.0);
    }

    #[test]
    fn test_recenter_offset() {
        assert_eq!(recenter_offset(0, 100, ROW, 200.0), 0.0);
        assert_eq!(recenter_offset(50, 100, ROW, 200.0), 50.0 * ROW + 10.0 - 100.0);
        assert_eq!(recenter_offset(99, 100, ROW, 200.0), 100.0 * ROW - 200.0);
    }
}
