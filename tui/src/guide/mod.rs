//! Workshop Guide
//!
//! The "Workshop Guide" tab: the markdown guide rendered to styled lines
//! and shown in a scrollable, borderless view.

pub mod markdown;

use std::path::Path;

use anyhow::Context;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;

use crate::theme::FAINT;
use markdown::MdLine;

/// Read the guide from disk
///
/// A missing guide is fatal: the page has nothing to show without it.
pub fn load_guide(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read workshop guide {}", path.display()))
}

/// Scrollable rendered guide
pub struct GuideView {
    document: Vec<MdLine>,
    /// Wrapped lines for the last width we drew at
    wrapped: Option<(u16, Vec<Line<'static>>)>,
    /// Scroll offset (rows from top)
    scroll: usize,
    /// Rows visible in the last render
    viewport: usize,
}

impl GuideView {
    /// Parse the guide markdown
    pub fn new(markdown_source: &str) -> Self {
        Self {
            document: markdown::parse(markdown_source),
            wrapped: None,
            scroll: 0,
            viewport: 0,
        }
    }

    /// Scroll by delta rows (positive = down)
    pub fn scroll_by(&mut self, delta: i32) {
        let target = self.scroll as i64 + i64::from(delta);
        self.scroll = target.clamp(0, self.max_scroll() as i64) as usize;
    }

    /// Scroll one viewport down
    pub fn page_down(&mut self) {
        self.scroll_by(self.page_size());
    }

    /// Scroll one viewport up
    pub fn page_up(&mut self) {
        self.scroll_by(-self.page_size());
    }

    /// Jump to the top
    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    /// Jump to the bottom
    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// Current scroll offset
    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// How far down the guide we are, 0..=100
    pub fn scroll_percent(&self) -> u16 {
        let max = self.max_scroll();
        if max == 0 {
            return 100;
        }
        (self.scroll * 100 / max) as u16
    }

    /// Rows after wrapping at the last rendered width
    pub fn total_rows(&self) -> usize {
        self.wrapped.as_ref().map_or(0, |(_, lines)| lines.len())
    }

    fn page_size(&self) -> i32 {
        self.viewport.saturating_sub(2).max(1) as i32
    }

    fn max_scroll(&self) -> usize {
        self.total_rows().saturating_sub(self.viewport)
    }

    /// Render the visible slice into `area`
    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let stale = self.wrapped.as_ref().map_or(true, |(w, _)| *w != area.width);
        if stale {
            self.wrapped = Some((area.width, markdown::layout(&self.document, area.width)));
        }

        self.viewport = area.height as usize;
        self.scroll = self.scroll.min(self.max_scroll());

        let Some((_, lines)) = &self.wrapped else {
            return;
        };

        for (i, line) in lines
            .iter()
            .skip(self.scroll)
            .take(area.height as usize)
            .enumerate()
        {
            buf.set_line(area.x, area.y + i as u16, line, area.width);
        }

        // Hint at hidden content above and below
        let marker_x = area.x + area.width.saturating_sub(1);
        if self.scroll > 0 {
            buf.set_string(marker_x, area.y, "↑", Style::default().fg(FAINT));
        }
        if self.scroll < self.max_scroll() {
            buf.set_string(
                marker_x,
                area.y + area.height - 1,
                "↓",
                Style::default().fg(FAINT),
            );
        }
    }
}
