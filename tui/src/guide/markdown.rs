//! Markdown to styled terminal lines
//!
//! Parses GitHub-flavoured markdown (tables, strikethrough, task lists) with
//! `pulldown-cmark` into width-independent [`MdLine`]s. Wrapping happens
//! later, in [`layout`], once the viewport width is known.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::{code_style, link_style, ACCENT, DIM, FAINT, QUOTE_BAR, TEXT};

/// One logical line of the rendered guide
#[derive(Clone, Debug, PartialEq)]
pub enum MdLine {
    /// Wrappable text; `prefix` on the first row, `hang` on the rest
    Text {
        prefix: Vec<Span<'static>>,
        hang: Vec<Span<'static>>,
        spans: Vec<Span<'static>>,
    },
    /// Horizontal rule filling the width
    Rule {
        prefix: Vec<Span<'static>>,
        symbol: &'static str,
        style: Style,
    },
    Blank,
}

/// Parse markdown into logical lines
pub fn parse(markdown: &str) -> Vec<MdLine> {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let mut renderer = Renderer::default();
    for event in Parser::new_ext(markdown, options) {
        renderer.event(event);
    }
    renderer.finish()
}

/// Wrap logical lines to `width` columns
pub fn layout(document: &[MdLine], width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    let mut out = Vec::new();

    for line in document {
        match line {
            MdLine::Blank => out.push(Line::default()),
            MdLine::Rule {
                prefix,
                symbol,
                style,
            } => {
                let room = width.saturating_sub(spans_width(prefix));
                let mut spans = prefix.clone();
                spans.push(Span::styled(symbol.repeat(room), *style));
                out.push(Line::from(spans));
            }
            MdLine::Text { prefix, hang, spans } => {
                let room = width.saturating_sub(spans_width(prefix)).max(1);
                for (i, row) in wrap_spans(spans, room).into_iter().enumerate() {
                    let mut full = if i == 0 { prefix.clone() } else { hang.clone() };
                    full.extend(row);
                    out.push(Line::from(full));
                }
            }
        }
    }

    out
}

fn spans_width(spans: &[Span<'_>]) -> usize {
    spans.iter().map(|s| s.content.width()).sum()
}

/// Greedy word wrap that keeps each span's style
fn wrap_spans(spans: &[Span<'static>], width: usize) -> Vec<Vec<Span<'static>>> {
    let mut rows = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for span in spans {
        for piece in span.content.split_inclusive(' ') {
            let piece_width = piece.width();

            if used + piece_width > width && used > 0 {
                // A trailing space may hang past the edge
                let trimmed = piece.trim_end();
                if used + trimmed.width() <= width && !trimmed.is_empty() {
                    row.push(Span::styled(trimmed.to_string(), span.style));
                    rows.push(finish_row(std::mem::take(&mut row)));
                    used = 0;
                    continue;
                }
                rows.push(finish_row(std::mem::take(&mut row)));
                used = 0;
                if piece.trim().is_empty() {
                    continue;
                }
            }

            if piece_width <= width - used {
                row.push(Span::styled(piece.to_string(), span.style));
                used += piece_width;
                continue;
            }

            // Longer than a whole row: split by characters
            let mut chunk = String::new();
            for ch in piece.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if used + ch_width > width && used > 0 {
                    row.push(Span::styled(std::mem::take(&mut chunk), span.style));
                    rows.push(finish_row(std::mem::take(&mut row)));
                    used = 0;
                }
                chunk.push(ch);
                used += ch_width;
            }
            if !chunk.is_empty() {
                row.push(Span::styled(chunk, span.style));
            }
        }
    }

    if !row.is_empty() || rows.is_empty() {
        rows.push(finish_row(row));
    }
    rows
}

/// Drop trailing blanks left at a wrap point
fn finish_row(mut row: Vec<Span<'static>>) -> Vec<Span<'static>> {
    while let Some(last) = row.last_mut() {
        let trimmed = last.content.trim_end();
        if trimmed.is_empty() {
            row.pop();
        } else {
            if trimmed.len() != last.content.len() {
                last.content = trimmed.to_string().into();
            }
            break;
        }
    }
    row
}

// ============================================================================
// Event walker
// ============================================================================

struct ListState {
    /// Next number for ordered lists
    next: Option<u64>,
    /// Width of this level's marker, used to indent continuation rows
    marker_width: usize,
}

#[derive(Default)]
struct Renderer {
    lines: Vec<MdLine>,
    current: Vec<Span<'static>>,
    styles: Vec<Style>,
    lists: Vec<ListState>,
    pending_marker: Option<String>,
    quote_depth: usize,
    code_block: bool,
    heading: Option<HeadingLevel>,
    link: Option<String>,
    table: Option<Table>,
}

#[derive(Default)]
struct Table {
    rows: Vec<Vec<String>>,
    header_rows: usize,
    cell: String,
    row: Vec<String>,
}

impl Renderer {
    fn event(&mut self, event: Event<'_>) {
        if self.table.is_some() && self.table_event(&event) {
            return;
        }

        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if self.code_block {
                    self.code_text(&text);
                } else {
                    self.push_text(&text, self.style());
                }
            }
            Event::Code(code) => {
                let code: &str = &code;
                self.current
                    .push(Span::styled(format!(" {code} "), code_style()));
            }
            Event::SoftBreak => self.push_text(" ", self.style()),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.separate();
                self.lines.push(MdLine::Rule {
                    prefix: self.prefix(),
                    symbol: "─",
                    style: Style::default().fg(FAINT),
                });
            }
            Event::TaskListMarker(done) => {
                let (mark, style) = if done {
                    ("[x] ", Style::default().fg(ACCENT))
                } else {
                    ("[ ] ", Style::default().fg(DIM))
                };
                self.current.push(Span::styled(mark, style));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.flush();
                if self.pending_marker.is_none() {
                    self.separate();
                }
            }
            Tag::Heading { level, .. } => {
                self.flush();
                self.separate();
                self.heading = Some(level);
                self.styles.push(heading_style(level));
            }
            Tag::BlockQuote { .. } => {
                self.flush();
                self.separate();
                self.quote_depth += 1;
                self.styles.push(Style::default().fg(DIM));
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                self.separate();
                if let CodeBlockKind::Fenced(lang) = kind {
                    if !lang.is_empty() {
                        self.lines.push(MdLine::Text {
                            prefix: self.prefix(),
                            hang: self.prefix(),
                            spans: vec![Span::styled(lang.to_string(), Style::default().fg(FAINT))],
                        });
                    }
                }
                self.code_block = true;
            }
            Tag::List(start) => {
                self.flush();
                if self.lists.is_empty() {
                    self.separate();
                }
                let marker_width = match start {
                    Some(n) => format!("{n}. ").width(),
                    None => 2,
                };
                self.lists.push(ListState {
                    next: start,
                    marker_width,
                });
            }
            Tag::Item => {
                self.flush();
                let depth = self.lists.len();
                if let Some(list) = self.lists.last_mut() {
                    let marker = match list.next.as_mut() {
                        Some(n) => {
                            let marker = format!("{n}. ");
                            *n += 1;
                            marker
                        }
                        None if depth > 1 => "◦ ".to_string(),
                        None => "• ".to_string(),
                    };
                    list.marker_width = list.marker_width.max(marker.width());
                    self.pending_marker = Some(marker);
                }
            }
            Tag::Emphasis => self.push_style(Modifier::ITALIC),
            Tag::Strong => self.push_style(Modifier::BOLD),
            Tag::Strikethrough => self.push_style(Modifier::CROSSED_OUT),
            Tag::Link { dest_url, .. } => {
                self.link = Some(dest_url.to_string());
                self.styles.push(link_style());
            }
            Tag::Image { dest_url, .. } => {
                self.link = Some(dest_url.to_string());
                self.styles.push(link_style());
                self.current
                    .push(Span::styled("[image] ", Style::default().fg(FAINT)));
            }
            Tag::Table(_) => {
                self.flush();
                self.separate();
                self.table = Some(Table::default());
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.flush(),
            TagEnd::Heading { .. } => {
                self.flush();
                self.styles.pop();
                match self.heading.take() {
                    Some(HeadingLevel::H1) => self.lines.push(MdLine::Rule {
                        prefix: self.prefix(),
                        symbol: "━",
                        style: Style::default().fg(TEXT),
                    }),
                    Some(HeadingLevel::H2) => self.lines.push(MdLine::Rule {
                        prefix: self.prefix(),
                        symbol: "─",
                        style: Style::default().fg(FAINT),
                    }),
                    _ => {}
                }
            }
            TagEnd::BlockQuote { .. } => {
                self.flush();
                self.styles.pop();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::CodeBlock { .. } => {
                self.code_block = false;
            }
            TagEnd::List { .. } => {
                self.flush();
                self.lists.pop();
            }
            TagEnd::Item => self.flush(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::Link { .. } | TagEnd::Image { .. } => {
                self.styles.pop();
                if let Some(url) = self.link.take() {
                    let shown: String = self.current.iter().map(|s| s.content.as_ref()).collect();
                    if !url.starts_with('#') && !shown.contains(url.as_str()) {
                        self.current
                            .push(Span::styled(format!(" ({url})"), Style::default().fg(FAINT)));
                    }
                }
            }
            _ => {}
        }
    }

    /// Collect table cells as plain text; true if the event was consumed
    fn table_event(&mut self, event: &Event<'_>) -> bool {
        let Some(table) = self.table.as_mut() else {
            return false;
        };

        match event {
            Event::Text(text) | Event::Code(text) => table.cell.push_str(text),
            Event::SoftBreak | Event::HardBreak => table.cell.push(' '),
            Event::End(TagEnd::TableCell) => {
                let cell = std::mem::take(&mut table.cell);
                table.row.push(cell.trim().to_string());
            }
            Event::End(TagEnd::TableHead) => {
                table.rows.push(std::mem::take(&mut table.row));
                table.header_rows = table.rows.len();
            }
            Event::End(TagEnd::TableRow) => {
                table.rows.push(std::mem::take(&mut table.row));
            }
            Event::End(TagEnd::Table) => {
                if let Some(table) = self.table.take() {
                    self.emit_table(table);
                }
            }
            _ => {}
        }
        true
    }

    fn emit_table(&mut self, table: Table) {
        let columns = table.rows.iter().map(Vec::len).max().unwrap_or(0);
        let widths: Vec<usize> = (0..columns)
            .map(|c| {
                table
                    .rows
                    .iter()
                    .filter_map(|row| row.get(c))
                    .map(|cell| cell.width())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let border = Style::default().fg(FAINT);
        for (i, row) in table.rows.iter().enumerate() {
            let style = if i < table.header_rows {
                Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(TEXT)
            };

            let mut spans = Vec::new();
            for (c, width) in widths.iter().enumerate() {
                if c > 0 {
                    spans.push(Span::styled(" │ ", border));
                }
                let cell = row.get(c).map(String::as_str).unwrap_or("");
                let pad = width.saturating_sub(cell.width());
                spans.push(Span::styled(format!("{cell}{}", " ".repeat(pad)), style));
            }
            self.lines.push(MdLine::Text {
                prefix: self.prefix(),
                hang: self.prefix(),
                spans,
            });

            if i + 1 == table.header_rows {
                let rule = widths
                    .iter()
                    .map(|w| "─".repeat(*w))
                    .collect::<Vec<_>>()
                    .join("─┼─");
                self.lines.push(MdLine::Text {
                    prefix: self.prefix(),
                    hang: self.prefix(),
                    spans: vec![Span::styled(rule, border)],
                });
            }
        }
    }

    fn code_text(&mut self, text: &str) {
        let gutter = Span::styled("  ", code_style());
        for line in text.trim_end_matches('\n').split('\n') {
            let mut prefix = self.prefix();
            prefix.push(gutter.clone());
            self.lines.push(MdLine::Text {
                hang: prefix.clone(),
                prefix,
                spans: vec![Span::styled(line.to_string(), code_style())],
            });
        }
    }

    fn push_text(&mut self, text: &str, style: Style) {
        self.current.push(Span::styled(text.to_string(), style));
    }

    fn push_style(&mut self, modifier: Modifier) {
        let style = self.style().add_modifier(modifier);
        self.styles.push(style);
    }

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(TEXT))
    }

    /// Quote bars and list indentation
    fn prefix(&self) -> Vec<Span<'static>> {
        self.prefix_with(None)
    }

    /// Like `prefix`, with `bullet` in place of the innermost indent
    fn prefix_with(&self, bullet: Option<String>) -> Vec<Span<'static>> {
        let mut spans: Vec<Span<'static>> = (0..self.quote_depth)
            .map(|_| Span::styled("▎ ", Style::default().fg(QUOTE_BAR)))
            .collect();

        let outer: usize = self
            .lists
            .iter()
            .rev()
            .skip(1)
            .map(|l| l.marker_width)
            .sum();
        if !self.lists.is_empty() {
            spans.push(Span::raw(" ".repeat(outer)));
            let own = self.lists.last().map_or(0, |l| l.marker_width);
            match bullet {
                Some(bullet) => spans.push(Span::styled(bullet, Style::default().fg(DIM))),
                None => spans.push(Span::raw(" ".repeat(own))),
            }
        }
        spans
    }

    /// Emit the current line, if any (a pending bullet waits for text)
    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let hang = self.prefix();
        let bullet = if self.lists.is_empty() {
            None
        } else {
            self.pending_marker.take()
        };
        let prefix = self.prefix_with(bullet);
        let spans = std::mem::take(&mut self.current);
        self.lines.push(MdLine::Text { prefix, hang, spans });
    }

    /// Blank line between blocks
    fn separate(&mut self) {
        if !matches!(self.lines.last(), None | Some(MdLine::Blank)) {
            self.lines.push(MdLine::Blank);
        }
    }

    fn finish(mut self) -> Vec<MdLine> {
        self.flush();
        while matches!(self.lines.last(), Some(MdLine::Blank)) {
            self.lines.pop();
        }
        self.lines
    }
}

fn heading_style(level: HeadingLevel) -> Style {
    let base = Style::default().add_modifier(Modifier::BOLD);
    match level {
        HeadingLevel::H1 | HeadingLevel::H2 => base.fg(TEXT),
        HeadingLevel::H3 => base.fg(ACCENT),
        _ => base.fg(DIM),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn render(markdown: &str, width: u16) -> Vec<String> {
        layout(&parse(markdown), width).iter().map(text_of).collect()
    }

    #[test]
    fn test_heading_gets_rule() {
        let lines = render("# Welcome", 10);
        assert_eq!(lines, vec!["Welcome".to_string(), "━".repeat(10)]);
    }

    #[test]
    fn test_paragraphs_are_separated() {
        let lines = render("one\n\ntwo", 20);
        assert_eq!(lines, vec!["one", "", "two"]);
    }

    #[test]
    fn test_soft_breaks_join_lines() {
        let lines = render("one\ntwo", 20);
        assert_eq!(lines, vec!["one two"]);
    }

    #[test]
    fn test_wrapping_respects_width() {
        let lines = render("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_list_markers_and_hanging_indent() {
        let lines = render("- alpha beta gamma\n- two", 12);
        assert_eq!(lines, vec!["• alpha beta", "  gamma", "• two"]);
    }

    #[test]
    fn test_ordered_list_counts() {
        let lines = render("1. first\n2. second", 20);
        assert_eq!(lines, vec!["1. first", "2. second"]);
    }

    #[test]
    fn test_inline_code_is_styled() {
        let document = parse("run `pnpm dev` now");
        let lines = layout(&document, 40);
        let code = lines[0]
            .spans
            .iter()
            .find(|s| s.content.contains("pnpm"))
            .map(|s| s.style);
        assert_eq!(code, Some(code_style()));
    }

    #[test]
    fn test_code_block_keeps_lines() {
        let lines = render("```sh\nnpm i\npnpm dev\n```", 40);
        assert_eq!(lines, vec!["sh", "  npm i", "  pnpm dev"]);
    }

    #[test]
    fn test_link_shows_destination() {
        let lines = render("[docs](https://opencode.ai/docs)", 60);
        assert_eq!(lines, vec!["docs (https://opencode.ai/docs)"]);
    }

    #[test]
    fn test_blockquote_has_bar() {
        let lines = render("> note", 20);
        assert_eq!(lines, vec!["▎ note"]);
    }

    #[test]
    fn test_heading_rule_inside_quote_keeps_bar() {
        let lines = render("> ## Tips", 10);
        assert_eq!(lines, vec!["▎ Tips".to_string(), format!("▎ {}", "─".repeat(8))]);
    }

    #[test]
    fn test_code_block_inside_quote_keeps_bar() {
        let lines = render("> ```sh\n> ls\n> ```", 20);
        assert_eq!(lines, vec!["▎ sh", "▎   ls"]);
    }

    #[test]
    fn test_table_columns_align() {
        let lines = render("| a | bb |\n|---|---|\n| ccc | d |", 40);
        assert_eq!(lines, vec!["a   │ bb", "────┼───", "ccc │ d"]);
    }

    #[test]
    fn test_task_list_markers() {
        let lines = render("- [x] done\n- [ ] todo", 20);
        assert_eq!(lines, vec!["• [x] done", "• [ ] todo"]);
    }

    #[test]
    fn test_long_word_is_split() {
        let lines = render("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }
}
