//! Quick Reference
//!
//! The "Quick Reference" tab: a grid of tip cards. Selecting a card
//! highlights it and opens a detail panel with numbered tips and a
//! documentation link.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

use crate::theme::{code_style, link_style, ACCENT, BORDER, DIM, FAINT, TEXT};

/// One tip inside a card
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tip {
    pub title: &'static str,
    pub description: &'static str,
}

/// Documentation link at the bottom of a card's panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DocLink {
    pub label: &'static str,
    pub url: &'static str,
}

/// A quick-reference card
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TipCard {
    pub id: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub preview: &'static str,
    pub tips: &'static [Tip],
    pub link: Option<DocLink>,
}

const fn tip(title: &'static str, description: &'static str) -> Tip {
    Tip { title, description }
}

// ============================================================================
// Cards
// ============================================================================

pub const TIP_CARDS: &[TipCard] = &[
    TipCard {
        id: "git",
        icon: "</>",
        title: "Git Basics",
        preview: "Clone, commit, push, branches",
        tips: &[
            tip("git clone <url>", "Download a repository to your local machine"),
            tip("git add .", "Stage all changes for commit"),
            tip("git commit -m \"message\"", "Save staged changes with a description"),
            tip("git push", "Upload commits to remote repository (GitHub)"),
            tip("git pull", "Download and merge remote changes"),
        ],
        link: Some(DocLink {
            label: "Git Handbook",
            url: "https://guides.github.com/introduction/git-handbook/",
        }),
    },
    TipCard {
        id: "terminal",
        icon: ">_",
        title: "Terminal/CLI",
        preview: "Navigate like a pro",
        tips: &[
            tip("cd <folder>", "Change directory - navigate into a folder"),
            tip("cd ..", "Go up one directory level"),
            tip("ls (or dir on Windows)", "List files and folders in current directory"),
            tip("pwd", "Print working directory - see where you are"),
            tip("clear (or cls)", "Clear the terminal screen"),
        ],
        link: Some(DocLink {
            label: "Command Line Crash Course",
            url: "https://developer.mozilla.org/en-US/docs/Learn/Tools_and_testing/Understanding_client-side_tools/Command_line",
        }),
    },
    TipCard {
        id: "opencode",
        icon: "AI",
        title: "OpenCode Tips",
        preview: "/init, Tab, /models",
        tips: &[
            tip(
                "/init",
                "Creates Agent.md for project context - helps AI understand your codebase",
            ),
            tip(
                "Tab (Plan vs Build)",
                "Toggle modes: Plan = safe exploration, Build = make changes",
            ),
            tip("/models", "Switch AI models - select GitHub Copilot for free access"),
            tip("/help", "See all available slash commands"),
            tip("Ctrl+P", "Open action palette for quick commands"),
        ],
        link: Some(DocLink {
            label: "OpenCode Docs",
            url: "https://opencode.ai/docs",
        }),
    },
    TipCard {
        id: "vscode",
        icon: "{}",
        title: "VS Code Shortcuts",
        preview: "Work faster with hotkeys",
        tips: &[
            tip("Ctrl+` (backtick)", "Toggle integrated terminal"),
            tip("Ctrl+P", "Quick file open - type filename to jump to it"),
            tip("Ctrl+Shift+P", "Command palette - access all VS Code commands"),
            tip("Ctrl+/", "Toggle comment on selected lines"),
            tip("Ctrl+Shift+V", "Preview markdown file"),
        ],
        link: Some(DocLink {
            label: "VS Code Shortcuts",
            url: "https://code.visualstudio.com/shortcuts/keyboard-shortcuts-windows.pdf",
        }),
    },
    TipCard {
        id: "node",
        icon: "npm",
        title: "Node/pnpm",
        preview: "Package management basics",
        tips: &[
            tip("pnpm install (or pnpm i)", "Install all dependencies from package.json"),
            tip("pnpm dev", "Start development server (runs next dev)"),
            tip("pnpm add <package>", "Add a new dependency to your project"),
            tip("package.json", "Config file listing dependencies and scripts"),
            tip("node_modules/", "Folder with installed packages (don't edit or commit!)"),
        ],
        link: Some(DocLink {
            label: "pnpm Docs",
            url: "https://pnpm.io/motivation",
        }),
    },
    TipCard {
        id: "debug",
        icon: "!",
        title: "Debugging Tips",
        preview: "Find and fix issues",
        tips: &[
            tip("console.log()", "Print values to browser/terminal to inspect them"),
            tip("Browser DevTools (F12)", "Inspect elements, network, console in browser"),
            tip("Read the error message", "Errors usually tell you the file and line number"),
            tip("Google the error", "Copy the error message - someone else had it too"),
            tip("Ask OpenCode!", "Paste the error and ask for help debugging"),
        ],
        link: Some(DocLink {
            label: "Chrome DevTools Guide",
            url: "https://developer.chrome.com/docs/devtools/",
        }),
    },
];

const INTRO: &str = "Click a card to see detailed tips for each topic.";
const CARD_HEIGHT: u16 = 4;
const GAP: u16 = 2;

/// Arrow-key movement across the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
}

/// Focus, selection and the hit areas from the last render
#[derive(Debug)]
pub struct ReferenceState {
    cards: &'static [TipCard],
    focused: usize,
    selected: Option<usize>,
    columns: usize,
    /// Card rectangles in the coordinates the view was rendered at
    card_areas: Vec<Rect>,
    close_area: Option<Rect>,
}

impl Default for ReferenceState {
    fn default() -> Self {
        Self::new(TIP_CARDS)
    }
}

impl ReferenceState {
    pub fn new(cards: &'static [TipCard]) -> Self {
        Self {
            cards,
            focused: 0,
            selected: None,
            columns: 1,
            card_areas: Vec::new(),
            close_area: None,
        }
    }

    /// Move keyboard focus
    pub fn move_focus(&mut self, direction: Move) {
        let last = self.cards.len().saturating_sub(1);
        let columns = self.columns.max(1);
        self.focused = match direction {
            Move::Left => self.focused.saturating_sub(1),
            Move::Right => (self.focused + 1).min(last),
            Move::Up => self.focused.checked_sub(columns).unwrap_or(self.focused),
            Move::Down => {
                let below = self.focused + columns;
                if below <= last {
                    below
                } else {
                    self.focused
                }
            }
        };
    }

    /// Index of the focused card
    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Index of the open card, if any
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The open card, if any
    pub fn selected_card(&self) -> Option<&'static TipCard> {
        let cards = self.cards;
        self.selected.and_then(|i| cards.get(i))
    }

    /// Open a card (also moves focus to it)
    pub fn select(&mut self, index: usize) -> Option<&'static TipCard> {
        let cards = self.cards;
        let card = cards.get(index)?;
        self.selected = Some(index);
        self.focused = index;
        Some(card)
    }

    /// Open the focused card
    pub fn select_focused(&mut self) -> Option<&'static TipCard> {
        self.select(self.focused)
    }

    /// Close the detail panel; false if nothing was open
    pub fn close(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// Card under a point, using the last rendered layout
    pub fn card_at(&self, x: u16, y: u16) -> Option<usize> {
        self.card_areas
            .iter()
            .position(|r| x >= r.x && x < r.right() && y >= r.y && y < r.bottom())
    }

    /// Whether a point hits the panel's close control
    pub fn is_close_at(&self, x: u16, y: u16) -> bool {
        self.close_area
            .is_some_and(|r| x >= r.x && x < r.right() && y >= r.y && y < r.bottom())
    }

    /// Last rendered rectangle of a card
    pub fn card_area(&self, index: usize) -> Option<Rect> {
        self.card_areas.get(index).copied()
    }

    /// Columns used by the last render
    pub fn columns(&self) -> usize {
        self.columns
    }
}

/// Grid columns for a width, like a responsive page
pub fn columns_for(width: u16) -> usize {
    match width {
        w if w >= 90 => 3,
        w if w >= 56 => 2,
        _ => 1,
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Render the reference tab into `area`
pub fn render(state: &mut ReferenceState, area: Rect, buf: &mut Buffer) {
    state.card_areas.clear();
    state.close_area = None;
    if area.width < 12 || area.height < 3 {
        return;
    }

    state.columns = columns_for(area.width);
    let columns = state.columns as u16;
    let rows = state.cards.len().div_ceil(state.columns) as u16;
    let grid_height = rows * CARD_HEIGHT + rows.saturating_sub(1);

    let panel = state
        .selected_card()
        .map(|card| (card, panel_lines(card, area.width.saturating_sub(4))));
    let panel_height = panel.as_ref().map_or(0, |(_, lines)| lines.len() as u16 + 2);

    // Intro, grid, gap, panel, gap, footer
    let full_height = 2 + grid_height + 1 + panel_height + 2;
    let show_grid = panel.is_none() || full_height <= area.height;

    let mut y = area.y;
    if show_grid {
        buf.set_string(area.x, y, INTRO, Style::default().fg(DIM));
        y += 2;

        let card_width = (area.width - GAP * (columns - 1)) / columns;
        for (i, card) in state.cards.iter().enumerate() {
            let col = i as u16 % columns;
            let row = i as u16 / columns;
            let rect = Rect::new(
                area.x + col * (card_width + GAP),
                y + row * (CARD_HEIGHT + 1),
                card_width,
                CARD_HEIGHT,
            );
            if rect.bottom() > area.bottom() {
                break;
            }
            render_card(
                card,
                rect,
                buf,
                state.selected == Some(i),
                state.focused == i,
            );
            state.card_areas.push(rect);
        }
        y += grid_height + 1;
    }

    if let Some((card, lines)) = panel {
        let height = panel_height.min(area.bottom().saturating_sub(y));
        let rect = Rect::new(area.x, y, area.width, height);
        state.close_area = render_panel(card, lines, rect, buf);
        y += height + 1;
    }

    // Footer hint on the last row, if there is room left
    if y < area.bottom() {
        let footer = Line::from(vec![
            Span::styled("Press ", Style::default().fg(FAINT)),
            Span::styled(" Tab ", code_style()),
            Span::styled(
                " in OpenCode to toggle between Plan and Build mode",
                Style::default().fg(FAINT),
            ),
        ])
        .alignment(Alignment::Center);
        let footer_area = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        Paragraph::new(footer).render(footer_area, buf);
    }
}

fn render_card(card: &TipCard, rect: Rect, buf: &mut Buffer, selected: bool, focused: bool) {
    let (border_type, border_style) = if selected {
        (BorderType::Thick, Style::default().fg(TEXT))
    } else if focused {
        (BorderType::Rounded, Style::default().fg(ACCENT))
    } else {
        (BorderType::Rounded, Style::default().fg(BORDER))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);
    let inner = block.inner(rect);
    block.render(rect, buf);

    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", card.icon), code_style().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(card.title, Style::default().fg(TEXT).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(card.preview, Style::default().fg(DIM))),
    ];
    Paragraph::new(lines).render(inner, buf);
}

/// Panel body: numbered tips and the link, wrapped to `width`
fn panel_lines(card: &TipCard, width: u16) -> Vec<Line<'static>> {
    let text_width = usize::from(width.saturating_sub(4).max(8));
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", card.icon), code_style().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(card.title, Style::default().fg(TEXT).add_modifier(Modifier::BOLD)),
        ]),
        Line::default(),
    ];

    for (i, tip) in card.tips.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>2} ", i + 1), Style::default().fg(DIM)),
            Span::raw(" "),
            Span::styled(format!(" {} ", tip.title), code_style()),
        ]));
        for row in textwrap::wrap(tip.description, text_width) {
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(row.into_owned(), Style::default().fg(DIM)),
            ]));
        }
    }

    if let Some(link) = card.link {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(format!("{} ↗ ", link.label), Style::default().fg(TEXT).add_modifier(Modifier::BOLD)),
            Span::styled(link.url, link_style()),
        ]));
    }

    lines
}

/// Draw the panel; returns the close control's rectangle
fn render_panel(card: &TipCard, lines: Vec<Line<'static>>, rect: Rect, buf: &mut Buffer) -> Option<Rect> {
    if rect.height < 3 {
        return None;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER))
        .title_bottom(Line::from(Span::styled(" Esc to close ", Style::default().fg(FAINT))).right_aligned());
    let inner = block.inner(rect);
    block.render(rect, buf);

    let body = Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), inner.height);
    Paragraph::new(lines).render(body, buf);

    let close = Rect::new(rect.right().saturating_sub(5), rect.y, 3, 1);
    buf.set_string(close.x, close.y, "[x]", Style::default().fg(DIM));
    tracing::trace!(card = card.id, "detail panel drawn");
    Some(close)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn screen_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(state: &mut ReferenceState, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        render(state, area, &mut buf);
        buf
    }

    #[test]
    fn test_six_cards_with_five_tips_each() {
        assert_eq!(TIP_CARDS.len(), 6);
        for card in TIP_CARDS {
            assert_eq!(card.tips.len(), 5, "{}", card.id);
            assert!(card.link.is_some(), "{}", card.id);
        }
    }

    #[test]
    fn test_columns_follow_width() {
        assert_eq!(columns_for(40), 1);
        assert_eq!(columns_for(60), 2);
        assert_eq!(columns_for(100), 3);
    }

    #[test]
    fn test_focus_moves_through_grid() {
        let mut state = ReferenceState::default();
        draw(&mut state, 100, 40);
        assert_eq!(state.columns(), 3);

        state.move_focus(Move::Down);
        assert_eq!(state.focused(), 3);
        state.move_focus(Move::Down);
        assert_eq!(state.focused(), 3);
        state.move_focus(Move::Right);
        state.move_focus(Move::Right);
        state.move_focus(Move::Right);
        assert_eq!(state.focused(), 5);
        state.move_focus(Move::Up);
        assert_eq!(state.focused(), 2);
        state.move_focus(Move::Left);
        assert_eq!(state.focused(), 1);
    }

    #[test]
    fn test_select_and_close() {
        let mut state = ReferenceState::default();
        state.move_focus(Move::Right);

        let card = state.select_focused().map(|c| c.id);
        assert_eq!(card, Some("terminal"));
        assert_eq!(state.selected(), Some(1));

        assert!(state.close());
        assert!(!state.close());
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut state = ReferenceState::default();
        assert!(state.select(99).is_none());
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_render_records_hit_areas() {
        let mut state = ReferenceState::default();
        draw(&mut state, 100, 40);

        let first = state.card_area(0).unwrap();
        assert_eq!(state.card_at(first.x + 1, first.y + 1), Some(0));
        let last = state.card_area(5).unwrap();
        assert_eq!(state.card_at(last.x + 1, last.y + 1), Some(5));
        assert_eq!(state.card_at(0, 0), None);
    }

    #[test]
    fn test_grid_shows_intro() {
        let mut state = ReferenceState::default();
        let text = screen_text(&draw(&mut state, 100, 40));
        assert!(text.contains("Click a card to see detailed tips for each topic."));
    }

    #[test]
    fn test_open_card_shows_panel() {
        let mut state = ReferenceState::default();
        state.select(2);
        let buf = draw(&mut state, 100, 50);
        let text = screen_text(&buf);

        assert!(text.contains("Creates Agent.md"));
        assert!(text.contains("https://opencode.ai/docs"));
        assert!(text.contains("[x]"));

        let close = state.close_area.unwrap();
        assert!(state.is_close_at(close.x, close.y));
    }

    #[test]
    fn test_small_screen_shows_panel_only() {
        let mut state = ReferenceState::default();
        state.select(0);
        let buf = draw(&mut state, 60, 20);
        let text = screen_text(&buf);

        assert!(text.contains("git clone <url>"));
        assert!(state.card_area(0).is_none());
    }
}
