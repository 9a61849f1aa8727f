//! Main Application
//!
//! The App struct manages the workshop page in the terminal:
//! - Event loop (keyboard, mouse, resize) with a fixed frame tick
//! - The headless [`Mascot`] from `workshop-core`
//! - Guide and Quick Reference tabs, confetti and the celebration banner
//!
//! # Layers
//!
//! ```text
//!  z95 banner      secret-code message, only while celebrating
//!  z90 confetti    full screen, transparent except particles
//!  z50 mascot      bottom-right dog + speech toggle
//!  z40 bubble      caption above the dog
//!  z10 header      title, subtitle, tabs
//!  z10 status      key hints
//!  z0  content     guide or reference tab
//! ```
//!
//! The App has no terminal of its own until [`App::run`], so tests drive it
//! with [`App::handle_event`], [`App::update`] and a `TestBackend`.

use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};
use ratatui::Terminal;
use tokio::time::MissedTickBehavior;
use unicode_width::UnicodeWidthStr;

use workshop_core::{
    Burst, CelebrationEffects, ClickOutcome, GestureKey, GestureOutcome, Mascot, MoodState,
    Origin, WorkshopConfig,
};

use crate::avatar::Avatar;
use crate::compositor::{Compositor, LayerId};
use crate::confetti::ConfettiField;
use crate::guide::GuideView;
use crate::reference::{self, Move, ReferenceState};
use crate::theme::{
    active_tab_style, inactive_tab_style, title_style, ACCENT, BANNER, BORDER, DIM, FAINT,
    PANEL_BG, TEXT,
};

/// Header height: title, subtitle, gap, tabs, separator
const HEADER_HEIGHT: u16 = 5;
/// Widest caption line before the bubble wraps
const BUBBLE_TEXT_WIDTH: usize = 24;
/// Rows the guide moves per wheel notch
const WHEEL_STEP: i32 = 3;

const TITLE: &str = "OpenCode Workshop";
const SUBTITLE: &str = "Learn to vibe code with AI using your Microsoft license";

/// Quick goodbye messages
const QUICK_GOODBYES: &[&str] = &[
    "Happy vibe coding!",
    "Go build something cool!",
    "Woof! See you next time!",
    "Good luck with your first PR!",
    "Remember: Tab toggles Plan and Build!",
    "You got this!",
    "Bye bye!",
];

/// Page tabs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Guide,
    Reference,
}

impl Tab {
    const ALL: [Tab; 2] = [Tab::Guide, Tab::Reference];

    pub fn title(self) -> &'static str {
        match self {
            Self::Guide => "Workshop Guide",
            Self::Reference => "Quick Reference",
        }
    }

    fn other(self) -> Self {
        match self {
            Self::Guide => Self::Reference,
            Self::Reference => Self::Guide,
        }
    }
}

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Goodbye message to show on exit
    goodbye_message: Option<String>,

    // === Workshop State ===
    /// Mood and secret-code state machines
    mascot: Mascot,
    /// Particle field the mascot and cards fire bursts into
    confetti: ConfettiField,
    guide: GuideView,
    reference: ReferenceState,
    tab: Tab,
    /// Whether the speech bubble is shown
    speech: bool,

    // === UI Components ===
    /// The layered compositor
    compositor: Compositor,
    /// The avatar renderer (display only)
    avatar: Avatar,
    /// Layer assignments
    layers: AppLayers,
    /// Tab labels in header-layer coordinates, from the last render
    tab_areas: Vec<(Tab, Rect)>,

    // === Misc State ===
    /// Last frame time (for animations)
    last_frame: Instant,
    /// Frame tick
    frame_duration: Duration,
    /// Developer mode
    dev_mode: bool,
    /// Terminal size
    size: (u16, u16),
}

/// Layer IDs for UI regions
struct AppLayers {
    header: LayerId,
    content: LayerId,
    status: LayerId,
    bubble: LayerId,
    mascot: LayerId,
    confetti: LayerId,
    banner: LayerId,
}

/// Where every layer goes for a given terminal size
struct Placement {
    header: Rect,
    content: Rect,
    status: Rect,
    mascot: Rect,
    full: Rect,
    banner: Rect,
}

impl Placement {
    fn for_size(width: u16, height: u16) -> Self {
        let full = Rect::new(0, 0, width, height);
        let header = Rect::new(0, 0, width, HEADER_HEIGHT.min(height));
        let status = Rect::new(0, height.saturating_sub(1), width, height.min(1));
        let content = Rect::new(
            0,
            header.bottom(),
            width,
            height.saturating_sub(header.height + status.height),
        );

        // Dog plus one label row, tucked into the bottom-right corner
        let (dog_w, dog_h) = Avatar::bounds();
        let mascot_w = (dog_w + 2).min(width);
        let mascot_h = (dog_h + 1).min(height.saturating_sub(status.height));
        let mascot = Rect::new(
            width.saturating_sub(mascot_w + 1),
            status.y.saturating_sub(mascot_h),
            mascot_w,
            mascot_h,
        );

        let banner_w = 44u16.min(width);
        let banner_h = 4u16.min(height);
        let banner = Rect::new(
            (width - banner_w) / 2,
            (height - banner_h) / 2,
            banner_w,
            banner_h,
        );

        Self {
            header,
            content,
            status,
            mascot,
            full,
            banner,
        }
    }
}

impl App {
    /// Create the page for a terminal of `size` columns x rows
    pub fn new(config: &WorkshopConfig, guide_markdown: &str, size: (u16, u16)) -> Self {
        let placement = Placement::for_size(size.0, size.1);
        let mut compositor = Compositor::new(placement.full);

        // Create layers with z-ordering
        let content = compositor.create_layer(placement.content, 0);
        let header = compositor.create_layer(placement.header, 10);
        let status = compositor.create_layer(placement.status, 10);
        let bubble = compositor.create_layer(Rect::new(0, 0, 0, 0), 40);
        let mascot_layer = compositor.create_layer(placement.mascot, 50);
        let confetti_layer = compositor.create_layer(placement.full, 90);
        let banner = compositor.create_layer(placement.banner, 95);
        compositor.set_visible(banner, false);

        let mut mascot = Mascot::new(config.timings);
        mascot.set_host_mood(config.mood);
        let avatar = Avatar::new(&mascot.view());

        let mut confetti = ConfettiField::new(size.0, size.1);
        confetti.set_enabled(config.confetti);

        tracing::info!(
            width = size.0,
            height = size.1,
            fps = config.fps,
            host_mood = ?config.mood,
            "workshop page created"
        );

        Self {
            running: true,
            goodbye_message: None,
            mascot,
            confetti,
            guide: GuideView::new(guide_markdown),
            reference: ReferenceState::default(),
            tab: Tab::Guide,
            speech: config.speech,
            compositor,
            avatar,
            layers: AppLayers {
                header,
                content,
                status,
                bubble,
                mascot: mascot_layer,
                confetti: confetti_layer,
                banner,
            },
            tab_areas: Vec::new(),
            last_frame: Instant::now(),
            frame_duration: config.frame_duration(),
            dev_mode: false,
            size,
        }
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        // Async event stream for non-blocking terminal events
        let mut event_stream = EventStream::new();

        let mut ticker = tokio::time::interval(self.frame_duration);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Render initial frame immediately so user sees UI
        self.last_frame = Instant::now();
        self.render(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => tracing::warn!("terminal event error: {}", e),
                        None => self.running = false,
                    }
                }

                // Frame tick - advance clocks and render
                _ = ticker.tick() => {
                    let now = Instant::now();
                    let delta = now - self.last_frame;
                    self.last_frame = now;

                    self.update(delta);
                    self.render(terminal)?;
                }
            }
        }

        Ok(())
    }

    /// Dispatch one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(w, h) => self.handle_resize(w, h),
            _ => {}
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyEvent) {
        // Every key press counts toward the secret code
        let token = match key.code {
            KeyCode::Up => GestureKey::Up,
            KeyCode::Down => GestureKey::Down,
            KeyCode::Left => GestureKey::Left,
            KeyCode::Right => GestureKey::Right,
            KeyCode::Char(c) => GestureKey::from_char(c),
            _ => GestureKey::Other,
        };
        if self.mascot.key(token, &mut self.confetti) == GestureOutcome::Completed {
            tracing::debug!("celebration banner raised");
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc => {
                if !(self.tab == Tab::Reference && self.close_card()) {
                    self.quit();
                }
            }
            KeyCode::Tab | KeyCode::BackTab => self.set_tab(self.tab.other()),
            KeyCode::Char('1') => self.set_tab(Tab::Guide),
            KeyCode::Char('2') => self.set_tab(Tab::Reference),
            KeyCode::Char('p') => self.click_mascot(),
            KeyCode::Char('s') => self.toggle_speech(),
            KeyCode::Char('m') => self.cycle_host_mood(),
            KeyCode::F(12) => {
                self.dev_mode = !self.dev_mode;
            }
            _ => match self.tab {
                Tab::Guide => self.guide_key(key.code),
                Tab::Reference => self.reference_key(key.code),
            },
        }
    }

    fn guide_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.guide.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.guide.scroll_by(1),
            KeyCode::PageUp => self.guide.page_up(),
            KeyCode::PageDown | KeyCode::Char(' ') => self.guide.page_down(),
            KeyCode::Home | KeyCode::Char('g') => self.guide.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.guide.scroll_to_bottom(),
            _ => {}
        }
    }

    fn reference_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('h') => self.reference.move_focus(Move::Left),
            KeyCode::Right | KeyCode::Char('l') => self.reference.move_focus(Move::Right),
            KeyCode::Up | KeyCode::Char('k') => self.reference.move_focus(Move::Up),
            KeyCode::Down | KeyCode::Char('j') => self.reference.move_focus(Move::Down),
            KeyCode::Enter | KeyCode::Char(' ') => self.select_card(self.reference.focused()),
            KeyCode::Char('x') => {
                self.close_card();
            }
            _ => {}
        }
    }

    /// Handle mouse input
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved => {
                let hovered = self.dog_hit(x, y);
                if hovered != self.avatar.is_hovered() {
                    self.avatar.set_hovered(hovered);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(x, y),
            MouseEventKind::ScrollUp if self.tab == Tab::Guide => {
                self.guide.scroll_by(-WHEEL_STEP);
            }
            MouseEventKind::ScrollDown if self.tab == Tab::Guide => {
                self.guide.scroll_by(WHEEL_STEP);
            }
            _ => {}
        }
    }

    /// Left click, front to back: mascot, tabs, then the reference tab
    fn handle_click(&mut self, x: u16, y: u16) {
        if let Some((_, local_y)) = self.compositor.local_point(self.layers.mascot, x, y) {
            if self.is_label_row(local_y) {
                self.toggle_speech();
            } else {
                self.click_mascot();
            }
            return;
        }

        if let Some((lx, ly)) = self.compositor.local_point(self.layers.header, x, y) {
            let hit = self.tab_areas.iter().find(|(_, r)| {
                lx >= r.x && lx < r.right() && ly >= r.y && ly < r.bottom()
            });
            if let Some(&(tab, _)) = hit {
                self.set_tab(tab);
            }
            return;
        }

        if self.tab != Tab::Reference {
            return;
        }
        if let Some((lx, ly)) = self.compositor.local_point(self.layers.content, x, y) {
            if self.reference.is_close_at(lx, ly) {
                self.close_card();
            } else if let Some(index) = self.reference.card_at(lx, ly) {
                self.select_card(index);
            }
        }
    }

    /// Whether a screen point is on the dog itself (not its label)
    fn dog_hit(&self, x: u16, y: u16) -> bool {
        self.compositor
            .local_point(self.layers.mascot, x, y)
            .is_some_and(|(_, local_y)| !self.is_label_row(local_y))
    }

    fn is_label_row(&self, local_y: u16) -> bool {
        self.compositor
            .layer_bounds(self.layers.mascot)
            .is_some_and(|b| local_y + 1 == b.height)
    }

    /// Handle terminal resize
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        let placement = Placement::for_size(width, height);

        self.compositor.resize(placement.full);
        self.compositor.place_layer(self.layers.header, placement.header);
        self.compositor.place_layer(self.layers.content, placement.content);
        self.compositor.place_layer(self.layers.status, placement.status);
        self.compositor.place_layer(self.layers.mascot, placement.mascot);
        self.compositor.place_layer(self.layers.confetti, placement.full);
        self.compositor.place_layer(self.layers.banner, placement.banner);
        self.confetti.set_area(width, height);

        tracing::debug!(width, height, "terminal resized");
    }

    // ========================================================================
    // Actions
    // ========================================================================

    fn quit(&mut self) {
        self.generate_goodbye();
        self.running = false;
    }

    fn set_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            tracing::debug!(tab = tab.title(), "tab switched");
            self.tab = tab;
        }
    }

    /// Count a click on the mascot
    fn click_mascot(&mut self) {
        match self.mascot.click(&mut self.confetti) {
            ClickOutcome::Trick => tracing::info!("mascot performed a trick"),
            ClickOutcome::Pet => tracing::debug!("mascot petted"),
        }
    }

    fn toggle_speech(&mut self) {
        self.speech = !self.speech;
    }

    /// Step the host override: none, then every mood in turn, then none
    fn cycle_host_mood(&mut self) {
        let last = MoodState::ALL[MoodState::ALL.len() - 1];
        let next = match self.mascot.host_mood() {
            None => Some(MoodState::ALL[0]),
            Some(mood) if mood == last => None,
            Some(mood) => Some(mood.next()),
        };
        tracing::info!(host_mood = ?next, "host mood override changed");
        self.mascot.set_host_mood(next);
    }

    /// Open a tip card and celebrate at its center
    fn select_card(&mut self, index: usize) {
        let Some(card) = self.reference.select(index) else {
            return;
        };
        tracing::debug!(card = card.id, "tip card selected");

        let origin = self.card_origin(index);
        self.confetti.fire(Burst::card_select(origin));
    }

    fn close_card(&mut self) -> bool {
        self.reference.close()
    }

    /// Screen-normalized center of a card, or mid-screen before first render
    fn card_origin(&self, index: usize) -> Origin {
        let content = self.compositor.layer_bounds(self.layers.content);
        let (Some(card), Some(content)) = (self.reference.card_area(index), content) else {
            return Origin::new(0.5, 0.5);
        };
        let (w, h) = (f32::from(self.size.0.max(1)), f32::from(self.size.1.max(1)));
        let cx = f32::from(content.x + card.x) + f32::from(card.width) / 2.0;
        let cy = f32::from(content.y + card.y) + f32::from(card.height) / 2.0;
        Origin::new(cx / w, cy / h)
    }

    /// Advance the mascot clock, the avatar and the confetti by `delta`
    pub fn update(&mut self, delta: Duration) {
        self.mascot.update(delta);
        self.avatar.sync(&self.mascot.view());
        self.avatar.update(delta);
        self.confetti.update(delta);
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the UI
    pub fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        self.render_header();
        self.render_content();
        self.render_status();
        self.render_bubble();
        self.render_mascot();
        self.render_confetti();
        self.render_banner();

        terminal.draw(|frame| {
            let output = self.compositor.composite();
            let area = frame.area();
            let buf = frame.buffer_mut();

            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    let idx = output.index_of(x, y);
                    if idx < output.content.len() {
                        buf[(x, y)] = output.content[idx].clone();
                    }
                }
            }
        })?;

        Ok(())
    }

    /// Title, subtitle and the tab strip
    fn render_header(&mut self) {
        let tab = self.tab;
        self.tab_areas.clear();
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.header) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        if area.height < HEADER_HEIGHT {
            return;
        }

        buf.set_stringn(1, 0, TITLE, area.width.saturating_sub(1) as usize, title_style());
        buf.set_stringn(
            1,
            1,
            SUBTITLE,
            area.width.saturating_sub(1) as usize,
            Style::default().fg(DIM),
        );

        let tab_row = 3;
        let rule_row = 4;
        buf.set_string(
            0,
            rule_row,
            "─".repeat(area.width as usize),
            Style::default().fg(BORDER),
        );

        let mut x = 1;
        for candidate in Tab::ALL {
            let label = format!(" {} ", candidate.title());
            let width = label.width() as u16;
            if x + width > area.width {
                break;
            }
            let (style, underline) = if candidate == tab {
                (active_tab_style(), Style::default().fg(ACCENT))
            } else {
                (inactive_tab_style(), Style::default().fg(BORDER))
            };
            buf.set_string(x, tab_row, &label, style);
            if candidate == tab {
                buf.set_string(x, rule_row, "━".repeat(width as usize), underline);
            }
            self.tab_areas
                .push((candidate, Rect::new(x, tab_row, width, 1)));
            x += width + 2;
        }
    }

    fn render_content(&mut self) {
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.content) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        match self.tab {
            Tab::Guide => {
                let inner = Rect::new(
                    area.x + 1,
                    area.y,
                    area.width.saturating_sub(2),
                    area.height,
                );
                self.guide.render(inner, buf);
            }
            Tab::Reference => reference::render(&mut self.reference, area, buf),
        }
    }

    /// Key hints on the left, position and mood on the right
    fn render_status(&mut self) {
        let view = self.mascot.view();
        let position = match self.tab {
            Tab::Guide => format!("{}%", self.guide.scroll_percent()),
            Tab::Reference => format!(
                "card {}/{}",
                self.reference.focused() + 1,
                reference::TIP_CARDS.len()
            ),
        };
        let host = if self.mascot.host_mood().is_some() {
            " (pinned)"
        } else {
            ""
        };
        let mut right = format!("{} | mood: {}{} ", position, view.mood, host);
        if self.dev_mode {
            right = format!(
                "[DEV] code {}/10 clicks {} particles {} | {}",
                view.gesture_progress,
                self.mascot.mood().click_count(),
                self.confetti.particle_count(),
                right
            );
        }
        let hints = " Tab switch | p pet | s speech | m mood | q quit";

        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.status) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        if area.height == 0 {
            return;
        }

        // The right side wins when both do not fit
        let right_width = right.width() as u16;
        let hints_room = if right_width < area.width {
            buf.set_string(area.width - right_width, 0, &right, Style::default().fg(DIM));
            area.width - right_width
        } else {
            area.width
        };
        buf.set_stringn(
            0,
            0,
            hints,
            hints_room.saturating_sub(1) as usize,
            Style::default().fg(FAINT),
        );
    }

    /// Caption bubble sitting on top of the mascot
    fn render_bubble(&mut self) {
        let caption = self.mascot.view().caption;
        let mascot_bounds = self.compositor.layer_bounds(self.layers.mascot);
        let visible = self.speech && mascot_bounds.is_some_and(|b| b.height > 0);
        self.compositor.set_visible(self.layers.bubble, visible);
        let Some(mascot_bounds) = mascot_bounds.filter(|_| visible) else {
            return;
        };

        let text_width = BUBBLE_TEXT_WIDTH.min(self.size.0.saturating_sub(6) as usize).max(1);
        let lines: Vec<String> = textwrap::wrap(caption, text_width)
            .into_iter()
            .map(|l| l.into_owned())
            .collect();
        let widest = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;

        let width = (widest + 4).min(self.size.0);
        let height = (lines.len() as u16 + 2).min(mascot_bounds.y);
        let bounds = Rect::new(
            mascot_bounds.right().saturating_sub(width),
            mascot_bounds.y.saturating_sub(height),
            width,
            height,
        );
        self.compositor.place_layer(self.layers.bubble, bounds);

        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.bubble) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER))
            .style(Style::default().bg(PANEL_BG));
        Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>())
            .style(Style::default().fg(TEXT))
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }

    /// The dog and its speech toggle
    fn render_mascot(&mut self) {
        let label = if self.speech { "shh..." } else { "speak!" };
        let hovered = self.avatar.is_hovered();
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.mascot) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        if area.height == 0 {
            return;
        }

        let dog = Rect::new(area.x, area.y, area.width, area.height - 1);
        self.avatar.render(dog, buf);

        let label = format!(" {label} ");
        let label_width = label.width() as u16;
        let mut style = Style::default().fg(DIM).bg(PANEL_BG);
        if hovered {
            style = style.fg(ACCENT);
        }
        buf.set_stringn(
            area.x + area.width.saturating_sub(label_width) / 2,
            area.bottom() - 1,
            &label,
            area.width as usize,
            style,
        );
    }

    fn render_confetti(&mut self) {
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.confetti) else {
            return;
        };
        buf.reset();
        self.confetti.render(buf);
    }

    /// Secret-code banner, shown for exactly as long as the celebration
    fn render_banner(&mut self) {
        let celebrating = self.mascot.is_celebrating();
        self.compositor.set_visible(self.layers.banner, celebrating);
        if !celebrating {
            return;
        }

        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.banner) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        let block = Block::bordered()
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(BANNER))
            .style(Style::default().bg(PANEL_BG));
        Paragraph::new(vec![
            Line::styled(
                "★ Secret code unlocked! ★",
                Style::default().fg(BANNER).add_modifier(Modifier::BOLD),
            ),
            Line::styled("The workshop pup is thrilled", Style::default().fg(TEXT)),
        ])
        .alignment(Alignment::Center)
        .block(block)
        .render(area, buf);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Whether the loop should keep going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tab on screen
    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn mascot(&self) -> &Mascot {
        &self.mascot
    }

    pub fn confetti(&self) -> &ConfettiField {
        &self.confetti
    }

    pub fn guide(&self) -> &GuideView {
        &self.guide
    }

    pub fn reference(&self) -> &ReferenceState {
        &self.reference
    }

    /// Whether the speech bubble is on
    pub fn speech(&self) -> bool {
        self.speech
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    /// Screen bounds of the mascot layer
    pub fn mascot_bounds(&self) -> Option<Rect> {
        self.compositor.layer_bounds(self.layers.mascot)
    }

    /// Whether the celebration banner is on screen
    pub fn banner_visible(&self) -> bool {
        self.compositor.is_visible(self.layers.banner)
    }

    pub fn dev_mode(&self) -> bool {
        self.dev_mode
    }

    /// Generate a quick goodbye message
    fn generate_goodbye(&mut self) {
        let idx = rand::random::<usize>() % QUICK_GOODBYES.len();
        self.goodbye_message = Some(QUICK_GOODBYES[idx].to_string());
    }

    /// Get the goodbye message for display after the terminal is restored
    pub fn goodbye(&self) -> Option<&str> {
        self.goodbye_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_keeps_mascot_above_status() {
        let placement = Placement::for_size(100, 40);
        let (dog_w, dog_h) = Avatar::bounds();

        assert_eq!(placement.mascot.width, dog_w + 2);
        assert_eq!(placement.mascot.height, dog_h + 1);
        assert_eq!(placement.mascot.bottom(), placement.status.y);
        assert_eq!(placement.mascot.right(), 99);
        assert_eq!(placement.content.y, HEADER_HEIGHT);
        assert_eq!(placement.content.bottom(), placement.status.y);
    }

    #[test]
    fn test_placement_survives_tiny_terminal() {
        let placement = Placement::for_size(3, 2);
        assert!(placement.mascot.right() <= 3);
        assert!(placement.banner.width <= 3);
        assert_eq!(placement.content.height, 0);
    }

    #[test]
    fn test_tab_other_toggles() {
        assert_eq!(Tab::Guide.other(), Tab::Reference);
        assert_eq!(Tab::Reference.other(), Tab::Guide);
    }
}
