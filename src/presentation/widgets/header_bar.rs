use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

#[allow(missing_docs)]
pub struct HeaderBarStyle {
    pub background: Style,
    pub app_name: Style,
    pub version: Style,
    pub open_counter: Style,
    pub done_counter: Style,
}

impl Default for HeaderBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            app_name: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            version: Style::default().fg(Color::DarkGray),
            open_counter: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            done_counter: Style::default().fg(Color::Green),
        }
    }
}

/// Top bar with the application name, version and task counters.
pub struct HeaderBar<'a> {
    app_name: &'a str,
    version: &'a str,
    open_count: usize,
    done_count: usize,
    style: HeaderBarStyle,
}

impl<'a> HeaderBar<'a> {
    #[must_use]
    #[allow(missing_docs)]
    pub fn new(app_name: &'a str, version: &'a str) -> Self {
        Self {
            app_name,
            version,
            open_count: 0,
            done_count: 0,
            style: HeaderBarStyle::default(),
        }
    }

    /// Sets the open and done task counters shown on the right.
    #[must_use]
    pub const fn task_counts(mut self, open: usize, done: usize) -> Self {
        self.open_count = open;
        self.done_count = done;
        self
    }

    /// Sets the style.
    #[must_use]
    pub fn style(mut self, style: HeaderBarStyle) -> Self {
        self.style = style;
        self
    }

    #[allow(clippy::cast_possible_truncation)]
    fn build_counter_spans(&self) -> (Vec<Span<'static>>, u16) {
        let open = format!(" {} open ", self.open_count);
        let done = format!(" {} done ", self.done_count);
        let width = (open.chars().count() + done.chars().count()) as u16;
        let spans = vec![
            Span::styled(open, self.style.open_counter),
            Span::styled(done, self.style.done_counter),
        ];

        (spans, width)
    }
}

impl Widget for HeaderBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        let left_spans = vec![
            Span::styled(
                format!(" {} ", self.app_name.to_uppercase()),
                self.style.app_name,
            ),
            Span::raw(" "),
            Span::styled(format!(" v{} ", self.version), self.style.version),
        ];

        let left_line = Line::from(left_spans);
        // Calculate width: " APP " (len+2) + " " (1) + " vVER " (len+3)
        let left_width = (self.app_name.len() + 2 + 1 + self.version.len() + 3) as u16;
        let left_area = Rect::new(area.x, area.y, left_width.min(area.width), 1);
        Paragraph::new(left_line).render(left_area, buf);

        let (counter_spans, counter_width) = self.build_counter_spans();

        if counter_width < area.width.saturating_sub(left_width) {
            let right_x = area.right().saturating_sub(counter_width);
            let right_area = Rect::new(right_x, area.y, counter_width, 1);
            let right_line = Line::from(counter_spans);
            Paragraph::new(right_line).render(right_area, buf);
        }
    }
}
