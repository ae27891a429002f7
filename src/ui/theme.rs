use ratatui::style::{Color, Modifier, Style};

/// Palette switched by the dark-mode setting. All render code goes through
/// here so a toggle repaints everything on the next frame.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) dark: bool,
}

impl Theme {
    pub(crate) fn new(dark: bool) -> Self {
        Self { dark }
    }

    pub(crate) fn header_bg(&self) -> Color {
        if self.dark {
            Color::Rgb(30, 30, 46)
        } else {
            Color::Rgb(230, 233, 239)
        }
    }

    pub(crate) fn accent(&self) -> Color {
        if self.dark {
            Color::Rgb(137, 180, 250)
        } else {
            Color::Rgb(30, 102, 245)
        }
    }

    pub(crate) fn green(&self) -> Color {
        if self.dark {
            Color::Rgb(166, 227, 161)
        } else {
            Color::Rgb(64, 160, 43)
        }
    }

    pub(crate) fn red(&self) -> Color {
        if self.dark {
            Color::Rgb(243, 139, 168)
        } else {
            Color::Rgb(210, 15, 57)
        }
    }

    pub(crate) fn yellow(&self) -> Color {
        if self.dark {
            Color::Rgb(249, 226, 175)
        } else {
            Color::Rgb(223, 142, 29)
        }
    }

    pub(crate) fn surface(&self) -> Color {
        if self.dark {
            Color::Rgb(49, 50, 68)
        } else {
            Color::Rgb(204, 208, 218)
        }
    }

    pub(crate) fn text(&self) -> Color {
        if self.dark {
            Color::Rgb(205, 214, 244)
        } else {
            Color::Rgb(76, 79, 105)
        }
    }

    pub(crate) fn text_dim(&self) -> Color {
        if self.dark {
            Color::Rgb(127, 132, 156)
        } else {
            Color::Rgb(140, 143, 161)
        }
    }

    pub(crate) fn overlay(&self) -> Color {
        if self.dark {
            Color::Rgb(69, 71, 90)
        } else {
            Color::Rgb(172, 176, 190)
        }
    }

    pub(crate) fn command_bg(&self) -> Color {
        if self.dark {
            Color::Rgb(24, 24, 37)
        } else {
            Color::Rgb(239, 241, 245)
        }
    }

    pub(crate) fn header_style(&self) -> Style {
        Style::default()
            .fg(self.text())
            .bg(self.header_bg())
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn selected_style(&self) -> Style {
        Style::default().fg(self.header_bg()).bg(self.accent())
    }

    pub(crate) fn normal_style(&self) -> Style {
        Style::default().fg(self.text())
    }

    pub(crate) fn dim_style(&self) -> Style {
        Style::default().fg(self.text_dim())
    }

    pub(crate) fn income_style(&self) -> Style {
        Style::default().fg(self.green())
    }

    pub(crate) fn expense_style(&self) -> Style {
        Style::default().fg(self.red())
    }

    pub(crate) fn ok_style(&self) -> Style {
        Style::default().fg(self.green())
    }

    pub(crate) fn warning_style(&self) -> Style {
        Style::default().fg(self.yellow())
    }

    pub(crate) fn danger_style(&self) -> Style {
        Style::default().fg(self.red()).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn unread_style(&self) -> Style {
        Style::default()
            .fg(self.accent())
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn alt_row_style(&self) -> Style {
        Style::default().fg(self.text()).bg(self.surface())
    }

    pub(crate) fn command_bar_style(&self) -> Style {
        Style::default().fg(self.text()).bg(self.command_bg())
    }

    pub(crate) fn status_bar_style(&self) -> Style {
        Style::default().fg(self.text_dim()).bg(self.surface())
    }
}
