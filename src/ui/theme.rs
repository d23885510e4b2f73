use ratatui::style::{Color, Modifier, Style};

// ── Helper: build an Rgb Color from a hex literal ──────────────────────

const fn rgb(hex: u32) -> Color {
    Color::Rgb(
        ((hex >> 16) & 0xFF) as u8,
        ((hex >>  8) & 0xFF) as u8,
        ( hex        & 0xFF) as u8,
    )
}

// ── Theme variant selector ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeVariant {
    Default,
    Dracula,
    Nord,
}

impl ThemeVariant {
    #[allow(dead_code)]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Dracula => "Dracula",
            Self::Nord    => "Nord",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Default => Self::Dracula,
            Self::Dracula => Self::Nord,
            Self::Nord    => Self::Default,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dracula" => Self::Dracula,
            "nord"    => Self::Nord,
            _         => Self::Default,
        }
    }
}

// ── Theme struct ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct Theme {
    pub border:         Style,
    pub border_focused: Style,
    pub title:          Style,
    pub text:           Style,
    pub text_dim:       Style,
    pub header:         Style,
    pub ok:             Style,
    pub warn:           Style,
    pub crit:           Style,
    pub read:           Style,
    pub write:          Style,
    pub footer_bg:      Style,
    pub footer_key:     Style,
    pub footer_text:    Style,
}

impl Theme {
    pub fn for_variant(v: ThemeVariant) -> Self {
        match v {
            ThemeVariant::Default => Self::default(),
            ThemeVariant::Dracula => Self::dracula(),
            ThemeVariant::Nord    => Self::nord(),
        }
    }

    pub fn default() -> Self {
        Self {
            border:         Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Cyan),
            title:          Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            text:           Style::default().fg(Color::White),
            text_dim:       Style::default().fg(Color::DarkGray),
            header:         Style::default().fg(Color::Black).bg(Color::Blue).add_modifier(Modifier::BOLD),
            ok:             Style::default().fg(Color::Green),
            warn:           Style::default().fg(Color::Yellow),
            crit:           Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            read:           Style::default().fg(Color::Cyan),
            write:          Style::default().fg(Color::Yellow),
            footer_bg:      Style::default().bg(Color::DarkGray).fg(Color::White),
            footer_key:     Style::default().bg(Color::DarkGray).fg(Color::Cyan).add_modifier(Modifier::BOLD),
            footer_text:    Style::default().bg(Color::DarkGray).fg(Color::Gray),
        }
    }

    fn dracula() -> Self {
        // https://draculatheme.com/ — purple/pink dark theme
        Self {
            border:         Style::default().fg(rgb(0x6272a4)),
            border_focused: Style::default().fg(rgb(0xbd93f9)),
            title:          Style::default().fg(rgb(0xf8f8f2)).add_modifier(Modifier::BOLD),
            text:           Style::default().fg(rgb(0xf8f8f2)),
            text_dim:       Style::default().fg(rgb(0x6272a4)),
            header:         Style::default().fg(rgb(0xf8f8f2)).bg(rgb(0x44475a)).add_modifier(Modifier::BOLD),
            ok:             Style::default().fg(rgb(0x50fa7b)),
            warn:           Style::default().fg(rgb(0xf1fa8c)),
            crit:           Style::default().fg(rgb(0xff5555)).add_modifier(Modifier::BOLD),
            read:           Style::default().fg(rgb(0x8be9fd)),
            write:          Style::default().fg(rgb(0xffb86c)),
            footer_bg:      Style::default().bg(rgb(0x44475a)).fg(rgb(0xf8f8f2)),
            footer_key:     Style::default().bg(rgb(0x44475a)).fg(rgb(0xbd93f9)).add_modifier(Modifier::BOLD),
            footer_text:    Style::default().bg(rgb(0x44475a)).fg(rgb(0x6272a4)),
        }
    }

    fn nord() -> Self {
        // https://www.nordtheme.com/ — Arctic, north-bluish clean theme
        Self {
            border:         Style::default().fg(rgb(0x4c566a)),
            border_focused: Style::default().fg(rgb(0x88c0d0)),
            title:          Style::default().fg(rgb(0xeceff4)).add_modifier(Modifier::BOLD),
            text:           Style::default().fg(rgb(0xe5e9f0)),
            text_dim:       Style::default().fg(rgb(0x4c566a)),
            header:         Style::default().fg(rgb(0xeceff4)).bg(rgb(0x3b4252)).add_modifier(Modifier::BOLD),
            ok:             Style::default().fg(rgb(0xa3be8c)),
            warn:           Style::default().fg(rgb(0xebcb8b)),
            crit:           Style::default().fg(rgb(0xbf616a)).add_modifier(Modifier::BOLD),
            read:           Style::default().fg(rgb(0x88c0d0)),
            write:          Style::default().fg(rgb(0xd08770)),
            footer_bg:      Style::default().bg(rgb(0x3b4252)).fg(rgb(0xd8dee9)),
            footer_key:     Style::default().bg(rgb(0x3b4252)).fg(rgb(0x88c0d0)).add_modifier(Modifier::BOLD),
            footer_text:    Style::default().bg(rgb(0x3b4252)).fg(rgb(0x4c566a)),
        }
    }

    /// Latency-gradient style for an average op time in ms.
    pub fn latency_style(&self, ms: f64) -> Style {
        if ms == 0.0        { self.text_dim }
        else if ms < 5.0    { self.ok }
        else if ms < 50.0   { self.warn }
        else                { self.crit }
    }
}
