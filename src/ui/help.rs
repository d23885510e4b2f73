use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(52, 16, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .title(Span::styled(" nfstop — Keybindings (? or F1 to close) ", theme.title));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        key_line(theme, "Dashboard", ""),
        key_line(theme, "  q / Ctrl-C", "Quit"),
        key_line(theme, "  p",          "Pause / resume polling"),
        key_line(theme, "  t",          "Cycle color theme"),
        key_line(theme, "  ? / F1",     "Toggle this help"),
        key_line(theme, "  Esc",        "Close overlay"),
        Line::from(""),
        key_line(theme, "CLI modes", ""),
        key_line(theme, "  (default)",     "Scrolling interval table"),
        key_line(theme, "  --tsv",         "Tab-separated rows"),
        key_line(theme, "  --json",        "JSON snapshot and exit"),
        key_line(theme, "  --config",      "Print current config values"),
        key_line(theme, "  --completions", "Shell completion script"),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}

fn key_line<'a>(theme: &Theme, key: &'a str, desc: &'a str) -> Line<'a> {
    if desc.is_empty() {
        // Section header
        Line::from(vec![Span::styled(key, theme.title)])
    } else {
        Line::from(vec![
            Span::styled(format!("{:<16}", key), theme.footer_key),
            Span::styled(desc, theme.text_dim),
        ])
    }
}

/// Returns a centered Rect, capped at the available area.
fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    let x = r.x + (r.width.saturating_sub(w)) / 2;
    let y = r.y + (r.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
