use crate::app::App;
use crate::diff::Activity;
use crate::models::snapshot::Snapshot;
use crate::ui::theme::Theme;
use crate::util::human::{fmt_age, fmt_bytes, fmt_mibps, fmt_ms_per_op};
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

pub fn render(f: &mut Frame, app: &mut App) {
    let area  = f.area();
    let theme = app.theme.clone();

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    // Header
    let now = Local::now().format("%H:%M:%S").to_string();
    let paused = if app.paused { "  [paused]" } else { "" };
    let title = format!(" nfstop — NFS Mount Activity   {}{}", now, paused);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(title, theme.title))).style(theme.header),
        root[0],
    );

    // Body
    let body = root[1];
    if app.snapshots.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(vec![]),
            Line::from(vec![Span::styled("  No NFS mounts detected on this system.", theme.text_dim)]),
            Line::from(vec![]),
            Line::from(vec![Span::styled("  Mounts appear automatically when you mount a remote filesystem:", theme.text_dim)]),
            Line::from(vec![Span::styled("    mount -t nfs4 server:/export /mnt/point", theme.text_dim)]),
            Line::from(vec![]),
            Line::from(vec![Span::styled("  Statistics are sourced from /proc/self/mountstats.", theme.text_dim)]),
        ])
        .block(Block::default().borders(Borders::ALL).border_style(theme.border)
            .title(Span::styled("NFS Mounts", theme.title)));
        f.render_widget(msg, body);
    } else {
        render_mount_table(f, body, &app.snapshots, &app.activity, &theme);
    }

    // Footer
    let footer_spans = vec![
        Span::styled(" ", theme.footer_bg),
        Span::styled(" p ", theme.footer_key), Span::styled("Pause  ", theme.footer_text),
        Span::styled(" t ", theme.footer_key), Span::styled("Theme  ", theme.footer_text),
        Span::styled(" ? ", theme.footer_key), Span::styled("Help  ", theme.footer_text),
        Span::styled(" q ", theme.footer_key), Span::styled("Quit  ", theme.footer_text),
    ];
    f.render_widget(
        Paragraph::new(Line::from(footer_spans)).style(theme.footer_bg),
        root[2],
    );
}

fn render_mount_table(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    snapshots: &[Snapshot],
    activity: &[Activity],
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .title(Span::styled(
            format!("NFS Mounts  ({} mounted)", snapshots.len()),
            theme.title,
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let header = Row::new(vec![
        Cell::from("Mount").style(theme.text_dim),
        Cell::from("Age").style(theme.text_dim),
        Cell::from("Read MiB/s").style(theme.text_dim),
        Cell::from("R ms/op").style(theme.text_dim),
        Cell::from("Write MiB/s").style(theme.text_dim),
        Cell::from("W ms/op").style(theme.text_dim),
        Cell::from("Status").style(theme.text_dim),
        Cell::from("Read").style(theme.text_dim),
        Cell::from("Written").style(theme.text_dim),
    ])
    .height(1);

    let rows: Vec<Row> = snapshots.iter().map(|snap| {
        // The interval row for this mount, if it was active this round.
        let act = activity.iter().find(|a| {
            a.mountpoints.intersection(&snap.mountpoints).next().is_some()
        });

        let (r_rate, r_ms, w_rate, w_ms) = match act {
            Some(a) => (a.read_mibps, a.read_ms_per_op, a.write_mibps, a.write_ms_per_op),
            None    => (0.0, 0.0, 0.0, 0.0),
        };

        let label = snap.mount_label();
        let mount = if label.len() > 36 {
            format!("{}…", &label[..35])
        } else {
            label
        };

        let worst_ms = r_ms.max(w_ms);
        let status = status_str(worst_ms);
        let status_style = match status {
            "OK"       => theme.ok,
            "SLOW"     => theme.warn,
            "DEGRADED" => theme.crit,
            _          => theme.text_dim,
        };

        Row::new(vec![
            Cell::from(mount).style(theme.text),
            Cell::from(fmt_age(snap.age_secs)).style(theme.text_dim),
            Cell::from(fmt_mibps(r_rate)).style(theme.read),
            Cell::from(fmt_ms_per_op(r_ms)).style(theme.latency_style(r_ms)),
            Cell::from(fmt_mibps(w_rate)).style(theme.write),
            Cell::from(fmt_ms_per_op(w_ms)).style(theme.latency_style(w_ms)),
            Cell::from(status).style(status_style),
            Cell::from(fmt_bytes(snap.read_bytes)).style(theme.read),
            Cell::from(fmt_bytes(snap.write_bytes)).style(theme.write),
        ])
    }).collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(5),
        Constraint::Length(11),
        Constraint::Length(8),
        Constraint::Length(11),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .row_highlight_style(Style::default());

    f.render_widget(table, inner);
}

fn status_str(worst_ms: f64) -> &'static str {
    if worst_ms == 0.0        { "—" }
    else if worst_ms < 5.0    { "OK" }
    else if worst_ms < 50.0   { "SLOW" }
    else                      { "DEGRADED" }
}
