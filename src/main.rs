mod app;
mod collectors;
mod config;
mod diff;
mod input;
mod models;
mod ui;
mod util;

use app::App;
use anyhow::Result;
use chrono::Local;
use clap::{CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use diff::{diff_snapshots, Activity};
use models::mount::merge_mounts;
use models::snapshot::build_snapshots;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::panic;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use util::table::TableWriter;

#[derive(Parser, Debug)]
#[command(name = "nfstop", about = "nfsiostat-style NFS mount activity monitor", version = "0.1")]
struct Cli {
    /// Seconds between polls
    #[arg(short, long)]
    interval: Option<u64>,

    /// Stop after N intervals (0 = run until interrupted)
    #[arg(short, long, default_value_t = 0)]
    count: u64,

    /// Hide rows whose slower op class averages below this many ms per op
    #[arg(long, value_name = "MS")]
    min_op_time: Option<f64>,

    /// Tab-separated output instead of aligned columns
    #[arg(long)]
    tsv: bool,

    /// Full-screen live dashboard instead of the scrolling table
    #[arg(long)]
    tui: bool,

    /// Color theme for the dashboard: default, dracula, nord
    #[arg(short = 't', long)]
    theme: Option<String>,

    /// Print a one-shot JSON snapshot of all NFS mounts and exit
    #[arg(long)]
    json: bool,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    completions: Option<clap_complete::Shell>,

    /// More diagnostics on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Errors only
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "nfstop", &mut io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose, cli.quiet);

    let cfg = config::Config::load();
    let interval    = cli.interval.unwrap_or(cfg.general.interval_secs);
    let min_op_time = cli.min_op_time.filter(|&ms| ms > 0.0).or_else(|| cfg.min_op_time());
    let aligned     = !cli.tsv && cfg.display.align;

    if cli.json {
        return run_json_snapshot();
    }
    if cli.config {
        return run_print_config();
    }

    if cli.tui {
        let theme_name = cli.theme.as_deref().unwrap_or(&cfg.display.theme);
        let variant = ui::theme::ThemeVariant::from_name(theme_name);

        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            original_hook(info);
        }));

        let result = run_tui(variant, interval, min_op_time);
        restore_terminal()?;
        return result;
    }

    run_scroll(interval, cli.count, min_op_time, aligned)
}

/// Scrolling table mode: header once, then one row per active mount per
/// interval. The first poll only seeds the baseline, so every printed row
/// covers a real interval.
fn run_scroll(interval: u64, count: u64, min_op_time: Option<f64>, aligned: bool) -> Result<()> {
    let mut table = TableWriter::new(aligned);
    for line in table.render(&[Activity::header_row()]) {
        println!("{}", line);
    }

    let mut previous = build_snapshots(&merge_mounts(collectors::mountstats::read_mountstats()));
    let mut last     = Local::now();
    let tick         = Duration::from_secs(interval.max(1));
    let mut rounds   = 0u64;

    loop {
        std::thread::sleep(tick);

        let current = build_snapshots(&merge_mounts(collectors::mountstats::read_mountstats()));
        let now     = Local::now();
        let dt      = (now - last).num_milliseconds() as f64 / 1000.0;

        let activity = diff_snapshots(&previous, &current, dt, last, now, min_op_time);
        let rows: Vec<Vec<String>> = activity.iter().map(Activity::fields).collect();
        for line in table.render(&rows) {
            println!("{}", line);
        }
        let _ = io::stdout().flush();

        previous = current;
        last     = now;

        rounds += 1;
        if count > 0 && rounds >= count {
            break;
        }
    }
    Ok(())
}

fn run_json_snapshot() -> Result<()> {
    use serde_json::{json, Value};

    let records = collectors::mountstats::read_mountstats();

    let mounts: Vec<Value> = records.iter().map(|m| {
        json!({
            "mountpoints": m.mountpoints,
            "fstype":      m.fstype,
            "age_secs":    m.age_secs,
            "bytes":       m.bytes,
            "ops":         m.ops,
        })
    }).collect();

    let snapshot = json!({
        "nfstop_version": "0.1",
        "timestamp": Local::now().to_rfc3339(),
        "mounts":    mounts,
    });

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run_print_config() -> Result<()> {
    let cfg = config::Config::load();
    let path = config::Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!("");
    println!("[general]");
    println!("  interval_secs  = {}", cfg.general.interval_secs);
    println!("  min_op_time_ms = {}", cfg.general.min_op_time_ms);
    println!("");
    println!("[display]");
    println!("  align = {}", cfg.display.align);
    println!("  theme = {}", cfg.display.theme);
    Ok(())
}

/// Default level is WARN so dropped-sample diagnostics show up without
/// drowning the table; -v/-vv raise it, -q lowers it to errors only.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nfstop={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run_tui(initial_theme: ui::theme::ThemeVariant, interval: u64, min_op_time: Option<f64>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;

    let mut app = App::new(initial_theme, interval, min_op_time);
    app.run(&mut term)?;

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::mountstats::parse_mountstats;
    use crate::models::snapshot::Snapshot;

    fn poll(text: &str) -> Vec<Snapshot> {
        build_snapshots(&merge_mounts(parse_mountstats(text)))
    }

    const POLL_ONE: &str = "\
device filer:/vol/data mounted on /data with fstype nfs4 statvers=1.1
\tage:\t500
\tbytes:\t0 0 0 0 1000 0 0 0
\tRPC iostats version: 1.1
\tper-op statistics
\t      READ: 10 10 0 0 0 0 0 50
\t     WRITE: 0 0 0 0 0 0 0 0
";

    const POLL_TWO: &str = "\
device filer:/vol/data mounted on /data with fstype nfs4 statvers=1.1
\tage:\t505
\tbytes:\t0 0 0 0 1512 0 0 0
\tRPC iostats version: 1.1
\tper-op statistics
\t      READ: 12 12 0 0 0 0 0 54
\t     WRITE: 0 0 0 0 0 0 0 0
";

    #[test]
    fn two_polls_of_raw_text_become_one_table_row() {
        let previous = poll(POLL_ONE);
        let current  = poll(POLL_TWO);
        assert_eq!(previous.len(), 1);

        let now  = Local::now();
        let rows = diff_snapshots(&previous, &current, 5.0, now, now, None);
        assert_eq!(rows.len(), 1);

        let fields = rows[0].fields();
        assert_eq!(fields[2..], ["0.01", "2.0", "0", "0", "/data"]);

        let mut table = TableWriter::new(true);
        table.render(&[Activity::header_row()]);
        let lines = table.render(&[fields]);
        assert!(lines[0].ends_with("/data"));
        assert!(lines[0].contains("0.01"));
    }

    #[test]
    fn bind_mounted_export_shows_as_one_row_with_both_aliases() {
        let text = POLL_TWO.to_string()
            + "device filer:/vol/data mounted on /mirror with fstype nfs4 statvers=1.1
\tage:\t505
\tbytes:\t0 0 0 0 1512 0 0 0
\tRPC iostats version: 1.1
\tper-op statistics
\t      READ: 12 12 0 0 0 0 0 54
\t     WRITE: 0 0 0 0 0 0 0 0
";
        let current = poll(&text);
        assert_eq!(current.len(), 1);

        let now  = Local::now();
        let rows = diff_snapshots(&[], &current, 1.0, now, now, None);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].mount_label(), "/data;/mirror");
    }
}
