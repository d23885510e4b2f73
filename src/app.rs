use crate::collectors::mountstats;
use crate::diff::{diff_snapshots, Activity};
use crate::input::{handle_key, Action};
use crate::models::mount::merge_mounts;
use crate::models::snapshot::{build_snapshots, Snapshot};
use crate::ui::theme::{Theme, ThemeVariant};
use crate::ui::{help, mounts_view};
use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{self, Event};
use std::time::{Duration, Instant};

const POLL_TIMEOUT: Duration = Duration::from_millis(150);

pub struct App {
    pub theme:         Theme,
    pub theme_variant: ThemeVariant,

    pub show_help: bool,
    pub paused:    bool,

    // Current poll's snapshot set and the activity of the last interval
    pub snapshots: Vec<Snapshot>,
    pub activity:  Vec<Activity>,

    min_op_time_ms: Option<f64>,
    tick:           Duration,
    last_tick:      Instant,
    last_poll_at:   DateTime<Local>,

    pub should_quit: bool,
}

impl App {
    pub fn new(
        initial_theme:  ThemeVariant,
        interval_secs:  u64,
        min_op_time_ms: Option<f64>,
    ) -> Self {
        // Seed the baseline so the first rendered interval is a real one
        let snapshots = build_snapshots(&merge_mounts(mountstats::read_mountstats()));

        Self {
            theme:         Theme::for_variant(initial_theme),
            theme_variant: initial_theme,
            show_help:     false,
            paused:        false,
            snapshots,
            activity:      Vec::new(),
            min_op_time_ms,
            tick:          Duration::from_secs(interval_secs.max(1)),
            last_tick:     Instant::now(),
            last_poll_at:  Local::now(),
            should_quit:   false,
        }
    }

    // ── Main event loop ───────────────────────────────────────────────

    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> Result<()> {
        loop {
            let show_help  = self.show_help;
            let theme_snap = self.theme.clone();

            terminal.draw(|f| {
                mounts_view::render(f, self);
                if show_help {
                    help::render(f, &theme_snap);
                }
            })?;

            if event::poll(POLL_TIMEOUT)? {
                match event::read()? {
                    Event::Key(key) => {
                        let action = handle_key(key);
                        self.handle_action(action);
                    }
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }

            if self.should_quit { break; }

            if !self.paused && self.last_tick.elapsed() >= self.tick {
                self.poll_tick();
            }
        }
        Ok(())
    }

    // ── Polling ───────────────────────────────────────────────────────

    fn poll_tick(&mut self) {
        let current = build_snapshots(&merge_mounts(mountstats::read_mountstats()));
        let now     = Local::now();
        let dt      = self.last_tick.elapsed().as_secs_f64();

        self.activity = diff_snapshots(
            &self.snapshots, &current, dt,
            self.last_poll_at, now,
            self.min_op_time_ms,
        );
        self.snapshots    = current;
        self.last_poll_at = now;
        self.last_tick    = Instant::now();
    }

    // ── Input dispatch ────────────────────────────────────────────────

    fn handle_action(&mut self, action: Action) {
        if self.show_help {
            match action {
                Action::Quit => self.should_quit = true,
                Action::ShowHelp | Action::Back => self.show_help = false,
                _ => {}
            }
            return;
        }

        match action {
            Action::Quit        => self.should_quit = true,
            Action::ShowHelp    => self.show_help = true,
            Action::TogglePause => self.paused = !self.paused,

            Action::CycleTheme => {
                self.theme_variant = self.theme_variant.next();
                self.theme = Theme::for_variant(self.theme_variant);
            }

            Action::Back | Action::None => {}
        }
    }
}
