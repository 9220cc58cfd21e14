//! Replay state for the results viewer.

use std::time::Instant;

use crate::pipeline::{ParkRun, PipelineResult, StepRecord, YieldReport};
use crate::turbine::TurbineSpec;

/// Maximum number of steps shown in the rolling chart.
const MAX_HISTORY: usize = 200;

/// Tick interval options in milliseconds (slowest → fastest).
const SPEED_LEVELS_MS: [u64; 6] = [500, 250, 100, 50, 20, 5];

/// Default speed index (100 ms).
const DEFAULT_SPEED_IDX: usize = 2;

/// TUI application state: a finished park run revealed step by step.
pub struct App {
    run: ParkRun,
    /// Label shown in the header (preset or config file name).
    pub label: String,
    /// Index of the turbine on screen.
    pub selected: usize,
    /// Number of steps revealed so far.
    pub cursor: usize,
    /// Longest result series in the park.
    pub total_steps: usize,
    pub paused: bool,
    /// Current index into `SPEED_LEVELS_MS`.
    pub speed_idx: usize,
    /// Overlay the wind input power on the chart.
    pub show_input: bool,
    pub quit: bool,
    /// When the last replay tick was executed.
    pub last_tick: Instant,
}

impl App {
    pub fn new(run: ParkRun, label: &str) -> Self {
        let total_steps = run.results.iter().map(PipelineResult::len).max().unwrap_or(0);
        Self {
            run,
            label: label.to_string(),
            selected: 0,
            cursor: 0,
            total_steps,
            paused: false,
            speed_idx: DEFAULT_SPEED_IDX,
            show_input: false,
            quit: false,
            last_tick: Instant::now(),
        }
    }

    /// Reveals one more step if not finished.
    pub fn tick(&mut self) {
        if self.cursor < self.total_steps {
            self.cursor += 1;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Increases replay speed (shorter tick interval).
    pub fn speed_up(&mut self) {
        if self.speed_idx + 1 < SPEED_LEVELS_MS.len() {
            self.speed_idx += 1;
        }
    }

    /// Decreases replay speed (longer tick interval).
    pub fn speed_down(&mut self) {
        if self.speed_idx > 0 {
            self.speed_idx -= 1;
        }
    }

    /// Returns the current tick interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        SPEED_LEVELS_MS[self.speed_idx]
    }

    pub fn next_turbine(&mut self) {
        if !self.run.results.is_empty() {
            self.selected = (self.selected + 1) % self.run.results.len();
        }
    }

    pub fn prev_turbine(&mut self) {
        let n = self.run.results.len();
        if n > 0 {
            self.selected = (self.selected + n - 1) % n;
        }
    }

    /// Restarts the replay from the first step.
    pub fn restart(&mut self) {
        self.cursor = 0;
        self.paused = false;
    }

    /// Reveals every step at once.
    pub fn skip_to_end(&mut self) {
        self.cursor = self.total_steps;
    }

    /// Returns `true` when every step has been revealed.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.total_steps
    }

    pub fn turbine_count(&self) -> usize {
        self.run.results.len()
    }

    /// Result, spec and full-run report of the selected turbine.
    pub fn selected(&self) -> Option<(&PipelineResult, &TurbineSpec, &YieldReport)> {
        let i = self.selected;
        Some((
            self.run.results.get(i)?,
            &self.run.turbines.get(i)?.spec,
            self.run.reports.get(i)?,
        ))
    }

    /// Revealed records of the selected turbine, at most `MAX_HISTORY`.
    pub fn visible_records(&self) -> Vec<StepRecord> {
        let Some((result, _, _)) = self.selected() else {
            return Vec::new();
        };
        let end = self.cursor.min(result.len());
        let start = end.saturating_sub(MAX_HISTORY);
        (start..end).filter_map(|i| result.record(i)).collect()
    }

    /// Most recently revealed record of the selected turbine.
    pub fn last_record(&self) -> Option<StepRecord> {
        let (result, _, _) = self.selected()?;
        let end = self.cursor.min(result.len());
        result.record(end.checked_sub(1)?)
    }

    /// Whole-park energy of the finished run.
    pub fn park_energy_mwh(&self) -> f64 {
        self.run.park.energy_mwh
    }

    /// Capacity factor of the selected turbine over the revealed steps.
    pub fn capacity_factor_so_far(&self) -> f64 {
        let Some((result, spec, _)) = self.selected() else {
            return 0.0;
        };
        let end = self.cursor.min(result.len());
        if end == 0 {
            return 0.0;
        }
        let produced: f64 = result.output_power_kw[..end].iter().sum();
        produced / (spec.rated_power_kw() * end as f64)
    }
}
