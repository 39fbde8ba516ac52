//! Per-job progress tracking with automatic batching for long job lists

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Coordinates progress display while a job list runs
///
/// Shows one bar per job for short lists and adds an overall bar once the list
/// outgrows the individual bars. Only the most recent jobs keep a visible bar.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    job_bars: Vec<ProgressBar>,
    /// Stores (`label`, `finished_screenshots`, `screenshots`) for rolling window display
    job_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Jobs: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            job_bars: Vec::new(),
            job_states: Vec::new(),
        }
    }

    /// Create bars for `job_count` jobs
    pub fn initialize(&mut self, job_count: usize) {
        if job_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(job_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..job_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.job_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Configure the bar for a new job
    pub fn start_job(&mut self, index: usize, name: &str, screenshots: usize) {
        if index >= self.job_states.len() {
            self.job_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.job_states.get_mut(index) {
            *state = (name.to_string(), 0, screenshots);
        }
        self.update_bars();
    }

    /// Report how many screenshots of a job are finished
    pub fn update_job(&mut self, index: usize, finished: usize) {
        if let Some(state) = self.job_states.get_mut(index) {
            state.1 = finished;
        }
        self.update_bars();
    }

    /// Mark a job as completed and advance the overall bar
    pub fn complete_job(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.job_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
            state.1 = state.2;
        }
        self.update_bars();
    }

    /// Print a line above the bars without tearing them
    ///
    /// Falls back to plain stderr when the bars cannot be drawn to.
    // Allow print for the fallback path
    #[allow(clippy::print_stderr)]
    pub fn report(&self, line: &str) {
        if self.multi_progress.println(line).is_err() {
            eprintln!("{line}");
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All jobs processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress bars to show the last N started jobs
    fn update_bars(&self) {
        let active_jobs: Vec<_> = self
            .job_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();

        let start_idx = active_jobs
            .len()
            .saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible_jobs = active_jobs.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (name, current, max)) in visible_jobs.iter().enumerate() {
            if let Some(bar) = self.job_bars.get(bar_idx) {
                bar.set_length(*max as u64);
                bar.set_position(*current as u64);
                let max_width = max.to_string().len();
                bar.set_message(format!("{current:>max_width$}/{max}"));
                bar.set_prefix(name.clone());
            }
        }

        // Clear any unused bars
        for bar in self.job_bars.iter().skip(visible_jobs.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
