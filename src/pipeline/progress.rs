// file: src/pipeline/progress.rs
// description: progress tracking and run statistics for pipeline stages
// reference: uses indicatif for progress bars and atomic counters shared with workers

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineStats {
    pub records_loaded: usize,
    pub records_dropped: usize,
    pub records_normalized: usize,
    pub sentences_with_events: usize,
    pub events_extracted: usize,
    pub duplicates_removed: usize,
    pub duration_secs: f64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records_per_second(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.records_loaded as f64 / self.duration_secs
    }

    /// Share of loaded records that survived the noise filter, in percent.
    pub fn survival_rate(&self) -> f64 {
        if self.records_loaded == 0 {
            return 0.0;
        }
        (self.records_normalized as f64 / self.records_loaded as f64) * 100.0
    }
}

/// One progress bar per stage. Counters are atomic so workers can report
/// completion without locking.
pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    completed: AtomicUsize,
    events: AtomicUsize,
}

impl ProgressTracker {
    pub fn new(stage: &str, total: usize) -> Self {
        Self::with_color(stage, total, true)
    }

    pub fn with_color(stage: &str, total: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, total as u64, colored);
        main_bar.set_message(stage.to_string());
        let detail_bar = create_detail_bar(&multi_progress);

        Self::from_bars(main_bar, detail_bar)
    }

    /// Counts without drawing anything.
    pub fn hidden() -> Self {
        Self::from_bars(ProgressBar::hidden(), ProgressBar::hidden())
    }

    fn from_bars(main_bar: ProgressBar, detail_bar: ProgressBar) -> Self {
        Self {
            main_bar,
            detail_bar,
            completed: AtomicUsize::new(0),
            events: AtomicUsize::new(0),
        }
    }

    pub fn inc_completed(&self) {
        self.completed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
    }

    pub fn add_events(&self, count: usize) {
        let total = self.events.fetch_add(count, Ordering::SeqCst) + count;
        self.detail_bar.set_message(format!("Candidate events: {}", total));
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn events(&self) -> usize {
        self.events.load(Ordering::SeqCst)
    }

    pub fn finish(&self) {
        self.main_bar.finish_and_clear();
        self.detail_bar.finish_and_clear();
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    let (template, chars) = if colored {
        (
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
            "█▓▒░",
        )
    } else {
        (
            "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}",
            "=>-",
        )
    };

    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        bar.set_style(style.progress_chars(chars));
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    if let Ok(style) = ProgressStyle::default_bar().template("{msg}") {
        bar.set_style(style);
    }
    bar
}
