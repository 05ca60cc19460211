//! Terminal progress bar for imports.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use grimoire_import::ImportProgress;

/// An [`ImportProgress`] that drives an indicatif bar.
///
/// The row count is only known once parsing is done, so the bar starts as a
/// spinner and switches to a bar on the first row.
pub(crate) struct BarProgress {
    pb: ProgressBar,
    bar_style: ProgressStyle,
}

impl BarProgress {
    /// When `quiet` is true the bar is never drawn.
    pub(crate) fn new(quiet: bool) -> Self {
        let pb = ProgressBar::new_spinner();
        if quiet {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }

        let spinner_style = ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|");
        pb.set_style(spinner_style);

        let bar_style =
            ProgressStyle::with_template("  [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
                .expect("static pattern")
                .progress_chars("=> ");

        Self { pb, bar_style }
    }
}

impl ImportProgress for BarProgress {
    fn on_row(&self, current: usize, total: usize, name: &str) {
        if self.pb.length() != Some(total as u64) {
            self.pb.set_style(self.bar_style.clone());
            self.pb.set_length(total as u64);
        }
        self.pb.set_position(current as u64);
        self.pb.set_message(name.to_string());
    }

    fn on_phase(&self, message: &str) {
        self.pb.set_message(message.to_string());
        self.pb.tick();
        log::debug!("{}", message);
    }

    fn on_complete(&self, _message: &str) {
        self.pb.finish_and_clear();
    }
}

impl Drop for BarProgress {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}
