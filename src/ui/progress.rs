use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::{Duration, Instant};

use crate::ui::icons::{CHECK, CROSS};

/// Spinner shown while a long-running facade action is in flight.
///
/// Renders `{prefix} {spinner} {msg}` on stderr with a 100 ms tick, and is
/// replaced by a one-line summary with the elapsed time when finished.
pub struct Spinner {
    bar: ProgressBar,
    started: Instant,
}

impl Spinner {
    /// Start spinning with `message`.
    ///
    /// # Arguments
    /// * `prefix`: short dim label, e.g. `"flo"`
    /// * `message`: what is running, e.g. `"Creating project"`
    pub fn start(prefix: &str, message: impl Into<String>) -> Self {
        let spinner_style = ProgressStyle::default_spinner()
            .template("{prefix:.bold.dim} {spinner} {msg}")
            .expect("progress bar template is a valid static string");

        let bar = ProgressBar::new_spinner();
        bar.set_style(spinner_style);
        bar.set_prefix(prefix.to_string());
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self {
            bar,
            started: Instant::now(),
        }
    }

    pub fn finish_ok(self, message: &str) {
        let elapsed = format_elapsed(self.started.elapsed());
        self.bar.finish_with_message(format!(
            "{}{} {}",
            CHECK,
            message,
            style(format!("({})", elapsed)).dim()
        ));
    }

    pub fn finish_err(self, message: &str) {
        self.bar
            .finish_with_message(format!("{}{}", CROSS, style(message).red()));
    }

    /// Hide the spinner without leaving a line behind.
    pub fn clear(self) {
        self.bar.finish_and_clear();
    }
}

/// Run `action` behind a spinner and clear it afterwards.
pub async fn with_spinner<F, T>(message: &str, action: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = Spinner::start("flo", message);
    let result = action.await;
    spinner.clear();
    result
}

/// `Xs` below a minute, `Xm Ys` from there on.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}
