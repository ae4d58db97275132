//! Deleting-state indicator

use super::context::UiContext;
use console::style;
use std::time::{Duration, Instant};

/// Spinner shown while requests are in flight.
///
/// Plain runs get one line when it starts and one when it stops, the
/// latter with the elapsed time.
pub struct TaskSpinner {
    fancy: bool,
    spinner: Option<cliclack::ProgressBar>,
    started: Option<Instant>,
}

impl TaskSpinner {
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            fancy: ctx.use_fancy_output(),
            spinner: None,
            started: None,
        }
    }

    pub fn start(&mut self, message: &str) {
        self.started = Some(Instant::now());
        if self.fancy {
            let spinner = cliclack::spinner();
            spinner.start(message);
            self.spinner = Some(spinner);
        } else {
            println!("{} {}", style("...").dim(), message);
        }
    }

    pub fn stop(&mut self, message: &str) {
        let message = self.with_elapsed(message);
        match self.spinner.take() {
            Some(spinner) => spinner.stop(message),
            None => println!("{} {}", style("[OK]").green(), message),
        }
    }

    pub fn stop_error(&mut self, message: &str) {
        let message = self.with_elapsed(message);
        match self.spinner.take() {
            Some(spinner) => spinner.error(message),
            None => println!("{} {}", style("[FAIL]").red(), message),
        }
    }

    fn with_elapsed(&mut self, message: &str) -> String {
        match self.started.take() {
            Some(started) => format!("{} ({})", message, format_elapsed(started.elapsed())),
            None => message.to_string(),
        }
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_secs(1) {
        format!("{}ms", elapsed.as_millis())
    } else {
        format!("{:.1}s", elapsed.as_secs_f64())
    }
}
