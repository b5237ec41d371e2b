use crate::output::Output;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

/// Loading indicator shown while a request is pending
///
/// Only drawn for human output on an interactive terminal; otherwise the
/// message goes to the structured log.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    pub fn start(message: &str, output: &Output) -> Self {
        if !is_interactive() || output.is_quiet() || !output.is_human() {
            tracing::debug!(operation = "loading", mode = "non_interactive", "{}", message);
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ");
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar: Some(bar) }
    }

    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Run `fut` with a spinner showing `message`
pub async fn with_spinner<F: Future>(message: &str, output: &Output, fut: F) -> F::Output {
    let spinner = Spinner::start(message, output);
    let result = fut.await;
    spinner.finish();
    result
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
