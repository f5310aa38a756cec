use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;
use trajhist::analysis::progress::{Progress, ProgressCallback};

const SPINNER_TICK_MS: u64 = 80;

struct BarState {
    bar: ProgressBar,
    phase: String,
}

/// Renders core [`Progress`] events as a spinner per phase and a bar per frame loop.
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<BarState>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// A handler that tracks progress without drawing anything.
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(spinner_style());
        bar.finish_and_clear();
        Self {
            state: Arc::new(Mutex::new(BarState {
                bar,
                phase: String::new(),
            })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = self.state.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut state) = state.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    state.phase = name.to_string();
                    let bar = &state.bar;
                    bar.reset();
                    bar.set_length(0);
                    bar.set_style(spinner_style());
                    bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    bar.set_message(name);
                }
                Progress::TaskStart { total_steps } => {
                    let bar = &state.bar;
                    bar.disable_steady_tick();
                    bar.reset();
                    bar.set_length(total_steps);
                    bar.set_position(0);
                    bar.set_style(bar_style());
                }
                Progress::FrameDone { frame } => {
                    state.bar.set_message(format!("{} [frame {}]", state.phase, frame));
                    state.bar.inc(1);
                }
                Progress::TaskFinish => {
                    let bar = &state.bar;
                    bar.set_message(state.phase.clone());
                    bar.finish();
                }
                Progress::PhaseFinish => {
                    state.bar.disable_steady_tick();
                    state.bar.finish_with_message(format!("{} done", state.phase));
                }
                Progress::Message(msg) => {
                    state.bar.println(format!("  {}", msg));
                }
            }
        })
    }

    #[cfg(test)]
    fn snapshot(&self) -> (u64, Option<u64>, String, bool) {
        let state = self.state.lock().unwrap();
        (
            state.bar.position(),
            state.bar.length(),
            state.bar.message(),
            state.bar.is_finished(),
        )
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:<32} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .map(|style| style.progress_chars("##-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}
