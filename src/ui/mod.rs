//! Terminal UI helpers
//!
//! Uses `cliclack` for framed output and the delete confirmation prompt,
//! with plain line output in CI/non-interactive environments.

mod context;
mod output;
mod progress;
mod prompts;

pub use context::UiContext;
pub use output::{
    intro, notice, outro_success, outro_warn, row_table, step_info, step_ok_detail,
    step_warn_hint,
};
pub use progress::TaskSpinner;
pub use prompts::confirm;
