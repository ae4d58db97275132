//! Interactive vs scripted run detection

use std::io::IsTerminal;

/// Any of these set means nobody is there to answer a prompt
const SCRIPTED_ENV: [&str; 5] = [
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "BUILDKITE",
    "LISTSYNC_NO_PROMPT",
];

/// How commands talk to the user: prompts and spinners, or plain lines
#[derive(Debug, Clone, Copy)]
pub struct UiContext {
    interactive: bool,
    auto_yes: bool,
}

impl UiContext {
    /// Inspect the terminal and environment of this process
    pub fn detect() -> Self {
        let tty = std::io::stdout().is_terminal() && std::io::stdin().is_terminal();
        let scripted = SCRIPTED_ENV
            .iter()
            .any(|var| std::env::var_os(var).is_some());
        Self {
            interactive: tty && !scripted,
            auto_yes: false,
        }
    }

    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            auto_yes: false,
        }
    }

    /// Accept every confirmation without asking (`--yes`)
    pub fn with_auto_yes(self, auto_yes: bool) -> Self {
        Self { auto_yes, ..self }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn auto_yes(&self) -> bool {
        self.auto_yes
    }

    pub fn use_fancy_output(&self) -> bool {
        self.interactive
    }
}
