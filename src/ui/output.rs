//! Step and table output
//!
//! Framed cliclack logging on a terminal, tagged plain lines otherwise.

use super::context::UiContext;
use crate::view::{Notice, NoticeLevel, RowState, RowView};
use console::{style, StyledObject};

#[derive(Clone, Copy)]
enum Tone {
    Ok,
    Warn,
    Fail,
    Info,
}

impl Tone {
    fn tag(self) -> StyledObject<&'static str> {
        match self {
            Tone::Ok => style("[OK]").green(),
            Tone::Warn => style("[WARN]").yellow(),
            Tone::Fail => style("[FAIL]").red(),
            Tone::Info => style("[INFO]").cyan(),
        }
    }
}

fn step(ctx: &UiContext, tone: Tone, message: &str) {
    if !ctx.use_fancy_output() {
        println!("  {} {}", tone.tag(), message);
        return;
    }
    let shown = match tone {
        Tone::Ok => cliclack::log::success(message),
        Tone::Warn => cliclack::log::warning(message),
        Tone::Fail => cliclack::log::error(message),
        Tone::Info => cliclack::log::info(message),
    };
    shown.ok();
}

fn outro(ctx: &UiContext, tone: Tone, message: &str) {
    if !ctx.use_fancy_output() {
        println!();
        println!("{} {}", tone.tag(), message);
        return;
    }
    let message = match tone {
        Tone::Ok => style(message).green().bold(),
        _ => style(message).yellow().bold(),
    };
    cliclack::outro(message).ok();
}

pub fn intro(ctx: &UiContext, title: &str) {
    let title = style(title).cyan().bold();
    if ctx.use_fancy_output() {
        cliclack::intro(title).ok();
    } else {
        println!("{title}");
        println!();
    }
}

pub fn outro_success(ctx: &UiContext, message: &str) {
    outro(ctx, Tone::Ok, message);
}

pub fn outro_warn(ctx: &UiContext, message: &str) {
    outro(ctx, Tone::Warn, message);
}

/// Success line with a dimmed detail, e.g. a new item's id
pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    step(ctx, Tone::Ok, &format!("{} ({})", message, style(detail).dim()));
}

pub fn step_warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    step(ctx, Tone::Warn, &format!("{} - {}", message, style(hint).dim()));
}

pub fn step_info(ctx: &UiContext, message: &str) {
    step(ctx, Tone::Info, message);
}

/// Show a settlement notice
pub fn notice(ctx: &UiContext, notice: &Notice) {
    let tone = match notice.level {
        NoticeLevel::Success => Tone::Ok,
        NoticeLevel::Error => Tone::Fail,
    };
    step(ctx, tone, &notice.message);
}

const ID_WIDTH: usize = 38;
const NAME_WIDTH: usize = 30;

/// Print rows as an aligned table
pub fn row_table(rows: &[RowView]) {
    println!(
        "{:<ID_WIDTH$} {:<NAME_WIDTH$} {}",
        style("ID").bold(),
        style("NAME").bold(),
        style("STATE").bold()
    );
    println!("{}", "-".repeat(ID_WIDTH + NAME_WIDTH + 12));

    for row in rows {
        let state = match row.state {
            RowState::Idle => style("idle").dim(),
            RowState::Confirming => style("confirm?").yellow(),
            RowState::Deleting => style("deleting").red(),
        };
        println!(
            "{:<ID_WIDTH$} {:<NAME_WIDTH$} {}",
            row.id,
            truncate(&row.name, NAME_WIDTH),
            state
        );
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{kept}...")
}
