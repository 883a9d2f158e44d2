//! Log formatter that stamps every line with the simulation step it came from.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use time::macros::format_description;
use time::{format_description::FormatItem, OffsetDateTime};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Simulation steps taken so far, process-wide.
static STEP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Steps are printed as four hex digits.
const STEP_DISPLAY_MASK: u64 = 0xFFFF;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:3]");

const DIM: &str = "\x1b[2m";

/// Formats `HH:MM:SS.sss 0xSTEP LEVEL module: message`.
///
/// The crate prefix is stripped from targets, so `haunted_arcade::game` prints as
/// `game`. Colors are only written when the writer supports ANSI.
pub struct StepFormatter;

impl<S, N> FormatEvent<S, N> for StepFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();

        let timestamp = OffsetDateTime::now_utc().format(&TIMESTAMP_FORMAT).map_err(|e| {
            eprintln!("Failed to format timestamp: {}", e);
            fmt::Error
        })?;
        let step = step_count() & STEP_DISPLAY_MASK;
        paint(&mut writer, DIM, format_args!("{} 0x{:04X}", timestamp, step))?;
        writer.write_char(' ')?;

        let (color, label) = level_style(meta.level());
        paint(&mut writer, color, label)?;
        writer.write_char(' ')?;

        paint(&mut writer, DIM, format_args!("{}:", short_target(meta.target())))?;
        writer.write_char(' ')?;

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// ANSI color and a five-character, right-aligned label.
fn level_style(level: &Level) -> (&'static str, &'static str) {
    match *level {
        Level::TRACE => ("\x1b[35m", "TRACE"),
        Level::DEBUG => ("\x1b[34m", "DEBUG"),
        Level::INFO => ("\x1b[32m", " INFO"),
        Level::WARN => ("\x1b[33m", " WARN"),
        Level::ERROR => ("\x1b[31m", "ERROR"),
    }
}

fn short_target(target: &str) -> &str {
    target.strip_prefix("haunted_arcade::").unwrap_or(target)
}

fn paint(writer: &mut Writer<'_>, code: &str, value: impl fmt::Display) -> fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "{}{}\x1b[0m", code, value)
    } else {
        write!(writer, "{}", value)
    }
}

/// Bumps the step counter. Drivers call this once per [`Game::update`](crate::game::Game::update).
pub fn increment_step() {
    STEP_COUNTER.fetch_add(1, Ordering::Relaxed);
}

pub fn step_count() -> u64 {
    STEP_COUNTER.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_target() {
        assert_eq!(short_target("haunted_arcade::game::state"), "game::state");
        assert_eq!(short_target("haunted_arcade"), "haunted_arcade");
        assert_eq!(short_target("other::module"), "other::module");
    }

    #[test]
    fn test_level_labels_are_aligned() {
        for level in [Level::TRACE, Level::DEBUG, Level::INFO, Level::WARN, Level::ERROR] {
            assert_eq!(level_style(&level).1.len(), 5);
        }
    }

    #[test]
    fn test_step_counter_increments() {
        let before = step_count();
        increment_step();
        assert!(step_count() > before);
    }
}
