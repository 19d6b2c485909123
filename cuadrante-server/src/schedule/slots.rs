//! Time-slot grid generation
//!
//! Slot sequences are generated fresh per request from the store's
//! opening spec and never persisted. The grid is half-open: slots run
//! from the opening time up to `close − granularity`.
//!
//! The generator is deliberately lenient — it feeds a grid that must
//! always render, so malformed specs fall back to a 09:00–21:00 window
//! instead of failing the request.

/// Default window applied when the opening spec is missing or malformed
pub const DEFAULT_OPEN: &str = "09:00";
pub const DEFAULT_CLOSE: &str = "21:00";

/// Country whose stores run on a 15-minute grid
const FIFTEEN_MINUTE_COUNTRY: &str = "FRANCIA";

/// Slot width in minutes for a country (any casing, nullable)
pub fn granularity_minutes(country: Option<&str>) -> u32 {
    match country {
        Some(c) if c.trim().to_uppercase() == FIFTEEN_MINUTE_COUNTRY => 15,
        _ => 30,
    }
}

/// Slot width in hours, for effective-hours accounting
pub fn granularity_hours(country: Option<&str>) -> f64 {
    granularity_minutes(country) as f64 / 60.0
}

/// Generate the ordered slot labels for one day.
///
/// An opening spec containing `-` is treated as a comma-separated list
/// of `start-end` sub-intervals (split-shift stores); each sub-interval
/// emits its own run of slots, concatenated in input order. Otherwise
/// `open_spec`/`close_spec` are single `HH:MM` values. Never fails:
/// unusable input produces the default 09:00–21:00 window.
pub fn generate_slots(
    country: Option<&str>,
    open_spec: Option<&str>,
    close_spec: Option<&str>,
) -> Vec<String> {
    let step = granularity_minutes(country);
    let open_spec = open_spec.unwrap_or_default().trim();

    if open_spec.contains('-') {
        let mut slots = Vec::new();
        for interval in open_spec.split(',') {
            if let Some((start, end)) = interval.split_once('-')
                && let (Some(start), Some(end)) = (parse_minutes(start), parse_minutes(end))
                && start < end
            {
                emit_range(&mut slots, start, end, step);
            } else {
                tracing::warn!(interval = %interval, "Skipping unparseable opening interval");
            }
        }
        if !slots.is_empty() {
            return slots;
        }
        // No usable sub-interval at all: same treatment as a bad single spec
    }

    let open = parse_minutes(open_spec);
    let close = close_spec.and_then(parse_minutes);

    let (open, close) = match (open, close) {
        (Some(open), Some(close)) if open < close => (open, close),
        _ => {
            // unwrap: the default labels are well-formed
            (
                parse_minutes(DEFAULT_OPEN).unwrap(),
                parse_minutes(DEFAULT_CLOSE).unwrap(),
            )
        }
    };

    let mut slots = Vec::new();
    emit_range(&mut slots, open, close, step);
    slots
}

/// Parse `HH:MM` into minutes since midnight
fn parse_minutes(label: &str) -> Option<u32> {
    let (hours, minutes) = label.trim().split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

fn format_slot(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Emit slots for `[start, end)`, flooring both ends to the granularity
/// grid to guard against off-grid inputs.
fn emit_range(slots: &mut Vec<String>, start: u32, end: u32, step: u32) {
    let mut current = start / step * step;
    let end = end / step * step;
    while current < end {
        slots.push(format_slot(current));
        current += step;
    }
}
