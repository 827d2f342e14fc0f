//! Replays a recorded input session against a single column.
//!
//! A session is a JSON document describing the column and a list of steps:
//!
//! ```json
//! {
//!     "kind": "text",
//!     "options": ["a", "b", "c", "d", "e"],
//!     "index": 2,
//!     "steps": [
//!         { "input": { "type": "drag-start", "y": 0 } },
//!         { "input": { "type": "drag-move", "y": 30 } },
//!         { "advance-ms": 16 },
//!         { "input": { "type": "drag-end", "velocity": null } },
//!         "settle"
//!     ]
//! }
//! ```

use std::time::Duration;

use serde::Deserialize;
use spinwheel_config::Config;

use crate::animation::Clock;
use crate::column::{
    AccessibilityEvent, Column, ColumnCapabilities, ColumnEvent, ColumnHost, DirtyFlag,
    HapticController, InputEvent, NumberOptions, Options, PickerKind,
};

/// Frame interval the replay advances animations by.
const FRAME: Duration = Duration::from_micros(16_667);

/// Frames a `settle` step waits for the animations before giving up.
const MAX_SETTLE_FRAMES: usize = 10_000;

/// Line height relative to the font size, used in place of real text layout.
const LINE_HEIGHT: f64 = 1.2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnKind {
    /// Free-form options from `options`.
    #[default]
    Text,
    Years,
    Months,
    Days,
    Hours24,
    Hours12,
    Minutes,
    AmPm,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub kind: ColumnKind,
    /// Options of a text column.
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub index: usize,
    /// Slot count including the buffer slots, overrides the theme.
    #[serde(default)]
    pub show_count: Option<usize>,
    #[serde(default = "default_true")]
    pub wheel_mode: bool,
    #[serde(default)]
    pub disable_text_style_animation: bool,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    Input(InputEvent),
    /// Advances the clock frame by frame.
    AdvanceMs(u64),
    /// Runs frames until every animation has finished.
    Settle,
}

impl Script {
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    fn picker(&self) -> (PickerKind, ColumnCapabilities) {
        let date = PickerKind::Date;
        match self.kind {
            ColumnKind::Text => (
                PickerKind::Text,
                ColumnCapabilities::new(self.options.clone()),
            ),
            ColumnKind::Years => (
                date,
                ColumnCapabilities::new(NumberOptions::years(1900, 2100)),
            ),
            ColumnKind::Months => (date, ColumnCapabilities::new(NumberOptions::months())),
            ColumnKind::Days => (date, ColumnCapabilities::new(NumberOptions::days(31))),
            ColumnKind::Hours24 => (
                PickerKind::Time { hour24: true },
                ColumnCapabilities::new(NumberOptions::hours(true)),
            ),
            ColumnKind::Hours12 => (
                PickerKind::Time { hour24: false },
                ColumnCapabilities::new(NumberOptions::hours(false)),
            ),
            ColumnKind::Minutes => (
                PickerKind::Time { hour24: true },
                ColumnCapabilities::new(NumberOptions::minutes()),
            ),
            ColumnKind::AmPm => (
                PickerKind::Time { hour24: false },
                ColumnCapabilities::am_pm(),
            ),
        }
    }
}

/// Host that approximates text heights and logs what the column asks for.
#[derive(Debug, Default)]
pub struct LogHost {
    pub dirty_count: usize,
}

impl ColumnHost for LogHost {
    fn measure_text_height(&self, _probe: &str, font_size: f64) -> f64 {
        (font_size * LINE_HEIGHT).round()
    }

    fn mark_dirty(&mut self, flag: DirtyFlag) {
        trace!("dirty: {flag:?}");
        self.dirty_count += 1;
    }

    fn accessibility_event(&mut self, event: AccessibilityEvent) {
        debug!("accessibility: {event:?}");
    }
}

#[derive(Debug)]
struct LogHaptic;

impl HapticController for LogHaptic {
    fn play_once(&mut self) {
        debug!("haptic: detent");
    }

    fn stop(&mut self) {
        trace!("haptic: stop");
    }

    fn handle_delta(&mut self, delta: f64) {
        trace!("haptic: delta {delta}");
    }
}

#[derive(Debug)]
pub struct Report {
    pub events: Vec<ColumnEvent>,
    pub index: usize,
    pub text: String,
    /// Selected option as returned by [`Column::selected_object`].
    pub selected: String,
    /// Whether the last settle step ran out of frames.
    pub unsettled: bool,
}

pub fn run(script: &Script, config: &Config) -> Report {
    let _span = tracy_client::span!("replay::run");

    let mut clock = Clock::with_time(Duration::ZERO);
    clock.set_rate(1.0 / config.animations.slowdown.0.max(0.001));
    clock.set_complete_instantly(config.animations.off);

    let mut options = Options::from_config(config);
    if let Some(count) = script.show_count {
        options.show_count = count;
    }
    options.disable_text_style_animation = script.disable_text_style_animation;

    let (kind, capabilities) = script.picker();
    let capabilities =
        capabilities.with_haptics(|| Box::new(LogHaptic) as Box<dyn HapticController>);
    let mut column = Column::new(kind, capabilities, LogHost::default(), clock.clone(), options);
    column.set_wheel_mode_enabled(script.wheel_mode);
    column.set_current_index(script.index);
    column.on_modify_done();

    let mut events = Vec::new();
    let mut unsettled = false;

    for (i, step) in script.steps.iter().enumerate() {
        match *step {
            Step::Input(event) => column.handle_input(&event),
            Step::AdvanceMs(ms) => {
                let mut remaining = Duration::from_millis(ms);
                while !remaining.is_zero() {
                    let frame = remaining.min(FRAME);
                    clock.advance_unadjusted(frame);
                    column.advance_animations();
                    remaining -= frame;
                }
            }
            Step::Settle => {
                unsettled = true;
                for _ in 0..MAX_SETTLE_FRAMES {
                    if !column.are_animations_ongoing() {
                        unsettled = false;
                        break;
                    }
                    clock.advance_unadjusted(FRAME);
                    column.advance_animations();
                }
                if unsettled {
                    warn!("animations still running after {MAX_SETTLE_FRAMES} frames");
                }
            }
        }

        debug!(
            "step {i}: index {} offset {} delta {}",
            column.current_index(),
            column.y_offset(),
            column.scroll_delta()
        );
        for event in column.take_events() {
            debug!("event: {event:?}");
            events.push(event);
        }
    }

    Report {
        events,
        index: column.current_index(),
        text: column.current_text(),
        selected: column.selected_object(0),
        unsettled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_a_drag() {
        let script = Script::parse(
            r#"{
                "options": ["a", "b", "c", "d", "e", "f", "g", "h"],
                "index": 3,
                "steps": [
                    { "input": { "type": "drag-start", "y": 0 } },
                    { "input": { "type": "drag-move", "y": -60 } },
                    { "input": { "type": "drag-end", "velocity": 0 } },
                    "settle"
                ]
            }"#,
        )
        .unwrap();

        let report = run(&script, &Config::default());
        assert!(!report.unsettled);
        assert_eq!(report.index, 4);
        assert_eq!(report.text, "e");
        assert_eq!(report.selected, r#"{"value":"e","index":4,"status":0}"#);
        assert_eq!(
            report.events.last(),
            Some(&ColumnEvent::ScrollStop { index: 4 })
        );
    }

    #[test]
    fn number_columns() {
        let script = Script::parse(
            r#"{
                "kind": "hours24",
                "index": 0,
                "steps": [
                    { "input": { "type": "key", "key": "up" } },
                    { "advance-ms": 100 }
                ]
            }"#,
        )
        .unwrap();

        let report = run(&script, &Config::default());
        assert_eq!(report.text, "23");
    }

    #[test]
    fn animations_off_complete_instantly() {
        let mut config = Config::default();
        config.animations.off = true;

        let script = Script::parse(
            r#"{
                "options": ["a", "b", "c", "d", "e", "f", "g", "h"],
                "steps": [
                    { "input": { "type": "click", "slot": 4 } },
                    { "advance-ms": 16 }
                ]
            }"#,
        )
        .unwrap();

        let report = run(&script, &config);
        assert_eq!(report.index, 1);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Script::parse(r#"{ "optoins": [] }"#).is_err());
    }
}
