use std::fmt;

/// What a column asks its host to recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtyFlag {
    /// Slot offsets or styles changed, relayout the column and its slots.
    Measure,
    /// Only paint state changed (background color).
    Render,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessibilityEvent {
    /// The selected text changed.
    TextChange { text: String },
    /// An accessibility scroll action finished.
    ScrollEnd,
}

/// Everything the column needs from the retained UI tree that hosts it.
pub trait ColumnHost {
    /// Measures the height of `probe` laid out at `font_size`.
    fn measure_text_height(&self, probe: &str, font_size: f64) -> f64;

    fn mark_dirty(&mut self, flag: DirtyFlag) {
        let _ = flag;
    }

    fn accessibility_event(&mut self, event: AccessibilityEvent) {
        let _ = event;
    }
}

/// Vibration motor driven by the column.
pub trait HapticController: fmt::Debug {
    /// Plays a single detent.
    fn play_once(&mut self);
    fn stop(&mut self);
    /// Feeds a scroll delta in logical pixels, the controller plays detents as it accumulates.
    fn handle_delta(&mut self, delta: f64);
}

pub type HapticFactory = Box<dyn Fn() -> Box<dyn HapticController>>;

/// Supplies the option texts of a column.
pub trait OptionProvider: fmt::Debug {
    fn len(&self) -> usize;

    /// Text of the option at `index`, `index < self.len()`.
    fn text(&self, index: usize) -> String;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OptionProvider for Vec<String> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn text(&self, index: usize) -> String {
        self.get(index).cloned().unwrap_or_default()
    }
}

/// Consecutive integers formatted with zero padding, the options of date and time columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberOptions {
    pub start: u32,
    pub count: usize,
    pub width: usize,
}

impl NumberOptions {
    pub fn hours(hour24: bool) -> Self {
        if hour24 {
            Self {
                start: 0,
                count: 24,
                width: 2,
            }
        } else {
            Self {
                start: 1,
                count: 12,
                width: 1,
            }
        }
    }

    pub fn minutes() -> Self {
        Self {
            start: 0,
            count: 60,
            width: 2,
        }
    }

    pub fn months() -> Self {
        Self {
            start: 1,
            count: 12,
            width: 1,
        }
    }

    pub fn days(count: usize) -> Self {
        Self {
            start: 1,
            count,
            width: 1,
        }
    }

    pub fn years(start: u32, end: u32) -> Self {
        Self {
            start,
            count: end.saturating_sub(start) as usize + 1,
            width: 4,
        }
    }
}

impl OptionProvider for NumberOptions {
    fn len(&self) -> usize {
        self.count
    }

    fn text(&self, index: usize) -> String {
        let value = u64::from(self.start) + index as u64;
        format!("{value:0width$}", width = self.width)
    }
}

/// The two-option meridiem column of a 12-hour time picker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmPmOptions;

impl OptionProvider for AmPmOptions {
    fn len(&self) -> usize {
        2
    }

    fn text(&self, index: usize) -> String {
        match index {
            0 => String::from("AM"),
            _ => String::from("PM"),
        }
    }
}

/// Which picker a column belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PickerKind {
    #[default]
    Text,
    Date,
    Time {
        hour24: bool,
    },
}

impl PickerKind {
    /// Whether slot geometry follows the per-slot font heights.
    ///
    /// Date and time columns use evenly spaced slots.
    pub fn has_text_style_geometry(self) -> bool {
        self == PickerKind::Text
    }
}

/// The pluggable parts of one column.
pub struct ColumnCapabilities {
    pub options: Box<dyn OptionProvider>,
    pub haptic_factory: Option<HapticFactory>,
    /// The column shows the meridiem of a 12-hour time picker and never loops.
    pub am_pm: bool,
}

impl ColumnCapabilities {
    pub fn new(options: impl OptionProvider + 'static) -> Self {
        Self {
            options: Box::new(options),
            haptic_factory: None,
            am_pm: false,
        }
    }

    pub fn with_haptics(
        mut self,
        factory: impl Fn() -> Box<dyn HapticController> + 'static,
    ) -> Self {
        self.haptic_factory = Some(Box::new(factory));
        self
    }

    /// Capabilities of the hour column of a time picker, `None` for other pickers.
    pub fn hours(kind: PickerKind) -> Option<Self> {
        match kind {
            PickerKind::Time { hour24 } => Some(Self::new(NumberOptions::hours(hour24))),
            PickerKind::Text | PickerKind::Date => None,
        }
    }

    /// Capabilities of the meridiem column of a 12-hour time picker.
    pub fn am_pm() -> Self {
        Self {
            am_pm: true,
            ..Self::new(AmPmOptions)
        }
    }
}

impl fmt::Debug for ColumnCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnCapabilities")
            .field("options", &self.options)
            .field("haptic_factory", &self.haptic_factory.is_some())
            .field("am_pm", &self.am_pm)
            .finish()
    }
}

/// Notifications the column queues for its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnEvent {
    /// The current index changed by one step.
    Changed { index: usize, is_down: bool },
    /// Scrolling came to rest.
    ScrollStop { index: usize },
    /// The option that would become selected crossed the middle of the divider area.
    EnterSelectedArea { index: usize },
}
