//! Scroll-and-snap state machine of one picker column.
//!
//! A column shows `show_count` slots (an odd number, the middle slot is selected) out of a
//! possibly much longer option list. Dragging moves the slots by a sub-slot offset; whenever
//! the offset reaches the distance to the neighbouring slot the index steps and the offset
//! wraps around. On release the column either tosses (inertial spring) or settles back onto
//! the nearest slot.
//!
//! Everything is frame driven: input handlers mutate the state synchronously, and
//! [`Column::advance_animations`] samples the running animations once per frame.

use std::mem;

use serde::Serialize;
use spinwheel_config::{Color, Config, CrownSensitivity, TextStyle};

use crate::animation::{AnimatedProperty, Animation, Clock};
use crate::swipe_tracker::SwipeTracker;
use crate::utils::{near_equal, near_zero, round_away_from_zero};

pub mod host;
mod input;
pub mod option_property;
pub mod text_style;
pub mod toss;


pub use self::host::{
    AccessibilityEvent, AmPmOptions, ColumnCapabilities, ColumnEvent, ColumnHost, DirtyFlag,
    HapticController, HapticFactory, NumberOptions, OptionProvider, PickerKind,
};
pub use self::input::{crown_rotate_px, DirectionKey, DragMove, InputEvent, MOVE_THRESHOLD};
use self::option_property::{update_shift_distances, OptionProperty, ScrollDirection};
use self::text_style::{SlotStyle, TextStyleTable};
use self::toss::{TossController, TossTarget};

/// Text laid out to find the height of a font size.
pub const MEASURE_PROBE: &str = "TEST";

/// Invisible slots kept above and below the visible ones so that text can scroll in.
const BUFFER_SLOTS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Number of slots including the buffer slots.
    pub show_count: usize,
    /// Height of the middle slot.
    pub divider_spacing: f64,
    /// Height of every other slot.
    pub gradient_height: f64,
    /// Offset an accessibility scroll animates back from.
    pub jump_interval: f64,
    pub selected: TextStyle,
    pub candidate: TextStyle,
    pub disappear: TextStyle,
    pub normal: TextStyle,
    pub hover_color: Color,
    pub press_color: Color,
    pub background_color: Color,
    pub haptic_feedback: bool,
    pub crown_sensitivity: CrownSensitivity,
    pub disable_text_style_animation: bool,
    pub animations: spinwheel_config::Animations,
}

impl Default for Options {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Options {
    pub fn from_config(config: &Config) -> Self {
        let theme = &config.theme;

        // The middle slot needs an option on each side.
        let visible = usize::from(theme.show_option_count.max(1)) | 1;

        Self {
            show_count: visible + BUFFER_SLOTS,
            divider_spacing: theme.divider_spacing.0,
            gradient_height: theme.gradient_height.0,
            jump_interval: theme.jump_interval.0,
            selected: theme.selected,
            candidate: theme.candidate,
            disappear: theme.disappear,
            normal: theme.normal,
            hover_color: theme.hover_color,
            press_color: theme.press_color,
            background_color: theme.background_color,
            haptic_feedback: theme.haptic_feedback,
            crown_sensitivity: theme.crown_sensitivity,
            disable_text_style_animation: false,
            animations: config.animations.clone(),
        }
    }
}

/// One visible slot as the host should lay it out.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub text: String,
    pub style: SlotStyle,
    /// Vertical offset from the slot's resting position, whole pixels.
    pub offset: f64,
}

#[derive(Debug, Serialize)]
struct SelectedObject<'a> {
    value: &'a str,
    index: usize,
    status: i32,
}

#[derive(Debug)]
struct Background {
    from: Color,
    to: Color,
    progress: AnimatedProperty,
}

impl Background {
    fn new(color: Color) -> Self {
        Self {
            from: color,
            to: color,
            progress: AnimatedProperty::new(1.),
        }
    }

    fn color(&self) -> Color {
        self.from.lerp(self.to, self.progress.value())
    }

    fn fade_to(&mut self, clock: &Clock, to: Color, config: spinwheel_config::Animation) {
        if self.to == to {
            return;
        }

        self.from = self.color();
        self.to = to;
        self.progress
            .animate(Animation::new(clock.clone(), 0., 1., 0., config));
    }
}

pub struct Column<H: ColumnHost> {
    kind: PickerKind,
    options: Options,
    provider: Box<dyn OptionProvider>,
    haptic_factory: Option<HapticFactory>,
    /// Meridiem column of a 12-hour time picker.
    am_pm: bool,
    host: Option<H>,
    clock: Clock,
    haptic: Option<Box<dyn HapticController>>,

    current_index: usize,
    /// Option last reported through [`ColumnEvent::EnterSelectedArea`].
    enter_index: usize,
    enter_delta: f64,
    show_count: usize,

    option_props: Vec<OptionProperty>,
    text_styles: TextStyleTable,
    slots: Vec<Slot>,

    /// Sub-slot offset carried between drag updates.
    y_offset: f64,
    /// Last drag position fed to `update_column_child_position`.
    y_last: f64,
    /// Offset last applied by `scroll_option`.
    scroll_delta: f64,
    distance_percent: f64,
    /// Release velocity in px/s.
    main_velocity: f64,

    wheel_mode_enabled: bool,
    disable_text_style_animation: bool,
    haptic_enabled: bool,
    is_toss_status: bool,
    click_break: bool,
    animation_break: bool,
    pressed: bool,
    is_show: bool,
    is_hover: bool,
    is_haptic_play_once: bool,
    animation_created: bool,
    needs_rebuild: bool,
    local_down_distance: f64,

    swipe_tracker: SwipeTracker,
    toss: TossController,
    scroll_property: AnimatedProperty,
    around_click_property: AnimatedProperty,
    background: Background,

    events: Vec<ColumnEvent>,
}

impl<H: ColumnHost> Column<H> {
    pub fn new(
        kind: PickerKind,
        capabilities: ColumnCapabilities,
        host: H,
        clock: Clock,
        options: Options,
    ) -> Self {
        let ColumnCapabilities {
            options: provider,
            haptic_factory,
            am_pm,
        } = capabilities;

        let show_count = options.show_count;
        let toss = TossController::new(clock.clone(), options.animations.toss);

        debug!(
            "creating {kind:?} column with {} options and {show_count} slots",
            provider.len()
        );

        Self {
            kind,
            provider,
            haptic_factory,
            am_pm,
            host: Some(host),
            haptic: None,
            current_index: 0,
            enter_index: 0,
            enter_delta: 0.,
            show_count,
            option_props: Vec::new(),
            text_styles: TextStyleTable::new(),
            slots: Vec::new(),
            y_offset: 0.,
            y_last: 0.,
            scroll_delta: 0.,
            distance_percent: 0.,
            main_velocity: 0.,
            wheel_mode_enabled: true,
            disable_text_style_animation: options.disable_text_style_animation,
            haptic_enabled: options.haptic_feedback,
            is_toss_status: false,
            click_break: false,
            animation_break: false,
            pressed: false,
            is_show: true,
            is_hover: false,
            is_haptic_play_once: false,
            animation_created: false,
            needs_rebuild: true,
            local_down_distance: 0.,
            swipe_tracker: SwipeTracker::new(),
            toss,
            scroll_property: AnimatedProperty::new(0.),
            around_click_property: AnimatedProperty::new(0.),
            background: Background::new(options.background_color),
            events: Vec::new(),
            clock,
            options,
        }
    }

    /// Applies pending configuration, builds the slot tables and the animation state.
    pub fn on_modify_done(&mut self) {
        let _span = tracy_client::span!("Column::on_modify_done");

        if self.needs_rebuild {
            self.init_option_properties();
            self.needs_rebuild = false;
        }

        self.animation_created = true;

        if self.haptic_enabled {
            if self.haptic.is_none() {
                self.haptic = self.haptic_factory.as_ref().map(|factory| factory());
            }
        } else if let Some(mut haptic) = self.haptic.take() {
            haptic.stop();
        }

        self.flush_current_options(false, false, false);
    }

    fn init_option_properties(&mut self) {
        let mid = self.show_count / 2;

        self.option_props = (0..self.show_count)
            .map(|i| {
                let height = if i == mid {
                    self.options.divider_spacing
                } else {
                    self.options.gradient_height
                };
                let style = self.tier_style(i.abs_diff(mid));
                OptionProperty::new(height, self.measure(style.font_size.0))
            })
            .collect();
        let text_geometry = self.text_geometry();
        update_shift_distances(&mut self.option_props, text_geometry);

        self.slots = vec![
            Slot {
                text: String::new(),
                style: SlotStyle::from(self.options.normal),
                offset: 0.,
            };
            self.show_count
        ];
        self.y_offset = 0.;
        self.y_last = 0.;
        self.scroll_delta = 0.;
        self.distance_percent = 0.;

        trace!("built option properties: {:?}", self.option_props);
    }

    fn measure(&self, font_size: f64) -> f64 {
        self.host
            .as_ref()
            .map_or(0., |host| host.measure_text_height(MEASURE_PROBE, font_size))
    }

    fn text_geometry(&self) -> bool {
        self.kind.has_text_style_geometry() && !self.disable_text_style_animation
    }

    /// Style of a slot `distance` slots away from the middle.
    fn tier_style(&self, distance: usize) -> TextStyle {
        let options = &self.options;
        match (self.kind, distance) {
            (_, 0) => options.selected,
            (PickerKind::Text, 1) => options.candidate,
            (PickerKind::Text, 2) => options.disappear,
            (PickerKind::Text, _) => options.normal,
            (_, 1) => options.normal,
            (_, _) => options.disappear,
        }
    }

    fn mark_dirty(&mut self, flag: DirtyFlag) {
        if let Some(host) = &mut self.host {
            host.mark_dirty(flag);
        }
    }

    fn stop_haptics(&mut self) {
        if let Some(haptic) = &mut self.haptic {
            haptic.stop();
        }
    }

    /// Fills the slots with the options around the current index.
    ///
    /// Unless `content_only`, the text style table and the slot font heights are rebuilt as
    /// well. With `content_only` and `update_animation_properties` the text style table is
    /// shifted by one slot in the scroll direction instead.
    pub fn flush_current_options(
        &mut self,
        is_down: bool,
        content_only: bool,
        update_animation_properties: bool,
    ) {
        let _span = tracy_client::span!("Column::flush_current_options");

        if !content_only {
            self.text_styles.clear();
        }

        let total = self.provider.len();
        if total == 0 {
            for slot in &mut self.slots {
                slot.text.clear();
            }
            return;
        }

        self.current_index %= total;
        let mid = self.show_count / 2;
        let looping = self.is_looping();

        for i in 0..self.slots.len() {
            let virtual_index = self.current_index as isize + i as isize - mid as isize;
            let in_range = (0..total as isize).contains(&virtual_index);
            let option_index = virtual_index.rem_euclid(total as isize) as usize;

            let text = if looping || in_range {
                self.provider.text(option_index)
            } else {
                String::new()
            };

            let style = SlotStyle::from(self.tier_style(i.abs_diff(mid)));

            if !content_only {
                let font_height = self.measure(style.font_size);
                if let Some(prop) = self.option_props.get_mut(i) {
                    prop.font_height = font_height.min(prop.height);
                }
                self.text_styles.push(style);
            }

            let slot = &mut self.slots[i];
            slot.text = text;
            slot.style = style;
        }

        if !content_only {
            let text_geometry = self.text_geometry();
            update_shift_distances(&mut self.option_props, text_geometry);
        } else if update_animation_properties {
            self.text_styles.shift(is_down);
        }
    }

    /// Whether the index wraps around at the ends of the option list.
    pub fn is_looping(&self) -> bool {
        self.wheel_mode_enabled && !self.am_pm && !self.not_loop_options()
    }

    /// Whether there are too few options to fill the window while looping.
    pub fn not_loop_options(&self) -> bool {
        self.provider.len() <= self.show_count / 2 + 1
    }

    /// Whether the index can step once in the given direction.
    pub fn can_move(&self, is_down: bool) -> bool {
        if self.is_looping() {
            return true;
        }

        let total = self.provider.len() as isize;
        let current = self.current_index as isize;
        let next = if is_down { current + 1 } else { current - 1 };
        (0..total).contains(&next)
    }

    /// Steps the current index by one.
    ///
    /// Returns `false` when there are no options or a non-looping column is at its end.
    pub fn inner_handle_scroll(
        &mut self,
        is_down: bool,
        content_only: bool,
        update_animation_properties: bool,
    ) -> bool {
        let total = self.provider.len();
        if total == 0 {
            return false;
        }

        let at_end = if is_down {
            self.current_index + 1 >= total
        } else {
            self.current_index == 0
        };
        if !self.is_looping() && at_end {
            trace!("index {} is at the end, not stepping", self.current_index);
            return false;
        }

        self.current_index = if is_down {
            (self.current_index + 1) % total
        } else {
            (total + self.current_index - 1) % total
        };
        trace!("stepped to index {}", self.current_index);

        if self.haptic_enabled && self.is_show && !self.is_haptic_play_once {
            if let Some(haptic) = &mut self.haptic {
                haptic.play_once();
            }
        }

        self.flush_current_options(is_down, content_only, update_animation_properties);

        self.events.push(ColumnEvent::Changed {
            index: self.current_index,
            is_down,
        });

        let text = self.current_text();
        if let Some(host) = &mut self.host {
            host.mark_dirty(DirtyFlag::Measure);
            host.accessibility_event(AccessibilityEvent::TextChange { text });
        }

        true
    }

    fn mid_property(&self) -> Option<OptionProperty> {
        self.option_props.get(self.show_count / 2).copied()
    }

    fn mid_distance(&self, dir: ScrollDirection) -> f64 {
        self.mid_property().map_or(0., |prop| prop.distance(dir))
    }

    /// Moves every slot by the sub-slot `delta` without changing the index.
    pub fn scroll_option(&mut self, delta: f64) {
        let _span = tracy_client::span!("Column::scroll_option");

        self.scroll_delta = delta;

        let Some(mid) = self.mid_property() else {
            return;
        };

        let dir = ScrollDirection::from_delta(delta);
        let shift = mid.distance(dir);
        self.handle_enter_selected_area(delta, shift, dir);

        self.distance_percent = if near_zero(shift) { 0. } else { delta / shift };
        let scale = if near_zero(mid.height) {
            0.
        } else {
            delta.abs() / mid.height
        };

        self.update_text_properties_linear(delta, scale);

        for (slot, prop) in self.slots.iter_mut().zip(&self.option_props) {
            // Adding zero turns -0 into 0.
            slot.offset = (prop.distance(dir) * self.distance_percent).trunc() + 0.;
        }

        self.mark_dirty(DirtyFlag::Measure);
    }

    fn update_text_properties_linear(&mut self, delta: f64, scale: f64) {
        if self.disable_text_style_animation {
            return;
        }

        for (i, slot) in self.slots.iter_mut().enumerate() {
            if let Some(style) =
                self.text_styles
                    .interpolate(i, delta, self.distance_percent, scale)
            {
                slot.style = style;
            }
        }
    }

    /// Reports the option about to become selected once the offset crosses half a slot.
    fn handle_enter_selected_area(&mut self, scroll_delta: f64, shift: f64, dir: ScrollDirection) {
        let total = self.provider.len();
        if total == 0 {
            return;
        }

        let threshold = shift / 2.;
        let is_down = dir == ScrollDirection::Up;
        let candidate = if is_down {
            (self.current_index + 1) % total
        } else {
            (total + self.current_index - 1) % total
        };

        let is_reverse = self.enter_delta.abs() > scroll_delta.abs();
        self.enter_delta = if near_equal(scroll_delta, shift) {
            0.
        } else {
            scroll_delta
        };

        if scroll_delta.abs() >= threshold.abs()
            && self.enter_index != candidate
            && self.can_move(is_down)
        {
            self.enter_index = candidate;
            self.events
                .push(ColumnEvent::EnterSelectedArea { index: candidate });
        }

        if is_reverse
            && scroll_delta.abs() <= threshold.abs()
            && self.enter_index != self.current_index
        {
            self.enter_index = self.current_index;
            self.events.push(ColumnEvent::EnterSelectedArea {
                index: self.current_index,
            });
        }
    }

    /// Applies an absolute drag position, stepping the index for every whole slot travelled.
    pub fn update_column_child_position(&mut self, offset_y: f64) {
        let mut drag_delta = offset_y - self.y_last;

        if self.haptic_enabled && self.is_show && !self.is_haptic_play_once {
            if let Some(haptic) = &mut self.haptic {
                haptic.handle_delta(drag_delta);
            }
        }

        self.y_last = offset_y;

        if !self.can_move(drag_delta < 0.) {
            return;
        }

        drag_delta += self.y_offset;

        let shift = self.mid_distance(ScrollDirection::from_delta(drag_delta));
        if !near_zero(shift) {
            if near_equal(drag_delta.abs(), shift.abs()) && !near_zero(drag_delta) {
                drag_delta = shift;
            }

            if drag_delta.abs() >= shift.abs() {
                let count = (drag_delta.abs() / shift.abs()) as usize;
                let is_down = drag_delta < 0.;
                let stepped = (0..count)
                    .take_while(|_| self.inner_handle_scroll(is_down, true, false))
                    .count();

                let mut at_end = stepped < count;
                drag_delta = if at_end {
                    0.
                } else {
                    drag_delta - count as f64 * shift
                };

                if !near_zero(drag_delta) && !self.can_move(drag_delta < 0.) {
                    drag_delta = 0.;
                    at_end = true;
                }

                if at_end {
                    self.stop_toss_at_end();
                }
            }
        }

        self.scroll_option(drag_delta);
        self.y_offset = drag_delta;
    }

    fn stop_toss_at_end(&mut self) {
        if self.toss.stop().is_some() {
            debug!("toss reached the end of the options");
            self.is_toss_status = false;
            self.stop_haptics();
            self.events.push(ColumnEvent::ScrollStop {
                index: self.current_index,
            });
        }
    }

    /// Snaps the residual offset onto the nearest slot.
    fn play_settle_animation(&mut self) {
        let dir = ScrollDirection::from_delta(self.scroll_delta);
        let shift = self.mid_distance(dir);
        let threshold = shift / 2.;

        if !near_zero(shift)
            && self.scroll_delta.abs() >= threshold.abs()
            && self.inner_handle_scroll(self.scroll_delta < 0., true, false)
        {
            let sign = match dir {
                ScrollDirection::Up => -1.,
                ScrollDirection::Down => 1.,
            };
            self.scroll_delta -= shift.abs() * sign;
        }

        self.animate_scroll(self.scroll_delta, 0.);
    }

    fn animate_scroll(&mut self, from: f64, to: f64) {
        trace!("settling from {from} to {to}");
        let anim = Animation::new(
            self.clock.clone(),
            from,
            to,
            0.,
            self.options.animations.settle.0,
        );
        self.scroll_property.animate(anim);
        self.scroll_option(from);
    }

    /// Samples every running animation and applies the frame.
    pub fn advance_animations(&mut self) {
        let _span = tracy_client::span!("Column::advance_animations");

        if let Some(frame) = self.scroll_property.advance() {
            self.scroll_option(frame.value);

            if let Some(token) = frame.finished {
                if self.scroll_property.is_current(token) {
                    trace!("settled at index {}", self.current_index);
                    self.events.push(ColumnEvent::ScrollStop {
                        index: self.current_index,
                    });
                }
            }
        }

        if let Some(frame) = self.around_click_property.advance() {
            self.update_column_child_position(round_away_from_zero(frame.value));

            if let Some(token) = frame.finished {
                if self.around_click_property.is_current(token) {
                    self.finish_around_click();
                }
            }
        }

        if let Some(frame) = self.toss.advance() {
            if frame.value != 0. {
                self.is_toss_status = true;
                self.update_column_child_position(frame.value);
            }

            if let Some(token) = frame.finished {
                if self.toss.is_current(token) {
                    self.finish_toss();
                }
            }
        }

        if self.background.progress.advance().is_some() {
            self.mark_dirty(DirtyFlag::Render);
        }
    }

    fn finish_around_click(&mut self) {
        self.is_haptic_play_once = false;
        self.y_offset = 0.;
        self.y_last = 0.;
        self.scroll_option(0.);
        self.events.push(ColumnEvent::ScrollStop {
            index: self.current_index,
        });
    }

    fn finish_toss(&mut self) {
        let end = self.toss.end_position();
        self.update_column_child_position(end);

        self.stop_haptics();
        self.y_last = 0.;
        self.scroll_option(0.);

        self.is_toss_status = false;
        self.y_offset = 0.;

        debug!("toss finished at index {}", self.current_index);
        self.events.push(ColumnEvent::ScrollStop {
            index: self.current_index,
        });
    }

    /// Whether any column animation is running.
    pub fn are_animations_ongoing(&self) -> bool {
        self.scroll_property.is_animating()
            || self.around_click_property.is_animating()
            || self.toss.is_playing()
            || self.background.progress.is_animating()
    }

    pub fn on_window_show(&mut self) {
        self.is_show = true;
    }

    pub fn on_window_hide(&mut self) {
        self.is_show = false;
        self.stop_haptics();
    }

    /// Stops everything and releases the host.
    pub fn detach(&mut self) -> Option<H> {
        debug!("detaching column");
        self.stop_haptics();
        self.scroll_property.stop();
        self.around_click_property.stop();
        self.toss.stop();
        self.background.progress.stop();
        self.is_toss_status = false;
        self.pressed = false;
        self.host.take()
    }

    pub fn take_events(&mut self) -> Vec<ColumnEvent> {
        mem::take(&mut self.events)
    }

    pub fn set_current_index(&mut self, index: usize) {
        let total = self.provider.len();
        self.current_index = if total == 0 {
            0
        } else if index >= total {
            warn!("index {index} is out of range for {total} options");
            total - 1
        } else {
            index
        };
        self.enter_index = self.current_index;
        self.needs_rebuild = true;
    }

    pub fn set_option_provider(&mut self, provider: Box<dyn OptionProvider>) {
        self.provider = provider;
        let index = self.current_index;
        self.set_current_index(index);
    }

    /// Sets the number of slots including the buffer slots.
    pub fn set_show_count(&mut self, count: usize) {
        if count % 2 == 0 {
            warn!("ignoring even slot count {count}");
            return;
        }

        self.show_count = count;
        self.needs_rebuild = true;
    }

    pub fn set_wheel_mode_enabled(&mut self, enabled: bool) {
        self.wheel_mode_enabled = enabled;
        self.needs_rebuild = true;
    }

    pub fn set_disable_text_style_animation(&mut self, disable: bool) {
        self.disable_text_style_animation = disable;
        self.needs_rebuild = true;
    }

    pub fn set_enable_haptic(&mut self, enabled: bool) {
        self.haptic_enabled = enabled;
        if !enabled {
            self.stop_haptics();
        }
        self.needs_rebuild = true;
    }

    /// Selected option as `{"value":..,"index":..,"status":..}`.
    pub fn selected_object(&self, status: i32) -> String {
        let value = self.current_text();
        let object = SelectedObject {
            value: &value,
            index: self.current_index,
            status,
        };
        serde_json::to_string(&object).unwrap_or_default()
    }

    pub fn current_text(&self) -> String {
        self.option_text(self.current_index)
    }

    pub fn option_text(&self, index: usize) -> String {
        if index < self.provider.len() {
            self.provider.text(index)
        } else {
            String::new()
        }
    }

    pub fn kind(&self) -> PickerKind {
        self.kind
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn option_count(&self) -> usize {
        self.provider.len()
    }

    pub fn show_count(&self) -> usize {
        self.show_count
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn option_properties(&self) -> &[OptionProperty] {
        &self.option_props
    }

    pub fn y_offset(&self) -> f64 {
        self.y_offset
    }

    pub fn y_last(&self) -> f64 {
        self.y_last
    }

    pub fn scroll_delta(&self) -> f64 {
        self.scroll_delta
    }

    pub fn main_velocity(&self) -> f64 {
        self.main_velocity
    }

    pub fn is_toss_status(&self) -> bool {
        self.is_toss_status
    }

    pub fn is_tossing(&self) -> bool {
        self.toss.is_playing()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn background_color(&self) -> Color {
        self.background.color()
    }

    fn toss_target(&self) -> TossTarget {
        let mid = self.mid_property().unwrap_or_default();
        TossTarget {
            next_distance: mid.next_distance,
            prev_distance: mid.prev_distance,
            offset: self.y_offset,
        }
    }

    #[cfg(test)]
    fn verify_invariants(&self) {
        let total = self.provider.len();
        if total > 0 {
            assert!(
                self.current_index < total,
                "index {} out of range for {total} options",
                self.current_index
            );
        }

        // Tables are rebuilt on the next on_modify_done().
        if self.needs_rebuild || self.option_props.is_empty() {
            return;
        }

        assert_eq!(self.option_props.len(), self.show_count);
        assert_eq!(self.slots.len(), self.show_count);
        for prop in &self.option_props {
            assert!(prop.font_height <= prop.height);
        }

        if !self.is_looping() && total > 0 {
            let mid = self.show_count / 2;
            for (i, slot) in self.slots.iter().enumerate() {
                let virtual_index = self.current_index as isize + i as isize - mid as isize;
                if !(0..total as isize).contains(&virtual_index) {
                    assert!(slot.text.is_empty(), "slot {i} must be empty: {slot:?}");
                }
            }
        }
    }
}
