use serde::{Deserialize, Serialize};
use spinwheel_config::CrownSensitivity;

use super::option_property::ScrollDirection;
use super::{AccessibilityEvent, Column, ColumnEvent, ColumnHost};
use crate::animation::Animation;

/// Drag updates closer than this to the last position are ignored.
pub const MOVE_THRESHOLD: f64 = 2.;

/// A press on the middle slot turns into a drag past this distance.
const PRESS_MOVE_DISTANCE: f64 = 5.;

/// Crown angular velocity tiers in degrees per second, with the pixels per degree each gets.
const CROWN_VELOCITY_TIERS: [(f64, f64); 3] = [(200., 0.5), (1000., 1.), (f64::INFINITY, 1.5)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectionKey {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragMove {
    /// Absolute pointer position along the column axis.
    pub y: f64,
    /// Pointer velocity in px/s, estimated from the motion when missing.
    #[serde(default)]
    pub velocity: Option<f64>,
    #[serde(default = "one_finger")]
    pub fingers: usize,
}

fn one_finger() -> usize {
    1
}

impl DragMove {
    pub fn new(y: f64) -> Self {
        Self {
            y,
            velocity: None,
            fingers: 1,
        }
    }
}

/// Input a column reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InputEvent {
    DragStart { y: f64 },
    DragMove(DragMove),
    DragEnd { velocity: Option<f64> },
    DragCancel,
    /// Mouse wheel rotation, positive scrolls towards earlier options.
    Axis { delta: f64 },
    TouchDown,
    TouchUp,
    MiddleTouchDown { distance: f64 },
    MiddleTouchMove { distance: f64 },
    MiddleTouchUp,
    Hover { hovered: bool },
    /// Tap on the slot with the given index.
    Click { slot: usize },
    Key { key: DirectionKey },
    AccessibilityScroll { forward: bool },
    CrownBegin,
    CrownUpdate { angular_velocity: f64, degree: f64 },
    CrownEnd { angular_velocity: f64 },
    WindowShow,
    WindowHide,
}

/// Converts a crown rotation by `degree` to a scroll offset in pixels.
pub fn crown_rotate_px(angular_velocity: f64, degree: f64, sensitivity: CrownSensitivity) -> f64 {
    let speed = angular_velocity.abs();
    let ratio = CROWN_VELOCITY_TIERS
        .iter()
        .find(|(limit, _)| speed <= *limit)
        .map_or(1.5, |(_, ratio)| *ratio);

    let multiplier = match sensitivity {
        CrownSensitivity::Low => 0.6,
        CrownSensitivity::Medium => 1.,
        CrownSensitivity::High => 1.4,
    };

    degree * ratio * multiplier
}

impl<H: ColumnHost> Column<H> {
    pub fn handle_input(&mut self, event: &InputEvent) {
        trace!("input: {event:?}");

        match *event {
            InputEvent::DragStart { y } => self.handle_drag_start(y),
            InputEvent::DragMove(ev) => self.handle_drag_move(ev),
            InputEvent::DragEnd { velocity } => self.handle_drag_end(velocity),
            InputEvent::DragCancel => self.handle_drag_cancel(),
            InputEvent::Axis { delta } => self.handle_axis(delta),
            InputEvent::TouchDown => self.on_touch_down(),
            InputEvent::TouchUp => self.on_touch_up(),
            InputEvent::MiddleTouchDown { distance } => self.on_middle_touch_down(distance),
            InputEvent::MiddleTouchMove { distance } => self.on_middle_touch_move(distance),
            InputEvent::MiddleTouchUp => self.on_middle_touch_up(),
            InputEvent::Hover { hovered } => self.on_hover(hovered),
            InputEvent::Click { slot } => self.on_around_click(slot),
            InputEvent::Key { key } => {
                self.handle_direction_key(key);
            }
            InputEvent::AccessibilityScroll { forward } => {
                self.accessibility_scroll(forward);
            }
            InputEvent::CrownBegin => self.handle_crown_begin(),
            InputEvent::CrownUpdate {
                angular_velocity,
                degree,
            } => self.handle_crown_update(angular_velocity, degree),
            InputEvent::CrownEnd { angular_velocity } => self.handle_crown_end(angular_velocity),
            InputEvent::WindowShow => self.on_window_show(),
            InputEvent::WindowHide => self.on_window_hide(),
        }
    }

    /// Stops the click and settle animations, keeping the offset they reached.
    fn interrupt_animations(&mut self) {
        if self.around_click_property.stop().is_some() {
            trace!("interrupted around-click animation");
        }

        if self.scroll_property.stop().is_some() {
            trace!("interrupted settle animation");
            self.y_offset = self.scroll_delta;
        }
    }

    pub fn handle_drag_start(&mut self, y: f64) {
        let now = self.clock.now_unadjusted();
        self.swipe_tracker.reset(y, now);

        if self.toss.is_playing() {
            self.is_toss_status = false;
        }
        self.toss.set_start(y);
        self.y_last = y;
        self.pressed = true;

        self.interrupt_animations();
    }

    pub fn handle_drag_move(&mut self, ev: DragMove) {
        if ev.fingers > 1 {
            return;
        }

        self.animation_break = false;
        if !self.pressed {
            return;
        }

        let now = self.clock.now_unadjusted();
        self.swipe_tracker.push_pos(ev.y, now);
        self.main_velocity = ev.velocity.unwrap_or_else(|| self.swipe_tracker.velocity());

        if (ev.y - self.y_last).abs() <= MOVE_THRESHOLD {
            self.stop_haptics();
            return;
        }

        self.toss.set_end(ev.y);
        self.update_column_child_position(ev.y);
    }

    /// Mouse wheel, one step per event.
    pub fn handle_axis(&mut self, delta: f64) {
        if self.inner_handle_scroll(delta < 0., true, false) {
            self.events.push(ColumnEvent::ScrollStop {
                index: self.current_index,
            });
        }
    }

    pub fn handle_drag_end(&mut self, velocity: Option<f64>) {
        self.stop_haptics();
        self.is_haptic_play_once = false;
        self.pressed = false;

        if let Some(velocity) = velocity {
            self.main_velocity = velocity;
        }

        let target = self.toss_target();
        if self.toss.play(self.main_velocity, target) {
            // Toss positions start from 0.
            self.y_last = 0.;
            self.is_toss_status = true;
            return;
        }

        self.y_offset = 0.;
        self.y_last = 0.;

        if !self.animation_created {
            self.scroll_option(0.);
            return;
        }

        self.play_settle_animation();
    }

    pub fn handle_drag_cancel(&mut self) {
        self.handle_drag_end(None);
    }

    /// Touch down anywhere on the column, stops a running toss.
    pub fn on_touch_down(&mut self) {
        if !self.is_toss_status {
            self.animation_break = false;
            self.click_break = false;
            return;
        }

        self.animation_break = true;
        self.click_break = true;

        self.y_last = self.toss.end_position();
        if let Some(pos) = self.toss.stop() {
            debug!("toss interrupted at {pos}");
        }
        self.is_toss_status = false;
        self.stop_haptics();
    }

    pub fn on_touch_up(&mut self) {
        if self.animation_break {
            self.play_settle_animation();
            self.y_offset = 0.;
        }
    }

    pub fn on_middle_touch_down(&mut self, distance: f64) {
        self.local_down_distance = distance;
        let color = self.options.press_color;
        let config = self.options.animations.press.0;
        self.background.fade_to(&self.clock, color, config);
    }

    pub fn on_middle_touch_move(&mut self, distance: f64) {
        if (distance - self.local_down_distance).abs() > PRESS_MOVE_DISTANCE {
            self.on_middle_touch_up();
        }
    }

    pub fn on_middle_touch_up(&mut self) {
        self.local_down_distance = 0.;
        self.fade_to_rest_color();
    }

    pub fn on_hover(&mut self, hovered: bool) {
        self.is_hover = hovered;
        self.fade_to_rest_color();
    }

    fn fade_to_rest_color(&mut self) {
        let color = if self.is_hover {
            self.options.hover_color
        } else {
            self.options.background_color
        };
        let config = self.options.animations.hover.0;
        self.background.fade_to(&self.clock, color, config);
    }

    /// Tap on a slot other than the middle one scrolls it into the middle.
    pub fn on_around_click(&mut self, slot: usize) {
        if self.click_break || slot >= self.show_count {
            return;
        }

        let mid = self.show_count / 2;
        let step = slot as isize - mid as isize;
        if step == 0 {
            return;
        }

        let target_index = self.current_index as isize + step;
        let total = self.provider.len() as isize;
        if !self.is_looping() && !(0..total).contains(&target_index) {
            trace!("not scrolling to virtual index {target_index}");
            return;
        }

        if self.around_click_property.stop().is_some() {
            self.y_offset = 0.;
        }
        self.stop_haptics();
        self.is_haptic_play_once = true;

        let dir = if step > 0 {
            ScrollDirection::Up
        } else {
            ScrollDirection::Down
        };
        let distance = (self.mid_distance(dir) * step.unsigned_abs() as f64).abs();
        let to = if step > 0 { -distance } else { distance };

        self.y_last = 0.;
        self.around_click_property.set(0.);
        let anim = Animation::new(
            self.clock.clone(),
            0.,
            to,
            0.,
            self.options.animations.around_click.0,
        );
        self.around_click_property.animate(anim);
    }

    /// Steps the index with the up and down keys, returns whether the key was handled.
    pub fn handle_direction_key(&mut self, key: DirectionKey) -> bool {
        match key {
            DirectionKey::Up => {
                self.inner_handle_scroll(false, false, false);
                true
            }
            DirectionKey::Down => {
                self.inner_handle_scroll(true, false, false);
                true
            }
            DirectionKey::Left | DirectionKey::Right => false,
        }
    }

    /// Accessibility scroll action, steps once and animates the jump back to rest.
    pub fn accessibility_scroll(&mut self, forward: bool) -> bool {
        if !self.animation_created || !self.can_move(forward) {
            return false;
        }

        self.inner_handle_scroll(forward, true, false);

        let jump = self.options.jump_interval;
        let from = if forward { -jump } else { jump };
        self.animate_scroll(from, 0.);

        if let Some(host) = &mut self.host {
            host.accessibility_event(AccessibilityEvent::ScrollEnd);
        }
        true
    }

    pub fn handle_crown_begin(&mut self) {
        if self.toss.is_playing() {
            self.is_toss_status = false;
        }
        self.toss.set_start(0.);
        self.y_last = 0.;
        self.pressed = true;

        self.interrupt_animations();
    }

    pub fn handle_crown_update(&mut self, angular_velocity: f64, degree: f64) {
        self.main_velocity = angular_velocity;
        self.animation_break = false;
        if !self.pressed {
            return;
        }

        let px = crown_rotate_px(angular_velocity, degree, self.options.crown_sensitivity);
        let offset_y = self.y_last + px;
        if (offset_y - self.y_last).abs() <= MOVE_THRESHOLD {
            return;
        }

        self.toss.set_end(offset_y);
        self.update_column_child_position(offset_y);
    }

    pub fn handle_crown_end(&mut self, angular_velocity: f64) {
        self.main_velocity = angular_velocity;
        self.pressed = false;
        self.y_offset = 0.;
        self.y_last = 0.;

        if !self.animation_created {
            self.scroll_option(0.);
            return;
        }

        self.play_settle_animation();
        self.stop_haptics();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crown_tiers() {
        let medium = CrownSensitivity::Medium;
        assert_eq!(crown_rotate_px(100., 10., medium), 5.);
        assert_eq!(crown_rotate_px(-500., 10., medium), 10.);
        assert_eq!(crown_rotate_px(5000., -10., medium), -15.);
        assert_eq!(crown_rotate_px(500., 10., CrownSensitivity::Low), 6.);
        assert_eq!(crown_rotate_px(500., 10., CrownSensitivity::High), 14.);
    }

    #[test]
    fn input_events_decode_from_json() {
        let events: Vec<InputEvent> = serde_json::from_str(
            r#"[
                {"type": "drag-start", "y": 100},
                {"type": "drag-move", "y": 80},
                {"type": "drag-move", "y": 60, "velocity": -1200, "fingers": 2},
                {"type": "drag-end", "velocity": null},
                {"type": "key", "key": "down"},
                {"type": "crown-update", "angular_velocity": 300, "degree": 4}
            ]"#,
        )
        .unwrap();

        assert_eq!(events[0], InputEvent::DragStart { y: 100. });
        assert_eq!(events[1], InputEvent::DragMove(DragMove::new(80.)));
        assert_eq!(
            events[2],
            InputEvent::DragMove(DragMove {
                y: 60.,
                velocity: Some(-1200.),
                fingers: 2,
            })
        );
        assert_eq!(events[3], InputEvent::DragEnd { velocity: None });
        assert_eq!(
            events[4],
            InputEvent::Key {
                key: DirectionKey::Down
            }
        );
        assert_eq!(
            events[5],
            InputEvent::CrownUpdate {
                angular_velocity: 300.,
                degree: 4.
            }
        );
    }
}
