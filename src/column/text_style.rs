use spinwheel_config::{Color, FontWeight, TextStyle};

/// Scroll fraction of the slot height after which the font weight switches to the target.
const FONT_WEIGHT_SWITCH: f64 = 0.5;

/// Resolved text style of one slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotStyle {
    pub font_size: f64,
    pub font_weight: FontWeight,
    pub color: Color,
}

impl From<TextStyle> for SlotStyle {
    fn from(style: TextStyle) -> Self {
        Self {
            font_size: style.font_size.0,
            font_weight: style.font_weight,
            color: style.color,
        }
    }
}

/// Style of a slot at rest together with the styles of its neighbours.
///
/// A slot scrolling up turns into its upper neighbour's style, scrolling down into its lower
/// neighbour's.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextProperties {
    pub up_font_size: f64,
    pub font_size: f64,
    pub down_font_size: f64,
    pub up_color: Color,
    pub color: Color,
    pub down_color: Color,
    pub up_font_weight: FontWeight,
    pub font_weight: FontWeight,
    pub down_font_weight: FontWeight,
}

impl Default for TextProperties {
    fn default() -> Self {
        Self {
            up_font_size: 0.,
            font_size: 0.,
            down_font_size: 0.,
            up_color: Color::TRANSPARENT,
            color: Color::TRANSPARENT,
            down_color: Color::TRANSPARENT,
            up_font_weight: FontWeight::NORMAL,
            font_weight: FontWeight::NORMAL,
            down_font_weight: FontWeight::NORMAL,
        }
    }
}

impl TextProperties {
    fn current(&self) -> SlotStyle {
        SlotStyle {
            font_size: self.font_size,
            font_weight: self.font_weight,
            color: self.color,
        }
    }

    fn copy_sizes_and_colors(&mut self, from: &TextProperties) {
        self.up_font_size = from.up_font_size;
        self.font_size = from.font_size;
        self.down_font_size = from.down_font_size;
        self.up_color = from.up_color;
        self.color = from.color;
        self.down_color = from.down_color;
    }
}

/// Interpolates between two font sizes, `percent` is the fraction of the shift distance
/// travelled.
pub fn linear_font_size(start: f64, end: f64, percent: f64) -> f64 {
    if percent > 1. {
        start + (end - start)
    } else {
        start + (end - start) * percent.abs()
    }
}

/// Transition endpoints of every visible slot, in slot order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyleTable {
    props: Vec<TextProperties>,
}

impl TextStyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.props.clear();
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TextProperties> {
        self.props.get(index)
    }

    /// Appends the next slot, linking it with the previous one.
    pub fn push(&mut self, style: SlotStyle) {
        let mut props = TextProperties {
            font_size: style.font_size,
            color: style.color,
            font_weight: style.font_weight,
            ..Default::default()
        };

        if let Some(prev) = self.props.last_mut() {
            props.up_font_size = prev.font_size;
            prev.down_font_size = props.font_size;

            props.up_color = prev.color;
            prev.down_color = props.color;

            props.up_font_weight = prev.font_weight;
            prev.down_font_weight = props.font_weight;
        }

        self.props.push(props);
    }

    /// Shifts the table by one slot after the index stepped without a rebuild.
    ///
    /// The slot scrolling in at the edge starts at half size and half opacity against an empty
    /// neighbour.
    pub fn shift(&mut self, is_down: bool) {
        let len = self.props.len();
        if len == 0 {
            return;
        }

        if is_down {
            for i in 1..len {
                let next = self.props[i];
                self.props[i - 1].copy_sizes_and_colors(&next);
            }

            let last = &mut self.props[len - 1];
            last.up_font_size = last.font_size;
            last.font_size *= 0.5;
            last.down_font_size = 0.;
            last.up_color = last.color;
            last.color = Color::TRANSPARENT.lerp(last.color, 0.5);
            last.down_color = Color::TRANSPARENT;
        } else {
            for i in (1..len).rev() {
                let prev = self.props[i - 1];
                self.props[i].copy_sizes_and_colors(&prev);
            }

            let first = &mut self.props[0];
            first.up_font_size = 0.;
            first.down_font_size = first.font_size;
            first.font_size *= 0.5;
            first.up_color = Color::TRANSPARENT;
            first.down_color = first.color;
            first.color = Color::TRANSPARENT.lerp(first.color, 0.5);
        }
    }

    /// Style of slot `index` while the column is scrolled by `scroll_delta`.
    ///
    /// `distance_percent` is the scrolled fraction of the shift distance and `scale` the
    /// scrolled fraction of the middle slot height.
    pub fn interpolate(
        &self,
        index: usize,
        scroll_delta: f64,
        distance_percent: f64,
        scale: f64,
    ) -> Option<SlotStyle> {
        let props = self.props.get(index)?;
        let start = props.current();

        // Slots leaving the window keep their style.
        let is_down = scroll_delta < 0.;
        if (index == 0 && is_down) || (index + 1 == self.props.len() && !is_down) {
            return Some(start);
        }

        let (end_size, end_color, end_weight) = if scroll_delta > 0. {
            (props.down_font_size, props.down_color, props.down_font_weight)
        } else {
            (props.up_font_size, props.up_color, props.up_font_weight)
        };

        Some(SlotStyle {
            font_size: linear_font_size(start.font_size, end_size, distance_percent),
            font_weight: if scale >= FONT_WEIGHT_SWITCH {
                end_weight
            } else {
                start.font_weight
            },
            color: start.color.lerp(end_color, distance_percent.clamp(0., 1.)),
        })
    }

    /// Style of slot `index` at rest.
    pub fn resting(&self, index: usize) -> Option<SlotStyle> {
        self.props.get(index).map(TextProperties::current)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn style(font_size: f64, alpha: f32) -> SlotStyle {
        SlotStyle {
            font_size,
            font_weight: FontWeight::NORMAL,
            color: Color::new_unpremul(0., 0., 0., alpha),
        }
    }

    fn five_tiers() -> TextStyleTable {
        let mut table = TextStyleTable::new();
        for s in [14., 16., 20., 16., 14.] {
            table.push(style(s, (s / 20.) as f32));
        }
        table
    }

    #[test]
    fn linear_font_size_clamps_past_full_shift() {
        assert_eq!(linear_font_size(16., 20., 0.5), 18.);
        assert_eq!(linear_font_size(16., 20., -0.5), 18.);
        assert_eq!(linear_font_size(16., 20., 1.7), 20.);
        assert_eq!(linear_font_size(16., 20., 0.), 16.);
    }

    #[test]
    fn push_links_neighbours() {
        let table = five_tiers();
        let mid = table.get(2).unwrap();
        assert_eq!(mid.up_font_size, 16.);
        assert_eq!(mid.font_size, 20.);
        assert_eq!(mid.down_font_size, 16.);

        let first = table.get(0).unwrap();
        assert_eq!(first.up_font_size, 0.);
        assert_eq!(first.down_font_size, 16.);
        assert_eq!(table.get(4).unwrap().down_font_size, 0.);
    }

    #[test]
    fn interpolation_moves_towards_neighbour() {
        let table = five_tiers();

        // Scrolling down by half a shift, the middle slot shrinks towards its lower neighbour.
        let s = table.interpolate(2, 30., 0.5, 0.4).unwrap();
        assert_eq!(s.font_size, 18.);
        assert_abs_diff_eq!(s.color.a, 0.9, epsilon = 1e-6);
        assert_eq!(s.font_weight, FontWeight::NORMAL);

        // The candidate above grows into the selected style.
        let s = table.interpolate(1, 30., 0.5, 0.4).unwrap();
        assert_eq!(s.font_size, 18.);
    }

    #[test]
    fn font_weight_switches_at_half_slot() {
        let mut table = TextStyleTable::new();
        table.push(SlotStyle {
            font_weight: FontWeight::NORMAL,
            ..style(16., 1.)
        });
        table.push(SlotStyle {
            font_weight: FontWeight::MEDIUM,
            ..style(20., 1.)
        });
        table.push(style(16., 1.));

        let before = table.interpolate(0, 20., 0.4, 0.49).unwrap();
        assert_eq!(before.font_weight, FontWeight::NORMAL);
        let after = table.interpolate(0, 20., 0.6, 0.5).unwrap();
        assert_eq!(after.font_weight, FontWeight::MEDIUM);
    }

    #[test]
    fn leaving_slots_keep_their_style() {
        let table = five_tiers();
        assert_eq!(table.interpolate(0, -30., 0.5, 0.5), table.resting(0));
        assert_eq!(table.interpolate(4, 30., 0.5, 0.5), table.resting(4));
        assert_ne!(table.interpolate(4, -30., 0.5, 0.5), table.resting(4));
    }

    #[test]
    fn shift_down_moves_styles_and_halves_the_edge() {
        let mut table = five_tiers();
        table.shift(true);

        assert_eq!(table.get(0).unwrap().font_size, 16.);
        assert_eq!(table.get(1).unwrap().font_size, 20.);
        assert_eq!(table.get(3).unwrap().font_size, 14.);

        let last = table.get(4).unwrap();
        assert_eq!(last.up_font_size, 14.);
        assert_eq!(last.font_size, 7.);
        assert_eq!(last.down_font_size, 0.);
        assert_eq!(last.down_color, Color::TRANSPARENT);
        assert_abs_diff_eq!(last.color.a, 0.35, epsilon = 1e-6);
    }

    #[test]
    fn shift_up_mirrors() {
        let mut table = five_tiers();
        table.shift(false);

        assert_eq!(table.get(4).unwrap().font_size, 16.);
        assert_eq!(table.get(2).unwrap().font_size, 16.);

        let first = table.get(0).unwrap();
        assert_eq!(first.up_font_size, 0.);
        assert_eq!(first.down_font_size, 14.);
        assert_eq!(first.font_size, 7.);
        assert_eq!(first.up_color, Color::TRANSPARENT);
    }
}
