use std::str::FromStr;

use miette::miette;

use crate::{Color, FloatOrInt, FontWeight, TextStyle};

#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct Theme {
    /// Visible options, not counting the two buffer slots outside the window.
    #[knuffel(child, unwrap(argument), default = 5)]
    pub show_option_count: u8,
    /// Height of the selected (middle) slot.
    #[knuffel(child, unwrap(argument), default = FloatOrInt(56.))]
    pub divider_spacing: FloatOrInt<1, 65535>,
    /// Height of every other slot.
    #[knuffel(child, unwrap(argument), default = FloatOrInt(40.))]
    pub gradient_height: FloatOrInt<1, 65535>,
    /// Offset the accessibility scroll actions animate back from.
    #[knuffel(child, unwrap(argument), default = FloatOrInt(2.))]
    pub jump_interval: FloatOrInt<0, 65535>,
    #[knuffel(child, default = default_selected())]
    pub selected: TextStyle,
    #[knuffel(child, default = default_candidate())]
    pub candidate: TextStyle,
    #[knuffel(child, default = default_disappear())]
    pub disappear: TextStyle,
    #[knuffel(child, default = default_normal())]
    pub normal: TextStyle,
    #[knuffel(child, default = Color::from_rgba8_unpremul(0, 0, 0, 0x0c))]
    pub hover_color: Color,
    #[knuffel(child, default = Color::from_rgba8_unpremul(0, 0, 0, 0x19))]
    pub press_color: Color,
    #[knuffel(child, default = Color::TRANSPARENT)]
    pub background_color: Color,
    #[knuffel(child, unwrap(argument), default = true)]
    pub haptic_feedback: bool,
    #[knuffel(child, unwrap(argument, str), default)]
    pub crown_sensitivity: CrownSensitivity,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            show_option_count: 5,
            divider_spacing: FloatOrInt(56.),
            gradient_height: FloatOrInt(40.),
            jump_interval: FloatOrInt(2.),
            selected: default_selected(),
            candidate: default_candidate(),
            disappear: default_disappear(),
            normal: default_normal(),
            hover_color: Color::from_rgba8_unpremul(0, 0, 0, 0x0c),
            press_color: Color::from_rgba8_unpremul(0, 0, 0, 0x19),
            background_color: Color::TRANSPARENT,
            haptic_feedback: true,
            crown_sensitivity: CrownSensitivity::default(),
        }
    }
}

fn default_selected() -> TextStyle {
    TextStyle::new(
        20.,
        FontWeight::MEDIUM,
        Color::from_rgba8_unpremul(0x00, 0x7d, 0xff, 0xff),
    )
}

fn default_candidate() -> TextStyle {
    TextStyle::new(
        16.,
        FontWeight::NORMAL,
        Color::from_rgba8_unpremul(0x18, 0x24, 0x31, 0xff),
    )
}

fn default_disappear() -> TextStyle {
    TextStyle::new(
        14.,
        FontWeight::NORMAL,
        Color::from_rgba8_unpremul(0x18, 0x24, 0x31, 0x99),
    )
}

fn default_normal() -> TextStyle {
    TextStyle::new(
        14.,
        FontWeight::NORMAL,
        Color::from_rgba8_unpremul(0x18, 0x24, 0x31, 0x66),
    )
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CrownSensitivity {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for CrownSensitivity {
    type Err = miette::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(miette!(
                r#"invalid crown sensitivity, can be "low", "medium" or "high""#
            )),
        }
    }
}
