use std::str::FromStr;

use knuffel::errors::DecodeError;
use miette::{miette, IntoDiagnostic as _};

use crate::FloatOrInt;

/// RGBA color in [0, 1] with unpremultiplied alpha.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Fully transparent black, the "no color" value used at the edges of the slot window.
    pub const TRANSPARENT: Color = Color::new_unpremul(0., 0., 0., 0.);

    pub const fn new_unpremul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8_unpremul(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_array_unpremul([r, g, b, a].map(|x| x as f32 / 255.))
    }

    pub const fn from_array_unpremul([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array_unpremul(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Per-channel linear blend, `t = 0` is `self`, `t = 1` is `to`.
    pub fn lerp(self, to: Color, t: f64) -> Color {
        let t = t as f32;
        let [r1, g1, b1, a1] = self.to_array_unpremul();
        let [r2, g2, b2, a2] = to.to_array_unpremul();
        Color {
            r: r1 + (r2 - r1) * t,
            g: g1 + (g2 - g1) * t,
            b: b1 + (b2 - b1) * t,
            a: a1 + (a2 - a1) * t,
        }
    }
}

impl FromStr for Color {
    type Err = miette::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let color = csscolorparser::parse(s)
            .into_diagnostic()?
            .clamp()
            .to_array();
        Ok(Self::from_array_unpremul(color))
    }
}

impl<S> knuffel::Decode<S> for Color
where
    S: knuffel::traits::ErrorSpan,
{
    fn decode_node(
        node: &knuffel::ast::SpannedNode<S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        let s: String = crate::utils::parse_arg_node("color", node, ctx)?;
        match Color::from_str(&s) {
            Ok(color) => Ok(color),
            Err(err) => {
                ctx.emit_error(DecodeError::conversion(node, err));
                Ok(Color::default())
            }
        }
    }
}

/// CSS-style numeric font weight, 100 to 900.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const LIGHTER: FontWeight = FontWeight(300);
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const BOLD: FontWeight = FontWeight(700);
    pub const BOLDER: FontWeight = FontWeight(900);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl FromStr for FontWeight {
    type Err = miette::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lighter" => Ok(Self::LIGHTER),
            "normal" | "regular" => Ok(Self::NORMAL),
            "medium" => Ok(Self::MEDIUM),
            "bold" => Ok(Self::BOLD),
            "bolder" => Ok(Self::BOLDER),
            _ => {
                let value: u16 = s.parse().map_err(|_| {
                    miette!(
                        "invalid font weight, can be lighter, normal, regular, medium, \
                         bold, bolder or a number from 100 to 900"
                    )
                })?;
                if value % 100 != 0 || !(100..=900).contains(&value) {
                    return Err(miette!("numeric font weight must be 100, 200, ..., 900"));
                }
                Ok(Self(value))
            }
        }
    }
}

/// Style of one visual tier of option text.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    #[knuffel(child, unwrap(argument))]
    pub font_size: FloatOrInt<1, 1024>,
    #[knuffel(child, unwrap(argument, str), default)]
    pub font_weight: FontWeight,
    #[knuffel(child)]
    pub color: Color,
}

impl TextStyle {
    pub fn new(font_size: f64, font_weight: FontWeight, color: Color) -> Self {
        Self {
            font_size: FloatOrInt(font_size),
            font_weight,
            color,
        }
    }
}
