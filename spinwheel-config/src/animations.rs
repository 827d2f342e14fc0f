use knuffel::errors::DecodeError;
use knuffel::Decode as _;

use crate::utils::{expect_only_children, parse_arg_node};
use crate::FloatOrInt;

#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct Animations {
    #[knuffel(child)]
    pub off: bool,
    #[knuffel(child, unwrap(argument), default = FloatOrInt(1.))]
    pub slowdown: FloatOrInt<0, { i32::MAX }>,
    #[knuffel(child, default)]
    pub settle: SettleAnim,
    #[knuffel(child, default)]
    pub around_click: AroundClickAnim,
    #[knuffel(child, default)]
    pub hover: HoverAnim,
    #[knuffel(child, default)]
    pub press: PressAnim,
    #[knuffel(child, default)]
    pub toss: TossSpring,
}

impl Default for Animations {
    fn default() -> Self {
        Self {
            off: false,
            slowdown: FloatOrInt(1.),
            settle: Default::default(),
            around_click: Default::default(),
            hover: Default::default(),
            press: Default::default(),
            toss: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub off: bool,
    pub kind: Kind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind {
    Easing(EasingParams),
    Spring(SpringParams),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EasingParams {
    pub duration_ms: u32,
    pub curve: Curve,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    EaseOutExpo,
    FastOutSlowIn,
    Friction,
    Sharp,
    CubicBezier(f64, f64, f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub damping_ratio: f64,
    pub stiffness: u32,
    pub epsilon: f64,
}

/// Snap of the residual sub-slot offset back to 0 after a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleAnim(pub Animation);

impl Default for SettleAnim {
    fn default() -> Self {
        Self(Animation {
            off: false,
            kind: Kind::Easing(EasingParams {
                duration_ms: 300,
                curve: Curve::FastOutSlowIn,
            }),
        })
    }
}

/// Scroll to a tapped non-middle option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AroundClickAnim(pub Animation);

impl Default for AroundClickAnim {
    fn default() -> Self {
        Self(Animation {
            off: false,
            kind: Kind::Easing(EasingParams {
                duration_ms: 300,
                curve: Curve::FastOutSlowIn,
            }),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverAnim(pub Animation);

impl Default for HoverAnim {
    fn default() -> Self {
        Self(Animation {
            off: false,
            kind: Kind::Easing(EasingParams {
                duration_ms: 250,
                curve: Curve::Friction,
            }),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressAnim(pub Animation);

impl Default for PressAnim {
    fn default() -> Self {
        Self(Animation {
            off: false,
            kind: Kind::Easing(EasingParams {
                duration_ms: 100,
                curve: Curve::Sharp,
            }),
        })
    }
}

/// Raw coefficients of the inertial toss spring.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct TossSpring {
    #[knuffel(child, unwrap(argument), default = FloatOrInt(1.))]
    pub mass: FloatOrInt<0, 1000>,
    #[knuffel(child, unwrap(argument), default = FloatOrInt(20.))]
    pub stiffness: FloatOrInt<0, 100000>,
    #[knuffel(child, unwrap(argument), default = FloatOrInt(10.))]
    pub damping: FloatOrInt<0, 100000>,
    /// Upper bound of the release speed, in px per ms.
    #[knuffel(child, unwrap(argument), default = FloatOrInt(5.))]
    pub max_velocity: FloatOrInt<0, 1000>,
}

impl Default for TossSpring {
    fn default() -> Self {
        Self {
            mass: FloatOrInt(1.),
            stiffness: FloatOrInt(20.),
            damping: FloatOrInt(10.),
            max_velocity: FloatOrInt(5.),
        }
    }
}

impl<S> knuffel::Decode<S> for SettleAnim
where
    S: knuffel::traits::ErrorSpan,
{
    fn decode_node(
        node: &knuffel::ast::SpannedNode<S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        let default = Self::default().0;
        Ok(Self(Animation::decode_node(node, ctx, default)?))
    }
}

impl<S> knuffel::Decode<S> for AroundClickAnim
where
    S: knuffel::traits::ErrorSpan,
{
    fn decode_node(
        node: &knuffel::ast::SpannedNode<S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        let default = Self::default().0;
        Ok(Self(Animation::decode_node(node, ctx, default)?))
    }
}

impl<S> knuffel::Decode<S> for HoverAnim
where
    S: knuffel::traits::ErrorSpan,
{
    fn decode_node(
        node: &knuffel::ast::SpannedNode<S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        let default = Self::default().0;
        Ok(Self(Animation::decode_node(node, ctx, default)?))
    }
}

impl<S> knuffel::Decode<S> for PressAnim
where
    S: knuffel::traits::ErrorSpan,
{
    fn decode_node(
        node: &knuffel::ast::SpannedNode<S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        let default = Self::default().0;
        Ok(Self(Animation::decode_node(node, ctx, default)?))
    }
}

impl Animation {
    pub fn new_off() -> Self {
        Self {
            off: true,
            kind: Kind::Easing(EasingParams {
                duration_ms: 0,
                curve: Curve::Linear,
            }),
        }
    }

    fn decode_node<S: knuffel::traits::ErrorSpan>(
        node: &knuffel::ast::SpannedNode<S>,
        ctx: &mut knuffel::decode::Context<S>,
        default: Self,
    ) -> Result<Self, DecodeError<S>> {
        #[derive(Default, PartialEq)]
        struct OptionalEasingParams {
            duration_ms: Option<u32>,
            curve: Option<Curve>,
        }

        expect_only_children(node, ctx);

        let mut off = false;
        let mut easing_params = OptionalEasingParams::default();
        let mut spring_params = None;

        for child in node.children() {
            match &**child.node_name {
                "off" => {
                    knuffel::decode::check_flag_node(child, ctx);
                    if off {
                        ctx.emit_error(DecodeError::unexpected(
                            &child.node_name,
                            "node",
                            "duplicate node `off`, single node expected",
                        ));
                    } else {
                        off = true;
                    }
                }
                "spring" => {
                    if easing_params != OptionalEasingParams::default() {
                        ctx.emit_error(DecodeError::unexpected(
                            child,
                            "node",
                            "cannot set both spring and easing parameters at once",
                        ));
                    }
                    if spring_params.is_some() {
                        ctx.emit_error(DecodeError::unexpected(
                            &child.node_name,
                            "node",
                            "duplicate node `spring`, single node expected",
                        ));
                    }

                    spring_params = Some(SpringParams::decode_node(child, ctx)?);
                }
                "duration-ms" => {
                    if spring_params.is_some() {
                        ctx.emit_error(DecodeError::unexpected(
                            child,
                            "node",
                            "cannot set both spring and easing parameters at once",
                        ));
                    }
                    if easing_params.duration_ms.is_some() {
                        ctx.emit_error(DecodeError::unexpected(
                            &child.node_name,
                            "node",
                            "duplicate node `duration-ms`, single node expected",
                        ));
                    }

                    easing_params.duration_ms = Some(parse_arg_node("duration-ms", child, ctx)?);
                }
                "curve" => {
                    if spring_params.is_some() {
                        ctx.emit_error(DecodeError::unexpected(
                            child,
                            "node",
                            "cannot set both spring and easing parameters at once",
                        ));
                    }
                    if easing_params.curve.is_some() {
                        ctx.emit_error(DecodeError::unexpected(
                            &child.node_name,
                            "node",
                            "duplicate node `curve`, single node expected",
                        ));
                    }

                    easing_params.curve = decode_curve(child, ctx)?;
                }
                name_str => {
                    ctx.emit_error(DecodeError::unexpected(
                        child,
                        "node",
                        format!("unexpected node `{}`", name_str.escape_default()),
                    ));
                }
            }
        }

        let kind = if let Some(spring_params) = spring_params {
            Kind::Spring(spring_params)
        } else if easing_params == OptionalEasingParams::default() {
            default.kind
        } else {
            let default = if let Kind::Easing(easing) = default.kind {
                easing
            } else {
                EasingParams {
                    duration_ms: 300,
                    curve: Curve::FastOutSlowIn,
                }
            };

            Kind::Easing(EasingParams {
                duration_ms: easing_params.duration_ms.unwrap_or(default.duration_ms),
                curve: easing_params.curve.unwrap_or(default.curve),
            })
        };

        Ok(Self { off, kind })
    }
}

fn decode_curve<S: knuffel::traits::ErrorSpan>(
    child: &knuffel::ast::SpannedNode<S>,
    ctx: &mut knuffel::decode::Context<S>,
) -> Result<Option<Curve>, DecodeError<S>> {
    let mut iter_args = child.arguments.iter();
    let val = iter_args
        .next()
        .ok_or_else(|| DecodeError::missing(child, "additional argument `curve` is required"))?;
    let name: String = knuffel::traits::DecodeScalar::decode(val, ctx)?;

    let curve = match name.as_str() {
        "linear" => Some(Curve::Linear),
        "ease-out-quad" => Some(Curve::EaseOutQuad),
        "ease-out-cubic" => Some(Curve::EaseOutCubic),
        "ease-out-expo" => Some(Curve::EaseOutExpo),
        "fast-out-slow-in" => Some(Curve::FastOutSlowIn),
        "friction" => Some(Curve::Friction),
        "sharp" => Some(Curve::Sharp),
        "cubic-bezier" => {
            let mut coord = |what: &str| -> Result<f64, DecodeError<S>> {
                let val = iter_args.next().ok_or_else(|| {
                    DecodeError::missing(
                        child,
                        format!("missing {what} coordinate for cubic Bézier curve control point"),
                    )
                })?;
                if what.starts_with('x') {
                    // The X axis is time, it must stay within [0, 1].
                    let x: FloatOrInt<0, 1> = knuffel::traits::DecodeScalar::decode(val, ctx)?;
                    Ok(x.0)
                } else {
                    let y: FloatOrInt<{ i32::MIN }, { i32::MAX }> =
                        knuffel::traits::DecodeScalar::decode(val, ctx)?;
                    Ok(y.0)
                }
            };
            let x1 = coord("x1")?;
            let y1 = coord("y1")?;
            let x2 = coord("x2")?;
            let y2 = coord("y2")?;
            Some(Curve::CubicBezier(x1, y1, x2, y2))
        }
        unexpected => {
            ctx.emit_error(DecodeError::unexpected(
                &val.literal,
                "argument",
                format!(
                    "unexpected animation curve `{unexpected}`. Supported curves are \
                     `linear`, `ease-out-quad`, `ease-out-cubic`, `ease-out-expo`, \
                     `fast-out-slow-in`, `friction`, `sharp` and `cubic-bezier`."
                ),
            ));
            None
        }
    };

    if let Some(val) = iter_args.next() {
        ctx.emit_error(DecodeError::unexpected(
            &val.literal,
            "argument",
            "unexpected argument",
        ));
    }
    for name in child.properties.keys() {
        ctx.emit_error(DecodeError::unexpected(
            name,
            "property",
            format!("unexpected property `{}`", name.escape_default()),
        ));
    }
    for child in child.children() {
        ctx.emit_error(DecodeError::unexpected(
            child,
            "node",
            format!("unexpected node `{}`", child.node_name.escape_default()),
        ));
    }

    Ok(curve)
}

impl<S> knuffel::Decode<S> for SpringParams
where
    S: knuffel::traits::ErrorSpan,
{
    fn decode_node(
        node: &knuffel::ast::SpannedNode<S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        if let Some(type_name) = &node.type_name {
            ctx.emit_error(DecodeError::unexpected(
                type_name,
                "type name",
                "no type name expected for this node",
            ));
        }
        if let Some(val) = node.arguments.first() {
            ctx.emit_error(DecodeError::unexpected(
                &val.literal,
                "argument",
                "unexpected argument",
            ));
        }
        for child in node.children() {
            ctx.emit_error(DecodeError::unexpected(
                child,
                "node",
                format!("unexpected node `{}`", child.node_name.escape_default()),
            ));
        }

        let mut damping_ratio = None;
        let mut stiffness = None;
        let mut epsilon = None;
        for (name, val) in &node.properties {
            match &***name {
                "damping-ratio" => {
                    damping_ratio = Some(knuffel::traits::DecodeScalar::decode(val, ctx)?);
                }
                "stiffness" => {
                    stiffness = Some(knuffel::traits::DecodeScalar::decode(val, ctx)?);
                }
                "epsilon" => {
                    epsilon = Some(knuffel::traits::DecodeScalar::decode(val, ctx)?);
                }
                name_str => {
                    ctx.emit_error(DecodeError::unexpected(
                        name,
                        "property",
                        format!("unexpected property `{}`", name_str.escape_default()),
                    ));
                }
            }
        }
        let damping_ratio = damping_ratio
            .ok_or_else(|| DecodeError::missing(node, "property `damping-ratio` is required"))?;
        let stiffness = stiffness
            .ok_or_else(|| DecodeError::missing(node, "property `stiffness` is required"))?;
        let epsilon =
            epsilon.ok_or_else(|| DecodeError::missing(node, "property `epsilon` is required"))?;

        if !(0.1..=10.).contains(&damping_ratio) {
            ctx.emit_error(DecodeError::conversion(
                node,
                "damping-ratio must be between 0.1 and 10.0",
            ));
        }
        if stiffness < 1 {
            ctx.emit_error(DecodeError::conversion(node, "stiffness must be >= 1"));
        }
        if !(0.00001..=0.1).contains(&epsilon) {
            ctx.emit_error(DecodeError::conversion(
                node,
                "epsilon must be between 0.00001 and 0.1",
            ));
        }

        Ok(SpringParams {
            damping_ratio,
            stiffness,
            epsilon,
        })
    }
}
