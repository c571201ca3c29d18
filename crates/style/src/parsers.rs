//! Low-level nom parser functions for CSS color and length values.
//!
//! `parse_color` only accepts the forms the rasterizer can paint directly. The
//! perceptual color functions are recognized separately by `classify_color`, which
//! lets callers decide between converting such a value and replacing it.

use crate::color_space::{lab_to_srgb, lch_to_srgb, oklab_to_srgb, oklch_to_srgb};
use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while1};
use nom::character::complete::{char, digit1, multispace0, multispace1};
use nom::combinator::{map, map_opt, opt, recognize, value};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};
use srsforge_types::Color;
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Color functions the rasterizer cannot sample, longest names first so that
/// `color-mix` is reported instead of `color`.
pub const UNSUPPORTED_COLOR_FUNCTIONS: [&str; 8] =
    ["light-dark", "color-mix", "oklch", "oklab", "color", "hwb", "lab", "lch"];

/// How a raw color value relates to what the rasterizer can paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSupport {
    /// Paintable as-is.
    Supported(Color),
    /// A single perceptual color function with an exact sRGB equivalent.
    Convertible(Color),
    /// Mentions an unsupported function that has no direct conversion.
    Unsupported(&'static str),
    /// Not a color this grammar understands.
    Invalid,
}

// --- Helper Parsers ---

fn ws<'a, O, P>(inner: P) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

fn parse_f32(input: &str) -> IResult<&str, f32> {
    map_opt(
        recognize(pair(
            opt(alt((char('+'), char('-')))),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit1)))),
                recognize(pair(char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f32>().ok(),
    )
    .parse(input)
}

// --- Unit & Length Parsers ---

fn parse_unit(input: &str) -> IResult<&str, f32> {
    alt((
        value(1.0, tag_no_case("pt")),
        value(0.75, tag_no_case("px")),
        value(72.0, tag_no_case("in")),
        value(28.35, tag_no_case("cm")),
        value(2.835, tag_no_case("mm")),
    ))
    .parse(input)
}

/// Parses a length in points with an optional unit (e.g., "12pt", "1in", "10mm").
pub fn parse_length(input: &str) -> IResult<&str, f32> {
    map(pair(parse_f32, opt(parse_unit)), |(v, unit)| v * unit.unwrap_or(1.0)).parse(input)
}

// --- Color function arguments ---

#[derive(Debug, Clone, Copy, PartialEq)]
enum Component {
    Number(f32),
    Percent(f32),
    Degrees(f32),
    None,
}

#[derive(Debug, Clone, Copy)]
enum ComponentUnit {
    Percent,
    Deg,
    Grad,
    Rad,
    Turn,
}

fn parse_component_unit(input: &str) -> IResult<&str, ComponentUnit> {
    alt((
        value(ComponentUnit::Percent, char('%')),
        value(ComponentUnit::Deg, tag_no_case("deg")),
        value(ComponentUnit::Grad, tag_no_case("grad")),
        value(ComponentUnit::Rad, tag_no_case("rad")),
        value(ComponentUnit::Turn, tag_no_case("turn")),
    ))
    .parse(input)
}

fn parse_component(input: &str) -> IResult<&str, Component> {
    alt((
        value(Component::None, tag_no_case("none")),
        map(pair(parse_f32, opt(parse_component_unit)), |(v, unit)| match unit {
            None => Component::Number(v),
            Some(ComponentUnit::Percent) => Component::Percent(v),
            Some(ComponentUnit::Deg) => Component::Degrees(v),
            Some(ComponentUnit::Grad) => Component::Degrees(v * 0.9),
            Some(ComponentUnit::Rad) => Component::Degrees(v.to_degrees()),
            Some(ComponentUnit::Turn) => Component::Degrees(v * 360.0),
        }),
    ))
    .parse(input)
}

fn component_separator(input: &str) -> IResult<&str, ()> {
    alt((value((), delimited(multispace0, char(','), multispace0)), value((), multispace1))).parse(input)
}

struct ColorFunction<'a> {
    name: &'a str,
    components: Vec<Component>,
    alpha: Option<Component>,
}

fn parse_color_function(input: &str) -> IResult<&str, ColorFunction<'_>> {
    map(
        pair(
            take_while1(|c: char| c.is_ascii_alphabetic() || c == '-'),
            delimited(
                ws(char('(')),
                pair(
                    separated_list1(component_separator, parse_component),
                    opt(preceded(ws(char('/')), parse_component)),
                ),
                preceded(multispace0, char(')')),
            ),
        ),
        |(name, (components, alpha))| ColorFunction {
            name,
            components,
            alpha,
        },
    )
    .parse(input)
}

impl ColorFunction<'_> {
    /// Splits out three channels and the alpha, accepting the legacy comma form
    /// where alpha is a fourth component.
    fn channels(&self) -> Option<([Component; 3], f32)> {
        let (channels, alpha) = match (self.components.as_slice(), self.alpha) {
            ([a, b, c], alpha) => ([*a, *b, *c], alpha),
            ([a, b, c, d], None) => ([*a, *b, *c], Some(*d)),
            _ => return None,
        };
        let alpha = match alpha {
            None => 1.0,
            Some(Component::Number(v)) => v,
            Some(Component::Percent(p)) => p / 100.0,
            Some(Component::None) => 0.0,
            Some(Component::Degrees(_)) => return None,
        };
        Some((channels, alpha.clamp(0.0, 1.0)))
    }
}

fn hue_degrees(component: Component) -> Option<f32> {
    match component {
        Component::Number(v) | Component::Degrees(v) => Some(v.rem_euclid(360.0)),
        Component::None => Some(0.0),
        Component::Percent(_) => None,
    }
}

/// Resolves a component as a plain number where `100%` maps to `percent_ref`.
fn scaled(component: Component, percent_ref: f32) -> Option<f32> {
    match component {
        Component::Number(v) => Some(v),
        Component::Percent(p) => Some(p / 100.0 * percent_ref),
        Component::None => Some(0.0),
        Component::Degrees(_) => None,
    }
}

fn rgb_from(function: &ColorFunction) -> Option<Color> {
    let ([r, g, b], alpha) = function.channels()?;
    let channel = |c: Component| scaled(c, 255.0).map(|v| v.clamp(0.0, 255.0).round() as u8);
    Some(Color::rgba(channel(r)?, channel(g)?, channel(b)?, alpha))
}

fn hsl_from(function: &ColorFunction) -> Option<Color> {
    let ([h, s, l], alpha) = function.channels()?;
    let hue = hue_degrees(h)?;
    // Bare numbers are read as percentages, matching modern CSS.
    let fraction = |c: Component| match c {
        Component::Number(v) | Component::Percent(v) => Some((v / 100.0).clamp(0.0, 1.0)),
        Component::None => Some(0.0),
        Component::Degrees(_) => None,
    };
    let (s, l) = (fraction(s)?, fraction(l)?);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let (r1, g1, b1) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    let channel = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
    Some(Color::rgba(channel(r1), channel(g1), channel(b1), alpha))
}

fn perceptual_from(function: &ColorFunction) -> Option<Color> {
    let ([c1, c2, c3], alpha) = function.channels()?;
    match function.name.to_ascii_lowercase().as_str() {
        "oklab" => Some(oklab_to_srgb(scaled(c1, 1.0)?, scaled(c2, 0.4)?, scaled(c3, 0.4)?, alpha)),
        "oklch" => Some(oklch_to_srgb(scaled(c1, 1.0)?, scaled(c2, 0.4)?, hue_degrees(c3)?, alpha)),
        "lab" => Some(lab_to_srgb(scaled(c1, 100.0)?, scaled(c2, 125.0)?, scaled(c3, 125.0)?, alpha)),
        "lch" => Some(lch_to_srgb(scaled(c1, 100.0)?, scaled(c2, 150.0)?, hue_degrees(c3)?, alpha)),
        _ => None,
    }
}

// --- Color Parsers ---

fn hex_digits_to_color(digits: &str) -> Option<Color> {
    let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    match digits.len() {
        3 => Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Color::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)? as f32 / 255.0)),
        6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)? as f32 / 255.0)),
        _ => None,
    }
}

fn parse_hex_color(input: &str) -> IResult<&str, Color> {
    preceded(char('#'), map_opt(take_while1(|c: char| c.is_ascii_hexdigit()), hex_digits_to_color)).parse(input)
}

fn parse_srgb_function(input: &str) -> IResult<&str, Color> {
    map_opt(parse_color_function, |function| match function.name.to_ascii_lowercase().as_str() {
        "rgb" | "rgba" => rgb_from(&function),
        "hsl" | "hsla" => hsl_from(&function),
        _ => None,
    })
    .parse(input)
}

fn parse_perceptual_function(input: &str) -> IResult<&str, Color> {
    map_opt(parse_color_function, |function| perceptual_from(&function)).parse(input)
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("red", Color::rgb(255, 0, 0)),
    ("green", Color::rgb(0, 128, 0)),
    ("lime", Color::rgb(0, 255, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("orange", Color::rgb(255, 165, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("gray", Color::rgb(128, 128, 128)),
    ("grey", Color::rgb(128, 128, 128)),
    ("silver", Color::rgb(192, 192, 192)),
    ("lightgray", Color::rgb(211, 211, 211)),
    ("darkgray", Color::rgb(169, 169, 169)),
    ("maroon", Color::rgb(128, 0, 0)),
    ("navy", Color::rgb(0, 0, 128)),
    ("teal", Color::rgb(0, 128, 128)),
    ("olive", Color::rgb(128, 128, 0)),
    ("aqua", Color::rgb(0, 255, 255)),
    ("fuchsia", Color::rgb(255, 0, 255)),
    ("whitesmoke", Color::rgb(245, 245, 245)),
    ("slategray", Color::rgb(112, 128, 144)),
    ("transparent", Color::TRANSPARENT),
];

fn parse_named_color(input: &str) -> IResult<&str, Color> {
    map_opt(take_while1(|c: char| c.is_ascii_alphabetic()), |name: &str| {
        NAMED_COLORS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, color)| *color)
    })
    .parse(input)
}

/// Parses a color the rasterizer can paint directly: hex, `rgb()`/`rgba()`,
/// `hsl()`/`hsla()`, a named color, or `transparent`.
pub fn parse_color(input: &str) -> IResult<&str, Color> {
    alt((parse_hex_color, parse_srgb_function, parse_named_color)).parse(input)
}

/// Finds the first unsupported color function mentioned anywhere in `value`.
///
/// Matching is case-insensitive and anchored at identifier boundaries, so
/// `oklab(...)` reports `oklab` rather than `lab`, and `label` matches nothing.
pub fn find_unsupported_function(value: &str) -> Option<&'static str> {
    let lowered = value.to_ascii_lowercase();
    let is_ident = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';

    UNSUPPORTED_COLOR_FUNCTIONS.into_iter().find(|name| {
        lowered.match_indices(name).any(|(start, _)| {
            let before = lowered[..start].chars().next_back();
            let after = lowered[start + name.len()..].chars().next();
            !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
        })
    })
}

/// Classifies a raw style value for painting and sanitizing.
pub fn classify_color(value: &str) -> ColorSupport {
    if let Some(function) = find_unsupported_function(value) {
        return match run_parser(parse_perceptual_function, value) {
            Ok(color) => ColorSupport::Convertible(color),
            Err(_) => ColorSupport::Unsupported(function),
        };
    }
    match run_parser(parse_color, value) {
        Ok(color) => ColorSupport::Supported(color),
        Err(_) => ColorSupport::Invalid,
    }
}

/// Helper to run a nom parser and convert its result to a `Result<T, StyleParseError>`.
pub fn run_parser<'a, T, P>(mut parser: P, input: &'a str) -> Result<T, StyleParseError>
where
    P: Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>>,
{
    match parser.parse(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}
