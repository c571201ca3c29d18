//! Resolved per-node paint properties.
//!
//! Color channels hold raw CSS values exactly as the presentation layer produced
//! them. They are only parsed at paint time, which is what allows the sanitizer to
//! rewrite them in place beforehand.

use std::fmt;

/// The three color-bearing style properties of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleChannel {
    Color,
    BackgroundColor,
    BorderColor,
}

impl StyleChannel {
    pub const ALL: [StyleChannel; 3] = [
        StyleChannel::Color,
        StyleChannel::BackgroundColor,
        StyleChannel::BorderColor,
    ];

    pub fn css_name(&self) -> &'static str {
        match self {
            StyleChannel::Color => "color",
            StyleChannel::BackgroundColor => "background-color",
            StyleChannel::BorderColor => "border-color",
        }
    }
}

impl fmt::Display for StyleChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComputedStyle {
    /// Foreground (text) color; text paints black when unset.
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    /// Uniform border width in CSS pixels; 0 disables the border.
    pub border_width: f32,
}

impl ComputedStyle {
    pub fn with_color(mut self, value: impl Into<String>) -> Self {
        self.color = Some(value.into());
        self
    }

    pub fn with_background(mut self, value: impl Into<String>) -> Self {
        self.background_color = Some(value.into());
        self
    }

    pub fn with_border(mut self, width: f32, value: impl Into<String>) -> Self {
        self.border_width = width;
        self.border_color = Some(value.into());
        self
    }

    pub fn channel(&self, channel: StyleChannel) -> Option<&str> {
        match channel {
            StyleChannel::Color => self.color.as_deref(),
            StyleChannel::BackgroundColor => self.background_color.as_deref(),
            StyleChannel::BorderColor => self.border_color.as_deref(),
        }
    }

    pub fn set_channel(&mut self, channel: StyleChannel, value: String) {
        let slot = match channel {
            StyleChannel::Color => &mut self.color,
            StyleChannel::BackgroundColor => &mut self.background_color,
            StyleChannel::BorderColor => &mut self.border_color,
        };
        *slot = Some(value);
    }
}
