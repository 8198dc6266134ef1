//! Pure presentation of the stoplight.
//!
//! [`render`] maps the active color to a [`Panel`] of three indicators. It has
//! no state: equal inputs give equal panels, and every lamp is always present
//! with only its lit/unlit styling differing.

use core::fmt;

use crate::LightColor;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// How a lamp is drawn.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fill: Rgb,
    /// Lit lamps cast a halo in their own color.
    pub glow: bool,
}

impl LightColor {
    pub const fn style(self, lit: bool) -> Style {
        let fill = match (self, lit) {
            (Self::Red, true) => Rgb::new(239, 68, 68),
            (Self::Red, false) => Rgb::new(38, 8, 8),
            (Self::Yellow, true) => Rgb::new(234, 179, 8),
            (Self::Yellow, false) => Rgb::new(34, 24, 6),
            (Self::Green, true) => Rgb::new(34, 197, 94),
            (Self::Green, false) => Rgb::new(6, 25, 13),
        };

        Style { fill, glow: lit }
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub color: LightColor,
    pub label: &'static str,
    pub lit: bool,
    pub style: Style,
}

impl Indicator {
    fn new(color: LightColor, active: LightColor) -> Self {
        let lit = color == active;

        Self {
            color,
            label: color.label(),
            lit,
            style: color.style(lit),
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.lit { "On" } else { "Off" };
        write!(f, "{} ({})", self.label, state)
    }
}

/// The three indicators, top to bottom.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    indicators: [Indicator; 3],
}

impl Panel {
    pub fn indicators(&self) -> &[Indicator; 3] {
        &self.indicators
    }

    pub fn indicator(&self, color: LightColor) -> &Indicator {
        &self.indicators[color.position()]
    }

    /// The lit lamp, if any.
    pub fn lit(&self) -> Option<LightColor> {
        self.indicators.iter().find(|i| i.lit).map(|i| i.color)
    }
}

impl From<LightColor> for Panel {
    fn from(active: LightColor) -> Self {
        render(active)
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, indicator) in self.indicators.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{indicator}")?;
        }

        Ok(())
    }
}

pub fn render(active: LightColor) -> Panel {
    Panel {
        indicators: LightColor::ALL.map(|color| Indicator::new(color, active)),
    }
}
