/// One of the three lamps of the stoplight.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightColor {
    Red,
    Yellow,
    Green,
}

impl LightColor {
    /// All colors, in the top-to-bottom order of the lamp housing.
    pub const ALL: [Self; 3] = [Self::Red, Self::Yellow, Self::Green];

    pub fn rotate(&mut self) {
        *self = match self {
            Self::Red => Self::Yellow,
            Self::Yellow => Self::Green,
            Self::Green => Self::Red,
        };
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Yellow => "Yellow",
            Self::Green => "Green",
        }
    }

    /// Position of the lamp in the housing, counted from the top.
    pub const fn position(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Yellow => 1,
            Self::Green => 2,
        }
    }
}

impl core::fmt::Display for LightColor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
