use embassy_time::{Duration, Timer};
use embedded_hal::digital::OutputPin;

use crate::{LightColor, Panel};

/// Electrical level that switches a lamp on.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Lamp driven through a sinking transistor/relay: low means lit.
    #[default]
    ActiveLow,
    ActiveHigh,
}

impl Polarity {
    /// Whether the pin is driven high to put a lamp in the `lit` state.
    pub const fn drives_high(self, lit: bool) -> bool {
        match self {
            Self::ActiveLow => !lit,
            Self::ActiveHigh => lit,
        }
    }
}

/// The three physical lamps.
pub struct Lamps<P> {
    red: P,
    yellow: P,
    green: P,
    polarity: Polarity,
}

impl<P: OutputPin> Lamps<P> {
    pub fn new(red: P, yellow: P, green: P, polarity: Polarity) -> Self {
        Self {
            red,
            yellow,
            green,
            polarity,
        }
    }

    /// Drives every pin to match `panel`.
    pub fn show(&mut self, panel: &Panel) -> Result<(), P::Error> {
        for indicator in panel.indicators() {
            self.set(indicator.color, indicator.lit)?;
        }
        debug!("lamps = {:?}", panel.lit());

        Ok(())
    }

    /// Switches every lamp off.
    pub fn dark(&mut self) -> Result<(), P::Error> {
        for color in LightColor::ALL {
            self.set(color, false)?;
        }

        Ok(())
    }

    /// Power-up lamp check: lights each lamp alone for `step`, then goes dark.
    pub async fn self_test(&mut self, step: Duration) -> Result<(), P::Error> {
        let mut color = LightColor::Red;
        for _ in 0..LightColor::ALL.len() {
            info!("lamp check: {:?}", color);
            self.show(&Panel::from(color))?;
            color.rotate();
            Timer::after(step).await;
        }

        self.dark()
    }

    fn set(&mut self, color: LightColor, lit: bool) -> Result<(), P::Error> {
        let pin = match color {
            LightColor::Red => &mut self.red,
            LightColor::Yellow => &mut self.yellow,
            LightColor::Green => &mut self.green,
        };
        if self.polarity.drives_high(lit) {
            pin.set_high()
        } else {
            pin.set_low()
        }
    }
}
