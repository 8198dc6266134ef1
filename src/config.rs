use embassy_time::Duration;

use crate::{Polarity, Sequence};

/// Board-independent settings for a stoplight.
#[derive(Debug, Clone, Copy)]
pub struct Config<'s> {
    pub sequence: Sequence<'s>,
    pub polarity: Polarity,
    /// How long each lamp stays lit during the power-up check. `None` skips it.
    pub self_test: Option<Duration>,
}

impl Default for Config<'static> {
    fn default() -> Self {
        Self {
            sequence: Sequence::standard(),
            polarity: Polarity::ActiveLow,
            self_test: Some(Duration::from_secs(1)),
        }
    }
}

/// Clock tree for the STM32WL board: 32 MHz HSE through the PLL to a 48 MHz sysclk.
#[cfg(feature = "stm32")]
pub fn create_stm32_config() -> embassy_stm32::Config {
    use embassy_stm32::{rcc::*, time::Hertz};

    let mut config = embassy_stm32::Config::default();
    config.rcc.hse = Some(Hse {
        freq: Hertz(32_000_000),
        mode: HseMode::Bypass,
        prescaler: HsePrescaler::DIV1,
    });
    config.rcc.sys = Sysclk::PLL1_R;
    config.rcc.pll = Some(Pll {
        source: PllSource::HSE,
        prediv: PllPreDiv::DIV2,
        mul: PllMul::MUL6,
        divp: None,
        divq: Some(PllQDiv::DIV2), // PLL1_Q clock (32 / 2 * 6 / 2), used for RNG
        divr: Some(PllRDiv::DIV2), // sysclk 48Mhz clock (32 / 2 * 6 / 2)
    });

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_board() {
        let config = Config::default();
        assert_eq!(config.sequence, Sequence::standard());
        assert_eq!(config.polarity, Polarity::ActiveLow);
        assert_eq!(config.self_test, Some(Duration::from_secs(1)));
    }
}
