//! Stoplight firmware for the STM32WL board.
//!
//! Lamps hang off PC6, PC0 and PA8 (pins 12, 14 and 16 on the board) and are
//! lit by pulling the pin low. The user button on PA0 unmounts the stoplight
//! (all lamps dark) and mounts it again from green on the next press.
#![no_std]
#![no_main]

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_futures::join::join;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Level, Output, Pin, Pull, Speed};
use {defmt_rtt as _, panic_probe as _};

use stoplight::*;

static STOP: StopSignal = StopSignal::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_stm32::init(create_stm32_config());
    let config = Config::default();

    let off = Level::from(config.polarity.drives_high(false));
    let mut lamps = Lamps::new(
        Output::new(p.PC6.degrade(), off, Speed::High),
        Output::new(p.PC0.degrade(), off, Speed::High),
        Output::new(p.PA8.degrade(), off, Speed::High),
        config.polarity,
    );
    let mut button = ExtiInput::new(p.PA0, p.EXTI0, Pull::Up);

    if let Some(step) = config.self_test {
        unwrap!(lamps.self_test(step).await);
    }

    let mut cycle = Cycle::new(config.sequence);
    loop {
        info!("stoplight mounted");
        let (result, ()) = join(run(&mut cycle, &mut lamps, &STOP), async {
            wait_for_press(&mut button).await;
            STOP.signal(());
        })
        .await;
        unwrap!(result);

        wait_for_press(&mut button).await;
    }
}

async fn wait_for_press(button: &mut ExtiInput<'_>) {
    button.wait_for_falling_edge().await;
    info!("Button pressed");
    button.wait_for_rising_edge().await;
    info!("Button released");
}
