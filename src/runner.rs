use embassy_futures::select::{select, Either};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{Instant, Timer};
use embedded_hal::digital::OutputPin;

use crate::{Cycle, Lamps};

/// Teardown handle for [`run`]. Signal it to unmount the stoplight.
pub type StopSignal = Signal<CriticalSectionRawMutex, ()>;

/// Mounts `cycle` on `lamps` and keeps it cycling until `stop` is signalled.
///
/// The only pending timer is the cycle's deadline, raced against `stop`. `stop`
/// is polled first, so a stop that is already signalled wins over a deadline
/// that has also passed. On stop the pending transition is cancelled before the
/// lamps are darkened, so no transition can land on a torn-down stoplight.
pub async fn run<P: OutputPin>(
    cycle: &mut Cycle<'_>,
    lamps: &mut Lamps<P>,
    stop: &StopSignal,
) -> Result<(), P::Error> {
    cycle.start(Instant::now());
    lamps.show(&cycle.render())?;

    while let Some(deadline) = cycle.deadline() {
        match select(stop.wait(), Timer::at(deadline)).await {
            Either::First(()) => {
                cycle.stop();
                lamps.dark()?;
                info!("stoplight unmounted");
                break;
            }
            Either::Second(()) => {
                if cycle.poll(Instant::now()) {
                    lamps.show(&cycle.render())?;
                }
            }
        }
    }

    Ok(())
}
