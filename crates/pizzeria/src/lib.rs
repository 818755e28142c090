// Crate implementing a bounded producer/consumer pizzeria.
//
// A kitchen thread makes numbered pizza orders and hands them one at a time to the
// counter over a rendezvous channel. Once the counter has seen the day's orders it
// sends a shutdown request carrying a reply slot; the kitchen closes the order
// channel, then answers. Counts are kept by whoever sees the orders, never shared.

pub mod channels;
pub mod counter;
pub mod dice;
pub mod errors;
pub mod kitchen;
pub mod order;
pub mod pipeline;

pub use counter::{Counter, DayQuality, Summary};
pub use dice::{Dice, RandomDice, ScriptedDice};
pub use errors::{PipelineError, PipelineResult};
pub use kitchen::Kitchen;
pub use order::{Failure, Order, Outcome, Tally};
pub use pipeline::{Pizzeria, ShutdownRequest};

pub use pizzeria_config::KitchenConfig;

/// Runs one full day: opens the pizzeria, drains every order, shuts the kitchen
/// down and returns what the counter saw along with the kitchen's own tally.
///
/// # Errors
///
/// Fails when the kitchen thread can not be started or panicked. A failed
/// shutdown acknowledgement is not an error; it is recorded in
/// [`Summary::shutdown_error`].
pub fn run_day<D: Dice + 'static>(config: KitchenConfig, dice: D) -> PipelineResult<Summary> {
    let mut pizzeria = Pizzeria::open(config, dice)?;

    let mut summary = Counter::new(pizzeria.bound()).drain(&mut pizzeria);
    summary.kitchen = Some(pizzeria.finish()?);

    Ok(summary)
}
