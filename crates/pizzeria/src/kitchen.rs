// The kitchen is the producing half of the pizzeria: it makes numbered orders one
// at a time and hands each to the counter, until it is told to stop.

use std::thread;

use pizzeria_config::KitchenConfig;

use crate::channels::{Offer, ReceiveChannel, SendChannel};
use crate::dice::Dice;
use crate::order::{Order, Outcome, Tally};
use crate::pipeline::ShutdownRequest;

pub struct Kitchen<D: Dice> {
    config: KitchenConfig,
    dice: D,
    tally: Tally,
}

impl<D: Dice> Kitchen<D> {
    pub fn new(config: KitchenConfig, dice: D) -> Self {
        Self {
            config,
            dice,
            tally: Tally::default(),
        }
    }

    /// Everything this kitchen has made so far, including an order that was
    /// later abandoned on shutdown.
    #[must_use]
    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Makes the order following `current`, `0` before the first one.
    ///
    /// Past the configured bound no work is done and a terminal sentinel carrying
    /// the out-of-range number is returned instead.
    pub fn produce_next(&mut self, current: u32) -> Order {
        let number = current.saturating_add(1);
        if number > self.config.orders {
            return Order::terminal(number);
        }

        pizzeria_trace::info!(order = number, "Received order #{}!", number);

        let units = self
            .dice
            .delay(self.config.min_delay, self.config.max_delay);
        let delay = self
            .config
            .delay_unit()
            .saturating_mul(u32::try_from(units).unwrap_or(u32::MAX));
        let code = self.dice.outcome_code(self.config.max_outcome_code);

        pizzeria_trace::info!(
            order = number,
            "Making pizza #{}. It will take {} units ({:?})....",
            number,
            units,
            delay
        );
        thread::sleep(delay);

        let outcome = Outcome::from_code(code);
        self.tally.record(outcome);

        pizzeria_trace::debug!(order = number, code, ?outcome, "Pizza #{} is out of the oven", number);
        Order::completed(number, outcome)
    }

    /// The kitchen's main loop, meant to run on its own thread.
    ///
    /// Every order, the terminal sentinel included, is offered on `orders` while
    /// listening on `requests`. A shutdown request that arrives first wins even when
    /// an order was ready: that order is dropped, `orders` is closed and only then
    /// is the request acknowledged. The loop also ends when the counter side of
    /// either channel goes away.
    pub fn run(
        mut self,
        mut orders: SendChannel<Order>,
        requests: &ReceiveChannel<ShutdownRequest>,
    ) -> Tally {
        let mut current = 0;

        loop {
            let order = self.produce_next(current);
            current = order.number();

            match orders.offer_or(order, requests) {
                Ok(Offer::Delivered) => {}
                Ok(Offer::Interrupted(request)) => {
                    if current <= self.config.orders {
                        pizzeria_trace::debug!(
                            order = current,
                            "Abandoning pizza #{} for shutdown",
                            current
                        );
                    }

                    let closed = orders.close().map_err(Into::into);
                    request.acknowledge(closed);
                    break;
                }
                Ok(Offer::ReceiverGone | Offer::ControlGone) => {
                    pizzeria_trace::warn!("Counter went away, closing the kitchen");
                    _ = orders.close();
                    break;
                }
                Err(err) => {
                    pizzeria_trace::error!("Kitchen channels unusable: {}", err);
                    break;
                }
            }
        }

        self.tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::rendezvous;
    use crate::dice::{RandomDice, ScriptedDice};
    use tracing_test::traced_test;

    fn quick_config(orders: u32) -> KitchenConfig {
        KitchenConfig {
            orders,
            delay_unit_ms: 0,
            ..KitchenConfig::default()
        }
    }

    #[test]
    fn should_number_orders_without_gaps_then_return_sentinel() {
        let mut kitchen = Kitchen::new(quick_config(3), ScriptedDice::new([1, 6, 11]));

        let first = kitchen.produce_next(0);
        let second = kitchen.produce_next(first.number());
        let third = kitchen.produce_next(second.number());
        let sentinel = kitchen.produce_next(third.number());

        assert_eq!(
            [first.number(), second.number(), third.number()],
            [1, 2, 3]
        );
        assert!(!first.succeeded());
        assert!(second.succeeded());
        assert!(third.succeeded());

        assert!(sentinel.is_terminal());
        assert_eq!(sentinel.number(), 4);
        assert_eq!(
            kitchen.tally(),
            Tally {
                made: 2,
                failed: 1,
                total: 3
            }
        );
    }

    #[test]
    #[traced_test]
    fn should_log_order_and_delay_in_units() {
        let mut kitchen = Kitchen::new(quick_config(1), ScriptedDice::new([7]));

        let order = kitchen.produce_next(0);

        assert!(order.succeeded());
        assert!(logs_contain("Received order #1!"));
        assert!(logs_contain("Making pizza #1. It will take 0 units (0ns)...."));
    }

    #[test]
    fn should_not_count_sentinels() {
        let mut kitchen = Kitchen::new(quick_config(0), ScriptedDice::default());

        let sentinel = kitchen.produce_next(0);
        let next = kitchen.produce_next(sentinel.number());

        assert!(sentinel.is_terminal());
        assert_eq!(next.number(), 2);
        assert_eq!(kitchen.tally(), Tally::default());
    }

    #[test]
    fn should_keep_tally_balanced_with_random_outcomes() {
        let mut kitchen = Kitchen::new(quick_config(50), RandomDice::seeded(3));

        let mut current = 0;
        for _ in 0..50 {
            current = kitchen.produce_next(current).number();
            let tally = kitchen.tally();
            assert_eq!(tally.made + tally.failed, tally.total);
        }
        assert_eq!(kitchen.tally().total, 50);
    }

    #[test]
    #[ntest::timeout(5000)]
    fn should_stop_when_counter_goes_away() {
        let kitchen = Kitchen::new(quick_config(5), ScriptedDice::default());
        let (orders, receiver) = rendezvous::<Order>();
        let (_requests_sender, requests) = rendezvous::<ShutdownRequest>();

        drop(receiver);
        let tally = kitchen.run(orders, &requests);

        assert_eq!(tally.total, 1);
    }
}
