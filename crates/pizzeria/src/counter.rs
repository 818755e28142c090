// The counter is the consuming half: it takes orders from the kitchen, tells the
// customer how each one went and closes the shop once the day's orders are in.

use crate::order::{Order, Tally};
use crate::pipeline::Pizzeria;

/// How the day went, judged on the number of failed pizzas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DayQuality {
    Awful,
    NotVeryGood,
    Okay,
    PrettyGood,
    Great,
}

impl DayQuality {
    #[must_use]
    pub fn from_failures(failed: u32) -> Self {
        match failed {
            10.. => DayQuality::Awful,
            6.. => DayQuality::NotVeryGood,
            4.. => DayQuality::Okay,
            2.. => DayQuality::PrettyGood,
            _ => DayQuality::Great,
        }
    }

    #[must_use]
    pub fn verdict(self) -> &'static str {
        match self {
            DayQuality::Awful => "It was an awful day...",
            DayQuality::NotVeryGood => "It was not a very good day...",
            DayQuality::Okay => "It was an okay day....",
            DayQuality::PrettyGood => "It was a pretty good day!",
            DayQuality::Great => "It was a great day!",
        }
    }
}

/// What the counter saw over one day.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    /// Counted from the orders the counter received.
    pub tally: Tally,

    /// Every in-bound order received, in the order it arrived.
    pub delivered: Vec<Order>,

    /// Set when the kitchen acknowledged shutdown with a failure.
    pub shutdown_error: Option<String>,

    /// What the kitchen reports having made, abandoned orders included.
    pub kitchen: Option<Tally>,
}

impl Summary {
    #[must_use]
    pub fn quality(&self) -> DayQuality {
        DayQuality::from_failures(self.tally.failed)
    }

    /// Logs the end-of-day report.
    pub fn report(&self) {
        pizzeria_trace::info!("-----------------");
        pizzeria_trace::info!("Done for the day.");
        pizzeria_trace::info!(
            made = self.tally.made,
            failed = self.tally.failed,
            total = self.tally.total,
            "We made {} pizzas, but failed to make {}, with {} attempts in total.",
            self.tally.made,
            self.tally.failed,
            self.tally.total
        );

        let quality = self.quality();
        match quality {
            DayQuality::Awful | DayQuality::NotVeryGood => {
                pizzeria_trace::warn!("{}", quality.verdict());
            }
            DayQuality::Okay | DayQuality::PrettyGood | DayQuality::Great => {
                pizzeria_trace::info!("{}", quality.verdict());
            }
        }
    }
}

/// Drains orders from a [`Pizzeria`] until the bound is reached.
pub struct Counter {
    bound: u32,
    summary: Summary,
    closing: bool,
}

impl Counter {
    #[must_use]
    pub fn new(bound: u32) -> Self {
        Self {
            bound,
            summary: Summary::default(),
            closing: false,
        }
    }

    /// Receives orders until the kitchen closes the order channel.
    ///
    /// Shutdown is requested as soon as `bound` in-bound orders have arrived;
    /// a terminal sentinel seen earlier is also taken as the cue to close.
    pub fn drain(mut self, pizzeria: &mut Pizzeria) -> Summary {
        if self.bound == 0 {
            self.close_shop(pizzeria);
        }

        while let Ok(order) = pizzeria.orders().block_receive() {
            if order.is_terminal() || order.number() > self.bound {
                pizzeria_trace::debug!(order = order.number(), "Kitchen has no more work");
                if !self.closing {
                    self.close_shop(pizzeria);
                }
                continue;
            }

            self.receive(order);
            if self.summary.tally.total >= self.bound && !self.closing {
                self.close_shop(pizzeria);
            }
        }

        self.summary
    }

    fn receive(&mut self, order: Order) {
        if order.succeeded() {
            pizzeria_trace::info!(order = order.number(), "{}", order.message());
            pizzeria_trace::info!(
                order = order.number(),
                "Order #{} is out for delivery!",
                order.number()
            );
        } else {
            pizzeria_trace::warn!(order = order.number(), "{}", order.message());
            pizzeria_trace::warn!(order = order.number(), "The customer is really mad!");
        }

        self.summary.tally.record_order(&order);
        self.summary.delivered.push(order);
    }

    fn close_shop(&mut self, pizzeria: &mut Pizzeria) {
        self.closing = true;
        pizzeria_trace::info!("Done making pizzas...");

        if let Err(err) = pizzeria.request_shutdown() {
            pizzeria_trace::error!("*** Error closing channel! {}", err);
            self.summary.shutdown_error = Some(err.to_string());
        }
    }
}
