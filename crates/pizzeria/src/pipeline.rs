// The pizzeria wires a kitchen thread to its caller: one rendezvous channel for
// orders and one for shutdown requests, each request carrying its own reply slot.

use std::thread;

use pizzeria_config::KitchenConfig;

use crate::channels::{self, ChannelError, ReceiveChannel, SendChannel};
use crate::dice::Dice;
use crate::errors::{PipelineError, PipelineResult};
use crate::kitchen::Kitchen;
use crate::order::{Order, Tally};

/// A request for the kitchen to stop, handed over together with the single-use
/// slot the kitchen answers on.
pub struct ShutdownRequest {
    reply: SendChannel<PipelineResult<()>>,
}

impl ShutdownRequest {
    pub(crate) fn new() -> (Self, ReceiveChannel<PipelineResult<()>>) {
        let (reply, waiter) = channels::reply_slot();
        (Self { reply }, waiter)
    }

    /// Answers the request and closes the reply slot.
    ///
    /// Success is signalled by closing the slot without a value; a failure is
    /// placed in the slot first.
    pub fn acknowledge(mut self, result: PipelineResult<()>) {
        if let Err(err) = result {
            if let Err(failed) = self.reply.try_send(Err(err)) {
                pizzeria_trace::error!("Unable to report shutdown failure: {}", failed);
            }
        }
        _ = self.reply.close();
    }
}

/// Handle on a running pizzeria: the kitchen thread plus the channels to it.
pub struct Pizzeria {
    bound: u32,
    orders: ReceiveChannel<Order>,
    requests: SendChannel<ShutdownRequest>,
    kitchen: Option<thread::JoinHandle<Tally>>,
}

impl Pizzeria {
    /// Starts the kitchen on its own thread and returns the handle to talk to it.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::SpawnFailed`] when the thread can not be started.
    pub fn open<D: Dice + 'static>(config: KitchenConfig, dice: D) -> PipelineResult<Self> {
        let bound = config.orders;
        let (order_sender, orders) = channels::rendezvous::<Order>();
        let (requests, request_receiver) = channels::rendezvous::<ShutdownRequest>();

        let kitchen = Kitchen::new(config, dice);
        let handle = thread::Builder::new()
            .name(String::from("pizzeria-kitchen"))
            .spawn(move || kitchen.run(order_sender, &request_receiver))?;

        pizzeria_trace::debug!(bound, "Kitchen started");

        Ok(Self {
            bound,
            orders,
            requests,
            kitchen: Some(handle),
        })
    }

    /// Number of orders the kitchen makes before it runs out of work.
    #[must_use]
    pub fn bound(&self) -> u32 {
        self.bound
    }

    pub fn orders(&mut self) -> &mut ReceiveChannel<Order> {
        &mut self.orders
    }

    /// Asks the kitchen to stop and blocks until it has acknowledged.
    ///
    /// When this returns `Ok`, the order channel is already closed. Calling it
    /// again once the kitchen has stopped fails fast.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::GeneratorGone`] when the kitchen is no longer
    /// running, or whatever failure the kitchen placed in the reply slot.
    pub fn request_shutdown(&mut self) -> PipelineResult<()> {
        let (request, mut waiter) = ShutdownRequest::new();

        if self.requests.block_send(request).is_err() {
            return Err(PipelineError::GeneratorGone);
        }

        match waiter.block_receive() {
            Ok(result) => result,
            Err(ChannelError::Closed) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Waits for the kitchen thread to end and returns what it made.
    ///
    /// The thread only ends after a shutdown or once this side's channels are
    /// gone, so call [`Pizzeria::request_shutdown`] first.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::GeneratorPanicked`] when the kitchen thread panicked.
    pub fn finish(mut self) -> PipelineResult<Tally> {
        match self.kitchen.take() {
            Some(handle) => handle.join().map_err(|_| PipelineError::GeneratorPanicked),
            None => Err(PipelineError::GeneratorGone),
        }
    }
}
