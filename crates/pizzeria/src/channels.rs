// Channel wrappers the kitchen and the counter talk through.
//
// Both ends hold their crossbeam half in an `Option` so closing is explicit and
// observable: a closed end answers every call with `ChannelError::Closed`.

use crossbeam::channel;
use thiserror::Error;

pub type ChannelResult<T> = std::result::Result<T, ChannelError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("Channel has been closed or not initialized")]
    Closed,

    #[error("Failed to send message due to: {0}")]
    SendFailed(String),

    #[error("Channel sent nothing, possibly closed")]
    ReceivedNoData,
}

/// Creates a zero-capacity channel: a send completes only when a receiver
/// takes the item at the same moment.
pub fn rendezvous<T>() -> (SendChannel<T>, ReceiveChannel<T>) {
    let (tx, rx) = channel::bounded::<T>(0);
    (SendChannel::new(tx), ReceiveChannel::new(rx))
}

/// Creates a channel with room for exactly one value, used as a reply slot
/// that the replying side can fill without waiting for the asker.
pub fn reply_slot<T>() -> (SendChannel<T>, ReceiveChannel<T>) {
    let (tx, rx) = channel::bounded::<T>(1);
    (SendChannel::new(tx), ReceiveChannel::new(rx))
}

/// What happened to an item offered with [`SendChannel::offer_or`].
#[derive(Debug, PartialEq, Eq)]
pub enum Offer<C> {
    /// A receiver took the item.
    Delivered,

    /// A control message arrived first; the item was dropped.
    Interrupted(C),

    /// Every receiver of the item channel is gone.
    ReceiverGone,

    /// Every sender of the control channel is gone.
    ControlGone,
}

pub struct SendChannel<T> {
    src: Option<channel::Sender<T>>,
}

impl<T> SendChannel<T> {
    fn new(src: channel::Sender<T>) -> Self {
        Self { src: Some(src) }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.src.is_none()
    }

    /// # Errors
    ///
    /// Returns [`ChannelError::Closed`] when this end was already closed.
    pub fn close(&mut self) -> ChannelResult<()> {
        match self.src.take() {
            Some(channel) => {
                drop(channel);
                Ok(())
            }
            None => Err(ChannelError::Closed),
        }
    }

    /// Blocks the current thread until a receiver takes `t` or every receiver is gone.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Closed`] for a closed end and
    /// [`ChannelError::SendFailed`] when no receiver is left.
    pub fn block_send(&self, t: T) -> ChannelResult<()> {
        match &self.src {
            Some(src) => src
                .send(t)
                .map_err(|err| ChannelError::SendFailed(err.to_string())),
            None => Err(ChannelError::Closed),
        }
    }

    /// # Errors
    ///
    /// Returns [`ChannelError::SendFailed`] when the channel is full or has
    /// no receiver left, and [`ChannelError::Closed`] for a closed end.
    pub fn try_send(&self, t: T) -> ChannelResult<()> {
        match &self.src {
            Some(src) => src
                .try_send(t)
                .map_err(|err| ChannelError::SendFailed(err.to_string())),
            None => Err(ChannelError::Closed),
        }
    }

    /// Offers `item` on this channel while listening on `control`, blocking until
    /// one of the two is ready. Neither side is preferred: when both are ready the
    /// choice is left to crossbeam's select, which picks at random.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Closed`] when either end was already closed.
    pub fn offer_or<C>(&self, item: T, control: &ReceiveChannel<C>) -> ChannelResult<Offer<C>> {
        let (Some(src), Some(ctrl)) = (&self.src, &control.src) else {
            return Err(ChannelError::Closed);
        };

        crossbeam::select! {
            send(src, item) -> sent => match sent {
                Ok(()) => Ok(Offer::Delivered),
                Err(_) => Ok(Offer::ReceiverGone),
            },
            recv(ctrl) -> message => match message {
                Ok(message) => Ok(Offer::Interrupted(message)),
                Err(_) => Ok(Offer::ControlGone),
            },
        }
    }
}

pub struct ReceiveChannel<T> {
    src: Option<channel::Receiver<T>>,
}

impl<T> ReceiveChannel<T> {
    fn new(src: channel::Receiver<T>) -> Self {
        Self { src: Some(src) }
    }

    /// # Errors
    ///
    /// Returns [`ChannelError::Closed`] once this end has seen the channel close.
    pub fn is_empty(&self) -> ChannelResult<bool> {
        match &self.src {
            None => Err(ChannelError::Closed),
            Some(src) => Ok(src.is_empty()),
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.src.is_none()
    }

    /// Blocks the current thread till data is received or every sender is gone.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Closed`] when every sender is gone and nothing is left.
    pub fn block_receive(&mut self) -> ChannelResult<T> {
        match &self.src {
            None => Err(ChannelError::Closed),
            Some(src) => match src.recv() {
                Ok(item) => Ok(item),
                Err(_) => self.close_channel(),
            },
        }
    }

    /// # Errors
    ///
    /// Returns [`ChannelError::ReceivedNoData`] when nothing is ready and
    /// [`ChannelError::Closed`] when every sender is gone.
    pub fn try_receive(&mut self) -> ChannelResult<T> {
        match &self.src {
            None => Err(ChannelError::Closed),
            Some(src) => match src.try_recv() {
                Ok(item) => Ok(item),
                Err(channel::TryRecvError::Disconnected) => self.close_channel(),
                Err(channel::TryRecvError::Empty) => Err(ChannelError::ReceivedNoData),
            },
        }
    }

    fn close_channel(&mut self) -> ChannelResult<T> {
        // remove the channel from the underlying slot
        _ = self.src.take();
        Err(ChannelError::Closed)
    }
}
