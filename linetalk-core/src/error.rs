/// Errors the engine surfaces to its caller.
///
/// Framing, validation and dispatch failures are local and deliberately
/// silent (malformed or unmatched input is expected transport noise); only
/// setup and outbound encoding report back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Subscription table is full
    SubscriptionsFull { max: usize },
    /// Outbound message does not fit the caller's buffer
    TxBufferTooSmall { capacity: usize },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::SubscriptionsFull { max } => {
                write!(f, "Subscription table full: max {}", max)
            }
            Error::TxBufferTooSmall { capacity } => {
                write!(f, "Outbound buffer too small: capacity {}", capacity)
            }
        }
    }
}

impl core::error::Error for Error {}
