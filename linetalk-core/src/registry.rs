//! Topic subscription registry
//!
//! Fixed-capacity, append-only table binding exact-match topics to
//! subscriber callbacks. Populated once during setup and scanned linearly on
//! every routed message; with the small capacities this engine runs at, the
//! scan is cheaper than any index would be.

use crate::error::Error;
use crate::payload::Payload;

/// Subscriber callback.
///
/// Invoked synchronously during dispatch with the caller-owned context and a
/// borrowed payload view that does not outlive the call. Callbacks must not
/// block: dispatch runs inside the same cooperative step as the byte feed.
pub type SubscriberFn<C> = fn(&mut C, &Payload<'_>);

/// One topic-to-callback binding.
pub struct Subscription<C> {
    topic: &'static str,
    callback: SubscriberFn<C>,
}

impl<C> Subscription<C> {
    pub fn topic(&self) -> &'static str {
        self.topic
    }
}

/// Fixed-capacity ordered subscription table.
///
/// `MAX_SUBSCRIPTIONS` bounds the table; the reference configuration uses 16.
/// There is no de-registration: the table only grows, and never during
/// dispatch.
pub struct SubscriptionTable<C, const MAX_SUBSCRIPTIONS: usize> {
    entries: heapless::Vec<Subscription<C>, MAX_SUBSCRIPTIONS>,
}

impl<C, const MAX_SUBSCRIPTIONS: usize> SubscriptionTable<C, MAX_SUBSCRIPTIONS> {
    pub const fn new() -> Self {
        Self {
            entries: heapless::Vec::new(),
        }
    }

    /// Append a subscription.
    ///
    /// Fails once the table is full, leaving the existing entries and their
    /// dispatch order untouched.
    pub fn subscribe(
        &mut self,
        topic: &'static str,
        callback: SubscriberFn<C>,
    ) -> Result<(), Error> {
        self.entries
            .push(Subscription { topic, callback })
            .map_err(|_| Error::SubscriptionsFull {
                max: MAX_SUBSCRIPTIONS,
            })
    }

    /// Invoke every subscription whose topic byte-equals `topic`, in
    /// registration order. Returns how many matched.
    pub fn dispatch(&self, topic: &[u8], payload: &Payload<'_>, context: &mut C) -> usize {
        let mut matched = 0;

        for subscription in &self.entries {
            if subscription.topic.as_bytes() == topic {
                (subscription.callback)(context, payload);
                matched += 1;
            }
        }

        matched
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subscription<C>> {
        self.entries.iter()
    }
}

impl<C, const MAX_SUBSCRIPTIONS: usize> Default for SubscriptionTable<C, MAX_SUBSCRIPTIONS> {
    fn default() -> Self {
        Self::new()
    }
}
