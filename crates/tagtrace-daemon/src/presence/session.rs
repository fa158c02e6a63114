//! Live viewer sessions
//!
//! One recompute-and-diff routine driven by two trigger sources: change
//! signal arrival and a wall-clock tick. The tick exists because presence
//! entries expire out of the window purely by elapsed time, with no event to
//! announce it.

use super::view::{reader_view, PresenceSettings};
use crate::bus::{ChangeBus, ChangeSubscription};
use chrono::Utc;
use futures_util::stream::{self, Stream};
use std::sync::Arc;
use tagtrace_registry::Registry;
use tagtrace_types::{ReaderId, ReaderView};
use tokio::time::{Instant, Interval, MissedTickBehavior};

struct SessionState {
    registry: Arc<dyn Registry>,
    settings: PresenceSettings,
    reader_id: ReaderId,
    subscription: ChangeSubscription,
    ticker: Interval,
    last: Option<ReaderView>,
}

/// Stream of changed `ReaderView`s for one viewer session.
///
/// Emits the current view immediately on subscription, then only when a
/// recomputation differs from the last emitted view. The stream ends when
/// the reader is deleted or the bus shuts down; dropping it releases the
/// subscription. Transient registry failures are logged and retried on the
/// next wake-up.
pub fn live_view_stream(
    registry: Arc<dyn Registry>,
    bus: &ChangeBus,
    settings: PresenceSettings,
    reader_id: ReaderId,
) -> impl Stream<Item = ReaderView> + Send {
    // Subscribe before the initial snapshot: a detection landing in between
    // is then seen either by the snapshot or by the first wake-up.
    let subscription = bus.subscribe();

    let mut ticker = tokio::time::interval_at(
        Instant::now() + settings.recompute_interval,
        settings.recompute_interval,
    );
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let state = SessionState {
        registry,
        settings,
        reader_id,
        subscription,
        ticker,
        last: None,
    };

    stream::unfold(state, |mut s| async move {
        loop {
            // Initial emission: do not wait for a first trigger.
            if s.last.is_none() {
                match reader_view(s.registry.as_ref(), &s.reader_id, &s.settings, Utc::now())
                    .await
                {
                    Ok(Some(view)) => {
                        s.last = Some(view.clone());
                        return Some((view, s));
                    }
                    Ok(None) => return None,
                    Err(error) => {
                        tracing::warn!(
                            reader_id = %s.reader_id,
                            error = %error,
                            "Initial presence query failed, retrying on next wake-up"
                        );
                    }
                }
            }

            tokio::select! {
                _ = s.ticker.tick() => {}
                signal = s.subscription.changed() => {
                    if signal.is_none() {
                        // Bus gone: the daemon is shutting down.
                        return None;
                    }
                }
            }

            match reader_view(s.registry.as_ref(), &s.reader_id, &s.settings, Utc::now()).await
            {
                Ok(Some(view)) => {
                    if s.last.as_ref() != Some(&view) {
                        s.last = Some(view.clone());
                        return Some((view, s));
                    }
                }
                Ok(None) => {
                    tracing::debug!(reader_id = %s.reader_id, "Reader gone, ending session");
                    return None;
                }
                Err(error) => {
                    tracing::warn!(
                        reader_id = %s.reader_id,
                        error = %error,
                        "Presence query failed, keeping session"
                    );
                }
            }
        }
    })
}
