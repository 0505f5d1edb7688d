// SPDX-License-Identifier: GPL-3.0-only

//! Event loop connecting an input source to the dispatcher.
//!
//! Input producers send [`InputEvent`]s into a bounded channel; a single task
//! drains it, so events reach the dispatcher strictly one after another.

use crate::edit::TextSurface;
use crate::input::InputEvent;
use crate::keyboard::{InputDispatcher, RenderSurface};
use futures::channel::mpsc;
use futures::StreamExt;

/// Creates the channel that feeds [`run_session`].
pub fn event_channel(capacity: usize) -> (mpsc::Sender<InputEvent>, mpsc::Receiver<InputEvent>) {
    mpsc::channel(capacity)
}

/// Drains `events` into `dispatcher`, forwarding every delta to `surface`.
///
/// Returns the number of events handled once all senders are dropped.
pub async fn run_session<T, R>(
    dispatcher: &mut InputDispatcher<T>,
    mut events: mpsc::Receiver<InputEvent>,
    surface: &mut R,
) -> usize
where
    T: TextSurface,
    R: RenderSurface + ?Sized,
{
    let mut handled = 0;
    while let Some(event) = events.next().await {
        let deltas = dispatcher.handle(&event);
        surface.apply_all(&deltas);
        handled += 1;
    }

    tracing::debug!("Input channel closed after {} events", handled);
    handled
}
