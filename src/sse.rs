use std::{
    convert::Infallible,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use axum::{
    extract::State,
    http::{HeaderName, HeaderValue},
    response::{
        sse::{Event, Sse},
        IntoResponse,
    },
};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_stream::{wrappers::IntervalStream, StreamExt};
use tracing::debug;

use crate::AppState;

/// Tracks one open event stream; dropping it marks the stream closed.
struct StreamGuard {
    open_streams: Arc<AtomicUsize>,
}

impl StreamGuard {
    fn open(open_streams: Arc<AtomicUsize>) -> Self {
        let now_open = open_streams.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(open_streams = now_open, "SSE stream opened");
        Self { open_streams }
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        let now_open = self.open_streams.fetch_sub(1, Ordering::SeqCst) - 1;
        debug!(open_streams = now_open, "SSE stream closed");
    }
}

/// Emits the manifest once, then a keep-alive comment every interval until the client leaves.
///
/// The keep-alive timer lives inside the response stream, so it is released together with
/// the stream when the connection closes.
pub async fn sse(State(state): State<AppState>) -> impl IntoResponse {
    let guard = StreamGuard::open(state.open_streams.clone());
    let manifest = Event::default()
        .event("manifest")
        .json_data(state.manifest.as_ref())
        .unwrap_or_else(|_| Event::default().event("manifest").data("{}"));

    let period = state.config.sse_keepalive;
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let keepalive = IntervalStream::new(ticker).map(move |_| {
        let _open = &guard;
        Ok::<Event, Infallible>(Event::default().comment("keepalive"))
    });
    let stream = tokio_stream::once(Ok::<Event, Infallible>(manifest)).chain(keepalive);

    (
        [(
            HeaderName::from_static("x-accel-buffering"),
            HeaderValue::from_static("no"),
        )],
        Sse::new(stream),
    )
}
