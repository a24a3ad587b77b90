//! Streaming receiver for the `/v1/receive/{number}` socket.
//!
//! Only available when the server runs in `json-rpc` mode. Each frame is one
//! JSON object; it is decoded once into a generic tree, from which both the
//! typed message and its canonical `raw` form are derived.

use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::connect_async;
use url::Url;

use crate::envelope::ReceivedMessage;
use crate::error::{Error, ReadError, Result};

/// Connect to `url` and forward every received message to `messages`.
///
/// Runs until the socket fails, the server closes it, or a frame does not
/// decode; the socket is closed on the way out. Returns `Ok(())` only when the
/// consumer has dropped its end of the channel.
pub(crate) async fn receive(url: Url, messages: mpsc::Sender<ReceivedMessage>) -> Result<()> {
    tracing::debug!(%url, "Connecting to receive socket");
    let (mut socket, _) = connect_async(url.as_str()).await.map_err(Error::Dial)?;
    tracing::debug!(%url, "Receive socket connected");

    let result = read_frames(&mut socket, &messages).await;

    // The peer may already be gone
    let _ = socket.close(None).await;

    match &result {
        Ok(()) => tracing::debug!("Receive socket closed by consumer"),
        Err(e) => tracing::debug!(error = %e, "Receive socket stopped"),
    }
    result
}

/// Decode frames until the stream ends or fails.
async fn read_frames<S>(frames: &mut S, messages: &mpsc::Sender<ReceivedMessage>) -> Result<()>
where
    S: Stream<Item = std::result::Result<Message, tungstenite::Error>> + Unpin,
{
    while let Some(frame) = frames.next().await {
        let message = match frame.map_err(ReadError::Socket)? {
            Message::Text(text) => decode(text.as_bytes())?,
            Message::Binary(data) => decode(&data)?,
            Message::Close(_) => return Err(ReadError::Closed.into()),
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
        };

        tracing::trace!(raw = %message.raw, "Received message");
        if messages.send(message).await.is_err() {
            return Ok(());
        }
    }

    Err(ReadError::Closed.into())
}

fn decode(frame: &[u8]) -> Result<ReceivedMessage> {
    ReceivedMessage::from_frame(frame).map_err(|e| ReadError::Frame(e).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    type Frame = std::result::Result<Message, tungstenite::Error>;

    async fn run(frames: Vec<Frame>, capacity: usize) -> (Result<()>, Vec<ReceivedMessage>) {
        let (tx, mut rx) = mpsc::channel(capacity);
        let mut frames = stream::iter(frames);
        let result = read_frames(&mut frames, &tx).await;
        drop(tx);

        let mut received = Vec::new();
        while let Some(message) = rx.recv().await {
            received.push(message);
        }
        (result, received)
    }

    fn text(json: &str) -> Frame {
        Ok(Message::text(json))
    }

    #[tokio::test]
    async fn test_delivers_in_order_then_reports_end_of_stream() {
        let (result, received) = run(
            vec![
                text(r#"{"envelope":{"timestamp":1}}"#),
                text(r#"{"envelope":{"timestamp":2}}"#),
                text(r#"{"envelope":{"timestamp":3}}"#),
            ],
            8,
        )
        .await;

        assert!(matches!(result, Err(Error::Read(ReadError::Closed))));
        let timestamps: Vec<_> = received.iter().map(|m| m.envelope.timestamp).collect();
        assert_eq!(timestamps, vec![Some(1), Some(2), Some(3)]);
    }

    #[tokio::test]
    async fn test_stops_at_first_malformed_frame() {
        let (result, received) = run(
            vec![
                text(r#"{"envelope":{"timestamp":1}}"#),
                text("not json"),
                text(r#"{"envelope":{"timestamp":3}}"#),
            ],
            8,
        )
        .await;

        assert!(matches!(result, Err(Error::Read(ReadError::Frame(_)))));
        assert_eq!(received.len(), 1);
    }

    #[tokio::test]
    async fn test_array_frame_is_malformed() {
        let (result, received) = run(
            vec![
                text(r#"{"envelope":{"timestamp":1}}"#),
                text("[]"),
                text(r#"[{"timestamp":5},"+1666"]"#),
            ],
            8,
        )
        .await;

        assert!(matches!(result, Err(Error::Read(ReadError::Frame(_)))));
        assert_eq!(received.len(), 1);
    }

    #[tokio::test]
    async fn test_close_frame_ends_the_loop() {
        let (result, received) = run(
            vec![
                text(r#"{"envelope":{"timestamp":1}}"#),
                Ok(Message::Close(None)),
                text(r#"{"envelope":{"timestamp":2}}"#),
            ],
            8,
        )
        .await;

        assert!(matches!(result, Err(Error::Read(ReadError::Closed))));
        assert_eq!(received.len(), 1);
    }

    #[tokio::test]
    async fn test_socket_error_is_surfaced() {
        let (result, received) = run(
            vec![Err(tungstenite::Error::ConnectionClosed)],
            8,
        )
        .await;

        assert!(matches!(result, Err(Error::Read(ReadError::Socket(_)))));
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn test_control_frames_are_skipped_and_binary_is_decoded() {
        let (result, received) = run(
            vec![
                Ok(Message::Ping(Default::default())),
                Ok(Message::binary(br#"{"account":"+1666"}"#.to_vec())),
                Ok(Message::Pong(Default::default())),
            ],
            8,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].account, "+1666");
        assert_eq!(received[0].raw, r#"{"account":"+1666"}"#);
    }

    #[tokio::test]
    async fn test_dropped_consumer_ends_cleanly() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let mut frames = stream::iter(vec![text(r#"{"envelope":{}}"#)]);

        let result = read_frames(&mut frames, &tx).await;
        assert!(result.is_ok());
    }
}
