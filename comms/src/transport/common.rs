use std::pin::Pin;

use anyhow::Context;
use futures_util::{future, Stream, StreamExt};
use serde::{de::DeserializeOwned, Serialize};
use tokio_tungstenite::tungstenite::{self, Message};

pub type BoxedStream<Item> = Pin<Box<dyn Stream<Item = Item> + Send>>;

/// Serializes a message into a single JSON text frame
pub fn encode_text_frame<T: Serialize>(message: &T) -> anyhow::Result<Message> {
    Ok(Message::Text(serde_json::to_string(message)?))
}

/// Turns the read half of a socket into a stream of decoded messages.
///
/// Control frames are skipped and the stream ends with the close frame.
/// Read failures and undecodable text frames are yielded as errors, `peer` names the other side in them.
pub fn decode_text_frames<T, S>(reader: S, peer: &'static str) -> BoxedStream<anyhow::Result<T>>
where
    T: DeserializeOwned + Send + 'static,
    S: Stream<Item = Result<Message, tungstenite::Error>> + Send + 'static,
{
    Box::pin(reader.filter_map(move |frame| {
        future::ready(match frame {
            Ok(Message::Text(text)) => Some(
                serde_json::from_str::<T>(&text)
                    .with_context(|| format!("failed to deserialize message from the {}", peer)),
            ),
            Ok(_) => None,
            Err(err) => Some(Err(
                anyhow::Error::new(err).context(format!("could not read frame from the {}", peer))
            )),
        })
    }))
}
