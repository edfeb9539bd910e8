use anyhow::Context;
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{accept_async, tungstenite::Message, WebSocketStream};

use crate::{command, event};

use super::common::{decode_text_frames, encode_text_frame, BoxedStream};

/// [CommandStream] is a stream of [crate::command::UserCommand]s sent by the client
///
/// # Cancel Safety
///
/// This stream is cancel-safe, meaning that it can be used in [tokio::select!]
/// without the risk of missing commands.
pub type CommandStream = BoxedStream<anyhow::Result<command::UserCommand>>;

/// [EventWriter] is the write half of the WebSocket which writes [crate::event::Event]s to the client
pub struct EventWriter {
    sink: SplitSink<WebSocketStream<TcpStream>, Message>,
}

impl EventWriter {
    pub fn new(sink: SplitSink<WebSocketStream<TcpStream>, Message>) -> Self {
        Self { sink }
    }

    /// Send a [crate::event::Event] as a single text frame
    ///
    /// # Cancel Safety
    ///
    /// This method is not cancellation safe. If it is used as the event
    /// in a [tokio::select!] statement and some other
    /// branch completes first, the frame may have been queued but not flushed.
    pub async fn write(&mut self, event: &event::Event) -> anyhow::Result<()> {
        self.sink
            .send(encode_text_frame(event)?)
            .await
            .context("could not write event to the client")?;

        Ok(())
    }

    /// Start the closing handshake with the client
    pub async fn close(&mut self) -> anyhow::Result<()> {
        self.sink.close().await?;

        Ok(())
    }
}

/// Completes the WebSocket handshake on an accepted TCP stream and splits it into a stream of commands and an event writer.
///
/// # Arguments
///
/// - `stream` - A freshly accepted [TcpStream]
pub async fn accept(stream: TcpStream) -> anyhow::Result<(CommandStream, EventWriter)> {
    let socket = accept_async(stream)
        .await
        .context("websocket handshake with the client failed")?;
    let (sink, stream) = socket.split();

    Ok((
        decode_text_frames(stream, "client"),
        EventWriter::new(sink),
    ))
}
