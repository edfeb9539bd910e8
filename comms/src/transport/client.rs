use anyhow::Context;
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::{command, event};

use super::common::{decode_text_frames, encode_text_frame, BoxedStream};

type ClientSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// [EventStream] is a stream of [crate::event::Event]s sent by the server
///
/// # Cancel Safety
///
/// This stream is cancel-safe, meaning that it can be used in [tokio::select]
/// without the risk of missing events.
pub type EventStream = BoxedStream<anyhow::Result<event::Event>>;

/// [CommandWriter] is the write half of the WebSocket which writes [crate::command::UserCommand]s to the server
pub struct CommandWriter {
    sink: SplitSink<ClientSocket, Message>,
}

impl CommandWriter {
    pub fn new(sink: SplitSink<ClientSocket, Message>) -> Self {
        Self { sink }
    }

    /// Send a [crate::command::UserCommand] as a single text frame
    ///
    /// # Cancel Safety
    ///
    /// This method is not cancellation safe. If it is used as the event
    /// in a [tokio::select!] statement and some other
    /// branch completes first, the frame may have been queued but not flushed.
    pub async fn write(&mut self, command: &command::UserCommand) -> anyhow::Result<()> {
        self.sink
            .send(encode_text_frame(command)?)
            .await
            .context("could not write command to the server")?;

        Ok(())
    }

    /// Start the closing handshake with the server
    pub async fn close(&mut self) -> anyhow::Result<()> {
        self.sink.close().await?;

        Ok(())
    }
}

/// Opens a WebSocket to the server and splits it into a stream of events and a command writer.
///
/// # Arguments
///
/// - `url` - The `ws://` or `wss://` address of the server
pub async fn connect(url: &str) -> anyhow::Result<(EventStream, CommandWriter)> {
    let (socket, _response) = connect_async(url)
        .await
        .with_context(|| format!("could not connect to '{}'", url))?;
    let (sink, stream) = socket.split();

    Ok((
        decode_text_frames(stream, "server"),
        CommandWriter::new(sink),
    ))
}
