use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use server::room_manager::{LifeRoomMetadata, RoomManagerBuilder};
use tokio::{
    net::TcpListener,
    signal::unix::{signal, SignalKind},
    sync::broadcast,
};

mod cli;
mod logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logger::init(cli.log);

    let room_manager = Arc::new(
        cli.rooms
            .iter()
            .enumerate()
            .fold(RoomManagerBuilder::new(), |builder, (idx, name)| {
                builder.create_room(LifeRoomMetadata::new(
                    &format!("room-{}", idx + 1),
                    name,
                    None,
                    true,
                ))
            })
            .build(),
    );

    let mut interrupt =
        signal(SignalKind::interrupt()).context("failed to create interrupt signal stream")?;
    let listener = TcpListener::bind(&cli.addr)
        .await
        .with_context(|| format!("could not bind to '{}'", cli.addr))?;
    let (quit_tx, quit_rx) = broadcast::channel::<()>(1);

    tokio::spawn(async move {
        interrupt.recv().await;
        let _ = quit_tx.send(());
    });

    tracing::info!("listening on {}", cli.addr);

    server::serve(listener, room_manager, quit_rx).await
}
