use clap::Parser;
use comms::event::User;
use state_store::{Settings, StateStore};
use storage::LocalStorage;
use termination::{create_termination, Interrupted, Terminator};
use ui_management::UiManager;

mod cli;
mod logger;
mod state_store;
mod storage;
mod termination;
mod ui_management;

const DEFAULT_NAME: &str = "Player";

/// Picks up the identity kept from earlier runs, a first run gets a fresh id
fn resolve_self_user(storage: &mut LocalStorage, name: Option<String>) -> anyhow::Result<User> {
    let stored = storage.data();
    let user = User {
        id: stored
            .user_id
            .clone()
            .unwrap_or_else(|| nanoid::nanoid!()),
        name: name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .or_else(|| stored.name.clone())
            .unwrap_or_else(|| DEFAULT_NAME.to_string()),
        life: stored
            .settings
            .as_ref()
            .map(|settings| settings.starting_life)
            .unwrap_or_else(|| Settings::default().starting_life),
    };

    storage.set_identity(&user)?;

    Ok(user)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logger::init(cli.log_file.as_deref())?;

    let mut storage = LocalStorage::open(&cli.storage)?;
    let self_user = resolve_self_user(&mut storage, cli.name)?;
    tracing::info!(user_id = %self_user.id, url = %cli.url, "starting");

    let (terminator, mut interrupt_rx) = create_termination();
    let (state_store, state_rx) = StateStore::new(cli.url, storage);
    let (ui_manager, action_rx) = UiManager::new();

    tokio::try_join!(
        state_store.main_loop(self_user, terminator, action_rx, interrupt_rx.resubscribe()),
        ui_manager.main_loop(state_rx, interrupt_rx.resubscribe()),
    )?;

    if let Ok(reason) = interrupt_rx.recv().await {
        match reason {
            Interrupted::UserInt => println!("exited per user request"),
            Interrupted::OsSigInt => println!("exited because of an os sig int"),
        }
    } else {
        println!("exited because of an unexpected error");
    }

    Ok(())
}
