use std::error::Error;
use std::sync::Arc;

use chat_room::common::{RoomCommand, User};
use chat_room::config;
use chat_room::session::{RoomController, RoomWorker, chat_title};
use chat_room::storage::{self, MessageStore, SqliteStore};
use chat_room::ui::ChatApp;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(
    name = "chat_room",
    version,
    about = "Chat room with reactions, edit and delete"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// SQLite database file (overrides the config)
    #[arg(long, value_name = "PATH")]
    db: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create demo users and a demo chat
    Seed,
    /// List chats, optionally only those a user takes part in
    Chats {
        #[arg(long)]
        user: Option<String>,
    },
    /// Open a chat room window
    Open {
        #[arg(long)]
        chat: String,
        #[arg(long)]
        user: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config);
    let database_path = cli
        .db
        .clone()
        .unwrap_or_else(|| app_config.database_path.clone());

    storage::ensure_data_dir(&database_path)?;
    let store = Arc::new(SqliteStore::open(&database_path)?);
    log::info!("Using database {database_path}");

    match cli.command {
        Command::Seed => seed_demo(&store).await?,
        Command::Chats { user } => {
            let user = user.or_else(|| app_config.current_user.clone());
            list_chats(store.as_ref(), user.as_deref()).await?;
        }
        Command::Open { chat, user } => {
            let user = user
                .or_else(|| app_config.current_user.clone())
                .ok_or("no user given; pass --user or set current_user in the config")?;
            config::persist_current_user(&cli.config, &user);
            run_room(store, chat, user, &app_config.window_title)?;
        }
    }

    Ok(())
}

async fn seed_demo(store: &SqliteStore) -> Result<(), Box<dyn Error>> {
    let users = [("alice", "Alice"), ("bob", "Bob"), ("carol", "Carol")];
    for (id, name) in users {
        store
            .upsert_user(User {
                id: id.to_string(),
                name: name.to_string(),
                avatar_ref: None,
            })
            .await?;
    }

    let chat = store
        .create_chat(&["alice".to_string(), "bob".to_string()])
        .await?;
    store.send_message(&chat.id, "hi", "bob").await?;

    log::info!("Seeded demo chat {}", chat.id);
    println!("{}", chat.id);
    Ok(())
}

async fn list_chats<S>(store: &S, user: Option<&str>) -> Result<(), Box<dyn Error>>
where
    S: MessageStore + ?Sized,
{
    let users = store.load_users().await?;
    let chats = store.load_chats().await?;

    for chat in chats
        .iter()
        .filter(|chat| user.is_none_or(|user| chat.has_participant(user)))
    {
        println!(
            "{}  {}  ({} messages)",
            chat.id,
            chat_title(chat, &users, user.unwrap_or_default()),
            chat.messages.len()
        );
    }
    Ok(())
}

fn run_room(
    store: Arc<SqliteStore>,
    chat_id: String,
    user_id: String,
    window_title: &str,
) -> Result<(), eframe::Error> {
    // Window -> room worker
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // Room worker -> window
    let (event_tx, event_rx) = mpsc::channel(100);

    let controller = RoomController::new(store, user_id);
    tokio::spawn(RoomWorker::new(controller, cmd_rx, event_tx).run());

    if let Err(err) = cmd_tx.try_send(RoomCommand::Open(chat_id.clone())) {
        log::error!("Failed to open chat {chat_id}: {err}");
    }

    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);

    eframe::run_native(
        window_title,
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .ok_or("room window was already created")?;

            log::info!("Room window opened for chat {chat_id}");
            Ok(Box::new(ChatApp::new(cc, cmd_tx.clone(), event_receiver)))
        }),
    )
}
