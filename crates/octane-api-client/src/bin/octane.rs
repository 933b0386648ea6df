use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use octane_api_client::{
    is_relative_file_name, ApiClient, ClientConfig, ConfigLoader, Content, ContentData,
    ContentStatus, ContentType, Health, LIBRARY_NAME, LIBRARY_VERSION,
};
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "octane")]
#[command(about = "Share clipboard text and files through an Octane room")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API token, overrides OCTANE_TOKEN
    #[arg(long, global = true)]
    token: Option<String>,

    /// Server origin, e.g. http://localhost:3000
    #[arg(long, global = true)]
    origin: Option<String>,

    /// Path prefix of the API, e.g. /api/v1
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show server health
    Health,
    /// Create a room and print its id
    CreateRoom {
        /// Room name
        name: String,
    },
    /// Show a room and its connected devices
    RoomStatus {
        /// Room id
        id: u64,
    },
    /// Delete a room
    DeleteRoom {
        /// Room id
        id: u64,
    },
    /// Share text as clipboard content
    UploadText {
        /// Room id
        #[arg(short, long)]
        room: u64,

        /// Device name
        #[arg(short, long, default_value = "octane-cli")]
        device: String,

        /// Text to share
        text: String,
    },
    /// Download the content shared in a room
    Download {
        /// Room id
        #[arg(short, long)]
        room: u64,

        /// Device name
        #[arg(short, long, default_value = "octane-cli")]
        device: String,

        /// Where to write files; clipboard text goes to stdout
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();
    debug!("{} {}", LIBRARY_NAME, LIBRARY_VERSION);

    let config = load_config(&cli)?;
    let mut client = ApiClient::new(config).into_result()?;

    match cli.command {
        Commands::Health => {
            let health = client.health().await.into_result()?;
            let label = match health.health {
                Health::Healthy => "healthy",
                Health::Degraded => "degraded",
                Health::Faulty => "faulty",
            };
            match health.message {
                Some(message) => println!("{label}: {message}"),
                None => println!("{label}"),
            }
        }
        Commands::CreateRoom { name } => {
            let response = client.create_room(&name).await.into_result()?;
            println!("{}", response.data.id);
        }
        Commands::RoomStatus { id } => {
            let response = client.get_room_status(Some(id)).await.into_result()?;
            let room = response.data;
            println!("{} ({})", room.name, room.id);
            for device in room.devices {
                println!("  {} (since {})", device.name, device.timestamp);
            }
        }
        Commands::DeleteRoom { id } => {
            client.delete_room(Some(id)).await.into_result()?;
            println!("deleted room {id}");
        }
        Commands::UploadText { room, device, text } => {
            client.connect_room(room, &device).await.into_result()?;
            let content = Content {
                status: ContentStatus {
                    device: device.clone(),
                    timestamp: chrono::Utc::now().timestamp().max(0) as u64,
                    content_type: ContentType::Clipboard,
                    name: None,
                    mime: "text/plain".to_string(),
                },
                data: ContentData::Text(text),
            };
            let uploaded = client.upload_content(&content).await.into_result();
            client.disconnect_room().await.into_result()?;
            uploaded?;
            println!("uploaded to room {room}");
        }
        Commands::Download {
            room,
            device,
            output,
        } => {
            client.connect_room(room, &device).await.into_result()?;
            let downloaded = client.get_content().await.into_result();
            client.disconnect_room().await.into_result()?;
            write_content(downloaded?.data, &output)?;
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_path(path);
    }
    let mut config = loader.load().context("Failed to load configuration")?;

    if let Some(token) = &cli.token {
        config.token = token.clone();
    }
    if let Some(origin) = &cli.origin {
        config.origin = origin.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    config.validate()?;
    Ok(config)
}

fn write_content(content: Content, output: &Path) -> anyhow::Result<()> {
    match content.data {
        ContentData::Text(text) => println!("{text}"),
        ContentData::Binary(data) => {
            let name = content.status.name.unwrap_or_else(|| "file".to_string());
            let path = output_path(output, &name)?;
            std::fs::write(&path, data)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", path.display());
        }
        ContentData::Files(files) => {
            for file in files {
                let path = output_path(output, &file.filename)?;
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, &file.data)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}

/// Join a server-supplied name onto `output`, refusing names that leave it
fn output_path(output: &Path, name: &str) -> anyhow::Result<PathBuf> {
    if !is_relative_file_name(name) {
        anyhow::bail!("Refusing to write {name:?} outside {}", output.display());
    }
    Ok(output.join(name))
}
