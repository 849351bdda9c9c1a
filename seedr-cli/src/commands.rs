//! CLI command implementations

use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use clap::Subcommand;
use seedr_core::{
    Credentials, FolderContents, ItemKind, Login, PolledItem, Seedr, SeedrConfig, SeedrError,
    Token, TorrentTarget, wait_for_torrent,
};
use tracing::debug;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Log in and print a session token for --token / SEEDR_TOKEN
    Login {
        /// Use the device code flow instead of SEEDR_EMAIL / SEEDR_PASSWORD
        #[arg(long)]
        device: bool,
    },
    #[command(flatten)]
    Client(ClientCommand),
}

/// Commands that run against an authenticated client
#[derive(Subcommand)]
pub enum ClientCommand {
    /// Show account settings
    Settings,
    /// Show storage and bandwidth usage
    Bandwidth,
    /// List a folder (root when omitted)
    Ls {
        /// Folder id
        folder: Option<u64>,
    },
    /// Create a folder in the root
    Mkdir {
        /// Folder name
        name: String,
    },
    /// Delete a folder, file or torrent
    Rm {
        /// Item kind: folder, file or torrent
        kind: ItemKind,
        /// Item id
        id: u64,
    },
    /// Add a torrent by magnet link
    Add {
        /// Magnet link
        magnet: String,
        /// Target folder id
        #[arg(long)]
        folder: Option<u64>,
        /// Wait until the torrent shows up in the listing
        #[arg(long)]
        wait: bool,
    },
    /// List linked devices
    Devices,
    /// Search stored files and folders
    Search {
        /// Search query
        query: String,
    },
    /// Print a download URL for a file
    Fetch {
        /// File id
        file_id: u64,
    },
    /// Rename a file or folder
    Rename {
        /// Item kind: folder or file
        kind: ItemKind,
        /// Item id
        id: u64,
        /// New name
        name: String,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns the error of whichever API call fails
pub async fn handle_command(command: Commands, token: Option<String>) -> anyhow::Result<()> {
    let config = SeedrConfig::from_env();

    let command = match command {
        Commands::Login { device } => return login(&config, device).await,
        Commands::Client(command) => command,
    };

    let seedr = connect(&config, token.as_deref()).await?;
    let result = match command {
        ClientCommand::Settings => show_settings(&seedr).await,
        ClientCommand::Bandwidth => show_bandwidth(&seedr).await,
        ClientCommand::Ls { folder } => list_folder(&seedr, folder.unwrap_or(0)).await,
        ClientCommand::Mkdir { name } => make_folder(&seedr, &name).await,
        ClientCommand::Rm { kind, id } => remove_item(&seedr, kind, id).await,
        ClientCommand::Add {
            magnet,
            folder,
            wait,
        } => add_torrent(&seedr, &config, &magnet, folder, wait).await,
        ClientCommand::Devices => list_devices(&seedr).await,
        ClientCommand::Search { query } => search(&seedr, &query).await,
        ClientCommand::Fetch { file_id } => fetch(&seedr, file_id).await,
        ClientCommand::Rename { kind, id, name } => rename(&seedr, kind, id, &name).await,
    };

    seedr.close();
    result
}

/// Builds a client from `--token`, or logs in with environment credentials.
async fn connect(config: &SeedrConfig, token: Option<&str>) -> anyhow::Result<Seedr> {
    let token = match token {
        Some(encoded) => {
            debug!("Using session token from --token");
            Token::decode(encoded)?
        }
        None => {
            debug!("No session token given, logging in with environment credentials");
            let credentials = Credentials::from_env().context(
                "no --token given and SEEDR_EMAIL / SEEDR_PASSWORD are not set; run `seedr login`",
            )?;
            let mut login = Login::new(config, credentials)?;
            login.authorize().await?;
            login
                .into_token()
                .context("login succeeded without a token")?
        }
    };

    Ok(Seedr::new(config, token)?)
}

async fn login(config: &SeedrConfig, device: bool) -> anyhow::Result<()> {
    let token = if device {
        device_login(config).await?
    } else {
        let credentials =
            Credentials::from_env().context("SEEDR_EMAIL and SEEDR_PASSWORD must be set")?;
        let mut login = Login::new(config, credentials)?;
        login.authorize().await?;
        login
            .into_token()
            .context("login succeeded without a token")?
    };

    println!("{}", token.encode());
    Ok(())
}

/// Waits for the user to approve the device code in a browser.
async fn device_login(config: &SeedrConfig) -> anyhow::Result<Token> {
    let mut login = Login::for_device(config)?;
    let code = login.get_device_code().await?;

    eprintln!("Open {} and enter code {}", code.verification_url, code.user_code);

    let interval = Duration::from_secs(code.interval.max(1));
    let deadline = Instant::now() + Duration::from_secs(code.expires_in.max(60));

    loop {
        match login.authorize_device(&code.device_code).await {
            Ok(_) => break,
            Err(SeedrError::AuthenticationFailed { .. }) if Instant::now() < deadline => {
                tokio::time::sleep(interval).await;
            }
            Err(e) => return Err(e.into()),
        }
    }

    login
        .into_token()
        .context("device authorization returned no token")
}

async fn show_settings(seedr: &Seedr) -> anyhow::Result<()> {
    let settings = seedr.get_settings().await?;
    let account = &settings.account;

    println!("Account Settings");
    println!("{:-<60}", "");
    println!("Username: {}", account.username);
    println!("Email: {}", account.email);
    println!("User id: {}", account.user_id);
    println!(
        "Plan: {}",
        account
            .package_name
            .as_deref()
            .unwrap_or(if account.premium { "premium" } else { "free" })
    );
    if let Some(country) = &settings.country {
        println!("Country: {country}");
    }
    Ok(())
}

async fn show_bandwidth(seedr: &Seedr) -> anyhow::Result<()> {
    let quota = seedr.get_memory_bandwidth().await?;

    println!(
        "Space: {} / {} ({} free)",
        format_size(quota.space_used),
        format_size(quota.space_max),
        format_size(quota.space_free())
    );
    println!(
        "Bandwidth: {} / {}",
        format_size(quota.bandwidth_used),
        format_size(quota.bandwidth_max)
    );
    Ok(())
}

async fn list_folder(seedr: &Seedr, folder_id: u64) -> anyhow::Result<()> {
    let contents = seedr.list_folder(folder_id).await?;
    print_contents(&contents);
    Ok(())
}

async fn make_folder(seedr: &Seedr, name: &str) -> anyhow::Result<()> {
    let result = seedr.add_folder(name).await?;
    if !result.result {
        bail!(
            "folder '{name}' was not created: {}",
            result.error.unwrap_or_default()
        );
    }
    println!("Created folder: {name}");
    Ok(())
}

async fn remove_item(seedr: &Seedr, kind: ItemKind, id: u64) -> anyhow::Result<()> {
    seedr.delete_item(id, kind).await?;
    println!("Deleted {kind} {id}");
    Ok(())
}

async fn add_torrent(
    seedr: &Seedr,
    config: &SeedrConfig,
    magnet: &str,
    folder: Option<u64>,
    wait: bool,
) -> anyhow::Result<()> {
    let before = if wait {
        Some(seedr.list_contents().await?)
    } else {
        None
    };

    let response = seedr.add_torrent_to(magnet, folder).await?;
    if !response.result {
        bail!(
            "torrent was not added: {}",
            response.error.unwrap_or_default()
        );
    }

    println!("Added torrent: {}", response.title);
    println!("  Info hash: {}", response.torrent_hash);

    if let Some(before) = before {
        let target = TorrentTarget::from_added(&response).ignoring_folders(&before);
        match wait_for_torrent(seedr, &target, &config.poll).await? {
            PolledItem::Torrent(torrent) => {
                println!("  Downloading: {:.1}% (torrent {})", torrent.progress, torrent.id);
            }
            PolledItem::Folder(folder) => {
                println!("  Completed into folder {} ({})", folder.id, folder.name);
            }
        }
    }
    Ok(())
}

async fn list_devices(seedr: &Seedr) -> anyhow::Result<()> {
    let response = seedr.get_devices().await?;

    if response.devices.is_empty() {
        println!("No linked devices.");
    }
    for device in &response.devices {
        println!("{} ({})", device.client_name, device.client_id);
    }
    Ok(())
}

async fn search(seedr: &Seedr, query: &str) -> anyhow::Result<()> {
    let contents = seedr.search_files(query).await?;
    print_contents(&contents);
    Ok(())
}

async fn fetch(seedr: &Seedr, file_id: u64) -> anyhow::Result<()> {
    let file = seedr.fetch_file(file_id).await?;
    if !file.result {
        bail!("file {file_id} could not be fetched");
    }
    println!("{}", file.url);
    Ok(())
}

async fn rename(seedr: &Seedr, kind: ItemKind, id: u64, name: &str) -> anyhow::Result<()> {
    let result = match kind {
        ItemKind::Folder => seedr.rename_folder(id, name).await?,
        ItemKind::File => seedr.rename_file(id, name).await?,
        ItemKind::Torrent => bail!("torrents cannot be renamed"),
    };

    if !result.result {
        bail!("{kind} {id} was not renamed");
    }
    println!("Renamed {kind} {id} to {name}");
    Ok(())
}

fn print_contents(contents: &FolderContents) {
    println!("{:<6} {:>10} {:>10}  NAME", "KIND", "ID", "SIZE");
    println!("{:-<60}", "");

    for folder in &contents.folders {
        println!(
            "{:<6} {:>10} {:>10}  {}",
            "folder",
            folder.id,
            format_size(folder.size),
            folder.name
        );
    }
    for file in &contents.files {
        println!(
            "{:<6} {:>10} {:>10}  {}",
            "file",
            file.id,
            format_size(file.size),
            file.name
        );
    }
    for torrent in &contents.torrents {
        println!(
            "{:<6} {:>10} {:>9.1}%  {}",
            "torr", torrent.id, torrent.progress, torrent.name
        );
    }

    if contents.folders.is_empty() && contents.files.is_empty() && contents.torrents.is_empty() {
        println!("(empty)");
    }
}

/// Format byte count in human-readable format.
fn format_size(bytes: u64) -> String {
    const GB: u64 = 1024 * 1024 * 1024;
    const MB: u64 = 1024 * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }
}
