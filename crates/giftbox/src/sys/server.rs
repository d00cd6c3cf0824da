use crate::events::AppEvent;
use async_channel::Sender;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

const SOCKET_NAME: &str = "giftbox.sock";

/// `$XDG_RUNTIME_DIR/giftbox.sock`, or `/tmp/giftbox.sock` without a runtime dir.
pub fn socket_path() -> PathBuf {
    std::env::var_os("XDG_RUNTIME_DIR")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(SOCKET_NAME)
}

pub fn parse_command(line: &str) -> Option<AppEvent> {
    match line.trim().to_ascii_lowercase().as_str() {
        "open" => Some(AppEvent::Activate),
        "reset" => Some(AppEvent::Reset),
        _ => None,
    }
}

/// Removes a socket file left behind by an instance that is gone. Returns
/// false when another instance still accepts connections on it.
async fn clear_stale_socket(path: &Path) -> bool {
    if fs_err::metadata(path).is_err() {
        return true;
    }
    if UnixStream::connect(path).await.is_ok() {
        return false;
    }
    let _ = fs_err::remove_file(path);
    true
}

pub async fn run_server(tx: Sender<AppEvent>) {
    let path = socket_path();

    if !clear_stale_socket(&path).await {
        log::error!(
            "Another giftbox instance is listening on {}, remote control stays with it",
            path.display()
        );
        return;
    }

    let listener = match UnixListener::bind(&path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", path.display(), e);
            return;
        }
    };
    log::info!("Listening for commands on {}", path.display());

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match parse_command(&line) {
                            Some(event) => {
                                if tx.send(event).await.is_err() {
                                    break;
                                }
                            }
                            None => log::warn!("Ignoring unknown command '{}'", line.trim()),
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}
