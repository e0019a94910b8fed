//! Stdio Server
//!
//! Runs the plugin out of process: the editor writes JSON lines to our stdin
//! and executes the requests we write to stdout. Logs go to stderr.

pub mod protocol;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{stdin, stdout, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::arglist::ArgList;
use crate::config::{self, Args, Config};
use crate::host::RpcHost;
use crate::plugin::ArgStatus;
use protocol::{Incoming, Outgoing};

/// Start the plugin on stdin/stdout
pub async fn serve() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let config = Config::from_args(&args)?;

    // Keep the watcher alive for as long as we serve
    let mut _watcher = None;
    let mut reloads = None;
    if !args.no_watch {
        if let Some(path) = args.config_path() {
            match config::watch(&path) {
                Ok((watcher, rx)) => {
                    _watcher = Some(watcher);
                    reloads = Some(rx);
                }
                Err(e) => log::warn!("Config live reload disabled: {:#}", e),
            }
        }
    }

    run(stdin(), stdout(), config, reloads).await
}

/// Serve one editor connection until it sends `shutdown` or closes its end.
pub async fn run<R, W>(
    reader: R,
    writer: W,
    config: Config,
    mut reloads: Option<UnboundedReceiver<Config>>,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let writer_task = tokio::spawn(write_messages(writer, rx));

    let plugin = ArgStatus::new(RpcHost::new(tx), config);
    let mut lines = BufReader::new(reader).lines();
    log::info!("arglist-status ready");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from editor")? else {
                    log::info!("Editor closed the connection");
                    break;
                };
                match dispatch(&plugin, &line).await {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => log::error!("Failed to handle message: {:#}", e),
                }
            }
            Some(config) = next_reload(&mut reloads) => {
                if let Err(e) = plugin.set_config(config).await {
                    log::error!("Failed to apply reloaded configuration: {:#}", e);
                }
            }
        }
    }

    if let Err(e) = plugin.shutdown().await {
        log::warn!("Shutdown incomplete: {:#}", e);
    }
    // the host owns the only sender; dropping it lets the writer drain and finish
    drop(plugin);
    writer_task.await.context("Writer task panicked")?
}

async fn next_reload(reloads: &mut Option<UnboundedReceiver<Config>>) -> Option<Config> {
    match reloads {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

/// Handle one line from the editor. Returns false once the editor asks to stop.
async fn dispatch(plugin: &ArgStatus<RpcHost>, line: &str) -> Result<bool> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(true);
    }

    let message: Incoming = match serde_json::from_str(line) {
        Ok(message) => message,
        Err(e) => {
            log::warn!("Skipping malformed message: {}", e);
            return Ok(true);
        }
    };

    match message {
        Incoming::Initialize { columns } => {
            plugin.with_host_mut(|host| host.set_columns(columns)).await;
            plugin.register_keymaps().await?;
        }
        Incoming::State {
            paths,
            current,
            current_file,
        } => {
            let list = ArgList::new(paths, current);
            plugin
                .with_host_mut(|host| host.sync(list, current_file))
                .await;
            plugin.refresh().await;
        }
        Incoming::Resize { columns } => {
            plugin.with_host_mut(|host| host.set_columns(columns)).await;
        }
        Incoming::Action { name } => plugin.run(name).await?,
        Incoming::Key { keys } => {
            plugin.run_key(&keys).await?;
        }
        Incoming::Selection { paths } => plugin.replace_with_selection(paths).await?,
        Incoming::Shutdown => {
            log::info!("Shutdown requested");
            return Ok(false);
        }
    }
    Ok(true)
}

async fn write_messages<W>(mut writer: W, mut rx: UnboundedReceiver<Outgoing>) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(message) = rx.recv().await {
        let mut line = serde_json::to_string(&message).context("Failed to encode message")?;
        line.push('\n');
        writer
            .write_all(line.as_bytes())
            .await
            .context("Failed to write to editor")?;
        writer.flush().await?;
    }
    writer.shutdown().await?;
    Ok(())
}
