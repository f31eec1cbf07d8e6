// src/engine.rs
use std::io::Read;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::averager::{channel_averages, GROUP_SIZE};
use crate::config::StreamConfig;
use crate::stream::StreamClient;
use crate::types::{EngineMessage, GuiCommand};

/// How long the loop parks between command polls while stopped.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Spawns the sampling thread. It exclusively owns the stream client for the
/// rest of the process and exits when the GUI drops its command sender.
pub fn spawn_thread<S>(
    client: StreamClient<S>,
    cfg: StreamConfig,
    tx: Sender<EngineMessage>,
    rx_cmd: Receiver<GuiCommand>,
) -> thread::JoinHandle<()>
where
    S: Read + Send + 'static,
{
    thread::spawn(move || run_loop(client, &cfg, &tx, &rx_cmd))
}

/// Stopped <-> Running loop. While running, each tick blocks on one socket
/// read, averages the chunk, and publishes the result. The read has no
/// timeout, so a silent peer stalls the tick (known limitation of the
/// capture protocol); only future ticks are affected by a Stop that arrives
/// during a read.
fn run_loop<S: Read>(
    mut client: StreamClient<S>,
    cfg: &StreamConfig,
    tx: &Sender<EngineMessage>,
    rx_cmd: &Receiver<GuiCommand>,
) {
    let tick = Duration::from_millis(cfg.tick_ms.max(1));
    let mut streaming = false;

    tx.send(EngineMessage::Log(format!("connected to {}", client.peer())))
        .ok();

    loop {
        // Drain every pending command before the next tick.
        loop {
            match rx_cmd.try_recv() {
                Ok(cmd) => apply_command(cmd, &mut streaming, tx),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return,
            }
        }

        if !streaming {
            match rx_cmd.recv_timeout(IDLE_POLL) {
                Ok(cmd) => apply_command(cmd, &mut streaming, tx),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return,
            }
            continue;
        }

        let tick_started = Instant::now();
        match client.read_chunk() {
            Ok(chunk) if chunk.is_empty() => {
                // Zero-length read on a stream socket means the peer closed.
                streaming = false;
                log::info!("capture stream closed by peer");
                tx.send(EngineMessage::Log("stream closed by peer".to_owned()))
                    .ok();
                tx.send(EngineMessage::Streaming(false)).ok();
            }
            Ok(chunk) => {
                if chunk.len() % GROUP_SIZE != 0 {
                    log::debug!(
                        "chunk of {} bytes ends in a partial pixel group; averages will skew",
                        chunk.len()
                    );
                }
                if let Some(avg) = channel_averages(&chunk) {
                    tx.send(EngineMessage::Averages(avg)).ok();
                }
            }
            Err(e) => {
                streaming = false;
                log::error!("stream read failed: {e}");
                tx.send(EngineMessage::StreamError(e.to_string())).ok();
                tx.send(EngineMessage::Streaming(false)).ok();
            }
        }

        if let Some(rest) = tick.checked_sub(tick_started.elapsed()) {
            thread::sleep(rest);
        }
    }
}

fn apply_command(cmd: GuiCommand, streaming: &mut bool, tx: &Sender<EngineMessage>) {
    match cmd {
        GuiCommand::StartStream if !*streaming => {
            *streaming = true;
            tx.send(EngineMessage::Streaming(true)).ok();
            tx.send(EngineMessage::Log("stream started".to_owned())).ok();
        }
        GuiCommand::StopStream if *streaming => {
            *streaming = false;
            tx.send(EngineMessage::Streaming(false)).ok();
            tx.send(EngineMessage::Log("stream stopped".to_owned())).ok();
        }
        // Start while running and Stop while stopped are no-ops.
        _ => {}
    }
}
