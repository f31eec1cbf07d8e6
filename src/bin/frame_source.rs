//! Synthetic stand-in for the Kinect capture server.
//!
//! Binds the same address the viewer will dial (shared `StreamConfig`, so a
//! `config.json` override keeps the pair in sync) and feeds every client an
//! endless run of 4-byte pixel groups {r, g, b, saturation}, saturation held
//! at zero as in RGB mode. Channel values drift as a bounded random walk so
//! the bars visibly move.

use std::io::Write;
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::Rng;
use rgb_stream_viewer::config::StreamConfig;

const PIXELS_PER_WRITE: usize = 25;

fn listen_addr(cfg: &StreamConfig) -> String {
    format!("{}:{}", cfg.host, cfg.port)
}

fn serve(mut client: TcpStream, write_period: Duration) {
    let peer = client
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "<unknown>".to_owned());
    log::info!("client connected: {peer}");

    let mut rng = rand::thread_rng();
    let mut channels: [i16; 3] = [
        rng.gen_range(40..200),
        rng.gen_range(40..200),
        rng.gen_range(40..200),
    ];
    let mut buf = Vec::with_capacity(PIXELS_PER_WRITE * 4);

    loop {
        for c in channels.iter_mut() {
            *c = (*c + rng.gen_range(-6..=6)).clamp(0, 255);
        }
        buf.clear();
        for _ in 0..PIXELS_PER_WRITE {
            // per-pixel jitter around the walking channel values
            for &c in &channels {
                let v = (c + rng.gen_range(-10..=10)).clamp(0, 255);
                buf.push(v as u8);
            }
            buf.push(0); // saturation byte, zero in RGB mode
        }
        if let Err(e) = client.write_all(&buf) {
            log::info!("client {peer} dropped: {e}");
            return;
        }
        thread::sleep(write_period);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cfg = StreamConfig::load_or_default();
    let addr = listen_addr(&cfg);
    let write_period = Duration::from_millis(cfg.tick_ms.max(1));

    let listener = TcpListener::bind(&addr).with_context(|| format!("failed to bind {addr}"))?;
    log::info!("serving synthetic RGB frames on {addr}");

    for stream in listener.incoming() {
        match stream {
            Ok(client) => {
                thread::spawn(move || serve(client, write_period));
            }
            Err(e) => log::warn!("accept failed: {e}"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listen_addr_follows_config() {
        assert_eq!(listen_addr(&StreamConfig::default()), "127.0.0.1:5000");

        let cfg = StreamConfig {
            host: "0.0.0.0".to_owned(),
            port: 6010,
            ..StreamConfig::default()
        };
        assert_eq!(listen_addr(&cfg), "0.0.0.0:6010");
    }
}
