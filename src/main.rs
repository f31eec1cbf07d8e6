// src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::{anyhow, Context};
use rgb_stream_viewer::{config, engine, gui, stream};
use eframe::egui;
use std::sync::mpsc::channel;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cfg = config::StreamConfig::load_or_default();
    log::info!(
        "capture source {}:{}, read cap {} bytes, tick {} ms",
        cfg.host,
        cfg.port,
        cfg.read_cap,
        cfg.tick_ms
    );

    // One connection for the life of the process; an unreachable capture
    // server is a startup failure, not something to retry.
    let client = stream::StreamClient::connect(&cfg.host, cfg.port, cfg.read_cap)
        .context("is the capture server running?")?;

    let (tx, rx) = channel();
    let (tx_cmd, rx_cmd) = channel();
    let _engine = engine::spawn_thread(client, cfg, tx, rx_cmd);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 520.0])
            .with_title("RGB Stream Pixel Color Strength"),
        ..Default::default()
    };

    eframe::run_native(
        "rgb-stream-viewer",
        options,
        Box::new(move |_cc| Box::new(gui::StreamViewApp::new(rx, tx_cmd))),
    )
    .map_err(|e| anyhow!("gui failed: {e}"))
}
