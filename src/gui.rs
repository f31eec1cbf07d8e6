// src/gui.rs
use crate::types::{ChannelAverages, EngineMessage, GuiCommand};
use eframe::egui;
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Plot, PlotBounds};
use std::sync::mpsc::{Receiver, Sender};
use std::time::Instant;

const BAR_RED: Color32 = Color32::from_rgb(220, 60, 60);
const BAR_GREEN: Color32 = Color32::from_rgb(60, 190, 90);
const BAR_BLUE: Color32 = Color32::from_rgb(70, 110, 230);

pub struct StreamViewApp {
    is_streaming: bool,
    averages: ChannelAverages,
    frames: u64,
    stream_start: Option<Instant>,
    last_error: Option<String>,
    log_messages: Vec<String>,
    rx: Receiver<EngineMessage>,
    tx_cmd: Sender<GuiCommand>,
}

impl StreamViewApp {
    pub fn new(rx: Receiver<EngineMessage>, tx_cmd: Sender<GuiCommand>) -> Self {
        Self {
            is_streaming: false,
            averages: ChannelAverages::default(),
            frames: 0,
            stream_start: None,
            last_error: None,
            log_messages: vec!["> ready".to_owned()],
            rx,
            tx_cmd,
        }
    }

    fn log(&mut self, msg: &str) {
        self.log_messages.push(format!("> {msg}"));
        if self.log_messages.len() > 8 {
            self.log_messages.remove(0);
        }
    }

    fn send_command(&mut self, cmd: GuiCommand) {
        if self.tx_cmd.send(cmd).is_err() {
            self.log("engine thread is gone");
        }
    }

    fn drain_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                EngineMessage::Averages(avg) => {
                    self.averages = avg;
                    self.frames += 1;
                }
                EngineMessage::Streaming(on) => {
                    self.is_streaming = on;
                    self.stream_start = on.then(Instant::now);
                    if on {
                        self.last_error = None;
                        self.frames = 0;
                    }
                }
                EngineMessage::Log(s) => self.log(&s),
                EngineMessage::StreamError(s) => {
                    self.log(&format!("stream error: {s}"));
                    self.last_error = Some(s);
                }
            }
        }
    }

    fn show_chart(&self, ui: &mut egui::Ui) {
        let avg = self.averages;
        let bar = |x: f64, height: u32, label: &str| {
            vec![Bar::new(x, f64::from(height)).width(0.8).name(label)]
        };

        Plot::new("color_strength")
            .legend(Legend::default())
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                // Fixed frame like the original chart; skewed chunks may
                // push a bar past the top and that is left visible.
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([0.0, 0.0], [3.0, 255.0]));
                plot_ui.bar_chart(BarChart::new(bar(0.5, avg.red, "r")).color(BAR_RED).name("r"));
                plot_ui.bar_chart(
                    BarChart::new(bar(1.5, avg.green, "g"))
                        .color(BAR_GREEN)
                        .name("g"),
                );
                plot_ui.bar_chart(
                    BarChart::new(bar(2.5, avg.blue, "b"))
                        .color(BAR_BLUE)
                        .name("b"),
                );
            });
    }

    fn show_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let (dot, label) = if self.is_streaming {
                (Color32::from_rgb(60, 190, 90), "streaming")
            } else {
                (Color32::GRAY, "stopped")
            };
            ui.colored_label(dot, "●");
            ui.label(label);
            if let Some(started) = self.stream_start {
                ui.separator();
                ui.label(format!("{}s", started.elapsed().as_secs()));
            }
            ui.separator();
            ui.label(format!("frames: {}", self.frames));
            ui.separator();
            ui.label(format!(
                "r {}  g {}  b {}",
                self.averages.red, self.averages.green, self.averages.blue
            ));
        });
    }
}

impl eframe::App for StreamViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_messages();

        if self.is_streaming {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("topbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("RGB Stream Pixel Color Strength");
                ui.separator();
                if ui.button("Start").clicked() {
                    self.send_command(GuiCommand::StartStream);
                }
                if ui.button("Stop").clicked() {
                    self.send_command(GuiCommand::StopStream);
                }
            });
        });

        egui::TopBottomPanel::bottom("logbar").show(ctx, |ui| {
            self.show_status(ui);
            ui.separator();
            for msg in &self.log_messages {
                ui.monospace(msg);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(err) = &self.last_error {
                ui.colored_label(
                    Color32::from_rgb(200, 60, 60),
                    format!("stream failed: {err} (restart the capture server, then Start again)"),
                );
            }
            ui.label("average strength in frame");
            self.show_chart(ui);
        });
    }
}
