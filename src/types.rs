// src/types.rs

/// Per-chunk average byte strength of the three reported color channels.
///
/// Values are truncated integer means of raw stream bytes, so for well-formed
/// chunks (length a multiple of 4) they stay within 0..=255. Chunks with a
/// trailing partial group can push them past 255; the chart keeps its fixed
/// axis and simply lets such bars overshoot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelAverages {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuiCommand {
    StartStream,
    StopStream,
}

#[derive(Clone, Debug)]
pub enum EngineMessage {
    Log(String),
    /// Streaming state changed; sent only on actual transitions.
    Streaming(bool),
    Averages(ChannelAverages),
    /// Mid-stream read failure; the engine has already stopped the stream.
    StreamError(String),
}
