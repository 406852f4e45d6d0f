//! Preview playback
//!
//! Previews are short mp3 clips. They are downloaded with reqwest and handed
//! to a dedicated audio thread that owns the output stream, since the rodio
//! stream cannot move between threads. The thread holds at most one sink, so
//! starting a preview always stops the previous one.

use anyhow::Result;
use reqwest::Client;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Something the audio thread wants the controller to know
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewEvent {
    /// The preview played to the end
    Finished(String),
    /// The clip could not be decoded or played
    Failed { track_id: String, message: String },
    /// No audio output in this build or on this machine
    Unavailable(String),
}

#[cfg_attr(not(feature = "audio"), allow(dead_code))]
enum AudioCommand {
    Play { track_id: String, bytes: Vec<u8> },
    Stop,
}

#[derive(Clone)]
pub struct PreviewPlayer {
    http: Client,
    commands: Option<std::sync::mpsc::Sender<AudioCommand>>,
    events: UnboundedSender<PreviewEvent>,
}

impl PreviewPlayer {
    /// Create the player and the channel its events arrive on
    pub fn new() -> (Self, UnboundedReceiver<PreviewEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let commands = Self::spawn_output_thread(events.clone());

        let player = Self {
            http: Client::new(),
            commands,
            events,
        };
        (player, receiver)
    }

    pub fn is_available(&self) -> bool {
        self.commands.is_some()
    }

    /// Download a preview clip
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url, "Downloading preview");
        let bytes = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }

    /// Start playing a downloaded clip, replacing whatever was playing
    pub fn start(&self, track_id: &str, bytes: Vec<u8>) {
        match &self.commands {
            Some(commands) => {
                let command = AudioCommand::Play {
                    track_id: track_id.to_string(),
                    bytes,
                };
                if commands.send(command).is_err() {
                    tracing::error!("Audio thread is gone");
                    let _ = self.events.send(PreviewEvent::Unavailable(track_id.to_string()));
                }
            }
            None => {
                tracing::debug!(track_id, "No audio output, preview not played");
                let _ = self.events.send(PreviewEvent::Unavailable(track_id.to_string()));
            }
        }
    }

    pub fn stop(&self) {
        if let Some(commands) = &self.commands {
            let _ = commands.send(AudioCommand::Stop);
        }
    }

    #[cfg(not(feature = "audio"))]
    fn spawn_output_thread(_events: UnboundedSender<PreviewEvent>) -> Option<std::sync::mpsc::Sender<AudioCommand>> {
        tracing::info!("Built without the `audio` feature, previews are disabled");
        None
    }

    #[cfg(feature = "audio")]
    fn spawn_output_thread(events: UnboundedSender<PreviewEvent>) -> Option<std::sync::mpsc::Sender<AudioCommand>> {
        use std::io::Cursor;
        use std::sync::mpsc::RecvTimeoutError;
        use std::time::Duration;
        use rodio::{Decoder, OutputStream, Sink};

        let (commands, receiver) = std::sync::mpsc::channel::<AudioCommand>();
        let (ready_tx, ready_rx) = std::sync::mpsc::channel::<bool>();

        let spawned = std::thread::Builder::new()
            .name("preview-audio".to_string())
            .spawn(move || {
                let (_stream, handle) = match OutputStream::try_default() {
                    Ok(pair) => {
                        let _ = ready_tx.send(true);
                        pair
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "No audio output device");
                        let _ = ready_tx.send(false);
                        return;
                    }
                };

                let mut current: Option<(String, Sink)> = None;
                loop {
                    match receiver.recv_timeout(Duration::from_millis(200)) {
                        Ok(AudioCommand::Play { track_id, bytes }) => {
                            if let Some((_, sink)) = current.take() {
                                sink.stop();
                            }
                            let sink = match Sink::try_new(&handle) {
                                Ok(sink) => sink,
                                Err(e) => {
                                    let _ = events.send(PreviewEvent::Failed { track_id, message: e.to_string() });
                                    continue;
                                }
                            };
                            match Decoder::new(Cursor::new(bytes)) {
                                Ok(source) => {
                                    sink.append(source);
                                    tracing::info!(track_id = %track_id, "Preview started");
                                    current = Some((track_id, sink));
                                }
                                Err(e) => {
                                    tracing::warn!(track_id = %track_id, error = %e, "Could not decode preview");
                                    let _ = events.send(PreviewEvent::Failed { track_id, message: e.to_string() });
                                }
                            }
                        }
                        Ok(AudioCommand::Stop) => {
                            if let Some((track_id, sink)) = current.take() {
                                sink.stop();
                                tracing::debug!(track_id = %track_id, "Preview stopped");
                            }
                        }
                        Err(RecvTimeoutError::Timeout) => {}
                        Err(RecvTimeoutError::Disconnected) => break,
                    }

                    if current.as_ref().is_some_and(|(_, sink)| sink.empty()) {
                        if let Some((track_id, _)) = current.take() {
                            tracing::debug!(track_id = %track_id, "Preview finished");
                            let _ = events.send(PreviewEvent::Finished(track_id));
                        }
                    }
                }
            });

        if let Err(e) = spawned {
            tracing::warn!(error = %e, "Could not start audio thread");
            return None;
        }

        if ready_rx.recv().unwrap_or(false) {
            Some(commands)
        } else {
            None
        }
    }
}
