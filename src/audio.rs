use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::thread;

use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, Source};

use crate::fingerboard;

pub const SAMPLE_RATE: u32 = 44_100;

/// Sine tone with an exponential decay envelope, 0.5 down to ~0.001 over
/// the duration. This is the fallback voice for notes without a sample.
pub fn decaying_sine(freq: f32, duration_sec: f32, sample_rate: u32) -> Vec<f32> {
    let sample_count = (duration_sec * sample_rate as f32) as usize;
    let decay = (0.001f32 / 0.5).ln() / duration_sec;
    (0..sample_count)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            0.5 * (decay * t).exp() * (2.0 * std::f32::consts::PI * freq * t).sin()
        })
        .collect()
}

/// A decoded recording, held in memory for repeated playback.
pub struct Sample {
    channels: u16,
    sample_rate: u32,
    data: Vec<f32>,
}

impl Sample {
    fn decode(path: &Path) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let file = File::open(path)?;
        let decoder = Decoder::new(BufReader::new(file))?;
        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        let data: Vec<f32> = decoder.collect();
        Ok(Self {
            channels,
            sample_rate,
            data,
        })
    }

    pub fn to_source(&self) -> SamplesBuffer {
        SamplesBuffer::new(self.channels, self.sample_rate, self.data.clone())
    }
}

/// All recordings found on disk, keyed by note identifier. Notes without a
/// usable file are simply absent and get the synthesized tone instead.
#[derive(Default)]
pub struct SampleBank {
    samples: HashMap<&'static str, Sample>,
}

impl SampleBank {
    /// Decode every note's file off `dir`, one task per note issued
    /// together and joined before returning. Any miss is a warning, never
    /// a failure.
    pub fn preload(dir: &Path, notes: &[&'static str]) -> Self {
        let handles: Vec<_> = notes
            .iter()
            .map(|&note| {
                let path = dir.join(fingerboard::sample_filename(note));
                thread::spawn(move || (note, Sample::decode(&path)))
            })
            .collect();

        let mut samples = HashMap::new();
        for handle in handles {
            let Ok((note, result)) = handle.join() else {
                continue;
            };
            match result {
                Ok(sample) => {
                    samples.insert(note, sample);
                }
                Err(err) => {
                    log::warn!("no sample for {note}, will use fallback tone: {err}");
                }
            }
        }
        Self { samples }
    }

    pub fn get(&self, note: &str) -> Option<&Sample> {
        self.samples.get(note)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
