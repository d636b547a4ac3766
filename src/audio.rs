//! Audio system using Web Audio API
//!
//! Sound cues are short procedural tone sequences; the background music is a
//! quiet oscillator pad on its own gain node so it can be ducked. The menu's
//! voice message is a longer phrase on a third bus that can be cut off.

use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

use crate::context::ArcadeContext;
use crate::menu::MESSAGE_TRACK_SECONDS;
use crate::sim::SoundCue;

/// Seconds the music gain takes to settle after a volume change
const MUSIC_FADE: f64 = 0.15;
/// Pad chord (A minor add9)
const PAD_NOTES: [f32; 3] = [110.0, 164.81, 246.94];
/// Voice message syllables as (pitch, start, length), spread over the track
const MESSAGE_PHRASE: [(f32, f64, f64); 12] = [
    (220.0, 0.2, 0.35),
    (247.0, 0.6, 0.25),
    (262.0, 0.9, 0.5),
    (233.0, 1.8, 0.3),
    (208.0, 2.2, 0.6),
    (247.0, 3.2, 0.3),
    (277.0, 3.6, 0.35),
    (262.0, 4.0, 0.7),
    (220.0, 5.1, 0.3),
    (196.0, 5.5, 0.4),
    (233.0, 6.2, 0.3),
    (220.0, 6.6, 1.1),
];
const MESSAGE_LEVEL: f32 = 0.35;

/// One oscillator blip
#[derive(Debug, Clone, Copy)]
struct Tone {
    freq: f32,
    /// Frequency at the end of the blip (glide)
    end_freq: f32,
    wave: OscillatorType,
    delay: f64,
    length: f64,
    level: f32,
}

const fn tone(freq: f32, delay: f64, length: f64, level: f32) -> Tone {
    Tone {
        freq,
        end_freq: freq,
        wave: OscillatorType::Sine,
        delay,
        length,
        level,
    }
}

const fn glide(freq: f32, end_freq: f32, length: f64, level: f32) -> Tone {
    Tone {
        freq,
        end_freq,
        wave: OscillatorType::Triangle,
        delay: 0.0,
        length,
        level,
    }
}

fn tones(cue: SoundCue) -> &'static [Tone] {
    const MENU_SELECT: [Tone; 2] = [tone(660.0, 0.0, 0.08, 0.25), tone(880.0, 0.06, 0.1, 0.25)];
    const START: [Tone; 1] = [glide(200.0, 600.0, 0.2, 0.3)];
    const COLLECT: [Tone; 3] = [
        tone(600.0, 0.0, 0.15, 0.25),
        tone(800.0, 0.08, 0.15, 0.25),
        tone(1000.0, 0.16, 0.15, 0.25),
    ];
    const HIT: [Tone; 1] = [Tone {
        wave: OscillatorType::Sawtooth,
        ..glide(220.0, 70.0, 0.2, 0.3)
    }];
    const JUMP: [Tone; 1] = [glide(300.0, 700.0, 0.12, 0.2)];
    const GAME_OVER: [Tone; 4] = [
        tone(400.0, 0.0, 0.3, 0.3),
        tone(350.0, 0.2, 0.3, 0.3),
        tone(300.0, 0.4, 0.3, 0.3),
        tone(200.0, 0.6, 0.3, 0.3),
    ];
    const HIGH_SCORE: [Tone; 5] = [
        tone(500.0, 0.0, 0.25, 0.25),
        tone(600.0, 0.08, 0.25, 0.25),
        tone(700.0, 0.16, 0.25, 0.25),
        tone(800.0, 0.24, 0.25, 0.25),
        tone(1000.0, 0.32, 0.25, 0.25),
    ];

    match cue {
        SoundCue::MenuSelect => &MENU_SELECT,
        SoundCue::Start => &START,
        SoundCue::Collect => &COLLECT,
        SoundCue::Hit => &HIT,
        SoundCue::Jump => &JUMP,
        SoundCue::GameOver => &GAME_OVER,
        SoundCue::HighScore => &HIGH_SCORE,
    }
}

/// Audio manager for the arcade
pub struct AudioManager {
    ctx: Option<AudioContext>,
    music: Option<GainNode>,
    music_started: bool,
    /// Bus and syllables of the voice message while it plays
    message: Option<(GainNode, Vec<OscillatorNode>)>,
    sfx_volume: f32,
    music_volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            music: None,
            music_started: false,
            message: None,
            sfx_volume: 0.0,
            music_volume: 0.0,
        }
    }

    /// Resume the context and start the music pad (needs a user gesture)
    pub fn resume(&mut self) {
        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        if !self.music_started {
            self.music = start_pad(ctx, self.music_volume);
            self.music_started = true;
        }
    }

    /// Pick up volume, mute and ducking from the shared context
    pub fn sync(&mut self, arcade: &ArcadeContext) {
        self.sfx_volume = arcade.sfx_volume();
        let music_volume = arcade.music_volume();
        if (music_volume - self.music_volume).abs() > f32::EPSILON {
            self.music_volume = music_volume;
            if let (Some(ctx), Some(gain)) = (&self.ctx, &self.music) {
                gain.gain()
                    .set_target_at_time(music_volume, ctx.current_time(), MUSIC_FADE / 3.0)
                    .ok();
            }
        }
    }

    pub fn play(&self, cue: SoundCue) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        for tone in tones(cue) {
            play_tone(ctx, tone, self.sfx_volume);
        }
    }

    /// Play the voice message from the top
    pub fn play_message(&mut self) {
        self.stop_message();
        if self.sfx_volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.message = start_message(ctx, self.sfx_volume * MESSAGE_LEVEL);
    }

    pub fn stop_message(&mut self) {
        let Some((bus, voices)) = self.message.take() else {
            return;
        };
        for osc in voices {
            osc.stop().ok();
        }
        bus.disconnect().ok();
    }
}

fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    wave: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(wave);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

fn play_tone(ctx: &AudioContext, tone: &Tone, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, tone.freq, tone.wave) else {
        return;
    };
    let t = ctx.current_time() + tone.delay;

    gain.gain().set_value_at_time(vol * tone.level, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + tone.length)
        .ok();
    if tone.end_freq != tone.freq {
        osc.frequency().set_value_at_time(tone.freq, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(tone.end_freq, t + tone.length)
            .ok();
    }

    osc.start_with_when(t).ok();
    osc.stop_with_when(t + tone.length + 0.05).ok();
}

/// Start the looping pad; returns its gain node
fn start_pad(ctx: &AudioContext, volume: f32) -> Option<GainNode> {
    let bus = ctx.create_gain().ok()?;
    bus.gain().set_value(volume);
    bus.connect_with_audio_node(&ctx.destination()).ok()?;

    for freq in PAD_NOTES {
        let osc = ctx.create_oscillator().ok()?;
        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&bus).ok()?;
        osc.start().ok()?;
    }
    log::info!("Music started");
    Some(bus)
}

/// Schedule the voice message phrase on a fresh bus
fn start_message(ctx: &AudioContext, volume: f32) -> Option<(GainNode, Vec<OscillatorNode>)> {
    let bus = ctx.create_gain().ok()?;
    bus.gain().set_value(volume);
    bus.connect_with_audio_node(&ctx.destination()).ok()?;

    let now = ctx.current_time();
    let mut voices = Vec::with_capacity(MESSAGE_PHRASE.len());
    for (freq, start, length) in MESSAGE_PHRASE {
        let osc = ctx.create_oscillator().ok()?;
        let env = ctx.create_gain().ok()?;
        osc.set_type(OscillatorType::Triangle);
        osc.connect_with_audio_node(&env).ok()?;
        env.connect_with_audio_node(&bus).ok()?;

        let t = now + start;
        // Falling inflection, like the end of a spoken word
        osc.frequency().set_value_at_time(freq, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(freq * 0.85, t + length)
            .ok();
        env.gain().set_value_at_time(0.01, t).ok();
        env.gain().linear_ramp_to_value_at_time(1.0, t + 0.04).ok();
        env.gain()
            .exponential_ramp_to_value_at_time(0.01, t + length)
            .ok();

        osc.start_with_when(t).ok()?;
        osc.stop_with_when(t + length + 0.05).ok()?;
        voices.push(osc);
    }
    log::debug!("Voice message scheduled ({}s)", MESSAGE_TRACK_SECONDS);
    Some((bus, voices))
}
