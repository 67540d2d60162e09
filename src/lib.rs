//! Audiocanvas paints live audio onto a 2D surface, one frame per display refresh
//!
//! Every tick a `FrameScheduler` pulls a byte frame from a `SampleSource`,
//! reduces it to a fixed number of visual samples, fades the previous frame
//! and lets the active render strategy (bars, radial, waveform or particles)
//! draw onto a `Surface`.
//!
//! Sources and surfaces are traits, so the pipeline runs just as well against
//! synthetic frames and a command recorder as against a microphone and a real
//! canvas.
//!
//!# Code Example with the software rasteriser
//!```rs
//!use audiocanvas::analyser::Analyser;
//!use audiocanvas::color::ColorScheme;
//!use audiocanvas::config::Config;
//!use audiocanvas::render::RenderMode;
//!use audiocanvas::scheduler::FrameScheduler;
//!use audiocanvas::surface::Pixmap;
//!
//!fn main() {
//!    // turns pushed pcm samples into analyser byte frames
//!    let mut analyser = Analyser::default();
//!
//!    let mut scheduler = FrameScheduler::new(Config {
//!        mode: RenderMode::Radial,
//!        scheme: ColorScheme::Ocean,
//!        ..Config::default()
//!    });
//!    let mut pixmap = Pixmap::new(800, 600);
//!
//!    loop {
//!        analyser.push(&next_audio_block());
//!        scheduler.tick(&mut analyser, &mut pixmap);
//!        /*
//!        present pixmap.as_rgba() ...
//!        */
//!    }
//!}
//!```

/// the pull interface every frame's samples come from
pub mod source;

/// downsamples raw frames to the visual resolution
pub mod reducer;

/// color schemes and the per sample color mapping
pub mod color;

/// drawing primitives and the surfaces implementing them
pub mod surface;

/// bars, radial, waveform and particle strategies
pub mod render;

/// drives one frame per refresh
pub mod scheduler;

pub mod config;

/// browser-like analyser turning pcm samples into byte frames
#[cfg(feature = "analyser")]
pub mod analyser;

/// captures audio from system using cpal
#[cfg(feature = "audio_capture")]
pub mod audio_capture;

pub mod utils;

pub use config::Config;
pub use scheduler::FrameScheduler;
pub use source::{Domain, SampleSource};
