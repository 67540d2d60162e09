//! pull interface between whatever produces audio-data and the render pipeline
//!
//! the pipeline never captures or decodes audio itself, it only asks a
//! `SampleSource` for the newest frame of unsigned byte magnitudes once per tick

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// which representation of the signal a frame carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Domain {
    /// oscilloscope like, silence sits at 128
    Time,

    /// energy per frequency band, silence is 0
    Frequency,
}

/// host provided capability that hands out the current frame
///
/// calls must not block, implementations are expected to read an already
/// populated buffer. The length of a frame may differ between domains and
/// between calls, it is only used as the resampling denominator.
pub trait SampleSource {
    /// `None` means the source is not attached yet, the frame is then rendered idle
    fn get_frame(&mut self, domain: Domain) -> Option<&[u8]>;
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    fn get_frame(&mut self, domain: Domain) -> Option<&[u8]> {
        (**self).get_frame(domain)
    }
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn get_frame(&mut self, domain: Domain) -> Option<&[u8]> {
        (**self).get_frame(domain)
    }
}

/// source that is never attached
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl SampleSource for Detached {
    fn get_frame(&mut self, _domain: Domain) -> Option<&[u8]> {
        None
    }
}

/// in-memory source holding one frame per domain
///
/// useful for synthetic input and for hosts that already own the byte arrays
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub time: Option<Vec<u8>>,
    pub frequency: Option<Vec<u8>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// same frame for both domains
    pub fn constant(frame: Vec<u8>) -> Self {
        Self {
            time: Some(frame.clone()),
            frequency: Some(frame),
        }
    }

    pub fn with_time(mut self, frame: Vec<u8>) -> Self {
        self.time = Some(frame);
        self
    }

    pub fn with_frequency(mut self, frame: Vec<u8>) -> Self {
        self.frequency = Some(frame);
        self
    }

    pub fn set(&mut self, domain: Domain, frame: Vec<u8>) {
        match domain {
            Domain::Time => self.time = Some(frame),
            Domain::Frequency => self.frequency = Some(frame),
        }
    }
}

impl SampleSource for StaticSource {
    fn get_frame(&mut self, domain: Domain) -> Option<&[u8]> {
        match domain {
            Domain::Time => self.time.as_deref(),
            Domain::Frequency => self.frequency.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_source_serves_each_domain() {
        let mut source = StaticSource::new()
            .with_time(vec![128; 4])
            .with_frequency(vec![7; 2]);

        assert_eq!(source.get_frame(Domain::Time), Some(&[128u8, 128, 128, 128][..]));
        assert_eq!(source.get_frame(Domain::Frequency), Some(&[7u8, 7][..]));
    }

    #[test]
    fn missing_domain_is_idle() {
        let mut source = StaticSource::new().with_frequency(vec![1, 2, 3]);
        assert!(source.get_frame(Domain::Time).is_none());
        assert!(Detached.get_frame(Domain::Frequency).is_none());
    }

    #[test]
    fn boxed_sources_delegate() {
        let mut source: Box<dyn SampleSource> = Box::new(StaticSource::constant(vec![9]));
        assert_eq!(source.get_frame(Domain::Time), Some(&[9u8][..]));
    }
}
