#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// name of the input device, `"default"` picks the host's default input
    ///
    /// list of devices can be fetched using `CaptureSource::fetch_devices`
    pub device: String,

    /// the device's own rate is used if not set
    pub sample_rate: Option<u32>,

    /// the buffersize from the audiobackend, in frames
    pub latency: Option<u32>,
}
impl Default for Config {
    fn default() -> Self {
        Config {
            device: String::from("default"),
            sample_rate: None,
            latency: None,
        }
    }
}
