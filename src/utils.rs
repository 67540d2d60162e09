//! general utilities that help to process audio data

/// averages interleaved frames of `channel_count` channels down to one channel
///
/// a trailing incomplete frame is averaged over the channels it has
pub fn mono(data: &[f32], channel_count: usize) -> Vec<f32> {
    if channel_count <= 1 {
        return data.to_vec();
    }
    data.chunks(channel_count)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_stereo() {
        let data = [1.0, -1.0, 0.5, 0.5, 0.2, 0.0];
        assert_eq!(mono(&data, 2), vec![0.0, 0.5, 0.1]);
    }

    #[test]
    fn mono_passes_through() {
        let data = [0.1, 0.2, 0.3];
        assert_eq!(mono(&data, 1), data.to_vec());
        assert_eq!(mono(&data, 0), data.to_vec());
    }
}
