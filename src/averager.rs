// src/averager.rs
use crate::types::ChannelAverages;

/// Bytes per pixel group on the wire: {red, green, blue, saturation}.
pub const GROUP_SIZE: usize = 4;

/// Reduces one raw chunk to per-channel average strengths.
///
/// Every byte is added to the bucket matching its zero-based position mod 4.
/// Buckets 0..2 are then divided by the pixel count taken as the real-valued
/// quotient `len / 4` and truncated toward zero. The fourth bucket is the
/// saturation byte (always zero in RGB mode); it is accumulated like the
/// others but never reported.
///
/// A chunk whose length is not a multiple of 4 carries a trailing partial
/// group. Its bytes still land in their buckets while the divisor stays the
/// fractional pixel count, so those averages skew. The capture protocol is
/// not known to produce such chunks and the skew is left as-is rather than
/// guessed at.
///
/// Returns `None` for an empty chunk: no pixels, no update this tick.
pub fn channel_averages(chunk: &[u8]) -> Option<ChannelAverages> {
    if chunk.is_empty() {
        return None;
    }

    let mut sums = [0u64; GROUP_SIZE];
    for (i, &byte) in chunk.iter().enumerate() {
        sums[i % GROUP_SIZE] += u64::from(byte);
    }

    let pixels = chunk.len() as f64 / GROUP_SIZE as f64;
    let avg = |sum: u64| (sum as f64 / pixels) as u32;

    Some(ChannelAverages {
        red: avg(sums[0]),
        green: avg(sums[1]),
        blue: avg(sums[2]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_chunk_averages_per_position() {
        let chunk = [10, 20, 30, 40, 50, 60, 70, 80];
        let avg = channel_averages(&chunk).unwrap();
        assert_eq!(avg.red, 30);
        assert_eq!(avg.green, 40);
        assert_eq!(avg.blue, 50);
    }

    #[test]
    fn all_zero_chunk_is_zero() {
        for k in [1usize, 3, 25] {
            let chunk = vec![0u8; 4 * k];
            assert_eq!(channel_averages(&chunk).unwrap(), ChannelAverages::default());
        }
    }

    #[test]
    fn all_max_chunk_is_255() {
        for k in [1usize, 2, 25] {
            let chunk = vec![255u8; 4 * k];
            let avg = channel_averages(&chunk).unwrap();
            assert_eq!((avg.red, avg.green, avg.blue), (255, 255, 255));
        }
    }

    #[test]
    fn truncates_toward_zero() {
        // red sums to 25 over 2 pixels -> 12.5 -> 12
        let chunk = [10, 0, 0, 0, 15, 0, 0, 0];
        assert_eq!(channel_averages(&chunk).unwrap().red, 12);
    }

    #[test]
    fn empty_chunk_skips_update() {
        assert_eq!(channel_averages(&[]), None);
    }

    #[test]
    fn partial_group_uses_fractional_pixel_count() {
        // len 2 -> 0.5 pixels; 12 / 0.5 = 24, 4 / 0.5 = 8
        let avg = channel_averages(&[12, 4]).unwrap();
        assert_eq!((avg.red, avg.green, avg.blue), (24, 8, 0));
    }

    #[test]
    fn partial_group_can_exceed_byte_range() {
        // one byte: 0.25 pixels, 200 / 0.25 = 800 -- not clamped
        assert_eq!(channel_averages(&[200]).unwrap().red, 800);
    }
}
