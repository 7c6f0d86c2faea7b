//! Weight-to-color ramp used when drawing grid samples.

/// Grey level of a sample whose weight is below 1.
pub const INACTIVE_GREY: f32 = 0.4;

/// Weight at which the green ramp saturates.
pub const SATURATION_WEIGHT: f32 = 20.0;

/// Maps a sample weight to an RGB triple in `[0, 1]`.
///
/// - `w < 1`: grey
/// - `1 <= w < 20`: green, brightening linearly from 0.4 to 1.0
/// - otherwise: white
pub fn weight_to_color(weight: f32) -> [f32; 3] {
    if weight < 1.0 {
        [INACTIVE_GREY; 3]
    } else if weight < SATURATION_WEIGHT {
        let t = (weight - 1.0) / (SATURATION_WEIGHT - 1.0);
        [0.0, INACTIVE_GREY + t * (1.0 - INACTIVE_GREY), 0.0]
    } else {
        [1.0; 3]
    }
}

/// Same as [`weight_to_color`], quantized to 8-bit channels.
pub fn weight_to_rgb8(weight: f32) -> [u8; 3] {
    weight_to_color(weight).map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_weights_are_grey() {
        assert_eq!(weight_to_color(0.0), [0.4, 0.4, 0.4]);
        assert_eq!(weight_to_color(0.99), [0.4, 0.4, 0.4]);
    }

    #[test]
    fn green_ramp_spans_one_to_saturation() {
        let start = weight_to_color(1.0);
        assert_eq!(start, [0.0, 0.4, 0.0]);
        let near_top = weight_to_color(19.999);
        assert!(near_top[1] > 0.99 && near_top[1] <= 1.0);
        assert_eq!(near_top[0], 0.0);
    }

    #[test]
    fn saturated_weights_are_white() {
        assert_eq!(weight_to_color(20.0), [1.0, 1.0, 1.0]);
        assert_eq!(weight_to_rgb8(1.0e6), [255, 255, 255]);
    }
}
