//! Static waveshapers for the distortion block
pub enum ClipType {
    Hard,
    Soft,
    Asymmetric,
}

pub fn clip_sample(ctype: &ClipType, sample_in: f32) -> f32 {
    match ctype {
        ClipType::Hard => sample_in.clamp(-1.0, 1.0),
        ClipType::Soft => sample_in / (1.0 + sample_in.abs()),
        ClipType::Asymmetric => {
            if sample_in > 0.0 {
                sample_in / (1.0 + sample_in.abs())
            } else {
                sample_in / (1.0 + (3.0 * sample_in).abs())
            }
        }
    }
}

#[cfg(test)]
mod test_clip {
    use super::*;

    #[test]
    fn stays_bounded() {
        for x in [-100.0, -1.0, -0.1, 0.0, 0.1, 1.0, 100.0] {
            assert!(clip_sample(&ClipType::Hard, x).abs() <= 1.0);
            assert!(clip_sample(&ClipType::Soft, x).abs() < 1.0);
            assert!(clip_sample(&ClipType::Asymmetric, x).abs() < 1.0);
        }
        assert_eq!(clip_sample(&ClipType::Soft, 1.0), 0.5);
        assert_eq!(clip_sample(&ClipType::Asymmetric, -1.0), -0.25);
    }
}
