//! Intro animation: plates and title fading in and sliding down.

use std::time::Duration;

/// Distance every element slides down while it appears.
pub const SLIDE_DISTANCE: f32 = 30.0;

/// Time each element takes to fade in.
pub const FADE_SECS: f32 = 1.5;

/// Accelerate-decelerate easing over `0.0..=1.0`.
///
/// A logistic curve centred on the midpoint, rescaled so the ends land
/// exactly on 0 and 1.
pub fn accel_decel(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let sigmoid = |x: f32| 1.0 / (1.0 + (-(x - 0.5) * 12.0).exp());
    let lo = sigmoid(0.0);
    let hi = sigmoid(1.0);
    (sigmoid(t) - lo) / (hi - lo)
}

/// What an intro element is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroKind {
    /// A decorative plate.
    Plate,
    /// The game title.
    Title,
}

/// One animated element of the intro.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntroElement {
    /// Plate or title.
    pub kind: IntroKind,
    /// Resting height in world units.
    pub rest_y: f32,
    /// Width scale relative to the disk base width.
    pub scale: f32,
    /// Seconds before the element starts to fade in.
    pub delay_secs: f32,
    /// Seconds the slide takes. The slide starts at once, so it ends
    /// together with the fade.
    pub travel_secs: f32,
}

/// Where an element is drawn on a given frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntroFrame {
    /// The element.
    pub element: IntroElement,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f32,
    /// Current height in world units.
    pub y: f32,
}

/// The whole intro: three plates then the title.
#[derive(Debug, Clone, PartialEq)]
pub struct IntroAnimation {
    elements: Vec<IntroElement>,
}

impl Default for IntroAnimation {
    fn default() -> Self {
        let plate = |rest_y, scale, delay_secs, travel_secs| IntroElement {
            kind: IntroKind::Plate,
            rest_y,
            scale,
            delay_secs,
            travel_secs,
        };
        Self {
            elements: vec![
                plate(130.0, 1.0, 0.0, 1.5),
                plate(195.0, 0.8, 1.0, 2.5),
                plate(265.0, 0.6, 2.0, 3.5),
                IntroElement {
                    kind: IntroKind::Title,
                    rest_y: 380.0,
                    scale: 1.0,
                    delay_secs: 3.0,
                    travel_secs: 4.5,
                },
            ],
        }
    }
}

impl IntroAnimation {
    /// The animated elements in draw order.
    pub fn elements(&self) -> &[IntroElement] {
        &self.elements
    }

    /// Every element's state `elapsed` into the intro.
    pub fn frame(&self, elapsed: Duration) -> Vec<IntroFrame> {
        let t = elapsed.as_secs_f32();
        self.elements
            .iter()
            .map(|element| {
                let local = t - element.delay_secs;
                let opacity = accel_decel(local / FADE_SECS);
                let travelled = accel_decel(t / element.travel_secs);
                IntroFrame {
                    element: *element,
                    opacity,
                    y: element.rest_y + SLIDE_DISTANCE * (1.0 - travelled),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints_and_midpoint() {
        assert_eq!(accel_decel(0.0), 0.0);
        assert!((accel_decel(1.0) - 1.0).abs() < 1e-6);
        assert!((accel_decel(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(accel_decel(-3.0), 0.0);
    }

    #[test]
    fn test_easing_is_slow_at_the_ends() {
        let start = accel_decel(0.1) - accel_decel(0.0);
        let middle = accel_decel(0.55) - accel_decel(0.45);
        assert!(middle > start);
    }

    #[test]
    fn test_elements_start_hidden_and_raised() {
        let frame = IntroAnimation::default().frame(Duration::ZERO);
        assert_eq!(frame.len(), 4);
        for f in &frame {
            assert_eq!(f.opacity, 0.0);
            assert_eq!(f.y, f.element.rest_y + SLIDE_DISTANCE);
        }
    }

    #[test]
    fn test_first_plate_settles_before_later_ones() {
        let frame = IntroAnimation::default().frame(Duration::from_secs(2));
        assert!((frame[0].opacity - 1.0).abs() < 1e-6);
        assert!((frame[0].y - 130.0).abs() < 1e-3);
        assert!(frame[1].opacity > 0.0 && frame[1].opacity < 1.0);
        assert_eq!(frame[3].opacity, 0.0);
    }

    #[test]
    fn test_slide_starts_before_fade() {
        let frame = IntroAnimation::default().frame(Duration::from_secs(2));
        let title = frame[3];
        assert_eq!(title.opacity, 0.0);
        assert!(title.y < title.element.rest_y + SLIDE_DISTANCE);
    }

    #[test]
    fn test_fade_and_slide_finish_together() {
        let animation = IntroAnimation::default();
        for element in animation.elements() {
            let end = Duration::from_secs_f32(element.travel_secs);
            let frame = animation
                .frame(end)
                .into_iter()
                .find(|f| f.element == *element)
                .unwrap();
            assert!((frame.opacity - 1.0).abs() < 1e-5);
            assert!((frame.y - element.rest_y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_everything_rests_eventually() {
        let frame = IntroAnimation::default().frame(Duration::from_secs(10));
        for f in &frame {
            assert!((f.opacity - 1.0).abs() < 1e-6);
            assert!((f.y - f.element.rest_y).abs() < 1e-3);
        }
    }
}
