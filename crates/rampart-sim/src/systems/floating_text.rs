//! Fades and lifts floating texts; drops them once fully faded.

use rampart_core::constants::{FLOATING_TEXT_FADE_RATE, FLOATING_TEXT_RISE_SPEED};
use rampart_core::events::FloatingText;

pub fn run(texts: &mut Vec<FloatingText>, dt: f64) {
    texts.retain_mut(|text| {
        text.life -= dt * FLOATING_TEXT_FADE_RATE;
        text.position.y -= FLOATING_TEXT_RISE_SPEED * dt;
        text.life > 0.0
    });
}
