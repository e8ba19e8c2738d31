use egui::Key;
use voxelspace::Intents;

// W/S fly forward/back, A/D strafe, E/Q climb/sink, arrows pitch
pub fn intents_from(key_down: impl Fn(Key) -> bool) -> Intents {
    Intents {
        forward: key_down(Key::W),
        back: key_down(Key::S),
        left: key_down(Key::A),
        right: key_down(Key::D),
        ascend: key_down(Key::E),
        descend: key_down(Key::Q),
        pitch_up: key_down(Key::ArrowUp),
        pitch_down: key_down(Key::ArrowDown),
    }
}

// Held keys this frame; nothing while a text field has focus
pub fn poll(ctx: &egui::Context) -> Intents {
    if ctx.wants_keyboard_input() {
        return Intents::default();
    }
    ctx.input(|i| intents_from(|key| i.key_down(key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_intents() {
        let held = [Key::W, Key::D, Key::ArrowDown];
        let intents = intents_from(|k| held.contains(&k));
        assert_eq!(
            intents,
            Intents {
                forward: true,
                right: true,
                pitch_down: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn no_keys_no_intents() {
        assert!(!intents_from(|_| false).any());
    }
}
