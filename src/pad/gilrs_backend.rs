use gilrs::ff::{BaseEffect, BaseEffectType, Effect, EffectBuilder, Envelope, Replay};
use gilrs::{Event, EventType, GamepadId, Gilrs};
use tracing::{debug, error, info, warn};

use crate::pad::backend::{
    motor_speed, normalize, BackendError, PollBackend, RawPadState, LEFT_STICK_DEADZONE,
    RIGHT_STICK_DEADZONE, STICK_RANGE, TRIGGER_RANGE,
};
use crate::pad::state::{Button, PadState, Slot};

/// Gamepad backend over the gilrs input library.
///
/// Owns the gilrs context and a four-entry slot map. Connected gamepads are
/// assigned to slots in discovery order and keep their slot until they
/// disconnect. All read failures degrade to the zeroed disconnected state.
pub struct GilrsBackend {
    gilrs: Gilrs,
    slots: [Option<GamepadId>; 4],
    // rumble effects live as long as their slot's pad stays connected
    effects: [Option<Effect>; 4],
}

impl GilrsBackend {
    pub fn new() -> Result<Self, BackendError> {
        info!("Initializing gilrs input backend");
        let gilrs = Gilrs::new().map_err(|e| {
            error!("Failed to initialize gilrs: {}", e);
            BackendError::InitializationError(e.to_string())
        })?;

        Ok(GilrsBackend {
            gilrs,
            slots: [None; 4],
            effects: [None, None, None, None],
        })
    }

    // Drains pending vendor events so gilrs' cached state is current, then
    // reconciles the slot map: disconnected pads free their slot, newly seen
    // pads fill the first free slot.
    fn refresh(&mut self) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => debug!("gamepad {} connected", id),
                EventType::Disconnected => debug!("gamepad {} disconnected", id),
                _ => {}
            }
        }

        for (i, entry) in self.slots.iter_mut().enumerate() {
            if let Some(id) = *entry {
                if !self.gilrs.gamepad(id).is_connected() {
                    info!("slot {} lost gamepad {}", i, id);
                    *entry = None;
                    self.effects[i] = None;
                }
            }
        }

        let unassigned: Vec<(GamepadId, String)> = self
            .gilrs
            .gamepads()
            .map(|(id, pad)| (id, pad.name().to_owned()))
            .filter(|(id, _)| !self.slots.contains(&Some(*id)))
            .collect();

        for (id, name) in unassigned {
            match self.slots.iter().position(|slot| slot.is_none()) {
                Some(free) => {
                    info!("assigned gamepad {} ({}) to slot {}", id, name, free);
                    self.slots[free] = Some(id);
                }
                None => warn!("no free slot for gamepad {} ({})", id, name),
            }
        }
    }

    fn connected_id(&self, slot: Slot) -> Option<GamepadId> {
        self.slots[slot.index()].filter(|&id| self.gilrs.gamepad(id).is_connected())
    }

    fn raw_state(&self, id: GamepadId) -> RawPadState {
        let pad = self.gilrs.gamepad(id);
        RawPadState {
            left_x: raw_axis(&pad, gilrs::Axis::LeftStickX),
            left_y: raw_axis(&pad, gilrs::Axis::LeftStickY),
            right_x: raw_axis(&pad, gilrs::Axis::RightStickX),
            right_y: raw_axis(&pad, gilrs::Axis::RightStickY),
            left_trigger: raw_trigger(&pad, gilrs::Button::LeftTrigger2),
            right_trigger: raw_trigger(&pad, gilrs::Button::RightTrigger2),
            buttons: button_mask(&pad),
        }
    }
}

impl PollBackend for GilrsBackend {
    fn state(&mut self, slot: Slot) -> PadState {
        self.refresh();
        match self.connected_id(slot) {
            Some(id) => normalize(
                &self.raw_state(id),
                LEFT_STICK_DEADZONE,
                RIGHT_STICK_DEADZONE,
            ),
            None => PadState::default(),
        }
    }

    fn state_with_deadzone(&mut self, slot: Slot, deadzone: f32) -> PadState {
        self.refresh();
        match self.connected_id(slot) {
            Some(id) => normalize(&self.raw_state(id), deadzone, deadzone),
            None => PadState::default(),
        }
    }

    fn set_rumble(&mut self, slot: Slot, left: f32, right: f32) {
        self.refresh();
        let Some(id) = self.connected_id(slot) else {
            debug!("rumble ignored, no gamepad in slot {:?}", slot);
            return;
        };

        let strong = motor_speed(left);
        let weak = motor_speed(right);
        if strong == 0 && weak == 0 {
            // dropping the stored effect stops playback
            self.effects[slot.index()] = None;
            return;
        }

        let mut builder = EffectBuilder::new();
        builder
            .add_effect(BaseEffect {
                kind: BaseEffectType::Strong { magnitude: strong },
                scheduling: Replay::default(),
                envelope: Envelope::default(),
            })
            .add_effect(BaseEffect {
                kind: BaseEffectType::Weak { magnitude: weak },
                scheduling: Replay::default(),
                envelope: Envelope::default(),
            });
        {
            let pad = self.gilrs.gamepad(id);
            if !pad.is_ff_supported() {
                debug!("gamepad {} has no force feedback support", id);
                return;
            }
            builder.add_gamepad(&pad);
        }

        match builder.finish(&mut self.gilrs) {
            Ok(effect) => {
                if let Err(e) = effect.play() {
                    debug!("failed to play rumble effect: {}", e);
                }
                self.effects[slot.index()] = Some(effect);
            }
            Err(e) => debug!("failed to upload rumble effect: {}", e),
        }
    }
}

// gilrs reports stick axes as [-1, 1] floats; expand them back to the
// vendor's raw scale so the shared normalization owns the whole curve.
fn raw_axis(pad: &gilrs::Gamepad<'_>, axis: gilrs::Axis) -> i16 {
    let value = pad.axis_data(axis).map_or(0.0, |data| data.value());
    (value * STICK_RANGE) as i16
}

fn raw_trigger(pad: &gilrs::Gamepad<'_>, button: gilrs::Button) -> u8 {
    let value = pad.button_data(button).map_or(0.0, |data| data.value());
    (value * TRIGGER_RANGE) as u8
}

fn button_mask(pad: &gilrs::Gamepad<'_>) -> u16 {
    Button::ALL
        .iter()
        .filter(|&&button| pad.is_pressed(vendor_button(button)))
        .fold(0, |mask, &button| mask | button.bit())
}

fn vendor_button(button: Button) -> gilrs::Button {
    match button {
        Button::DpadUp => gilrs::Button::DPadUp,
        Button::DpadDown => gilrs::Button::DPadDown,
        Button::DpadLeft => gilrs::Button::DPadLeft,
        Button::DpadRight => gilrs::Button::DPadRight,
        Button::Start => gilrs::Button::Start,
        Button::Back => gilrs::Button::Select,
        Button::LeftThumb => gilrs::Button::LeftThumb,
        Button::RightThumb => gilrs::Button::RightThumb,
        Button::LeftShoulder => gilrs::Button::LeftTrigger,
        Button::RightShoulder => gilrs::Button::RightTrigger,
        Button::A => gilrs::Button::South,
        Button::B => gilrs::Button::East,
        Button::X => gilrs::Button::North,
        Button::Y => gilrs::Button::West,
    }
}
