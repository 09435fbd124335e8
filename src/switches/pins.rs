//! Limit switches wired to GPIO inputs.

use core::cell::RefCell;

use embedded_hal::digital::InputPin;

use crate::config::SwitchConfig;

use super::{LimitMask, LimitSwitches};

struct Inputs<XP, XN, YP, YN> {
    x_pos: XP,
    x_neg: XN,
    y_pos: YP,
    y_neg: YN,
}

/// Four switch inputs read into a [`LimitMask`] on every query.
///
/// A pin that fails to read counts as triggered, which stops motion toward it.
pub struct PinLimitSwitches<XP, XN, YP, YN>
where
    XP: InputPin,
    XN: InputPin,
    YP: InputPin,
    YN: InputPin,
{
    inputs: RefCell<Inputs<XP, XN, YP, YN>>,
    normally_closed: bool,
}

impl<XP, XN, YP, YN> PinLimitSwitches<XP, XN, YP, YN>
where
    XP: InputPin,
    XN: InputPin,
    YP: InputPin,
    YN: InputPin,
{
    /// Wrap the four inputs.
    pub fn new(x_pos: XP, x_neg: XN, y_pos: YP, y_neg: YN, config: &SwitchConfig) -> Self {
        Self {
            inputs: RefCell::new(Inputs {
                x_pos,
                x_neg,
                y_pos,
                y_neg,
            }),
            normally_closed: config.normally_closed,
        }
    }

    /// Give the pins back.
    pub fn release(self) -> (XP, XN, YP, YN) {
        let inputs = self.inputs.into_inner();
        (inputs.x_pos, inputs.x_neg, inputs.y_pos, inputs.y_neg)
    }

    fn active<P: InputPin>(pin: &mut P, normally_closed: bool) -> bool {
        match pin.is_high() {
            Ok(high) => high != normally_closed,
            Err(_) => true,
        }
    }
}

impl<XP, XN, YP, YN> LimitSwitches for PinLimitSwitches<XP, XN, YP, YN>
where
    XP: InputPin,
    XN: InputPin,
    YP: InputPin,
    YN: InputPin,
{
    fn sample(&self) -> LimitMask {
        let nc = self.normally_closed;
        let mut inputs = self.inputs.borrow_mut();

        let mut mask = LimitMask::NONE;
        mask.set(LimitMask::X_POS, Self::active(&mut inputs.x_pos, nc));
        mask.set(LimitMask::X_NEG, Self::active(&mut inputs.x_neg, nc));
        mask.set(LimitMask::Y_POS, Self::active(&mut inputs.y_pos, nc));
        mask.set(LimitMask::Y_NEG, Self::active(&mut inputs.y_neg, nc));
        mask
    }
}
