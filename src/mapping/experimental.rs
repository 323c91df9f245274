//! Draft syntax: flow-relative keywords inside gradient functions.

use crate::mapping::handler::Handler;

pub(super) fn entries() -> Vec<(&'static str, Handler)> {
    vec![("background", Handler::Gradient), ("background-image", Handler::Gradient)]
}
