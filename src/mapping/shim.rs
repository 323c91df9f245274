//! Logical properties and values the baseline set leaves out.

use crate::mapping::baseline::axis_family;
use crate::mapping::handler::{Axis, Edge, Handler, Keyword};

const FLOAT_CLEAR: &[(&str, Keyword)] = &[
    ("inline-start", Keyword::Side(Axis::Inline, Edge::Start)),
    ("inline-end", Keyword::Side(Axis::Inline, Edge::End)),
];

const RESIZE: &[(&str, Keyword)] = &[
    ("block", Keyword::Fixed("vertical")),
    ("inline", Keyword::Fixed("horizontal")),
];

pub(super) fn entries() -> Vec<(&'static str, Handler)> {
    use Axis::{Block, Inline};

    let mut out = Vec::new();

    axis_family(
        &mut out,
        ["scroll-margin-inline", "scroll-margin-inline-start", "scroll-margin-inline-end"],
        "scroll-margin-{}",
        Inline,
        true,
    );
    axis_family(
        &mut out,
        ["scroll-margin-block", "scroll-margin-block-start", "scroll-margin-block-end"],
        "scroll-margin-{}",
        Block,
        true,
    );
    axis_family(
        &mut out,
        ["scroll-padding-inline", "scroll-padding-inline-start", "scroll-padding-inline-end"],
        "scroll-padding-{}",
        Inline,
        true,
    );
    axis_family(
        &mut out,
        ["scroll-padding-block", "scroll-padding-block-start", "scroll-padding-block-end"],
        "scroll-padding-{}",
        Block,
        true,
    );

    out.extend([
        ("overscroll-behavior-inline", Handler::Rename("overscroll-behavior-x")),
        ("overscroll-behavior-block", Handler::Rename("overscroll-behavior-y")),
        ("overflow-inline", Handler::Rename("overflow-x")),
        ("overflow-block", Handler::Rename("overflow-y")),
        ("contain-intrinsic-inline-size", Handler::Rename("contain-intrinsic-width")),
        ("contain-intrinsic-block-size", Handler::Rename("contain-intrinsic-height")),
        ("float", Handler::Keywords(FLOAT_CLEAR)),
        ("clear", Handler::Keywords(FLOAT_CLEAR)),
        ("resize", Handler::Keywords(RESIZE)),
    ]);

    out
}
