//! Standard logical properties: box edges, borders, radii, sizes, `text-align`.

use crate::mapping::handler::{Axis, Edge, Handler, Keyword};

const TEXT_ALIGN: &[(&str, Keyword)] = &[
    ("start", Keyword::Side(Axis::Inline, Edge::Start)),
    ("end", Keyword::Side(Axis::Inline, Edge::End)),
];

/// Push a shorthand and its `-start`/`-end` longhands.
pub(super) fn axis_family(
    out: &mut Vec<(&'static str, Handler)>,
    [shorthand, start, end]: [&'static str; 3],
    pattern: &'static str,
    axis: Axis,
    spread: bool,
) {
    out.push((
        shorthand,
        Handler::Axis {
            pattern,
            axis,
            spread,
        },
    ));
    out.push((
        start,
        Handler::Edge {
            pattern,
            axis,
            edge: Edge::Start,
        },
    ));
    out.push((
        end,
        Handler::Edge {
            pattern,
            axis,
            edge: Edge::End,
        },
    ));
}

pub(super) fn entries() -> Vec<(&'static str, Handler)> {
    use Axis::{Block, Inline};

    let mut out = Vec::new();

    axis_family(
        &mut out,
        ["margin-inline", "margin-inline-start", "margin-inline-end"],
        "margin-{}",
        Inline,
        true,
    );
    axis_family(
        &mut out,
        ["margin-block", "margin-block-start", "margin-block-end"],
        "margin-{}",
        Block,
        true,
    );
    axis_family(
        &mut out,
        ["padding-inline", "padding-inline-start", "padding-inline-end"],
        "padding-{}",
        Inline,
        true,
    );
    axis_family(
        &mut out,
        ["padding-block", "padding-block-start", "padding-block-end"],
        "padding-{}",
        Block,
        true,
    );
    axis_family(
        &mut out,
        ["inset-inline", "inset-inline-start", "inset-inline-end"],
        "{}",
        Inline,
        true,
    );
    axis_family(
        &mut out,
        ["inset-block", "inset-block-start", "inset-block-end"],
        "{}",
        Block,
        true,
    );

    axis_family(
        &mut out,
        ["border-inline", "border-inline-start", "border-inline-end"],
        "border-{}",
        Inline,
        false,
    );
    axis_family(
        &mut out,
        ["border-block", "border-block-start", "border-block-end"],
        "border-{}",
        Block,
        false,
    );
    axis_family(
        &mut out,
        ["border-inline-width", "border-inline-start-width", "border-inline-end-width"],
        "border-{}-width",
        Inline,
        true,
    );
    axis_family(
        &mut out,
        ["border-block-width", "border-block-start-width", "border-block-end-width"],
        "border-{}-width",
        Block,
        true,
    );
    axis_family(
        &mut out,
        ["border-inline-style", "border-inline-start-style", "border-inline-end-style"],
        "border-{}-style",
        Inline,
        true,
    );
    axis_family(
        &mut out,
        ["border-block-style", "border-block-start-style", "border-block-end-style"],
        "border-{}-style",
        Block,
        true,
    );
    axis_family(
        &mut out,
        ["border-inline-color", "border-inline-start-color", "border-inline-end-color"],
        "border-{}-color",
        Inline,
        true,
    );
    axis_family(
        &mut out,
        ["border-block-color", "border-block-start-color", "border-block-end-color"],
        "border-{}-color",
        Block,
        true,
    );

    out.extend([
        (
            "border-start-start-radius",
            Handler::Corner {
                block: Edge::Start,
                inline: Edge::Start,
            },
        ),
        (
            "border-start-end-radius",
            Handler::Corner {
                block: Edge::Start,
                inline: Edge::End,
            },
        ),
        (
            "border-end-start-radius",
            Handler::Corner {
                block: Edge::End,
                inline: Edge::Start,
            },
        ),
        (
            "border-end-end-radius",
            Handler::Corner {
                block: Edge::End,
                inline: Edge::End,
            },
        ),
        ("inline-size", Handler::Rename("width")),
        ("block-size", Handler::Rename("height")),
        ("min-inline-size", Handler::Rename("min-width")),
        ("max-inline-size", Handler::Rename("max-width")),
        ("min-block-size", Handler::Rename("min-height")),
        ("max-block-size", Handler::Rename("max-height")),
        ("inset", Handler::Inset),
        ("text-align", Handler::Keywords(TEXT_ALIGN)),
    ]);

    out
}
