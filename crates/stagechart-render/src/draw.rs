use crate::canvas::{ArrowShape, Canvas, RoundedBoxShape, TextAnnotation, TextRole};
use stagechart_core::geom::Bounds;
use stagechart_core::layout::{BoxLayout, ConnectorLayout, TitleLayout};
use stagechart_core::style::{ArrowStyle, BoxStyle, TextStyle};

/// One filled rounded rectangle plus its centered label.
pub fn draw_stage_box<C: Canvas>(canvas: &mut C, layout: &BoxLayout) {
    canvas.draw_rounded_box(RoundedBoxShape {
        x: layout.x,
        y: layout.y,
        width: layout.width,
        height: layout.height,
        fill: layout.fill,
        style: BoxStyle::default(),
    });
    let center = layout.center();
    canvas.draw_text(TextAnnotation {
        text: layout.label.clone(),
        x: center.x,
        y: center.y,
        role: TextRole::Label,
        style: TextStyle::LABEL,
    });
}

pub fn draw_connector<C: Canvas>(canvas: &mut C, connector: &ConnectorLayout) {
    canvas.draw_arrow(ArrowShape {
        start: connector.start,
        end: connector.end,
        style: ArrowStyle::default(),
    });
}

/// Title, data bounds, hidden axes frame.
pub fn finalize<C: Canvas>(canvas: &mut C, title: &TitleLayout, bounds: Bounds) {
    canvas.draw_text(TextAnnotation {
        text: title.text.clone(),
        x: title.x,
        y: title.y,
        role: TextRole::Title,
        style: TextStyle::TITLE,
    });
    canvas.set_bounds(bounds);
    canvas.set_axes_visible(false);
}
