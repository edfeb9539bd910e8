use ratatui::{prelude::*, widgets::*};

use crate::state_store::{Toast, ToastLevel};

use super::ComponentRender;

const TOAST_WIDTH: u16 = 40;
const TOAST_HEIGHT: u16 = 3;

/// Overlay in the top right corner, drawn over whatever page is active
pub struct ToastOverlay;

fn level_color(level: ToastLevel) -> Color {
    match level {
        ToastLevel::Info => Color::Green,
        ToastLevel::Warning => Color::Yellow,
        ToastLevel::Error => Color::Red,
    }
}

pub struct RenderProps<'a> {
    pub area: Rect,
    pub toast: &'a Toast,
}

impl ComponentRender<RenderProps<'_>> for ToastOverlay {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: RenderProps<'_>) {
        let width = TOAST_WIDTH.min(props.area.width);
        let height = TOAST_HEIGHT.min(props.area.height);
        let area = Rect::new(
            props.area.x + props.area.width - width,
            props.area.y,
            width,
            height,
        );

        let color = level_color(props.toast.level);
        let toast = Paragraph::new(props.toast.message.clone())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color))
                    .title(Span::from("(x) dismiss").italic()),
            );

        frame.render_widget(Clear, area);
        frame.render_widget(toast, area);
    }
}
