use ratatui::{prelude::*, widgets::*};

use super::ComponentRender;

/// Placeholder while something is still on its way from the server
pub struct FullPageLoader;

pub struct RenderProps<'a> {
    pub area: Rect,
    pub message: &'a str,
}

impl ComponentRender<RenderProps<'_>> for FullPageLoader {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: RenderProps<'_>) {
        let top_padding = props.area.height.saturating_sub(1) / 2;
        let mut lines = vec![Line::from(""); top_padding as usize];
        lines.push(Line::from(Span::from(props.message.to_string()).italic()));

        let loader = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(loader, props.area);
    }
}
