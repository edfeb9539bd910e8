use ratatui::{
    prelude::*,
    widgets::{block::Title, *},
};

use super::ComponentRender;

pub struct TabBar;

pub struct RenderProps<'a> {
    pub area: Rect,
    pub titles: &'a [&'a str],
    pub selected: usize,
    pub connected: bool,
}

impl ComponentRender<RenderProps<'_>> for TabBar {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: RenderProps<'_>) {
        let status = if props.connected {
            Span::from(" ● online ").fg(Color::Green)
        } else {
            Span::from(" ○ offline ").fg(Color::Red)
        };

        let titles: Vec<Line> = props
            .titles
            .iter()
            .enumerate()
            .map(|(idx, title)| Line::from(format!("{} {}", idx + 1, title)))
            .collect();

        let tabs = Tabs::new(titles)
            .select(props.selected)
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("LifeLink")
                    .title(Title::from(Line::from(status)).alignment(Alignment::Right)),
            );
        frame.render_widget(tabs, props.area);
    }
}
