use comms::event::User;
use ratatui::{prelude::*, widgets::*};

use super::ComponentRender;

/// Life totals of the other users side by side
pub struct TotalsBar;

pub struct RenderProps<'a> {
    pub area: Rect,
    pub users: &'a [&'a User],
}

impl ComponentRender<RenderProps<'_>> for TotalsBar {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: RenderProps<'_>) {
        if props.users.is_empty() {
            return;
        }

        let constraints: Vec<Constraint> = props
            .users
            .iter()
            .map(|_| Constraint::Ratio(1, props.users.len() as u32))
            .collect();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(props.area);

        for (user, area) in props.users.iter().zip(columns.iter()) {
            let life = Paragraph::new(Line::from(Span::from(user.life.to_string()).bold()))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(user.name.clone()),
                );
            frame.render_widget(life, *area);
        }
    }
}
