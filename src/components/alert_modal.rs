use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, centered_rect,
};

use super::Component;
use crate::action::Action;

pub const ALERT_WIDTH: u16 = 50;
pub const ALERT_HEIGHT: u16 = 7;

/// Blocking message box; any of Enter, Esc or Space closes it
pub struct AlertModal {
    modal: Modal,
}

pub struct AlertModalProps<'a> {
    pub message: &'a str,
    pub is_focused: bool,
    pub on_dismiss: fn() -> Action,
}

impl Default for AlertModal {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl AlertModal {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for AlertModal {
    type Props<'a> = AlertModalProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some((props.on_dismiss)()),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let modal_area = centered_rect(ALERT_WIDTH, ALERT_HEIGHT, area);
        let message = props.message.to_string();

        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let [body, hint] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)])
                .flex(Flex::Center)
                .areas(content_area);

            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(Color::Rgb(240, 200, 120)).bold(),
                )))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
                body,
            );
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled("Enter", Style::default().fg(Color::Cyan).bold()),
                    Span::styled(" to dismiss", Style::default().fg(Color::DarkGray)),
                ]))
                .alignment(Alignment::Center),
                hint,
            );
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(Color::Rgb(45, 35, 35)),
                        padding: Padding::all(1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: props.on_dismiss,
                render_content: &mut render_content,
            },
        );
    }
}
